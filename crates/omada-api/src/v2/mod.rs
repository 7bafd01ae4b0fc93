// Omada v2 API client modules
//
// Hand-written client for the controller's `/api/v2` endpoints. Every
// response is wrapped in the `{ errorCode, msg, result }` envelope; list
// endpoints page through `currentPage` / `currentPageSize`.

pub mod auth;
pub mod client;
pub mod clients;
pub mod envelope;
pub mod events;
pub mod models;
pub mod paginate;
pub mod profiles;
pub mod settings;
pub mod sites;
pub mod system;
pub mod vouchers;

pub use client::{ClientConfig, OmadaClient, Payload, QueryParams};
pub use paginate::Pages;
