// omada-api: Async Rust client for the TP-Link Omada controller API (v2)

pub mod auth;
pub mod error;
pub mod transport;
pub mod v2;

pub use auth::{CurrentUser, LoginResult, SiteKeys, SitePrivilege, TokenPlacement};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
pub use v2::client::{DEFAULT_PAGE_SIZE, DEFAULT_SITE};
pub use v2::events::{Level, LogFilter, Module};
pub use v2::models::{
    ApiInfo, Client, Device, LanProfile, LogEntry, Page, Site, Voucher, VoucherGroup,
};
pub use v2::profiles::GroupType;
pub use v2::settings::SettingsUpdate;
pub use v2::system::CertificateInstall;
pub use v2::{ClientConfig, OmadaClient, Pages, Payload, QueryParams};

pub use reqwest::Method;
