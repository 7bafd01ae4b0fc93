// Omada v2 API HTTP client
//
// Wraps `reqwest::Client` with Omada-specific URL construction
// (`{base}{/omadacId}/api/v2{path}`), token and timestamp stamping, and
// envelope unwrapping. Endpoint groups are implemented as inherent methods
// in sibling files to keep this module focused on transport mechanics.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::{CurrentUser, LoginResult, SiteKeys, TOKEN_HEADER, TOKEN_PARAM, TokenPlacement};
use crate::error::Error;
use crate::transport::TransportConfig;
use crate::v2::envelope;

/// Path segment shared by every v2 endpoint.
pub const API_PATH: &str = "/api/v2";

/// Rows requested per page unless the caller overrides `currentPageSize`.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Site used when an endpoint is called without an explicit site name.
pub const DEFAULT_SITE: &str = "Default";

/// Query parameter carrying the millisecond request timestamp.
const TIMESTAMP_PARAM: &str = "_";

/// String-keyed query parameters. Boolean-ish values are sent as
/// `"true"` / `"false"`.
pub type QueryParams = BTreeMap<String, String>;

/// Request body variants the controller accepts.
#[derive(Debug, Default)]
pub enum Payload {
    #[default]
    Empty,
    Json(serde_json::Value),
    Multipart(reqwest::multipart::Form),
}

/// Connection settings for an [`OmadaClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Controller root, e.g. `https://omada.local:8043`.
    pub base_url: Url,
    /// Site used when a site-scoped call gets no name.
    pub site: String,
    pub transport: TransportConfig,
    pub token_placement: TokenPlacement,
    pub page_size: u32,
}

impl ClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            site: DEFAULT_SITE.into(),
            transport: TransportConfig::default(),
            token_placement: TokenPlacement::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Authentication state. Exists only between a successful login and logout.
#[derive(Debug)]
pub(crate) struct Session {
    pub login: LoginResult,
    pub user: CurrentUser,
    pub sites: SiteKeys,
}

/// Client for one logical session with an Omada controller.
///
/// Requests are strictly sequential. Login and logout take `&mut self`;
/// everything else borrows, so a paged listing can hold the client while
/// it is being consumed. Independent sessions are independent values.
#[derive(Debug)]
pub struct OmadaClient {
    http: reqwest::Client,
    base_url: Url,
    default_site: String,
    /// `"/{omadacId}"` once discovered, empty for pre-v5 controllers.
    pub(crate) controller_id: String,
    token_placement: TokenPlacement,
    page_size: u32,
    pub(crate) warnings: bool,
    pub(crate) session: Option<Session>,
    last_timestamp: AtomicI64,
}

impl OmadaClient {
    /// Create a client from a [`ClientConfig`].
    ///
    /// A cookie jar is always attached; the controller pairs the token with
    /// a session cookie.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let transport = if config.transport.cookie_jar.is_some() {
            config.transport.clone()
        } else {
            config.transport.clone().with_cookie_jar()
        };
        let http = transport.build_client()?;
        let mut client = Self::with_client(http, config.base_url, config.site);
        client.token_placement = config.token_placement;
        client.page_size = config.page_size.max(1);
        client.warnings = config.transport.warnings;
        Ok(client)
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, site: String) -> Self {
        Self {
            http,
            base_url,
            default_site: site,
            controller_id: String::new(),
            token_placement: TokenPlacement::default(),
            page_size: DEFAULT_PAGE_SIZE,
            warnings: true,
            session: None,
            last_timestamp: AtomicI64::new(0),
        }
    }

    pub fn with_token_placement(mut self, placement: TokenPlacement) -> Self {
        self.token_placement = placement;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_warnings(mut self, warnings: bool) -> Self {
        self.warnings = warnings;
        self
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn default_site(&self) -> &str {
        &self.default_site
    }

    /// The discovered controller-instance id, if any.
    pub fn controller_id(&self) -> Option<&str> {
        self.controller_id.strip_prefix('/')
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn token_placement(&self) -> TokenPlacement {
        self.token_placement
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    /// The user record fetched at login.
    pub fn user(&self) -> Option<&CurrentUser> {
        self.session.as_ref().map(|s| &s.user)
    }

    /// The site key table built at login.
    pub fn site_keys(&self) -> Option<&SiteKeys> {
        self.session.as_ref().map(|s| &s.sites)
    }

    pub(crate) fn session(&self) -> Result<&Session, Error> {
        self.session.as_ref().ok_or(Error::NotLoggedIn)
    }

    // ── Site resolution ──────────────────────────────────────────────

    /// Map a site display name (or the default site) to its opaque key.
    ///
    /// Never touches the network.
    pub fn resolve_site_key(&self, name: Option<&str>) -> Result<&str, Error> {
        let session = self.session()?;
        session.sites.resolve(name.unwrap_or(&self.default_site))
    }

    /// `/sites/{key}{suffix}` for a site-scoped endpoint.
    pub(crate) fn site_path(&self, site: Option<&str>, suffix: &str) -> Result<String, Error> {
        let key = self.resolve_site_key(site)?;
        Ok(format!("/sites/{key}{suffix}"))
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{base}{/omadacId}/api/v2{path}`
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        self.api_url_for(&self.controller_id, path)
    }

    /// [`api_url`](Self::api_url) under an explicit `"/{omadacId}"` prefix.
    pub(crate) fn api_url_for(&self, controller_id: &str, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}{controller_id}{API_PATH}{path}");
        Ok(Url::parse(&full)?)
    }

    /// `{base}{path}` for the few endpoints outside `/api/v2`.
    pub(crate) fn root_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{path}"))?)
    }

    // ── Stamping ─────────────────────────────────────────────────────

    /// Millisecond Unix timestamp, strictly increasing within this client.
    pub(crate) fn next_timestamp(&self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        let prev = self
            .last_timestamp
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |prev| {
                Some(now.max(prev + 1))
            })
            .unwrap_or_else(|prev| prev);
        now.max(prev + 1)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Issue an authenticated request and unwrap the envelope.
    ///
    /// Fails with [`Error::NotLoggedIn`] before any I/O when there is no
    /// session.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: QueryParams,
        payload: Payload,
    ) -> Result<T, Error> {
        let token = &self.session()?.login.token;
        self.dispatch(method, path, params, payload, token).await
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: QueryParams,
    ) -> Result<T, Error> {
        self.request(Method::GET, path, params, Payload::Empty).await
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: Payload,
    ) -> Result<T, Error> {
        self.request(Method::POST, path, QueryParams::new(), payload)
            .await
    }

    pub(crate) async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T, Error> {
        self.request(Method::PATCH, path, QueryParams::new(), Payload::Json(body))
            .await
    }

    /// Stamp and send a request with an explicit token.
    pub(crate) async fn dispatch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: QueryParams,
        payload: Payload,
        token: &SecretString,
    ) -> Result<T, Error> {
        let url = self.api_url(path)?;
        self.send_stamped(method, url, params, payload, token).await
    }

    /// Stamp and send a request to a fully built URL.
    ///
    /// Login uses this directly to fetch the current user before the
    /// session and controller id are committed.
    pub(crate) async fn send_stamped<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        mut params: QueryParams,
        payload: Payload,
        token: &SecretString,
    ) -> Result<T, Error> {
        debug!(%method, %url, "omada request");

        params.insert(TIMESTAMP_PARAM.into(), self.next_timestamp().to_string());
        if self.token_placement.in_query() {
            params.insert(TOKEN_PARAM.into(), token.expose_secret().to_owned());
        }

        let mut builder = self.http.request(method, url).query(&params);
        if self.token_placement.in_header() {
            builder = builder.header(TOKEN_HEADER, token.expose_secret());
        }
        builder = match payload {
            Payload::Empty => builder,
            Payload::Json(body) => builder.json(&body),
            Payload::Multipart(form) => builder.multipart(form),
        };

        let resp = builder.send().await?.error_for_status()?;
        let body = resp.text().await?;
        envelope::decode(&body)
    }

    /// Send an unauthenticated request (discovery, login).
    pub(crate) async fn send_public(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<envelope::Envelope, Error> {
        let resp = builder.send().await?.error_for_status()?;
        let body = resp.text().await?;
        envelope::Envelope::parse(&body)
    }
}
