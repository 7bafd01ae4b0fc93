use thiserror::Error;

/// Top-level error type for the `omada-api` crate.
///
/// One variant per failure class a caller can branch on: transport,
/// protocol (malformed envelope), server-reported API errors, and the
/// session-state guards (not logged in, login rejected, site privilege).
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS, TLS handshake,
    /// timeout, or a non-2xx HTTP status).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS or HTTP client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Local file error (certificate uploads).
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ── Envelope ────────────────────────────────────────────────────
    /// The response body was not a `{errorCode, msg, result}` envelope,
    /// or the `result` did not match the expected shape.
    #[error("Protocol error: {message}")]
    Protocol { message: String, body: String },

    /// Well-formed envelope carrying a non-zero `errorCode`.
    #[error("Omada API error {error_code}: {}", msg.as_deref().unwrap_or("no message"))]
    Api { error_code: i64, msg: Option<String> },

    // ── Session ─────────────────────────────────────────────────────
    /// Login rejected by the controller.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// An authenticated call was attempted without a session.
    #[error("Not logged in")]
    NotLoggedIn,

    /// The site is not in the current user's privilege list.
    #[error("Current user does not have privilege to site \"{site}\"")]
    Permission { site: String },
}

impl Error {
    /// Returns `true` for transport failures a caller might reasonably retry.
    ///
    /// The client itself never retries.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Returns `true` if re-authenticating might resolve this error.
    pub fn is_auth_failure(&self) -> bool {
        match self {
            Self::Authentication { .. } | Self::NotLoggedIn => true,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::UNAUTHORIZED),
            _ => false,
        }
    }

    /// The controller's `errorCode`, if this is an API error.
    pub fn api_error_code(&self) -> Option<i64> {
        match self {
            Self::Api { error_code, .. } => Some(*error_code),
            _ => None,
        }
    }
}
