//! CLI error types with miette diagnostics.
//!
//! Maps `omada_api::Error` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use omada_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const PROTOCOL: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to controller at {url}")]
    #[diagnostic(
        code(omada::connection_failed),
        help(
            "Check that the controller is running and reachable.\n\
             Self-signed certificate? Try: omada --insecure sites"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: omada_api::Error,
    },

    #[error("TLS setup failed: {message}")]
    #[diagnostic(
        code(omada::tls_error),
        help(
            "Check the ca_cert path in your profile, or use --insecure (-k)\n\
             to skip certificate verification."
        )
    )]
    Tls { message: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(omada::timeout),
        help("Increase timeout with --timeout or check controller responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(omada::auth_failed),
        help(
            "Verify the username and password for profile '{profile}'.\n\
             The password is read from password_env, OMADA_PASSWORD, or the config file."
        )
    )]
    AuthFailed { profile: String, message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(omada::no_credentials),
        help(
            "Configure credentials with: omada config init\n\
             Or set OMADA_USERNAME and OMADA_PASSWORD."
        )
    )]
    NoCredentials { profile: String },

    #[error("Site '{site}' is not visible to this account")]
    #[diagnostic(
        code(omada::site_not_permitted),
        help("Sites available to this account: {available}")
    )]
    SitePermission { site: String, available: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(omada::not_found),
        help("Run: omada {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────

    #[error("Controller rejected the request (errorCode {code}): {message}")]
    #[diagnostic(code(omada::api_error))]
    ApiError { code: i64, message: String },

    #[error("Unexpected controller response: {message}")]
    #[diagnostic(
        code(omada::protocol),
        help("The controller version may not be supported. Re-run with -vv for request details.")
    )]
    Protocol { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(omada::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(omada::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: omada config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No controller configured")]
    #[diagnostic(
        code(omada::no_config),
        help(
            "Create a profile with: omada config init\n\
             Or pass --controller. Config expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(omada::config))]
    Config(Box<ConfigError>),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error("{path}: {source}")]
    #[diagnostic(code(omada::io))]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(omada::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(omada::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::Tls { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::SitePermission { .. } => exit_code::PERMISSION,
            Self::NotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::ApiError { .. } | Self::Protocol { .. } => exit_code::PROTOCOL,
            Self::Validation { .. } | Self::NoConfig { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── omada_api::Error → CliError mapping ──────────────────────────────

impl From<omada_api::Error> for CliError {
    fn from(err: omada_api::Error) -> Self {
        use omada_api::Error;

        match err {
            Error::Transport(ref e) if e.is_timeout() => Self::Timeout,
            Error::Transport(ref e) => Self::ConnectionFailed {
                url: e.url().map(ToString::to_string).unwrap_or_default(),
                source: err,
            },
            Error::InvalidUrl(e) => Self::Validation {
                field: "controller".into(),
                reason: e.to_string(),
            },
            Error::Tls(message) => Self::Tls { message },
            Error::Io { path, source } => Self::File { path, source },
            Error::Protocol { message, .. } => Self::Protocol { message },
            Error::Api { error_code, msg } => Self::ApiError {
                code: error_code,
                message: msg.unwrap_or_else(|| "no message".into()),
            },
            Error::Authentication { message } => Self::AuthFailed {
                profile: "current".into(),
                message,
            },
            Error::NotLoggedIn => Self::Protocol {
                message: "request attempted without a session".into(),
            },
            Error::Permission { site } => Self::SitePermission {
                site,
                available: String::new(),
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(Box::new(other)),
        }
    }
}
