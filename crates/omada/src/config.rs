//! CLI configuration: thin wrapper around `omada_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--controller, --site, --username, --insecure, --timeout).

use secrecy::SecretString;

use omada_api::ClientConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use omada_config::{Config, Profile, config_path, load_config_or_default, save_config};

/// Everything needed to open one controller session.
#[derive(Debug)]
pub struct Connection {
    pub profile_name: String,
    pub client: ClientConfig,
    pub username: String,
    pub password: SecretString,
}

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// The active profile with flag overrides applied.
///
/// With no matching profile, `--controller` alone is enough to build one.
pub fn effective_profile(global: &GlobalOpts, config: &Config) -> Result<(String, Profile), CliError> {
    let name = active_profile_name(global, config);

    let mut profile = match (config.profiles.get(&name), &global.controller) {
        (Some(profile), _) => profile.clone(),
        (None, Some(controller)) => Profile::new(controller.clone()),
        (None, None) if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name,
                available: available_profiles(config),
            });
        }
        (None, None) => {
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
    };

    if let Some(ref controller) = global.controller {
        profile.baseurl.clone_from(controller);
    }
    if let Some(ref site) = global.site {
        profile.site.clone_from(site);
    }
    if let Some(ref username) = global.username {
        profile.username = Some(username.clone());
    }
    if global.insecure {
        profile.verify = false;
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }

    Ok((name, profile))
}

/// Translate the effective profile into a ready-to-use [`Connection`].
pub fn resolve_connection(global: &GlobalOpts, config: &Config) -> Result<Connection, CliError> {
    let (profile_name, profile) = effective_profile(global, config)?;
    let client = omada_config::profile_to_client_config(&profile, &config.defaults)?;
    let (username, password) = omada_config::resolve_credentials(&profile, &profile_name)?;

    Ok(Connection {
        profile_name,
        client,
        username,
        password,
    })
}

/// Whether the active profile asks for debug logging.
pub fn profile_verbose(global: &GlobalOpts, config: &Config) -> bool {
    config
        .profiles
        .get(&active_profile_name(global, config))
        .is_some_and(|p| p.verbose)
}

fn available_profiles(config: &Config) -> String {
    if config.profiles.is_empty() {
        "(none)".into()
    } else {
        config.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}
