//! Config subcommand handlers.

use dialoguer::{Confirm, Input, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

const REDACTED: &str = "********";

// ── Helpers ─────────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Copy of the config with plaintext passwords masked.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        if profile.password.is_some() {
            profile.password = Some(REDACTED.into());
        }
    }
    cfg
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts, cfg: &Config) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            eprintln!("Omada CLI configuration");
            eprintln!("   Config path: {}\n", config::config_path().display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default(config::active_profile_name(global, cfg))
                .interact_text()
                .map_err(prompt_err)?;

            let baseurl: String = Input::new()
                .with_prompt("Controller URL")
                .default("https://omada.local:8043".into())
                .interact_text()
                .map_err(prompt_err)?;
            if url::Url::parse(&baseurl).is_err() {
                return Err(CliError::Validation {
                    field: "baseurl".into(),
                    reason: format!("invalid URL: {baseurl}"),
                });
            }

            let site: String = Input::new()
                .with_prompt("Site name")
                .default(omada_api::DEFAULT_SITE.into())
                .interact_text()
                .map_err(prompt_err)?;

            let verify = Confirm::new()
                .with_prompt("Verify the controller's TLS certificate?")
                .default(true)
                .interact()
                .map_err(prompt_err)?;

            let username: String = Input::new()
                .with_prompt("Username")
                .interact_text()
                .map_err(prompt_err)?;

            let store_choices = &[
                "Read from an environment variable (recommended)",
                "Save to config file (plaintext)",
            ];
            let store_selection = Select::new()
                .with_prompt("Where does the password come from?")
                .items(store_choices)
                .default(0)
                .interact()
                .map_err(prompt_err)?;

            let mut profile = Profile::new(baseurl);
            profile.site = site;
            profile.verify = verify;
            profile.username = Some(username);

            if store_selection == 0 {
                let var: String = Input::new()
                    .with_prompt("Variable name")
                    .default(omada_config::PASSWORD_ENV.into())
                    .interact_text()
                    .map_err(prompt_err)?;
                profile.password_env = Some(var);
            } else {
                let pass = rpassword::prompt_password("Password: ").map_err(prompt_err)?;
                if pass.is_empty() {
                    return Err(CliError::Validation {
                        field: "password".into(),
                        reason: "password cannot be empty".into(),
                    });
                }
                profile.password = Some(pass);
            }

            let mut cfg = cfg.clone();
            cfg.profiles.insert(profile_name.clone(), profile);
            if cfg.profiles.len() == 1 {
                cfg.default_profile = Some(profile_name.clone());
            }
            let path = config::save_config(&cfg)?;

            eprintln!("\nConfiguration written to {}", path.display());
            eprintln!("  Profile: {profile_name}");
            eprintln!("\n  Test it: omada --profile {profile_name} sites");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let shown = redacted(cfg);
            let out = output::render_single(
                &global.output,
                &shown,
                |c| toml::to_string_pretty(c).unwrap_or_else(|e| e.to_string()),
                |c| c.profiles.keys().cloned().collect::<Vec<_>>().join("\n"),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_masks_plaintext_passwords() {
        let mut cfg = Config::default();
        let mut profile = Profile::new("https://omada.local");
        profile.password = Some("hunter2".into());
        cfg.profiles.insert("default".into(), profile);

        let shown = redacted(&cfg);
        assert_eq!(shown.profiles["default"].password.as_deref(), Some(REDACTED));
        assert_eq!(cfg.profiles["default"].password.as_deref(), Some("hunter2"));
    }
}
