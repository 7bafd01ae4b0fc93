//! LAN profile command handlers.

use omada_api::{LanProfile, OmadaClient};
use serde_json::{Value, json};
use tabled::Tabled;

use crate::cli::{GlobalOpts, ProfilesArgs, ProfilesCommand};
use crate::error::CliError;
use crate::output;

fn poe_label(poe: Option<i64>) -> &'static str {
    match poe {
        Some(0) => "Disabled",
        Some(1) => "Enabled",
        Some(2) => "Keep the device's setting",
        _ => "Unknown",
    }
}

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProfileRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "PoE")]
    poe: &'static str,
    #[tabled(rename = "ID")]
    id: String,
}

impl From<&LanProfile> for ProfileRow {
    fn from(p: &LanProfile) -> Self {
        Self {
            name: p.name.clone(),
            poe: poe_label(p.poe),
            id: p.id.clone(),
        }
    }
}

fn not_found(name: &str) -> CliError {
    CliError::NotFound {
        resource_type: "profile".into(),
        identifier: name.into(),
        list_command: "profiles list".into(),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &OmadaClient,
    args: ProfilesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ProfilesCommand::List => {
            let profiles = client.lan_profiles(None).await?;
            let out = output::render_list(
                &global.output,
                &profiles,
                |p| ProfileRow::from(p),
                |p| p.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProfilesCommand::Poe { name, mode } => {
            let id = client
                .lan_profile_id(&name, None)
                .await?
                .ok_or_else(|| not_found(&name))?;
            let mut settings = client.lan_profile(&id, None).await?.ok_or_else(|| not_found(&name))?;
            settings["poe"] = json!(mode);
            client.set_lan_profile(&id, settings, None).await?;

            let updated = client.lan_profile(&id, None).await?.ok_or_else(|| not_found(&name))?;
            let poe = updated.get("poe").and_then(Value::as_i64);
            let out = output::render_single(
                &global.output,
                &updated,
                |_| format!("Changed the PoE setting for profile {name} to {}.", poe_label(poe)),
                |_| poe.map(|p| p.to_string()).unwrap_or_default(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poe_labels() {
        assert_eq!(poe_label(Some(0)), "Disabled");
        assert_eq!(poe_label(Some(2)), "Keep the device's setting");
        assert_eq!(poe_label(None), "Unknown");
    }
}
