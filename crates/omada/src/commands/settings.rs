//! Site settings command handlers.

use omada_api::OmadaClient;
use serde_json::{Value, json};

use crate::cli::{GlobalOpts, SettingsArgs, SettingsCommand, Toggle};
use crate::error::CliError;
use crate::output;

fn led_enabled(settings: &Value) -> Result<bool, CliError> {
    settings
        .pointer("/led/enable")
        .and_then(Value::as_bool)
        .ok_or_else(|| CliError::Protocol {
            message: "site settings have no led.enable field".into(),
        })
}

pub async fn handle(
    client: &OmadaClient,
    args: SettingsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        SettingsCommand::Get => {
            let settings = client.site_settings(None).await?;
            let out = output::render_single(
                &global.output,
                &settings,
                |s| output::render_json_pretty(s).unwrap_or_default(),
                |s| s.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SettingsCommand::Led { state } => {
            let mut settings = client.site_settings(None).await?;
            if let Some(state) = state {
                led_enabled(&settings)?;
                settings["led"]["enable"] = json!(state == Toggle::On);
                client.set_site_settings(settings, None).await?;
                settings = client.site_settings(None).await?;
            }
            let on = led_enabled(&settings)?;
            let out = output::render_single(
                &global.output,
                &json!({ "led": on }),
                |_| format!("led: {}", if on { "on" } else { "off" }),
                |_| if on { "on".into() } else { "off".into() },
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
    fn led_flag_is_read_from_nested_section() {
        assert!(led_enabled(&json!({ "led": { "enable": true } })).expect("led"));
        assert!(led_enabled(&json!({ "site": {} })).is_err());
    }
}
