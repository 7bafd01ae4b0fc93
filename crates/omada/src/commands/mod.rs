//! Command dispatch: bridges CLI args -> client calls -> output formatting.

pub mod clients;
pub mod config_cmd;
pub mod devices;
pub mod logs;
pub mod profiles;
pub mod settings;
pub mod sites;
pub mod system;
pub mod vouchers;

use omada_api::OmadaClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a controller-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: &OmadaClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let result = match cmd {
        Command::Sites => sites::handle(client, global).await,
        Command::Devices => devices::handle(client, global).await,
        Command::Clients => clients::handle(client, global).await,
        Command::Alerts(args) => logs::handle_alerts(client, args, global).await,
        Command::Events(args) => logs::handle_events(client, args, global).await,
        Command::Settings(args) => settings::handle(client, args, global).await,
        Command::Profiles(args) => profiles::handle(client, args, global).await,
        Command::Vouchers(args) => vouchers::handle(client, args, global).await,
        Command::Cert(args) => system::handle_cert(client, args, global).await,
        Command::Reboot => system::handle_reboot(client, global).await,
        Command::Config(_) | Command::Completions(_) => Err(CliError::Validation {
            field: "command".into(),
            reason: "does not take a controller session".into(),
        }),
    };

    result.map_err(|err| match err {
        CliError::SitePermission { site, .. } => CliError::SitePermission {
            site,
            available: client
                .site_keys()
                .map(|keys| keys.names().collect::<Vec<_>>().join(", "))
                .unwrap_or_default(),
        },
        other => other,
    })
}
