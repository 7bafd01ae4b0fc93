//! Client command handler.

use futures_util::TryStreamExt;
use omada_api::{Client, OmadaClient};
use tabled::Tabled;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ClientRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "IP Address")]
    ip: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "SSID/Network")]
    network: String,
    #[tabled(rename = "AP/Port")]
    port: String,
    #[tabled(rename = "Activity")]
    activity: String,
    #[tabled(rename = "Download")]
    down: String,
    #[tabled(rename = "Upload")]
    up: String,
    #[tabled(rename = "Uptime")]
    uptime: String,
}

impl From<&Client> for ClientRow {
    fn from(c: &Client) -> Self {
        let wireless = c.connect_dev_type.as_deref() == Some("ap");
        let (network, port) = if wireless {
            (output::or_dash(c.ssid.as_deref()), output::or_dash(c.ap_name.as_deref()))
        } else {
            let port = match (c.switch_name.as_deref(), c.port) {
                (Some(switch), Some(port)) => format!("{switch} Port {port}"),
                (Some(switch), None) => switch.to_owned(),
                (None, _) => "--".into(),
            };
            (output::or_dash(c.network_name.as_deref()), port)
        };
        Self {
            name: c.name.clone().unwrap_or_else(|| c.mac.clone()),
            ip: output::or_dash(c.ip.as_deref()),
            status: output::status(if c.active { "CONNECTED" } else { "--" }, c.active),
            network,
            port,
            activity: output::size(c.activity, "B/s"),
            down: output::size(c.traffic_down, "B"),
            up: output::size(c.traffic_up, "B"),
            uptime: output::duration(c.uptime),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(client: &OmadaClient, global: &GlobalOpts) -> Result<(), CliError> {
    let clients: Vec<Client> = client.site_clients(None)?.try_collect().await?;
    let out = output::render_list(&global.output, &clients, |c| ClientRow::from(c), |c| c.mac.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}
