//! Device command handler.

use omada_api::{Device, OmadaClient};
use tabled::Tabled;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "IP Address")]
    ip: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Uptime")]
    uptime: String,
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        // Any non-zero status is some flavour of connected.
        let connected = d.status.is_some_and(|s| s != 0);
        Self {
            name: d.name.clone().unwrap_or_else(|| d.mac.clone()),
            ip: output::or_dash(d.ip.as_deref()),
            status: output::status(if connected { "CONNECTED" } else { "--" }, connected),
            model: output::or_dash(d.show_model.as_deref().or(d.model.as_deref())),
            version: output::or_dash(d.version.as_deref()),
            uptime: output::duration(d.uptime_long),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(client: &OmadaClient, global: &GlobalOpts) -> Result<(), CliError> {
    let devices = client.site_devices(None).await?;
    let out = output::render_list(&global.output, &devices, |d| DeviceRow::from(d), |d| d.mac.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}
