//! Site command handler.

use futures_util::TryStreamExt;
use omada_api::{OmadaClient, Site};
use tabled::Tabled;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SiteRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Region")]
    region: String,
    #[tabled(rename = "Scenario")]
    scenario: String,
    #[tabled(rename = "ID")]
    id: String,
}

impl From<&Site> for SiteRow {
    fn from(s: &Site) -> Self {
        Self {
            name: s.name.clone(),
            region: output::or_dash(s.region.as_deref()),
            scenario: output::or_dash(s.scenario.as_deref()),
            id: s.id.clone(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(client: &OmadaClient, global: &GlobalOpts) -> Result<(), CliError> {
    let sites: Vec<Site> = client.sites()?.try_collect().await?;
    let out = output::render_list(&global.output, &sites, |s| SiteRow::from(s), |s| s.name.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}
