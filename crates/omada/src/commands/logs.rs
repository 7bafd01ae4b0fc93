//! Alert and event command handlers.

use futures_util::{StreamExt, TryStreamExt};
use omada_api::{Level, LogEntry, LogFilter, Module, OmadaClient, Pages};
use tabled::Tabled;

use crate::cli::{AlertsArgs, GlobalOpts, LevelArg, LogArgs, ModuleArg};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct LogRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Level")]
    level: String,
    #[tabled(rename = "Content")]
    content: String,
}

impl From<&LogEntry> for LogRow {
    fn from(e: &LogEntry) -> Self {
        let level = output::or_dash(e.level.as_deref());
        let good = !matches!(level.as_str(), "Error" | "Warning");
        Self {
            time: output::timestamp(e.time),
            level: output::status(&level, good),
            content: e.display_content(),
        }
    }
}

// ── Filter mapping ──────────────────────────────────────────────────

fn filter(args: &LogArgs) -> LogFilter {
    LogFilter {
        level: args.level.map(|l| match l {
            LevelArg::Error => Level::Error,
            LevelArg::Warning => Level::Warning,
            LevelArg::Info => Level::Information,
        }),
        module: args.module.map(|m| match m {
            ModuleArg::Operation => Module::Operation,
            ModuleArg::System => Module::System,
            ModuleArg::Device => Module::Device,
            ModuleArg::Client => Module::Client,
        }),
        search: args.search.clone(),
    }
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn handle_alerts(
    client: &OmadaClient,
    args: AlertsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let pages = client.site_alerts(None, args.archived, filter(&args.log))?;
    render(pages, args.log.limit, global).await
}

pub async fn handle_events(
    client: &OmadaClient,
    args: LogArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let pages = client.site_events(None, filter(&args))?;
    render(pages, args.limit, global).await
}

/// Pull at most `limit` entries; later pages are never requested.
async fn render(pages: Pages<'_, LogEntry>, limit: usize, global: &GlobalOpts) -> Result<(), CliError> {
    let entries: Vec<LogEntry> = pages.take(limit).try_collect().await?;
    let out = output::render_list(
        &global.output,
        &entries,
        |e| LogRow::from(e),
        |e| e.id.clone().unwrap_or_default(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_filter_maps_to_api_codes() {
        let args = LogArgs {
            level: Some(LevelArg::Info),
            module: Some(ModuleArg::System),
            search: None,
            limit: 10,
        };
        let f = filter(&args);
        assert_eq!(f.level, Some(Level::Information));
        assert_eq!(f.module, Some(Module::System));
    }
}
