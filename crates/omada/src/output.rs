//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::OutputFormat;
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Color is used only on an interactive stdout without `NO_COLOR`.
pub fn should_color() -> bool {
    io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// Green for good, dim for absent, red for bad.
pub fn status(text: &str, good: bool) -> String {
    if !should_color() {
        return text.to_owned();
    }
    if good {
        text.green().to_string()
    } else if text == "--" {
        text.dimmed().to_string()
    } else {
        text.red().to_string()
    }
}

// ── Value formatters ─────────────────────────────────────────────────

/// `1d 2:03:04`, `2:03:04`, `03:04`, `04`, or `--`.
pub fn duration(secs: Option<u64>) -> String {
    let Some(secs) = secs.filter(|s| *s > 0) else {
        return "--".into();
    };
    let d = secs / 86_400;
    let h = secs / 3600 % 24;
    let m = secs % 3600 / 60;
    let s = secs % 60;
    if d > 0 {
        format!("{d}d {h}:{m:02}:{s:02}")
    } else if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else if m > 0 {
        format!("{m:02}:{s:02}")
    } else {
        format!("{s:02}")
    }
}

/// Decimal byte size: `1.5 MB`, `12.0 KB/s`.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn size(bytes: Option<u64>, suffix: &str) -> String {
    let Some(bytes) = bytes else {
        return "--".into();
    };
    let mut value = bytes as f64;
    for unit in ["K", "M", "G", "T", "P", "E", "Z"] {
        value /= 1000.0;
        if value.abs() < 1000.0 {
            return format!("{value:.1} {unit}{suffix}");
        }
    }
    format!("{value:.1} Y{suffix}")
}

/// Local wall-clock time for a millisecond epoch.
pub fn timestamp(millis: Option<i64>) -> String {
    millis
        .and_then(chrono::DateTime::from_timestamp_millis)
        .map(|t| {
            t.with_timezone(&chrono::Local)
                .format("%b %e %Y %I:%M:%S %p")
                .to_string()
        })
        .unwrap_or_else(|| "--".into())
}

pub fn or_dash(value: Option<&str>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or("--").to_owned()
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact`: serializes the original data via serde
/// - `yaml`: serializes via serde_yaml
/// - `plain`: calls `id_fn` on each item to emit one identifier per line
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(data.iter().map(&id_fn).collect::<Vec<_>>().join("\n")),
    }
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses a custom `detail_fn` that returns a pre-formatted
/// string, since single-item views don't use `Tabled` derive.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize + ?Sized,
{
    match format {
        OutputFormat::Table => Ok(detail_fn(data)),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(id_fn(data)),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    let out = if compact {
        serde_json::to_string(data)?
    } else {
        serde_json::to_string_pretty(data)?
    };
    Ok(out)
}

pub(crate) fn render_json_pretty<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    render_json(data, false)
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    Ok(serde_yaml::to_string(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations() {
        assert_eq!(duration(None), "--");
        assert_eq!(duration(Some(0)), "--");
        assert_eq!(duration(Some(7)), "07");
        assert_eq!(duration(Some(125)), "02:05");
        assert_eq!(duration(Some(3 * 3600 + 4)), "3:00:04");
        assert_eq!(duration(Some(2 * 86_400 + 3661)), "2d 1:01:01");
    }

    #[test]
    fn sizes_are_decimal() {
        assert_eq!(size(Some(1500), "B"), "1.5 KB");
        assert_eq!(size(Some(2_000_000), "B/s"), "2.0 MB/s");
        assert_eq!(size(None, "B"), "--");
    }

    #[test]
    fn plain_list_is_one_id_per_line() {
        #[derive(serde::Serialize)]
        struct Item {
            id: &'static str,
        }
        #[derive(Tabled)]
        struct Row {
            id: &'static str,
        }

        let items = [Item { id: "a" }, Item { id: "b" }];
        let out = render_list(
            &OutputFormat::Plain,
            &items,
            |i| Row { id: i.id },
            |i| i.id.to_owned(),
        )
        .expect("render");
        assert_eq!(out, "a\nb");
    }
}
