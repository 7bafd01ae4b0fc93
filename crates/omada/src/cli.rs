//! Clap derive structures for the `omada` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// omada -- command-line client for TP-Link Omada controllers
#[derive(Debug, Parser)]
#[command(
    name = "omada",
    version,
    about = "Query and configure TP-Link Omada controllers from the command line",
    long_about = "A CLI for the Omada software controller's v2 web API.\n\n\
        Every controller command logs in, runs, and logs out again.\n\
        Connection details come from a profile in the config file,\n\
        overridable with flags or OMADA_* environment variables.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config profile to use
    #[arg(long, short = 'p', env = "OMADA_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Controller URL (overrides profile)
    #[arg(long, short = 'c', env = "OMADA_CONTROLLER", global = true)]
    pub controller: Option<String>,

    /// Site name (overrides profile)
    #[arg(long, short = 's', env = "OMADA_SITE", global = true)]
    pub site: Option<String>,

    /// Login username (overrides profile)
    #[arg(long, short = 'u', env = "OMADA_USERNAME", global = true, hide_env = true)]
    pub username: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "OMADA_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip TLS certificate verification
    #[arg(long, short = 'k', env = "OMADA_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "OMADA_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List sites visible to the account
    Sites,

    /// List devices of a site
    #[command(alias = "dev", alias = "d")]
    Devices,

    /// List active clients of a site
    #[command(alias = "cl")]
    Clients,

    /// List alerts of a site
    Alerts(AlertsArgs),

    /// List events of a site
    Events(LogArgs),

    /// Show or change site settings
    Settings(SettingsArgs),

    /// Manage switch-port (LAN) profiles
    Profiles(ProfilesArgs),

    /// Show unused hotspot voucher codes
    Vouchers(VouchersArgs),

    /// Install a controller TLS certificate
    Cert(CertArgs),

    /// Reboot the controller
    Reboot,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Alerts & Events ──────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LogArgs {
    /// Only entries of this severity
    #[arg(long, value_enum)]
    pub level: Option<LevelArg>,

    /// Only entries from this module
    #[arg(long, value_enum)]
    pub module: Option<ModuleArg>,

    /// Free-text search
    #[arg(long)]
    pub search: Option<String>,

    /// Stop after this many entries
    #[arg(long, short = 'n', default_value = "50")]
    pub limit: usize,
}

#[derive(Debug, Args)]
pub struct AlertsArgs {
    /// Show archived alerts instead of open ones
    #[arg(long)]
    pub archived: bool,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LevelArg {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModuleArg {
    Operation,
    System,
    Device,
    Client,
}

// ── Settings ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Dump the site settings
    Get,

    /// Show or switch device LEDs
    Led {
        /// New LED state; omit to show the current one
        #[arg(value_enum)]
        state: Option<Toggle>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

// ── Profiles ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ProfilesArgs {
    #[command(subcommand)]
    pub command: ProfilesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProfilesCommand {
    /// List LAN profiles
    #[command(alias = "ls")]
    List,

    /// Set the PoE mode of a LAN profile
    Poe {
        /// Profile name
        name: String,

        /// 0 = disabled, 1 = enabled, 2 = keep the device's setting
        #[arg(value_parser = clap::value_parser!(u8).range(0..=2))]
        mode: u8,
    },
}

// ── Vouchers ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct VouchersArgs {
    /// Unused codes to show per group
    #[arg(long, short = 'm', default_value = "10")]
    pub max: usize,

    /// Only groups whose name contains one of these
    pub names: Vec<String>,
}

// ── Certificates ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CertArgs {
    #[command(subcommand)]
    pub command: CertCommand,

    /// Reboot the controller after installing
    #[arg(long, global = true)]
    pub reboot: bool,
}

#[derive(Debug, Subcommand)]
pub enum CertCommand {
    /// Java keystore
    Jks {
        path: PathBuf,
        /// Keystore password
        #[arg(env = "OMADA_CERT_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// PKCS#12 bundle
    Pfx {
        path: PathBuf,
        /// Bundle password
        #[arg(env = "OMADA_CERT_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// PEM certificate and private key
    Pem { cert_path: PathBuf, key_path: PathBuf },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive setup wizard
    Init,

    /// Show the effective configuration (passwords redacted)
    Show,

    /// Print the config file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
