mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use omada_api::OmadaClient;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let cfg = config::load_config_or_default();
    let verbosity = if cli.global.verbose == 0 && config::profile_verbose(&cli.global, &cfg) {
        2
    } else {
        cli.global.verbose
    };
    init_tracing(verbosity);

    if let Err(err) = run(cli, cfg).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli, cfg: config::Config) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a controller connection
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global, &cfg),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "omada", &mut std::io::stdout());
            Ok(())
        }

        // Everything else runs inside one login/logout bracket
        cmd => {
            let conn = config::resolve_connection(&cli.global, &cfg)?;
            let mut client = OmadaClient::new(conn.client)?;
            client
                .login(&conn.username, &conn.password)
                .await
                .map_err(|e| match CliError::from(e) {
                    CliError::AuthFailed { message, .. } => CliError::AuthFailed {
                        profile: conn.profile_name.clone(),
                        message,
                    },
                    other => other,
                })?;

            tracing::debug!(command = ?cmd, "dispatching command");
            let result = commands::dispatch(cmd, &client, &cli.global).await;
            let logout = client.logout().await;

            // The session is already gone locally; a failed logout (e.g.
            // after a reboot) does not change the command's outcome.
            if let Err(err) = logout {
                tracing::warn!(error = %err, "logout failed");
            }
            result
        }
    }
}
