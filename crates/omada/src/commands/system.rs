//! Controller certificate and reboot handlers.

use omada_api::{CertificateInstall, OmadaClient};

use crate::cli::{CertArgs, CertCommand, GlobalOpts};
use crate::error::CliError;

impl From<CertCommand> for CertificateInstall {
    fn from(cmd: CertCommand) -> Self {
        match cmd {
            CertCommand::Jks { path, password } => Self::Jks { path, password },
            CertCommand::Pfx { path, password } => Self::Pfx { path, password },
            CertCommand::Pem { cert_path, key_path } => Self::Pem { cert_path, key_path },
        }
    }
}

pub async fn handle_cert(
    client: &OmadaClient,
    args: CertArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let install = CertificateInstall::from(args.command);
    client.install_certificate(&install).await?;
    if !global.quiet {
        eprintln!("{} certificate installed", install.cert_type());
    }

    if args.reboot {
        client.reboot().await?;
        if !global.quiet {
            eprintln!("Controller is rebooting; the new certificate is served once it is back");
        }
    } else if !global.quiet {
        eprintln!("Reboot the controller (omada reboot) to start serving it");
    }
    Ok(())
}

pub async fn handle_reboot(client: &OmadaClient, global: &GlobalOpts) -> Result<(), CliError> {
    client.reboot().await?;
    if !global.quiet {
        eprintln!("Controller is rebooting");
    }
    Ok(())
}
