// v2 controller system endpoints
//
// Certificate installation and reboot. Installing a certificate uploads the
// file(s) and then re-submits the controller settings with the certificate
// section updated, which is what makes the controller validate the upload.
// Rebooting is always a separate call.

use std::path::{Path, PathBuf};

use reqwest::multipart::{Form, Part};
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::error::Error;
use crate::v2::client::{OmadaClient, Payload};

/// A certificate to install on the controller.
#[derive(Debug, Clone)]
pub enum CertificateInstall {
    /// Java keystore with its store password.
    Jks { path: PathBuf, password: String },
    /// PKCS#12 bundle with its password.
    Pfx { path: PathBuf, password: String },
    /// PEM certificate plus separate PEM private key.
    Pem { cert_path: PathBuf, key_path: PathBuf },
}

impl CertificateInstall {
    /// The controller's `cerType` value.
    pub fn cert_type(&self) -> &'static str {
        match self {
            Self::Jks { .. } => "JKS",
            Self::Pfx { .. } => "PFX",
            Self::Pem { .. } => "PEM",
        }
    }

    fn cert_path(&self) -> &Path {
        match self {
            Self::Jks { path, .. } | Self::Pfx { path, .. } => path,
            Self::Pem { cert_path, .. } => cert_path,
        }
    }

    fn key_path(&self) -> Option<&Path> {
        match self {
            Self::Pem { key_path, .. } => Some(key_path),
            Self::Jks { .. } | Self::Pfx { .. } => None,
        }
    }

    fn password(&self) -> Option<&str> {
        match self {
            Self::Jks { password, .. } | Self::Pfx { password, .. } => Some(password),
            Self::Pem { .. } => None,
        }
    }

    /// Rewrite the `certificate` section of controller settings for this
    /// install.
    pub fn apply_to(&self, settings: &mut Value) -> Result<(), Error> {
        let Some(cert) = settings.get_mut("certificate").and_then(Value::as_object_mut) else {
            return Err(Error::Protocol {
                message: "controller settings have no certificate section".into(),
                body: settings.to_string(),
            });
        };
        cert.insert("cerType".into(), json!(self.cert_type()));
        cert.insert("enable".into(), json!(true));
        match self.password() {
            Some(password) if !password.is_empty() => {
                cert.insert("keyPassword".into(), json!(password));
            }
            _ => {
                cert.remove("keyPassword");
            }
        }
        if self.key_path().is_none() {
            cert.remove("keyId");
            cert.remove("keyName");
        }
        Ok(())
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl OmadaClient {
    /// Upload a file to one of the controller's `/files/...` slots.
    ///
    /// Multipart parts: `file` (the bytes) and `data` (a JSON descriptor).
    async fn upload_file(&self, src: &Path, slot: &str, data: &Value) -> Result<(), Error> {
        let bytes = tokio::fs::read(src).await.map_err(|source| Error::Io {
            path: src.display().to_string(),
            source,
        })?;
        let part = Part::bytes(bytes)
            .file_name(file_name(src))
            .mime_str("application/octet-stream")?;
        let form = Form::new().part("file", part).text("data", data.to_string());

        debug!(src = %src.display(), slot, "uploading file");
        let _: Option<Value> = self
            .post(&format!("/files/{slot}"), Payload::Multipart(form))
            .await?;
        Ok(())
    }

    /// Install a new controller certificate.
    ///
    /// Uploads the certificate (and PEM key), then GETs and PATCHes
    /// `/controller/setting` with `certificate.cerType`/`enable`/
    /// `keyPassword` updated. Does not reboot; call [`reboot`](Self::reboot).
    pub async fn install_certificate(&self, install: &CertificateInstall) -> Result<Value, Error> {
        self.session()?;

        let cert_path = install.cert_path();
        self.upload_file(
            cert_path,
            "controller/certificate",
            &json!({ "cerName": file_name(cert_path) }),
        )
        .await?;

        if let Some(key_path) = install.key_path() {
            self.upload_file(
                key_path,
                "controller/key",
                &json!({ "keyName": file_name(key_path) }),
            )
            .await?;
        }

        let mut settings = self.controller_settings().await?;
        install.apply_to(&mut settings)?;
        let result = self.set_controller_settings(settings).await?;
        info!(cert_type = install.cert_type(), "certificate installed");
        Ok(result)
    }

    /// Reboot the controller.
    ///
    /// `POST /cmd/reboot`
    pub async fn reboot(&self) -> Result<(), Error> {
        info!("rebooting controller");
        let _: Option<Value> = self.post("/cmd/reboot", Payload::Empty).await?;
        Ok(())
    }
}
