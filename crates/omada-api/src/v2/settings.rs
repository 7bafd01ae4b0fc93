// v2 settings endpoints
//
// Site and controller settings are fetched as opaque JSON objects and
// PATCHed back whole. The site endpoint rejects one sub-object it hands
// out itself, so that field is removed before every site PATCH.

use tracing::{debug, warn};

use crate::error::Error;
use crate::v2::client::{OmadaClient, QueryParams};

/// Site-settings fields the controller returns but refuses on PATCH
/// (`errorCode -1001`).
pub const PATCH_INCOMPATIBLE_SITE_FIELDS: &[&str] = &["beaconControl"];

/// Outcome of a settings PATCH.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsUpdate {
    /// The controller's `result`, `Null` when it sent none.
    pub result: serde_json::Value,
    /// Top-level fields removed from the request before sending.
    pub stripped: Vec<&'static str>,
}

/// Remove fields the site-settings PATCH rejects. Returns the removed names.
pub fn strip_incompatible_site_fields(settings: &mut serde_json::Value) -> Vec<&'static str> {
    let Some(object) = settings.as_object_mut() else {
        return Vec::new();
    };
    PATCH_INCOMPATIBLE_SITE_FIELDS
        .iter()
        .copied()
        .filter(|field| object.remove(*field).is_some())
        .collect()
}

impl OmadaClient {
    /// `GET /sites/{key}/setting`
    pub async fn site_settings(&self, site: Option<&str>) -> Result<serde_json::Value, Error> {
        let path = self.site_path(site, "/setting")?;
        debug!(?site, "fetching site settings");
        self.get(&path, QueryParams::new()).await
    }

    /// Push back site settings.
    ///
    /// `PATCH /sites/{key}/setting`. Fields listed in
    /// [`PATCH_INCOMPATIBLE_SITE_FIELDS`] are stripped first and reported in
    /// [`SettingsUpdate::stripped`]; everything else is sent unmodified.
    pub async fn set_site_settings(
        &self,
        mut settings: serde_json::Value,
        site: Option<&str>,
    ) -> Result<SettingsUpdate, Error> {
        let path = self.site_path(site, "/setting")?;
        let stripped = strip_incompatible_site_fields(&mut settings);
        if self.warnings {
            for field in &stripped {
                warn!(field, "removed site setting the controller rejects on update");
            }
        }
        debug!(?site, "updating site settings");
        let result: Option<serde_json::Value> = self.patch(&path, settings).await?;
        Ok(SettingsUpdate {
            result: result.unwrap_or_default(),
            stripped,
        })
    }

    /// `GET /controller/setting`
    pub async fn controller_settings(&self) -> Result<serde_json::Value, Error> {
        debug!("fetching controller settings");
        self.get("/controller/setting", QueryParams::new()).await
    }

    /// `PATCH /controller/setting`
    pub async fn set_controller_settings(
        &self,
        settings: serde_json::Value,
    ) -> Result<serde_json::Value, Error> {
        debug!("updating controller settings");
        let result: Option<serde_json::Value> = self.patch("/controller/setting", settings).await?;
        Ok(result.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn strips_beacon_control_only() {
        let mut settings = json!({
            "led": { "enable": true },
            "beaconControl": { "mode": 0 },
            "mesh": { "enable": false }
        });
        let stripped = strip_incompatible_site_fields(&mut settings);
        assert_eq!(stripped, vec!["beaconControl"]);
        assert_eq!(
            settings,
            json!({ "led": { "enable": true }, "mesh": { "enable": false } })
        );
    }

    #[test]
    fn clean_settings_untouched() {
        let mut settings = json!({ "led": { "enable": false } });
        let before = settings.clone();
        assert!(strip_incompatible_site_fields(&mut settings).is_empty());
        assert_eq!(settings, before);
    }

    #[test]
    fn non_object_is_left_alone() {
        let mut settings = json!([1, 2]);
        assert!(strip_incompatible_site_fields(&mut settings).is_empty());
    }
}
