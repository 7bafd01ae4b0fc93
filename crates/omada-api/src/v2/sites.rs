// v2 site and device endpoints
//
// Site listing is controller-scoped and paged; everything else here is
// addressed through the opaque site key from the privilege list.

use tracing::debug;

use crate::error::Error;
use crate::v2::client::{OmadaClient, QueryParams};
use crate::v2::models::{Device, Site};
use crate::v2::paginate::Pages;

impl OmadaClient {
    /// All sites visible to the current user.
    ///
    /// `GET /sites` (paged)
    pub fn sites(&self) -> Result<Pages<'_, Site>, Error> {
        self.session()?;
        debug!("listing sites");
        Ok(self.paginate("/sites", QueryParams::new()))
    }

    /// Devices adopted by a site.
    ///
    /// `GET /sites/{key}/devices` (single result, not paged)
    pub async fn site_devices(&self, site: Option<&str>) -> Result<Vec<Device>, Error> {
        let path = self.site_path(site, "/devices")?;
        debug!(?site, "listing devices");
        let devices: Option<Vec<Device>> = self.get(&path, QueryParams::new()).await?;
        Ok(devices.unwrap_or_default())
    }

    /// Notification settings for a site.
    ///
    /// `GET /sites/{key}/notification`
    pub async fn site_notifications(&self, site: Option<&str>) -> Result<serde_json::Value, Error> {
        let path = self.site_path(site, "/notification")?;
        self.get(&path, QueryParams::new()).await
    }

    /// Deployment scenarios known to the controller.
    ///
    /// `GET /scenarios`
    pub async fn scenarios(&self) -> Result<Vec<String>, Error> {
        let scenarios: Option<Vec<String>> = self.get("/scenarios", QueryParams::new()).await?;
        Ok(scenarios.unwrap_or_default())
    }
}
