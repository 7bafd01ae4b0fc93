// v2 client (station) endpoints

use tracing::debug;

use crate::error::Error;
use crate::v2::client::{OmadaClient, QueryParams};
use crate::v2::models::Client;
use crate::v2::paginate::Pages;

impl OmadaClient {
    /// Currently connected clients of a site.
    ///
    /// `GET /sites/{key}/clients?filters.active=true` (paged)
    pub fn site_clients(&self, site: Option<&str>) -> Result<Pages<'_, Client>, Error> {
        let path = self.site_path(site, "/clients")?;
        debug!(?site, "listing active clients");
        let mut params = QueryParams::new();
        params.insert("filters.active".into(), "true".into());
        Ok(self.paginate(path, params))
    }
}
