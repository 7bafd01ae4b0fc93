// v2 profile endpoints
//
// Groups, portal candidates, RADIUS profiles, time ranges, wireless
// groups/networks, and switch-port (LAN) profiles. All site-scoped and
// returned as single results.

use tracing::debug;

use crate::error::Error;
use crate::v2::client::{OmadaClient, QueryParams};
use crate::v2::models::{DataList, LanProfile};

/// Profile group kinds (`setting/profiles/groups/{type}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupType {
    Ip,
    IpPort,
    Mac,
}

impl GroupType {
    fn code(self) -> u8 {
        match self {
            Self::Ip => 0,
            Self::IpPort => 1,
            Self::Mac => 2,
        }
    }
}

impl OmadaClient {
    /// `GET /sites/{key}/setting/profiles/groups[/{type}]`
    pub async fn site_groups(
        &self,
        site: Option<&str>,
        group_type: Option<GroupType>,
    ) -> Result<serde_json::Value, Error> {
        let suffix = match group_type {
            Some(kind) => format!("/setting/profiles/groups/{}", kind.code()),
            None => "/setting/profiles/groups".to_owned(),
        };
        let path = self.site_path(site, &suffix)?;
        self.get(&path, QueryParams::new()).await
    }

    /// The "SSID & Network" candidates of the portal settings.
    ///
    /// `GET /sites/{key}/setting/portal/candidates`
    pub async fn portal_candidates(&self, site: Option<&str>) -> Result<serde_json::Value, Error> {
        let path = self.site_path(site, "/setting/portal/candidates")?;
        self.get(&path, QueryParams::new()).await
    }

    /// `GET /sites/{key}/setting/radiusProfiles`
    pub async fn radius_profiles(&self, site: Option<&str>) -> Result<serde_json::Value, Error> {
        let path = self.site_path(site, "/setting/radiusProfiles")?;
        self.get(&path, QueryParams::new()).await
    }

    /// `GET /sites/{key}/setting/profiles/timeranges`
    pub async fn time_ranges(&self, site: Option<&str>) -> Result<serde_json::Value, Error> {
        let path = self.site_path(site, "/setting/profiles/timeranges")?;
        self.get(&path, QueryParams::new()).await
    }

    /// WLAN groups.
    ///
    /// `GET /sites/{key}/setting/wlans`
    pub async fn wireless_groups(&self, site: Option<&str>) -> Result<serde_json::Value, Error> {
        let path = self.site_path(site, "/setting/wlans")?;
        self.get(&path, QueryParams::new()).await
    }

    /// SSIDs of one WLAN group.
    ///
    /// `GET /sites/{key}/setting/wlans/{group}/ssids`
    pub async fn wireless_networks(
        &self,
        group: &str,
        site: Option<&str>,
    ) -> Result<serde_json::Value, Error> {
        let path = self.site_path(site, &format!("/setting/wlans/{group}/ssids"))?;
        self.get(&path, QueryParams::new()).await
    }

    /// Switch-port profiles.
    ///
    /// `GET /sites/{key}/setting/lan/profiles`
    pub async fn lan_profiles(&self, site: Option<&str>) -> Result<Vec<LanProfile>, Error> {
        let path = self.site_path(site, "/setting/lan/profiles")?;
        debug!(?site, "listing LAN profiles");
        let list: Option<DataList<LanProfile>> = self.get(&path, QueryParams::new()).await?;
        Ok(list.map(|l| l.data).unwrap_or_default())
    }

    /// Find a LAN profile id by display name.
    pub async fn lan_profile_id(&self, name: &str, site: Option<&str>) -> Result<Option<String>, Error> {
        let profiles = self.lan_profiles(site).await?;
        Ok(profiles.into_iter().find(|p| p.name == name).map(|p| p.id))
    }

    /// One LAN profile, as the raw settings object.
    ///
    /// Served from the profile list; the controller has no per-id GET.
    pub async fn lan_profile(&self, id: &str, site: Option<&str>) -> Result<Option<serde_json::Value>, Error> {
        let path = self.site_path(site, "/setting/lan/profiles")?;
        let list: Option<DataList<serde_json::Value>> = self.get(&path, QueryParams::new()).await?;
        Ok(list.and_then(|l| {
            l.data
                .into_iter()
                .find(|p| p.get("id").and_then(serde_json::Value::as_str) == Some(id))
        }))
    }

    /// `PATCH /sites/{key}/setting/lan/profiles/{id}`
    pub async fn set_lan_profile(
        &self,
        id: &str,
        settings: serde_json::Value,
        site: Option<&str>,
    ) -> Result<serde_json::Value, Error> {
        let path = self.site_path(site, &format!("/setting/lan/profiles/{id}"))?;
        debug!(?site, id, "updating LAN profile");
        let result: Option<serde_json::Value> = self.patch(&path, settings).await?;
        Ok(result.unwrap_or_default())
    }
}
