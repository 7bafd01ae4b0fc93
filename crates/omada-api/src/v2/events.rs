// v2 alert and event endpoints
//
// Both are paged, site-scoped, and share the level/module/search filters.
// Alerts additionally split into archived and unarchived sets.

use tracing::debug;

use crate::error::Error;
use crate::v2::client::{OmadaClient, QueryParams};
use crate::v2::models::LogEntry;
use crate::v2::paginate::Pages;

/// Severity filter (`filters.level`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
    Information,
}

impl Level {
    fn code(self) -> u8 {
        match self {
            Self::Error => 0,
            Self::Warning => 1,
            Self::Information => 2,
        }
    }
}

/// Source filter (`filters.module`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Module {
    Operation,
    System,
    Device,
    Client,
}

impl Module {
    fn code(self) -> u8 {
        match self {
            Self::Operation => 0,
            Self::System => 1,
            Self::Device => 2,
            Self::Client => 3,
        }
    }
}

/// Filters shared by alert and event listings.
#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    pub level: Option<Level>,
    pub module: Option<Module>,
    pub search: Option<String>,
}

impl LogFilter {
    fn into_params(self) -> QueryParams {
        let mut params = QueryParams::new();
        if let Some(level) = self.level {
            params.insert("filters.level".into(), level.code().to_string());
        }
        if let Some(module) = self.module {
            params.insert("filters.module".into(), module.code().to_string());
        }
        if let Some(search) = self.search {
            params.insert("searchKey".into(), search);
        }
        params
    }
}

impl OmadaClient {
    /// Alerts of a site.
    ///
    /// `GET /sites/{key}/alerts?filters.archived=...` (paged)
    pub fn site_alerts(
        &self,
        site: Option<&str>,
        archived: bool,
        filter: LogFilter,
    ) -> Result<Pages<'_, LogEntry>, Error> {
        let path = self.site_path(site, "/alerts")?;
        debug!(?site, archived, ?filter, "listing alerts");
        let mut params = filter.into_params();
        params.insert("filters.archived".into(), archived.to_string());
        Ok(self.paginate(path, params))
    }

    /// Events of a site.
    ///
    /// `GET /sites/{key}/events` (paged)
    pub fn site_events(
        &self,
        site: Option<&str>,
        filter: LogFilter,
    ) -> Result<Pages<'_, LogEntry>, Error> {
        let path = self.site_path(site, "/events")?;
        debug!(?site, ?filter, "listing events");
        Ok(self.paginate(path, filter.into_params()))
    }
}
