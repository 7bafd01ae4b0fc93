// v2 hotspot voucher endpoints

use tracing::debug;

use crate::error::Error;
use crate::v2::client::{OmadaClient, QueryParams};
use crate::v2::models::{Voucher, VoucherGroup};
use crate::v2::paginate::Pages;

impl OmadaClient {
    /// Voucher groups of a site.
    ///
    /// `GET /sites/{key}/hotspot/voucherGroups` (paged)
    pub fn voucher_groups(&self, site: Option<&str>) -> Result<Pages<'_, VoucherGroup>, Error> {
        let path = self.site_path(site, "/hotspot/voucherGroups")?;
        debug!(?site, "listing voucher groups");
        Ok(self.paginate(path, QueryParams::new()))
    }

    /// Vouchers of one group, optionally only unused ones.
    ///
    /// `GET /sites/{key}/hotspot/voucherGroups/{id}` (paged). Combine with
    /// `StreamExt::take` to stop fetching once enough codes are in hand.
    pub fn voucher_group_vouchers(
        &self,
        group_id: &str,
        unused_only: bool,
        site: Option<&str>,
    ) -> Result<Pages<'_, Voucher>, Error> {
        let path = self.site_path(site, &format!("/hotspot/voucherGroups/{group_id}"))?;
        debug!(?site, group_id, unused_only, "listing vouchers");
        let mut params = QueryParams::new();
        if unused_only {
            params.insert("filters.status".into(), "0".into());
        }
        Ok(self.paginate(path, params))
    }
}
