//! Hotspot voucher command handler.

use futures_util::{StreamExt, TryStreamExt};
use omada_api::OmadaClient;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{GlobalOpts, VouchersArgs};
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct GroupCodes {
    group: String,
    codes: Vec<String>,
}

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Unused codes")]
    codes: String,
}

/// No filter names means every group.
fn wanted(group: &str, names: &[String]) -> bool {
    names.is_empty() || names.iter().any(|n| group.contains(n.as_str()))
}

pub async fn handle(
    client: &OmadaClient,
    args: VouchersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let groups: Vec<_> = client.voucher_groups(None)?.try_collect().await?;

    let mut listing = Vec::new();
    for group in groups.into_iter().filter(|g| wanted(&g.name, &args.names)) {
        let codes: Vec<String> = client
            .voucher_group_vouchers(&group.id, true, None)?
            .take(args.max)
            .map_ok(|v| v.code)
            .try_collect()
            .await?;
        listing.push(GroupCodes {
            group: group.name,
            codes,
        });
    }

    let out = output::render_list(
        &global.output,
        &listing,
        |g| GroupRow {
            group: g.group.clone(),
            codes: g.codes.join(", "),
        },
        |g| format!("{}: {}", g.group, g.codes.join(", ")),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_filter_is_substring_match() {
        let names = vec!["Day".to_owned()];
        assert!(wanted("1 Day Pass", &names));
        assert!(!wanted("Weekly", &names));
        assert!(wanted("Weekly", &[]));
    }
}
