// Omada v2 API response types
//
// Payloads that sit inside the `result` field of the envelope. Fields use
// `#[serde(default)]` liberally because the controller is inconsistent about
// field presence across firmware versions; unmodelled fields land in `extra`.

use serde::{Deserialize, Serialize};

// ── Paging ───────────────────────────────────────────────────────────

/// One page of a paged `result`:
/// `{ "totalRows": n, "currentPage": p, "currentSize": s, "data": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default)]
    pub total_rows: u64,
    #[serde(default)]
    pub current_page: Option<u64>,
    #[serde(default)]
    pub current_size: Option<u64>,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

// ── Controller ───────────────────────────────────────────────────────

/// `GET /api/info` (public, no auth).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiInfo {
    /// Controller-instance id. Present on v5+, prefixes every API path.
    #[serde(default)]
    pub omadac_id: Option<String>,
    #[serde(default)]
    pub controller_ver: Option<String>,
    #[serde(default)]
    pub api_ver: Option<String>,
    #[serde(default)]
    pub configured: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Site ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub scenario: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Device ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub mac: String,
    #[serde(default)]
    pub name: Option<String>,
    /// `ap`, `switch`, `gateway`.
    #[serde(default, rename = "type")]
    pub device_type: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub show_model: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    /// Numeric connection status (`0` disconnected, `14` connected, ...).
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub status_category: Option<i64>,
    /// Uptime in seconds.
    #[serde(default)]
    pub uptime_long: Option<u64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Client ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub mac: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub wireless: bool,
    /// `ap` or `switch`.
    #[serde(default)]
    pub connect_dev_type: Option<String>,
    #[serde(default)]
    pub ssid: Option<String>,
    #[serde(default)]
    pub network_name: Option<String>,
    #[serde(default)]
    pub ap_name: Option<String>,
    #[serde(default)]
    pub switch_name: Option<String>,
    #[serde(default)]
    pub port: Option<u32>,
    /// Current throughput in bytes/s.
    #[serde(default)]
    pub activity: Option<u64>,
    #[serde(default)]
    pub traffic_down: Option<u64>,
    #[serde(default)]
    pub traffic_up: Option<u64>,
    /// Seconds since association.
    #[serde(default)]
    pub uptime: Option<u64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Alerts & events ──────────────────────────────────────────────────

/// Alerts and events share one shape; alerts add `archived`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub module: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub archived: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl LogEntry {
    pub fn timestamp(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.time.and_then(chrono::DateTime::from_timestamp_millis)
    }

    /// `content` with `[client:MAC]` / `[device:MAC]` tags replaced by the
    /// names the controller ships in `clientNames` / `deviceNames`.
    ///
    /// Tags without a known name are left as they are.
    pub fn display_content(&self) -> String {
        let Some(content) = self.content.as_deref() else {
            return String::new();
        };
        let mut out = String::with_capacity(content.len());
        let mut rest = content;
        while let Some(open) = rest.find('[') {
            out.push_str(&rest[..open]);
            let tail = &rest[open..];
            match tail.find(']').and_then(|close| {
                self.tag_name(&tail[1..close]).map(|name| (close, name))
            }) {
                Some((close, name)) => {
                    out.push('[');
                    out.push_str(name);
                    out.push(']');
                    rest = &tail[close + 1..];
                }
                None => {
                    out.push('[');
                    rest = &tail[1..];
                }
            }
        }
        out.push_str(rest);
        out
    }

    fn tag_name(&self, tag: &str) -> Option<&str> {
        let (kind, mac) = tag.split_once(':')?;
        if kind.is_empty() || !kind.bytes().all(|b| b.is_ascii_lowercase()) {
            return None;
        }
        if mac.is_empty() || !mac.bytes().all(|b| b.is_ascii_hexdigit() || b == b'-') {
            return None;
        }
        let table = if kind == "client" { "clientNames" } else { "deviceNames" };
        self.extra.get(table)?.get(mac)?.as_str()
    }
}

// ── LAN profiles ─────────────────────────────────────────────────────

/// Switch-port profile from `setting/lan/profiles`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanProfile {
    pub id: String,
    pub name: String,
    /// `0` disabled, `1` enabled, `2` keep the device's setting.
    #[serde(default)]
    pub poe: Option<i64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Wrapper some profile endpoints use: `{ "data": [...] }`.
#[derive(Debug, Deserialize)]
pub(crate) struct DataList<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

// ── Hotspot vouchers ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub unused_count: Option<u64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voucher {
    #[serde(default)]
    pub id: Option<String>,
    pub code: String,
    /// `0` unused, `1` in use, `2` expired.
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn page_tolerates_missing_counters() {
        let page: Page<serde_json::Value> =
            serde_json::from_value(json!({ "data": [1, 2] })).expect("page");
        assert_eq!(page.total_rows, 0);
        assert_eq!(page.current_page, None);
        assert_eq!(page.data.len(), 2);
    }

    #[test]
    fn client_keeps_unmodelled_fields() {
        let client: Client = serde_json::from_value(json!({
            "mac": "AA-BB-CC-DD-EE-FF",
            "name": "laptop",
            "active": true,
            "vid": 20
        }))
        .expect("client");
        assert!(client.active);
        assert_eq!(client.extra.get("vid"), Some(&json!(20)));
    }

    #[test]
    fn log_entry_names_replace_mac_tags() {
        let entry: LogEntry = serde_json::from_value(json!({
            "content": "[client:AA-BB-CC-DD-EE-01] connected to [device:AC-84-C6-00-00-01] on [ssid:X]",
            "clientNames": { "AA-BB-CC-DD-EE-01": "laptop" },
            "deviceNames": { "AC-84-C6-00-00-01": "Office AP" }
        }))
        .expect("entry");
        assert_eq!(
            entry.display_content(),
            "[laptop] connected to [Office AP] on [ssid:X]"
        );
    }

    #[test]
    fn log_entry_timestamp_is_millis() {
        let entry: LogEntry =
            serde_json::from_value(json!({ "time": 1_700_000_000_000_i64 })).expect("entry");
        assert_eq!(entry.timestamp().map(|t| t.timestamp()), Some(1_700_000_000));
    }
}
