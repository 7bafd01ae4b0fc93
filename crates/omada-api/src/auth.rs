use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Header carrying the session token on authenticated calls.
pub const TOKEN_HEADER: &str = "Csrf-Token";

/// Query parameter carrying the session token on authenticated calls.
pub const TOKEN_PARAM: &str = "token";

/// Where the session token is attached on authenticated calls.
///
/// Older controllers only look at the `token` query parameter; v5 checks
/// the `Csrf-Token` header. Sending both is accepted everywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenPlacement {
    Header,
    Query,
    #[default]
    Both,
}

impl TokenPlacement {
    pub fn in_header(self) -> bool {
        matches!(self, Self::Header | Self::Both)
    }

    pub fn in_query(self) -> bool {
        matches!(self, Self::Query | Self::Both)
    }
}

/// Result of a successful `POST /login`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    pub token: SecretString,
    #[serde(default)]
    pub role_type: Option<i64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// `GET /users/current` payload. Only the privilege list is load-bearing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub privilege: Privilege,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Privilege {
    #[serde(default)]
    pub sites: Vec<SitePrivilege>,
    #[serde(default)]
    pub last_visited: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One `{name, key}` entry of the privilege list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitePrivilege {
    pub name: String,
    pub key: String,
}

/// Site display name → opaque site key.
///
/// Built in one piece from the current user at login and never patched.
#[derive(Debug, Clone, Default)]
pub struct SiteKeys {
    entries: Vec<SitePrivilege>,
}

impl SiteKeys {
    pub fn from_user(user: &CurrentUser) -> Self {
        Self {
            entries: user.privilege.sites.clone(),
        }
    }

    /// Look up the key for `name`.
    pub fn resolve(&self, name: &str) -> Result<&str, Error> {
        self.entries
            .iter()
            .find(|site| site.name == name)
            .map(|site| site.key.as_str())
            .ok_or_else(|| Error::Permission {
                site: name.to_owned(),
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|site| site.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn user() -> CurrentUser {
        serde_json::from_value(json!({
            "id": "u1",
            "name": "admin",
            "privilege": {
                "sites": [
                    { "name": "Default", "key": "k-default" },
                    { "name": "Branch", "key": "k-branch" }
                ],
                "lastVisited": "k-default"
            },
            "roleType": 0
        }))
        .expect("valid user")
    }

    #[test]
    fn resolves_known_site() {
        let keys = SiteKeys::from_user(&user());
        assert_eq!(keys.resolve("Branch").ok(), Some("k-branch"));
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn unknown_site_is_permission_error() {
        let keys = SiteKeys::from_user(&user());
        match keys.resolve("Warehouse") {
            Err(Error::Permission { site }) => assert_eq!(site, "Warehouse"),
            other => panic!("expected Permission error, got: {other:?}"),
        }
    }

    #[test]
    fn site_names_are_case_sensitive() {
        let keys = SiteKeys::from_user(&user());
        assert!(keys.resolve("default").is_err());
    }

    #[test]
    fn token_placement_flags() {
        assert!(TokenPlacement::Both.in_header() && TokenPlacement::Both.in_query());
        assert!(!TokenPlacement::Header.in_query());
        assert!(!TokenPlacement::Query.in_header());
    }
}
