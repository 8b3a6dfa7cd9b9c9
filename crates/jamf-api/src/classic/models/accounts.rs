// Jamf console accounts: users and groups from `/JSSResource/accounts`.

use serde::{Deserialize, Serialize};

use super::list;

/// `GET /accounts` -> `{"accounts": {"users": [...], "groups": [...]}}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountsResponse {
    pub accounts: AccountsList,
}

/// Every console user and group, as id/name pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountsList {
    #[serde(deserialize_with = "list::deserialize")]
    pub users: Vec<AccountNameId>,
    #[serde(deserialize_with = "list::deserialize")]
    pub groups: Vec<AccountNameId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountNameId {
    pub id: i64,
    pub name: String,
}

// ── Users ────────────────────────────────────────────────────────────

/// `GET /accounts/userid/{id}` -> `{"account": {...}}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountUserResponse {
    pub account: AccountUser,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountUser {
    pub id: i64,
    pub name: String,
    pub directory_user: bool,
    pub full_name: String,
    pub email: String,
    pub email_address: String,
    /// Hash of the console password. Jamf returns it to privileged readers.
    pub password_sha256: String,
    /// `"Enabled"` or `"Disabled"`.
    pub enabled: String,
    pub force_password_change: bool,
    pub access_level: String,
    pub privilege_set: String,
    pub privileges: AccountPrivileges,
}

impl AccountUser {
    pub fn is_enabled(&self) -> bool {
        self.enabled.eq_ignore_ascii_case("enabled")
    }
}

// ── Groups ───────────────────────────────────────────────────────────

/// `GET /accounts/groupid/{id}`. Jamf keys the record as `group`; some
/// server versions reuse `account`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountGroupResponse {
    #[serde(alias = "account")]
    pub group: AccountGroup,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountGroup {
    pub id: i64,
    pub name: String,
    pub access_level: String,
    pub privilege_set: String,
    pub privileges: AccountPrivileges,
    #[serde(deserialize_with = "list::deserialize")]
    pub members: Vec<AccountNameId>,
}

/// Privilege names granted per area of the console. Groups may also carry
/// the Casper Remote and Casper Imaging areas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountPrivileges {
    #[serde(deserialize_with = "list::deserialize")]
    pub jss_objects: Vec<String>,
    #[serde(deserialize_with = "list::deserialize")]
    pub jss_settings: Vec<String>,
    #[serde(deserialize_with = "list::deserialize")]
    pub jss_actions: Vec<String>,
    #[serde(deserialize_with = "list::deserialize")]
    pub recon: Vec<String>,
    #[serde(deserialize_with = "list::deserialize")]
    pub casper_admin: Vec<String>,
    #[serde(deserialize_with = "list::deserialize")]
    pub casper_remote: Vec<String>,
    #[serde(deserialize_with = "list::deserialize")]
    pub casper_imaging: Vec<String>,
}

impl AccountPrivileges {
    /// Total number of privileges across all areas.
    pub fn count(&self) -> usize {
        [
            &self.jss_objects,
            &self.jss_settings,
            &self.jss_actions,
            &self.recon,
            &self.casper_admin,
            &self.casper_remote,
            &self.casper_imaging,
        ]
        .iter()
        .map(|v| v.len())
        .sum()
    }
}
