// Policies from `/JSSResource/policies`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{is_zero, list};

/// `GET /policies` -> `{"policies": [{"id": 1, "name": "..."}]}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyList {
    #[serde(deserialize_with = "list::deserialize")]
    pub policies: Vec<BasicPolicyInformation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicPolicyInformation {
    pub id: i64,
    pub name: String,
}

/// `GET /policies/id/{id}` -> `{"policy": {...}}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyResponse {
    pub policy: PolicyContents,
}

/// A policy: trigger/frequency settings, scripts to run, and local account
/// changes to apply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyContents {
    pub general: PolicyGeneral,
    #[serde(deserialize_with = "list::deserialize")]
    pub scripts: Vec<PolicyScript>,
    pub account_maintenance: AccountMaintenance,
}

// ── General ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyGeneral {
    #[serde(skip_serializing_if = "is_zero")]
    pub id: i64,
    pub name: String,
    pub enabled: bool,
    /// `EVENT`, `USER_INITIATED`, ...
    pub trigger: String,
    pub trigger_checkin: bool,
    pub trigger_enrollment_complete: bool,
    pub trigger_login: bool,
    pub trigger_logout: bool,
    pub trigger_network_state_changed: bool,
    pub trigger_startup: bool,
    pub trigger_other: String,
    /// `Once per computer`, `Ongoing`, ...
    pub frequency: String,
    pub retry_event: String,
    pub retry_attempts: i64,
    pub notify_on_each_failed_retry: bool,
    pub location_user_only: bool,
    pub target_drive: String,
    pub offline: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<PolicyCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyCategory {
    pub id: i64,
    pub name: String,
}

// ── Scripts ──────────────────────────────────────────────────────────

/// A script attached to a policy, with its positional parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyScript {
    pub id: i64,
    pub name: String,
    /// Run before or after the policy's other actions. Jamf requires a
    /// value on create; [`ScriptPriority::After`] is used when unset.
    pub priority: Option<ScriptPriority>,
    pub parameter4: Option<String>,
    pub parameter5: Option<String>,
    pub parameter6: Option<String>,
    pub parameter7: Option<String>,
    pub parameter8: Option<String>,
    pub parameter9: Option<String>,
    pub parameter10: Option<String>,
    pub parameter11: Option<String>,
}

impl PolicyScript {
    /// Parameters 4 through 11 in order.
    pub fn parameters(&self) -> [Option<&str>; 8] {
        [
            self.parameter4.as_deref(),
            self.parameter5.as_deref(),
            self.parameter6.as_deref(),
            self.parameter7.as_deref(),
            self.parameter8.as_deref(),
            self.parameter9.as_deref(),
            self.parameter10.as_deref(),
            self.parameter11.as_deref(),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum ScriptPriority {
    Before,
    #[default]
    After,
}

impl ScriptPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Before => "Before",
            Self::After => "After",
        }
    }
}

impl fmt::Display for ScriptPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ScriptPriority> for &'static str {
    fn from(priority: ScriptPriority) -> Self {
        priority.as_str()
    }
}

impl TryFrom<String> for ScriptPriority {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "before" => Ok(Self::Before),
            "after" => Ok(Self::After),
            _ => Err(format!("unknown script priority '{value}', expected Before or After")),
        }
    }
}

// ── Account maintenance ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountMaintenance {
    #[serde(deserialize_with = "list::deserialize")]
    pub accounts: Vec<PolicyAccount>,
    pub management_account: Option<ManagementAccount>,
}

impl AccountMaintenance {
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty() && self.management_account.is_none()
    }
}

/// A local account the policy creates, resets or deletes.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyAccount {
    /// `Create`, `Reset`, `Delete` or `DisableFileVault`.
    pub action: String,
    pub username: String,
    pub realname: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
    pub archive_home_directory: bool,
    pub archive_home_directory_to: String,
    pub home: String,
    pub picture: String,
    pub admin: bool,
    pub filevault_enabled: bool,
}

impl fmt::Debug for PolicyAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyAccount")
            .field("action", &self.action)
            .field("username", &self.username)
            .field("realname", &self.realname)
            .field("password", &"[REDACTED]")
            .field("home", &self.home)
            .field("admin", &self.admin)
            .field("filevault_enabled", &self.filevault_enabled)
            .finish_non_exhaustive()
    }
}

/// Changes to the Jamf management account on the target computer.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagementAccount {
    /// `rotate`, `specified`, `random`, `reset`, ...
    pub action: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub managed_password: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub managed_password_length: String,
}

impl fmt::Debug for ManagementAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagementAccount")
            .field("action", &self.action)
            .field("managed_password", &"[REDACTED]")
            .field("managed_password_length", &self.managed_password_length)
            .finish()
    }
}
