// Computer inventory records from `/JSSResource/computers`.

use serde::{Deserialize, Serialize};

use super::list;

// ── Listing ──────────────────────────────────────────────────────────

/// `GET /computers` -> `{"computers": [{"id": 3, "name": "..."}]}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputerList {
    #[serde(deserialize_with = "list::deserialize")]
    pub computers: Vec<ComputerNameId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputerNameId {
    pub id: i64,
    pub name: String,
}

/// `GET /computers/subset/basic`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicComputerList {
    #[serde(deserialize_with = "list::deserialize")]
    pub computers: Vec<BasicComputerInfo>,
}

/// One row of the basic subset: identity plus owner and report date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicComputerInfo {
    pub id: i64,
    pub name: String,
    pub managed: bool,
    pub username: String,
    pub model: String,
    pub department: String,
    pub building: String,
    pub mac_address: String,
    pub udid: String,
    pub serial_number: String,
    pub report_date_utc: String,
    pub report_date_epoch: i64,
}

// ── Full record ──────────────────────────────────────────────────────

/// `GET /computers/id/{id}` -> `{"computer": {...}}` or `<computer>...</computer>`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputerResponse {
    pub computer: Computer,
}

/// A computer enrolled in Jamf with all of its inventory sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Computer {
    pub general: GeneralInformation,
    #[serde(rename = "location")]
    pub user_location: LocationInformation,
    pub hardware: HardwareInformation,
    #[serde(deserialize_with = "list::deserialize")]
    pub certificates: Vec<CertificateInformation>,
    pub software: SoftwareInformation,
    #[serde(deserialize_with = "list::deserialize")]
    pub extension_attributes: Vec<ComputerExtensionAttributeValue>,
    #[serde(rename = "groups_accounts")]
    pub groups: GroupInformation,
    #[serde(rename = "configuration_profiles", deserialize_with = "list::deserialize")]
    pub config_profiles: Vec<ConfigProfile>,
    pub security: SecurityInformation,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralInformation {
    pub id: i64,
    pub name: String,
    pub mac_address: String,
    pub serial_number: String,
    pub udid: String,
    pub jamf_version: String,
    pub platform: String,
    pub mdm_capable: bool,
    pub report_date: String,
}

/// The "User and Location" inventory section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationInformation {
    pub username: String,
    #[serde(rename = "realname")]
    pub real_name: String,
    pub email_address: String,
    pub position: String,
    pub department: String,
    pub building: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HardwareInformation {
    pub make: String,
    pub model: String,
    pub model_identifier: String,
    pub os_name: String,
    pub os_version: String,
    pub os_build: String,
    pub software_update_device_id: String,
    pub active_directory_status: String,
    pub service_pack: String,
    pub processor_type: String,
    pub is_apple_silicon: bool,
    pub processor_architecture: String,
    pub processor_speed: i64,
    pub processor_speed_mhz: i64,
    pub number_processors: i64,
    pub number_cores: i64,
    pub total_ram: i64,
    pub total_ram_mb: i64,
    pub boot_rom: String,
    pub bus_speed: i64,
    pub bus_speed_mhz: i64,
    pub battery_capacity: i64,
    pub cache_size: i64,
    pub cache_size_kb: i64,
    pub available_ram_slots: i64,
    pub optical_drive: String,
    pub nic_speed: String,
    pub smc_version: String,
    pub ble_capable: bool,
    pub supports_ios_app_installs: bool,
    pub sip_status: String,
    pub gatekeeper_status: String,
    pub xprotect_version: String,
    pub institutional_recovery_key: String,
    pub disk_encryption_configuration: String,
    #[serde(rename = "filevault2_users", deserialize_with = "list::deserialize")]
    pub filevault_users: Vec<String>,
    #[serde(deserialize_with = "list::deserialize")]
    pub storage: Vec<Storage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Storage {
    pub disk: String,
    pub model: String,
    pub revision: String,
    pub serial_number: String,
    pub size: i64,
    pub drive_capacity_mb: i64,
    pub connection_type: String,
    pub smart_status: String,
    #[serde(deserialize_with = "list::deserialize")]
    pub partitions: Vec<Partition>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Partition {
    pub name: String,
    pub size: i64,
    #[serde(rename = "type")]
    pub partition_type: String,
    pub partition_capacity_mb: i64,
    pub percentage_full: i64,
    pub filevault_status: String,
    pub filevault_percent: i64,
    pub filevault2_status: String,
    pub filevault2_percent: i64,
    pub boot_drive_available_mb: i64,
    pub lvg_uuid: String,
    pub lv_uuid: String,
    pub pv_uuid: String,
}

/// A certificate installed on the device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificateInformation {
    pub common_name: String,
    pub identity: bool,
    pub expires_utc: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoftwareInformation {
    #[serde(deserialize_with = "list::deserialize")]
    pub unix_executables: Vec<String>,
    #[serde(deserialize_with = "list::deserialize")]
    pub installed_by_casper: Vec<String>,
    #[serde(rename = "installed_by_installer_swu", deserialize_with = "list::deserialize")]
    pub installed_by_installer: Vec<String>,
    #[serde(deserialize_with = "list::deserialize")]
    pub available_software_updates: Vec<String>,
    #[serde(deserialize_with = "list::deserialize")]
    pub running_services: Vec<String>,
    #[serde(deserialize_with = "list::deserialize")]
    pub applications: Vec<ApplicationInformation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationInformation {
    pub name: String,
    pub path: String,
    pub version: String,
}

/// An extension attribute value as reported on a computer record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputerExtensionAttributeValue {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupInformation {
    #[serde(rename = "computer_group_memberships", deserialize_with = "list::deserialize")]
    pub memberships: Vec<String>,
    #[serde(deserialize_with = "list::deserialize")]
    pub local_accounts: Vec<LocalAccount>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalAccount {
    pub name: String,
    #[serde(rename = "realname")]
    pub real_name: String,
    pub uid: String,
    pub administrator: bool,
    pub filevault_enabled: bool,
}

/// A configuration profile installed on the device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigProfile {
    pub id: i64,
    pub name: String,
    pub uuid: String,
    #[serde(rename = "is_removable")]
    pub removable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityInformation {
    pub activation_lock: bool,
    pub recovery_lock_enabled: bool,
    pub secure_boot_level: String,
    pub external_boot_level: String,
    pub firewall_enabled: bool,
}
