//! Computer inventory handlers.

use tabled::Tabled;

use jamf_api::ComputersService;
use jamf_api::models::{BasicComputerInfo, Computer, ComputerNameId, HardwareInformation};
use jamf_config::ConnectionSettings;

use crate::cli::{ComputersArgs, ComputersCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct ComputerRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&ComputerNameId> for ComputerRow {
    fn from(c: &ComputerNameId) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
        }
    }
}

#[derive(Tabled)]
struct BasicComputerRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Serial")]
    serial: String,
    #[tabled(rename = "User")]
    username: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Managed")]
    managed: String,
    #[tabled(rename = "Last Report")]
    report_date: String,
}

impl From<&BasicComputerInfo> for BasicComputerRow {
    fn from(c: &BasicComputerInfo) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            serial: c.serial_number.clone(),
            username: c.username.clone(),
            model: c.model.clone(),
            managed: util::yes_no(c.managed),
            report_date: c.report_date_utc.clone(),
        }
    }
}

// ── Detail views ────────────────────────────────────────────────────

fn detail(c: &Computer) -> String {
    let g = &c.general;
    let loc = &c.user_location;
    let hw = &c.hardware;

    let mut text = output::detail_lines(&[
        ("ID", g.id.to_string()),
        ("Name", g.name.clone()),
        ("Serial", g.serial_number.clone()),
        ("UDID", g.udid.clone()),
        ("MAC", g.mac_address.clone()),
        ("Platform", g.platform.clone()),
        ("Jamf Version", g.jamf_version.clone()),
        ("MDM Capable", util::yes_no(g.mdm_capable)),
        ("Last Report", g.report_date.clone()),
        ("User", loc.username.clone()),
        ("Real Name", loc.real_name.clone()),
        ("Email", loc.email_address.clone()),
        ("Department", loc.department.clone()),
        ("Building", loc.building.clone()),
        ("Model", hw.model.clone()),
        ("OS", os_summary(hw)),
        ("FileVault Users", c.hardware.filevault_users.join(", ")),
    ]);

    let counts = [
        ("Applications", c.software.applications.len()),
        ("Certificates", c.certificates.len()),
        ("Config Profiles", c.config_profiles.len()),
        ("Extension Attrs", c.extension_attributes.len()),
        ("Group Memberships", c.groups.memberships.len()),
        ("Local Accounts", c.groups.local_accounts.len()),
    ];
    for (label, n) in counts.iter().filter(|(_, n)| *n > 0) {
        text.push_str(&format!("\n{label}: {n}"));
    }
    text
}

fn os_summary(hw: &HardwareInformation) -> String {
    if hw.os_name.is_empty() {
        return String::new();
    }
    format!("{} {} ({})", hw.os_name, hw.os_version, hw.os_build)
}

fn hardware_detail(hw: &HardwareInformation) -> String {
    let mut text = output::detail_lines(&[
        ("Make", hw.make.clone()),
        ("Model", hw.model.clone()),
        ("Model ID", hw.model_identifier.clone()),
        ("OS", os_summary(hw)),
        ("Processor", hw.processor_type.clone()),
        ("Architecture", hw.processor_architecture.clone()),
        ("Apple Silicon", util::yes_no(hw.is_apple_silicon)),
        ("Cores", hw.number_cores.to_string()),
        ("RAM (MB)", hw.total_ram_mb.to_string()),
        ("SIP", hw.sip_status.clone()),
        ("Gatekeeper", hw.gatekeeper_status.clone()),
        ("Disk Encryption", hw.disk_encryption_configuration.clone()),
    ]);

    for disk in &hw.storage {
        text.push_str(&format!(
            "\nDisk {}: {} MB, SMART {}",
            disk.disk, disk.drive_capacity_mb, disk.smart_status
        ));
        for part in &disk.partitions {
            text.push_str(&format!(
                "\n  {} ({}): {}% full",
                part.name, part.partition_type, part.percentage_full
            ));
        }
    }
    text
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    settings: ConnectionSettings,
    args: ComputersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let service =
        ComputersService::new(&settings.base_url, settings.credentials, &settings.transport)?;

    let out = match args.command {
        ComputersCommand::List { basic: false } => {
            let computers = service.list().await?;
            output::render_list(
                global.output(),
                &computers,
                |c| ComputerRow::from(c),
                |c| c.id.to_string(),
            )?
        }

        ComputersCommand::List { basic: true } => {
            let computers = service.list_with_basic_info().await?;
            output::render_list(
                global.output(),
                &computers,
                |c| BasicComputerRow::from(c),
                |c| c.id.to_string(),
            )?
        }

        ComputersCommand::Get(ref id_args) => {
            let computer = service
                .get(&util::identifier(id_args))
                .await
                .map_err(|e| {
                    CliError::lookup(e, "computer", &id_args.identifier, "computers list")
                })?;
            output::render_single(global.output(), &computer, detail, |c| {
                c.general.id.to_string()
            })?
        }

        ComputersCommand::Hardware { ref serial } => {
            let hardware = service
                .hardware_by_serial_number(serial)
                .await
                .map_err(|e| CliError::lookup(e, "computer", serial, "computers list --basic"))?;
            output::render_single(global.output(), &hardware, hardware_detail, |hw| {
                hw.model_identifier.clone()
            })?
        }
    };

    output::print_output(&out, global.quiet);
    Ok(())
}
