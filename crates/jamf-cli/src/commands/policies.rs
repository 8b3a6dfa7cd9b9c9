//! Policy handlers.

use tabled::Tabled;

use jamf_api::PoliciesService;
use jamf_api::models::{BasicPolicyInformation, CreatedResource, PolicyContents};
use jamf_config::ConnectionSettings;

use crate::cli::{GlobalOpts, PoliciesArgs, PoliciesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct PolicyRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&BasicPolicyInformation> for PolicyRow {
    fn from(p: &BasicPolicyInformation) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
        }
    }
}

fn detail(p: &PolicyContents) -> String {
    let g = &p.general;
    let triggers = [
        ("checkin", g.trigger_checkin),
        ("enrollment", g.trigger_enrollment_complete),
        ("login", g.trigger_login),
        ("logout", g.trigger_logout),
        ("network", g.trigger_network_state_changed),
        ("startup", g.trigger_startup),
    ]
    .iter()
    .filter(|(_, on)| *on)
    .map(|(name, _)| *name)
    .chain((!g.trigger_other.is_empty()).then_some(g.trigger_other.as_str()))
    .collect::<Vec<_>>()
    .join(", ");

    let mut text = output::detail_lines(&[
        ("ID", g.id.to_string()),
        ("Name", g.name.clone()),
        ("Enabled", util::yes_no(g.enabled)),
        (
            "Category",
            g.category.as_ref().map(|c| c.name.clone()).unwrap_or_default(),
        ),
        ("Triggers", triggers),
        ("Frequency", g.frequency.clone()),
        ("Retry", g.retry_event.clone()),
        ("Target Drive", g.target_drive.clone()),
    ]);

    for script in &p.scripts {
        let priority = script.priority.unwrap_or_default();
        text.push_str(&format!("\nScript {} ({}): {priority}", script.id, script.name));
        for (n, value) in (4..).zip(script.parameters()) {
            if let Some(value) = value {
                text.push_str(&format!("\n  parameter{n}: {value}"));
            }
        }
    }

    let maintenance = &p.account_maintenance;
    for account in &maintenance.accounts {
        text.push_str(&format!("\nAccount {}: {}", account.username, account.action));
    }
    if let Some(ref managed) = maintenance.management_account {
        text.push_str(&format!("\nManagement Account: {}", managed.action));
    }
    text
}

fn created(c: &CreatedResource) -> String {
    format!("Created policy {}", c.id)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    settings: ConnectionSettings,
    args: PoliciesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let service =
        PoliciesService::new(&settings.base_url, settings.credentials, &settings.transport)?;

    let out = match args.command {
        PoliciesCommand::List => {
            let policies = service.list().await?;
            output::render_list(
                global.output(),
                &policies,
                |p| PolicyRow::from(p),
                |p| p.id.to_string(),
            )?
        }

        PoliciesCommand::Get(ref id_args) => {
            let policy = service
                .get(&util::identifier(id_args))
                .await
                .map_err(|e| CliError::lookup(e, "policy", &id_args.identifier, "policies list"))?;
            output::render_single(global.output(), &policy, detail, |p| p.general.id.to_string())?
        }

        PoliciesCommand::Create(ref create) => {
            let policy: PolicyContents = util::read_json_file(&create.file)?;
            let result = service.create(&policy).await?;
            output::render_single(global.output(), &result, created, |c| c.id.to_string())?
        }
    };

    output::print_output(&out, global.quiet);
    Ok(())
}
