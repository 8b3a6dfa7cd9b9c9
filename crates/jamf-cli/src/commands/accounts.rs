//! Console account handlers.

use tabled::Tabled;

use jamf_api::{AccountsService, Identifier};
use jamf_api::models::{AccountGroup, AccountNameId, AccountPrivileges, AccountUser, AccountsList};
use jamf_config::ConnectionSettings;

use crate::cli::{AccountsArgs, AccountsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct AccountRow {
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
}

impl AccountRow {
    fn new(kind: &'static str, a: &AccountNameId) -> Self {
        Self {
            kind,
            id: a.id,
            name: a.name.clone(),
        }
    }
}

fn list_table(list: &AccountsList) -> String {
    let rows: Vec<AccountRow> = list
        .users
        .iter()
        .map(|u| AccountRow::new("user", u))
        .chain(list.groups.iter().map(|g| AccountRow::new("group", g)))
        .collect();
    output::render_table(&rows)
}

fn list_names(list: &AccountsList) -> String {
    list.users
        .iter()
        .chain(&list.groups)
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Detail views ────────────────────────────────────────────────────

fn privilege_lines(p: &AccountPrivileges) -> Vec<(&'static str, String)> {
    vec![
        ("JSS Objects", p.jss_objects.len().to_string()),
        ("JSS Settings", p.jss_settings.len().to_string()),
        ("JSS Actions", p.jss_actions.len().to_string()),
        ("Recon", p.recon.join(", ")),
        ("Casper Admin", p.casper_admin.join(", ")),
        ("Casper Remote", p.casper_remote.join(", ")),
        ("Casper Imaging", p.casper_imaging.join(", ")),
    ]
}

fn user_detail(u: &AccountUser) -> String {
    let mut pairs = vec![
        ("ID", u.id.to_string()),
        ("Name", u.name.clone()),
        ("Full Name", u.full_name.clone()),
        ("Email", u.email_address.clone()),
        ("Enabled", util::yes_no(u.is_enabled())),
        ("Directory User", util::yes_no(u.directory_user)),
        ("Access Level", u.access_level.clone()),
        ("Privilege Set", u.privilege_set.clone()),
    ];
    pairs.extend(privilege_lines(&u.privileges));
    output::detail_lines(&pairs)
}

fn group_detail(g: &AccountGroup) -> String {
    let members = g
        .members
        .iter()
        .map(|m| m.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let mut pairs = vec![
        ("ID", g.id.to_string()),
        ("Name", g.name.clone()),
        ("Access Level", g.access_level.clone()),
        ("Privilege Set", g.privilege_set.clone()),
        ("Members", members),
    ];
    pairs.extend(privilege_lines(&g.privileges));
    output::detail_lines(&pairs)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    settings: ConnectionSettings,
    args: AccountsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let service =
        AccountsService::new(&settings.base_url, settings.credentials, &settings.transport)?;

    let out = match args.command {
        AccountsCommand::List => {
            let accounts = service.list().await?;
            output::render_single(global.output(), &accounts, list_table, list_names)?
        }

        AccountsCommand::User(ref id_args) => {
            let user = match util::identifier(id_args) {
                Identifier::Id(id) => service.get_user_by_id(id).await,
                Identifier::Name(ref name) => service.get_user_by_name(name).await,
            }
            .map_err(|e| CliError::lookup(e, "user", &id_args.identifier, "accounts list"))?;
            output::render_single(global.output(), &user, user_detail, |u| u.id.to_string())?
        }

        AccountsCommand::Group(ref id_args) => {
            let group = match util::identifier(id_args) {
                Identifier::Id(id) => service.get_group_by_id(id).await,
                Identifier::Name(ref name) => service.get_group_by_name(name).await,
            }
            .map_err(|e| CliError::lookup(e, "group", &id_args.identifier, "accounts list"))?;
            output::render_single(global.output(), &group, group_detail, |g| g.id.to_string())?
        }
    };

    output::print_output(&out, global.quiet);
    Ok(())
}
