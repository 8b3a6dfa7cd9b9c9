//! Computer extension attribute handlers.

use tabled::Tabled;

use jamf_api::ComputerExtensionAttributesService;
use jamf_api::models::{ComputerExtensionAttribute, CreatedResource, ExtensionAttributeNameId};
use jamf_config::ConnectionSettings;

use crate::cli::{ExtensionAttributesArgs, ExtensionAttributesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ExtensionAttributeRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Enabled")]
    enabled: String,
}

impl From<&ExtensionAttributeNameId> for ExtensionAttributeRow {
    fn from(ea: &ExtensionAttributeNameId) -> Self {
        Self {
            id: ea.id,
            name: ea.name.clone(),
            enabled: util::yes_no(ea.enabled),
        }
    }
}

fn detail(ea: &ComputerExtensionAttribute) -> String {
    let input = &ea.input_type;
    let mut text = output::detail_lines(&[
        ("ID", ea.id.to_string()),
        ("Name", ea.name.clone()),
        ("Enabled", util::yes_no(ea.enabled)),
        ("Description", ea.description.clone()),
        ("Data Type", ea.data_type.clone()),
        ("Input Type", input.kind.clone()),
        ("Platform", input.platform.clone()),
        ("Choices", input.popup_choices.join(", ")),
        ("Inventory Display", ea.inventory_display.clone()),
    ]);
    if !input.script.is_empty() {
        text.push_str("\n\n");
        text.push_str(&input.script);
    }
    text
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    settings: ConnectionSettings,
    args: ExtensionAttributesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let service = ComputerExtensionAttributesService::new(
        &settings.base_url,
        settings.credentials,
        &settings.transport,
    )?;

    let out = match args.command {
        ExtensionAttributesCommand::List => {
            let attrs = service.list().await?;
            output::render_list(
                global.output(),
                &attrs,
                |ea| ExtensionAttributeRow::from(ea),
                |ea| ea.id.to_string(),
            )?
        }

        ExtensionAttributesCommand::Get(ref id_args) => {
            let attr = service.get(&util::identifier(id_args)).await.map_err(|e| {
                CliError::lookup(
                    e,
                    "extension attribute",
                    &id_args.identifier,
                    "extension-attributes list",
                )
            })?;
            output::render_single(global.output(), &attr, detail, |ea| ea.id.to_string())?
        }

        ExtensionAttributesCommand::Create(ref create) => {
            let attr: ComputerExtensionAttribute = util::read_json_file(&create.file)?;
            let created = service.create(&attr).await?;
            output::render_single(
                global.output(),
                &created,
                |c: &CreatedResource| format!("Created extension attribute {}", c.id),
                |c| c.id.to_string(),
            )?
        }
    };

    output::print_output(&out, global.quiet);
    Ok(())
}
