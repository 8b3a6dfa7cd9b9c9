//! Command dispatch: bridges CLI args -> jamf-api services -> output formatting.

pub mod accounts;
pub mod computers;
pub mod config_cmd;
pub mod extension_attributes;
pub mod policies;
pub mod util;

use jamf_config::ConnectionSettings;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a server-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    settings: ConnectionSettings,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Computers(args) => computers::handle(settings, args, global).await,
        Command::Accounts(args) => accounts::handle(settings, args, global).await,
        Command::ExtensionAttributes(args) => {
            extension_attributes::handle(settings, args, global).await
        }
        Command::Policies(args) => policies::handle(settings, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
