//! Config subcommand handlers.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path(global).display().to_string(), global.quiet);
        }

        ConfigCommand::Show => {
            let cfg = config::load(global)?;
            let rendered = cfg.to_redacted_toml()?;
            output::print_output(rendered.trim_end(), global.quiet);
        }
    }
    Ok(())
}
