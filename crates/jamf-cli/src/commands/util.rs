//! Shared helpers for command handlers.

use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;

use jamf_api::Identifier;

use crate::cli::IdentifierArgs;
use crate::error::CliError;

/// Numeric identifiers address by id unless `--name` forces a name lookup.
pub fn identifier(args: &IdentifierArgs) -> Identifier {
    if args.name {
        return Identifier::Name(args.identifier.clone());
    }
    args.identifier
        .parse::<i64>()
        .map_or_else(|_| Identifier::Name(args.identifier.clone()), Identifier::Id)
}

/// Read and parse a JSON document for `--file` flags (`-` reads stdin).
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let io_err = |source| CliError::Io {
        path: path.display().to_string(),
        source,
    };

    let contents = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map_err(io_err)?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(io_err)?
    };

    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "file".into(),
        reason: format!("invalid JSON in {}: {e}", path.display()),
    })
}

pub fn yes_no(value: bool) -> String {
    if value { "yes" } else { "no" }.into()
}
