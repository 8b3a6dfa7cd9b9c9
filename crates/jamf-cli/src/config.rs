//! Connection settings for a command: config file, profile, then flags.
//!
//! `jamf-config` owns the file format and credential lookup; this module
//! only layers the global CLI flags on top.

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;
use secrecy::SecretString;
use tracing::debug;

use jamf_api::{Credentials, TlsMode};
use jamf_config::{Config, ConfigError, ConnectionSettings, Profile};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Config file selected by `--config`, else the platform default.
pub fn config_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(jamf_config::config_path)
}

pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    Ok(jamf_config::load_config_from(&config_path(global))?)
}

/// Use `[defaults] output` when neither `--output` nor `JAMF_OUTPUT` is set.
pub fn apply_output_default(global: &mut GlobalOpts, cfg: &Config) -> Result<(), CliError> {
    if global.output.is_none() {
        let format = OutputFormat::from_str(&cfg.defaults.output, true).map_err(|reason| {
            CliError::Validation {
                field: "defaults.output".into(),
                reason,
            }
        })?;
        global.output = Some(format);
    }
    Ok(())
}

/// Resolve everything a service needs to talk to the server.
///
/// An explicitly requested profile must exist. Without `--profile`, a
/// missing default profile is fine as long as `--url` names the server.
pub fn resolve_settings(cfg: &Config, global: &GlobalOpts) -> Result<ConnectionSettings, CliError> {
    let (profile_name, profile) = match cfg.profile(global.profile.as_deref()) {
        Ok((name, profile)) => (name.to_owned(), profile.clone()),
        Err(ConfigError::ProfileNotFound { name, .. })
            if global.profile.is_none() && global.url.is_some() =>
        {
            (name, Profile::default())
        }
        Err(ConfigError::ProfileNotFound { .. }) if global.profile.is_none() => {
            return Err(CliError::NoConfig {
                path: config_path(global).display().to_string(),
            });
        }
        Err(e) => return Err(e.into()),
    };
    debug!(profile = %profile_name, "resolving connection settings");

    apply_overrides(&profile, &profile_name, cfg, global)
}

fn apply_overrides(
    profile: &Profile,
    profile_name: &str,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<ConnectionSettings, CliError> {
    let url = jamf_config::parse_url(global.url.as_deref().unwrap_or(&profile.url))?;

    let username = match global.username {
        Some(ref u) => u.clone(),
        None => jamf_config::resolve_username(profile, profile_name)?,
    };
    let password = match global.password {
        Some(ref p) => SecretString::from(p.clone()),
        None => jamf_config::resolve_password(profile, profile_name)?,
    };

    let mut transport = jamf_config::transport_for(profile, &cfg.defaults);
    if global.insecure {
        transport.tls = TlsMode::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        transport.timeout = Duration::from_secs(secs);
    }

    Ok(ConnectionSettings {
        base_url: url.as_str().trim_end_matches('/').to_owned(),
        credentials: Credentials::new(username, password),
        transport,
    })
}
