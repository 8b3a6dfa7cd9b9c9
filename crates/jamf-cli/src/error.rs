//! CLI error types with miette diagnostics.
//!
//! Maps `jamf_api::Error` and `jamf_config::ConfigError` into user-facing
//! errors with actionable help text and a stable exit code.

use miette::Diagnostic;
use thiserror::Error;

use jamf_api::ErrorKind;
use jamf_config::ConfigError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const CONFIG: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach Jamf Pro at {url}")]
    #[diagnostic(
        code(jamf::connection_failed),
        help(
            "Check that the server is reachable and the URL is correct.\n\
             Self-signed certificate? Retry with --insecure (-k) or set ca_cert in your profile.\n\
             Slow server? Raise --timeout."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: jamf_api::Error,
    },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed (HTTP {status})")]
    #[diagnostic(
        code(jamf::auth_failed),
        help(
            "Verify the username and password for this profile.\n\
             The account also needs read (or create) privileges for the resource."
        )
    )]
    AuthFailed {
        status: u16,
        #[source]
        source: jamf_api::Error,
    },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(jamf::no_credentials),
        help(
            "Set username and password_env in the profile,\n\
             or export JAMF_USERNAME and JAMF_PASSWORD."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(jamf::not_found),
        help("Run: jamf {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(code(jamf::api_error))]
    Api(jamf_api::Error),

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(jamf::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(jamf::profile_not_found),
        help("Available profiles: {available}")
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No Jamf Pro server configured")]
    #[diagnostic(
        code(jamf::no_config),
        help(
            "Add a profile to {path}\n\
             or pass --url, --username and --password (JAMF_URL, JAMF_USERNAME, JAMF_PASSWORD)."
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(jamf::config))]
    Config(Box<ConfigError>),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error("Could not read {path}: {source}")]
    #[diagnostic(code(jamf::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(jamf::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("Could not render YAML: {0}")]
    #[diagnostic(code(jamf::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::Json(_) => exit_code::USAGE,
            Self::ProfileNotFound { .. } | Self::NoConfig { .. } | Self::Config(_) => {
                exit_code::CONFIG
            }
            Self::Api(err) => match err.kind() {
                ErrorKind::Validation | ErrorKind::InvalidIdentifier => exit_code::USAGE,
                ErrorKind::InvalidConfiguration => exit_code::CONFIG,
                _ => exit_code::GENERAL,
            },
            Self::Io { .. } | Self::Yaml(_) => exit_code::GENERAL,
        }
    }

    /// Translate a library error for a lookup of `identifier`, so a 404 can
    /// point at the matching `list` command.
    pub fn lookup(err: jamf_api::Error, resource_type: &str, identifier: &str, list_command: &str) -> Self {
        if err.is_not_found() {
            return Self::NotFound {
                resource_type: resource_type.into(),
                identifier: identifier.into(),
                list_command: list_command.into(),
            };
        }
        err.into()
    }
}

// ── jamf_api::Error → CliError mapping ───────────────────────────────

impl From<jamf_api::Error> for CliError {
    fn from(err: jamf_api::Error) -> Self {
        match err.kind() {
            ErrorKind::Transport if err.status().is_none() => CliError::ConnectionFailed {
                url: endpoint_of(&err).unwrap_or("(unknown)").to_owned(),
                source: err,
            },
            ErrorKind::Api | ErrorKind::Transport => match err.status() {
                Some(status @ (401 | 403)) => CliError::AuthFailed { status, source: err },
                _ => CliError::Api(err),
            },
            _ => CliError::Api(err),
        }
    }
}

fn endpoint_of(err: &jamf_api::Error) -> Option<&str> {
    match err {
        jamf_api::Error::Request { endpoint, .. } => Some(endpoint),
        _ => None,
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ProfileNotFound { name, available } => {
                CliError::ProfileNotFound { name, available }
            }
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(Box::new(other)),
        }
    }
}
