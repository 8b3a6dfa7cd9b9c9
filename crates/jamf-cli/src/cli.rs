//! Clap derive structures for the `jamf` CLI.
//!
//! Defines the command tree, global flags, and shared types. Only depends on
//! clap and clap_complete so `build.rs` can include it for man pages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// jamf -- query and provision a Jamf Pro server over the Classic API
#[derive(Debug, Parser)]
#[command(
    name = "jamf",
    version,
    about = "Query and provision Jamf Pro from the command line",
    long_about = "Command-line client for the Jamf Pro Classic API (/JSSResource).\n\n\
        Reads computers, console accounts, computer extension attributes and\n\
        policies, and creates extension attributes and policies from JSON files.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Server profile to use
    #[arg(long, short = 'p', env = "JAMF_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "JAMF_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Jamf Pro base URL (overrides profile)
    #[arg(long, short = 'u', env = "JAMF_URL", global = true)]
    pub url: Option<String>,

    /// API username (overrides profile)
    #[arg(long, env = "JAMF_USERNAME", global = true)]
    pub username: Option<String>,

    /// API password (overrides profile)
    #[arg(long, env = "JAMF_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Output format (falls back to `defaults.output` in the config, then table)
    #[arg(long, short = 'o', env = "JAMF_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "JAMF_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "JAMF_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

impl GlobalOpts {
    /// Format to render with once any config fallback has been applied.
    pub fn output(&self) -> OutputFormat {
        self.output.unwrap_or_default()
    }
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Query computer inventory
    #[command(alias = "comp", alias = "c")]
    Computers(ComputersArgs),

    /// Query Jamf Pro console users and groups
    #[command(alias = "acct")]
    Accounts(AccountsArgs),

    /// Manage computer extension attributes
    #[command(alias = "ea")]
    ExtensionAttributes(ExtensionAttributesArgs),

    /// Manage policies
    #[command(alias = "pol")]
    Policies(PoliciesArgs),

    /// Inspect CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Arguments ─────────────────────────────────────────────────

/// A resource addressed by numeric id or by name.
#[derive(Debug, Args)]
pub struct IdentifierArgs {
    /// Numeric id, or name
    pub identifier: String,

    /// Treat IDENTIFIER as a name even if it is numeric
    #[arg(long)]
    pub name: bool,
}

/// A JSON document describing a resource to create.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Path to a JSON file (`-` for stdin)
    #[arg(long, short = 'f')]
    pub file: PathBuf,
}

// ── Computers ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ComputersArgs {
    #[command(subcommand)]
    pub command: ComputersCommand,
}

#[derive(Debug, Subcommand)]
pub enum ComputersCommand {
    /// List computers
    #[command(alias = "ls")]
    List {
        /// Include owner, model and last report date
        #[arg(long, short = 'b')]
        basic: bool,
    },

    /// Show a computer's full inventory record
    Get(IdentifierArgs),

    /// Show hardware details for a serial number
    Hardware {
        /// Computer serial number
        serial: String,
    },
}

// ── Accounts ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AccountsArgs {
    #[command(subcommand)]
    pub command: AccountsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AccountsCommand {
    /// List console users and groups
    #[command(alias = "ls")]
    List,

    /// Show a console user
    User(IdentifierArgs),

    /// Show a console group
    Group(IdentifierArgs),
}

// ── Extension Attributes ─────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ExtensionAttributesArgs {
    #[command(subcommand)]
    pub command: ExtensionAttributesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ExtensionAttributesCommand {
    /// List computer extension attributes
    #[command(alias = "ls")]
    List,

    /// Show an extension attribute definition
    Get(IdentifierArgs),

    /// Create an extension attribute from a JSON file
    Create(CreateArgs),
}

// ── Policies ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PoliciesArgs {
    #[command(subcommand)]
    pub command: PoliciesCommand,
}

#[derive(Debug, Subcommand)]
pub enum PoliciesCommand {
    /// List policies
    #[command(alias = "ls")]
    List,

    /// Show a policy
    Get(IdentifierArgs),

    /// Create a policy from a JSON file
    Create(CreateArgs),
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Show the effective configuration (passwords masked)
    Show,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
