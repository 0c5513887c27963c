//! Clap derive structures for the `ztm` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// ztm -- declarative ZeroTier Central member management
#[derive(Debug, Parser)]
#[command(
    name = "ztm",
    version,
    about = "Reconcile ZeroTier network members from the command line",
    long_about = "Declare a ZeroTier network member in a TOML file and converge\n\
        ZeroTier Central onto it. State is kept in a local JSON file so\n\
        later runs can update, refresh, or replace the member.",
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
    /// Central profile to use
    #[arg(long, short = 'p', env = "ZTM_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Central API URL (overrides profile)
    #[arg(long, env = "ZTM_URL", global = true)]
    pub url: Option<String>,

    /// Central API token
    #[arg(long, env = "ZEROTIER_CENTRAL_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(long, short = 'o', env = "ZTM_OUTPUT", default_value = "table", global = true)]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "ZTM_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "ZTM_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
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
    /// Reconcile a network member
    #[command(alias = "m")]
    Member(MemberArgs),

    /// Derive a member's RFC4193 and 6PLANE addresses (offline)
    #[command(alias = "addr")]
    Address(AddressArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Member ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct MemberArgs {
    #[command(subcommand)]
    pub command: MemberCommand,
}

#[derive(Debug, Subcommand)]
pub enum MemberCommand {
    /// Converge Central onto a declared member
    Apply {
        /// Declared member (TOML)
        file: PathBuf,

        #[command(flatten)]
        state: StateArg,
    },

    /// Refresh local state from Central
    Refresh {
        #[command(flatten)]
        state: StateArg,
    },

    /// Remove the member from its network and drop the state file
    Destroy {
        #[command(flatten)]
        state: StateArg,
    },

    /// Check whether the member still exists on Central
    Exists {
        #[command(flatten)]
        state: StateArg,
    },

    /// Adopt an existing member by its <network-id>-<node-id> identifier
    Import {
        /// Composite identifier, e.g. 8056c2e21c000001-0123456789
        id: String,

        #[command(flatten)]
        state: StateArg,
    },
}

#[derive(Debug, Args)]
pub struct StateArg {
    /// Path to the JSON state file
    #[arg(long, short = 's', default_value = "ztm-member.json")]
    pub state: PathBuf,
}

// ── Address ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AddressArgs {
    /// 16-hex-digit network id
    pub network_id: String,

    /// 10-hex-digit node id
    pub node_id: String,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Show the effective configuration (tokens redacted)
    Show,

    /// Store the API token for a profile in the system keyring
    SetToken,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
