//! Clap derive structures for the `wserest` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// wserest -- manage Wowza Streaming Engine over its REST API
#[derive(Debug, Parser)]
#[command(
    name = "wserest",
    version,
    about = "Manage Wowza Streaming Engine applications and DVR stores",
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
    #[arg(long, short = 'p', env = "WSE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// REST base URL, e.g. http://localhost:8087/v2 (overrides profile)
    #[arg(long, short = 'H', env = "WSE_HOST", global = true)]
    pub host: Option<String>,

    /// Server instance (overrides profile)
    #[arg(long, env = "WSE_SERVER", global = true)]
    pub server: Option<String>,

    /// Virtual host instance (overrides profile)
    #[arg(long, env = "WSE_VHOST", global = true)]
    pub vhost: Option<String>,

    /// Username for basic auth (overrides profile)
    #[arg(long, short = 'u', env = "WSE_USERNAME", global = true)]
    pub username: Option<String>,

    /// Password for basic auth
    #[arg(long, env = "WSE_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Output format
    #[arg(long, short = 'o', env = "WSE_OUTPUT", default_value = "table", global = true)]
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

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "WSE_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "WSE_TIMEOUT", global = true)]
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
    /// Manage applications on the virtual host
    #[command(alias = "app", alias = "a")]
    Apps(AppsArgs),

    /// Manage DVR stores and clip extraction
    Dvr(DvrArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Applications ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AppsArgs {
    #[command(subcommand)]
    pub command: AppsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AppsCommand {
    /// List applications
    #[command(alias = "ls")]
    List,

    /// Show an application's configuration
    Get {
        /// Application name
        name: String,

        /// Show the advanced configuration (properties + modules)
        #[arg(long)]
        advanced: bool,
    },

    /// Create an application
    Create(AppSpec),

    /// Update an application
    Update(AppSpec),

    /// Replace advanced properties and modules from a JSON file
    SetAdvanced {
        /// Application name
        name: String,

        /// JSON file with `advancedSettings` and `modules` arrays
        #[arg(long, short = 'F')]
        from_file: PathBuf,
    },

    /// Delete an application
    #[command(alias = "rm")]
    Remove {
        /// Application name
        name: String,
    },
}

#[derive(Debug, Args)]
pub struct AppSpec {
    /// Application name (default: live)
    #[arg(default_value = "")]
    pub name: String,

    /// Application type: Live, VOD, LiveEdge, ...
    #[arg(long = "type", default_value = "")]
    pub app_type: String,

    /// Client stream read access
    #[arg(long, default_value = "")]
    pub read_access: String,

    /// Client stream write access
    #[arg(long, default_value = "")]
    pub write_access: String,

    /// Description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Stream type (streamConfig.streamType), e.g. live, live-record
    #[arg(long)]
    pub stream_type: Option<String>,

    /// Enable nDVR recording with the given window in seconds (0 = unlimited)
    #[arg(long)]
    pub dvr_window: Option<u64>,

    /// Transcoder templates, e.g. transrate.xml
    #[arg(long)]
    pub transcoder_templates: Option<String>,

    /// Require a password to publish
    #[arg(long)]
    pub publish_password: bool,
}

// ── DVR ──────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DvrArgs {
    /// Application name
    #[arg(long, short = 'a', default_value = "live", global = true)]
    pub app: String,

    /// Application instance (default: _definst_)
    #[arg(long, short = 'i', default_value = "", global = true)]
    pub instance: String,

    #[command(subcommand)]
    pub command: DvrCommand,
}

#[derive(Debug, Subcommand)]
pub enum DvrCommand {
    /// List DVR stores
    #[command(alias = "ls")]
    List,

    /// Show a store and its conversion status
    Get {
        /// Store name, e.g. myStream.0
        store: String,
    },

    /// Create a DVR store
    Create,

    /// Convert a store (or a window of it) to a file
    Convert(ConvertArgs),

    /// Convert a whole store with server-side conversion logging
    Debug {
        /// Store name
        store: String,
    },

    /// Convert several whole stores
    ConvertGroup {
        /// Store names
        #[arg(required = true)]
        stores: Vec<String>,
    },

    /// Expire cached conversions
    Expire,

    /// Delete a DVR store
    #[command(alias = "rm")]
    Remove {
        /// Store name
        store: String,
    },
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Store name, e.g. myStream.0
    pub store: String,

    /// Window start (RFC 3339, e.g. 2024-03-01T12:00:00Z)
    #[arg(long)]
    pub start: Option<String>,

    /// Window end (RFC 3339)
    #[arg(long)]
    pub end: Option<String>,

    /// Window length in seconds
    #[arg(long)]
    pub duration: Option<u64>,

    /// Output file name
    #[arg(long, short = 'f')]
    pub output_file: Option<String>,

    /// Ask the server to log conversion details
    #[arg(long)]
    pub debug: bool,
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

    /// Show the resolved configuration
    Show,

    /// Create or update a profile
    Init {
        /// Profile name
        #[arg(long, default_value = "default")]
        name: String,

        /// REST base URL
        #[arg(long)]
        host: String,

        /// Server instance
        #[arg(long)]
        server: Option<String>,

        /// Virtual host instance
        #[arg(long)]
        vhost: Option<String>,

        /// Username for basic auth
        #[arg(long)]
        username: Option<String>,

        /// Make this the default profile
        #[arg(long)]
        set_default: bool,
    },

    /// Store a profile password in the system keyring
    SetPassword {
        /// Profile name
        #[arg(long, default_value = "default")]
        name: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: clap_complete::Shell,
}
