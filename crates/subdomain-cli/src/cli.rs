//! Command-line arguments

use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Manage subdomains through the subdomain API
#[derive(Parser, Debug)]
#[command(name = "subdomain")]
#[command(version)]
#[command(about = "Create, update, delete, and list subdomains")]
pub struct Cli {
    /// API key to use for this command only (not saved)
    #[arg(
        long = "key",
        global = true,
        env = "SUBDOMAIN_API_KEY",
        hide_env_values = true
    )]
    pub api_key: Option<String>,

    /// Base URL of the subdomain API
    #[arg(long, global = true, env = "SUBDOMAIN_API_URL")]
    pub api_url: Option<String>,

    /// Path of the config file holding the API key (default: ~/.subdomain.json)
    #[arg(long, global = true, env = "SUBDOMAIN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "SUBDOMAIN_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the API key
    Key(KeyArgs),
    /// Create a subdomain
    Create(RecordArgs),
    /// Update an existing subdomain
    Update(RecordArgs),
    /// Delete a subdomain
    Delete(DeleteArgs),
    /// List your subdomains
    List,
}

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("action")
        .required(true)
        .args(["create", "set", "delete", "info"])
))]
pub struct KeyArgs {
    /// Request a new API key and save it
    #[arg(long)]
    pub create: bool,

    /// Save an existing API key (prompted for when omitted)
    #[arg(long, value_name = "KEY", num_args = 0..=1)]
    pub set: Option<Option<String>>,

    /// Delete the API key on the server and locally
    #[arg(long)]
    pub delete: bool,

    /// Show information about the API key
    #[arg(long)]
    pub info: bool,
}

/// What `key` was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Create,
    Set(Option<String>),
    Delete,
    Info,
}

impl KeyArgs {
    pub fn action(&self) -> KeyAction {
        if let Some(value) = &self.set {
            KeyAction::Set(value.clone())
        } else if self.create {
            KeyAction::Create
        } else if self.delete {
            KeyAction::Delete
        } else {
            KeyAction::Info
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct RecordArgs {
    /// Subdomain name
    #[arg(long)]
    pub name: Option<String>,

    /// Record type (e.g. A, AAAA, CNAME, TXT)
    #[arg(long = "type", value_name = "TYPE")]
    pub record_type: Option<String>,

    /// Record value
    #[arg(long)]
    pub value: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct DeleteArgs {
    /// Subdomain name
    #[arg(long)]
    pub name: Option<String>,
}
