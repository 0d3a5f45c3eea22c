//! Command handlers
//!
//! Handlers prompt for whatever the command line left out, resolve the API
//! key, make one API call, and hand back an [`Outcome`] for rendering.

mod key;
mod subdomain;

use serde_json::Value;
use tracing::warn;

use subdomain_core::{ApiKey, ResolvedKey, SubdomainRecord};

use crate::cli::Commands;
use crate::context::Context;
use crate::prompt::Prompter;

/// Result of a single command
#[derive(Debug)]
pub enum CommandOutput {
    /// `key --create` or `key --set`
    KeySaved {
        key: ApiKey,
        created: bool,
        persisted: bool,
    },
    /// `key --info`
    KeyInfo(Value),
    /// `key --delete`
    KeyDeleted { result: Value, cleared: bool },
    /// Server `result` of create/update/delete
    Result(Value),
    Subdomains(Vec<SubdomainRecord>),
}

#[derive(Debug)]
pub struct Outcome {
    /// Key created implicitly because none was stored
    pub provisioned: Option<ApiKey>,
    pub output: CommandOutput,
}

impl Outcome {
    fn new(output: CommandOutput) -> Self {
        Self {
            provisioned: None,
            output,
        }
    }

    fn with_key(resolved: &ResolvedKey, output: CommandOutput) -> Self {
        Self {
            provisioned: resolved.is_provisioned().then(|| resolved.key.clone()),
            output,
        }
    }
}

/// Run one command
pub async fn run(
    command: Commands,
    ctx: &mut Context,
    prompter: &mut dyn Prompter,
) -> anyhow::Result<Outcome> {
    match command {
        Commands::Key(args) => key::run(args.action(), ctx, prompter).await,
        Commands::Create(args) => subdomain::create(args, ctx, prompter).await,
        Commands::Update(args) => subdomain::update(args, ctx, prompter).await,
        Commands::Delete(args) => subdomain::delete(args, ctx, prompter).await,
        Commands::List => subdomain::list(ctx).await,
    }
}

/// Whether a config write went through. Recoverable failures are logged.
fn persisted(result: subdomain_core::Result<()>) -> anyhow::Result<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(e) if e.is_recoverable() => {
            warn!("{}", e);
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}
