//! subdomain - manage subdomains from the command line
//!
//! The API key lives in `~/.subdomain.json`. When no key is stored and none
//! is passed with `--key`, the first command requests one from the API and
//! saves it.

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use subdomain_cli::render::{render, render_error};
use subdomain_cli::{run, Cli, Context, TerminalPrompter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(&cli.log_level);

    match execute(cli).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", render_error(&e));
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli) -> anyhow::Result<String> {
    let mut ctx = Context::from_cli(&cli).await?;
    let mut prompter = TerminalPrompter;

    let outcome = run(cli.command, &mut ctx, &mut prompter).await?;
    Ok(render(&outcome))
}

/// Logs go to stderr so stdout only carries command output.
/// RUST_LOG, when set, overrides --log-level.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("subdomain_core={level},subdomain_cli={level}"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
