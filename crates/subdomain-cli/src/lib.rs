//! # subdomain-cli
//!
//! Command-line front end for the subdomain API. Argument parsing,
//! prompting, and rendering live here; key storage and HTTP live in
//! `subdomain-core`.

pub mod cli;
pub mod commands;
pub mod context;
pub mod prompt;
pub mod render;

pub use cli::{Cli, Commands};
pub use commands::{run, CommandOutput, Outcome};
pub use context::Context;
pub use prompt::{Prompter, TerminalPrompter};
