//! Interactive prompts for values missing from the command line

use anyhow::{bail, Context as _};
use colored::Colorize;
use std::io::{self, Write};

/// Source of answers for missing fields
pub trait Prompter {
    /// Ask for a visible value; `Ok(None)` means input is exhausted
    fn ask(&mut self, label: &str) -> anyhow::Result<Option<String>>;

    /// Ask for a value without echoing it
    fn ask_secret(&mut self, label: &str) -> anyhow::Result<Option<String>>;
}

/// Prompts on the controlling terminal
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        print!("{} ", format!("{}:", label).bright_white().bold());
        io::stdout().flush()?;

        let mut response = String::new();
        if io::stdin().read_line(&mut response)? == 0 {
            return Ok(None);
        }
        Ok(Some(response.trim().to_string()))
    }

    fn ask_secret(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        let response = rpassword::prompt_password(format!("{}: ", label))
            .with_context(|| format!("failed to read {}", label))?;
        Ok(Some(response.trim().to_string()))
    }
}

/// Use `value` if it was given, otherwise ask until a non-empty answer comes
pub fn require(
    value: Option<String>,
    label: &str,
    prompter: &mut dyn Prompter,
) -> anyhow::Result<String> {
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        return Ok(value);
    }

    loop {
        match prompter.ask(label)? {
            Some(answer) if !answer.is_empty() => return Ok(answer),
            Some(_) => continue,
            None => bail!("{} is required", label),
        }
    }
}

/// Like [`require`], but the answer is not echoed
pub fn require_secret(
    value: Option<String>,
    label: &str,
    prompter: &mut dyn Prompter,
) -> anyhow::Result<String> {
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        return Ok(value);
    }

    match prompter.ask_secret(label)? {
        Some(answer) if !answer.is_empty() => Ok(answer),
        _ => bail!("{} is required", label),
    }
}
