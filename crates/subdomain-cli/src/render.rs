//! Terminal output for command outcomes

use colored::Colorize;
use serde_json::Value;

use subdomain_core::SubdomainRecord;

use crate::commands::{CommandOutput, Outcome};

/// Render an outcome as the text printed on stdout
pub fn render(outcome: &Outcome) -> String {
    let mut lines = Vec::new();

    if let Some(key) = &outcome.provisioned {
        lines.push(format!(
            "{} {}",
            "No API key found, created a new one:".bright_green(),
            key.expose().bright_yellow().bold()
        ));
    }

    match &outcome.output {
        CommandOutput::KeySaved {
            key,
            created,
            persisted,
        } => {
            if *created {
                lines.push(format!(
                    "{} {}",
                    "API key created:".bright_green(),
                    key.expose().bright_yellow().bold()
                ));
            } else if *persisted {
                lines.push("API key saved".bright_green().to_string());
            }
            if !*persisted {
                lines.push(
                    "Could not write the config file; the key was not saved."
                        .bright_yellow()
                        .to_string(),
                );
            }
        }
        CommandOutput::KeyInfo(info) => lines.push(format_value(info)),
        CommandOutput::KeyDeleted { result, cleared } => {
            lines.push(format_value(result).bright_green().to_string());
            if *cleared {
                lines.push("Local API key removed".bright_white().to_string());
            }
        }
        CommandOutput::Result(result) => {
            lines.push(format_value(result).bright_green().to_string());
        }
        CommandOutput::Subdomains(records) if records.is_empty() => {
            lines.push("No subdomains yet".bright_white().to_string());
        }
        CommandOutput::Subdomains(records) => {
            let blocks: Vec<String> = records.iter().map(format_record).collect();
            lines.push(blocks.join("\n\n"));
        }
    }

    lines.join("\n")
}

/// One block per record with every field on its own line
pub fn format_record(record: &SubdomainRecord) -> String {
    let label = |text: &str| format!("{:>10}", text).bright_white().bold();

    format!(
        "{}\n{} {}\n{} {}\n{} {}",
        record.name.bright_cyan().bold(),
        label("Type:"),
        record.record_type,
        label("Value:"),
        record.value,
        label("Created:"),
        record.created_at,
    )
}

/// Render an error for stderr
pub fn render_error(err: &anyhow::Error) -> String {
    format!("{} {:#}", "Error:".bright_red().bold(), err)
        .bright_red()
        .to_string()
}

/// Strings are shown as-is, anything else as pretty JSON
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}
