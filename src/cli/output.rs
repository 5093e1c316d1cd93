use crate::converter::ConversionDirection;
use crate::session::{OutputField, Session};
use crate::ConversionResult;
use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    direction: ConversionDirection,
    results: &'a [ConversionResult],
    notice: &'a str,
}

pub fn print_report(session: &Session, format: &OutputFormat, colored_output: bool) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", format_text_report(session, colored_output)),
        OutputFormat::Json => println!("{}", format_json_report(session)?),
    }
    Ok(())
}

/// One labelled block per visible output field, separated by blank lines.
pub fn format_text_report(session: &Session, colored_output: bool) -> String {
    session
        .visible_fields()
        .into_iter()
        .map(|field| {
            let label = field.label();
            let label = if colored_output {
                label.cyan().bold().to_string()
            } else {
                label.to_string()
            };
            format!("{}\n{}\n", label, session.content(field))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_json_report(session: &Session) -> Result<String> {
    let output = JsonOutput {
        direction: session.direction,
        results: session.results(),
        notice: session.notice(),
    };
    serde_json::to_string_pretty(&output).context("Failed to serialize conversion results")
}

pub fn print_copy_success(field: OutputField, colored: bool) {
    if colored {
        eprintln!("{} {} copied to clipboard", "✓".green().bold(), field.label().bold());
    } else {
        eprintln!("✓ {} copied to clipboard", field.label());
    }
}

pub fn print_copy_skipped(field: OutputField, colored: bool) {
    if colored {
        eprintln!("{}", format!("{} is empty, nothing copied", field.label()).yellow());
    } else {
        eprintln!("{} is empty, nothing copied", field.label());
    }
}

pub fn print_copy_failure(field: OutputField, error: &dyn fmt::Display, colored: bool) {
    if colored {
        eprintln!(
            "{} Failed to copy {}: {}",
            "✗".red().bold(),
            field.label().bold(),
            error.to_string().red()
        );
    } else {
        eprintln!("✗ Failed to copy {}: {}", field.label(), error);
    }
}
