//! Form state for one conversion session.
//!
//! Holds the raw input, notice fields and the last conversion, and tracks
//! which output blocks were copied recently. Results are replaced wholesale
//! on every successful convert; a blank input leaves them untouched.

use crate::clipboard::{copy_to_clipboard, Clipboard, ClipboardError};
use crate::converter::{build_notice, ConversionDirection, Converter};
use crate::ConversionResult;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

/// How long a field shows as "copied" after a successful copy.
pub const COPIED_FLAG_TTL: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputField {
    Id,
    AtId,
    AtIdSpace,
    Email,
    Notice,
}

impl OutputField {
    pub const ALL: [OutputField; 5] = [
        OutputField::Id,
        OutputField::AtId,
        OutputField::AtIdSpace,
        OutputField::Email,
        OutputField::Notice,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OutputField::Id => "ID",
            OutputField::AtId => "@ID",
            OutputField::AtIdSpace => "@ID @ID",
            OutputField::Email => "Email",
            OutputField::Notice => "Notice (markdown)",
        }
    }

    /// The email block is only shown when converting ids to emails.
    pub fn is_visible(&self, direction: ConversionDirection) -> bool {
        match self {
            OutputField::Email => direction == ConversionDirection::IdToEmail,
            _ => true,
        }
    }
}

impl FromStr for OutputField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "id" => Ok(OutputField::Id),
            "at-id" => Ok(OutputField::AtId),
            "at-id-space" | "mentions" => Ok(OutputField::AtIdSpace),
            "email" => Ok(OutputField::Email),
            "notice" => Ok(OutputField::Notice),
            _ => Err(format!("Unknown output field: {}", s)),
        }
    }
}

impl fmt::Display for OutputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputField::Id => write!(f, "id"),
            OutputField::AtId => write!(f, "at-id"),
            OutputField::AtIdSpace => write!(f, "at-id-space"),
            OutputField::Email => write!(f, "email"),
            OutputField::Notice => write!(f, "notice"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// Nothing to copy; the clipboard was not touched.
    Skipped,
}

#[derive(Debug, Default)]
pub struct Session {
    pub direction: ConversionDirection,
    pub input: String,
    pub title: String,
    pub description: String,
    results: Vec<ConversionResult>,
    notice: String,
    copied_at: HashMap<OutputField, Instant>,
}

impl Session {
    pub fn new(direction: ConversionDirection) -> Self {
        Self {
            direction,
            ..Default::default()
        }
    }

    /// Convert the current input. Returns false and keeps the previous
    /// results when the input is blank.
    pub fn convert(&mut self, converter: &Converter) -> bool {
        if self.input.trim().is_empty() {
            tracing::debug!("blank input, nothing to convert");
            return false;
        }

        self.results = converter.convert_raw(&self.input, self.direction);
        self.notice = build_notice(&self.title, &self.description, &self.results);
        true
    }

    pub fn results(&self) -> &[ConversionResult] {
        &self.results
    }

    pub fn notice(&self) -> &str {
        &self.notice
    }

    /// Replace the generated notice with a user-edited version.
    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = notice.into();
    }

    pub fn visible_fields(&self) -> Vec<OutputField> {
        OutputField::ALL
            .into_iter()
            .filter(|f| f.is_visible(self.direction))
            .collect()
    }

    /// Rendered text of an output block.
    pub fn content(&self, field: OutputField) -> String {
        match field {
            OutputField::Id => join_results(&self.results, |r| r.id.as_str(), "\n"),
            OutputField::AtId => join_results(&self.results, |r| r.at_id.as_str(), "\n"),
            OutputField::AtIdSpace => {
                join_results(&self.results, |r| r.at_id_space.as_str(), " ")
            }
            OutputField::Email => join_results(&self.results, |r| r.email.as_str(), "\n"),
            OutputField::Notice => self.notice.clone(),
        }
    }

    pub fn copy(
        &mut self,
        field: OutputField,
        clipboard: &mut dyn Clipboard,
        now: Instant,
    ) -> Result<CopyOutcome, ClipboardError> {
        let content = self.content(field);
        if content.is_empty() {
            return Ok(CopyOutcome::Skipped);
        }

        copy_to_clipboard(clipboard, &content)?;
        tracing::debug!(%field, bytes = content.len(), "copied to clipboard");
        self.copied_at.insert(field, now);
        Ok(CopyOutcome::Copied)
    }

    /// Whether `field` was copied less than [`COPIED_FLAG_TTL`] before `now`.
    pub fn is_copied(&self, field: OutputField, now: Instant) -> bool {
        self.copied_at
            .get(&field)
            .is_some_and(|at| now.saturating_duration_since(*at) < COPIED_FLAG_TTL)
    }
}

fn join_results<F>(results: &[ConversionResult], pick: F, sep: &str) -> String
where
    F: Fn(&ConversionResult) -> &str,
{
    results.iter().map(pick).collect::<Vec<_>>().join(sep)
}
