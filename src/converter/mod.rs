pub mod notice;
pub mod tokenizer;

use crate::ConversionResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use notice::build_notice;
pub use tokenizer::tokenize;

/// Domain appended to bare ids when synthesizing an email.
pub const DEFAULT_DOMAIN: &str = "kakaocorp.com";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConversionDirection {
    #[default]
    EmailToId,
    IdToEmail,
}

impl FromStr for ConversionDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "email-to-id" | "email" => Ok(ConversionDirection::EmailToId),
            "id-to-email" | "id" => Ok(ConversionDirection::IdToEmail),
            _ => Err(format!("Unknown conversion mode: {}", s)),
        }
    }
}

impl fmt::Display for ConversionDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionDirection::EmailToId => write!(f, "email-to-id"),
            ConversionDirection::IdToEmail => write!(f, "id-to-email"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Converter {
    domain: String,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(DEFAULT_DOMAIN)
    }
}

impl Converter {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Tokenize `raw` and convert every token.
    pub fn convert_raw(&self, raw: &str, direction: ConversionDirection) -> Vec<ConversionResult> {
        let tokens = tokenize(raw);
        tracing::debug!(tokens = tokens.len(), %direction, "converting input");
        self.convert(&tokens, direction)
    }

    /// Convert each token into one result, in order. Never fails: malformed
    /// tokens yield whatever the literal string operations produce.
    pub fn convert(&self, tokens: &[&str], direction: ConversionDirection) -> Vec<ConversionResult> {
        tokens
            .iter()
            .map(|token| match direction {
                ConversionDirection::EmailToId => self.email_to_id(token),
                ConversionDirection::IdToEmail => self.id_to_email(token),
            })
            .collect()
    }

    fn email_to_id(&self, token: &str) -> ConversionResult {
        let (id, email) = match token.split_once('@') {
            Some((id, _)) => (id.to_string(), token.to_string()),
            None => (token.to_string(), self.email_for(token)),
        };
        let at_id = format!("@{}", id);

        ConversionResult {
            id,
            at_id_space: at_id.clone(),
            at_id,
            email,
        }
    }

    fn id_to_email(&self, token: &str) -> ConversionResult {
        let id = token.strip_prefix('@').unwrap_or(token);
        // Only one leading '@' is stripped, so "@@x" keeps an '@' here
        let at_id = if id.starts_with('@') {
            id.to_string()
        } else {
            format!("@{}", id)
        };

        ConversionResult {
            id: id.to_string(),
            at_id_space: at_id.clone(),
            at_id,
            email: self.email_for(id),
        }
    }

    fn email_for(&self, id: &str) -> String {
        format!("{}@{}", id, self.domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert_one(token: &str, direction: ConversionDirection) -> ConversionResult {
        Converter::default()
            .convert(&[token], direction)
            .remove(0)
    }

    #[test]
    fn test_email_to_id_with_email() {
        let r = convert_one("alice@co.com", ConversionDirection::EmailToId);
        assert_eq!(r.id, "alice");
        assert_eq!(r.at_id, "@alice");
        assert_eq!(r.at_id_space, "@alice");
        assert_eq!(r.email, "alice@co.com");
    }

    #[test]
    fn test_email_to_id_with_bare_id() {
        let r = convert_one("bob", ConversionDirection::EmailToId);
        assert_eq!(r.id, "bob");
        assert_eq!(r.at_id, "@bob");
        assert_eq!(r.email, "bob@kakaocorp.com");
    }

    #[test]
    fn test_email_to_id_splits_at_first_at() {
        let r = convert_one("a@b@c", ConversionDirection::EmailToId);
        assert_eq!(r.id, "a");
        assert_eq!(r.email, "a@b@c");

        let r = convert_one("@x.com", ConversionDirection::EmailToId);
        assert_eq!(r.id, "");
        assert_eq!(r.at_id, "@");
    }

    #[test]
    fn test_id_to_email() {
        let r = convert_one("@carol", ConversionDirection::IdToEmail);
        assert_eq!(r.id, "carol");
        assert_eq!(r.at_id, "@carol");
        assert_eq!(r.at_id_space, "@carol");
        assert_eq!(r.email, "carol@kakaocorp.com");

        let r = convert_one("dave", ConversionDirection::IdToEmail);
        assert_eq!(r.id, "dave");
        assert_eq!(r.at_id, "@dave");
        assert_eq!(r.email, "dave@kakaocorp.com");
    }

    #[test]
    fn test_id_to_email_double_at() {
        let r = convert_one("@@x", ConversionDirection::IdToEmail);
        assert_eq!(r.id, "@x");
        assert_eq!(r.at_id, "@x");
        assert_eq!(r.at_id_space, "@x");
        assert_eq!(r.email, "@x@kakaocorp.com");
    }

    #[test]
    fn test_custom_domain() {
        let converter = Converter::new("example.org");
        let results = converter.convert_raw("erin", ConversionDirection::IdToEmail);
        assert_eq!(results[0].email, "erin@example.org");
    }

    #[test]
    fn test_order_and_idempotence() {
        let converter = Converter::default();
        let raw = "zed@co.com, amy\n@kim;bob";
        let first = converter.convert_raw(raw, ConversionDirection::EmailToId);
        let second = converter.convert_raw(raw, ConversionDirection::EmailToId);
        assert_eq!(first, second);

        let ids: Vec<_> = first.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["zed", "amy", "", "bob"]);
    }

    #[test]
    fn test_blank_input_yields_nothing() {
        let results = Converter::default().convert_raw(" \n ", ConversionDirection::IdToEmail);
        assert!(results.is_empty());
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!(
            "email-to-id".parse::<ConversionDirection>().unwrap(),
            ConversionDirection::EmailToId
        );
        assert_eq!(
            "ID".parse::<ConversionDirection>().unwrap(),
            ConversionDirection::IdToEmail
        );
        assert!("sideways".parse::<ConversionDirection>().is_err());
        assert_eq!(ConversionDirection::IdToEmail.to_string(), "id-to-email");
    }
}
