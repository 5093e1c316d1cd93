pub mod cli;
pub mod clipboard;
pub mod config;
pub mod converter;
pub mod session;

pub use config::Config;
pub use converter::{ConversionDirection, Converter};
pub use session::{OutputField, Session};

use serde::{Deserialize, Serialize};

/// One converted token. `at_id` and `at_id_space` always hold the same text;
/// they back the newline-joined and space-joined outputs respectively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub id: String,
    pub at_id: String,
    pub at_id_space: String,
    pub email: String,
}
