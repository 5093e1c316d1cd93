use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use console::Term;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("system clipboard unavailable: {0}")]
    System(#[from] arboard::Error),

    #[error("stderr is not a terminal, cannot send OSC 52 sequence")]
    NotATerminal,

    #[error("clipboard I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Anything that can receive text destined for the system clipboard.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardBackend {
    #[default]
    System,
    Osc52,
}

impl FromStr for ClipboardBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(ClipboardBackend::System),
            "osc52" => Ok(ClipboardBackend::Osc52),
            _ => Err(format!("Unknown clipboard backend: {}", s)),
        }
    }
}

impl fmt::Display for ClipboardBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardBackend::System => write!(f, "system"),
            ClipboardBackend::Osc52 => write!(f, "osc52"),
        }
    }
}

pub fn open(backend: ClipboardBackend) -> Box<dyn Clipboard> {
    tracing::debug!(%backend, "using clipboard backend");
    match backend {
        ClipboardBackend::System => Box::new(SystemClipboard::new()),
        ClipboardBackend::Osc52 => Box::new(Osc52Clipboard),
    }
}

/// Write `content` to the clipboard, reporting success or failure.
pub fn copy_to_clipboard(clipboard: &mut dyn Clipboard, content: &str) -> Result<(), ClipboardError> {
    clipboard.set_text(content)
}

/// The desktop clipboard, opened on first use and kept for the session so
/// the contents stay owned while the process runs.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new()?,
        };
        self.inner.insert(clipboard).set_text(text)?;
        Ok(())
    }
}

/// Asks the terminal emulator to set the clipboard via an OSC 52 escape.
pub struct Osc52Clipboard;

impl Clipboard for Osc52Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let term = Term::stderr();
        if !term.is_term() {
            return Err(ClipboardError::NotATerminal);
        }
        term.write_str(&osc52_sequence(text))?;
        term.flush()?;
        Ok(())
    }
}

fn osc52_sequence(text: &str) -> String {
    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{}\x07", encoded)
}
