//! `key=value` color entries
//!
//! Theme packages carry one entry per line, e.g. `chat_outBubble=-1048610`.
//! The value is the signed decimal ARGB integer; `#RRGGBB` and `#AARRGGBB`
//! are also accepted on input.

use crate::color::{Color, ColorParseError};
use crate::keys::{ColorKey, KeyParseError};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when parsing an entry line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryParseError {
    /// The line has no `=`
    #[error("Missing '=' in entry: {0}")]
    MissingSeparator(String),

    /// The key is not in the registry
    #[error(transparent)]
    Key(#[from] KeyParseError),

    /// The value is not a color
    #[error(transparent)]
    Color(#[from] ColorParseError),
}

/// Result type for entry parsing
pub type Result<T> = std::result::Result<T, EntryParseError>;

/// A single key/color pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorEntry {
    /// The key
    pub key: ColorKey,
    /// The color
    pub color: Color,
}

impl ColorEntry {
    /// Create an entry
    pub fn new(key: ColorKey, color: Color) -> Self {
        Self { key, color }
    }

    /// Parse every non-blank line, skipping and logging bad ones
    pub fn parse_lines(text: &str) -> Vec<ColorEntry> {
        text.lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match line.parse() {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping theme entry: {}", e);
                    None
                }
            })
            .collect()
    }
}

impl From<ColorEntry> for (ColorKey, Color) {
    fn from(entry: ColorEntry) -> Self {
        (entry.key, entry.color)
    }
}

impl fmt::Display for ColorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.color)
    }
}

impl FromStr for ColorEntry {
    type Err = EntryParseError;

    fn from_str(s: &str) -> Result<Self> {
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| EntryParseError::MissingSeparator(s.to_string()))?;
        Ok(Self { key: key.parse()?, color: value.parse()? })
    }
}
