//! Diagnostic severity tiers ordered from most to least urgent.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The urgency tier of a diagnostic.
///
/// The derived ordering follows declaration order, so `Error < Warn < Info < Hint < Ok` and
/// sorting ascending puts the most urgent diagnostics first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error diagnostics.
    Error,
    /// Warning diagnostics.
    Warn,
    /// Informational diagnostics.
    Info,
    /// Hint diagnostics.
    Hint,
    /// Success / "all good" markers.
    Ok,
}

impl Severity {
    /// All tiers in severity order.
    pub const ALL: [Severity; 5] = [
        Severity::Error,
        Severity::Warn,
        Severity::Info,
        Severity::Hint,
        Severity::Ok,
    ];

    /// Number of tiers.
    pub const COUNT: usize = Self::ALL.len();

    /// Zero-based position of this tier in [`Severity::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Single-letter badge label.
    pub fn letter(self) -> char {
        match self {
            Severity::Error => 'E',
            Severity::Warn => 'W',
            Severity::Info => 'I',
            Severity::Hint => 'H',
            Severity::Ok => 'O',
        }
    }

    /// Convert a host numeric severity (`1` = Error .. `5` = Ok).
    pub fn from_u64(value: u64) -> Option<Self> {
        match value {
            1 => Some(Self::Error),
            2 => Some(Self::Warn),
            3 => Some(Self::Info),
            4 => Some(Self::Hint),
            5 => Some(Self::Ok),
            _ => None,
        }
    }

    /// Parse a severity name, case-insensitively.
    ///
    /// Accepts the short host names (`"warn"`) as well as the LSP spellings (`"warning"`,
    /// `"information"`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "error" | "e" => Some(Self::Error),
            "warn" | "warning" | "w" => Some(Self::Warn),
            "info" | "information" | "i" => Some(Self::Info),
            "hint" | "h" => Some(Self::Hint),
            "ok" | "o" => Some(Self::Ok),
            _ => None,
        }
    }

    /// Ordering key for an optional severity; a missing severity sorts after [`Severity::Ok`].
    pub fn rank(severity: Option<Severity>) -> usize {
        severity.map_or(Self::COUNT, Severity::index)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warn => write!(f, "warn"),
            Severity::Info => write!(f, "info"),
            Severity::Hint => write!(f, "hint"),
            Severity::Ok => write!(f, "ok"),
        }
    }
}
