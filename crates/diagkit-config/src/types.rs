//! Configuration types deserialized from `diagkit.toml`.
//!
//! Every section is optional; a missing section falls back to its [`Default`] implementation,
//! so an empty document yields a usable [`EngineConfig`].

use serde::Deserialize;

/// The top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Suppression rules and ignored paths applied before diagnostics are displayed.
    pub filter: FilterConfig,
    /// Hover formatting options.
    pub format: FormatConfig,
    /// Per-line gutter rendering options.
    pub statuscolumn: StatusColumnConfig,
    /// Status bar rendering options.
    pub statusline: StatusLineConfig,
    /// Sign classification for host-provided extmarks.
    pub signs: SignsConfig,
}

/// Filter settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Glob patterns; diagnostics for a buffer whose path matches any of them are dropped.
    pub ignore_paths: Vec<String>,
    /// Source/code suppression rules.
    pub suppress: Vec<SuppressionRule>,
}

/// A single suppression rule.
///
/// Absent fields match anything, but at least one field must be present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SuppressionRule {
    /// Diagnostic source to match exactly (e.g. `"rustc"`).
    pub source: Option<String>,
    /// Diagnostic code to match exactly (e.g. `"E0001"`).
    pub code: Option<String>,
    /// Regular expression the message must also match.
    pub message: Option<String>,
}

impl SuppressionRule {
    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        self.source.is_none() && self.code.is_none() && self.message.is_none()
    }
}

/// Hover formatting settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatConfig {
    /// Leading glyph of every formatted line.
    pub glyph: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            glyph: "▶".to_string(),
        }
    }
}

/// How the gutter picks among diagnostic signs of equal severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// The first sign in the host's enumeration order wins.
    #[default]
    FirstInInput,
    /// The sign with the highest extmark priority wins; equal priorities fall back to input order.
    Priority,
}

/// Widest accepted statuscolumn cell, in terminal columns.
pub const MAX_CELL_WIDTH: usize = 8;

/// Per-line gutter settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatusColumnConfig {
    /// Display width of each cell, in terminal columns (`1..=MAX_CELL_WIDTH`).
    pub cell_width: usize,
    /// Tie-break between diagnostic signs of equal severity.
    pub tie_break: TieBreak,
}

impl Default for StatusColumnConfig {
    fn default() -> Self {
        Self {
            cell_width: 1,
            tie_break: TieBreak::FirstInInput,
        }
    }
}

/// Highlight group names used for per-severity badges.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeverityHighlights {
    /// Group for `Error` badges.
    pub error: String,
    /// Group for `Warn` badges.
    pub warn: String,
    /// Group for `Info` badges.
    pub info: String,
    /// Group for `Hint` badges.
    pub hint: String,
    /// Group for `Ok` badges.
    pub ok: String,
}

impl Default for SeverityHighlights {
    fn default() -> Self {
        Self {
            error: "DiagnosticError".to_string(),
            warn: "DiagnosticWarn".to_string(),
            info: "DiagnosticInfo".to_string(),
            hint: "DiagnosticHint".to_string(),
            ok: "DiagnosticOk".to_string(),
        }
    }
}

/// Status bar settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatusLineConfig {
    /// Per-severity badge highlight groups.
    pub highlights: SeverityHighlights,
    /// Highlight group of the path segment.
    pub neutral: String,
    /// Flag appended to the path when the buffer has unsaved changes.
    pub modified: String,
    /// Flag appended to the path when the buffer is read-only.
    pub readonly: String,
}

impl Default for StatusLineConfig {
    fn default() -> Self {
        Self {
            highlights: SeverityHighlights::default(),
            neutral: "StatusLine".to_string(),
            modified: "[+]".to_string(),
            readonly: "[RO]".to_string(),
        }
    }
}

/// Sign classification settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SignsConfig {
    /// Highlight group prefixes identifying version-control signs.
    pub vcs_prefixes: Vec<String>,
}

impl Default for SignsConfig {
    fn default() -> Self {
        Self {
            vcs_prefixes: vec!["GitSigns".to_string(), "MiniDiffSign".to_string()],
        }
    }
}
