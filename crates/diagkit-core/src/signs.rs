//! Gutter sign data model.
//!
//! Signs are read-only projections of host extmarks, supplied per redraw. The engine never
//! creates or owns them; it only picks which ones to show in the statuscolumn.

use crate::diagnostics::BufferId;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};

/// What produced a sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignKind {
    /// A version-control hunk marker (added/changed/deleted lines).
    VersionControl,
    /// A diagnostic marker of the given severity.
    Diagnostic(Severity),
}

/// A single sign placed on a buffer line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sign {
    /// Owning buffer.
    pub buffer_id: BufferId,
    /// Zero-based line.
    pub line: usize,
    /// Host highlight group used to draw the glyph.
    pub highlight_group: String,
    /// Glyph text; may carry surrounding padding.
    pub text: String,
    /// Sign classification.
    pub kind: SignKind,
    /// Host extmark priority (higher wins when configured as the tie-break).
    #[serde(default)]
    pub priority: u32,
}

impl Sign {
    /// Create a sign with priority `0`.
    pub fn new(
        buffer_id: BufferId,
        line: usize,
        kind: SignKind,
        highlight_group: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            buffer_id,
            line,
            highlight_group: highlight_group.into(),
            text: text.into(),
            kind,
            priority: 0,
        }
    }

    /// Set the extmark priority.
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Severity of a diagnostic sign, `None` for version-control signs.
    pub fn diagnostic_severity(&self) -> Option<Severity> {
        match self.kind {
            SignKind::Diagnostic(severity) => Some(severity),
            SignKind::VersionControl => None,
        }
    }
}
