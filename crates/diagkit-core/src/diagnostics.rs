//! First-class diagnostics data model.
//!
//! Diagnostics are structured issue reports attached to a span of a buffer. They arrive from the
//! host in batches scoped to a `(buffer, namespace)` pair and are replaced wholesale per pair.
//! Renderers use them for:
//! - hover popups (see [`format`](crate::format))
//! - status bar badge counts (see [`statusline`](crate::statusline))

use crate::severity::Severity;
use serde::{Deserialize, Serialize};

/// Host buffer handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BufferId(pub u32);

impl BufferId {
    /// Create a buffer id from the host's numeric handle.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Opaque diagnostic source identifier (typically one per linter or language server).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NamespaceId(pub u32);

impl NamespaceId {
    /// Create a namespace id from the host's numeric handle.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

/// A zero-based line/column range in a buffer.
///
/// A well-formed range has `start <= end` in `(line, col)` order. Ill-formed ranges are never
/// repaired; the [filter](crate::filter) drops them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiagnosticRange {
    /// Start line (inclusive).
    pub start_line: usize,
    /// Start column (inclusive).
    pub start_col: usize,
    /// End line (inclusive).
    pub end_line: usize,
    /// End column.
    pub end_col: usize,
}

impl DiagnosticRange {
    /// Create a new diagnostic range.
    pub fn new(start_line: usize, start_col: usize, end_line: usize, end_col: usize) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// A zero-width range at a single position.
    pub fn point(line: usize, col: usize) -> Self {
        Self::new(line, col, line, col)
    }

    /// Returns `true` if the start does not come after the end.
    pub fn is_valid(&self) -> bool {
        (self.start_line, self.start_col) <= (self.end_line, self.end_col)
    }

    /// Returns `true` if the range touches `line`.
    pub fn covers_line(&self, line: usize) -> bool {
        self.start_line <= line && line <= self.end_line
    }
}

/// A single diagnostic item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Owning buffer.
    pub buffer_id: BufferId,
    /// Originating namespace.
    pub namespace_id: NamespaceId,
    /// Position in the buffer.
    pub range: DiagnosticRange,
    /// Optional severity; renderers style a missing severity as [`Severity::Ok`].
    pub severity: Option<Severity>,
    /// Diagnostic message; may contain line breaks.
    pub message: String,
    /// Optional diagnostic source (e.g. `"rust-analyzer"`).
    pub source: Option<String>,
    /// Optional diagnostic code (stringified).
    pub code: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic without source or code.
    pub fn new(
        buffer_id: BufferId,
        namespace_id: NamespaceId,
        range: DiagnosticRange,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            buffer_id,
            namespace_id,
            range,
            severity: Some(severity),
            message: message.into(),
            source: None,
            code: None,
        }
    }

    /// Set the source.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Severity used for styling and counting: a missing severity is the least severe tier.
    pub fn display_severity(&self) -> Severity {
        self.severity.unwrap_or(Severity::Ok)
    }

    /// Severity ordering key (see [`Severity::rank`]).
    pub fn severity_rank(&self) -> usize {
        Severity::rank(self.severity)
    }
}
