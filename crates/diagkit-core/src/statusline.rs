//! Status bar rendering: per-severity badges for the current buffer and the workspace.
//!
//! Layout, left to right:
//!
//! ```text
//! <buffer badges><neutral: path + flags>%=<workspace badges>%*
//! ```
//!
//! Badges with a zero count are omitted. The string is rebuilt from scratch on every call.

use crate::diagnostics::{BufferId, Diagnostic};
use crate::markup::{FILL, RESET, escape, severity_group, tag};
use crate::severity::Severity;
use diagkit_config::StatusLineConfig;
use std::fmt::Write as _;

/// Diagnostic counts indexed by severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityCounts([usize; Severity::COUNT]);

impl SeverityCounts {
    /// Count diagnostics by their display severity.
    pub fn from_diagnostics<'a, I>(diagnostics: I) -> Self
    where
        I: IntoIterator<Item = &'a Diagnostic>,
    {
        let mut counts = Self::default();
        for diagnostic in diagnostics {
            counts.add(diagnostic.display_severity());
        }
        counts
    }

    /// Increment the count for `severity`.
    pub fn add(&mut self, severity: Severity) {
        self.0[severity.index()] += 1;
    }

    /// Count for `severity`.
    pub fn get(&self, severity: Severity) -> usize {
        self.0[severity.index()]
    }

    /// Sum over all severities.
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    /// Returns `true` if every count is zero.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Nonzero `(severity, count)` pairs in severity order.
    pub fn nonzero(&self) -> impl Iterator<Item = (Severity, usize)> + '_ {
        Severity::ALL
            .into_iter()
            .map(move |s| (s, self.get(s)))
            .filter(|&(_, count)| count > 0)
    }
}

/// Buffer state indicators shown next to the path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferFlags {
    /// The buffer has unsaved changes.
    pub modified: bool,
    /// The buffer is read-only.
    pub readonly: bool,
}

/// Renders the status bar.
#[derive(Debug, Clone, Default)]
pub struct StatusLineRenderer {
    config: StatusLineConfig,
}

impl StatusLineRenderer {
    /// Build a renderer from configuration.
    pub fn from_config(config: &StatusLineConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Render the status bar for the current buffer.
    ///
    /// `all_diagnostics` is the workspace-wide set; the current buffer's counts are derived from
    /// it by `current_buffer_id`.
    pub fn draw(
        &self,
        current_buffer_id: BufferId,
        display_path: &str,
        flags: BufferFlags,
        all_diagnostics: &[Diagnostic],
    ) -> String {
        let buffer = SeverityCounts::from_diagnostics(
            all_diagnostics
                .iter()
                .filter(|d| d.buffer_id == current_buffer_id),
        );
        let workspace = SeverityCounts::from_diagnostics(all_diagnostics);
        self.draw_counts(&buffer, display_path, flags, &workspace)
    }

    /// Render from precomputed counts.
    pub fn draw_counts(
        &self,
        buffer: &SeverityCounts,
        display_path: &str,
        flags: BufferFlags,
        workspace: &SeverityCounts,
    ) -> String {
        let mut out = String::new();
        self.push_badges(&mut out, buffer);

        out.push_str(&tag(&self.config.neutral));
        out.push(' ');
        out.push_str(&escape(display_path));
        if flags.modified && !self.config.modified.is_empty() {
            out.push(' ');
            out.push_str(&escape(&self.config.modified));
        }
        if flags.readonly && !self.config.readonly.is_empty() {
            out.push(' ');
            out.push_str(&escape(&self.config.readonly));
        }
        out.push(' ');

        out.push_str(FILL);
        self.push_badges(&mut out, workspace);
        out.push_str(RESET);
        out
    }

    fn push_badges(&self, out: &mut String, counts: &SeverityCounts) {
        for (severity, count) in counts.nonzero() {
            out.push_str(&tag(severity_group(&self.config.highlights, severity)));
            let _ = write!(out, "{}:{} ", severity.letter(), count);
        }
    }
}
