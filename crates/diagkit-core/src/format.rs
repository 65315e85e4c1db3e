//! Single-line hover text for diagnostics.
//!
//! Output shape: `<glyph> <message> [<source>: <code>] @ <sl>:<sc>;<el>:<ec>`, where every part
//! after the message is optional. Formatting is total and never emits a line break.

use crate::diagnostics::Diagnostic;
use crate::markup::severity_group;
use crate::sort::sort_key;
use diagkit_config::{FormatConfig, SeverityHighlights};
use serde::Serialize;
use std::fmt::Write as _;

/// A formatted line plus the highlight group it should be drawn with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledLine {
    /// Formatted text (no markup).
    pub text: String,
    /// Highlight group of the diagnostic's severity.
    pub highlight_group: String,
}

/// Renders diagnostics as hover lines.
#[derive(Debug, Clone)]
pub struct DiagnosticFormatter {
    glyph: String,
    highlights: SeverityHighlights,
}

impl Default for DiagnosticFormatter {
    fn default() -> Self {
        Self::from_config(&FormatConfig::default(), &SeverityHighlights::default())
    }
}

impl DiagnosticFormatter {
    /// Build a formatter from its glyph and the severity highlight groups.
    pub fn from_config(format: &FormatConfig, highlights: &SeverityHighlights) -> Self {
        Self {
            glyph: format.glyph.clone(),
            highlights: highlights.clone(),
        }
    }

    /// Format one diagnostic.
    ///
    /// # Examples
    ///
    /// ```
    /// use diagkit_core::{BufferId, Diagnostic, DiagnosticFormatter, DiagnosticRange, NamespaceId, Severity};
    ///
    /// let diag = Diagnostic::new(BufferId(1), NamespaceId(1), DiagnosticRange::new(3, 4, 3, 9), Severity::Warn, "unused var.\n")
    ///     .with_source("rustc")
    ///     .with_code("E0001.");
    /// let formatter = DiagnosticFormatter::default();
    /// assert_eq!(formatter.format(&diag, false), "▶ unused var [rustc: E0001]");
    /// assert_eq!(formatter.format(&diag, true), "▶ unused var [rustc: E0001] @ 3:4;3:9");
    /// ```
    pub fn format(&self, diagnostic: &Diagnostic, include_range: bool) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(4);
        if !self.glyph.is_empty() {
            parts.push(self.glyph.clone());
        }

        let message = normalize_message(&diagnostic.message);
        if !message.is_empty() {
            parts.push(message);
        }

        if let Some(suffix) =
            source_code_suffix(diagnostic.source.as_deref(), diagnostic.code.as_deref())
        {
            parts.push(suffix);
        }

        if include_range {
            let range = &diagnostic.range;
            let mut position = String::new();
            let _ = write!(
                position,
                "@ {}:{};{}:{}",
                range.start_line, range.start_col, range.end_line, range.end_col
            );
            parts.push(position);
        }

        parts.join(" ")
    }

    /// Format one diagnostic together with the highlight group of its severity.
    pub fn format_styled(&self, diagnostic: &Diagnostic, include_range: bool) -> StyledLine {
        StyledLine {
            text: self.format(diagnostic, include_range),
            highlight_group: severity_group(&self.highlights, diagnostic.display_severity())
                .to_string(),
        }
    }

    /// Format every diagnostic touching `line`, most urgent first.
    pub fn hover_lines(
        &self,
        diagnostics: &[Diagnostic],
        line: usize,
        include_range: bool,
    ) -> Vec<StyledLine> {
        let mut at_line: Vec<&Diagnostic> = diagnostics
            .iter()
            .filter(|d| d.range.covers_line(line))
            .collect();
        at_line.sort_by_key(|d| sort_key(d));
        at_line
            .into_iter()
            .map(|d| self.format_styled(d, include_range))
            .collect()
    }
}

/// Collapse line breaks to `", "` and strip one trailing period.
pub fn normalize_message(message: &str) -> String {
    let joined = message
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    strip_trailing_period(&joined).to_string()
}

fn strip_trailing_period(text: &str) -> &str {
    text.strip_suffix('.').unwrap_or(text)
}

fn clean_part(part: Option<&str>) -> Option<String> {
    part.map(normalize_message).filter(|p| !p.is_empty())
}

fn source_code_suffix(source: Option<&str>, code: Option<&str>) -> Option<String> {
    match (clean_part(source), clean_part(code)) {
        (Some(source), Some(code)) => Some(format!("[{source}: {code}]")),
        (Some(source), None) => Some(format!("[{source}]")),
        (None, Some(code)) => Some(format!("[{code}]")),
        (None, None) => None,
    }
}
