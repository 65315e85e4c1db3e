//! Per-line gutter rendering.
//!
//! Each line renders as two fixed-width cells: the most severe diagnostic sign, then the first
//! version-control sign. An empty cell is a blank placeholder of the same width, so the gutter
//! never changes width as signs come and go.

use crate::markup::highlighted;
use crate::severity::Severity;
use crate::signs::{Sign, SignKind};
use crate::width::fit_to_width;
use diagkit_config::{MAX_CELL_WIDTH, StatusColumnConfig, TieBreak};

/// Renders the statuscolumn cells for one buffer line.
#[derive(Debug, Clone)]
pub struct StatusColumnRenderer {
    cell_width: usize,
    tie_break: TieBreak,
}

impl Default for StatusColumnRenderer {
    fn default() -> Self {
        Self::from_config(&StatusColumnConfig::default())
    }
}

impl StatusColumnRenderer {
    /// Build a renderer from configuration; the cell width is clamped to `1..=MAX_CELL_WIDTH`.
    pub fn from_config(config: &StatusColumnConfig) -> Self {
        Self {
            cell_width: config.cell_width.clamp(1, MAX_CELL_WIDTH),
            tie_break: config.tie_break,
        }
    }

    /// Width of each cell in display columns.
    pub fn cell_width(&self) -> usize {
        self.cell_width
    }

    /// Blank placeholder for an empty cell.
    pub fn blank_cell(&self) -> String {
        " ".repeat(self.cell_width)
    }

    /// Render the diagnostic cell followed by the version-control cell.
    ///
    /// # Examples
    ///
    /// ```
    /// use diagkit_core::{BufferId, Severity, Sign, SignKind, StatusColumnRenderer};
    ///
    /// let renderer = StatusColumnRenderer::default();
    /// assert_eq!(renderer.draw(&[]), "  ");
    ///
    /// let signs = [
    ///     Sign::new(BufferId(1), 0, SignKind::VersionControl, "GitSignsAdd", "┃"),
    ///     Sign::new(BufferId(1), 0, SignKind::Diagnostic(Severity::Error), "DiagnosticSignError", "E "),
    /// ];
    /// assert_eq!(renderer.draw(&signs), "%#DiagnosticSignError#E%*%#GitSignsAdd#┃%*");
    /// ```
    pub fn draw(&self, signs_at_line: &[Sign]) -> String {
        let mut out = self.cell(self.pick_diagnostic(signs_at_line));
        out.push_str(&self.cell(Self::pick_version_control(signs_at_line)));
        out
    }

    /// The diagnostic sign shown for a line: the most severe one.
    ///
    /// Equal severities resolve by the configured [`TieBreak`].
    pub fn pick_diagnostic<'a>(&self, signs: &'a [Sign]) -> Option<&'a Sign> {
        let mut best: Option<(Severity, &Sign)> = None;
        for sign in signs {
            let SignKind::Diagnostic(severity) = sign.kind else {
                continue;
            };
            let replace = match best {
                None => true,
                Some((best_severity, current)) => {
                    severity < best_severity
                        || (severity == best_severity
                            && self.tie_break == TieBreak::Priority
                            && sign.priority > current.priority)
                }
            };
            if replace {
                best = Some((severity, sign));
            }
        }
        best.map(|(_, sign)| sign)
    }

    /// The version-control sign shown for a line: the first one.
    pub fn pick_version_control(signs: &[Sign]) -> Option<&Sign> {
        signs.iter().find(|s| s.kind == SignKind::VersionControl)
    }

    fn cell(&self, sign: Option<&Sign>) -> String {
        sign.and_then(|s| {
            fit_to_width(s.text.trim(), self.cell_width)
                .map(|glyph| highlighted(&s.highlight_group, &glyph))
        })
        .unwrap_or_else(|| self.blank_cell())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::BufferId;
    use pretty_assertions::assert_eq;

    fn diag_sign(severity: Severity, group: &str, text: &str) -> Sign {
        Sign::new(BufferId(1), 7, SignKind::Diagnostic(severity), group, text)
    }

    fn vcs_sign(group: &str, text: &str) -> Sign {
        Sign::new(BufferId(1), 7, SignKind::VersionControl, group, text)
    }

    #[test]
    fn empty_input_renders_two_blank_cells() {
        assert_eq!(StatusColumnRenderer::default().draw(&[]), "  ");

        let wide = StatusColumnRenderer::from_config(&StatusColumnConfig {
            cell_width: 2,
            tie_break: TieBreak::FirstInInput,
        });
        assert_eq!(wide.draw(&[]), "    ");
    }

    #[test]
    fn unvalidated_cell_width_is_clamped() {
        let huge = StatusColumnRenderer::from_config(&StatusColumnConfig {
            cell_width: usize::MAX,
            tie_break: TieBreak::FirstInInput,
        });
        assert_eq!(huge.cell_width(), MAX_CELL_WIDTH);
        assert_eq!(huge.draw(&[]).len(), 2 * MAX_CELL_WIDTH);
    }

    #[test]
    fn error_and_vcs_are_independently_highlighted() {
        let signs = vec![
            vcs_sign("GitSignsChange", " ~ "),
            diag_sign(Severity::Error, "DiagnosticSignError", " E"),
        ];
        assert_eq!(
            StatusColumnRenderer::default().draw(&signs),
            "%#DiagnosticSignError#E%*%#GitSignsChange#~%*"
        );
    }

    #[test]
    fn most_severe_wins() {
        let signs = vec![
            diag_sign(Severity::Hint, "DiagnosticSignHint", "H"),
            diag_sign(Severity::Warn, "DiagnosticSignWarn", "W"),
            diag_sign(Severity::Info, "DiagnosticSignInfo", "I"),
        ];
        assert_eq!(
            StatusColumnRenderer::default().draw(&signs),
            "%#DiagnosticSignWarn#W%* "
        );
    }

    #[test]
    fn ties_resolve_to_first_by_default() {
        let signs = vec![
            diag_sign(Severity::Error, "First", "A"),
            diag_sign(Severity::Error, "Second", "B").with_priority(50),
        ];
        let renderer = StatusColumnRenderer::default();
        assert_eq!(renderer.pick_diagnostic(&signs).map(|s| s.text.as_str()), Some("A"));
    }

    #[test]
    fn ties_resolve_by_priority_when_configured() {
        let signs = vec![
            diag_sign(Severity::Error, "First", "A").with_priority(10),
            diag_sign(Severity::Error, "Second", "B").with_priority(50),
            diag_sign(Severity::Error, "Third", "C").with_priority(50),
            diag_sign(Severity::Warn, "Warn", "W").with_priority(100),
        ];
        let renderer = StatusColumnRenderer::from_config(&StatusColumnConfig {
            cell_width: 1,
            tie_break: TieBreak::Priority,
        });
        assert_eq!(renderer.pick_diagnostic(&signs).map(|s| s.text.as_str()), Some("B"));
    }

    #[test]
    fn first_vcs_sign_wins() {
        let signs = vec![vcs_sign("GitSignsAdd", "+"), vcs_sign("GitSignsDelete", "-")];
        assert_eq!(
            StatusColumnRenderer::default().draw(&signs),
            " %#GitSignsAdd#+%*"
        );
    }

    #[test]
    fn cells_keep_fixed_width() {
        let renderer = StatusColumnRenderer::from_config(&StatusColumnConfig {
            cell_width: 2,
            tie_break: TieBreak::FirstInInput,
        });
        let signs = vec![
            diag_sign(Severity::Error, "E", "ERR"),
            vcs_sign("V", "|"),
        ];
        assert_eq!(renderer.draw(&signs), "%#E#ER%*%#V#| %*");
    }

    #[test]
    fn unrenderable_glyphs_become_blank() {
        let signs = vec![
            diag_sign(Severity::Error, "E", "   "),
            vcs_sign("V", "你"),
        ];
        assert_eq!(StatusColumnRenderer::default().draw(&signs), "  ");
    }

    #[test]
    fn control_only_glyphs_become_blank() {
        let signs = vec![
            diag_sign(Severity::Error, "DiagnosticSignError", "\u{0}"),
            vcs_sign("GitSignsAdd", "\u{7}+"),
        ];
        assert_eq!(
            StatusColumnRenderer::default().draw(&signs),
            " %#GitSignsAdd#+%*"
        );
    }

    #[test]
    fn empty_group_renders_plain_glyph() {
        let signs = vec![diag_sign(Severity::Error, "", "%")];
        assert_eq!(StatusColumnRenderer::default().draw(&signs), "%% ");
    }
}
