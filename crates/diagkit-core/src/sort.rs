//! Deterministic severity-then-position ordering.

use crate::diagnostics::Diagnostic;

/// Sort key: severity rank, then start line, then start column.
pub fn sort_key(diagnostic: &Diagnostic) -> (usize, usize, usize) {
    (
        diagnostic.severity_rank(),
        diagnostic.range.start_line,
        diagnostic.range.start_col,
    )
}

/// Order diagnostics with the most urgent first, falling back to reading order.
///
/// The sort is stable: diagnostics with equal keys keep their input order.
pub fn sort_diagnostics(mut diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
    diagnostics.sort_by_key(sort_key);
    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{BufferId, DiagnosticRange, NamespaceId};
    use crate::severity::Severity;
    use pretty_assertions::assert_eq;

    fn diag(line: usize, col: usize, severity: Option<Severity>, message: &str) -> Diagnostic {
        Diagnostic {
            buffer_id: BufferId(1),
            namespace_id: NamespaceId(1),
            range: DiagnosticRange::new(line, col, line, col + 1),
            severity,
            message: message.to_string(),
            source: None,
            code: None,
        }
    }

    fn messages(diagnostics: &[Diagnostic]) -> Vec<&str> {
        diagnostics.iter().map(|d| d.message.as_str()).collect()
    }

    #[test]
    fn severity_first_then_position() {
        let sorted = sort_diagnostics(vec![
            diag(1, 0, Some(Severity::Hint), "hint"),
            diag(9, 0, Some(Severity::Error), "late error"),
            diag(2, 5, Some(Severity::Warn), "warn b"),
            diag(2, 1, Some(Severity::Warn), "warn a"),
            diag(0, 0, None, "unset"),
            diag(3, 0, Some(Severity::Error), "early error"),
            diag(0, 0, Some(Severity::Ok), "ok"),
        ]);
        assert_eq!(
            messages(&sorted),
            vec!["early error", "late error", "warn a", "warn b", "hint", "ok", "unset"]
        );
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let sorted = sort_diagnostics(vec![
            diag(4, 2, Some(Severity::Info), "first"),
            diag(0, 0, Some(Severity::Error), "error"),
            diag(4, 2, Some(Severity::Info), "second"),
            diag(4, 2, Some(Severity::Info), "third"),
        ]);
        assert_eq!(messages(&sorted), vec!["error", "first", "second", "third"]);
    }

    #[test]
    fn sorting_twice_is_a_noop() {
        let once = sort_diagnostics(vec![
            diag(3, 0, Some(Severity::Warn), "a"),
            diag(1, 0, Some(Severity::Warn), "b"),
            diag(1, 0, Some(Severity::Error), "c"),
        ]);
        assert_eq!(sort_diagnostics(once.clone()), once);
    }
}
