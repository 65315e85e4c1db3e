//! Host status-line template markup (`%#Group#text%*`).

use crate::severity::Severity;
use diagkit_config::SeverityHighlights;

/// Resets the highlight to the surface default.
pub const RESET: &str = "%*";

/// Flexible filler separating left- and right-aligned segments.
pub const FILL: &str = "%=";

/// Opening tag for a highlight group; empty when `group` is empty.
pub fn tag(group: &str) -> String {
    if group.is_empty() {
        String::new()
    } else {
        format!("%#{group}#")
    }
}

/// Escape literal `%` so the host does not treat it as a template item.
pub fn escape(text: &str) -> String {
    text.replace('%', "%%")
}

/// Wrap `text` in a highlight group and reset; plain escaped text when `group` is empty.
pub fn highlighted(group: &str, text: &str) -> String {
    if group.is_empty() {
        escape(text)
    } else {
        format!("{}{}{RESET}", tag(group), escape(text))
    }
}

/// Configured highlight group for a severity.
pub fn severity_group(highlights: &SeverityHighlights, severity: Severity) -> &str {
    match severity {
        Severity::Error => &highlights.error,
        Severity::Warn => &highlights.warn,
        Severity::Info => &highlights.info,
        Severity::Hint => &highlights.hint,
        Severity::Ok => &highlights.ok,
    }
}
