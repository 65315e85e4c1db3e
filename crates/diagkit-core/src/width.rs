//! Terminal display width helpers (UAX #11).

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Fit `text` into exactly `width` cells.
///
/// Whole grapheme clusters are kept while they fit and the rest is cut; the result is padded with
/// spaces. Clusters containing control characters are skipped. Returns `None` when nothing
/// printable is left or the first printable grapheme is wider than `width`.
pub fn fit_to_width(text: &str, width: usize) -> Option<String> {
    let mut out = String::with_capacity(width);
    let mut used = 0usize;

    for grapheme in text.graphemes(true) {
        if grapheme.chars().any(char::is_control) {
            continue;
        }
        let w = UnicodeWidthStr::width(grapheme);
        if used + w > width {
            break;
        }
        out.push_str(grapheme);
        used += w;
    }

    if out.is_empty() {
        return None;
    }

    out.extend(std::iter::repeat_n(' ', width - used));
    Some(out)
}
