//! Batch filtering ahead of display.
//!
//! Removes diagnostics for ignored paths, diagnostics matching a suppression rule, diagnostics
//! with ill-formed ranges, and duplicates (same range and message, possibly reported by
//! different sources). The filter is a pure function of its inputs and idempotent.

use crate::diagnostics::{Diagnostic, DiagnosticRange};
use diagkit_config::FilterConfig;
use regex::Regex;
use std::collections::HashMap;

/// Why a diagnostic was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    /// The buffer path matched this ignore pattern.
    IgnoredPath(String),
    /// The diagnostic matched the suppression rule at this index.
    Suppressed(usize),
    /// Another diagnostic with the same range and message was kept.
    Duplicate,
    /// The range starts after it ends.
    InvalidRange,
}

/// A diagnostic removed by the filter, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedDiagnostic {
    /// The removed diagnostic.
    pub diagnostic: Diagnostic,
    /// Why it was removed.
    pub reason: DropReason,
}

/// Result of filtering a batch.
#[derive(Debug, Clone, Default)]
pub struct FilterResult {
    /// Diagnostics that survived, in input order.
    pub kept: Vec<Diagnostic>,
    /// Diagnostics that were removed.
    pub dropped: Vec<DroppedDiagnostic>,
}

#[derive(Debug)]
struct CompiledRule {
    source: Option<String>,
    code: Option<String>,
    message: Option<Regex>,
}

impl CompiledRule {
    fn matches(&self, diagnostic: &Diagnostic) -> bool {
        if let Some(source) = &self.source
            && diagnostic.source.as_deref() != Some(source.as_str())
        {
            return false;
        }
        if let Some(code) = &self.code
            && diagnostic.code.as_deref() != Some(code.as_str())
        {
            return false;
        }
        if let Some(message) = &self.message
            && !message.is_match(&diagnostic.message)
        {
            return false;
        }
        true
    }
}

/// Drops suppressed, ignored, ill-formed and duplicate diagnostics.
///
/// # Examples
///
/// ```
/// use diagkit_config::{FilterConfig, SuppressionRule};
/// use diagkit_core::{BufferId, Diagnostic, DiagnosticFilter, DiagnosticRange, NamespaceId, Severity};
///
/// let config = FilterConfig {
///     ignore_paths: vec!["*.pb.rs".to_string()],
///     suppress: vec![SuppressionRule {
///         source: Some("rustc".to_string()),
///         code: Some("E0001".to_string()),
///         message: None,
///     }],
/// };
/// let filter = DiagnosticFilter::from_config(&config);
///
/// let noisy = Diagnostic::new(BufferId(1), NamespaceId(1), DiagnosticRange::point(0, 0), Severity::Warn, "x")
///     .with_source("rustc")
///     .with_code("E0001");
/// assert!(filter.filter("src/main.rs", &[noisy.clone()]).is_empty());
///
/// let real = Diagnostic::new(BufferId(1), NamespaceId(1), DiagnosticRange::point(1, 0), Severity::Error, "y");
/// assert_eq!(filter.filter("src/main.rs", &[real.clone()]), vec![real.clone()]);
/// assert!(filter.filter("src/api.pb.rs", &[real]).is_empty());
/// ```
#[derive(Debug, Default)]
pub struct DiagnosticFilter {
    ignore_paths: Vec<glob::Pattern>,
    rules: Vec<CompiledRule>,
}

impl DiagnosticFilter {
    /// A filter that only drops ill-formed ranges and duplicates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter from configuration.
    ///
    /// Patterns that fail to compile are skipped; [`diagkit_config::validate_config`] reports them
    /// at load time.
    pub fn from_config(config: &FilterConfig) -> Self {
        let mut ignore_paths = Vec::with_capacity(config.ignore_paths.len());
        for pattern in &config.ignore_paths {
            match glob::Pattern::new(pattern) {
                Ok(p) => ignore_paths.push(p),
                Err(err) => tracing::warn!(%pattern, %err, "skipping invalid ignore pattern"),
            }
        }

        let mut rules = Vec::with_capacity(config.suppress.len());
        for rule in &config.suppress {
            if rule.is_empty() {
                continue;
            }
            let message = match rule.message.as_deref().map(Regex::new).transpose() {
                Ok(message) => message,
                Err(err) => {
                    tracing::warn!(%err, "skipping suppression rule with invalid message regex");
                    continue;
                }
            };
            rules.push(CompiledRule {
                source: rule.source.clone(),
                code: rule.code.clone(),
                message,
            });
        }

        Self {
            ignore_paths,
            rules,
        }
    }

    /// Returns the first ignore pattern matching `buffer_path`.
    pub fn ignored_by(&self, buffer_path: &str) -> Option<&glob::Pattern> {
        self.ignore_paths.iter().find(|p| p.matches(buffer_path))
    }

    /// Returns the index of the first suppression rule matching `diagnostic`.
    pub fn suppressed_by(&self, diagnostic: &Diagnostic) -> Option<usize> {
        self.rules.iter().position(|rule| rule.matches(diagnostic))
    }

    /// Filter a batch, returning only the surviving diagnostics.
    pub fn filter(&self, buffer_path: &str, diagnostics: &[Diagnostic]) -> Vec<Diagnostic> {
        self.filter_with_report(buffer_path, diagnostics).kept
    }

    /// Filter a batch, returning both survivors and dropped entries.
    ///
    /// Duplicates collapse onto the slot of their first occurrence; the most severe of the group
    /// occupies it, and equal severities keep the earliest.
    pub fn filter_with_report(
        &self,
        buffer_path: &str,
        diagnostics: &[Diagnostic],
    ) -> FilterResult {
        let mut result = FilterResult::default();

        if let Some(pattern) = self.ignored_by(buffer_path) {
            tracing::debug!(
                path = buffer_path,
                %pattern,
                count = diagnostics.len(),
                "dropping diagnostics for ignored path"
            );
            result.dropped = diagnostics
                .iter()
                .map(|d| DroppedDiagnostic {
                    diagnostic: d.clone(),
                    reason: DropReason::IgnoredPath(pattern.to_string()),
                })
                .collect();
            return result;
        }

        let mut seen: HashMap<(DiagnosticRange, &str), usize> = HashMap::new();

        for diagnostic in diagnostics {
            let reason = if !diagnostic.range.is_valid() {
                Some(DropReason::InvalidRange)
            } else {
                self.suppressed_by(diagnostic).map(DropReason::Suppressed)
            };
            if let Some(reason) = reason {
                result.drop(buffer_path, diagnostic.clone(), reason);
                continue;
            }

            let key = (diagnostic.range, diagnostic.message.as_str());
            match seen.get(&key) {
                Some(&slot) => {
                    if diagnostic.severity_rank() < result.kept[slot].severity_rank() {
                        let replaced =
                            std::mem::replace(&mut result.kept[slot], diagnostic.clone());
                        result.drop(buffer_path, replaced, DropReason::Duplicate);
                    } else {
                        result.drop(buffer_path, diagnostic.clone(), DropReason::Duplicate);
                    }
                }
                None => {
                    seen.insert(key, result.kept.len());
                    result.kept.push(diagnostic.clone());
                }
            }
        }

        result
    }
}

impl FilterResult {
    fn drop(&mut self, buffer_path: &str, diagnostic: Diagnostic, reason: DropReason) {
        tracing::debug!(
            path = buffer_path,
            reason = ?reason,
            source = diagnostic.source.as_deref().unwrap_or(""),
            code = diagnostic.code.as_deref().unwrap_or(""),
            message = %diagnostic.message,
            "dropped diagnostic"
        );
        self.dropped.push(DroppedDiagnostic { diagnostic, reason });
    }
}
