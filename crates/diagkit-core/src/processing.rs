//! Ingestion processing and the host publish hook seam.
//!
//! The host's "publish diagnostics for buffer" entry point is modelled as a [`PublishHook`].
//! The engine wraps it once at startup: every batch runs through a [`DiagnosticPipeline`]
//! (filter, then sort) before being delegated to the wrapped hook with the same signature.

use crate::diagnostics::{BufferId, Diagnostic, NamespaceId};
use crate::filter::{DiagnosticFilter, FilterResult};
use crate::sort::sort_diagnostics;
use diagkit_config::FilterConfig;
use std::marker::PhantomData;

/// The host's native display entry point (signs, underlines, virtual text).
pub trait PublishHook {
    /// Host-specific display options passed through untouched.
    type Options;

    /// Display a batch for `(namespace_id, buffer_id)`.
    fn publish(
        &mut self,
        namespace_id: NamespaceId,
        buffer_id: BufferId,
        diagnostics: &[Diagnostic],
        options: &Self::Options,
    );
}

/// A hook that displays nothing; used when the host reads snapshots back itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHook;

impl PublishHook for NoopHook {
    type Options = ();

    fn publish(&mut self, _: NamespaceId, _: BufferId, _: &[Diagnostic], _: &()) {}
}

/// Adapts a closure into a [`PublishHook`].
pub struct FnHook<F, O> {
    f: F,
    _options: PhantomData<fn(&O)>,
}

impl<F, O> FnHook<F, O>
where
    F: FnMut(NamespaceId, BufferId, &[Diagnostic], &O),
{
    /// Wrap `f`.
    pub fn new(f: F) -> Self {
        Self {
            f,
            _options: PhantomData,
        }
    }
}

impl<F, O> PublishHook for FnHook<F, O>
where
    F: FnMut(NamespaceId, BufferId, &[Diagnostic], &O),
{
    type Options = O;

    fn publish(
        &mut self,
        namespace_id: NamespaceId,
        buffer_id: BufferId,
        diagnostics: &[Diagnostic],
        options: &O,
    ) {
        (self.f)(namespace_id, buffer_id, diagnostics, options);
    }
}

/// The filter-then-sort stage applied to every raw batch.
#[derive(Debug, Default)]
pub struct DiagnosticPipeline {
    filter: DiagnosticFilter,
}

impl DiagnosticPipeline {
    /// Build the pipeline from filter configuration.
    pub fn from_config(config: &FilterConfig) -> Self {
        Self {
            filter: DiagnosticFilter::from_config(config),
        }
    }

    /// The underlying filter.
    pub fn filter(&self) -> &DiagnosticFilter {
        &self.filter
    }

    /// Filter then sort a raw batch.
    pub fn run(&self, buffer_path: &str, raw: &[Diagnostic]) -> Vec<Diagnostic> {
        sort_diagnostics(self.filter.filter(buffer_path, raw))
    }

    /// Filter then sort, keeping the drop report.
    pub fn run_with_report(&self, buffer_path: &str, raw: &[Diagnostic]) -> FilterResult {
        let mut result = self.filter.filter_with_report(buffer_path, raw);
        result.kept = sort_diagnostics(result.kept);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticRange;
    use crate::severity::Severity;
    use pretty_assertions::assert_eq;

    fn diag(line: usize, severity: Severity) -> Diagnostic {
        Diagnostic::new(
            BufferId(1),
            NamespaceId(1),
            DiagnosticRange::point(line, 0),
            severity,
            format!("l{line}"),
        )
    }

    #[test]
    fn run_filters_then_sorts() {
        let mut invalid = diag(3, Severity::Error);
        invalid.range = DiagnosticRange::new(3, 0, 1, 0);
        let raw = vec![
            diag(2, Severity::Warn),
            invalid,
            diag(9, Severity::Error),
            diag(2, Severity::Hint),
        ];
        let out = DiagnosticPipeline::default().run("a.rs", &raw);
        let messages: Vec<&str> = out.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["l9", "l2"]);
        assert_eq!(out[1].severity, Some(Severity::Warn));
    }

    #[test]
    fn fn_hook_forwards_arguments() {
        let mut calls = Vec::new();
        {
            let mut hook =
                FnHook::new(|ns: NamespaceId, buf: BufferId, d: &[Diagnostic], opts: &bool| {
                    calls.push((ns, buf, d.len(), *opts));
                });
            hook.publish(NamespaceId(3), BufferId(4), &[diag(0, Severity::Error)], &true);
        }
        assert_eq!(calls, vec![(NamespaceId(3), BufferId(4), 1, true)]);
    }
}
