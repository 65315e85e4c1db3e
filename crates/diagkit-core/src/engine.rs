//! The engine context object.
//!
//! [`Engine`] is created once at startup from an [`EngineConfig`] and owns everything the render
//! surfaces need: the snapshot store, the buffer registry, the current buffer and the renderers.
//! It decorates the host's publish hook: [`Engine::publish`] has the wrapped hook's signature,
//! runs filter and sort, stores the snapshot and then delegates.
//!
//! # Example
//!
//! ```rust
//! use diagkit_config::EngineConfig;
//! use diagkit_core::{BufferId, BufferInfo, Diagnostic, DiagnosticRange, Engine, NamespaceId, Severity};
//!
//! let mut engine = Engine::new(&EngineConfig::default());
//! engine.buffer_entered(BufferId(1), BufferInfo::new("src/main.rs"));
//!
//! let raw = vec![
//!     Diagnostic::new(BufferId(1), NamespaceId(1), DiagnosticRange::point(4, 0), Severity::Warn, "unused"),
//!     Diagnostic::new(BufferId(1), NamespaceId(1), DiagnosticRange::point(9, 2), Severity::Error, "mismatched types"),
//! ];
//! let snapshot = engine.publish(NamespaceId(1), BufferId(1), &raw, &());
//! assert_eq!(snapshot[0].message, "mismatched types");
//!
//! let status = engine.draw_statusline();
//! assert!(status.contains("E:1"));
//! assert!(status.contains("W:1"));
//! ```

use crate::buffers::{BufferInfo, BufferRegistry};
use crate::diagnostics::{BufferId, Diagnostic, NamespaceId};
use crate::filter::FilterResult;
use crate::format::{DiagnosticFormatter, StyledLine};
use crate::processing::{DiagnosticPipeline, NoopHook, PublishHook};
use crate::signs::Sign;
use crate::statuscolumn::StatusColumnRenderer;
use crate::statusline::{BufferFlags, SeverityCounts, StatusLineRenderer};
use crate::store::{DiagnosticStore, Snapshot, StoreChange};
use diagkit_config::EngineConfig;

/// The diagnostic engine, wrapping a host publish hook `H`.
pub struct Engine<H = NoopHook> {
    pipeline: DiagnosticPipeline,
    formatter: DiagnosticFormatter,
    statuscolumn: StatusColumnRenderer,
    statusline: StatusLineRenderer,
    store: DiagnosticStore,
    buffers: BufferRegistry,
    current: Option<BufferId>,
    hook: H,
}

impl Engine<NoopHook> {
    /// Create an engine that does not delegate to a host display hook.
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_hook(config, NoopHook)
    }
}

impl<H: PublishHook> Engine<H> {
    /// Create an engine wrapping `hook`.
    pub fn with_hook(config: &EngineConfig, hook: H) -> Self {
        Self {
            pipeline: DiagnosticPipeline::from_config(&config.filter),
            formatter: DiagnosticFormatter::from_config(
                &config.format,
                &config.statusline.highlights,
            ),
            statuscolumn: StatusColumnRenderer::from_config(&config.statuscolumn),
            statusline: StatusLineRenderer::from_config(&config.statusline),
            store: DiagnosticStore::new(),
            buffers: BufferRegistry::new(),
            current: None,
            hook,
        }
    }

    /// Ingest a raw batch for `(namespace_id, buffer_id)`.
    ///
    /// Runs filter then sort, replaces the snapshot, delegates the result to the wrapped hook and
    /// returns it. Diagnostics whose `buffer_id`/`namespace_id` disagree with the batch key are
    /// re-keyed to it.
    pub fn publish(
        &mut self,
        namespace_id: NamespaceId,
        buffer_id: BufferId,
        raw: &[Diagnostic],
        options: &H::Options,
    ) -> Snapshot {
        self.publish_with_report(namespace_id, buffer_id, raw, options).0
    }

    /// Like [`Engine::publish`], also returning what the filter dropped.
    pub fn publish_with_report(
        &mut self,
        namespace_id: NamespaceId,
        buffer_id: BufferId,
        raw: &[Diagnostic],
        options: &H::Options,
    ) -> (Snapshot, FilterResult) {
        let keyed: Vec<Diagnostic> = raw
            .iter()
            .cloned()
            .map(|mut d| {
                d.buffer_id = buffer_id;
                d.namespace_id = namespace_id;
                d
            })
            .collect();

        let mut result = self
            .pipeline
            .run_with_report(self.buffers.path(buffer_id), &keyed);
        let snapshot = self
            .store
            .replace(buffer_id, namespace_id, std::mem::take(&mut result.kept));
        self.hook.publish(namespace_id, buffer_id, &snapshot, options);
        result.kept = snapshot.to_vec();
        (snapshot, result)
    }

    /// Register (or refresh) a buffer and make it current.
    pub fn buffer_entered(&mut self, buffer_id: BufferId, info: BufferInfo) {
        self.buffers.insert(buffer_id, info);
        self.current = Some(buffer_id);
    }

    /// Register a buffer without making it current.
    pub fn buffer_added(&mut self, buffer_id: BufferId, info: BufferInfo) {
        self.buffers.insert(buffer_id, info);
    }

    /// Update the modified / read-only indicators of a known buffer.
    pub fn set_buffer_flags(&mut self, buffer_id: BufferId, flags: BufferFlags) -> bool {
        self.buffers.set_flags(buffer_id, flags)
    }

    /// Drop a buffer and all of its snapshots.
    pub fn buffer_closed(&mut self, buffer_id: BufferId) {
        self.buffers.remove(buffer_id);
        self.store.close_buffer(buffer_id);
        if self.current == Some(buffer_id) {
            self.current = None;
        }
    }

    /// Drop a namespace's snapshots across every buffer.
    pub fn namespace_cleared(&mut self, namespace_id: NamespaceId) {
        self.store.clear_namespace(namespace_id);
    }

    /// The current buffer, if any.
    pub fn current_buffer(&self) -> Option<BufferId> {
        self.current
    }

    /// Render the statuscolumn cells for one line's signs.
    pub fn draw_statuscolumn(&self, signs_at_line: &[Sign]) -> String {
        self.statuscolumn.draw(signs_at_line)
    }

    /// Render the statuscolumn for `(buffer_id, line)`, picking matching signs out of `signs`.
    pub fn draw_statuscolumn_for_line(
        &self,
        buffer_id: BufferId,
        line: usize,
        signs: &[Sign],
    ) -> String {
        let at_line: Vec<Sign> = signs
            .iter()
            .filter(|s| s.buffer_id == buffer_id && s.line == line)
            .cloned()
            .collect();
        self.statuscolumn.draw(&at_line)
    }

    /// Render the status bar for the current buffer.
    ///
    /// With no current buffer the left side is an empty path with no badges.
    pub fn draw_statusline(&self) -> String {
        let workspace = self.store.workspace_counts();
        match self.current {
            Some(buffer_id) => {
                let info = self.buffers.get(buffer_id);
                self.statusline.draw_counts(
                    &self.store.buffer_counts(buffer_id),
                    info.map_or("", |i| i.display_path.as_str()),
                    info.map(|i| i.flags).unwrap_or_default(),
                    &workspace,
                )
            }
            None => self.statusline.draw_counts(
                &SeverityCounts::default(),
                "",
                BufferFlags::default(),
                &workspace,
            ),
        }
    }

    /// Format a single diagnostic for a hover surface.
    pub fn format(&self, diagnostic: &Diagnostic, include_range: bool) -> String {
        self.formatter.format(diagnostic, include_range)
    }

    /// Hover lines for every diagnostic touching `(buffer_id, line)`, most urgent first.
    pub fn hover_lines(
        &self,
        buffer_id: BufferId,
        line: usize,
        include_range: bool,
    ) -> Vec<StyledLine> {
        let diagnostics = self.store.buffer_diagnostics(buffer_id);
        self.formatter.hover_lines(&diagnostics, line, include_range)
    }

    /// The snapshot store.
    pub fn store(&self) -> &DiagnosticStore {
        &self.store
    }

    /// The buffer registry.
    pub fn buffers(&self) -> &BufferRegistry {
        &self.buffers
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&StoreChange) + Send + 'static,
    {
        self.store.subscribe(callback);
    }

    /// The wrapped host hook.
    pub fn hook(&self) -> &H {
        &self.hook
    }

    /// The wrapped host hook, mutably.
    pub fn hook_mut(&mut self) -> &mut H {
        &mut self.hook
    }
}

impl<H: PublishHook> PublishHook for Engine<H> {
    type Options = H::Options;

    fn publish(
        &mut self,
        namespace_id: NamespaceId,
        buffer_id: BufferId,
        diagnostics: &[Diagnostic],
        options: &H::Options,
    ) {
        Engine::publish(self, namespace_id, buffer_id, diagnostics, options);
    }
}
