//! Diagnostic snapshot store.
//!
//! Holds the current ordered diagnostic list per `(buffer, namespace)` key. Each snapshot is an
//! immutable `Arc<[Diagnostic]>` that is swapped wholesale on replacement, so a reader holding a
//! snapshot never observes a partial update.
//!
//! # Example
//!
//! ```rust
//! use diagkit_core::{BufferId, Diagnostic, DiagnosticRange, DiagnosticStore, NamespaceId, Severity};
//!
//! let mut store = DiagnosticStore::new();
//! store.subscribe(|change| {
//!     println!("{:?}: {} -> {}", change.change_type, change.old_version, change.new_version);
//! });
//!
//! let diag = Diagnostic::new(BufferId(1), NamespaceId(7), DiagnosticRange::point(0, 0), Severity::Error, "boom");
//! store.replace(BufferId(1), NamespaceId(7), vec![diag]);
//! assert_eq!(store.diagnostics_count(), 1);
//!
//! store.close_buffer(BufferId(1));
//! assert!(store.is_empty());
//! ```

use crate::diagnostics::{BufferId, Diagnostic, NamespaceId};
use crate::sort::sort_diagnostics;
use crate::statusline::SeverityCounts;
use std::collections::BTreeMap;
use std::sync::Arc;

/// An immutable, shareable diagnostic snapshot.
pub type Snapshot = Arc<[Diagnostic]>;

/// Store change type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChangeType {
    /// A `(buffer, namespace)` snapshot was replaced (or removed by an empty batch).
    DiagnosticsChanged,
    /// Every snapshot of a buffer was dropped.
    BufferClosed,
    /// Every snapshot of a namespace was dropped.
    NamespaceCleared,
}

/// Store change record
#[derive(Debug, Clone)]
pub struct StoreChange {
    /// Change type
    pub change_type: StoreChangeType,
    /// Old version number
    pub old_version: u64,
    /// New version number
    pub new_version: u64,
    /// Affected buffer, if the change is buffer-scoped.
    pub buffer_id: Option<BufferId>,
    /// Affected namespace, if the change is namespace-scoped.
    pub namespace_id: Option<NamespaceId>,
}

/// Store change callback function type
pub type StoreChangeCallback = Box<dyn FnMut(&StoreChange) + Send>;

/// Snapshot map keyed by `(buffer, namespace)`, with version tracking and change notifications.
#[derive(Default)]
pub struct DiagnosticStore {
    snapshots: BTreeMap<(BufferId, NamespaceId), Snapshot>,
    version: u64,
    callbacks: Vec<StoreChangeCallback>,
}

impl std::fmt::Debug for DiagnosticStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticStore")
            .field("snapshots", &self.snapshots)
            .field("version", &self.version)
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

impl DiagnosticStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot for `(buffer_id, namespace_id)` wholesale.
    ///
    /// An empty batch removes the key. Returns the stored snapshot.
    pub fn replace(
        &mut self,
        buffer_id: BufferId,
        namespace_id: NamespaceId,
        diagnostics: Vec<Diagnostic>,
    ) -> Snapshot {
        let snapshot: Snapshot = diagnostics.into();
        if snapshot.is_empty() {
            self.snapshots.remove(&(buffer_id, namespace_id));
        } else {
            self.snapshots
                .insert((buffer_id, namespace_id), Arc::clone(&snapshot));
        }
        tracing::trace!(
            buffer = buffer_id.0,
            namespace = namespace_id.0,
            count = snapshot.len(),
            "replaced diagnostic snapshot"
        );
        self.mark_modified(
            StoreChangeType::DiagnosticsChanged,
            Some(buffer_id),
            Some(namespace_id),
        );
        snapshot
    }

    /// Snapshot for a single key.
    pub fn get(&self, buffer_id: BufferId, namespace_id: NamespaceId) -> Option<Snapshot> {
        self.snapshots.get(&(buffer_id, namespace_id)).cloned()
    }

    /// Drop every snapshot of a buffer. Returns `true` if anything was removed.
    pub fn close_buffer(&mut self, buffer_id: BufferId) -> bool {
        let before = self.snapshots.len();
        self.snapshots.retain(|(buffer, _), _| *buffer != buffer_id);
        let removed = self.snapshots.len() != before;
        if removed {
            self.mark_modified(StoreChangeType::BufferClosed, Some(buffer_id), None);
        }
        removed
    }

    /// Drop every snapshot of a namespace. Returns `true` if anything was removed.
    pub fn clear_namespace(&mut self, namespace_id: NamespaceId) -> bool {
        let before = self.snapshots.len();
        self.snapshots.retain(|(_, ns), _| *ns != namespace_id);
        let removed = self.snapshots.len() != before;
        if removed {
            self.mark_modified(StoreChangeType::NamespaceCleared, None, Some(namespace_id));
        }
        removed
    }

    /// Iterate every stored diagnostic in `(buffer, namespace)` key order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.snapshots.values().flat_map(|s| s.iter())
    }

    /// Iterate the diagnostics of one buffer across namespaces, in namespace order.
    pub fn iter_buffer(&self, buffer_id: BufferId) -> impl Iterator<Item = &Diagnostic> {
        self.snapshots
            .range((buffer_id, NamespaceId(0))..=(buffer_id, NamespaceId(u32::MAX)))
            .flat_map(|(_, s)| s.iter())
    }

    /// All diagnostics of one buffer, merged across namespaces and sorted.
    pub fn buffer_diagnostics(&self, buffer_id: BufferId) -> Vec<Diagnostic> {
        sort_diagnostics(self.iter_buffer(buffer_id).cloned().collect())
    }

    /// Workspace-wide concatenation of every snapshot, in `(buffer, namespace)` key order.
    pub fn workspace_diagnostics(&self) -> Vec<Diagnostic> {
        self.iter().cloned().collect()
    }

    /// Severity counts for one buffer.
    pub fn buffer_counts(&self, buffer_id: BufferId) -> SeverityCounts {
        SeverityCounts::from_diagnostics(self.iter_buffer(buffer_id))
    }

    /// Severity counts across the workspace.
    pub fn workspace_counts(&self) -> SeverityCounts {
        SeverityCounts::from_diagnostics(self.iter())
    }

    /// Total number of stored diagnostics.
    pub fn diagnostics_count(&self) -> usize {
        self.snapshots.values().map(|s| s.len()).sum()
    }

    /// Returns `true` if no diagnostics are stored.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Current version; incremented on every change.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Check if the store has changed since a version
    pub fn has_changed_since(&self, version: u64) -> bool {
        self.version > version
    }

    /// Subscribe to change notifications
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&StoreChange) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    fn mark_modified(
        &mut self,
        change_type: StoreChangeType,
        buffer_id: Option<BufferId>,
        namespace_id: Option<NamespaceId>,
    ) {
        let old_version = self.version;
        self.version += 1;
        let change = StoreChange {
            change_type,
            old_version,
            new_version: self.version,
            buffer_id,
            namespace_id,
        };
        for callback in &mut self.callbacks {
            callback(&change);
        }
    }
}
