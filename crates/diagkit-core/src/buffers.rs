//! Known buffers: paths used for ignore matching and the status bar.

use crate::diagnostics::BufferId;
use crate::statusline::BufferFlags;
use std::collections::HashMap;

/// What the engine knows about an open buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferInfo {
    /// Full path, matched against ignore patterns.
    pub path: String,
    /// Path shown in the status bar (often relative to the working directory).
    pub display_path: String,
    /// Modified / read-only indicators.
    pub flags: BufferFlags,
}

impl BufferInfo {
    /// A buffer whose display path equals its path.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            display_path: path.clone(),
            path,
            flags: BufferFlags::default(),
        }
    }

    /// Set the display path.
    pub fn with_display_path(mut self, display_path: impl Into<String>) -> Self {
        self.display_path = display_path.into();
        self
    }

    /// Set the modified / read-only indicators.
    pub fn with_flags(mut self, flags: BufferFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// Buffer id to [`BufferInfo`] map.
#[derive(Debug, Clone, Default)]
pub struct BufferRegistry {
    buffers: HashMap<BufferId, BufferInfo>,
}

impl BufferRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a buffer's info.
    pub fn insert(&mut self, buffer_id: BufferId, info: BufferInfo) {
        self.buffers.insert(buffer_id, info);
    }

    /// Forget a buffer.
    pub fn remove(&mut self, buffer_id: BufferId) -> Option<BufferInfo> {
        self.buffers.remove(&buffer_id)
    }

    /// Info for a buffer.
    pub fn get(&self, buffer_id: BufferId) -> Option<&BufferInfo> {
        self.buffers.get(&buffer_id)
    }

    /// Update the indicators of a known buffer; returns `false` for unknown buffers.
    pub fn set_flags(&mut self, buffer_id: BufferId, flags: BufferFlags) -> bool {
        match self.buffers.get_mut(&buffer_id) {
            Some(info) => {
                info.flags = flags;
                true
            }
            None => false,
        }
    }

    /// Path of a buffer, or `""` when unknown.
    pub fn path(&self, buffer_id: BufferId) -> &str {
        self.get(buffer_id).map_or("", |info| info.path.as_str())
    }

    /// Buffer whose full path equals `path`; the lowest id wins if several do.
    pub fn find_by_path(&self, path: &str) -> Option<BufferId> {
        self.buffers
            .iter()
            .filter(|(_, info)| info.path == path)
            .map(|(id, _)| *id)
            .min()
    }

    /// Number of known buffers.
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Returns `true` if no buffers are known.
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_path_defaults_to_path() {
        let info = BufferInfo::new("/repo/src/lib.rs");
        assert_eq!(info.display_path, "/repo/src/lib.rs");

        let info = info.with_display_path("src/lib.rs");
        assert_eq!(info.path, "/repo/src/lib.rs");
        assert_eq!(info.display_path, "src/lib.rs");
    }

    #[test]
    fn unknown_buffers_have_empty_path() {
        let mut registry = BufferRegistry::new();
        assert_eq!(registry.path(BufferId(4)), "");
        assert!(!registry.set_flags(
            BufferId(4),
            BufferFlags {
                modified: true,
                readonly: false,
            }
        ));

        registry.insert(BufferId(4), BufferInfo::new("a.rs"));
        assert!(registry.set_flags(
            BufferId(4),
            BufferFlags {
                modified: true,
                readonly: false,
            }
        ));
        assert!(registry.get(BufferId(4)).unwrap().flags.modified);
        assert_eq!(registry.len(), 1);

        assert_eq!(registry.find_by_path("a.rs"), Some(BufferId(4)));
        assert_eq!(registry.find_by_path("b.rs"), None);

        assert!(registry.remove(BufferId(4)).is_some());
        assert!(registry.is_empty());
    }
}
