#![warn(missing_docs)]
//! diagkit core - headless diagnostic aggregation and rendering
//!
//! # Overview
//!
//! `diagkit-core` sits between a host editor's diagnostic producers (linters, language servers)
//! and its display machinery. It intercepts every batch, drops noise, imposes a deterministic
//! order, and renders three surfaces from the resulting snapshots: hover text, a per-line gutter
//! (statuscolumn) and a status bar (statusline).
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Engine (context object, publish decorator) │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Renderers (hover, gutter, status bar)      │  ← Render surfaces
//! ├─────────────────────────────────────────────┤
//! │  Snapshot store (buffer, namespace) → Arc   │  ← Replace-only state
//! ├─────────────────────────────────────────────┤
//! │  Pipeline (filter → sort)                   │  ← Ingestion
//! ├─────────────────────────────────────────────┤
//! │  Data model (Diagnostic, Sign, Severity)    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use diagkit_config::EngineConfig;
//! use diagkit_core::{
//!     BufferId, BufferInfo, Diagnostic, DiagnosticRange, Engine, NamespaceId, Severity, Sign,
//!     SignKind,
//! };
//!
//! let mut engine = Engine::new(&EngineConfig::default());
//! engine.buffer_entered(BufferId(3), BufferInfo::new("/work/src/lib.rs").with_display_path("src/lib.rs"));
//!
//! let raw = vec![Diagnostic::new(
//!     BufferId(3),
//!     NamespaceId(1),
//!     DiagnosticRange::new(10, 4, 10, 9),
//!     Severity::Error,
//!     "cannot find value `x`.",
//! )
//! .with_source("rustc")
//! .with_code("E0425")];
//! engine.publish(NamespaceId(1), BufferId(3), &raw, &());
//!
//! let hover = engine.hover_lines(BufferId(3), 10, true);
//! assert_eq!(hover[0].text, "▶ cannot find value `x` [rustc: E0425] @ 10:4;10:9");
//!
//! let signs = [Sign::new(BufferId(3), 10, SignKind::Diagnostic(Severity::Error), "DiagnosticSignError", "E")];
//! assert_eq!(engine.draw_statuscolumn(&signs), "%#DiagnosticSignError#E%* ");
//!
//! assert!(engine.draw_statusline().starts_with("%#DiagnosticError#E:1 "));
//! ```
//!
//! # Module Description
//!
//! - [`severity`] - closed severity tiers and their order
//! - [`diagnostics`] - diagnostic data model
//! - [`signs`] - gutter sign data model
//! - [`filter`] - suppression, ignore paths, range validation, de-duplication
//! - [`sort`] - severity-then-position ordering
//! - [`format`] - single-line hover text
//! - [`statuscolumn`] - fixed-width gutter cells
//! - [`statusline`] - buffer and workspace badges
//! - [`store`] - snapshot map with change notifications
//! - [`processing`] - publish hook seam and filter/sort pipeline
//! - [`engine`] - the context object tying it together

pub mod buffers;
pub mod diagnostics;
pub mod engine;
pub mod filter;
pub mod format;
pub mod markup;
pub mod processing;
pub mod severity;
pub mod signs;
pub mod sort;
pub mod statuscolumn;
pub mod statusline;
pub mod store;
pub mod width;

pub use buffers::{BufferInfo, BufferRegistry};
pub use diagnostics::{BufferId, Diagnostic, DiagnosticRange, NamespaceId};
pub use engine::Engine;
pub use filter::{DiagnosticFilter, DropReason, DroppedDiagnostic, FilterResult};
pub use format::{DiagnosticFormatter, StyledLine, normalize_message};
pub use processing::{DiagnosticPipeline, FnHook, NoopHook, PublishHook};
pub use severity::Severity;
pub use signs::{Sign, SignKind};
pub use sort::{sort_diagnostics, sort_key};
pub use statuscolumn::StatusColumnRenderer;
pub use statusline::{BufferFlags, SeverityCounts, StatusLineRenderer};
pub use store::{DiagnosticStore, Snapshot, StoreChange, StoreChangeCallback, StoreChangeType};
