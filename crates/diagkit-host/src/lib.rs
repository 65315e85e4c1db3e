#![warn(missing_docs)]
//! `diagkit-host` - host payload ingestion for `diagkit-core`.
//!
//! Host editors and language servers describe diagnostics and signs as loosely typed tables.
//! This crate decodes them (as `serde_json::Value`) into the closed [`diagkit_core`] model.
//! Entries that do not fit (unknown severities, negative coordinates, unclassified sign groups)
//! are dropped and logged, never guessed at.

pub mod error;
pub mod host_diagnostics;
pub mod host_signs;
pub mod uri;

pub use error::EntryError;
pub use host_diagnostics::{
    PublishParams, diagnostic_from_value, diagnostics_from_json, diagnostics_from_value,
    diagnostics_to_value, publish_params_from_value,
};
pub use host_signs::SignClassifier;
pub use uri::{file_uri_to_path, percent_decode};
