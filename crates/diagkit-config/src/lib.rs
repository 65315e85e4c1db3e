#![warn(missing_docs)]
//! `diagkit-config` - parsing and validation of `diagkit.toml`.
//!
//! The configuration is loaded once at startup and treated as immutable afterwards. Runtime
//! components in `diagkit-core` compile it into their own matchers via `from_config`.

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, validate_config};
pub use types::{
    EngineConfig, FilterConfig, FormatConfig, MAX_CELL_WIDTH, SeverityHighlights, SignsConfig,
    StatusColumnConfig, StatusLineConfig, SuppressionRule, TieBreak,
};
