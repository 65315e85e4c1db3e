//! Configuration errors.

/// Why a `diagkit.toml` document was rejected.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read diagkit config: {0}")]
    IoError(#[from] std::io::Error),

    /// Not valid TOML, or an unknown key.
    #[error("diagkit config syntax: {0}")]
    ParseError(String),

    /// Parsed, but a pattern does not compile or a value is out of range.
    #[error("invalid diagkit config: {0}")]
    ValidationError(String),
}
