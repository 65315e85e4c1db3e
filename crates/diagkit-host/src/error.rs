//! Why a host payload entry could not be decoded.

use thiserror::Error;

/// A malformed diagnostic or sign entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    /// The entry is not a JSON object (or extmark tuple).
    #[error("entry is not an object")]
    NotAnObject,
    /// A required field is absent.
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    /// A coordinate is negative, fractional or not a number.
    #[error("field `{0}` is not a non-negative integer")]
    InvalidCoordinate(&'static str),
    /// A field has the wrong type.
    #[error("field `{0}` has an unexpected type")]
    InvalidField(&'static str),
    /// The severity is outside the closed set.
    #[error("unrecognized severity {0}")]
    UnknownSeverity(String),
    /// The sign's highlight group is neither a diagnostic nor a version-control group.
    #[error("unclassified sign group `{0}`")]
    UnclassifiedSign(String),
}
