//! Sign (extmark) payload decoding.
//!
//! Signs arrive either as objects (`{ line | row, sign_hl_group, sign_text, priority }`, with the
//! sign fields optionally nested under `details`) or as raw extmark tuples
//! `[id, row, col, { sign_hl_group, sign_text, priority }]`. The sign kind is derived from the
//! highlight group.

use crate::error::EntryError;
use diagkit_config::SignsConfig;
use diagkit_core::{BufferId, Severity, Sign, SignKind};
use serde_json::{Map, Value};

const DIAGNOSTIC_SIGN_PREFIX: &str = "DiagnosticSign";

/// Maps highlight groups onto [`SignKind`]s.
#[derive(Debug, Clone)]
pub struct SignClassifier {
    vcs_prefixes: Vec<String>,
}

impl Default for SignClassifier {
    fn default() -> Self {
        Self::from_config(&SignsConfig::default())
    }
}

impl SignClassifier {
    /// Build a classifier from configuration.
    pub fn from_config(config: &SignsConfig) -> Self {
        Self {
            vcs_prefixes: config
                .vcs_prefixes
                .iter()
                .filter(|p| !p.is_empty())
                .cloned()
                .collect(),
        }
    }

    /// Classify a highlight group.
    ///
    /// `DiagnosticSign<Severity>` maps to a diagnostic sign; groups starting with one of the
    /// configured prefixes map to version control. Groups containing control characters are
    /// never classified.
    pub fn classify(&self, highlight_group: &str) -> Option<SignKind> {
        if highlight_group.chars().any(char::is_control) {
            return None;
        }
        if let Some(suffix) = highlight_group.strip_prefix(DIAGNOSTIC_SIGN_PREFIX) {
            return Severity::from_name(suffix).map(SignKind::Diagnostic);
        }
        self.vcs_prefixes
            .iter()
            .any(|p| highlight_group.starts_with(p.as_str()))
            .then_some(SignKind::VersionControl)
    }

    /// Decode a single sign entry.
    pub fn sign_from_value(&self, buffer_id: BufferId, entry: &Value) -> Result<Sign, EntryError> {
        let (line, details) = match entry {
            Value::Array(tuple) => {
                let line = tuple
                    .get(1)
                    .ok_or(EntryError::MissingField("row"))
                    .and_then(|v| line_number(v, "row"))?;
                let details = tuple
                    .get(3)
                    .and_then(Value::as_object)
                    .ok_or(EntryError::MissingField("details"))?;
                (line, details)
            }
            Value::Object(obj) => {
                let (field, value) = match (obj.get("line"), obj.get("row")) {
                    (Some(v), _) => ("line", v),
                    (None, Some(v)) => ("row", v),
                    (None, None) => return Err(EntryError::MissingField("line")),
                };
                let details = obj.get("details").and_then(Value::as_object).unwrap_or(obj);
                (line_number(value, field)?, details)
            }
            _ => return Err(EntryError::NotAnObject),
        };

        let group = string_field(details, "sign_hl_group")?;
        let kind = self
            .classify(&group)
            .ok_or_else(|| EntryError::UnclassifiedSign(group.clone()))?;
        let text = string_field(details, "sign_text").unwrap_or_default();
        let priority = match details.get("priority") {
            None | Some(Value::Null) => 0,
            Some(v) => v
                .as_u64()
                .and_then(|p| u32::try_from(p).ok())
                .ok_or(EntryError::InvalidField("priority"))?,
        };

        Ok(Sign::new(buffer_id, line, kind, group, text).with_priority(priority))
    }

    /// Decode a JSON array of signs, dropping malformed or unclassified entries.
    pub fn signs_from_value(&self, buffer_id: BufferId, value: &Value) -> Vec<Sign> {
        let Some(entries) = value.as_array() else {
            tracing::debug!("sign payload is not an array");
            return Vec::new();
        };
        entries
            .iter()
            .filter_map(|entry| match self.sign_from_value(buffer_id, entry) {
                Ok(sign) => Some(sign),
                Err(err) => {
                    tracing::debug!(buffer = buffer_id.0, %err, "dropping sign entry");
                    None
                }
            })
            .collect()
    }

    /// Parse `json` and decode it as a sign list.
    pub fn signs_from_json(
        &self,
        buffer_id: BufferId,
        json: &str,
    ) -> Result<Vec<Sign>, serde_json::Error> {
        let value: Value = serde_json::from_str(json)?;
        Ok(self.signs_from_value(buffer_id, &value))
    }
}

fn line_number(value: &Value, field: &'static str) -> Result<usize, EntryError> {
    value
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or(EntryError::InvalidCoordinate(field))
}

fn string_field(obj: &Map<String, Value>, field: &'static str) -> Result<String, EntryError> {
    match obj.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(EntryError::InvalidField(field)),
        None => Err(EntryError::MissingField(field)),
    }
}
