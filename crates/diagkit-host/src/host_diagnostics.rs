//! Diagnostic payload decoding.
//!
//! Host editors hand diagnostics over as loosely typed tables. Two shapes are accepted:
//!
//! - host shape: `{ lnum, col, end_lnum?, end_col?, severity?, message?, source?, code? }`
//! - LSP shape: `{ range: { start: { line, character }, end: { line, character } }, ... }`
//!
//! Coordinates are zero-based. Entries that cannot be mapped onto the closed model are dropped
//! and logged at `debug`; they never reach the pipeline.

use crate::error::EntryError;
use crate::uri::file_uri_to_path;
use diagkit_core::{BufferId, Diagnostic, DiagnosticRange, NamespaceId, Severity};
use serde_json::{Map, Value, json};

/// Decoded `textDocument/publishDiagnostics` parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishParams {
    /// Document URI as sent by the server.
    pub uri: String,
    /// Local path for `file://` URIs.
    pub path: Option<String>,
    /// Optional document version.
    pub version: Option<i64>,
    /// Entries that decoded successfully, keyed to the placeholder buffer `0`.
    pub diagnostics: Vec<Diagnostic>,
}

/// Decode a single entry.
pub fn diagnostic_from_value(
    buffer_id: BufferId,
    namespace_id: NamespaceId,
    entry: &Value,
) -> Result<Diagnostic, EntryError> {
    let obj = entry.as_object().ok_or(EntryError::NotAnObject)?;

    let range = match obj.get("range") {
        Some(range) => lsp_range(range)?,
        None => host_range(obj)?,
    };

    Ok(Diagnostic {
        buffer_id,
        namespace_id,
        range,
        severity: severity(obj.get("severity"))?,
        message: message(obj.get("message"))?,
        source: obj.get("source").and_then(Value::as_str).map(str::to_string),
        code: code(obj.get("code")),
    })
}

/// Decode a batch, dropping malformed entries.
///
/// Accepts a JSON array of entries, or an object carrying a `diagnostics` array (as in LSP
/// `publishDiagnostics` parameters). Anything else decodes to an empty batch.
pub fn diagnostics_from_value(
    buffer_id: BufferId,
    namespace_id: NamespaceId,
    value: &Value,
) -> Vec<Diagnostic> {
    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(obj) => match obj.get("diagnostics").and_then(Value::as_array) {
            Some(entries) => entries,
            None => {
                tracing::debug!("diagnostic payload object has no `diagnostics` array");
                return Vec::new();
            }
        },
        _ => {
            tracing::debug!("diagnostic payload is neither an array nor an object");
            return Vec::new();
        }
    };

    entries
        .iter()
        .enumerate()
        .filter_map(
            |(index, entry)| match diagnostic_from_value(buffer_id, namespace_id, entry) {
                Ok(diagnostic) => Some(diagnostic),
                Err(err) => {
                    tracing::debug!(
                        buffer = buffer_id.0,
                        namespace = namespace_id.0,
                        index,
                        %err,
                        "dropping malformed diagnostic entry"
                    );
                    None
                }
            },
        )
        .collect()
}

/// Parse `json` and decode it as a batch.
pub fn diagnostics_from_json(
    buffer_id: BufferId,
    namespace_id: NamespaceId,
    json: &str,
) -> Result<Vec<Diagnostic>, serde_json::Error> {
    let value: Value = serde_json::from_str(json)?;
    Ok(diagnostics_from_value(buffer_id, namespace_id, &value))
}

/// Decode LSP `publishDiagnostics` parameters.
///
/// Returns `None` when `uri` is missing. The caller resolves the buffer from
/// [`PublishParams::path`] and re-keys the batch on publish.
pub fn publish_params_from_value(
    namespace_id: NamespaceId,
    params: &Value,
) -> Option<PublishParams> {
    let uri = params.get("uri")?.as_str()?.to_string();
    let version = params.get("version").and_then(Value::as_i64);
    let diagnostics = params
        .get("diagnostics")
        .map(|d| diagnostics_from_value(BufferId(0), namespace_id, d))
        .unwrap_or_default();

    Some(PublishParams {
        path: file_uri_to_path(&uri),
        uri,
        version,
        diagnostics,
    })
}

/// Encode diagnostics in host shape.
///
/// Severity is numeric (`1` = error .. `5` = ok) and `null` when absent.
pub fn diagnostics_to_value(diagnostics: &[Diagnostic]) -> Value {
    Value::Array(
        diagnostics
            .iter()
            .map(|d| {
                json!({
                    "bufnr": d.buffer_id.0,
                    "namespace": d.namespace_id.0,
                    "lnum": d.range.start_line,
                    "col": d.range.start_col,
                    "end_lnum": d.range.end_line,
                    "end_col": d.range.end_col,
                    "severity": d.severity.map(|s| s.index() + 1),
                    "message": d.message,
                    "source": d.source,
                    "code": d.code,
                })
            })
            .collect(),
    )
}

fn coordinate(value: &Value, field: &'static str) -> Result<usize, EntryError> {
    value
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or(EntryError::InvalidCoordinate(field))
}

fn required(obj: &Map<String, Value>, field: &'static str) -> Result<usize, EntryError> {
    obj.get(field)
        .ok_or(EntryError::MissingField(field))
        .and_then(|v| coordinate(v, field))
}

fn optional(obj: &Map<String, Value>, field: &'static str) -> Result<Option<usize>, EntryError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => coordinate(v, field).map(Some),
    }
}

fn host_range(obj: &Map<String, Value>) -> Result<DiagnosticRange, EntryError> {
    let start_line = required(obj, "lnum")?;
    let start_col = optional(obj, "col")?.unwrap_or(0);
    let end_line = optional(obj, "end_lnum")?.unwrap_or(start_line);
    let end_col = optional(obj, "end_col")?.unwrap_or(start_col);
    Ok(DiagnosticRange::new(start_line, start_col, end_line, end_col))
}

fn lsp_position(value: &Value, field: &'static str) -> Result<(usize, usize), EntryError> {
    let obj = value.as_object().ok_or(EntryError::MissingField(field))?;
    Ok((required(obj, "line")?, required(obj, "character")?))
}

fn lsp_range(value: &Value) -> Result<DiagnosticRange, EntryError> {
    let start = lsp_position(value.get("start").unwrap_or(&Value::Null), "range.start")?;
    let end = match value.get("end") {
        None | Some(Value::Null) => start,
        Some(end) => lsp_position(end, "range.end")?,
    };
    Ok(DiagnosticRange::new(start.0, start.1, end.0, end.1))
}

fn severity(value: Option<&Value>) -> Result<Option<Severity>, EntryError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(Severity::from_u64)
            .map(Some)
            .ok_or_else(|| EntryError::UnknownSeverity(n.to_string())),
        Some(Value::String(s)) => Severity::from_name(s)
            .map(Some)
            .ok_or_else(|| EntryError::UnknownSeverity(s.clone())),
        Some(other) => Err(EntryError::UnknownSeverity(other.to_string())),
    }
}

fn message(value: Option<&Value>) -> Result<String, EntryError> {
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(EntryError::InvalidField("message")),
    }
}

fn code(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}
