#![warn(missing_docs)]
//! `diagkit-ffi` - C ABI bridge for `diagkit-core`.
//!
//! The host loads this library as a native module and drives one engine per handle:
//!
//! ```text
//! handle = diagkit_engine_new(config_toml_or_null)
//! diagkit_buffer_enter(handle, buf, path, display_path, modified, readonly)
//! json   = diagkit_publish(handle, ns, buf, diagnostics_json)   // feed to native display
//! cells  = diagkit_statuscolumn(handle, signs_json)
//! status = diagkit_statusline(handle)
//! hover  = diagkit_hover(handle, buf, line, include_range)
//! diagkit_string_free(json) ... diagkit_engine_free(handle)
//! ```
//!
//! Every returned string is owned by the caller and must be released with
//! [`diagkit_string_free`]. Null or invalid arguments produce a null result (or `false`), and
//! panics are caught at the boundary.

use diagkit_config::{EngineConfig, load_config_from_str};
use diagkit_core::{BufferFlags, BufferId, BufferInfo, Engine, NamespaceId};
use diagkit_host::{
    SignClassifier, diagnostics_from_json, diagnostics_to_value, publish_params_from_value,
};
use std::ffi::{CStr, CString, c_char};
use std::panic::{self, AssertUnwindSafe};
use std::ptr;

/// Opaque engine handle.
pub struct DiagkitEngine {
    engine: Engine,
    classifier: SignClassifier,
}

impl DiagkitEngine {
    fn new(config: &EngineConfig) -> Self {
        Self {
            engine: Engine::new(config),
            classifier: SignClassifier::from_config(&config.signs),
        }
    }
}

fn guarded<T>(fallback: T, f: impl FnOnce() -> T) -> T {
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|_| {
        tracing::error!("panic caught at the FFI boundary");
        fallback
    })
}

fn into_c_string(s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(s) => s.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// # Safety
/// `ptr` must be null or a valid NUL-terminated string that outlives `'a`.
unsafe fn str_arg<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

/// # Safety
/// `ptr` must be null or a handle returned by [`diagkit_engine_new`] and not yet freed.
unsafe fn handle<'a>(ptr: *mut DiagkitEngine) -> Option<&'a mut DiagkitEngine> {
    unsafe { ptr.as_mut() }
}

/// Create an engine from a TOML configuration document; null selects the defaults.
///
/// Returns null if the document is not UTF-8 or fails to load.
///
/// # Safety
/// `config_toml` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn diagkit_engine_new(config_toml: *const c_char) -> *mut DiagkitEngine {
    guarded(ptr::null_mut(), || {
        let config = if config_toml.is_null() {
            EngineConfig::default()
        } else {
            let Some(text) = (unsafe { str_arg(config_toml) }) else {
                return ptr::null_mut();
            };
            match load_config_from_str(text) {
                Ok(config) => config,
                Err(err) => {
                    tracing::warn!(%err, "rejecting engine configuration");
                    return ptr::null_mut();
                }
            }
        };
        Box::into_raw(Box::new(DiagkitEngine::new(&config)))
    })
}

/// Release an engine handle. Null is ignored.
///
/// # Safety
/// `engine` must be null or a handle returned by [`diagkit_engine_new`], freed at most once.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn diagkit_engine_free(engine: *mut DiagkitEngine) {
    if !engine.is_null() {
        drop(unsafe { Box::from_raw(engine) });
    }
}

/// Register a buffer and make it current. A null `display_path` reuses `path`.
///
/// # Safety
/// `engine` must be a live handle; string arguments must be null or NUL-terminated.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn diagkit_buffer_enter(
    engine: *mut DiagkitEngine,
    buffer_id: u32,
    path: *const c_char,
    display_path: *const c_char,
    modified: bool,
    readonly: bool,
) -> bool {
    guarded(false, || {
        let (Some(handle), Some(path)) = (unsafe { handle(engine) }, unsafe { str_arg(path) })
        else {
            return false;
        };
        let mut info = BufferInfo::new(path).with_flags(BufferFlags { modified, readonly });
        if let Some(display_path) = unsafe { str_arg(display_path) } {
            info = info.with_display_path(display_path);
        }
        handle.engine.buffer_entered(BufferId(buffer_id), info);
        true
    })
}

/// Drop a buffer and its snapshots.
///
/// # Safety
/// `engine` must be null or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn diagkit_buffer_close(engine: *mut DiagkitEngine, buffer_id: u32) -> bool {
    guarded(false, || match unsafe { handle(engine) } {
        Some(handle) => {
            handle.engine.buffer_closed(BufferId(buffer_id));
            true
        }
        None => false,
    })
}

/// Drop a namespace's snapshots across all buffers.
///
/// # Safety
/// `engine` must be null or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn diagkit_namespace_clear(
    engine: *mut DiagkitEngine,
    namespace_id: u32,
) -> bool {
    guarded(false, || match unsafe { handle(engine) } {
        Some(handle) => {
            handle.engine.namespace_cleared(NamespaceId(namespace_id));
            true
        }
        None => false,
    })
}

/// Publish a raw batch (JSON array, host or LSP entry shape).
///
/// Returns the filtered, sorted batch as a JSON array for the host's native display, or null if
/// the payload is not valid JSON.
///
/// # Safety
/// `engine` must be a live handle; `diagnostics_json` must be null or NUL-terminated.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn diagkit_publish(
    engine: *mut DiagkitEngine,
    namespace_id: u32,
    buffer_id: u32,
    diagnostics_json: *const c_char,
) -> *mut c_char {
    guarded(ptr::null_mut(), || {
        let (Some(handle), Some(json)) =
            (unsafe { handle(engine) }, unsafe { str_arg(diagnostics_json) })
        else {
            return ptr::null_mut();
        };
        let (buffer_id, namespace_id) = (BufferId(buffer_id), NamespaceId(namespace_id));
        let raw = match diagnostics_from_json(buffer_id, namespace_id, json) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::debug!(%err, "rejecting diagnostic payload");
                return ptr::null_mut();
            }
        };
        let snapshot = handle.engine.publish(namespace_id, buffer_id, &raw, &());
        into_c_string(diagnostics_to_value(&snapshot).to_string())
    })
}

/// Publish LSP `publishDiagnostics` parameters, routed to the buffer whose path matches `uri`.
///
/// Returns null when the payload is invalid or no known buffer has that path.
///
/// # Safety
/// `engine` must be a live handle; `params_json` must be null or NUL-terminated.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn diagkit_publish_lsp(
    engine: *mut DiagkitEngine,
    namespace_id: u32,
    params_json: *const c_char,
) -> *mut c_char {
    guarded(ptr::null_mut(), || {
        let (Some(handle), Some(json)) =
            (unsafe { handle(engine) }, unsafe { str_arg(params_json) })
        else {
            return ptr::null_mut();
        };
        let Ok(value) = serde_json::from_str::<serde_json::Value>(json) else {
            return ptr::null_mut();
        };
        let namespace_id = NamespaceId(namespace_id);
        let Some(params) = publish_params_from_value(namespace_id, &value) else {
            return ptr::null_mut();
        };
        let Some(buffer_id) = params
            .path
            .as_deref()
            .and_then(|path| handle.engine.buffers().find_by_path(path))
        else {
            tracing::debug!(uri = %params.uri, "no buffer for published uri");
            return ptr::null_mut();
        };
        let snapshot = handle
            .engine
            .publish(namespace_id, buffer_id, &params.diagnostics, &());
        into_c_string(diagnostics_to_value(&snapshot).to_string())
    })
}

/// Render the statuscolumn for one line from its signs (JSON array of extmarks).
///
/// # Safety
/// `engine` must be a live handle; `signs_json` must be null or NUL-terminated.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn diagkit_statuscolumn(
    engine: *mut DiagkitEngine,
    signs_json: *const c_char,
) -> *mut c_char {
    guarded(ptr::null_mut(), || {
        let (Some(handle), Some(json)) =
            (unsafe { handle(engine) }, unsafe { str_arg(signs_json) })
        else {
            return ptr::null_mut();
        };
        let buffer_id = handle.engine.current_buffer().unwrap_or(BufferId(0));
        match handle.classifier.signs_from_json(buffer_id, json) {
            Ok(signs) => into_c_string(handle.engine.draw_statuscolumn(&signs)),
            Err(_) => ptr::null_mut(),
        }
    })
}

/// Render the status bar for the current buffer.
///
/// # Safety
/// `engine` must be null or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn diagkit_statusline(engine: *mut DiagkitEngine) -> *mut c_char {
    guarded(ptr::null_mut(), || match unsafe { handle(engine) } {
        Some(handle) => into_c_string(handle.engine.draw_statusline()),
        None => ptr::null_mut(),
    })
}

/// Hover lines for `(buffer_id, line)` as a JSON array of `{ text, highlight_group }`.
///
/// # Safety
/// `engine` must be null or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn diagkit_hover(
    engine: *mut DiagkitEngine,
    buffer_id: u32,
    line: usize,
    include_range: bool,
) -> *mut c_char {
    guarded(ptr::null_mut(), || {
        let Some(handle) = (unsafe { handle(engine) }) else {
            return ptr::null_mut();
        };
        let lines = handle
            .engine
            .hover_lines(BufferId(buffer_id), line, include_range);
        match serde_json::to_string(&lines) {
            Ok(json) => into_c_string(json),
            Err(_) => ptr::null_mut(),
        }
    })
}

/// Release a string returned by this library. Null is ignored.
///
/// # Safety
/// `s` must be null or a pointer returned by this library, freed at most once.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn diagkit_string_free(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}
