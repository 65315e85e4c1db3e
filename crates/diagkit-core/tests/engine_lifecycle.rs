use diagkit_config::{EngineConfig, FilterConfig, SuppressionRule};
use diagkit_core::{
    BufferId, BufferInfo, Diagnostic, DiagnosticRange, DropReason, Engine, FnHook, NamespaceId,
    PublishHook, Severity, StoreChangeType,
};
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};

fn diag(line: usize, severity: Severity, message: &str) -> Diagnostic {
    Diagnostic::new(
        BufferId(1),
        NamespaceId(1),
        DiagnosticRange::point(line, 0),
        severity,
        message,
    )
}

#[test]
fn wrapped_hook_receives_the_filtered_sorted_batch() {
    let received = Arc::new(Mutex::new(Vec::new()));
    let received_clone = Arc::clone(&received);
    let hook = FnHook::new(
        move |ns: NamespaceId, buf: BufferId, diagnostics: &[Diagnostic], opts: &String| {
            let messages: Vec<String> = diagnostics.iter().map(|d| d.message.clone()).collect();
            received_clone
                .lock()
                .unwrap()
                .push((ns, buf, messages, opts.clone()));
        },
    );

    let mut engine = Engine::with_hook(&EngineConfig::default(), hook);
    engine.buffer_entered(BufferId(1), BufferInfo::new("a.rs"));
    engine.publish(
        NamespaceId(5),
        BufferId(1),
        &[
            diag(7, Severity::Hint, "later"),
            diag(2, Severity::Error, "first"),
            diag(2, Severity::Error, "first"),
        ],
        &"virtual_text".to_string(),
    );

    assert_eq!(
        *received.lock().unwrap(),
        vec![(
            NamespaceId(5),
            BufferId(1),
            vec!["first".to_string(), "later".to_string()],
            "virtual_text".to_string()
        )]
    );
}

#[test]
fn engine_is_itself_a_publish_hook() {
    fn publish_through<H: PublishHook<Options = ()>>(hook: &mut H, raw: &[Diagnostic]) {
        hook.publish(NamespaceId(1), BufferId(1), raw, &());
    }

    let mut engine = Engine::new(&EngineConfig::default());
    publish_through(&mut engine, &[diag(0, Severity::Warn, "w")]);
    assert_eq!(engine.store().diagnostics_count(), 1);
}

#[test]
fn diagnostics_are_rekeyed_to_the_batch() {
    let mut engine = Engine::new(&EngineConfig::default());
    let stray = Diagnostic::new(
        BufferId(99),
        NamespaceId(99),
        DiagnosticRange::point(0, 0),
        Severity::Info,
        "stray",
    );
    let snapshot = engine.publish(NamespaceId(3), BufferId(4), &[stray], &());

    assert_eq!(snapshot[0].buffer_id, BufferId(4));
    assert_eq!(snapshot[0].namespace_id, NamespaceId(3));
    assert!(engine.store().get(BufferId(99), NamespaceId(99)).is_none());
}

#[test]
fn publish_with_report_explains_drops() {
    let config = EngineConfig {
        filter: FilterConfig {
            ignore_paths: Vec::new(),
            suppress: vec![SuppressionRule {
                source: Some("cspell".to_string()),
                code: None,
                message: None,
            }],
        },
        ..EngineConfig::default()
    };
    let mut engine = Engine::new(&config);

    let mut inverted = diag(1, Severity::Error, "bad range");
    inverted.range = DiagnosticRange::new(2, 0, 1, 0);
    let (snapshot, report) = engine.publish_with_report(
        NamespaceId(1),
        BufferId(1),
        &[
            diag(0, Severity::Info, "unknown word").with_source("cspell"),
            inverted,
            diag(3, Severity::Warn, "kept"),
        ],
        &(),
    );

    assert_eq!(snapshot.len(), 1);
    assert_eq!(report.kept, snapshot.to_vec());
    let reasons: Vec<DropReason> = report.dropped.into_iter().map(|d| d.reason).collect();
    let expected = vec![DropReason::Suppressed(0), DropReason::InvalidRange];
    assert_eq!(reasons, expected);
}

#[test]
fn ignored_buffers_publish_empty_snapshots() {
    let config = EngineConfig {
        filter: FilterConfig {
            ignore_paths: vec!["*.min.js".to_string()],
            suppress: Vec::new(),
        },
        ..EngineConfig::default()
    };
    let mut engine = Engine::new(&config);
    engine.buffer_entered(BufferId(1), BufferInfo::new("/site/app.min.js"));

    let snapshot = engine.publish(
        NamespaceId(1),
        BufferId(1),
        &[diag(0, Severity::Error, "x")],
        &(),
    );
    assert!(snapshot.is_empty());
    assert!(engine.store().is_empty());
}

#[test]
fn empty_batch_clears_previous_snapshot() {
    let mut engine = Engine::new(&EngineConfig::default());
    engine.publish(NamespaceId(1), BufferId(1), &[diag(0, Severity::Error, "x")], &());
    engine.publish(NamespaceId(1), BufferId(1), &[], &());
    assert!(engine.store().get(BufferId(1), NamespaceId(1)).is_none());
}

#[test]
fn closing_buffers_and_clearing_namespaces() {
    let changes = Arc::new(Mutex::new(Vec::new()));
    let changes_clone = Arc::clone(&changes);

    let mut engine = Engine::new(&EngineConfig::default());
    engine.subscribe(move |change| changes_clone.lock().unwrap().push(change.change_type));

    engine.buffer_entered(BufferId(1), BufferInfo::new("a.rs"));
    engine.buffer_added(BufferId(2), BufferInfo::new("b.rs"));
    engine.publish(NamespaceId(1), BufferId(1), &[diag(0, Severity::Error, "a")], &());
    engine.publish(NamespaceId(2), BufferId(1), &[diag(1, Severity::Warn, "b")], &());
    engine.publish(NamespaceId(2), BufferId(2), &[diag(2, Severity::Warn, "c")], &());

    engine.namespace_cleared(NamespaceId(2));
    assert_eq!(engine.store().diagnostics_count(), 1);

    engine.buffer_closed(BufferId(1));
    assert_eq!(engine.current_buffer(), None);
    assert!(engine.buffers().get(BufferId(1)).is_none());
    assert!(engine.store().is_empty());

    assert_eq!(
        *changes.lock().unwrap(),
        vec![
            StoreChangeType::DiagnosticsChanged,
            StoreChangeType::DiagnosticsChanged,
            StoreChangeType::DiagnosticsChanged,
            StoreChangeType::NamespaceCleared,
            StoreChangeType::BufferClosed,
        ]
    );
}

#[test]
fn held_snapshots_are_immutable() {
    let mut engine = Engine::new(&EngineConfig::default());
    let old = [diag(0, Severity::Error, "old")];
    let before = engine.publish(NamespaceId(1), BufferId(1), &old, &());
    engine.publish(NamespaceId(1), BufferId(1), &[diag(0, Severity::Hint, "new")], &());

    assert_eq!(before[0].message, "old");
    let after = engine.store().get(BufferId(1), NamespaceId(1)).unwrap();
    assert_eq!(after[0].message, "new");
}
