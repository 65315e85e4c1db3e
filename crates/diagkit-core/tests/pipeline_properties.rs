//! Randomized checks of the filter/sort pipeline.
//!
//! Batches are generated from a fixed seed so failures reproduce. Messages and ranges are drawn
//! from small pools to force plenty of duplicates, and roughly one range in ten is inverted.

use diagkit_config::{FilterConfig, SuppressionRule};
use diagkit_core::{
    BufferId, Diagnostic, DiagnosticPipeline, DiagnosticRange, DropReason, NamespaceId,
    Severity, sort_diagnostics, sort_key,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

const MESSAGES: [&str; 4] = [
    "unused variable",
    "type mismatch",
    "missing semicolon",
    "dead code",
];
const SOURCES: [&str; 3] = ["rustc", "clippy", "typos"];

fn random_severity(rng: &mut StdRng) -> Option<Severity> {
    match rng.gen_range(0..6) {
        5 => None,
        i => Some(Severity::ALL[i]),
    }
}

fn random_range(rng: &mut StdRng) -> DiagnosticRange {
    let start_line = rng.gen_range(0..8);
    let start_col = rng.gen_range(0..4);
    if rng.gen_range(0..10) == 0 {
        DiagnosticRange::new(start_line + 1, start_col, start_line, start_col)
    } else {
        DiagnosticRange::new(
            start_line,
            start_col,
            start_line + rng.gen_range(0..2),
            start_col + rng.gen_range(0..3),
        )
    }
}

/// `code` carries the input index so order can be traced through the pipeline.
fn random_batch(rng: &mut StdRng, len: usize) -> Vec<Diagnostic> {
    (0..len)
        .map(|i| Diagnostic {
            buffer_id: BufferId(1),
            namespace_id: NamespaceId(1),
            range: random_range(rng),
            severity: random_severity(rng),
            message: MESSAGES[rng.gen_range(0..MESSAGES.len())].to_string(),
            source: Some(SOURCES[rng.gen_range(0..SOURCES.len())].to_string()),
            code: Some(format!("{i}")),
        })
        .collect()
}

fn input_index(diagnostic: &Diagnostic) -> usize {
    diagnostic
        .code
        .as_deref()
        .and_then(|c| c.parse().ok())
        .unwrap_or(usize::MAX)
}

fn pipeline() -> DiagnosticPipeline {
    DiagnosticPipeline::from_config(&FilterConfig {
        ignore_paths: vec!["*/generated/*".to_string()],
        suppress: vec![SuppressionRule {
            source: Some("typos".to_string()),
            code: None,
            message: Some("^dead".to_string()),
        }],
    })
}

#[test]
fn pipeline_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let pipeline = pipeline();

    for _ in 0..200 {
        let len = rng.gen_range(0..40);
        let raw = random_batch(&mut rng, len);
        let once = pipeline.run("src/lib.rs", &raw);
        let twice = pipeline.run("src/lib.rs", &once);
        assert_eq!(once, twice);
    }
}

#[test]
fn survivors_are_valid_unique_and_accounted_for() {
    let mut rng = StdRng::seed_from_u64(42);
    let pipeline = pipeline();

    for _ in 0..200 {
        let len = rng.gen_range(0..40);
        let raw = random_batch(&mut rng, len);
        let result = pipeline.run_with_report("src/lib.rs", &raw);

        assert_eq!(result.kept.len() + result.dropped.len(), raw.len());

        let mut keys = HashSet::new();
        for d in &result.kept {
            assert!(d.range.is_valid(), "kept inverted range {:?}", d.range);
            assert!(
                !(d.source.as_deref() == Some("typos") && d.message.starts_with("dead")),
                "kept suppressed diagnostic {d:?}"
            );
            assert!(
                keys.insert((d.range, d.message.clone())),
                "duplicate survived: {d:?}"
            );
        }

        for dropped in &result.dropped {
            if dropped.reason == DropReason::InvalidRange {
                assert!(!dropped.diagnostic.range.is_valid());
            }
        }
    }
}

#[test]
fn duplicate_groups_keep_their_most_severe_member() {
    let mut rng = StdRng::seed_from_u64(7);
    let pipeline = DiagnosticPipeline::default();

    for _ in 0..200 {
        let len = rng.gen_range(1..30);
        let raw = random_batch(&mut rng, len);
        let kept = pipeline.run("a.rs", &raw);

        for d in &kept {
            let best_rank = raw
                .iter()
                .filter(|r| r.range == d.range && r.message == d.message)
                .map(Diagnostic::severity_rank)
                .min()
                .unwrap();
            assert_eq!(d.severity_rank(), best_rank);
        }
    }
}

#[test]
fn output_is_ordered_by_severity_then_position() {
    let mut rng = StdRng::seed_from_u64(99);
    let pipeline = pipeline();

    for _ in 0..200 {
        let len = rng.gen_range(0..40);
        let raw = random_batch(&mut rng, len);
        let kept = pipeline.run("src/lib.rs", &raw);
        for pair in kept.windows(2) {
            assert!(sort_key(&pair[0]) <= sort_key(&pair[1]));
        }
    }
}

#[test]
fn sort_is_stable_for_equal_keys() {
    let mut rng = StdRng::seed_from_u64(1234);

    for _ in 0..200 {
        let len = rng.gen_range(0..60);
        let raw = random_batch(&mut rng, len);
        let sorted = sort_diagnostics(raw.clone());

        assert_eq!(sorted.len(), raw.len());
        for pair in sorted.windows(2) {
            if sort_key(&pair[0]) == sort_key(&pair[1]) {
                assert!(input_index(&pair[0]) < input_index(&pair[1]));
            }
        }
    }
}

#[test]
fn ignored_paths_drop_whole_batches() {
    let mut rng = StdRng::seed_from_u64(3);
    let raw = random_batch(&mut rng, 25);
    let result = pipeline().run_with_report("/repo/generated/api.rs", &raw);

    assert!(result.kept.is_empty());
    assert_eq!(result.dropped.len(), raw.len());
    assert!(
        result
            .dropped
            .iter()
            .all(|d| matches!(d.reason, DropReason::IgnoredPath(_)))
    );
}
