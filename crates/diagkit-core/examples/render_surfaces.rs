//! Render surfaces example
//!
//! Publishes a few batches from two producers and prints the hover text, the gutter and the
//! status bar the host would draw.

use diagkit_config::EngineConfig;
use diagkit_core::{
    BufferFlags, BufferId, BufferInfo, Diagnostic, DiagnosticRange, Engine, NamespaceId,
    Severity, Sign, SignKind,
};

fn main() {
    println!("=== diagkit render surfaces ===\n");

    let mut engine = Engine::new(&EngineConfig::default());
    engine.subscribe(|change| {
        println!(
            "  store change: {:?} (version {} -> {})",
            change.change_type, change.old_version, change.new_version
        );
    });

    let main_rs = BufferId(1);
    let lib_rs = BufferId(2);
    let rustc = NamespaceId(1);
    let clippy = NamespaceId(2);

    engine.buffer_added(
        lib_rs,
        BufferInfo::new("/work/src/lib.rs").with_display_path("src/lib.rs"),
    );
    engine.buffer_entered(
        main_rs,
        BufferInfo::new("/work/src/main.rs").with_display_path("src/main.rs"),
    );
    engine.set_buffer_flags(
        main_rs,
        BufferFlags {
            modified: true,
            readonly: false,
        },
    );

    println!("1. Publishing:");
    engine.publish(
        rustc,
        main_rs,
        &[
            Diagnostic::new(
                main_rs,
                rustc,
                DiagnosticRange::new(4, 8, 4, 13),
                Severity::Warn,
                "unused variable: `count`",
            )
            .with_source("rustc")
            .with_code("unused_variables"),
            Diagnostic::new(
                main_rs,
                rustc,
                DiagnosticRange::new(9, 4, 9, 20),
                Severity::Error,
                "mismatched types\nexpected `usize`, found `&str`.",
            )
            .with_source("rustc")
            .with_code("E0308"),
        ],
        &(),
    );
    engine.publish(
        clippy,
        main_rs,
        &[Diagnostic::new(
            main_rs,
            clippy,
            DiagnosticRange::new(9, 4, 9, 20),
            Severity::Hint,
            "consider using `parse`",
        )
        .with_source("clippy")],
        &(),
    );
    engine.publish(
        rustc,
        lib_rs,
        &[Diagnostic::new(
            lib_rs,
            rustc,
            DiagnosticRange::point(0, 0),
            Severity::Error,
            "unresolved import",
        )],
        &(),
    );

    println!("\n2. Hover at line 9:");
    for line in engine.hover_lines(main_rs, 9, true) {
        println!("  [{}] {}", line.highlight_group, line.text);
    }

    println!("\n3. Gutter:");
    let signs = [
        Sign::new(main_rs, 4, SignKind::Diagnostic(Severity::Warn), "DiagnosticSignWarn", "W"),
        Sign::new(main_rs, 4, SignKind::VersionControl, "GitSignsChange", "┃"),
        Sign::new(main_rs, 9, SignKind::Diagnostic(Severity::Error), "DiagnosticSignError", "E"),
    ];
    for line in [3, 4, 9] {
        println!(
            "  {line:>2} | {}",
            engine.draw_statuscolumn_for_line(main_rs, line, &signs)
        );
    }

    println!("\n4. Status bar:");
    println!("  {}", engine.draw_statusline());
}
