//! Mullion Verification Example
//!
//! Console walkthrough of the crate's subsystems:
//! - Handle registry: parenting, labels, cascade teardown
//! - Attached values: inherited lookup, overrides, sibling isolation
//! - Data context: change notifications and inherited resolution
//! - Dispatch: marshaling worker results onto the UI thread
//! - Dialogs: sessions against a scripted host, with modal tracking
//!
//! Run with: cargo run -p mullion --example verification
//!
//! The scripted sections run everywhere, including headless CI. Set
//! MULLION_DEMO_NATIVE=1 to also open the real file chooser at the end.

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use mullion::{
    DATA_CONTEXT_KEY, DialogHost, DialogIcon, DialogResult, FileBrowserDialog, FileDialogRequest,
    HandleKind, HostBase, HostReply, HostResult, PropertyHost, ReportButtons, ReportDialog,
    ReportRequest, dispatcher, global_registry, init_global_registry, mark_ui_thread,
    modal_tracker, native_backend_available,
};

/// Host that answers every session from a script instead of a toolkit.
struct ReplayHost {
    file_reply: HostReply,
    report_reply: HostReply,
}

impl DialogHost for ReplayHost {
    fn run_file(&mut self, request: &FileDialogRequest) -> HostResult<HostReply> {
        println!(
            "  host: {:?} session, {} filter(s), modal depth {}",
            request.mode,
            request.filters.len(),
            modal_tracker().modal_count()
        );
        Ok(self.file_reply.clone())
    }

    fn run_report(&mut self, request: &ReportRequest) -> HostResult<HostReply> {
        println!(
            "  host: report session offering {:?}: {}",
            request.buttons.labels(),
            request.body
        );
        Ok(self.report_reply.clone())
    }
}

fn registry_walkthrough() {
    println!("\n=== Handle Registry ===");
    let registry = global_registry().expect("initialized in main");

    let window = registry.register(HandleKind::Window);
    let panel = registry.register(HandleKind::Widget);
    let button = registry.register(HandleKind::Widget);
    registry
        .set_label(window, "main-window".to_string())
        .expect("window is live");
    registry
        .set_label(panel, "settings-panel".to_string())
        .expect("panel is live");
    registry
        .set_label(button, "apply-button".to_string())
        .expect("button is live");
    registry.set_parent(panel, Some(window)).expect("both live");
    registry.set_parent(button, Some(panel)).expect("both live");

    let tree = registry
        .with_read(|r| r.dump_tree(window))
        .expect("window is live");
    print!("{tree}");
    println!("live handles: {}", registry.handle_count());

    // Destroying the window takes the registered branch with it.
    registry.destroy(window).expect("window is live");
    println!(
        "after teardown: {} live, panel still registered: {}",
        registry.handle_count(),
        registry.contains(panel)
    );
}

fn attached_walkthrough() {
    println!("\n=== Attached Values ===");
    let registry = global_registry().expect("initialized in main");

    let window = registry.register(HandleKind::Window);
    let panel = registry.register(HandleKind::Widget);
    let field = registry.register(HandleKind::Widget);
    registry.set_parent(panel, Some(window)).expect("both live");
    registry.set_parent(field, Some(panel)).expect("both live");

    registry
        .set_value(window, "theme.accent", Arc::new("teal".to_string()))
        .expect("window is live");
    let hit = registry
        .resolve_value(field, "theme.accent")
        .expect("field is live")
        .expect("set on the window");
    println!(
        "field resolves accent {:?} from {:?}",
        hit.value.downcast_ref::<String>(),
        hit.owner
    );

    // The nearest setting wins.
    registry
        .set_value(panel, "theme.accent", Arc::new("plum".to_string()))
        .expect("panel is live");
    let hit = registry
        .resolve_value(field, "theme.accent")
        .expect("field is live")
        .expect("set on the panel");
    println!(
        "after panel override: {:?} from {:?}",
        hit.value.downcast_ref::<String>(),
        hit.owner
    );

    // Values set on one branch never leak sideways.
    let sibling = registry.register(HandleKind::Widget);
    registry.set_parent(sibling, Some(window)).expect("both live");
    registry
        .set_value(field, "draft", Arc::new(true))
        .expect("field is live");
    println!(
        "sibling sees the field's draft flag: {}",
        registry
            .resolve_value(sibling, "draft")
            .expect("sibling is live")
            .is_some()
    );

    registry.destroy(window).expect("window is live");
}

fn context_walkthrough() {
    println!("\n=== Data Context ===");
    let registry = global_registry().expect("initialized in main");

    let panel = HostBase::new(HandleKind::Widget);
    let field = HostBase::new(HandleKind::Widget);
    registry
        .set_parent(field.handle(), Some(panel.handle()))
        .expect("both live");

    panel.data_context_changed.connect(|change| {
        println!(
            "  notified: context on {:?} now has a value: {}",
            change.handle,
            change.value.is_some()
        );
    });

    panel
        .set_data_context(Some(Arc::new("order #6671".to_string())))
        .expect("panel is live");

    // Children inherit through the resolver walk.
    let inherited = registry
        .resolve_value(field.handle(), DATA_CONTEXT_KEY)
        .expect("field is live")
        .expect("set on the panel");
    println!(
        "field inherits context {:?}",
        inherited.value.downcast_ref::<String>()
    );

    // Clearing notifies as well.
    panel.set_data_context(None).expect("panel is live");
    println!(
        "panel context after clear: {:?}",
        panel.data_context().expect("panel is live").is_some()
    );
}

fn dispatch_walkthrough() {
    println!("\n=== UI Thread Dispatch ===");

    let worker = thread::spawn(|| {
        for batch in 0..3 {
            dispatcher().post(move || {
                println!("  batch {batch} applied on the UI thread");
            });
        }
        // Blocks until the pump below has run the closure.
        dispatcher().invoke(|| {
            println!("  worker handoff confirmed");
        });
    });

    while !worker.is_finished() {
        dispatcher().process_pending();
        thread::sleep(Duration::from_millis(2));
    }
    dispatcher().process_pending();
    worker.join().expect("worker thread panicked");
    println!("queue drained, {} pending", dispatcher().pending_count());
}

fn dialog_walkthrough() {
    println!("\n=== Dialogs (scripted host) ===");

    let mut host = ReplayHost {
        file_reply: HostReply::accepted(vec![
            PathBuf::from("/srv/backups/2026-08-01.bak"),
            PathBuf::from("/srv/backups/2026-08-08.bak"),
        ]),
        report_reply: HostReply::resolved(DialogResult::Yes),
    };

    let mut dialog = FileBrowserDialog::new();
    dialog.set_caption("Select archives to restore");
    dialog.add_filter("Backup Archives", &["bak", "zip"]);
    dialog.set_multiselect(true);
    let result = dialog
        .show_with_host(&mut host)
        .expect("scripted host cannot fail");
    println!("file session ended with {result:?}");
    for path in dialog.file_names() {
        println!("  picked {}", path.display());
    }
    dialog.dispose().expect("resolved dialog disposes cleanly");

    let mut report = ReportDialog::new("2 archives are older than the retention window.");
    report.set_caption("Retention check");
    report.set_icon(DialogIcon::Exclamation);
    report.set_buttons(ReportButtons::YesNo);
    let result = report
        .show_with_host(&mut host)
        .expect("scripted host cannot fail");
    println!(
        "report session ended with {result:?}, modal depth back to {}",
        modal_tracker().modal_count()
    );
    report.dispose().expect("resolved dialog disposes cleanly");
}

fn native_walkthrough() {
    if std::env::var_os("MULLION_DEMO_NATIVE").is_none() {
        return;
    }
    if !native_backend_available() {
        println!("\nno native dialog backend on this platform, skipping");
        return;
    }

    println!("\n=== Dialogs (native backend) ===");
    let mut dialog = FileBrowserDialog::new();
    dialog.set_caption("Mullion verification");
    dialog.add_filter("Backup Archives", &["bak", "zip"]);
    dialog.set_multiselect(true);
    match dialog.show() {
        Ok(DialogResult::Ok) => {
            for path in dialog.file_names() {
                println!("picked {}", path.display());
            }
        }
        Ok(result) => println!("session ended with {result:?}"),
        Err(err) => println!("native session failed: {err}"),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("╔═══════════════════════════════════════════════════════════╗");
    println!("║             Mullion Verification Application              ║");
    println!("╠═══════════════════════════════════════════════════════════╣");
    println!("║ Walks through: handle registry, attached values, data     ║");
    println!("║ context, UI-thread dispatch, and dialog sessions.         ║");
    println!("║ RUST_LOG=trace shows the per-subsystem instrumentation.   ║");
    println!("╚═══════════════════════════════════════════════════════════╝");

    mark_ui_thread();
    init_global_registry();

    registry_walkthrough();
    attached_walkthrough();
    context_walkthrough();
    dispatch_walkthrough();
    dialog_walkthrough();
    native_walkthrough();

    println!("\nall sections completed");
}
