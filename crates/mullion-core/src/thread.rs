//! UI-thread tracking and affinity assertions.
//!
//! Every native toolkit this layer fronts requires widget mutation to
//! happen on one thread. The glue marks that thread once at startup via
//! [`mark_ui_thread`]; afterwards [`is_ui_thread`] and the assertion
//! macros verify affinity, and [`crate::dispatch`] marshals work across.
//!
//! Before the UI thread is marked, every thread counts as the UI thread.
//! That keeps early initialization and plain unit tests working without a
//! running toolkit.
//!
//! ```ignore
//! use mullion_core::{assert_ui_thread, debug_assert_ui_thread, is_ui_thread};
//!
//! fn apply_native_title(&self) {
//!     // Panic in debug builds if off the UI thread
//!     debug_assert_ui_thread!();
//!     // ... touch native state ...
//! }
//!
//! fn request_title(&self) {
//!     if is_ui_thread() {
//!         self.apply_native_title();
//!     } else {
//!         // Queue through the dispatcher instead
//!     }
//! }
//! ```

use std::sync::OnceLock;
use std::thread::ThreadId;

/// Global storage for the UI thread ID.
static UI_THREAD_ID: OnceLock<ThreadId> = OnceLock::new();

/// Record the current thread as the UI thread.
///
/// Called by the platform glue once the native toolkit is up, from the
/// thread that pumps its events. Calling it again from the same thread is
/// a no-op.
///
/// # Panics
///
/// Panics if called again from a different thread.
pub fn mark_ui_thread() {
    let current = std::thread::current().id();
    if UI_THREAD_ID.set(current).is_err() && UI_THREAD_ID.get() != Some(&current) {
        panic!(
            "mark_ui_thread() called from a different thread than the original. \
             The UI thread can only be marked once."
        );
    }
}

/// Get the UI thread ID if it has been marked.
#[inline]
pub fn ui_thread_id() -> Option<ThreadId> {
    UI_THREAD_ID.get().copied()
}

/// Check if the current thread is the UI thread.
///
/// Returns `true` when we are on the marked UI thread, or when no thread
/// has been marked yet (early initialization). Returns `false` only when
/// the UI thread has been marked and we are somewhere else.
#[inline]
pub fn is_ui_thread() -> bool {
    match UI_THREAD_ID.get() {
        Some(&ui_id) => std::thread::current().id() == ui_id,
        None => true,
    }
}

/// Panics if the current thread is not the UI thread.
///
/// Always active. Use [`debug_assert_ui_thread!`] for checks that should
/// vanish in release builds.
#[macro_export]
macro_rules! assert_ui_thread {
    () => {
        $crate::assert_ui_thread!("operation must be performed on the UI thread")
    };
    ($msg:expr) => {
        if !$crate::thread::is_ui_thread() {
            $crate::thread::panic_off_ui_thread($msg, file!(), line!());
        }
    };
    ($fmt:expr, $($arg:tt)*) => {
        if !$crate::thread::is_ui_thread() {
            $crate::thread::panic_off_ui_thread(&format!($fmt, $($arg)*), file!(), line!());
        }
    };
}

/// Debug-only assertion that the current thread is the UI thread.
///
/// A no-op in release builds, so it can sit in every native-touching path
/// without costing anything in production.
#[macro_export]
macro_rules! debug_assert_ui_thread {
    ($($arg:tt)*) => {
        if cfg!(debug_assertions) {
            $crate::assert_ui_thread!($($arg)*);
        }
    };
}

/// Builds the panic message for affinity violations.
#[cold]
#[inline(never)]
#[doc(hidden)]
pub fn panic_off_ui_thread(msg: &str, file: &str, line: u32) -> ! {
    let current = std::thread::current();
    let current_name = current.name().unwrap_or("<unnamed>");
    let current_id = current.id();

    let ui_info = match ui_thread_id() {
        Some(id) => format!("UI thread ID: {:?}", id),
        None => "UI thread not yet marked".to_string(),
    };

    panic!(
        "\n\
        ══════════════════════════════════════════════════════════════════════\n\
        UI THREAD VIOLATION\n\
        ══════════════════════════════════════════════════════════════════════\n\
        \n\
        {msg}\n\
        \n\
        Location: {file}:{line}\n\
        Current thread: \"{current_name}\" (ID: {current_id:?})\n\
        {ui_info}\n\
        \n\
        Native widget state and attached-value operations must run on the\n\
        UI thread.\n\
        \n\
        POSSIBLE SOLUTIONS:\n\
        \n\
        1. Block until the work has run there:\n\
           dispatcher().invoke(|| widget.set_title(title));\n\
        \n\
        2. Fire and forget:\n\
           dispatcher().post(|| widget.set_title(title));\n\
        \n\
        ══════════════════════════════════════════════════════════════════════"
    )
}
