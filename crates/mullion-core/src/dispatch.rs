//! Cross-thread marshaling onto the UI thread.
//!
//! Work arriving from a non-UI thread must not touch native widget state
//! directly. It goes through the [`UiDispatcher`] instead: callers either
//! block until the work has run ([`UiDispatcher::invoke`]) or fire and
//! forget ([`UiDispatcher::post`]), optionally keeping a
//! [`CompletionWaiter`] to find out when the work finished.
//!
//! The dispatcher is loop-agnostic. The platform glue drains it from
//! whatever native event pump it runs, by calling
//! [`UiDispatcher::process_pending`] once per pump iteration.

use std::sync::{Arc, OnceLock};

use crossbeam_channel::{Receiver, Sender, unbounded};
use parking_lot::{Condvar, Mutex};

use crate::thread::is_ui_thread;

/// A type-erased call waiting to run on the UI thread.
pub struct QueuedCall {
    invoke: Box<dyn FnOnce() + Send>,
    /// Optional completion notifier for blocking callers.
    completion: Option<CompletionHandle>,
}

impl QueuedCall {
    /// Create a new queued call.
    pub fn new<F>(invoke: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            invoke: Box::new(invoke),
            completion: None,
        }
    }

    /// Create a queued call that signals a completion pair when done.
    pub fn with_completion<F>(invoke: F, completion: CompletionHandle) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            invoke: Box::new(invoke),
            completion: Some(completion),
        }
    }

    /// Run the call, signaling completion if a handle was attached.
    pub fn execute(self) {
        (self.invoke)();
        if let Some(completion) = self.completion {
            completion.signal_done();
        }
    }
}

/// Sender side of a completion pair; signals when the call has run.
pub struct CompletionHandle {
    inner: Arc<CompletionState>,
}

impl CompletionHandle {
    fn signal_done(self) {
        let mut done = self.inner.done.lock();
        *done = true;
        self.inner.condvar.notify_all();
    }
}

/// Waiter side of a completion pair; blocks until the call has run.
pub struct CompletionWaiter {
    inner: Arc<CompletionState>,
}

impl CompletionWaiter {
    /// Block the current thread until the queued call finishes.
    ///
    /// # Warning
    ///
    /// Waiting on the UI thread for a call that can only run on the UI
    /// thread deadlocks.
    pub fn wait(self) {
        let mut done = self.inner.done.lock();
        while !*done {
            self.inner.condvar.wait(&mut done);
        }
    }

    /// Like [`wait`](Self::wait), but gives up after `timeout`.
    ///
    /// Returns `true` if the call completed, `false` if the timeout
    /// elapsed first.
    pub fn wait_timeout(self, timeout: std::time::Duration) -> bool {
        let mut done = self.inner.done.lock();
        if *done {
            return true;
        }
        let result = self.inner.condvar.wait_for(&mut done, timeout);
        *done || !result.timed_out()
    }
}

struct CompletionState {
    done: Mutex<bool>,
    condvar: Condvar,
}

/// Create a completion handle/waiter pair.
pub fn completion_pair() -> (CompletionHandle, CompletionWaiter) {
    let state = Arc::new(CompletionState {
        done: Mutex::new(false),
        condvar: Condvar::new(),
    });

    (
        CompletionHandle {
            inner: state.clone(),
        },
        CompletionWaiter { inner: state },
    )
}

/// Queue of calls bound for the UI thread.
///
/// Cheap to share; both channel ends live inside, so posting never fails
/// while the dispatcher is alive.
pub struct UiDispatcher {
    queue_tx: Sender<QueuedCall>,
    queue_rx: Receiver<QueuedCall>,
}

impl UiDispatcher {
    /// Create a dispatcher with an empty queue.
    pub fn new() -> Self {
        let (queue_tx, queue_rx) = unbounded();
        Self { queue_tx, queue_rx }
    }

    /// Queue `f` for the UI thread and return immediately.
    pub fn post<F>(&self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        tracing::trace!(target: "mullion_core::dispatch", "call posted");
        let _ = self.queue_tx.send(QueuedCall::new(f));
    }

    /// Queue `f` and return a waiter the caller may use to learn when it
    /// ran, or drop to fire and forget.
    pub fn post_with_completion<F>(&self, f: F) -> CompletionWaiter
    where
        F: FnOnce() + Send + 'static,
    {
        let (handle, waiter) = completion_pair();
        let _ = self.queue_tx.send(QueuedCall::with_completion(f, handle));
        waiter
    }

    /// Run `f` on the UI thread, blocking until it has finished.
    ///
    /// When already on the UI thread (or before one is marked), `f` runs
    /// inline. Otherwise it is queued and the caller blocks until the UI
    /// pump executes it.
    pub fn invoke<F>(&self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if is_ui_thread() {
            f();
            return;
        }
        self.post_with_completion(f).wait();
    }

    /// Queue `f` unconditionally, even when called on the UI thread.
    ///
    /// Use this to defer work until the next pump iteration, e.g. to
    /// escape a native callback before touching more native state.
    pub fn invoke_queued<F>(&self, f: F) -> CompletionWaiter
    where
        F: FnOnce() + Send + 'static,
    {
        self.post_with_completion(f)
    }

    /// Drain and execute every call currently queued.
    ///
    /// The platform glue calls this from the UI thread, once per event
    /// pump iteration. Returns the number of calls executed.
    pub fn process_pending(&self) -> usize {
        let mut executed = 0;
        while let Ok(call) = self.queue_rx.try_recv() {
            call.execute();
            executed += 1;
        }
        if executed > 0 {
            tracing::trace!(target: "mullion_core::dispatch", executed, "drained dispatch queue");
        }
        executed
    }

    /// Number of calls waiting to run.
    pub fn pending_count(&self) -> usize {
        self.queue_rx.len()
    }
}

impl Default for UiDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

static_assertions::assert_impl_all!(UiDispatcher: Send, Sync);

/// Global dispatcher instance.
static DISPATCHER: OnceLock<UiDispatcher> = OnceLock::new();

/// Get the process-wide dispatcher.
pub fn dispatcher() -> &'static UiDispatcher {
    DISPATCHER.get_or_init(UiDispatcher::new)
}
