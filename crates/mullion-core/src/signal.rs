//! Signal/slot notifications.
//!
//! Signals carry change notifications between the toolkit glue and
//! application code, most importantly the data-context change events of
//! [`crate::context`]. Connected slots (closures) are invoked directly on
//! the emitting thread; cross-thread delivery goes through
//! [`crate::dispatch`] instead, which keeps this type free of any event
//! loop coupling.
//!
//! # Example
//!
//! ```
//! use mullion_core::Signal;
//!
//! let title_changed = Signal::<String>::new();
//!
//! let id = title_changed.connect(|title| {
//!     println!("title is now {title}");
//! });
//!
//! title_changed.emit("Untitled".to_string());
//! title_changed.disconnect(id);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via
    /// [`Signal::disconnect`]. The ID stays valid until the connection is
    /// disconnected or the signal is dropped.
    pub struct ConnectionId;
}

struct Connection<Args> {
    /// Arc-wrapped so emission can run the slot without holding the table lock.
    slot: Arc<dyn Fn(&Args) + Send + Sync>,
}

/// A type-safe signal with directly-invoked slots.
///
/// When the signal is emitted, every connected slot is called on the
/// emitting thread with a reference to the arguments. Slots may connect or
/// disconnect other slots, including themselves, from inside an emission.
///
/// # Type Parameter
///
/// - `Args`: the argument type passed to slots. Use `()` for signals with
///   no arguments, or a tuple for several.
pub struct Signal<Args> {
    connections: Mutex<SlotMap<ConnectionId, Connection<Args>>>,
    /// Whether emission is temporarily suppressed.
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a [`ConnectionId`] that can be used to disconnect the slot
    /// later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Connection {
            slot: Arc::new(slot),
        })
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false`
    /// otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` do nothing. This is useful during
    /// initialization or batch updates to prevent cascading notifications.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots with `args`.
    ///
    /// Slots connected at the start of the emission are the ones invoked;
    /// a slot that disconnects itself mid-emission still sees this
    /// emission, and a slot connected mid-emission sees the next.
    #[tracing::instrument(skip_all, target = "mullion_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: "mullion_core::signal", "signal blocked, skipping emit");
            return;
        }

        // Clone the slots out first so a slot may connect or disconnect
        // without deadlocking on the table lock.
        let slots: Vec<_> = {
            let connections = self.connections.lock();
            tracing::trace!(
                target: "mullion_core::signal",
                connection_count = connections.len(),
                "emitting signal"
            );
            connections.values().map(|c| c.slot.clone()).collect()
        };

        for slot in slots {
            slot(&args);
        }
    }
}

static_assertions::assert_impl_all!(Signal<String>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_connect_and_emit() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(AtomicUsize::new(0));

        let received_clone = received.clone();
        signal.connect(move |n| {
            received_clone.fetch_add(*n as usize, Ordering::SeqCst);
        });

        signal.emit(5);
        signal.emit(7);
        assert_eq!(received.load(Ordering::SeqCst), 12);
    }

    #[test]
    fn test_all_slots_invoked() {
        let signal = Signal::<()>::new();
        let calls = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let calls_clone = calls.clone();
            signal.connect(move |_| {
                calls_clone.fetch_add(1, Ordering::SeqCst);
            });
        }

        assert_eq!(signal.connection_count(), 3);
        signal.emit(());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_disconnect_stops_delivery() {
        let signal = Signal::<()>::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let calls_clone = calls.clone();
        let id = signal.connect(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        signal.emit(());
        assert!(signal.disconnect(id));
        signal.emit(());

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        // Second disconnect of the same ID is a no-op.
        assert!(!signal.disconnect(id));
    }

    #[test]
    fn test_disconnect_all() {
        let signal = Signal::<()>::new();
        signal.connect(|_| {});
        signal.connect(|_| {});
        assert_eq!(signal.connection_count(), 2);

        signal.disconnect_all();
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_blocked_signal_skips_slots() {
        let signal = Signal::<()>::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let calls_clone = calls.clone();
        signal.connect(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        signal.set_blocked(true);
        assert!(signal.is_blocked());
        signal.emit(());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        signal.set_blocked(false);
        signal.emit(());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_slot_may_connect_during_emission() {
        let signal = Arc::new(Signal::<()>::new());

        let signal_clone = signal.clone();
        signal.connect(move |_| {
            signal_clone.connect(|_| {});
        });

        signal.emit(());
        assert_eq!(signal.connection_count(), 2);
    }

    #[test]
    fn test_slot_disconnecting_itself_sees_current_emission() {
        let signal = Arc::new(Signal::<()>::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let own_id = Arc::new(Mutex::new(None::<ConnectionId>));

        let signal_clone = signal.clone();
        let calls_clone = calls.clone();
        let own_id_clone = own_id.clone();
        let id = signal.connect(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            if let Some(id) = *own_id_clone.lock() {
                signal_clone.disconnect(id);
            }
        });
        *own_id.lock() = Some(id);

        signal.emit(());
        signal.emit(());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(signal.connection_count(), 0);
    }
}
