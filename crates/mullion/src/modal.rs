//! Bookkeeping for nested modal dialog sessions.
//!
//! Toolkits disagree about who owns modality: Win32 blocks in `MessageBoxW`,
//! AppKit in `runModal`, portals in a D-Bus round trip. The tracker records
//! which handles are currently holding a modal session so the rest of the
//! layer can answer "is input blocked" and "who blocks it" uniformly.
//! Sessions nest (a confirmation on top of a settings dialog), so this is a
//! stack: the newest session is the active one.

use mullion_core::NativeHandle;
use parking_lot::Mutex;

/// A stack of handles currently running modal sessions.
pub struct ModalTracker {
    stack: Mutex<Vec<NativeHandle>>,
}

impl ModalTracker {
    /// Creates an empty tracker.
    pub const fn new() -> Self {
        Self {
            stack: Mutex::new(Vec::new()),
        }
    }

    /// Records that `handle` entered a modal session.
    pub fn push(&self, handle: NativeHandle) {
        let mut stack = self.stack.lock();
        stack.push(handle);
        tracing::trace!(target: "mullion::modal", ?handle, depth = stack.len(), "modal session entered");
    }

    /// Records that the newest modal session ended.
    pub fn pop(&self) -> Option<NativeHandle> {
        let mut stack = self.stack.lock();
        let handle = stack.pop();
        if let Some(handle) = handle {
            tracing::trace!(target: "mullion::modal", ?handle, depth = stack.len(), "modal session left");
        }
        handle
    }

    /// The handle of the newest modal session, if any.
    pub fn active_modal(&self) -> Option<NativeHandle> {
        self.stack.lock().last().copied()
    }

    /// Whether any modal session is active.
    pub fn is_blocked(&self) -> bool {
        !self.stack.lock().is_empty()
    }

    /// Removes the newest occurrence of `handle` from the stack.
    ///
    /// The dialog runners use this instead of [`pop`](Self::pop) so a session
    /// only ever retires its own entry, whichever order sessions on other
    /// threads finish in.
    pub fn remove(&self, handle: NativeHandle) -> bool {
        let mut stack = self.stack.lock();
        if let Some(position) = stack.iter().rposition(|&entry| entry == handle) {
            stack.remove(position);
            tracing::trace!(target: "mullion::modal", ?handle, depth = stack.len(), "modal session left");
            true
        } else {
            false
        }
    }

    /// Whether `handle` is somewhere in the modal stack.
    pub fn contains(&self, handle: NativeHandle) -> bool {
        self.stack.lock().contains(&handle)
    }

    /// How many modal sessions are nested right now.
    pub fn modal_count(&self) -> usize {
        self.stack.lock().len()
    }

    /// Drops every recorded session.
    ///
    /// For teardown paths that abandon whatever was open; normal flow always
    /// pops what it pushed.
    pub fn clear(&self) {
        let mut stack = self.stack.lock();
        if !stack.is_empty() {
            tracing::trace!(target: "mullion::modal", dropped = stack.len(), "modal stack cleared");
        }
        stack.clear();
    }
}

impl Default for ModalTracker {
    fn default() -> Self {
        Self::new()
    }
}

static TRACKER: ModalTracker = ModalTracker::new();

/// The process-wide tracker used by the dialog runners.
pub fn modal_tracker() -> &'static ModalTracker {
    &TRACKER
}

#[cfg(test)]
mod tests {
    use super::*;
    use mullion_core::{HandleKind, HandleRegistry};

    // These run against private trackers; the process-wide one belongs to
    // whichever dialog test is mid-show.

    fn two_handles() -> (NativeHandle, NativeHandle) {
        let mut registry = HandleRegistry::new();
        (
            registry.register(HandleKind::Dialog),
            registry.register(HandleKind::Dialog),
        )
    }

    #[test]
    fn test_sessions_nest_lifo() {
        let tracker = ModalTracker::new();
        let (outer, inner) = two_handles();

        tracker.push(outer);
        tracker.push(inner);
        assert_eq!(tracker.active_modal(), Some(inner));
        assert_eq!(tracker.modal_count(), 2);

        assert_eq!(tracker.pop(), Some(inner));
        assert_eq!(tracker.active_modal(), Some(outer));
        assert_eq!(tracker.pop(), Some(outer));
        assert_eq!(tracker.pop(), None);
    }

    #[test]
    fn test_blocked_tracks_occupancy() {
        let tracker = ModalTracker::new();
        let (handle, _) = two_handles();

        assert!(!tracker.is_blocked());
        tracker.push(handle);
        assert!(tracker.is_blocked());
        assert!(tracker.contains(handle));
        tracker.pop();
        assert!(!tracker.is_blocked());
        assert!(!tracker.contains(handle));
    }

    #[test]
    fn test_remove_takes_newest_occurrence() {
        let tracker = ModalTracker::new();
        let (outer, inner) = two_handles();

        tracker.push(outer);
        tracker.push(inner);
        assert!(tracker.remove(outer));
        assert_eq!(tracker.active_modal(), Some(inner));
        assert!(!tracker.remove(outer));
        assert!(tracker.remove(inner));
        assert!(!tracker.is_blocked());
    }

    #[test]
    fn test_clear_empties_stack() {
        let tracker = ModalTracker::new();
        let (outer, inner) = two_handles();

        tracker.push(outer);
        tracker.push(inner);
        tracker.clear();
        assert_eq!(tracker.modal_count(), 0);
        assert_eq!(tracker.active_modal(), None);
    }
}
