//! Attached value storage and inherited lookup.
//!
//! Native toolkits on two of our three targets have no attached-property
//! concept: there is nowhere on a native widget to hang a named value.
//! This module emulates it with a side table embedded in each handle's
//! registry record.
//!
//! Two access paths exist:
//!
//! - [`HandleRegistry::set_value`] / [`HandleRegistry::try_get_value`] — exact,
//!   scoped to the one handle, no hierarchy involvement.
//! - [`HandleRegistry::resolve_value`] — inherited lookup that walks the parent
//!   chain, then the branch's toplevel window, then the process-wide default
//!   window exactly once. This is how a deeply nested child widget finds a
//!   value that was only ever set on its window.
//!
//! Values are `Arc<dyn Any + Send + Sync>`, so reference identity is
//! preserved across store and retrieval:
//!
//! ```
//! use std::sync::Arc;
//! use mullion_core::{AttachedValue, HandleKind, global_registry, init_global_registry};
//!
//! init_global_registry();
//! let registry = global_registry().unwrap();
//! let widget = registry.register(HandleKind::Widget);
//!
//! let value: AttachedValue = Arc::new("browse-path".to_string());
//! registry.set_value(widget, "role", value.clone()).unwrap();
//!
//! let fetched = registry.try_get_value(widget, "role").unwrap().unwrap();
//! assert!(Arc::ptr_eq(&fetched, &value));
//! assert_eq!(fetched.downcast_ref::<String>().unwrap(), "browse-path");
//! ```

use std::any::Any;
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{HandleError, HandleResult};
use crate::handle::{HandleRegistry, NativeHandle, SharedHandleRegistry};

/// A type-erased value attached to a native handle.
///
/// `Arc` rather than `Box` so a stored value can be handed back out while the
/// table keeps its entry, and so callers can observe reference identity with
/// [`Arc::ptr_eq`].
pub type AttachedValue = Arc<dyn Any + Send + Sync>;

/// A value found by [`HandleRegistry::resolve_value`], together with the
/// handle it was actually stored on.
///
/// The owner is never a different handle than the one the walk stopped at;
/// sibling widgets cannot observe each other's entries.
#[derive(Clone)]
pub struct ResolvedValue {
    /// The stored value.
    pub value: AttachedValue,
    /// The handle the value was stored on.
    pub owner: NativeHandle,
}

impl std::fmt::Debug for ResolvedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedValue")
            .field("owner", &self.owner)
            .finish_non_exhaustive()
    }
}

impl HandleRegistry {
    /// Store or overwrite a value scoped exactly to `handle`.
    ///
    /// Fails with [`HandleError::StaleHandle`] if the handle has been torn
    /// down; storing onto a dead handle is a caller defect, not a no-op.
    pub fn set_value(
        &mut self,
        handle: NativeHandle,
        key: impl Into<String>,
        value: AttachedValue,
    ) -> HandleResult<()> {
        let Some(data) = self.entries.get_mut(handle) else {
            tracing::error!(target: "mullion_core::attached", ?handle, "set_value on torn-down handle");
            return Err(HandleError::StaleHandle);
        };
        let key = key.into();
        tracing::trace!(target: "mullion_core::attached", ?handle, key = %key, "attached value set");
        data.attached.insert(key, value);
        Ok(())
    }

    /// Retrieve a value set on `handle` itself. No hierarchy walk.
    ///
    /// `Ok(None)` means the live handle has no entry for `key`; that is a
    /// normal outcome, not a failure. A torn-down handle is an error.
    pub fn try_get_value(
        &self,
        handle: NativeHandle,
        key: &str,
    ) -> HandleResult<Option<AttachedValue>> {
        let Some(data) = self.entries.get(handle) else {
            tracing::error!(target: "mullion_core::attached", ?handle, "try_get_value on torn-down handle");
            return Err(HandleError::StaleHandle);
        };
        Ok(data.attached.get(key).cloned())
    }

    /// Remove a value from `handle`, returning it if present.
    pub fn clear_value(
        &mut self,
        handle: NativeHandle,
        key: &str,
    ) -> HandleResult<Option<AttachedValue>> {
        let data = self.entries.get_mut(handle).ok_or(HandleError::StaleHandle)?;
        Ok(data.attached.remove(key))
    }

    /// Get all attached key names on a handle.
    pub fn attached_keys(&self, handle: NativeHandle) -> HandleResult<Vec<&str>> {
        let data = self.entries.get(handle).ok_or(HandleError::StaleHandle)?;
        Ok(data.attached.keys().map(|s| s.as_str()).collect())
    }

    /// Find the nearest value for `key`, walking outward from `handle`.
    ///
    /// Search order: `handle`, its parent chain to the root, the toplevel
    /// window containing the original branch, then the process-wide default
    /// window — the last two each consulted at most once, and only if the
    /// walk did not already visit them. The nearest owner wins; an explicit
    /// toplevel beats the default window.
    ///
    /// The visited set guarantees termination even if the parent links have
    /// been misconfigured into a cycle; such a walk simply reports not-found.
    #[tracing::instrument(skip(self), target = "mullion_core::attached", level = "trace")]
    pub fn resolve_value(
        &self,
        handle: NativeHandle,
        key: &str,
    ) -> HandleResult<Option<ResolvedValue>> {
        if !self.entries.contains_key(handle) {
            tracing::error!(target: "mullion_core::attached", ?handle, "resolve_value on torn-down handle");
            return Err(HandleError::StaleHandle);
        }

        let mut visited = HashSet::new();

        // Parent chain, nearest first.
        let mut current = Some(handle);
        while let Some(current_handle) = current {
            if !visited.insert(current_handle) {
                tracing::warn!(target: "mullion_core::attached", ?current_handle, "cycle in hierarchy links during resolve");
                break;
            }
            let Some(data) = self.entries.get(current_handle) else {
                break;
            };
            if let Some(value) = data.attached.get(key) {
                return Ok(Some(ResolvedValue {
                    value: value.clone(),
                    owner: current_handle,
                }));
            }
            current = data.parent;
        }

        // Toplevel window of the original branch.
        if let Some(top) = self.toplevel_of(handle)? {
            if visited.insert(top) {
                if let Some(value) = self.entries.get(top).and_then(|d| d.attached.get(key)) {
                    return Ok(Some(ResolvedValue {
                        value: value.clone(),
                        owner: top,
                    }));
                }
            }
        }

        // Process-wide default window, exactly one extra hop.
        if let Some(fallback) = self.default_window() {
            if visited.insert(fallback) {
                if let Some(value) = self.entries.get(fallback).and_then(|d| d.attached.get(key)) {
                    return Ok(Some(ResolvedValue {
                        value: value.clone(),
                        owner: fallback,
                    }));
                }
            }
        }

        Ok(None)
    }
}

impl SharedHandleRegistry {
    /// Store or overwrite a value scoped exactly to `handle`.
    pub fn set_value(
        &self,
        handle: NativeHandle,
        key: impl Into<String>,
        value: AttachedValue,
    ) -> HandleResult<()> {
        self.with_write(|r| r.set_value(handle, key, value))
    }

    /// Retrieve a value set on `handle` itself. No hierarchy walk.
    pub fn try_get_value(
        &self,
        handle: NativeHandle,
        key: &str,
    ) -> HandleResult<Option<AttachedValue>> {
        self.with_read(|r| r.try_get_value(handle, key))
    }

    /// Remove a value from `handle`, returning it if present.
    pub fn clear_value(
        &self,
        handle: NativeHandle,
        key: &str,
    ) -> HandleResult<Option<AttachedValue>> {
        self.with_write(|r| r.clear_value(handle, key))
    }

    /// Get all attached key names on a handle.
    pub fn attached_keys(&self, handle: NativeHandle) -> HandleResult<Vec<String>> {
        self.with_read(|r| {
            r.attached_keys(handle)
                .map(|keys| keys.into_iter().map(String::from).collect())
        })
    }

    /// Find the nearest value for `key`, walking outward from `handle`.
    pub fn resolve_value(
        &self,
        handle: NativeHandle,
        key: &str,
    ) -> HandleResult<Option<ResolvedValue>> {
        self.with_read(|r| r.resolve_value(handle, key))
    }
}
