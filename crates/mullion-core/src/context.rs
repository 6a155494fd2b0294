//! The property-host contract: `DataContext` plus named values.
//!
//! Widget wrappers across the three backends share one capability surface
//! for attaching data to native objects: get/set a named value, and get/set
//! the `DataContext`, the conventional slot for the view-model driving a
//! widget. [`PropertyHost`] is that surface; [`HostBase`] is the concrete
//! core a wrapper embeds to get it.
//!
//! `DataContext` is stored under a reserved key in the same table as every
//! other attached value, but it is deliberately not inherited: reading it
//! consults the widget's own record only, never the hierarchy walk. A
//! wrapper that wants inherited lookup for its own keys uses
//! [`PropertyHost::resolve`].
//!
//! Setting the `DataContext` always raises one change notification per
//! call, even when the new value is reference-equal to the old one.
//! Subscribers use the redundant notification to rebuild derived state, so
//! it must never be suppressed.
//!
//! ```
//! use std::sync::Arc;
//! use mullion_core::{AttachedValue, HandleKind, HostBase, PropertyHost, init_global_registry};
//!
//! init_global_registry();
//! let host = HostBase::new(HandleKind::Widget);
//!
//! let model: AttachedValue = Arc::new("session".to_string());
//! host.set_data_context(Some(model.clone())).unwrap();
//!
//! let current = host.data_context().unwrap().unwrap();
//! assert!(Arc::ptr_eq(&current, &model));
//! ```

use crate::attached::{AttachedValue, ResolvedValue};
use crate::error::{HandleError, HandleResult};
use crate::handle::{HandleKind, NativeHandle, global_registry};
use crate::signal::Signal;

/// The reserved attached-value key backing `DataContext`.
///
/// The named-value methods of [`PropertyHost`] refuse this key; use
/// [`PropertyHost::data_context`] and [`PropertyHost::set_data_context`]
/// instead, which add the change-notification contract.
pub const DATA_CONTEXT_KEY: &str = "mullion.data-context";

/// Payload of a data-context change notification.
#[derive(Clone)]
pub struct DataContextChange {
    /// The widget whose context changed.
    pub handle: NativeHandle,
    /// The newly stored value, `None` when the context was cleared.
    pub value: Option<AttachedValue>,
}

impl std::fmt::Debug for DataContextChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataContextChange")
            .field("handle", &self.handle)
            .field("has_value", &self.value.is_some())
            .finish()
    }
}

/// Capability surface shared by every widget wrapper that can carry
/// attached data.
///
/// Implementors supply [`handle`](Self::handle); everything else has a
/// default implementation over the global handle registry. A wrapper that
/// supports change notification additionally overrides
/// [`data_context_changed`](Self::data_context_changed).
pub trait PropertyHost {
    /// The native handle this host wraps.
    fn handle(&self) -> NativeHandle;

    /// The change-notification signal, for hosts that have one.
    fn data_context_changed(&self) -> Option<&Signal<DataContextChange>> {
        None
    }

    /// Read a named value set on this host itself. No hierarchy walk.
    fn value(&self, key: &str) -> HandleResult<Option<AttachedValue>> {
        reject_reserved(key)?;
        global_registry()?.try_get_value(self.handle(), key)
    }

    /// Store or overwrite a named value on this host.
    fn set_value(&self, key: &str, value: AttachedValue) -> HandleResult<()> {
        reject_reserved(key)?;
        global_registry()?.set_value(self.handle(), key, value)
    }

    /// Remove a named value from this host, returning it if present.
    fn clear_value(&self, key: &str) -> HandleResult<Option<AttachedValue>> {
        reject_reserved(key)?;
        global_registry()?.clear_value(self.handle(), key)
    }

    /// Find the nearest value for `key` via the inherited lookup walk.
    fn resolve(&self, key: &str) -> HandleResult<Option<ResolvedValue>> {
        reject_reserved(key)?;
        global_registry()?.resolve_value(self.handle(), key)
    }

    /// Read this host's `DataContext`. Not inherited; only a value set on
    /// this host is returned.
    fn data_context(&self) -> HandleResult<Option<AttachedValue>> {
        global_registry()?.try_get_value(self.handle(), DATA_CONTEXT_KEY)
    }

    /// Store (or with `None`, clear) this host's `DataContext`.
    ///
    /// Raises exactly one change notification per successful call, even
    /// when the new value is reference-equal to the current one. A failed
    /// call (torn-down handle) raises none.
    fn set_data_context(&self, value: Option<AttachedValue>) -> HandleResult<()> {
        let registry = global_registry()?;
        let handle = self.handle();
        match &value {
            Some(next) => registry.set_value(handle, DATA_CONTEXT_KEY, next.clone())?,
            None => {
                registry.clear_value(handle, DATA_CONTEXT_KEY)?;
            }
        }
        tracing::trace!(
            target: "mullion_core::context",
            ?handle,
            has_value = value.is_some(),
            "data context set"
        );
        if let Some(signal) = self.data_context_changed() {
            signal.emit(DataContextChange { handle, value });
        }
        Ok(())
    }
}

fn reject_reserved(key: &str) -> HandleResult<()> {
    if key == DATA_CONTEXT_KEY {
        tracing::error!(target: "mullion_core::context", key, "reserved key used as named value");
        return Err(HandleError::ReservedKey);
    }
    Ok(())
}

/// Concrete property-host core for widget wrappers.
///
/// Registers a fresh handle on construction and tears it down on drop.
/// Platform wrapper types embed one of these and forward
/// [`PropertyHost::handle`] to it.
pub struct HostBase {
    handle: NativeHandle,
    /// Emitted once per `set_data_context` call.
    pub data_context_changed: Signal<DataContextChange>,
}

impl HostBase {
    /// Create a host backed by a newly registered handle of `kind`.
    ///
    /// # Panics
    ///
    /// Panics if the global handle registry has not been initialized.
    pub fn new(kind: HandleKind) -> Self {
        let registry = global_registry().expect("Handle registry not initialized");
        Self {
            handle: registry.register(kind),
            data_context_changed: Signal::new(),
        }
    }

    /// The native handle this host wraps.
    pub fn handle(&self) -> NativeHandle {
        self.handle
    }
}

impl PropertyHost for HostBase {
    fn handle(&self) -> NativeHandle {
        self.handle
    }

    fn data_context_changed(&self) -> Option<&Signal<DataContextChange>> {
        Some(&self.data_context_changed)
    }
}

impl Drop for HostBase {
    fn drop(&mut self) {
        if let Ok(registry) = global_registry() {
            // Already gone when a parent cascade got here first.
            let _ = registry.destroy(self.handle);
        }
    }
}

impl std::fmt::Debug for HostBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostBase")
            .field("handle", &self.handle)
            .field("listeners", &self.data_context_changed.connection_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::init_global_registry;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    fn setup() {
        init_global_registry();
    }

    fn arc_str(s: &str) -> AttachedValue {
        Arc::new(s.to_string())
    }

    #[test]
    fn test_data_context_round_trip() {
        setup();
        let host = HostBase::new(HandleKind::Widget);
        let model = arc_str("view-model");

        host.set_data_context(Some(model.clone())).unwrap();

        let current = host.data_context().unwrap().unwrap();
        assert!(Arc::ptr_eq(&current, &model));
    }

    #[test]
    fn test_data_context_is_not_inherited() {
        setup();
        let registry = global_registry().unwrap();
        let parent = HostBase::new(HandleKind::Window);
        let child = HostBase::new(HandleKind::Widget);
        registry
            .set_parent(child.handle(), Some(parent.handle()))
            .unwrap();

        parent.set_data_context(Some(arc_str("outer"))).unwrap();

        assert!(child.data_context().unwrap().is_none());
    }

    #[test]
    fn test_double_set_fires_two_notifications() {
        setup();
        let host = HostBase::new(HandleKind::Widget);
        let notifications = Arc::new(AtomicUsize::new(0));

        let notifications_clone = notifications.clone();
        host.data_context_changed.connect(move |_| {
            notifications_clone.fetch_add(1, Ordering::SeqCst);
        });

        let model = arc_str("same");
        host.set_data_context(Some(model.clone())).unwrap();
        host.set_data_context(Some(model)).unwrap();

        // A redundant set still notifies; subscribers rebuild from it.
        assert_eq!(notifications.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_clear_notifies_with_none() {
        setup();
        let host = HostBase::new(HandleKind::Widget);
        let notifications = Arc::new(AtomicUsize::new(0));
        let last_was_cleared = Arc::new(AtomicBool::new(false));

        let notifications_clone = notifications.clone();
        let cleared_clone = last_was_cleared.clone();
        host.data_context_changed.connect(move |change| {
            notifications_clone.fetch_add(1, Ordering::SeqCst);
            cleared_clone.store(change.value.is_none(), Ordering::SeqCst);
        });

        host.set_data_context(Some(arc_str("model"))).unwrap();
        host.set_data_context(None).unwrap();

        assert_eq!(notifications.load(Ordering::SeqCst), 2);
        assert!(last_was_cleared.load(Ordering::SeqCst));
        assert!(host.data_context().unwrap().is_none());
    }

    #[test]
    fn test_named_values_reject_reserved_key() {
        setup();
        let host = HostBase::new(HandleKind::Widget);

        assert_eq!(
            host.set_value(DATA_CONTEXT_KEY, arc_str("v")),
            Err(HandleError::ReservedKey)
        );
        assert_eq!(
            host.value(DATA_CONTEXT_KEY).map(|_| ()),
            Err(HandleError::ReservedKey)
        );
        assert_eq!(
            host.clear_value(DATA_CONTEXT_KEY).map(|_| ()),
            Err(HandleError::ReservedKey)
        );
        assert_eq!(
            host.resolve(DATA_CONTEXT_KEY).map(|_| ()),
            Err(HandleError::ReservedKey)
        );
    }

    #[test]
    fn test_named_value_round_trip() {
        setup();
        let host = HostBase::new(HandleKind::Widget);
        host.set_value("zoom", Arc::new(2.0f64)).unwrap();

        let value = host.value("zoom").unwrap().unwrap();
        assert_eq!(value.downcast_ref::<f64>(), Some(&2.0));

        host.clear_value("zoom").unwrap();
        assert!(host.value("zoom").unwrap().is_none());
    }

    #[test]
    fn test_resolve_walks_to_parent_host() {
        setup();
        let registry = global_registry().unwrap();
        let parent = HostBase::new(HandleKind::Window);
        let child = HostBase::new(HandleKind::Widget);
        registry
            .set_parent(child.handle(), Some(parent.handle()))
            .unwrap();

        parent.set_value("theme", arc_str("dark")).unwrap();

        let resolved = child.resolve("theme").unwrap().unwrap();
        assert_eq!(resolved.owner, parent.handle());
    }

    #[test]
    fn test_drop_releases_handle() {
        setup();
        let registry = global_registry().unwrap();
        let handle = {
            let host = HostBase::new(HandleKind::Widget);
            host.handle()
        };
        assert!(!registry.contains(handle));
    }

    #[test]
    fn test_set_on_torn_down_handle_fails_without_notification() {
        setup();
        let registry = global_registry().unwrap();
        let host = HostBase::new(HandleKind::Widget);
        let notifications = Arc::new(AtomicUsize::new(0));

        let notifications_clone = notifications.clone();
        host.data_context_changed.connect(move |_| {
            notifications_clone.fetch_add(1, Ordering::SeqCst);
        });

        registry.destroy(host.handle()).unwrap();

        assert_eq!(
            host.set_data_context(Some(arc_str("late"))),
            Err(HandleError::StaleHandle)
        );
        assert_eq!(notifications.load(Ordering::SeqCst), 0);
    }
}
