//! Menu item wrapper over a registry handle.
//!
//! Some toolkits hand out real menu item objects, some only opaque ids. This
//! type papers over both: it is a copyable value wrapping the registry handle
//! of the native item, with an empty state for "no item" slots (separators
//! that were never realized, templates not yet attached to a menu).

use mullion_core::{HandleError, HandleKind, NativeHandle, global_registry};

use crate::error::{DialogError, HostResult};

/// A native menu item by identity.
///
/// Two values compare equal when they wrap the same native item. The wrapper
/// itself holds no data; the label lives in the handle registry next to the
/// native object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OsMenuItem {
    handle: Option<NativeHandle>,
}

impl OsMenuItem {
    /// An item with no backing native object.
    pub fn empty() -> Self {
        Self { handle: None }
    }

    /// Wraps the native menu item behind `handle`.
    ///
    /// Fails with a stale-handle error when the handle is dead, and rejects
    /// live handles of any other kind; a window or widget handle never
    /// becomes a menu item.
    pub fn from_native(handle: NativeHandle) -> HostResult<Self> {
        let kind = global_registry()?.kind(handle)?;
        if kind != HandleKind::MenuItem {
            return Err(DialogError::UnsupportedPlatformValue {
                concept: "OsMenuItem",
                value: handle.as_raw() as i64,
            });
        }
        Ok(Self {
            handle: Some(handle),
        })
    }

    /// The wrapped handle, or `None` for an empty item.
    pub fn to_native(self) -> Option<NativeHandle> {
        self.handle
    }

    /// Whether this item has no backing native object.
    pub fn is_empty(self) -> bool {
        self.handle.is_none()
    }

    /// The item's display text.
    pub fn label(self) -> HostResult<String> {
        match self.handle {
            Some(handle) => Ok(global_registry()?.label(handle)?),
            None => Err(HandleError::StaleHandle.into()),
        }
    }

    /// Replaces the item's display text.
    pub fn set_label(self, label: impl Into<String>) -> HostResult<()> {
        match self.handle {
            Some(handle) => {
                global_registry()?.set_label(handle, label.into())?;
                Ok(())
            }
            None => Err(HandleError::StaleHandle.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mullion_core::init_global_registry;

    #[test]
    fn test_from_native_round_trips() {
        init_global_registry();
        let registry = global_registry().unwrap();
        let handle = registry.register(HandleKind::MenuItem);

        let item = OsMenuItem::from_native(handle).unwrap();
        assert_eq!(item.to_native(), Some(handle));
        assert!(!item.is_empty());

        registry.destroy(handle).unwrap();
    }

    #[test]
    fn test_empty_item() {
        assert_eq!(OsMenuItem::empty().to_native(), None);
        assert!(OsMenuItem::empty().is_empty());
        assert_eq!(OsMenuItem::empty(), OsMenuItem::default());
    }

    #[test]
    fn test_wrong_kind_rejected() {
        init_global_registry();
        let registry = global_registry().unwrap();
        let window = registry.register(HandleKind::Window);

        let err = OsMenuItem::from_native(window).unwrap_err();
        assert!(matches!(
            err,
            DialogError::UnsupportedPlatformValue {
                concept: "OsMenuItem",
                ..
            }
        ));

        registry.destroy(window).unwrap();
    }

    #[test]
    fn test_stale_handle_rejected() {
        init_global_registry();
        let registry = global_registry().unwrap();
        let handle = registry.register(HandleKind::MenuItem);
        registry.destroy(handle).unwrap();

        let err = OsMenuItem::from_native(handle).unwrap_err();
        assert!(matches!(err, DialogError::Handle(HandleError::StaleHandle)));
    }

    #[test]
    fn test_identity_equality() {
        init_global_registry();
        let registry = global_registry().unwrap();
        let a = registry.register(HandleKind::MenuItem);
        let b = registry.register(HandleKind::MenuItem);

        let first = OsMenuItem::from_native(a).unwrap();
        let again = OsMenuItem::from_native(a).unwrap();
        let other = OsMenuItem::from_native(b).unwrap();
        assert_eq!(first, again);
        assert_ne!(first, other);
        assert_ne!(first, OsMenuItem::empty());

        registry.destroy(a).unwrap();
        registry.destroy(b).unwrap();
    }

    #[test]
    fn test_label_round_trip() {
        init_global_registry();
        let registry = global_registry().unwrap();
        let handle = registry.register(HandleKind::MenuItem);

        let item = OsMenuItem::from_native(handle).unwrap();
        item.set_label("Save As...").unwrap();
        assert_eq!(item.label().unwrap(), "Save As...");

        registry.destroy(handle).unwrap();
    }

    #[test]
    fn test_empty_item_has_no_label() {
        assert!(OsMenuItem::empty().label().is_err());
        assert!(OsMenuItem::empty().set_label("x").is_err());
    }
}
