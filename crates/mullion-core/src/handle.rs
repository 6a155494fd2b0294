//! Native handle registry for Mullion.
//!
//! Provides the process-wide table of live native widget/window/dialog
//! handles with:
//! - Unique stable identifiers via arena-based storage
//! - Read-only parent links for upward value resolution, with cycle rejection
//! - Explicit containing-toplevel links where the embedding glue knows them
//! - A single process-wide default window slot used as the final lookup target
//! - Per-handle attached value storage (see [`crate::attached`])
//!
//! The registry does not own the native objects themselves; an entry is this
//! layer's record that a native object exists. Destroying an entry drops its
//! attached values and cascades to registered children, mirroring how the
//! native toolkits tear down widget subtrees.
//!
//! # Key Types
//!
//! - [`NativeHandle`] - Unique stable identifier for each native object
//! - [`HandleKind`] - Coarse classification used by toplevel resolution
//! - [`HandleRegistry`] - Central registry managing all handles
//! - [`SharedHandleRegistry`] - Thread-safe wrapper around [`HandleRegistry`]

use std::collections::HashMap;

use parking_lot::{Mutex, RwLock};
use slotmap::{SlotMap, new_key_type};

use crate::attached::AttachedValue;
use crate::error::{HandleError, HandleResult};

new_key_type! {
    /// A unique identifier for a native object in the registry.
    ///
    /// `NativeHandle`s are stable: they remain valid as the hierarchy is
    /// relinked and become permanently invalid when the entry is destroyed.
    /// A destroyed handle is never reused for a different native object, so
    /// operations on one fail with [`HandleError::StaleHandle`] instead of
    /// silently touching a stranger.
    pub struct NativeHandle;
}

impl NativeHandle {
    /// Convert the handle to a raw u64 value for interop with native glue.
    ///
    /// The raw value can be converted back using [`NativeHandle::from_raw`].
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }

    /// Create a handle from a raw u64 value.
    ///
    /// Returns `Some` if the raw value could be a valid handle. This does not
    /// check whether the handle is live in the registry.
    #[inline]
    pub fn from_raw(raw: u64) -> Option<Self> {
        let key_data = slotmap::KeyData::from_ffi(raw);
        Some(Self::from(key_data))
    }
}

/// Coarse classification of the native object behind a handle.
///
/// The resolver uses `Window` to recognize toplevels; everything else is
/// informational (debug output, menu conversion checks).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HandleKind {
    /// An ordinary widget or control.
    #[default]
    Widget,
    /// A toplevel window.
    Window,
    /// A modal dialog created by this layer.
    Dialog,
    /// A menu item.
    MenuItem,
}

/// Internal data stored in the registry for each native object.
pub(crate) struct HandleData {
    /// Human-readable label (native window title, menu item text).
    pub(crate) label: String,
    /// What kind of native object this is.
    pub(crate) kind: HandleKind,
    /// Parent in the widget hierarchy (if registered).
    pub(crate) parent: Option<NativeHandle>,
    /// Registered children (torn down together with this entry).
    pub(crate) children: Vec<NativeHandle>,
    /// Explicit containing-toplevel link, for branches whose intermediate
    /// parents are not registered but whose window is known to the glue.
    pub(crate) toplevel: Option<NativeHandle>,
    /// Attached named values (type-erased).
    pub(crate) attached: HashMap<String, AttachedValue>,
}

impl HandleData {
    fn new(kind: HandleKind) -> Self {
        Self {
            label: String::new(),
            kind,
            parent: None,
            children: Vec::new(),
            toplevel: None,
            attached: HashMap::new(),
        }
    }
}

/// The central registry that manages all native handles and their relationships.
///
/// Uses arena-based storage via SlotMap for stable handles and efficient
/// hierarchy bookkeeping.
///
/// # Related Types
///
/// - [`SharedHandleRegistry`] - Thread-safe wrapper for shared access
/// - [`NativeHandle`] - Keys into this registry
/// - [`global_registry`] - Access the singleton instance
pub struct HandleRegistry {
    pub(crate) entries: SlotMap<NativeHandle, HandleData>,
    /// The process-wide default window used as the final resolver target.
    default_window: Option<NativeHandle>,
}

impl HandleRegistry {
    /// Create a new empty handle registry.
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            default_window: None,
        }
    }

    /// Register a native object and return its handle.
    pub fn register(&mut self, kind: HandleKind) -> NativeHandle {
        let handle = self.entries.insert(HandleData::new(kind));
        tracing::trace!(target: "mullion_core::handle", ?handle, ?kind, "registered native object");
        handle
    }

    /// Remove an entry and all registered children from the registry.
    ///
    /// Attached values stored on the destroyed entries are dropped here, so
    /// no entry can outlive its handle. If the destroyed entry was the
    /// default window, the default-window slot is cleared.
    #[tracing::instrument(skip(self), target = "mullion_core::handle", level = "trace")]
    pub fn destroy(&mut self, handle: NativeHandle) -> HandleResult<()> {
        let descendants = self.collect_descendants(handle)?;
        tracing::trace!(target: "mullion_core::handle", ?handle, descendant_count = descendants.len(), "tearing down handle tree");

        // Unlink from the parent's child list.
        if let Some(data) = self.entries.get(handle) {
            if let Some(parent) = data.parent {
                if let Some(parent_data) = self.entries.get_mut(parent) {
                    parent_data.children.retain(|&child| child != handle);
                }
            }
        }

        // Children first, then self.
        for child in descendants {
            self.entries.remove(child);
        }
        self.entries.remove(handle);

        if self.default_window == Some(handle) {
            self.default_window = None;
        }

        Ok(())
    }

    /// Collect all descendant handles, children before parents.
    fn collect_descendants(&self, handle: NativeHandle) -> HandleResult<Vec<NativeHandle>> {
        let mut result = Vec::new();
        self.collect_descendants_recursive(handle, &mut result)?;
        Ok(result)
    }

    fn collect_descendants_recursive(
        &self,
        handle: NativeHandle,
        result: &mut Vec<NativeHandle>,
    ) -> HandleResult<()> {
        let data = self.entries.get(handle).ok_or(HandleError::StaleHandle)?;
        for &child in &data.children {
            self.collect_descendants_recursive(child, result)?;
            result.push(child);
        }
        Ok(())
    }

    /// Check whether a handle is live.
    pub fn contains(&self, handle: NativeHandle) -> bool {
        self.entries.contains_key(handle)
    }

    /// Set the parent of a handle.
    ///
    /// Passing `None` makes the handle a hierarchy root. Linking a handle
    /// under itself or one of its descendants fails with
    /// [`HandleError::CircularParentage`].
    pub fn set_parent(
        &mut self,
        handle: NativeHandle,
        new_parent: Option<NativeHandle>,
    ) -> HandleResult<()> {
        if !self.entries.contains_key(handle) {
            return Err(HandleError::StaleHandle);
        }

        if let Some(parent) = new_parent {
            if !self.entries.contains_key(parent) {
                return Err(HandleError::StaleHandle);
            }
            if self.is_ancestor_of(handle, parent)? {
                return Err(HandleError::CircularParentage);
            }
        }

        let old_parent = self.entries.get(handle).and_then(|d| d.parent);
        if let Some(old_parent) = old_parent {
            if let Some(parent_data) = self.entries.get_mut(old_parent) {
                parent_data.children.retain(|&child| child != handle);
            }
        }

        if let Some(data) = self.entries.get_mut(handle) {
            data.parent = new_parent;
        }

        if let Some(parent) = new_parent {
            if let Some(parent_data) = self.entries.get_mut(parent) {
                parent_data.children.push(handle);
            }
        }

        Ok(())
    }

    /// Check if `potential_ancestor` is an ancestor of `handle`.
    fn is_ancestor_of(
        &self,
        potential_ancestor: NativeHandle,
        handle: NativeHandle,
    ) -> HandleResult<bool> {
        let mut current = Some(handle);
        while let Some(current_handle) = current {
            if current_handle == potential_ancestor {
                return Ok(true);
            }
            current = self.entries.get(current_handle).and_then(|d| d.parent);
        }
        Ok(false)
    }

    /// Get the parent of a handle.
    pub fn parent(&self, handle: NativeHandle) -> HandleResult<Option<NativeHandle>> {
        self.entries
            .get(handle)
            .map(|d| d.parent)
            .ok_or(HandleError::StaleHandle)
    }

    /// Get the registered children of a handle.
    pub fn children(&self, handle: NativeHandle) -> HandleResult<&[NativeHandle]> {
        self.entries
            .get(handle)
            .map(|d| d.children.as_slice())
            .ok_or(HandleError::StaleHandle)
    }

    /// Get the handle's kind.
    pub fn kind(&self, handle: NativeHandle) -> HandleResult<HandleKind> {
        self.entries
            .get(handle)
            .map(|d| d.kind)
            .ok_or(HandleError::StaleHandle)
    }

    /// Get the handle's label.
    pub fn label(&self, handle: NativeHandle) -> HandleResult<&str> {
        self.entries
            .get(handle)
            .map(|d| d.label.as_str())
            .ok_or(HandleError::StaleHandle)
    }

    /// Set the handle's label (mirrors the native title/text).
    pub fn set_label(&mut self, handle: NativeHandle, label: String) -> HandleResult<()> {
        self.entries
            .get_mut(handle)
            .map(|d| d.label = label)
            .ok_or(HandleError::StaleHandle)
    }

    /// Record the toplevel window containing a handle.
    ///
    /// Used by embedding glue for branches whose intermediate parents are not
    /// registered; the resolver falls back to this link after the parent
    /// chain is exhausted.
    pub fn set_toplevel(
        &mut self,
        handle: NativeHandle,
        toplevel: Option<NativeHandle>,
    ) -> HandleResult<()> {
        if let Some(top) = toplevel {
            if !self.entries.contains_key(top) {
                return Err(HandleError::StaleHandle);
            }
        }
        self.entries
            .get_mut(handle)
            .map(|d| d.toplevel = toplevel)
            .ok_or(HandleError::StaleHandle)
    }

    /// Get the explicit toplevel link of a handle, if any.
    pub fn toplevel(&self, handle: NativeHandle) -> HandleResult<Option<NativeHandle>> {
        self.entries
            .get(handle)
            .map(|d| d.toplevel)
            .ok_or(HandleError::StaleHandle)
    }

    /// Find the toplevel window for a handle's branch.
    ///
    /// Walks the parent chain looking for the nearest explicit toplevel link;
    /// failing that, returns the chain's root if it is a window. The walk
    /// tolerates a cycle in the links by giving up after revisiting a node.
    pub fn toplevel_of(&self, handle: NativeHandle) -> HandleResult<Option<NativeHandle>> {
        if !self.entries.contains_key(handle) {
            return Err(HandleError::StaleHandle);
        }

        let mut visited = std::collections::HashSet::new();
        let mut current = Some(handle);
        let mut root = handle;

        while let Some(current_handle) = current {
            if !visited.insert(current_handle) {
                return Ok(None);
            }
            let Some(data) = self.entries.get(current_handle) else {
                break;
            };
            if let Some(top) = data.toplevel {
                if self.entries.contains_key(top) {
                    return Ok(Some(top));
                }
            }
            root = current_handle;
            current = data.parent;
        }

        let root_is_window = self
            .entries
            .get(root)
            .is_some_and(|d| d.kind == HandleKind::Window);
        Ok(root_is_window.then_some(root))
    }

    /// Register the process-wide default window.
    ///
    /// The resolver consults this handle exactly once, after both the parent
    /// chain and the toplevel are exhausted. Passing `None` clears the slot.
    pub fn set_default_window(&mut self, window: Option<NativeHandle>) -> HandleResult<()> {
        if let Some(handle) = window {
            if !self.entries.contains_key(handle) {
                return Err(HandleError::StaleHandle);
            }
        }
        tracing::debug!(target: "mullion_core::handle", ?window, "default window changed");
        self.default_window = window;
        Ok(())
    }

    /// Get the process-wide default window, if one is registered and live.
    pub fn default_window(&self) -> Option<NativeHandle> {
        self.default_window
            .filter(|&handle| self.entries.contains_key(handle))
    }

    /// Get all ancestors of a handle from immediate parent to root.
    pub fn ancestors(&self, handle: NativeHandle) -> HandleResult<Vec<NativeHandle>> {
        if !self.entries.contains_key(handle) {
            return Err(HandleError::StaleHandle);
        }

        let mut result = Vec::new();
        let mut visited = std::collections::HashSet::new();
        visited.insert(handle);
        let mut current = self.entries.get(handle).and_then(|d| d.parent);

        while let Some(current_handle) = current {
            if !visited.insert(current_handle) {
                break;
            }
            result.push(current_handle);
            current = self.entries.get(current_handle).and_then(|d| d.parent);
        }

        Ok(result)
    }

    /// Get the number of live handles.
    pub fn handle_count(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over all hierarchy roots (handles with no parent).
    pub fn roots(&self) -> impl Iterator<Item = NativeHandle> + '_ {
        self.entries
            .iter()
            .filter(|(_, data)| data.parent.is_none())
            .map(|(handle, _)| handle)
    }

    /// Debug dump of a handle subtree.
    pub fn dump_tree(&self, handle: NativeHandle) -> HandleResult<String> {
        let mut output = String::new();
        self.dump_tree_recursive(handle, 0, &mut output)?;
        Ok(output)
    }

    fn dump_tree_recursive(
        &self,
        handle: NativeHandle,
        depth: usize,
        output: &mut String,
    ) -> HandleResult<()> {
        let data = self.entries.get(handle).ok_or(HandleError::StaleHandle)?;
        let indent = "  ".repeat(depth);
        let label_display = if data.label.is_empty() {
            "(unlabeled)"
        } else {
            &data.label
        };
        output.push_str(&format!(
            "{}[{:?}] {} ({:?}, {} attached)\n",
            indent,
            handle,
            label_display,
            data.kind,
            data.attached.len()
        ));
        for &child in &data.children {
            self.dump_tree_recursive(child, depth + 1, output)?;
        }
        Ok(())
    }
}

impl Default for HandleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A thread-safe wrapper around [`HandleRegistry`].
///
/// Provides concurrent read access with exclusive write access via `RwLock`.
/// All mutation is expected from the UI thread (see [`crate::thread`]); the
/// lock exists so read-only diagnostics from other threads stay safe.
pub struct SharedHandleRegistry {
    inner: RwLock<HandleRegistry>,
}

impl SharedHandleRegistry {
    /// Create a new shared handle registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HandleRegistry::new()),
        }
    }

    /// Register a native object.
    pub fn register(&self, kind: HandleKind) -> NativeHandle {
        self.inner.write().register(kind)
    }

    /// Destroy an entry and its registered children.
    pub fn destroy(&self, handle: NativeHandle) -> HandleResult<()> {
        self.inner.write().destroy(handle)
    }

    /// Check whether a handle is live.
    pub fn contains(&self, handle: NativeHandle) -> bool {
        self.inner.read().contains(handle)
    }

    /// Set the parent of a handle.
    pub fn set_parent(
        &self,
        handle: NativeHandle,
        parent: Option<NativeHandle>,
    ) -> HandleResult<()> {
        self.inner.write().set_parent(handle, parent)
    }

    /// Get the parent of a handle.
    pub fn parent(&self, handle: NativeHandle) -> HandleResult<Option<NativeHandle>> {
        self.inner.read().parent(handle)
    }

    /// Get the registered children of a handle (owned for thread safety).
    pub fn children(&self, handle: NativeHandle) -> HandleResult<Vec<NativeHandle>> {
        self.inner.read().children(handle).map(|c| c.to_vec())
    }

    /// Get the handle's kind.
    pub fn kind(&self, handle: NativeHandle) -> HandleResult<HandleKind> {
        self.inner.read().kind(handle)
    }

    /// Get the handle's label.
    pub fn label(&self, handle: NativeHandle) -> HandleResult<String> {
        self.inner.read().label(handle).map(|s| s.to_string())
    }

    /// Set the handle's label.
    pub fn set_label(&self, handle: NativeHandle, label: String) -> HandleResult<()> {
        self.inner.write().set_label(handle, label)
    }

    /// Record the toplevel window containing a handle.
    pub fn set_toplevel(
        &self,
        handle: NativeHandle,
        toplevel: Option<NativeHandle>,
    ) -> HandleResult<()> {
        self.inner.write().set_toplevel(handle, toplevel)
    }

    /// Find the toplevel window for a handle's branch.
    pub fn toplevel_of(&self, handle: NativeHandle) -> HandleResult<Option<NativeHandle>> {
        self.inner.read().toplevel_of(handle)
    }

    /// Register the process-wide default window.
    pub fn set_default_window(&self, window: Option<NativeHandle>) -> HandleResult<()> {
        self.inner.write().set_default_window(window)
    }

    /// Get the process-wide default window, if registered and live.
    pub fn default_window(&self) -> Option<NativeHandle> {
        self.inner.read().default_window()
    }

    /// Get all ancestors of a handle from immediate parent to root.
    pub fn ancestors(&self, handle: NativeHandle) -> HandleResult<Vec<NativeHandle>> {
        self.inner.read().ancestors(handle)
    }

    /// Get the number of live handles.
    pub fn handle_count(&self) -> usize {
        self.inner.read().handle_count()
    }

    /// Get all hierarchy roots.
    pub fn roots(&self) -> Vec<NativeHandle> {
        self.inner.read().roots().collect()
    }

    /// Access the registry with a read lock for complex operations.
    pub fn with_read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&HandleRegistry) -> R,
    {
        f(&self.inner.read())
    }

    /// Access the registry with a write lock for complex operations.
    pub fn with_write<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut HandleRegistry) -> R,
    {
        f(&mut self.inner.write())
    }
}

impl Default for SharedHandleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static_assertions::assert_impl_all!(SharedHandleRegistry: Send, Sync);
static_assertions::assert_impl_all!(NativeHandle: Send, Sync, Copy);

/// Global handle registry (lazy initialized).
static GLOBAL_REGISTRY: Mutex<Option<SharedHandleRegistry>> = Mutex::new(None);

/// Initialize the global handle registry.
///
/// Called once by the embedding application at bootstrap; calling again is a
/// no-op.
pub fn init_global_registry() {
    let mut guard = GLOBAL_REGISTRY.lock();
    if guard.is_none() {
        *guard = Some(SharedHandleRegistry::new());
    }
}

/// Get a reference to the global handle registry.
///
/// Returns an error if the registry hasn't been initialized.
pub fn global_registry() -> HandleResult<&'static SharedHandleRegistry> {
    let guard = GLOBAL_REGISTRY.lock();
    match guard.as_ref() {
        // SAFETY: once initialized the registry is never replaced or dropped,
        // so a reference to it stays valid for the process lifetime.
        Some(registry) => Ok(unsafe { &*(registry as *const SharedHandleRegistry) }),
        None => Err(HandleError::RegistryNotInitialized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() {
        init_global_registry();
    }

    #[test]
    fn test_register_and_contains() {
        setup();
        let registry = global_registry().unwrap();
        let handle = registry.register(HandleKind::Widget);
        assert!(registry.contains(handle));
        assert_eq!(registry.kind(handle).unwrap(), HandleKind::Widget);
    }

    #[test]
    fn test_raw_round_trip() {
        setup();
        let registry = global_registry().unwrap();
        let handle = registry.register(HandleKind::Window);
        let raw = handle.as_raw();
        assert_eq!(NativeHandle::from_raw(raw), Some(handle));
    }

    #[test]
    fn test_label() {
        setup();
        let registry = global_registry().unwrap();
        let handle = registry.register(HandleKind::MenuItem);
        registry.set_label(handle, "Open…".to_string()).unwrap();
        assert_eq!(registry.label(handle).unwrap(), "Open…");
    }

    #[test]
    fn test_parent_child_links() {
        setup();
        let registry = global_registry().unwrap();
        let window = registry.register(HandleKind::Window);
        let widget = registry.register(HandleKind::Widget);

        registry.set_parent(widget, Some(window)).unwrap();

        assert_eq!(registry.parent(widget).unwrap(), Some(window));
        assert!(registry.children(window).unwrap().contains(&widget));
    }

    #[test]
    fn test_reparenting_moves_child_entry() {
        setup();
        let registry = global_registry().unwrap();
        let first = registry.register(HandleKind::Window);
        let second = registry.register(HandleKind::Window);
        let widget = registry.register(HandleKind::Widget);

        registry.set_parent(widget, Some(first)).unwrap();
        registry.set_parent(widget, Some(second)).unwrap();

        assert!(!registry.children(first).unwrap().contains(&widget));
        assert!(registry.children(second).unwrap().contains(&widget));
    }

    #[test]
    fn test_circular_parentage_rejected() {
        setup();
        let registry = global_registry().unwrap();
        let a = registry.register(HandleKind::Widget);
        let b = registry.register(HandleKind::Widget);

        registry.set_parent(b, Some(a)).unwrap();
        let result = registry.set_parent(a, Some(b));
        assert_eq!(result, Err(HandleError::CircularParentage));
    }

    #[test]
    fn test_cascade_destroy() {
        setup();
        let registry = global_registry().unwrap();
        let window = registry.register(HandleKind::Window);
        let panel = registry.register(HandleKind::Widget);
        let button = registry.register(HandleKind::Widget);

        registry.set_parent(panel, Some(window)).unwrap();
        registry.set_parent(button, Some(panel)).unwrap();

        registry.destroy(window).unwrap();

        assert!(!registry.contains(window));
        assert!(!registry.contains(panel));
        assert!(!registry.contains(button));
    }

    #[test]
    fn test_destroyed_handle_is_stale() {
        setup();
        let registry = global_registry().unwrap();
        let handle = registry.register(HandleKind::Widget);
        registry.destroy(handle).unwrap();

        assert!(!registry.contains(handle));
        assert_eq!(registry.parent(handle), Err(HandleError::StaleHandle));
        assert_eq!(registry.destroy(handle), Err(HandleError::StaleHandle));
    }

    #[test]
    fn test_ancestors_order() {
        setup();
        let registry = global_registry().unwrap();
        let window = registry.register(HandleKind::Window);
        let panel = registry.register(HandleKind::Widget);
        let button = registry.register(HandleKind::Widget);

        registry.set_parent(panel, Some(window)).unwrap();
        registry.set_parent(button, Some(panel)).unwrap();

        assert_eq!(registry.ancestors(button).unwrap(), vec![panel, window]);
    }

    #[test]
    fn test_toplevel_from_chain_root() {
        setup();
        let registry = global_registry().unwrap();
        let window = registry.register(HandleKind::Window);
        let widget = registry.register(HandleKind::Widget);
        registry.set_parent(widget, Some(window)).unwrap();

        assert_eq!(registry.toplevel_of(widget).unwrap(), Some(window));
    }

    #[test]
    fn test_toplevel_explicit_link_wins_over_root() {
        setup();
        let registry = global_registry().unwrap();
        let window = registry.register(HandleKind::Window);
        // Orphan branch: no registered parents, but the glue knows the window.
        let widget = registry.register(HandleKind::Widget);
        registry.set_toplevel(widget, Some(window)).unwrap();

        assert_eq!(registry.toplevel_of(widget).unwrap(), Some(window));
    }

    #[test]
    fn test_toplevel_none_for_orphan_widget() {
        setup();
        let registry = global_registry().unwrap();
        let widget = registry.register(HandleKind::Widget);
        assert_eq!(registry.toplevel_of(widget).unwrap(), None);
    }

    // Default-window tests use a private registry; the setting is
    // process-wide state on the shared one.
    #[test]
    fn test_default_window_cleared_on_destroy() {
        let mut registry = HandleRegistry::new();
        let window = registry.register(HandleKind::Window);
        registry.set_default_window(Some(window)).unwrap();
        assert_eq!(registry.default_window(), Some(window));

        registry.destroy(window).unwrap();
        assert_eq!(registry.default_window(), None);
    }

    #[test]
    fn test_default_window_rejects_stale_handle() {
        let mut registry = HandleRegistry::new();
        let window = registry.register(HandleKind::Window);
        registry.destroy(window).unwrap();
        assert_eq!(
            registry.set_default_window(Some(window)),
            Err(HandleError::StaleHandle)
        );
    }

    #[test]
    fn test_dump_tree() {
        setup();
        let registry = global_registry().unwrap();
        let window = registry.register(HandleKind::Window);
        let widget = registry.register(HandleKind::Widget);
        registry.set_label(window, "Main".to_string()).unwrap();
        registry.set_parent(widget, Some(window)).unwrap();

        let dump = registry.with_read(|r| r.dump_tree(window)).unwrap();
        assert!(dump.contains("Main"));
        assert!(dump.contains("(unlabeled)"));
    }
}
