//! Core systems for Mullion.
//!
//! This crate provides the platform-independent half of the Mullion
//! abstraction layer:
//!
//! - **Handle Registry**: opaque handles for native widgets, windows and
//!   dialogs, with parent/child links and cascade teardown
//! - **Attached Values**: named values hung on handles the native toolkits
//!   cannot store themselves, with inherited lookup up the hierarchy
//! - **Property Host**: the `DataContext` / named-value capability surface
//!   widget wrappers implement
//! - **Signal/Slot System**: type-safe change notifications
//! - **UI Thread & Dispatch**: thread-affinity checks and a queue for
//!   marshaling work onto the UI thread
//!
//! The platform-facing half (dialogs, enum adapters, lifecycle sequencing)
//! lives in the `mullion` crate.
//!
//! # Attached Value Example
//!
//! ```
//! use std::sync::Arc;
//! use mullion_core::{HandleKind, global_registry, init_global_registry};
//!
//! init_global_registry();
//! let registry = global_registry()?;
//!
//! // The glue registers what it knows about the native tree.
//! let window = registry.register(HandleKind::Window);
//! let button = registry.register(HandleKind::Widget);
//! registry.set_parent(button, Some(window))?;
//!
//! // A value set on the window is found from the nested widget.
//! registry.set_value(window, "accent", Arc::new("teal".to_string()))?;
//! let resolved = registry.resolve_value(button, "accent")?.unwrap();
//! assert_eq!(resolved.owner, window);
//! # Ok::<(), mullion_core::HandleError>(())
//! ```
//!
//! # Dispatch Example
//!
//! ```
//! use mullion_core::dispatcher;
//!
//! // A worker thread hands results to the UI side.
//! dispatcher().post(|| {
//!     // ... touch native state here ...
//! });
//!
//! // The platform glue drains the queue from its event pump.
//! dispatcher().process_pending();
//! ```

pub mod attached;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod handle;
pub mod logging;
pub mod signal;
pub mod thread;

pub use attached::{AttachedValue, ResolvedValue};
pub use context::{DATA_CONTEXT_KEY, DataContextChange, HostBase, PropertyHost};
pub use dispatch::{
    CompletionHandle, CompletionWaiter, QueuedCall, UiDispatcher, completion_pair, dispatcher,
};
pub use error::{HandleError, HandleResult};
pub use handle::{
    HandleKind, HandleRegistry, NativeHandle, SharedHandleRegistry, global_registry,
    init_global_registry,
};
pub use signal::{ConnectionId, Signal};
pub use thread::{is_ui_thread, mark_ui_thread, ui_thread_id};
