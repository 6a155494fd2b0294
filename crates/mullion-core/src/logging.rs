//! Logging integration.
//!
//! Mullion instruments its subsystems with the `tracing` crate. Nothing is
//! printed unless the embedding application installs a subscriber:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!     // ... application code ...
//! }
//! ```
//!
//! Events are emitted under per-subsystem targets so directives like
//! `mullion_core::attached=trace` can turn a single subsystem up without
//! drowning in the rest. The [`targets`] constants name them.
//!
//! For a snapshot of the live handle hierarchy, see
//! [`crate::handle::SharedHandleRegistry::dump_tree`].

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Whole-crate target prefix.
    pub const CORE: &str = "mullion_core";
    /// Handle registry and hierarchy target.
    pub const HANDLE: &str = "mullion_core::handle";
    /// Attached value store and resolver target.
    pub const ATTACHED: &str = "mullion_core::attached";
    /// Property host and data-context target.
    pub const CONTEXT: &str = "mullion_core::context";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "mullion_core::signal";
    /// UI-thread dispatch queue target.
    pub const DISPATCH: &str = "mullion_core::dispatch";
}
