//! Native resource lifetime for dialog sessions.
//!
//! A dialog session owns up to three layers of native state: the dialog
//! window, the controller object driving it, and the outlet references the
//! controller holds into the window's widget tree. Teardown order is fixed:
//! outlets, then controller, then window. The window's final release is
//! policy-controlled because one toolkit releases the window once more on
//! its own when the controller goes away; releasing it ourselves as well
//! crashes, so on that platform the handle is left registered instead.

use std::sync::Once;

use mullion_core::{HandleKind, NativeHandle, global_registry};

use crate::error::HostResult;

// ============================================================================
// Release Policy
// ============================================================================

/// How a dialog window handle is released when the session is disposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReleasePolicy {
    /// Destroy the window handle with everything else.
    #[default]
    Full,
    /// Tear down outlets and controller but leave the window handle
    /// registered for the life of the process.
    SkipFinalRelease,
}

impl ReleasePolicy {
    /// The policy matching the platform's native release behavior.
    ///
    /// macOS skips the final release; everywhere else releases fully.
    pub fn platform_default() -> Self {
        if cfg!(target_os = "macos") {
            Self::SkipFinalRelease
        } else {
            Self::Full
        }
    }
}

// ============================================================================
// Dialog Lifecycle
// ============================================================================

static LEAK_NOTICE: Once = Once::new();

/// Owns the registry entries backing one dialog session.
///
/// Acquired when a dialog is first shown and disposed either explicitly or
/// on drop. Dispose is idempotent; only the first call tears anything down.
#[derive(Debug)]
pub struct DialogLifecycle {
    window: NativeHandle,
    controller: NativeHandle,
    outlets: Vec<NativeHandle>,
    policy: ReleasePolicy,
    disposed: bool,
}

impl DialogLifecycle {
    /// Registers the window and controller entries for a new session.
    pub fn acquire(policy: ReleasePolicy) -> HostResult<Self> {
        let registry = global_registry()?;
        let window = registry.register(HandleKind::Dialog);
        let controller = registry.register(HandleKind::Widget);
        registry.set_parent(controller, Some(window))?;
        tracing::trace!(
            target: "mullion::lifecycle",
            ?window,
            ?controller,
            ?policy,
            "dialog session acquired"
        );
        Ok(Self {
            window,
            controller,
            outlets: Vec::new(),
            policy,
            disposed: false,
        })
    }

    /// The dialog window handle.
    pub fn window(&self) -> NativeHandle {
        self.window
    }

    /// The controller handle, parented under the window.
    pub fn controller(&self) -> NativeHandle {
        self.controller
    }

    /// Registers a widget the controller references and tracks it as an
    /// outlet to clear on dispose.
    pub fn register_outlet(&mut self, kind: HandleKind) -> HostResult<NativeHandle> {
        let registry = global_registry()?;
        let outlet = registry.register(kind);
        registry.set_parent(outlet, Some(self.controller))?;
        self.outlets.push(outlet);
        Ok(outlet)
    }

    /// The outlets registered so far.
    pub fn outlets(&self) -> &[NativeHandle] {
        &self.outlets
    }

    /// Whether this session has already been torn down.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Tears the session down: outlets, then controller, then the window
    /// according to the release policy.
    ///
    /// Calling this a second time does nothing and reports success.
    pub fn dispose(&mut self) -> HostResult<()> {
        if self.disposed {
            return Ok(());
        }
        self.disposed = true;

        let registry = global_registry()?;
        for outlet in self.outlets.drain(..).rev() {
            // Already gone when the controller cascade beat us to it.
            let _ = registry.destroy(outlet);
        }
        let _ = registry.destroy(self.controller);

        match self.policy {
            ReleasePolicy::Full => {
                let _ = registry.destroy(self.window);
            }
            ReleasePolicy::SkipFinalRelease => {
                LEAK_NOTICE.call_once(|| {
                    tracing::info!(
                        target: "mullion::lifecycle",
                        window = ?self.window,
                        "final window release skipped; dialog window handles stay registered on this platform"
                    );
                });
            }
        }
        tracing::trace!(target: "mullion::lifecycle", window = ?self.window, "dialog session disposed");
        Ok(())
    }
}

impl Drop for DialogLifecycle {
    fn drop(&mut self) {
        let _ = self.dispose();
    }
}
