//! Error types for dialog and platform-adapter operations.

use mullion_core::HandleError;
use thiserror::Error;

/// Errors that can occur while configuring or running dialogs.
#[derive(Error, Debug)]
pub enum DialogError {
    /// The dialog was already shown; a dialog instance runs at most once.
    #[error("dialog was already shown")]
    AlreadyShown,

    /// A result was already recorded for this dialog session.
    #[error("dialog result was already resolved")]
    AlreadyResolved,

    /// The dialog's native resources have been released.
    #[error("dialog has been disposed")]
    Disposed,

    /// No native dialog backend can service the request.
    #[error("native dialog backend unavailable: {reason}")]
    BackendUnavailable { reason: String },

    /// A native value fell outside the documented conversion table.
    #[error("native value {value} has no {concept} equivalent")]
    UnsupportedPlatformValue { concept: &'static str, value: i64 },

    /// The underlying handle registry rejected an operation.
    #[error("handle registry error: {0}")]
    Handle(#[from] HandleError),
}

/// Result type for dialog host operations.
pub type HostResult<T> = Result<T, DialogError>;
