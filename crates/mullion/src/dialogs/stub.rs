//! Stub backend for platforms without native dialog support.
//!
//! Every session fails as unavailable, so callers can substitute their own
//! [`DialogHost`](super::DialogHost) or skip the dialog entirely.

use super::{FileDialogRequest, HostReply, ReportRequest};
use crate::error::{DialogError, HostResult};

/// Native dialogs are not available on this platform.
pub fn is_available() -> bool {
    false
}

/// Not available on this platform.
pub fn run_file(_request: &FileDialogRequest) -> HostResult<HostReply> {
    Err(DialogError::BackendUnavailable {
        reason: "no native dialog backend on this platform".to_string(),
    })
}

/// Not available on this platform.
pub fn run_report(_request: &ReportRequest) -> HostResult<HostReply> {
    Err(DialogError::BackendUnavailable {
        reason: "no native dialog backend on this platform".to_string(),
    })
}
