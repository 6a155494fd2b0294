//! Linux dialog backend using the XDG Desktop Portal.
//!
//! File sessions go through the FileChooser portal via ashpd. The desktop
//! offers no portal for modal message dialogs, so report sessions are
//! unavailable here.

use std::path::PathBuf;

use ashpd::desktop::ResponseError;
use ashpd::desktop::file_chooser::{FileFilter as PortalFileFilter, SelectedFiles};

use super::{FileBrowserMode, FileDialogRequest, FileFilter, HostReply, ReportRequest};
use crate::error::{DialogError, HostResult};

/// Check if the portal backend can run here.
///
/// A desktop session is the cheap proxy for a reachable portal service.
pub fn is_available() -> bool {
    std::env::var("XDG_CURRENT_DESKTOP").is_ok() || std::env::var("DESKTOP_SESSION").is_ok()
}

fn convert_filters(filters: &[FileFilter]) -> Vec<PortalFileFilter> {
    filters
        .iter()
        .map(|f| {
            let mut filter = PortalFileFilter::new(&f.name);
            for ext in &f.extensions {
                if ext != "*" {
                    filter = filter.glob(&format!("*.{}", ext));
                }
            }
            filter
        })
        .collect()
}

/// Run a file browsing session through the FileChooser portal.
///
/// The portal remembers its own starting location, so the request's initial
/// directory is not forwarded, and its open chooser only offers existing
/// entries, so the must-exist flag needs no plumbing. A session the user
/// dismissed comes back as a cancellation; a portal that cannot be reached
/// is a backend failure.
pub fn run_file(request: &FileDialogRequest) -> HostResult<HostReply> {
    if request.mode == FileBrowserMode::Save {
        save_session(request)
    } else {
        open_session(request)
    }
}

fn open_session(request: &FileDialogRequest) -> HostResult<HostReply> {
    let outcome: Result<Vec<PathBuf>, ashpd::Error> = pollster::block_on(async {
        let mut chooser = SelectedFiles::open_file();

        if let Some(caption) = &request.config.caption {
            chooser = chooser.title(caption.as_str());
        }

        chooser = chooser.modal(true);
        chooser = chooser.multiple(request.multiple);

        if request.mode == FileBrowserMode::SelectFolder {
            chooser = chooser.directory(true);
        } else {
            for filter in convert_filters(&request.filters) {
                chooser = chooser.filter(filter);
            }
        }

        let response = chooser.send().await?.response()?;
        let paths: Vec<PathBuf> = response
            .uris()
            .iter()
            .filter_map(|uri| uri.to_file_path().ok())
            .collect();
        Ok(paths)
    });

    match outcome {
        Ok(paths) if paths.is_empty() => Ok(HostReply::cancelled()),
        Ok(paths) => Ok(HostReply::accepted(paths)),
        Err(ashpd::Error::Response(ResponseError::Cancelled)) => Ok(HostReply::cancelled()),
        Err(err) => Err(DialogError::BackendUnavailable {
            reason: err.to_string(),
        }),
    }
}

fn save_session(request: &FileDialogRequest) -> HostResult<HostReply> {
    let outcome: Result<Vec<PathBuf>, ashpd::Error> = pollster::block_on(async {
        let mut chooser = SelectedFiles::save_file();

        if let Some(caption) = &request.config.caption {
            chooser = chooser.title(caption.as_str());
        }

        chooser = chooser.modal(true);

        if let Some(name) = &request.config.default_name {
            chooser = chooser.current_name(name.as_str());
        }

        for filter in convert_filters(&request.filters) {
            chooser = chooser.filter(filter);
        }

        let response = chooser.send().await?.response()?;
        let paths: Vec<PathBuf> = response
            .uris()
            .iter()
            .filter_map(|uri| uri.to_file_path().ok())
            .collect();
        Ok(paths)
    });

    match outcome {
        Ok(paths) if paths.is_empty() => Ok(HostReply::cancelled()),
        Ok(paths) => Ok(HostReply::accepted(paths)),
        Err(ashpd::Error::Response(ResponseError::Cancelled)) => Ok(HostReply::cancelled()),
        Err(err) => Err(DialogError::BackendUnavailable {
            reason: err.to_string(),
        }),
    }
}

/// Report sessions have no portal. The desktop offers notifications, but
/// nothing modal.
pub fn run_report(_request: &ReportRequest) -> HostResult<HostReply> {
    Err(DialogError::BackendUnavailable {
        reason: "no message dialog portal on this desktop".to_string(),
    })
}
