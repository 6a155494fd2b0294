//! macOS dialog backend using AppKit.
//!
//! File sessions run through `NSOpenPanel` and `NSSavePanel`, report
//! sessions through `NSAlert`. All of them need the main thread.

use std::path::PathBuf;

use objc2::MainThreadMarker;
use objc2_app_kit::{NSAlert, NSOpenPanel, NSSavePanel};
use objc2_foundation::NSString;

use super::{FileBrowserMode, FileDialogRequest, FileFilter, HostReply, ReportRequest};
use crate::enums::DialogResult;
use crate::error::{DialogError, HostResult};
use crate::platform::cocoa;

/// Check if the AppKit backend can run here.
pub fn is_available() -> bool {
    MainThreadMarker::new().is_some()
}

fn main_thread() -> HostResult<MainThreadMarker> {
    MainThreadMarker::new().ok_or_else(|| DialogError::BackendUnavailable {
        reason: "AppKit dialogs must run on the main thread".to_string(),
    })
}

/// Restrict the panel to the filters' extensions.
///
/// The wildcard extension means no restriction at all, so any filter carrying
/// it disables the limit entirely.
fn apply_filters(panel: &NSSavePanel, filters: &[FileFilter]) {
    if filters.is_empty() {
        return;
    }

    let mut extensions: Vec<String> = Vec::new();
    for filter in filters {
        for ext in &filter.extensions {
            if ext == "*" {
                return;
            }
            if !extensions.contains(ext) {
                extensions.push(ext.clone());
            }
        }
    }
    if extensions.is_empty() {
        return;
    }

    let ns_types: Vec<objc2::rc::Retained<NSString>> = extensions
        .iter()
        .map(|ext| NSString::from_str(ext))
        .collect();
    let ns_array = objc2_foundation::NSArray::from_retained_slice(&ns_types);

    // allowedFileTypes is deprecated in favor of contentTypes, which needs
    // UTType plumbing this path does not carry.
    #[allow(deprecated)]
    panel.setAllowedFileTypes(Some(&ns_array));
}

/// Run a file browsing session through the panel the mode asks for.
pub fn run_file(request: &FileDialogRequest) -> HostResult<HostReply> {
    let mtm = main_thread()?;
    if request.mode == FileBrowserMode::Save {
        save_session(request, mtm)
    } else {
        open_session(request, mtm)
    }
}

/// Open and folder sessions share `NSOpenPanel`.
///
/// The panel only ever offers existing entries, so the must-exist flag holds
/// without any setup.
fn open_session(request: &FileDialogRequest, mtm: MainThreadMarker) -> HostResult<HostReply> {
    let pick_directories = request.mode == FileBrowserMode::SelectFolder;

    let panel = NSOpenPanel::openPanel(mtm);
    panel.setCanChooseFiles(!pick_directories);
    panel.setCanChooseDirectories(pick_directories);
    panel.setAllowsMultipleSelection(request.multiple);

    if let Some(caption) = &request.config.caption {
        let ns_caption = NSString::from_str(caption);
        panel.setTitle(Some(&ns_caption));
    }

    if let Some(dir) = &request.config.initial_directory
        && let Some(dir_str) = dir.to_str()
    {
        let ns_path = NSString::from_str(dir_str);
        let url = objc2_foundation::NSURL::fileURLWithPath(&ns_path);
        panel.setDirectoryURL(Some(&url));
    }

    if !pick_directories {
        apply_filters(&panel, &request.filters);
    }

    let response = panel.runModal();
    if cocoa::dialog_result_from_native(response)? != DialogResult::Ok {
        return Ok(HostReply::cancelled());
    }

    let urls = panel.URLs();
    let mut paths = Vec::new();
    for url in urls {
        if let Some(path) = url.path() {
            paths.push(PathBuf::from(path.to_string()));
        }
    }
    if paths.is_empty() {
        return Ok(HostReply::cancelled());
    }
    Ok(HostReply::accepted(paths))
}

/// Save sessions run the plain `NSSavePanel`.
fn save_session(request: &FileDialogRequest, mtm: MainThreadMarker) -> HostResult<HostReply> {
    let panel = NSSavePanel::savePanel(mtm);

    if let Some(caption) = &request.config.caption {
        let ns_caption = NSString::from_str(caption);
        panel.setTitle(Some(&ns_caption));
    }

    if let Some(dir) = &request.config.initial_directory
        && let Some(dir_str) = dir.to_str()
    {
        let ns_path = NSString::from_str(dir_str);
        let url = objc2_foundation::NSURL::fileURLWithPath(&ns_path);
        panel.setDirectoryURL(Some(&url));
    }

    if let Some(name) = &request.config.default_name {
        panel.setNameFieldStringValue(&NSString::from_str(name));
    }

    apply_filters(&panel, &request.filters);

    let response = panel.runModal();
    if cocoa::dialog_result_from_native(response)? != DialogResult::Ok {
        return Ok(HostReply::cancelled());
    }

    if let Some(url) = panel.URL()
        && let Some(path) = url.path()
    {
        return Ok(HostReply::accepted(vec![PathBuf::from(path.to_string())]));
    }
    Ok(HostReply::cancelled())
}

/// Run a report session through `NSAlert`.
pub fn run_report(request: &ReportRequest) -> HostResult<HostReply> {
    let mtm = main_thread()?;

    let alert = NSAlert::new(mtm);

    // The bold message line carries the caption when there is one, with the
    // body beneath it; otherwise the body is the message line itself.
    if let Some(caption) = &request.config.caption {
        alert.setMessageText(&NSString::from_str(caption));
        alert.setInformativeText(&NSString::from_str(&request.body));
    } else {
        alert.setMessageText(&NSString::from_str(&request.body));
    }

    alert.setAlertStyle(cocoa::dialog_icon_to_native(request.icon));

    for label in request.buttons.labels() {
        let title = NSString::from_str(label);
        let _ = alert.addButtonWithTitle(&title);
    }

    let response = alert.runModal();
    let result = cocoa::alert_result_from_layout(response, request.buttons.layout())?;
    Ok(HostReply::resolved(result))
}
