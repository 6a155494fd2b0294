//! Windows dialog backend using the Win32 API.
//!
//! File sessions run through the Common Item Dialog (`IFileOpenDialog` and
//! `IFileSaveDialog`), report sessions through `MessageBoxW`.

use std::path::PathBuf;

use windows::{
    Win32::Foundation::*, Win32::System::Com::*, Win32::UI::Shell::Common::*,
    Win32::UI::Shell::*, Win32::UI::WindowsAndMessaging::*, core::*,
};

use super::{FileBrowserMode, FileDialogRequest, HostReply, ReportButtons, ReportRequest};
use crate::enums::DialogResult;
use crate::error::{DialogError, HostResult};
use crate::platform::win32;

/// Check if the native backend can run here.
pub fn is_available() -> bool {
    // Common dialogs ship with the OS
    true
}

/// Run a file browsing session through the Common Item Dialog.
pub fn run_file(request: &FileDialogRequest) -> HostResult<HostReply> {
    let outcome = if request.mode == FileBrowserMode::Save {
        save_session(request)
    } else {
        open_session(request)
    };
    outcome.map_err(|err| DialogError::BackendUnavailable {
        reason: err.to_string(),
    })
}

fn open_session(request: &FileDialogRequest) -> Result<HostReply> {
    unsafe {
        let _ = CoInitializeEx(None, COINIT_APARTMENTTHREADED | COINIT_DISABLE_OLE1DDE);

        let dialog: IFileOpenDialog =
            CoCreateInstance(&FileOpenDialog, None, CLSCTX_INPROC_SERVER)?;

        let pick_folders = request.mode == FileBrowserMode::SelectFolder;
        let mut opts = dialog.GetOptions()?;
        opts |= FOS_FORCEFILESYSTEM;
        if request.must_exist {
            opts |= FOS_FILEMUSTEXIST;
        }
        if request.multiple {
            opts |= FOS_ALLOWMULTISELECT;
        }
        if pick_folders {
            opts |= FOS_PICKFOLDERS;
        }
        dialog.SetOptions(opts)?;

        if let Some(caption) = &request.config.caption {
            let wide: Vec<u16> = caption.encode_utf16().chain(std::iter::once(0)).collect();
            dialog.SetTitle(PCWSTR(wide.as_ptr()))?;
        }

        if let Some(dir) = &request.config.initial_directory
            && let Some(dir_str) = dir.to_str()
        {
            let wide: Vec<u16> = dir_str.encode_utf16().chain(std::iter::once(0)).collect();
            if let Ok(folder) =
                SHCreateItemFromParsingName::<_, IShellItem>(PCWSTR(wide.as_ptr()), None)
            {
                let _ = dialog.SetFolder(&folder);
            }
        }

        // The dialog reads the filter strings during Show, so the backing
        // buffers must outlive it.
        let filter_data: Vec<(Vec<u16>, Vec<u16>)> = request
            .filters
            .iter()
            .map(|f| {
                let name: Vec<u16> = f.name.encode_utf16().chain(std::iter::once(0)).collect();
                let spec: Vec<u16> = f
                    .pattern()
                    .encode_utf16()
                    .chain(std::iter::once(0))
                    .collect();
                (name, spec)
            })
            .collect();
        if !filter_data.is_empty() && !pick_folders {
            let filter_specs: Vec<COMDLG_FILTERSPEC> = filter_data
                .iter()
                .map(|(name, spec)| COMDLG_FILTERSPEC {
                    pszName: PCWSTR(name.as_ptr()),
                    pszSpec: PCWSTR(spec.as_ptr()),
                })
                .collect();
            let _ = dialog.SetFileTypes(&filter_specs);
        }

        match dialog.Show(HWND::default()) {
            Ok(()) => {}
            Err(err) if err.code() == ERROR_CANCELLED.to_hresult() => {
                return Ok(HostReply::cancelled());
            }
            Err(err) => return Err(err),
        }

        let mut paths = Vec::new();
        if request.multiple {
            let results = dialog.GetResults()?;
            let count = results.GetCount()?;
            for i in 0..count {
                if let Ok(item) = results.GetItemAt(i)
                    && let Ok(path) = item.GetDisplayName(SIGDN_FILESYSPATH)
                    && let Ok(path_str) = path.to_string()
                {
                    paths.push(PathBuf::from(path_str));
                }
            }
        } else {
            let item = dialog.GetResult()?;
            if let Ok(path) = item.GetDisplayName(SIGDN_FILESYSPATH)
                && let Ok(path_str) = path.to_string()
            {
                paths.push(PathBuf::from(path_str));
            }
        }

        if paths.is_empty() {
            return Ok(HostReply::cancelled());
        }
        Ok(HostReply::accepted(paths))
    }
}

fn save_session(request: &FileDialogRequest) -> Result<HostReply> {
    unsafe {
        let _ = CoInitializeEx(None, COINIT_APARTMENTTHREADED | COINIT_DISABLE_OLE1DDE);

        let dialog: IFileSaveDialog =
            CoCreateInstance(&FileSaveDialog, None, CLSCTX_INPROC_SERVER)?;

        let mut opts = dialog.GetOptions()?;
        opts |= FOS_FORCEFILESYSTEM | FOS_OVERWRITEPROMPT;
        dialog.SetOptions(opts)?;

        if let Some(caption) = &request.config.caption {
            let wide: Vec<u16> = caption.encode_utf16().chain(std::iter::once(0)).collect();
            dialog.SetTitle(PCWSTR(wide.as_ptr()))?;
        }

        if let Some(dir) = &request.config.initial_directory
            && let Some(dir_str) = dir.to_str()
        {
            let wide: Vec<u16> = dir_str.encode_utf16().chain(std::iter::once(0)).collect();
            if let Ok(folder) =
                SHCreateItemFromParsingName::<_, IShellItem>(PCWSTR(wide.as_ptr()), None)
            {
                let _ = dialog.SetFolder(&folder);
            }
        }

        if let Some(name) = &request.config.default_name {
            let wide: Vec<u16> = name.encode_utf16().chain(std::iter::once(0)).collect();
            dialog.SetFileName(PCWSTR(wide.as_ptr()))?;
        }

        // The dialog reads the filter strings during Show, so the backing
        // buffers must outlive it.
        let filter_data: Vec<(Vec<u16>, Vec<u16>)> = request
            .filters
            .iter()
            .map(|f| {
                let name: Vec<u16> = f.name.encode_utf16().chain(std::iter::once(0)).collect();
                let spec: Vec<u16> = f
                    .pattern()
                    .encode_utf16()
                    .chain(std::iter::once(0))
                    .collect();
                (name, spec)
            })
            .collect();
        if !filter_data.is_empty() {
            let filter_specs: Vec<COMDLG_FILTERSPEC> = filter_data
                .iter()
                .map(|(name, spec)| COMDLG_FILTERSPEC {
                    pszName: PCWSTR(name.as_ptr()),
                    pszSpec: PCWSTR(spec.as_ptr()),
                })
                .collect();
            let _ = dialog.SetFileTypes(&filter_specs);
        }

        match dialog.Show(HWND::default()) {
            Ok(()) => {}
            Err(err) if err.code() == ERROR_CANCELLED.to_hresult() => {
                return Ok(HostReply::cancelled());
            }
            Err(err) => return Err(err),
        }

        let item = dialog.GetResult()?;
        if let Ok(path) = item.GetDisplayName(SIGDN_FILESYSPATH)
            && let Ok(path_str) = path.to_string()
        {
            return Ok(HostReply::accepted(vec![PathBuf::from(path_str)]));
        }
        Ok(HostReply::cancelled())
    }
}

/// Run a report session through `MessageBoxW`.
pub fn run_report(request: &ReportRequest) -> HostResult<HostReply> {
    let caption_wide: Vec<u16> = request
        .config
        .caption
        .as_deref()
        .unwrap_or("Message")
        .encode_utf16()
        .chain(std::iter::once(0))
        .collect();
    let body_wide: Vec<u16> = request
        .body
        .encode_utf16()
        .chain(std::iter::once(0))
        .collect();

    let icon_flag = win32::dialog_icon_to_native(request.icon);
    let button_flag = match request.buttons {
        ReportButtons::Ok => MB_OK,
        ReportButtons::OkCancel => MB_OKCANCEL,
        ReportButtons::YesNo => MB_YESNO,
        ReportButtons::YesNoCancel => MB_YESNOCANCEL,
    };

    let raw = unsafe {
        MessageBoxW(
            HWND::default(),
            PCWSTR(body_wide.as_ptr()),
            PCWSTR(caption_wide.as_ptr()),
            icon_flag | button_flag,
        )
    };

    match win32::dialog_result_from_native(raw)? {
        // MessageBoxW reports zero when it could not be shown at all.
        DialogResult::None => Err(DialogError::BackendUnavailable {
            reason: "MessageBoxW could not be shown".to_string(),
        }),
        result => Ok(HostReply::resolved(result)),
    }
}
