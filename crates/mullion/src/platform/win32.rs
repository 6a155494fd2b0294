//! Win32 value conversions.
//!
//! Message boxes report results as `MESSAGEBOX_RESULT`, icons travel as style
//! bits inside `MESSAGEBOX_STYLE`, window states come from
//! `GetWindowPlacement` as `SHOW_WINDOW_CMD`, and text wrapping maps onto
//! DirectWrite's word-wrapping modes.

use windows::Win32::Graphics::DirectWrite::{
    DWRITE_WORD_WRAPPING, DWRITE_WORD_WRAPPING_CHARACTER, DWRITE_WORD_WRAPPING_EMERGENCY_BREAK,
    DWRITE_WORD_WRAPPING_NO_WRAP, DWRITE_WORD_WRAPPING_WHOLE_WORD, DWRITE_WORD_WRAPPING_WRAP,
};
use windows::Win32::UI::WindowsAndMessaging::{
    IDABORT, IDCANCEL, IDCONTINUE, IDIGNORE, IDNO, IDOK, IDRETRY, IDTRYAGAIN, IDYES,
    MB_ICONERROR, MB_ICONEXCLAMATION, MB_ICONINFORMATION, MB_ICONQUESTION, MESSAGEBOX_RESULT,
    MESSAGEBOX_STYLE, SHOW_WINDOW_CMD, SW_FORCEMINIMIZE, SW_MINIMIZE, SW_RESTORE,
    SW_SHOWDEFAULT, SW_SHOWMAXIMIZED, SW_SHOWMINIMIZED, SW_SHOWMINNOACTIVE, SW_SHOWNORMAL,
};

use crate::enums::{DialogIcon, DialogResult, TextWrapping, WindowState};
use crate::error::{DialogError, HostResult};

/// Mask selecting the icon bits of a `MESSAGEBOX_STYLE`.
const MB_ICONMASK: u32 = 0xF0;

// ============================================================================
// Dialog Result
// ============================================================================

/// Converts a `MessageBoxW` return value.
///
/// Abort maps to Cancel, Ignore to No, and the Retry family to OK, so every
/// button a native caller can add still lands on one of the shared outcomes.
/// A zero value means the call itself failed and no result exists.
pub fn dialog_result_from_native(raw: MESSAGEBOX_RESULT) -> HostResult<DialogResult> {
    match raw {
        MESSAGEBOX_RESULT(0) => Ok(DialogResult::None),
        IDOK => Ok(DialogResult::Ok),
        IDCANCEL => Ok(DialogResult::Cancel),
        IDYES => Ok(DialogResult::Yes),
        IDNO => Ok(DialogResult::No),
        IDABORT => Ok(DialogResult::Cancel),
        IDIGNORE => Ok(DialogResult::No),
        IDRETRY | IDTRYAGAIN | IDCONTINUE => Ok(DialogResult::Ok),
        other => Err(DialogError::UnsupportedPlatformValue {
            concept: "DialogResult",
            value: other.0 as i64,
        }),
    }
}

/// Converts a dialog result to the `MESSAGEBOX_RESULT` a native caller expects.
pub fn dialog_result_to_native(result: DialogResult) -> MESSAGEBOX_RESULT {
    match result {
        DialogResult::None => MESSAGEBOX_RESULT(0),
        DialogResult::Ok => IDOK,
        DialogResult::Yes => IDYES,
        DialogResult::No => IDNO,
        DialogResult::Cancel => IDCANCEL,
    }
}

// ============================================================================
// Dialog Icon
// ============================================================================

/// Extracts the icon from the icon bits of a message box style.
pub fn dialog_icon_from_native(style: MESSAGEBOX_STYLE) -> HostResult<DialogIcon> {
    match MESSAGEBOX_STYLE(style.0 & MB_ICONMASK) {
        MESSAGEBOX_STYLE(0) => Ok(DialogIcon::None),
        MB_ICONQUESTION => Ok(DialogIcon::Question),
        MB_ICONINFORMATION => Ok(DialogIcon::Information),
        MB_ICONEXCLAMATION => Ok(DialogIcon::Exclamation),
        MB_ICONERROR => Ok(DialogIcon::Error),
        other => Err(DialogError::UnsupportedPlatformValue {
            concept: "DialogIcon",
            value: other.0 as i64,
        }),
    }
}

/// Converts an icon to message box style bits, OR-able with button flags.
pub fn dialog_icon_to_native(icon: DialogIcon) -> MESSAGEBOX_STYLE {
    match icon {
        DialogIcon::None => MESSAGEBOX_STYLE(0),
        DialogIcon::Question => MB_ICONQUESTION,
        DialogIcon::Information => MB_ICONINFORMATION,
        DialogIcon::Exclamation => MB_ICONEXCLAMATION,
        DialogIcon::Error => MB_ICONERROR,
    }
}

// ============================================================================
// Window State
// ============================================================================

/// Converts a `GetWindowPlacement` show command.
///
/// The restore and minimize aliases fold into the state they end at. Commands
/// that only describe activation (`SW_SHOW`, `SW_HIDE`, ...) carry no state
/// and are rejected.
pub fn window_state_from_native(cmd: SHOW_WINDOW_CMD) -> HostResult<WindowState> {
    match cmd {
        SW_SHOWNORMAL | SW_RESTORE | SW_SHOWDEFAULT => Ok(WindowState::Normal),
        SW_SHOWMAXIMIZED => Ok(WindowState::Maximized),
        SW_SHOWMINIMIZED | SW_MINIMIZE | SW_SHOWMINNOACTIVE | SW_FORCEMINIMIZE => {
            Ok(WindowState::Minimized)
        }
        other => Err(DialogError::UnsupportedPlatformValue {
            concept: "WindowState",
            value: other.0 as i64,
        }),
    }
}

/// Converts a window state to the show command for `ShowWindow`.
pub fn window_state_to_native(state: WindowState) -> SHOW_WINDOW_CMD {
    match state {
        WindowState::Normal => SW_SHOWNORMAL,
        WindowState::Maximized => SW_SHOWMAXIMIZED,
        WindowState::Minimized => SW_SHOWMINIMIZED,
    }
}

// ============================================================================
// Text Wrapping
// ============================================================================

/// Converts a DirectWrite word-wrapping mode.
///
/// Emergency-break and per-character wrapping both break lines, so they fold
/// into plain wrapping.
pub fn text_wrapping_from_native(mode: DWRITE_WORD_WRAPPING) -> HostResult<TextWrapping> {
    match mode {
        DWRITE_WORD_WRAPPING_WRAP => Ok(TextWrapping::Wrap),
        DWRITE_WORD_WRAPPING_NO_WRAP => Ok(TextWrapping::NoWrap),
        DWRITE_WORD_WRAPPING_WHOLE_WORD => Ok(TextWrapping::WrapWithOverflow),
        DWRITE_WORD_WRAPPING_EMERGENCY_BREAK | DWRITE_WORD_WRAPPING_CHARACTER => {
            Ok(TextWrapping::Wrap)
        }
        other => Err(DialogError::UnsupportedPlatformValue {
            concept: "TextWrapping",
            value: other.0 as i64,
        }),
    }
}

/// Converts a wrapping mode to its DirectWrite equivalent.
///
/// `WrapWithOverflow` becomes whole-word wrapping, which keeps overlong words
/// intact and lets them overflow the layout box.
pub fn text_wrapping_to_native(wrapping: TextWrapping) -> DWRITE_WORD_WRAPPING {
    match wrapping {
        TextWrapping::NoWrap => DWRITE_WORD_WRAPPING_NO_WRAP,
        TextWrapping::Wrap => DWRITE_WORD_WRAPPING_WRAP,
        TextWrapping::WrapWithOverflow => DWRITE_WORD_WRAPPING_WHOLE_WORD,
    }
}
