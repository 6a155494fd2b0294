//! AppKit value conversions.
//!
//! Panels report `NSModalResponse` codes, alerts report button positions,
//! alert icons travel as `NSAlertStyle`, window state is the pair of
//! `isMiniaturized`/`isZoomed` flags, and text wrapping maps onto
//! `NSLineBreakMode`.

use objc2_app_kit::{
    NSAlertFirstButtonReturn, NSAlertStyle, NSLineBreakMode, NSModalResponse,
    NSModalResponseAbort, NSModalResponseCancel, NSModalResponseContinue, NSModalResponseOK,
    NSModalResponseStop,
};

use crate::enums::{DialogIcon, DialogResult, TextWrapping, WindowState};
use crate::error::{DialogError, HostResult};

// ============================================================================
// Dialog Result
// ============================================================================

/// Converts a panel's modal response.
///
/// A session torn down early (stop, abort, continue) counts as a
/// cancellation.
pub fn dialog_result_from_native(response: NSModalResponse) -> HostResult<DialogResult> {
    if response == NSModalResponseOK {
        Ok(DialogResult::Ok)
    } else if response == NSModalResponseCancel
        || response == NSModalResponseStop
        || response == NSModalResponseAbort
        || response == NSModalResponseContinue
    {
        Ok(DialogResult::Cancel)
    } else {
        Err(DialogError::UnsupportedPlatformValue {
            concept: "DialogResult",
            value: response as i64,
        })
    }
}

/// Converts a dialog result to the modal response a panel delegate reports.
///
/// Yes folds into OK and No into Cancel; AppKit panels only know the two.
/// `None` becomes an aborted session.
pub fn dialog_result_to_native(result: DialogResult) -> NSModalResponse {
    match result {
        DialogResult::Ok | DialogResult::Yes => NSModalResponseOK,
        DialogResult::Cancel | DialogResult::No => NSModalResponseCancel,
        DialogResult::None => NSModalResponseAbort,
    }
}

/// Maps an alert's modal response onto the result laid out for each button.
///
/// `NSAlert` reports which button was clicked by position, so the caller
/// passes the results of its buttons in the order they were added.
pub fn alert_result_from_layout(
    response: NSModalResponse,
    layout: &[DialogResult],
) -> HostResult<DialogResult> {
    let index = response - NSAlertFirstButtonReturn;
    if index >= 0 && (index as usize) < layout.len() {
        return Ok(layout[index as usize]);
    }
    Err(DialogError::UnsupportedPlatformValue {
        concept: "DialogResult",
        value: response as i64,
    })
}

// ============================================================================
// Dialog Icon
// ============================================================================

/// Converts an alert style to the icon it displays.
pub fn dialog_icon_from_native(style: NSAlertStyle) -> HostResult<DialogIcon> {
    match style {
        NSAlertStyle::Informational => Ok(DialogIcon::Information),
        NSAlertStyle::Warning => Ok(DialogIcon::Exclamation),
        NSAlertStyle::Critical => Ok(DialogIcon::Error),
        other => Err(DialogError::UnsupportedPlatformValue {
            concept: "DialogIcon",
            value: other.0 as i64,
        }),
    }
}

/// Converts an icon to the alert style that best matches it.
///
/// AppKit has no icon-less or question style, so both fold into the
/// informational one.
pub fn dialog_icon_to_native(icon: DialogIcon) -> NSAlertStyle {
    match icon {
        DialogIcon::None | DialogIcon::Question | DialogIcon::Information => {
            NSAlertStyle::Informational
        }
        DialogIcon::Exclamation => NSAlertStyle::Warning,
        DialogIcon::Error => NSAlertStyle::Critical,
    }
}

// ============================================================================
// Window State
// ============================================================================

/// Derives the window state from the `isMiniaturized`/`isZoomed` pair.
///
/// A window can be both at once (zoomed, then miniaturized); miniaturized
/// wins because that is what the user sees.
pub fn window_state_from_native(miniaturized: bool, zoomed: bool) -> WindowState {
    if miniaturized {
        WindowState::Minimized
    } else if zoomed {
        WindowState::Maximized
    } else {
        WindowState::Normal
    }
}

/// Converts a window state to the `(miniaturize, zoom)` pair to apply.
pub fn window_state_to_native(state: WindowState) -> (bool, bool) {
    match state {
        WindowState::Normal => (false, false),
        WindowState::Maximized => (false, true),
        WindowState::Minimized => (true, false),
    }
}

// ============================================================================
// Text Wrapping
// ============================================================================

/// Converts a line-break mode.
///
/// Per-character wrapping still breaks lines, so it folds into wrapping; the
/// truncating modes keep everything on one line, so they fold into no-wrap.
pub fn text_wrapping_from_native(mode: NSLineBreakMode) -> HostResult<TextWrapping> {
    match mode {
        NSLineBreakMode::ByWordWrapping | NSLineBreakMode::ByCharWrapping => Ok(TextWrapping::Wrap),
        NSLineBreakMode::ByClipping
        | NSLineBreakMode::ByTruncatingHead
        | NSLineBreakMode::ByTruncatingTail
        | NSLineBreakMode::ByTruncatingMiddle => Ok(TextWrapping::NoWrap),
        other => Err(DialogError::UnsupportedPlatformValue {
            concept: "TextWrapping",
            value: other.0 as i64,
        }),
    }
}

/// Converts a wrapping mode to its line-break equivalent.
///
/// AppKit has no overflow mode, so `WrapWithOverflow` becomes word wrapping.
pub fn text_wrapping_to_native(wrapping: TextWrapping) -> NSLineBreakMode {
    match wrapping {
        TextWrapping::NoWrap => NSLineBreakMode::ByClipping,
        TextWrapping::Wrap | TextWrapping::WrapWithOverflow => NSLineBreakMode::ByWordWrapping,
    }
}
