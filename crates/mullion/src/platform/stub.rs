//! Conversions for the headless stub backend.
//!
//! The stub stores the shared enum values directly, so every conversion is
//! the identity. The functions exist so backend code reads the same against
//! every adapter module, and `from_native` keeps the fallible signature of
//! the real ones.

use crate::enums::{DialogIcon, DialogResult, TextWrapping, WindowState};
use crate::error::HostResult;

pub fn dialog_result_from_native(result: DialogResult) -> HostResult<DialogResult> {
    Ok(result)
}

pub fn dialog_result_to_native(result: DialogResult) -> DialogResult {
    result
}

pub fn dialog_icon_from_native(icon: DialogIcon) -> HostResult<DialogIcon> {
    Ok(icon)
}

pub fn dialog_icon_to_native(icon: DialogIcon) -> DialogIcon {
    icon
}

pub fn window_state_from_native(state: WindowState) -> HostResult<WindowState> {
    Ok(state)
}

pub fn window_state_to_native(state: WindowState) -> WindowState {
    state
}

pub fn text_wrapping_from_native(wrapping: TextWrapping) -> HostResult<TextWrapping> {
    Ok(wrapping)
}

pub fn text_wrapping_to_native(wrapping: TextWrapping) -> TextWrapping {
    wrapping
}
