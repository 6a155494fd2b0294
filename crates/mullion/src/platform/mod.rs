//! Conversions between the toolkit-neutral enums and their native values.
//!
//! Each backend gets one submodule with free functions named
//! `<type>_from_native` and `<type>_to_native`. The `to_native` direction is
//! total: every abstract value picks a documented native value, substituting
//! the closest match where the toolkit has no exact one. The `from_native`
//! direction coerces documented near-miss values and returns
//! [`DialogError::UnsupportedPlatformValue`](crate::DialogError::UnsupportedPlatformValue)
//! for anything outside the table.
//!
//! Code above this layer never touches a native constant directly.

#[cfg(target_os = "windows")]
pub mod win32;

#[cfg(target_os = "macos")]
pub mod cocoa;

#[cfg(target_os = "linux")]
pub mod portal;

pub mod stub;
