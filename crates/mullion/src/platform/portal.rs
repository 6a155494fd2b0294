//! XDG desktop portal value conversions.
//!
//! Portal requests resolve with a numeric response code: 0 for success, 1
//! when the user cancelled, 2 when the interaction ended some other way
//! (session closed, portal backend gone). Portals carry no icon, window
//! state, or text concepts, so the result code is the whole table.

use crate::enums::DialogResult;
use crate::error::{DialogError, HostResult};

/// Converts a portal response code.
///
/// An interaction that ended without user input reports code 2 and counts as
/// a cancellation.
pub fn dialog_result_from_native(code: u32) -> HostResult<DialogResult> {
    match code {
        0 => Ok(DialogResult::Ok),
        1 | 2 => Ok(DialogResult::Cancel),
        other => Err(DialogError::UnsupportedPlatformValue {
            concept: "DialogResult",
            value: other as i64,
        }),
    }
}

/// Converts a dialog result to the response code a portal backend reports.
///
/// Yes folds into success and No into cancelled; `None` means the
/// interaction never produced input.
pub fn dialog_result_to_native(result: DialogResult) -> u32 {
    match result {
        DialogResult::Ok | DialogResult::Yes => 0,
        DialogResult::Cancel | DialogResult::No => 1,
        DialogResult::None => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_codes() {
        assert_eq!(dialog_result_from_native(0).unwrap(), DialogResult::Ok);
        assert_eq!(dialog_result_from_native(1).unwrap(), DialogResult::Cancel);
        assert_eq!(dialog_result_from_native(2).unwrap(), DialogResult::Cancel);
    }

    #[test]
    fn test_unknown_code_rejected() {
        let err = dialog_result_from_native(7).unwrap_err();
        assert!(matches!(
            err,
            DialogError::UnsupportedPlatformValue { value: 7, .. }
        ));
    }

    #[test]
    fn test_result_coercions() {
        assert_eq!(dialog_result_to_native(DialogResult::Ok), 0);
        assert_eq!(dialog_result_to_native(DialogResult::Yes), 0);
        assert_eq!(dialog_result_to_native(DialogResult::Cancel), 1);
        assert_eq!(dialog_result_to_native(DialogResult::No), 1);
        assert_eq!(dialog_result_to_native(DialogResult::None), 2);
    }

    #[test]
    fn test_success_survives_round_trip() {
        let code = dialog_result_to_native(DialogResult::Ok);
        assert_eq!(dialog_result_from_native(code).unwrap(), DialogResult::Ok);
    }
}
