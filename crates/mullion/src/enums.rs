//! Toolkit-neutral enumerations shared by the dialog and window contracts.
//!
//! Every enum here has a native counterpart on each platform backend. The
//! conversions live in [`crate::platform`]; code above that layer only ever
//! sees these types.

// ============================================================================
// Dialog Result
// ============================================================================

/// Outcome of a modal dialog session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogResult {
    /// The dialog has not produced a result yet, or was dismissed without one.
    #[default]
    None,
    /// OK was clicked.
    Ok,
    /// Yes was clicked.
    Yes,
    /// No was clicked.
    No,
    /// Cancel was clicked or the dialog was closed.
    Cancel,
}

impl DialogResult {
    /// Whether the user confirmed the dialog (OK or Yes).
    pub fn is_affirmative(self) -> bool {
        matches!(self, Self::Ok | Self::Yes)
    }
}

// ============================================================================
// Dialog Icon
// ============================================================================

/// Icon displayed alongside a report dialog's message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogIcon {
    /// No icon.
    #[default]
    None,
    /// Question mark icon.
    Question,
    /// Informational icon.
    Information,
    /// Warning icon.
    Exclamation,
    /// Error icon.
    Error,
}

// ============================================================================
// Window State
// ============================================================================

/// Visual state of a top-level window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowState {
    /// Window is shown at its normal size and position.
    #[default]
    Normal,
    /// Window fills the working area of its screen.
    Maximized,
    /// Window is collapsed to the taskbar or dock.
    Minimized,
}

// ============================================================================
// Text Wrapping
// ============================================================================

/// Line-breaking behavior for text blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextWrapping {
    /// Text stays on one line and is clipped at the edge.
    #[default]
    NoWrap,
    /// Text breaks at word boundaries, splitting words that are too long.
    Wrap,
    /// Text breaks at word boundaries but lets overlong words overflow.
    WrapWithOverflow,
}

impl TextWrapping {
    /// Whether this mode breaks text onto multiple lines at all.
    pub fn wraps(self) -> bool {
        !matches!(self, Self::NoWrap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialog_result_affirmative() {
        assert!(DialogResult::Ok.is_affirmative());
        assert!(DialogResult::Yes.is_affirmative());
        assert!(!DialogResult::No.is_affirmative());
        assert!(!DialogResult::Cancel.is_affirmative());
        assert!(!DialogResult::None.is_affirmative());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(DialogResult::default(), DialogResult::None);
        assert_eq!(DialogIcon::default(), DialogIcon::None);
        assert_eq!(WindowState::default(), WindowState::Normal);
        assert_eq!(TextWrapping::default(), TextWrapping::NoWrap);
    }

    #[test]
    fn test_wrapping_modes() {
        assert!(!TextWrapping::NoWrap.wraps());
        assert!(TextWrapping::Wrap.wraps());
        assert!(TextWrapping::WrapWithOverflow.wraps());
    }
}
