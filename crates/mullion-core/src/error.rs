//! Error types for Mullion core operations.

use std::fmt;

/// Errors that can occur during handle and attached-value operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleError {
    /// The handle is invalid or refers to a native object that has been torn down.
    StaleHandle,
    /// Attempted to link a handle as its own parent or ancestor.
    CircularParentage,
    /// The key is reserved for the data context and cannot be used as a named value.
    ReservedKey,
    /// The handle registry is not initialized.
    RegistryNotInitialized,
}

impl fmt::Display for HandleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaleHandle => write!(f, "Invalid or torn-down native handle"),
            Self::CircularParentage => {
                write!(f, "Cannot link a handle as its own parent or ancestor")
            }
            Self::ReservedKey => {
                write!(f, "Key is reserved for the data context")
            }
            Self::RegistryNotInitialized => write!(f, "Handle registry not initialized"),
        }
    }
}

impl std::error::Error for HandleError {}

/// Result type for handle and attached-value operations.
pub type HandleResult<T> = std::result::Result<T, HandleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            HandleError::StaleHandle.to_string(),
            "Invalid or torn-down native handle"
        );
        assert_eq!(
            HandleError::RegistryNotInitialized.to_string(),
            "Handle registry not initialized"
        );
    }

    #[test]
    fn test_error_is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&HandleError::ReservedKey);
    }
}
