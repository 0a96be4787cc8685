//! Core error types for eeprom-items
//!
//! The bulk persistence surface reports outcomes as booleans. These types
//! describe *why* something degraded, for callers that want to know.

use crate::error::RegistrationError;

/// Main error type for layout and registration operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EepromError {
    // Registration errors
    /// Item could not be registered
    Registration(RegistrationError),

    // Layout errors
    /// Registry has not been finalized, no signature is known
    NotFinalized,
    /// Registry holds no active items
    EmptyLayout,
    /// Items plus signature extend past the end of the medium
    LayoutExceedsMedium,

    // Storage image errors
    /// Stored signature does not match the registered layout
    SignatureMismatch,
    /// Stored bytes differ from an item's in-memory value
    ContentMismatch,

    // Configuration errors
    /// Configuration values are inconsistent
    InvalidConfiguration,
}

impl EepromError {
    /// Returns true if the caller can recover by re-finalizing or rewriting storage
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::LayoutExceedsMedium | Self::InvalidConfiguration => false,

            Self::Registration(_)
            | Self::NotFinalized
            | Self::EmptyLayout
            | Self::SignatureMismatch
            | Self::ContentMismatch => true,
        }
    }

    /// Returns true if the error concerns the contents of the medium
    pub const fn is_storage_error(&self) -> bool {
        matches!(self, Self::SignatureMismatch | Self::ContentMismatch)
    }

    /// Returns the error category as a string
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Registration(_) => "Registration",
            Self::NotFinalized | Self::EmptyLayout | Self::LayoutExceedsMedium => "Layout",
            Self::SignatureMismatch | Self::ContentMismatch => "Storage",
            Self::InvalidConfiguration => "Configuration",
        }
    }
}

impl From<RegistrationError> for EepromError {
    fn from(error: RegistrationError) -> Self {
        Self::Registration(error)
    }
}

impl core::fmt::Display for EepromError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Registration(reason) => write!(f, "registration rejected: {reason}"),
            Self::NotFinalized => f.write_str("registry is not finalized"),
            Self::EmptyLayout => f.write_str("registry holds no items"),
            Self::LayoutExceedsMedium => f.write_str("layout does not fit the medium"),
            Self::SignatureMismatch => f.write_str("stored signature does not match layout"),
            Self::ContentMismatch => f.write_str("stored bytes differ from item value"),
            Self::InvalidConfiguration => f.write_str("invalid eeprom configuration"),
        }
    }
}

/// Result type for eeprom-items operations
pub type EepromResult<T> = Result<T, EepromError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(!EepromError::LayoutExceedsMedium.is_recoverable());
        assert!(EepromError::SignatureMismatch.is_recoverable());
        assert!(EepromError::Registration(RegistrationError::Finalized).is_recoverable());

        assert!(EepromError::ContentMismatch.is_storage_error());
        assert!(!EepromError::NotFinalized.is_storage_error());
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(
            EepromError::from(RegistrationError::ZeroSize).category(),
            "Registration"
        );
        assert_eq!(EepromError::EmptyLayout.category(), "Layout");
        assert_eq!(EepromError::SignatureMismatch.category(), "Storage");
        assert_eq!(EepromError::InvalidConfiguration.category(), "Configuration");
    }
}
