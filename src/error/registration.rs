//! Registration error types
//!
//! Reasons an item ends up inactive instead of receiving an address.

/// Why a registration produced an inactive handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationError {
    /// Registry was already finalized
    Finalized,
    /// Item has a size of zero bytes
    ZeroSize,
    /// Registry entry table is full
    CapacityExceeded,
    /// Item would not fit on the medium together with the signature
    MediumFull,
    /// Item is already registered in this registry
    AlreadyRegistered,
    /// Item is active in a different registry
    BoundElsewhere,
}

impl RegistrationError {
    /// Returns true if the rejection is part of normal, defined behavior
    ///
    /// Zero-size items are a sentinel rather than a mistake.
    pub const fn is_sentinel(&self) -> bool {
        matches!(self, Self::ZeroSize)
    }

    /// Short description of the rejection
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Finalized => "registry already finalized",
            Self::ZeroSize => "zero-size item",
            Self::CapacityExceeded => "registry capacity exceeded",
            Self::MediumFull => "item does not fit on medium",
            Self::AlreadyRegistered => "item already registered",
            Self::BoundElsewhere => "item bound to another registry",
        }
    }
}

impl core::fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_classification() {
        assert!(RegistrationError::ZeroSize.is_sentinel());
        assert!(!RegistrationError::Finalized.is_sentinel());
        assert!(!RegistrationError::MediumFull.is_sentinel());
    }
}
