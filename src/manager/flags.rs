//! Startup policy for [`EepromManager::begin`]
//!
//! [`EepromManager::begin`]: crate::manager::EepromManager::begin

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The four independent policy flags consulted at startup
///
/// # Example
/// ```rust
/// use eeprom_items::manager::BeginFlags;
///
/// let flags = BeginFlags::NONE.store_if_invalid().wipe_unused();
/// assert!(flags.store_if_invalid);
/// assert!(flags.wipe_unused);
/// assert!(!flags.retrieve_if_valid);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BeginFlags {
    /// Write the defaults when the stored signature does not match
    pub store_if_invalid: bool,
    /// Write the defaults unconditionally
    pub store_always: bool,
    /// After storing, erase everything past the signature
    pub wipe_unused: bool,
    /// Load stored values when the stored signature matches
    pub retrieve_if_valid: bool,
}

impl BeginFlags {
    /// No action at all; only the signature verdict is reported
    pub const NONE: BeginFlags = BeginFlags {
        store_if_invalid: false,
        store_always: false,
        wipe_unused: false,
        retrieve_if_valid: false,
    };

    /// Usual boot policy: load a matching image, otherwise write defaults
    pub const DEFAULT: BeginFlags = BeginFlags {
        store_if_invalid: true,
        store_always: false,
        wipe_unused: false,
        retrieve_if_valid: true,
    };

    /// Overwrite everything with defaults and erase the rest of the medium
    pub const FACTORY_RESET: BeginFlags = BeginFlags {
        store_if_invalid: true,
        store_always: true,
        wipe_unused: true,
        retrieve_if_valid: false,
    };

    /// Creates flags from the four booleans, in the classic argument order
    pub const fn new(
        store_if_invalid: bool,
        store_always: bool,
        wipe_unused: bool,
        retrieve_if_valid: bool,
    ) -> Self {
        Self {
            store_if_invalid,
            store_always,
            wipe_unused,
            retrieve_if_valid,
        }
    }

    /// Sets `store_if_invalid`
    pub const fn store_if_invalid(mut self) -> Self {
        self.store_if_invalid = true;
        self
    }

    /// Sets `store_always`
    pub const fn store_always(mut self) -> Self {
        self.store_always = true;
        self
    }

    /// Sets `wipe_unused`
    pub const fn wipe_unused(mut self) -> Self {
        self.wipe_unused = true;
        self
    }

    /// Sets `retrieve_if_valid`
    pub const fn retrieve_if_valid(mut self) -> Self {
        self.retrieve_if_valid = true;
        self
    }

    /// Decides the startup action for a given signature verdict
    pub const fn action(&self, signature_valid: bool) -> BeginAction {
        if self.store_always || (!signature_valid && self.store_if_invalid) {
            BeginAction::Stored
        } else if self.retrieve_if_valid && signature_valid {
            BeginAction::Retrieved
        } else {
            BeginAction::Untouched
        }
    }
}

impl Default for BeginFlags {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// What `begin` did with the medium
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BeginAction {
    /// Nothing registered; nothing to validate or persist
    Inert,
    /// In-memory values were written to the medium
    Stored,
    /// Stored values were loaded into the items
    Retrieved,
    /// Items kept their in-memory values and the medium was not touched
    Untouched,
}

/// Result of a startup pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BeginOutcome {
    /// Signature verdict observed before any action
    pub signature_valid: bool,
    /// Action taken
    pub action: BeginAction,
    /// Bytes rewritten by the unused-area wipe
    pub wiped_bytes: usize,
}

impl BeginOutcome {
    /// Outcome for an empty registry
    pub const INERT: BeginOutcome = BeginOutcome {
        signature_valid: false,
        action: BeginAction::Inert,
        wiped_bytes: 0,
    };

    /// Returns true if this looked like a first boot or a layout change
    pub const fn is_fresh_layout(&self) -> bool {
        !self.signature_valid
    }
}
