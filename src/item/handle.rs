//! Address range descriptor

use crate::memory::Address;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Byte range assigned to an item: `[address, address + size)`
///
/// A handle with `size == 0` is inactive. Inactive items take part in no
/// bulk operation and never touch the medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Handle {
    address: Address,
    size: u16,
}

impl Handle {
    /// The inactive sentinel
    pub const INACTIVE: Handle = Handle {
        address: 0,
        size: 0,
    };

    /// Creates a handle for `size` bytes at `address`
    pub const fn new(address: Address, size: u16) -> Self {
        Self { address, size }
    }

    /// First address of the range
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Length of the range in bytes
    pub const fn size(&self) -> u16 {
        self.size
    }

    /// One past the last address of the range
    pub const fn end(&self) -> usize {
        self.address as usize + self.size as usize
    }

    /// Returns true if the handle addresses storage
    pub const fn is_active(&self) -> bool {
        self.size != 0
    }

    /// Returns true if the two ranges share at least one byte
    pub const fn overlaps(&self, other: &Handle) -> bool {
        self.is_active()
            && other.is_active()
            && (self.address as usize) < other.end()
            && (other.address as usize) < self.end()
    }
}

impl Default for Handle {
    fn default() -> Self {
        Self::INACTIVE
    }
}
