//! EEPROM configuration trait and implementations
//!
//! This module defines the EepromConfig trait that describes the medium a
//! layout is persisted to. All values are fixed at compile time.

/// Address type of the non-volatile address space
///
/// AVR EEPROM addresses are 16 bits wide.
pub type Address = u16;

/// Medium configuration trait for compile-time layout management
///
/// This trait describes the size of the medium and the limits of the item
/// registry built on top of it.
pub trait EepromConfig: Clone {
    /// Size of the medium in bytes (top address + 1)
    const SIZE: usize;

    /// Byte value of an erased cell
    const ERASED_BYTE: u8 = 0xFF;

    /// Maximum number of items in one layout
    const MAX_ITEMS: usize;

    /// Number of bytes used by the stored signature
    const SIGNATURE_SIZE: usize = 2;

    /// Returns the number of addressable bytes
    ///
    /// `SIZE` clamped to the 16-bit address space; every range the crate
    /// touches lies below this bound.
    fn addressable_size() -> usize {
        Self::SIZE.min(Address::MAX as usize + 1)
    }

    /// Returns the highest valid address on the medium
    fn top_address() -> Address {
        Self::addressable_size().saturating_sub(1) as Address
    }

    /// Returns the number of bytes available for item data
    fn data_capacity() -> usize {
        Self::addressable_size().saturating_sub(Self::SIGNATURE_SIZE)
    }

    /// Validates that the configuration is consistent and within bounds
    fn validate() -> Result<(), &'static str> {
        if Self::SIZE == 0 {
            return Err("SIZE must be non-zero");
        }

        if Self::SIZE > Address::MAX as usize + 1 {
            return Err("SIZE cannot exceed the 16-bit address space");
        }

        if Self::SIGNATURE_SIZE != 2 {
            return Err("SIGNATURE_SIZE must be 2 bytes");
        }

        if Self::SIZE <= Self::SIGNATURE_SIZE {
            return Err("SIZE must leave room for the signature");
        }

        if Self::MAX_ITEMS == 0 {
            return Err("MAX_ITEMS must be at least 1");
        }

        Ok(())
    }
}

/// Default configuration: 1 KB medium as found on the ATmega328P
#[derive(Debug, Clone, Copy)]
pub struct DefaultConfig;

impl Default for DefaultConfig {
    fn default() -> Self {
        Self
    }
}

impl EepromConfig for DefaultConfig {
    const SIZE: usize = 1024;
    const MAX_ITEMS: usize = 32;
}
