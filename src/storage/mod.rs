//! Non-volatile medium abstraction
//!
//! The persistence layer consumes the medium through four primitives. Every
//! primitive is assumed to complete; medium failures are not modelled.

pub mod ram;

pub use ram::RamEeprom;

use crate::memory::Address;

/// Byte-addressable non-volatile medium
///
/// Implementations wrap the platform's EEPROM access routines
/// (`eeprom_write_block`, `eeprom_read_byte`, ... on AVR).
pub trait EepromStorage {
    /// Writes a contiguous block of bytes starting at `address`
    fn write_block(&mut self, address: Address, data: &[u8]);

    /// Writes a single byte at `address`
    fn write_byte(&mut self, address: Address, value: u8);

    /// Reads `buf.len()` bytes starting at `address` into `buf`
    fn read_block(&mut self, address: Address, buf: &mut [u8]);

    /// Reads a single byte at `address`
    fn read_byte(&mut self, address: Address) -> u8;
}

impl<S: EepromStorage + ?Sized> EepromStorage for &mut S {
    fn write_block(&mut self, address: Address, data: &[u8]) {
        (**self).write_block(address, data)
    }

    fn write_byte(&mut self, address: Address, value: u8) {
        (**self).write_byte(address, value)
    }

    fn read_block(&mut self, address: Address, buf: &mut [u8]) {
        (**self).read_block(address, buf)
    }

    fn read_byte(&mut self, address: Address) -> u8 {
        (**self).read_byte(address)
    }
}

/// Compares `data` against the medium starting at `address`
///
/// Reads one byte at a time and stops at the first difference.
/// Returns true iff every byte matches.
pub fn verify_block<S: EepromStorage + ?Sized>(
    storage: &mut S,
    address: Address,
    data: &[u8],
) -> bool {
    data.iter()
        .enumerate()
        .all(|(offset, &expected)| {
            storage.read_byte(address.wrapping_add(offset as Address)) == expected
        })
}
