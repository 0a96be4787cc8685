//! In-memory EEPROM medium
//!
//! A RAM-backed medium that counts every read and write, used on the host
//! to check wear-reduction behavior.

use crate::memory::Address;
use crate::storage::EepromStorage;

/// Erased state of a fresh medium
const ERASED: u8 = 0xFF;

/// RAM-backed medium of `SIZE` bytes
///
/// Starts fully erased (`0xFF`). Writes outside the medium are dropped and
/// reads outside it return the erased value, matching the address wrap-free
/// behavior expected from a bounded medium.
///
/// # Example
/// ```rust
/// use eeprom_items::storage::{EepromStorage, RamEeprom};
///
/// let mut eeprom = RamEeprom::<64>::new();
/// eeprom.write_byte(3, 0x42);
///
/// assert_eq!(eeprom.read_byte(3), 0x42);
/// assert_eq!(eeprom.write_count(3), 1);
/// assert_eq!(eeprom.write_count(4), 0);
/// ```
#[derive(Debug, Clone)]
pub struct RamEeprom<const SIZE: usize> {
    cells: [u8; SIZE],
    writes: [u32; SIZE],
    reads: u32,
}

impl<const SIZE: usize> RamEeprom<SIZE> {
    /// Creates an erased medium
    pub fn new() -> Self {
        Self::filled(ERASED)
    }

    /// Creates a medium with every cell set to `value`
    pub fn filled(value: u8) -> Self {
        Self {
            cells: [value; SIZE],
            writes: [0; SIZE],
            reads: 0,
        }
    }

    /// Returns the raw contents
    pub fn contents(&self) -> &[u8] {
        &self.cells
    }

    /// Overwrites every cell with `value` without counting writes
    pub fn fill(&mut self, value: u8) {
        self.cells = [value; SIZE];
    }

    /// Number of writes issued to `address`
    pub fn write_count(&self, address: Address) -> u32 {
        self.writes.get(address as usize).copied().unwrap_or(0)
    }

    /// Number of byte writes issued across the medium
    pub fn total_writes(&self) -> u32 {
        self.writes.iter().sum()
    }

    /// Number of single-byte reads issued
    pub fn total_reads(&self) -> u32 {
        self.reads
    }

    /// Clears the read and write counters
    pub fn reset_counters(&mut self) {
        self.writes = [0; SIZE];
        self.reads = 0;
    }

    fn store(&mut self, address: usize, value: u8) {
        if let Some(cell) = self.cells.get_mut(address) {
            *cell = value;
            self.writes[address] += 1;
        }
    }
}

impl<const SIZE: usize> Default for RamEeprom<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const SIZE: usize> EepromStorage for RamEeprom<SIZE> {
    fn write_block(&mut self, address: Address, data: &[u8]) {
        for (offset, &value) in data.iter().enumerate() {
            self.store(address as usize + offset, value);
        }
    }

    fn write_byte(&mut self, address: Address, value: u8) {
        self.store(address as usize, value);
    }

    fn read_block(&mut self, address: Address, buf: &mut [u8]) {
        for (offset, slot) in buf.iter_mut().enumerate() {
            *slot = self
                .cells
                .get(address as usize + offset)
                .copied()
                .unwrap_or(ERASED);
        }
    }

    fn read_byte(&mut self, address: Address) -> u8 {
        self.reads += 1;
        self.cells.get(address as usize).copied().unwrap_or(ERASED)
    }
}
