//! Typed persistent items
//!
//! An [`Item`] owns one fixed-size value and, once registered, the byte range
//! that value occupies on the medium.

pub mod handle;

pub use handle::Handle;

use core::cell::Cell;

use crate::storage::{EepromStorage, verify_block};
use crate::traits::{Persistable, PersistentItem};

/// A value that survives power loss
///
/// The value lives in RAM; the item's handle says where its image lives on
/// the medium. Items are registered with a [`Registry`] in declaration order
/// and the registry borrows them for as long as the layout exists, so an
/// item can never be dropped while it is part of a layout.
///
/// Reads and writes through [`get`](Item::get) and [`set`](Item::set) only
/// touch RAM. [`set_and_persist`](Item::set_and_persist) is the single path
/// that writes to the medium as a side effect of assignment.
///
/// # Example
/// ```rust
/// use eeprom_items::prelude::*;
///
/// let brightness = Item::new(128u8);
/// let mut eeprom = RamEeprom::<64>::new();
///
/// let mut registry = Registry::<DefaultConfig>::new();
/// registry.register(&brightness);
/// assert_eq!(brightness.address(), 0);
///
/// assert!(brightness.set_and_persist(200, &mut eeprom));
/// assert!(!brightness.set_and_persist(200, &mut eeprom)); // unchanged, no write
/// assert_eq!(eeprom.contents()[0], 200);
/// ```
///
/// [`Registry`]: crate::registry::Registry
#[derive(Debug)]
pub struct Item<T: Persistable> {
    value: Cell<T>,
    handle: Cell<Handle>,
}

impl<T: Persistable> Item<T> {
    /// Creates an unregistered item holding `value` as its default
    pub const fn new(value: T) -> Self {
        Self {
            value: Cell::new(value),
            handle: Cell::new(Handle::INACTIVE),
        }
    }

    /// Returns the in-memory value
    pub fn get(&self) -> T {
        self.value.get()
    }

    /// Replaces the in-memory value without touching the medium
    pub fn set(&self, value: T) {
        self.value.set(value);
    }

    /// Replaces the in-memory value and stores it if it changed
    ///
    /// Returns true if the item was written to the medium. Inactive items
    /// still take the new value but are never written.
    pub fn set_and_persist<S: EepromStorage + ?Sized>(&self, value: T, storage: &mut S) -> bool {
        if self.value.get() == value {
            return false;
        }

        self.value.set(value);
        self.store_to(storage)
    }

    /// Handle assigned at registration
    pub fn handle(&self) -> Handle {
        self.handle.get()
    }

    /// Returns true if the item has an address in a layout
    pub fn is_active(&self) -> bool {
        self.handle.get().is_active()
    }

    /// Start of the item's range (meaningless while inactive)
    pub fn address(&self) -> u16 {
        self.handle.get().address()
    }

    /// Size of the item's range, 0 while inactive
    pub fn size(&self) -> u16 {
        self.handle.get().size()
    }

    /// Image of the current value, if it exactly fills the item's range
    fn bound_image(&self) -> Option<(Handle, T::Bytes)> {
        let handle = self.handle.get();
        if !handle.is_active() {
            return None;
        }

        let bytes = self.value.get().to_bytes();
        if bytes.as_ref().len() != handle.size() as usize {
            log::warn!(
                "item at {:#06x}: image is {} bytes, range is {}",
                handle.address(),
                bytes.as_ref().len(),
                handle.size()
            );
            return None;
        }

        Some((handle, bytes))
    }

    /// Writes the value to the item's range
    ///
    /// Returns false without writing if the item is inactive or its image
    /// does not fill the range exactly.
    pub fn store_to<S: EepromStorage + ?Sized>(&self, storage: &mut S) -> bool {
        let Some((handle, bytes)) = self.bound_image() else {
            return false;
        };

        storage.write_block(handle.address(), bytes.as_ref());
        true
    }

    /// Loads the value from the item's range
    ///
    /// Returns false without reading if the item is inactive or its image
    /// does not fill the range exactly.
    pub fn retrieve_from<S: EepromStorage + ?Sized>(&self, storage: &mut S) -> bool {
        // The current image doubles as the read buffer.
        let Some((handle, mut bytes)) = self.bound_image() else {
            return false;
        };

        storage.read_block(handle.address(), bytes.as_mut());
        self.value.set(T::from_bytes(&bytes));
        true
    }

    /// Compares the value with the item's range
    ///
    /// Inactive items, and items whose image does not fill the range, report
    /// no match.
    pub fn verify_against<S: EepromStorage + ?Sized>(&self, storage: &mut S) -> bool {
        match self.bound_image() {
            Some((handle, bytes)) => verify_block(storage, handle.address(), bytes.as_ref()),
            None => false,
        }
    }
}

impl<T: Persistable + Default> Default for Item<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Persistable> PersistentItem for Item<T> {
    fn byte_size(&self) -> usize {
        self.value.get().to_bytes().as_ref().len()
    }

    fn handle(&self) -> Handle {
        self.handle.get()
    }

    fn bind(&self, handle: Handle) {
        self.handle.set(handle);
    }

    fn store(&self, storage: &mut dyn EepromStorage) {
        self.store_to(storage);
    }

    fn retrieve(&self, storage: &mut dyn EepromStorage) {
        self.retrieve_from(storage);
    }

    fn verify(&self, storage: &mut dyn EepromStorage) -> bool {
        self.verify_against(storage)
    }
}
