//! Object-safe item capability
//!
//! The registry stores items of different value types side by side, so it
//! only sees them through this trait.

use crate::item::Handle;
use crate::storage::EepromStorage;

/// An item that owns a fixed-size value and can move it to and from storage
///
/// Implementations keep their value and handle behind interior mutability so
/// the registry can hold shared references for the lifetime of the layout.
pub trait PersistentItem {
    /// Number of bytes the item asks for at registration
    fn byte_size(&self) -> usize;

    /// Handle currently bound to the item
    fn handle(&self) -> Handle;

    /// Binds a handle to the item (called by the registry)
    fn bind(&self, handle: Handle);

    /// Writes the in-memory value to the item's range
    ///
    /// No-op for inactive items.
    fn store(&self, storage: &mut dyn EepromStorage);

    /// Loads the item's range into the in-memory value
    ///
    /// No-op for inactive items.
    fn retrieve(&self, storage: &mut dyn EepromStorage);

    /// Compares the in-memory value with the item's range
    ///
    /// Inactive items always report no match.
    fn verify(&self, storage: &mut dyn EepromStorage) -> bool;

    /// Returns true if the item has an address in the layout
    fn is_active(&self) -> bool {
        self.handle().is_active()
    }
}
