//! Item registry
//!
//! Turns a sequence of registered items into disjoint address ranges and,
//! once finalized, a layout signature.

pub mod signature;

pub use signature::{UNFINALIZED, compute_signature, next_signature, signature_bytes};

use crate::error::{EepromError, EepromResult, RegistrationError};
use crate::item::Handle;
use crate::memory::{Address, EepromConfig};
use crate::traits::PersistentItem;

/// Ordered set of items sharing one medium
///
/// Items are appended in registration order and receive consecutive ranges
/// starting at address 0. The registry is *open* until
/// [`finalize`](Registry::finalize) computes a non-zero signature; from then
/// on new registrations are downgraded to inactive handles instead of
/// shifting the layout.
///
/// The registry borrows every item for `'a`, so registered items outlive it.
/// There is no global state: several independent layouts can coexist, which
/// is what the tests rely on.
///
/// # Type Parameters
/// - `C`: Medium configuration that bounds the layout
/// - `CAPACITY`: Maximum number of entries (defaults to 32)
///
/// # Example
/// ```rust
/// use eeprom_items::prelude::*;
///
/// let volume = Item::new(7u8);
/// let offset = Item::new(-12i32);
/// let late = Item::new(0u16);
///
/// let mut registry = Registry::<DefaultConfig>::new();
/// registry.register(&volume);
/// registry.register(&offset);
///
/// assert_eq!(volume.address(), 0);
/// assert_eq!(offset.address(), 1);
/// assert_eq!(registry.next_address(), 5);
///
/// let signature = registry.finalize();
/// assert_ne!(signature, 0);
///
/// // Too late: the layout is closed
/// registry.register(&late);
/// assert!(!late.is_active());
/// ```
pub struct Registry<'a, C: EepromConfig, const CAPACITY: usize = 32> {
    /// Registered items in registration order, `len` leading slots in use
    entries: [Option<&'a dyn PersistentItem>; CAPACITY],
    len: usize,

    /// Next free address
    next_address: Address,

    /// Layout signature, [`UNFINALIZED`] while open
    signature: u16,

    _phantom: core::marker::PhantomData<C>,
}

impl<'a, C: EepromConfig, const CAPACITY: usize> Registry<'a, C, CAPACITY> {
    /// Creates an empty, open registry
    pub const fn new() -> Self {
        Self {
            entries: [None; CAPACITY],
            len: 0,
            next_address: 0,
            signature: UNFINALIZED,
            _phantom: core::marker::PhantomData,
        }
    }

    /// Registers an item, binding its handle
    ///
    /// Returns the inactive handle if the registry is finalized, the item is
    /// zero-sized, the layout is full, or the item belongs to another
    /// registry. An item that is already registered here keeps its handle.
    pub fn register(&mut self, item: &'a dyn PersistentItem) -> Handle {
        match self.try_register(item) {
            Ok(handle) => handle,
            Err(EepromError::Registration(RegistrationError::AlreadyRegistered)) => item.handle(),
            Err(EepromError::Registration(RegistrationError::BoundElsewhere)) => {
                log::warn!("item is bound to another layout, not registered");
                Handle::INACTIVE
            }
            Err(EepromError::Registration(reason)) if reason.is_sentinel() => {
                log::debug!("zero-size item registered as inactive");
                Handle::INACTIVE
            }
            Err(error) => {
                log::warn!("item registered as inactive: {}", error);
                Handle::INACTIVE
            }
        }
    }

    /// Registers an item, reporting why it was downgraded to inactive
    ///
    /// On error the item is bound to [`Handle::INACTIVE`], except for
    /// [`RegistrationError::AlreadyRegistered`] and
    /// [`RegistrationError::BoundElsewhere`] where it keeps its handle.
    pub fn try_register(&mut self, item: &'a dyn PersistentItem) -> EepromResult<Handle> {
        if self.contains(item) {
            return Err(RegistrationError::AlreadyRegistered.into());
        }

        if item.is_active() {
            return Err(RegistrationError::BoundElsewhere.into());
        }

        match self.allocate(item.byte_size()) {
            Ok(handle) => {
                self.entries[self.len] = Some(item);
                self.len += 1;
                item.bind(handle);
                log::debug!(
                    "registered item {} at {:#06x}, {} bytes",
                    self.len - 1,
                    handle.address(),
                    handle.size()
                );
                Ok(handle)
            }
            Err(reason) => {
                item.bind(Handle::INACTIVE);
                Err(reason.into())
            }
        }
    }

    /// Assigns the next range of `size` bytes
    fn allocate(&mut self, size: usize) -> Result<Handle, RegistrationError> {
        if self.is_finalized() {
            return Err(RegistrationError::Finalized);
        }

        if size == 0 {
            return Err(RegistrationError::ZeroSize);
        }

        if self.len >= CAPACITY || self.len >= C::MAX_ITEMS {
            return Err(RegistrationError::CapacityExceeded);
        }

        let end = self.next_address as usize + size;
        if end > C::data_capacity() {
            return Err(RegistrationError::MediumFull);
        }

        let handle = Handle::new(self.next_address, size as u16);
        self.next_address = end as Address;
        Ok(handle)
    }

    /// Removes an item from the layout
    ///
    /// The item becomes inactive and the registry reopens: the stored
    /// signature no longer describes the remaining items. Returns false if
    /// the item was not registered here.
    pub fn unregister(&mut self, item: &dyn PersistentItem) -> bool {
        let Some(index) = self.iter().position(|entry| same_item(entry, item)) else {
            return false;
        };
        let handle = item.handle();

        self.entries.copy_within(index + 1..self.len, index);
        self.len -= 1;
        self.entries[self.len] = None;

        item.bind(Handle::INACTIVE);
        self.signature = UNFINALIZED;

        log::warn!(
            "item at {:#06x} unregistered, layout invalidated",
            handle.address()
        );
        true
    }

    /// Recomputes the signature from the current entries
    ///
    /// Safe to call repeatedly. An empty registry stays unfinalized.
    pub fn finalize(&mut self) -> u16 {
        self.signature = compute_signature(self.iter().map(|item| item.handle().size()));
        self.signature
    }

    /// Unbinds every item and returns to the initial empty, open state
    pub fn reset(&mut self) {
        for item in self.iter() {
            item.bind(Handle::INACTIVE);
        }

        self.entries = [None; CAPACITY];
        self.len = 0;
        self.next_address = 0;
        self.signature = UNFINALIZED;
    }

    /// Returns true if this exact item is registered here
    pub fn contains(&self, item: &dyn PersistentItem) -> bool {
        self.iter().any(|entry| same_item(entry, item))
    }

    /// Iterates registered items in registration order
    pub fn iter(&self) -> impl Iterator<Item = &'a dyn PersistentItem> + '_ {
        self.entries[..self.len].iter().flatten().copied()
    }

    /// Iterates the handles of registered items in registration order
    pub fn handles(&self) -> impl Iterator<Item = Handle> + '_ {
        self.iter().map(|item| item.handle())
    }

    /// Number of registered items
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no item is registered
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Next free address, equal to the total item bytes
    pub fn next_address(&self) -> Address {
        self.next_address
    }

    /// Address of the stored signature
    pub fn signature_address(&self) -> Address {
        self.next_address
    }

    /// Current signature, [`UNFINALIZED`] while open
    pub fn signature(&self) -> u16 {
        self.signature
    }

    /// Returns true once a non-zero signature is known
    pub fn is_finalized(&self) -> bool {
        self.signature != UNFINALIZED
    }
}

/// Identity of an item is its address; handles can repeat across layouts.
fn same_item(a: &dyn PersistentItem, b: &dyn PersistentItem) -> bool {
    core::ptr::addr_eq(a, b)
}

impl<C: EepromConfig, const CAPACITY: usize> Default for Registry<'_, C, CAPACITY> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: EepromConfig, const CAPACITY: usize> core::fmt::Debug for Registry<'_, C, CAPACITY> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registry")
            .field("len", &self.len)
            .field("next_address", &self.next_address)
            .field("signature", &self.signature)
            .finish()
    }
}
