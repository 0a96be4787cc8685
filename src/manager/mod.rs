//! Persistence manager
//!
//! Combines a [`Registry`] with a medium: computes the layout signature,
//! stores / retrieves / verifies every item, and runs the startup decision
//! procedure.
//!
//! # Storage image
//!
//! ```text
//! [item 0][item 1]...[item n-1][signature, 2 bytes LE][unused ... top]
//! ```
//!
//! There are no headers or type tags; the image is only meaningful to a
//! program that registers the same item sizes in the same order.

pub mod flags;

pub use flags::{BeginAction, BeginFlags, BeginOutcome};

use crate::error::{EepromError, EepromResult};
use crate::item::{Handle, Item};
use crate::memory::{Address, ConfigValidator, EepromConfig};
use crate::registry::{Registry, signature_bytes};
use crate::storage::{EepromStorage, verify_block};
use crate::traits::{Persistable, PersistentItem};

/// Owner of a layout and the medium it is persisted to
///
/// Every bulk operation is a no-op until the layout has been finalized by
/// [`begin`](EepromManager::begin) (or [`finalize`](EepromManager::finalize)).
///
/// # Type Parameters
/// - `S`: The medium
/// - `C`: Medium configuration (size, erased value)
/// - `CAPACITY`: Maximum number of items (defaults to 32)
///
/// # Example
/// ```rust
/// use eeprom_items::prelude::*;
///
/// let threshold = Item::new(500u16);
/// let enabled = Item::new(true);
///
/// let mut eeprom = EepromManager::<_, DefaultConfig>::new(RamEeprom::<1024>::new());
/// eeprom.register(&threshold);
/// eeprom.register(&enabled);
///
/// // First boot: the medium is blank, so the defaults are written
/// assert!(!eeprom.begin(BeginFlags::DEFAULT));
/// assert!(eeprom.verify_all());
///
/// threshold.set(750);
/// assert!(!eeprom.verify_all());
/// eeprom.store_all(false);
/// assert!(eeprom.verify_all());
/// ```
pub struct EepromManager<'a, S, C, const CAPACITY: usize = 32>
where
    S: EepromStorage,
    C: EepromConfig,
{
    registry: Registry<'a, C, CAPACITY>,
    storage: S,
}

impl<'a, S, C, const CAPACITY: usize> EepromManager<'a, S, C, CAPACITY>
where
    S: EepromStorage,
    C: EepromConfig,
{
    /// Creates a manager with an empty registry
    pub fn new(storage: S) -> Self {
        Self::with_registry(Registry::new(), storage)
    }

    /// Creates a manager around an existing registry
    pub fn with_registry(registry: Registry<'a, C, CAPACITY>, storage: S) -> Self {
        Self { registry, storage }
    }

    /// Registers an item; see [`Registry::register`]
    pub fn register(&mut self, item: &'a dyn PersistentItem) -> Handle {
        self.registry.register(item)
    }

    /// Registers an item, reporting rejections; see [`Registry::try_register`]
    pub fn try_register(&mut self, item: &'a dyn PersistentItem) -> EepromResult<Handle> {
        self.registry.try_register(item)
    }

    /// Removes an item and invalidates the layout; see [`Registry::unregister`]
    pub fn unregister(&mut self, item: &dyn PersistentItem) -> bool {
        self.registry.unregister(item)
    }

    /// The layout
    pub fn registry(&self) -> &Registry<'a, C, CAPACITY> {
        &self.registry
    }

    /// The medium
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutable access to the medium, e.g. for [`Item::set_and_persist`]
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Releases the medium
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Recomputes the layout signature; see [`Registry::finalize`]
    pub fn finalize(&mut self) -> u16 {
        self.registry.finalize()
    }

    /// Checks that the configuration is valid and the layout is finalized
    /// and fits the medium
    pub fn check_layout(&self) -> EepromResult<()> {
        if let Err(reason) = ConfigValidator::validate_all::<C>() {
            log::warn!("invalid medium configuration: {}", reason);
            return Err(EepromError::InvalidConfiguration);
        }

        if self.registry.is_empty() {
            return Err(EepromError::EmptyLayout);
        }

        if !self.registry.is_finalized() {
            return Err(EepromError::NotFinalized);
        }

        ConfigValidator::check_layout_fits::<C>(self.registry.next_address() as usize)
            .map_err(|_| EepromError::LayoutExceedsMedium)
    }

    /// Like [`verify_all`](EepromManager::verify_all), reporting the first
    /// problem found
    ///
    /// Layout problems come first (see [`check_layout`](EepromManager::check_layout)),
    /// then [`EepromError::SignatureMismatch`] and
    /// [`EepromError::ContentMismatch`].
    pub fn verify_layout(&mut self) -> EepromResult<()> {
        self.check_layout()?;

        if !self.verify_signature() {
            return Err(EepromError::SignatureMismatch);
        }

        for item in self.registry.iter() {
            if !item.verify(&mut self.storage) {
                return Err(EepromError::ContentMismatch);
            }
        }

        Ok(())
    }

    /// Returns true if the medium holds this layout's signature
    ///
    /// Always false while the layout is not finalized.
    pub fn verify_signature(&mut self) -> bool {
        if !self.registry.is_finalized() {
            return false;
        }

        let bytes = signature_bytes(self.registry.signature());
        verify_block(&mut self.storage, self.registry.signature_address(), &bytes)
    }

    /// Writes the signature, skipping the write if it is already stored
    /// unless `force` is set. Returns true if it was written.
    fn write_signature(&mut self, force: bool) -> bool {
        if !force && self.verify_signature() {
            return false;
        }

        let bytes = signature_bytes(self.registry.signature());
        self.storage
            .write_block(self.registry.signature_address(), &bytes);
        true
    }

    /// Returns true if bulk operations are permitted
    fn is_ready(&self) -> bool {
        self.registry.next_address() != 0 && self.registry.is_finalized()
    }

    /// Writes every item followed by the signature
    ///
    /// The signature is only rewritten when `force_write_signature` is set or
    /// the stored one differs. Returns false without writing anything if the
    /// layout is empty or not finalized.
    pub fn store_all(&mut self, force_write_signature: bool) -> bool {
        if !self.is_ready() {
            return false;
        }

        for item in self.registry.iter() {
            item.store(&mut self.storage);
        }

        let rewrote = self.write_signature(force_write_signature);
        log::debug!(
            "stored {} items, signature {}",
            self.registry.len(),
            if rewrote { "written" } else { "unchanged" }
        );
        true
    }

    /// Loads every item, but only if the stored signature matches
    ///
    /// Returns whether the values were loaded. A mismatched image is never
    /// loaded since its offsets may mean something else.
    pub fn retrieve_all(&mut self) -> bool {
        if !self.is_ready() || !self.verify_signature() {
            return false;
        }

        for item in self.registry.iter() {
            item.retrieve(&mut self.storage);
        }

        log::debug!("retrieved {} items", self.registry.len());
        true
    }

    /// Returns true if the signature matches and every item equals its image
    ///
    /// Stops at the first mismatching item.
    pub fn verify_all(&mut self) -> bool {
        if !self.verify_signature() {
            return false;
        }

        self.registry
            .iter()
            .all(|item| item.verify(&mut self.storage))
    }

    /// Writes one item; no-op for inactive items
    pub fn store(&mut self, item: &dyn PersistentItem) {
        item.store(&mut self.storage);
    }

    /// Loads one item; no-op for inactive items
    pub fn retrieve(&mut self, item: &dyn PersistentItem) {
        item.retrieve(&mut self.storage);
    }

    /// Compares one item with its image; inactive items never match
    pub fn verify(&mut self, item: &dyn PersistentItem) -> bool {
        item.verify(&mut self.storage)
    }

    /// Assigns a new value and stores it if it changed
    ///
    /// Returns true if the medium was written.
    pub fn set<T: Persistable>(&mut self, item: &Item<T>, value: T) -> bool {
        item.set_and_persist(value, &mut self.storage)
    }

    /// Erases every byte past the signature up to the top of the medium
    ///
    /// Only bytes that differ from the erased value are written. The range
    /// ends at [`EepromConfig::top_address`], so a `SIZE` beyond the 16-bit
    /// address space never wraps back onto the layout. Returns the number of
    /// bytes written; 0 if the layout is not finalized.
    pub fn wipe_unused(&mut self) -> usize {
        if !self.is_ready() {
            return 0;
        }

        let start = self.registry.signature_address() as usize + C::SIGNATURE_SIZE;
        let mut written = 0;

        for address in start..=C::top_address() as usize {
            let address = address as Address;
            if self.storage.read_byte(address) != C::ERASED_BYTE {
                self.storage.write_byte(address, C::ERASED_BYTE);
                written += 1;
            }
        }

        written
    }

    /// Finalizes the layout and reconciles it with the medium
    ///
    /// Returns the signature verdict observed before any action: false on a
    /// first boot or after the layout changed. See [`BeginFlags::action`] for
    /// the decision table.
    pub fn begin(&mut self, flags: BeginFlags) -> bool {
        self.begin_with_outcome(flags).signature_valid
    }

    /// Like [`begin`](EepromManager::begin), reporting what was done
    pub fn begin_with_outcome(&mut self, flags: BeginFlags) -> BeginOutcome {
        if self.finalize() == crate::registry::UNFINALIZED {
            log::info!("begin: no items registered, nothing to do");
            return BeginOutcome::INERT;
        }

        let signature_valid = self.verify_signature();
        let action = flags.action(signature_valid);
        let mut wiped_bytes = 0;

        match action {
            BeginAction::Stored => {
                self.store_all(true);
                if flags.wipe_unused {
                    wiped_bytes = self.wipe_unused();
                }
            }
            BeginAction::Retrieved => {
                self.retrieve_all();
            }
            BeginAction::Untouched | BeginAction::Inert => {}
        }

        log::info!(
            "begin: signature {:#06x} {}, action {:?}",
            self.registry.signature(),
            if signature_valid { "valid" } else { "invalid" },
            action
        );

        BeginOutcome {
            signature_valid,
            action,
            wiped_bytes,
        }
    }
}

impl<S, C, const CAPACITY: usize> core::fmt::Debug for EepromManager<'_, S, C, CAPACITY>
where
    S: EepromStorage + core::fmt::Debug,
    C: EepromConfig,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EepromManager")
            .field("registry", &self.registry)
            .field("storage", &self.storage)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::define_eeprom_config;
    use crate::registry::compute_signature;
    use crate::storage::RamEeprom;

    define_eeprom_config! {
        name: TestConfig,
        size: 64,
        max_items: 8,
    }

    type Manager<'a> = EepromManager<'a, RamEeprom<64>, TestConfig>;

    // Larger than the 16-bit address space
    define_eeprom_config! {
        name: WideConfig,
        size: 70_000,
        max_items: 8,
    }

    #[test]
    fn test_bulk_ops_require_finalize() {
        let a = Item::new(1u8);
        let mut eeprom = Manager::new(RamEeprom::new());
        eeprom.register(&a);

        assert!(!eeprom.store_all(true));
        assert!(!eeprom.retrieve_all());
        assert!(!eeprom.verify_all());
        assert!(!eeprom.verify_signature());
        assert_eq!(eeprom.wipe_unused(), 0);
        assert_eq!(eeprom.storage().total_writes(), 0);
        assert_eq!(eeprom.check_layout(), Err(EepromError::NotFinalized));
    }

    #[test]
    fn test_signature_follows_items() {
        let a = Item::new(0x11u8);
        let b = Item::new(0x2233u16);
        let mut eeprom = Manager::new(RamEeprom::new());
        eeprom.register(&a);
        eeprom.register(&b);
        eeprom.finalize();

        assert!(eeprom.store_all(false));
        let signature = compute_signature([1, 2]).to_le_bytes();
        assert_eq!(&eeprom.storage().contents()[..5], &[0x11, 0x33, 0x22, signature[0], signature[1]]);
        assert!(eeprom.check_layout().is_ok());
    }

    #[test]
    fn test_store_all_skips_matching_signature() {
        let a = Item::new(5u32);
        let mut eeprom = Manager::new(RamEeprom::new());
        eeprom.register(&a);
        eeprom.finalize();

        eeprom.store_all(false);
        assert_eq!(eeprom.storage().write_count(4), 1);

        eeprom.store_all(false);
        assert_eq!(eeprom.storage().write_count(4), 1);
        assert_eq!(eeprom.storage().write_count(5), 1);
        assert_eq!(eeprom.storage().write_count(0), 2);

        eeprom.store_all(true);
        assert_eq!(eeprom.storage().write_count(4), 2);
    }

    #[test]
    fn test_retrieve_all_refuses_mismatched_image() {
        let a = Item::new(9u16);
        let mut eeprom = Manager::new(RamEeprom::filled(0x00));
        eeprom.register(&a);
        eeprom.finalize();

        assert!(!eeprom.retrieve_all());
        assert_eq!(a.get(), 9);
    }

    #[test]
    fn test_retrieve_all_loads_values() {
        let a = Item::new(1u8);
        let b = Item::new(-1i32);
        let mut eeprom = Manager::new(RamEeprom::new());
        eeprom.register(&a);
        eeprom.register(&b);
        eeprom.finalize();
        eeprom.store_all(false);

        a.set(100);
        b.set(12345);
        assert!(eeprom.retrieve_all());
        assert_eq!(a.get(), 1);
        assert_eq!(b.get(), -1);
    }

    #[test]
    fn test_verify_all_short_circuits() {
        let a = Item::new([1u8, 2]);
        let b = Item::new([3u8, 4]);
        let mut eeprom = Manager::new(RamEeprom::new());
        eeprom.register(&a);
        eeprom.register(&b);
        eeprom.finalize();
        eeprom.store_all(false);
        assert!(eeprom.verify_all());

        a.set([0, 2]);
        eeprom.storage_mut().reset_counters();
        assert!(!eeprom.verify_all());
        // two signature bytes, then the first byte of `a`
        assert_eq!(eeprom.storage().total_reads(), 3);
    }

    #[test]
    fn test_per_item_primitives() {
        let a = Item::new(7u8);
        let late = Item::new(8u8);
        let mut eeprom = Manager::new(RamEeprom::new());
        eeprom.register(&a);
        eeprom.finalize();
        eeprom.register(&late);

        eeprom.store(&a);
        assert!(eeprom.verify(&a));

        eeprom.store(&late);
        assert!(!eeprom.verify(&late));
        assert_eq!(eeprom.storage().total_writes(), 1);

        a.set(0);
        eeprom.retrieve(&a);
        assert_eq!(a.get(), 7);
    }

    #[test]
    fn test_set_persists_changes_only() {
        let a = Item::new(3u16);
        let mut eeprom = Manager::new(RamEeprom::new());
        eeprom.register(&a);
        eeprom.finalize();

        assert!(!eeprom.set(&a, 3));
        assert!(eeprom.set(&a, 4));
        assert_eq!(eeprom.storage().total_writes(), 2);
        assert!(eeprom.verify(&a));
    }

    #[test]
    fn test_wipe_unused_skips_erased_bytes() {
        let a = Item::new(0u8);
        let mut storage = RamEeprom::new();
        storage.write_byte(10, 0x00);
        storage.write_byte(63, 0x12);
        storage.reset_counters();

        let mut eeprom = Manager::new(storage);
        eeprom.register(&a);
        eeprom.finalize();

        assert_eq!(eeprom.wipe_unused(), 2);
        assert_eq!(eeprom.storage().write_count(10), 1);
        assert_eq!(eeprom.storage().write_count(63), 1);
        assert_eq!(eeprom.storage().total_writes(), 2);
        assert_eq!(eeprom.wipe_unused(), 0);
    }

    #[test]
    fn test_begin_empty_registry_is_inert() {
        let mut eeprom = Manager::new(RamEeprom::filled(0x00));

        let outcome = eeprom.begin_with_outcome(BeginFlags::FACTORY_RESET);
        assert_eq!(outcome, BeginOutcome::INERT);
        assert_eq!(eeprom.registry().signature(), 0);
        assert_eq!(eeprom.storage().total_writes(), 0);
        assert_eq!(eeprom.check_layout(), Err(EepromError::EmptyLayout));
    }

    #[test]
    fn test_begin_first_boot_then_reboot() {
        let storage = {
            let a = Item::new(42u8);
            let mut eeprom = Manager::new(RamEeprom::new());
            eeprom.register(&a);

            assert!(!eeprom.begin(BeginFlags::DEFAULT));
            assert!(eeprom.verify_all());
            a.set(43);
            eeprom.store_all(false);
            eeprom.into_storage()
        };

        let a = Item::new(42u8);
        let mut eeprom = Manager::new(storage);
        eeprom.register(&a);

        let outcome = eeprom.begin_with_outcome(BeginFlags::DEFAULT);
        assert!(outcome.signature_valid);
        assert_eq!(outcome.action, BeginAction::Retrieved);
        assert_eq!(a.get(), 43);
    }

    #[test]
    fn test_begin_store_path_wipes() {
        let a = Item::new(0xABu8);
        let mut eeprom = Manager::new(RamEeprom::filled(0x00));
        eeprom.register(&a);

        let outcome = eeprom.begin_with_outcome(BeginFlags::NONE.store_if_invalid().wipe_unused());
        assert!(!outcome.signature_valid);
        assert_eq!(outcome.action, BeginAction::Stored);
        assert_eq!(outcome.wiped_bytes, 64 - 3);
        assert!(eeprom.storage().contents()[3..].iter().all(|&b| b == 0xFF));
        assert!(eeprom.verify_all());
    }

    #[test]
    fn test_begin_unregister_forces_refinalize() {
        let a = Item::new(1u8);
        let b = Item::new(2u8);
        let mut eeprom = Manager::new(RamEeprom::new());
        eeprom.register(&a);
        eeprom.register(&b);
        eeprom.begin(BeginFlags::DEFAULT);

        assert!(eeprom.unregister(&b));
        assert!(!eeprom.registry().is_finalized());
        assert!(!eeprom.store_all(true));

        // the remaining layout has a different shape than what is stored
        assert!(!eeprom.begin(BeginFlags::NONE));
    }

    #[test]
    fn test_wipe_stays_below_address_space() {
        let a = Item::new(0xABu8);
        let mut eeprom = EepromManager::<_, WideConfig>::new(RamEeprom::<64>::filled(0x00));
        eeprom.register(&a);

        let outcome = eeprom.begin_with_outcome(BeginFlags::FACTORY_RESET);
        assert_eq!(outcome.action, BeginAction::Stored);
        assert_eq!(eeprom.storage().contents()[0], 0xAB);
        assert_eq!(outcome.wiped_bytes, 64 - 3);
        assert!(eeprom.verify_all());
        assert_eq!(eeprom.check_layout(), Err(EepromError::InvalidConfiguration));
    }

    #[test]
    fn test_verify_layout_reports_reason() {
        let a = Item::new(1u8);
        let b = Item::new(2u16);
        let mut eeprom = Manager::new(RamEeprom::new());
        eeprom.register(&a);
        eeprom.register(&b);
        assert_eq!(eeprom.verify_layout(), Err(EepromError::NotFinalized));

        eeprom.finalize();
        assert_eq!(eeprom.verify_layout(), Err(EepromError::SignatureMismatch));

        eeprom.store_all(false);
        assert_eq!(eeprom.verify_layout(), Ok(()));

        b.set(3);
        assert_eq!(eeprom.verify_layout(), Err(EepromError::ContentMismatch));
        assert!(EepromError::ContentMismatch.is_storage_error());
    }

    #[test]
    fn test_manager_adopts_prepared_registry() {
        let a = Item::new(5u8);
        let b = Item::new(6u32);

        let mut registry = Registry::<TestConfig>::new();
        registry.register(&a);
        registry.register(&b);

        let mut eeprom = Manager::with_registry(registry, RamEeprom::new());
        assert!(!eeprom.begin(BeginFlags::DEFAULT));
        assert_eq!(eeprom.registry().len(), 2);
        assert_eq!(b.address(), 1);
        assert!(eeprom.verify_all());
    }
}
