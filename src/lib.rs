#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]

//! **Declaration-ordered persistent items for EEPROM-class memory**
//!
//! eeprom-items lets a program declare any number of fixed-size values that
//! must survive power loss, assigns each one a disjoint byte range on the
//! non-volatile medium in registration order, and offers whole-set
//! operations on top: store all, retrieve all, verify all, and a startup
//! routine that decides whether to trust the medium or (re)initialize it.
//!
//! ## Features
//!
//! - **No Dynamic Allocation** - fixed-capacity registry, values live in the items
//! - **Shape Signature** - a 16-bit signature over the item sizes detects layout changes
//! - **Wear Reduction** - unchanged signatures and already-erased bytes are never rewritten
//! - **Degrade, Don't Crash** - late or zero-size items become inactive no-ops
//! - **Medium Agnostic** - four primitives (`write_block`, `write_byte`, `read_block`, `read_byte`)
//!
//! ### Serialization Features
//! - `serde` - Serde support for handles and startup reports (no_std compatible)
//!
//! ## Storage Image
//!
//! ```text
//! [item 0][item 1]...[item n-1][signature: 2 bytes][unused ... top of medium]
//! ```
//!
//! The image carries no headers or type tags. A program reading it must
//! register the same item sizes in the same order as the program that wrote
//! it; the signature is the only guard.
//!
//! ## Quick Start
//!
//! ```rust
//! use eeprom_items::prelude::*;
//!
//! // Values with their defaults
//! let volume = Item::new(5u8);
//! let station = Item::new(1017u16);
//!
//! let mut eeprom = EepromManager::<_, ATmega328PConfig>::new(RamEeprom::<1024>::new());
//! eeprom.register(&volume);
//! eeprom.register(&station);
//!
//! // Load a matching image, otherwise write the defaults
//! let was_valid = eeprom.begin(BeginFlags::DEFAULT);
//! assert!(!was_valid); // blank medium
//!
//! // Assignment that persists only when the value changes
//! eeprom.set(&volume, 7);
//! assert!(eeprom.verify_all());
//! ```
//!
//! ## Startup Policy
//!
//! | Signature valid | `store_always` | `store_if_invalid` | `retrieve_if_valid` | Action |
//! |-----------------|----------------|--------------------|---------------------|--------|
//! | any | ✅ | any | any | store (+ optional wipe) |
//! | ❌ | ❌ | ✅ | any | store (+ optional wipe) |
//! | ✅ | ❌ | any | ✅ | retrieve |
//! | otherwise | | | | nothing |
//!
//! [`Item`]: crate::item::Item
//! [`Registry`]: crate::registry::Registry
//! [`EepromManager`]: crate::manager::EepromManager

#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::new_without_default)]

// Core infrastructure modules
pub mod error;
pub mod memory;
pub mod storage;
pub mod traits;

// Layout and persistence
pub mod item;
pub mod manager;
pub mod registry;

// Configuration presets
pub mod configs;

/// Prelude module of eeprom-items
///
/// Convenient re-exports for common eeprom-items types and traits
pub mod prelude {

    // Re-export core traits
    pub use crate::traits::{Persistable, PersistentItem};

    // Re-export medium configuration
    pub use crate::memory::{ConfigValidator, DefaultConfig, EepromConfig, define_eeprom_config};

    // Re-export error types
    pub use crate::error::{EepromError, EepromResult, RegistrationError};

    // Re-export configuration presets
    pub use crate::configs::*;

    // Re-export storage
    pub use crate::storage::{EepromStorage, RamEeprom};

    // Re-export layout and persistence types
    pub use crate::item::{Handle, Item};
    pub use crate::manager::{BeginAction, BeginFlags, BeginOutcome, EepromManager};
    pub use crate::registry::Registry;
}
