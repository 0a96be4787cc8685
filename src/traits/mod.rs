//! Core traits module
//!
//! This module defines the value encoding and item capability traits the
//! registry and persistence manager are built on.

pub mod item;
pub mod persistable;

// Re-export main traits
pub use item::PersistentItem;
pub use persistable::Persistable;
