//! Error handling module for eeprom-items
//!
//! This module provides the error types used by registration and layout checks.

pub mod registration;
pub mod types;

// Re-export main types
pub use registration::RegistrationError;
pub use types::{EepromError, EepromResult};
