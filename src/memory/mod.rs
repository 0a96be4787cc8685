//! Medium configuration module for eeprom-items
//!
//! This module provides compile-time configuration of the non-volatile medium
//! and runtime validation of those configurations.

pub mod config;
pub mod macros;
pub mod validation;

// Re-export main types
pub use config::{Address, DefaultConfig, EepromConfig};
pub use macros::define_eeprom_config;
pub use validation::ConfigValidator;
