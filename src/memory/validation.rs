//! Configuration validation utilities
//!
//! This module provides runtime validation to ensure configurations are
//! usable before a layout is built on top of them.

use crate::memory::EepromConfig;

/// Configuration validator for runtime verification
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates the configuration at runtime
    pub fn validate<C: EepromConfig>() -> Result<(), &'static str> {
        C::validate()
    }

    /// Checks that the medium fits the 16-bit address space
    pub fn check_address_space<C: EepromConfig>() -> Result<(), &'static str> {
        if C::SIZE == 0 {
            return Err("SIZE must be non-zero");
        }

        if C::SIZE > u16::MAX as usize + 1 {
            return Err("SIZE cannot exceed the 16-bit address space");
        }

        Ok(())
    }

    /// Checks that a layout of `layout_bytes` item bytes fits with its signature
    pub fn check_layout_fits<C: EepromConfig>(layout_bytes: usize) -> Result<(), &'static str> {
        if layout_bytes > C::data_capacity() {
            return Err("layout and signature exceed the medium");
        }

        Ok(())
    }

    /// Comprehensive validation of all configuration aspects
    pub fn validate_all<C: EepromConfig>() -> Result<(), &'static str> {
        Self::check_address_space::<C>()?;

        Self::check_layout_fits::<C>(0)?;

        C::validate()?;

        Ok(())
    }
}
