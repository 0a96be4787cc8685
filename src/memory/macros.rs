//! Configuration macros
//!
//! This module provides the `define_eeprom_config!` macro for easy creation
//! of custom medium configurations.

/// Macro to define a custom medium configuration
///
/// This macro creates a new struct that implements the `EepromConfig` trait
/// with user-specified values. Optional fields fall back to the usual AVR
/// defaults.
///
/// # Example
///
/// ```rust
/// use eeprom_items::memory::define_eeprom_config;
///
/// define_eeprom_config! {
///     name: MyBoardConfig,
///     size: 512,
///     max_items: 16,
/// }
/// ```
#[macro_export]
macro_rules! define_eeprom_config {
    (
        name: $name:ident,
        size: $size:expr,
        max_items: $items:expr
        $(, erased_byte: $erased:expr)?
        $(,)?
    ) => {
        /// Custom medium configuration
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl $crate::memory::EepromConfig for $name {
            const SIZE: usize = $size;
            const MAX_ITEMS: usize = $items;

            // Optional parameters with defaults
            const ERASED_BYTE: u8 = $crate::define_eeprom_config!(@default $($erased)?, 0xFF);
        }

        // Call $name::validate() at runtime to check the configuration
    };

    // Helper macro for default values
    (@default $value:expr, $default:expr) => { $value };
    (@default , $default:expr) => { $default };
}

// Re-export the macro for convenience
pub use define_eeprom_config;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::EepromConfig;

    define_eeprom_config! {
        name: TestConfig,
        size: 256,
        max_items: 8,
    }

    #[test]
    fn test_macro_generated_config() {
        assert_eq!(TestConfig::SIZE, 256);
        assert_eq!(TestConfig::MAX_ITEMS, 8);

        // Check defaults
        assert_eq!(TestConfig::ERASED_BYTE, 0xFF);
        assert_eq!(TestConfig::SIGNATURE_SIZE, 2);
        assert!(TestConfig::validate().is_ok());
    }

    define_eeprom_config! {
        name: ZeroErasedConfig,
        size: 64,
        max_items: 4,
        erased_byte: 0x00,
    }

    #[test]
    fn test_macro_with_custom_values() {
        assert_eq!(ZeroErasedConfig::ERASED_BYTE, 0x00);
        assert_eq!(ZeroErasedConfig::top_address(), 63);
        assert!(ZeroErasedConfig::validate().is_ok());
    }
}
