//! Configuration presets module
//!
//! This module provides pre-defined medium configurations for common parts.

use crate::memory::define_eeprom_config;

// AVR on-chip EEPROM
define_eeprom_config! {
    name: ATmega328PConfig,
    size: 1024,  // E2END = 0x3FF
    max_items: 32,
}

define_eeprom_config! {
    name: ATmega32U4Config,
    size: 1024,  // E2END = 0x3FF
    max_items: 32,
}

define_eeprom_config! {
    name: ATmega2560Config,
    size: 4096,  // E2END = 0xFFF
    max_items: 64,
}

define_eeprom_config! {
    name: ATtiny85Config,
    size: 512,  // E2END = 0x1FF
    max_items: 16,
}

// External serial EEPROM
define_eeprom_config! {
    name: Serial24LC256Config,
    size: 32 * 1024,  // 256 Kbit
    max_items: 128,
}
