//! Persistent Settings Example
//!
//! Declare a few settings, load them at startup, and persist changes.

use eeprom_items::prelude::*;

/// A user-defined value with its own byte image
#[derive(Debug, Clone, Copy, PartialEq)]
struct ServoTrim {
    center: u16,
    reversed: bool,
}

impl Persistable for ServoTrim {
    type Bytes = [u8; 3];

    fn to_bytes(&self) -> [u8; 3] {
        let [lo, hi] = self.center.to_le_bytes();
        [lo, hi, self.reversed as u8]
    }

    fn from_bytes(bytes: &[u8; 3]) -> Self {
        Self {
            center: u16::from_le_bytes([bytes[0], bytes[1]]),
            reversed: bytes[2] != 0,
        }
    }
}

fn main() -> Result<(), &'static str> {
    ConfigValidator::validate_all::<ATmega328PConfig>()?;

    // Items with their defaults, in layout order
    let volume = Item::new(5u8);
    let trim = Item::new(ServoTrim {
        center: 1500,
        reversed: false,
    });
    let boot_count = Item::new(0u32);

    let mut eeprom = EepromManager::<_, ATmega328PConfig>::new(RamEeprom::<1024>::new());
    eeprom.register(&volume);
    eeprom.register(&trim);
    eeprom.register(&boot_count);

    let was_valid = eeprom.begin(BeginFlags::DEFAULT);
    println!("Stored layout valid: {}", was_valid);
    println!("Layout ends at address {}", eeprom.registry().next_address());

    // Count this boot
    eeprom.set(&boot_count, boot_count.get() + 1);

    // Adjusting the trim persists immediately, but only if it changed
    let written = eeprom.set(
        &trim,
        ServoTrim {
            center: 1520,
            reversed: false,
        },
    );
    println!("Trim written: {}", written);

    println!("Volume: {}", volume.get());
    println!("Trim: {:?}", trim.get());
    println!("Boots: {}", boot_count.get());
    println!("All items match storage: {}", eeprom.verify_all());
    println!("Bytes written so far: {}", eeprom.storage().total_writes());

    Ok(())
}
