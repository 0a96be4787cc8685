//! First Boot Detection Example
//!
//! Simulate two power cycles: the first writes the defaults, the second
//! loads what the first one left behind.

use eeprom_items::prelude::*;

type Board<'a> = EepromManager<'a, RamEeprom<512>, ATtiny85Config>;

fn power_cycle(storage: RamEeprom<512>, new_threshold: Option<i16>) -> RamEeprom<512> {
    let threshold = Item::new(-40i16);
    let alarm_enabled = Item::new(true);

    let mut eeprom = Board::new(storage);
    eeprom.register(&threshold);
    eeprom.register(&alarm_enabled);

    let outcome = eeprom.begin_with_outcome(BeginFlags::DEFAULT.wipe_unused());
    if outcome.is_fresh_layout() {
        println!(
            "First boot: defaults written, {} stale bytes erased",
            outcome.wiped_bytes
        );
    } else {
        println!("Warm boot: {:?}", outcome.action);
    }
    println!("  threshold = {}", threshold.get());

    if let Some(value) = new_threshold {
        threshold.set_and_persist(value, eeprom.storage_mut());
        println!("  threshold changed to {}", value);
    }

    eeprom.into_storage()
}

fn main() {
    // A medium full of leftovers from some other firmware
    let storage = RamEeprom::<512>::filled(0x00);

    let storage = power_cycle(storage, Some(-25));
    let _ = power_cycle(storage, None);
}
