//! Layout Change Example
//!
//! Firmware v2 inserts an item; the signature no longer matches, so the
//! stored image is not trusted and defaults are written instead.

use eeprom_items::prelude::*;

fn main() {
    let storage = {
        let speed = Item::new(10u8);
        let mut eeprom = EepromManager::<_, DefaultConfig>::new(RamEeprom::<1024>::new());
        eeprom.register(&speed);
        eeprom.begin(BeginFlags::DEFAULT);
        eeprom.set(&speed, 42);
        println!("v1 signature: {:#06x}", eeprom.registry().signature());
        eeprom.into_storage()
    };

    let mode = Item::new(1u8);
    let speed = Item::new(10u8);
    let late = Item::new(0u16);
    let mut eeprom = EepromManager::<_, DefaultConfig>::new(storage);
    eeprom.register(&mode);
    eeprom.register(&speed);

    // Inspect without acting first
    let valid = eeprom.begin(BeginFlags::NONE);
    println!("v2 signature: {:#06x}", eeprom.registry().signature());
    println!("Stored image valid for v2 layout: {}", valid);
    println!("retrieve_all refused: {}", !eeprom.retrieve_all());

    // Decide to start over
    let outcome = eeprom.begin_with_outcome(BeginFlags::NONE.store_if_invalid());
    println!("Action: {:?}, speed = {}", outcome.action, speed.get());

    // Adding an item now is too late for this layout
    match eeprom.try_register(&late) {
        Ok(handle) => println!("registered at {}", handle.address()),
        Err(error) => println!("late item rejected: {}", error),
    }
}
