//! Property-based tests for the item registry
//!
//! This module tests the layout invariants of registration:
//! - Addresses are the running totals of the sizes, in registration order
//! - Active ranges never overlap
//! - Zero-size and late items are inactive and do not move the cursor
//! - The signature depends only on the ordered sizes

#![allow(special_module_name)]

use eeprom_items::prelude::*;
use eeprom_items::registry::compute_signature;
use proptest::prelude::*;

use lib::*;

proptest! {
    #![proptest_config(layout_config())]

    /// Property: item i starts at s_0 + ... + s_{i-1}
    #[test]
    fn addresses_are_running_totals(sizes in layout_strategy()) {
        let blobs = blobs_for_layout(&sizes);
        let mut registry = Registry::<TestConfig>::new();
        for blob in &blobs {
            registry.register(blob);
        }

        let addresses: Vec<u16> = registry.handles().map(|h| h.address()).collect();
        prop_assert_eq!(addresses, expected_addresses(&sizes));
        prop_assert_eq!(registry.next_address() as usize, sizes.iter().sum::<usize>());
    }

    /// Property: no two active ranges share a byte
    #[test]
    fn ranges_are_disjoint(sizes in layout_strategy()) {
        let blobs = blobs_for_layout(&sizes);
        let mut registry = Registry::<TestConfig>::new();
        for blob in &blobs {
            registry.register(blob);
        }

        let handles: Vec<Handle> = registry.handles().collect();
        prop_assert!(assert_disjoint(&handles));
    }

    /// Property: zero-size items never receive a range or shift later items
    #[test]
    fn zero_size_items_are_skipped(
        sizes in layout_strategy(),
        gaps in prop::collection::vec(any::<bool>(), 12),
    ) {
        let mut layout = Vec::new();
        for (i, &size) in sizes.iter().enumerate() {
            if gaps[i] {
                layout.push(0);
            }
            layout.push(size);
        }

        let blobs = blobs_for_layout(&layout);
        let mut registry = Registry::<TestConfig>::new();
        for blob in &blobs {
            registry.register(blob);
        }

        for blob in blobs.iter().filter(|b| b.byte_size() == 0) {
            prop_assert!(!blob.is_active());
        }
        prop_assert_eq!(registry.len(), sizes.len());

        let addresses: Vec<u16> = registry.handles().map(|h| h.address()).collect();
        prop_assert_eq!(addresses, expected_addresses(&sizes));
    }

    /// Property: after finalize, new items are inactive and the layout is unchanged
    #[test]
    fn late_items_are_inactive(sizes in layout_strategy(), late_size in item_size_strategy()) {
        let blobs = blobs_for_layout(&sizes);
        let late = BlobItem::zeroed(late_size);

        let mut registry = Registry::<TestConfig>::new();
        for blob in &blobs {
            registry.register(blob);
        }
        let signature = registry.finalize();
        let next_address = registry.next_address();

        prop_assert_eq!(registry.register(&late), Handle::INACTIVE);
        prop_assert_eq!(registry.next_address(), next_address);
        prop_assert_eq!(registry.len(), sizes.len());
        prop_assert_eq!(registry.finalize(), signature);
    }

    /// Property: the signature is a non-zero function of the ordered sizes
    #[test]
    fn signature_depends_on_sizes_only(sizes in layout_strategy(), fill in any::<u8>()) {
        let blobs = blobs_for_layout(&sizes);
        let mut registry = Registry::<TestConfig>::new();
        for blob in &blobs {
            blob.fill(fill);
            registry.register(blob);
        }

        let signature = registry.finalize();
        prop_assert_ne!(signature, 0);
        prop_assert_eq!(signature, compute_signature(sizes.iter().map(|&s| s as u16)));
    }
}

#[test]
fn swapping_two_items_changes_signature() {
    for a in 1u16..=64 {
        for b in 1u16..=64 {
            if a != b {
                assert_ne!(compute_signature([a, b]), compute_signature([b, a]));
            }
        }
    }
}

#[test]
fn single_item_signatures_are_distinct() {
    let signatures: Vec<u16> = (1u16..=256).map(|size| compute_signature([size])).collect();
    let mut sorted = signatures.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), signatures.len());
}
