//! Forward migrations for loaded record collections.
//!
//! Older blobs predate some fields; serde defaults cover newly introduced
//! scalars, and the backfills here repair derived fields that default to the
//! wrong thing (empty mirrors, missing concatenated address, stale customer
//! references on released items). They run on every successful load and are
//! idempotent — a repaired collection passes through unchanged, so the
//! persist-after-migrate step only fires once per stale blob.

use crate::types::{Customer, InventoryItem, InventoryStatus};

/// Backfill derived customer fields. Returns whether anything changed.
pub fn backfill_customers(customers: &mut Vec<Customer>) -> bool {
    let mut changed = false;

    for customer in customers.iter_mut() {
        // List views read the denormalized mirrors, older editors only wrote
        // the deal record.
        if customer.vin_number.is_empty() && !customer.deal_info.vin_number.is_empty() {
            customer.vin_number = customer.deal_info.vin_number.clone();
            changed = true;
        }
        if customer.car_model.is_empty() && !customer.deal_info.car_model.is_empty() {
            customer.car_model = customer.deal_info.car_model.clone();
            changed = true;
        }

        if customer.address.is_empty() {
            let address = compose_address(&customer.address1, &customer.address2);
            if !address.is_empty() {
                customer.address = address;
                changed = true;
            }
        }
    }

    changed
}

/// Backfill and repair inventory records. Returns whether anything changed.
pub fn backfill_inventory(items: &mut Vec<InventoryItem>) -> bool {
    let mut changed = false;

    for item in items.iter_mut() {
        // Historical delete paths released items without clearing the
        // back-reference. An available item never keeps one.
        if item.status == InventoryStatus::Available && item.customer_id.is_some() {
            log::warn!(
                "inventory {} was available but still referenced customer {:?}; clearing",
                item.id,
                item.customer_id
            );
            item.customer_id = None;
            changed = true;
        }
    }

    changed
}

/// Concatenated list-view address from the two address lines.
pub(crate) fn compose_address(address1: &str, address2: &str) -> String {
    match (address1.is_empty(), address2.is_empty()) {
        (true, true) => String::new(),
        (false, true) => address1.to_string(),
        (true, false) => address2.to_string(),
        (false, false) => format!("{address1} {address2}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirrors_are_backfilled_from_deal() {
        let mut customer = Customer::default();
        customer.id = "C001".to_string();
        customer.deal_info.vin_number = "12345678901234567".to_string();
        customer.deal_info.car_model = "Prius".to_string();
        let mut customers = vec![customer];

        assert!(backfill_customers(&mut customers));
        assert_eq!(customers[0].vin_number, "12345678901234567");
        assert_eq!(customers[0].car_model, "Prius");

        // Second pass is a no-op.
        assert!(!backfill_customers(&mut customers));
    }

    #[test]
    fn test_address_is_composed_once() {
        let mut customer = Customer::default();
        customer.address1 = "Sakae, Naka-ku, Nagoya, Aichi".to_string();
        customer.address2 = "1-2-3".to_string();
        let mut customers = vec![customer];

        assert!(backfill_customers(&mut customers));
        assert_eq!(customers[0].address, "Sakae, Naka-ku, Nagoya, Aichi 1-2-3");
        assert!(!backfill_customers(&mut customers));
    }

    #[test]
    fn test_manual_mirror_values_are_left_alone() {
        let mut customer = Customer::default();
        customer.car_model = "Custom label".to_string();
        customer.deal_info.car_model = "Prius".to_string();
        let mut customers = vec![customer];

        backfill_customers(&mut customers);
        assert_eq!(customers[0].car_model, "Custom label");
    }

    #[test]
    fn test_dangling_reference_on_available_item_is_cleared() {
        let mut item = InventoryItem::default();
        item.id = "INV001".to_string();
        item.customer_id = Some("C999".to_string());
        let mut items = vec![item];

        assert!(backfill_inventory(&mut items));
        assert_eq!(items[0].customer_id, None);
        assert!(!backfill_inventory(&mut items));
    }

    #[test]
    fn test_bound_items_are_untouched() {
        let mut item = InventoryItem::default();
        item.status = InventoryStatus::Negotiating;
        item.customer_id = Some("C001".to_string());
        let mut items = vec![item];

        assert!(!backfill_inventory(&mut items));
        assert_eq!(items[0].customer_id.as_deref(), Some("C001"));
    }
}
