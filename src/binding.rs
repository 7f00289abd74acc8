//! Keeps a customer's deal record and the matching inventory item consistent.
//!
//! Inventory `status`, `customer_id`, and the reservation timestamps are
//! derived state: functions in this module are the only code that writes
//! them. The registries call in here on every customer save/delete and on
//! inventory deletes; UI-submitted records never carry these fields through
//! (see `db`). Everything here is pure over in-memory collections — the
//! caller owns loading, saving, and the current date.
//!
//! A VIN that matches no inventory item is not an error: the customer simply
//! keeps manually entered vehicle fields with no live inventory link.

use chrono::NaiveDate;

use crate::types::{Customer, DeliveryStatus, InventoryItem, InventoryStatus, VIN_LENGTH};

/// Map a customer's delivery status to the bound item's status. Total over
/// the enum: every delivery state has exactly one inventory state.
pub fn derive_inventory_status(delivery: DeliveryStatus) -> InventoryStatus {
    match delivery {
        DeliveryStatus::Negotiating => InventoryStatus::Negotiating,
        DeliveryStatus::AwaitingDelivery | DeliveryStatus::Delivered => InventoryStatus::Sold,
        DeliveryStatus::Cancelled => InventoryStatus::Available,
    }
}

/// Look up an inventory item by VIN. First match wins — VIN uniqueness is
/// not enforced at the data-model level.
pub fn find_by_vin<'a>(inventory: &'a [InventoryItem], vin: &str) -> Option<&'a InventoryItem> {
    if vin.is_empty() {
        return None;
    }
    inventory.iter().find(|item| item.vehicle_info.vin_number == vin)
}

/// The single unbinding operation: back to available, no customer, no
/// reservation timestamps. Idempotent — releasing an already-available item
/// changes nothing. Returns whether any field changed.
pub fn release_item(item: &mut InventoryItem) -> bool {
    if item.status == InventoryStatus::Available
        && item.customer_id.is_none()
        && item.reserved_date.is_empty()
        && item.sold_date.is_empty()
    {
        return false;
    }
    item.status = InventoryStatus::Available;
    item.customer_id = None;
    item.reserved_date.clear();
    item.sold_date.clear();
    true
}

/// Release whichever item carries this VIN. Returns whether an item was
/// found (a found-but-already-released item still counts as handled).
pub fn release_by_vin(inventory: &mut [InventoryItem], vin: &str) -> bool {
    if vin.is_empty() {
        return false;
    }
    match inventory
        .iter_mut()
        .find(|item| item.vehicle_info.vin_number == vin)
    {
        Some(item) => {
            release_item(item);
            true
        }
        None => false,
    }
}

/// Re-derive the bound item's state from a customer record being saved.
///
/// When the bound VIN changed, the old VIN's item is released first. Then,
/// if the new VIN matches an item, its status is recomputed from the
/// customer's delivery status, the back-reference is set, and
/// `reserved_date` is stamped with the contract date (or `today` when no
/// contract date is set). A Sold derivation stamps `sold_date` the same
/// way; other derivations keep an already-stamped `sold_date` untouched. A
/// derivation of Available releases the item entirely so an available item
/// never keeps a dangling customer reference.
///
/// Returns whether any inventory item was touched, so callers can skip the
/// save when nothing changed.
pub fn sync_inventory_with_customer(
    inventory: &mut [InventoryItem],
    customer: &Customer,
    previous_vin: Option<&str>,
    today: NaiveDate,
) -> bool {
    let vin = customer.vin_number.as_str();
    let mut touched = false;

    if let Some(prev) = previous_vin {
        if !prev.is_empty() && prev != vin {
            touched |= release_by_vin(inventory, prev);
        }
    }

    if vin.is_empty() {
        return touched;
    }

    let item = match inventory
        .iter_mut()
        .find(|item| item.vehicle_info.vin_number == vin)
    {
        Some(item) => item,
        None => return touched,
    };

    let status = derive_inventory_status(customer.delivery_status);
    if status == InventoryStatus::Available {
        return release_item(item) || touched;
    }

    let stamp = if customer.contract_date.is_empty() {
        today.format("%Y-%m-%d").to_string()
    } else {
        customer.contract_date.clone()
    };

    item.status = status;
    item.customer_id = Some(customer.id.clone());
    item.reserved_date = stamp.clone();
    if status == InventoryStatus::Sold {
        item.sold_date = stamp;
    }
    true
}

/// Inventory-delete rule: clear the bound customer's VIN mirrors so the
/// record no longer points at a vanished item. One-directional — the rest
/// of the deal record (model, pricing, milestones) is left alone.
pub fn unlink_customer_vehicle(customers: &mut [Customer], customer_id: &str) -> bool {
    match customers.iter_mut().find(|c| c.id == customer_id) {
        Some(customer) => {
            customer.vin_number.clear();
            customer.deal_info.vin_number.clear();
            true
        }
        None => false,
    }
}

/// Copy an item's vehicle snapshot and asking price into the customer's
/// deal record and refresh the denormalized list-view mirrors. Does not
/// touch the item — binding happens at save time via
/// `sync_inventory_with_customer`.
pub fn apply_vehicle_snapshot(customer: &mut Customer, item: &InventoryItem) {
    let vehicle = &item.vehicle_info;
    let deal = &mut customer.deal_info;
    deal.vin_number = vehicle.vin_number.clone();
    deal.car_model = vehicle.car_model.clone();
    deal.maker = vehicle.maker.clone();
    deal.color = vehicle.color.clone();
    deal.grade = vehicle.grade.clone();
    deal.year = vehicle.year.clone();
    deal.mileage = vehicle.mileage.clone();
    deal.model_type = vehicle.model_type.clone();
    deal.sales_price = item.sales_info.sales_price;

    customer.car_model = vehicle.car_model.clone();
    customer.vin_number = vehicle.vin_number.clone();
}

/// VIN auto-complete: once the deal's VIN field holds a complete
/// 17-character VIN that matches an inventory item, copy the snapshot in.
/// Shorter (or unmatched) values do nothing. Status and binding are not
/// changed here — that happens when the record is saved.
pub fn autofill_deal_from_vin(customer: &mut Customer, inventory: &[InventoryItem]) -> bool {
    let vin = customer.deal_info.vin_number.clone();
    if vin.chars().count() != VIN_LENGTH {
        return false;
    }
    match find_by_vin(inventory, &vin) {
        Some(item) => {
            apply_vehicle_snapshot(customer, item);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIN_A: &str = "12345678901234567";
    const VIN_B: &str = "98765432109876543";

    fn item(id: &str, vin: &str) -> InventoryItem {
        let mut item = InventoryItem::default();
        item.id = id.to_string();
        item.vehicle_info.vin_number = vin.to_string();
        item.vehicle_info.car_model = "Prius".to_string();
        item.vehicle_info.maker = "Toyota".to_string();
        item.vehicle_info.color = "White".to_string();
        item.sales_info.sales_price = 1_980_000;
        item
    }

    fn customer(id: &str, vin: &str, delivery: DeliveryStatus) -> Customer {
        let mut customer = Customer::default();
        customer.id = id.to_string();
        customer.name = "Taro Yamada".to_string();
        customer.vin_number = vin.to_string();
        customer.deal_info.vin_number = vin.to_string();
        customer.delivery_status = delivery;
        customer
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 15).unwrap()
    }

    #[test]
    fn test_status_derivation_is_total() {
        assert_eq!(
            derive_inventory_status(DeliveryStatus::Negotiating),
            InventoryStatus::Negotiating
        );
        assert_eq!(
            derive_inventory_status(DeliveryStatus::AwaitingDelivery),
            InventoryStatus::Sold
        );
        assert_eq!(
            derive_inventory_status(DeliveryStatus::Delivered),
            InventoryStatus::Sold
        );
        assert_eq!(
            derive_inventory_status(DeliveryStatus::Cancelled),
            InventoryStatus::Available
        );
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut available = item("INV001", VIN_A);
        let before = available.clone();
        assert!(!release_item(&mut available));
        assert_eq!(available, before);
    }

    #[test]
    fn test_binding_round_trip_restores_release_fields() {
        let mut inventory = vec![item("INV001", VIN_A)];
        let pre = inventory[0].clone();

        let c = customer("C001", VIN_A, DeliveryStatus::Negotiating);
        assert!(sync_inventory_with_customer(&mut inventory, &c, None, today()));
        assert_eq!(inventory[0].status, InventoryStatus::Negotiating);
        assert_eq!(inventory[0].customer_id.as_deref(), Some("C001"));
        assert_eq!(inventory[0].reserved_date, "2025-02-15");

        assert!(release_by_vin(&mut inventory, VIN_A));
        assert_eq!(inventory[0].status, pre.status);
        assert_eq!(inventory[0].customer_id, pre.customer_id);
        assert_eq!(inventory[0].reserved_date, pre.reserved_date);
        assert_eq!(inventory[0].sold_date, pre.sold_date);
    }

    #[test]
    fn test_contract_date_wins_over_today() {
        let mut inventory = vec![item("INV001", VIN_A)];
        let mut c = customer("C001", VIN_A, DeliveryStatus::Delivered);
        c.contract_date = "2025-01-20".to_string();
        sync_inventory_with_customer(&mut inventory, &c, None, today());
        assert_eq!(inventory[0].status, InventoryStatus::Sold);
        assert_eq!(inventory[0].reserved_date, "2025-01-20");
        assert_eq!(inventory[0].sold_date, "2025-01-20");
    }

    #[test]
    fn test_sold_date_survives_reverting_to_negotiating() {
        let mut inventory = vec![item("INV001", VIN_A)];
        let mut c = customer("C001", VIN_A, DeliveryStatus::Delivered);
        sync_inventory_with_customer(&mut inventory, &c, None, today());
        assert_eq!(inventory[0].sold_date, "2025-02-15");

        c.delivery_status = DeliveryStatus::Negotiating;
        sync_inventory_with_customer(&mut inventory, &c, None, today());
        assert_eq!(inventory[0].status, InventoryStatus::Negotiating);
        // The earlier sold stamp is kept, not cleared, by a status revert.
        assert_eq!(inventory[0].sold_date, "2025-02-15");
    }

    #[test]
    fn test_cancelled_deal_releases_the_item() {
        let mut inventory = vec![item("INV001", VIN_A)];
        let mut c = customer("C001", VIN_A, DeliveryStatus::Negotiating);
        sync_inventory_with_customer(&mut inventory, &c, None, today());
        assert!(inventory[0].customer_id.is_some());

        c.delivery_status = DeliveryStatus::Cancelled;
        sync_inventory_with_customer(&mut inventory, &c, None, today());
        assert_eq!(inventory[0].status, InventoryStatus::Available);
        assert_eq!(inventory[0].customer_id, None);
        assert!(inventory[0].reserved_date.is_empty());
    }

    #[test]
    fn test_vin_change_releases_old_and_binds_new() {
        let mut inventory = vec![item("INV001", VIN_A), item("INV002", VIN_B)];
        let mut c = customer("C001", VIN_A, DeliveryStatus::Negotiating);
        sync_inventory_with_customer(&mut inventory, &c, None, today());
        assert_eq!(inventory[0].customer_id.as_deref(), Some("C001"));

        c.vin_number = VIN_B.to_string();
        c.deal_info.vin_number = VIN_B.to_string();
        sync_inventory_with_customer(&mut inventory, &c, Some(VIN_A), today());

        assert_eq!(inventory[0].status, InventoryStatus::Available);
        assert_eq!(inventory[0].customer_id, None);
        assert_eq!(inventory[1].status, InventoryStatus::Negotiating);
        assert_eq!(inventory[1].customer_id.as_deref(), Some("C001"));
    }

    #[test]
    fn test_unmatched_vin_is_tolerated() {
        let mut inventory = vec![item("INV001", VIN_A)];
        let c = customer("C001", "00000000000000000", DeliveryStatus::Negotiating);
        assert!(!sync_inventory_with_customer(&mut inventory, &c, None, today()));
        assert_eq!(inventory[0].status, InventoryStatus::Available);
    }

    #[test]
    fn test_unlink_clears_only_vin_mirrors() {
        let mut c = customer("C001", VIN_A, DeliveryStatus::Negotiating);
        c.deal_info.car_model = "Prius".to_string();
        c.deal_info.sales_price = 1_980_000;
        let mut customers = vec![c];

        assert!(unlink_customer_vehicle(&mut customers, "C001"));
        assert!(customers[0].vin_number.is_empty());
        assert!(customers[0].deal_info.vin_number.is_empty());
        assert_eq!(customers[0].deal_info.car_model, "Prius");
        assert_eq!(customers[0].deal_info.sales_price, 1_980_000);

        assert!(!unlink_customer_vehicle(&mut customers, "C999"));
    }

    #[test]
    fn test_autofill_requires_complete_vin() {
        let inventory = vec![item("INV001", VIN_A)];

        let mut c = Customer::default();
        c.deal_info.vin_number = VIN_A[..16].to_string();
        assert!(!autofill_deal_from_vin(&mut c, &inventory));
        assert!(c.deal_info.car_model.is_empty());

        c.deal_info.vin_number = VIN_A.to_string();
        assert!(autofill_deal_from_vin(&mut c, &inventory));
        assert_eq!(c.deal_info.car_model, "Prius");
        assert_eq!(c.deal_info.maker, "Toyota");
        assert_eq!(c.deal_info.sales_price, 1_980_000);
        assert_eq!(c.car_model, "Prius");
        assert_eq!(c.vin_number, VIN_A);
    }

    #[test]
    fn test_first_match_wins_on_duplicate_vins() {
        let mut first = item("INV001", VIN_A);
        first.sales_info.display_location = "Main lot".to_string();
        let second = item("INV002", VIN_A);
        let inventory = vec![first, second];
        let found = find_by_vin(&inventory, VIN_A).unwrap();
        assert_eq!(found.id, "INV001");
    }
}
