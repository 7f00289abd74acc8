use super::*;

use crate::binding;
use crate::types::InventoryStatus;

impl<S: RecordStore> DealerDb<S> {
    // =========================================================================
    // Inventory
    // =========================================================================

    fn validate_inventory(item: &InventoryItem) -> Result<(), DbError> {
        if item.purchase_info.purchase_date.trim().is_empty() {
            return Err(DbError::MissingField("purchaseInfo.purchaseDate"));
        }
        if item.vehicle_info.vin_number.trim().is_empty() {
            return Err(DbError::MissingField("vehicleInfo.vinNumber"));
        }
        if item.sales_info.sales_price <= 0 {
            return Err(DbError::MissingField("salesInfo.salesPrice"));
        }
        Ok(())
    }

    fn sanitize_inventory(item: &mut InventoryItem) {
        item.purchase_info.legal_fees =
            normalize_fee_rows(std::mem::take(&mut item.purchase_info.legal_fees));
        item.purchase_info.options =
            normalize_option_rows(std::mem::take(&mut item.purchase_info.options));
    }

    /// Register incoming stock. Assigns the next `INV###` id. New stock is
    /// never born reserved — whatever lifecycle fields the form carried are
    /// reset, and a binding can only be established through a customer save.
    pub fn create_inventory_item(&self, mut item: InventoryItem) -> Result<InventoryItem, DbError> {
        Self::validate_inventory(&item)?;

        let mut items = self.inventory();
        item.id = next_sequential_id("INV", items.iter().map(|i| i.id.as_str()));
        Self::sanitize_inventory(&mut item);
        item.status = InventoryStatus::Available;
        item.customer_id = None;
        item.reserved_date.clear();
        item.sold_date.clear();

        items.push(item.clone());
        self.save_inventory(&items)?;
        Ok(item)
    }

    /// Replace an item's purchase/vehicle/sales sections with an edited
    /// record. The synchronizer-owned fields — status, customer reference,
    /// reservation timestamps — always come from the stored row, so a form
    /// can never flip an item's lifecycle directly. Returns `Ok(None)` when
    /// the id does not exist.
    pub fn update_inventory_item(
        &self,
        id: &str,
        mut record: InventoryItem,
    ) -> Result<Option<InventoryItem>, DbError> {
        Self::validate_inventory(&record)?;

        let mut items = self.inventory();
        let index = match items.iter().position(|i| i.id == id) {
            Some(index) => index,
            None => return Ok(None),
        };

        let stored = &items[index];
        record.id = stored.id.clone();
        record.status = stored.status;
        record.customer_id = stored.customer_id.clone();
        record.reserved_date = stored.reserved_date.clone();
        record.sold_date = stored.sold_date.clone();
        Self::sanitize_inventory(&mut record);

        items[index] = record.clone();
        self.save_inventory(&items)?;
        Ok(Some(record))
    }

    /// Delete an inventory item. If a customer was bound to it, their VIN
    /// mirrors are cleared so the record no longer points at vanished
    /// stock; the rest of their deal record is untouched. Returns whether a
    /// record was removed.
    pub fn delete_inventory_item(&self, id: &str) -> Result<bool, DbError> {
        let mut items = self.inventory();
        let index = match items.iter().position(|i| i.id == id) {
            Some(index) => index,
            None => return Ok(false),
        };

        let removed = items.remove(index);
        if let Some(customer_id) = &removed.customer_id {
            let mut customers = self.customers();
            if binding::unlink_customer_vehicle(&mut customers, customer_id) {
                self.save_customers(&customers)?;
            } else {
                log::warn!(
                    "inventory {} referenced missing customer {}; nothing to unlink",
                    removed.id,
                    customer_id
                );
            }
        }

        self.save_inventory(&items)?;
        Ok(true)
    }

    /// Look up stock by VIN. First match wins on duplicate VINs.
    pub fn find_inventory_by_vin(&self, vin: &str) -> Option<InventoryItem> {
        binding::find_by_vin(&self.inventory(), vin).cloned()
    }

    pub fn find_inventory_item(&self, id: &str) -> Option<InventoryItem> {
        self.inventory().into_iter().find(|i| i.id == id)
    }

    /// Items currently open for selection in the picker.
    pub fn available_inventory(&self) -> Vec<InventoryItem> {
        self.inventory()
            .into_iter()
            .filter(|item| item.status == InventoryStatus::Available)
            .collect()
    }

    /// Case-insensitive substring search over model, maker, VIN, year,
    /// color, and display location. An empty query returns everything.
    pub fn search_inventory(&self, query: &str) -> Vec<InventoryItem> {
        let items = self.inventory();
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return items;
        }
        items
            .into_iter()
            .filter(|item| matches_query(item, &query))
            .collect()
    }

    /// Explicit picker flow: copy the item's snapshot into the customer's
    /// deal record and reconcile the binding in one step. Returns `Ok(false)`
    /// when either side is missing.
    pub fn bind_inventory_to_customer(&self, customer_id: &str, vin: &str) -> Result<bool, DbError> {
        let mut customers = self.customers();
        let index = match customers.iter().position(|c| c.id == customer_id) {
            Some(index) => index,
            None => return Ok(false),
        };

        let mut inventory = self.inventory();
        let item = match binding::find_by_vin(&inventory, vin) {
            Some(item) => item.clone(),
            None => return Ok(false),
        };

        let previous_vin = customers[index].vin_number.clone();
        binding::apply_vehicle_snapshot(&mut customers[index], &item);

        if binding::sync_inventory_with_customer(
            &mut inventory,
            &customers[index],
            Some(&previous_vin),
            self.today(),
        ) {
            self.save_inventory(&inventory)?;
        }
        self.save_customers(&customers)?;
        Ok(true)
    }

    /// Put an item back on the lot regardless of what it was bound to.
    /// Returns whether an item with this VIN exists.
    pub fn release_inventory(&self, vin: &str) -> Result<bool, DbError> {
        let mut inventory = self.inventory();
        if binding::release_by_vin(&mut inventory, vin) {
            self.save_inventory(&inventory)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

fn matches_query(item: &InventoryItem, query: &str) -> bool {
    let vehicle = &item.vehicle_info;
    vehicle.car_model.to_lowercase().contains(query)
        || vehicle.maker.to_lowercase().contains(query)
        || vehicle.vin_number.to_lowercase().contains(query)
        || vehicle.year.contains(query)
        || vehicle.color.to_lowercase().contains(query)
        || item.sales_info.display_location.to_lowercase().contains(query)
}
