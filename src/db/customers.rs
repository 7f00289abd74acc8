use super::*;

use crate::binding;
use crate::types::{DealMemo, Milestone};

impl<S: RecordStore> DealerDb<S> {
    // =========================================================================
    // Customers
    // =========================================================================

    fn validate_customer(customer: &Customer) -> Result<(), DbError> {
        if customer.name.trim().is_empty() {
            return Err(DbError::MissingField("name"));
        }
        Ok(())
    }

    /// Normalize a form-submitted record before it is persisted: drop
    /// placeholder option rows, derive the shipping fee from the auction
    /// house, refresh the denormalized list-view mirrors.
    fn sanitize_customer(customer: &mut Customer) {
        customer.deal_info.options =
            normalize_option_rows(std::mem::take(&mut customer.deal_info.options));

        if let Some(fee) = seed::shipping_fee_for(&customer.deal_info.auction_house) {
            customer.deal_info.shipping_fee = fee;
        }

        customer.vin_number = customer.deal_info.vin_number.clone();
        customer.car_model = customer.deal_info.car_model.clone();

        if customer.address.is_empty() {
            customer.address =
                migrations::compose_address(&customer.address1, &customer.address2);
        }
    }

    /// Register a new customer. Assigns the next `C###` id, stamps
    /// `addedDate`, and reconciles inventory against the submitted VIN and
    /// delivery status before persisting.
    pub fn create_customer(&self, mut customer: Customer) -> Result<Customer, DbError> {
        Self::validate_customer(&customer)?;

        let mut customers = self.customers();
        customer.id = next_sequential_id("C", customers.iter().map(|c| c.id.as_str()));
        customer.added_date = self.today_string();
        Self::sanitize_customer(&mut customer);

        let mut inventory = self.inventory();
        if binding::sync_inventory_with_customer(&mut inventory, &customer, None, self.today()) {
            self.save_inventory(&inventory)?;
        }

        customers.push(customer.clone());
        self.save_customers(&customers)?;
        Ok(customer)
    }

    /// Replace a customer record with an edited one. The stored id and
    /// `addedDate` win over whatever the form submitted. A changed VIN
    /// releases the previously bound item. Returns `Ok(None)` when the id
    /// does not exist.
    pub fn update_customer(
        &self,
        id: &str,
        mut record: Customer,
    ) -> Result<Option<Customer>, DbError> {
        Self::validate_customer(&record)?;

        let mut customers = self.customers();
        let index = match customers.iter().position(|c| c.id == id) {
            Some(index) => index,
            None => return Ok(None),
        };

        let previous_vin = customers[index].vin_number.clone();
        record.id = customers[index].id.clone();
        record.added_date = customers[index].added_date.clone();
        Self::sanitize_customer(&mut record);

        let mut inventory = self.inventory();
        if binding::sync_inventory_with_customer(
            &mut inventory,
            &record,
            Some(&previous_vin),
            self.today(),
        ) {
            self.save_inventory(&inventory)?;
        }

        customers[index] = record.clone();
        self.save_customers(&customers)?;
        Ok(Some(record))
    }

    /// Delete a customer and release their bound inventory item. Returns
    /// whether a record was removed.
    pub fn delete_customer(&self, id: &str) -> Result<bool, DbError> {
        let mut customers = self.customers();
        let index = match customers.iter().position(|c| c.id == id) {
            Some(index) => index,
            None => return Ok(false),
        };

        let removed = customers.remove(index);
        if !removed.vin_number.is_empty() {
            let mut inventory = self.inventory();
            if binding::release_by_vin(&mut inventory, &removed.vin_number) {
                self.save_inventory(&inventory)?;
            }
        }

        self.save_customers(&customers)?;
        Ok(true)
    }

    pub fn find_customer(&self, id: &str) -> Option<Customer> {
        self.customers().into_iter().find(|c| c.id == id)
    }

    /// Append a timestamped memo to a customer's deal record. Memos are
    /// append-only; there is no edit or delete.
    pub fn add_deal_memo(&self, id: &str, content: &str) -> Result<Option<DealMemo>, DbError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(DbError::MissingField("content"));
        }

        let mut customers = self.customers();
        let customer = match customers.iter_mut().find(|c| c.id == id) {
            Some(customer) => customer,
            None => return Ok(None),
        };

        let memo = DealMemo {
            id: Uuid::new_v4().to_string(),
            date: self.today_string(),
            content: content.to_string(),
        };
        customer.deal_info.deal_memos.push(memo.clone());
        self.save_customers(&customers)?;
        Ok(Some(memo))
    }

    /// Check or uncheck a milestone. Checking stamps today's date; an
    /// uncheck keeps the old stamp so the history stays visible. Follow-up
    /// milestones are rejected while the customer has `noFollowUp` set.
    pub fn set_milestone(
        &self,
        id: &str,
        milestone: Milestone,
        checked: bool,
    ) -> Result<Option<Customer>, DbError> {
        let mut customers = self.customers();
        let customer = match customers.iter_mut().find(|c| c.id == id) {
            Some(customer) => customer,
            None => return Ok(None),
        };

        if milestone.is_follow_up() && customer.deal_info.no_follow_up {
            return Err(DbError::FollowUpsDisabled);
        }

        let today = self.today_string();
        let status = customer.deal_info.statuses.get_mut(milestone);
        status.checked = checked;
        if checked {
            status.date = today;
        }

        let updated = customer.clone();
        self.save_customers(&customers)?;
        Ok(Some(updated))
    }

    /// VIN auto-complete for an in-progress edit: when the deal's VIN field
    /// holds a complete 17-character VIN that matches stock, copy the
    /// vehicle snapshot in. Binding itself happens at save time.
    pub fn autofill_deal_from_vin(&self, customer: &mut Customer) -> bool {
        binding::autofill_deal_from_vin(customer, &self.inventory())
    }
}
