//! Shared type definitions for the dealership domain.
//!
//! These structs mirror the persisted blob format (camelCase JSON) exactly:
//! the shell reads and writes the same shapes it renders, and the store
//! round-trips them without a separate wire layer. Dates are `YYYY-MM-DD`
//! strings with `""` meaning unset, matching what lives in the records;
//! they are parsed into `chrono` types only at the KPI/filter boundary.

use serde::{Deserialize, Serialize};

/// Join-key length: a complete vehicle identification number.
pub const VIN_LENGTH: usize = 17;

/// Storage key for the customer collection.
pub const CUSTOMERS_KEY: &str = "customers";
/// Storage key for the inventory collection.
pub const INVENTORY_KEY: &str = "inventory";
/// Storage key for the logged-in user record.
pub const CURRENT_USER_KEY: &str = "currentUser";

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Lifecycle state of an inventory item. Derived from the bound customer's
/// delivery status; never set directly by callers (see `binding`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InventoryStatus {
    #[default]
    Available,
    Negotiating,
    Sold,
    Cancelled,
}

/// Where a customer's deal stands. The sole input for deriving the bound
/// inventory item's status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeliveryStatus {
    #[default]
    Negotiating,
    AwaitingDelivery,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Loan,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CarType {
    New,
    #[default]
    Used,
}

/// Acquisition channel for an inventory item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PurchaseType {
    #[default]
    Auction,
    TradeIn,
    Other,
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VehicleInfo {
    pub vin_number: String,
    pub car_model: String,
    pub maker: String,
    pub color: String,
    pub grade: String,
    pub year: String,
    pub mileage: String,
    pub model_type: String,
    /// Reference asking price in yen.
    pub reference_price: i64,
}

/// An itemized legal-fee row on a purchase record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeeItem {
    pub id: String,
    pub name: String,
    pub amount: i64,
}

impl FeeItem {
    /// An empty editor slot that was never filled in.
    pub fn is_placeholder(&self) -> bool {
        self.name.trim().is_empty() && self.amount == 0
    }
}

/// An itemized installed-option row (purchase record or deal record).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionItem {
    pub id: String,
    pub category: String,
    pub name: String,
    pub amount: i64,
}

/// An option-list row as the editing layer sees it: either an empty slot the
/// editor rendered but the user never touched, or a real line item. Rows are
/// normalized through this type at the registry boundary so placeholders are
/// never persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionRow {
    Placeholder,
    Real(OptionItem),
}

impl OptionRow {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, OptionRow::Placeholder)
    }

    pub fn into_real(self) -> Option<OptionItem> {
        match self {
            OptionRow::Placeholder => None,
            OptionRow::Real(item) => Some(item),
        }
    }
}

impl From<OptionItem> for OptionRow {
    fn from(item: OptionItem) -> Self {
        if item.category.trim().is_empty() && item.name.trim().is_empty() && item.amount == 0 {
            OptionRow::Placeholder
        } else {
            OptionRow::Real(item)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PurchaseInfo {
    pub purchase_date: String,
    pub purchase_type: PurchaseType,
    pub supplier: String,
    pub expected_arrival_date: String,
    pub arrival_date: String,
    pub purchase_manager: String,
    pub store: String,
    pub purchase_price: i64,
    pub legal_fees: Vec<FeeItem>,
    pub options: Vec<OptionItem>,
    pub auto_tax: i64,
    pub auto_tax_env: i64,
    pub weight_tax: i64,
    pub compulsory_insurance: i64,
    pub voluntary_insurance: i64,
    pub total_amount: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SalesInfo {
    pub display_location: String,
    /// Asking price in yen. Required on save.
    pub sales_price: i64,
    pub online_posted: bool,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InventoryItem {
    pub id: String,
    pub vehicle_info: VehicleInfo,
    pub purchase_info: PurchaseInfo,
    pub sales_info: SalesInfo,
    /// Derived from the bound customer's delivery status. Writable only by
    /// the binding synchronizer.
    pub status: InventoryStatus,
    /// Weak back-reference to the customer this item is reserved for.
    pub customer_id: Option<String>,
    pub reserved_date: String,
    pub sold_date: String,
}

// ---------------------------------------------------------------------------
// Customer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DealMemo {
    pub id: String,
    pub date: String,
    pub content: String,
}

/// One milestone checkpoint: checked flag plus the date it was stamped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DealStatus {
    pub checked: bool,
    pub date: String,
}

/// The fixed set of deal milestones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DealStatuses {
    pub line_contact: DealStatus,
    pub contract: DealStatus,
    pub follow_up1: DealStatus,
    pub follow_up2: DealStatus,
    pub documents: DealStatus,
    pub payment: DealStatus,
    pub delivered: DealStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    LineContact,
    Contract,
    FollowUp1,
    FollowUp2,
    Documents,
    Payment,
    Delivered,
}

impl Milestone {
    /// The two follow-up checkpoints are disabled while `noFollowUp` is set.
    pub fn is_follow_up(self) -> bool {
        matches!(self, Milestone::FollowUp1 | Milestone::FollowUp2)
    }
}

impl DealStatuses {
    pub fn get(&self, milestone: Milestone) -> &DealStatus {
        match milestone {
            Milestone::LineContact => &self.line_contact,
            Milestone::Contract => &self.contract,
            Milestone::FollowUp1 => &self.follow_up1,
            Milestone::FollowUp2 => &self.follow_up2,
            Milestone::Documents => &self.documents,
            Milestone::Payment => &self.payment,
            Milestone::Delivered => &self.delivered,
        }
    }

    pub fn get_mut(&mut self, milestone: Milestone) -> &mut DealStatus {
        match milestone {
            Milestone::LineContact => &mut self.line_contact,
            Milestone::Contract => &mut self.contract,
            Milestone::FollowUp1 => &mut self.follow_up1,
            Milestone::FollowUp2 => &mut self.follow_up2,
            Milestone::Documents => &mut self.documents,
            Milestone::Payment => &mut self.payment,
            Milestone::Delivered => &mut self.delivered,
        }
    }
}

/// The deal sub-record on a customer: vehicle snapshot, pricing, milestones.
///
/// Snapshot fields are copied from inventory at bind time and independently
/// editable afterward — there is no live sync back from inventory edits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DealInfo {
    pub vin_number: String,
    pub car_model: String,
    pub maker: String,
    pub color: String,
    pub grade: String,
    pub year: String,
    pub mileage: String,
    pub model_type: String,
    /// Agreed sales price in yen.
    pub sales_price: i64,
    pub discount: i64,
    pub payment_method: PaymentMethod,
    pub is_instant_close: bool,
    pub has_trade_in: bool,
    pub options: Vec<OptionItem>,
    pub auction_house: String,
    /// Derived from `auction_house` via the fixed shipping-fee table.
    pub shipping_fee: i64,
    pub deal_memos: Vec<DealMemo>,
    pub statuses: DealStatuses,
    pub no_follow_up: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phonetic_name: String,
    pub phone: String,
    pub phone2: String,
    pub email: String,
    pub email2: String,
    pub postal_code: String,
    pub address1: String,
    pub address2: String,
    /// Concatenated full address, kept for list views.
    pub address: String,
    pub memo: String,
    pub sales_rep: String,
    pub store: String,
    pub added_date: String,
    pub contract_date: String,
    pub delivery_status: DeliveryStatus,
    pub car_type: CarType,
    /// Denormalized mirror of `deal_info.car_model` for list views.
    pub car_model: String,
    /// Denormalized mirror of `deal_info.vin_number` for list views.
    pub vin_number: String,
    pub deal_info: DealInfo,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The logged-in user, persisted under its own storage key at login.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub role: String,
}
