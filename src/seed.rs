//! Embedded default dataset.
//!
//! Used by the load fallback so a fresh (or corrupted) store always comes up
//! with a working showroom: five customers, five inventory items, and the
//! fixed lookup tables the deal editor derives from. Bindings in the seed
//! are mutually consistent — every reserved item points at the customer
//! that reserved it and vice versa.

use crate::types::{
    CarType, Customer, DealMemo, DealStatus, DeliveryStatus, FeeItem, InventoryItem,
    InventoryStatus, OptionItem, PaymentMethod, PurchaseType,
};

/// Fixed auction-house shipping fees, in yen.
pub const AUCTION_SHIPPING_FEES: &[(&str, i64)] = &[
    ("Auction House A", 30_000),
    ("Auction House B", 25_000),
    ("Auction House C", 35_000),
];

/// Shipping fee for an auction house, if it is one of the known venues.
pub fn shipping_fee_for(auction_house: &str) -> Option<i64> {
    AUCTION_SHIPPING_FEES
        .iter()
        .find(|(house, _)| *house == auction_house)
        .map(|(_, fee)| *fee)
}

/// The sales-rep roster.
pub const SALES_REPS: &[&str] = &["Takahashi", "Suzuki", "Sato", "Tanaka", "Yamamoto"];

/// Monthly sales targets per rep, in yen.
pub const SALES_TARGETS: &[(&str, i64)] = &[
    ("Takahashi", 8_000_000),
    ("Suzuki", 7_500_000),
    ("Sato", 8_500_000),
    ("Tanaka", 7_000_000),
    ("Yamamoto", 6_500_000),
];

/// Company-wide monthly sales target, in yen.
pub const COMPANY_TARGET: i64 = 37_500_000;

/// Monthly target for a rep, if they are on the roster.
pub fn monthly_target_for(sales_rep: &str) -> Option<i64> {
    SALES_TARGETS
        .iter()
        .find(|(rep, _)| *rep == sales_rep)
        .map(|(_, target)| *target)
}

fn checked(date: &str) -> DealStatus {
    DealStatus {
        checked: true,
        date: date.to_string(),
    }
}

fn memo(id: &str, date: &str, content: &str) -> DealMemo {
    DealMemo {
        id: id.to_string(),
        date: date.to_string(),
        content: content.to_string(),
    }
}

fn option(id: &str, category: &str, name: &str, amount: i64) -> OptionItem {
    OptionItem {
        id: id.to_string(),
        category: category.to_string(),
        name: name.to_string(),
        amount,
    }
}

/// Default customer collection.
pub fn customers() -> Vec<Customer> {
    let mut c1 = Customer::default();
    c1.id = "C001".to_string();
    c1.name = "Taro Yamada".to_string();
    c1.phonetic_name = "YAMADA TARO".to_string();
    c1.phone = "090-1234-5678".to_string();
    c1.email = "yamada@example.com".to_string();
    c1.postal_code = "460-0008".to_string();
    c1.address1 = "Sakae, Naka-ku, Nagoya, Aichi".to_string();
    c1.address2 = "1-2-3 Sample Bldg 4F".to_string();
    c1.address = "Sakae, Naka-ku, Nagoya, Aichi 1-2-3 Sample Bldg 4F".to_string();
    c1.memo = "First meeting done".to_string();
    c1.sales_rep = "Takahashi".to_string();
    c1.store = "Main store".to_string();
    c1.added_date = "2025-01-10".to_string();
    c1.contract_date = "2025-01-15".to_string();
    c1.delivery_status = DeliveryStatus::AwaitingDelivery;
    c1.car_type = CarType::New;
    c1.car_model = "Prius".to_string();
    c1.vin_number = "12345678901234567".to_string();
    c1.deal_info.vin_number = "12345678901234567".to_string();
    c1.deal_info.car_model = "Prius".to_string();
    c1.deal_info.maker = "Toyota".to_string();
    c1.deal_info.color = "White".to_string();
    c1.deal_info.year = "2024".to_string();
    c1.deal_info.sales_price = 1_980_000;
    c1.deal_info.payment_method = PaymentMethod::Loan;
    c1.deal_info.auction_house = "Auction House A".to_string();
    c1.deal_info.shipping_fee = 30_000;
    c1.deal_info.deal_memos = vec![
        memo("m-c001-1", "2025-01-10", "Walk-in, first interview"),
        memo("m-c001-2", "2025-01-12", "Quote presented; discussing with family"),
    ];
    c1.deal_info.statuses.line_contact = checked("2025-01-10");
    c1.deal_info.statuses.contract = checked("2025-01-15");

    let mut c2 = Customer::default();
    c2.id = "C002".to_string();
    c2.name = "Hanako Sato".to_string();
    c2.phonetic_name = "SATO HANAKO".to_string();
    c2.phone = "080-9876-5432".to_string();
    c2.phone2 = "052-123-4567".to_string();
    c2.email = "sato.hanako@example.com".to_string();
    c2.postal_code = "464-0850".to_string();
    c2.address1 = "Imaike, Chikusa-ku, Nagoya, Aichi".to_string();
    c2.address2 = "5-6-7".to_string();
    c2.address = "Imaike, Chikusa-ku, Nagoya, Aichi 5-6-7".to_string();
    c2.memo = "Referral".to_string();
    c2.sales_rep = "Suzuki".to_string();
    c2.store = "Branch A".to_string();
    c2.added_date = "2025-01-05".to_string();
    c2.contract_date = "2025-01-20".to_string();
    c2.delivery_status = DeliveryStatus::Delivered;
    c2.car_type = CarType::Used;
    c2.car_model = "Aqua".to_string();
    c2.vin_number = "98765432109876543".to_string();
    c2.deal_info.vin_number = "98765432109876543".to_string();
    c2.deal_info.car_model = "Aqua".to_string();
    c2.deal_info.maker = "Toyota".to_string();
    c2.deal_info.color = "Blue".to_string();
    c2.deal_info.year = "2021".to_string();
    c2.deal_info.mileage = "32,000 km".to_string();
    c2.deal_info.sales_price = 1_450_000;
    c2.deal_info.is_instant_close = true;
    c2.deal_info.options = vec![
        option("opt-c002-1", "Exterior", "Winter tires", 80_000),
        option("opt-c002-2", "Interior", "Floor mats", 15_000),
    ];
    c2.deal_info.auction_house = "Auction House B".to_string();
    c2.deal_info.shipping_fee = 25_000;
    c2.deal_info.deal_memos = vec![
        memo("m-c002-1", "2025-01-05", "Phone inquiry"),
        memo("m-c002-2", "2025-01-08", "Visited, decided on the spot"),
    ];
    c2.deal_info.statuses.line_contact = checked("2025-01-05");
    c2.deal_info.statuses.contract = checked("2025-01-08");
    c2.deal_info.statuses.follow_up1 = checked("2025-01-12");
    c2.deal_info.statuses.documents = checked("2025-01-15");
    c2.deal_info.statuses.payment = checked("2025-01-18");
    c2.deal_info.statuses.delivered = checked("2025-01-25");

    let mut c3 = Customer::default();
    c3.id = "C003".to_string();
    c3.name = "Ichiro Tanaka".to_string();
    c3.phonetic_name = "TANAKA ICHIRO".to_string();
    c3.phone = "070-1111-2222".to_string();
    c3.email = "tanaka@example.com".to_string();
    c3.email2 = "tanaka.sub@example.com".to_string();
    c3.postal_code = "450-0002".to_string();
    c3.address1 = "Meieki, Nakamura-ku, Nagoya, Aichi".to_string();
    c3.address2 = "3-4-5 ABC Bldg 10F".to_string();
    c3.address = "Meieki, Nakamura-ku, Nagoya, Aichi 3-4-5 ABC Bldg 10F".to_string();
    c3.memo = "Corporate contract".to_string();
    c3.sales_rep = "Sato".to_string();
    c3.store = "Main store".to_string();
    c3.added_date = "2025-01-12".to_string();
    c3.contract_date = "2025-01-18".to_string();
    c3.delivery_status = DeliveryStatus::AwaitingDelivery;
    c3.car_type = CarType::Used;
    c3.car_model = "Corolla".to_string();
    c3.vin_number = "11122233344455566".to_string();
    c3.deal_info.vin_number = "11122233344455566".to_string();
    c3.deal_info.car_model = "Corolla".to_string();
    c3.deal_info.maker = "Toyota".to_string();
    c3.deal_info.color = "Silver".to_string();
    c3.deal_info.year = "2020".to_string();
    c3.deal_info.sales_price = 1_200_000;
    c3.deal_info.payment_method = PaymentMethod::Loan;
    c3.deal_info.deal_memos = vec![memo("m-c003-1", "2025-01-12", "Online meeting")];
    c3.deal_info.statuses.line_contact = checked("2025-01-12");
    c3.deal_info.statuses.contract = checked("2025-01-18");

    let mut c4 = Customer::default();
    c4.id = "C004".to_string();
    c4.name = "Jiro Suzuki".to_string();
    c4.phonetic_name = "SUZUKI JIRO".to_string();
    c4.phone = "090-3333-4444".to_string();
    c4.postal_code = "468-0073".to_string();
    c4.address1 = "Shiogamaguchi, Tempaku-ku, Nagoya, Aichi".to_string();
    c4.address2 = "2-1-1".to_string();
    c4.address = "Shiogamaguchi, Tempaku-ku, Nagoya, Aichi 2-1-1".to_string();
    c4.memo = "Wants a trade-in".to_string();
    c4.sales_rep = "Takahashi".to_string();
    c4.store = "Branch B".to_string();
    c4.added_date = "2025-01-08".to_string();
    c4.delivery_status = DeliveryStatus::Negotiating;
    c4.car_type = CarType::Used;
    c4.car_model = "Fit".to_string();
    c4.vin_number = "77788899900011122".to_string();
    c4.deal_info.vin_number = "77788899900011122".to_string();
    c4.deal_info.car_model = "Fit".to_string();
    c4.deal_info.maker = "Honda".to_string();
    c4.deal_info.color = "Red".to_string();
    c4.deal_info.year = "2019".to_string();
    c4.deal_info.has_trade_in = true;
    c4.deal_info.auction_house = "Auction House C".to_string();
    c4.deal_info.shipping_fee = 35_000;
    c4.deal_info.statuses.line_contact = checked("2025-01-08");
    c4.deal_info.no_follow_up = true;

    let mut c5 = Customer::default();
    c5.id = "C005".to_string();
    c5.name = "Misaki Ito".to_string();
    c5.phonetic_name = "ITO MISAKI".to_string();
    c5.phone = "080-5555-6666".to_string();
    c5.phone2 = "052-987-6543".to_string();
    c5.email = "ito.misaki@example.com".to_string();
    c5.postal_code = "461-0001".to_string();
    c5.address1 = "Izumi, Higashi-ku, Nagoya, Aichi".to_string();
    c5.address2 = "1-23-45".to_string();
    c5.address = "Izumi, Higashi-ku, Nagoya, Aichi 1-23-45".to_string();
    c5.memo = "Budget to be confirmed".to_string();
    c5.sales_rep = "Tanaka".to_string();
    c5.store = "Main store".to_string();
    c5.added_date = "2025-01-14".to_string();
    c5.delivery_status = DeliveryStatus::Negotiating;
    c5.car_type = CarType::New;
    c5.deal_info.deal_memos = vec![memo(
        "m-c005-1",
        "2025-01-14",
        "First consultation; comparing several models",
    )];
    c5.deal_info.statuses.line_contact = checked("2025-01-14");

    vec![c1, c2, c3, c4, c5]
}

/// Default inventory collection. Reservation state matches `customers()`.
pub fn inventory() -> Vec<InventoryItem> {
    let mut i1 = InventoryItem::default();
    i1.id = "INV001".to_string();
    i1.vehicle_info.vin_number = "12345678901234567".to_string();
    i1.vehicle_info.car_model = "Prius".to_string();
    i1.vehicle_info.maker = "Toyota".to_string();
    i1.vehicle_info.color = "White".to_string();
    i1.vehicle_info.grade = "Z".to_string();
    i1.vehicle_info.year = "2024".to_string();
    i1.vehicle_info.mileage = "8 km".to_string();
    i1.vehicle_info.model_type = "6AA-ZVW65".to_string();
    i1.vehicle_info.reference_price = 2_050_000;
    i1.purchase_info.purchase_date = "2024-12-20".to_string();
    i1.purchase_info.purchase_type = PurchaseType::Auction;
    i1.purchase_info.supplier = "Auction House A".to_string();
    i1.purchase_info.expected_arrival_date = "2025-01-08".to_string();
    i1.purchase_info.arrival_date = "2025-01-07".to_string();
    i1.purchase_info.purchase_manager = "Yamamoto".to_string();
    i1.purchase_info.store = "Main store".to_string();
    i1.purchase_info.purchase_price = 1_500_000;
    i1.purchase_info.auto_tax = 25_000;
    i1.purchase_info.weight_tax = 12_300;
    i1.purchase_info.compulsory_insurance = 17_650;
    i1.purchase_info.total_amount = 1_554_950;
    i1.sales_info.display_location = "Main lot".to_string();
    i1.sales_info.sales_price = 1_980_000;
    i1.sales_info.online_posted = true;
    i1.status = InventoryStatus::Sold;
    i1.customer_id = Some("C001".to_string());
    i1.reserved_date = "2025-01-15".to_string();
    i1.sold_date = "2025-01-15".to_string();

    let mut i2 = InventoryItem::default();
    i2.id = "INV002".to_string();
    i2.vehicle_info.vin_number = "98765432109876543".to_string();
    i2.vehicle_info.car_model = "Aqua".to_string();
    i2.vehicle_info.maker = "Toyota".to_string();
    i2.vehicle_info.color = "Blue".to_string();
    i2.vehicle_info.grade = "G".to_string();
    i2.vehicle_info.year = "2021".to_string();
    i2.vehicle_info.mileage = "32,000 km".to_string();
    i2.vehicle_info.reference_price = 1_500_000;
    i2.purchase_info.purchase_date = "2024-12-05".to_string();
    i2.purchase_info.purchase_type = PurchaseType::Auction;
    i2.purchase_info.supplier = "Auction House B".to_string();
    i2.purchase_info.store = "Branch A".to_string();
    i2.purchase_info.purchase_price = 1_050_000;
    i2.purchase_info.total_amount = 1_082_000;
    i2.sales_info.display_location = "Branch A lot".to_string();
    i2.sales_info.sales_price = 1_450_000;
    i2.sales_info.online_posted = true;
    i2.status = InventoryStatus::Sold;
    i2.customer_id = Some("C002".to_string());
    i2.reserved_date = "2025-01-20".to_string();
    i2.sold_date = "2025-01-20".to_string();

    let mut i3 = InventoryItem::default();
    i3.id = "INV003".to_string();
    i3.vehicle_info.vin_number = "11122233344455566".to_string();
    i3.vehicle_info.car_model = "Corolla".to_string();
    i3.vehicle_info.maker = "Toyota".to_string();
    i3.vehicle_info.color = "Silver".to_string();
    i3.vehicle_info.grade = "W×B".to_string();
    i3.vehicle_info.year = "2020".to_string();
    i3.vehicle_info.mileage = "45,000 km".to_string();
    i3.vehicle_info.reference_price = 1_280_000;
    i3.purchase_info.purchase_date = "2024-11-28".to_string();
    i3.purchase_info.purchase_type = PurchaseType::TradeIn;
    i3.purchase_info.supplier = "Trade-in (walk-in)".to_string();
    i3.purchase_info.store = "Main store".to_string();
    i3.purchase_info.purchase_price = 850_000;
    i3.purchase_info.total_amount = 872_500;
    i3.sales_info.display_location = "Main lot".to_string();
    i3.sales_info.sales_price = 1_200_000;
    i3.status = InventoryStatus::Sold;
    i3.customer_id = Some("C003".to_string());
    i3.reserved_date = "2025-01-18".to_string();
    i3.sold_date = "2025-01-18".to_string();

    let mut i4 = InventoryItem::default();
    i4.id = "INV004".to_string();
    i4.vehicle_info.vin_number = "77788899900011122".to_string();
    i4.vehicle_info.car_model = "Fit".to_string();
    i4.vehicle_info.maker = "Honda".to_string();
    i4.vehicle_info.color = "Red".to_string();
    i4.vehicle_info.grade = "Home".to_string();
    i4.vehicle_info.year = "2019".to_string();
    i4.vehicle_info.mileage = "58,000 km".to_string();
    i4.vehicle_info.reference_price = 980_000;
    i4.purchase_info.purchase_date = "2024-12-15".to_string();
    i4.purchase_info.purchase_type = PurchaseType::Auction;
    i4.purchase_info.supplier = "Auction House C".to_string();
    i4.purchase_info.store = "Branch B".to_string();
    i4.purchase_info.purchase_price = 700_000;
    i4.purchase_info.total_amount = 735_000;
    i4.sales_info.display_location = "Branch B lot".to_string();
    i4.sales_info.sales_price = 950_000;
    i4.status = InventoryStatus::Negotiating;
    i4.customer_id = Some("C004".to_string());
    i4.reserved_date = "2025-01-08".to_string();

    let mut i5 = InventoryItem::default();
    i5.id = "INV005".to_string();
    i5.vehicle_info.vin_number = "55566677788899900".to_string();
    i5.vehicle_info.car_model = "Crown".to_string();
    i5.vehicle_info.maker = "Toyota".to_string();
    i5.vehicle_info.color = "Black".to_string();
    i5.vehicle_info.grade = "RS".to_string();
    i5.vehicle_info.year = "2022".to_string();
    i5.vehicle_info.mileage = "21,000 km".to_string();
    i5.vehicle_info.reference_price = 4_200_000;
    i5.purchase_info.purchase_date = "2025-01-06".to_string();
    i5.purchase_info.purchase_type = PurchaseType::Auction;
    i5.purchase_info.supplier = "Auction House A".to_string();
    i5.purchase_info.store = "Main store".to_string();
    i5.purchase_info.purchase_price = 3_600_000;
    i5.purchase_info.legal_fees = vec![FeeItem {
        id: "lf-inv005-1".to_string(),
        name: "Registration".to_string(),
        amount: 28_000,
    }];
    i5.purchase_info.total_amount = 3_628_000;
    i5.sales_info.display_location = "Main lot".to_string();
    i5.sales_info.sales_price = 4_480_000;
    i5.sales_info.online_posted = true;
    i5.sales_info.notes = "One owner, full service history".to_string();

    vec![i1, i2, i3, i4, i5]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_bindings_are_mutually_consistent() {
        let customers = customers();
        let inventory = inventory();

        for item in &inventory {
            match item.status {
                InventoryStatus::Available => {
                    assert!(item.customer_id.is_none(), "{} available but bound", item.id);
                    assert!(item.reserved_date.is_empty());
                    assert!(item.sold_date.is_empty());
                }
                InventoryStatus::Negotiating | InventoryStatus::Sold => {
                    let customer_id = item.customer_id.as_deref().unwrap_or_else(|| {
                        panic!("{} reserved without a customer", item.id)
                    });
                    let customer = customers
                        .iter()
                        .find(|c| c.id == customer_id)
                        .unwrap_or_else(|| panic!("{} bound to unknown customer", item.id));
                    assert_eq!(customer.vin_number, item.vehicle_info.vin_number);
                }
                InventoryStatus::Cancelled => {}
            }
        }
    }

    #[test]
    fn test_seed_vins_are_complete() {
        for item in inventory() {
            assert_eq!(item.vehicle_info.vin_number.chars().count(), 17, "{}", item.id);
        }
    }

    #[test]
    fn test_seed_deal_mirrors_match() {
        for customer in customers() {
            assert_eq!(customer.vin_number, customer.deal_info.vin_number);
            assert_eq!(customer.car_model, customer.deal_info.car_model);
        }
    }

    #[test]
    fn test_shipping_fee_lookup() {
        assert_eq!(shipping_fee_for("Auction House B"), Some(25_000));
        assert_eq!(shipping_fee_for("Unknown venue"), None);
    }

    #[test]
    fn test_every_seed_rep_is_on_the_roster() {
        for customer in customers() {
            assert!(SALES_REPS.contains(&customer.sales_rep.as_str()));
            assert!(monthly_target_for(&customer.sales_rep).is_some());
        }
        assert_eq!(
            SALES_TARGETS.iter().map(|(_, t)| t).sum::<i64>(),
            COMPANY_TARGET
        );
    }
}
