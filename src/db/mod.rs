//! Registry facade over the record store.
//!
//! `DealerDb` owns the injected store and exposes every mutation the shell
//! performs: customer and inventory CRUD, explicit bind/release, memos, and
//! milestones. Both collections are fully loaded, mutated, and fully
//! rewritten on every save — there are no partial updates, and there is
//! deliberately no cross-collection transaction (worst case is stale or
//! unlinked data, recoverable by re-editing).
//!
//! Consistency rule: every write path that can affect a binding goes through
//! `binding` before persisting. UI-submitted records never carry the
//! synchronizer-owned fields through (`status`, `customerId`, the
//! reservation timestamps) — the stored values win.

use std::path::PathBuf;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::DbError;
use crate::migrations;
use crate::seed;
use crate::store::{load_collection, save_collection, RecordStore, SqliteStore};
use crate::types::{
    Customer, FeeItem, InventoryItem, OptionItem, OptionRow, CUSTOMERS_KEY, INVENTORY_KEY,
};

mod customers;
mod inventory;

pub struct DealerDb<S: RecordStore = SqliteStore> {
    store: S,
}

impl DealerDb<SqliteStore> {
    /// Open the default on-disk store at `~/.dealerdesk/dealerdesk.db`.
    pub fn open() -> Result<Self, DbError> {
        Ok(Self {
            store: SqliteStore::open()?,
        })
    }

    /// Open a store at an explicit path. Useful for testing.
    pub fn open_at(path: PathBuf) -> Result<Self, DbError> {
        Ok(Self {
            store: SqliteStore::open_at(path)?,
        })
    }
}

impl<S: RecordStore> DealerDb<S> {
    /// Wrap an injected store (test doubles, alternative backends).
    pub fn with_store(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store for ad-hoc reads (session record, etc.).
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The customer collection. Seeds on first load, never fails.
    pub fn customers(&self) -> Vec<Customer> {
        load_collection(
            &self.store,
            CUSTOMERS_KEY,
            seed::customers,
            migrations::backfill_customers,
        )
    }

    /// The inventory collection. Seeds on first load, never fails.
    pub fn inventory(&self) -> Vec<InventoryItem> {
        load_collection(
            &self.store,
            INVENTORY_KEY,
            seed::inventory,
            migrations::backfill_inventory,
        )
    }

    pub(crate) fn save_customers(&self, customers: &[Customer]) -> Result<(), DbError> {
        Ok(save_collection(&self.store, CUSTOMERS_KEY, customers)?)
    }

    pub(crate) fn save_inventory(&self, items: &[InventoryItem]) -> Result<(), DbError> {
        Ok(save_collection(&self.store, INVENTORY_KEY, items)?)
    }

    pub(crate) fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }

    pub(crate) fn today_string(&self) -> String {
        self.today().format("%Y-%m-%d").to_string()
    }
}

/// Next id in a `PREFIX###` sequence, derived from the highest existing
/// numeric suffix so deleting a record never causes a collision.
pub(crate) fn next_sequential_id<'a, I>(prefix: &str, existing: I) -> String
where
    I: Iterator<Item = &'a str>,
{
    let max = existing
        .filter_map(|id| id.strip_prefix(prefix))
        .filter_map(|suffix| suffix.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("{}{:03}", prefix, max + 1)
}

/// Drop placeholder option rows and give surviving rows an id.
pub(crate) fn normalize_option_rows(rows: Vec<OptionItem>) -> Vec<OptionItem> {
    rows.into_iter()
        .map(OptionRow::from)
        .filter_map(OptionRow::into_real)
        .map(|mut item| {
            if item.id.trim().is_empty() {
                item.id = Uuid::new_v4().to_string();
            }
            item
        })
        .collect()
}

/// Drop placeholder legal-fee rows and give surviving rows an id.
pub(crate) fn normalize_fee_rows(rows: Vec<FeeItem>) -> Vec<FeeItem> {
    rows.into_iter()
        .filter(|row| !row.is_placeholder())
        .map(|mut row| {
            if row.id.trim().is_empty() {
                row.id = Uuid::new_v4().to_string();
            }
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_next_sequential_id_survives_deletes() {
        let ids = ["C001", "C002", "C007"];
        assert_eq!(next_sequential_id("C", ids.iter().copied()), "C008");
        assert_eq!(next_sequential_id("INV", std::iter::empty()), "INV001");
        // Foreign prefixes and junk are ignored.
        let mixed = ["INV003", "C002", "INVX"];
        assert_eq!(next_sequential_id("INV", mixed.iter().copied()), "INV004");
    }

    #[test]
    fn test_id_sequence_grows_past_three_digits() {
        let ids = ["C999"];
        assert_eq!(next_sequential_id("C", ids.iter().copied()), "C1000");
    }

    #[test]
    fn test_normalize_drops_placeholders_and_assigns_ids() {
        let rows = vec![
            OptionItem::default(),
            OptionItem {
                id: String::new(),
                category: "Exterior".to_string(),
                name: "Tow bar".to_string(),
                amount: 60_000,
            },
        ];
        let normalized = normalize_option_rows(rows);
        assert_eq!(normalized.len(), 1);
        assert!(!normalized[0].id.is_empty());
        assert_eq!(normalized[0].name, "Tow bar");

        let fees = vec![
            FeeItem::default(),
            FeeItem {
                id: "lf-1".to_string(),
                name: "Registration".to_string(),
                amount: 28_000,
            },
        ];
        let normalized = normalize_fee_rows(fees);
        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized[0].id, "lf-1");
    }

    #[test]
    fn test_empty_store_seeds_both_collections() {
        let db = DealerDb::with_store(MemoryStore::new());
        assert_eq!(db.customers().len(), 5);
        assert_eq!(db.inventory().len(), 5);
        // The implicit save leaves the records present.
        assert!(db.store().get(CUSTOMERS_KEY).unwrap().is_some());
        assert!(db.store().get(INVENTORY_KEY).unwrap().is_some());
    }

    #[test]
    fn test_mutations_survive_reopening_the_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dealerdesk.db");

        let created = {
            let db = DealerDb::open_at(path.clone()).unwrap();
            let mut draft = Customer::default();
            draft.name = "Kenji Mori".to_string();
            db.create_customer(draft).unwrap()
        };

        let db = DealerDb::open_at(path).unwrap();
        let found = db.find_customer(&created.id).unwrap();
        assert_eq!(found.name, "Kenji Mori");
    }
}
