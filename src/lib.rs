//! Local-first CRM core for a used-car dealership.
//!
//! Customer records, vehicle inventory, and sales KPIs, persisted as
//! whole-collection JSON blobs in an embedded key-value store. The crate is
//! the consistency and aggregation layer: the presentation shell submits
//! already-shaped records and reads collections back.
//!
//! The piece worth reading first is [`binding`] — the rules that keep a
//! customer's deal record and the matching inventory item (joined by VIN)
//! consistent without a shared transaction. Inventory status is derived from
//! the customer's delivery lifecycle and is writable only there; [`db`]
//! routes every mutating path through it. [`kpi`] derives per-rep and
//! company-wide sales metrics from whatever customer slice the period filter
//! produced.

pub mod auth;
pub mod binding;
pub mod db;
pub mod error;
pub mod kpi;
pub mod migrations;
pub mod seed;
pub mod store;
pub mod types;

pub use db::DealerDb;
pub use error::{DbError, StoreError};
pub use store::{MemoryStore, RecordStore, SqliteStore};
