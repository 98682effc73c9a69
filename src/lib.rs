//! # Stockpile
//!
//! A small in-memory inventory tracker: item quantities that can be added,
//! removed and queried, saved to and loaded from a JSON document, with a
//! low-stock report.
//!
//! ## Core Concepts
//!
//! - **Inventory**: Caller-owned map from item name to integer quantity
//! - **Ledger**: Insertion-ordered storage behind the inventory
//! - **Audit log**: Optional caller-owned trail of additions
//! - **Diagnostics**: `tracing` events, formatted by [`telemetry`]
//!
//! ## Example
//!
//! ```no_run
//! use stockpile::{Inventory, InventoryConfig};
//!
//! let mut inventory = Inventory::open(InventoryConfig::default())?;
//!
//! inventory.add("apple", 10)?;
//! inventory.remove("apple", 3)?;
//! assert_eq!(inventory.quantity("apple"), 7);
//!
//! for item in inventory.low_stock_default() {
//!     println!("low: {}", item);
//! }
//!
//! inventory.save_default()?;
//! # Ok::<(), stockpile::InventoryError>(())
//! ```

pub mod audit;
pub mod error;
pub mod ledger;
pub mod persistence;
pub mod store;
pub mod telemetry;
pub mod types;

// Re-exports
pub use audit::{AuditEntry, AuditLog};
pub use error::{InventoryError, Result};
pub use ledger::StockLedger;
pub use persistence::{load_ledger, save_ledger};
pub use store::{Inventory, InventoryConfig, InventoryReport};
pub use telemetry::{init_logging, LogConfig, LogDestination};
pub use types::*;
