//! Stock ledger.
//!
//! An insertion-ordered mapping from item name to quantity. Iteration,
//! reporting and the persisted JSON document all follow insertion order.

mod stock;

pub use stock::{Iter, StockLedger};
