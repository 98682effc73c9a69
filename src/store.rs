//! Main Inventory struct tying all components together.

use crate::audit::{AuditEntry, AuditLog};
use crate::error::{InventoryError, Result};
use crate::ledger::{Iter, StockLedger};
use crate::persistence::{self, DEFAULT_DATA_PATH};
use crate::telemetry::LogConfig;
use crate::types::{ItemName, Quantity, Removal, DEFAULT_LOW_STOCK_THRESHOLD};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Inventory configuration.
#[derive(Clone, Debug)]
pub struct InventoryConfig {
    /// Path of the JSON document used by `save_default` / `load_default`.
    pub data_path: PathBuf,

    /// Threshold used by `low_stock_default`.
    pub low_stock_threshold: Quantity,

    /// Diagnostic log settings (applied by `telemetry::init_logging`).
    pub log: LogConfig,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            log: LogConfig::default(),
        }
    }
}

/// Snapshot of stock levels, rendered as the items report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InventoryReport {
    pub lines: Vec<(String, Quantity)>,
}

impl fmt::Display for InventoryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Items Report:")?;
        for (item, quantity) in &self.lines {
            writeln!(f, "{} -> {}", item, quantity)?;
        }
        Ok(())
    }
}

/// An in-memory inventory.
///
/// Provides a unified interface for:
/// - Adding and removing stock
/// - Querying quantities and low-stock items
/// - Saving to and loading from a JSON document
///
/// The inventory is an ordinary value owned by its caller; independent
/// instances share nothing.
#[derive(Clone, Debug, Default)]
pub struct Inventory {
    /// Inventory configuration.
    config: InventoryConfig,

    /// Item quantities.
    ledger: StockLedger,
}

impl Inventory {
    /// Create an empty inventory with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty inventory with the given configuration.
    pub fn with_config(config: InventoryConfig) -> Self {
        Self {
            config,
            ledger: StockLedger::new(),
        }
    }

    /// Create an inventory and populate it from `config.data_path`.
    ///
    /// A missing file yields an empty inventory.
    pub fn open(config: InventoryConfig) -> Result<Self> {
        let mut inventory = Self::with_config(config);
        inventory.load_default()?;
        Ok(inventory)
    }

    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    pub fn ledger(&self) -> &StockLedger {
        &self.ledger
    }

    // --- Stock Operations ---

    /// Add `quantity` units of `item`, creating it if absent.
    ///
    /// No sign check is made on `quantity`. The audit entry for the addition
    /// is returned; on failure the inventory is unchanged and the error is
    /// logged.
    pub fn add(&mut self, item: &str, quantity: Quantity) -> Result<AuditEntry> {
        let name = ItemName::try_from(item).inspect_err(|e| error!(item, "{}", e))?;

        let current = self.ledger.get(item).unwrap_or(0);
        let updated = current.checked_add(quantity).ok_or_else(|| {
            let e = InventoryError::Validation(format!(
                "Adding {} to {} would overflow (current {}).",
                quantity, item, current
            ));
            error!(item, quantity, "{}", e);
            e
        })?;

        self.ledger.insert(name.clone(), updated);
        info!(item = %name, quantity, "Added {} of {}", quantity, name);

        Ok(AuditEntry::new(name, quantity))
    }

    /// Like [`Inventory::add`], also appending the entry to `audit`.
    pub fn add_recorded(
        &mut self,
        item: &str,
        quantity: Quantity,
        audit: &mut AuditLog,
    ) -> Result<AuditEntry> {
        let entry = self.add(item, quantity)?;
        audit.record(entry.clone());
        Ok(entry)
    }

    /// Remove `quantity` units of `item`.
    ///
    /// The item is deleted once its quantity reaches zero or below. Removing
    /// an absent item is a [`InventoryError::NotFound`] and leaves the
    /// inventory unchanged.
    pub fn remove(&mut self, item: &str, quantity: Quantity) -> Result<Removal> {
        ItemName::try_from(item).inspect_err(|e| error!(item, "{}", e))?;

        let Some(current) = self.ledger.get(item) else {
            warn!(item, quantity, "Attempted to remove non-existent item: {}", item);
            return Err(InventoryError::NotFound(item.to_string()));
        };

        let updated = current.checked_sub(quantity).ok_or_else(|| {
            let e = InventoryError::Validation(format!(
                "Removing {} from {} would overflow (current {}).",
                quantity, item, current
            ));
            error!(item, quantity, "{}", e);
            e
        })?;

        if updated <= 0 {
            self.ledger.remove(item);
            info!(item, quantity, "Removed {} completely from stock.", item);
            return Ok(Removal::Depleted);
        }

        if let Some(slot) = self.ledger.get_mut(item) {
            *slot = updated;
        }
        info!(
            item,
            quantity,
            remaining = updated,
            "Removed {} of {}. Remaining: {}",
            quantity,
            item,
            updated
        );

        Ok(Removal::Remaining(updated))
    }

    // --- Queries ---

    /// Current quantity of `item`, or 0 if absent.
    pub fn quantity(&self, item: &str) -> Quantity {
        self.ledger.get(item).unwrap_or(0)
    }

    pub fn contains(&self, item: &str) -> bool {
        self.ledger.contains(item)
    }

    pub fn len(&self) -> usize {
        self.ledger.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    /// Iterate items and quantities in insertion order.
    pub fn iter(&self) -> Iter<'_> {
        self.ledger.iter()
    }

    /// Items whose quantity is strictly below `threshold`, in insertion order.
    pub fn low_stock(&self, threshold: Quantity) -> Vec<String> {
        self.ledger
            .iter()
            .filter(|&(_, quantity)| quantity < threshold)
            .map(|(item, _)| item.to_string())
            .collect()
    }

    /// Low-stock items using the configured threshold (5 by default).
    pub fn low_stock_default(&self) -> Vec<String> {
        self.low_stock(self.config.low_stock_threshold)
    }

    /// Snapshot of every item for display.
    pub fn report(&self) -> InventoryReport {
        info!(items = self.ledger.len(), "Generating inventory report...");
        InventoryReport {
            lines: self
                .ledger
                .iter()
                .map(|(item, quantity)| (item.to_string(), quantity))
                .collect(),
        }
    }

    // --- Persistence ---

    /// Write every item to `path` as a JSON object, replacing the file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        persistence::save_ledger(path, &self.ledger)?;
        info!(path = %path.display(), "Saved inventory data to file.");
        Ok(())
    }

    /// Save to the configured data path.
    pub fn save_default(&self) -> Result<()> {
        self.save(&self.config.data_path)
    }

    /// Replace the whole inventory with the contents of `path`.
    ///
    /// Returns `Ok(false)` and leaves the inventory untouched when the file
    /// does not exist. Parse and read failures are returned without changing
    /// the inventory.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<bool> {
        let path = path.as_ref();
        match persistence::load_ledger(path)? {
            Some(ledger) => {
                self.ledger = ledger;
                info!(path = %path.display(), "Loaded inventory data from file.");
                Ok(true)
            }
            None => {
                warn!(
                    path = %path.display(),
                    "{} not found. Starting with empty inventory.",
                    path.display()
                );
                Ok(false)
            }
        }
    }

    /// Load from the configured data path.
    pub fn load_default(&mut self) -> Result<bool> {
        let path = self.config.data_path.clone();
        self.load(path)
    }
}
