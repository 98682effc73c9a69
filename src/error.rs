//! Error types for the inventory.

use thiserror::Error;

/// Main error type for inventory operations.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Telemetry error: {0}")]
    Telemetry(String),
}

impl InventoryError {
    /// Whether the failed operation was skipped with the inventory left intact.
    ///
    /// Validation and lookup failures are recoverable; I/O and parse failures
    /// are fatal to the calling operation.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, InventoryError::Validation(_) | InventoryError::NotFound(_))
    }
}

impl From<serde_json::Error> for InventoryError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            return InventoryError::Io(e.into());
        }
        InventoryError::Serialization(e.to_string())
    }
}

/// Result type for inventory operations.
pub type Result<T> = std::result::Result<T, InventoryError>;
