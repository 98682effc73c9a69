//! Core types for the inventory.

use crate::error::InventoryError;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Stock count for an item. May go negative through unchecked additions.
pub type Quantity = i64;

/// Threshold below which an item counts as low on stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: Quantity = 5;

/// Name identifying an item. Any non-empty text, whitespace included.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemName(String);

impl ItemName {
    /// Validate and wrap an item name.
    pub fn new(name: impl Into<String>) -> Result<Self, InventoryError> {
        let name = name.into();
        if name.is_empty() {
            return Err(InventoryError::Validation(format!(
                "Invalid item name {:?}. Must be a non-empty string.",
                name
            )));
        }
        Ok(ItemName(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ItemName {
    type Error = InventoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ItemName::new(value)
    }
}

impl TryFrom<&str> for ItemName {
    type Error = InventoryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        ItemName::new(value)
    }
}

impl From<ItemName> for String {
    fn from(name: ItemName) -> Self {
        name.0
    }
}

impl AsRef<str> for ItemName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ItemName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ItemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemName({:?})", self.0)
    }
}

impl fmt::Display for ItemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Local wall-clock time of an event.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(pub DateTime<Local>);

impl Timestamp {
    /// Current time.
    pub fn now() -> Self {
        Timestamp(Local::now())
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S%.6f"))
    }
}

/// Outcome of a successful removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Removal {
    /// The item dropped to zero or below and was deleted.
    Depleted,

    /// The item is still stocked with this many units.
    Remaining(Quantity),
}

impl Removal {
    /// Quantity left after the removal (0 once depleted).
    pub fn remaining(self) -> Quantity {
        match self {
            Removal::Depleted => 0,
            Removal::Remaining(left) => left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_name_rejects_empty() {
        assert!(matches!(ItemName::new(""), Err(InventoryError::Validation(_))));
        assert!(matches!(ItemName::try_from(""), Err(InventoryError::Validation(_))));
    }

    #[test]
    fn test_item_name_accepts_whitespace() {
        let name = ItemName::try_from("   ").unwrap();
        assert_eq!(name.as_str(), "   ");
    }

    #[test]
    fn test_item_name_keeps_text_verbatim() {
        let name = ItemName::new(" apple ").unwrap();
        assert_eq!(name.as_str(), " apple ");
        assert_eq!(name.to_string(), " apple ");
    }

    #[test]
    fn test_item_name_serde_validates() {
        let name: ItemName = serde_json::from_str("\"pear\"").unwrap();
        assert_eq!(name.as_str(), "pear");
        assert!(serde_json::from_str::<ItemName>("\"\"").is_err());
        assert!(serde_json::from_str::<ItemName>("\" \"").is_ok());
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"pear\"");
    }

    #[test]
    fn test_timestamp_format() {
        let rendered = Timestamp::now().to_string();
        // YYYY-MM-DD HH:MM:SS.ffffff
        assert_eq!(rendered.len(), 26);
        assert_eq!(&rendered[10..11], " ");
        assert_eq!(&rendered[19..20], ".");
    }

    #[test]
    fn test_removal_remaining() {
        assert_eq!(Removal::Depleted.remaining(), 0);
        assert_eq!(Removal::Remaining(7).remaining(), 7);
    }
}
