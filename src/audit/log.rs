//! Audit entries and the append-only log holding them.

use crate::types::{ItemName, Quantity, Timestamp};
use std::fmt;

/// Human-readable record of a single `add`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuditEntry {
    /// When the addition happened.
    pub timestamp: Timestamp,

    /// Item that was added to.
    pub item: ItemName,

    /// Amount added (may be negative).
    pub quantity: Quantity,
}

impl AuditEntry {
    pub fn new(item: ItemName, quantity: Quantity) -> Self {
        Self {
            timestamp: Timestamp::now(),
            item,
            quantity,
        }
    }

    /// Text after the timestamp, e.g. `Added 10 of apple`.
    pub fn description(&self) -> String {
        format!("Added {} of {}", self.quantity, self.item)
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.timestamp, self.description())
    }
}

/// Ordered, append-only sequence of audit entries.
///
/// The inventory only ever appends; reading is left to the owner.
#[derive(Clone, Debug, Default)]
pub struct AuditLog {
    entries: Vec<AuditEntry>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn record(&mut self, entry: AuditEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AuditEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries rendered as `<timestamp>: Added <qty> of <item>`.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}

impl<'a> IntoIterator for &'a AuditLog {
    type Item = &'a AuditEntry;
    type IntoIter = std::slice::Iter<'a, AuditEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
