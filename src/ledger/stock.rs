//! Ordered item -> quantity map.

use crate::types::{ItemName, Quantity};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Item quantities in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StockLedger {
    /// Entries in insertion order.
    entries: Vec<(ItemName, Quantity)>,

    /// Item name -> position in `entries`.
    positions: HashMap<ItemName, usize>,
}

impl StockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quantity held for an item, if present.
    pub fn get(&self, item: &str) -> Option<Quantity> {
        self.positions.get(item).map(|&pos| self.entries[pos].1)
    }

    /// Mutable access to an item's quantity, if present.
    pub fn get_mut(&mut self, item: &str) -> Option<&mut Quantity> {
        let pos = *self.positions.get(item)?;
        Some(&mut self.entries[pos].1)
    }

    pub fn contains(&self, item: &str) -> bool {
        self.positions.contains_key(item)
    }

    /// Set an item's quantity, returning the previous value.
    ///
    /// An existing item keeps its position; a new one is appended.
    pub fn insert(&mut self, item: ItemName, quantity: Quantity) -> Option<Quantity> {
        if let Some(&pos) = self.positions.get(&item) {
            return Some(std::mem::replace(&mut self.entries[pos].1, quantity));
        }

        self.positions.insert(item.clone(), self.entries.len());
        self.entries.push((item, quantity));
        None
    }

    /// Delete an item, returning its last quantity.
    pub fn remove(&mut self, item: &str) -> Option<Quantity> {
        let pos = self.positions.remove(item)?;
        let (_, quantity) = self.entries.remove(pos);

        // Later entries shifted down by one.
        for (name, _) in &self.entries[pos..] {
            if let Some(p) = self.positions.get_mut(name.as_str()) {
                *p -= 1;
            }
        }

        Some(quantity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }
}

/// Iterator over ledger entries.
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, (ItemName, Quantity)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a ItemName, Quantity);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(name, qty)| (name, *qty))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a StockLedger {
    type Item = (&'a ItemName, Quantity);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<(ItemName, Quantity)> for StockLedger {
    fn from_iter<I: IntoIterator<Item = (ItemName, Quantity)>>(iter: I) -> Self {
        let mut ledger = StockLedger::new();
        for (item, quantity) in iter {
            ledger.insert(item, quantity);
        }
        ledger
    }
}

impl Serialize for StockLedger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (item, quantity) in &self.entries {
            map.serialize_entry(item.as_str(), quantity)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StockLedger {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(LedgerVisitor)
    }
}

struct LedgerVisitor;

impl<'de> Visitor<'de> for LedgerVisitor {
    type Value = StockLedger;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping item names to integer quantities")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut ledger = StockLedger::new();
        // A repeated key keeps its first position and its last value.
        while let Some((item, quantity)) = access.next_entry::<ItemName, Quantity>()? {
            ledger.insert(item, quantity);
        }
        Ok(ledger)
    }
}
