//! # Ordered Collection
//!
//! An explicit ordering of unique keys plus a key → payload map, kept in sync.
//!
//! ## Semantics
//!
//! - Every operation returns a new collection; the receiver is never touched
//! - The order and the map are shared (`Arc`) between versions until an
//!   operation actually needs to change one of them, so a payload edit leaves
//!   the order shared and a reorder leaves the payloads shared
//! - `move_before` places a key immediately before another key
//! - `move_onto` is "drop onto": the key takes over the target's current slot
//!   and the items in between shift by one

use crate::error::{DocumentError, DocumentResult};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

/// Ordered, keyed collection of payloads
#[derive(Debug)]
pub struct OrderedCollection<K, V> {
    order: Arc<Vec<K>>,
    entries: Arc<HashMap<K, Arc<V>>>,
}

impl<K, V> Clone for OrderedCollection<K, V> {
    fn clone(&self) -> Self {
        Self {
            order: Arc::clone(&self.order),
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<K, V> Default for OrderedCollection<K, V> {
    fn default() -> Self {
        Self {
            order: Arc::new(Vec::new()),
            entries: Arc::new(HashMap::new()),
        }
    }
}

impl<K, V> PartialEq for OrderedCollection<K, V>
where
    K: Eq + Hash,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.order, &other.order) && Arc::ptr_eq(&self.entries, &other.entries) {
            return true;
        }
        self.order == other.order && self.entries == other.entries
    }
}

impl<K, V> OrderedCollection<K, V>
where
    K: Clone + Eq + Hash + fmt::Display,
{
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from `(key, payload)` pairs in order
    pub fn from_entries<I>(entries: I) -> DocumentResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut order = Vec::new();
        let mut map = HashMap::new();

        for (key, value) in entries {
            if map.contains_key(&key) {
                return Err(DocumentError::DuplicateKey(key.to_string()));
            }
            order.push(key.clone());
            map.insert(key, Arc::new(value));
        }

        Ok(Self {
            order: Arc::new(order),
            entries: Arc::new(map),
        })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key).map(|value| value.as_ref())
    }

    /// Keys in order
    pub fn order(&self) -> &[K] {
        &self.order
    }

    /// Position of `key` in the order
    pub fn index_of(&self, key: &K) -> Option<usize> {
        self.order.iter().position(|k| k == key)
    }

    /// Payloads in order
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.order
            .iter()
            .filter_map(move |key| self.entries.get(key).map(|value| value.as_ref()))
    }

    /// `(key, payload)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.order
            .iter()
            .filter_map(move |key| self.entries.get(key).map(|value| (key, value.as_ref())))
    }

    /// Append `key` at the end
    pub fn insert(&self, key: K, value: V) -> DocumentResult<Self> {
        self.insert_at(self.order.len(), key, value)
    }

    /// Insert `key` at `index` (clamped to the end)
    pub fn insert_at(&self, index: usize, key: K, value: V) -> DocumentResult<Self> {
        if self.contains(&key) {
            return Err(DocumentError::DuplicateKey(key.to_string()));
        }

        let mut order = self.order.as_ref().clone();
        order.insert(index.min(order.len()), key.clone());

        let mut entries = self.entries.as_ref().clone();
        entries.insert(key, Arc::new(value));

        Ok(Self {
            order: Arc::new(order),
            entries: Arc::new(entries),
        })
    }

    /// Remove `key` from both the order and the map
    pub fn remove(&self, key: &K) -> DocumentResult<Self> {
        let index = self.require_index(key)?;

        let mut order = self.order.as_ref().clone();
        order.remove(index);

        let mut entries = self.entries.as_ref().clone();
        entries.remove(key);

        Ok(Self {
            order: Arc::new(order),
            entries: Arc::new(entries),
        })
    }

    /// Relocate `key` to sit immediately before `before`
    pub fn move_before(&self, key: &K, before: &K) -> DocumentResult<Self> {
        let from = self.require_index(key)?;
        self.require_index(before)?;

        if key == before {
            return Ok(self.clone());
        }

        let mut order = self.order.as_ref().clone();
        let moved = order.remove(from);
        let to = order.iter().position(|k| k == before).unwrap_or(order.len());
        order.insert(to, moved);

        Ok(self.with_order(order))
    }

    /// Relocate `key` to the end of the order
    pub fn move_to_end(&self, key: &K) -> DocumentResult<Self> {
        let from = self.require_index(key)?;

        if from + 1 == self.order.len() {
            return Ok(self.clone());
        }

        let mut order = self.order.as_ref().clone();
        let moved = order.remove(from);
        order.push(moved);

        Ok(self.with_order(order))
    }

    /// Move `key` into the slot currently held by `target`
    pub fn move_onto(&self, key: &K, target: &K) -> DocumentResult<Self> {
        let from = self.require_index(key)?;
        let to = self.require_index(target)?;

        if from == to {
            return Ok(self.clone());
        }

        let mut order = self.order.as_ref().clone();
        let moved = order.remove(from);
        order.insert(to, moved);

        Ok(self.with_order(order))
    }

    /// Replace the payload stored under `key`, keeping its position
    pub fn update<F>(&self, key: &K, f: F) -> DocumentResult<Self>
    where
        F: FnOnce(&V) -> DocumentResult<V>,
    {
        let current = self
            .entries
            .get(key)
            .ok_or_else(|| DocumentError::KeyNotFound(key.to_string()))?;
        let updated = f(current)?;

        let mut entries = self.entries.as_ref().clone();
        entries.insert(key.clone(), Arc::new(updated));

        Ok(Self {
            order: Arc::clone(&self.order),
            entries: Arc::new(entries),
        })
    }

    /// True when both collections point at the same order allocation
    pub fn shares_order(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.order, &other.order)
    }

    /// True when both collections point at the same payload map
    pub fn shares_entries(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }

    /// True when the payload for `key` is the same allocation in both
    pub fn shares_entry(&self, other: &Self, key: &K) -> bool {
        match (self.entries.get(key), other.entries.get(key)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Check that the order is a duplicate-free permutation of the map's keys
    pub fn check_consistency(&self) -> DocumentResult<()> {
        if self.order.len() != self.entries.len() {
            return Err(DocumentError::InvalidStructure(format!(
                "order has {} keys but map has {}",
                self.order.len(),
                self.entries.len()
            )));
        }

        let mut seen = std::collections::HashSet::with_capacity(self.order.len());
        for key in self.order.iter() {
            if !seen.insert(key) {
                return Err(DocumentError::DuplicateKey(key.to_string()));
            }
            if !self.entries.contains_key(key) {
                return Err(DocumentError::InvalidStructure(format!(
                    "'{}' is ordered but has no entry",
                    key
                )));
            }
        }

        Ok(())
    }

    fn require_index(&self, key: &K) -> DocumentResult<usize> {
        self.index_of(key)
            .ok_or_else(|| DocumentError::KeyNotFound(key.to_string()))
    }

    fn with_order(&self, order: Vec<K>) -> Self {
        Self {
            order: Arc::new(order),
            entries: Arc::clone(&self.entries),
        }
    }
}
