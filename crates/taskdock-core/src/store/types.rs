//! Core type and read-only accessors for OrderedKeyStore.

use std::hash::Hash;

use hashlink::LinkedHashMap;

/// Contract failures of the store. Either one means the caller lost track of
/// what it inserted, which the dock treats as a synchronization bug.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("key already present in store")]
    DuplicateKey,

    #[error("key not present in store")]
    MissingKey,
}

/// A keyed collection that also remembers an explicit order.
///
/// Lookups, insertion, removal and moving an entry to either end are O(1):
/// the map keeps a hash index over an intrusive doubly linked list. Iteration
/// follows the current order. The store is used both for the group row (UI
/// order) and for the window recency list (most recently active first).
///
/// Not synchronized: it is only ever touched from the dock's event context.
#[derive(Debug)]
pub struct OrderedKeyStore<K, V> {
    pub(super) entries: LinkedHashMap<K, V>,
}

impl<K: Eq + Hash + Clone, V> OrderedKeyStore<K, V> {
    pub fn new() -> Self {
        Self {
            entries: LinkedHashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    /// The entry at the front of the order.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.entries.front()
    }

    pub fn first_key(&self) -> Option<&K> {
        self.entries.front().map(|(k, _)| k)
    }

    /// Zero-based position of `key` in the current order. O(n).
    pub fn position(&self, key: &K) -> Option<usize> {
        self.entries.keys().position(|k| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.entries.values_mut()
    }

    /// Visit every entry in order.
    pub fn for_each(&self, mut f: impl FnMut(&K, &V)) {
        for (k, v) in self.entries.iter() {
            f(k, v);
        }
    }

    /// First entry, in order, for which `pred` holds.
    pub fn find_if(&self, mut pred: impl FnMut(&K, &V) -> bool) -> Option<(&K, &V)> {
        self.entries.iter().find(|(k, v)| pred(k, v))
    }
}

impl<K: Eq + Hash + Clone, V> Default for OrderedKeyStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
