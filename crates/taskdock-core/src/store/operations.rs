//! Mutating operations on OrderedKeyStore: push, pop, reorder, retain.

use std::hash::Hash;

use super::{OrderedKeyStore, StoreError};

impl<K: Eq + Hash + Clone, V> OrderedKeyStore<K, V> {
    /// Append an entry at the back.
    pub fn push(&mut self, key: K, value: V) -> Result<(), StoreError> {
        if self.entries.contains_key(&key) {
            return Err(StoreError::DuplicateKey);
        }
        self.entries.insert(key, value);
        Ok(())
    }

    /// Insert an entry right after the current front entry, or at the front
    /// when the store is empty. The front entry keeps its place.
    pub fn push_second(&mut self, key: K, value: V) -> Result<(), StoreError> {
        if self.entries.contains_key(&key) {
            return Err(StoreError::DuplicateKey);
        }
        let head = self.entries.front().map(|(k, _)| k.clone());
        self.entries.insert(key.clone(), value);
        self.entries.to_front(&key);
        if let Some(head) = head {
            self.entries.to_front(&head);
        }
        Ok(())
    }

    /// Remove an entry and hand back its value.
    pub fn pop(&mut self, key: &K) -> Result<V, StoreError> {
        self.entries.remove(key).ok_or(StoreError::MissingKey)
    }

    /// Relocate an existing entry to the front.
    pub fn move_to_start(&mut self, key: &K) -> Result<&mut V, StoreError> {
        self.entries.to_front(key).ok_or(StoreError::MissingKey)
    }

    /// Relocate an existing entry to the back.
    pub fn move_to_end(&mut self, key: &K) -> Result<&mut V, StoreError> {
        self.entries.to_back(key).ok_or(StoreError::MissingKey)
    }

    /// Move `moving` into the position currently held by `target`.
    ///
    /// Entries between the two shift by one towards the old position of
    /// `moving`, so moving rightwards lands after `target` and moving
    /// leftwards lands before it. O(n).
    pub fn move_to_position_of(&mut self, moving: &K, target: &K) -> Result<(), StoreError> {
        let from = self.position(moving).ok_or(StoreError::MissingKey)?;
        let to = self.position(target).ok_or(StoreError::MissingKey)?;
        if from == to {
            return Ok(());
        }

        let mut order: Vec<K> = self.entries.keys().cloned().collect();
        let key = order.remove(from);
        order.insert(to, key);

        // Rotate everything from the first changed slot to the back, in the
        // new order; entries before it are already in place.
        let first_changed = from.min(to);
        for key in order.iter().skip(first_changed) {
            self.entries.to_back(key);
        }
        Ok(())
    }

    /// Keep only the entries for which `keep` returns true. The callback may
    /// mutate values it keeps.
    pub fn retain(&mut self, keep: impl FnMut(&K, &mut V) -> bool) {
        self.entries.retain(keep);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
