//! A sorted array. Searching is a binary search; inserting and removing shift every later key.

use std::cmp::Ordering;

use crate::collection::KeyCollection;
use crate::keys;

/// Keys kept in ascending order in a single `Vec`. Duplicate keys are kept.
#[derive(Clone, Debug, Default)]
pub struct SortedVec {
    keys: Vec<String>,
}

impl SortedVec {
    /// Generates a new, empty `SortedVec`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the first key that isn't less than `key`.
    fn lower_bound(&self, key: &str) -> usize {
        self.keys
            .partition_point(|k| keys::compare(k, key) == Ordering::Less)
    }
}

impl KeyCollection for SortedVec {
    fn add(&mut self, key: String) {
        log::trace!("SortedVec::add({:?})", key);
        // After any equal keys.
        let index = self
            .keys
            .partition_point(|k| keys::compare(k, &key) != Ordering::Greater);
        self.keys.insert(index, key);
    }

    fn remove(&mut self, key: &str) -> bool {
        log::trace!("SortedVec::remove({:?})", key);
        let index = self.lower_bound(key);
        match self.keys.get(index) {
            Some(found) if keys::compare(found, key) == Ordering::Equal => {
                self.keys.remove(index);
                true
            }
            _ => false,
        }
    }

    fn search(&self, key: &str) -> bool {
        self.keys
            .binary_search_by(|k| keys::compare(k, key))
            .is_ok()
    }

    fn in_order(&self) -> Vec<&str> {
        self.keys.iter().map(String::as_str).collect()
    }

    fn len(&self) -> usize {
        self.keys.len()
    }
}
