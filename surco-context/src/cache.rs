//! Bounded, insert-only cache.
//!
//! Entries are never evicted or overwritten: the first value stored for a key
//! wins, and once `max_size` keys are held further inserts are ignored.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::RwLock;

pub struct BoundedCache<K, V> {
    entries: RwLock<HashMap<K, V>>,
    max_size: usize,
}

impl<K: Eq + Hash + Clone, V: Clone> BoundedCache<K, V> {
    /// Create a cache holding at most `max_size` entries.
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_size,
        }
    }

    /// Cached value for `key`. A poisoned lock reads as a miss.
    pub fn get(&self, key: &K) -> Option<V> {
        self.entries.read().ok()?.get(key).cloned()
    }

    /// Store `value` unless `key` is already present or the cache is full.
    ///
    /// # Returns
    /// `true` if the value was stored.
    pub fn insert(&self, key: K, value: V) -> bool {
        let Ok(mut entries) = self.entries.write() else {
            return false;
        };
        if entries.contains_key(&key) || entries.len() >= self.max_size {
            return false;
        }
        entries.insert(key, value);
        true
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries
            .read()
            .map(|e| e.contains_key(key))
            .unwrap_or(false)
    }

    pub fn keys(&self) -> Vec<K> {
        self.entries
            .read()
            .map(|e| e.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() >= self.max_size
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl<K, V> std::fmt::Debug for BoundedCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedCache")
            .field("max_size", &self.max_size)
            .field(
                "current_size",
                &self.entries.read().map(|e| e.len()).unwrap_or(0),
            )
            .finish()
    }
}
