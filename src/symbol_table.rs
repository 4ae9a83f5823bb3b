//! Open-addressing symbol table.
//!
//! Variables assigned while evaluating an expression live here. Entries sit
//! in a single slot array and collisions are resolved by linear probing. The
//! table starts with two slots and doubles whenever an insertion would bring
//! the load factor to 0.8 or more.
//!
//! Removal re-seats the rest of the probe cluster behind the freed slot
//! (backward-shift deletion), so no tombstones are needed and every key
//! inserted past the removed one stays reachable.
//!
//! ```
//! use rpn_rs::symbol_table::SymbolTable;
//!
//! let mut table = SymbolTable::new();
//! table.put("x", 5).unwrap();
//! table.put("y", 7).unwrap();
//! assert_eq!(table.get("x"), Some(&5));
//! assert_eq!(table.remove("x"), Some(5));
//! assert_eq!(table.get("x"), None);
//! assert_eq!(table.len(), 1);
//! ```

use core::mem;

use hash32::{FnvHasher, Hasher};
use tracing::debug;

use crate::error::{ExprError, Result};
use crate::types::{HString, TryIntoHeaplessString};

/// Number of slots in a new or cleared table.
pub const INITIAL_CAPACITY: usize = 2;

/// How entries are re-placed when the table grows.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RehashStrategy {
    /// Probe forward from the home slot, like an ordinary insert.
    #[default]
    Probe,
    /// Place every entry at its home slot only. Growing fails with
    /// [`ExprError::RehashCollision`] if two entries share a home slot.
    Direct,
}

#[derive(Debug, Clone)]
struct Entry<V> {
    key: HString,
    value: V,
}

/// A string-keyed hash map using open addressing with linear probing.
#[derive(Debug, Clone)]
pub struct SymbolTable<V> {
    slots: Box<[Option<Entry<V>>]>,
    size: usize,
    strategy: RehashStrategy,
}

fn empty_slots<V>(capacity: usize) -> Box<[Option<Entry<V>>]> {
    (0..capacity).map(|_| None).collect()
}

/// Home slot of `key` in a table of `capacity` slots.
pub fn hash_index(key: &str, capacity: usize) -> usize {
    let mut hasher = FnvHasher::default();
    hasher.write(key.as_bytes());
    (hasher.finish() & 0x7FFF_FFFF) as usize % capacity
}

impl<V> SymbolTable<V> {
    /// Creates an empty table with [`INITIAL_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_strategy(RehashStrategy::default())
    }

    /// Creates an empty table that grows using `strategy`.
    pub fn with_strategy(strategy: RehashStrategy) -> Self {
        Self {
            slots: empty_slots(INITIAL_CAPACITY),
            size: 0,
            strategy,
        }
    }

    /// Creates an empty table with at least `capacity` slots.
    ///
    /// `clear` still shrinks it back to [`INITIAL_CAPACITY`].
    pub fn with_capacity(capacity: usize, strategy: RehashStrategy) -> Self {
        Self {
            slots: empty_slots(capacity.max(INITIAL_CAPACITY)),
            size: 0,
            strategy,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.size
    }

    /// `true` when the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Entries per slot, always below 0.8 after a successful `put`.
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.capacity() as f64
    }

    /// Walks the probe sequence of `key` and returns the slot holding it or
    /// the first empty slot, whichever comes first.
    fn probe(&self, key: &str) -> Option<usize> {
        let capacity = self.capacity();
        let mut index = hash_index(key, capacity);
        for _ in 0..capacity {
            match &self.slots[index] {
                Some(entry) if entry.key.as_str() != key => index = (index + 1) % capacity,
                _ => return Some(index),
            }
        }
        None
    }

    fn find(&self, key: &str) -> Option<usize> {
        self.probe(key).filter(|&index| self.slots[index].is_some())
    }

    /// Inserts or overwrites `key`, returning the previous value.
    ///
    /// Grows the table first if the insertion would take the load factor to
    /// 0.8 or more. Only a new key increases the entry count.
    pub fn put(&mut self, key: &str, value: V) -> Result<Option<V>> {
        let key = key.try_into_heapless()?;
        let size_after = if self.contains_key(&key) {
            self.size
        } else {
            self.size + 1
        };
        if size_after * 5 >= self.capacity() * 4 {
            self.rehash()?;
        }

        let index = self
            .probe(&key)
            .ok_or(ExprError::CapacityExceeded("symbol table"))?;
        let slot = &mut self.slots[index];
        if let Some(entry) = slot {
            return Ok(Some(mem::replace(&mut entry.value, value)));
        }
        *slot = Some(Entry { key, value });
        self.size += 1;
        Ok(None)
    }

    /// Looks up `key`, stopping at the first empty slot.
    pub fn get(&self, key: &str) -> Option<&V> {
        let index = self.find(key)?;
        self.slots[index].as_ref().map(|entry| &entry.value)
    }

    /// `true` if `key` has an entry.
    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Removes `key` and returns its value.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.find(key)?;
        let removed = self.slots[index].take()?;
        self.size -= 1;
        self.reseat_cluster(index);
        Some(removed.value)
    }

    /// Re-inserts every entry between `hole` and the next empty slot so that
    /// none of them is cut off from its home slot.
    fn reseat_cluster(&mut self, hole: usize) {
        let capacity = self.capacity();
        let mut index = (hole + 1) % capacity;
        while let Some(entry) = self.slots[index].take() {
            let target = self.probe(entry.key.as_str()).unwrap_or(index);
            self.slots[target] = Some(entry);
            index = (index + 1) % capacity;
        }
    }

    /// Drops every entry and shrinks back to [`INITIAL_CAPACITY`] slots.
    pub fn clear(&mut self) {
        self.slots = empty_slots(INITIAL_CAPACITY);
        self.size = 0;
    }

    /// Doubles the capacity and re-places every entry.
    ///
    /// With [`RehashStrategy::Direct`] a shared home slot makes this fail and
    /// the table keeps its old slots untouched.
    pub fn rehash(&mut self) -> Result<()> {
        let new_capacity = self.capacity() * 2;

        if self.strategy == RehashStrategy::Direct {
            let mut taken = vec![false; new_capacity];
            for entry in self.slots.iter().flatten() {
                let index = hash_index(entry.key.as_str(), new_capacity);
                if mem::replace(&mut taken[index], true) {
                    debug!(
                        key = entry.key.as_str(),
                        capacity = new_capacity,
                        "direct rehash collision"
                    );
                    return Err(ExprError::RehashCollision {
                        capacity: new_capacity,
                    });
                }
            }
        }

        debug!(
            from = self.capacity(),
            to = new_capacity,
            entries = self.size,
            "rehashing symbol table"
        );
        let old = mem::replace(&mut self.slots, empty_slots(new_capacity));
        for entry in old.into_vec().into_iter().flatten() {
            let mut index = hash_index(entry.key.as_str(), new_capacity);
            while self.slots[index].is_some() {
                index = (index + 1) % new_capacity;
            }
            self.slots[index] = Some(entry);
        }
        Ok(())
    }

    /// Entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.slots
            .iter()
            .flatten()
            .map(|entry| (entry.key.as_str(), &entry.value))
    }
}

impl<V> Default for SymbolTable<V> {
    fn default() -> Self {
        Self::new()
    }
}
