//! Retention Buffer ("Tummy")
//!
//! Fixed-capacity, oldest-first-evicted store of digested facts. Implemented
//! as an explicit ring over a slot vector; capacity and eviction order are
//! the contract, so no bounded-deque primitive is used.

use serde::{Deserialize, Serialize};

/// A stored fact about an even number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigestedFact {
    pub number: i64,
    pub fact: String,
}

/// Fixed-capacity FIFO ring of digested facts.
///
/// Elements occupy `len` slots starting at `head`, wrapping modulo capacity.
/// Capacity is fixed at construction and never changes. With capacity 0 every
/// `swallow` is an immediate no-op eviction returning the incoming fact.
pub struct Tummy {
    slots: Vec<Option<DigestedFact>>,
    head: usize,
    len: usize,
}

impl Tummy {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            head: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// The element that would be evicted next
    pub fn oldest(&self) -> Option<&DigestedFact> {
        if self.len == 0 {
            return None;
        }
        self.slots[self.head].as_ref()
    }

    /// Insert a fact, evicting and returning the oldest element when full.
    ///
    /// The check-then-insert-or-evict sequence happens in one call, so the
    /// buffer can never exceed capacity or lose an eviction.
    pub fn swallow(&mut self, fact: DigestedFact) -> Option<DigestedFact> {
        let capacity = self.slots.len();
        if capacity == 0 {
            return Some(fact);
        }

        if self.len == capacity {
            let evicted = self.slots[self.head].replace(fact);
            self.head = (self.head + 1) % capacity;
            evicted
        } else {
            let tail = (self.head + self.len) % capacity;
            self.slots[tail] = Some(fact);
            self.len += 1;
            None
        }
    }

    /// Current contents, oldest first
    pub fn snapshot(&self) -> Vec<DigestedFact> {
        let capacity = self.slots.len();
        (0..self.len)
            .filter_map(|i| self.slots[(self.head + i) % capacity].as_ref().cloned())
            .collect()
    }
}
