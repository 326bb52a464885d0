//! Bounded FIFO entity store
//!
//! Bullets and both brick lanes live in a `RingBuffer`. Entities enter at the
//! tail and leave only from the head, so the logical cursors `start` and `end`
//! only ever move forward. An entity deeper in the buffer that is already
//! dead stays put until everything ahead of it has been retired.

use std::collections::VecDeque;

use crate::error::SimError;

/// Fixed-capacity FIFO with monotonically advancing logical cursors
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    /// Store name used in diagnostics
    name: &'static str,
    capacity: usize,
    items: VecDeque<T>,
    /// Logical index of the head; total number of entities ever retired
    start: u64,
}

impl<T> RingBuffer<T> {
    pub fn new(name: &'static str, capacity: usize) -> Self {
        Self {
            name,
            capacity,
            items: VecDeque::new(),
            start: 0,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Logical index of the oldest entity still stored
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Logical index one past the newest entity
    pub fn end(&self) -> u64 {
        self.start + self.items.len() as u64
    }

    /// Append at the tail. A full store rejects the entity.
    pub fn push(&mut self, item: T) -> Result<u64, SimError> {
        if self.is_full() {
            return Err(SimError::StoreFull {
                store: self.name,
                capacity: self.capacity,
            });
        }
        let index = self.end();
        self.items.push_back(item);
        Ok(index)
    }

    /// Remove the head entity
    pub fn pop_front(&mut self) -> Option<T> {
        let item = self.items.pop_front()?;
        self.start += 1;
        Some(item)
    }

    pub fn front(&self) -> Option<&T> {
        self.items.front()
    }

    /// Retire head entities while `retire` holds for the head.
    ///
    /// Stops at the first entity that should stay, even if entities behind
    /// it would qualify. Returns how many were retired.
    pub fn retire_while<F>(&mut self, mut retire: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let mut retired = 0;
        while self.items.front().is_some_and(&mut retire) {
            self.pop_front();
            retired += 1;
        }
        retired
    }

    /// Entity at a logical index, if still stored
    pub fn get(&self, index: u64) -> Option<&T> {
        let offset = index.checked_sub(self.start)?;
        self.items.get(usize::try_from(offset).ok()?)
    }

    /// Iterate head to tail
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Iterate head to tail, mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut()
    }
}
