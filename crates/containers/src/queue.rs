use std::collections::VecDeque;

use crate::{Error, Result};

/// A first-in, first-out queue.
#[derive(Clone)]
pub struct Queue<T> {
    items: VecDeque<T>,
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Queue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Adds `value` at the tail of the queue.
    pub fn enqueue(&mut self, value: T) {
        self.items.push_back(value);
    }

    /// Removes and returns the value at the head of the queue.
    ///
    /// ## Errors
    ///
    /// Returns [`Error::Empty`] if the queue has no elements.
    pub fn dequeue(&mut self) -> Result<T> {
        self.items.pop_front().ok_or(Error::Empty {
            op: "dequeue",
            container: "queue",
        })
    }

    /// ## Errors
    ///
    /// Returns [`Error::Empty`] if the queue has no elements.
    pub fn peek(&self) -> Result<&T> {
        self.items.front().ok_or(Error::Empty {
            op: "peek",
            container: "queue",
        })
    }

    /// Iterates from head to tail.
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
