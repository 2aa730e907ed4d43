use std::ops::{Index, IndexMut};

use crate::{Error, Result};

/// An ordered, index-addressable, growable sequence.
///
/// Storage grows by doubling: once `len` reaches the current capacity, the
/// elements are moved into a buffer twice the size. Appends are amortized
/// O(1); `insert` and `remove` shift the trailing elements by one place.
pub struct Vector<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Vector<T> {
    pub const INITIAL_CAPACITY: usize = 10;

    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::INITIAL_CAPACITY)
    }

    /// Creates an empty vector that can hold `capacity` elements before its
    /// first reallocation. A capacity of zero is rounded up to one so that
    /// doubling always makes progress.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Creates a vector of `n` copies of `value`.
    #[must_use]
    pub fn from_elem(n: usize, value: T) -> Self
    where
        T: Clone,
    {
        let mut vector = Self::with_capacity(n.max(Self::INITIAL_CAPACITY));
        vector.items.resize(n, value);
        vector
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Alias of [`Vector::len`].
    #[must_use]
    pub fn size(&self) -> usize {
        self.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes every element. Capacity is retained.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// ## Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] unless `index < len`.
    pub fn get(&self, index: usize) -> Result<&T> {
        let len = self.len();
        self.items.get(index).ok_or(Error::IndexOutOfRange {
            op: "get",
            index,
            len,
        })
    }

    /// ## Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] unless `index < len`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len();
        self.items.get_mut(index).ok_or(Error::IndexOutOfRange {
            op: "get",
            index,
            len,
        })
    }

    /// Replaces the element at `index`.
    ///
    /// ## Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] unless `index < len`.
    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        self.check(index, "set")?;
        self.items[index] = value;
        Ok(())
    }

    /// Inserts `value` before the element at `index`, shifting everything
    /// after it one place to the right. `index == len` appends.
    ///
    /// ## Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] unless `index <= len`.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        if index > self.len() {
            return Err(Error::IndexOutOfRange {
                op: "insert",
                index,
                len: self.len(),
            });
        }

        if self.len() == self.capacity {
            self.expand_capacity();
        }
        self.items.insert(index, value);
        Ok(())
    }

    /// Removes and returns the element at `index`, closing up the gap.
    ///
    /// ## Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] unless `index < len`.
    pub fn remove(&mut self, index: usize) -> Result<T> {
        self.check(index, "remove")?;
        Ok(self.items.remove(index))
    }

    /// Appends `value` to the end of the vector.
    pub fn add(&mut self, value: T) {
        if self.len() == self.capacity {
            self.expand_capacity();
        }
        self.items.push(value);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    fn check(&self, index: usize, op: &'static str) -> Result<()> {
        if index < self.len() {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                op,
                index,
                len: self.len(),
            })
        }
    }

    fn expand_capacity(&mut self) {
        let capacity = self.capacity * 2;
        tracing::trace!(from = self.capacity, to = capacity, "vector: expanding capacity");

        let mut items = Vec::with_capacity(capacity);
        items.append(&mut self.items);
        self.items = items;
        self.capacity = capacity;
    }
}

/// Copies the elements into fresh storage sized `len + INITIAL_CAPACITY`, so
/// the copy has room to grow before its first reallocation.
impl<T: Clone> Clone for Vector<T> {
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity(self.len() + Self::INITIAL_CAPACITY);
        copy.items.extend_from_slice(&self.items);
        copy
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Eq> Eq for Vector<T> {}

/// ## Panics
///
/// Panics if `index >= len`.
impl<T> Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.items.get(index) {
            Some(value) => value,
            None => panic!("Vector index {index} out of range for length {}", self.len()),
        }
    }
}

/// ## Panics
///
/// Panics if `index >= len`.
impl<T> IndexMut<usize> for Vector<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len();
        match self.items.get_mut(index) {
            Some(value) => value,
            None => panic!("Vector index {index} out of range for length {len}"),
        }
    }
}

impl<T> Extend<T> for Vector<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vector = Self::new();
        vector.extend(iter);
        vector
    }
}

impl<T> IntoIterator for Vector<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
