use std::{marker::PhantomData, num::NonZeroU64};

/// Nonzero handle to an item in a [`Pool`]. The handle is unique for the
/// lifetime of the pool that created it: once the item is removed, the handle
/// never resolves again, even if its slot is reused.
///
/// It is typed for a modicum of safety, but nothing stops a handle from being
/// presented to a different pool of the same type. The pool will then either
/// reject it or resolve it to an unrelated item.
pub struct Handle<T>(NonZeroU64, PhantomData<fn() -> T>);

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for Handle<T> {}

impl<T> PartialOrd for Handle<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Handle<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> std::hash::Hash for Handle<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> std::fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handle")
            .field("index", &self.index())
            .field("generation", &self.generation())
            .finish()
    }
}

impl<T> Handle<T> {
    fn new(index: u32, generation: u32) -> Self {
        let value = u64::from(generation) << 32 | u64::from(index);
        // Generations start at 1, so the packed value is never zero.
        Self(
            NonZeroU64::new(value).unwrap_or(NonZeroU64::MIN),
            PhantomData,
        )
    }

    /// The slot index of the handle. Indices are dense (`0..pool.slots()`)
    /// and suitable for side tables, but are shared by every generation that
    /// occupies the slot.
    #[must_use]
    pub fn index(&self) -> usize {
        (self.0.get() as u32) as usize
    }

    fn generation(&self) -> u32 {
        (self.0.get() >> 32) as u32
    }
}

enum Entry<T> {
    Occupied(T),
    Free { next: Option<u32> },
}

struct Slot<T> {
    // Kept outside of the entry so that it survives the slot being pushed on
    // to the free list.
    generation: u32,
    entry: Entry<T>,
}

/// An object pool that makes use of generational indices to avoid the ABA
/// problem.
///
/// Removed slots are threaded onto an intrusive free list and reused by later
/// insertions with a bumped generation. A slot whose generation saturates is
/// retired instead of reused.
pub struct Pool<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<u32>,
    len: usize,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Pool<T> {
    /// Initializes a new empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Initializes a new empty pool with room for `capacity` items before it
    /// has to reallocate.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
        }
    }

    /// The number of live items in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of slots the pool has ever handed out. Every handle's
    /// [`Handle::index`] is below this value.
    #[must_use]
    pub fn slots(&self) -> usize {
        self.slots.len()
    }

    /// Returns a reference to the item identified by the given handle.
    ///
    /// ## Returns
    ///
    /// `Some(&T)` if the handle is valid and `None` otherwise.
    #[must_use]
    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        let slot = self.slots.get(handle.index())?;
        match &slot.entry {
            Entry::Occupied(value) if slot.generation == handle.generation() => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to the item identified by the given handle.
    ///
    /// ## Returns
    ///
    /// `Some(&mut T)` if the handle is valid and `None` otherwise.
    #[must_use]
    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        let slot = self.slots.get_mut(handle.index())?;
        match &mut slot.entry {
            Entry::Occupied(value) if slot.generation == handle.generation() => Some(value),
            _ => None,
        }
    }

    /// Returns true if the handle refers to a live item.
    #[must_use]
    pub fn contains(&self, handle: Handle<T>) -> bool {
        self.get(handle).is_some()
    }

    /// Inserts a new value into the pool and returns a handle to it.
    ///
    /// ## Panics
    ///
    /// This function will panic if the pool would exceed `u32::MAX` slots.
    pub fn insert(&mut self, value: T) -> Handle<T> {
        self.len += 1;

        if let Some(index) = self.free_head {
            let slot = &mut self.slots[index as usize];
            let Entry::Free { next } = slot.entry else {
                unreachable!("free list refers to an occupied slot");
            };

            self.free_head = next;
            slot.entry = Entry::Occupied(value);
            Handle::new(index, slot.generation)
        } else {
            let index = u32::try_from(self.slots.len()).expect("max u32::MAX slots!");
            self.slots.push(Slot {
                generation: 1,
                entry: Entry::Occupied(value),
            });
            Handle::new(index, 1)
        }
    }

    /// Removes the value identified by the given handle from the pool.
    ///
    /// ## Returns
    ///
    /// Returns the value if the handle is valid and `None` otherwise.
    pub fn remove(&mut self, handle: Handle<T>) -> Option<T> {
        if !self.contains(handle) {
            return None;
        }

        let index = handle.index() as u32;
        Some(self.release(index))
    }

    /// Removes every item from the pool. Handles issued before the call are
    /// invalidated; slot storage is kept for reuse.
    pub fn clear(&mut self) {
        for index in 0..self.slots.len() {
            if matches!(self.slots[index].entry, Entry::Occupied(_)) {
                drop(self.release(index as u32));
            }
        }
    }

    /// Iterates over the live items of the pool in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Handle<T>, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| match &slot.entry {
                Entry::Occupied(value) => Some((Handle::new(index as u32, slot.generation), value)),
                Entry::Free { .. } => None,
            })
    }

    /// Iterates mutably over the live items of the pool in slot order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Handle<T>, &mut T)> + '_ {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| match &mut slot.entry {
                Entry::Occupied(value) => Some((Handle::new(index as u32, slot.generation), value)),
                Entry::Free { .. } => None,
            })
    }

    /// Takes the value out of an occupied slot and, unless its generation is
    /// saturated, pushes the slot on to the free list.
    fn release(&mut self, index: u32) -> T {
        let slot = &mut self.slots[index as usize];
        let saturated = slot.generation == u32::MAX;

        let next = if saturated { None } else { self.free_head };
        let Entry::Occupied(value) = std::mem::replace(&mut slot.entry, Entry::Free { next }) else {
            unreachable!("released slot must be occupied");
        };

        if !saturated {
            slot.generation += 1;
            self.free_head = Some(index);
        }

        self.len -= 1;
        value
    }
}
