use std::{
    borrow::Borrow,
    collections::hash_map,
    hash::Hash,
    ops,
};

use crate::{Map, Vector};

/// A collection of distinct values with the algebraic set operations.
///
/// Membership is stored in a [`Map`] from element to a presence marker, so
/// every basic operation costs one map lookup. The binary operators work on
/// references and produce new sets:
///
/// | expression | result                               |
/// |------------|--------------------------------------|
/// | `&a + &b`  | union                                |
/// | `&a * &b`  | intersection                         |
/// | `&a - &b`  | difference (elements of `a` not in `b`) |
/// | `&a + v`   | `a` with the element `v` added        |
/// | `&a - &v`  | `a` with the element `v` removed      |
///
/// The `+=`, `*=` and `-=` forms update the left-hand set in place, and also
/// accept a single element (`a += v`, `a -= &v`).
#[derive(Clone)]
pub struct Set<T> {
    map: Map<T, bool>,
}

impl<T> Default for Set<T> {
    fn default() -> Self {
        Self {
            map: Map::default(),
        }
    }
}

impl<T: Eq + Hash> Set<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Alias of [`Set::len`].
    #[must_use]
    pub fn size(&self) -> usize {
        self.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Adds `value` if it is not already present. Returns true if the set
    /// changed.
    ///
    /// With [`std::ops::Add`] in scope, `set.add(value)` on an owned set
    /// resolves to the `+` operator through autoref. Write
    /// `Set::add(&mut set, value)` there.
    pub fn add(&mut self, value: T) -> bool {
        self.map.put(value, true).is_none()
    }

    /// Removes `value` if present. Returns true if the set changed.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.map.remove(value).is_some()
    }

    #[must_use]
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.map.contains_key(value)
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.map.keys()
    }

    /// True if every element of this set is also in `other`.
    #[must_use]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.iter().all(|value| other.contains(value))
    }

    /// The set formed by adding `value` to a copy of this set.
    #[must_use]
    pub fn with(&self, value: T) -> Self
    where
        T: Clone,
    {
        let mut set = self.clone();
        Set::add(&mut set, value);
        set
    }

    /// The set formed by removing `value` from a copy of this set.
    #[must_use]
    pub fn without<Q>(&self, value: &Q) -> Self
    where
        T: Clone + Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let mut set = self.clone();
        set.remove(value);
        set
    }

    /// Removes every element for which `doomed_if` returns true. The doomed
    /// elements are gathered first so that the map is not modified while it
    /// is being iterated.
    fn remove_where(&mut self, mut doomed_if: impl FnMut(&T) -> bool)
    where
        T: Clone,
    {
        let doomed: Vector<T> = self.iter().filter(|value| doomed_if(value)).cloned().collect();
        for value in &doomed {
            self.remove(value);
        }
    }
}

pub type Iter<'a, T> = hash_map::Keys<'a, T, bool>;

/// Two sets are equal when each is a subset of the other.
impl<T: Eq + Hash> PartialEq for Set<T> {
    fn eq(&self, other: &Self) -> bool {
        self.is_subset_of(other) && other.is_subset_of(self)
    }
}

impl<T: Eq + Hash> Eq for Set<T> {}

impl<T: std::fmt::Debug> std::fmt::Debug for Set<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries((&self.map).into_iter().map(|(k, _)| k)).finish()
    }
}

impl<T: Eq + Hash> ops::AddAssign<&Set<T>> for Set<T>
where
    T: Clone,
{
    fn add_assign(&mut self, rhs: &Set<T>) {
        for value in rhs {
            self.add(value.clone());
        }
    }
}

impl<T: Eq + Hash> ops::MulAssign<&Set<T>> for Set<T>
where
    T: Clone,
{
    fn mul_assign(&mut self, rhs: &Set<T>) {
        self.remove_where(|value| !rhs.contains(value));
    }
}

impl<T: Eq + Hash> ops::SubAssign<&Set<T>> for Set<T>
where
    T: Clone,
{
    fn sub_assign(&mut self, rhs: &Set<T>) {
        self.remove_where(|value| rhs.contains(value));
    }
}

impl<T: Eq + Hash + Clone> ops::Add for &Set<T> {
    type Output = Set<T>;

    fn add(self, rhs: Self) -> Set<T> {
        let mut set = self.clone();
        set += rhs;
        set
    }
}

impl<T: Eq + Hash + Clone> ops::Mul for &Set<T> {
    type Output = Set<T>;

    fn mul(self, rhs: Self) -> Set<T> {
        let mut set = self.clone();
        set *= rhs;
        set
    }
}

impl<T: Eq + Hash + Clone> ops::Sub for &Set<T> {
    type Output = Set<T>;

    fn sub(self, rhs: Self) -> Set<T> {
        let mut set = self.clone();
        set -= rhs;
        set
    }
}

impl<T: Eq + Hash> ops::AddAssign<T> for Set<T> {
    fn add_assign(&mut self, value: T) {
        Set::add(self, value);
    }
}

impl<T: Eq + Hash> ops::SubAssign<&T> for Set<T> {
    fn sub_assign(&mut self, value: &T) {
        self.remove(value);
    }
}

impl<T: Eq + Hash + Clone> ops::Add<T> for &Set<T> {
    type Output = Set<T>;

    fn add(self, value: T) -> Set<T> {
        self.with(value)
    }
}

impl<T: Eq + Hash + Clone> ops::Sub<&T> for &Set<T> {
    type Output = Set<T>;

    fn sub(self, value: &T) -> Set<T> {
        self.without(value)
    }
}

impl<T: Eq + Hash> Extend<T> for Set<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<T: Eq + Hash> FromIterator<T> for Set<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a, T: Eq + Hash> IntoIterator for &'a Set<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.keys()
    }
}
