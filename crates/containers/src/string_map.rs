/// A map from strings to strings, stored as a hash table of buckets, each of
/// which is a chain of the cells whose keys hash to it.
///
/// The bucket count is fixed at construction; chains simply grow longer as
/// the table fills.
pub struct StringMap {
    buckets: Vec<Link>,
    len: usize,
}

type Link = Option<Box<Cell>>;

struct Cell {
    key: String,
    value: String,
    link: Link,
}

const HASH_SEED: u32 = 5381;
const HASH_MULTIPLIER: u32 = 33;
const HASH_MASK: u32 = u32::MAX >> 1;

/// The djb2 string hash (after Daniel J. Bernstein), masked to the largest
/// positive `i32`.
fn hash_code(key: &str) -> u32 {
    key.bytes().fold(HASH_SEED, |hash, byte| {
        hash.wrapping_mul(HASH_MULTIPLIER).wrapping_add(u32::from(byte))
    }) & HASH_MASK
}

impl Default for StringMap {
    fn default() -> Self {
        Self::new()
    }
}

impl StringMap {
    pub const INITIAL_BUCKET_COUNT: usize = 13;

    #[must_use]
    pub fn new() -> Self {
        Self::with_buckets(Self::INITIAL_BUCKET_COUNT)
    }

    /// Creates an empty map with `count` buckets (at least one).
    #[must_use]
    pub fn with_buckets(count: usize) -> Self {
        let mut buckets = Vec::with_capacity(count.max(1));
        buckets.resize_with(count.max(1), || None);
        Self { buckets, len: 0 }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the value associated with `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.find_cell(key).map(|cell| cell.value.as_str())
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.find_cell(key).is_some()
    }

    /// Associates `value` with `key`. An existing cell for the key has its
    /// value replaced; otherwise a new cell is linked at the head of the
    /// bucket's chain.
    pub fn put(&mut self, key: &str, value: &str) {
        let bucket = self.bucket(key);

        let mut cursor = self.buckets[bucket].as_deref_mut();
        while let Some(cell) = cursor {
            if cell.key == key {
                value.clone_into(&mut cell.value);
                return;
            }
            cursor = cell.link.as_deref_mut();
        }

        let link = self.buckets[bucket].take();
        self.buckets[bucket] = Some(Box::new(Cell {
            key: key.to_owned(),
            value: value.to_owned(),
            link,
        }));
        self.len += 1;
    }

    /// Unlinks the cell for `key` from its chain and returns its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let bucket = self.bucket(key);

        let mut link = &mut self.buckets[bucket];
        while link.as_deref().is_some_and(|cell| cell.key != key) {
            if let Some(cell) = link {
                link = &mut cell.link;
            }
        }

        let cell = link.take()?;
        let Cell {
            value, link: rest, ..
        } = *cell;
        *link = rest;
        self.len -= 1;
        Some(value)
    }

    /// Removes every entry, keeping the bucket count.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            let mut link = bucket.take();
            while let Some(mut cell) = link {
                link = cell.link.take();
            }
        }
        self.len = 0;
    }

    fn bucket(&self, key: &str) -> usize {
        hash_code(key) as usize % self.buckets.len()
    }

    fn find_cell(&self, key: &str) -> Option<&Cell> {
        let mut cursor = self.buckets[self.bucket(key)].as_deref();
        while let Some(cell) = cursor {
            if cell.key == key {
                return Some(cell);
            }
            cursor = cell.link.as_deref();
        }
        None
    }
}

impl Drop for StringMap {
    fn drop(&mut self) {
        // Unlink chains iteratively rather than through recursive Box drops.
        self.clear();
    }
}

impl std::fmt::Debug for StringMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for bucket in &self.buckets {
            let mut cursor = bucket.as_deref();
            while let Some(cell) = cursor {
                map.entry(&cell.key, &cell.value);
                cursor = cell.link.as_deref();
            }
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn djb2() {
        assert_eq!(hash_code(""), 5381);
        assert_eq!(hash_code("a"), 5381 * 33 + 97);
        assert!(hash_code("a considerably longer key than usual") <= HASH_MASK);
    }

    #[test]
    fn put_get() {
        let mut map = StringMap::new();
        assert_eq!(map.bucket_count(), 13);

        map.put("Alabama", "AL");
        map.put("Alaska", "AK");

        assert_eq!(map.get("Alabama"), Some("AL"));
        assert_eq!(map.get("Alaska"), Some("AK"));
        assert_eq!(map.get("Arizona"), None);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn put_overwrites_existing_cell() {
        let mut map = StringMap::new();

        map.put("key", "old");
        map.put("key", "new");

        assert_eq!(map.get("key"), Some("new"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn single_bucket_chain() {
        let mut map = StringMap::with_buckets(1);

        for (i, key) in ["a", "b", "c", "d"].iter().enumerate() {
            map.put(key, &i.to_string());
        }

        assert_eq!(map.remove("c"), Some("2".to_owned()));
        assert_eq!(map.remove("c"), None);
        assert_eq!(map.remove("d"), Some("3".to_owned()));
        assert_eq!(map.remove("a"), Some("0".to_owned()));

        assert_eq!(map.get("b"), Some("1"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn clear_then_reuse() {
        let mut map = StringMap::new();

        for i in 0..100 {
            map.put(&format!("k{i}"), &format!("v{i}"));
        }
        assert_eq!(map.len(), 100);
        assert!(map.contains_key("k42"));

        map.clear();
        assert!(map.is_empty());
        assert!(!map.contains_key("k42"));

        map.put("k42", "again");
        assert_eq!(map.get("k42"), Some("again"));
    }
}
