//! Fixed-bucket chained hash map over [`LinkedList`] buckets.

use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::mem;

use crate::alloc::{Allocator, Heap};
use crate::error::{Error, Result};
use crate::linked_list::{self, LinkedList};
use crate::policy::{KeyPolicy, NaturalOrder};

/// Requested bucket counts are clamped up to this.
pub const MIN_BUCKETS: usize = 1;

struct Entry<K, V> {
    key: K,
    value: V,
}

/// A chained hash map with a bucket count fixed at construction.
///
/// A key lands in bucket `P::hash(key) % bucket_count` and lives there in a
/// [`LinkedList`] of key-value entries, in insertion order. There is no
/// rehashing and no growth: worst-case lookup is bounded by the caller's
/// choice of bucket count relative to expected load, a simplicity tradeoff
/// this type preserves on purpose.
///
/// The key policy `P` is part of the map's type, so two maps of the same
/// type always agree on hashing and equality. The allocation policy `A` is
/// cloned into every bucket, so one budget governs the whole table.
///
/// If the bucket array itself cannot be reserved at construction, the map is
/// permanently degraded: reads report absence, mutations fail fast with
/// [`Error::InvalidState`], and [`bucket_count`](Self::bucket_count) is 0.
///
/// Like [`LinkedList`], the map is not `Clone`.
pub struct BucketMap<K, V, P: KeyPolicy<K> = NaturalOrder, A: Allocator = Heap> {
    buckets: Vec<LinkedList<Entry<K, V>, A>>,
    len: usize,
    alloc: A,
    _policy: PhantomData<P>,
}

impl<K, V, P: KeyPolicy<K>> BucketMap<K, V, P> {
    /// A map with `requested` buckets (clamped to [`MIN_BUCKETS`]) on the
    /// default [`Heap`] policy.
    pub fn with_buckets(requested: usize) -> Self {
        Self::with_buckets_in(requested, Heap)
    }
}

impl<K, V, P: KeyPolicy<K>, A: Allocator> BucketMap<K, V, P, A> {
    /// A map with `requested` buckets (clamped to [`MIN_BUCKETS`]) drawing
    /// all storage from `alloc`.
    ///
    /// The bucket array is charged to the policy, one slot per bucket. If
    /// the charge is refused or the array reservation fails, the map comes
    /// up degraded rather than panicking; see the type-level docs.
    pub fn with_buckets_in(requested: usize, alloc: A) -> Self {
        let count = requested.max(MIN_BUCKETS);
        let mut buckets = Vec::new();
        if alloc.allocate(count).is_ok() {
            if buckets.try_reserve_exact(count).is_ok() {
                for _ in 0..count {
                    buckets.push(LinkedList::new_in(alloc.clone()));
                }
            } else {
                alloc.deallocate(count);
            }
        }
        Self {
            buckets,
            len: 0,
            alloc,
            _policy: PhantomData,
        }
    }

    /// Total number of key-value pairs across all buckets.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets; fixed for the map's lifetime. 0 only for a
    /// degraded map.
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Occupancy of one bucket, or `None` when `index` is not a bucket.
    pub fn bucket_len(&self, index: usize) -> Option<usize> {
        self.buckets.get(index).map(LinkedList::len)
    }

    fn bucket_index(&self, key: &K) -> Option<usize> {
        if self.buckets.is_empty() {
            return None;
        }
        Some((P::hash(key) % self.buckets.len() as u64) as usize)
    }

    fn position(bucket: &LinkedList<Entry<K, V>, A>, key: &K) -> Option<usize> {
        bucket
            .iter()
            .position(|entry| P::cmp(&entry.key, key) == Ordering::Equal)
    }

    /// Whether `key` is present. `false` for a degraded map.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// The value stored under `key`, or `None` when absent (or the map is
    /// degraded).
    pub fn get(&self, key: &K) -> Option<&V> {
        let bucket = &self.buckets[self.bucket_index(key)?];
        bucket
            .iter()
            .find(|entry| P::cmp(&entry.key, key) == Ordering::Equal)
            .map(|entry| &entry.value)
    }

    /// Mutable access to the value stored under `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.bucket_index(key)?;
        let bucket = &mut self.buckets[index];
        let position = Self::position(bucket, key)?;
        bucket.get_mut(position).map(|entry| &mut entry.value)
    }

    /// Adds a fresh key.
    ///
    /// An existing key is [`Error::DuplicateKey`] and the stored value stays
    /// untouched. A degraded map is [`Error::InvalidState`]; a refused node
    /// reservation bubbles up as [`Error::OutOfMemory`] from the bucket.
    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        let index = self.bucket_index(&key).ok_or(Error::InvalidState)?;
        let bucket = &mut self.buckets[index];
        if Self::position(bucket, &key).is_some() {
            return Err(Error::DuplicateKey);
        }
        bucket.push(Entry { key, value })?;
        self.len += 1;
        Ok(())
    }

    /// Overwrites the value under an existing `key`, or inserts it when
    /// absent. Returns the replaced value, if any.
    ///
    /// Finding the right bucket cannot fail; only the insert path can, with
    /// the same errors as [`insert`](Self::insert) minus the duplicate case.
    pub fn upsert(&mut self, key: K, value: V) -> Result<Option<V>> {
        let index = self.bucket_index(&key).ok_or(Error::InvalidState)?;
        let bucket = &mut self.buckets[index];
        match Self::position(bucket, &key) {
            Some(position) => match bucket.get_mut(position) {
                Some(entry) => Ok(Some(mem::replace(&mut entry.value, value))),
                None => Err(Error::InvalidState),
            },
            None => {
                bucket.push(Entry { key, value })?;
                self.len += 1;
                Ok(None)
            }
        }
    }

    /// Overwrite-only counterpart of [`upsert`](Self::upsert): replaces the
    /// value under an existing `key` and returns the old one.
    ///
    /// An absent key is [`Error::ItemNotFound`].
    pub fn update(&mut self, key: &K, value: V) -> Result<V> {
        let index = self.bucket_index(key).ok_or(Error::InvalidState)?;
        let bucket = &mut self.buckets[index];
        let position = Self::position(bucket, key).ok_or(Error::ItemNotFound)?;
        match bucket.get_mut(position) {
            Some(entry) => Ok(mem::replace(&mut entry.value, value)),
            None => Err(Error::ItemNotFound),
        }
    }

    /// Removes `key` and returns its value.
    ///
    /// Removing an absent key is `Ok(None)`, not an error: removal is
    /// idempotent. Only a degraded map fails, with
    /// [`Error::InvalidState`].
    pub fn remove(&mut self, key: &K) -> Result<Option<V>> {
        let index = self.bucket_index(key).ok_or(Error::InvalidState)?;
        let bucket = &mut self.buckets[index];
        match Self::position(bucket, key) {
            Some(position) => {
                let entry = bucket.remove(position)?;
                self.len -= 1;
                Ok(Some(entry.value))
            }
            None => Ok(None),
        }
    }

    /// Empties every bucket. The bucket array (and its charge against the
    /// policy) is retained; capacity does not change. Never fails.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    /// Flattening iterator: buckets in index order, insertion order within
    /// a bucket, empty buckets skipped.
    ///
    /// Every exhausted iterator collapses into one terminal state no matter
    /// which bucket it finished in, so exhaustion is terminal and uniform;
    /// `next` keeps returning `None` forever.
    pub fn iter(&self) -> Iter<'_, K, V, A> {
        Iter {
            buckets: &self.buckets,
            bucket_idx: 0,
            inner: self.buckets.first().map(LinkedList::iter),
            remaining: self.len,
        }
    }
}

impl<K, V, P: KeyPolicy<K>, A: Allocator> Drop for BucketMap<K, V, P, A> {
    fn drop(&mut self) {
        // Bucket chains release their nodes first, then the array charge is
        // returned, mirroring the construction order.
        let charged = self.buckets.len();
        self.buckets.clear();
        if charged > 0 {
            self.alloc.deallocate(charged);
        }
    }
}

impl<K, V, P, A> fmt::Debug for BucketMap<K, V, P, A>
where
    K: fmt::Debug,
    V: fmt::Debug,
    P: KeyPolicy<K>,
    A: Allocator,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, P: KeyPolicy<K>, A: Allocator> IntoIterator for &'a BucketMap<K, V, P, A> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Flattening iterator over a [`BucketMap`].
pub struct Iter<'a, K, V, A: Allocator = Heap> {
    buckets: &'a [LinkedList<Entry<K, V>, A>],
    bucket_idx: usize,
    inner: Option<linked_list::Iter<'a, Entry<K, V>>>,
    remaining: usize,
}

impl<'a, K, V, A: Allocator> Iterator for Iter<'a, K, V, A> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let inner = self.inner.as_mut()?;
            if let Some(entry) = inner.next() {
                self.remaining -= 1;
                return Some((&entry.key, &entry.value));
            }
            self.bucket_idx += 1;
            match self.buckets.get(self.bucket_idx) {
                Some(bucket) => self.inner = Some(bucket.iter()),
                // The single terminal state; which bucket we finished in is
                // forgotten here.
                None => self.inner = None,
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, A: Allocator> ExactSizeIterator for Iter<'_, K, V, A> {}
impl<K, V, A: Allocator> FusedIterator for Iter<'_, K, V, A> {}

#[cfg(test)]
mod tests {
    use super::{BucketMap, MIN_BUCKETS};
    use crate::error::Error;
    use crate::policy::{Djb2, KeyPolicy, NaturalOrder};

    type StrMap = BucketMap<&'static str, i32, Djb2>;

    /// Invariant: a requested bucket count of zero still yields a usable
    /// one-bucket map.
    #[test]
    fn zero_request_clamps_to_minimum() {
        let map: StrMap = BucketMap::with_buckets(0);
        assert_eq!(map.bucket_count(), MIN_BUCKETS);
    }

    /// Invariant: every stored key sits in the bucket its hash selects, and
    /// bucket occupancies sum to len.
    #[test]
    fn keys_land_in_hashed_buckets() {
        let mut map: StrMap = BucketMap::with_buckets(53);
        for (k, v) in [("apple", 1), ("pear", 5), ("banana", 6)] {
            map.insert(k, v).unwrap();
        }
        for key in ["apple", "pear", "banana"] {
            let expected = (Djb2::hash(&key) % 53) as usize;
            assert!(map.bucket_len(expected).unwrap() >= 1);
        }
        let total: usize = (0..map.bucket_count())
            .map(|i| map.bucket_len(i).unwrap())
            .sum();
        assert_eq!(total, map.len());
        assert_eq!(map.bucket_len(53), None);
    }

    /// Invariant: duplicate insert is rejected and the original value
    /// survives.
    #[test]
    fn duplicate_insert_rejected() {
        let mut map: StrMap = BucketMap::with_buckets(8);
        map.insert("dup", 1).unwrap();
        assert_eq!(map.insert("dup", 2), Err(Error::DuplicateKey));
        assert_eq!(map.get(&"dup"), Some(&1));
        assert_eq!(map.len(), 1);
    }

    /// Invariant: upsert overwrites in place or inserts fresh; update only
    /// overwrites.
    #[test]
    fn upsert_and_update() {
        let mut map: StrMap = BucketMap::with_buckets(8);
        assert_eq!(map.upsert("k", 1), Ok(None));
        assert_eq!(map.upsert("k", 2), Ok(Some(1)));
        assert_eq!(map.len(), 1);

        assert_eq!(map.update(&"k", 3), Ok(2));
        assert_eq!(map.update(&"absent", 9), Err(Error::ItemNotFound));
        assert_eq!(map.get(&"k"), Some(&3));
        assert_eq!(map.len(), 1);
    }

    /// Invariant: removal is idempotent; absence is data, not an error.
    #[test]
    fn remove_is_idempotent() {
        let mut map: StrMap = BucketMap::with_buckets(8);
        map.insert("k", 1).unwrap();
        assert_eq!(map.remove(&"k"), Ok(Some(1)));
        assert!(!map.contains_key(&"k"));
        assert_eq!(map.remove(&"k"), Ok(None));
        assert_eq!(map.len(), 0);
    }

    /// Invariant: get_mut writes through to the stored value.
    #[test]
    fn get_mut_writes_through() {
        let mut map: BucketMap<String, i32, NaturalOrder> = BucketMap::with_buckets(4);
        map.insert("k".to_string(), 10).unwrap();
        *map.get_mut(&"k".to_string()).unwrap() += 5;
        assert_eq!(map.get(&"k".to_string()), Some(&15));
    }

    /// Invariant: clear empties every bucket but keeps the bucket array.
    #[test]
    fn clear_retains_buckets() {
        let mut map: StrMap = BucketMap::with_buckets(8);
        map.insert("a", 1).unwrap();
        map.insert("b", 2).unwrap();
        map.clear();
        assert_eq!(map.len(), 0);
        assert_eq!(map.bucket_count(), 8);
        map.insert("a", 3).unwrap();
        assert_eq!(map.get(&"a"), Some(&3));
    }

    #[test]
    fn debug_renders_as_map() {
        let mut map: StrMap = BucketMap::with_buckets(1);
        map.insert("a", 1).unwrap();
        assert_eq!(format!("{map:?}"), r#"{"a": 1}"#);
    }
}
