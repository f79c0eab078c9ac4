use std::{
    borrow::Borrow,
    collections::hash_map::DefaultHasher,
    fmt,
    hash::{Hash, Hasher},
    iter,
    mem, slice,
};

use log::{debug, trace};

/// Number of slots a freshly created map starts with
const INITIAL_CAPACITY: usize = 16;
/// Load factor expressed as a fraction (3/4) so the threshold stays integral
const LOAD_FACTOR_NUMERATOR: usize = 3;
/// Denominator of the load factor fraction
const LOAD_FACTOR_DENOMINATOR: usize = 4;
/// Salt mixed into every key hash before reducing it to a slot index
const HASH_SEED: u64 = 31 * 17;

/// A key-value pair owned by a bucket chain
#[derive(Debug, Clone)]
struct Entry<K, V> {
    /// The key in the key-value pair
    key: K,
    /// The value associated with the key
    value: V,
}

/// A slot of the table: `None` when empty, otherwise a non-empty collision chain
type Bucket<K, V> = Option<Vec<Entry<K, V>>>;

/// A hash table resolving collisions by separate chaining.
///
/// Every slot holds either nothing or an ordered chain of the entries whose keys
/// hashed to it. The table doubles its slot count as soon as an insertion would
/// bring the number of entries up to three quarters of the capacity, and it
/// never shrinks.
///
/// Note: This implementation is not thread-safe.
#[derive(Debug, Clone)]
pub struct ChainedHashMap<K, V> {
    /// The slots of the table
    buckets: Vec<Bucket<K, V>>,
    /// Number of distinct keys stored, equal to the sum of all chain lengths
    size: usize,
    /// Size at which the next insertion grows the table
    threshold: usize,
}

impl<K, V> Default for ChainedHashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Extend<(K, V)> for ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

/// Threshold for a table with `capacity` slots
fn threshold_for(capacity: usize) -> usize {
    capacity.saturating_mul(LOAD_FACTOR_NUMERATOR) / LOAD_FACTOR_DENOMINATOR
}

/// Allocates `capacity` empty slots
fn empty_buckets<K, V>(capacity: usize) -> Vec<Bucket<K, V>> {
    iter::repeat_with(|| None).take(capacity).collect()
}

/// Maps a key to a slot index in `[0, capacity)`.
///
/// The arithmetic is unsigned, so the reduction can never land outside the table.
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
fn slot_index<Q: ?Sized + Hash>(key: &Q, capacity: usize) -> usize {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    let hash = HASH_SEED.wrapping_add(hasher.finish());
    // capacity is at least 1 and the remainder is below it, so both casts are lossless
    (hash % (capacity.max(1) as u64)) as usize
}

impl<K, V> ChainedHashMap<K, V> {
    /// Creates an empty `ChainedHashMap` with 16 slots
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Creates an empty `ChainedHashMap` with at least `capacity` slots.
    ///
    /// The slot count is rounded up to a power of two and is never zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1).next_power_of_two();

        Self { buckets: empty_buckets(capacity), size: 0, threshold: threshold_for(capacity) }
    }

    /// Returns the number of entries in the map
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of entries in the map
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots currently allocated
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the size at which the next insertion grows the table
    #[must_use]
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Returns the current ratio of entries to slots
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.buckets.len() as f64
    }

    /// Returns the chain length of every slot, in slot order. Empty slots report 0.
    #[must_use]
    pub fn chain_lengths(&self) -> Vec<usize> {
        self.buckets.iter().map(|slot| slot.as_ref().map_or(0, Vec::len)).collect()
    }

    /// Removes every entry while keeping the current capacity
    pub fn clear(&mut self) {
        for slot in &mut self.buckets {
            *slot = None;
        }
        self.size = 0;
    }

    /// Returns an iterator over the key-value pairs, in slot order then chain order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { entries: self.buckets.iter().flatten().flatten(), remaining: self.size }
    }

    /// Walks the keys in the same order as [`ChainedHashMap::iter`]
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Walks the values in the same order as [`ChainedHashMap::iter`]
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }
}

impl<K, V> ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    /// Associates `value` with `key`.
    ///
    /// Returns the value previously stored under `key`, or `None` if the key is new.
    /// Replacing a value leaves the size unchanged.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if self.size.saturating_add(1) >= self.threshold {
            self.resize();
        }

        let index = slot_index(&key, self.buckets.len());
        debug_assert!(index < self.buckets.len(), "slot index {index} out of range");
        let slot = self.buckets.get_mut(index)?;
        let chain = slot.get_or_insert_with(Vec::new);

        if let Some(entry) = chain.iter_mut().find(|entry| entry.key == key) {
            return Some(mem::replace(&mut entry.value, value));
        }

        chain.push(Entry { key, value });
        self.size = self.size.saturating_add(1);
        None
    }

    /// Alias of [`ChainedHashMap::put`]
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.put(key, value)
    }

    /// Retrieves the value stored under `key`
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = slot_index(key, self.buckets.len());
        let chain = self.buckets.get(index)?.as_ref()?;

        chain.iter().find(|entry| entry.key.borrow() == key).map(|entry| &entry.value)
    }

    /// Returns true if some chain holds `key`
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Get a mutable reference to the value stored under `key`
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = slot_index(key, self.buckets.len());
        let chain = self.buckets.get_mut(index)?.as_mut()?;

        chain.iter_mut().find(|entry| entry.key.borrow() == key).map(|entry| &mut entry.value)
    }

    /// Removes `key` from the map, returning its value if it was present.
    ///
    /// A chain left without entries turns its slot back into an empty slot.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = slot_index(key, self.buckets.len());
        let slot = self.buckets.get_mut(index)?;
        let chain = slot.as_mut()?;
        let position = chain.iter().position(|entry| entry.key.borrow() == key)?;

        let entry = chain.remove(position);
        if chain.is_empty() {
            *slot = None;
        }
        self.size = self.size.saturating_sub(1);

        Some(entry.value)
    }

    /// Doubles the slot count and moves every entry into its new slot
    fn resize(&mut self) {
        let new_capacity = self.buckets.len().saturating_mul(2);
        debug!(
            "growing table from {} to {new_capacity} slots at size {}",
            self.buckets.len(),
            self.size
        );

        let old_buckets = mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        for entry in old_buckets.into_iter().flatten().flatten() {
            Self::rehash_into(&mut self.buckets, entry);
        }
        self.threshold = threshold_for(new_capacity);
    }

    /// Appends a relocated entry to its chain in `buckets`.
    ///
    /// Keys are already unique, so no equality scan is needed and nothing here can
    /// trigger another resize.
    fn rehash_into(buckets: &mut [Bucket<K, V>], entry: Entry<K, V>) {
        let index = slot_index(&entry.key, buckets.len());
        trace!("rehashing entry into slot {index}");
        debug_assert!(index < buckets.len(), "slot index {index} out of range");

        if let Some(slot) = buckets.get_mut(index) {
            slot.get_or_insert_with(Vec::new).push(entry);
        }
    }
}

impl<K, V> fmt::Display for ChainedHashMap<K, V>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (position, (key, value)) in self.iter().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        f.write_str("}")
    }
}

/// Iterator over the key-value pairs of the map
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    /// Entries of every chain, walked in slot order
    entries: iter::Flatten<iter::Flatten<slice::Iter<'a, Bucket<K, V>>>>,
    /// Number of entries not yet yielded
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.entries.next()?;
        self.remaining = self.remaining.saturating_sub(1);
        Some((&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> IntoIterator for &'a ChainedHashMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
