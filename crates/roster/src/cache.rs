//! Bounded cache of full-collection sort results.
//!
//! Entries are evicted oldest-first by insertion order: lookups use
//! [`LruCache::peek`], so a hit never refreshes an entry. Values are positions
//! into the canonical collection rather than references, so the cache owns
//! nothing borrowed from the service.

use std::num::NonZeroUsize;

use lru::LruCache;
use roster_seeker::Dir;

use crate::error::{Result, RosterError};
use crate::field::Field;

/// Default number of cached orderings.
pub const DEFAULT_CAPACITY: usize = 20;

/// Identifies one cached ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortKey {
    pub field: Field,
    pub dir: Dir,
    /// Length of the collection the ordering was computed over.
    pub len: usize,
}

impl SortKey {
    /// Creates a key for `field` sorted in `dir` over `len` records.
    pub fn new(field: Field, dir: Dir, len: usize) -> Self {
        Self { field, dir, len }
    }
}

/// Insertion-ordered map with a fixed, non-zero capacity.
#[derive(Debug)]
pub struct SortCache {
    entries: LruCache<SortKey, Vec<usize>>,
}

impl SortCache {
    /// Creates an empty cache holding at most `capacity` orderings.
    ///
    /// A zero capacity is a configuration error.
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity)
            .ok_or_else(|| RosterError::Config("cacheCapacity must be at least 1".to_string()))?;
        Ok(Self::with_capacity(capacity))
    }

    /// Creates an empty cache from an already non-zero capacity.
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// Maximum number of orderings kept.
    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    /// Returns the cached ordering for `key` without touching eviction order.
    pub fn get(&self, key: &SortKey) -> Option<&[usize]> {
        self.entries.peek(key).map(Vec::as_slice)
    }

    /// Stores an ordering and returns the key evicted to make room, if any.
    ///
    /// Replacing an existing key keeps its original insertion position.
    pub fn insert(&mut self, key: SortKey, positions: Vec<usize>) -> Option<SortKey> {
        if let Some(slot) = self.entries.peek_mut(&key) {
            *slot = positions;
            return None;
        }
        self.entries.push(key, positions).map(|(evicted, _)| evicted)
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached orderings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys from oldest to newest.
    pub fn keys(&self) -> impl Iterator<Item = &SortKey> {
        self.entries.iter().rev().map(|(key, _)| key)
    }
}

impl Default for SortCache {
    fn default() -> Self {
        let capacity = NonZeroUsize::new(DEFAULT_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        SortCache::with_capacity(capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(field: Field, dir: Dir) -> SortKey {
        SortKey::new(field, dir, 100)
    }

    #[test]
    fn get_after_insert() {
        let mut cache = SortCache::new(2).unwrap();
        cache.insert(key(Field::City, Dir::Asc), vec![2, 0, 1]);
        assert_eq!(cache.get(&key(Field::City, Dir::Asc)), Some(&[2, 0, 1][..]));
        assert_eq!(cache.get(&key(Field::City, Dir::Desc)), None);
    }

    #[test]
    fn length_is_part_of_the_key() {
        let mut cache = SortCache::new(2).unwrap();
        cache.insert(SortKey::new(Field::Id, Dir::Asc, 3), vec![0, 1, 2]);
        assert!(cache.get(&SortKey::new(Field::Id, Dir::Asc, 4)).is_none());
    }

    #[test]
    fn evicts_oldest_first() {
        let mut cache = SortCache::new(2).unwrap();
        assert_eq!(cache.insert(key(Field::Id, Dir::Asc), vec![]), None);
        assert_eq!(cache.insert(key(Field::Id, Dir::Desc), vec![]), None);
        let evicted = cache.insert(key(Field::City, Dir::Asc), vec![]);

        assert_eq!(evicted, Some(key(Field::Id, Dir::Asc)));
        assert_eq!(cache.len(), 2);
        let keys: Vec<SortKey> = cache.keys().copied().collect();
        assert_eq!(
            keys,
            vec![key(Field::Id, Dir::Desc), key(Field::City, Dir::Asc)]
        );
    }

    #[test]
    fn reinsert_keeps_position() {
        let mut cache = SortCache::new(2).unwrap();
        cache.insert(key(Field::Id, Dir::Asc), vec![0]);
        cache.insert(key(Field::Id, Dir::Desc), vec![0]);
        assert_eq!(cache.insert(key(Field::Id, Dir::Asc), vec![1]), None);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&key(Field::Id, Dir::Asc)), Some(&[1][..]));
        let evicted = cache.insert(key(Field::City, Dir::Asc), vec![]);
        assert_eq!(evicted, Some(key(Field::Id, Dir::Asc)));
    }

    #[test]
    fn hits_do_not_refresh_entries() {
        let mut cache = SortCache::new(2).unwrap();
        cache.insert(key(Field::Id, Dir::Asc), vec![0]);
        cache.insert(key(Field::Id, Dir::Desc), vec![0]);
        assert!(cache.get(&key(Field::Id, Dir::Asc)).is_some());

        let evicted = cache.insert(key(Field::City, Dir::Asc), vec![]);
        assert_eq!(evicted, Some(key(Field::Id, Dir::Asc)));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(matches!(
            SortCache::new(0),
            Err(RosterError::Config(msg)) if msg.contains("cacheCapacity")
        ));
        assert_eq!(SortCache::new(1).unwrap().capacity(), 1);
    }

    #[test]
    fn clear_empties() {
        let mut cache = SortCache::default();
        assert_eq!(cache.capacity(), DEFAULT_CAPACITY);
        cache.insert(key(Field::Email, Dir::Asc), vec![0]);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get(&key(Field::Email, Dir::Asc)), None);
    }
}
