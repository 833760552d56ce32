// Copyright 2026 the Accrete Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered index → item cache with bulk reindexing.

use alloc::collections::BTreeMap;

use crate::{IndexError, Indexed};

/// Previously materialized items, keyed and ordered by backing index.
///
/// Every entry satisfies `item.index() == key`. [`ItemCache::put`] aligns the
/// item with its key, and [`ItemCache::shift_from`] moves both together.
///
/// The cache has no side effects beyond its own map; it never touches a
/// backing collection.
///
/// ```rust
/// use accrete_index::{ItemCache, ItemModel};
///
/// let mut cache = ItemCache::new();
/// cache.put(0, ItemModel::new(0));
/// cache.put(1, ItemModel::new(1));
/// cache.put(2, ItemModel::new(2));
///
/// // Two elements were inserted at position 1.
/// cache.shift_from(1, 2).unwrap();
///
/// let keys: Vec<_> = cache.keys().collect();
/// assert_eq!(keys, [0, 3, 4]);
/// assert_eq!(cache.get(3).unwrap().index(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct ItemCache<V> {
    entries: BTreeMap<usize, V>,
}

impl<V> Default for ItemCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ItemCache<V> {
    /// Creates an empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if an entry is cached for `index`.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.entries.contains_key(&index)
    }

    /// Looks up the entry for `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&V> {
        self.entries.get(&index)
    }

    /// Looks up the entry for `index` mutably.
    ///
    /// Callers must not change the entry's own index through this reference;
    /// use [`ItemCache::shift_from`] to move entries.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut V> {
        self.entries.get_mut(&index)
    }

    /// Removes and returns the entry for `index`.
    pub fn remove_at(&mut self, index: usize) -> Option<V> {
        self.entries.remove(&index)
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Removes every entry at or beyond `len`.
    pub fn truncate(&mut self, len: usize) {
        drop(self.entries.split_off(&len));
    }

    /// Keeps only the entries for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(usize, &V) -> bool) {
        self.entries.retain(|k, v| keep(*k, v));
    }

    /// Removes and returns the entry with the lowest index.
    pub fn pop_first(&mut self) -> Option<(usize, V)> {
        self.entries.pop_first()
    }

    /// Highest cached index, if any.
    #[must_use]
    pub fn last_index(&self) -> Option<usize> {
        self.entries.last_key_value().map(|(k, _)| *k)
    }

    /// The cached entry with the greatest index strictly below `index`.
    #[must_use]
    pub fn nearest_before(&self, index: usize) -> Option<(usize, &V)> {
        self.entries.range(..index).next_back().map(|(k, v)| (*k, v))
    }

    /// Cached indices in ascending order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = usize> + '_ {
        self.entries.keys().copied()
    }

    /// Cached entries in ascending index order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (usize, &V)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    /// Cached entries in ascending index order, mutably.
    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = (usize, &mut V)> + '_ {
        self.entries.iter_mut().map(|(k, v)| (*k, v))
    }
}

impl<V: Indexed> ItemCache<V> {
    /// Caches `item` under `index`, returning any entry it replaced.
    ///
    /// The item's own index is set to `index` so the key invariant holds.
    pub fn put(&mut self, index: usize, mut item: V) -> Option<V> {
        item.set_index(index);
        self.entries.insert(index, item)
    }

    /// Renumbers the cache after `count` elements were inserted at `position`.
    ///
    /// Every entry with index `>= position` is re-keyed to `index + count` and
    /// its own index updated to match. Entries are walked from the highest
    /// index down, so no entry is ever written over one that has not moved yet.
    ///
    /// Fails with [`IndexError::ShiftOverflow`] without modifying anything if
    /// the highest affected index cannot be moved by `count`.
    pub fn shift_from(&mut self, position: usize, count: usize) -> Result<(), IndexError> {
        if count == 0 {
            return Ok(());
        }
        if let Some(highest) = self.entries.range(position..).next_back().map(|(k, _)| *k)
            && highest.checked_add(count).is_none()
        {
            return Err(IndexError::ShiftOverflow {
                index: highest,
                count,
            });
        }

        let moved = self.entries.split_off(&position);
        for (index, mut item) in moved.into_iter().rev() {
            let target = index + count;
            item.set_index(target);
            let displaced = self.entries.insert(target, item);
            debug_assert!(
                displaced.is_none(),
                "shift_from collapsed index {index} onto occupied index {target}"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ItemCache;
    use crate::{IndexError, Indexed, ItemModel};
    use alloc::vec::Vec;

    fn cache_of(indices: &[usize]) -> ItemCache<ItemModel> {
        let mut cache = ItemCache::new();
        for &i in indices {
            cache.put(i, ItemModel::new(i));
        }
        cache
    }

    fn assert_aligned(cache: &ItemCache<ItemModel>) {
        for (key, model) in cache.iter() {
            assert_eq!(key, model.index(), "entry keyed {key} points at {}", model.index());
        }
    }

    #[test]
    fn put_aligns_item_index_with_key() {
        let mut cache = ItemCache::new();
        cache.put(4, ItemModel::new(9));
        assert_eq!(cache.get(4).map(Indexed::index), Some(4));
    }

    #[test]
    fn remove_and_lookup() {
        let mut cache = cache_of(&[0, 1, 2]);
        assert!(cache.remove_at(1).is_some());
        assert!(cache.remove_at(1).is_none());
        assert!(!cache.contains(1));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.last_index(), Some(2));
    }

    #[test]
    fn shift_moves_only_entries_at_or_after_position() {
        let mut cache = cache_of(&[0, 1, 2, 5]);
        cache.shift_from(2, 3).unwrap();

        let keys: Vec<_> = cache.keys().collect();
        assert_eq!(keys, [0, 1, 5, 8]);
        assert_aligned(&cache);
    }

    #[test]
    fn shift_by_less_than_the_gap_between_entries_never_collapses() {
        // Moving 1 → 2 while 2 is still cached would clobber it if the walk
        // went upwards.
        let mut cache = cache_of(&[1, 2, 3]);
        cache.shift_from(1, 1).unwrap();

        let keys: Vec<_> = cache.keys().collect();
        assert_eq!(keys, [2, 3, 4]);
        assert_aligned(&cache);
    }

    #[test]
    fn successive_shifts_at_decreasing_positions() {
        // Original entries 0, 1, 2; one element inserted before each of them,
        // notified at positions 2, 1, 0 in that order.
        let mut cache = cache_of(&[0, 1, 2]);
        cache.shift_from(2, 1).unwrap();
        cache.shift_from(1, 1).unwrap();
        cache.shift_from(0, 1).unwrap();

        let keys: Vec<_> = cache.keys().collect();
        assert_eq!(keys, [1, 3, 5]);
        assert_aligned(&cache);
    }

    #[test]
    fn zero_count_shift_is_a_no_op() {
        let mut cache = cache_of(&[0, 3]);
        cache.shift_from(0, 0).unwrap();
        let keys: Vec<_> = cache.keys().collect();
        assert_eq!(keys, [0, 3]);
    }

    #[test]
    fn overflowing_shift_leaves_cache_untouched() {
        let mut cache = cache_of(&[1, usize::MAX - 1]);
        let err = cache.shift_from(0, 2).unwrap_err();
        assert_eq!(
            err,
            IndexError::ShiftOverflow {
                index: usize::MAX - 1,
                count: 2
            }
        );
        let keys: Vec<_> = cache.keys().collect();
        assert_eq!(keys, [1, usize::MAX - 1]);
    }

    #[test]
    fn truncate_purges_stale_tail() {
        let mut cache = cache_of(&[0, 1, 4, 7]);
        cache.truncate(4);
        let keys: Vec<_> = cache.keys().collect();
        assert_eq!(keys, [0, 1]);
    }

    #[test]
    fn nearest_before_and_pop_first() {
        let mut cache = cache_of(&[2, 6, 9]);
        assert_eq!(cache.nearest_before(6).map(|(k, _)| k), Some(2));
        assert_eq!(cache.nearest_before(2).map(|(k, _)| k), None);
        assert_eq!(cache.pop_first().map(|(k, _)| k), Some(2));
        assert_eq!(cache.pop_first().map(|(k, _)| k), Some(6));
    }
}
