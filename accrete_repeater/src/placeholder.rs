// Copyright 2026 the Accrete Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry of empty grid cells waiting to be filled.

use accrete_index::ItemCache;

use crate::Item;

/// Placeholders of the displayed page, ordered by slot within the page.
///
/// Rebuilt by every full render and drained, lowest slot first, as appended
/// items take their place.
#[derive(Debug)]
pub(crate) struct EmptyItemRegistry<V> {
    slots: ItemCache<Item<V>>,
}

impl<V> Default for EmptyItemRegistry<V> {
    fn default() -> Self {
        Self {
            slots: ItemCache::new(),
        }
    }
}

impl<V> EmptyItemRegistry<V> {
    pub(crate) fn register(&mut self, slot: usize, placeholder: Item<V>) {
        debug_assert!(placeholder.is_placeholder(), "registered a real item as empty");
        self.slots.put(slot, placeholder);
    }

    pub(crate) fn get(&self, slot: usize) -> Option<&Item<V>> {
        self.slots.get(slot)
    }

    /// Removes the placeholder for `slot`, if it was registered.
    pub(crate) fn take(&mut self, slot: usize) -> Option<Item<V>> {
        self.slots.remove_at(slot)
    }

    /// Removes the placeholder with the lowest slot.
    pub(crate) fn pop_first(&mut self) -> Option<(usize, Item<V>)> {
        self.slots.pop_first()
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (usize, &Item<V>)> + '_ {
        self.slots.iter()
    }
}
