// Copyright 2026 the Accrete Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rendered items and the context handed to population hooks.

use alloc::vec::Vec;

use accrete_index::{Backing, IndexError, Indexed, ItemCache, ItemModel};
use tracing::trace;

use crate::{ItemHooks, MarkupId, MarkupIdGenerator, RepeaterError};

/// One rendered unit: a backing element's view, or a grid placeholder.
///
/// Items know their neighbours in render order by token only. That is enough
/// to compute where a newly appended sibling has to be inserted.
#[derive(Debug, Clone)]
pub struct Item<V> {
    id: MarkupId,
    model: Option<ItemModel>,
    slot: usize,
    pub(crate) previous: Option<MarkupId>,
    pub(crate) next: Option<MarkupId>,
    view: V,
}

impl<V> Item<V> {
    pub(crate) fn new(id: MarkupId, index: usize, view: V) -> Self {
        Self {
            id,
            model: Some(ItemModel::new(index)),
            slot: 0,
            previous: None,
            next: None,
            view,
        }
    }

    pub(crate) fn placeholder(id: MarkupId, slot: usize, view: V) -> Self {
        Self {
            id,
            model: None,
            slot,
            previous: None,
            next: None,
            view,
        }
    }

    /// Identity token.
    #[must_use]
    pub fn id(&self) -> &MarkupId {
        &self.id
    }

    /// Cursor onto the backing element, or `None` for a placeholder.
    #[must_use]
    pub fn model(&self) -> Option<&ItemModel> {
        self.model.as_ref()
    }

    /// Backing index for real items, slot within the page for placeholders.
    #[must_use]
    pub fn index(&self) -> usize {
        self.model.map_or(self.slot, |m| m.index())
    }

    /// Returns `true` if this item fills an empty grid cell.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.model.is_none()
    }

    /// Token of the item rendered just before this one.
    #[must_use]
    pub fn previous(&self) -> Option<&MarkupId> {
        self.previous.as_ref()
    }

    /// Token of the item rendered just after this one.
    #[must_use]
    pub fn next(&self) -> Option<&MarkupId> {
        self.next.as_ref()
    }

    /// The view produced by the population hook.
    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the view.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Borrows the parts an append hook may see and change.
    pub(crate) fn as_appended(&mut self) -> AppendedItem<'_, V> {
        let index = self.index();
        AppendedItem {
            index,
            id: &self.id,
            view: &mut self.view,
        }
    }

    /// Reads this item's backing element. Placeholders read nothing.
    pub fn element<'a, B>(&self, backing: &'a B) -> Result<Option<&'a B::Element>, IndexError>
    where
        B: Backing + ?Sized,
    {
        self.model.map(|m| m.get(backing)).transpose()
    }
}

impl<V> Indexed for Item<V> {
    fn index(&self) -> usize {
        Self::index(self)
    }

    fn set_index(&mut self, index: usize) {
        match &mut self.model {
            Some(model) => model.set_index(index),
            None => self.slot = index,
        }
    }
}

/// An item handed to [`on_item_appended`](crate::ItemHooks::on_item_appended).
///
/// Only the view is writable. The item's index and token belong to the
/// repeater.
#[derive(Debug)]
pub struct AppendedItem<'a, V> {
    /// Backing index of the element.
    pub index: usize,
    /// The item's token.
    pub id: &'a MarkupId,
    /// The view built by the population hook.
    pub view: &'a mut V,
}

/// Pagination state as seen by hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeaterInfo {
    /// Page currently displayed.
    pub current_page: usize,
    /// Capacity of one page.
    pub items_per_page: usize,
    /// Length of the backing collection.
    pub item_count: usize,
    /// `ceil(item_count / items_per_page)`.
    pub page_count: usize,
}

/// Everything [`populate_item`](crate::ItemHooks::populate_item) gets to see.
#[derive(Debug)]
pub struct ItemContext<'a, T> {
    /// Backing index of the element.
    pub index: usize,
    /// Token the new item will carry.
    pub id: &'a MarkupId,
    /// The element itself.
    pub element: &'a T,
    /// Pagination state at the time of population.
    pub info: RepeaterInfo,
}

/// Everything [`populate_empty_item`](crate::GridHooks::populate_empty_item)
/// gets to see.
#[derive(Debug)]
pub struct SlotContext<'a> {
    /// Position of the empty cell within the page.
    pub slot: usize,
    /// Token the placeholder will carry.
    pub id: &'a MarkupId,
    /// Pagination state at the time of population.
    pub info: RepeaterInfo,
}

/// Points every item in `order` at its render-order neighbours.
///
/// The first item's predecessor is `before`; the last item has no successor.
pub(crate) fn link_in_order<V>(
    items: &mut ItemCache<Item<V>>,
    order: &[usize],
    before: Option<MarkupId>,
) {
    let ids: Vec<Option<MarkupId>> = order
        .iter()
        .map(|&i| items.get(i).map(|item| item.id.clone()))
        .collect();
    let mut previous = before;
    for (position, &index) in order.iter().enumerate() {
        let next = ids.get(position + 1).cloned().flatten();
        if let Some(item) = items.get_mut(index) {
            item.previous = previous.take();
            item.next = next;
            previous = Some(item.id.clone());
        }
    }
}

/// Makes sure `items` holds an item for `index`.
///
/// A cached item is taken as is, after checking it still represents `index`.
/// Otherwise a new item is created and populated.
pub(crate) fn materialize<T, B, H, V>(
    items: &mut ItemCache<Item<V>>,
    ids: &mut MarkupIdGenerator,
    index: usize,
    backing: &B,
    hooks: &mut H,
    info: RepeaterInfo,
) -> Result<(), RepeaterError>
where
    B: Backing<Element = T> + ?Sized,
    H: ItemHooks<T, View = V>,
{
    if let Some(item) = items.get(index) {
        let found = item.index();
        if found != index {
            return Err(RepeaterError::StaleCacheEntry { key: index, found });
        }
        trace!(index, "reusing cached item");
        return Ok(());
    }

    let element = backing.get(index).ok_or(IndexError::OutOfRange {
        index,
        len: backing.len(),
    })?;
    let id = ids.next_id();
    let view = hooks.populate_item(&ItemContext {
        index,
        id: &id,
        element,
        info,
    });
    trace!(index, %id, "populated item");
    items.put(index, Item::new(id, index, view));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Item, link_in_order};
    use crate::MarkupId;
    use accrete_index::{Indexed, ItemCache};
    use alloc::vec;

    #[test]
    fn placeholders_have_no_element() {
        let backing = vec!["a", "b"];
        let real = Item::new(MarkupId::from("i0"), 1, ());
        let empty = Item::placeholder(MarkupId::from("p0"), 4, ());

        assert_eq!(real.element(&backing), Ok(Some(&"b")));
        assert_eq!(empty.element(&backing), Ok(None));
        assert!(empty.is_placeholder());
        assert_eq!(empty.index(), 4);
    }

    #[test]
    fn set_index_moves_the_model_or_the_slot() {
        let mut real = Item::new(MarkupId::from("i0"), 1, ());
        let mut empty = Item::placeholder(MarkupId::from("p0"), 4, ());
        real.set_index(3);
        empty.set_index(5);
        assert_eq!(real.model().map(|m| m.index()), Some(3));
        assert_eq!(Indexed::index(&empty), 5);
    }

    #[test]
    fn linking_follows_render_order() {
        let mut items = ItemCache::new();
        for i in 0..3 {
            items.put(i, Item::new(MarkupId::new(alloc::format!("i{i}")), i, ()));
        }
        link_in_order(&mut items, &[0, 1, 2], Some(MarkupId::from("before")));

        let first = items.get(0).unwrap();
        assert_eq!(first.previous(), Some(&MarkupId::from("before")));
        assert_eq!(first.next(), Some(&MarkupId::from("i1")));
        let last = items.get(2).unwrap();
        assert_eq!(last.previous(), Some(&MarkupId::from("i1")));
        assert_eq!(last.next(), None);
    }
}
