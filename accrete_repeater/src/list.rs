// Copyright 2026 the Accrete Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-column repeater with pagination, appends and insertions.

use alloc::string::String;
use alloc::vec::Vec;
use core::num::NonZeroUsize;
use core::ops::Range;

use accrete_index::{Backing, BackingMut, IndexError, ItemCache, PageWindow, page_count};
use tracing::{debug, trace, trace_span};

use crate::item::{link_in_order, materialize};
use crate::{
    GeometryError, InsertAfter, Item, ItemContext, ItemHooks, ListConfig, MarkupId,
    MarkupIdGenerator, RepeaterError, RepeaterInfo, UpdateSink,
};

/// What [`LinearRepeater::append_element`] did with the new element.
#[derive(Debug)]
pub enum ListAppend<'a, V> {
    /// No single-item diff is possible. The parent container has been flagged
    /// (when a partial update was in flight) and must be rendered in full.
    FullRerender,
    /// The element was materialized after the last rendered item.
    SingleItem(&'a Item<V>),
    /// The element belongs to a later page. Nothing was materialized and the
    /// page-changed hook was called.
    NextPage,
}

/// What [`LinearRepeater::items_appended`] did with the new elements.
#[derive(Debug)]
pub enum ListAppendReport<'a, V> {
    /// The backing collection did not grow.
    Unchanged,
    /// The parent container was flagged and must be rendered in full.
    FullRerender,
    /// Elements were materialized in place.
    Appended {
        /// Newly created items, in index order. Empty if everything went past
        /// the current page.
        items: Vec<&'a Item<V>>,
        /// Whether some appended element is not visible on the current page.
        page_changed: bool,
    },
}

enum Tail {
    Unchanged,
    FullRerender,
    Appended {
        range: Range<usize>,
        page_changed: bool,
    },
}

/// Repeats one item per element of a host-owned collection.
///
/// The repeater never owns the collection. It is passed to every call, already
/// mutated by the host, and the repeater is then told what changed:
///
/// - [`render`](Self::render) materializes the current page in full.
/// - [`append_element`](Self::append_element) pushes one element and, during a
///   partial update, materializes it after the last rendered item.
/// - [`items_appended`](Self::items_appended) does the same for elements the
///   host pushed itself.
/// - [`insert_at`](Self::insert_at) renumbers cached items after an insertion.
///
/// ```rust
/// use accrete_repeater::{
///     ItemContext, LinearRepeater, ListAppend, ListConfig, MarkupId, PartialUpdate, populate_with,
/// };
///
/// let mut values = vec![1_u32, 2];
/// let mut hooks = populate_with(|cx: &ItemContext<'_, u32>| cx.element * 10);
/// let mut list = LinearRepeater::new(MarkupId::from("values"), &ListConfig::default()).unwrap();
/// list.render(&values, &mut hooks, None).unwrap();
///
/// let mut update = PartialUpdate::new();
/// let appended = list
///     .append_element(&mut values, 3, &mut hooks, Some(&mut update))
///     .unwrap();
/// let ListAppend::SingleItem(item) = appended else {
///     panic!("expected a single-item diff");
/// };
/// assert_eq!(*item.view(), 30);
/// assert!(update.contains(item.id()));
/// assert_eq!(update.directives()[0].tag, "li");
/// ```
#[derive(Debug)]
pub struct LinearRepeater<V> {
    parent: MarkupId,
    ids: MarkupIdGenerator,
    item_tag: String,
    items_per_page: NonZeroUsize,
    current_page: usize,
    reuse: bool,
    /// Materialized items. Only items on the current page survive a render
    /// unless reuse is on.
    items: ItemCache<Item<V>>,
    /// Indices of the displayed items, in render order.
    rendered: Vec<usize>,
    /// Appended while the parent was being re-rendered; reported on the next
    /// render that is part of a partial update.
    pending_appended: Vec<usize>,
    last_item_count: usize,
}

impl<V> LinearRepeater<V> {
    /// Creates a repeater inside the container with token `parent`.
    ///
    /// The parent is flagged whenever an append cannot be expressed as a
    /// single-item diff.
    pub fn new(parent: MarkupId, config: &ListConfig) -> Result<Self, GeometryError> {
        Ok(Self {
            parent,
            ids: MarkupIdGenerator::new(config.id_prefix.clone()),
            item_tag: config.item_tag.clone(),
            items_per_page: config.page_size()?,
            current_page: 0,
            reuse: config.reuse_items,
            items: ItemCache::new(),
            rendered: Vec::new(),
            pending_appended: Vec::new(),
            last_item_count: 0,
        })
    }

    /// Token of the enclosing container.
    #[must_use]
    pub fn parent(&self) -> &MarkupId {
        &self.parent
    }

    /// Page shown by the next render.
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    /// Selects the page shown by the next render.
    pub fn set_current_page(&mut self, page: usize) {
        self.current_page = page;
    }

    /// Capacity of one page.
    #[must_use]
    pub const fn items_per_page(&self) -> NonZeroUsize {
        self.items_per_page
    }

    /// Changes the page capacity. Takes effect on the next render.
    pub fn set_items_per_page(&mut self, items_per_page: NonZeroUsize) {
        self.items_per_page = items_per_page;
    }

    /// Number of pages needed for `backing`.
    #[must_use]
    pub fn page_count<B: Backing + ?Sized>(&self, backing: &B) -> usize {
        page_count(backing.len(), self.items_per_page)
    }

    /// Whether items are kept across renders.
    #[must_use]
    pub const fn reuse_items(&self) -> bool {
        self.reuse
    }

    /// Turns item reuse on or off.
    ///
    /// Turning it off drops every cached item that is not currently displayed;
    /// the next render discards the rest. Turning it on seeds the cache with
    /// the displayed items.
    pub fn set_reuse_items(&mut self, reuse: bool) {
        if !reuse {
            let rendered = &self.rendered;
            self.items.retain(|index, _| rendered.binary_search(&index).is_ok());
        }
        self.reuse = reuse;
    }

    /// The materialized item for `index`, if any.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<&Item<V>> {
        self.items.get(index)
    }

    /// The view of the materialized item for `index`, mutably.
    pub fn view_mut(&mut self, index: usize) -> Option<&mut V> {
        self.items.get_mut(index).map(Item::view_mut)
    }

    /// Displayed items in render order.
    pub fn rendered(&self) -> impl Iterator<Item = &Item<V>> + '_ {
        self.rendered.iter().filter_map(|&i| self.items.get(i))
    }

    /// Number of materialized items, displayed or cached.
    #[must_use]
    pub fn materialized_len(&self) -> usize {
        self.items.len()
    }

    /// Collection length the repeater last accounted for.
    #[must_use]
    pub const fn last_item_count(&self) -> usize {
        self.last_item_count
    }

    fn info(&self, item_count: usize) -> RepeaterInfo {
        RepeaterInfo {
            current_page: self.current_page,
            items_per_page: self.items_per_page.get(),
            item_count,
            page_count: page_count(item_count, self.items_per_page),
        }
    }

    /// Materializes the current page.
    ///
    /// Without reuse every item is created afresh. With reuse, cached items
    /// are picked up by index and only missing ones are created; cached items
    /// past the end of `backing` are dropped.
    ///
    /// Pass the in-flight partial update, if any, so that elements appended
    /// while the parent was being re-rendered are reported to
    /// [`ItemHooks::on_item_appended`].
    pub fn render<T, B, H>(
        &mut self,
        backing: &B,
        hooks: &mut H,
        update: Option<&mut dyn UpdateSink>,
    ) -> Result<Vec<&Item<V>>, RepeaterError>
    where
        B: Backing<Element = T> + ?Sized,
        H: ItemHooks<T, View = V>,
    {
        let count = backing.len();
        let window = PageWindow::for_page(self.current_page, self.items_per_page, count);
        debug!(
            page = self.current_page,
            start = window.start,
            end = window.end,
            reuse = self.reuse,
            "rendering list"
        );

        if self.reuse {
            self.items.truncate(count);
        } else {
            self.items.clear();
        }
        let before = if self.reuse {
            self.items
                .nearest_before(window.start)
                .map(|(_, item)| item.id().clone())
        } else {
            None
        };

        let info = self.info(count);
        self.rendered.clear();
        for index in window.indices() {
            materialize(&mut self.items, &mut self.ids, index, backing, hooks, info)?;
            self.rendered.push(index);
        }
        link_in_order(&mut self.items, &self.rendered, before);

        let pending = core::mem::take(&mut self.pending_appended);
        if let Some(update) = update {
            let off_page = pending.iter().filter(|&&i| !window.contains(i)).count();
            for index in pending.into_iter().filter(|&i| window.contains(i)) {
                if let Some(item) = self.items.get_mut(index) {
                    trace!(index, id = %item.id(), "reporting item appended during full render");
                    hooks.on_item_appended(item.as_appended(), update);
                }
            }
            if off_page > 0 {
                debug!(
                    page = self.current_page,
                    off_page, "appended elements fall outside the current page"
                );
                hooks.on_page_changed_after_append(&info, update);
            }
        }

        self.last_item_count = count;
        Ok(self.rendered().collect())
    }

    /// Pushes `value` onto `backing` and reports it.
    ///
    /// Outside a partial update (`update` is `None`) this only pushes; the
    /// next full render shows the element. During a partial update the
    /// element is materialized after the last rendered item, unless the list
    /// had nothing to anchor it to, in which case the parent is flagged.
    pub fn append_element<T, B, H>(
        &mut self,
        backing: &mut B,
        value: T,
        hooks: &mut H,
        update: Option<&mut dyn UpdateSink>,
    ) -> Result<ListAppend<'_, V>, RepeaterError>
    where
        B: BackingMut<Element = T> + ?Sized,
        H: ItemHooks<T, View = V>,
    {
        backing.push(value);
        let new_index = backing.len() - 1;
        let Some(update) = update else {
            debug!(new_index, "element appended outside a partial update");
            return Ok(ListAppend::FullRerender);
        };

        match self.materialize_tail(&*backing, hooks, update)? {
            Tail::Unchanged | Tail::FullRerender => Ok(ListAppend::FullRerender),
            Tail::Appended { range, .. } if range.contains(&new_index) => Ok(self
                .items
                .get(new_index)
                .map_or(ListAppend::FullRerender, ListAppend::SingleItem)),
            Tail::Appended { .. } => Ok(ListAppend::NextPage),
        }
    }

    /// Reports elements the host pushed onto `backing` since the last render
    /// or notification.
    pub fn items_appended<T, B, H>(
        &mut self,
        backing: &B,
        hooks: &mut H,
        update: &mut dyn UpdateSink,
    ) -> Result<ListAppendReport<'_, V>, RepeaterError>
    where
        B: Backing<Element = T> + ?Sized,
        H: ItemHooks<T, View = V>,
    {
        Ok(match self.materialize_tail(backing, hooks, update)? {
            Tail::Unchanged => ListAppendReport::Unchanged,
            Tail::FullRerender => ListAppendReport::FullRerender,
            Tail::Appended {
                range,
                page_changed,
            } => ListAppendReport::Appended {
                items: range.filter_map(|i| self.items.get(i)).collect(),
                page_changed,
            },
        })
    }

    fn materialize_tail<T, B, H>(
        &mut self,
        backing: &B,
        hooks: &mut H,
        update: &mut dyn UpdateSink,
    ) -> Result<Tail, RepeaterError>
    where
        B: Backing<Element = T> + ?Sized,
        H: ItemHooks<T, View = V>,
    {
        let count = backing.len();
        let first_new = self.last_item_count;
        if count <= first_new {
            return Ok(Tail::Unchanged);
        }
        let _span = trace_span!("list_items_appended", first_new, count).entered();
        self.last_item_count = count;

        let anchor = self
            .rendered
            .last()
            .and_then(|&i| self.items.get(i))
            .map(|item| item.id().clone())
            .filter(|_| first_new > 0);
        let Some(mut anchor) = anchor else {
            debug!(first_new, count, "nothing to anchor on, re-rendering parent");
            update.mark_changed(&self.parent);
            self.pending_appended.extend(first_new..count);
            return Ok(Tail::FullRerender);
        };

        let window = PageWindow::for_page(self.current_page, self.items_per_page, count);
        let start = first_new.max(window.start);
        let end = window.end.max(start);
        let info = self.info(count);

        for index in start..end {
            let element = backing
                .get(index)
                .ok_or(IndexError::OutOfRange { index, len: count })?;
            let id = self.ids.next_id();
            let view = hooks.populate_item(&ItemContext {
                index,
                id: &id,
                element,
                info,
            });

            let mut item = Item::new(id.clone(), index, view);
            item.previous = Some(anchor.clone());
            if let Some(last) = self.rendered.last().and_then(|&i| self.items.get_mut(i)) {
                last.next = Some(id.clone());
            }
            update.insert_after(InsertAfter {
                anchor: anchor.clone(),
                new: id.clone(),
                tag: self.item_tag.clone(),
            });
            update.mark_changed(&id);
            trace!(index, %id, %anchor, "appended item");

            self.items.put(index, item);
            self.rendered.push(index);
            if let Some(item) = self.items.get_mut(index) {
                hooks.on_item_appended(item.as_appended(), update);
            }
            anchor = id;
        }

        let page_changed = count > end || first_new < window.start;
        if page_changed {
            debug!(
                page = self.current_page,
                overflow = count - end,
                "appended elements fall outside the current page"
            );
            hooks.on_page_changed_after_append(&info, update);
        }
        Ok(Tail::Appended {
            range: start..end,
            page_changed,
        })
    }

    /// Reports that `count` elements were inserted into the backing
    /// collection at `position`.
    ///
    /// With reuse on, every cached item at or after `position` is moved up by
    /// `count` so it keeps representing the same element; nothing is created
    /// or rendered until the next render. With reuse off only the element
    /// count is updated, since the next render rebuilds everything.
    pub fn insert_at(&mut self, position: usize, count: usize) -> Result<(), RepeaterError> {
        if count == 0 {
            return Ok(());
        }
        if self.reuse {
            self.items.shift_from(position, count)?;
            for index in self
                .rendered
                .iter_mut()
                .chain(self.pending_appended.iter_mut())
            {
                if *index >= position {
                    *index = index.saturating_add(count);
                }
            }
        }
        if position <= self.last_item_count {
            self.last_item_count = self.last_item_count.saturating_add(count);
        }
        debug!(position, count, reuse = self.reuse, "elements inserted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{LinearRepeater, ListAppend, ListAppendReport};
    use crate::{
        AppendedItem, Item, ItemContext, ItemHooks, ListConfig, MarkupId, PartialUpdate,
        RepeaterError, RepeaterInfo, UpdateSink,
    };
    use accrete_index::Indexed;
    use alloc::format;
    use alloc::string::String;
    use alloc::vec::Vec;

    /// View: `(original index, label)`.
    type View = (usize, String);

    #[derive(Default)]
    struct Recorder {
        populated: Vec<usize>,
        appended: Vec<usize>,
        page_changes: usize,
    }

    impl ItemHooks<String> for Recorder {
        type View = View;

        fn populate_item(&mut self, cx: &ItemContext<'_, String>) -> View {
            self.populated.push(cx.index);
            (cx.index, format!("test_{}", cx.element))
        }

        fn on_item_appended(
            &mut self,
            item: AppendedItem<'_, View>,
            _update: &mut dyn UpdateSink,
        ) {
            self.appended.push(item.index);
        }

        fn on_page_changed_after_append(
            &mut self,
            _info: &RepeaterInfo,
            _update: &mut dyn UpdateSink,
        ) {
            self.page_changes += 1;
        }
    }

    fn values(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("val{i}")).collect()
    }

    fn list(reuse: bool, per_page: usize) -> LinearRepeater<View> {
        let config = ListConfig {
            items_per_page: per_page,
            reuse_items: reuse,
            ..ListConfig::default()
        };
        LinearRepeater::new(MarkupId::from("container"), &config).unwrap()
    }

    fn rendered_indices(list: &LinearRepeater<View>) -> Vec<usize> {
        list.rendered().map(Item::index).collect()
    }

    fn rendered_ids(list: &LinearRepeater<View>) -> Vec<MarkupId> {
        list.rendered().map(|item| item.id().clone()).collect()
    }

    fn labels(list: &LinearRepeater<View>, backing: &[String]) -> Vec<String> {
        list.rendered()
            .map(|item| item.element(backing).unwrap().unwrap().clone())
            .collect()
    }

    #[test]
    fn renders_the_current_page_window() {
        let backing = values(7);
        let mut hooks = Recorder::default();
        let mut list = list(false, 3);
        list.set_current_page(1);

        let views: Vec<View> = list
            .render(&backing, &mut hooks, None)
            .unwrap()
            .into_iter()
            .map(|item| item.view().clone())
            .collect();
        assert_eq!(
            views,
            [
                (3, String::from("test_val3")),
                (4, String::from("test_val4")),
                (5, String::from("test_val5")),
            ]
        );
        assert_eq!(list.page_count(&backing), 3);
    }

    #[test]
    fn page_past_the_end_renders_nothing() {
        let backing = values(2);
        let mut list = list(false, 3);
        list.set_current_page(4);
        assert!(list.render(&backing, &mut Recorder::default(), None).unwrap().is_empty());
    }

    #[test]
    fn first_append_to_an_empty_list_rerenders_the_parent() {
        let mut backing = values(0);
        let mut hooks = Recorder::default();
        let mut list = list(false, usize::MAX);
        list.render(&backing, &mut hooks, None).unwrap();

        let mut update = PartialUpdate::new();
        let appended = list
            .append_element(&mut backing, String::from("first"), &mut hooks, Some(&mut update))
            .unwrap();
        assert!(matches!(appended, ListAppend::FullRerender));
        assert_eq!(update.changed(), [MarkupId::from("container")]);
        assert!(update.directives().is_empty());
        assert!(hooks.appended.is_empty());

        // The host re-renders the parent as part of the same partial update.
        list.render(&backing, &mut hooks, Some(&mut update)).unwrap();
        assert_eq!(hooks.appended, [0]);
        assert_eq!(labels(&list, &backing), ["first"]);
        assert_eq!(hooks.page_changes, 0);
    }

    #[test]
    fn rerender_after_appending_past_the_page_signals_the_page_change() {
        let mut backing = values(0);
        let mut hooks = Recorder::default();
        let mut list = list(false, 2);
        list.render(&backing, &mut hooks, None).unwrap();

        backing.extend(values(5));
        let mut update = PartialUpdate::new();
        let report = list.items_appended(&backing, &mut hooks, &mut update).unwrap();
        assert!(matches!(report, ListAppendReport::FullRerender));
        assert_eq!(hooks.page_changes, 0);

        list.render(&backing, &mut hooks, Some(&mut update)).unwrap();
        assert_eq!(hooks.appended, [0, 1]);
        assert_eq!(hooks.page_changes, 1);
        assert_eq!(list.page_count(&backing), 3);

        // A plain render afterwards reports nothing again.
        list.render(&backing, &mut hooks, Some(&mut update)).unwrap();
        assert_eq!(hooks.page_changes, 1);
    }

    #[test]
    fn appended_hook_edits_only_the_view() {
        #[derive(Default)]
        struct Marker {
            seen: Vec<(usize, MarkupId)>,
        }

        impl ItemHooks<String> for Marker {
            type View = View;

            fn populate_item(&mut self, cx: &ItemContext<'_, String>) -> View {
                (cx.index, cx.element.clone())
            }

            fn on_item_appended(
                &mut self,
                item: AppendedItem<'_, View>,
                _update: &mut dyn UpdateSink,
            ) {
                self.seen.push((item.index, item.id.clone()));
                item.view.1.push_str(" (new)");
            }
        }

        let mut backing = values(1);
        let mut hooks = Marker::default();
        let mut list = list(true, usize::MAX);
        list.render(&backing, &mut hooks, None).unwrap();

        let mut update = PartialUpdate::new();
        list.append_element(&mut backing, String::from("next"), &mut hooks, Some(&mut update))
            .unwrap();
        let id = list.item(1).unwrap().id().clone();
        assert_eq!(hooks.seen, [(1, id)]);
        assert_eq!(list.item(1).unwrap().index(), 1);
        assert_eq!(list.item(1).unwrap().view().1, "next (new)");

        list.view_mut(1).unwrap().1 = String::from("edited");
        list.render(&backing, &mut hooks, None).unwrap();
        assert_eq!(list.item(1).unwrap().view().1, "edited");
        assert!(list.view_mut(5).is_none());
    }

    #[test]
    fn append_materializes_one_item_after_the_last_rendered_one() {
        let mut backing = values(2);
        let mut hooks = Recorder::default();
        let mut list = list(false, usize::MAX);
        list.render(&backing, &mut hooks, None).unwrap();
        let anchor = list.item(1).unwrap().id().clone();

        let mut update = PartialUpdate::new();
        let appended = list
            .append_element(&mut backing, String::from("appended"), &mut hooks, Some(&mut update))
            .unwrap();
        let ListAppend::SingleItem(item) = appended else {
            panic!("expected a single-item diff");
        };
        assert_eq!(item.index(), 2);
        assert_eq!(item.view().1, "test_appended");
        assert_eq!(item.previous(), Some(&anchor));
        let new_id = item.id().clone();

        assert_eq!(update.changed(), [new_id.clone()]);
        assert_eq!(update.directives().len(), 1);
        let directive = &update.directives()[0];
        assert_eq!(directive.anchor, anchor);
        assert_eq!(directive.new, new_id);
        assert_eq!(directive.tag, "li");

        assert_eq!(hooks.appended, [2]);
        assert_eq!(list.item(1).unwrap().next(), Some(&new_id));
        assert_eq!(rendered_indices(&list), [0, 1, 2]);
    }

    #[test]
    fn append_outside_a_partial_update_only_pushes() {
        let mut backing = values(3);
        let mut hooks = Recorder::default();
        let mut list = list(false, usize::MAX);
        list.render(&backing, &mut hooks, None).unwrap();

        let appended = list
            .append_element(&mut backing, String::from("appended"), &mut hooks, None)
            .unwrap();
        assert!(matches!(appended, ListAppend::FullRerender));
        assert_eq!(backing.len(), 4);
        assert!(list.item(3).is_none());

        list.render(&backing, &mut hooks, None).unwrap();
        assert_eq!(labels(&list, &backing), ["val0", "val1", "val2", "appended"]);
        assert!(hooks.appended.is_empty());
    }

    #[test]
    fn append_past_a_full_page_changes_page_instead() {
        let mut backing = values(3);
        let mut hooks = Recorder::default();
        let mut list = list(false, 3);
        list.render(&backing, &mut hooks, None).unwrap();

        let mut update = PartialUpdate::new();
        let appended = list
            .append_element(&mut backing, String::from("next"), &mut hooks, Some(&mut update))
            .unwrap();
        assert!(matches!(appended, ListAppend::NextPage));
        assert_eq!(hooks.page_changes, 1);
        assert!(update.is_empty());
        assert_eq!(list.current_page(), 0);
        assert_eq!(list.page_count(&backing), 2);
    }

    #[test]
    fn host_pushed_elements_chain_their_anchors() {
        let mut backing = values(2);
        let mut hooks = Recorder::default();
        let mut list = list(false, 3);
        list.render(&backing, &mut hooks, None).unwrap();

        backing.push(String::from("a"));
        backing.push(String::from("b"));
        let mut update = PartialUpdate::new();
        let report = list.items_appended(&backing, &mut hooks, &mut update).unwrap();
        let ListAppendReport::Appended {
            items,
            page_changed,
        } = report
        else {
            panic!("expected an in-place append");
        };
        // Only one slot was left on the page.
        assert_eq!(items.len(), 1);
        assert!(page_changed);
        assert_eq!(hooks.page_changes, 1);
        assert_eq!(hooks.appended, [2]);

        let nothing = list.items_appended(&backing, &mut hooks, &mut update).unwrap();
        assert!(matches!(nothing, ListAppendReport::Unchanged));
    }

    #[test]
    fn successive_appends_anchor_on_the_previous_append() {
        let mut backing = values(1);
        let mut hooks = Recorder::default();
        let mut list = list(false, usize::MAX);
        list.render(&backing, &mut hooks, None).unwrap();

        let mut update = PartialUpdate::new();
        backing.push(String::from("a"));
        backing.push(String::from("b"));
        list.items_appended(&backing, &mut hooks, &mut update).unwrap();

        let directives = update.directives();
        assert_eq!(directives.len(), 2);
        assert_eq!(directives[0].anchor, *list.item(0).unwrap().id());
        assert_eq!(directives[1].anchor, directives[0].new);
        assert_eq!(hooks.appended, [1, 2]);
    }

    #[test]
    fn reuse_keeps_identity_and_content_across_renders() {
        let backing = values(3);
        let mut hooks = Recorder::default();
        let mut list = list(true, usize::MAX);
        list.render(&backing, &mut hooks, None).unwrap();
        let first = rendered_ids(&list);

        list.view_mut(1).unwrap().1 = String::from("edited");
        list.render(&backing, &mut hooks, None).unwrap();

        assert_eq!(rendered_ids(&list), first);
        assert_eq!(list.item(1).unwrap().view().1, "edited");
        assert_eq!(hooks.populated, [0, 1, 2]);
    }

    #[test]
    fn without_reuse_every_render_creates_fresh_items() {
        let backing = values(2);
        let mut hooks = Recorder::default();
        let mut list = list(false, usize::MAX);
        list.render(&backing, &mut hooks, None).unwrap();
        let first = rendered_ids(&list);
        list.render(&backing, &mut hooks, None).unwrap();

        let second = rendered_ids(&list);
        assert!(first.iter().all(|id| !second.contains(id)));
        assert_eq!(hooks.populated, [0, 1, 0, 1]);
    }

    #[test]
    fn reuse_links_a_later_page_to_the_nearest_cached_item() {
        let backing = values(4);
        let mut hooks = Recorder::default();
        let mut list = list(true, 2);
        list.render(&backing, &mut hooks, None).unwrap();
        let anchor = list.item(1).unwrap().id().clone();

        list.set_current_page(1);
        list.render(&backing, &mut hooks, None).unwrap();
        assert_eq!(list.item(2).unwrap().previous(), Some(&anchor));
        assert_eq!(list.materialized_len(), 4);
    }

    #[test]
    fn insert_one_at_one_keeps_reused_items_on_their_elements() {
        let mut backing = values(3);
        let mut hooks = Recorder::default();
        let mut list = list(true, usize::MAX);
        list.render(&backing, &mut hooks, None).unwrap();

        backing.insert(1, String::from("insertedAt1"));
        list.insert_at(1, 1).unwrap();
        list.render(&backing, &mut hooks, None).unwrap();

        let originals: Vec<usize> = list.rendered().map(|item| item.view().0).collect();
        assert_eq!(rendered_indices(&list), [0, 1, 2, 3]);
        assert_eq!(originals, [0, 1, 1, 2]);
        assert_eq!(labels(&list, &backing), ["val0", "insertedAt1", "val1", "val2"]);
    }

    #[test]
    fn insert_without_reuse_renumbers_through_a_fresh_render() {
        let mut backing = values(3);
        let mut hooks = Recorder::default();
        let mut list = list(false, usize::MAX);
        list.render(&backing, &mut hooks, None).unwrap();

        backing.insert(1, String::from("insertedAt1"));
        list.insert_at(1, 1).unwrap();
        list.render(&backing, &mut hooks, None).unwrap();

        let originals: Vec<usize> = list.rendered().map(|item| item.view().0).collect();
        assert_eq!(originals, [0, 1, 2, 3]);
        assert_eq!(labels(&list, &backing), ["val0", "insertedAt1", "val1", "val2"]);
    }

    #[test]
    fn inserts_at_decreasing_positions_each_complete_their_walk() {
        let mut backing = values(3);
        let mut hooks = Recorder::default();
        let mut list = list(true, usize::MAX);
        list.render(&backing, &mut hooks, None).unwrap();

        backing.insert(2, String::from("inserted"));
        backing.insert(1, String::from("inserted"));
        backing.insert(0, String::from("inserted"));
        list.insert_at(2, 1).unwrap();
        list.insert_at(1, 1).unwrap();
        list.insert_at(0, 1).unwrap();
        list.render(&backing, &mut hooks, None).unwrap();

        let originals: Vec<usize> = list.rendered().map(|item| item.view().0).collect();
        assert_eq!(originals, [0, 0, 2, 1, 4, 2]);
        assert_eq!(
            labels(&list, &backing),
            ["inserted", "val0", "inserted", "val1", "inserted", "val2"]
        );
    }

    #[test]
    fn reuse_render_purges_items_past_a_shrunk_collection() {
        let mut backing = values(4);
        let mut hooks = Recorder::default();
        let mut list = list(true, usize::MAX);
        list.render(&backing, &mut hooks, None).unwrap();

        backing.truncate(2);
        list.render(&backing, &mut hooks, None).unwrap();
        assert_eq!(list.materialized_len(), 2);
        assert!(list.item(3).is_none());
    }

    #[test]
    fn stale_cache_entries_fail_the_render() {
        let backing = values(2);
        let mut hooks = Recorder::default();
        let mut list = list(true, usize::MAX);
        list.render(&backing, &mut hooks, None).unwrap();

        list.items.get_mut(1).unwrap().set_index(7);
        let err = list.render(&backing, &mut hooks, None).unwrap_err();
        assert_eq!(err, RepeaterError::StaleCacheEntry { key: 1, found: 7 });
    }

    #[test]
    fn turning_reuse_off_keeps_only_displayed_items() {
        let backing = values(4);
        let mut hooks = Recorder::default();
        let mut list = list(true, 2);
        list.render(&backing, &mut hooks, None).unwrap();
        list.set_current_page(1);
        list.render(&backing, &mut hooks, None).unwrap();
        assert_eq!(list.materialized_len(), 4);

        list.set_reuse_items(false);
        assert!(!list.reuse_items());
        assert_eq!(list.materialized_len(), 2);
    }
}
