// Copyright 2026 the Accrete Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host callbacks.
//!
//! Repeaters never call back into the host through anything but these traits.
//! Every method except the population hooks defaults to doing nothing, so a host
//! only implements the notifications it cares about.

use crate::{AppendedItem, ItemContext, RepeaterInfo, RowView, SlotContext, UpdateSink};

/// Callbacks shared by list and grid repeaters.
pub trait ItemHooks<T> {
    /// Whatever the host builds for one item.
    type View;

    /// Builds the view for a newly materialized element.
    ///
    /// Called once per created item. Items reused from the cache are not
    /// populated again.
    fn populate_item(&mut self, cx: &ItemContext<'_, T>) -> Self::View;

    /// A single item was appended after an existing one.
    ///
    /// The item is already flagged as changed on `update`.
    fn on_item_appended(
        &mut self,
        item: AppendedItem<'_, Self::View>,
        update: &mut dyn UpdateSink,
    ) {
        let _ = (item, update);
    }

    /// Appended content is not visible on the displayed page, either because
    /// the repeater switched pages or because items overflowed past it.
    ///
    /// Called at most once per append notification. Hosts typically re-render
    /// their pager here.
    fn on_page_changed_after_append(&mut self, info: &RepeaterInfo, update: &mut dyn UpdateSink) {
        let _ = (info, update);
    }
}

/// Extra callbacks for [`GridRepeater`](crate::GridRepeater).
pub trait GridHooks<T>: ItemHooks<T> {
    /// Builds the view for an empty cell padding out the last row of a page.
    fn populate_empty_item(&mut self, cx: &SlotContext<'_>) -> Self::View;

    /// A whole new row was appended.
    ///
    /// Items in the row are not reported individually through
    /// [`ItemHooks::on_item_appended`].
    fn on_row_appended(&mut self, row: &RowView<'_, Self::View>, update: &mut dyn UpdateSink) {
        let _ = (row, update);
    }
}

/// Hooks made from a single population closure.
///
/// Grids built from it fill empty cells with `V::default()`.
#[derive(Debug, Clone, Copy)]
pub struct PopulateWith<F>(F);

/// Wraps `populate` as a hook set that ignores every notification.
///
/// ```rust
/// use accrete_repeater::{ItemContext, LinearRepeater, ListConfig, MarkupId, populate_with};
///
/// let names = vec![String::from("ada"), String::from("brian")];
/// let mut hooks = populate_with(|cx: &ItemContext<'_, String>| cx.element.to_uppercase());
/// let mut list = LinearRepeater::new(MarkupId::from("names"), &ListConfig::default()).unwrap();
///
/// let views: Vec<_> = list
///     .render(&names, &mut hooks, None)
///     .unwrap()
///     .into_iter()
///     .map(|item| item.view().clone())
///     .collect();
/// assert_eq!(views, ["ADA", "BRIAN"]);
/// ```
pub fn populate_with<F>(populate: F) -> PopulateWith<F> {
    PopulateWith(populate)
}

impl<T, V, F> ItemHooks<T> for PopulateWith<F>
where
    F: FnMut(&ItemContext<'_, T>) -> V,
{
    type View = V;

    fn populate_item(&mut self, cx: &ItemContext<'_, T>) -> V {
        (self.0)(cx)
    }
}

impl<T, V, F> GridHooks<T> for PopulateWith<F>
where
    F: FnMut(&ItemContext<'_, T>) -> V,
    V: Default,
{
    fn populate_empty_item(&mut self, _cx: &SlotContext<'_>) -> V {
        V::default()
    }
}
