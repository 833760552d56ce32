// Copyright 2026 the Accrete Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rows × columns repeater with page-aware appends.
//!
//! A grid page holds `rows` rows of `columns` cells. The last row of a page is
//! padded with placeholders so the row/column structure stays intact; appended
//! items later take the placeholders' places.
//!
//! When the host reports appended elements, the grid picks one of three ways to
//! show them:
//!
//! - **Page jump**: the new elements start on a page other than the displayed
//!   one (or nothing was displayed at all). The grid switches page and asks for
//!   the parent container to be rendered again; that render still reports the
//!   new elements through the append hooks.
//! - **Fill**: placeholders on the displayed page are replaced, lowest slot
//!   first, each keeping the placeholder's token.
//! - **New rows**: whatever is left becomes whole new rows, inserted one after
//!   another below the last displayed row, as long as the page has room.
//!
//! Elements that do not fit on the displayed page stay unrendered; the
//! page-changed hook tells the host to refresh its pager.

use alloc::string::String;
use alloc::vec::Vec;
use core::mem;

use accrete_index::{Backing, IndexError, ItemCache, PageWindow, page_count};
use hashbrown::HashMap;
use smallvec::SmallVec;
use tracing::{debug, trace, trace_span};

use crate::item::{link_in_order, materialize};
use crate::placeholder::EmptyItemRegistry;
use crate::{
    GeometryError, GridConfig, GridGeometry, GridHooks, InsertAfter, Item, ItemContext,
    MarkupId, MarkupIdGenerator, RepeaterError, RepeaterInfo, SlotContext, UpdateSink,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    /// Real item, by backing index.
    Item(usize),
    /// Placeholder, by slot within the page.
    Placeholder(usize),
}

#[derive(Debug, Clone)]
struct Row {
    id: MarkupId,
    /// Absolute row number, `first item index / columns`.
    index: usize,
    cells: SmallVec<[Cell; 8]>,
}

/// A displayed row.
#[derive(Debug)]
pub struct RowView<'a, V> {
    /// Row token.
    pub id: &'a MarkupId,
    /// Absolute row number across all pages.
    pub index: usize,
    /// Cells in column order, placeholders included.
    pub cells: SmallVec<[&'a Item<V>; 8]>,
}

/// Set by a page jump and consumed by the next render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AppendingRender {
    /// Rows of the target page that were already populated before the append.
    pre_existing_rows: usize,
    /// Items of the target page that were already populated before the append.
    pre_existing_items: usize,
}

/// What [`GridRepeater::items_appended`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAppendOutcome {
    /// The backing collection did not grow.
    Unchanged,
    /// The grid switched to `page` and the parent container was flagged. The
    /// host must render the grid again within the same partial update.
    PageJump {
        /// Page now displayed.
        page: usize,
    },
    /// The new elements were materialized on the displayed page.
    InPlace {
        /// Placeholders replaced by real items.
        filled: usize,
        /// Whole rows added below the last displayed row.
        new_rows: usize,
        /// Elements left for a later page.
        overflow: usize,
    },
}

impl GridAppendOutcome {
    /// Whether the page-changed hook was called.
    #[must_use]
    pub const fn page_changed(&self) -> bool {
        match self {
            Self::Unchanged => false,
            Self::PageJump { .. } => true,
            Self::InPlace { overflow, .. } => *overflow > 0,
        }
    }
}

/// Repeats a host-owned collection as a paged grid.
///
/// Item indices are backing indices, so items created by a partial append
/// continue exactly where the previous render stopped.
///
/// ```rust
/// use accrete_repeater::{
///     GridAppendOutcome, GridConfig, GridRepeater, ItemContext, MarkupId, PartialUpdate,
///     populate_with,
/// };
///
/// let config = GridConfig { rows: 2, columns: 3, ..GridConfig::default() };
/// let mut hooks = populate_with(|cx: &ItemContext<'_, char>| Some(*cx.element));
/// let mut grid = GridRepeater::new(MarkupId::from("gallery"), &config).unwrap();
///
/// let mut cells = vec!['a', 'b'];
/// grid.render(&cells, &mut hooks, None).unwrap();
///
/// cells.extend(['c', 'd']);
/// let mut update = PartialUpdate::new();
/// let outcome = grid.items_appended(&cells, &mut hooks, &mut update).unwrap();
/// assert_eq!(
///     outcome,
///     GridAppendOutcome::InPlace { filled: 1, new_rows: 1, overflow: 0 }
/// );
/// assert_eq!(update.directives()[0].tag, "tr");
/// ```
#[derive(Debug)]
pub struct GridRepeater<V> {
    geometry: GridGeometry,
    parent: MarkupId,
    ids: MarkupIdGenerator,
    row_tag: String,
    item_tag: String,
    current_page: usize,
    reuse: bool,
    items: ItemCache<Item<V>>,
    rows: Vec<Row>,
    placeholders: EmptyItemRegistry<V>,
    last_item_count: usize,
    appending: Option<AppendingRender>,
}

impl<V> GridRepeater<V> {
    /// Creates a grid inside the container with token `parent`.
    pub fn new(parent: MarkupId, config: &GridConfig) -> Result<Self, GeometryError> {
        Ok(Self {
            geometry: config.geometry()?,
            parent,
            ids: MarkupIdGenerator::new(config.id_prefix.clone()),
            row_tag: config.row_tag.clone(),
            item_tag: config.item_tag.clone(),
            current_page: 0,
            reuse: config.reuse_items,
            items: ItemCache::new(),
            rows: Vec::new(),
            placeholders: EmptyItemRegistry::default(),
            last_item_count: 0,
            appending: None,
        })
    }

    /// Page shape.
    #[must_use]
    pub const fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    /// Token of the enclosing container.
    #[must_use]
    pub fn parent(&self) -> &MarkupId {
        &self.parent
    }

    /// Tag name used when inserting rows on the client.
    #[must_use]
    pub fn row_tag(&self) -> &str {
        &self.row_tag
    }

    /// Tag name of a cell.
    #[must_use]
    pub fn item_tag(&self) -> &str {
        &self.item_tag
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

    /// Number of pages needed for `backing`.
    #[must_use]
    pub fn page_count<B: Backing + ?Sized>(&self, backing: &B) -> usize {
        page_count(backing.len(), self.geometry.items_per_page())
    }

    /// Whether items are kept across renders.
    #[must_use]
    pub const fn reuse_items(&self) -> bool {
        self.reuse
    }

    /// Turns item reuse on or off.
    ///
    /// Turning it off drops every cached item that is not currently displayed.
    pub fn set_reuse_items(&mut self, reuse: bool) {
        if !reuse {
            let shown = self.displayed_indices();
            self.items.retain(|index, _| shown.binary_search(&index).is_ok());
        }
        self.reuse = reuse;
    }

    /// The materialized item for backing index `index`, if any.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<&Item<V>> {
        self.items.get(index)
    }

    /// The view of the materialized item for `index`, mutably.
    pub fn view_mut(&mut self, index: usize) -> Option<&mut V> {
        self.items.get_mut(index).map(Item::view_mut)
    }

    /// Displayed rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = RowView<'_, V>> + '_ {
        (0..self.rows.len()).filter_map(|position| self.row_view(position))
    }

    /// Placeholders still waiting to be filled, by slot within the page.
    pub fn placeholders(&self) -> impl Iterator<Item = (usize, &Item<V>)> + '_ {
        self.placeholders.iter()
    }

    /// Number of placeholders still waiting to be filled.
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.placeholders.len()
    }

    /// Collection length the grid last accounted for.
    #[must_use]
    pub const fn last_item_count(&self) -> usize {
        self.last_item_count
    }

    fn info(&self, item_count: usize) -> RepeaterInfo {
        let per_page = self.geometry.items_per_page();
        RepeaterInfo {
            current_page: self.current_page,
            items_per_page: per_page.get(),
            item_count,
            page_count: page_count(item_count, per_page),
        }
    }

    fn row_view(&self, position: usize) -> Option<RowView<'_, V>> {
        let row = self.rows.get(position)?;
        let cells = row
            .cells
            .iter()
            .filter_map(|cell| match *cell {
                Cell::Item(index) => self.items.get(index),
                Cell::Placeholder(slot) => self.placeholders.get(slot),
            })
            .collect();
        Some(RowView {
            id: &row.id,
            index: row.index,
            cells,
        })
    }

    fn displayed_indices(&self) -> Vec<usize> {
        self.rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .filter_map(|cell| match *cell {
                Cell::Item(index) => Some(index),
                Cell::Placeholder(_) => None,
            })
            .collect()
    }

    fn relink(&mut self) {
        let order = self.displayed_indices();
        link_in_order(&mut self.items, &order, None);
    }

    fn new_placeholder<T, H>(&mut self, slot: usize, hooks: &mut H, info: RepeaterInfo) -> Item<V>
    where
        H: GridHooks<T, View = V>,
    {
        let id = self.ids.next_id();
        let view = hooks.populate_empty_item(&SlotContext {
            slot,
            id: &id,
            info,
        });
        trace!(slot, %id, "populated placeholder");
        Item::placeholder(id, slot, view)
    }

    /// Materializes `row_start..row_end` as one row, padding it with
    /// placeholders up to the full column count.
    fn build_row<T, B, H>(
        &mut self,
        row_start: usize,
        row_end: usize,
        page_start: usize,
        id: MarkupId,
        reusable: &mut EmptyItemRegistry<V>,
        backing: &B,
        hooks: &mut H,
        info: RepeaterInfo,
    ) -> Result<Row, RepeaterError>
    where
        B: Backing<Element = T> + ?Sized,
        H: GridHooks<T, View = V>,
    {
        let columns = self.geometry.columns();
        let mut cells = SmallVec::new();
        for index in row_start..row_end {
            materialize(&mut self.items, &mut self.ids, index, backing, hooks, info)?;
            cells.push(Cell::Item(index));
        }
        for offset in (row_end - row_start)..columns {
            let slot = row_start - page_start + offset;
            let placeholder = match reusable.take(slot) {
                Some(placeholder) if self.reuse => placeholder,
                _ => self.new_placeholder::<T, H>(slot, hooks, info),
            };
            self.placeholders.register(slot, placeholder);
            cells.push(Cell::Placeholder(slot));
        }
        trace!(row = row_start / columns, %id, "built row");
        Ok(Row {
            id,
            index: row_start / columns,
            cells,
        })
    }

    /// Materializes the current page as rows.
    ///
    /// Placeholders from the previous render are discarded (or, with reuse,
    /// picked up again by slot) and registered afresh for the padded last row.
    ///
    /// If the previous [`items_appended`](Self::items_appended) jumped pages
    /// and `update` is given, the elements that were appended are reported
    /// here: items landing in rows that already existed before the append go to
    /// [`ItemHooks::on_item_appended`](crate::ItemHooks::on_item_appended), new
    /// rows go to [`GridHooks::on_row_appended`].
    pub fn render<T, B, H>(
        &mut self,
        backing: &B,
        hooks: &mut H,
        update: Option<&mut dyn UpdateSink>,
    ) -> Result<Vec<RowView<'_, V>>, RepeaterError>
    where
        B: Backing<Element = T> + ?Sized,
        H: GridHooks<T, View = V>,
    {
        let count = backing.len();
        let columns = self.geometry.columns();
        let window = PageWindow::for_page(self.current_page, self.geometry.items_per_page(), count);
        debug!(
            page = self.current_page,
            start = window.start,
            end = window.end,
            reuse = self.reuse,
            appending = self.appending.is_some(),
            "rendering grid"
        );

        let old_rows = mem::take(&mut self.rows);
        let mut old_placeholders = mem::take(&mut self.placeholders);
        let row_ids: HashMap<usize, MarkupId> = if self.reuse {
            old_rows.into_iter().map(|row| (row.index, row.id)).collect()
        } else {
            HashMap::new()
        };
        if self.reuse {
            self.items.truncate(count);
        } else {
            self.items.clear();
        }

        let info = self.info(count);
        for row_start in window.indices().step_by(columns) {
            let row_end = row_start.saturating_add(columns).min(window.end);
            let id = match row_ids.get(&(row_start / columns)) {
                Some(id) => id.clone(),
                None => self.ids.next_id(),
            };
            let row = self.build_row(
                row_start,
                row_end,
                window.start,
                id,
                &mut old_placeholders,
                backing,
                hooks,
                info,
            )?;
            self.rows.push(row);
        }
        self.relink();

        let appending = self.appending.take();
        if let (Some(state), Some(update)) = (appending, update) {
            self.report_appending_render(state, window.start, hooks, update);
        }

        self.last_item_count = count;
        Ok(self.rows().collect())
    }

    fn report_appending_render<T, H>(
        &mut self,
        state: AppendingRender,
        page_start: usize,
        hooks: &mut H,
        update: &mut dyn UpdateSink,
    ) where
        H: GridHooks<T, View = V>,
    {
        let _span = trace_span!(
            "grid_appending_render",
            pre_existing_rows = state.pre_existing_rows,
            pre_existing_items = state.pre_existing_items
        )
        .entered();

        let kept_rows = state.pre_existing_rows.min(self.rows.len());
        let appended_items: Vec<usize> = self.rows[..kept_rows]
            .iter()
            .flat_map(|row| row.cells.iter())
            .filter_map(|cell| match *cell {
                Cell::Item(index) if index - page_start >= state.pre_existing_items => Some(index),
                _ => None,
            })
            .collect();

        for index in appended_items {
            if let Some(item) = self.items.get_mut(index) {
                trace!(index, "reporting appended item");
                hooks.on_item_appended(item.as_appended(), update);
            }
        }
        for position in kept_rows..self.rows.len() {
            if let Some(row) = self.row_view(position) {
                trace!(row = row.index, "reporting appended row");
                hooks.on_row_appended(&row, update);
            }
        }
    }

    /// Reports elements the host pushed onto `backing` since the last render
    /// or notification.
    pub fn items_appended<T, B, H>(
        &mut self,
        backing: &B,
        hooks: &mut H,
        update: &mut dyn UpdateSink,
    ) -> Result<GridAppendOutcome, RepeaterError>
    where
        B: Backing<Element = T> + ?Sized,
        H: GridHooks<T, View = V>,
    {
        let count = backing.len();
        let last = self.last_item_count;
        if count <= last {
            return Ok(GridAppendOutcome::Unchanged);
        }
        let _span = trace_span!("grid_items_appended", last, count).entered();

        let per_page = self.geometry.items_per_page().get();
        let columns = self.geometry.columns();
        let first_page = last / per_page;
        let on_last_page = last % per_page;
        let mut unrendered = count - last;

        if self.current_page != first_page || last == 0 || self.rows.is_empty() {
            debug!(
                from = self.current_page,
                to = first_page,
                "appended elements start on another page, re-rendering parent"
            );
            self.current_page = first_page;
            self.appending = Some(AppendingRender {
                pre_existing_rows: self.geometry.rows_for(on_last_page),
                pre_existing_items: on_last_page,
            });
            update.mark_changed(&self.parent);
            let info = self.info(count);
            hooks.on_page_changed_after_append(&info, update);
            self.last_item_count = count;
            return Ok(GridAppendOutcome::PageJump { page: first_page });
        }

        let page_start = first_page * per_page;
        let info = self.info(count);
        let mut available = per_page - on_last_page;
        let mut next = last;

        let mut filled = 0;
        while available > 0 && unrendered > 0 {
            let Some((slot, placeholder)) = self.placeholders.pop_first() else {
                break;
            };
            let element = backing
                .get(next)
                .ok_or(IndexError::OutOfRange { index: next, len: count })?;
            let id = placeholder.id().clone();
            let view = hooks.populate_item(&ItemContext {
                index: next,
                id: &id,
                element,
                info,
            });
            self.items.put(next, Item::new(id.clone(), next, view));
            if let Some(cell) = self
                .rows
                .iter_mut()
                .flat_map(|row| row.cells.iter_mut())
                .find(|cell| **cell == Cell::Placeholder(slot))
            {
                *cell = Cell::Item(next);
            }
            update.mark_changed(&id);
            trace!(index = next, slot, %id, "filled placeholder");
            if let Some(item) = self.items.get_mut(next) {
                hooks.on_item_appended(item.as_appended(), update);
            }

            available -= 1;
            unrendered -= 1;
            next += 1;
            filled += 1;
        }

        let unused_rows = self
            .geometry
            .rows()
            .saturating_sub(self.geometry.rows_for(on_last_page));
        let mut new_rows = 0;
        if available > 0 && unrendered > 0 && unused_rows > 0 {
            let take = available.min(unrendered);
            let end = next + take;
            let mut no_reuse = EmptyItemRegistry::default();
            for row_start in (next..end).step_by(columns) {
                let row_end = row_start.saturating_add(columns).min(end);
                let id = self.ids.next_id();
                let row = self.build_row(
                    row_start,
                    row_end,
                    page_start,
                    id.clone(),
                    &mut no_reuse,
                    backing,
                    hooks,
                    info,
                )?;
                let anchor = self
                    .rows
                    .last()
                    .map_or_else(|| self.parent.clone(), |row| row.id.clone());
                update.insert_after(InsertAfter {
                    anchor,
                    new: id.clone(),
                    tag: self.row_tag.clone(),
                });
                update.mark_changed(&id);
                self.rows.push(row);
                if let Some(view) = self.row_view(self.rows.len() - 1) {
                    trace!(row = view.index, %id, "appended row");
                    hooks.on_row_appended(&view, update);
                }
                new_rows += 1;
            }
            available -= take;
            unrendered -= take;
        }

        let overflow = unrendered.saturating_sub(available);
        if overflow > 0 {
            debug!(
                page = self.current_page,
                overflow, "appended elements overflow the displayed page"
            );
            hooks.on_page_changed_after_append(&info, update);
        }

        self.last_item_count = count;
        self.relink();
        debug!(filled, new_rows, overflow, "grid append handled in place");
        Ok(GridAppendOutcome::InPlace {
            filled,
            new_rows,
            overflow,
        })
    }
}
