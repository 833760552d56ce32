// Copyright 2026 the Accrete Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Repeater configuration and validated page geometry.

use alloc::string::String;
use core::num::NonZeroUsize;

use crate::GeometryError;

/// Settings for a [`LinearRepeater`](crate::LinearRepeater).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct ListConfig {
    /// Items shown per page. Defaults to `usize::MAX`, a single page.
    pub items_per_page: usize,
    /// Keep materialized items across renders.
    pub reuse_items: bool,
    /// Tag name for client-side insertion of appended items.
    pub item_tag: String,
    /// Prefix for generated item tokens.
    pub id_prefix: String,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            items_per_page: usize::MAX,
            reuse_items: false,
            item_tag: "li".into(),
            id_prefix: "item".into(),
        }
    }
}

impl ListConfig {
    /// Validated page size.
    pub fn page_size(&self) -> Result<NonZeroUsize, GeometryError> {
        NonZeroUsize::new(self.items_per_page).ok_or(GeometryError::ZeroItemsPerPage)
    }
}

/// Settings for a [`GridRepeater`](crate::GridRepeater).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct GridConfig {
    /// Rows per page. Defaults to `usize::MAX`, a single page.
    pub rows: usize,
    /// Cells per row.
    pub columns: usize,
    /// Keep materialized items across renders.
    pub reuse_items: bool,
    /// Tag name for client-side insertion of appended rows.
    pub row_tag: String,
    /// Tag name of a cell.
    pub item_tag: String,
    /// Prefix for generated row, cell and placeholder tokens.
    pub id_prefix: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: usize::MAX,
            columns: 1,
            reuse_items: false,
            row_tag: "tr".into(),
            item_tag: "td".into(),
            id_prefix: "cell".into(),
        }
    }
}

impl GridConfig {
    /// Validated geometry.
    pub fn geometry(&self) -> Result<GridGeometry, GeometryError> {
        GridGeometry::new(self.rows, self.columns)
    }
}

/// Rows × columns of one grid page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridGeometry {
    rows: NonZeroUsize,
    columns: NonZeroUsize,
}

impl GridGeometry {
    /// Checks that both dimensions are positive.
    pub fn new(rows: usize, columns: usize) -> Result<Self, GeometryError> {
        Ok(Self {
            rows: NonZeroUsize::new(rows).ok_or(GeometryError::ZeroRows)?,
            columns: NonZeroUsize::new(columns).ok_or(GeometryError::ZeroColumns)?,
        })
    }

    /// Rows per page.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows.get()
    }

    /// Cells per row.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns.get()
    }

    /// `rows * columns`, saturating at `usize::MAX`.
    #[must_use]
    pub const fn items_per_page(&self) -> NonZeroUsize {
        self.rows.saturating_mul(self.columns)
    }

    /// Number of rows needed for `items` cells.
    #[must_use]
    pub const fn rows_for(&self, items: usize) -> usize {
        items.div_ceil(self.columns.get())
    }
}
