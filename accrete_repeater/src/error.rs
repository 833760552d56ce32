// Copyright 2026 the Accrete Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Repeater errors.

use accrete_index::IndexError;
use thiserror::Error;

/// A repeater was configured with a page shape that cannot hold any item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// A grid needs at least one row per page.
    #[error("a grid page needs at least one row")]
    ZeroRows,
    /// A grid needs at least one column.
    #[error("a grid row needs at least one column")]
    ZeroColumns,
    /// A list page needs room for at least one item.
    #[error("a list page needs room for at least one item")]
    ZeroItemsPerPage,
}

/// A fault raised while rendering or appending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RepeaterError {
    /// Invalid page shape.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// A backing element could not be read, or the cache could not be renumbered.
    #[error(transparent)]
    Index(#[from] IndexError),

    /// A cached item no longer represents the index it is cached under.
    ///
    /// This means the cache was moved out of step with the backing collection,
    /// for example by re-pointing an item by hand instead of reporting an
    /// insertion. The repeater does not repair it.
    #[error("cached item under index {key} represents index {found}")]
    StaleCacheEntry {
        /// The cache key that was looked up.
        key: usize,
        /// The index the cached item actually points at.
        found: usize,
    },
}
