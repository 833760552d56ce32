// Copyright 2026 the Accrete Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page-window arithmetic.

use core::num::NonZeroUsize;
use core::ops::Range;

/// The contiguous index range `[start, end)` visible on one page.
///
/// Always satisfies `start <= end <= item_count` for the item count it was
/// computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PageWindow {
    /// First visible index.
    pub start: usize,
    /// One past the last visible index.
    pub end: usize,
}

impl PageWindow {
    /// Computes the window for `page` over `item_count` elements.
    ///
    /// If `page * per_page` does not fit in `usize` the start clamps to 0, so
    /// the first page is shown instead of an overflowing range. A page past
    /// the end of the collection yields an empty window at `item_count`.
    #[must_use]
    pub fn for_page(page: usize, per_page: NonZeroUsize, item_count: usize) -> Self {
        let start = page.checked_mul(per_page.get()).unwrap_or(0).min(item_count);
        let end = start.saturating_add(per_page.get()).min(item_count);
        Self { start, end }
    }

    /// Number of visible indices.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if nothing is visible.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if `index` is inside the window.
    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    /// The visible indices.
    #[must_use]
    pub const fn indices(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Number of pages needed for `item_count` elements, `ceil(item_count / per_page)`.
#[must_use]
pub const fn page_count(item_count: usize, per_page: NonZeroUsize) -> usize {
    item_count.div_ceil(per_page.get())
}

/// The page that holds `index`.
#[must_use]
pub const fn page_of(index: usize, per_page: NonZeroUsize) -> usize {
    index / per_page.get()
}
