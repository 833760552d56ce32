// Copyright 2026 the Accrete Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised by index cursors and the item cache.

use thiserror::Error;

/// A fault while resolving or moving an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IndexError {
    /// An [`ItemModel`](crate::ItemModel) pointed past the end of its backing collection.
    #[error("index {index} is out of range for a backing collection of length {len}")]
    OutOfRange {
        /// The index that was read or written.
        index: usize,
        /// Length of the backing collection at the time of access.
        len: usize,
    },

    /// A shift would move a cached entry beyond `usize::MAX`.
    ///
    /// The cache is left untouched when this is returned.
    #[error("shifting index {index} by {count} overflows the index space")]
    ShiftOverflow {
        /// Highest cached index that could not be moved.
        index: usize,
        /// Requested shift distance.
        count: usize,
    },
}
