// Copyright 2026 the Accrete Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Accrete Index: index bookkeeping for incremental repeaters.
//!
//! This crate holds the renderer-agnostic pieces a repeater needs to keep track
//! of which elements of a host-owned collection it has already materialized:
//!
//! - [`Backing`] / [`BackingMut`]: read/write access to the host's ordered
//!   collection. Implemented for `Vec<T>`, `VecDeque<T>` and slices.
//! - [`ItemModel`]: a cursor that reads and writes one element by index.
//! - [`ItemCache`]: an ordered index → item map whose entries can be bulk
//!   renumbered after elements are inserted in front of them.
//! - [`PageWindow`]: the `[start, end)` range visible on one page.
//!
//! The crate does not know about markup, hooks, or partial updates. Those live
//! in `accrete_repeater`.
//!
//! ## Example
//!
//! ```rust
//! use core::num::NonZeroUsize;
//! use accrete_index::{ItemCache, ItemModel, PageWindow};
//!
//! let mut names = vec!["ada", "brian", "cleo"];
//! let per_page = NonZeroUsize::new(2).unwrap();
//!
//! // Cache a cursor for every element on the first page.
//! let mut cache = ItemCache::new();
//! for i in PageWindow::for_page(0, per_page, names.len()).indices() {
//!     cache.put(i, ItemModel::new(i));
//! }
//!
//! // The host inserts one element at the front, then reports it.
//! names.insert(0, "zed");
//! cache.shift_from(0, 1).unwrap();
//!
//! // Cached cursors still read the elements they were created for.
//! assert_eq!(cache.get(1).unwrap().get(&names), Ok(&"ada"));
//! assert_eq!(cache.get(2).unwrap().get(&names), Ok(&"brian"));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cache;
mod error;
mod model;
mod page;

pub use cache::ItemCache;
pub use error::IndexError;
pub use model::{Backing, BackingMut, Indexed, ItemModel};
pub use page::{PageWindow, page_count, page_of};
