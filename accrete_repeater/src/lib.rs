// Copyright 2026 the Accrete Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Accrete Repeater: list and grid repeaters that grow in place.
//!
//! A repeater turns a host-owned, ordered collection into a sequence of
//! rendered items. Beyond the usual full render, the repeaters here can show
//! elements that were appended (or, for lists, inserted) without re-rendering
//! the whole container:
//!
//! - [`LinearRepeater`]: a paged list. Appended elements are materialized and
//!   inserted after the last displayed item through an [`InsertAfter`]
//!   directive; inserted elements renumber the cached items behind them.
//! - [`GridRepeater`]: a paged `rows × columns` grid. Appends fill the
//!   placeholders of the last row first, then add whole rows, and switch page
//!   when the new elements start on another page.
//!
//! The repeaters never talk to a transport. Everything an in-flight partial
//! update has to carry is reported to an [`UpdateSink`]; [`PartialUpdate`] is a
//! ready-made sink that just records it. Host behavior (building views,
//! reacting to appends) goes through [`ItemHooks`] and [`GridHooks`].
//!
//! Each rendered unit is an [`Item`] identified by a [`MarkupId`]. Items keep a
//! cursor into the backing collection, so with item reuse enabled a cached item
//! keeps reading the element it was created for even after elements are
//! inserted in front of it.
//!
//! ## Minimal example
//!
//! ```rust
//! use accrete_repeater::{
//!     ItemContext, LinearRepeater, ListAppend, ListConfig, MarkupId, PartialUpdate,
//!     populate_with,
//! };
//!
//! let mut messages = vec![String::from("hello"), String::from("how are you?")];
//! let mut hooks = populate_with(|cx: &ItemContext<'_, String>| cx.element.len());
//! let mut list = LinearRepeater::new(MarkupId::from("chat"), &ListConfig::default()).unwrap();
//!
//! // Initial full render.
//! assert_eq!(list.render(&messages, &mut hooks, None).unwrap().len(), 2);
//!
//! // A new message arrives while a partial update is being assembled.
//! let mut update = PartialUpdate::new();
//! let appended = list
//!     .append_element(&mut messages, String::from("fine"), &mut hooks, Some(&mut update))
//!     .unwrap();
//! let ListAppend::SingleItem(item) = appended else {
//!     panic!("expected the message to be appended in place");
//! };
//! assert_eq!(*item.view(), 4);
//!
//! // The client creates the new element after the last one, then fills it.
//! assert_eq!(update.directives().len(), 1);
//! assert_eq!(update.changed(), [update.directives()[0].new.clone()]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod error;
mod grid;
mod hooks;
mod item;
mod list;
mod markup;
mod placeholder;
mod update;

pub use config::{GridConfig, GridGeometry, ListConfig};
pub use error::{GeometryError, RepeaterError};
pub use grid::{GridAppendOutcome, GridRepeater, RowView};
pub use hooks::{GridHooks, ItemHooks, PopulateWith, populate_with};
pub use item::{AppendedItem, Item, ItemContext, RepeaterInfo, SlotContext};
pub use list::{LinearRepeater, ListAppend, ListAppendReport};
pub use markup::{InsertAfter, MarkupId, MarkupIdGenerator};
pub use update::{PartialUpdate, UpdateSink};
