// Copyright 2026 the Accrete Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Demo host for the Accrete repeaters.
//!
//! Pages here play the part of a web application: they own the collections,
//! run the repeaters, and turn every partial update into the list of
//! instructions a browser would receive.
//!
//! Run:
//! - `cargo run -p accrete_demos --example list_page`
//! - `cargo run -p accrete_demos --example grid_page -- append-multiple append-multiple`

mod config;
mod hooks;
pub mod logging;
mod pages;

pub use config::{ConfigError, DemoConfig, load_config, parse_config};
pub use hooks::{FadeIn, Label};
pub use pages::{GridPage, ListPage, Step};
