// Copyright 2026 the Accrete Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A page with two appendable lists, driven by a script of clicks.
//!
//! The first list starts with four entries; appends show up as single-item
//! insertions. The second starts empty, so its first append re-renders its
//! container instead.
//!
//! Run:
//! - `cargo run -p accrete_demos --example list_page`
//! - `cargo run -p accrete_demos --example list_page -- append-empty append-empty-multiple clear`
//! - `RUST_LOG=accrete_repeater=trace cargo run -p accrete_demos --example list_page`

use std::path::PathBuf;

use accrete_demos::{DemoConfig, ListPage, load_config, logging};
use clap::{Parser, ValueEnum};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Click {
    /// Append one entry to the first list.
    Append,
    /// Append three entries to the first list.
    AppendMultiple,
    /// Append one entry to the initially empty list.
    AppendEmpty,
    /// Append three entries to the initially empty list.
    AppendEmptyMultiple,
    /// Clear the initially empty list (full page reload).
    Clear,
}

/// Appendable list demo.
#[derive(Parser, Debug)]
#[command(about = "Replays clicks against a page with two appendable lists")]
struct Args {
    /// Clicks to replay, in order.
    #[arg(value_enum, default_values_t = [Click::Append, Click::AppendMultiple, Click::AppendEmpty])]
    clicks: Vec<Click>,

    /// TOML file with a `[list]` table.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Items per page, overriding the config file.
    #[arg(long)]
    items_per_page: Option<usize>,

    /// Keep materialized items across renders.
    #[arg(long)]
    reuse: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init()?;

    let mut config = match args.config {
        Some(path) => load_config(path)?.unwrap_or_default(),
        None => DemoConfig::default(),
    }
    .list;
    if let Some(items_per_page) = args.items_per_page {
        config.items_per_page = items_per_page;
    }
    config.reuse_items |= args.reuse;

    let mut page = ListPage::new(&config)?;
    println!("page load");
    for line in page.render()? {
        println!("{line}");
    }

    for click in args.clicks {
        println!("\nclick {click:?}");
        match click {
            Click::Append => print!("{}", page.append(1)?),
            Click::AppendMultiple => print!("{}", page.append(3)?),
            Click::AppendEmpty => print!("{}", page.append_to_empty(1)?),
            Click::AppendEmptyMultiple => print!("{}", page.append_to_empty(3)?),
            Click::Clear => {
                for line in page.clear()? {
                    println!("{line}");
                }
            }
        }
    }
    Ok(())
}
