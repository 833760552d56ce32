// Copyright 2026 the Accrete Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A page with a paged, appendable grid and a pager, driven by a script of
//! clicks.
//!
//! Appends fill the empty cells of the last row, then add rows, and switch to
//! the next page once the current one is full. The pager is refreshed whenever
//! appended cells end up on a page that is not displayed.
//!
//! Run:
//! - `cargo run -p accrete_demos --example grid_page`
//! - `cargo run -p accrete_demos --example grid_page -- --rows 2 --columns 3 append-multiple append-multiple next`

use std::path::PathBuf;

use accrete_demos::{DemoConfig, GridPage, load_config, logging};
use clap::{Parser, ValueEnum};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Click {
    /// Append one cell to the paged grid.
    Append,
    /// Append three cells to the paged grid.
    AppendMultiple,
    /// Append one cell to the initially empty grid.
    AppendEmpty,
    /// Append three cells to the initially empty grid.
    AppendEmptyMultiple,
    /// Clear the initially empty grid (full page reload).
    Clear,
    /// Pager: next page.
    Next,
    /// Pager: previous page.
    Previous,
}

/// Appendable grid demo.
#[derive(Parser, Debug)]
#[command(about = "Replays clicks against a page with an appendable grid")]
struct Args {
    /// Clicks to replay, in order.
    #[arg(value_enum, default_values_t = [Click::Append, Click::AppendMultiple, Click::AppendEmpty])]
    clicks: Vec<Click>,

    /// TOML file with a `[grid]` table. Defaults to three rows of five.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rows per page, overriding the config file.
    #[arg(long)]
    rows: Option<usize>,

    /// Cells per row, overriding the config file.
    #[arg(long)]
    columns: Option<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init()?;

    let mut config = match args.config {
        Some(path) => load_config(path)?.unwrap_or_else(DemoConfig::example),
        None => DemoConfig::example(),
    }
    .grid;
    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if let Some(columns) = args.columns {
        config.columns = columns;
    }

    let mut page = GridPage::new(&config)?;
    println!("page load");
    for line in page.render()? {
        println!("{line}");
    }

    for click in args.clicks {
        println!("\nclick {click:?}");
        let reload = match click {
            Click::Append => {
                print!("{}", page.append(1)?);
                None
            }
            Click::AppendMultiple => {
                print!("{}", page.append(3)?);
                None
            }
            Click::AppendEmpty => {
                print!("{}", page.append_to_empty(1)?);
                None
            }
            Click::AppendEmptyMultiple => {
                print!("{}", page.append_to_empty(3)?);
                None
            }
            Click::Clear => Some(page.clear()?),
            Click::Next => Some(page.turn_page(1)?),
            Click::Previous => Some(page.turn_page(-1)?),
        };
        for line in reload.into_iter().flatten() {
            println!("{line}");
        }
    }
    Ok(())
}
