// Copyright 2026 the Accrete Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted host pages.
//!
//! Each page owns its collections and repeaters and exposes the actions a user
//! could trigger. Partial-update actions return a [`Step`] describing what the
//! client would receive; full-page actions return the freshly rendered lines.

use core::fmt;

use accrete_repeater::{
    GridAppendOutcome, GridConfig, GridRepeater, InsertAfter, LinearRepeater, ListAppend,
    ListConfig, MarkupId, PartialUpdate, RepeaterError,
};
use tracing::info;

use crate::hooks::{FadeIn, Label};

/// What one partial update would send to the client.
#[derive(Debug, Clone, Default)]
pub struct Step {
    /// Elements to create before anything is re-rendered.
    pub insertions: Vec<InsertAfter>,
    /// Fragments to re-render, in order.
    pub changed: Vec<MarkupId>,
    /// Scripts to run afterwards.
    pub scripts: Vec<String>,
}

impl Step {
    fn collect(update: &PartialUpdate, hooks: &mut FadeIn) -> Self {
        Self {
            insertions: update.directives().to_vec(),
            changed: update.changed().to_vec(),
            scripts: hooks.take_scripts(),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for directive in &self.insertions {
            writeln!(
                f,
                "  insert <{}> #{} after #{}",
                directive.tag, directive.new, directive.anchor
            )?;
        }
        for id in &self.changed {
            writeln!(f, "  render #{id}")?;
        }
        for script in &self.scripts {
            writeln!(f, "  script {script}")?;
        }
        Ok(())
    }
}

fn list_lines(title: &str, list: &LinearRepeater<Label>) -> Vec<String> {
    let mut lines = vec![format!("{title} #{}:", list.parent())];
    lines.extend(list.rendered().map(|item| format!("  #{}: {}", item.id(), item.view())));
    lines
}

fn grid_lines(title: &str, grid: &GridRepeater<Label>, page_count: usize) -> Vec<String> {
    let mut lines = vec![format!(
        "{title} #{} (page {} of {}):",
        grid.parent(),
        grid.current_page() + 1,
        page_count.max(1)
    )];
    for row in grid.rows() {
        let cells: Vec<String> = row.cells.iter().map(|item| item.view().to_string()).collect();
        lines.push(format!("  row {} #{}: {}", row.index, row.id, cells.join(" | ")));
    }
    lines
}

/// Two lists: one seeded with `1..=4`, one starting empty inside its own
/// container.
#[derive(Debug)]
pub struct ListPage {
    counter: u32,
    values: Vec<u32>,
    list: LinearRepeater<Label>,
    empty_values: Vec<u32>,
    empty_list: LinearRepeater<Label>,
    hooks: FadeIn,
}

impl ListPage {
    /// Builds the page. Both lists share `config`.
    pub fn new(config: &ListConfig) -> Result<Self, RepeaterError> {
        Ok(Self {
            counter: 5,
            values: vec![1, 2, 3, 4],
            list: LinearRepeater::new(MarkupId::from("repeater"), config)?,
            empty_values: Vec::new(),
            empty_list: LinearRepeater::new(MarkupId::from("container"), config)?,
            hooks: FadeIn::default(),
        })
    }

    /// Renders the whole page.
    pub fn render(&mut self) -> Result<Vec<String>, RepeaterError> {
        self.list.render(&self.values, &mut self.hooks, None)?;
        self.empty_list
            .render(&self.empty_values, &mut self.hooks, None)?;
        let mut lines = list_lines("list", &self.list);
        lines.extend(list_lines("initially empty list", &self.empty_list));
        Ok(lines)
    }

    /// Appends `count` new values to the seeded list.
    pub fn append(&mut self, count: usize) -> Result<Step, RepeaterError> {
        Self::append_to(
            &mut self.list,
            &mut self.values,
            &mut self.counter,
            &mut self.hooks,
            count,
        )
    }

    /// Appends `count` new values to the initially empty list.
    pub fn append_to_empty(&mut self, count: usize) -> Result<Step, RepeaterError> {
        Self::append_to(
            &mut self.empty_list,
            &mut self.empty_values,
            &mut self.counter,
            &mut self.hooks,
            count,
        )
    }

    /// Clears the initially empty list and renders the page again.
    pub fn clear(&mut self) -> Result<Vec<String>, RepeaterError> {
        info!(dropped = self.empty_values.len(), "clearing list");
        self.empty_values.clear();
        self.render()
    }

    /// Items displayed by the seeded list.
    pub fn labels(&self) -> Vec<&Label> {
        self.list.rendered().map(|item| item.view()).collect()
    }

    /// Items displayed by the initially empty list.
    pub fn empty_labels(&self) -> Vec<&Label> {
        self.empty_list.rendered().map(|item| item.view()).collect()
    }

    fn append_to(
        list: &mut LinearRepeater<Label>,
        values: &mut Vec<u32>,
        counter: &mut u32,
        hooks: &mut FadeIn,
        count: usize,
    ) -> Result<Step, RepeaterError> {
        let mut update = PartialUpdate::new();
        let mut rerender = false;
        for _ in 0..count {
            let value = *counter;
            *counter += 1;
            let outcome = list.append_element(values, value, hooks, Some(&mut update))?;
            if matches!(outcome, ListAppend::FullRerender) {
                rerender = true;
            }
        }
        // The flagged parent is rendered once, at the end of the request.
        if rerender {
            list.render(&*values, hooks, Some(&mut update))?;
        }
        info!(count, parent = %list.parent(), rerender, "appended to list");
        Ok(Step::collect(&update, hooks))
    }
}

/// A paged grid seeded with `1..=3`, and an unpaged grid that starts empty.
#[derive(Debug)]
pub struct GridPage {
    counter: u32,
    values: Vec<u32>,
    grid: GridRepeater<Label>,
    empty_values: Vec<u32>,
    empty_grid: GridRepeater<Label>,
    hooks: FadeIn,
}

impl GridPage {
    /// Builds the page. The empty grid shares the column count but has no
    /// row limit.
    pub fn new(config: &GridConfig) -> Result<Self, RepeaterError> {
        let unpaged = GridConfig {
            rows: usize::MAX,
            ..config.clone()
        };
        Ok(Self {
            counter: 4,
            values: vec![1, 2, 3],
            grid: GridRepeater::new(MarkupId::from("grid"), config)?,
            empty_values: Vec::new(),
            empty_grid: GridRepeater::new(MarkupId::from("container-empty"), &unpaged)?,
            hooks: FadeIn::with_pager(MarkupId::from("pager")),
        })
    }

    /// Renders the whole page.
    pub fn render(&mut self) -> Result<Vec<String>, RepeaterError> {
        self.grid.render(&self.values, &mut self.hooks, None)?;
        self.empty_grid
            .render(&self.empty_values, &mut self.hooks, None)?;
        Ok(self.lines())
    }

    fn lines(&self) -> Vec<String> {
        let mut lines = grid_lines("grid", &self.grid, self.grid.page_count(&self.values));
        lines.extend(grid_lines(
            "initially empty grid",
            &self.empty_grid,
            self.empty_grid.page_count(&self.empty_values),
        ));
        lines
    }

    /// Pushes `count` new values onto the paged grid, then notifies it.
    pub fn append(&mut self, count: usize) -> Result<Step, RepeaterError> {
        Self::append_to(
            &mut self.grid,
            &mut self.values,
            &mut self.counter,
            &mut self.hooks,
            count,
        )
    }

    /// Pushes `count` new values onto the initially empty grid.
    pub fn append_to_empty(&mut self, count: usize) -> Result<Step, RepeaterError> {
        Self::append_to(
            &mut self.empty_grid,
            &mut self.empty_values,
            &mut self.counter,
            &mut self.hooks,
            count,
        )
    }

    /// Clears the initially empty grid and renders the page again.
    pub fn clear(&mut self) -> Result<Vec<String>, RepeaterError> {
        info!(dropped = self.empty_values.len(), "clearing grid");
        self.empty_values.clear();
        self.render()
    }

    /// Moves the pager by `delta` pages and renders the page again.
    pub fn turn_page(&mut self, delta: isize) -> Result<Vec<String>, RepeaterError> {
        let last = self.grid.page_count(&self.values).saturating_sub(1);
        let page = self
            .grid
            .current_page()
            .saturating_add_signed(delta)
            .min(last);
        self.grid.set_current_page(page);
        self.render()
    }

    /// Displayed page of the paged grid.
    pub fn current_page(&self) -> usize {
        self.grid.current_page()
    }

    /// Cells of the paged grid, row by row.
    pub fn cells(&self) -> Vec<Vec<&Label>> {
        self.grid
            .rows()
            .map(|row| row.cells.iter().map(|item| item.view()).collect())
            .collect()
    }

    fn append_to(
        grid: &mut GridRepeater<Label>,
        values: &mut Vec<u32>,
        counter: &mut u32,
        hooks: &mut FadeIn,
        count: usize,
    ) -> Result<Step, RepeaterError> {
        for _ in 0..count {
            values.push(*counter);
            *counter += 1;
        }
        let mut update = PartialUpdate::new();
        let outcome = grid.items_appended(&*values, hooks, &mut update)?;
        if let GridAppendOutcome::PageJump { page } = outcome {
            info!(page, "grid switched page, rendering it");
            grid.render(&*values, hooks, Some(&mut update))?;
        }
        info!(count, parent = %grid.parent(), ?outcome, "appended to grid");
        Ok(Step::collect(&update, hooks))
    }
}
