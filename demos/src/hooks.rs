// Copyright 2026 the Accrete Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hooks shared by the demo pages.

use accrete_repeater::{
    AppendedItem, GridHooks, ItemContext, ItemHooks, MarkupId, RepeaterInfo, RowView,
    SlotContext, UpdateSink,
};

/// Labels every item with its value and fades appended content in.
///
/// Scripts accumulate until [`FadeIn::take_scripts`] is called, the way a
/// partial-update response collects them.
#[derive(Debug, Default)]
pub struct FadeIn {
    scripts: Vec<String>,
    /// Flagged whenever appended content is not on the displayed page.
    pager: Option<MarkupId>,
}

impl FadeIn {
    /// Hooks that also refresh `pager` after an append changed pages.
    #[must_use]
    pub fn with_pager(pager: MarkupId) -> Self {
        Self {
            scripts: Vec::new(),
            pager: Some(pager),
        }
    }

    /// Scripts queued since the last call.
    pub fn take_scripts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.scripts)
    }

    fn fade_in(&mut self, id: &MarkupId) {
        self.scripts.push(format!("$('#{id}').fadeIn();"));
    }
}

/// A rendered cell or list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    /// The element, or `-` for an empty cell.
    pub value: String,
    /// Backing index, or slot within the page for an empty cell.
    pub index: usize,
    /// Hidden until the fade-in script runs.
    pub hidden: bool,
}

impl core::fmt::Display for Label {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} (#{})", self.value, self.index)?;
        if self.hidden {
            f.write_str(" [hidden]")?;
        }
        Ok(())
    }
}

impl ItemHooks<u32> for FadeIn {
    type View = Label;

    fn populate_item(&mut self, cx: &ItemContext<'_, u32>) -> Label {
        Label {
            value: cx.element.to_string(),
            index: cx.index,
            hidden: false,
        }
    }

    fn on_item_appended(&mut self, item: AppendedItem<'_, Label>, _update: &mut dyn UpdateSink) {
        item.view.hidden = true;
        self.fade_in(item.id);
    }

    fn on_page_changed_after_append(&mut self, info: &RepeaterInfo, update: &mut dyn UpdateSink) {
        tracing::info!(
            page = info.current_page,
            pages = info.page_count,
            "appended content went past the displayed page"
        );
        if let Some(pager) = &self.pager {
            update.mark_changed(pager);
        }
    }
}

impl GridHooks<u32> for FadeIn {
    fn populate_empty_item(&mut self, cx: &SlotContext<'_>) -> Label {
        Label {
            value: "-".into(),
            index: cx.slot,
            hidden: false,
        }
    }

    fn on_row_appended(&mut self, row: &RowView<'_, Label>, _update: &mut dyn UpdateSink) {
        self.fade_in(row.id);
    }
}
