// Copyright 2026 the Accrete Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The partial-update sink repeaters report into.

use alloc::vec::Vec;

use hashbrown::HashSet;

use crate::{InsertAfter, MarkupId};

/// Receives the fragments an in-flight partial update must carry.
///
/// Repeaters take this as an explicit parameter. Passing `None` where an
/// `Option<&mut dyn UpdateSink>` is expected means the call is part of an
/// ordinary full render.
pub trait UpdateSink {
    /// Flags the fragment with token `id` for re-rendering.
    fn mark_changed(&mut self, id: &MarkupId);

    /// Requests that an empty element be created on the client before the
    /// changed fragments are applied.
    fn insert_after(&mut self, directive: InsertAfter);
}

/// An [`UpdateSink`] that records what it is told, in order.
///
/// Repeated [`mark_changed`](UpdateSink::mark_changed) calls for the same token
/// are recorded once.
#[derive(Debug, Clone, Default)]
pub struct PartialUpdate {
    changed: Vec<MarkupId>,
    seen: HashSet<MarkupId>,
    directives: Vec<InsertAfter>,
}

impl PartialUpdate {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokens flagged as changed, in the order they were first flagged.
    #[must_use]
    pub fn changed(&self) -> &[MarkupId] {
        &self.changed
    }

    /// Insertion directives, in emission order.
    #[must_use]
    pub fn directives(&self) -> &[InsertAfter] {
        &self.directives
    }

    /// Returns `true` if `id` was flagged as changed.
    #[must_use]
    pub fn contains(&self, id: &MarkupId) -> bool {
        self.seen.contains(id)
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty() && self.directives.is_empty()
    }

    /// Forgets everything recorded so far.
    pub fn clear(&mut self) {
        self.changed.clear();
        self.seen.clear();
        self.directives.clear();
    }
}

impl UpdateSink for PartialUpdate {
    fn mark_changed(&mut self, id: &MarkupId) {
        if self.seen.insert(id.clone()) {
            self.changed.push(id.clone());
        }
    }

    fn insert_after(&mut self, directive: InsertAfter) {
        self.directives.push(directive);
    }
}

#[cfg(test)]
mod tests {
    use super::{PartialUpdate, UpdateSink};
    use crate::{InsertAfter, MarkupId};

    #[test]
    fn changed_tokens_are_deduplicated_in_first_seen_order() {
        let mut update = PartialUpdate::new();
        update.mark_changed(&MarkupId::from("b"));
        update.mark_changed(&MarkupId::from("a"));
        update.mark_changed(&MarkupId::from("b"));

        assert_eq!(update.changed(), [MarkupId::from("b"), MarkupId::from("a")]);
        assert!(update.contains(&MarkupId::from("a")));
    }

    #[test]
    fn directives_keep_emission_order() {
        let mut update = PartialUpdate::new();
        assert!(update.is_empty());
        update.insert_after(InsertAfter {
            anchor: MarkupId::from("row0"),
            new: MarkupId::from("row1"),
            tag: "tr".into(),
        });
        assert_eq!(update.directives().len(), 1);
        assert_eq!(update.directives()[0].new, MarkupId::from("row1"));

        update.clear();
        assert!(update.is_empty());
    }
}
