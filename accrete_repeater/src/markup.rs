// Copyright 2026 the Accrete Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identity tokens and insertion directives.

use alloc::format;
use alloc::string::String;
use core::fmt;

/// Stable token a partial-update mechanism uses to target one output fragment.
///
/// Items, rows, placeholders and the parent container each carry one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkupId(String);

impl MarkupId {
    /// Wraps an existing token.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MarkupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MarkupId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MarkupId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Hands out `prefix0`, `prefix1`, ... in order.
///
/// One generator is shared by everything a repeater materializes, so a token is
/// never issued twice by the same repeater.
#[derive(Debug, Clone)]
pub struct MarkupIdGenerator {
    prefix: String,
    next: u64,
}

impl MarkupIdGenerator {
    /// Creates a generator whose tokens start with `prefix`.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }

    /// Issues the next token.
    pub fn next_id(&mut self) -> MarkupId {
        let id = MarkupId(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        id
    }

    /// Number of tokens issued so far.
    #[must_use]
    pub const fn issued(&self) -> u64 {
        self.next
    }
}

/// Client-side instruction: create an empty `tag` element with id `new`
/// directly after the element with id `anchor`.
///
/// The partial update then replaces that element with the rendered fragment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InsertAfter {
    /// Existing element the new one goes after.
    pub anchor: MarkupId,
    /// Token of the new element.
    pub new: MarkupId,
    /// Tag name for the new element, such as `li` or `tr`.
    pub tag: String,
}

#[cfg(test)]
mod tests {
    use super::{MarkupId, MarkupIdGenerator};
    use alloc::string::ToString;

    #[test]
    fn generator_is_monotonic() {
        let mut ids = MarkupIdGenerator::new("cell");
        assert_eq!(ids.next_id(), MarkupId::new("cell0"));
        assert_eq!(ids.next_id(), MarkupId::new("cell1"));
        assert_eq!(ids.issued(), 2);
    }

    #[test]
    fn display_is_the_raw_token() {
        assert_eq!(MarkupId::from("list").to_string(), "list");
        assert_eq!(MarkupId::from("list").as_str(), "list");
    }
}
