// Copyright 2026 the Accrete Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backing collections and the index cursor items use to reach them.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::IndexError;

/// Read access to a host-owned, ordered collection of elements.
///
/// Repeaters never own their backing collection. The host passes it into every
/// operation that needs to read elements, so the repeater always observes the
/// collection as it is *now*, after whatever mutation the host just applied.
pub trait Backing {
    /// Element type stored in the collection.
    type Element;

    /// Number of elements currently in the collection.
    fn len(&self) -> usize;

    /// Returns `true` if the collection holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the element at `index`, if any.
    fn get(&self, index: usize) -> Option<&Self::Element>;
}

/// Write access to a host-owned collection.
pub trait BackingMut: Backing {
    /// Returns the element at `index` mutably, if any.
    fn get_mut(&mut self, index: usize) -> Option<&mut Self::Element>;

    /// Appends `value` at the end of the collection.
    fn push(&mut self, value: Self::Element);
}

impl<T> Backing for [T] {
    type Element = T;

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        <[T]>::get(self, index)
    }
}

impl<T> Backing for Vec<T> {
    type Element = T;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }
}

impl<T> BackingMut for Vec<T> {
    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    fn push(&mut self, value: T) {
        Vec::push(self, value);
    }
}

impl<T> Backing for VecDeque<T> {
    type Element = T;

    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        VecDeque::get(self, index)
    }
}

impl<T> BackingMut for VecDeque<T> {
    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        VecDeque::get_mut(self, index)
    }

    fn push(&mut self, value: T) {
        self.push_back(value);
    }
}

/// Something that remembers which backing index it represents.
///
/// [`ItemCache`](crate::ItemCache) keeps every entry's own index equal to its key,
/// and rewrites it through [`Indexed::set_index`] when entries move.
pub trait Indexed {
    /// The backing index this value currently represents.
    fn index(&self) -> usize;

    /// Points this value at a different backing index.
    fn set_index(&mut self, index: usize);
}

/// A cursor onto one element of a backing collection.
///
/// An `ItemModel` holds nothing but an index. Reads and writes go through the
/// collection passed in by the caller, so `get` always observes
/// `backing[index]` and `set` always assigns it. When elements are inserted in
/// front of it the cursor is moved with [`ItemModel::set_index`] instead of
/// being recreated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemModel {
    index: usize,
}

impl ItemModel {
    /// Creates a cursor for `index`.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self { index }
    }

    /// The index this cursor reads and writes.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Moves the cursor.
    pub fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    /// Reads the element under the cursor.
    pub fn get<'a, B>(&self, backing: &'a B) -> Result<&'a B::Element, IndexError>
    where
        B: Backing + ?Sized,
    {
        backing.get(self.index).ok_or(IndexError::OutOfRange {
            index: self.index,
            len: backing.len(),
        })
    }

    /// Mutably borrows the element under the cursor.
    pub fn get_mut<'a, B>(&self, backing: &'a mut B) -> Result<&'a mut B::Element, IndexError>
    where
        B: BackingMut + ?Sized,
    {
        let len = backing.len();
        backing
            .get_mut(self.index)
            .ok_or(IndexError::OutOfRange {
                index: self.index,
                len,
            })
    }

    /// Replaces the element under the cursor, returning the previous value.
    pub fn set<B>(&self, backing: &mut B, value: B::Element) -> Result<B::Element, IndexError>
    where
        B: BackingMut + ?Sized,
    {
        let slot = self.get_mut(backing)?;
        Ok(core::mem::replace(slot, value))
    }
}

impl Indexed for ItemModel {
    fn index(&self) -> usize {
        self.index
    }

    fn set_index(&mut self, index: usize) {
        self.index = index;
    }
}

#[cfg(test)]
mod tests {
    use super::{Backing, BackingMut, ItemModel};
    use crate::IndexError;
    use alloc::collections::VecDeque;
    use alloc::vec;

    #[test]
    fn get_and_set_go_through_the_backing_collection() {
        let mut values = vec!["a", "b", "c"];
        let model = ItemModel::new(1);

        assert_eq!(model.get(&values), Ok(&"b"));
        assert_eq!(model.set(&mut values, "B"), Ok("b"));
        assert_eq!(values, ["a", "B", "c"]);
    }

    #[test]
    fn shifted_cursor_follows_its_element() {
        let mut values = vec![10, 20, 30];
        let mut model = ItemModel::new(1);

        values.insert(0, 5);
        model.set_index(model.index() + 1);

        assert_eq!(model.get(&values), Ok(&20));
    }

    #[test]
    fn out_of_range_reads_and_writes_are_faults() {
        let mut values = vec![1, 2];
        let model = ItemModel::new(2);

        assert_eq!(
            model.get(&values),
            Err(IndexError::OutOfRange { index: 2, len: 2 })
        );
        assert_eq!(
            model.set(&mut values, 3),
            Err(IndexError::OutOfRange { index: 2, len: 2 })
        );
        assert_eq!(values, [1, 2], "a failed write must not touch the collection");
    }

    #[test]
    fn slices_and_deques_are_backings() {
        let slice: &[u8] = &[7, 8];
        assert_eq!(ItemModel::new(1).get(slice), Ok(&8));

        let mut deque = VecDeque::from([1, 2]);
        BackingMut::push(&mut deque, 3);
        assert_eq!(Backing::len(&deque), 3);
        assert_eq!(ItemModel::new(2).get(&deque), Ok(&3));
    }
}
