//! Iteration over array elements.
//!
//! [`Iter`] is the borrowed view: it pins the array for its lifetime,
//! so the borrow checker statically rejects any structural mutation
//! while an iteration is in flight — the borrow is the snapshot.
//! [`IntoIter`] is the owning counterpart: it consumes the array,
//! moving the elements out of the buffer, and drops whatever was not
//! yielded.

use std::iter::FusedIterator;

use crate::array::DynArray;

/// Borrowed iterator over a [`DynArray`], in increasing index order.
///
/// Finite, exact-size, double-ended, and restartable: `Clone` the
/// iterator (cheap, it is two pointers) or call
/// [`DynArray::iter`] again to start over from index 0.
pub struct Iter<'a, T> {
    /// Elements not yet yielded from either end.
    remaining: &'a [T],
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(elements: &'a [T]) -> Self {
        Self {
            remaining: elements,
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let (first, rest) = self.remaining.split_first()?;
        self.remaining = rest;
        Some(first)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining.len(), Some(self.remaining.len()))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        let (last, rest) = self.remaining.split_last()?;
        self.remaining = rest;
        Some(last)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a DynArray<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Owning iterator over a [`DynArray`].
///
/// The elements are moved out of the array's buffer when the iterator
/// is created; the buffer itself is freed at that point. Elements not
/// yielded are dropped with the iterator.
pub struct IntoIter<T> {
    inner: std::vec::IntoIter<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for DynArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            inner: self.into_elements().into_iter(),
        }
    }
}
