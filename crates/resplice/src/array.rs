//! The value-semantic dynamic array.
//!
//! [`DynArray`] owns exactly one [`Buffer`] at a time. Reads go straight
//! to the buffer; every structural mutation funnels through
//! [`DynArray::replace_range`], which builds a complete replacement
//! buffer and swaps it in. The array is therefore never observable in a
//! partially mutated state, and a buffer is never mutated after it has
//! been published to readers.

use std::fmt;
use std::mem;
use std::ops::{Index, Range};

use smallvec::SmallVec;

use crate::buffer::{Buffer, BufferBuilder};
use crate::iter::Iter;

/// A growable array with value semantics and exact-size storage.
///
/// Capacity always equals length: each mutation reallocates to the
/// exact new size and rebuilds, at O(n) cost. This is a deliberate
/// contract, not a missing optimisation — there is no slack capacity
/// and no amortized growth, so memory use is always exactly
/// `len * size_of::<T>()` and every mutation's cost is predictable.
///
/// Cloning performs a deep copy of the buffer; two arrays never share
/// storage, so mutating a clone cannot be observed through the
/// original.
///
/// # Preconditions
///
/// Out-of-range indices and malformed ranges are programmer errors and
/// panic immediately with a message naming the offending values. No
/// operation returns a sentinel or a `Result` for a logic error.
///
/// # Example
///
/// ```rust
/// use resplice::DynArray;
///
/// let mut a = DynArray::from_elements([1, 2, 3, 4]);
/// a.insert(1, 9);
/// assert_eq!(a.to_string(), "[1, 9, 2, 3, 4]");
/// assert_eq!(a.remove(0), 1);
/// assert_eq!(a.to_string(), "[9, 2, 3, 4]");
/// ```
pub struct DynArray<T> {
    /// The one buffer this array owns. Replaced, never mutated.
    buffer: Buffer<T>,
}

impl<T> DynArray<T> {
    /// Create an empty array. Allocates nothing.
    pub fn new() -> Self {
        Self {
            buffer: Buffer::empty(),
        }
    }

    /// Build an array from a sequence of elements, in order.
    ///
    /// Exactly one buffer is built, sized to the input. An empty input
    /// yields a valid zero-length array.
    pub fn from_elements<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let elements: Vec<T> = elements.into_iter().collect();
        let mut builder = BufferBuilder::with_len(elements.len());
        for value in elements {
            builder.push(value);
        }
        Self {
            buffer: builder.finish(),
        }
    }

    /// Number of elements. O(1), never negative.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Borrow the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn get(&self, index: usize) -> &T {
        assert!(
            index < self.len(),
            "index {index} out of bounds for array of length {}",
            self.len(),
        );
        self.buffer.get(index)
    }

    /// Borrow the first element, or `None` when empty.
    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Borrow the last element, or `None` when empty.
    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// View the elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        self.buffer.as_slice()
    }

    /// Move all elements out into a `Vec`, consuming the array.
    pub(crate) fn into_elements(self) -> Vec<T> {
        self.buffer.into_vec()
    }

    /// Iterate over the elements in increasing index order.
    ///
    /// The iterator borrows the array, so structural mutation while an
    /// iteration is in flight is rejected at compile time — the borrow
    /// is the snapshot. Calling `iter()` again restarts from index 0.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.as_slice())
    }
}

impl<T: Clone> DynArray<T> {
    /// Replace the elements in `range` with `replacement`.
    ///
    /// This is the single primitive behind every structural mutation.
    /// A fresh buffer of the final size is built in three ordered
    /// segments — clones of `[0, range.start)`, the replacement values,
    /// clones of `[range.end, len)` — and swapped in whole. The old
    /// buffer is released only after its replacement is installed, so
    /// readers never see a half-mutated array.
    ///
    /// `range` may be empty (pure insertion at `range.start`) and
    /// `replacement` may be empty (pure removal).
    ///
    /// # Panics
    ///
    /// Panics if `range.start > range.end` or `range.end > len()`.
    pub fn replace_range<I>(&mut self, range: Range<usize>, replacement: I)
    where
        I: IntoIterator<Item = T>,
    {
        let len = self.len();
        assert!(
            range.end <= len,
            "replace_range end {} out of bounds for array of length {len}",
            range.end,
        );
        assert!(
            range.start <= range.end,
            "replace_range start {} exceeds end {}",
            range.start,
            range.end,
        );

        // Single-element batches (push/insert/remove) stay inline.
        let batch: SmallVec<[T; 4]> = replacement.into_iter().collect();
        let new_len = len - (range.end - range.start) + batch.len();

        let mut builder = BufferBuilder::with_len(new_len);
        for value in &self.as_slice()[..range.start] {
            builder.push(value.clone());
        }
        for value in batch {
            builder.push(value);
        }
        for value in &self.as_slice()[range.end..] {
            builder.push(value.clone());
        }

        // Install the replacement, then release the old buffer.
        let old = mem::replace(&mut self.buffer, builder.finish());
        drop(old);
    }

    /// Append `value` at the end.
    pub fn push(&mut self, value: T) {
        let len = self.len();
        self.replace_range(len..len, [value]);
    }

    /// Insert `value` at `index`, shifting `index..` right by one.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()` (`index == len()` appends).
    pub fn insert(&mut self, index: usize, value: T) {
        assert!(
            index <= self.len(),
            "insert index {index} out of bounds for array of length {}",
            self.len(),
        );
        self.replace_range(index..index, [value]);
    }

    /// Remove and return the element at `index`, shifting `index+1..`
    /// left by one.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(
            index < self.len(),
            "remove index {index} out of bounds for array of length {}",
            self.len(),
        );
        let removed = self.get(index).clone();
        self.replace_range(index..index + 1, std::iter::empty());
        removed
    }

    /// Remove all elements, releasing the buffer.
    pub fn clear(&mut self) {
        self.replace_range(0..self.len(), std::iter::empty());
    }
}

impl<T> Default for DynArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DynArray<T> {
    /// Deep copy: the clone owns a fresh buffer with cloned elements.
    fn clone(&self) -> Self {
        let mut builder = BufferBuilder::with_len(self.len());
        for value in self.as_slice() {
            builder.push(value.clone());
        }
        Self {
            buffer: builder.finish(),
        }
    }
}

impl<T> Index<usize> for DynArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        self.get(index)
    }
}

impl<T: PartialEq> PartialEq for DynArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynArray<T> {}

impl<T> FromIterator<T> for DynArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_elements(iter)
    }
}

impl<T: Clone> Extend<T> for DynArray<T> {
    /// Appends all items in one rebuild (a single `replace_range` at
    /// the end), not one rebuild per item.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let len = self.len();
        self.replace_range(len..len, iter);
    }
}

impl<T, const N: usize> From<[T; N]> for DynArray<T> {
    fn from(elements: [T; N]) -> Self {
        Self::from_elements(elements)
    }
}

impl<T> From<Vec<T>> for DynArray<T> {
    fn from(elements: Vec<T>) -> Self {
        Self::from_elements(elements)
    }
}

impl<T: fmt::Display> fmt::Display for DynArray<T> {
    /// Renders `[e0, e1, ..., en-1]`; an empty array renders `[]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, "]")
    }
}

impl<T: fmt::Debug> fmt::Debug for DynArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
