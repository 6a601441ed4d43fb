//! Exclusively-owned contiguous element storage.
//!
//! A [`Buffer`] owns one heap region holding exactly `len` fully
//! constructed values of `T`. It has no spare capacity and no growth
//! path: a buffer is built once, at its final size, through a
//! [`BufferBuilder`], and is immutable thereafter. Structural changes
//! happen one level up, in [`crate::DynArray`], by building a
//! replacement buffer and swapping it in.
//!
//! This is the only module in the crate containing `unsafe` code. Every
//! unsafe block carries a `SAFETY:` comment stating the invariant it
//! relies on.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};
use std::slice;

/// Exclusive owner of a contiguous region of exactly `len` live elements.
///
/// # Invariant
///
/// If `len > 0`, `ptr` addresses a heap allocation of exactly
/// `len * size_of::<T>()` bytes containing `len` initialized values in
/// logical order, with no gap. If `len == 0` (or `T` is zero-sized),
/// `ptr` is dangling and no allocation is owned.
///
/// `Buffer` is deliberately neither `Clone` nor `Copy`: a region is
/// owned by exactly one buffer, and a buffer by exactly one array.
/// Dropping the buffer drops each element in index order, then frees
/// the region — exactly once.
pub struct Buffer<T> {
    /// Start of the owned region; dangling when nothing is allocated.
    ptr: NonNull<T>,
    /// Number of live elements. Also the allocation size: there is no
    /// separate capacity.
    len: usize,
    /// Owns values of `T` for drop-check purposes.
    _marker: PhantomData<T>,
}

// SAFETY: Buffer owns its elements exactly like a Vec<T> would; sending
// or sharing it is sending or sharing the Ts it holds.
unsafe impl<T: Send> Send for Buffer<T> {}
// SAFETY: shared access to Buffer only hands out &T.
unsafe impl<T: Sync> Sync for Buffer<T> {}

impl<T> Buffer<T> {
    /// An empty buffer. Owns no allocation.
    pub fn empty() -> Self {
        Self {
            ptr: NonNull::dangling(),
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Borrow the element at `index`.
    ///
    /// Callers validate bounds before calling (the array does, with a
    /// contextual panic message); an out-of-range index here panics
    /// with the bare slice message.
    pub fn get(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }

    /// View the live elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the type invariant guarantees `len` initialized,
        // contiguous elements at `ptr`; for len == 0 a dangling but
        // aligned pointer is valid for an empty slice.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Move all elements out into a `Vec`, consuming the buffer.
    ///
    /// The region is freed without running element destructors — the
    /// values now live in the returned `Vec`.
    pub(crate) fn into_vec(self) -> Vec<T> {
        let len = self.len;
        let mut out: Vec<T> = Vec::with_capacity(len);
        // SAFETY: source holds `len` initialized elements; destination
        // has capacity for `len`; the regions are distinct allocations.
        unsafe {
            ptr::copy_nonoverlapping(self.ptr.as_ptr(), out.as_mut_ptr(), len);
            out.set_len(len);
        }
        // SAFETY: ownership of the elements has transferred to `out`;
        // free the region without dropping them.
        unsafe { dealloc_region(self.ptr, len) };
        mem::forget(self);
        out
    }
}

impl<T> Drop for Buffer<T> {
    fn drop(&mut self) {
        // SAFETY: the type invariant guarantees `len` live elements at
        // `ptr`. Each is dropped exactly once, in index order, and the
        // region is freed exactly once; len == 0 means nothing to do.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), self.len));
            dealloc_region(self.ptr, self.len);
        }
    }
}

/// Write-once constructor for a [`Buffer`] of a fixed, known size.
///
/// The region is reserved up front at its exact final size; elements
/// are then written through an advancing cursor with [`push`]. The
/// buffer only becomes observable via [`finish`], which requires every
/// position to have been filled — a partially initialized buffer can
/// never escape. If the builder is dropped mid-construction (e.g. an
/// element's `Clone` panicked), the initialized prefix is dropped and
/// the region freed, so nothing leaks.
///
/// [`push`]: BufferBuilder::push
/// [`finish`]: BufferBuilder::finish
pub struct BufferBuilder<T> {
    /// Start of the reserved region; dangling when nothing is allocated.
    ptr: NonNull<T>,
    /// Total positions reserved. Fixed at construction.
    cap: usize,
    /// Cursor: positions `[0, len)` are initialized.
    len: usize,
    _marker: PhantomData<T>,
}

impl<T> BufferBuilder<T> {
    /// Reserve a region for exactly `cap` elements.
    ///
    /// Allocation failure is treated as unrecoverable resource
    /// exhaustion and aborts via [`alloc::handle_alloc_error`]. A
    /// `cap` of zero (or a zero-sized `T`) reserves nothing.
    ///
    /// # Panics
    ///
    /// Panics if the total allocation size would overflow `isize`.
    pub fn with_len(cap: usize) -> Self {
        let layout = region_layout::<T>(cap);
        let ptr = match layout {
            None => NonNull::dangling(),
            Some(layout) => {
                // SAFETY: region_layout only returns Some for a
                // non-zero-sized layout.
                let raw = unsafe { alloc::alloc(layout) };
                match NonNull::new(raw.cast::<T>()) {
                    Some(p) => p,
                    None => alloc::handle_alloc_error(layout),
                }
            }
        };
        Self {
            ptr,
            cap,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Write `value` into the next position and advance the cursor.
    ///
    /// # Panics
    ///
    /// Panics if all `cap` positions are already filled.
    pub fn push(&mut self, value: T) {
        assert!(
            self.len < self.cap,
            "buffer builder over-filled: capacity is {}",
            self.cap,
        );
        // SAFETY: len < cap, so the slot is inside the reserved region
        // and not yet initialized; for zero-sized T the dangling
        // pointer is valid for a zero-size write.
        unsafe { ptr::write(self.ptr.as_ptr().add(self.len), value) };
        self.len += 1;
    }

    /// Positions filled so far.
    pub fn filled(&self) -> usize {
        self.len
    }

    /// Seal the builder into a valid [`Buffer`].
    ///
    /// # Panics
    ///
    /// Panics unless every reserved position has been filled.
    pub fn finish(self) -> Buffer<T> {
        assert!(
            self.len == self.cap,
            "buffer builder finished with {} of {} positions filled",
            self.len,
            self.cap,
        );
        let ptr = self.ptr;
        let len = self.cap;
        // Ownership of the region transfers to the Buffer; the
        // builder's cleanup must not run.
        mem::forget(self);
        Buffer {
            ptr,
            len,
            _marker: PhantomData,
        }
    }
}

impl<T> Drop for BufferBuilder<T> {
    fn drop(&mut self) {
        // SAFETY: positions [0, len) are initialized and dropped once;
        // the region (sized cap) is freed once. Reached only when the
        // builder did not finish(), so the Buffer never existed.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), self.len));
            dealloc_region(self.ptr, self.cap);
        }
    }
}

/// Layout of a region holding `len` elements of `T`, or `None` when no
/// allocation is needed (zero length or zero-sized `T`).
///
/// # Panics
///
/// Panics if the region size would overflow `isize`.
fn region_layout<T>(len: usize) -> Option<Layout> {
    let layout = Layout::array::<T>(len).expect("buffer allocation size overflows isize");
    if layout.size() == 0 {
        None
    } else {
        Some(layout)
    }
}

/// Free the region behind `ptr` without touching its contents.
///
/// # Safety
///
/// `ptr` must be the start of a live allocation made by
/// [`BufferBuilder::with_len`] for exactly `len` elements, or `len`
/// must describe a no-allocation region (zero length / zero-sized `T`).
unsafe fn dealloc_region<T>(ptr: NonNull<T>, len: usize) {
    if let Some(layout) = region_layout::<T>(len) {
        // SAFETY: per the function contract, ptr/layout match the
        // original allocation.
        unsafe { alloc::dealloc(ptr.as_ptr().cast(), layout) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Element that counts its drops through a shared cell.
    #[derive(Clone)]
    struct Counted {
        drops: Rc<Cell<usize>>,
    }

    impl Counted {
        fn new(drops: &Rc<Cell<usize>>) -> Self {
            Self {
                drops: Rc::clone(drops),
            }
        }
    }

    impl Drop for Counted {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    fn build_from<T>(values: Vec<T>) -> Buffer<T> {
        let mut builder = BufferBuilder::with_len(values.len());
        for v in values {
            builder.push(v);
        }
        builder.finish()
    }

    #[test]
    fn empty_buffer_owns_nothing() {
        let buf: Buffer<u64> = Buffer::empty();
        assert_eq!(buf.len(), 0);
        assert!(buf.is_empty());
        assert_eq!(buf.as_slice(), &[] as &[u64]);
    }

    #[test]
    fn builder_fills_in_order() {
        let buf = build_from(vec![10, 20, 30]);
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.as_slice(), &[10, 20, 30]);
        assert_eq!(*buf.get(0), 10);
        assert_eq!(*buf.get(2), 30);
    }

    #[test]
    fn builder_reports_fill_progress() {
        let mut builder = BufferBuilder::with_len(2);
        assert_eq!(builder.filled(), 0);
        builder.push(1u8);
        assert_eq!(builder.filled(), 1);
        builder.push(2u8);
        assert_eq!(builder.filled(), 2);
        builder.finish();
    }

    #[test]
    #[should_panic(expected = "over-filled")]
    fn push_beyond_capacity_panics() {
        let mut builder = BufferBuilder::with_len(1);
        builder.push(1u32);
        builder.push(2u32);
    }

    #[test]
    #[should_panic(expected = "1 of 3 positions filled")]
    fn finish_underfilled_panics() {
        let mut builder = BufferBuilder::with_len(3);
        builder.push(1u32);
        let _ = builder.finish();
    }

    #[test]
    fn drop_runs_each_destructor_once() {
        let drops = Rc::new(Cell::new(0));
        let buf = build_from(vec![
            Counted::new(&drops),
            Counted::new(&drops),
            Counted::new(&drops),
        ]);
        assert_eq!(drops.get(), 0);
        drop(buf);
        assert_eq!(drops.get(), 3);
    }

    #[test]
    fn abandoned_builder_drops_initialized_prefix() {
        let drops = Rc::new(Cell::new(0));
        let mut builder = BufferBuilder::with_len(5);
        builder.push(Counted::new(&drops));
        builder.push(Counted::new(&drops));
        drop(builder);
        // Only the two initialized positions are dropped.
        assert_eq!(drops.get(), 2);
    }

    #[test]
    fn into_vec_transfers_without_double_drop() {
        let drops = Rc::new(Cell::new(0));
        let buf = build_from(vec![Counted::new(&drops), Counted::new(&drops)]);
        let v = buf.into_vec();
        assert_eq!(v.len(), 2);
        assert_eq!(drops.get(), 0);
        drop(v);
        assert_eq!(drops.get(), 2);
    }

    #[test]
    fn zero_sized_elements_need_no_allocation() {
        let buf = build_from(vec![(), (), (), ()]);
        assert_eq!(buf.len(), 4);
        assert_eq!(buf.as_slice().len(), 4);
    }

    #[test]
    fn zero_length_builder_finishes_immediately() {
        let builder: BufferBuilder<String> = BufferBuilder::with_len(0);
        let buf = builder.finish();
        assert!(buf.is_empty());
    }
}
