//! Value-semantic dynamic array rebuilt wholesale on every mutation.
//!
//! resplice provides [`DynArray`], a growable contiguous array built
//! directly on manually managed raw memory. Unlike `Vec`, it keeps no
//! spare capacity: storage always holds exactly `len` elements, and
//! every structural mutation (push, insert, remove) builds a complete
//! replacement buffer and swaps it in atomically.
//!
//! # Architecture
//!
//! ```text
//! DynArray<T> (value type, deep-copy Clone)
//! ├── Buffer<T> (exclusively-owned region of exactly len elements)
//! │   └── built via BufferBuilder (cursor fill, all-or-nothing)
//! └── replace_range (the one mutation primitive)
//!     ├── push    = replace_range(len..len, [v])
//!     ├── insert  = replace_range(i..i, [v])
//!     └── remove  = replace_range(i..i+1, [])
//! ```
//!
//! # Contract
//!
//! - Out-of-range indices and malformed ranges panic immediately; there
//!   is no soft error path for logic errors.
//! - Allocation failure aborts (`handle_alloc_error`); there is no
//!   fallback strategy.
//! - Mutations cost O(n) by design — no amortized growth, no slack
//!   capacity. Memory in use is always exactly `len * size_of::<T>()`.
//! - Cloning an array deep-copies its buffer; two arrays never share
//!   storage.
//!
//! All `unsafe` code lives in [`buffer`]; the rest of the crate is
//! `#![deny(unsafe_code)]`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod array;
pub mod buffer;
pub mod iter;

// Public re-exports for the primary API surface.
pub use array::DynArray;
pub use buffer::{Buffer, BufferBuilder};
pub use iter::{IntoIter, Iter};
