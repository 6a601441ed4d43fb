//! Benchmark fixtures for the resplice dynamic array.
//!
//! Provides deterministic array builders shared by the criterion
//! benches so that every bench measures the same shapes:
//!
//! - [`int_array`]: `n` sequential `u64` elements
//! - [`string_array`]: `n` short heap-owning elements

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use resplice::DynArray;

/// Build an array of `n` sequential integers.
pub fn int_array(n: usize) -> DynArray<u64> {
    DynArray::from_elements(0..n as u64)
}

/// Build an array of `n` short strings.
///
/// Elements own heap storage, so clone-heavy operations (every rebuild)
/// exercise per-element construction and destruction, not just memcpy.
pub fn string_array(n: usize) -> DynArray<String> {
    DynArray::from_elements((0..n).map(|i| format!("element-{i}")))
}
