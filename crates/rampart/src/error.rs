// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for rampart.

use thiserror::Error;

/// Errors from obtaining raw storage.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum AllocError {
    /// The requested capacity cannot be expressed as a memory layout.
    ///
    /// Happens when `capacity * size_of::<T>()` would exceed `isize::MAX` bytes,
    /// or when a length computation overflows `usize`.
    #[error("capacity overflow: requested storage exceeds isize::MAX bytes")]
    CapacityOverflow,

    /// The global allocator could not supply the region.
    #[error("out of memory: could not allocate storage for {capacity} elements")]
    OutOfMemory {
        /// Number of slots that were requested.
        capacity: usize,
    },
}

/// Bounds-checked access used an index past the live elements.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
#[error("index {index} is out of range for sequence of length {len}")]
pub struct OutOfRange {
    /// The offending index.
    pub index: usize,
    /// Length of the sequence at the time of the call.
    pub len: usize,
}

/// Errors returned by operations that construct or relocate elements.
///
/// `E` is the element type's copy error (`<T as TryClone>::Error`). It is
/// stored exactly as the element produced it.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum SequenceError<E> {
    /// Storage could not be obtained.
    #[error("AllocError: {0}")]
    Alloc(#[from] AllocError),

    /// Copying or constructing an element failed.
    #[error("element construction failed: {0}")]
    Element(E),
}

impl<E> SequenceError<E> {
    /// Returns the element error, or `None` for allocation failures.
    pub fn into_element(self) -> Option<E> {
        match self {
            Self::Element(e) => Some(e),
            Self::Alloc(_) => None,
        }
    }

    /// Returns `true` if the failure came from the element type.
    pub fn is_element(&self) -> bool {
        matches!(self, Self::Element(_))
    }
}
