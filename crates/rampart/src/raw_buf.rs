// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! RawBuf - Uninitialized storage for `capacity` slots of `T`.
//!
//! Owns the region and nothing else: it never reads, writes or drops a `T`.
//! Whoever holds a `RawBuf` is responsible for destroying live slots before
//! the buffer is released.

use alloc::alloc::{alloc, dealloc};
use core::alloc::Layout;
use core::marker::PhantomData;
use core::ptr::NonNull;

use crate::error::AllocError;

/// Computes the capacity to grow to when at least `required` slots are needed.
///
/// Doubles the current capacity, raised to `required` when doubling is not
/// enough (0 → 1 → 2 → 4 ... for single pushes).
#[inline]
pub(crate) fn grown_capacity(current: usize, required: usize) -> usize {
    required.max(current.saturating_mul(2))
}

pub(crate) struct RawBuf<T> {
    ptr: NonNull<T>,
    capacity: usize,
    _marker: PhantomData<T>,
}

impl<T> RawBuf<T> {
    /// An empty buffer holding no storage.
    pub(crate) const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
            _marker: PhantomData,
        }
    }

    /// Obtains raw memory for `capacity` slots. No slot is initialized.
    pub(crate) fn allocate(capacity: usize) -> Result<Self, AllocError> {
        if capacity == 0 {
            return Ok(Self::new());
        }

        let layout = Self::layout(capacity)?;

        // Zero-sized T: nothing to allocate, slots are tracked by count only.
        if layout.size() == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                capacity,
                _marker: PhantomData,
            });
        }

        // SAFETY: layout has non-zero size.
        let raw = unsafe { alloc(layout) };
        let ptr = NonNull::new(raw.cast::<T>()).ok_or(AllocError::OutOfMemory { capacity })?;

        Ok(Self {
            ptr,
            capacity,
            _marker: PhantomData,
        })
    }

    fn layout(capacity: usize) -> Result<Layout, AllocError> {
        Layout::array::<T>(capacity).map_err(|_| AllocError::CapacityOverflow)
    }

    #[inline(always)]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if this buffer reserves at least one slot.
    #[inline(always)]
    pub(crate) fn has_storage(&self) -> bool {
        self.capacity > 0
    }

    #[inline(always)]
    pub(crate) fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    #[inline(always)]
    pub(crate) fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        if self.capacity == 0 || size_of::<T>() == 0 {
            return;
        }

        // The layout was computable when the region was allocated.
        if let Ok(layout) = Self::layout(self.capacity) {
            // SAFETY: ptr was returned by `alloc` with this exact layout and is
            // released only once.
            unsafe { dealloc(self.ptr.as_ptr().cast::<u8>(), layout) };
        }
    }
}

// Safety: RawBuf owns its region exclusively, like Box<[T]>.
unsafe impl<T: Send> Send for RawBuf<T> {}
unsafe impl<T: Sync> Sync for RawBuf<T> {}
