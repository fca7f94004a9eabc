// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Slots - Construction guard over the uninitialized tail of a [`RawBuf`].
//!
//! Elements are constructed front to back starting at `start`. Until
//! [`Slots::commit`] is called, the guard owns everything it constructed: if it
//! is dropped instead (an early `?` return), those elements are destroyed in
//! reverse completion order and the region is back to its prior state.

use core::marker::PhantomData;
use core::mem;
use core::ptr;

use crate::raw_buf::RawBuf;
use crate::try_clone::TryClone;

pub(crate) struct Slots<'a, T> {
    base: *mut T,
    start: usize,
    constructed: usize,
    capacity: usize,
    _marker: PhantomData<&'a mut RawBuf<T>>,
}

impl<'a, T> Slots<'a, T> {
    /// Starts constructing at slot `start`. Slots `[start, capacity)` must be
    /// uninitialized.
    pub(crate) fn new(buf: &'a mut RawBuf<T>, start: usize) -> Self {
        debug_assert!(start <= buf.capacity());

        Self {
            base: buf.as_mut_ptr(),
            start,
            constructed: 0,
            capacity: buf.capacity(),
            _marker: PhantomData,
        }
    }

    /// Number of uninitialized slots left.
    #[inline(always)]
    pub(crate) fn remaining(&self) -> usize {
        self.capacity - self.start - self.constructed
    }

    /// Places an already-built value into the next slot.
    #[inline]
    pub(crate) fn write(&mut self, value: T) {
        assert!(self.remaining() > 0, "Slots::write: no uninitialized slot left");

        // SAFETY: the slot is inside the region and uninitialized.
        unsafe { ptr::write(self.base.add(self.start + self.constructed), value) };
        self.constructed += 1;
    }

    /// Copy-constructs `source` into the next slot.
    ///
    /// The copy is made before the slot is touched, so on failure the slot
    /// stays uninitialized.
    #[inline]
    pub(crate) fn construct(&mut self, source: &T) -> Result<(), T::Error>
    where
        T: TryClone,
    {
        let value = source.try_clone()?;
        self.write(value);
        Ok(())
    }

    /// Hands the constructed slots over to the caller and returns the index one
    /// past the last of them (the new live length).
    #[must_use]
    pub(crate) fn commit(self) -> usize {
        let end = self.start + self.constructed;
        mem::forget(self);
        end
    }
}

impl<T> Drop for Slots<'_, T> {
    fn drop(&mut self) {
        for offset in (0..self.constructed).rev() {
            // SAFETY: these slots were constructed by this guard and are still live.
            unsafe { ptr::drop_in_place(self.base.add(self.start + offset)) };
        }
    }
}

/// Copies every element of `src`, in ascending order, into `dst`.
///
/// Stops at the first failing copy and returns its error; the elements
/// already constructed remain owned by `dst` and are destroyed with it. `src`
/// is never modified.
pub(crate) fn relocate_range<T: TryClone>(src: &[T], dst: &mut Slots<'_, T>) -> Result<(), T::Error> {
    debug_assert!(src.len() <= dst.remaining());

    for item in src {
        dst.construct(item)?;
    }

    Ok(())
}

/// Copy-constructs `value` into the next `count` slots of `dst`.
pub(crate) fn fill<T: TryClone>(dst: &mut Slots<'_, T>, count: usize, value: &T) -> Result<(), T::Error> {
    debug_assert!(count <= dst.remaining());

    for _ in 0..count {
        dst.construct(value)?;
    }

    Ok(())
}
