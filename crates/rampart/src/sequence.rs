// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::mem;
use core::ops::{Deref, DerefMut, Index, IndexMut};
use core::ptr;
use core::slice;

use crate::error::{AllocError, OutOfRange, SequenceError};
use crate::raw_buf::{RawBuf, grown_capacity};
use crate::slots::{Slots, fill, relocate_range};
use crate::try_clone::TryClone;

/// Test behaviour for injecting failures in `Sequence` operations.
///
/// Only available with the `test_utils` feature. The behaviour is sticky: once
/// set, it stays active until changed.
///
/// # Example
///
/// ```rust
/// // test_utils feature required in dev-dependencies
/// #[cfg(test)]
/// mod tests {
///     use rampart::{AllocError, Sequence, SequenceBehaviour, SequenceError};
///
///     #[test]
///     fn test_handles_allocation_failure() {
///         let mut seq = Sequence::<u8>::from_slice(&[1, 2]).expect("Failed to from_slice(..)");
///         seq.change_behaviour(SequenceBehaviour::FailAtAllocation);
///
///         let result = seq.reserve(64);
///         assert!(matches!(
///             result,
///             Err(SequenceError::Alloc(AllocError::OutOfMemory { .. }))
///         ));
///         assert_eq!(seq.capacity(), 2);
///     }
/// }
/// ```
#[cfg(any(test, feature = "test_utils"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequenceBehaviour {
    /// Normal behaviour - no injected failures.
    #[default]
    None,
    /// Every allocation fails with `AllocError::OutOfMemory`.
    FailAtAllocation,
}

/// A contiguous, growable sequence with strong failure safety.
///
/// `Sequence<T>` owns a single raw region of `capacity` slots; the first `len`
/// slots hold live elements and the rest are uninitialized. Elements are
/// copied through [`TryClone`], so element types whose duplication can fail
/// are supported: every operation that constructs or relocates elements
/// either completes or leaves the sequence exactly as it was.
///
/// # Growth
///
/// When more room is needed the capacity becomes `max(required, 2 * capacity)`.
/// A new region is allocated, the live elements are copied into it, and only
/// once everything is in place is the old region dropped. A failure at any
/// point discards the new region and leaves the old one untouched.
///
/// Shrinking (`pop`, `truncate`, `clear`, a smaller `resize`) never fails and
/// never reduces capacity.
///
/// # Example
///
/// ```rust
/// use rampart::{Sequence, SequenceError};
///
/// fn example() -> Result<(), SequenceError<core::convert::Infallible>> {
///     let mut seq = Sequence::<i32>::from_slice(&[1, 2, 3])?;
///     seq.reserve(228)?;
///     assert_eq!(seq.capacity(), 228);
///
///     for i in 0..100 {
///         seq.push(i)?;
///     }
///     assert_eq!(seq.len(), 103);
///     assert_eq!(seq.capacity(), 228);
///
///     seq.resize(1, &0)?;
///     assert_eq!(seq, [1]);
///     assert_eq!(seq.capacity(), 228);
///     Ok(())
/// }
/// # example().unwrap();
/// ```
pub struct Sequence<T> {
    buf: RawBuf<T>,
    len: usize,
    #[cfg(any(test, feature = "test_utils"))]
    behaviour: SequenceBehaviour,
}

impl<T> Sequence<T> {
    /// Creates an empty sequence. No storage is allocated.
    pub const fn new() -> Self {
        Self {
            buf: RawBuf::new(),
            len: 0,
            #[cfg(any(test, feature = "test_utils"))]
            behaviour: SequenceBehaviour::None,
        }
    }

    /// Creates an empty sequence with exactly `capacity` slots reserved.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if the region cannot be allocated.
    pub fn with_capacity(capacity: usize) -> Result<Self, AllocError> {
        Ok(Self {
            buf: RawBuf::allocate(capacity)?,
            len: 0,
            #[cfg(any(test, feature = "test_utils"))]
            behaviour: SequenceBehaviour::None,
        })
    }

    /// Creates a sequence of `len` copies of `value`.
    ///
    /// # Errors
    ///
    /// If any copy fails, the copies made so far are dropped, the region is
    /// released, and the element error is returned.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rampart::Sequence;
    ///
    /// let seq = Sequence::from_elem(5, &7usize).unwrap();
    /// assert_eq!(seq, [7, 7, 7, 7, 7]);
    /// ```
    pub fn from_elem(len: usize, value: &T) -> Result<Self, SequenceError<T::Error>>
    where
        T: TryClone,
    {
        let mut seq = Self::with_capacity(len)?;

        let mut slots = Slots::new(&mut seq.buf, 0);
        fill(&mut slots, len, value).map_err(SequenceError::Element)?;
        seq.len = slots.commit();

        Ok(seq)
    }

    /// Creates a sequence of `len` default values.
    ///
    /// A single `T::default()` is built and copied `len` times.
    ///
    /// # Errors
    ///
    /// Same as [`Sequence::from_elem`].
    pub fn with_len(len: usize) -> Result<Self, SequenceError<T::Error>>
    where
        T: TryClone + Default,
    {
        Self::from_elem(len, &T::default())
    }

    /// Creates a sequence holding copies of every element of `src`, in order.
    ///
    /// The capacity is exactly `src.len()`.
    ///
    /// # Errors
    ///
    /// If any copy fails, the partial sequence is torn down and the element
    /// error is returned. `src` is never modified.
    pub fn from_slice(src: &[T]) -> Result<Self, SequenceError<T::Error>>
    where
        T: TryClone,
    {
        let mut seq = Self::with_capacity(src.len())?;

        let mut slots = Slots::new(&mut seq.buf, 0);
        relocate_range(src, &mut slots).map_err(SequenceError::Element)?;
        seq.len = slots.commit();

        Ok(seq)
    }

    /// Creates a sequence from the values produced by `iter`, in order.
    ///
    /// Reserves the iterator's lower size hint up front, then pushes.
    ///
    /// # Errors
    ///
    /// Fails like [`Sequence::push`]; whatever was collected so far is dropped.
    pub fn try_from_iter<I>(iter: I) -> Result<Self, SequenceError<T::Error>>
    where
        T: TryClone,
        I: IntoIterator<Item = T>,
    {
        let iter = iter.into_iter();
        let mut seq = Self::with_capacity(iter.size_hint().0)?;

        for value in iter {
            seq.push(value)?;
        }

        Ok(seq)
    }

    /// Returns the number of live elements.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of reserved slots.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Returns `true` if the sequence contains no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if the sequence currently holds a storage region.
    #[inline(always)]
    pub fn has_storage(&self) -> bool {
        self.buf.has_storage()
    }

    /// Returns a raw pointer to the first slot.
    ///
    /// Dangling (but aligned) when the sequence holds no storage. Only the
    /// first `len()` slots may be read.
    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.buf.as_ptr()
    }

    /// Returns a raw mutable pointer to the first slot.
    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_mut_ptr()
    }

    /// Returns the live elements as a slice.
    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the first `len` slots are live.
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    /// Returns the live elements as a mutable slice.
    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: the first `len` slots are live.
        unsafe { slice::from_raw_parts_mut(self.buf.as_mut_ptr(), self.len) }
    }

    /// Bounds-checked access.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] if `index >= len()`.
    pub fn at(&self, index: usize) -> Result<&T, OutOfRange> {
        self.as_slice().get(index).ok_or(OutOfRange {
            index,
            len: self.len,
        })
    }

    /// Bounds-checked mutable access.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] if `index >= len()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(OutOfRange { index, len })
    }

    /// Unchecked access.
    ///
    /// # Safety
    ///
    /// `index` must be less than `len()`. Checked with `debug_assert!` in debug builds.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len, "Sequence::get_unchecked: index is out of range");

        // SAFETY: caller guarantees index < len.
        unsafe { &*self.buf.as_ptr().add(index) }
    }

    /// Unchecked mutable access.
    ///
    /// # Safety
    ///
    /// `index` must be less than `len()`. Checked with `debug_assert!` in debug builds.
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len, "Sequence::get_unchecked_mut: index is out of range");

        // SAFETY: caller guarantees index < len.
        unsafe { &mut *self.buf.as_mut_ptr().add(index) }
    }

    /// Returns the first element, or `None` if empty.
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Returns the first element mutably, or `None` if empty.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    /// Returns the last element, or `None` if empty.
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Returns the last element mutably, or `None` if empty.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    fn allocate(&self, capacity: usize) -> Result<RawBuf<T>, AllocError> {
        #[cfg(any(test, feature = "test_utils"))]
        if matches!(self.behaviour, SequenceBehaviour::FailAtAllocation) {
            return Err(AllocError::OutOfMemory { capacity });
        }

        RawBuf::allocate(capacity)
    }

    /// Moves the live elements into a fresh region of `capacity` slots, then
    /// lets `tail` construct more elements after them.
    ///
    /// Nothing observable changes until both steps have succeeded: on failure
    /// the guard destroys what was built, the fresh region is released, and
    /// `self` still owns its old region and elements.
    #[cold]
    #[inline(never)]
    fn reallocate<F>(&mut self, capacity: usize, tail: F) -> Result<(), SequenceError<T::Error>>
    where
        T: TryClone,
        F: FnOnce(&mut Slots<'_, T>) -> Result<(), T::Error>,
    {
        debug_assert!(capacity >= self.len);

        let mut fresh = self.allocate(capacity)?;

        let mut slots = Slots::new(&mut fresh, 0);
        relocate_range(self.as_slice(), &mut slots).map_err(SequenceError::Element)?;
        tail(&mut slots).map_err(SequenceError::Element)?;
        let len = slots.commit();

        log::trace!(
            "Sequence: relocated {} elements, capacity {} -> {}",
            self.len,
            self.capacity(),
            capacity
        );

        // Old elements are dropped in place; the old region goes with `fresh`.
        self.clear();
        mem::swap(&mut self.buf, &mut fresh);
        self.len = len;

        Ok(())
    }

    /// Ensures room for at least `capacity` elements in total.
    ///
    /// Does nothing if `capacity <= self.capacity()`. Otherwise the new
    /// capacity is `max(capacity, 2 * self.capacity())`.
    ///
    /// # Errors
    ///
    /// Allocation failure or a failing element copy during relocation. In both
    /// cases the sequence is unchanged.
    pub fn reserve(&mut self, capacity: usize) -> Result<(), SequenceError<T::Error>>
    where
        T: TryClone,
    {
        if capacity <= self.capacity() {
            return Ok(());
        }

        let capacity = grown_capacity(self.capacity(), capacity);
        self.reallocate(capacity, |_| Ok(()))
    }

    /// Appends `value` at the end.
    ///
    /// When full, grows to `max(len + 1, 2 * capacity)`: existing elements
    /// are relocated first and `value` is written last.
    ///
    /// # Errors
    ///
    /// Allocation failure or a failing relocation copy. The sequence is left
    /// exactly as before the call and `value` is dropped.
    pub fn push(&mut self, value: T) -> Result<(), SequenceError<T::Error>>
    where
        T: TryClone,
    {
        if self.len == self.capacity() {
            let required = self.len.checked_add(1).ok_or(AllocError::CapacityOverflow)?;
            let capacity = grown_capacity(self.capacity(), required);

            return self.reallocate(capacity, |slots| {
                slots.write(value);
                Ok(())
            });
        }

        // SAFETY: len < capacity, so slot `len` exists and is uninitialized.
        unsafe { ptr::write(self.buf.as_mut_ptr().add(self.len), value) };
        self.len += 1;

        Ok(())
    }

    /// Removes the last element and returns it, or `None` if empty.
    ///
    /// Dropping the returned value destroys it. Capacity is unchanged.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        self.len -= 1;

        // SAFETY: slot `len` was live and is now outside the live prefix.
        Some(unsafe { ptr::read(self.buf.as_ptr().add(self.len)) })
    }

    /// Appends copies of every element of `src`.
    ///
    /// # Errors
    ///
    /// Allocation failure or a failing copy; the sequence is unchanged.
    pub fn extend_from_slice(&mut self, src: &[T]) -> Result<(), SequenceError<T::Error>>
    where
        T: TryClone,
    {
        let required = self.len.checked_add(src.len()).ok_or(AllocError::CapacityOverflow)?;

        if required > self.capacity() {
            let capacity = grown_capacity(self.capacity(), required);
            return self.reallocate(capacity, |slots| relocate_range(src, slots));
        }

        let mut slots = Slots::new(&mut self.buf, self.len);
        relocate_range(src, &mut slots).map_err(SequenceError::Element)?;
        self.len = slots.commit();

        Ok(())
    }

    /// Resizes to `len` elements, copying `value` into new slots.
    ///
    /// - `len < self.len()`: the tail is dropped; never fails; capacity kept.
    /// - `len == self.len()`: no-op.
    /// - `len > self.len()`: grows like [`Sequence::push`] when the capacity is
    ///   insufficient, then copies `value` into each new slot in order.
    ///
    /// # Errors
    ///
    /// On the growing path, if any copy fails, every slot built by this call
    /// is dropped and both `len()` and `capacity()` are restored.
    pub fn resize(&mut self, len: usize, value: &T) -> Result<(), SequenceError<T::Error>>
    where
        T: TryClone,
    {
        if len <= self.len {
            self.truncate(len);
            return Ok(());
        }

        let extra = len - self.len;

        if len > self.capacity() {
            let capacity = grown_capacity(self.capacity(), len);
            return self.reallocate(capacity, |slots| fill(slots, extra, value));
        }

        let mut slots = Slots::new(&mut self.buf, self.len);
        fill(&mut slots, extra, value).map_err(SequenceError::Element)?;
        self.len = slots.commit();

        Ok(())
    }

    /// Resizes to `len` elements, filling new slots with `T::default()`.
    ///
    /// # Errors
    ///
    /// Same as [`Sequence::resize`].
    pub fn resize_default(&mut self, len: usize) -> Result<(), SequenceError<T::Error>>
    where
        T: TryClone + Default,
    {
        if len <= self.len {
            self.truncate(len);
            return Ok(());
        }

        self.resize(len, &T::default())
    }

    /// Drops every element past `len`, in ascending order. Capacity is unchanged.
    ///
    /// No-op when `len >= self.len()`.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }

        // SAFETY: len < self.len <= capacity.
        let first = unsafe { self.buf.as_mut_ptr().add(len) };
        let tail = ptr::slice_from_raw_parts_mut(first, self.len - len);

        // Shrink first so a panicking destructor cannot lead to a double drop.
        self.len = len;

        // SAFETY: the tail slots were live and are no longer reachable.
        unsafe { ptr::drop_in_place(tail) };
    }

    /// Drops every element in ascending order. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Replaces the contents with `len` copies of `value`.
    ///
    /// The replacement is built first and swapped in only when complete.
    ///
    /// # Errors
    ///
    /// Same as [`Sequence::from_elem`]; `self` is unchanged on failure.
    pub fn assign(&mut self, len: usize, value: &T) -> Result<(), SequenceError<T::Error>>
    where
        T: TryClone,
    {
        let mut replacement = Self::from_elem(len, value)?;
        self.swap(&mut replacement);
        Ok(())
    }

    /// Replaces the contents with a copy of `source`.
    ///
    /// # Errors
    ///
    /// Same as copying `source`; `self` is unchanged on failure.
    pub fn assign_from(&mut self, source: &Self) -> Result<(), SequenceError<T::Error>>
    where
        T: TryClone,
    {
        let mut replacement = source.try_clone()?;
        self.swap(&mut replacement);
        Ok(())
    }

    /// Exchanges length, capacity and storage with `other` in O(1).
    ///
    /// No element is copied, moved or dropped.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.buf, &mut other.buf);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Changes the test behaviour for this sequence.
    ///
    /// Only available with the `test_utils` feature.
    #[cfg(any(test, feature = "test_utils"))]
    pub fn change_behaviour(&mut self, behaviour: SequenceBehaviour) {
        self.behaviour = behaviour;
    }
}

impl<T: TryClone> TryClone for Sequence<T> {
    type Error = SequenceError<T::Error>;

    /// Copies every element, in order, into an independent region sized to `len()`.
    fn try_clone(&self) -> Result<Self, Self::Error> {
        Self::from_slice(self.as_slice())
    }
}

impl<T> Drop for Sequence<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Deref for Sequence<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> DerefMut for Sequence<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for Sequence<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for Sequence<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Index<usize> for Sequence<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        match self.at(index) {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T> IndexMut<usize> for Sequence<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match self.at_mut(index) {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Sequence<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T: PartialEq> PartialEq for Sequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Sequence<T> {}

impl<T: PartialEq> PartialEq<[T]> for Sequence<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for Sequence<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Hash> Hash for Sequence<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}
