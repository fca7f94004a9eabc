// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::convert::Infallible;

/// Fallible duplication of a value.
///
/// This is the element contract of [`Sequence`](crate::Sequence): every
/// operation that copies or relocates elements goes through `try_clone`, and a
/// failure is reported to the caller instead of leaving a half-built value
/// behind.
///
/// Every `T: Clone` implements `TryClone` with [`Infallible`] as its error.
/// Types whose duplication can fail implement it directly (and must not
/// implement `Clone`).
///
/// # Example
///
/// ```rust
/// use rampart::TryClone;
///
/// struct Handle(u32);
///
/// impl TryClone for Handle {
///     type Error = &'static str;
///
///     fn try_clone(&self) -> Result<Self, Self::Error> {
///         if self.0 == 0 {
///             return Err("closed handle");
///         }
///         Ok(Handle(self.0))
///     }
/// }
///
/// assert!(Handle(7).try_clone().is_ok());
/// assert!(Handle(0).try_clone().is_err());
/// assert_eq!(42u8.try_clone(), Ok(42));
/// ```
pub trait TryClone: Sized {
    /// Error produced when duplication fails.
    type Error;

    /// Returns a copy of `self`, or the reason it could not be made.
    fn try_clone(&self) -> Result<Self, Self::Error>;
}

impl<T: Clone> TryClone for T {
    type Error = Infallible;

    #[inline(always)]
    fn try_clone(&self) -> Result<Self, Self::Error> {
        Ok(self.clone())
    }
}
