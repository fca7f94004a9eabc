// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Contiguous growable sequence with strong failure safety.
//!
//! [`Sequence<T>`] is a dynamic array that manages its own raw storage and
//! constructs and destroys elements in place. Elements are duplicated through
//! [`TryClone`], so element types whose copies can fail are first-class: every
//! operation that builds or relocates elements either fully succeeds or leaves
//! the sequence exactly as it was before the call.
//!
//! # Core Guarantees
//!
//! - **Strong failure safety**: `push`, `reserve`, `resize`, `extend_from_slice`,
//!   `assign` and `assign_from` build into fresh slots behind a guard. A failing
//!   copy or allocation destroys what was built and reports the error; the
//!   sequence keeps its length, capacity and elements.
//! - **Never-failing shrink**: `pop`, `truncate`, `clear` and a shrinking
//!   `resize` cannot fail and never reduce capacity.
//! - **Geometric growth**: capacity grows to `max(required, 2 * capacity)`, so
//!   repeated pushes are amortized O(1) while explicit reservations are honored
//!   exactly when they exceed doubling.
//! - **O(1) transfer**: `swap` and moves exchange storage without touching elements.
//!
//! # Example
//!
//! ```rust
//! use rampart::{Sequence, SequenceError};
//!
//! fn example() -> Result<(), SequenceError<core::convert::Infallible>> {
//!     let mut seq = Sequence::<i32>::new();
//!     seq.push(2)?;
//!     seq.push(7)?;
//!     assert_eq!(seq.len(), 2);
//!     assert_eq!(seq[1], 7);
//!
//!     assert!(seq.at(5).is_err());
//!
//!     let copy = Sequence::from_slice(seq.as_slice())?;
//!     assert_eq!(copy, seq);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # Example: Failing Copies
//!
//! ```rust
//! use rampart::{Sequence, SequenceError, TryClone};
//!
//! #[derive(Debug, PartialEq)]
//! struct Ticket(u32);
//!
//! impl TryClone for Ticket {
//!     type Error = &'static str;
//!
//!     fn try_clone(&self) -> Result<Self, Self::Error> {
//!         if self.0 > 1 {
//!             return Err("ticket cannot be duplicated");
//!         }
//!         Ok(Ticket(self.0))
//!     }
//! }
//!
//! let mut seq = Sequence::new();
//! seq.push(Ticket(0)).unwrap();
//! seq.push(Ticket(2)).unwrap();
//!
//! // Growing must copy Ticket(2), which fails: nothing changes.
//! let result = seq.push(Ticket(1));
//! assert_eq!(result, Err(SequenceError::Element("ticket cannot be duplicated")));
//! assert_eq!(seq, [Ticket(0), Ticket(2)]);
//! assert_eq!(seq.capacity(), 2);
//! ```
//!
//! # Test Utilities
//!
//! Enable the `test_utils` feature to get element types with controllable
//! failures ([`test_utils`]) and to inject allocation failures through
//! [`SequenceBehaviour`]:
//!
//! ```toml
//! [dev-dependencies]
//! rampart = { version = "*", features = ["test_utils"] }
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

#[cfg(test)]
mod tests;

mod error;
mod raw_buf;
mod sequence;
mod slots;
mod support;
mod try_clone;

pub use error::{AllocError, OutOfRange, SequenceError};
pub use sequence::Sequence;
pub use try_clone::TryClone;

#[cfg(any(test, feature = "test_utils"))]
pub use sequence::SequenceBehaviour;

#[cfg(any(test, feature = "test_utils"))]
pub use support::test_utils;
