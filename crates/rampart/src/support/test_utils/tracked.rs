// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

#[derive(Debug, Default)]
struct TallyState {
    clones: Cell<usize>,
    dropped: RefCell<Vec<i32>>,
}

/// Shared record of copies and drops of [`Tracked`] elements.
///
/// Clones of a `Tally` observe the same record.
#[derive(Debug, Clone, Default)]
pub struct Tally(Rc<TallyState>);

impl Tally {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an element reporting to this record.
    pub fn track(&self, value: i32) -> Tracked {
        Tracked {
            value,
            tally: self.clone(),
        }
    }

    /// Number of `Tracked::clone` calls so far.
    pub fn clones(&self) -> usize {
        self.0.clones.get()
    }

    /// Values of dropped elements, in drop order.
    pub fn dropped(&self) -> Vec<i32> {
        self.0.dropped.borrow().clone()
    }

    /// Forgets all recorded clones and drops.
    pub fn reset(&self) {
        self.0.clones.set(0);
        self.0.dropped.borrow_mut().clear();
    }
}

/// Integer element that reports its copies and drops to a [`Tally`].
#[derive(Debug)]
pub struct Tracked {
    value: i32,
    tally: Tally,
}

impl Tracked {
    /// Returns the wrapped integer.
    pub fn value(&self) -> i32 {
        self.value
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        self.tally.0.clones.set(self.tally.clones() + 1);

        Self {
            value: self.value,
            tally: self.tally.clone(),
        }
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.tally.0.dropped.borrow_mut().push(self.value);
    }
}
