// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::sync::Arc;
use core::sync::atomic::{AtomicUsize, Ordering};

use thiserror::Error;

use crate::try_clone::TryClone;

/// Errors produced when building or copying a [`Budgeted`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BudgetError {
    /// The shared live-instance budget is used up.
    #[error("live instance budget of {limit} exhausted")]
    Exhausted {
        /// The budget's limit.
        limit: usize,
    },

    /// Construction was attempted with [`Budgeted::POISON`].
    #[error("refusing to construct poison value {0}")]
    Poisoned(i32),
}

/// Shared counter of live [`Budgeted`] instances with a hard limit.
///
/// Clones share the same counter.
#[derive(Debug, Clone)]
pub struct LiveBudget {
    live: Arc<AtomicUsize>,
    limit: usize,
}

impl LiveBudget {
    /// Creates a budget allowing at most `limit` live instances.
    pub fn new(limit: usize) -> Self {
        Self {
            live: Arc::new(AtomicUsize::new(0)),
            limit,
        }
    }

    /// Number of instances currently alive.
    pub fn live(&self) -> usize {
        self.live.load(Ordering::Relaxed)
    }

    /// The configured limit.
    pub fn limit(&self) -> usize {
        self.limit
    }

    fn acquire(&self) -> Result<(), BudgetError> {
        if self.live() >= self.limit {
            return Err(BudgetError::Exhausted { limit: self.limit });
        }

        self.live.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn release(&self) {
        self.live.fetch_sub(1, Ordering::Relaxed);
    }
}

/// Integer element whose construction and copy fail deterministically.
///
/// Construction fails for [`Budgeted::POISON`]; construction and copy both fail
/// once the shared [`LiveBudget`] has no room left. Dropping an instance gives
/// its slot back.
#[derive(Debug)]
pub struct Budgeted {
    value: i32,
    budget: LiveBudget,
}

impl Budgeted {
    /// Value that can never be constructed.
    pub const POISON: i32 = 228;

    /// Builds a new instance charged against `budget`.
    ///
    /// # Errors
    ///
    /// [`BudgetError::Poisoned`] for [`Budgeted::POISON`], and
    /// [`BudgetError::Exhausted`] when the budget is used up.
    pub fn new(value: i32, budget: &LiveBudget) -> Result<Self, BudgetError> {
        if value == Self::POISON {
            return Err(BudgetError::Poisoned(value));
        }

        budget.acquire()?;

        Ok(Self {
            value,
            budget: budget.clone(),
        })
    }

    /// Returns the wrapped integer.
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Overwrites the wrapped integer.
    pub fn set_value(&mut self, value: i32) {
        self.value = value;
    }
}

impl TryClone for Budgeted {
    type Error = BudgetError;

    fn try_clone(&self) -> Result<Self, Self::Error> {
        self.budget.acquire()?;

        Ok(Self {
            value: self.value,
            budget: self.budget.clone(),
        })
    }
}

impl PartialEq for Budgeted {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Drop for Budgeted {
    fn drop(&mut self) {
        self.budget.release();
    }
}
