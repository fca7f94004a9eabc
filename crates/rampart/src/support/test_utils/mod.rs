// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Element types with controllable failures for exercising rollback paths.

mod budgeted;
mod flaky;
mod tracked;

pub use budgeted::{BudgetError, Budgeted, LiveBudget};
pub use flaky::{Flaky, FlakyBehaviour, FlakyError};
pub use tracked::{Tally, Tracked};
