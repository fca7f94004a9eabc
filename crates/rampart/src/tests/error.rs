// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::format;

use crate::error::{AllocError, OutOfRange, SequenceError};
use crate::test_utils::{BudgetError, FlakyError};

#[test]
fn test_alloc_error_display() {
    assert_eq!(
        format!("{}", AllocError::CapacityOverflow),
        "capacity overflow: requested storage exceeds isize::MAX bytes"
    );
    assert_eq!(
        format!("{}", AllocError::OutOfMemory { capacity: 64 }),
        "out of memory: could not allocate storage for 64 elements"
    );
}

#[test]
fn test_out_of_range_display() {
    let err = OutOfRange { index: 7, len: 3 };
    assert_eq!(
        format!("{err}"),
        "index 7 is out of range for sequence of length 3"
    );
}

#[test]
fn test_sequence_error_from_alloc_error() {
    let err: SequenceError<FlakyError> = AllocError::CapacityOverflow.into();

    assert_eq!(err, SequenceError::Alloc(AllocError::CapacityOverflow));
    assert!(!err.is_element());
    assert_eq!(err.into_element(), None);
}

#[test]
fn test_sequence_error_element() {
    let err = SequenceError::Element(BudgetError::Poisoned(228));

    assert!(err.is_element());
    assert_eq!(err.into_element(), Some(BudgetError::Poisoned(228)));
}

#[test]
fn test_sequence_error_display() {
    let alloc: SequenceError<FlakyError> = SequenceError::Alloc(AllocError::OutOfMemory { capacity: 2 });
    assert_eq!(
        format!("{alloc}"),
        "AllocError: out of memory: could not allocate storage for 2 elements"
    );

    let element = SequenceError::Element(FlakyError { value: 5 });
    assert_eq!(
        format!("{element}"),
        "element construction failed: Flaky(5): copy refused"
    );
}

#[test]
fn test_budget_error_display() {
    assert_eq!(
        format!("{}", BudgetError::Exhausted { limit: 200 }),
        "live instance budget of 200 exhausted"
    );
    assert_eq!(
        format!("{}", BudgetError::Poisoned(228)),
        "refusing to construct poison value 228"
    );
}
