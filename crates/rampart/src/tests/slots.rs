// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::raw_buf::RawBuf;
use crate::slots::{Slots, fill, relocate_range};
use crate::test_utils::{Flaky, FlakyBehaviour, FlakyError, Tally};

// =============================================================================
// write(), commit()
// =============================================================================

#[test]
fn test_commit_returns_new_len() {
    let mut buf = RawBuf::<u8>::allocate(4).expect("Failed to allocate(..)");

    let mut slots = Slots::new(&mut buf, 0);
    slots.write(1);
    slots.write(2);
    assert_eq!(slots.remaining(), 2);

    let len = slots.commit();
    assert_eq!(len, 2);

    unsafe {
        assert_eq!(*buf.as_ptr(), 1);
        assert_eq!(*buf.as_ptr().add(1), 2);
    }
}

#[test]
fn test_commit_keeps_elements_alive() {
    let tally = Tally::new();
    let mut buf = RawBuf::allocate(2).expect("Failed to allocate(..)");

    let mut slots = Slots::new(&mut buf, 0);
    slots.write(tally.track(1));
    slots.write(tally.track(2));
    let len = slots.commit();

    assert_eq!(len, 2);
    assert!(tally.dropped().is_empty());

    // Committed elements now belong to the caller.
    unsafe { core::ptr::drop_in_place(core::ptr::slice_from_raw_parts_mut(buf.as_mut_ptr(), len)) };
    assert_eq!(tally.dropped(), [1, 2]);
}

#[test]
fn test_start_offset() {
    let mut buf = RawBuf::<u8>::allocate(4).expect("Failed to allocate(..)");

    let slots = Slots::new(&mut buf, 3);
    assert_eq!(slots.remaining(), 1);
    assert_eq!(slots.commit(), 3);
}

#[test]
#[should_panic(expected = "no uninitialized slot left")]
fn test_write_past_capacity_panics() {
    let mut buf = RawBuf::<u8>::allocate(1).expect("Failed to allocate(..)");

    let mut slots = Slots::new(&mut buf, 0);
    slots.write(1);
    slots.write(2);
}

// =============================================================================
// Drop (rollback)
// =============================================================================

#[test]
fn test_drop_destroys_in_reverse_order() {
    let tally = Tally::new();
    let mut buf = RawBuf::allocate(3).expect("Failed to allocate(..)");

    {
        let mut slots = Slots::new(&mut buf, 0);
        slots.write(tally.track(1));
        slots.write(tally.track(2));
        slots.write(tally.track(3));
    }

    assert_eq!(tally.dropped(), [3, 2, 1]);
}

#[test]
fn test_drop_only_destroys_own_slots() {
    let tally = Tally::new();
    let mut buf = RawBuf::allocate(3).expect("Failed to allocate(..)");

    let mut slots = Slots::new(&mut buf, 0);
    slots.write(tally.track(1));
    let len = slots.commit();

    {
        let mut slots = Slots::new(&mut buf, len);
        slots.write(tally.track(2));
        slots.write(tally.track(3));
    }

    assert_eq!(tally.dropped(), [3, 2]);

    unsafe { core::ptr::drop_in_place(buf.as_mut_ptr()) };
    assert_eq!(tally.dropped(), [3, 2, 1]);
}

// =============================================================================
// construct()
// =============================================================================

#[test]
fn test_construct_copies_source() {
    let tally = Tally::new();
    let source = tally.track(7);
    let mut buf = RawBuf::allocate(1).expect("Failed to allocate(..)");

    let mut slots = Slots::new(&mut buf, 0);
    slots.construct(&source).expect("Failed to construct(..)");
    assert_eq!(tally.clones(), 1);
    drop(slots);

    assert_eq!(tally.dropped(), [7]);
}

#[test]
fn test_construct_failure_leaves_slot_uninitialized() {
    let source = Flaky::new(5, FlakyBehaviour::FailAtClone);
    let mut buf = RawBuf::allocate(1).expect("Failed to allocate(..)");

    let mut slots = Slots::new(&mut buf, 0);
    let result = slots.construct(&source);

    assert_eq!(result, Err(FlakyError { value: 5 }));
    assert_eq!(slots.remaining(), 1);
    assert_eq!(slots.commit(), 0);
}

// =============================================================================
// relocate_range()
// =============================================================================

#[test]
fn test_relocate_range_copies_in_order() {
    let src = [1u32, 2, 3, 4];
    let mut buf = RawBuf::allocate(4).expect("Failed to allocate(..)");

    let mut slots = Slots::new(&mut buf, 0);
    relocate_range(&src, &mut slots).expect("Failed to relocate_range(..)");
    let len = slots.commit();

    let copied = unsafe { core::slice::from_raw_parts(buf.as_ptr(), len) };
    assert_eq!(copied, &src);
}

#[test]
fn test_relocate_range_stops_at_first_failure() {
    let mut src = [
        Flaky::new(1, FlakyBehaviour::None),
        Flaky::new(2, FlakyBehaviour::None),
        Flaky::new(3, FlakyBehaviour::None),
    ];
    src[1].change_behaviour(FlakyBehaviour::FailAtClone);

    let mut buf = RawBuf::allocate(3).expect("Failed to allocate(..)");
    let mut slots = Slots::new(&mut buf, 0);

    let result = relocate_range(&src, &mut slots);

    assert_eq!(result, Err(FlakyError { value: 2 }));
    // Only the first copy was made.
    assert_eq!(slots.remaining(), 2);
}

#[test]
fn test_relocate_range_rolls_back_and_leaves_source_untouched() {
    let tally = Tally::new();
    let src = [tally.track(1), tally.track(2), tally.track(3)];

    let mut buf = RawBuf::allocate(3).expect("Failed to allocate(..)");
    {
        let mut slots = Slots::new(&mut buf, 0);
        relocate_range(&src[..2], &mut slots).expect("Failed to relocate_range(..)");
        // Guard dropped without commit.
    }

    assert_eq!(tally.clones(), 2);
    assert_eq!(tally.dropped(), [2, 1]);
    assert_eq!(src.iter().map(|t| t.value()).collect::<Vec<_>>(), [1, 2, 3]);
}

// =============================================================================
// fill()
// =============================================================================

#[test]
fn test_fill_copies_value() {
    let mut buf = RawBuf::allocate(5).expect("Failed to allocate(..)");

    let mut slots = Slots::new(&mut buf, 0);
    fill(&mut slots, 5, &9u8).expect("Failed to fill(..)");
    let len = slots.commit();

    let filled = unsafe { core::slice::from_raw_parts(buf.as_ptr(), len) };
    assert_eq!(filled, &[9, 9, 9, 9, 9]);
}

#[test]
fn test_fill_zero_count() {
    let mut buf = RawBuf::<u8>::allocate(0).expect("Failed to allocate(..)");

    let mut slots = Slots::new(&mut buf, 0);
    fill(&mut slots, 0, &9u8).expect("Failed to fill(..)");

    assert_eq!(slots.commit(), 0);
}
