// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use thiserror::Error;

use crate::try_clone::TryClone;

/// Configurable behaviour for [`Flaky`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlakyBehaviour {
    /// Normal operation: copies succeed.
    #[default]
    None,
    /// Every copy of this instance fails.
    FailAtClone,
}

/// Error returned by a failing [`Flaky`] copy.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Flaky({value}): copy refused")]
pub struct FlakyError {
    /// Value of the instance that refused to be copied.
    pub value: i32,
}

/// Integer element whose copies fail on demand.
///
/// Copies inherit the behaviour of their source.
#[derive(Debug, PartialEq, Eq)]
pub struct Flaky {
    value: i32,
    behaviour: FlakyBehaviour,
}

impl Flaky {
    /// Creates an instance with the given behaviour.
    pub fn new(value: i32, behaviour: FlakyBehaviour) -> Self {
        Self { value, behaviour }
    }

    /// Returns the wrapped integer.
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Changes the behaviour at runtime.
    pub fn change_behaviour(&mut self, behaviour: FlakyBehaviour) {
        self.behaviour = behaviour;
    }
}

impl TryClone for Flaky {
    type Error = FlakyError;

    fn try_clone(&self) -> Result<Self, Self::Error> {
        match self.behaviour {
            FlakyBehaviour::None => Ok(Self {
                value: self.value,
                behaviour: self.behaviour,
            }),
            FlakyBehaviour::FailAtClone => Err(FlakyError { value: self.value }),
        }
    }
}
