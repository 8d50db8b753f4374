// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::Cell;

use chrono::{DateTime, TimeDelta, Utc};

/// A source of modification timestamps.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A deterministic clock that advances by a fixed step on every reading.
///
/// Two readings never return the same instant, so edits made in quick succession still order
/// strictly.
#[derive(Clone, Debug)]
pub struct SteppingClock {
    next: Cell<DateTime<Utc>>,
    step: TimeDelta,
}

impl SteppingClock {
    /// A clock whose first reading is `start`.
    pub fn new(start: DateTime<Utc>, step: TimeDelta) -> Self {
        Self {
            next: Cell::new(start),
            step,
        }
    }
}

impl Default for SteppingClock {
    fn default() -> Self {
        Self::new(DateTime::UNIX_EPOCH, TimeDelta::seconds(1))
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let now = self.next.get();
        self.next.set(now + self.step);
        now
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
