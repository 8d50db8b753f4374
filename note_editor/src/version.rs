// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use chrono::{DateTime, Utc};

/// A value stamped with the instant it was last modified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Versioned<T> {
    /// The value.
    pub value: T,
    /// When `value` was last written.
    pub modified: DateTime<Utc>,
}

impl<T> Versioned<T> {
    /// Stamps `value` with `modified`.
    pub fn new(value: T, modified: DateTime<Utc>) -> Self {
        Self { value, modified }
    }

    /// Borrows the value, keeping the stamp.
    pub fn borrowed(&self) -> Versioned<&T> {
        Versioned {
            value: &self.value,
            modified: self.modified,
        }
    }
}

/// Picks between a locally edited copy and the persisted copy of the same value.
///
/// The local copy wins ties, so edits are never lost to a save of the same instant.
pub fn resolve<T>(local: Versioned<T>, remote: Versioned<T>) -> Versioned<T> {
    if local.modified >= remote.modified {
        local
    } else {
        remote
    }
}
