// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::collections::BTreeSet;

use rich_text::LocationId;

/// Inputs a [`Constraint`](crate::Constraint) may consult besides the run's own attributes.
///
/// `FormattingContext` is a small struct with private fields so it can grow over time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormattingContext {
    pill_locations: BTreeSet<LocationId>,
}

impl FormattingContext {
    /// Creates a context whose location pills are drawn for `pill_locations`.
    pub fn new(pill_locations: BTreeSet<LocationId>) -> Self {
        Self { pill_locations }
    }

    /// The locations that render as pills.
    #[inline]
    pub fn pill_locations(&self) -> &BTreeSet<LocationId> {
        &self.pill_locations
    }

    /// Returns `true` if text referencing `location` renders as a pill.
    #[inline]
    pub fn is_pill(&self, location: &LocationId) -> bool {
        self.pill_locations.contains(location)
    }
}

impl FromIterator<LocationId> for FormattingContext {
    fn from_iter<I: IntoIterator<Item = LocationId>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
