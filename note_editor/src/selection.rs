// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::ops::Range;

use smallvec::{smallvec, SmallVec};

/// Zero or more disjoint byte ranges of the edited text.
///
/// Ranges are kept sorted by start, and overlapping or touching ranges are coalesced. A collapsed
/// range is a caret. A selection with no ranges means nothing is selected; operations on it are
/// no-ops rather than errors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    ranges: SmallVec<[Range<usize>; 1]>,
}

impl Selection {
    /// Nothing selected.
    pub fn none() -> Self {
        Self::default()
    }

    /// A caret at byte `index`.
    pub fn caret(index: usize) -> Self {
        Self::range(index..index)
    }

    /// A single range.
    pub fn range(range: Range<usize>) -> Self {
        Self {
            ranges: smallvec![range],
        }
    }

    /// Any number of ranges, normalized.
    pub fn from_ranges(ranges: impl IntoIterator<Item = Range<usize>>) -> Self {
        let mut out = Self {
            ranges: ranges.into_iter().collect(),
        };
        out.normalize();
        out
    }

    /// The selected ranges, sorted by start.
    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// The caret position, if the selection is exactly one collapsed range.
    pub fn caret_position(&self) -> Option<usize> {
        match self.ranges.as_slice() {
            [range] if range.is_empty() => Some(range.start),
            _ => None,
        }
    }

    /// Returns `true` if the selection is exactly one collapsed range.
    pub fn is_caret(&self) -> bool {
        self.caret_position().is_some()
    }

    /// Sort ranges by start and coalesce overlaps and adjacencies.
    fn normalize(&mut self) {
        self.ranges.sort_by_key(|range| range.start);
        let mut out: SmallVec<[Range<usize>; 1]> = SmallVec::with_capacity(self.ranges.len());
        for range in self.ranges.drain(..) {
            if let Some(last) = out.last_mut() {
                if last.end >= range.start {
                    last.end = last.end.max(range.end);
                    continue;
                }
            }
            out.push(range);
        }
        self.ranges = out;
    }
}
