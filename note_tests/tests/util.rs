// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::ops::Range;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use note_editor::{Clock, EditSession, Note, SteppingClock};
use rich_text::{Attributes, LocationId, RichText, ScopeRegistry};
use rich_text_format::FormattingDefinition;

pub(crate) fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap()
}

pub(crate) fn definition() -> FormattingDefinition {
    FormattingDefinition::note(&ScopeRegistry::standard()).unwrap()
}

/// A session over a new note, on a clock that ticks one second per reading.
pub(crate) fn session_with(text: RichText) -> EditSession<SteppingClock> {
    let clock = SteppingClock::new(start(), TimeDelta::seconds(1));
    let note = Note::new("test", text, clock.now());
    EditSession::with_clock(note, definition(), clock)
}

pub(crate) fn pill(id: &str) -> Attributes {
    Attributes {
        location: Some(LocationId::new(id)),
        ..Attributes::default()
    }
}

pub(crate) fn run_ranges(text: &RichText) -> Vec<Range<usize>> {
    text.runs().map(|(range, _)| range).collect()
}

/// Asserts that runs tile the text, are non-empty, and never repeat their neighbour's attributes.
pub(crate) fn assert_runs_normalized(text: &RichText) {
    let mut expected = 0;
    let mut previous: Option<&Attributes> = None;
    for (range, attributes) in text.runs() {
        assert_eq!(range.start, expected, "runs must be contiguous");
        assert!(range.end > range.start, "runs must not be empty");
        assert_ne!(previous, Some(attributes), "equal neighbours must be merged");
        expected = range.end;
        previous = Some(attributes);
    }
    assert_eq!(expected, text.len(), "runs must cover the text");
}
