// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;

use chrono::{DateTime, Utc};
use rich_text::{LocationId, RichText, StoredText};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Location, StoreError};

/// Identifier of a [`Note`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(Uuid);

impl NoteId {
    /// A fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A note: a title, rich text content and the locations it mentions.
///
/// The content is kept in its persisted encoding until first read.
#[derive(Clone, Debug)]
pub struct Note {
    id: NoteId,
    title: String,
    last_modified: DateTime<Utc>,
    locations: Vec<Location>,
    content: StoredText,
}

impl Note {
    /// A new note with a fresh identifier.
    pub fn new(title: impl Into<String>, content: RichText, now: DateTime<Utc>) -> Self {
        Self {
            id: NoteId::random(),
            title: title.into(),
            last_modified: now,
            locations: Vec::new(),
            content: StoredText::from_value(content),
        }
    }

    /// Rebuilds a note from its persisted form.
    ///
    /// The content is decoded lazily; undecodable content reads as empty text.
    pub fn from_record(record: NoteRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            last_modified: record.last_modified,
            locations: record.locations,
            content: StoredText::new(record.content),
        }
    }

    /// Encodes changed content and returns the persisted form.
    pub fn to_record(&mut self) -> Result<NoteRecord, StoreError> {
        self.content.will_save()?;
        Ok(NoteRecord {
            id: self.id,
            title: self.title.clone(),
            last_modified: self.last_modified,
            locations: self.locations.clone(),
            content: self.content.data().to_vec(),
        })
    }

    /// The note's identifier.
    pub fn id(&self) -> NoteId {
        self.id
    }

    /// The note's title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Renames the note.
    pub fn set_title(&mut self, title: impl Into<String>, now: DateTime<Utc>) {
        self.title = title.into();
        self.last_modified = now;
    }

    /// When the note was last changed.
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    /// The content, decoding it on first access.
    pub fn content(&self) -> &RichText {
        self.content.value()
    }

    /// Replaces the content.
    pub fn set_content(&mut self, content: RichText, now: DateTime<Utc>) {
        self.content.set_value(content);
        self.last_modified = now;
    }

    /// The attached locations, in attachment order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Returns `true` if a location with `id` is attached.
    pub fn has_location(&self, id: &LocationId) -> bool {
        self.locations.iter().any(|location| &location.id == id)
    }

    /// Attaches `location` unless one with the same identifier is already attached.
    ///
    /// Returns whether the location was added.
    pub fn attach_location(&mut self, location: Location) -> bool {
        if self.has_location(&location.id) {
            return false;
        }
        self.locations.push(location);
        true
    }

    /// Detaches the location with `id`, returning it if it was attached.
    pub fn detach_location(&mut self, id: &LocationId) -> Option<Location> {
        let ix = self.locations.iter().position(|location| &location.id == id)?;
        Some(self.locations.remove(ix))
    }

    /// The list entry for this note.
    pub fn summary(&self) -> NoteSummary {
        NoteSummary {
            id: self.id,
            title: self.title.clone(),
            last_modified: self.last_modified,
        }
    }
}

/// The persisted form of a [`Note`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    /// The note's identifier.
    pub id: NoteId,
    /// The note's title.
    pub title: String,
    /// When the note was last changed.
    pub last_modified: DateTime<Utc>,
    /// The attached locations.
    pub locations: Vec<Location>,
    /// The encoded content.
    pub content: Vec<u8>,
}

/// A list entry describing a stored note.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteSummary {
    /// The note's identifier.
    pub id: NoteId,
    /// The note's title.
    pub title: String,
    /// When the note was last changed.
    pub last_modified: DateTime<Utc>,
}

/// Persistence of notes.
pub trait NoteStore {
    /// Loads the note stored under `id`.
    fn load_note(&self, id: NoteId) -> Result<NoteRecord, StoreError>;

    /// Inserts or replaces a note.
    fn save_note(&mut self, record: NoteRecord) -> Result<(), StoreError>;

    /// Deletes a note together with its content and its location attachments.
    ///
    /// The attached [`Location`]s themselves are kept.
    fn delete_note(&mut self, id: NoteId) -> Result<(), StoreError>;

    /// Every stored note, most recently modified first.
    fn list_notes(&self) -> Vec<NoteSummary>;
}

#[cfg(test)]
mod tests {
    use super::{Note, NoteId};
    use crate::Location;
    use chrono::DateTime;
    use rich_text::{LocationId, RichText};

    #[test]
    fn locations_attach_once() {
        let mut note = Note::new("Trip", RichText::default(), DateTime::UNIX_EPOCH);
        assert!(note.attach_location(Location::new("L1", "Cafe")));
        assert!(!note.attach_location(Location::new("L1", "Renamed")));
        assert_eq!(note.locations().len(), 1);
        assert_eq!(note.locations()[0].name, "Cafe");
        assert!(note.detach_location(&LocationId::new("L1")).is_some());
        assert!(note.detach_location(&LocationId::new("L1")).is_none());
    }

    #[test]
    fn record_round_trip_keeps_content() {
        let mut note = Note::new("Trip", RichText::new("hello"), DateTime::UNIX_EPOCH);
        let record = note.to_record().unwrap();
        assert!(!record.content.is_empty());
        let loaded = Note::from_record(record);
        assert_eq!(loaded.id(), note.id());
        assert_eq!(loaded.content(), &RichText::new("hello"));
    }

    #[test]
    fn corrupt_content_loads_empty() {
        let mut note = Note::new("Trip", RichText::new("hello"), DateTime::UNIX_EPOCH);
        let mut record = note.to_record().unwrap();
        record.content = b"\x00\x01".to_vec();
        assert!(Note::from_record(record).content().is_empty());
        assert_ne!(NoteId::random(), NoteId::random());
    }
}
