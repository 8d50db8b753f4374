// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rich_text::LocationId;
use uuid::Uuid;

use crate::{
    Location, LocationStore, NewLocation, NoteId, NoteRecord, NoteStore, NoteSummary, StoreError,
};

#[derive(Clone, Debug)]
struct NoteRow {
    title: String,
    last_modified: DateTime<Utc>,
}

/// An in-memory [`NoteStore`] and [`LocationStore`].
///
/// Notes, their content, locations and note to location attachments are kept in separate
/// tables, so deleting a note removes its content and attachments but never a location.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    notes: BTreeMap<NoteId, NoteRow>,
    contents: BTreeMap<NoteId, Vec<u8>>,
    locations: BTreeMap<LocationId, Location>,
    attachments: Vec<(NoteId, LocationId)>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of stored notes.
    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    /// The number of stored locations.
    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    /// Returns `true` if content is stored for `id`.
    pub fn has_content(&self, id: NoteId) -> bool {
        self.contents.contains_key(&id)
    }

    /// The locations attached to `id`, in attachment order.
    pub fn attached_location_ids(&self, id: NoteId) -> Vec<LocationId> {
        self.attachments
            .iter()
            .filter(|(note, _)| *note == id)
            .map(|(_, location)| location.clone())
            .collect()
    }
}

impl NoteStore for MemoryStore {
    fn load_note(&self, id: NoteId) -> Result<NoteRecord, StoreError> {
        let row = self.notes.get(&id).ok_or_else(|| StoreError::note_not_found(id))?;
        let locations = self
            .attached_location_ids(id)
            .iter()
            .filter_map(|location| self.locations.get(location).cloned())
            .collect();
        Ok(NoteRecord {
            id,
            title: row.title.clone(),
            last_modified: row.last_modified,
            locations,
            content: self.contents.get(&id).cloned().unwrap_or_default(),
        })
    }

    fn save_note(&mut self, record: NoteRecord) -> Result<(), StoreError> {
        let id = record.id;
        log::debug!("saving note {id} ({} content bytes)", record.content.len());
        self.notes.insert(
            id,
            NoteRow {
                title: record.title,
                last_modified: record.last_modified,
            },
        );
        self.contents.insert(id, record.content);
        self.attachments.retain(|(note, _)| *note != id);
        for location in record.locations {
            self.attachments.push((id, location.id.clone()));
            self.locations.insert(location.id.clone(), location);
        }
        Ok(())
    }

    fn delete_note(&mut self, id: NoteId) -> Result<(), StoreError> {
        if self.notes.remove(&id).is_none() {
            return Err(StoreError::note_not_found(id));
        }
        self.contents.remove(&id);
        self.attachments.retain(|(note, _)| *note != id);
        log::debug!("deleted note {id}");
        Ok(())
    }

    fn list_notes(&self) -> Vec<NoteSummary> {
        let mut out: Vec<_> = self
            .notes
            .iter()
            .map(|(id, row)| NoteSummary {
                id: *id,
                title: row.title.clone(),
                last_modified: row.last_modified,
            })
            .collect();
        out.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
        out
    }
}

impl LocationStore for MemoryStore {
    fn create_location(&mut self, location: NewLocation) -> LocationId {
        let id = LocationId::new(Uuid::new_v4().to_string());
        self.locations
            .insert(id.clone(), location.with_id(id.clone()));
        id
    }

    fn location(&self, id: &LocationId) -> Result<Location, StoreError> {
        self.locations
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::location_not_found(id))
    }

    fn search_locations(&self, query: &str) -> Vec<Location> {
        let query = query.to_lowercase();
        let mut out: Vec<_> = self
            .locations
            .values()
            .filter(|location| location.name.to_lowercase().contains(&query))
            .cloned()
            .collect();
        out.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStore;
    use crate::{LocationStore, NewLocation, Note, NoteStore, StoreErrorKind};
    use chrono::{DateTime, TimeDelta};
    use rich_text::{LocationId, RichText};

    #[test]
    fn search_is_case_insensitive_and_sorted() {
        let mut store = MemoryStore::new();
        store.create_location(NewLocation::named("Zoo Cafe"));
        store.create_location(NewLocation::named("cafe Luna"));
        store.create_location(NewLocation::named("Harbour"));

        let names: Vec<_> = store
            .search_locations("CAFE")
            .into_iter()
            .map(|location| location.name)
            .collect();
        assert_eq!(names, ["Zoo Cafe", "cafe Luna"]);
        assert_eq!(store.search_locations("").len(), 3);
    }

    #[test]
    fn missing_entities_are_reported() {
        let store = MemoryStore::new();
        let err = store.location(&LocationId::new("nope")).unwrap_err();
        assert_eq!(err.kind(), StoreErrorKind::LocationNotFound);
        let note = Note::new("x", RichText::default(), DateTime::UNIX_EPOCH);
        let err = store.load_note(note.id()).unwrap_err();
        assert_eq!(err.kind(), StoreErrorKind::NoteNotFound);
    }

    #[test]
    fn list_is_most_recent_first() {
        let mut store = MemoryStore::new();
        let t0 = DateTime::UNIX_EPOCH;
        let mut older = Note::new("older", RichText::default(), t0);
        let mut newer = Note::new("newer", RichText::default(), t0 + TimeDelta::hours(1));
        store.save_note(older.to_record().unwrap()).unwrap();
        store.save_note(newer.to_record().unwrap()).unwrap();
        let titles: Vec<_> = store
            .list_notes()
            .into_iter()
            .map(|summary| summary.title)
            .collect();
        assert_eq!(titles, ["newer", "older"]);
    }
}
