// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;

use rich_text::{CodecError, LocationId};

use crate::NoteId;

/// Error returned by a [`NoteStore`](crate::NoteStore) or [`LocationStore`](crate::LocationStore).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreError {
    kind: StoreErrorKind,
    detail: String,
}

impl StoreError {
    /// No note is stored under `id`.
    pub fn note_not_found(id: NoteId) -> Self {
        Self {
            kind: StoreErrorKind::NoteNotFound,
            detail: id.to_string(),
        }
    }

    /// No location is stored under `id`.
    pub fn location_not_found(id: &LocationId) -> Self {
        Self {
            kind: StoreErrorKind::LocationNotFound,
            detail: id.to_string(),
        }
    }

    /// The category of this error.
    pub fn kind(&self) -> StoreErrorKind {
        self.kind
    }

    /// The identifier or message this error is about.
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl From<CodecError> for StoreError {
    fn from(err: CodecError) -> Self {
        Self {
            kind: StoreErrorKind::Encode,
            detail: err.to_string(),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            StoreErrorKind::NoteNotFound => write!(f, "note {} not found", self.detail),
            StoreErrorKind::LocationNotFound => write!(f, "location {} not found", self.detail),
            StoreErrorKind::Encode => write!(f, "note content could not be saved: {}", self.detail),
        }
    }
}

impl std::error::Error for StoreError {}

/// The category of a [`StoreError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreErrorKind {
    /// The requested note does not exist.
    NoteNotFound,
    /// The requested location does not exist.
    LocationNotFound,
    /// Note content could not be encoded for saving.
    Encode,
}
