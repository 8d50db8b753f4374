// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Note Editor provides selection-scoped editing of rich note content.
//!
//! - [`EditSession`] is the editing controller: selection, typing attributes, formatting toggles,
//!   block and location pill insertion.
//! - [`Note`] and [`Location`] are the edited entities; [`NoteStore`] and [`LocationStore`] are
//!   the persistence collaborators, with [`MemoryStore`] implementing both in memory.
//! - [`Versioned`] and [`resolve`] reconcile a locally edited value with its persisted copy.
//!
//! ## Example
//!
//! ```
//! use note_editor::{EditSession, Location, Note, Selection};
//! use rich_text::{RichText, ScopeRegistry};
//! use rich_text_format::FormattingDefinition;
//!
//! let definition = FormattingDefinition::note(&ScopeRegistry::standard()).unwrap();
//! let note = Note::new("Weekend", RichText::new("Brunch"), chrono::Utc::now());
//! let mut session = EditSession::new(note, definition);
//!
//! session.set_selection(Selection::range(0..6)).unwrap();
//! session.toggle_bold().unwrap();
//! assert!(session.is_bold());
//!
//! session.insert_location_pill(&Location::new("cafe", "Cafe"));
//! assert_eq!(session.text().as_str(), "Brunch Cafe ");
//! ```
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]

mod block_format;
mod clock;
mod error;
mod location;
mod memory;
mod note;
mod selection;
mod session;
mod version;

pub use crate::block_format::BlockFormat;
pub use crate::clock::{Clock, SteppingClock, SystemClock};
pub use crate::error::{StoreError, StoreErrorKind};
pub use crate::location::{Location, LocationStore, NewLocation};
pub use crate::memory::MemoryStore;
pub use crate::note::{Note, NoteId, NoteRecord, NoteStore, NoteSummary};
pub use crate::selection::Selection;
pub use crate::session::{EditSession, Generation, DIVIDER};
pub use crate::version::{resolve, Versioned};
