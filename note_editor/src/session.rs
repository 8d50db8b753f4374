// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection-scoped editing of one note.
//!
//! An [`EditSession`] owns a [`Note`], a locally edited copy of its content and a [`Selection`].
//! Every query and toggle is scoped to the selection: ranges consult the text they cover, carets
//! consult the typing attributes that newly typed text will carry.
//!
//! Each mutation produces a new document, re-derives its visual attributes with the session's
//! [`FormattingDefinition`], writes it to the note and the local copy, and bumps the
//! [`Generation`].
//!
//! The note may also be replaced from outside the session (for example by another editor saving
//! the same note). [`EditSession::text`] reconciles the two copies by modification time, with
//! local edits winning ties.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::ops::Range;

use chrono::{DateTime, Utc};
use rich_text::{
    AttributeKey, AttributeSet, AttributeValue, Attributes, Error, Font, LineStyle, LocationId,
    ParagraphFormat, RichText, SemanticColor,
};
use rich_text_format::{FormattingContext, FormattingDefinition};

use crate::{
    resolve, BlockFormat, Clock, Location, Note, NoteId, NoteStore, Selection, StoreError,
    SystemClock, Versioned,
};

/// Opaque version token of an edited document.
///
/// Obtained from [`EditSession::generation`].
// Generations are only compared for equality, so wrapping is fine.
#[derive(PartialEq, Eq, Default, Clone, Copy, Debug)]
pub struct Generation(u32);

impl Generation {
    /// Make it not what it currently is.
    pub(crate) fn nudge(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}

/// Text drawn as a horizontal divider.
pub const DIVIDER: &str = "———";

/// Editing state for one note.
#[derive(Debug)]
pub struct EditSession<C: Clock = SystemClock> {
    note: Note,
    edited: Versioned<RichText>,
    selection: Selection,
    typing_attributes: Attributes,
    ghost_placeholder: Option<&'static str>,
    definition: FormattingDefinition,
    clock: C,
    generation: Generation,
    location_ids: RefCell<Option<(Generation, BTreeSet<LocationId>)>>,
}

impl EditSession<SystemClock> {
    /// Starts editing `note`, stamping edits with the system clock.
    pub fn new(note: Note, definition: FormattingDefinition) -> Self {
        Self::with_clock(note, definition, SystemClock)
    }
}

impl<C: Clock> EditSession<C> {
    /// Starts editing `note`, stamping edits with `clock`.
    pub fn with_clock(note: Note, definition: FormattingDefinition, clock: C) -> Self {
        let mut session = Self {
            edited: Versioned::new(note.content().clone(), note.last_modified()),
            note,
            selection: Selection::none(),
            typing_attributes: Attributes::default(),
            ghost_placeholder: None,
            definition,
            clock,
            generation: Generation(1),
            location_ids: RefCell::new(None),
        };
        let mut text = session.edited.value.clone();
        session.format(&mut text);
        session.edited.value = text;
        session
    }

    /// Loads the note stored under `id` and starts editing it.
    ///
    /// Content that cannot be decoded loads as an empty document.
    pub fn open(
        store: &impl NoteStore,
        id: NoteId,
        definition: FormattingDefinition,
        clock: C,
    ) -> Result<Self, StoreError> {
        let record = store.load_note(id)?;
        log::debug!("opening note {id}");
        Ok(Self::with_clock(Note::from_record(record), definition, clock))
    }

    /// Writes the note to `store`, encoding its content only if it changed.
    ///
    /// The saved content is [`text`](Self::text): local edits replace an external copy that is
    /// not newer than them.
    pub fn save(&mut self, store: &mut impl NoteStore) -> Result<(), StoreError> {
        if self.local_wins() && self.note.content() != &self.edited.value {
            log::debug!("restoring local edits over an older copy of note {}", self.note.id());
            self.note.set_content(self.edited.value.clone(), self.edited.modified);
        }
        let record = self.note.to_record()?;
        store.save_note(record)
    }

    /// The note being edited.
    pub fn note(&self) -> &Note {
        &self.note
    }

    /// Ends the session, returning the note.
    pub fn into_note(self) -> Note {
        self.note
    }

    /// The current document: the newer of the local copy and the note's content.
    pub fn text(&self) -> &RichText {
        let persisted = Versioned::new(self.note.content(), self.note.last_modified());
        resolve(self.edited.borrowed(), persisted).value
    }

    /// Replaces the document.
    ///
    /// The text is reformatted, written to the note and the local copy, and any ghost
    /// placeholder is cleared.
    pub fn set_text(&mut self, text: RichText) {
        self.commit(text);
        self.ghost_placeholder = None;
    }

    /// Records that the note's content was replaced from outside this session at `modified`.
    ///
    /// [`text`](Self::text) prefers the external copy only if it is strictly newer than the
    /// last local edit.
    pub fn receive_external_save(&mut self, content: RichText, modified: DateTime<Utc>) {
        let mut content = content;
        self.format(&mut content);
        self.note.set_content(content, modified);
        self.generation.nudge();
    }

    /// Renames the note.
    pub fn set_title(&mut self, title: impl Into<String>) {
        let local_wins = self.local_wins();
        let now = self.clock.now();
        self.note.set_title(title, now);
        // Renaming must not make an older external copy look newer than the local edits.
        if local_wins {
            self.edited.modified = now;
        }
    }

    /// The current document version.
    ///
    /// Compare generations to decide whether derived data needs recomputing.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// The current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Selects `selection`.
    ///
    /// Every range must address valid positions of [`text`](Self::text). Placing a caret picks
    /// up the typing attributes of the character before it.
    pub fn set_selection(&mut self, selection: Selection) -> Result<(), Error> {
        let text = self.text();
        for range in selection.ranges() {
            text.check_range(range)?;
        }
        self.selection = selection;
        self.refresh_typing_attributes();
        Ok(())
    }

    /// The attributes text typed at a caret will carry.
    pub fn typing_attributes(&self) -> &Attributes {
        &self.typing_attributes
    }

    /// Placeholder text shown in a newly started, still empty block.
    pub fn ghost_placeholder(&self) -> Option<&'static str> {
        self.ghost_placeholder
    }

    /// Replaces every selected range with `text` and places a caret after each insertion.
    ///
    /// Text typed at a caret carries the typing attributes. Text replacing a range carries the
    /// inheritable attributes of the range's first character.
    pub fn type_text(&mut self, text: &str) -> Result<(), Error> {
        if self.selection.is_empty() {
            return Ok(());
        }
        let ranges: Vec<Range<usize>> = self.selection.ranges().to_vec();
        let mut document = self.text().clone();
        for range in ranges.iter().rev() {
            let attributes = if range.is_empty() {
                self.typing_attributes.clone()
            } else {
                document
                    .attributes_at(range.start)
                    .map(typed_next_to)
                    .unwrap_or_default()
            };
            document.replace_range(range.clone(), text, attributes)?;
        }

        let mut inserted = 0;
        let mut removed = 0;
        let carets = ranges.iter().map(|range| {
            let caret = range.start + inserted + text.len() - removed;
            inserted += text.len();
            removed += range.len();
            caret..caret
        });
        let selection = Selection::from_ranges(carets.collect::<Vec<_>>());

        log::debug!(
            "typed {} bytes into {} ranges",
            text.len(),
            selection.ranges().len()
        );
        self.set_text(document);
        self.selection = selection;
        self.refresh_typing_attributes();
        Ok(())
    }

    /// Returns `true` if any selected text is bold.
    pub fn is_bold(&self) -> bool {
        self.selected_attributes()
            .is_some_and(|set| set.fonts().any(Font::is_bold))
    }

    /// Returns `true` if any selected text is italic.
    pub fn is_italic(&self) -> bool {
        self.selected_attributes()
            .is_some_and(|set| set.fonts().any(Font::is_italic))
    }

    /// Returns `true` if any selected text is underlined.
    pub fn is_underline(&self) -> bool {
        self.selected_attributes()
            .is_some_and(|set| set.contains(&AttributeValue::Underline(LineStyle::Single)))
    }

    /// Returns `true` if any selected text is struck through.
    pub fn is_strikethrough(&self) -> bool {
        self.selected_attributes().is_some_and(|set| {
            set.contains(&AttributeValue::Strikethrough(LineStyle::Single))
        })
    }

    /// Makes the selection bold, or removes bold if any of it already is.
    ///
    /// Italic is kept either way.
    pub fn toggle_bold(&mut self) -> Result<(), Error> {
        let bold = !self.is_bold();
        self.transform_selection(|attributes| {
            if bold {
                attributes.font = Some(attributes.font.unwrap_or_default().bold());
            } else {
                let italic = attributes.font.is_some_and(Font::is_italic);
                attributes.font = Font::body(false, italic);
            }
        })
    }

    /// Makes the selection italic, or removes italic if any of it already is.
    ///
    /// Bold is kept either way.
    pub fn toggle_italic(&mut self) -> Result<(), Error> {
        let italic = !self.is_italic();
        self.transform_selection(|attributes| {
            if italic {
                attributes.font = Some(attributes.font.unwrap_or_default().italic());
            } else {
                let bold = attributes.font.is_some_and(Font::is_bold);
                attributes.font = Font::body(bold, false);
            }
        })
    }

    /// Underlines the selection, or removes the underline if any of it already has one.
    pub fn toggle_underline(&mut self) -> Result<(), Error> {
        let underline = !self.is_underline();
        self.transform_selection(|attributes| {
            attributes.underline = underline.then_some(LineStyle::Single);
        })
    }

    /// Strikes the selection through, or removes the strikethrough if any of it already has one.
    pub fn toggle_strikethrough(&mut self) -> Result<(), Error> {
        let strikethrough = !self.is_strikethrough();
        self.transform_selection(|attributes| {
            attributes.strikethrough = strikethrough.then_some(LineStyle::Single);
        })
    }

    /// The paragraph format of the selection.
    ///
    /// A mixed selection reports the highest heading level it contains.
    pub fn paragraph_format(&self) -> ParagraphFormat {
        let Some(set) = self.selected_attributes() else {
            return ParagraphFormat::Body;
        };
        [
            ParagraphFormat::Heading1,
            ParagraphFormat::Heading2,
            ParagraphFormat::Heading3,
        ]
        .into_iter()
        .find(|format| set.contains(&AttributeValue::ParagraphFormat(*format)))
        .unwrap_or(ParagraphFormat::Body)
    }

    /// Sets the paragraph format of every paragraph the selection touches.
    ///
    /// At a caret the format also becomes part of the typing attributes, so it applies to a
    /// paragraph that has no characters yet.
    pub fn set_paragraph_format(&mut self, format: ParagraphFormat) -> Result<(), Error> {
        if self.selection.is_empty() {
            return Ok(());
        }
        let mut text = self.text().clone();
        let mut changed = false;
        for range in self.selection.ranges() {
            let paragraphs = text.paragraph_range(range.clone())?;
            if range.is_empty() {
                self.typing_attributes.paragraph_format = Some(format);
            }
            if !paragraphs.is_empty() {
                text.transform(paragraphs, |attributes| {
                    attributes.paragraph_format = Some(format);
                })?;
                changed = true;
            }
        }
        if changed {
            self.set_text(text);
        }
        Ok(())
    }

    /// Appends a pill referencing `location` to the end of the document and attaches the
    /// location to the note.
    pub fn insert_location_pill(&mut self, location: &Location) {
        let mut text = self.text().clone();
        text.push_str(" ", Attributes::default());
        text.push_str(
            &location.name,
            Attributes {
                location: Some(location.id.clone()),
                ..Attributes::default()
            },
        );
        text.push_str(" ", Attributes::default());
        if self.note.attach_location(location.clone()) {
            log::debug!("attached location {} to note {}", location.id, self.note.id());
        }
        self.set_text(text);
    }

    /// Starts a new block at the end of the document.
    ///
    /// A divider is appended as a line of its own. Any other block moves the caret to a new
    /// empty paragraph at the end, gives it the block's paragraph format and shows the block's
    /// placeholder.
    pub fn insert_block_format(&mut self, block: BlockFormat) -> Result<(), Error> {
        let mut text = self.text().clone();
        let Some(format) = block.paragraph_format() else {
            if !text.is_empty() && !text.ends_with_newline() {
                text.push_str("\n", Attributes::default());
            }
            text.push_str(
                DIVIDER,
                Attributes {
                    foreground_color: Some(SemanticColor::Secondary),
                    ..Attributes::default()
                },
            );
            text.push_str("\n", Attributes::default());
            self.set_text(text);
            return Ok(());
        };

        if !text.ends_with_newline() {
            text.push_str("\n", Attributes::default());
            self.set_text(text);
        }
        self.selection = Selection::caret(self.text().len());
        self.refresh_typing_attributes();
        self.set_paragraph_format(format)?;
        self.ghost_placeholder = block.placeholder();
        Ok(())
    }

    /// The distinct locations referenced from the current document.
    ///
    /// The result is cached until the next change of [`generation`](Self::generation).
    pub fn location_ids_from_content(&self) -> BTreeSet<LocationId> {
        let mut cache = self.location_ids.borrow_mut();
        if let Some((generation, ids)) = &*cache {
            if *generation == self.generation {
                return ids.clone();
            }
        }
        let ids = self.text().location_ids();
        *cache = Some((self.generation, ids.clone()));
        ids
    }

    /// Attaches `location` to the note and reformats, returning whether it was added.
    pub fn attach_location(&mut self, location: Location) -> bool {
        let added = self.note.attach_location(location);
        if added {
            self.commit(self.text().clone());
        }
        added
    }

    /// Detaches the location with `id` from the note and reformats.
    pub fn detach_location(&mut self, id: &LocationId) -> Option<Location> {
        let removed = self.note.detach_location(id)?;
        self.commit(self.text().clone());
        Some(removed)
    }

    /// The locations that render as pills: referenced from `text` and attached to the note.
    fn pill_context(&self, text: &RichText) -> FormattingContext {
        let referenced = text.location_ids();
        let context: FormattingContext = referenced
            .iter()
            .filter(|id| self.note.has_location(id))
            .cloned()
            .collect();
        log::debug!(
            "{} of {} referenced locations are attached",
            context.pill_locations().len(),
            referenced.len()
        );
        context
    }

    fn local_wins(&self) -> bool {
        self.edited.modified >= self.note.last_modified()
    }

    fn format(&self, text: &mut RichText) {
        let context = self.pill_context(text);
        self.definition.apply(text, &context);
    }

    fn commit(&mut self, text: RichText) {
        let mut text = text;
        self.format(&mut text);
        let now = self.clock.now();
        self.note.set_content(text.clone(), now);
        self.edited = Versioned::new(text, now);
        self.generation.nudge();
    }

    /// Applies `f` to the selected text, or to the typing attributes at a caret.
    fn transform_selection(&mut self, mut f: impl FnMut(&mut Attributes)) -> Result<(), Error> {
        if self.selection.is_empty() {
            return Ok(());
        }
        let mut text = self.text().clone();
        let mut changed = false;
        for range in self.selection.ranges() {
            if range.is_empty() {
                f(&mut self.typing_attributes);
            } else {
                text.transform(range.clone(), &mut f)?;
                changed = true;
            }
        }
        if changed {
            self.set_text(text);
        }
        Ok(())
    }

    /// The attribute values over the selection, or `None` when nothing is selected.
    fn selected_attributes(&self) -> Option<AttributeSet> {
        if self.selection.is_empty() {
            return None;
        }
        let text = self.text();
        let mut out = AttributeSet::new();
        for range in self.selection.ranges() {
            if range.is_empty() {
                out.insert_attributes(&self.caret_attributes(range.start));
                continue;
            }
            match text.attributes(range.clone()) {
                Ok(set) => out.extend(set),
                Err(err) => log::debug!("ignoring stale selection range: {err}"),
            }
        }
        Some(out)
    }

    /// The typing attributes, completed with the paragraph format of the caret's paragraph.
    fn caret_attributes(&self, caret: usize) -> Attributes {
        let mut out = self.typing_attributes.clone();
        if !out.contains(AttributeKey::ParagraphFormat) {
            let text = self.text();
            let at_paragraph_start =
                caret == 0 || text.as_str().as_bytes().get(caret - 1) == Some(&b'\n');
            let anchor = if at_paragraph_start {
                text.attributes_at(caret)
            } else {
                text.attributes_at(caret - 1)
            };
            out.paragraph_format = anchor.and_then(|attributes| attributes.paragraph_format);
        }
        out
    }

    fn refresh_typing_attributes(&mut self) {
        let Some(caret) = self.selection.caret_position() else {
            return;
        };
        let text = self.text();
        self.typing_attributes = caret
            .checked_sub(1)
            .and_then(|before| text.attributes_at(before))
            .map(typed_next_to)
            .unwrap_or_default();
    }
}

/// The attributes text typed next to a run with `attributes` picks up.
fn typed_next_to(attributes: &Attributes) -> Attributes {
    let mut out = attributes.inherited_by_added_text();
    // Heading fonts follow the paragraph format rather than the run.
    if attributes
        .paragraph_format
        .is_some_and(ParagraphFormat::is_heading)
    {
        out.font = None;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::EditSession;
    use crate::{Clock, Note, Selection, SteppingClock};
    use rich_text::{Attributes, Font, ParagraphFormat, RichText, ScopeRegistry};
    use rich_text_format::FormattingDefinition;

    fn session(text: RichText) -> EditSession<SteppingClock> {
        let clock = SteppingClock::default();
        let note = Note::new("test", text, clock.now());
        let definition = FormattingDefinition::note(&ScopeRegistry::standard()).unwrap();
        EditSession::with_clock(note, definition, clock)
    }

    #[test]
    fn no_selection_is_a_no_op() {
        let mut session = session(RichText::new("Hello"));
        let generation = session.generation();
        session.toggle_bold().unwrap();
        session.type_text("x").unwrap();
        session.set_paragraph_format(ParagraphFormat::Heading1).unwrap();
        assert!(!session.is_bold());
        assert_eq!(session.paragraph_format(), ParagraphFormat::Body);
        assert_eq!(session.generation(), generation);
        assert_eq!(session.text().as_str(), "Hello");
    }

    #[test]
    fn caret_toggles_change_typing_attributes_only() {
        let mut session = session(RichText::new("Hello"));
        session.set_selection(Selection::caret(5)).unwrap();
        let generation = session.generation();
        session.toggle_bold().unwrap();
        assert!(session.is_bold());
        assert_eq!(session.generation(), generation);
        assert_eq!(session.typing_attributes().font, Some(Font::BOLD));

        session.type_text("!").unwrap();
        assert_ne!(session.generation(), generation);
        assert_eq!(session.text().attributes_at(5).unwrap().font, Some(Font::BOLD));
        assert_eq!(session.selection().caret_position(), Some(6));
    }

    #[test]
    fn toggles_compose_bold_and_italic() {
        let mut session = session(RichText::new("Hello"));
        session.set_selection(Selection::range(0..5)).unwrap();
        session.toggle_bold().unwrap();
        session.toggle_italic().unwrap();
        assert_eq!(
            session.text().attributes_at(0).unwrap().font,
            Some(Font::BOLD_ITALIC)
        );
        session.toggle_bold().unwrap();
        assert!(!session.is_bold());
        assert!(session.is_italic());
        session.toggle_italic().unwrap();
        assert_eq!(session.text().attributes_at(0), Some(&Attributes::default()));
    }

    #[test]
    fn out_of_bounds_selection_is_rejected() {
        let mut session = session(RichText::new("Hello"));
        assert!(session.set_selection(Selection::range(2..9)).is_err());
        assert!(session.selection().is_empty());
    }
}
