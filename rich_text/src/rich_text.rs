// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;

use crate::{
    AttributeKey, AttributeScope, AttributeSet, AttributeValue, Attributes, Error, Invalidation,
    LocationId, RunBoundary, ScopeRegistry,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Run {
    pub(crate) range: Range<usize>,
    pub(crate) attributes: Attributes,
}

/// Text partitioned into runs, each carrying one [`Attributes`] mapping.
///
/// Runs cover the whole text without gaps or overlaps, are never empty, and no two neighbouring
/// runs carry equal attributes. Every mutation restores these invariants before returning, so
/// run-equality of two values is plain `==`.
///
/// All ranges are **byte indices** into UTF-8 text and must lie on character boundaries.
///
/// ```
/// use rich_text::{AttributeKey, Font, RichText};
///
/// let mut text = RichText::new("Hello world");
/// text.transform(6..11, |attrs| attrs.font = Some(Font::BOLD)).unwrap();
/// assert_eq!(text.runs().len(), 2);
///
/// let seen = text.attributes(0..11).unwrap();
/// assert_eq!(seen.count(AttributeKey::Font), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RichText {
    text: String,
    runs: Vec<Run>,
}

impl RichText {
    /// Creates text carrying no attributes.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_attributes(text, Attributes::default())
    }

    /// Creates text carrying `attributes` throughout.
    pub fn with_attributes(text: impl Into<String>, attributes: Attributes) -> Self {
        let text = text.into();
        let runs = if text.is_empty() {
            Vec::new()
        } else {
            vec![Run {
                range: 0..text.len(),
                attributes,
            }]
        };
        Self { text, runs }
    }

    /// Builds text from runs that are already known to tile `text`.
    pub(crate) fn from_parts(text: String, runs: Vec<Run>) -> Self {
        let mut out = Self { text, runs };
        out.merge_adjacent();
        out
    }

    /// Returns the length of the text, in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns the number of characters in the text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Returns `true` if the text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Borrows the plain text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns `true` if the text ends with a line feed.
    pub fn ends_with_newline(&self) -> bool {
        self.text.ends_with('\n')
    }

    /// Checks that `range` addresses valid byte positions of this text.
    pub fn check_range(&self, range: &Range<usize>) -> Result<(), Error> {
        Error::check(&self.text, range)
    }

    /// Iterates over the runs as `(range, attributes)` pairs, in text order.
    ///
    /// Each call starts a fresh iteration.
    pub fn runs(&self) -> Runs<'_> {
        Runs {
            inner: self.runs.iter(),
        }
    }

    /// The attributes of the run containing the byte at `index`.
    pub fn attributes_at(&self, index: usize) -> Option<&Attributes> {
        self.runs
            .iter()
            .find(|run| run.range.contains(&index))
            .map(|run| &run.attributes)
    }

    /// Collects the distinct values of every key over the runs intersecting `range`.
    ///
    /// A collapsed range intersects no run and yields an empty set. An empty text has no
    /// attributes anywhere, so every range over it yields an empty set.
    pub fn attributes(&self, range: Range<usize>) -> Result<AttributeSet, Error> {
        let mut out = AttributeSet::new();
        if self.is_empty() {
            return Ok(out);
        }
        Error::check(&self.text, &range)?;
        if range.is_empty() {
            return Ok(out);
        }
        for run in &self.runs {
            if run.range.start < range.end && run.range.end > range.start {
                out.insert_attributes(&run.attributes);
            }
        }
        Ok(out)
    }

    /// Replaces the attributes of every run inside `range` with `f` applied to them.
    ///
    /// Runs straddling the range boundaries are split first; neighbours left equal afterwards
    /// are merged. On error the text is left unchanged.
    pub fn transform<F>(&mut self, range: Range<usize>, f: F) -> Result<(), Error>
    where
        F: FnMut(&mut Attributes),
    {
        Error::check(&self.text, &range)?;
        self.transform_unchecked(range, f);
        Ok(())
    }

    /// Applies `f` to the attributes of every run, then merges neighbours left equal.
    pub fn map_attributes<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Attributes),
    {
        for run in &mut self.runs {
            f(&mut run.attributes);
        }
        self.merge_adjacent();
    }

    /// Appends `other`, merging equal runs at the junction.
    pub fn append(&mut self, other: Self) {
        if other.is_empty() {
            return;
        }
        let offset = self.text.len();
        self.text.push_str(&other.text);
        self.runs.extend(other.runs.into_iter().map(|run| Run {
            range: run.range.start + offset..run.range.end + offset,
            attributes: run.attributes,
        }));
        self.merge_adjacent();
        let junction = self.paragraph_range_unchecked(offset..offset);
        self.normalize_paragraphs(junction);
    }

    /// Appends `text` carrying `attributes`.
    pub fn push_str(&mut self, text: &str, attributes: Attributes) {
        self.append(Self::with_attributes(text, attributes));
    }

    /// Replaces the text in `range` with `text` carrying `attributes`.
    ///
    /// This is the text editing path: keys with an [`Invalidation::TextChanged`] condition are
    /// removed from any span the edit lands inside, and paragraph-bounded keys are made uniform
    /// over the paragraphs the edit touched.
    pub fn replace_range(
        &mut self,
        range: Range<usize>,
        text: &str,
        attributes: Attributes,
    ) -> Result<(), Error> {
        Error::check(&self.text, &range)?;
        let mut attributes = attributes;
        if let Some(anchor) = self.paragraph_anchor(&range) {
            for key in AttributeKey::ALL {
                if key.run_boundary() == Some(RunBoundary::Paragraph) && !attributes.contains(key) {
                    attributes.copy_from(key, &anchor);
                }
            }
        }
        self.invalidate(&range);
        self.split_at(range.start);
        self.split_at(range.end);

        let removed = range.len();
        let mut runs = Vec::with_capacity(self.runs.len() + 1);
        let mut inserted = text.is_empty();
        for run in self.runs.drain(..) {
            if run.range.end <= range.start {
                runs.push(run);
                continue;
            }
            if run.range.start >= range.start && run.range.end <= range.end {
                continue;
            }
            if !inserted {
                runs.push(Run {
                    range: range.start..range.start + text.len(),
                    attributes: attributes.clone(),
                });
                inserted = true;
            }
            runs.push(Run {
                range: run.range.start + text.len() - removed..run.range.end + text.len() - removed,
                attributes: run.attributes,
            });
        }
        if !inserted {
            runs.push(Run {
                range: range.start..range.start + text.len(),
                attributes,
            });
        }

        self.text.replace_range(range.clone(), text);
        self.runs = runs;
        self.merge_adjacent();
        let touched = self.paragraph_range_unchecked(range.start..range.start + text.len());
        self.normalize_paragraphs(touched);
        Ok(())
    }

    /// Expands `range` to the paragraphs it touches.
    ///
    /// A paragraph runs up to and including a `\n`, or to the end of the text.
    pub fn paragraph_range(&self, range: Range<usize>) -> Result<Range<usize>, Error> {
        Error::check(&self.text, &range)?;
        Ok(self.paragraph_range_unchecked(range))
    }

    /// The distinct location references present anywhere in the text.
    pub fn location_ids(&self) -> BTreeSet<LocationId> {
        self.runs
            .iter()
            .filter_map(|run| run.attributes.location.clone())
            .collect()
    }

    /// A copy keeping only the keys visible in `scope`.
    #[must_use]
    pub fn restricted_to(&self, registry: &ScopeRegistry, scope: AttributeScope) -> Self {
        let mut out = self.clone();
        for run in &mut out.runs {
            run.attributes.retain(|key| registry.contains(key, scope));
        }
        out.merge_adjacent();
        out
    }

    fn transform_unchecked(&mut self, range: Range<usize>, mut f: impl FnMut(&mut Attributes)) {
        if range.is_empty() {
            return;
        }
        self.split_at(range.start);
        self.split_at(range.end);
        for run in &mut self.runs {
            if run.range.start >= range.start && run.range.end <= range.end {
                f(&mut run.attributes);
            }
        }
        self.merge_adjacent();
    }

    fn split_at(&mut self, offset: usize) {
        let Some(ix) = self
            .runs
            .iter()
            .position(|run| run.range.start < offset && offset < run.range.end)
        else {
            return;
        };
        let head = &mut self.runs[ix];
        let tail = Run {
            range: offset..head.range.end,
            attributes: head.attributes.clone(),
        };
        head.range.end = offset;
        self.runs.insert(ix + 1, tail);
    }

    fn merge_adjacent(&mut self) {
        let mut merged: Vec<Run> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            if run.range.is_empty() {
                continue;
            }
            match merged.last_mut() {
                Some(last)
                    if last.range.end == run.range.start && last.attributes == run.attributes =>
                {
                    last.range.end = run.range.end;
                }
                _ => merged.push(run),
            }
        }
        self.runs = merged;
    }

    fn paragraph_range_unchecked(&self, range: Range<usize>) -> Range<usize> {
        let start = self.text[..range.start].rfind('\n').map_or(0, |i| i + 1);
        let end = if range.end > range.start && self.text[..range.end].ends_with('\n') {
            range.end
        } else {
            self.text[range.end..]
                .find('\n')
                .map_or(self.text.len(), |i| range.end + i + 1)
        };
        start..end
    }

    /// The attributes of the paragraph an edit of `range` lands in.
    ///
    /// Mid-paragraph this is the character before the edit; at a paragraph start it is the
    /// character the edit is followed by.
    fn paragraph_anchor(&self, range: &Range<usize>) -> Option<Attributes> {
        let at_paragraph_start = range.start == 0 || self.text[..range.start].ends_with('\n');
        let index = if at_paragraph_start {
            range.end
        } else {
            range.start - 1
        };
        self.attributes_at(index).cloned()
    }

    /// Gives every paragraph in `range` the paragraph-bounded values of its first character.
    fn normalize_paragraphs(&mut self, range: Range<usize>) {
        let mut start = range.start;
        while start < range.end {
            let end = self.text[start..]
                .find('\n')
                .map_or(self.text.len(), |i| start + i + 1);
            let Some(first) = self.attributes_at(start).cloned() else {
                break;
            };
            self.transform_unchecked(start..end, |attributes| {
                for key in AttributeKey::ALL {
                    if key.run_boundary() == Some(RunBoundary::Paragraph) {
                        attributes.copy_from(key, &first);
                    }
                }
            });
            start = end;
        }
    }

    /// Removes invalidated keys from every span the edit in `edit` lands inside.
    fn invalidate(&mut self, edit: &Range<usize>) {
        for key in AttributeKey::ALL {
            if key.invalidation() != Some(Invalidation::TextChanged) {
                continue;
            }
            for span in self.value_spans(key) {
                let touched = if edit.is_empty() {
                    span.start < edit.start && edit.start < span.end
                } else {
                    span.start < edit.end && span.end > edit.start
                };
                if touched {
                    log::trace!("edit {edit:?} invalidates `{key}` over {span:?}");
                    self.transform_unchecked(span, |attributes| attributes.remove(key));
                }
            }
        }
    }

    /// Maximal spans over which `key` carries one value.
    fn value_spans(&self, key: AttributeKey) -> Vec<Range<usize>> {
        let mut spans = Vec::new();
        let mut open: Option<(Range<usize>, AttributeValue)> = None;
        for run in &self.runs {
            let value = run.attributes.get(key);
            if let (Some((span, open_value)), Some(value)) = (open.as_mut(), value.as_ref()) {
                if open_value == value {
                    span.end = run.range.end;
                    continue;
                }
            }
            if let Some((span, _)) = open.take() {
                spans.push(span);
            }
            open = value.map(|value| (run.range.clone(), value));
        }
        if let Some((span, _)) = open {
            spans.push(span);
        }
        spans
    }
}

impl From<&str> for RichText {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Iterator over the runs of a [`RichText`].
///
/// Created by [`RichText::runs`].
#[derive(Clone, Debug)]
pub struct Runs<'a> {
    inner: core::slice::Iter<'a, Run>,
}

impl<'a> Iterator for Runs<'a> {
    type Item = (Range<usize>, &'a Attributes);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|run| (run.range.clone(), &run.attributes))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Runs<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner
            .next_back()
            .map(|run| (run.range.clone(), &run.attributes))
    }
}

impl ExactSizeIterator for Runs<'_> {}

#[cfg(test)]
mod tests {
    use super::RichText;
    use crate::{
        AttributeKey, AttributeScope, AttributeValue, Attributes, ErrorKind, Font, LocationId,
        ParagraphFormat, ScopeRegistry,
    };
    use alloc::vec::Vec;
    use core::ops::Range;

    fn ranges(text: &RichText) -> Vec<Range<usize>> {
        text.runs().map(|(range, _)| range).collect()
    }

    fn bold() -> Attributes {
        Attributes {
            font: Some(Font::BOLD),
            ..Attributes::default()
        }
    }

    fn pill(id: &str) -> Attributes {
        Attributes {
            location: Some(LocationId::new(id)),
            ..Attributes::default()
        }
    }

    #[test]
    fn empty_text_has_no_runs() {
        let text = RichText::default();
        assert_eq!(text.runs().count(), 0);
        let seen = text.attributes(0..0).unwrap();
        assert!(seen.is_empty());
        assert_eq!(RichText::new("").runs().count(), 0);
    }

    #[test]
    fn transform_splits_and_merges() {
        let mut text = RichText::new("Hello world");
        text.transform(2..8, |a| a.font = Some(Font::BOLD)).unwrap();
        assert_eq!(ranges(&text), [0..2, 2..8, 8..11]);

        text.transform(0..2, |a| a.font = Some(Font::BOLD)).unwrap();
        assert_eq!(ranges(&text), [0..8, 8..11]);

        text.transform(0..11, |a| a.font = None).unwrap();
        assert_eq!(ranges(&text), [0..11]);
    }

    #[test]
    fn transform_reaches_every_fragment() {
        let mut text = RichText::new("abcdef");
        text.transform(1..3, |a| a.font = Some(Font::ITALIC)).unwrap();
        text.transform(3..5, |a| a.font = Some(Font::BOLD)).unwrap();
        text.transform(2..4, |a| {
            a.font = Some(a.font.unwrap_or_default().bold());
        })
        .unwrap();
        let seen = text.attributes(2..4).unwrap();
        let fonts: Vec<_> = seen.fonts().collect();
        assert_eq!(fonts, [Font::BOLD, Font::BOLD_ITALIC]);
        assert_eq!(
            text.attributes_at(1).and_then(|a| a.font),
            Some(Font::ITALIC)
        );
    }

    #[test]
    fn transform_rejects_bad_range_without_change() {
        let mut text = RichText::new("Hello");
        let before = text.clone();
        let err = text.transform(3..9, |a| a.font = Some(Font::BOLD)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidBounds);
        assert_eq!(text, before);
    }

    #[test]
    fn attributes_report_mixed_values() {
        let mut text = RichText::new("abcd");
        text.transform(0..2, |a| a.font = Some(Font::BOLD)).unwrap();
        let seen = text.attributes(0..4).unwrap();
        assert!(!seen.is_mixed(AttributeKey::Font));
        assert_eq!(seen.count(AttributeKey::Font), 1);
        assert!(seen.is_unset(AttributeKey::Underline));

        text.transform(2..4, |a| a.font = Some(Font::ITALIC)).unwrap();
        let seen = text.attributes(1..3).unwrap();
        assert!(seen.is_mixed(AttributeKey::Font));
        assert!(text.attributes(1..1).unwrap().is_empty());
    }

    #[test]
    fn append_merges_equal_junction() {
        let mut text = RichText::with_attributes("ab", bold());
        text.append(RichText::with_attributes("cd", bold()));
        assert_eq!(ranges(&text), [0..4]);

        text.append(RichText::new("ef"));
        assert_eq!(ranges(&text), [0..4, 4..6]);
        assert_eq!(text.as_str(), "abcdef");
    }

    #[test]
    fn append_extends_paragraph_format_over_junction() {
        let heading = Attributes {
            paragraph_format: Some(ParagraphFormat::Heading1),
            ..Attributes::default()
        };
        let mut text = RichText::with_attributes("Title", heading.clone());
        text.append(RichText::new(" more\nbody"));
        assert_eq!(ranges(&text), [0..11, 11..15]);
        assert_eq!(text.attributes_at(8), Some(&heading));
        assert_eq!(text.attributes_at(12), Some(&Attributes::default()));
    }

    #[test]
    fn runs_restart() {
        let mut text = RichText::new("abc");
        text.transform(1..2, |a| a.font = Some(Font::BOLD)).unwrap();
        let first: Vec<_> = text.runs().collect();
        let second: Vec<_> = text.runs().collect();
        assert_eq!(first, second);
        assert_eq!(text.runs().len(), 3);
    }

    #[test]
    fn replace_range_shifts_runs() {
        let mut text = RichText::new("Hello world");
        text.transform(6..11, |a| a.font = Some(Font::BOLD)).unwrap();
        text.replace_range(0..5, "Hi", Attributes::default()).unwrap();
        assert_eq!(text.as_str(), "Hi world");
        assert_eq!(ranges(&text), [0..3, 3..8]);

        text.replace_range(8..8, "!", bold()).unwrap();
        assert_eq!(text.as_str(), "Hi world!");
        assert_eq!(ranges(&text), [0..3, 3..9]);
    }

    #[test]
    fn edit_inside_pill_clears_location() {
        let mut text = RichText::new("at ");
        text.push_str("Cafe", pill("L1"));
        text.push_str(" ok", Attributes::default());
        assert_eq!(ranges(&text), [0..3, 3..7, 7..10]);

        text.replace_range(5..5, "x", Attributes::default()).unwrap();
        assert_eq!(text.as_str(), "at Caxfe ok");
        assert!(text.location_ids().is_empty());
        assert_eq!(ranges(&text), [0..11]);
    }

    #[test]
    fn edit_at_pill_edge_keeps_location() {
        let mut text = RichText::new("at ");
        text.push_str("Cafe", pill("L1"));
        text.replace_range(7..7, "!", Attributes::default()).unwrap();
        text.replace_range(3..3, "@", Attributes::default()).unwrap();
        assert_eq!(text.as_str(), "at @Cafe!");
        let seen = text.attributes(4..8).unwrap();
        assert!(seen.contains(&AttributeValue::Location(LocationId::new("L1"))));
        assert!(!seen.is_mixed(AttributeKey::Location));
    }

    #[test]
    fn paragraph_ranges() {
        let text = RichText::new("one\ntwo\n");
        assert_eq!(text.paragraph_range(1..1).unwrap(), 0..4);
        assert_eq!(text.paragraph_range(0..4).unwrap(), 0..4);
        assert_eq!(text.paragraph_range(2..5).unwrap(), 0..8);
        assert_eq!(text.paragraph_range(8..8).unwrap(), 8..8);
    }

    #[test]
    fn typed_text_joins_its_paragraph_format() {
        let mut text = RichText::new("Title\nbody");
        text.transform(0..6, |a| {
            a.paragraph_format = Some(ParagraphFormat::Heading2);
        })
        .unwrap();
        text.replace_range(5..5, "!", Attributes::default()).unwrap();
        assert_eq!(
            text.attributes_at(5).and_then(|a| a.paragraph_format),
            Some(ParagraphFormat::Heading2)
        );
        // Deleting the line break folds "body" into the heading paragraph.
        text.replace_range(6..7, "", Attributes::default()).unwrap();
        assert_eq!(text.as_str(), "Title!body");
        assert_eq!(ranges(&text), [0..10]);
    }

    #[test]
    fn typing_at_paragraph_start_keeps_its_format() {
        let mut text = RichText::new("body\nTitle");
        text.transform(5..10, |a| {
            a.paragraph_format = Some(ParagraphFormat::Heading1);
        })
        .unwrap();
        text.replace_range(5..5, "A ", Attributes::default()).unwrap();
        assert_eq!(text.as_str(), "body\nA Title");
        assert_eq!(ranges(&text), [0..5, 5..12]);
        assert_eq!(
            text.attributes_at(5).and_then(|a| a.paragraph_format),
            Some(ParagraphFormat::Heading1)
        );
    }

    #[test]
    fn restricting_drops_editing_only_keys() {
        let mut text = RichText::new("ab");
        text.transform(0..1, |a| {
            a.foreground_color = Some(crate::SemanticColor::Primary);
        })
        .unwrap();
        assert_eq!(text.runs().len(), 2);
        let stored = text.restricted_to(&ScopeRegistry::standard(), AttributeScope::Storage);
        assert_eq!(stored, RichText::new("ab"));
    }

    #[test]
    fn counts_characters_not_bytes() {
        let text = RichText::new("café");
        assert_eq!(text.len(), 5);
        assert_eq!(text.char_count(), 4);
        assert_eq!(
            text.attributes(0..4).unwrap_err().kind(),
            ErrorKind::NotOnCharBoundary
        );
    }
}
