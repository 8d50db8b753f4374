// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::ops::Range;

/// A byte range that does not address valid positions of a [`RichText`](crate::RichText).
///
/// Operations failing with this error leave the text untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    range: Range<usize>,
    text_len: usize,
    split_char: Option<Range<usize>>,
}

impl Error {
    /// Checks that `range` is ordered, lies within `text` and starts and ends between characters.
    pub(crate) fn check(text: &str, range: &Range<usize>) -> Result<(), Self> {
        let fail = |kind, split_char| {
            Err(Self {
                kind,
                range: range.clone(),
                text_len: text.len(),
                split_char,
            })
        };
        if range.start > range.end {
            return fail(ErrorKind::InvalidRange, None);
        }
        if range.end > text.len() {
            return fail(ErrorKind::InvalidBounds, None);
        }
        for index in [range.start, range.end] {
            if !text.is_char_boundary(index) {
                return fail(ErrorKind::NotOnCharBoundary, Some(char_around(text, index)));
            }
        }
        Ok(())
    }

    /// What was wrong with the range.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The rejected range.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Byte length of the text the range was checked against.
    pub fn text_len(&self) -> usize {
        self.text_len
    }

    /// For [`ErrorKind::NotOnCharBoundary`], the bytes of the character an endpoint falls inside.
    pub fn split_char(&self) -> Option<Range<usize>> {
        self.split_char.clone()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Range { start, end } = self.range;
        match (self.kind, &self.split_char) {
            (ErrorKind::InvalidRange, _) => write!(f, "range {start}..{end} is reversed"),
            (ErrorKind::InvalidBounds, _) => {
                write!(f, "range {start}..{end} exceeds text of {} bytes", self.text_len)
            }
            (ErrorKind::NotOnCharBoundary, Some(split)) => write!(
                f,
                "range {start}..{end} splits the character at {}..{}",
                split.start, split.end
            ),
            (ErrorKind::NotOnCharBoundary, None) => {
                write!(f, "range {start}..{end} splits a character")
            }
        }
    }
}

impl core::error::Error for Error {}

/// The category of an [`Error`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The range ends past the end of the text.
    InvalidBounds,
    /// The range starts after it ends.
    InvalidRange,
    /// An endpoint falls inside a multi-byte character.
    NotOnCharBoundary,
}

/// The byte span of the character containing `index`, which is in bounds.
fn char_around(text: &str, index: usize) -> Range<usize> {
    let start = (0..=index)
        .rev()
        .find(|i| text.is_char_boundary(*i))
        .unwrap_or(0);
    let end = (index..=text.len())
        .find(|i| text.is_char_boundary(*i))
        .unwrap_or(text.len());
    start..end
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind};
    use alloc::string::ToString;

    #[test]
    #[expect(
        clippy::reversed_empty_ranges,
        reason = "a reversed range is the case under test"
    )]
    fn ranges_are_checked_in_order() {
        let text = "note";
        assert!(Error::check(text, &(0..0)).is_ok());
        assert!(Error::check(text, &(1..4)).is_ok());
        assert!(Error::check("", &(0..0)).is_ok());

        let err = Error::check(text, &(3..1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRange);
        assert_eq!(err.range(), 3..1);

        let err = Error::check(text, &(2..9)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidBounds);
        assert_eq!(err.text_len(), 4);
        assert_eq!(err.split_char(), None);
    }

    #[test]
    fn split_characters_are_reported() {
        // "ü" occupies bytes 1..3.
        let text = "Zürich";
        let err = Error::check(text, &(2..4)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotOnCharBoundary);
        assert_eq!(err.split_char(), Some(1..3));

        let err = Error::check(text, &(0..2)).unwrap_err();
        assert_eq!(err.split_char(), Some(1..3));
        assert_eq!(
            err.to_string(),
            "range 0..2 splits the character at 1..3"
        );
    }
}
