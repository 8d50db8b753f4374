// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The closed attribute vocabulary carried by runs of [`RichText`](crate::RichText).
//!
//! Semantic keys (paragraph format, list format, location references) are authored by the
//! editor. Visual keys (font, decorations, colors) are either toggled directly or derived from the
//! semantic keys by a formatting pipeline. All values are toolkit-neutral tokens; mapping them to
//! concrete fonts and colors is left to a rendering adapter.

use alloc::string::String;
use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one attribute slot of an [`Attributes`] mapping.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttributeKey {
    /// Semantic paragraph format, see [`ParagraphFormat`].
    ParagraphFormat,
    /// Semantic list format, see [`ListFormat`].
    ListFormat,
    /// Reference to a location entity, see [`LocationId`].
    Location,
    /// Font descriptor, see [`Font`].
    Font,
    /// Underline decoration.
    Underline,
    /// Strikethrough decoration.
    Strikethrough,
    /// Derived foreground color.
    ForegroundColor,
    /// Derived background color.
    BackgroundColor,
}

impl AttributeKey {
    /// Every key, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::ParagraphFormat,
        Self::ListFormat,
        Self::Location,
        Self::Font,
        Self::Underline,
        Self::Strikethrough,
        Self::ForegroundColor,
        Self::BackgroundColor,
    ];

    /// The stable name of this key, as used in serialized content.
    pub const fn name(self) -> &'static str {
        match self {
            Self::ParagraphFormat => "paragraphFormat",
            Self::ListFormat => "listFormat",
            Self::Location => "location",
            Self::Font => "font",
            Self::Underline => "underline",
            Self::Strikethrough => "strikethrough",
            Self::ForegroundColor => "foregroundColor",
            Self::BackgroundColor => "backgroundColor",
        }
    }

    /// The boundary a value of this key is constant over, if any.
    pub const fn run_boundary(self) -> Option<RunBoundary> {
        match self {
            Self::ParagraphFormat | Self::ListFormat => Some(RunBoundary::Paragraph),
            _ => None,
        }
    }

    /// Whether text inserted next to a run picks up this key from it.
    pub const fn inherited_by_added_text(self) -> bool {
        !matches!(
            self,
            Self::ParagraphFormat | Self::ListFormat | Self::Location
        )
    }

    /// The edit that removes this key from the span carrying it, if any.
    pub const fn invalidation(self) -> Option<Invalidation> {
        match self {
            Self::Location => Some(Invalidation::TextChanged),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A text boundary that a key's value must be uniform across.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunBoundary {
    /// The value is constant over each paragraph (text up to and including a `\n`).
    Paragraph,
}

/// A condition under which a key is removed from the span carrying it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Invalidation {
    /// Any replacement or insertion inside the span clears the key from the whole span.
    TextChanged,
}

/// The semantic format of a paragraph.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParagraphFormat {
    /// Plain body text.
    #[default]
    Body,
    /// Top level heading.
    Heading1,
    /// Second level heading.
    Heading2,
    /// Third level heading.
    Heading3,
}

impl ParagraphFormat {
    /// Returns `true` for the heading variants.
    pub const fn is_heading(self) -> bool {
        !matches!(self, Self::Body)
    }
}

/// The list format of a paragraph.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListFormat {
    /// Not part of a list.
    #[default]
    None,
    /// Bulleted list item.
    Bullet,
    /// Numbered list item.
    Numbered,
}

/// Opaque identifier of a location entity referenced from text.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(String);

impl LocationId {
    /// Wraps an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LocationId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for LocationId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Relative text size of a [`Font`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FontSize {
    /// Body text size.
    #[default]
    Body,
    /// Slightly emphasized size, used by third level headings.
    Headline,
    /// Medium title size.
    Title3,
    /// Large title size.
    Title2,
}

/// Weight of a [`Font`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FontWeight {
    /// Regular weight.
    #[default]
    Regular,
    /// Medium weight.
    Medium,
    /// Semibold weight.
    Semibold,
    /// Bold weight.
    Bold,
}

/// A toolkit-neutral font descriptor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Font {
    /// Relative size.
    pub size: FontSize,
    /// Weight.
    pub weight: FontWeight,
    /// Whether the font is slanted.
    #[serde(default)]
    pub italic: bool,
}

impl Font {
    /// Body text, regular weight, upright.
    pub const BODY: Self = Self::new(FontSize::Body, FontWeight::Regular, false);
    /// Body text, bold.
    pub const BOLD: Self = Self::new(FontSize::Body, FontWeight::Bold, false);
    /// Body text, italic.
    pub const ITALIC: Self = Self::new(FontSize::Body, FontWeight::Regular, true);
    /// Body text, bold and italic.
    pub const BOLD_ITALIC: Self = Self::new(FontSize::Body, FontWeight::Bold, true);

    /// Creates a font descriptor.
    pub const fn new(size: FontSize, weight: FontWeight, italic: bool) -> Self {
        Self {
            size,
            weight,
            italic,
        }
    }

    /// The body font with the given emphasis, or `None` when neither flag is set.
    pub const fn body(bold: bool, italic: bool) -> Option<Self> {
        match (bold, italic) {
            (true, true) => Some(Self::BOLD_ITALIC),
            (true, false) => Some(Self::BOLD),
            (false, true) => Some(Self::ITALIC),
            (false, false) => None,
        }
    }

    /// Returns `true` if the weight reads as bold (semibold or heavier).
    pub const fn is_bold(self) -> bool {
        matches!(self.weight, FontWeight::Semibold | FontWeight::Bold)
    }

    /// Returns `true` if the font is slanted.
    pub const fn is_italic(self) -> bool {
        self.italic
    }

    /// This font with bold weight.
    #[must_use]
    pub const fn bold(self) -> Self {
        Self {
            weight: FontWeight::Bold,
            ..self
        }
    }

    /// This font with italic slant.
    #[must_use]
    pub const fn italic(self) -> Self {
        Self {
            italic: true,
            ..self
        }
    }
}

/// Style of an underline or strikethrough decoration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineStyle {
    /// A single line.
    #[default]
    Single,
    /// A double line.
    Double,
}

/// A semantic color token resolved by the rendering adapter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SemanticColor {
    /// Primary label color, used for emphasis.
    Primary,
    /// Secondary label color.
    Secondary,
    /// Text color of a location pill.
    PillForeground,
    /// Fill color behind a location pill.
    PillBackground,
}

/// A value for one [`AttributeKey`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttributeValue {
    /// Value of [`AttributeKey::ParagraphFormat`].
    ParagraphFormat(ParagraphFormat),
    /// Value of [`AttributeKey::ListFormat`].
    ListFormat(ListFormat),
    /// Value of [`AttributeKey::Location`].
    Location(LocationId),
    /// Value of [`AttributeKey::Font`].
    Font(Font),
    /// Value of [`AttributeKey::Underline`].
    Underline(LineStyle),
    /// Value of [`AttributeKey::Strikethrough`].
    Strikethrough(LineStyle),
    /// Value of [`AttributeKey::ForegroundColor`].
    ForegroundColor(SemanticColor),
    /// Value of [`AttributeKey::BackgroundColor`].
    BackgroundColor(SemanticColor),
}

impl AttributeValue {
    /// The key this value belongs to.
    pub const fn key(&self) -> AttributeKey {
        match self {
            Self::ParagraphFormat(_) => AttributeKey::ParagraphFormat,
            Self::ListFormat(_) => AttributeKey::ListFormat,
            Self::Location(_) => AttributeKey::Location,
            Self::Font(_) => AttributeKey::Font,
            Self::Underline(_) => AttributeKey::Underline,
            Self::Strikethrough(_) => AttributeKey::Strikethrough,
            Self::ForegroundColor(_) => AttributeKey::ForegroundColor,
            Self::BackgroundColor(_) => AttributeKey::BackgroundColor,
        }
    }
}

/// The attribute mapping of one run: one optional slot per [`AttributeKey`].
///
/// An absent value means the key is unset for the run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attributes {
    /// See [`AttributeKey::ParagraphFormat`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph_format: Option<ParagraphFormat>,
    /// See [`AttributeKey::ListFormat`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_format: Option<ListFormat>,
    /// See [`AttributeKey::Location`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationId>,
    /// See [`AttributeKey::Font`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
    /// See [`AttributeKey::Underline`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<LineStyle>,
    /// See [`AttributeKey::Strikethrough`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<LineStyle>,
    /// See [`AttributeKey::ForegroundColor`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<SemanticColor>,
    /// See [`AttributeKey::BackgroundColor`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<SemanticColor>,
}

impl Attributes {
    /// An empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no key is set.
    pub fn is_empty(&self) -> bool {
        AttributeKey::ALL.iter().all(|key| !self.contains(*key))
    }

    /// Returns `true` if `key` is set.
    pub fn contains(&self, key: AttributeKey) -> bool {
        match key {
            AttributeKey::ParagraphFormat => self.paragraph_format.is_some(),
            AttributeKey::ListFormat => self.list_format.is_some(),
            AttributeKey::Location => self.location.is_some(),
            AttributeKey::Font => self.font.is_some(),
            AttributeKey::Underline => self.underline.is_some(),
            AttributeKey::Strikethrough => self.strikethrough.is_some(),
            AttributeKey::ForegroundColor => self.foreground_color.is_some(),
            AttributeKey::BackgroundColor => self.background_color.is_some(),
        }
    }

    /// The value of `key`, if set.
    pub fn get(&self, key: AttributeKey) -> Option<AttributeValue> {
        match key {
            AttributeKey::ParagraphFormat => {
                self.paragraph_format.map(AttributeValue::ParagraphFormat)
            }
            AttributeKey::ListFormat => self.list_format.map(AttributeValue::ListFormat),
            AttributeKey::Location => self.location.clone().map(AttributeValue::Location),
            AttributeKey::Font => self.font.map(AttributeValue::Font),
            AttributeKey::Underline => self.underline.map(AttributeValue::Underline),
            AttributeKey::Strikethrough => self.strikethrough.map(AttributeValue::Strikethrough),
            AttributeKey::ForegroundColor => {
                self.foreground_color.map(AttributeValue::ForegroundColor)
            }
            AttributeKey::BackgroundColor => {
                self.background_color.map(AttributeValue::BackgroundColor)
            }
        }
    }

    /// Sets the slot of `value`'s key.
    pub fn set(&mut self, value: AttributeValue) {
        match value {
            AttributeValue::ParagraphFormat(v) => self.paragraph_format = Some(v),
            AttributeValue::ListFormat(v) => self.list_format = Some(v),
            AttributeValue::Location(v) => self.location = Some(v),
            AttributeValue::Font(v) => self.font = Some(v),
            AttributeValue::Underline(v) => self.underline = Some(v),
            AttributeValue::Strikethrough(v) => self.strikethrough = Some(v),
            AttributeValue::ForegroundColor(v) => self.foreground_color = Some(v),
            AttributeValue::BackgroundColor(v) => self.background_color = Some(v),
        }
    }

    /// Unsets `key`.
    pub fn remove(&mut self, key: AttributeKey) {
        match key {
            AttributeKey::ParagraphFormat => self.paragraph_format = None,
            AttributeKey::ListFormat => self.list_format = None,
            AttributeKey::Location => self.location = None,
            AttributeKey::Font => self.font = None,
            AttributeKey::Underline => self.underline = None,
            AttributeKey::Strikethrough => self.strikethrough = None,
            AttributeKey::ForegroundColor => self.foreground_color = None,
            AttributeKey::BackgroundColor => self.background_color = None,
        }
    }

    /// Copies the slot for `key` from `other`, unsetting it if `other` has no value.
    pub fn copy_from(&mut self, key: AttributeKey, other: &Self) {
        match other.get(key) {
            Some(value) => self.set(value),
            None => self.remove(key),
        }
    }

    /// Unsets every key for which `keep` returns `false`.
    pub fn retain(&mut self, mut keep: impl FnMut(AttributeKey) -> bool) {
        for key in AttributeKey::ALL {
            if !keep(key) {
                self.remove(key);
            }
        }
    }

    /// The subset of this mapping that newly typed text next to it picks up.
    #[must_use]
    pub fn inherited_by_added_text(&self) -> Self {
        let mut out = self.clone();
        out.retain(AttributeKey::inherited_by_added_text);
        out
    }

    /// Iterates over the set values in key declaration order.
    pub fn iter(&self) -> impl Iterator<Item = AttributeValue> + '_ {
        AttributeKey::ALL.into_iter().filter_map(|key| self.get(key))
    }
}

impl FromIterator<AttributeValue> for Attributes {
    fn from_iter<I: IntoIterator<Item = AttributeValue>>(iter: I) -> Self {
        let mut out = Self::new();
        for value in iter {
            out.set(value);
        }
        out
    }
}
