// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The constraints making up the note formatting pipeline.

use rich_text::{
    AttributeKey, AttributeValue, Attributes, Font, FontSize, FontWeight, ParagraphFormat,
    SemanticColor,
};

use crate::{Constraint, Derived, FormattingContext};

/// Maps paragraph formats and manual emphasis onto a fixed set of fonts.
///
/// Headings get their level's font regardless of manual bold or italic. Body text keeps only
/// its bold and italic flags, on the body size.
#[derive(Clone, Copy, Debug, Default)]
pub struct NormalizeFonts;

impl NormalizeFonts {
    /// The font used for a heading level, or `None` for body text.
    pub const fn heading_font(format: ParagraphFormat) -> Option<Font> {
        match format {
            ParagraphFormat::Heading1 => Some(Font::new(FontSize::Title2, FontWeight::Bold, false)),
            ParagraphFormat::Heading2 => {
                Some(Font::new(FontSize::Title3, FontWeight::Semibold, false))
            }
            ParagraphFormat::Heading3 => {
                Some(Font::new(FontSize::Headline, FontWeight::Medium, false))
            }
            ParagraphFormat::Body => None,
        }
    }
}

impl Constraint for NormalizeFonts {
    fn name(&self) -> &'static str {
        "normalize-fonts"
    }

    fn key(&self) -> AttributeKey {
        AttributeKey::Font
    }

    fn reads(&self) -> &'static [AttributeKey] {
        &[AttributeKey::ParagraphFormat, AttributeKey::Font]
    }

    fn constrain(&self, attributes: &Attributes, _: &FormattingContext) -> Derived {
        let format = attributes.paragraph_format.unwrap_or_default();
        if let Some(font) = Self::heading_font(format) {
            return Derived::Set(AttributeValue::Font(font));
        }
        let Some(font) = attributes.font else {
            return Derived::Unchanged;
        };
        match Font::body(font.is_bold(), font.is_italic()) {
            Some(font) => Derived::Set(AttributeValue::Font(font)),
            None => Derived::Cleared,
        }
    }
}

/// Gives headings and bold body text the primary foreground color.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeadingColor;

impl Constraint for HeadingColor {
    fn name(&self) -> &'static str {
        "heading-color"
    }

    fn key(&self) -> AttributeKey {
        AttributeKey::ForegroundColor
    }

    fn reads(&self) -> &'static [AttributeKey] {
        &[AttributeKey::ParagraphFormat, AttributeKey::Font]
    }

    fn constrain(&self, attributes: &Attributes, _: &FormattingContext) -> Derived {
        let heading = attributes
            .paragraph_format
            .is_some_and(ParagraphFormat::is_heading);
        let bold = attributes.font.is_some_and(Font::is_bold);
        if heading || bold {
            Derived::Set(AttributeValue::ForegroundColor(SemanticColor::Primary))
        } else {
            Derived::Cleared
        }
    }
}

/// Fills the background of location references that render as pills.
///
/// Any other run loses its background, including text whose location reference was invalidated
/// by an edit.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocationPillBackground;

impl Constraint for LocationPillBackground {
    fn name(&self) -> &'static str {
        "location-pill-background"
    }

    fn key(&self) -> AttributeKey {
        AttributeKey::BackgroundColor
    }

    fn reads(&self) -> &'static [AttributeKey] {
        &[AttributeKey::Location]
    }

    fn constrain(&self, attributes: &Attributes, context: &FormattingContext) -> Derived {
        match &attributes.location {
            Some(location) if context.is_pill(location) => {
                Derived::Set(AttributeValue::BackgroundColor(SemanticColor::PillBackground))
            }
            _ => Derived::Cleared,
        }
    }
}

/// Colors the text of location references that render as pills.
///
/// Runs without a location reference keep the color derived for them so far.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocationPillForeground;

impl Constraint for LocationPillForeground {
    fn name(&self) -> &'static str {
        "location-pill-foreground"
    }

    fn key(&self) -> AttributeKey {
        AttributeKey::ForegroundColor
    }

    fn reads(&self) -> &'static [AttributeKey] {
        &[AttributeKey::Location]
    }

    fn constrain(&self, attributes: &Attributes, context: &FormattingContext) -> Derived {
        let Some(location) = &attributes.location else {
            return Derived::Unchanged;
        };
        if context.is_pill(location) {
            Derived::Set(AttributeValue::ForegroundColor(SemanticColor::PillForeground))
        } else {
            log::trace!("location `{location}` is not attached; not drawing a pill");
            Derived::Cleared
        }
    }
}
