// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use rich_text::ParagraphFormat;

/// A block that can be started from the block format picker.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BlockFormat {
    /// Top level heading.
    Heading1,
    /// Second level heading.
    Heading2,
    /// Third level heading.
    Heading3,
    /// Bulleted list item.
    BulletList,
    /// Numbered list item.
    NumberedList,
    /// Quotation.
    Quote,
    /// Horizontal divider line.
    Divider,
}

impl BlockFormat {
    /// Every block format, in picker order.
    pub const ALL: [Self; 7] = [
        Self::Heading1,
        Self::Heading2,
        Self::Heading3,
        Self::BulletList,
        Self::NumberedList,
        Self::Quote,
        Self::Divider,
    ];

    /// Display name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Heading1 => "Heading 1",
            Self::Heading2 => "Heading 2",
            Self::Heading3 => "Heading 3",
            Self::BulletList => "Bulleted List",
            Self::NumberedList => "Numbered List",
            Self::Quote => "Quote",
            Self::Divider => "Divider",
        }
    }

    /// Placeholder shown in the new, still empty block.
    pub const fn placeholder(self) -> Option<&'static str> {
        match self {
            Self::Heading1 => Some("Heading 1"),
            Self::Heading2 => Some("Heading 2"),
            Self::Heading3 => Some("Heading 3"),
            Self::BulletList | Self::NumberedList => Some("List item"),
            Self::Quote => Some("Quote"),
            Self::Divider => None,
        }
    }

    /// The paragraph format the new block starts with.
    ///
    /// List and quote blocks have no paragraph format of their own yet and start as body text.
    pub const fn paragraph_format(self) -> Option<ParagraphFormat> {
        match self {
            Self::Heading1 => Some(ParagraphFormat::Heading1),
            Self::Heading2 => Some(ParagraphFormat::Heading2),
            Self::Heading3 => Some(ParagraphFormat::Heading3),
            Self::BulletList | Self::NumberedList | Self::Quote => Some(ParagraphFormat::Body),
            Self::Divider => None,
        }
    }
}
