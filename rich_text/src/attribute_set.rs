// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::collections::{BTreeMap, BTreeSet};

use crate::{AttributeKey, AttributeValue, Attributes, Font, LineStyle, ParagraphFormat};

/// The distinct attribute values seen over a range of text, grouped by key.
///
/// Produced by [`RichText::attributes`](crate::RichText::attributes). A key with no values is
/// unset everywhere in the queried range; a key with more than one value is mixed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeSet {
    values: BTreeMap<AttributeKey, BTreeSet<AttributeValue>>,
}

impl AttributeSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every value of `attributes`.
    pub fn insert_attributes(&mut self, attributes: &Attributes) {
        for value in attributes.iter() {
            self.values.entry(value.key()).or_default().insert(value);
        }
    }

    /// Adds every value of `other`.
    pub fn extend(&mut self, other: Self) {
        for (key, values) in other.values {
            self.values.entry(key).or_default().extend(values);
        }
    }

    /// Returns `true` if no key has any value.
    pub fn is_empty(&self) -> bool {
        self.values.values().all(BTreeSet::is_empty)
    }

    /// The distinct values seen for `key`, in value order.
    pub fn values(&self, key: AttributeKey) -> impl Iterator<Item = &AttributeValue> + '_ {
        self.values.get(&key).into_iter().flatten()
    }

    /// The number of distinct values seen for `key`.
    pub fn count(&self, key: AttributeKey) -> usize {
        self.values.get(&key).map_or(0, BTreeSet::len)
    }

    /// Returns `true` if `key` is unset over the whole range.
    pub fn is_unset(&self, key: AttributeKey) -> bool {
        self.count(key) == 0
    }

    /// Returns `true` if more than one distinct value was seen for `key`.
    pub fn is_mixed(&self, key: AttributeKey) -> bool {
        self.count(key) > 1
    }

    /// Returns `true` if `value` was seen.
    pub fn contains(&self, value: &AttributeValue) -> bool {
        self.values
            .get(&value.key())
            .is_some_and(|values| values.contains(value))
    }

    /// The distinct fonts seen.
    pub fn fonts(&self) -> impl Iterator<Item = Font> + '_ {
        self.values(AttributeKey::Font).filter_map(|value| match value {
            AttributeValue::Font(font) => Some(*font),
            _ => None,
        })
    }

    /// The distinct paragraph formats seen.
    pub fn paragraph_formats(&self) -> impl Iterator<Item = ParagraphFormat> + '_ {
        self.values(AttributeKey::ParagraphFormat)
            .filter_map(|value| match value {
                AttributeValue::ParagraphFormat(format) => Some(*format),
                _ => None,
            })
    }

    /// The distinct line styles seen for a decoration key.
    pub fn line_styles(&self, key: AttributeKey) -> impl Iterator<Item = LineStyle> + '_ {
        self.values(key).filter_map(|value| match value {
            AttributeValue::Underline(style) | AttributeValue::Strikethrough(style) => {
                Some(*style)
            }
            _ => None,
        })
    }
}
