// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use rich_text::{
    AttributeKey, AttributeValue, Attributes, ErrorKind, Font, LineStyle, LocationId,
    ParagraphFormat, RichText,
};

use crate::util::{assert_runs_normalized, pill, run_ranges};

#[test]
fn document_runs_stay_normalized_through_edits() {
    let mut text = RichText::new("The quick brown fox\njumps over\nthe lazy dog");
    text.transform(4..9, |a| a.font = Some(Font::BOLD)).unwrap();
    assert_runs_normalized(&text);
    text.transform(7..16, |a| a.underline = Some(LineStyle::Single))
        .unwrap();
    assert_runs_normalized(&text);
    text.transform(0..20, |a| {
        a.paragraph_format = Some(ParagraphFormat::Heading2);
    })
    .unwrap();
    assert_runs_normalized(&text);
    text.replace_range(10..16, "red", Attributes::default())
        .unwrap();
    assert_runs_normalized(&text);
    text.replace_range(0..text.len(), "", Attributes::default())
        .unwrap();
    assert_runs_normalized(&text);
    assert_eq!(text.runs().count(), 0);
}

#[test]
fn document_invalid_transform_leaves_text_unchanged() {
    let mut text = RichText::new("Hello");
    text.transform(0..2, |a| a.font = Some(Font::ITALIC)).unwrap();
    let before = text.clone();

    #[expect(
        clippy::reversed_empty_ranges,
        reason = "We want an invalid range for testing."
    )]
    let err = text.transform(4..2, |a| a.font = None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidRange);
    let err = text.transform(0..6, |a| a.font = None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidBounds);
    assert_eq!(text, before);
}

#[test]
fn document_empty_text_queries() {
    let text = RichText::default();
    assert!(text.attributes(0..0).unwrap().is_empty());
    assert!(text.location_ids().is_empty());
    assert_eq!(text.paragraph_range(0..0).unwrap(), 0..0);
    // Nothing exists to be out of range of.
    let outside = text.attributes(3..8).unwrap();
    for key in AttributeKey::ALL {
        assert!(outside.is_unset(key));
    }
    assert!(text.attributes(0..5).unwrap().is_empty());
}

#[test]
fn document_caret_range_intersects_nothing() {
    let mut text = RichText::new("abc");
    text.transform(0..3, |a| a.font = Some(Font::BOLD)).unwrap();
    assert!(text.attributes(1..1).unwrap().is_empty());
    assert_eq!(text.attributes(0..1).unwrap().count(AttributeKey::Font), 1);
}

#[test]
fn document_append_merges_at_junction() {
    let mut text = RichText::with_attributes("ab", pill("L1"));
    text.append(RichText::with_attributes("cd", pill("L1")));
    assert_eq!(run_ranges(&text), [0..4]);
    text.append(RichText::default());
    assert_eq!(run_ranges(&text), [0..4]);
}

#[test]
fn document_insertion_inside_pill_invalidates_whole_pill() {
    let mut text = RichText::new("Meet at ");
    text.push_str("Blue Bottle", pill("L1"));
    text.push_str(" and ", Attributes::default());
    text.push_str("Harbour", pill("L2"));

    // Replace "Bottle" with "Door" inside the first pill.
    text.replace_range(13..19, "Door", Attributes::default())
        .unwrap();
    assert_eq!(text.as_str(), "Meet at Blue Door and Harbour");
    let ids: Vec<_> = text.location_ids().into_iter().collect();
    assert_eq!(ids, [LocationId::new("L2")]);
    assert!(text
        .attributes(8..17)
        .unwrap()
        .is_unset(AttributeKey::Location));
    assert_runs_normalized(&text);
}

#[test]
fn document_inserted_text_never_inherits_location() {
    let mut text = RichText::with_attributes("Cafe", pill("L1"));
    text.replace_range(4..4, "!", pill("L1").inherited_by_added_text())
        .unwrap();
    let seen = text.attributes(4..5).unwrap();
    assert!(seen.is_unset(AttributeKey::Location));
    assert!(text
        .attributes(0..4)
        .unwrap()
        .contains(&AttributeValue::Location(LocationId::new("L1"))));
}

#[test]
fn document_paragraph_format_is_uniform_per_paragraph() {
    let mut text = RichText::new("Title\nBody");
    text.transform(0..6, |a| {
        a.paragraph_format = Some(ParagraphFormat::Heading1);
    })
    .unwrap();
    // Typing a newline in the middle of the heading splits it into two heading paragraphs.
    text.replace_range(2..2, "\n", Attributes::default())
        .unwrap();
    assert_eq!(text.as_str(), "Ti\ntle\nBody");
    for index in 0..7 {
        assert_eq!(
            text.attributes_at(index).and_then(|a| a.paragraph_format),
            Some(ParagraphFormat::Heading1),
            "byte {index}"
        );
    }
    assert_eq!(text.attributes_at(7).and_then(|a| a.paragraph_format), None);

    // Replacing the second line break with a space folds the body into the heading.
    text.replace_range(6..7, " ", Attributes::default())
        .unwrap();
    assert_eq!(run_ranges(&text), [0..11]);
}
