//! Property and scenario tests for body segmentation

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use tweetfmt::tweet::grapheme;
use tweetfmt::{
    segment, segment_in_passes, Annotation, DropReason, Entity, Segment, Segmentation, UrlEntity,
};

const GRAPHEMES: &[&str] = &[
    "a",
    "b",
    " ",
    "#",
    "@",
    "\u{3042}",
    "e\u{0301}",
    "\u{1F1EF}\u{1F1F5}",
    "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}",
];

fn joined(segmentation: &Segmentation) -> String {
    segmentation.segments.iter().map(Segment::as_str).collect()
}

fn body() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(GRAPHEMES), 0..40).prop_map(|parts| parts.concat())
}

/// A body with pairwise disjoint, non-empty annotations
fn body_with_disjoint_annotations() -> impl Strategy<Value = (String, Vec<Annotation>)> {
    body().prop_flat_map(|body| {
        let len = grapheme::len(&body);
        prop::collection::vec(0..=len, 0..12).prop_map(move |mut points| {
            points.sort_unstable();
            points.dedup();
            let annotations = points
                .chunks_exact(2)
                .map(|pair| Annotation::new(pair[0], pair[1], Entity::hashtag("t")))
                .collect();
            (body.clone(), annotations)
        })
    })
}

/// A body with arbitrary, possibly overlapping or out-of-range annotations
fn body_with_any_annotations() -> impl Strategy<Value = (String, Vec<Annotation>)> {
    body().prop_flat_map(|body| {
        let len = grapheme::len(&body);
        let span = (0..=len + 2, 0..=len + 2);
        prop::collection::vec(span, 0..8).prop_map(move |spans| {
            let annotations = spans
                .into_iter()
                .map(|(start, end)| Annotation::new(start, end, Entity::mention("u")))
                .collect();
            (body.clone(), annotations)
        })
    })
}

proptest! {
    #[test]
    fn test_segments_reassemble_body((body, annotations) in body_with_any_annotations()) {
        let result = segment(&body, &annotations);
        prop_assert_eq!(joined(&result), body);
    }

    #[test]
    fn test_every_annotation_is_kept_or_dropped((body, annotations) in body_with_any_annotations()) {
        let result = segment(&body, &annotations);
        prop_assert_eq!(result.entity_count() + result.dropped.len(), annotations.len());
    }

    #[test]
    fn test_disjoint_annotations_are_all_kept((body, annotations) in body_with_disjoint_annotations()) {
        let result = segment(&body, &annotations);
        prop_assert!(result.dropped.is_empty());
        prop_assert_eq!(result.entity_count(), annotations.len());
        prop_assert_eq!(joined(&result), body.clone());

        // Order of application does not matter for disjoint ranges.
        let mut reversed = annotations.clone();
        reversed.reverse();
        prop_assert_eq!(segment(&body, &reversed).segments, result.segments);
    }

    #[test]
    fn test_no_empty_segments((body, annotations) in body_with_any_annotations()) {
        let result = segment(&body, &annotations);
        prop_assert!(result.segments.iter().all(|s| !s.as_str().is_empty()));
    }
}

#[test]
fn test_straddling_annotation_is_dropped() {
    let body = "go #rustlang now";
    let annotations = [
        Annotation::new(3, 12, Entity::hashtag("rustlang")),
        Annotation::new(10, 16, Entity::mention("ng")),
    ];
    let result = segment(body, &annotations);
    assert_eq!(result.entity_count(), 1);
    assert_eq!(result.dropped.len(), 1);
    assert_eq!(result.dropped[0].reason, DropReason::NotContained);
    assert_eq!(joined(&result), body);
}

#[test]
fn test_example_body_segments() {
    let body = "Check ${out} https://t.co/abc #Go";
    let url = UrlEntity::new("https://example.com/").with_decoded_url("https://example.com/");
    let annotations = [
        Annotation::new(13, 29, Entity::Url(url.clone())),
        Annotation::new(30, 33, Entity::hashtag("Go")),
    ];
    let result = segment_in_passes(body, &annotations);
    assert_eq!(
        result.segments,
        vec![
            Segment::text("Check ${out} "),
            Segment::entity("https://t.co/abc", Entity::Url(url)),
            Segment::text(" "),
            Segment::entity("#Go", Entity::hashtag("Go")),
        ]
    );
    assert!(result.dropped.is_empty());
}

#[test]
fn test_mention_inside_link_resolved_by_passes() {
    let body = "see https://t.co/@x";
    let annotations = [
        Annotation::new(17, 19, Entity::mention("x")),
        Annotation::new(4, 19, Entity::Url(UrlEntity::new("https://example.com/@x"))),
    ];
    let result = segment_in_passes(body, &annotations);
    assert_eq!(
        result.segments,
        vec![
            Segment::text("see "),
            Segment::entity(
                "https://t.co/@x",
                Entity::Url(UrlEntity::new("https://example.com/@x"))
            ),
        ]
    );
    assert_eq!(result.dropped.len(), 1);
    assert_eq!(result.dropped[0].annotation.kind(), tweetfmt::EntityKind::Mention);
}

#[test]
fn test_emoji_offsets_count_graphemes() {
    let family = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}";
    let body = format!("{family} @mom");
    let result = segment(&body, &[Annotation::new(2, 6, Entity::mention("mom"))]);
    assert_eq!(
        result.segments,
        vec![
            Segment::text(format!("{family} ")),
            Segment::entity("@mom", Entity::mention("mom")),
        ]
    );
}
