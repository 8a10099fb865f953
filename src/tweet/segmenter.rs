//! Entity segmentation of tweet bodies
//!
//! The body starts out as one text piece covering `[0, len)`. Each annotation
//! is matched against the text piece that fully contains it, and that piece is
//! replaced by up to three pieces: the text before the annotation, the entity
//! itself and the text after it. Pieces are kept in an ordered map keyed by
//! their start position, so finding the container is a single range lookup.
//!
//! Annotations that cannot be matched are dropped rather than treated as
//! errors, since upstream entity data is not guaranteed to be consistent.
//! Every drop is logged and reported back in [`Segmentation::dropped`].

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::grapheme::GraphemeIndex;
use super::types::{Annotation, Entity, Segment};

/// Why an annotation did not produce a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// `start >= end`, so the annotation covers no text
    Empty,
    /// The range reaches past the end of the body
    OutOfBounds,
    /// No remaining text piece fully contains the range; it overlaps or is
    /// nested in an entity that was split out earlier
    NotContained,
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DropReason::Empty => f.write_str("empty range"),
            DropReason::OutOfBounds => f.write_str("range past end of text"),
            DropReason::NotContained => f.write_str("range not contained in a text segment"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedAnnotation {
    pub annotation: Annotation,
    pub reason: DropReason,
}

/// Result of segmenting a body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmentation {
    /// Contiguous, non-overlapping segments covering the whole body
    pub segments: Vec<Segment>,
    pub dropped: Vec<DroppedAnnotation>,
}

impl Segmentation {
    /// Number of entity segments produced
    pub fn entity_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Entity(_)))
            .count()
    }
}

#[derive(Debug)]
struct Piece<'a> {
    end: usize,
    /// `None` for plain text
    entity: Option<&'a Entity>,
}

/// Segment `body` applying annotations in the order given
pub fn segment(body: &str, annotations: &[Annotation]) -> Segmentation {
    segment_ordered(body, annotations.iter())
}

/// Segment `body` applying annotations in entity pass order
///
/// Links go first, then hashtags, cashtags and mentions; annotations of the
/// same kind keep the order given. This lets a well-formed link that
/// contains `#` or `@` claim its whole range before narrower entities are
/// matched.
pub fn segment_in_passes(body: &str, annotations: &[Annotation]) -> Segmentation {
    let mut ordered: Vec<&Annotation> = annotations.iter().collect();
    ordered.sort_by_key(|a| a.kind());
    segment_ordered(body, ordered.into_iter())
}

fn segment_ordered<'a>(
    body: &str,
    annotations: impl Iterator<Item = &'a Annotation>,
) -> Segmentation {
    let index = GraphemeIndex::new(body);
    let len = index.len();

    let mut pieces: BTreeMap<usize, Piece<'a>> = BTreeMap::new();
    if len > 0 {
        pieces.insert(0, Piece { end: len, entity: None });
    }

    let mut dropped = Vec::new();
    for annotation in annotations {
        match split_piece(&mut pieces, annotation, len) {
            Ok(()) => {}
            Err(reason) => {
                warn!(
                    kind = %annotation.kind(),
                    start = annotation.start,
                    end = annotation.end,
                    %reason,
                    "dropping annotation"
                );
                dropped.push(DroppedAnnotation {
                    annotation: annotation.clone(),
                    reason,
                });
            }
        }
    }

    let segments: Vec<Segment> = pieces
        .iter()
        .map(|(&start, piece)| {
            // Pieces only ever cover [0, len), so slicing cannot fail.
            let text = index.slice(start..piece.end).unwrap_or_default();
            match piece.entity {
                Some(entity) => Segment::entity(text, entity.clone()),
                None => Segment::text(text),
            }
        })
        .collect();

    debug!(
        segments = segments.len(),
        dropped = dropped.len(),
        "segmented text"
    );
    Segmentation { segments, dropped }
}

fn split_piece<'a>(
    pieces: &mut BTreeMap<usize, Piece<'a>>,
    annotation: &'a Annotation,
    len: usize,
) -> Result<(), DropReason> {
    let (start, end) = (annotation.start, annotation.end);
    if start >= end {
        return Err(DropReason::Empty);
    }
    if end > len {
        return Err(DropReason::OutOfBounds);
    }

    let (&container_start, container) = pieces
        .range(..=start)
        .next_back()
        .ok_or(DropReason::NotContained)?;
    if container.entity.is_some() || end > container.end {
        return Err(DropReason::NotContained);
    }
    let container_end = container.end;

    // Head keeps the container's key; only its end shrinks.
    if container_start < start {
        pieces.insert(container_start, Piece { end: start, entity: None });
    }
    pieces.insert(
        start,
        Piece {
            end,
            entity: Some(&annotation.entity),
        },
    );
    if end < container_end {
        pieces.insert(
            end,
            Piece {
                end: container_end,
                entity: None,
            },
        );
    }
    Ok(())
}
