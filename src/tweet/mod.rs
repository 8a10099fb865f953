//! Tweet model and body segmentation
//!
//! A decoded tweet arrives as a flat body string plus annotations whose
//! `[start, end)` offsets count grapheme clusters. Offsets measured in another
//! unit (bytes, UTF-16) are a caller error and are not re-validated here.

mod decode;
pub mod grapheme;
pub mod segmenter;
mod types;

pub use decode::decode_url;
pub use grapheme::GraphemeIndex;
pub use segmenter::{segment, segment_in_passes, DropReason, DroppedAnnotation, Segmentation};
pub use types::{
    Annotation, CashtagEntity, Entity, EntityKind, EntitySegment, HashtagEntity, Media,
    MentionEntity, RawTweet, Segment, Tweet, UrlEntity, User,
};
