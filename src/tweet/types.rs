//! Tweet data model: users, annotations, entities, segments and media

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::decode::decode_url;
use super::segmenter;

/// Tweet author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Display name
    pub name: String,
    /// Screen name without the leading `@`
    pub username: String,
}

impl User {
    pub fn new(name: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
        }
    }
}

/// Link annotation payload
///
/// A link that carries a `media_key` is an inline reference to one of the
/// tweet's media.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlEntity {
    /// Shortened form as it appears in the body (t.co)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_url: Option<String>,
    pub expanded_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_url: Option<String>,
    /// Percent-decoded, unicode-host form of `expanded_url`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decoded_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_key: Option<String>,
}

impl UrlEntity {
    pub fn new(expanded_url: impl Into<String>) -> Self {
        Self {
            expanded_url: expanded_url.into(),
            ..Self::default()
        }
    }

    pub fn with_decoded_url(mut self, decoded_url: impl Into<String>) -> Self {
        self.decoded_url = Some(decoded_url.into());
        self
    }

    pub fn with_short_url(mut self, short_url: impl Into<String>) -> Self {
        self.short_url = Some(short_url.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_media_key(mut self, media_key: impl Into<String>) -> Self {
        self.media_key = Some(media_key.into());
        self
    }

    /// Decoded form; derived from `expanded_url` unless given explicitly
    pub fn decoded(&self) -> Cow<'_, str> {
        match &self.decoded_url {
            Some(decoded) => Cow::Borrowed(decoded.as_str()),
            None => Cow::Owned(decode_url(&self.expanded_url)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashtagEntity {
    /// Tag without the leading `#`
    pub tag: String,
    /// Image URL of the hashflag attached to the tag, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashmoji: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashtagEntity {
    /// Symbol without the leading `$`
    pub tag: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionEntity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub username: String,
}

/// Semantic kind of an annotation together with its payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entity {
    Url(UrlEntity),
    Hashtag(HashtagEntity),
    Cashtag(CashtagEntity),
    Mention(MentionEntity),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Url(_) => EntityKind::Url,
            Entity::Hashtag(_) => EntityKind::Hashtag,
            Entity::Cashtag(_) => EntityKind::Cashtag,
            Entity::Mention(_) => EntityKind::Mention,
        }
    }

    pub fn hashtag(tag: impl Into<String>) -> Self {
        Entity::Hashtag(HashtagEntity {
            tag: tag.into(),
            hashmoji: None,
        })
    }

    pub fn cashtag(tag: impl Into<String>) -> Self {
        Entity::Cashtag(CashtagEntity { tag: tag.into() })
    }

    pub fn mention(username: impl Into<String>) -> Self {
        Entity::Mention(MentionEntity {
            id: None,
            username: username.into(),
        })
    }
}

/// Entity kinds, declared in segmentation pass order
///
/// Links are split out first since they may contain text that looks like a
/// hashtag or mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKind {
    Url,
    Hashtag,
    Cashtag,
    Mention,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Url => "url",
            EntityKind::Hashtag => "hashtag",
            EntityKind::Cashtag => "cashtag",
            EntityKind::Mention => "mention",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `[start, end)` grapheme range of the body tagged with an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub start: usize,
    pub end: usize,
    #[serde(flatten)]
    pub entity: Entity,
}

impl Annotation {
    pub fn new(start: usize, end: usize, entity: Entity) -> Self {
        Self { start, end, entity }
    }

    pub fn kind(&self) -> EntityKind {
        self.entity.kind()
    }
}

/// Body text covered by an annotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySegment {
    pub text: String,
    pub entity: Entity,
}

/// One contiguous piece of a segmented body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Segment {
    Text { text: String },
    Entity(EntitySegment),
}

impl Segment {
    pub fn text(text: impl Into<String>) -> Self {
        Segment::Text { text: text.into() }
    }

    pub fn entity(text: impl Into<String>, entity: Entity) -> Self {
        Segment::Entity(EntitySegment {
            text: text.into(),
            entity,
        })
    }

    /// The body text this segment covers
    pub fn as_str(&self) -> &str {
        match self {
            Segment::Text { text } => text,
            Segment::Entity(segment) => &segment.text,
        }
    }
}

/// Attached photo or video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Media {
    Photo {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        media_key: Option<String>,
        url: String,
    },
    Video {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        media_key: Option<String>,
        thumbnail: String,
    },
}

impl Media {
    pub fn media_key(&self) -> Option<&str> {
        match self {
            Media::Photo { media_key, .. } | Media::Video { media_key, .. } => media_key.as_deref(),
        }
    }
}

/// A tweet as decoded from the API or the page, before segmentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTweet {
    pub id: String,
    /// Unix time in seconds
    pub created_at: i64,
    pub author: User,
    pub text: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub media: Vec<Media>,
}

impl RawTweet {
    /// Segment the body and bind the segments into a [`Tweet`]
    ///
    /// Annotations are applied in entity pass order. Dropped annotations are
    /// logged; use [`segmenter::segment_in_passes`] directly to inspect them.
    pub fn into_tweet(self) -> Tweet {
        let segmentation = segmenter::segment_in_passes(&self.text, &self.annotations);
        Tweet {
            id: self.id,
            created_at: self.created_at,
            author: self.author,
            segments: segmentation.segments,
            media: self.media,
        }
    }
}

/// A tweet whose body has been split into segments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub created_at: i64,
    pub author: User,
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub media: Vec<Media>,
}

impl Tweet {
    /// The plain body, reassembled from its segments
    pub fn body(&self) -> String {
        self.segments.iter().map(Segment::as_str).collect()
    }

    /// Find an attached medium by key
    pub fn medium(&self, media_key: &str) -> Option<&Media> {
        self.media.iter().find(|m| m.media_key() == Some(media_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_pass_order() {
        let mut kinds = vec![
            EntityKind::Mention,
            EntityKind::Hashtag,
            EntityKind::Url,
            EntityKind::Cashtag,
        ];
        kinds.sort();
        assert_eq!(
            kinds,
            vec![
                EntityKind::Url,
                EntityKind::Hashtag,
                EntityKind::Cashtag,
                EntityKind::Mention
            ]
        );
    }

    #[test]
    fn test_url_decoded_derived_from_expanded() {
        let url = UrlEntity::new("https://example.com/%E3%81%82");
        assert_eq!(url.decoded(), "https://example.com/\u{3042}");
        let url = url.with_decoded_url("https://example.com/\u{3042}");
        assert_eq!(url.decoded(), "https://example.com/\u{3042}");
    }

    #[test]
    fn test_raw_tweet_from_json() {
        let json = r#"{
            "id": "42",
            "created_at": 1577836800,
            "author": { "name": "Alice", "username": "alice" },
            "text": "hi #rust",
            "annotations": [
                { "start": 3, "end": 8, "type": "hashtag", "tag": "rust" }
            ],
            "media": [
                { "type": "photo", "media_key": "3_1", "url": "https://pbs.twimg.com/media/a.jpg" }
            ]
        }"#;
        let raw: RawTweet = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(raw.annotations.len(), 1);
        assert_eq!(raw.annotations[0].kind(), EntityKind::Hashtag);
        assert_eq!(raw.media[0].media_key(), Some("3_1"));

        let tweet = raw.into_tweet();
        assert_eq!(
            tweet.segments,
            vec![Segment::text("hi "), Segment::entity("#rust", Entity::hashtag("rust"))]
        );
        assert_eq!(tweet.body(), "hi #rust");
    }

    #[test]
    fn test_into_tweet_skips_unplaceable_annotations() {
        let raw = RawTweet {
            id: "1".to_string(),
            created_at: 0,
            author: User::new("A", "a"),
            text: "hi #rust".to_string(),
            annotations: vec![
                Annotation::new(3, 8, Entity::hashtag("rust")),
                Annotation::new(6, 40, Entity::mention("nobody")),
            ],
            media: vec![],
        };
        let tweet = raw.into_tweet();
        assert_eq!(
            tweet.segments,
            vec![Segment::text("hi "), Segment::entity("#rust", Entity::hashtag("rust"))]
        );
    }

    #[test]
    fn test_tweet_medium_lookup() {
        let tweet = Tweet {
            id: "1".to_string(),
            created_at: 0,
            author: User::new("A", "a"),
            segments: vec![],
            media: vec![Media::Video {
                media_key: Some("7_1".to_string()),
                thumbnail: "thumb.jpg".to_string(),
            }],
        };
        assert!(tweet.medium("7_1").is_some());
        assert!(tweet.medium("3_1").is_none());
    }
}
