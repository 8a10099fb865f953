//! tweetfmt - Turn decoded tweets into text with user-defined templates
//!
//! This library splits a tweet body into typed segments from its entity
//! annotations, compiles `${field}` placeholder templates, and renders
//! tweets through them.
//!
//! # Example
//!
//! ```rust
//! use tweetfmt::{format_tweet, Annotation, Entity, RawTweet, RenderConfig, TemplateRecord, User};
//!
//! let raw = RawTweet {
//!     id: "1".to_string(),
//!     created_at: 0,
//!     author: User::new("Alice", "alice"),
//!     text: "hello #rust".to_string(),
//!     annotations: vec![Annotation::new(6, 11, Entity::hashtag("rust"))],
//!     media: vec![],
//! };
//! let record = TemplateRecord::new().with_tweet("${user.name}: ${tweet.text}");
//!
//! let out = format_tweet(raw, &record, &RenderConfig::default()).unwrap();
//! assert_eq!(out, "Alice: hello #rust");
//! ```

pub mod error;
pub mod renderer;
pub mod settings;
pub mod template;
pub mod tweet;

pub use error::UnexpectedPlaceholderError;
pub use renderer::{render, ConfigError, Hostname, RenderConfig, Renderer, Timezone};
pub use settings::{Settings, SettingsError};
pub use template::{
    parse, CompiledTemplates, Field, Slot, Template, TemplateError, TemplateNode, TemplateRecord,
};
pub use tweet::{
    segment, segment_in_passes, Annotation, DropReason, DroppedAnnotation, Entity, EntityKind,
    EntitySegment, Media, RawTweet, Segment, Segmentation, Tweet, UrlEntity, User,
};

/// Segment a raw tweet, compile a template record and render in one step
///
/// Callers rendering many tweets should compile the record once and reuse
/// the [`CompiledTemplates`] with a [`Renderer`].
pub fn format_tweet(
    raw: RawTweet,
    record: &TemplateRecord,
    config: &RenderConfig,
) -> Result<String, TemplateError> {
    let templates = record.compile()?;
    let tweet = raw.into_tweet();
    Ok(render(&tweet, &templates, config))
}
