//! Template record compilation
//!
//! A [`TemplateRecord`] holds the raw string of every slot. Compiling it
//! parses each slot against that slot's field table and yields a
//! [`CompiledTemplates`] set, which is then reused for every tweet rendered
//! until the record changes.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::UnexpectedPlaceholderError;

use super::fields::{
    CashtagField, Field, HashtagField, MentionField, PhotoField, TextField, TweetField, UrlField,
    VideoField,
};
use super::parser::{parse, Template};

/// A slot failed to compile
#[derive(Debug, Error, Clone, PartialEq)]
#[error("invalid {slot} template: {source}")]
pub struct TemplateError {
    pub slot: Slot,
    #[source]
    pub source: UnexpectedPlaceholderError,
}

impl TemplateError {
    /// Format the error against the failing slot's source using ariadne
    pub fn report(&self, record: &TemplateRecord) -> String {
        self.source
            .format(self.slot.source(record), self.slot.name())
    }
}

/// Named template strings within a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Tweet,
    Footer,
    EntityText,
    EntityUrl,
    EntityHashtag,
    EntityCashtag,
    EntityMention,
    MediaPhoto,
    MediaVideo,
}

impl Slot {
    /// Every slot, in compilation order
    pub const ALL: &'static [Slot] = &[
        Slot::Tweet,
        Slot::Footer,
        Slot::EntityText,
        Slot::EntityUrl,
        Slot::EntityHashtag,
        Slot::EntityCashtag,
        Slot::EntityMention,
        Slot::MediaPhoto,
        Slot::MediaVideo,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Slot::Tweet => "tweet",
            Slot::Footer => "footer",
            Slot::EntityText => "entity.text",
            Slot::EntityUrl => "entity.url",
            Slot::EntityHashtag => "entity.hashtag",
            Slot::EntityCashtag => "entity.cashtag",
            Slot::EntityMention => "entity.mention",
            Slot::MediaPhoto => "media.photo",
            Slot::MediaVideo => "media.video",
        }
    }

    /// The slot's raw template in `record`
    pub fn source(self, record: &TemplateRecord) -> &str {
        match self {
            Slot::Tweet => &record.tweet,
            Slot::Footer => &record.footer,
            Slot::EntityText => &record.entity.text,
            Slot::EntityUrl => &record.entity.url,
            Slot::EntityHashtag => &record.entity.hashtag,
            Slot::EntityCashtag => &record.entity.cashtag,
            Slot::EntityMention => &record.entity.mention,
            Slot::MediaPhoto => &record.media.photo,
            Slot::MediaVideo => &record.media.video,
        }
    }

    /// Legal placeholder names for the slot
    pub fn fields(self) -> Vec<&'static str> {
        match self {
            Slot::Tweet | Slot::Footer => TweetField::names(),
            Slot::EntityText => TextField::names(),
            Slot::EntityUrl => UrlField::names(),
            Slot::EntityHashtag => HashtagField::names(),
            Slot::EntityCashtag => CashtagField::names(),
            Slot::EntityMention => MentionField::names(),
            Slot::MediaPhoto => PhotoField::names(),
            Slot::MediaVideo => VideoField::names(),
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw entity templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityTemplates {
    pub text: String,
    pub url: String,
    pub hashtag: String,
    pub cashtag: String,
    pub mention: String,
}

impl Default for EntityTemplates {
    fn default() -> Self {
        Self {
            text: "${text}".to_string(),
            url: "[${decoded_url} ${title}]".to_string(),
            hashtag: "${text}".to_string(),
            cashtag: "${text}".to_string(),
            mention: "[${user_url} ${text}]".to_string(),
        }
    }
}

/// Raw media templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaTemplates {
    pub photo: String,
    pub video: String,
}

impl Default for MediaTemplates {
    fn default() -> Self {
        Self {
            photo: "[${url}]".to_string(),
            video: "[${thumbnail}]".to_string(),
        }
    }
}

/// User-supplied template strings, one per slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateRecord {
    pub tweet: String,
    pub footer: String,
    pub entity: EntityTemplates,
    pub media: MediaTemplates,
}

impl Default for TemplateRecord {
    fn default() -> Self {
        Self {
            tweet: "[${tweet.url} ${user.name}(@${user.username})]: ${tweet.text}".to_string(),
            footer: "${tweet.datetime}".to_string(),
            entity: EntityTemplates::default(),
            media: MediaTemplates::default(),
        }
    }
}

impl TemplateRecord {
    /// Create a record with default templates
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the whole-tweet template
    pub fn with_tweet(mut self, template: impl Into<String>) -> Self {
        self.tweet = template.into();
        self
    }

    /// Set the footer template
    pub fn with_footer(mut self, template: impl Into<String>) -> Self {
        self.footer = template.into();
        self
    }

    /// Set the template of a single slot
    pub fn with_slot(mut self, slot: Slot, template: impl Into<String>) -> Self {
        let template = template.into();
        match slot {
            Slot::Tweet => self.tweet = template,
            Slot::Footer => self.footer = template,
            Slot::EntityText => self.entity.text = template,
            Slot::EntityUrl => self.entity.url = template,
            Slot::EntityHashtag => self.entity.hashtag = template,
            Slot::EntityCashtag => self.entity.cashtag = template,
            Slot::EntityMention => self.entity.mention = template,
            Slot::MediaPhoto => self.media.photo = template,
            Slot::MediaVideo => self.media.video = template,
        }
        self
    }

    /// Compile every slot
    ///
    /// Compilation is all-or-nothing: the first slot that fails aborts it.
    pub fn compile(&self) -> Result<CompiledTemplates, TemplateError> {
        let compiled = CompiledTemplates {
            tweet: compile_slot(self, Slot::Tweet)?,
            footer: compile_slot(self, Slot::Footer)?,
            text: compile_slot(self, Slot::EntityText)?,
            url: compile_slot(self, Slot::EntityUrl)?,
            hashtag: compile_slot(self, Slot::EntityHashtag)?,
            cashtag: compile_slot(self, Slot::EntityCashtag)?,
            mention: compile_slot(self, Slot::EntityMention)?,
            photo: compile_slot(self, Slot::MediaPhoto)?,
            video: compile_slot(self, Slot::MediaVideo)?,
        };
        debug!("compiled template record");
        Ok(compiled)
    }
}

fn compile_slot<F: Field>(record: &TemplateRecord, slot: Slot) -> Result<Template<F>, TemplateError> {
    parse(slot.source(record)).map_err(|source| TemplateError { slot, source })
}

/// Compiled templates for every slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTemplates {
    pub tweet: Template<TweetField>,
    pub footer: Template<TweetField>,
    pub text: Template<TextField>,
    pub url: Template<UrlField>,
    pub hashtag: Template<HashtagField>,
    pub cashtag: Template<CashtagField>,
    pub mention: Template<MentionField>,
    pub photo: Template<PhotoField>,
    pub video: Template<VideoField>,
}

impl Default for CompiledTemplates {
    fn default() -> Self {
        TemplateRecord::default()
            .compile()
            .expect("Default templates should compile")
    }
}
