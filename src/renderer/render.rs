//! Tweet renderer: fills compiled templates from a segmented tweet

use std::fmt::Write;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use tracing::{debug, warn};

use crate::template::{
    CashtagField, CompiledTemplates, HashtagField, MentionField, PhotoField, Template,
    TemplateNode, TextField, TweetField, UrlField, VideoField,
};
use crate::tweet::{Entity, EntitySegment, Media, Segment, Tweet};

use super::config::RenderConfig;

/// Render a tweet with the whole-tweet template
pub fn render(tweet: &Tweet, templates: &CompiledTemplates, config: &RenderConfig) -> String {
    Renderer::new(templates, config).render(tweet)
}

/// Renders tweets with one compiled template set and configuration
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    templates: &'a CompiledTemplates,
    config: &'a RenderConfig,
}

impl<'a> Renderer<'a> {
    pub fn new(templates: &'a CompiledTemplates, config: &'a RenderConfig) -> Self {
        Self { templates, config }
    }

    /// Render the whole-tweet template
    pub fn render(&self, tweet: &Tweet) -> String {
        let mut out = String::new();
        self.write_tweet(&self.templates.tweet, tweet, &mut out);
        out
    }

    /// Render the footer template
    pub fn render_footer(&self, tweet: &Tweet) -> String {
        let mut out = String::new();
        self.write_tweet(&self.templates.footer, tweet, &mut out);
        out
    }

    /// Render only the body, segment by segment
    pub fn render_text(&self, tweet: &Tweet) -> String {
        let mut out = String::new();
        self.write_text(tweet, &mut out);
        out
    }

    /// Render one medium with its photo or video template
    pub fn render_media(&self, medium: &Media) -> String {
        let mut out = String::new();
        self.write_media(medium, &mut out);
        out
    }

    fn write_tweet(&self, template: &Template<TweetField>, tweet: &Tweet, out: &mut String) {
        let datetime = self.datetime(tweet.created_at);
        fill(template, out, |field, out| match field {
            TweetField::TweetUrl => {
                out.push_str(&self.config.tweet_url(&tweet.author.username, &tweet.id))
            }
            TweetField::TweetId => out.push_str(&tweet.id),
            TweetField::TweetText => self.write_text(tweet, out),
            TweetField::TweetDatetime => {
                write_date(out, datetime.as_ref(), self.config.datetime_format())
            }
            TweetField::UserName => out.push_str(&tweet.author.name),
            TweetField::UserUsername => out.push_str(&tweet.author.username),
            TweetField::UserUrl => out.push_str(&self.config.user_url(&tweet.author.username)),
            TweetField::DateIso => {
                if let Some(datetime) = &datetime {
                    out.push_str(&datetime.to_rfc3339());
                }
            }
            TweetField::DateYear => write_date(out, datetime.as_ref(), "%Y"),
            TweetField::DateMonth => write_date(out, datetime.as_ref(), "%m"),
            TweetField::DateDay => write_date(out, datetime.as_ref(), "%d"),
            TweetField::DateHours => write_date(out, datetime.as_ref(), "%H"),
            TweetField::DateMinutes => write_date(out, datetime.as_ref(), "%M"),
            TweetField::DateSeconds => write_date(out, datetime.as_ref(), "%S"),
            TweetField::DateTimestamp => out.push_str(&tweet.created_at.to_string()),
        });
    }

    fn write_text(&self, tweet: &Tweet, out: &mut String) {
        for segment in &tweet.segments {
            self.write_segment(segment, tweet, out);
        }
    }

    fn write_segment(&self, segment: &Segment, tweet: &Tweet, out: &mut String) {
        let EntitySegment { text, entity } = match segment {
            Segment::Text { text } => {
                fill(&self.templates.text, out, |field, out| match field {
                    TextField::Text => out.push_str(text),
                });
                return;
            }
            Segment::Entity(segment) => segment,
        };

        match entity {
            Entity::Url(url) => {
                if let Some(key) = url.media_key.as_deref() {
                    match tweet.medium(key) {
                        Some(medium) => return self.write_media(medium, out),
                        None => debug!(media_key = key, "media not attached, rendering as link"),
                    }
                }
                fill(&self.templates.url, out, |field, out| match field {
                    UrlField::Text => out.push_str(text),
                    UrlField::ShortUrl => out.push_str(url.short_url.as_deref().unwrap_or(text)),
                    UrlField::ExpandedUrl => out.push_str(&url.expanded_url),
                    UrlField::DecodedUrl => out.push_str(&url.decoded()),
                    UrlField::Title => out.push_str(url.title.as_deref().unwrap_or_default()),
                });
            }
            Entity::Hashtag(hashtag) => {
                fill(&self.templates.hashtag, out, |field, out| match field {
                    HashtagField::Text => out.push_str(text),
                    HashtagField::Tag => out.push_str(&hashtag.tag),
                    HashtagField::Hashmoji => {
                        out.push_str(hashtag.hashmoji.as_deref().unwrap_or_default())
                    }
                });
            }
            Entity::Cashtag(cashtag) => {
                fill(&self.templates.cashtag, out, |field, out| match field {
                    CashtagField::Text => out.push_str(text),
                    CashtagField::Tag => out.push_str(&cashtag.tag),
                });
            }
            Entity::Mention(mention) => {
                fill(&self.templates.mention, out, |field, out| match field {
                    MentionField::Text => out.push_str(text),
                    MentionField::Username => out.push_str(&mention.username),
                    MentionField::UserUrl => out.push_str(&self.config.user_url(&mention.username)),
                });
            }
        }
    }

    fn write_media(&self, medium: &Media, out: &mut String) {
        match medium {
            Media::Photo { url, .. } => fill(&self.templates.photo, out, |field, out| match field {
                PhotoField::Url => out.push_str(url),
            }),
            Media::Video { thumbnail, .. } => {
                fill(&self.templates.video, out, |field, out| match field {
                    VideoField::Thumbnail => out.push_str(thumbnail),
                })
            }
        }
    }

    fn datetime(&self, timestamp: i64) -> Option<DateTime<FixedOffset>> {
        Utc.timestamp_opt(timestamp, 0)
            .single()
            .map(|datetime| datetime.with_timezone(&self.config.timezone.offset_at(&datetime)))
    }
}

/// Walk a template, copying literal text and resolving placeholders
fn fill<F: Copy>(template: &Template<F>, out: &mut String, mut resolve: impl FnMut(F, &mut String)) {
    for node in template.nodes() {
        match node {
            TemplateNode::Text(text) => out.push_str(text),
            TemplateNode::Placeholder(field) => resolve(*field, out),
        }
    }
}

/// Format a date into `out`; out-of-range timestamps render nothing
fn write_date(out: &mut String, datetime: Option<&DateTime<FixedOffset>>, format: &str) {
    let Some(datetime) = datetime else {
        return;
    };
    let mut formatted = String::new();
    match write!(formatted, "{}", datetime.format(format)) {
        Ok(()) => out.push_str(&formatted),
        Err(_) => warn!(format, "datetime format failed, rendering nothing"),
    }
}
