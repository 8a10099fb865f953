//! Placeholder template language
//!
//! Templates are plain strings with `${field}` placeholders. Each slot of a
//! [`TemplateRecord`] has its own fixed set of legal fields; compiling the
//! record checks every placeholder and produces typed [`Template`]s.
//!
//! # Example
//!
//! ```text
//! tweet          = "[${tweet.url} ${user.name}(@${user.username})]: ${tweet.text}"
//! entity.url     = "[${decoded_url} ${title}]"
//! entity.mention = "[${user_url} ${text}]"
//! ```

mod compiler;
pub mod fields;
mod lexer;
mod parser;

pub use compiler::{
    CompiledTemplates, EntityTemplates, MediaTemplates, Slot, TemplateError, TemplateRecord,
};
pub use fields::{
    CashtagField, Field, HashtagField, MentionField, PhotoField, TextField, TweetField, UrlField,
    VideoField,
};
pub use parser::{parse, Template, TemplateNode};
