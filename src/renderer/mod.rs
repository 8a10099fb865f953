//! Tweet renderer
//!
//! Takes a segmented [`Tweet`](crate::tweet::Tweet) and a
//! [`CompiledTemplates`](crate::template::CompiledTemplates) set and produces
//! the output string.

pub mod config;
mod render;

pub use config::{ConfigError, Hostname, RenderConfig, Timezone};
pub use render::{render, Renderer};
