//! Settings file support
//!
//! A settings file is TOML with a `[template]` table holding the raw template
//! record and a `[render]` table holding render options. Every key is
//! optional; missing keys take their defaults.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::renderer::config::{parse_timezone, DEFAULT_DATETIME_FORMAT};
use crate::renderer::{ConfigError, RenderConfig};
use crate::template::{CompiledTemplates, TemplateError, TemplateRecord};

/// Errors that can occur when loading settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse settings TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid render settings: {0}")]
    Config(#[from] ConfigError),
    #[error("{error}")]
    Template {
        error: TemplateError,
        /// The record that failed, so reports can quote the slot
        record: Box<TemplateRecord>,
    },
}

impl SettingsError {
    /// Human-readable report; template errors include source context
    pub fn report(&self) -> String {
        match self {
            SettingsError::Template { error, record } => error.report(record),
            other => other.to_string(),
        }
    }
}

/// Loaded and validated settings
#[derive(Debug, Clone)]
pub struct Settings {
    /// The raw record, kept for error reports and re-saving
    pub record: TemplateRecord,
    pub templates: CompiledTemplates,
    pub render: RenderConfig,
}

/// TOML structure for deserializing settings
#[derive(Deserialize, Default)]
#[serde(default)]
struct TomlSettings {
    template: TemplateRecord,
    render: TomlRender,
}

#[derive(Deserialize)]
#[serde(default)]
struct TomlRender {
    hostname: String,
    timezone: String,
    datetime_format: String,
}

impl Default for TomlRender {
    fn default() -> Self {
        Self {
            hostname: "x.com".to_string(),
            timezone: "UTC".to_string(),
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
        }
    }
}

impl TomlRender {
    fn into_config(self) -> Result<RenderConfig, ConfigError> {
        RenderConfig::new()
            .with_hostname(self.hostname.parse()?)
            .with_timezone(parse_timezone(&self.timezone)?)
            .with_datetime_format(self.datetime_format)
    }
}

impl Settings {
    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load settings from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, SettingsError> {
        let parsed: TomlSettings = toml::from_str(content)?;
        let render = parsed.render.into_config()?;
        let templates = match parsed.template.compile() {
            Ok(templates) => templates,
            Err(error) => {
                return Err(SettingsError::Template {
                    error,
                    record: Box::new(parsed.template),
                })
            }
        };
        Ok(Settings {
            record: parsed.template,
            templates,
            render,
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            record: TemplateRecord::default(),
            templates: CompiledTemplates::default(),
            render: RenderConfig::default(),
        }
    }
}
