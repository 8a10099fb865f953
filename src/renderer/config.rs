//! Configuration for tweet rendering

use std::fmt;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;

/// Default `tweet.datetime` format
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Errors in render configuration values
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid timezone '{0}': expected \"UTC\", \"Z\", an offset like +09:00 or a zone name like Asia/Tokyo")]
    InvalidTimezone(String),

    #[error("invalid datetime format '{0}'")]
    InvalidDatetimeFormat(String),

    #[error("unknown hostname '{0}': expected x.com or twitter.com")]
    UnknownHostname(String),
}

/// Site used to build tweet and user URLs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Hostname {
    #[default]
    X,
    Twitter,
}

impl Hostname {
    pub fn as_str(self) -> &'static str {
        match self {
            Hostname::X => "x.com",
            Hostname::Twitter => "twitter.com",
        }
    }

    pub fn base_url(self) -> String {
        format!("https://{}", self.as_str())
    }
}

impl std::str::FromStr for Hostname {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x.com" => Ok(Hostname::X),
            "twitter.com" => Ok(Hostname::Twitter),
            other => Err(ConfigError::UnknownHostname(other.to_string())),
        }
    }
}

/// Timezone used to present `created_at`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timezone {
    /// A constant offset from UTC
    Fixed(FixedOffset),
    /// An IANA zone; its offset follows daylight saving rules
    Named(Tz),
}

impl Default for Timezone {
    fn default() -> Self {
        Timezone::Fixed(Utc.fix())
    }
}

impl Timezone {
    /// Offset from UTC in effect at `instant`
    pub fn offset_at(&self, instant: &DateTime<Utc>) -> FixedOffset {
        match self {
            Timezone::Fixed(offset) => *offset,
            Timezone::Named(tz) => tz.offset_from_utc_datetime(&instant.naive_utc()).fix(),
        }
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timezone::Fixed(offset) => write!(f, "{offset}"),
            Timezone::Named(tz) => f.write_str(tz.name()),
        }
    }
}

impl std::str::FromStr for Timezone {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_timezone(s)
    }
}

/// Parse a timezone given as `UTC`, `Z`, `±HH:MM` or an IANA zone name
pub fn parse_timezone(s: &str) -> Result<Timezone, ConfigError> {
    let invalid = || ConfigError::InvalidTimezone(s.to_string());
    let trimmed = s.trim();
    if trimmed.eq_ignore_ascii_case("utc") || trimmed == "Z" {
        return Ok(Timezone::default());
    }

    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'+') => (1, &trimmed[1..]),
        Some(b'-') => (-1, &trimmed[1..]),
        _ => return trimmed.parse::<Tz>().map(Timezone::Named).map_err(|_| invalid()),
    };
    let (hours, minutes) = rest.split_once(':').ok_or_else(invalid)?;
    let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
    if !two_digits(hours) || !two_digits(minutes) {
        return Err(invalid());
    }
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if minutes >= 60 {
        return Err(invalid());
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .map(Timezone::Fixed)
        .ok_or_else(invalid)
}

/// Check that a strftime format string has no invalid specifiers
pub fn validate_datetime_format(format: &str) -> Result<(), ConfigError> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(ConfigError::InvalidDatetimeFormat(format.to_string()));
    }
    Ok(())
}

/// Configuration options for rendering tweets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Site for `tweet.url`, `user.url` and mention `user_url`
    pub hostname: Hostname,

    /// Zone applied to `created_at` before formatting dates
    pub timezone: Timezone,

    /// strftime format for `tweet.datetime`; only set through the validating builder
    datetime_format: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            hostname: Hostname::default(),
            timezone: Timezone::default(),
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
        }
    }
}

impl RenderConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hostname
    pub fn with_hostname(mut self, hostname: Hostname) -> Self {
        self.hostname = hostname;
        self
    }

    /// Set the timezone
    pub fn with_timezone(mut self, timezone: Timezone) -> Self {
        self.timezone = timezone;
        self
    }

    /// Set the `tweet.datetime` format, rejecting invalid specifiers
    pub fn with_datetime_format(mut self, format: impl Into<String>) -> Result<Self, ConfigError> {
        let format = format.into();
        validate_datetime_format(&format)?;
        self.datetime_format = format;
        Ok(self)
    }

    /// strftime format for `tweet.datetime`
    pub fn datetime_format(&self) -> &str {
        &self.datetime_format
    }

    /// URL of a user's profile
    pub fn user_url(&self, username: &str) -> String {
        format!("{}/{}", self.hostname.base_url(), username)
    }

    /// URL of a tweet
    pub fn tweet_url(&self, username: &str, id: &str) -> String {
        format!("{}/{}/status/{}", self.hostname.base_url(), username, id)
    }
}
