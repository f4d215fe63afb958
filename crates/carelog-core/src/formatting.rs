//! Channel log line formatting.

use chrono::{DateTime, Utc};

use crate::domain::UserId;

/// Separator between the log line fields (U+FF5C FULLWIDTH VERTICAL LINE).
pub const FIELD_SEPARATOR: char = '｜';

/// Platform-specific rendering of user references and timestamps.
pub trait Markup: Send + Sync {
    /// Mention reference for a user (not a display name).
    fn mention(&self, user: UserId) -> String;

    /// Long-form absolute date/time presentation.
    fn long_datetime(&self, at: DateTime<Utc>) -> String;
}

/// One care event, built by a handler and consumed by the dispatcher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEvent {
    pub emoji: &'static str,
    pub title: &'static str,
    pub extra: String,
    pub user: UserId,
    pub at: DateTime<Utc>,
}

impl LogEvent {
    pub fn new(emoji: &'static str, title: &'static str, user: UserId, at: DateTime<Utc>) -> Self {
        Self {
            emoji,
            title,
            extra: String::new(),
            user,
            at,
        }
    }

    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = extra.into();
        self
    }

    pub fn render(&self, markup: &dyn Markup) -> String {
        format_log_line(
            self.emoji,
            self.title,
            &self.extra,
            &markup.mention(self.user),
            &markup.long_datetime(self.at),
        )
    }
}

/// `"{emoji} **{title}** {extra}｜{mention}｜{timestamp}"`.
///
/// An empty `extra` keeps the space after the title so lines stay identical
/// to the ones already in the channels.
pub fn format_log_line(
    emoji: &str,
    title: &str,
    extra: &str,
    mention: &str,
    timestamp: &str,
) -> String {
    format!("{emoji} **{title}** {extra}{FIELD_SEPARATOR}{mention}{FIELD_SEPARATOR}{timestamp}")
}
