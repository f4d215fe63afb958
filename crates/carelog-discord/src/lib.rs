//! Discord adapter (serenity).
//!
//! This crate implements the `carelog-core` MessagingPort over the Discord
//! HTTP API and the gateway cache, and routes interactions into the core.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use serenity::all::{Cache, CreateAttachment, CreateMessage, Http, Mention};

pub mod handlers;
pub mod router;

use carelog_core::{
    domain::{ChannelId, MessageId, MessageRef, UserId},
    errors::Error,
    formatting::Markup,
    messaging::{port::MessagingPort, types::Attachment},
    Result,
};

/// Discord message markup: `<@id>` mentions and `<t:unix:F>` timestamps.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiscordMarkup;

impl Markup for DiscordMarkup {
    fn mention(&self, user: UserId) -> String {
        if user.0 == 0 {
            return format!("<@{}>", user.0);
        }
        Mention::User(serenity::all::UserId::new(user.0)).to_string()
    }

    fn long_datetime(&self, at: DateTime<Utc>) -> String {
        // "F" is Discord's long date/time style, localised by each client.
        format!("<t:{}:F>", at.timestamp())
    }
}

#[derive(Clone)]
pub struct DiscordMessenger {
    http: Arc<Http>,
    cache: Arc<Cache>,
}

impl DiscordMessenger {
    pub fn new(http: Arc<Http>, cache: Arc<Cache>) -> Self {
        Self { http, cache }
    }

    fn dc_channel(channel: ChannelId) -> Option<serenity::all::ChannelId> {
        (channel.0 != 0).then(|| serenity::all::ChannelId::new(channel.0))
    }

    fn map_err(e: serenity::Error) -> Error {
        Error::Delivery(format!("discord error: {e}"))
    }
}

/// 404 Unknown Channel and 403 Missing Access: the channel is gone for this bot.
fn is_missing_channel(status: u16) -> bool {
    matches!(status, 403 | 404)
}

#[async_trait]
impl MessagingPort for DiscordMessenger {
    fn markup(&self) -> &dyn Markup {
        &DiscordMarkup
    }

    async fn resolve_channel(&self, channel: ChannelId) -> Result<bool> {
        let Some(id) = Self::dc_channel(channel) else {
            return Ok(false);
        };
        if self.cache.channel(id).is_some() {
            return Ok(true);
        }
        // Threads and channels of guilds not yet cached are only reachable over HTTP.
        match self.http.get_channel(id).await {
            Ok(_) => Ok(true),
            Err(serenity::Error::Http(e))
                if e.status_code()
                    .is_some_and(|status| is_missing_channel(status.as_u16())) =>
            {
                tracing::debug!(channel = channel.0, "channel lookup: {e}");
                Ok(false)
            }
            Err(e) => Err(Self::map_err(e)),
        }
    }

    async fn send_message(
        &self,
        channel: ChannelId,
        content: &str,
        attachment: Option<Attachment>,
    ) -> Result<MessageRef> {
        let id = Self::dc_channel(channel)
            .ok_or_else(|| Error::Delivery(format!("invalid channel id {}", channel.0)))?;

        let mut builder = CreateMessage::new().content(content);
        if let Some(file) = attachment {
            builder = builder.add_file(CreateAttachment::bytes(file.bytes, file.filename));
        }

        let msg = id
            .send_message(&self.http, builder)
            .await
            .map_err(Self::map_err)?;

        Ok(MessageRef {
            channel_id: ChannelId(msg.channel_id.get()),
            message_id: MessageId(msg.id.get()),
        })
    }
}
