use std::sync::Arc;

use crate::{
    domain::{ChannelId, MessageRef},
    formatting::LogEvent,
    messaging::{port::MessagingPort, types::Attachment},
    Result,
};

/// Outcome of a dispatch that did not fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    Sent(MessageRef),
    /// Channel could not be resolved; nothing was sent.
    Skipped,
}

/// Delivers formatted log lines to their destination channel.
#[derive(Clone)]
pub struct LogDispatcher {
    messenger: Arc<dyn MessagingPort>,
}

impl LogDispatcher {
    pub fn new(messenger: Arc<dyn MessagingPort>) -> Self {
        Self { messenger }
    }

    pub async fn dispatch(
        &self,
        channel: ChannelId,
        content: &str,
        attachment: Option<Attachment>,
    ) -> Result<Dispatch> {
        if !self.messenger.resolve_channel(channel).await? {
            // Misconfiguration or the bot lost access; the interaction must still succeed.
            tracing::warn!(channel = channel.0, "log channel not found, dropping event");
            return Ok(Dispatch::Skipped);
        }

        let msg = self
            .messenger
            .send_message(channel, content, attachment)
            .await?;
        tracing::debug!(channel = channel.0, message = msg.message_id.0, "log sent");
        Ok(Dispatch::Sent(msg))
    }

    /// Render `event` with the platform markup and dispatch it.
    pub async fn dispatch_event(&self, channel: ChannelId, event: &LogEvent) -> Result<Dispatch> {
        let content = event.render(self.messenger.markup());
        self.dispatch(channel, &content, None).await
    }
}
