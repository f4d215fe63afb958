use async_trait::async_trait;

use crate::{
    domain::{ChannelId, MessageRef},
    formatting::Markup,
    messaging::types::Attachment,
    Result,
};

/// Outbound side of the chat platform.
///
/// Handlers only talk to the platform through this trait, so tests can
/// substitute an in-memory fake.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    /// How mentions and timestamps are written on this platform.
    fn markup(&self) -> &dyn Markup;

    /// Whether `channel` exists and can be posted to.
    ///
    /// `Ok(false)` means the channel is gone or access was lost. A lookup that
    /// could not be answered (timeouts, server errors) is `Err(Error::Delivery)`.
    async fn resolve_channel(&self, channel: ChannelId) -> Result<bool>;

    async fn send_message(
        &self,
        channel: ChannelId,
        content: &str,
        attachment: Option<Attachment>,
    ) -> Result<MessageRef>;
}
