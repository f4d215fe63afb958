//! In-memory stand-ins for the platform, shared by unit tests.

use std::{collections::HashSet, sync::Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    domain::{ChannelId, MessageId, MessageRef, UserId},
    errors::Error,
    formatting::Markup,
    messaging::{port::MessagingPort, types::Attachment},
    Result,
};

/// Renders mentions as `@U<id>` and timestamps as RFC 3339.
pub(crate) struct PlainMarkup;

impl Markup for PlainMarkup {
    fn mention(&self, user: UserId) -> String {
        format!("@U{}", user.0)
    }

    fn long_datetime(&self, at: DateTime<Utc>) -> String {
        at.to_rfc3339()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Sent {
    pub channel: ChannelId,
    pub content: String,
    pub attachment: Option<Attachment>,
}

#[derive(Default)]
pub(crate) struct FakeMessenger {
    channels: HashSet<u64>,
    fail_sends: bool,
    fail_lookups: bool,
    next_id: Mutex<u64>,
    sent: Mutex<Vec<Sent>>,
}

impl FakeMessenger {
    pub fn with_channels(ids: &[u64]) -> Self {
        Self {
            channels: ids.iter().copied().collect(),
            ..Default::default()
        }
    }

    /// Channels resolve, but every send is rejected.
    pub fn failing(ids: &[u64]) -> Self {
        Self {
            fail_sends: true,
            ..Self::with_channels(ids)
        }
    }

    /// The platform cannot answer channel lookups at all (e.g. a 503).
    pub fn unreachable() -> Self {
        Self {
            fail_lookups: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessagingPort for FakeMessenger {
    fn markup(&self) -> &dyn Markup {
        &PlainMarkup
    }

    async fn resolve_channel(&self, channel: ChannelId) -> Result<bool> {
        if self.fail_lookups {
            return Err(Error::Delivery("503 Service Unavailable".to_string()));
        }
        Ok(self.channels.contains(&channel.0))
    }

    async fn send_message(
        &self,
        channel: ChannelId,
        content: &str,
        attachment: Option<Attachment>,
    ) -> Result<MessageRef> {
        if self.fail_sends {
            return Err(Error::Delivery("missing permissions".to_string()));
        }
        self.sent.lock().unwrap().push(Sent {
            channel,
            content: content.to_string(),
            attachment,
        });
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        Ok(MessageRef {
            channel_id: channel,
            message_id: MessageId(*next),
        })
    }
}
