//! Lifecycle of Food/Water selection prompts.
//!
//! A prompt is `AwaitingSelection` from the moment it is opened until either
//! one selection claims it (`LoggedAndClosed`) or the inactivity window
//! passes (`Expired`). Closed and expired prompts are forgotten, so any later
//! selection finds nothing to claim.

use std::{collections::HashMap, time::Duration};

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::domain::PromptId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PromptKind {
    Food,
    Water,
}

impl PromptKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Water => "water",
        }
    }
}

/// Result of trying to claim a prompt with a selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Claim {
    /// First selection inside the window; the caller must log it.
    Fresh,
    /// Already claimed, expired, or opened before a restart.
    Inert,
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    kind: PromptKind,
    opened_at: DateTime<Utc>,
}

pub struct PromptRegistry {
    timeout: Duration,
    pending: Mutex<HashMap<PromptId, Pending>>,
}

impl PromptRegistry {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            pending: Mutex::new(HashMap::new()),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Register a freshly opened prompt. Stale entries are dropped on the way.
    pub async fn open(&self, id: PromptId, kind: PromptKind, now: DateTime<Utc>) {
        let mut map = self.pending.lock().await;
        map.retain(|_, p| !self.is_expired(p, now));
        map.insert(
            id,
            Pending {
                kind,
                opened_at: now,
            },
        );
    }

    /// Claim a prompt for its single selection.
    ///
    /// A fresh or expired entry is removed. A kind mismatch never claims and
    /// leaves the prompt open for the selection it was built for.
    pub async fn claim(&self, id: PromptId, kind: PromptKind, now: DateTime<Utc>) -> Claim {
        let mut map = self.pending.lock().await;
        match map.get(&id).copied() {
            Some(p) if p.kind == kind && !self.is_expired(&p, now) => {
                map.remove(&id);
                Claim::Fresh
            }
            Some(p) if p.kind != kind => {
                tracing::warn!(
                    prompt = id.0,
                    expected = p.kind.as_str(),
                    got = kind.as_str(),
                    "selection kind does not match prompt"
                );
                Claim::Inert
            }
            Some(_) => {
                map.remove(&id);
                Claim::Inert
            }
            None => Claim::Inert,
        }
    }

    /// Expire a prompt whose window has run out.
    ///
    /// Returns `true` if it was still awaiting a selection, i.e. the caller
    /// should strip its controls.
    pub async fn expire(&self, id: PromptId) -> bool {
        self.pending.lock().await.remove(&id).is_some()
    }

    #[cfg(test)]
    pub(crate) async fn pending_len(&self) -> usize {
        self.pending.lock().await.len()
    }

    fn is_expired(&self, p: &Pending, now: DateTime<Utc>) -> bool {
        let age = now.signed_duration_since(p.opened_at);
        age.to_std().map(|d| d >= self.timeout).unwrap_or(false)
    }
}
