//! Interaction handlers: one per care action.
//!
//! Handlers never touch the platform directly. They log through the
//! dispatcher and return an [`Ack`] that the adapter renders back to the user.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    actions::{panel_buttons, CareAction},
    catalog::{self, FoodSelection, WaterSelection},
    config::Config,
    dispatch::{Dispatch, LogDispatcher},
    domain::{ChannelId, PromptId, UserId},
    errors::Error,
    formatting::LogEvent,
    messaging::{
        port::MessagingPort,
        types::{Ack, SelectMenu},
    },
    prompt::{Claim, PromptKind, PromptRegistry},
    Result,
};

pub const EXPIRED_TEXT: &str = "⌛ この選択は締め切られました。もう一度ボタンから記録してください。";
pub const DELIVERY_FAILED_TEXT: &str = "⚠️ 記録を送信できませんでした。もう一度お試しください。";
pub const FAILURE_TEXT: &str = "⚠️ 処理できませんでした。";

/// Who triggered an interaction, and when.
#[derive(Clone, Copy, Debug)]
pub struct Invocation {
    /// Platform id of the interaction; doubles as the id of a prompt it opens.
    pub interaction: u64,
    pub user: UserId,
    pub at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct CareDesk {
    cfg: Arc<Config>,
    dispatcher: LogDispatcher,
    prompts: Arc<PromptRegistry>,
}

impl CareDesk {
    pub fn new(
        cfg: Arc<Config>,
        messenger: Arc<dyn MessagingPort>,
        prompts: Arc<PromptRegistry>,
    ) -> Self {
        Self {
            cfg,
            dispatcher: LogDispatcher::new(messenger),
            prompts,
        }
    }

    /// Route an action to its handler. `values` are the selected tokens of a menu.
    pub async fn handle(
        &self,
        action: CareAction,
        values: &[String],
        inv: &Invocation,
    ) -> Result<Ack> {
        match action {
            CareAction::Poop => Ok(self.poop(inv).await),
            CareAction::Pee => Ok(self.pee(inv).await),
            CareAction::OpenFood => Ok(self.open_food(inv).await),
            CareAction::OpenWater => Ok(self.open_water(inv).await),
            CareAction::Pick {
                kind: PromptKind::Food,
                prompt,
            } => self.pick_food(prompt, values, inv).await,
            CareAction::Pick {
                kind: PromptKind::Water,
                prompt,
            } => self.pick_water(prompt, values, inv).await,
        }
    }

    /// Reply to the `carepanel` command.
    pub fn panel(&self) -> Ack {
        Ack::Panel {
            content: format!("{} care log buttons:", self.cfg.pet_name),
            buttons: panel_buttons(),
        }
    }

    async fn poop(&self, inv: &Invocation) -> Ack {
        let event = LogEvent::new("💩", "Poop", inv.user, inv.at);
        if !self.log(self.cfg.toilet_channel, &event).await {
            return Ack::Ephemeral(DELIVERY_FAILED_TEXT.to_string());
        }
        Ack::Ephemeral("💩 うんちを記録しました。".to_string())
    }

    async fn pee(&self, inv: &Invocation) -> Ack {
        let event = LogEvent::new("💧", "Pee", inv.user, inv.at);
        if !self.log(self.cfg.toilet_channel, &event).await {
            return Ack::Ephemeral(DELIVERY_FAILED_TEXT.to_string());
        }
        Ack::Ephemeral("💧 おしっこを記録しました。".to_string())
    }

    async fn open_food(&self, inv: &Invocation) -> Ack {
        let prompt = self.open_prompt(PromptKind::Food, inv).await;
        Ack::Prompt {
            content: "🥣 ご飯ログ：量と種類を選んでください。".to_string(),
            menu: SelectMenu {
                prompt,
                custom_id: pick_id(PromptKind::Food, prompt),
                placeholder: catalog::FOOD_PLACEHOLDER,
                options: catalog::food_options(),
            },
        }
    }

    async fn open_water(&self, inv: &Invocation) -> Ack {
        let prompt = self.open_prompt(PromptKind::Water, inv).await;
        Ack::Prompt {
            content: format!(
                "🚰 水ログ：補充前の残量（{}mlボウル・110〜250ml）を選んでください。",
                self.cfg.water_bowl_ml
            ),
            menu: SelectMenu {
                prompt,
                custom_id: pick_id(PromptKind::Water, prompt),
                placeholder: catalog::WATER_PLACEHOLDER,
                options: catalog::water_options(),
            },
        }
    }

    async fn pick_food(
        &self,
        prompt: PromptId,
        values: &[String],
        inv: &Invocation,
    ) -> Result<Ack> {
        let selection = FoodSelection::parse(single_value(values)?)?;
        if self.prompts.claim(prompt, PromptKind::Food, inv.at).await == Claim::Inert {
            return Ok(Ack::ClosePrompt(EXPIRED_TEXT.to_string()));
        }

        let event = LogEvent::new("🥣", "Food", inv.user, inv.at).with_extra(selection.extra());
        if !self.log(self.cfg.foodwater_channel, &event).await {
            return Ok(Ack::ClosePrompt(DELIVERY_FAILED_TEXT.to_string()));
        }
        Ok(Ack::ClosePrompt(selection.ack()))
    }

    async fn pick_water(
        &self,
        prompt: PromptId,
        values: &[String],
        inv: &Invocation,
    ) -> Result<Ack> {
        let selection = WaterSelection::parse(single_value(values)?)?;
        if self.prompts.claim(prompt, PromptKind::Water, inv.at).await == Claim::Inert {
            return Ok(Ack::ClosePrompt(EXPIRED_TEXT.to_string()));
        }

        let bowl = self.cfg.water_bowl_ml;
        let event =
            LogEvent::new("🚰", "Water refill", inv.user, inv.at).with_extra(selection.extra(bowl));
        if !self.log(self.cfg.foodwater_channel, &event).await {
            return Ok(Ack::ClosePrompt(DELIVERY_FAILED_TEXT.to_string()));
        }
        Ok(Ack::ClosePrompt(selection.ack(bowl)))
    }

    async fn open_prompt(&self, kind: PromptKind, inv: &Invocation) -> PromptId {
        let id = PromptId(inv.interaction);
        self.prompts.open(id, kind, inv.at).await;
        id
    }

    /// Dispatch an event, containing delivery failures to this interaction.
    ///
    /// Returns `false` when the platform rejected the send or could not answer
    /// the channel lookup. A skipped dispatch (channel gone) counts as
    /// delivered and the user gets the normal confirmation.
    async fn log(&self, channel: ChannelId, event: &LogEvent) -> bool {
        match self.dispatcher.dispatch_event(channel, event).await {
            Ok(Dispatch::Sent(_)) | Ok(Dispatch::Skipped) => true,
            Err(e) => {
                tracing::error!(
                    channel = channel.0,
                    user = event.user.0,
                    title = event.title,
                    "failed to deliver care log: {e}"
                );
                false
            }
        }
    }
}

fn pick_id(kind: PromptKind, prompt: PromptId) -> String {
    CareAction::Pick { kind, prompt }.custom_id()
}

fn single_value(values: &[String]) -> Result<&str> {
    match values {
        [one] => Ok(one.as_str()),
        _ => Err(Error::invalid_selection(values.join(","))),
    }
}
