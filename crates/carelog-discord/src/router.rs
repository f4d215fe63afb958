use std::sync::Arc;

use serenity::all::{
    Command, Context, CreateCommand, EventHandler, GatewayIntents, GuildId, Interaction, Ready,
};
use serenity::{async_trait, Client};

use carelog_core::{
    config::Config, desk::CareDesk, messaging::port::MessagingPort, prompt::PromptRegistry,
};

use crate::handlers;
use crate::DiscordMessenger;

pub const CAREPANEL_COMMAND: &str = "carepanel";

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub prompts: Arc<PromptRegistry>,
}

impl AppState {
    pub fn new(cfg: Arc<Config>) -> Self {
        let prompts = Arc::new(PromptRegistry::new(cfg.prompt_timeout));
        Self { cfg, prompts }
    }

    pub fn messenger(&self, ctx: &Context) -> Arc<dyn MessagingPort> {
        Arc::new(DiscordMessenger::new(ctx.http.clone(), ctx.cache.clone()))
    }

    pub fn desk(&self, ctx: &Context) -> CareDesk {
        CareDesk::new(self.cfg.clone(), self.messenger(ctx), self.prompts.clone())
    }
}

struct Router {
    state: Arc<AppState>,
}

#[async_trait]
impl EventHandler for Router {
    async fn ready(&self, ctx: Context, ready: Ready) {
        tracing::info!(user = %ready.user.name, guilds = ready.guilds.len(), "connected");

        // Panel buttons route by fixed custom ids, so panels posted before
        // this process started keep working without re-registration.
        let commands = vec![CreateCommand::new(CAREPANEL_COMMAND)
            .description(format!("Show {} care buttons", self.state.cfg.pet_name))];
        match Command::set_global_commands(&ctx.http, commands).await {
            Ok(synced) => tracing::info!(count = synced.len(), "application commands synced"),
            Err(e) => tracing::error!("failed to sync application commands: {e}"),
        }
    }

    async fn cache_ready(&self, ctx: Context, _guilds: Vec<GuildId>) {
        let messenger = self.state.messenger(&ctx);
        let channels = [
            ("toilet", self.state.cfg.toilet_channel),
            ("foodwater", self.state.cfg.foodwater_channel),
        ];
        for (name, channel) in channels {
            match messenger.resolve_channel(channel).await {
                Ok(true) => {}
                Ok(false) => tracing::warn!(
                    channel = channel.0,
                    "{name} channel is not reachable; its events will be dropped"
                ),
                Err(e) => tracing::error!(channel = channel.0, "could not check {name} channel: {e}"),
            }
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::Command(cmd) => handlers::handle_command(&ctx, &cmd, &self.state).await,
            Interaction::Component(c) => handlers::handle_component(&ctx, &c, &self.state).await,
            _ => {}
        }
    }
}

pub async fn run(cfg: Arc<Config>) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(cfg.clone()));

    let mut client = Client::builder(&cfg.discord_token, GatewayIntents::GUILDS)
        .event_handler(Router { state })
        .await?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutting down");
            shard_manager.shutdown_all().await;
        }
    });

    client.start().await?;
    Ok(())
}
