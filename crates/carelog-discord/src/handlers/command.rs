use std::sync::Arc;

use serenity::all::{CommandInteraction, Context};

use crate::handlers::render_ack;
use crate::router::{AppState, CAREPANEL_COMMAND};

pub async fn handle_command(ctx: &Context, cmd: &CommandInteraction, state: &Arc<AppState>) {
    if cmd.data.name != CAREPANEL_COMMAND {
        tracing::debug!(command = %cmd.data.name, "ignoring unknown command");
        return;
    }

    let ack = state.desk(ctx).panel();
    if let Err(e) = cmd.create_response(&ctx.http, render_ack(&ack)).await {
        tracing::error!(user = cmd.user.id.get(), "failed to post care panel: {e}");
    }
}
