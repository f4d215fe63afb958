use std::sync::Arc;

use chrono::Utc;
use serenity::all::{
    ComponentInteraction, ComponentInteractionDataKind, Context,
};

use carelog_core::{
    actions::CareAction,
    desk::{Invocation, FAILURE_TEXT},
    domain::{PromptId, UserId},
    messaging::types::Ack,
};

use crate::handlers::{close_controls, render_ack};
use crate::router::AppState;

pub async fn handle_component(ctx: &Context, c: &ComponentInteraction, state: &Arc<AppState>) {
    let Some(action) = CareAction::parse(&c.data.custom_id) else {
        tracing::debug!(custom_id = %c.data.custom_id, "ignoring foreign component");
        return;
    };

    let values: &[String] = match &c.data.kind {
        ComponentInteractionDataKind::StringSelect { values } => values.as_slice(),
        _ => &[],
    };
    let inv = Invocation {
        interaction: c.id.get(),
        user: UserId(c.user.id.get()),
        at: Utc::now(),
    };

    let ack = match state.desk(ctx).handle(action, values, &inv).await {
        Ok(ack) => ack,
        Err(e) => {
            // Only reachable if a token did not come from the catalog.
            tracing::error!(
                custom_id = %c.data.custom_id,
                user = inv.user.0,
                "care action failed: {e}"
            );
            Ack::Ephemeral(FAILURE_TEXT.to_string())
        }
    };

    if let Err(e) = c.create_response(&ctx.http, render_ack(&ack)).await {
        tracing::error!(
            custom_id = %c.data.custom_id,
            user = inv.user.0,
            "failed to acknowledge interaction: {e}"
        );
        return;
    }

    if let Ack::Prompt { menu, .. } = &ack {
        schedule_expiry(ctx, c, state, menu.prompt);
    }
}

/// Strip the select control from a prompt nobody answered in time.
fn schedule_expiry(
    ctx: &Context,
    c: &ComponentInteraction,
    state: &Arc<AppState>,
    prompt: PromptId,
) {
    let http = ctx.http.clone();
    let prompts = state.prompts.clone();
    let interaction = c.clone();

    tokio::spawn(async move {
        tokio::time::sleep(prompts.timeout()).await;
        if !prompts.expire(prompt).await {
            return;
        }
        tracing::debug!(prompt = prompt.0, "prompt expired");
        if let Err(e) = interaction.edit_response(&http, close_controls()).await {
            tracing::debug!(prompt = prompt.0, "failed to close expired prompt: {e}");
        }
    });
}
