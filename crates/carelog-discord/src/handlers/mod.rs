//! Discord interaction handlers.
//!
//! Each handler is a thin adapter that:
//! - maps the interaction to a core action
//! - runs it through `CareDesk`
//! - renders the returned `Ack` as an interaction response

use serenity::all::{
    ButtonStyle as DcButtonStyle, CreateActionRow, CreateButton, CreateInteractionResponse,
    CreateInteractionResponseMessage, CreateSelectMenu, CreateSelectMenuKind,
    CreateSelectMenuOption, EditInteractionResponse,
};

use carelog_core::messaging::types::{Ack, ButtonStyle, PanelButton, SelectMenu};

mod command;
mod component;

pub use command::handle_command;
pub use component::handle_component;

/// Render a core acknowledgment as a Discord interaction response.
pub fn render_ack(ack: &Ack) -> CreateInteractionResponse {
    match ack {
        Ack::Ephemeral(text) => CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new()
                .content(text.clone())
                .ephemeral(true),
        ),
        Ack::Prompt { content, menu } => CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new()
                .content(content.clone())
                .ephemeral(true)
                .components(vec![CreateActionRow::SelectMenu(select_menu(menu))]),
        ),
        Ack::ClosePrompt(text) => CreateInteractionResponse::UpdateMessage(
            CreateInteractionResponseMessage::new()
                .content(text.clone())
                .components(vec![]),
        ),
        Ack::Panel { content, buttons } => CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new()
                .content(content.clone())
                .components(vec![CreateActionRow::Buttons(
                    buttons.iter().map(button).collect(),
                )]),
        ),
    }
}

/// Edit that leaves a prompt's text as is and removes its controls.
pub(crate) fn close_controls() -> EditInteractionResponse {
    EditInteractionResponse::new().components(vec![])
}

fn select_menu(menu: &SelectMenu) -> CreateSelectMenu {
    let options = menu
        .options
        .iter()
        .map(|o| CreateSelectMenuOption::new(o.label.clone(), o.value.clone()))
        .collect();
    CreateSelectMenu::new(menu.custom_id.clone(), CreateSelectMenuKind::String { options })
        .placeholder(menu.placeholder)
        .min_values(1)
        .max_values(1)
}

fn button(b: &PanelButton) -> CreateButton {
    CreateButton::new(b.custom_id.clone())
        .label(b.label)
        .style(button_style(b.style))
}

fn button_style(style: ButtonStyle) -> DcButtonStyle {
    match style {
        ButtonStyle::Primary => DcButtonStyle::Primary,
        ButtonStyle::Secondary => DcButtonStyle::Secondary,
        ButtonStyle::Success => DcButtonStyle::Success,
        ButtonStyle::Danger => DcButtonStyle::Danger,
    }
}

#[cfg(test)]
mod tests {
    use carelog_core::{
        actions::panel_buttons,
        catalog::{self, WATER_PLACEHOLDER},
        domain::PromptId,
    };
    use serde_json::Value;

    use super::*;

    const EPHEMERAL: u64 = 1 << 6;
    const CHANNEL_MESSAGE: u64 = 4;
    const UPDATE_MESSAGE: u64 = 7;

    fn json(ack: &Ack) -> Value {
        serde_json::to_value(render_ack(ack)).unwrap()
    }

    fn flags(v: &Value) -> u64 {
        v["data"]["flags"].as_u64().unwrap_or(0)
    }

    #[test]
    fn confirmation_is_an_ephemeral_message() {
        let v = json(&Ack::Ephemeral("💩 うんちを記録しました。".to_string()));

        assert_eq!(v["type"], CHANNEL_MESSAGE);
        assert_eq!(v["data"]["content"], "💩 うんちを記録しました。");
        assert_ne!(flags(&v) & EPHEMERAL, 0);
    }

    #[test]
    fn prompt_is_ephemeral_with_one_single_choice_select() {
        let menu = SelectMenu {
            prompt: PromptId(77),
            custom_id: "carelog:water:77".to_string(),
            placeholder: WATER_PLACEHOLDER,
            options: catalog::water_options(),
        };
        let v = json(&Ack::Prompt {
            content: "🚰".to_string(),
            menu,
        });

        assert_eq!(v["type"], CHANNEL_MESSAGE);
        assert_ne!(flags(&v) & EPHEMERAL, 0);

        let rows = v["data"]["components"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        let controls = rows[0]["components"].as_array().unwrap();
        assert_eq!(controls.len(), 1);

        let select = &controls[0];
        assert_eq!(select["custom_id"], "carelog:water:77");
        assert_eq!(select["min_values"], 1);
        assert_eq!(select["max_values"], 1);
        assert_eq!(select["placeholder"], WATER_PLACEHOLDER);
        let options = select["options"].as_array().unwrap();
        assert_eq!(options.len(), 15);
        assert_eq!(options[0]["label"], "残り 110ml");
        assert_eq!(options[0]["value"], "110");
    }

    #[test]
    fn closing_a_prompt_updates_it_in_place_without_controls() {
        let v = json(&Ack::ClosePrompt("🥣 おやつ（1パック）を記録しました。".to_string()));

        assert_eq!(v["type"], UPDATE_MESSAGE);
        assert_eq!(v["data"]["content"], "🥣 おやつ（1パック）を記録しました。");
        assert_eq!(v["data"]["components"], Value::Array(vec![]));
    }

    #[test]
    fn panel_is_visible_to_the_whole_channel() {
        let v = json(&Ack::Panel {
            content: "Yanagi care log buttons:".to_string(),
            buttons: panel_buttons(),
        });

        assert_eq!(v["type"], CHANNEL_MESSAGE);
        assert_eq!(flags(&v) & EPHEMERAL, 0);

        let buttons = v["data"]["components"][0]["components"].as_array().unwrap();
        let ids: Vec<_> = buttons.iter().map(|b| b["custom_id"].clone()).collect();
        assert_eq!(
            ids,
            ["yanagi_poop", "yanagi_pee", "yanagi_food", "yanagi_water"]
        );
    }

    #[test]
    fn expiry_edit_strips_controls_only() {
        let v = serde_json::to_value(close_controls()).unwrap();

        assert_eq!(v["components"], Value::Array(vec![]));
        assert!(v.get("content").is_none());
    }

    #[test]
    fn panel_colours_follow_discord_styles() {
        assert_eq!(button_style(ButtonStyle::Primary), DcButtonStyle::Primary);
        assert_eq!(button_style(ButtonStyle::Secondary), DcButtonStyle::Secondary);
        assert_eq!(button_style(ButtonStyle::Success), DcButtonStyle::Success);
        assert_eq!(button_style(ButtonStyle::Danger), DcButtonStyle::Danger);
    }
}
