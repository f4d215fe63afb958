use crate::{catalog::SelectOption, domain::PromptId};

/// File attached to a log message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonStyle {
    Primary,
    Secondary,
    Success,
    Danger,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelButton {
    pub label: &'static str,
    pub custom_id: String,
    pub style: ButtonStyle,
}

/// Single-select menu attached to a Food/Water prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectMenu {
    pub prompt: PromptId,
    pub custom_id: String,
    pub placeholder: &'static str,
    pub options: Vec<SelectOption>,
}

/// What the adapter should answer the invoking user with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Ack {
    /// Visible to the acting user only.
    Ephemeral(String),
    /// Ephemeral prompt carrying a select menu.
    Prompt { content: String, menu: SelectMenu },
    /// Replace the prompt text and drop its controls.
    ClosePrompt(String),
    /// Public message carrying the care panel buttons.
    Panel {
        content: String,
        buttons: Vec<PanelButton>,
    },
}

impl Ack {
    pub fn text(&self) -> &str {
        match self {
            Self::Ephemeral(s) | Self::ClosePrompt(s) => s,
            Self::Prompt { content, .. } | Self::Panel { content, .. } => content,
        }
    }
}
