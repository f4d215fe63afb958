//! Mapping between component custom ids and care actions.
//!
//! Panel button ids are fixed so panels posted before a restart keep routing.
//! Prompt select ids carry the prompt they belong to.

use crate::{
    domain::PromptId,
    messaging::types::{ButtonStyle, PanelButton},
    prompt::PromptKind,
};

const POOP_ID: &str = "yanagi_poop";
const PEE_ID: &str = "yanagi_pee";
const FOOD_ID: &str = "yanagi_food";
const WATER_ID: &str = "yanagi_water";
const PICK_PREFIX: &str = "carelog";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CareAction {
    Poop,
    Pee,
    OpenFood,
    OpenWater,
    Pick { kind: PromptKind, prompt: PromptId },
}

impl CareAction {
    pub fn parse(custom_id: &str) -> Option<Self> {
        match custom_id {
            POOP_ID => Some(Self::Poop),
            PEE_ID => Some(Self::Pee),
            FOOD_ID => Some(Self::OpenFood),
            WATER_ID => Some(Self::OpenWater),
            _ => parse_pick(custom_id),
        }
    }

    pub fn custom_id(&self) -> String {
        match self {
            Self::Poop => POOP_ID.to_string(),
            Self::Pee => PEE_ID.to_string(),
            Self::OpenFood => FOOD_ID.to_string(),
            Self::OpenWater => WATER_ID.to_string(),
            Self::Pick { kind, prompt } => {
                format!("{PICK_PREFIX}:{}:{}", kind.as_str(), prompt.0)
            }
        }
    }
}

fn parse_pick(custom_id: &str) -> Option<CareAction> {
    let mut parts = custom_id.split(':');
    if parts.next()? != PICK_PREFIX {
        return None;
    }
    let kind = match parts.next()? {
        "food" => PromptKind::Food,
        "water" => PromptKind::Water,
        _ => return None,
    };
    let prompt = PromptId(parts.next()?.parse().ok()?);
    if parts.next().is_some() {
        return None;
    }
    Some(CareAction::Pick { kind, prompt })
}

/// The four buttons of the care panel, in display order.
pub fn panel_buttons() -> Vec<PanelButton> {
    [
        ("💩 Poop", CareAction::Poop, ButtonStyle::Primary),
        ("💧 Pee", CareAction::Pee, ButtonStyle::Secondary),
        ("🥣 Food", CareAction::OpenFood, ButtonStyle::Success),
        ("🚰 Water", CareAction::OpenWater, ButtonStyle::Danger),
    ]
    .into_iter()
    .map(|(label, action, style)| PanelButton {
        label,
        custom_id: action.custom_id(),
        style,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_ids_are_the_persistent_ones() {
        let ids: Vec<String> = panel_buttons().into_iter().map(|b| b.custom_id).collect();
        assert_eq!(
            ids,
            ["yanagi_poop", "yanagi_pee", "yanagi_food", "yanagi_water"]
        );
    }

    #[test]
    fn every_action_routes_back_from_its_id() {
        let actions = [
            CareAction::Poop,
            CareAction::Pee,
            CareAction::OpenFood,
            CareAction::OpenWater,
            CareAction::Pick {
                kind: PromptKind::Food,
                prompt: PromptId(1234567890123),
            },
            CareAction::Pick {
                kind: PromptKind::Water,
                prompt: PromptId(1),
            },
        ];
        for a in actions {
            assert_eq!(CareAction::parse(&a.custom_id()), Some(a));
        }
    }

    #[test]
    fn foreign_ids_do_not_route() {
        for id in [
            "",
            "askuser:1:2",
            "carelog:food",
            "carelog:snack:1",
            "carelog:food:x",
            "carelog:food:1:2",
            "YANAGI_POOP",
        ] {
            assert_eq!(CareAction::parse(id), None, "{id:?}");
        }
    }
}
