//! Selectable menu entries for the Food and Water prompts.
//!
//! Tokens are what the platform hands back when a user picks an option, so
//! their shape is fixed: `"<g>:dry"`, `"wetpack"`, `"treatpack"` for food and
//! the plain remaining volume for water.

use crate::{errors::Error, Result};

pub const DRY_GRAMS_MIN: u32 = 10;
pub const DRY_GRAMS_MAX: u32 = 100;
pub const WATER_REMAIN_MIN: u32 = 110;
pub const WATER_REMAIN_MAX: u32 = 250;
const STEP: u32 = 10;

const WET_TOKEN: &str = "wetpack";
const TREAT_TOKEN: &str = "treatpack";
const DRY_SUFFIX: &str = ":dry";

pub const FOOD_PLACEHOLDER: &str = "ご飯の量・種類を選んでください";
pub const WATER_PLACEHOLDER: &str = "補充前にどれくらい残っていましたか？（110〜250ml）";

/// One entry of a single-select menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FoodSelection {
    Dry { grams: u32 },
    WetPack,
    TreatPack,
}

impl FoodSelection {
    pub fn parse(token: &str) -> Result<Self> {
        match token {
            WET_TOKEN => Ok(Self::WetPack),
            TREAT_TOKEN => Ok(Self::TreatPack),
            _ => {
                let grams = token
                    .strip_suffix(DRY_SUFFIX)
                    .and_then(|g| g.parse::<u32>().ok())
                    .filter(|g| is_on_grid(*g, DRY_GRAMS_MIN, DRY_GRAMS_MAX))
                    .ok_or_else(|| Error::invalid_selection(token))?;
                Ok(Self::Dry { grams })
            }
        }
    }

    pub fn token(&self) -> String {
        match self {
            Self::Dry { grams } => format!("{grams}{DRY_SUFFIX}"),
            Self::WetPack => WET_TOKEN.to_string(),
            Self::TreatPack => TREAT_TOKEN.to_string(),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Dry { grams } => format!("{grams}g Dry"),
            Self::WetPack => "Wet food (1 pack)".to_string(),
            Self::TreatPack => "Treat (1 pack)".to_string(),
        }
    }

    /// Detail segment of the channel log line.
    pub fn extra(&self) -> String {
        match self {
            Self::Dry { grams } => format!("({grams}g Dry)"),
            Self::WetPack => "(Wet food, 1 pack)".to_string(),
            Self::TreatPack => "(Treat, 1 pack)".to_string(),
        }
    }

    /// Confirmation shown in place of the prompt.
    pub fn ack(&self) -> String {
        match self {
            Self::Dry { grams } => format!("🥣 ドライフード {grams}g を記録しました。"),
            Self::WetPack => "🥣 ウェットフード（1パック）を記録しました。".to_string(),
            Self::TreatPack => "🥣 おやつ（1パック）を記録しました。".to_string(),
        }
    }
}

/// Volume left in the bowl before a refill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaterSelection {
    pub remaining_ml: u32,
}

impl WaterSelection {
    pub fn parse(token: &str) -> Result<Self> {
        token
            .parse::<u32>()
            .ok()
            .filter(|r| is_on_grid(*r, WATER_REMAIN_MIN, WATER_REMAIN_MAX))
            .map(|remaining_ml| Self { remaining_ml })
            .ok_or_else(|| Error::invalid_selection(token))
    }

    pub fn token(&self) -> String {
        self.remaining_ml.to_string()
    }

    pub fn label(&self) -> String {
        format!("残り {}ml", self.remaining_ml)
    }

    /// How much was drunk from a bowl of `capacity_ml`; never negative.
    pub fn drank(&self, capacity_ml: u32) -> u32 {
        capacity_ml.saturating_sub(self.remaining_ml)
    }

    pub fn extra(&self, capacity_ml: u32) -> String {
        format!(
            "(bowl {capacity_ml}ml: drank {}ml, left {}ml)",
            self.drank(capacity_ml),
            self.remaining_ml
        )
    }

    pub fn ack(&self, capacity_ml: u32) -> String {
        format!(
            "🚰 水を補充しました：{}ml 飲んで、残り {}ml でした。",
            self.drank(capacity_ml),
            self.remaining_ml
        )
    }
}

fn is_on_grid(v: u32, min: u32, max: u32) -> bool {
    (min..=max).contains(&v) && v % STEP == 0
}

/// Food choices: dry food by weight ascending, then wet food, then treat.
pub fn food_selections() -> Vec<FoodSelection> {
    (DRY_GRAMS_MIN..=DRY_GRAMS_MAX)
        .step_by(STEP as usize)
        .map(|grams| FoodSelection::Dry { grams })
        .chain([FoodSelection::WetPack, FoodSelection::TreatPack])
        .collect()
}

/// Remaining-volume choices, ascending.
pub fn water_selections() -> Vec<WaterSelection> {
    (WATER_REMAIN_MIN..=WATER_REMAIN_MAX)
        .step_by(STEP as usize)
        .map(|remaining_ml| WaterSelection { remaining_ml })
        .collect()
}

pub fn food_options() -> Vec<SelectOption> {
    food_selections()
        .iter()
        .map(|s| SelectOption::new(s.label(), s.token()))
        .collect()
}

pub fn water_options() -> Vec<SelectOption> {
    water_selections()
        .iter()
        .map(|s| SelectOption::new(s.label(), s.token()))
        .collect()
}
