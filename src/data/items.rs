use crate::core::state::MoveCategory;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeldItem {
    ChoiceBand,
    ChoiceSpecs,
    ChoiceScarf,
    LifeOrb,
}

impl HeldItem {
    pub const ALL: [HeldItem; 4] = [
        HeldItem::ChoiceBand,
        HeldItem::ChoiceSpecs,
        HeldItem::ChoiceScarf,
        HeldItem::LifeOrb,
    ];

    /// Post-formula damage multiplier for a move of `category`, if this item boosts it.
    pub fn damage_multiplier(&self, category: MoveCategory) -> Option<f64> {
        match (self, category) {
            (HeldItem::ChoiceBand, MoveCategory::Physical) => Some(1.5),
            (HeldItem::ChoiceSpecs, MoveCategory::Special) => Some(1.5),
            (HeldItem::LifeOrb, _) => Some(1.3),
            _ => None,
        }
    }

    pub fn speed_multiplier(&self) -> Option<f64> {
        match self {
            HeldItem::ChoiceScarf => Some(1.5),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HeldItem::ChoiceBand => "choice-band",
            HeldItem::ChoiceSpecs => "choice-specs",
            HeldItem::ChoiceScarf => "choice-scarf",
            HeldItem::LifeOrb => "life-orb",
        }
    }
}

impl fmt::Display for HeldItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeldItem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace([' ', '_'], "-");
        HeldItem::ALL
            .iter()
            .copied()
            .find(|item| item.as_str() == key)
            .ok_or_else(|| format!("Unknown held item '{}'.", s))
    }
}
