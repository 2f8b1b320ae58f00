use crate::core::stats::StatKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Personality modifier raising one stat by 10% and lowering another by 10%.
/// Serious, Hardy, Bashful, Quirky and Docile are neutral.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nature {
    Adamant,
    Brave,
    Bold,
    Relaxed,
    Modest,
    Quiet,
    Calm,
    Sassy,
    Timid,
    Hasty,
    Jolly,
    Naive,
    Impish,
    Lax,
    Careful,
    Gentle,
    Lonely,
    Naughty,
    Mild,
    Rash,
    #[default]
    Serious,
    Hardy,
    Bashful,
    Quirky,
    Docile,
}

impl Nature {
    pub const ALL: [Nature; 25] = [
        Nature::Adamant,
        Nature::Brave,
        Nature::Bold,
        Nature::Relaxed,
        Nature::Modest,
        Nature::Quiet,
        Nature::Calm,
        Nature::Sassy,
        Nature::Timid,
        Nature::Hasty,
        Nature::Jolly,
        Nature::Naive,
        Nature::Impish,
        Nature::Lax,
        Nature::Careful,
        Nature::Gentle,
        Nature::Lonely,
        Nature::Naughty,
        Nature::Mild,
        Nature::Rash,
        Nature::Serious,
        Nature::Hardy,
        Nature::Bashful,
        Nature::Quirky,
        Nature::Docile,
    ];

    /// `(increased, decreased)`, or `None` for the neutral natures.
    pub fn effect(&self) -> Option<(StatKey, StatKey)> {
        use StatKey::*;
        match self {
            Nature::Adamant => Some((Attack, SpecialAttack)),
            Nature::Brave => Some((Attack, Speed)),
            Nature::Lonely => Some((Attack, Defense)),
            Nature::Naughty => Some((Attack, SpecialDefense)),
            Nature::Bold => Some((Defense, Attack)),
            Nature::Relaxed => Some((Defense, Speed)),
            Nature::Impish => Some((Defense, SpecialAttack)),
            Nature::Lax => Some((Defense, SpecialDefense)),
            Nature::Modest => Some((SpecialAttack, Attack)),
            Nature::Quiet => Some((SpecialAttack, Speed)),
            Nature::Mild => Some((SpecialAttack, Defense)),
            Nature::Rash => Some((SpecialAttack, SpecialDefense)),
            Nature::Calm => Some((SpecialDefense, Attack)),
            Nature::Sassy => Some((SpecialDefense, Speed)),
            Nature::Careful => Some((SpecialDefense, SpecialAttack)),
            Nature::Gentle => Some((SpecialDefense, Defense)),
            Nature::Timid => Some((Speed, Attack)),
            Nature::Hasty => Some((Speed, Defense)),
            Nature::Jolly => Some((Speed, SpecialAttack)),
            Nature::Naive => Some((Speed, SpecialDefense)),
            Nature::Serious | Nature::Hardy | Nature::Bashful | Nature::Quirky | Nature::Docile => None,
        }
    }

    pub fn increased(&self) -> Option<StatKey> {
        self.effect().map(|(up, _)| up)
    }

    pub fn decreased(&self) -> Option<StatKey> {
        self.effect().map(|(_, down)| down)
    }

    /// Multiplier in tenths: 11 for the boosted stat, 9 for the lowered one, 10 otherwise.
    pub fn modifier_tenths(&self, stat: StatKey) -> i32 {
        match self.effect() {
            Some((up, _)) if up == stat => 11,
            Some((_, down)) if down == stat => 9,
            _ => 10,
        }
    }

    pub fn modifier_for(&self, stat: StatKey) -> f32 {
        self.modifier_tenths(stat) as f32 / 10.0
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Nature::Adamant => "Adamant",
            Nature::Brave => "Brave",
            Nature::Bold => "Bold",
            Nature::Relaxed => "Relaxed",
            Nature::Modest => "Modest",
            Nature::Quiet => "Quiet",
            Nature::Calm => "Calm",
            Nature::Sassy => "Sassy",
            Nature::Timid => "Timid",
            Nature::Hasty => "Hasty",
            Nature::Jolly => "Jolly",
            Nature::Naive => "Naive",
            Nature::Impish => "Impish",
            Nature::Lax => "Lax",
            Nature::Careful => "Careful",
            Nature::Gentle => "Gentle",
            Nature::Lonely => "Lonely",
            Nature::Naughty => "Naughty",
            Nature::Mild => "Mild",
            Nature::Rash => "Rash",
            Nature::Serious => "Serious",
            Nature::Hardy => "Hardy",
            Nature::Bashful => "Bashful",
            Nature::Quirky => "Quirky",
            Nature::Docile => "Docile",
        }
    }
}

impl fmt::Display for Nature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Nature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Nature::ALL
            .iter()
            .copied()
            .find(|n| n.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown nature '{}'.", s))
    }
}
