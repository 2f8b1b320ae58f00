use crate::data::natures::Nature;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Returned in place of a computed stat when the base stat is missing (≤ 0).
pub const MISSING_BASE_STAT: i32 = 5;

pub const MAX_BASE_STAT: i32 = 255;
pub const MAX_IV: i32 = 31;
pub const MAX_EV: i32 = 252;
pub const MAX_EV_TOTAL: i32 = 510;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatKey {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl StatKey {
    pub const ALL: [StatKey; 6] = [
        StatKey::Hp,
        StatKey::Attack,
        StatKey::Defense,
        StatKey::SpecialAttack,
        StatKey::SpecialDefense,
        StatKey::Speed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatKey::Hp => "hp",
            StatKey::Attack => "attack",
            StatKey::Defense => "defense",
            StatKey::SpecialAttack => "special-attack",
            StatKey::SpecialDefense => "special-defense",
            StatKey::Speed => "speed",
        }
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One integer per stat key. Used for base stats, IVs and EVs alike.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatTable {
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    #[serde(rename = "special-attack")]
    pub special_attack: i32,
    #[serde(rename = "special-defense")]
    pub special_defense: i32,
    pub speed: i32,
}

impl StatTable {
    pub fn new(hp: i32, attack: i32, defense: i32, special_attack: i32, special_defense: i32, speed: i32) -> Self {
        Self {
            hp,
            attack,
            defense,
            special_attack,
            special_defense,
            speed,
        }
    }

    pub fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value, value, value)
    }

    pub fn get(&self, key: StatKey) -> i32 {
        match key {
            StatKey::Hp => self.hp,
            StatKey::Attack => self.attack,
            StatKey::Defense => self.defense,
            StatKey::SpecialAttack => self.special_attack,
            StatKey::SpecialDefense => self.special_defense,
            StatKey::Speed => self.speed,
        }
    }

    pub fn set(&mut self, key: StatKey, value: i32) {
        match key {
            StatKey::Hp => self.hp = value,
            StatKey::Attack => self.attack = value,
            StatKey::Defense => self.defense = value,
            StatKey::SpecialAttack => self.special_attack = value,
            StatKey::SpecialDefense => self.special_defense = value,
            StatKey::Speed => self.speed = value,
        }
    }

    pub fn total(&self) -> i32 {
        StatKey::ALL.iter().map(|k| self.get(*k)).sum()
    }
}

/// Effective battle stat for `stat`.
///
/// HP: `floor((2·base + iv + floor(ev/4))·level / 100) + level + 10`.
/// Others: `floor((floor((2·base + iv + floor(ev/4))·level / 100) + 5) · nature)`,
/// where the nature factor is 1.1, 0.9 or 1.0. The nature factor is applied in
/// tenths so the floor is exact.
pub fn effective_stat(base: i32, level: i32, iv: i32, ev: i32, nature: Nature, stat: StatKey) -> i32 {
    if base <= 0 {
        return MISSING_BASE_STAT;
    }
    let core = ((2 * base + iv + ev / 4) * level) / 100;
    let value = if stat == StatKey::Hp {
        core + level + 10
    } else {
        ((core + 5) * nature.modifier_tenths(stat)) / 10
    };
    value.max(1)
}
