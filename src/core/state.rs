use crate::core::stats::{effective_stat, StatKey, StatTable};
use crate::data::items::HeldItem;
use crate::data::natures::Nature;
use crate::data::type_chart::ElementType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two battle participants. Serialized as `1` or `2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::One => 0,
            Side::Two => 1,
        }
    }

    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

impl From<Side> for u8 {
    fn from(side: Side) -> Self {
        side.number()
    }
}

impl TryFrom<u8> for Side {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Side::One),
            2 => Ok(Side::Two),
            other => Err(format!("side must be 1 or 2, got {}", other)),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

impl MoveCategory {
    /// Offensive and defensive stat keys consulted for this category.
    pub fn stat_pair(self) -> (StatKey, StatKey) {
        match self {
            MoveCategory::Physical => (StatKey::Attack, StatKey::Defense),
            MoveCategory::Special | MoveCategory::Status => (StatKey::SpecialAttack, StatKey::SpecialDefense),
        }
    }
}

/// Non-volatile condition. Only paralysis has a modeled effect (halved speed).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusCondition {
    Paralysis,
    Burn,
    Poison,
    Sleep,
    Freeze,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveSlot {
    pub name: String,
    /// 0 for non-damaging moves.
    pub power: i32,
    pub accuracy: i32,
    pub pp: i32,
    #[serde(rename = "type")]
    pub move_type: ElementType,
    pub category: MoveCategory,
    #[serde(default)]
    pub priority: i32,
}

impl MoveSlot {
    pub fn is_usable(&self) -> bool {
        self.pp > 0
    }

    pub fn is_damaging(&self) -> bool {
        self.power > 0
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Combatant {
    pub id: u32,
    pub name: String,
    pub types: Vec<ElementType>,
    pub base_stats: StatTable,
    pub level: u32,
    pub ivs: StatTable,
    pub evs: StatTable,
    #[serde(default)]
    pub nature: Nature,
    #[serde(default)]
    pub item: Option<HeldItem>,
    #[serde(default)]
    pub ability: Option<String>,
    #[serde(default)]
    pub status: Option<StatusCondition>,
    pub current_hp: i32,
    pub moves: Vec<MoveSlot>,
}

impl Combatant {
    pub fn stat(&self, key: StatKey) -> i32 {
        effective_stat(
            self.base_stats.get(key),
            self.level as i32,
            self.ivs.get(key),
            self.evs.get(key),
            self.nature,
            key,
        )
    }

    pub fn max_hp(&self) -> i32 {
        self.stat(StatKey::Hp)
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp <= 0
    }

    pub fn has_type(&self, element: ElementType) -> bool {
        self.types.contains(&element)
    }

    /// Indices of moves with PP remaining, in slot order.
    pub fn usable_moves(&self) -> Vec<usize> {
        self.moves
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_usable())
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn restore_full_hp(&mut self) {
        self.current_hp = self.max_hp();
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A move was used against the opponent.
    #[default]
    Move,
    /// The actor had no move with PP left and forfeited the battle.
    NoLegalMove,
}

/// Immutable record appended to the battle log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleEvent {
    pub turn: u32,
    pub actor: Side,
    #[serde(default)]
    pub kind: EventKind,
    #[serde(default)]
    pub move_name: Option<String>,
    #[serde(default)]
    pub damage: i32,
    #[serde(default)]
    pub is_crit: bool,
    #[serde(default = "neutral_effectiveness")]
    pub effectiveness: f32,
    #[serde(default)]
    pub defender_hp_before: Option<i32>,
    #[serde(default)]
    pub defender_hp_after: Option<i32>,
    #[serde(default)]
    pub message: Option<String>,
}

fn neutral_effectiveness() -> f32 {
    1.0
}

impl BattleEvent {
    /// The side whose HP this event changes, if any.
    pub fn defender(&self) -> Option<Side> {
        match self.kind {
            EventKind::Move => Some(self.actor.opponent()),
            EventKind::NoLegalMove => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattlePhase {
    #[default]
    NotStarted,
    InProgress,
    Finished,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleState {
    pub turn: u32,
    pub active_side: Side,
    pub phase: BattlePhase,
    pub winner: Option<Side>,
    pub combatants: [Combatant; 2],
    pub log: Vec<BattleEvent>,
}

impl BattleState {
    pub fn new(combatant1: Combatant, combatant2: Combatant) -> Self {
        Self {
            turn: 0,
            active_side: Side::One,
            phase: BattlePhase::NotStarted,
            winner: None,
            combatants: [combatant1, combatant2],
            log: Vec::new(),
        }
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        &self.combatants[side.index()]
    }

    pub(crate) fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        &mut self.combatants[side.index()]
    }

    pub fn is_finished(&self) -> bool {
        self.phase == BattlePhase::Finished
    }
}
