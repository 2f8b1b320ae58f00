use crate::core::state::{Combatant, MoveSlot};
use crate::data::type_chart::TypeChart;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const CRIT_CHANCE: f64 = 1.0 / 16.0;
pub const CRIT_MULTIPLIER: f64 = 1.5;
pub const STAB_MULTIPLIER: f64 = 1.5;
pub const MIN_ROLL: f64 = 0.85;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageOutcome {
    pub damage: i32,
    pub is_crit: bool,
    pub effectiveness: f32,
}

impl DamageOutcome {
    fn no_damage(effectiveness: f32) -> Self {
        Self {
            damage: 0,
            is_crit: false,
            effectiveness,
        }
    }
}

/// Damage dealt by one use of `move_slot`.
///
/// `rng` is drawn twice for a damaging, non-immune move: first the crit roll,
/// then the variance roll mapped onto `[0.85, 1.0]`. Power-0 moves and full
/// immunities return before any draw.
pub fn resolve_damage(
    attacker: &Combatant,
    defender: &Combatant,
    move_slot: &MoveSlot,
    type_chart: &TypeChart,
    rng: &mut dyn FnMut() -> f64,
) -> DamageOutcome {
    if move_slot.power <= 0 {
        return DamageOutcome::no_damage(1.0);
    }

    let effectiveness = type_chart.effectiveness(move_slot.move_type, &defender.types);
    if effectiveness == 0.0 {
        debug!(
            attacker = %attacker.name,
            defender = %defender.name,
            move_name = %move_slot.name,
            "target is immune"
        );
        return DamageOutcome::no_damage(0.0);
    }

    let (offense_key, defense_key) = move_slot.category.stat_pair();
    let attack = attacker.stat(offense_key) as f64;
    let defense = (defender.stat(defense_key) as f64).max(1.0);

    let is_crit = rng() < CRIT_CHANCE;
    let crit = if is_crit { CRIT_MULTIPLIER } else { 1.0 };
    let stab = if attacker.has_type(move_slot.move_type) {
        STAB_MULTIPLIER
    } else {
        1.0
    };
    let roll = MIN_ROLL + (1.0 - MIN_ROLL) * rng();

    let level = attacker.level as f64;
    let power = move_slot.power as f64;
    let base = ((2.0 * level / 5.0 + 2.0) * power * attack / defense) / 50.0 + 2.0;
    let mut damage = (base * stab * effectiveness as f64 * crit * roll).floor();

    if let Some(multiplier) = attacker
        .item
        .and_then(|item| item.damage_multiplier(move_slot.category))
    {
        damage = (damage * multiplier).floor();
    }

    let damage = (damage as i32).max(1);
    debug!(
        attacker = %attacker.name,
        defender = %defender.name,
        move_name = %move_slot.name,
        damage,
        is_crit,
        effectiveness,
        "resolved damage"
    );

    DamageOutcome {
        damage,
        is_crit,
        effectiveness,
    }
}
