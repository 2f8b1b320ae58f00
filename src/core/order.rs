use crate::core::state::{Combatant, MoveSlot, Side, StatusCondition};
use crate::core::stats::StatKey;

/// Speed stat after the held item (floored) and paralysis.
pub fn effective_speed(combatant: &Combatant) -> f64 {
    let mut speed = combatant.stat(StatKey::Speed) as f64;
    if let Some(multiplier) = combatant.item.and_then(|item| item.speed_multiplier()) {
        speed = (speed * multiplier).floor();
    }
    if combatant.status == Some(StatusCondition::Paralysis) {
        speed *= 0.5;
    }
    speed
}

/// Side that acts first this round: higher move priority, then higher
/// effective speed, then a coin flip. `rng` is only drawn on a full tie.
pub fn first_actor(
    combatant1: &Combatant,
    combatant2: &Combatant,
    move1: &MoveSlot,
    move2: &MoveSlot,
    rng: &mut dyn FnMut() -> f64,
) -> Side {
    if move1.priority != move2.priority {
        return if move1.priority > move2.priority {
            Side::One
        } else {
            Side::Two
        };
    }

    let speed1 = effective_speed(combatant1);
    let speed2 = effective_speed(combatant2);
    if speed1 == speed2 {
        return if rng() < 0.5 { Side::One } else { Side::Two };
    }
    if speed1 > speed2 {
        Side::One
    } else {
        Side::Two
    }
}
