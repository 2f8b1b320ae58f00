use crate::core::state::{BattleState, Combatant, MoveSlot, Side};
use crate::data::type_chart::TypeChart;

/// Deterministic desirability of `move_slot`: power × STAB × effectiveness.
pub fn evaluate_move(attacker: &Combatant, defender: &Combatant, move_slot: &MoveSlot, type_chart: &TypeChart) -> f32 {
    if !move_slot.is_damaging() {
        return 0.0;
    }
    let stab = if attacker.has_type(move_slot.move_type) { 1.5 } else { 1.0 };
    let effectiveness = type_chart.effectiveness(move_slot.move_type, &defender.types);
    move_slot.power as f32 * stab * effectiveness
}

/// Highest-scoring move with PP left. Ties keep the earlier slot.
pub fn choose_best_matchup(state: &BattleState, side: Side, _rng: &mut dyn FnMut() -> f64) -> Option<usize> {
    let attacker = state.combatant(side);
    let defender = state.combatant(side.opponent());
    let type_chart = TypeChart::shared();

    let mut best: Option<(usize, f32)> = None;
    for idx in attacker.usable_moves() {
        let score = evaluate_move(attacker, defender, &attacker.moves[idx], type_chart);
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((idx, score));
        }
    }
    best.map(|(idx, _)| idx)
}
