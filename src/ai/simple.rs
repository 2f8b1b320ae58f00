use crate::core::battle::{BattleEngine, BattleOptions};
use crate::core::errors::MoveError;
use crate::core::state::{BattlePhase, BattleState, Side};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AutoBattleSummary {
    pub rounds: u32,
    pub finished: bool,
    pub winner: Option<Side>,
}

/// Picks the usable move with the highest raw power, earliest slot on ties.
pub fn choose_highest_power(state: &BattleState, side: Side, _rng: &mut dyn FnMut() -> f64) -> Option<usize> {
    let active = state.combatant(side);
    let mut best_index = None;
    let mut best_power = -1;

    for idx in active.usable_moves() {
        let power = active.moves[idx].power;
        if power > best_power {
            best_power = power;
            best_index = Some(idx);
        }
    }
    best_index
}

/// Drives `engine` round by round until it finishes or `max_rounds` is reached.
pub fn run_auto_battle(
    engine: &mut BattleEngine,
    rng: &mut dyn FnMut() -> f64,
    options: &BattleOptions,
) -> Result<AutoBattleSummary, MoveError> {
    if engine.state().phase == BattlePhase::NotStarted {
        engine.initialize()?;
    }
    let mut rounds = 0;
    while !engine.is_finished() && rounds < options.max_rounds {
        rounds += 1;
        engine.run_round(rng)?;
    }
    Ok(AutoBattleSummary {
        rounds,
        finished: engine.is_finished(),
        winner: engine.state().winner,
    })
}
