use crate::core::damage::resolve_damage;
use crate::core::errors::MoveError;
use crate::core::order::first_actor;
use crate::core::state::{BattleEvent, BattlePhase, BattleState, Combatant, EventKind, Side};
use crate::data::type_chart::TypeChart;
use tracing::{debug, info, warn};

/// Picks a move index for `side`, or `None` when it has no legal move.
pub type MoveChooser = fn(&BattleState, Side, &mut dyn FnMut() -> f64) -> Option<usize>;

#[derive(Clone, Debug)]
pub struct BattleOptions {
    /// Upper bound on rounds an auto-advancing driver will request.
    pub max_rounds: u32,
}

impl Default for BattleOptions {
    fn default() -> Self {
        Self { max_rounds: 100 }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MoveOutcome {
    pub event: BattleEvent,
    pub finished: bool,
    pub winner: Option<Side>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoundOutcome {
    /// `None` when the round ended before anyone moved.
    pub first_actor: Option<Side>,
    pub events: Vec<BattleEvent>,
    pub finished: bool,
    pub winner: Option<Side>,
}

/// Owns the authoritative state of one two-sided battle.
#[derive(Clone, Debug)]
pub struct BattleEngine {
    state: BattleState,
    chooser: MoveChooser,
}

impl BattleEngine {
    pub fn new(combatant1: Combatant, combatant2: Combatant) -> Self {
        Self::with_chooser(combatant1, combatant2, auto_select_move)
    }

    pub fn with_chooser(combatant1: Combatant, combatant2: Combatant, chooser: MoveChooser) -> Self {
        Self {
            state: BattleState::new(combatant1, combatant2),
            chooser,
        }
    }

    /// Restores both combatants to full HP and starts the battle.
    ///
    /// Only a battle that has not started is touched. Calling it again while
    /// the battle is running is a no-op, and a finished battle is rejected.
    pub fn initialize(&mut self) -> Result<(), MoveError> {
        match self.state.phase {
            BattlePhase::NotStarted => {}
            BattlePhase::InProgress => return Ok(()),
            BattlePhase::Finished => return Err(MoveError::BattleFinished),
        }
        for combatant in self.state.combatants.iter_mut() {
            combatant.restore_full_hp();
        }
        self.state.turn = 0;
        self.state.active_side = Side::One;
        self.state.log.clear();
        self.state.winner = None;
        self.state.phase = BattlePhase::InProgress;
        debug!(
            combatant1 = %self.state.combatants[0].name,
            combatant2 = %self.state.combatants[1].name,
            "battle initialized"
        );
        Ok(())
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn snapshot(&self) -> BattleState {
        self.state.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn select_move(&self, side: Side, rng: &mut dyn FnMut() -> f64) -> Option<usize> {
        (self.chooser)(&self.state, side, rng)
    }

    pub fn execute_move(
        &mut self,
        side: Side,
        move_index: usize,
        rng: &mut dyn FnMut() -> f64,
    ) -> Result<MoveOutcome, MoveError> {
        self.ensure_in_progress()?;
        self.check_move(side, move_index)?;

        let attacker = self.state.combatant_mut(side);
        attacker.moves[move_index].pp -= 1;
        let move_slot = attacker.moves[move_index].clone();

        let outcome = resolve_damage(
            self.state.combatant(side),
            self.state.combatant(side.opponent()),
            &move_slot,
            TypeChart::shared(),
            rng,
        );

        let defender = self.state.combatant_mut(side.opponent());
        debug_assert!(defender.current_hp >= 0, "defender HP went negative");
        let hp_before = defender.current_hp;
        defender.current_hp = (hp_before - outcome.damage).max(0);
        let hp_after = defender.current_hp;

        let event = BattleEvent {
            turn: self.state.turn,
            actor: side,
            kind: EventKind::Move,
            move_name: Some(move_slot.name.clone()),
            damage: outcome.damage,
            is_crit: outcome.is_crit,
            effectiveness: outcome.effectiveness,
            defender_hp_before: Some(hp_before),
            defender_hp_after: Some(hp_after),
            message: None,
        };
        debug!(
            turn = event.turn,
            actor = %side,
            move_name = %move_slot.name,
            hp_before,
            hp_after,
            "move executed"
        );
        self.append(event.clone());

        if hp_after == 0 {
            self.finish(side);
        }

        Ok(MoveOutcome {
            event,
            finished: self.state.is_finished(),
            winner: self.state.winner,
        })
    }

    /// Plays one full round: both sides choose, the faster side moves first,
    /// and the slower side is skipped if the first move ends the battle.
    pub fn run_round(&mut self, rng: &mut dyn FnMut() -> f64) -> Result<RoundOutcome, MoveError> {
        self.ensure_in_progress()?;

        let choice1 = self.select_move(Side::One, rng);
        let choice2 = self.select_move(Side::Two, rng);
        let (index1, index2) = match (choice1, choice2) {
            (Some(index1), Some(index2)) => (index1, index2),
            (None, _) => return Ok(self.forfeit(Side::One)),
            (_, None) => return Ok(self.forfeit(Side::Two)),
        };
        self.check_move(Side::One, index1)?;
        self.check_move(Side::Two, index2)?;

        let first = first_actor(
            self.state.combatant(Side::One),
            self.state.combatant(Side::Two),
            &self.state.combatant(Side::One).moves[index1],
            &self.state.combatant(Side::Two).moves[index2],
            rng,
        );
        let index_for = |side: Side| if side == Side::One { index1 } else { index2 };

        let mut events = Vec::with_capacity(2);
        let opening = self.execute_move(first, index_for(first), rng)?;
        events.push(opening.event);
        if !opening.finished {
            let second = first.opponent();
            let reply = self.execute_move(second, index_for(second), rng)?;
            events.push(reply.event);
        }

        Ok(RoundOutcome {
            first_actor: Some(first),
            events,
            finished: self.state.is_finished(),
            winner: self.state.winner,
        })
    }

    fn ensure_in_progress(&self) -> Result<(), MoveError> {
        match self.state.phase {
            BattlePhase::InProgress => Ok(()),
            BattlePhase::NotStarted => Err(MoveError::NotStarted),
            BattlePhase::Finished => Err(MoveError::BattleFinished),
        }
    }

    fn check_move(&self, side: Side, move_index: usize) -> Result<(), MoveError> {
        let combatant = self.state.combatant(side);
        let Some(slot) = combatant.moves.get(move_index) else {
            warn!(side = %side, move_index, "rejected out-of-range move");
            return Err(MoveError::InvalidMoveIndex {
                side,
                index: move_index,
                available: combatant.moves.len(),
            });
        };
        if !slot.is_usable() {
            warn!(side = %side, move_name = %slot.name, "rejected move without PP");
            return Err(MoveError::NoPpRemaining {
                side,
                move_name: slot.name.clone(),
            });
        }
        Ok(())
    }

    fn forfeit(&mut self, side: Side) -> RoundOutcome {
        let name = self.state.combatant(side).name.clone();
        let event = BattleEvent {
            turn: self.state.turn,
            actor: side,
            kind: EventKind::NoLegalMove,
            move_name: None,
            damage: 0,
            is_crit: false,
            effectiveness: 1.0,
            defender_hp_before: None,
            defender_hp_after: None,
            message: Some(format!("{} has no moves left and cannot continue.", name)),
        };
        self.append(event.clone());
        self.finish(side.opponent());
        RoundOutcome {
            first_actor: None,
            events: vec![event],
            finished: true,
            winner: self.state.winner,
        }
    }

    fn append(&mut self, event: BattleEvent) {
        self.state.active_side = event.actor.opponent();
        self.state.log.push(event);
        self.state.turn += 1;
    }

    fn finish(&mut self, winner: Side) {
        self.state.phase = BattlePhase::Finished;
        self.state.winner = Some(winner);
        info!(
            winner = %winner,
            name = %self.state.combatant(winner).name,
            turns = self.state.turn,
            "battle finished"
        );
    }
}

/// Reference policy: uniform over the moves that still have PP.
pub fn auto_select_move(state: &BattleState, side: Side, rng: &mut dyn FnMut() -> f64) -> Option<usize> {
    let usable = state.combatant(side).usable_moves();
    if usable.is_empty() {
        return None;
    }
    let pick = ((rng() * usable.len() as f64).floor() as usize).min(usable.len() - 1);
    usable.get(pick).copied()
}

pub fn is_battle_over(state: &BattleState) -> bool {
    state.is_finished() || state.combatants.iter().any(Combatant::is_fainted)
}
