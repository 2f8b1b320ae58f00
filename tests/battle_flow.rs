use duel_engine::core::battle::{is_battle_over, BattleEngine};
use duel_engine::core::errors::MoveError;
use duel_engine::core::state::{BattlePhase, BattleState, Combatant, EventKind, MoveCategory, MoveSlot, Side};
use duel_engine::core::stats::StatTable;
use duel_engine::data::natures::Nature;
use duel_engine::data::type_chart::ElementType;

fn make_move(name: &str, power: i32, pp: i32) -> MoveSlot {
    MoveSlot {
        name: name.to_string(),
        power,
        accuracy: 100,
        pp,
        move_type: ElementType::Normal,
        category: MoveCategory::Physical,
        priority: 0,
    }
}

fn make_combatant(name: &str, base_stats: StatTable, moves: Vec<MoveSlot>) -> Combatant {
    let mut combatant = Combatant {
        id: 0,
        name: name.to_string(),
        types: vec![ElementType::Normal],
        base_stats,
        level: 50,
        ivs: StatTable::uniform(31),
        evs: StatTable::default(),
        nature: Nature::Serious,
        item: None,
        ability: None,
        status: None,
        current_hp: 0,
        moves,
    };
    combatant.restore_full_hp();
    combatant
}

fn balanced(name: &str, moves: Vec<MoveSlot>) -> Combatant {
    make_combatant(name, StatTable::new(80, 80, 80, 80, 80, 80), moves)
}

/// Fast heavy hitter vs. a fragile slow target: one hit knocks out.
fn lopsided_engine() -> BattleEngine {
    let striker = make_combatant(
        "Striker",
        StatTable::new(80, 200, 80, 80, 80, 150),
        vec![make_move("Giga Slam", 250, 5)],
    );
    let target = make_combatant(
        "Target",
        StatTable::new(1, 50, 5, 50, 5, 10),
        vec![make_move("Tackle", 40, 35)],
    );
    BattleEngine::new(striker, target)
}

fn pick_out_of_range(_: &BattleState, _: Side, _: &mut dyn FnMut() -> f64) -> Option<usize> {
    Some(9)
}

#[test]
fn initialize_restores_hp_and_starts_the_battle() {
    let mut left = balanced("Left", vec![make_move("Tackle", 40, 35)]);
    left.current_hp = 1;
    let right = balanced("Right", vec![make_move("Tackle", 40, 35)]);
    let mut engine = BattleEngine::new(left, right);
    assert_eq!(engine.state().phase, BattlePhase::NotStarted);

    engine.initialize().unwrap();
    let state = engine.state();
    assert_eq!(state.phase, BattlePhase::InProgress);
    assert_eq!(state.turn, 0);
    assert!(state.log.is_empty());
    assert_eq!(state.winner, None);
    for side in [Side::One, Side::Two] {
        let combatant = state.combatant(side);
        assert_eq!(combatant.current_hp, combatant.max_hp());
    }
}

#[test]
fn moves_are_rejected_before_initialize() {
    let mut engine = BattleEngine::new(
        balanced("Left", vec![make_move("Tackle", 40, 35)]),
        balanced("Right", vec![make_move("Tackle", 40, 35)]),
    );
    let err = engine.execute_move(Side::One, 0, &mut || 1.0).unwrap_err();
    assert_eq!(err, MoveError::NotStarted);
    assert!(engine.run_round(&mut || 1.0).is_err());
}

#[test]
fn execute_move_spends_pp_and_records_the_event() {
    let mut engine = BattleEngine::new(
        balanced("Left", vec![make_move("Tackle", 40, 35)]),
        balanced("Right", vec![make_move("Tackle", 40, 35)]),
    );
    engine.initialize().unwrap();
    let max_hp = engine.state().combatant(Side::Two).max_hp();

    let outcome = engine.execute_move(Side::One, 0, &mut || 1.0).unwrap();
    let state = engine.state();
    assert_eq!(state.combatant(Side::One).moves[0].pp, 34);
    assert_eq!(state.turn, 1);
    assert_eq!(state.active_side, Side::Two);
    assert_eq!(state.log.len(), 1);
    assert_eq!(state.log[0], outcome.event);

    let event = &outcome.event;
    assert_eq!(event.turn, 0);
    assert_eq!(event.actor, Side::One);
    assert_eq!(event.kind, EventKind::Move);
    assert_eq!(event.move_name.as_deref(), Some("Tackle"));
    assert!(event.damage > 0);
    assert_eq!(event.defender_hp_before, Some(max_hp));
    assert_eq!(event.defender_hp_after, Some(max_hp - event.damage));
    assert_eq!(state.combatant(Side::Two).current_hp, max_hp - event.damage);
    assert!(!outcome.finished);
}

#[test]
fn move_without_pp_fails_and_leaves_state_untouched() {
    let mut engine = BattleEngine::new(
        balanced("Left", vec![make_move("Tackle", 40, 0), make_move("Pound", 40, 5)]),
        balanced("Right", vec![make_move("Tackle", 40, 35)]),
    );
    engine.initialize().unwrap();
    let before = engine.snapshot();

    let err = engine.execute_move(Side::One, 0, &mut || 1.0).unwrap_err();
    assert!(matches!(err, MoveError::NoPpRemaining { side: Side::One, .. }));
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn out_of_range_index_fails_and_leaves_state_untouched() {
    let mut engine = BattleEngine::new(
        balanced("Left", vec![make_move("Tackle", 40, 35)]),
        balanced("Right", vec![make_move("Tackle", 40, 35)]),
    );
    engine.initialize().unwrap();
    let before = engine.snapshot();

    let err = engine.execute_move(Side::Two, 4, &mut || 1.0).unwrap_err();
    assert_eq!(
        err,
        MoveError::InvalidMoveIndex {
            side: Side::Two,
            index: 4,
            available: 1
        }
    );
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn knockout_finishes_and_blocks_further_moves() {
    let mut engine = lopsided_engine();
    engine.initialize().unwrap();

    let outcome = engine.execute_move(Side::One, 0, &mut || 1.0).unwrap();
    assert!(outcome.finished);
    assert_eq!(outcome.winner, Some(Side::One));
    assert_eq!(outcome.event.defender_hp_after, Some(0));
    assert_eq!(engine.state().combatant(Side::Two).current_hp, 0);
    assert!(is_battle_over(engine.state()));

    let err = engine.execute_move(Side::Two, 0, &mut || 1.0).unwrap_err();
    assert_eq!(err, MoveError::BattleFinished);
    assert!(engine.run_round(&mut || 1.0).is_err());
}

#[test]
fn round_skips_second_move_after_knockout() {
    let mut engine = lopsided_engine();
    engine.initialize().unwrap();

    let round = engine.run_round(&mut || 0.0).unwrap();
    assert_eq!(round.first_actor, Some(Side::One));
    assert_eq!(round.events.len(), 1);
    assert!(round.finished);
    assert_eq!(round.winner, Some(Side::One));
    assert_eq!(engine.state().log.len(), 1);
    assert_eq!(engine.state().combatant(Side::Two).moves[0].pp, 35);
}

#[test]
fn round_lets_both_sides_act_when_nobody_faints() {
    let mut engine = BattleEngine::new(
        make_combatant("Quick", StatTable::new(80, 80, 80, 80, 80, 100), vec![make_move("Tackle", 40, 35)]),
        make_combatant("Steady", StatTable::new(80, 80, 80, 80, 80, 50), vec![make_move("Tackle", 40, 35)]),
    );
    engine.initialize().unwrap();

    let round = engine.run_round(&mut || 0.5).unwrap();
    assert_eq!(round.first_actor, Some(Side::One));
    assert_eq!(round.events.len(), 2);
    assert_eq!(round.events[0].actor, Side::One);
    assert_eq!(round.events[1].actor, Side::Two);
    assert_eq!(round.events[1].turn, 1);
    assert_eq!(engine.state().turn, 2);
    assert!(!round.finished);
}

#[test]
fn side_without_pp_forfeits_the_round() {
    let mut engine = BattleEngine::new(
        balanced("Ready", vec![make_move("Tackle", 40, 35)]),
        balanced("Spent", vec![make_move("Tackle", 40, 0), make_move("Pound", 40, 0)]),
    );
    engine.initialize().unwrap();

    let round = engine.run_round(&mut || 0.5).unwrap();
    assert_eq!(round.first_actor, None);
    assert!(round.finished);
    assert_eq!(round.winner, Some(Side::One));
    assert_eq!(round.events.len(), 1);

    let event = &round.events[0];
    assert_eq!(event.kind, EventKind::NoLegalMove);
    assert_eq!(event.actor, Side::Two);
    assert_eq!(event.damage, 0);
    assert_eq!(event.defender(), None);
    assert!(event.message.as_deref().unwrap_or_default().contains("Spent"));
    assert_eq!(engine.state().turn, 1);
    assert_eq!(engine.state().combatant(Side::One).moves[0].pp, 35);
}

#[test]
fn side_one_forfeits_first_when_both_are_spent() {
    let mut engine = BattleEngine::new(
        balanced("Left", vec![make_move("Tackle", 40, 0)]),
        balanced("Right", vec![make_move("Tackle", 40, 0)]),
    );
    engine.initialize().unwrap();

    let round = engine.run_round(&mut || 0.5).unwrap();
    assert_eq!(round.events[0].actor, Side::One);
    assert_eq!(round.winner, Some(Side::Two));
}

#[test]
fn invalid_choice_from_policy_aborts_round_without_changes() {
    let mut engine = BattleEngine::with_chooser(
        balanced("Left", vec![make_move("Tackle", 40, 35)]),
        balanced("Right", vec![make_move("Tackle", 40, 35)]),
        pick_out_of_range,
    );
    engine.initialize().unwrap();
    let before = engine.snapshot();

    let err = engine.run_round(&mut || 0.5).unwrap_err();
    assert!(matches!(err, MoveError::InvalidMoveIndex { index: 9, .. }));
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn long_battle_never_drives_hp_below_zero() {
    let mut engine = BattleEngine::new(
        balanced("Left", vec![make_move("Tackle", 40, 35), make_move("Slam", 80, 20)]),
        balanced("Right", vec![make_move("Tackle", 40, 35), make_move("Slam", 80, 20)]),
    );
    engine.initialize().unwrap();
    let mut rng = duel_engine::core::utils::seeded_roll(7);
    let mut rounds = 0;
    while !engine.is_finished() && rounds < 200 {
        engine.run_round(&mut rng).unwrap();
        rounds += 1;
    }

    assert!(engine.is_finished());
    let state = engine.state();
    for (idx, event) in state.log.iter().enumerate() {
        assert_eq!(event.turn as usize, idx);
        if let Some(hp) = event.defender_hp_after {
            assert!(hp >= 0);
        }
    }
    let winner = state.winner.unwrap();
    assert!(state.combatant(winner).current_hp > 0);
}

#[test]
fn initialize_is_a_no_op_once_running() {
    let mut engine = BattleEngine::new(
        balanced("Left", vec![make_move("Tackle", 40, 35)]),
        balanced("Right", vec![make_move("Tackle", 40, 35)]),
    );
    engine.initialize().unwrap();
    engine.execute_move(Side::One, 0, &mut || 1.0).unwrap();
    let before = engine.snapshot();

    engine.initialize().unwrap();
    assert_eq!(engine.snapshot(), before);
    assert_eq!(engine.state().log.len(), 1);
    assert_eq!(engine.state().combatant(Side::One).moves[0].pp, 34);
}

#[test]
fn finished_battle_cannot_be_reinitialized() {
    let mut engine = lopsided_engine();
    engine.initialize().unwrap();
    engine.execute_move(Side::One, 0, &mut || 1.0).unwrap();
    assert!(engine.is_finished());
    let before = engine.snapshot();

    let err = engine.initialize().unwrap_err();
    assert_eq!(err, MoveError::BattleFinished);
    assert_eq!(engine.snapshot(), before);
    assert_eq!(engine.state().phase, BattlePhase::Finished);
    assert_eq!(engine.state().winner, Some(Side::One));
    assert_eq!(engine.state().log.len(), 1);
    assert_eq!(engine.state().combatant(Side::Two).current_hp, 0);
}
