use duel_engine::ai::{choose_best_matchup, choose_highest_power, evaluate_move, run_auto_battle};
use duel_engine::core::battle::{auto_select_move, BattleEngine, BattleOptions};
use duel_engine::core::factory::{create_combatant, CreateCombatantOptions};
use duel_engine::core::state::{BattlePhase, BattleState, Combatant, Side};
use duel_engine::core::utils::seeded_roll;
use duel_engine::data::moves::MoveCatalog;
use duel_engine::data::species::SpeciesCatalog;
use duel_engine::data::type_chart::TypeChart;

fn build(name: &str, moves: &[&str]) -> Combatant {
    let species_db = SpeciesCatalog::load_default().expect("load species");
    let move_db = MoveCatalog::load_default().expect("load moves");
    let species = species_db.get(name).expect("species exists");
    create_combatant(
        species,
        CreateCombatantOptions {
            moves: Some(moves.iter().map(|m| m.to_string()).collect()),
            ..Default::default()
        },
        &move_db,
    )
    .expect("create combatant")
}

fn battle_state(c1: Combatant, c2: Combatant) -> BattleState {
    BattleState::new(c1, c2)
}

#[test]
fn random_policy_only_picks_moves_with_pp() {
    let mut pikachu = build("pikachu", &["thunderbolt", "quick-attack", "growl"]);
    pikachu.moves[0].pp = 0;
    let state = battle_state(pikachu, build("snorlax", &["tackle"]));

    for step in 0..20 {
        let roll = step as f64 / 20.0;
        let pick = auto_select_move(&state, Side::One, &mut || roll).expect("has a move");
        assert_ne!(pick, 0);
    }
    assert_eq!(auto_select_move(&state, Side::One, &mut || 0.999_999), Some(2));
}

#[test]
fn random_policy_returns_none_without_pp() {
    let mut pikachu = build("pikachu", &["thunderbolt"]);
    pikachu.moves[0].pp = 0;
    let state = battle_state(pikachu, build("snorlax", &["tackle"]));
    assert_eq!(auto_select_move(&state, Side::One, &mut || 0.5), None);
}

#[test]
fn highest_power_prefers_raw_power() {
    let state = battle_state(
        build("charizard", &["ember", "flamethrower", "growl"]),
        build("blastoise", &["water-gun"]),
    );
    assert_eq!(choose_highest_power(&state, Side::One, &mut || 0.0), Some(1));
}

#[test]
fn best_matchup_accounts_for_types() {
    // Earthquake has more power, but Charizard is immune to it.
    let state = battle_state(
        build("blastoise", &["earthquake", "surf", "ice-beam"]),
        build("charizard", &["ember"]),
    );
    assert_eq!(choose_best_matchup(&state, Side::One, &mut || 0.0), Some(1));

    let chart = TypeChart::new();
    let attacker = state.combatant(Side::One);
    let defender = state.combatant(Side::Two);
    assert_eq!(evaluate_move(attacker, defender, &attacker.moves[0], &chart), 0.0);
}

#[test]
fn auto_battle_runs_to_completion() {
    let mut engine = BattleEngine::with_chooser(
        build("dragonite", &["extreme-speed", "dragon-claw", "earthquake"]),
        build("tyranitar", &["rock-slide", "crunch", "ice-beam"]),
        choose_best_matchup,
    );
    let mut rng = seeded_roll(2024);

    let summary = run_auto_battle(&mut engine, &mut rng, &BattleOptions::default()).expect("battle runs");
    assert!(summary.finished);
    assert!(summary.rounds > 0);
    assert_eq!(summary.winner, engine.state().winner);
    assert_eq!(engine.state().phase, BattlePhase::Finished);
}

#[test]
fn auto_battle_stops_at_round_limit() {
    let mut engine = BattleEngine::new(build("snorlax", &["tackle"]), build("blastoise", &["tackle"]));
    let mut rng = seeded_roll(1);

    let summary = run_auto_battle(&mut engine, &mut rng, &BattleOptions { max_rounds: 1 }).expect("battle runs");
    assert_eq!(summary.rounds, 1);
    assert!(!summary.finished);
    assert_eq!(summary.winner, None);
    assert_eq!(engine.state().log.len(), 2);
}

#[test]
fn same_seed_replays_identically() {
    let play = |seed: u64| {
        let mut engine = BattleEngine::new(
            build("gengar", &["shadow-ball", "sludge-bomb", "thunderbolt"]),
            build("alakazam", &["psychic", "shadow-ball", "energy-ball"]),
        );
        let mut rng = seeded_roll(seed);
        run_auto_battle(&mut engine, &mut rng, &BattleOptions::default()).expect("battle runs");
        engine.snapshot()
    };
    assert_eq!(play(77), play(77));
}
