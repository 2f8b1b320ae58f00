use clap::{Parser, ValueEnum};
use duel_engine::ai::{choose_best_matchup, choose_highest_power};
use duel_engine::core::battle::{auto_select_move, BattleEngine, MoveChooser};
use duel_engine::core::factory::{create_combatant, default_moves, CreateCombatantOptions};
use duel_engine::core::replay::BattleReplay;
use duel_engine::core::state::{BattleEvent, BattleState, Combatant, EventKind, Side};
use duel_engine::core::utils::{entropy_roll, seeded_roll};
use duel_engine::data::moves::MoveCatalog;
use duel_engine::data::natures::Nature;
use duel_engine::data::species::{SpeciesCatalog, SpeciesData};
use inquire::list_option::ListOption;
use inquire::validator::Validation;
use inquire::{MultiSelect, Select};
use std::error::Error;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "battle-cli", about = "Simulate a two-combatant battle and print its log")]
struct Args {
    /// Species for side 1. Prompted for when omitted.
    #[arg(long)]
    p1: Option<String>,

    /// Species for side 2. Prompted for when omitted.
    #[arg(long)]
    p2: Option<String>,

    #[arg(long, default_value_t = 50)]
    level: u32,

    #[arg(long, default_value = "Serious")]
    nature: String,

    /// Fixes every random draw for a reproducible battle.
    #[arg(long)]
    seed: Option<u64>,

    /// Species catalog (JSON). Defaults to the bundled one.
    #[arg(long)]
    species: Option<PathBuf>,

    /// Move catalog (YAML). Defaults to the bundled one.
    #[arg(long)]
    moves: Option<PathBuf>,

    #[arg(long, default_value_t = 100)]
    max_rounds: u32,

    #[arg(long, value_enum, default_value_t = Policy::Random)]
    policy: Policy,

    /// Print the replay (both snapshots and the log) as JSON.
    #[arg(long)]
    json: bool,

    /// Print both combatants' HP as reconstructed after this log index.
    #[arg(long)]
    replay_index: Option<usize>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Policy {
    Random,
    HighestPower,
    BestMatchup,
}

impl Policy {
    fn chooser(self) -> MoveChooser {
        match self {
            Policy::Random => auto_select_move,
            Policy::HighestPower => choose_highest_power,
            Policy::BestMatchup => choose_best_matchup,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let species_db = match &args.species {
        Some(path) => SpeciesCatalog::load_from_json_file(path)?,
        None => SpeciesCatalog::load_default()?,
    };
    let move_db = match &args.moves {
        Some(path) => MoveCatalog::load_from_yaml_file(path)?,
        None => MoveCatalog::load_default().unwrap_or_else(|_| MoveCatalog::minimal()),
    };
    let nature: Nature = args.nature.parse()?;

    let combatant1 = build_combatant(&species_db, &move_db, args.p1.as_deref(), Side::One, args.level, nature)?;
    let combatant2 = build_combatant(&species_db, &move_db, args.p2.as_deref(), Side::Two, args.level, nature)?;

    let mut rng: Box<dyn FnMut() -> f64> = match args.seed {
        Some(seed) => Box::new(seeded_roll(seed)),
        None => Box::new(entropy_roll()),
    };

    let mut engine = BattleEngine::with_chooser(combatant1.clone(), combatant2.clone(), args.policy.chooser());
    engine.initialize()?;
    print_battle_status(engine.state());

    let mut rounds = 0;
    while !engine.is_finished() && rounds < args.max_rounds {
        rounds += 1;
        let outcome = engine.run_round(&mut *rng)?;
        for event in &outcome.events {
            print_event(engine.state(), event);
        }
    }

    println!("════════════════════════════════════════");
    match engine.state().winner {
        Some(side) => println!(
            "  Side {} ({}) wins after {} turns.",
            side,
            engine.state().combatant(side).name,
            engine.state().turn
        ),
        None => println!("  No winner after {} rounds.", rounds),
    }
    println!("════════════════════════════════════════");
    print_battle_status(engine.state());

    let replay = BattleReplay::new(combatant1, combatant2, engine.state().log.clone());
    if let Some(index) = args.replay_index {
        let frame = replay.frame_at(index);
        println!("Replay after event {}:", index);
        println!("  {} {}", frame.combatant1.name, hp_bar_string(frame.combatant1.current_hp, frame.combatant1.max_hp()));
        println!("  {} {}", frame.combatant2.name, hp_bar_string(frame.combatant2.current_hp, frame.combatant2.max_hp()));
    }
    if args.json {
        println!("{}", replay.to_json_pretty()?);
    }
    Ok(())
}

fn build_combatant(
    species_db: &SpeciesCatalog,
    move_db: &MoveCatalog,
    requested: Option<&str>,
    side: Side,
    level: u32,
    nature: Nature,
) -> Result<Combatant, Box<dyn Error>> {
    let (species, interactive) = match requested {
        Some(name) => (
            species_db
                .get(name)
                .ok_or_else(|| format!("Unknown species '{}'.", name))?,
            false,
        ),
        None => (select_species(species_db, side)?, true),
    };

    let moves = if interactive {
        select_moves(species, move_db)
    } else {
        default_moves(species, move_db)
    };

    let combatant = create_combatant(
        species,
        CreateCombatantOptions {
            moves: Some(moves),
            level: Some(level),
            nature: Some(nature),
            ..Default::default()
        },
        move_db,
    )?;
    Ok(combatant)
}

fn select_species(species_db: &SpeciesCatalog, side: Side) -> Result<&SpeciesData, Box<dyn Error>> {
    let list = species_db.sorted();
    let options: Vec<String> = list
        .iter()
        .map(|s| {
            let types: Vec<&str> = s.types.iter().map(|t| t.as_str()).collect();
            format!("#{:03} {} ({})", s.id, s.name, types.join("/"))
        })
        .collect();
    let choice = Select::new(&format!("Choose a combatant for side {}:", side), options.clone())
        .with_page_size(12)
        .prompt()?;
    let pos = options
        .iter()
        .position(|opt| opt == &choice)
        .ok_or("selection not found")?;
    Ok(list[pos])
}

fn select_moves(species: &SpeciesData, move_db: &MoveCatalog) -> Vec<String> {
    let learnable: Vec<String> = species
        .learnset
        .iter()
        .filter(|id| move_db.get(id.as_str()).is_some())
        .cloned()
        .collect();
    let options: Vec<String> = learnable
        .iter()
        .filter_map(|id| move_db.get(id))
        .map(|m| {
            let power = m.power.filter(|p| *p > 0).map_or("-".to_string(), |p| p.to_string());
            format!("{} [{} / power {}]", m.display_name(), m.move_type, power)
        })
        .collect();

    let validator = |s: &[ListOption<&String>]| {
        if s.is_empty() || s.len() > 4 {
            Ok(Validation::Invalid("Pick between one and four moves.".into()))
        } else {
            Ok(Validation::Valid)
        }
    };

    let ans = MultiSelect::new(&format!("Moves for {}:", species.name), options.clone())
        .with_page_size(10)
        .with_validator(validator)
        .prompt();

    match ans {
        Ok(selected) => selected
            .iter()
            .filter_map(|choice| options.iter().position(|opt| opt == choice))
            .map(|pos| learnable[pos].clone())
            .collect(),
        Err(_) => {
            println!("Selection cancelled, using default moves.");
            default_moves(species, move_db)
        }
    }
}

fn print_event(state: &BattleState, event: &BattleEvent) {
    let actor = state.combatant(event.actor);
    match event.kind {
        EventKind::NoLegalMove => {
            println!(
                "[turn {:>3}] {}",
                event.turn,
                event.message.as_deref().unwrap_or("No legal move.")
            );
        }
        EventKind::Move => {
            let defender = state.combatant(event.actor.opponent());
            let mut line = format!(
                "[turn {:>3}] {} used {}: {} damage",
                event.turn,
                actor.name,
                event.move_name.as_deref().unwrap_or("?"),
                event.damage
            );
            if event.is_crit {
                line.push_str(", critical hit");
            }
            if event.effectiveness == 0.0 {
                line.push_str(", no effect");
            } else if event.effectiveness > 1.0 {
                line.push_str(", super effective");
            } else if event.effectiveness < 1.0 {
                line.push_str(", not very effective");
            }
            println!("{}", line);
            if let Some(hp_after) = event.defender_hp_after {
                println!("            {} {}", defender.name, hp_bar_string(hp_after, defender.max_hp()));
            }
        }
    }
}

fn print_battle_status(state: &BattleState) {
    println!("─────────────────────────────────────────");
    for side in [Side::One, Side::Two] {
        let mon = state.combatant(side);
        let types: Vec<&str> = mon.types.iter().map(|t| t.as_str()).collect();
        let ability = mon.ability.as_deref().unwrap_or("none");
        let item = mon.item.map_or("none", |i| i.as_str());
        println!(
            "  [{}] {} Lv{} ({}) {}",
            side,
            mon.name,
            mon.level,
            types.join("/"),
            hp_bar_string(mon.current_hp, mon.max_hp())
        );
        println!("       nature: {} | ability: {} | item: {}", mon.nature, ability, item);
        let pp: Vec<String> = mon.moves.iter().map(|m| format!("{} {}", m.name, m.pp)).collect();
        println!("       pp: {}", pp.join(", "));
    }
    println!();
}

fn hp_bar_string(hp: i32, max_hp: i32) -> String {
    let ratio = if max_hp > 0 { hp as f64 / max_hp as f64 } else { 0.0 };
    let bars = ((ratio * 10.0) as usize).min(10);
    let filled = "█".repeat(bars);
    let empty = "░".repeat(10 - bars);
    format!("[{}{}] {}/{} ({}%)", filled, empty, hp, max_hp, (ratio * 100.0) as i32)
}
