pub mod ai;
pub mod core;
pub mod data;

pub use crate::ai::{choose_best_matchup, choose_highest_power, run_auto_battle, AutoBattleSummary};
pub use crate::core::{
    battle::{auto_select_move, is_battle_over, BattleEngine, BattleOptions, MoveChooser, MoveOutcome, RoundOutcome},
    damage::{resolve_damage, DamageOutcome},
    errors::{CatalogError, FactoryError, MoveError},
    factory::{create_combatant, CreateCombatantOptions},
    order::{effective_speed, first_actor},
    replay::{state_at_index, BattleReplay, ReplayCursor, ReplayFrame},
    state::{
        BattleEvent, BattlePhase, BattleState, Combatant, EventKind, MoveCategory, MoveSlot, Side,
        StatusCondition,
    },
    stats::{effective_stat, StatKey, StatTable},
    utils::{entropy_roll, seeded_roll},
};
pub use crate::data::{
    items::HeldItem,
    moves::{MoveCatalog, MoveData},
    natures::Nature,
    species::{SpeciesCatalog, SpeciesData},
    type_chart::{ElementType, TypeChart},
};

#[cfg(target_arch = "wasm32")]
pub mod wasm;
