use crate::core::errors::FactoryError;
use crate::core::state::{Combatant, StatusCondition};
use crate::core::stats::{StatKey, StatTable, MAX_BASE_STAT, MAX_EV, MAX_EV_TOTAL, MAX_IV};
use crate::data::items::HeldItem;
use crate::data::moves::MoveCatalog;
use crate::data::natures::Nature;
use crate::data::species::SpeciesData;

pub const DEFAULT_LEVEL: u32 = 50;
pub const MAX_MOVES: usize = 4;

/// Selections made upstream. Anything left `None` gets a default.
#[derive(Clone, Debug, Default)]
pub struct CreateCombatantOptions {
    pub moves: Option<Vec<String>>,
    pub name: Option<String>,
    pub level: Option<u32>,
    pub ivs: Option<StatTable>,
    pub evs: Option<StatTable>,
    pub nature: Option<Nature>,
    pub ability: Option<String>,
    pub item: Option<HeldItem>,
    pub status: Option<StatusCondition>,
}

pub fn validate_moves(
    species: &SpeciesData,
    requested_moves: &[String],
    move_db: &MoveCatalog,
) -> Result<Vec<String>, FactoryError> {
    if requested_moves.is_empty() || requested_moves.len() > MAX_MOVES {
        return Err(FactoryError::InvalidMoveCount {
            species: species.name.clone(),
            count: requested_moves.len(),
        });
    }

    let unknown: Vec<String> = requested_moves
        .iter()
        .filter(|id| move_db.get(id.as_str()).is_none())
        .cloned()
        .collect();
    if !unknown.is_empty() {
        return Err(FactoryError::UnknownMoves {
            species: species.name.clone(),
            moves: unknown.join(", "),
        });
    }

    let invalid: Vec<String> = requested_moves
        .iter()
        .filter(|id| !species.learnset.contains(id))
        .cloned()
        .collect();
    if !invalid.is_empty() {
        return Err(FactoryError::UnlearnableMoves {
            species: species.name.clone(),
            moves: invalid.join(", "),
        });
    }

    Ok(requested_moves.to_vec())
}

/// Level 1..=100, IVs 0..=31, EVs 0..=252 with a 510 total.
pub fn validate_progression(level: u32, ivs: &StatTable, evs: &StatTable) -> Result<(), FactoryError> {
    if !(1..=100).contains(&level) {
        return Err(FactoryError::InvalidLevel(level));
    }
    for key in StatKey::ALL {
        let iv = ivs.get(key);
        if !(0..=MAX_IV).contains(&iv) {
            return Err(FactoryError::InvalidIv {
                stat: key.as_str(),
                value: iv,
            });
        }
        let ev = evs.get(key);
        if !(0..=MAX_EV).contains(&ev) {
            return Err(FactoryError::InvalidEv {
                stat: key.as_str(),
                value: ev,
            });
        }
    }
    let total = evs.total();
    if total > MAX_EV_TOTAL {
        return Err(FactoryError::EvTotalExceeded(total));
    }
    Ok(())
}

/// Non-positive base stats are allowed and fall back to a fixed stat.
fn validate_base_stats(base_stats: &StatTable) -> Result<(), FactoryError> {
    for key in StatKey::ALL {
        let value = base_stats.get(key);
        if value > MAX_BASE_STAT {
            return Err(FactoryError::InvalidBaseStat {
                stat: key.as_str(),
                value,
            });
        }
    }
    Ok(())
}

/// Checks a combatant that arrived fully formed, e.g. deserialized from JS,
/// against the same bounds `create_combatant` enforces. An empty move list
/// is accepted; that side simply forfeits its first turn.
pub fn validate_combatant(combatant: &Combatant) -> Result<(), FactoryError> {
    if combatant.types.is_empty() || combatant.types.len() > 2 {
        return Err(FactoryError::InvalidTypeCount {
            species: combatant.name.clone(),
            count: combatant.types.len(),
        });
    }
    if combatant.moves.len() > MAX_MOVES {
        return Err(FactoryError::InvalidMoveCount {
            species: combatant.name.clone(),
            count: combatant.moves.len(),
        });
    }
    validate_progression(combatant.level, &combatant.ivs, &combatant.evs)?;
    validate_base_stats(&combatant.base_stats)
}

/// Moves default to the first four learnable moves the catalog knows.
pub fn default_moves(species: &SpeciesData, move_db: &MoveCatalog) -> Vec<String> {
    species
        .learnset
        .iter()
        .filter(|id| move_db.get(id.as_str()).is_some())
        .take(MAX_MOVES)
        .cloned()
        .collect()
}

pub fn create_combatant(
    species: &SpeciesData,
    options: CreateCombatantOptions,
    move_db: &MoveCatalog,
) -> Result<Combatant, FactoryError> {
    if species.types.is_empty() || species.types.len() > 2 {
        return Err(FactoryError::InvalidTypeCount {
            species: species.name.clone(),
            count: species.types.len(),
        });
    }

    validate_base_stats(&species.base_stats)?;

    let level = options.level.unwrap_or(DEFAULT_LEVEL);
    let ivs = options.ivs.unwrap_or_else(|| StatTable::uniform(MAX_IV));
    let evs = options.evs.unwrap_or_default();
    validate_progression(level, &ivs, &evs)?;

    let requested = options
        .moves
        .unwrap_or_else(|| default_moves(species, move_db));
    let move_ids = validate_moves(species, &requested, move_db)?;
    let moves = move_ids
        .iter()
        .filter_map(|id| move_db.get(id))
        .map(|data| data.to_slot())
        .collect();

    let ability = options
        .ability
        .or_else(|| species.abilities.first().cloned());

    let mut combatant = Combatant {
        id: species.id,
        name: options.name.unwrap_or_else(|| species.name.clone()),
        types: species.types.clone(),
        base_stats: species.base_stats,
        level,
        ivs,
        evs,
        nature: options.nature.unwrap_or_default(),
        item: options.item,
        ability,
        status: options.status,
        current_hp: 0,
        moves,
    };
    combatant.restore_full_hp();
    Ok(combatant)
}
