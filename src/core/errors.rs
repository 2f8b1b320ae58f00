use crate::core::state::Side;

/// Rejected `execute_move` / `run_round` call. State is untouched whenever one is returned.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("battle has not been initialized")]
    NotStarted,

    #[error("battle is already finished")]
    BattleFinished,

    #[error("side {side} has no move at index {index} ({available} known)")]
    InvalidMoveIndex {
        side: Side,
        index: usize,
        available: usize,
    },

    #[error("side {side} has no PP left for {move_name}")]
    NoPpRemaining { side: Side, move_name: String },
}

/// Selection rejected while normalizing a combatant at the boundary.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FactoryError {
    #[error("level {0} is outside 1..=100")]
    InvalidLevel(u32),

    #[error("{stat} IV {value} is outside 0..=31")]
    InvalidIv { stat: &'static str, value: i32 },

    #[error("{stat} EV {value} is outside 0..=252")]
    InvalidEv { stat: &'static str, value: i32 },

    #[error("EV total {0} exceeds 510")]
    EvTotalExceeded(i32),

    #[error("base {stat} {value} exceeds 255")]
    InvalidBaseStat { stat: &'static str, value: i32 },

    #[error("'{species}' must have one or two types, found {count}")]
    InvalidTypeCount { species: String, count: usize },

    #[error("'{species}' needs between one and four moves, got {count}")]
    InvalidMoveCount { species: String, count: usize },

    #[error("unknown move id(s) for '{species}': {moves}")]
    UnknownMoves { species: String, moves: String },

    #[error("move(s) not learnable by '{species}': {moves}")]
    UnlearnableMoves { species: String, moves: String },
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid YAML catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),
}
