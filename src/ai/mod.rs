pub mod eval;
pub mod simple;

pub use eval::{choose_best_matchup, evaluate_move};
pub use simple::{choose_highest_power, run_auto_battle, AutoBattleSummary};
