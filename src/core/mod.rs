pub mod battle;
pub mod damage;
pub mod errors;
pub mod factory;
pub mod order;
pub mod replay;
pub mod state;
pub mod stats;
pub mod utils;
