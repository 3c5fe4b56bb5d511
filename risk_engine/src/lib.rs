pub mod card;
pub mod combat;
pub mod config;
pub mod error;
pub mod game_engine;
pub mod loader;
pub mod map;
pub mod player;
pub mod random;
pub mod record;
pub mod render;
pub mod state;

pub use card::{Card, Deck};
pub use config::RulesConfig;
pub use error::LoadError;
pub use game_engine::GameEngine;
pub use map::{Territory, TerritoryId, World};
pub use player::{Player, PlayerBot, PlayerId, PlayerKind};
pub use random::{LoadedDice, RandomSource};
pub use record::{GameResult, MoveAttack, MoveFortify, Record};
pub use state::GameState;
