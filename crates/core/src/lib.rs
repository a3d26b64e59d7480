//! Dungeon floor simulation: generation, sight, pathing, combat, monster
//! chase logic and a registry of visited floors, driven one command at a
//! time by [`Game`].

pub mod ai;
pub mod combat;
pub mod companion;
pub mod config;
pub mod doors;
pub mod error;
pub mod event;
pub mod floor;
pub mod game;
pub mod grid;
pub mod journal;
pub mod loot;
pub mod mapgen;
pub mod monster;
pub mod pathfinding;
pub mod player;
pub mod registry;
pub mod replay;
pub mod rng;
pub mod tile;
pub mod types;
pub mod visibility;

pub use config::{GameConfig, GenerationConfig, PlayerConfig};
pub use error::{ActionError, ConfigError, GridError, ReplayError};
pub use event::LogEvent;
pub use floor::Floor;
pub use game::{Game, PlayerCommand, TurnCost};
pub use journal::{CommandRecord, InputJournal};
pub use registry::FloorRegistry;
pub use replay::*;
pub use rng::DungeonRng;
pub use types::*;
