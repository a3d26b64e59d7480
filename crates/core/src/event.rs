use std::fmt;

use crate::combat::Strike;
use crate::companion::Scratch;
use crate::doors::DoorOutcome;
use crate::error::ActionError;
use crate::player::{Heal, LevelUp};

/// Narration produced by a turn, oldest first in the game log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    Welcome,
    Waited,
    Strike(Strike),
    MonsterSlain { name: String },
    LootDropped { monster: String, item: String },
    LevelUp(LevelUp),
    KittenScratch(Scratch),
    Healed(Heal),
    PickedUp { item: String },
    Door(DoorOutcome),
    ActionFailed(ActionError),
    PlayerDied,
    Respawned,
    FloorChanged { from: u32, to: u32 },
    AutoExploreStarted,
    AutoExploreCancelled,
    /// Auto-explore wanted to step onto a monster.
    MonsterInTheWay,
    /// Auto-explore stopped after a step revealed monsters.
    MonstersSpotted { count: usize, first: String },
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogEvent::Welcome => f.write_str("Welcome to the dungeon!"),
            LogEvent::Waited => f.write_str("You wait."),
            LogEvent::Strike(strike) => f.write_str(&strike.message),
            LogEvent::MonsterSlain { name } => write!(f, "You killed the {name}!"),
            LogEvent::LootDropped { monster, item } => write!(f, "The {monster} drops {item}!"),
            LogEvent::LevelUp(gain) => write!(
                f,
                "Level up! You are now level {}. HP: {}->{}",
                gain.level, gain.old_max_hp, gain.new_max_hp
            ),
            LogEvent::KittenScratch(scratch) => write!(f, "{scratch}"),
            LogEvent::Healed(heal) => write!(
                f,
                "You feel slightly better. (+{} HP: {}->{})",
                heal.amount, heal.from, heal.to
            ),
            LogEvent::PickedUp { item } => write!(f, "You pick up {item}."),
            LogEvent::Door(outcome) => write!(f, "{outcome}"),
            LogEvent::ActionFailed(error) => write!(f, "{error}"),
            LogEvent::PlayerDied => f.write_str("You have died! Respawning..."),
            LogEvent::Respawned => f.write_str("You respawn at a safe location."),
            LogEvent::FloorChanged { from, to } if to > from => {
                write!(f, "You descend to floor {to}.")
            }
            LogEvent::FloorChanged { to, .. } => write!(f, "You ascend to floor {to}."),
            LogEvent::AutoExploreStarted => f.write_str("Auto-exploring..."),
            LogEvent::AutoExploreCancelled => f.write_str("Auto-explore cancelled."),
            LogEvent::MonsterInTheWay => f.write_str("Monster spotted! Stopping auto-explore."),
            LogEvent::MonstersSpotted { count: 1, first } => {
                write!(f, "{first} spotted! Stopping auto-explore.")
            }
            LogEvent::MonstersSpotted { .. } => {
                f.write_str("Monsters spotted! Stopping auto-explore.")
            }
        }
    }
}
