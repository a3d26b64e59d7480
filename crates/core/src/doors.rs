//! Opening, closing and kicking doors on a floor.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::error::ActionError;
use crate::floor::Floor;
use crate::rng::DungeonRng;
use crate::tile::{Door, TileKind};
use crate::types::Pos;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoorAction {
    Open,
    Close,
    Kick,
}

impl DoorAction {
    pub const fn verb(self) -> &'static str {
        match self {
            DoorAction::Open => "open",
            DoorAction::Close => "close",
            DoorAction::Kick => "kick",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoorOutcome {
    Opened,
    Closed,
    KickedDown,
}

impl fmt::Display for DoorOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DoorOutcome::Opened => "You open the door.",
            DoorOutcome::Closed => "You close the door.",
            DoorOutcome::KickedDown => "You kick the door down! It splinters apart.",
        })
    }
}

/// Odds of a kick breaking a door.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KickOdds {
    pub locked: f64,
    pub unlocked: f64,
}

impl Default for KickOdds {
    fn default() -> Self {
        Self { locked: 0.7, unlocked: 0.9 }
    }
}

impl From<&GameConfig> for KickOdds {
    fn from(config: &GameConfig) -> Self {
        Self { locked: config.kick_locked_chance, unlocked: config.kick_unlocked_chance }
    }
}

fn intact_door_at(floor: &Floor, pos: Pos) -> Option<Door> {
    floor.grid.kind_at(pos).and_then(TileKind::intact_door)
}

pub fn try_open_door(floor: &mut Floor, pos: Pos) -> Result<DoorOutcome, ActionError> {
    let door = match intact_door_at(floor, pos) {
        Some(door) if !door.open => door,
        _ => return Err(ActionError::NoClosedDoor),
    };
    if door.locked {
        return Err(ActionError::DoorLocked);
    }
    floor.grid.set_kind(pos, TileKind::Door(Door { open: true, ..door }));
    Ok(DoorOutcome::Opened)
}

pub fn try_close_door(floor: &mut Floor, pos: Pos) -> Result<DoorOutcome, ActionError> {
    let door = match intact_door_at(floor, pos) {
        Some(door) if door.open => door,
        _ => return Err(ActionError::NoOpenDoor),
    };
    if floor.monster_at(pos).is_some() {
        return Err(ActionError::DoorJammed);
    }
    floor.grid.set_kind(pos, TileKind::Door(Door { open: false, ..door }));
    Ok(DoorOutcome::Closed)
}

/// A successful kick breaks the door for good: it unlocks and reads as floor.
pub fn try_kick_door(
    floor: &mut Floor,
    pos: Pos,
    odds: KickOdds,
    rng: &mut DungeonRng,
) -> Result<DoorOutcome, ActionError> {
    let Some(door) = intact_door_at(floor, pos) else {
        return Err(ActionError::NoDoorToKick);
    };
    if door.open {
        return Err(ActionError::DoorAlreadyOpen);
    }
    let chance = if door.locked { odds.locked } else { odds.unlocked };
    if !rng.chance(chance) {
        return Err(ActionError::DoorHeld);
    }
    floor.grid.set_kind(pos, TileKind::Door(Door { locked: false, broken: true, open: false }));
    Ok(DoorOutcome::KickedDown)
}

pub fn apply_door_action(
    floor: &mut Floor,
    pos: Pos,
    action: DoorAction,
    odds: KickOdds,
    rng: &mut DungeonRng,
) -> Result<DoorOutcome, ActionError> {
    match action {
        DoorAction::Open => try_open_door(floor, pos),
        DoorAction::Close => try_close_door(floor, pos),
        DoorAction::Kick => try_kick_door(floor, pos, odds, rng),
    }
}

/// First intact, currently visible door next to `origin`, in direction order.
pub fn adjacent_visible_door(floor: &Floor, origin: Pos) -> Option<Pos> {
    floor
        .grid
        .neighbors(origin)
        .map(|(_, pos)| pos)
        .find(|&pos| floor.grid.is_visible(pos) && intact_door_at(floor, pos).is_some())
}
