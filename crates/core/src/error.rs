//! Error taxonomy for grid access and player-facing actions.
//! Grid errors are precondition violations; action errors are ordinary failed
//! turns whose `Display` text is what the player reads.

use thiserror::Error;

use crate::types::Pos;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("position ({}, {}) is outside the {width}x{height} grid", pos.x, pos.y)]
    OutOfBounds { pos: Pos, width: usize, height: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("There's no closed door here.")]
    NoClosedDoor,
    #[error("There's no open door here.")]
    NoOpenDoor,
    #[error("There's no door here to kick.")]
    NoDoorToKick,
    #[error("The door is already open.")]
    DoorAlreadyOpen,
    #[error("The door is locked!")]
    DoorLocked,
    #[error("You kick the door but it holds firm.")]
    DoorHeld,
    #[error("The door can't be closed.")]
    DoorJammed,
    #[error("No visible doors nearby to {verb}.")]
    NoDoorNearby { verb: &'static str },
    #[error("The door blocks your way.")]
    DoorBlocksWay,
    #[error("You can't move there.")]
    TileNotWalkable,
    #[error("Something is in the way.")]
    TargetOccupied,
    #[error("There's nothing here to pick up.")]
    NothingToPickUp,
    #[error("Your inventory is full! Can't pick up {item}.")]
    InventoryFull { item: String },
    #[error("There are no stairs here.")]
    NoStairs,
    #[error("You can't see any stairs here.")]
    StairsNotVisible,
    #[error("Path blocked, stopping auto-explore.")]
    PathNotFound,
    #[error("No unexplored areas remaining.")]
    NothingToExplore,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReplayError {
    #[error("journal format version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u16, expected: u16 },
    #[error("journal record {index} has sequence number {found}, expected {expected}")]
    OutOfSequence { index: usize, expected: u64, found: u64 },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
