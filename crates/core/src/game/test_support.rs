//! Fixtures shared by the `game` submodule tests.

use super::*;
use crate::loot::ItemRef;
use crate::monster::Monster;

pub(super) const FIXTURE_SEED: u64 = 0x5EED;

/// A session on a hand-drawn floor 1 with default tuning.
pub(super) fn game_on(rows: &[&str], start: Pos) -> Game {
    let floor = Floor::from_ascii(1, rows);
    Game::from_floor(FIXTURE_SEED, GameConfig::default(), floor, start)
}

pub(super) fn messages(game: &Game) -> Vec<String> {
    game.log().iter().map(ToString::to_string).collect()
}

/// Every kill drops the same trinket.
pub(super) struct AlwaysDrops;

impl LootProvider for AlwaysDrops {
    fn roll_drop(&self, _: &Monster, _: u32, _: &mut DungeonRng) -> Option<ItemRef> {
        Some(ItemRef::new("Trinket", '*'))
    }
}
