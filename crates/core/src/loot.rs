//! Loot capability: what a slain monster leaves behind, and where it lands.

use serde::{Deserialize, Serialize};

use crate::floor::Floor;
use crate::monster::{Monster, MonsterKind};
use crate::rng::DungeonRng;
use crate::types::{ItemId, Pos};

/// An opaque reference to item content; the core only moves it around.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemRef {
    pub name: String,
    pub glyph: char,
}

impl ItemRef {
    pub fn new(name: &str, glyph: char) -> Self {
        Self { name: name.to_string(), glyph }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FloorItem {
    pub item: ItemRef,
    pub pos: Pos,
}

pub trait LootProvider {
    /// Rolls whether `monster` drops anything on `floor_number`.
    fn roll_drop(
        &self,
        monster: &Monster,
        floor_number: u32,
        rng: &mut DungeonRng,
    ) -> Option<ItemRef>;
}

/// Tile offsets tried in order when placing a drop.
const DROP_OFFSETS: [(i32, i32); 9] =
    [(0, 0), (1, 0), (-1, 0), (0, 1), (0, -1), (1, 1), (-1, -1), (1, -1), (-1, 1)];

/// Places a rolled drop on the first free walkable tile around `origin`.
/// A tile is free when no living monster and no other item occupies it.
pub fn drop_loot(floor: &mut Floor, origin: Pos, item: ItemRef) -> Option<ItemId> {
    let free = |pos: Pos| {
        floor.grid.is_walkable(pos)
            && floor.monster_at(pos).is_none()
            && floor.item_at(pos).is_none()
    };
    let spot = DROP_OFFSETS.iter().map(|&(dx, dy)| origin.offset(dx, dy)).find(|&pos| free(pos));
    let Some(pos) = spot else {
        log::debug!("no room to drop {} near {origin:?}", item.name);
        return None;
    };
    Some(floor.items.insert(FloorItem { item, pos }))
}

pub fn drop_chance(floor_number: u32) -> f64 {
    0.4 + (f64::from(floor_number) * 0.01).min(0.1)
}

/// Drop tables keyed by monster kind, scaled a little by depth.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardLoot;

impl LootProvider for StandardLoot {
    fn roll_drop(
        &self,
        monster: &Monster,
        floor_number: u32,
        rng: &mut DungeonRng,
    ) -> Option<ItemRef> {
        if !rng.chance(drop_chance(floor_number)) {
            return None;
        }
        let roll = rng.range_inclusive(1, 100);
        let item = match monster.kind {
            MonsterKind::GiantRat => rat_loot(roll, floor_number, rng),
            MonsterKind::Goblin => goblin_loot(roll, floor_number, rng),
            MonsterKind::Orc => orc_loot(roll, floor_number, rng),
        };
        Some(item)
    }
}

fn rat_loot(roll: i32, floor_number: u32, rng: &mut DungeonRng) -> ItemRef {
    match roll {
        ..=70 => potion("Minor Health Potion"),
        71..=90 => potion("Health Potion"),
        _ if floor_number >= 3 => accessory(rng),
        _ => weapon("Rusty Dagger"),
    }
}

fn goblin_loot(roll: i32, floor_number: u32, rng: &mut DungeonRng) -> ItemRef {
    match roll {
        ..=40 => {
            let choices = if floor_number >= 5 {
                ["Iron Sword", "Short Sword"]
            } else {
                ["Rusty Dagger", "Short Sword"]
            };
            weapon(choices[rng.index(choices.len())])
        }
        41..=65 if floor_number >= 4 => armor("Chain Mail"),
        41..=65 => armor("Leather Armor"),
        66..=85 => {
            let choices = ["Minor Health Potion", "Health Potion"];
            potion(choices[rng.index(choices.len())])
        }
        _ => accessory(rng),
    }
}

fn orc_loot(roll: i32, floor_number: u32, rng: &mut DungeonRng) -> ItemRef {
    match roll {
        ..=35 => weapon(match floor_number {
            6.. => "Battle Axe",
            3..=5 => "Iron Sword",
            _ => "Short Sword",
        }),
        36..=60 => armor(match floor_number {
            5.. => "Plate Armor",
            3..=4 => "Chain Mail",
            _ => "Leather Armor",
        }),
        61..=80 if floor_number >= 4 => potion("Greater Health Potion"),
        61..=80 => potion("Health Potion"),
        _ => accessory(rng),
    }
}

fn weapon(name: &str) -> ItemRef {
    ItemRef::new(name, ')')
}

fn armor(name: &str) -> ItemRef {
    ItemRef::new(name, '[')
}

fn potion(name: &str) -> ItemRef {
    ItemRef::new(name, '!')
}

fn accessory(rng: &mut DungeonRng) -> ItemRef {
    let choices = ["Ring of Vitality", "Amulet of Strength", "Bracelet of Protection"];
    ItemRef::new(choices[rng.index(choices.len())], '=')
}
