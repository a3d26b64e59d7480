//! One dungeon level: tiles plus everything standing or lying on them.

use slotmap::SlotMap;
use xxhash_rust::xxh3::xxh3_64;

use crate::error::ActionError;
use crate::grid::TileGrid;
use crate::loot::FloorItem;
use crate::monster::{AiState, Monster, MonsterKind};
use crate::rng::DungeonRng;
use crate::tile::{Door, TileKind};
use crate::types::{ItemId, MonsterId, Pos, StairDirection, manhattan};

const RANDOM_POSITION_ATTEMPTS: u32 = 100;
const RESPAWN_ATTEMPTS: u32 = 50;

/// Axis-aligned room rectangle; `x`/`y` is the top-left wall corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Room {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub const fn center(&self) -> Pos {
        Pos::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Edge-inclusive overlap, so touching rooms also count as intersecting.
    pub const fn intersects(&self, other: &Room) -> bool {
        self.x <= other.x + other.width
            && self.x + self.width >= other.x
            && self.y <= other.y + other.height
            && self.y + self.height >= other.y
    }

    /// Carved cells, excluding the one-tile rim.
    pub fn interior(&self) -> impl Iterator<Item = Pos> + '_ {
        let (x0, x1) = (self.x + 1, self.x + self.width - 1);
        (self.y + 1..self.y + self.height - 1)
            .flat_map(move |y| (x0..x1).map(move |x| Pos::new(x, y)))
    }

    pub fn random_interior_pos(&self, rng: &mut DungeonRng) -> Pos {
        let x = rng.range_inclusive(self.x + 1, self.x + self.width - 2);
        let y = rng.range_inclusive(self.y + 1, self.y + self.height - 2);
        Pos::new(x, y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Staircase {
    pub pos: Pos,
    pub direction: StairDirection,
    pub target_floor: u32,
}

#[derive(Clone, Debug)]
pub struct Floor {
    pub number: u32,
    pub grid: TileGrid,
    pub rooms: Vec<Room>,
    /// Iterates in spawn order; nothing is inserted after generation.
    pub monsters: SlotMap<MonsterId, Monster>,
    pub staircases: Vec<Staircase>,
    pub items: SlotMap<ItemId, FloorItem>,
}

impl PartialEq for Floor {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
            && self.grid == other.grid
            && self.rooms == other.rooms
            && self.monsters.iter().eq(other.monsters.iter())
            && self.staircases == other.staircases
            && self.items.iter().eq(other.items.iter())
    }
}

impl Eq for Floor {}

impl Floor {
    pub fn new(number: u32, width: usize, height: usize) -> Self {
        Self {
            number,
            grid: TileGrid::new(width, height),
            rooms: Vec::new(),
            monsters: SlotMap::with_key(),
            staircases: Vec::new(),
            items: SlotMap::with_key(),
        }
    }

    /// Builds a floor from glyph rows. Accepts everything `render_ascii`
    /// emits plus `r`, `g` and `o` for monsters standing on floor.
    /// Staircases lead one floor up or down from `number`.
    pub fn from_ascii(number: u32, rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let mut floor = Floor::new(number, width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                let pos = Pos::new(x as i32, y as i32);
                let kind = match glyph {
                    '#' => TileKind::Wall,
                    '+' => TileKind::Door(Door::closed(false)),
                    '/' => TileKind::Door(Door { locked: false, broken: false, open: true }),
                    '<' => floor.add_staircase(pos, StairDirection::Up),
                    '>' => floor.add_staircase(pos, StairDirection::Down),
                    '.' | 'r' | 'g' | 'o' => TileKind::Floor,
                    _ => TileKind::Void,
                };
                floor.grid.set_kind(pos, kind);
                let monster = match glyph {
                    'r' => Some(MonsterKind::GiantRat),
                    'g' => Some(MonsterKind::Goblin),
                    'o' => Some(MonsterKind::Orc),
                    _ => None,
                };
                if let Some(kind) = monster {
                    floor.monsters.insert(Monster::spawn(kind, pos));
                }
            }
        }
        floor
    }

    fn add_staircase(&mut self, pos: Pos, direction: StairDirection) -> TileKind {
        let target_floor = match direction {
            StairDirection::Up => self.number.saturating_sub(1),
            StairDirection::Down => self.number + 1,
        };
        self.staircases.push(Staircase { pos, direction, target_floor });
        TileKind::Staircase { direction, target_floor }
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// The living monster standing on `pos`, if any.
    pub fn monster_at(&self, pos: Pos) -> Option<MonsterId> {
        self.monsters
            .iter()
            .find(|(_, monster)| monster.pos == pos && monster.is_alive())
            .map(|(id, _)| id)
    }

    pub fn item_at(&self, pos: Pos) -> Option<ItemId> {
        self.items.iter().find(|(_, item)| item.pos == pos).map(|(id, _)| id)
    }

    pub fn take_item_at(&mut self, pos: Pos) -> Option<FloorItem> {
        let id = self.item_at(pos)?;
        self.items.remove(id)
    }

    pub fn staircase_at(&self, pos: Pos) -> Option<Staircase> {
        self.staircases.iter().copied().find(|stairs| stairs.pos == pos)
    }

    pub fn staircase(&self, direction: StairDirection) -> Option<Staircase> {
        self.staircases.iter().copied().find(|stairs| stairs.direction == direction)
    }

    /// Drops monsters whose hit points ran out. Returns how many were removed.
    pub fn remove_dead_monsters(&mut self) -> usize {
        let before = self.monsters.len();
        self.monsters.retain(|_, monster| monster.is_alive());
        before - self.monsters.len()
    }

    /// Living monsters on currently visible tiles, in spawn order.
    pub fn visible_monsters(&self) -> Vec<MonsterId> {
        self.monsters
            .iter()
            .filter(|(_, monster)| monster.is_alive() && self.grid.is_visible(monster.pos))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn visible_items(&self) -> Vec<ItemId> {
        self.items
            .iter()
            .filter(|(_, item)| self.grid.is_visible(item.pos))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn reset_monster_ai(&mut self) {
        for monster in self.monsters.values_mut() {
            monster.forget_player();
        }
    }

    /// Moves a monster onto a walkable cell no other living monster holds.
    pub fn move_monster(&mut self, id: MonsterId, to: Pos) -> Result<(), ActionError> {
        if !self.grid.is_walkable(to) {
            return Err(ActionError::TileNotWalkable);
        }
        if self.monster_at(to).is_some_and(|other| other != id) {
            return Err(ActionError::TargetOccupied);
        }
        if let Some(monster) = self.monsters.get_mut(id) {
            monster.pos = to;
        }
        Ok(())
    }

    /// A random walkable cell, falling back to the first room's center and
    /// then the middle of the map.
    pub fn random_walkable_position(&self, rng: &mut DungeonRng) -> Pos {
        let (width, height) = (self.width() as i32, self.height() as i32);
        for _ in 0..RANDOM_POSITION_ATTEMPTS {
            let x = rng.range_inclusive(0, width - 1);
            let y = rng.range_inclusive(0, height - 1);
            let pos = Pos::new(x, y);
            if self.grid.is_walkable(pos) {
                return pos;
            }
        }
        match self.rooms.first() {
            Some(room) => room.center(),
            None => Pos::new(width / 2, height / 2),
        }
    }

    /// A random walkable cell at least `safe_distance` (Manhattan) from every
    /// living monster, or any walkable cell once the attempts run out.
    pub fn safe_position(&self, safe_distance: u32, rng: &mut DungeonRng) -> Pos {
        for _ in 0..RESPAWN_ATTEMPTS {
            let pos = self.random_walkable_position(rng);
            let safe = self
                .monsters
                .values()
                .filter(|monster| monster.is_alive())
                .all(|monster| manhattan(pos, monster.pos) >= safe_distance);
            if safe {
                return pos;
            }
        }
        self.random_walkable_position(rng)
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.number.to_le_bytes());
        bytes.extend((self.width() as u32).to_le_bytes());
        bytes.extend((self.height() as u32).to_le_bytes());
        for tile in self.grid.tiles() {
            match tile.kind {
                TileKind::Void => bytes.push(0),
                TileKind::Wall => bytes.push(1),
                TileKind::Floor => bytes.push(2),
                TileKind::Door(door) => {
                    bytes.push(3);
                    let flags = u8::from(door.locked)
                        | (u8::from(door.broken) << 1)
                        | (u8::from(door.open) << 2);
                    bytes.push(flags);
                }
                TileKind::Staircase { direction, target_floor } => {
                    bytes.push(4);
                    bytes.push(direction as u8);
                    bytes.extend(target_floor.to_le_bytes());
                }
            }
            bytes.push(u8::from(tile.visible) | (u8::from(tile.explored) << 1));
        }

        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            for value in [room.x, room.y, room.width, room.height] {
                bytes.extend(value.to_le_bytes());
            }
        }

        bytes.extend((self.monsters.len() as u32).to_le_bytes());
        for monster in self.monsters.values() {
            bytes.push(monster.kind as u8);
            bytes.extend(monster.pos.y.to_le_bytes());
            bytes.extend(monster.pos.x.to_le_bytes());
            bytes.extend(monster.current_hp.to_le_bytes());
            bytes.extend(monster.max_hp.to_le_bytes());
            match monster.ai {
                AiState::Unaware => bytes.push(0),
                AiState::Alerted { target } => {
                    bytes.push(1);
                    bytes.extend(target.y.to_le_bytes());
                    bytes.extend(target.x.to_le_bytes());
                }
            }
        }

        bytes.extend((self.staircases.len() as u32).to_le_bytes());
        for stairs in &self.staircases {
            bytes.extend(stairs.pos.y.to_le_bytes());
            bytes.extend(stairs.pos.x.to_le_bytes());
            bytes.push(stairs.direction as u8);
            bytes.extend(stairs.target_floor.to_le_bytes());
        }

        bytes.extend((self.items.len() as u32).to_le_bytes());
        for floor_item in self.items.values() {
            bytes.extend(floor_item.pos.y.to_le_bytes());
            bytes.extend(floor_item.pos.x.to_le_bytes());
            bytes.extend(floor_item.item.name.as_bytes());
            bytes.push(0);
        }

        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}
