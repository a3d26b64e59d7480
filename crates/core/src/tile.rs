//! Tile kinds and the per-tile visibility envelope.
//! Walkability, transparency and glyph are derived from the kind on demand, so
//! they can never disagree with the door or staircase sub-state.

use crate::types::StairDirection;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Door {
    pub locked: bool,
    pub broken: bool,
    pub open: bool,
}

impl Door {
    pub const fn closed(locked: bool) -> Self {
        Self { locked, broken: false, open: false }
    }

    /// Open or broken doors can be walked and seen through.
    pub const fn is_passable(self) -> bool {
        self.open || self.broken
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileKind {
    /// Uncarved background outside the dungeon.
    Void,
    Wall,
    Floor,
    Door(Door),
    Staircase { direction: StairDirection, target_floor: u32 },
}

impl TileKind {
    pub const fn walkable(self) -> bool {
        match self {
            TileKind::Void | TileKind::Wall => false,
            TileKind::Floor | TileKind::Staircase { .. } => true,
            TileKind::Door(door) => door.is_passable(),
        }
    }

    pub const fn transparent(self) -> bool {
        match self {
            TileKind::Wall => false,
            TileKind::Void | TileKind::Floor | TileKind::Staircase { .. } => true,
            TileKind::Door(door) => door.is_passable(),
        }
    }

    pub const fn glyph(self) -> char {
        match self {
            TileKind::Void => ' ',
            TileKind::Wall => '#',
            TileKind::Floor => '.',
            TileKind::Door(door) if door.broken => '.',
            TileKind::Door(door) if door.open => '/',
            TileKind::Door(_) => '+',
            TileKind::Staircase { direction, .. } => direction.glyph(),
        }
    }

    /// Plain floor, including doors that have been smashed.
    pub const fn is_floor_like(self) -> bool {
        matches!(self, TileKind::Floor | TileKind::Door(Door { broken: true, .. }))
    }

    /// An intact door, open or closed. Broken doors no longer count.
    pub const fn intact_door(self) -> Option<Door> {
        match self {
            TileKind::Door(door) if !door.broken => Some(door),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    pub kind: TileKind,
    pub visible: bool,
    pub explored: bool,
}

impl Tile {
    pub const fn new(kind: TileKind) -> Self {
        Self { kind, visible: false, explored: false }
    }

    pub const fn walkable(&self) -> bool {
        self.kind.walkable()
    }

    pub const fn transparent(&self) -> bool {
        self.kind.transparent()
    }

    pub const fn glyph(&self) -> char {
        self.kind.glyph()
    }

    /// Marks the tile seen this turn; keeps `visible ⟹ explored`.
    pub fn mark_seen(&mut self) {
        self.visible = true;
        self.explored = true;
    }
}
