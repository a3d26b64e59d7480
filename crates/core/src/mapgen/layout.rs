//! Room placement and corridor carving.

use crate::config::GenerationConfig;
use crate::floor::Room;
use crate::grid::TileGrid;
use crate::rng::DungeonRng;
use crate::tile::TileKind;
use crate::types::Pos;

/// Smallest room side that still leaves one carved cell inside the rim.
const MIN_ROOM_SIDE: i32 = 3;

/// Rolls a candidate room that fits inside the map with a one-tile margin.
/// Sizes are clamped to the map; `None` when not even the smallest room fits.
pub(super) fn roll_room(config: &GenerationConfig, rng: &mut DungeonRng) -> Option<Room> {
    let map_width = i32::try_from(config.width).unwrap_or(i32::MAX);
    let map_height = i32::try_from(config.height).unwrap_or(i32::MAX);
    let width = roll_side(config, map_width, rng)?;
    let height = roll_side(config, map_height, rng)?;
    let x = rng.range_inclusive(1, map_width - width - 1);
    let y = rng.range_inclusive(1, map_height - height - 1);
    Some(Room::new(x, y, width, height))
}

fn roll_side(config: &GenerationConfig, map_side: i32, rng: &mut DungeonRng) -> Option<i32> {
    let largest = config.room_max_size.min(map_side.saturating_sub(2));
    if largest < MIN_ROOM_SIDE {
        return None;
    }
    let smallest = config.room_min_size.clamp(MIN_ROOM_SIDE, largest);
    Some(rng.range_inclusive(smallest, largest))
}

pub(super) fn overlaps_any(candidate: &Room, rooms: &[Room]) -> bool {
    rooms.iter().any(|room| candidate.intersects(room))
}

pub(super) fn carve_room(grid: &mut TileGrid, room: &Room) {
    for pos in room.interior() {
        grid.set_kind(pos, TileKind::Floor);
    }
}

/// Whether the corridor runs horizontally before turning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Bend {
    HorizontalFirst,
    VerticalFirst,
}

impl Bend {
    pub(super) fn roll(rng: &mut DungeonRng) -> Self {
        if rng.range_inclusive(0, 1) == 0 { Bend::HorizontalFirst } else { Bend::VerticalFirst }
    }
}

/// L-shaped corridor between the two room centers.
pub(super) fn carve_corridor(grid: &mut TileGrid, from: &Room, to: &Room, bend: Bend) {
    let start = from.center();
    let end = to.center();
    match bend {
        Bend::HorizontalFirst => {
            carve_horizontal(grid, start.x, end.x, start.y);
            carve_vertical(grid, start.y, end.y, end.x);
        }
        Bend::VerticalFirst => {
            carve_vertical(grid, start.y, end.y, start.x);
            carve_horizontal(grid, start.x, end.x, end.y);
        }
    }
}

fn carve_horizontal(grid: &mut TileGrid, x1: i32, x2: i32, y: i32) {
    for x in x1.min(x2)..=x1.max(x2) {
        carve_if_in_bounds(grid, Pos::new(x, y));
    }
}

fn carve_vertical(grid: &mut TileGrid, y1: i32, y2: i32, x: i32) {
    for y in y1.min(y2)..=y1.max(y2) {
        carve_if_in_bounds(grid, Pos::new(x, y));
    }
}

fn carve_if_in_bounds(grid: &mut TileGrid, pos: Pos) {
    if grid.in_bounds(pos) {
        grid.set_kind(pos, TileKind::Floor);
    }
}
