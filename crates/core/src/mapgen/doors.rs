//! Door placement at one-tile-wide corridor mouths.

use crate::config::GenerationConfig;
use crate::floor::Room;
use crate::grid::TileGrid;
use crate::rng::DungeonRng;
use crate::tile::{Door, TileKind};
use crate::types::Pos;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    /// Corridor runs north-south; its sides are west and east.
    Vertical,
    /// Corridor runs west-east; its sides are north and south.
    Horizontal,
}

fn is_open_floor(grid: &TileGrid, pos: Pos) -> bool {
    grid.kind_at(pos).is_some_and(TileKind::is_floor_like)
}

/// Off-grid, void and wall cells all close off a corridor side.
fn is_blocked(grid: &TileGrid, pos: Pos) -> bool {
    matches!(grid.kind_at(pos), None | Some(TileKind::Void | TileKind::Wall))
}

fn is_narrow_corridor(grid: &TileGrid, pos: Pos, axis: Axis) -> bool {
    if !is_open_floor(grid, pos) {
        return false;
    }
    let (a, b) = match axis {
        Axis::Vertical => (pos.offset(-1, 0), pos.offset(1, 0)),
        Axis::Horizontal => (pos.offset(0, -1), pos.offset(0, 1)),
    };
    is_blocked(grid, a) && is_blocked(grid, b)
}

/// Rim cells of `room` where a narrow corridor enters, scanning the top,
/// bottom, left and right edges in that order.
pub(super) fn door_candidates(grid: &TileGrid, room: &Room) -> Vec<Pos> {
    let top = room.y;
    let bottom = room.y + room.height - 1;
    let left = room.x;
    let right = room.x + room.width - 1;

    let horizontal_edges = [(top, -1), (bottom, 1)];
    let vertical_edges = [(left, -1), (right, 1)];

    let mut candidates = Vec::new();
    for (y, outward) in horizontal_edges {
        for x in room.x + 1..right {
            let edge = Pos::new(x, y);
            let outside = edge.offset(0, outward);
            if is_open_floor(grid, edge) && is_narrow_corridor(grid, outside, Axis::Vertical) {
                candidates.push(edge);
            }
        }
    }
    for (x, outward) in vertical_edges {
        for y in room.y + 1..bottom {
            let edge = Pos::new(x, y);
            let outside = edge.offset(outward, 0);
            if is_open_floor(grid, edge) && is_narrow_corridor(grid, outside, Axis::Horizontal) {
                candidates.push(edge);
            }
        }
    }
    candidates
}

pub(super) fn add_doors_to_room(
    grid: &mut TileGrid,
    room: &Room,
    config: &GenerationConfig,
    rng: &mut DungeonRng,
) -> usize {
    let mut placed = 0;
    for pos in door_candidates(grid, room) {
        if rng.chance(config.door_chance) {
            let locked = rng.chance(config.locked_door_chance);
            grid.set_kind(pos, TileKind::Door(Door::closed(locked)));
            placed += 1;
        }
    }
    placed
}
