//! Field of view by a fixed sweep of 360 rays, one per degree.
//! Each ray advances one unit per step, snapping to the nearest cell with
//! ties going to the even coordinate, and stops on the first opaque cell.
//! This is an approximation: rays may slip past single diagonal blockers.

use std::f64::consts::TAU;

use crate::floor::Floor;
use crate::grid::TileGrid;
use crate::types::Pos;

pub const RAY_COUNT: u32 = 360;

/// Cells a single ray marks, in stepping order. The last one is the first
/// opaque cell hit, if the ray hit one before running out of range.
pub fn ray_cells(grid: &TileGrid, origin: Pos, ray: u32, radius: i32) -> Vec<Pos> {
    let angle = f64::from(ray) * TAU / f64::from(RAY_COUNT);
    let (dx, dy) = (angle.cos(), angle.sin());
    let mut x = f64::from(origin.x);
    let mut y = f64::from(origin.y);

    let mut cells = Vec::new();
    for _ in 0..radius {
        x += dx;
        y += dy;
        let cell = Pos::new(x.round_ties_even() as i32, y.round_ties_even() as i32);
        let Some(tile) = grid.get(cell) else {
            break;
        };
        cells.push(cell);
        if !tile.transparent() {
            break;
        }
    }
    cells
}

/// Recomputes `visible` for the whole grid and folds it into `explored`.
pub fn compute_grid_visibility(grid: &mut TileGrid, origin: Pos, radius: i32) {
    grid.clear_visible();
    if let Some(tile) = grid.get_mut(origin) {
        tile.mark_seen();
    }
    for ray in 0..RAY_COUNT {
        for cell in ray_cells(grid, origin, ray, radius) {
            grid.tile_mut(cell).mark_seen();
        }
    }
}

pub fn compute_visibility(floor: &mut Floor, origin: Pos, radius: i32) {
    compute_grid_visibility(&mut floor.grid, origin, radius);
}
