use crate::grid::TileGrid;
use crate::tile::TileKind;

/// Turns every void cell touching open floor (8-neighbourhood) into wall.
/// Returns the number of walls raised.
pub(super) fn raise_walls(grid: &mut TileGrid) -> usize {
    let to_wall: Vec<_> = grid
        .positions()
        .filter(|&pos| grid.kind_at(pos) == Some(TileKind::Void))
        .filter(|&pos| {
            grid.neighbors(pos)
                .any(|(_, next)| grid.kind_at(next).is_some_and(TileKind::is_floor_like))
        })
        .collect();
    for &pos in &to_wall {
        grid.set_kind(pos, TileKind::Wall);
    }
    to_wall.len()
}
