//! Breadth-first searches used by auto-explore.
//! Neighbours are visited in `Direction::ALL` order, so cardinal moves win
//! ties over diagonals. Neither search knows about monsters.

use std::collections::{BTreeSet, VecDeque};

use crate::floor::Floor;
use crate::grid::TileGrid;
use crate::types::{Direction, Pos, manhattan};

/// An unexplored cell that borders explored, walkable ground.
pub fn is_frontier(grid: &TileGrid, pos: Pos) -> bool {
    !grid.is_explored(pos)
        && grid.neighbors(pos).any(|(_, next)| grid.is_explored(next) && grid.is_walkable(next))
}

/// Closest frontier cell to `start`. The search only continues through
/// walkable cells, but any cell it touches may be the answer, so a closed
/// door or wall at the edge of the known map still counts.
pub fn find_nearest_unexplored(floor: &Floor, start: Pos) -> Option<Pos> {
    let grid = &floor.grid;
    if !grid.in_bounds(start) {
        return None;
    }
    let mut visited = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        if is_frontier(grid, current) {
            return Some(current);
        }
        if current != start && !grid.is_walkable(current) {
            continue;
        }
        for (_, next) in grid.neighbors(current) {
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }
    None
}

/// First move of a shortest walkable route that ends on or next to
/// `target` (Manhattan distance at most 1).
pub fn find_next_step(floor: &Floor, start: Pos, target: Pos) -> Option<Direction> {
    if start == target {
        return None;
    }
    let grid = &floor.grid;
    let mut visited = BTreeSet::from([start]);
    let mut queue: VecDeque<(Pos, Option<Direction>)> = VecDeque::from([(start, None)]);

    while let Some((current, first_step)) = queue.pop_front() {
        for (direction, next) in grid.neighbors(current) {
            if visited.contains(&next) || !grid.is_walkable(next) {
                continue;
            }
            let first = first_step.unwrap_or(direction);
            if manhattan(next, target) <= 1 {
                return Some(first);
            }
            visited.insert(next);
            queue.push_back((next, Some(first)));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::tile::TileKind;

    fn explore_all(floor: &mut Floor) {
        for pos in floor.grid.positions().collect::<Vec<_>>() {
            floor.grid.tile_mut(pos).explored = true;
        }
    }

    #[test]
    fn next_step_walks_around_a_wall() {
        let floor = Floor::from_ascii(
            1,
            &[
                "#######", //
                "#..#..#", //
                "#..#..#", //
                "#.....#", //
                "#######",
            ],
        );
        let step = find_next_step(&floor, Pos::new(1, 1), Pos::new(5, 1));
        assert_eq!(step, Some(Direction::SouthEast));
    }

    #[test]
    fn next_step_prefers_cardinal_moves() {
        let floor = Floor::from_ascii(1, &["#####", "#...#", "#...#", "#...#", "#####"]);
        assert_eq!(find_next_step(&floor, Pos::new(1, 1), Pos::new(3, 1)), Some(Direction::East));
    }

    #[test]
    fn next_step_is_none_on_target_or_when_cut_off() {
        let floor = Floor::from_ascii(1, &["#####", "#.#.#", "#####"]);
        assert_eq!(find_next_step(&floor, Pos::new(1, 1), Pos::new(1, 1)), None);
        assert_eq!(find_next_step(&floor, Pos::new(1, 1), Pos::new(3, 1)), None);
    }

    #[test]
    fn closed_door_stops_the_step_search() {
        let floor = Floor::from_ascii(1, &["#######", "#..+..#", "#######"]);
        assert_eq!(find_next_step(&floor, Pos::new(1, 1), Pos::new(5, 1)), None);
    }

    #[test]
    fn nearest_unexplored_returns_the_frontier_edge() {
        let mut floor = Floor::from_ascii(1, &["#########", "#.......#", "#########"]);
        for x in 0..=4 {
            for y in 0..3 {
                floor.grid.tile_mut(Pos::new(x, y)).explored = true;
            }
        }
        assert_eq!(find_nearest_unexplored(&floor, Pos::new(1, 1)), Some(Pos::new(5, 1)));
    }

    #[test]
    fn nearest_unexplored_is_none_once_everything_is_seen() {
        let mut floor = Floor::from_ascii(1, &["#####", "#...#", "#####"]);
        explore_all(&mut floor);
        assert_eq!(find_nearest_unexplored(&floor, Pos::new(1, 1)), None);
    }

    #[test]
    fn unexplored_door_at_the_edge_is_a_target() {
        let mut floor = Floor::from_ascii(1, &["#######", "#..+..#", "#######"]);
        explore_all(&mut floor);
        for x in 3..7 {
            for y in 0..3 {
                floor.grid.tile_mut(Pos::new(x, y)).explored = false;
            }
        }
        assert_eq!(find_nearest_unexplored(&floor, Pos::new(1, 1)), Some(Pos::new(3, 1)));
    }

    fn arb_floor() -> impl Strategy<Value = (Floor, Pos, Pos)> {
        let walls = prop::collection::vec(prop::bool::weighted(0.3), 12 * 10);
        let cell = || (0..12_i32, 0..10_i32).prop_map(|(x, y)| Pos::new(x, y));
        (walls, cell(), cell()).prop_map(|(walls, start, target)| {
            let mut floor = Floor::new(1, 12, 10);
            for (index, wall) in walls.into_iter().enumerate() {
                let pos = Pos::new((index % 12) as i32, (index / 12) as i32);
                floor.grid.set_kind(pos, if wall { TileKind::Wall } else { TileKind::Floor });
            }
            (floor, start, target)
        })
    }

    proptest! {
        #[test]
        fn next_step_only_leads_onto_walkable_tiles((floor, start, target) in arb_floor()) {
            if let Some(direction) = find_next_step(&floor, start, target) {
                prop_assert!(floor.grid.is_walkable(start.step(direction)));
            }
        }

        #[test]
        fn nearest_unexplored_is_always_a_frontier_cell((mut floor, start, _) in arb_floor()) {
            crate::visibility::compute_visibility(&mut floor, start, 4);
            if let Some(found) = find_nearest_unexplored(&floor, start) {
                prop_assert!(is_frontier(&floor.grid, found));
            }
        }
    }
}
