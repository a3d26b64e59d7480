use std::collections::{BTreeSet, VecDeque};

use proptest::prelude::*;

use delve_core::mapgen::generate_floor;
use delve_core::pathfinding::find_next_step;
use delve_core::tile::TileKind;
use delve_core::{DungeonRng, Floor, FloorRegistry, Game, GameConfig, PlayerCommand, Pos};

fn flood(floor: &Floor, start: Pos, passable: impl Fn(Pos) -> bool) -> BTreeSet<Pos> {
    let mut seen = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        for (_, next) in floor.grid.neighbors(current) {
            if passable(next) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen
}

/// Generation does not promise that every walkable cell is reachable on
/// foot: locked or closed doors can cut parts of the floor off. This audit
/// compares the cells reachable from the first room with the full walkable
/// set, reports every floor where they differ, and only insists that doors
/// are the sole obstacle.
#[test]
fn connectivity_audit() {
    let mut sealed_floors = Vec::new();
    for seed in 0..40 {
        let floor = generate_floor(80, 25, 1, &mut DungeonRng::seed_from_u64(seed));
        let Some(first) = floor.rooms.first() else {
            continue;
        };
        let walkable: BTreeSet<Pos> =
            floor.grid.positions().filter(|&pos| floor.grid.is_walkable(pos)).collect();
        let on_foot = flood(&floor, first.center(), |pos| floor.grid.is_walkable(pos));
        let through_doors = flood(&floor, first.center(), |pos| {
            floor.grid.is_walkable(pos)
                || floor.grid.kind_at(pos).and_then(TileKind::intact_door).is_some()
        });

        let cut_off: Vec<&Pos> = walkable.difference(&through_doors).collect();
        assert!(cut_off.is_empty(), "seed {seed}: walled off cells {cut_off:?}");
        if on_foot.intersection(&walkable).count() != walkable.len() {
            sealed_floors.push(seed);
        }
    }
    if !sealed_floors.is_empty() {
        eprintln!("floors with walkable cells behind closed doors: {sealed_floors:?}");
    }
}

#[test]
fn registry_copy_survives_later_play() {
    let mut game = Game::new(8, GameConfig::default());
    let mut registry = FloorRegistry::new();
    registry.save(1, game.floor());
    let saved = registry.load(1).expect("floor 1 stored");

    for _ in 0..30 {
        let _ = game.act(PlayerCommand::ContinueAutoExplore);
        let _ = game.act(PlayerCommand::ToggleAutoExplore);
    }
    assert_eq!(registry.load(1), Some(saved));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn next_step_only_enters_walkable_tiles(seed in any::<u64>(), picks in any::<(u16, u16)>()) {
        let floor = generate_floor(60, 25, 2, &mut DungeonRng::seed_from_u64(seed));
        let walkable: Vec<Pos> =
            floor.grid.positions().filter(|&pos| floor.grid.is_walkable(pos)).collect();
        prop_assume!(!walkable.is_empty());
        let start = walkable[usize::from(picks.0) % walkable.len()];
        let target = walkable[usize::from(picks.1) % walkable.len()];

        if let Some(direction) = find_next_step(&floor, start, target) {
            prop_assert!(floor.grid.is_walkable(start.step(direction)));
        }
    }

    #[test]
    fn sight_is_always_remembered(seed in any::<u64>(), steps in 1_usize..60) {
        let mut game = Game::new(seed, GameConfig::default());
        let mut explored: BTreeSet<Pos> = BTreeSet::new();
        for _ in 0..steps {
            let command = if game.auto_exploring() {
                PlayerCommand::ContinueAutoExplore
            } else {
                PlayerCommand::ToggleAutoExplore
            };
            let _ = game.act(command);

            let grid = &game.floor().grid;
            for pos in grid.positions() {
                let tile = grid.tile(pos);
                prop_assert!(!tile.visible || tile.explored, "{pos:?} visible but unexplored");
            }
            let now: BTreeSet<Pos> =
                grid.positions().filter(|&pos| grid.is_explored(pos)).collect();
            if game.floor().number == 1 {
                prop_assert!(now.is_superset(&explored));
                explored = now;
            }
        }
    }
}
