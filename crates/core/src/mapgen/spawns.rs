//! Monster and staircase placement inside carved rooms.

use crate::config::GenerationConfig;
use crate::floor::{Floor, Staircase};
use crate::monster::{Monster, MonsterKind};
use crate::rng::DungeonRng;
use crate::tile::TileKind;
use crate::types::{Pos, StairDirection};

fn is_free_for_monster(floor: &Floor, pos: Pos) -> bool {
    floor.grid.is_walkable(pos) && floor.monster_at(pos).is_none()
}

pub(super) fn spawn_monsters(floor: &mut Floor, config: &GenerationConfig, rng: &mut DungeonRng) {
    let rooms = floor.rooms.clone();
    for room in &rooms {
        if !rng.chance(config.monster_room_chance) {
            continue;
        }
        let count = rng.range_inclusive(config.min_monsters_per_room, config.max_monsters_per_room);
        for _ in 0..count {
            let spot = (0..config.monster_spawn_attempts)
                .map(|_| room.random_interior_pos(rng))
                .find(|&pos| is_free_for_monster(floor, pos));
            let Some(pos) = spot else {
                log::debug!("floor {}: no free tile for a monster in {room:?}", floor.number);
                continue;
            };
            let kind = MonsterKind::ALL[rng.index(MonsterKind::ALL.len())];
            floor.monsters.insert(Monster::spawn(kind, pos));
        }
    }
}

/// Floor 1 only leads down; deeper floors get an up staircase first.
pub(super) fn place_staircases(floor: &mut Floor, config: &GenerationConfig, rng: &mut DungeonRng) {
    let number = floor.number;
    if number > 1 {
        place_staircase(floor, StairDirection::Up, number - 1, config, rng);
    }
    place_staircase(floor, StairDirection::Down, number + 1, config, rng);
}

fn place_staircase(
    floor: &mut Floor,
    direction: StairDirection,
    target_floor: u32,
    config: &GenerationConfig,
    rng: &mut DungeonRng,
) -> Option<Pos> {
    if floor.rooms.is_empty() {
        return None;
    }
    for _ in 0..config.staircase_attempts {
        let room = floor.rooms[rng.index(floor.rooms.len())];
        let pos = room.random_interior_pos(rng);
        if is_free_for_monster(floor, pos) && floor.staircase_at(pos).is_none() {
            floor.grid.set_kind(pos, TileKind::Staircase { direction, target_floor });
            floor.staircases.push(Staircase { pos, direction, target_floor });
            return Some(pos);
        }
    }
    log::debug!("floor {}: gave up placing {direction:?} staircase", floor.number);
    None
}
