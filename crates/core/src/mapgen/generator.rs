//! Orchestrates rooms, corridors, doors, walls and spawns into one floor.

use crate::config::GenerationConfig;
use crate::floor::Floor;
use crate::rng::DungeonRng;

use super::doors::add_doors_to_room;
use super::layout::{Bend, carve_corridor, carve_room, overlaps_any, roll_room};
use super::spawns::{place_staircases, spawn_monsters};
use super::walls::raise_walls;

pub struct DungeonGenerator {
    config: GenerationConfig,
}

impl DungeonGenerator {
    pub fn new(config: GenerationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn generate(&self, floor_number: u32, rng: &mut DungeonRng) -> Floor {
        let config = &self.config;
        let mut floor = Floor::new(floor_number, config.width, config.height);

        for _ in 0..config.max_rooms {
            let Some(candidate) = roll_room(config, rng) else {
                log::debug!(
                    "floor {floor_number}: {}x{} map is too small for a room",
                    config.width,
                    config.height
                );
                break;
            };
            if overlaps_any(&candidate, &floor.rooms) {
                continue;
            }
            carve_room(&mut floor.grid, &candidate);
            if let Some(previous) = floor.rooms.last().copied() {
                let bend = Bend::roll(rng);
                carve_corridor(&mut floor.grid, &previous, &candidate, bend);
                add_doors_to_room(&mut floor.grid, &previous, config, rng);
                add_doors_to_room(&mut floor.grid, &candidate, config, rng);
            }
            floor.rooms.push(candidate);
        }

        raise_walls(&mut floor.grid);
        spawn_monsters(&mut floor, config, rng);
        place_staircases(&mut floor, config, rng);

        log::debug!(
            "generated floor {floor_number}: {} rooms, {} monsters, {} staircases",
            floor.rooms.len(),
            floor.monsters.len(),
            floor.staircases.len()
        );
        floor
    }
}
