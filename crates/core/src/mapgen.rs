//! Procedural floor generation split into coherent submodules.

mod doors;
mod generator;
mod layout;
mod spawns;
mod walls;

pub use generator::DungeonGenerator;

use crate::config::GenerationConfig;
use crate::floor::Floor;
use crate::rng::DungeonRng;

/// Generates a floor of the given size with every other knob at its default.
/// Rooms shrink to fit small maps; a map too small for any room comes back
/// as solid void without rooms, monsters or staircases.
pub fn generate_floor(
    width: usize,
    height: usize,
    floor_number: u32,
    rng: &mut DungeonRng,
) -> Floor {
    let config = GenerationConfig { width, height, ..GenerationConfig::default() };
    DungeonGenerator::new(config).generate(floor_number, rng)
}
