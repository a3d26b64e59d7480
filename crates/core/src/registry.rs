//! In-memory store of floors the player has left, keyed by floor number.

use std::collections::BTreeMap;

use slotmap::SlotMap;

use crate::floor::{Floor, Room, Staircase};
use crate::grid::TileGrid;
use crate::monster::Monster;
use crate::types::MonsterId;

/// Owned copy of a floor's tiles, monsters, rooms and staircases.
/// Items lying on the floor are not part of a snapshot.
#[derive(Clone, Debug)]
pub struct FloorSnapshot {
    number: u32,
    grid: TileGrid,
    rooms: Vec<Room>,
    monsters: SlotMap<MonsterId, Monster>,
    staircases: Vec<Staircase>,
}

impl FloorSnapshot {
    pub fn capture(floor: &Floor) -> Self {
        Self {
            number: floor.number,
            grid: floor.grid.clone(),
            rooms: floor.rooms.clone(),
            monsters: floor.monsters.clone(),
            staircases: floor.staircases.clone(),
        }
    }

    pub fn restore(&self) -> Floor {
        Floor {
            number: self.number,
            grid: self.grid.clone(),
            rooms: self.rooms.clone(),
            monsters: self.monsters.clone(),
            staircases: self.staircases.clone(),
            items: SlotMap::with_key(),
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn fingerprint(&self) -> u64 {
        self.restore().fingerprint()
    }
}

impl PartialEq for FloorSnapshot {
    fn eq(&self, other: &Self) -> bool {
        self.restore() == other.restore()
    }
}

#[derive(Clone, Debug, Default)]
pub struct FloorRegistry {
    floors: BTreeMap<u32, FloorSnapshot>,
}

impl FloorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a deep copy of `floor`, replacing any earlier entry for `number`.
    pub fn save(&mut self, number: u32, floor: &Floor) {
        let replaced = self.floors.insert(number, FloorSnapshot::capture(floor)).is_some();
        log::debug!("registry: saved floor {number} (replaced: {replaced})");
    }

    /// A fresh floor rebuilt from the stored snapshot. The stored copy is
    /// untouched, so the floor can be loaded again.
    pub fn load(&self, number: u32) -> Option<Floor> {
        let floor = self.floors.get(&number).map(FloorSnapshot::restore);
        log::debug!("registry: load floor {number} (hit: {})", floor.is_some());
        floor
    }

    pub fn has(&self, number: u32) -> bool {
        self.floors.contains_key(&number)
    }

    pub fn len(&self) -> usize {
        self.floors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }

    pub fn numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.floors.keys().copied()
    }

    pub fn snapshot(&self, number: u32) -> Option<&FloorSnapshot> {
        self.floors.get(&number)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::loot::{FloorItem, ItemRef};
    use crate::mapgen::generate_floor;
    use crate::rng::DungeonRng;
    use crate::tile::{Door, TileKind};
    use crate::types::Pos;

    #[test]
    fn unknown_floor_is_absent() {
        let registry = FloorRegistry::new();
        assert!(!registry.has(3));
        assert_eq!(registry.load(3), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn saved_copy_is_independent_of_the_live_floor() {
        let mut floor = Floor::from_ascii(2, &["#####", "#.+g#", "#####"]);
        let mut registry = FloorRegistry::new();
        registry.save(2, &floor);

        let opened = Door { open: true, ..Door::closed(false) };
        floor.grid.set_kind(Pos::new(2, 1), TileKind::Door(opened));
        for monster in floor.monsters.values_mut() {
            monster.current_hp = 0;
        }

        let restored = registry.load(2).expect("saved");
        let door = restored.grid.kind_at(Pos::new(2, 1));
        assert_eq!(door, Some(TileKind::Door(Door::closed(false))));
        assert!(restored.monsters.values().all(|monster| monster.is_alive()));
    }

    #[test]
    fn saving_twice_keeps_one_entry() {
        let floor = Floor::from_ascii(1, &["###", "#.#", "###"]);
        let mut registry = FloorRegistry::new();
        registry.save(1, &floor);
        registry.save(1, &floor);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.numbers().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn floor_items_are_not_kept() {
        let mut floor = Floor::from_ascii(1, &["#####", "#...#", "#####"]);
        let potion = ItemRef::new("Health Potion", '!');
        floor.items.insert(FloorItem { item: potion, pos: Pos::new(2, 1) });
        let mut registry = FloorRegistry::new();
        registry.save(1, &floor);
        let restored = registry.load(1).expect("saved");
        assert!(restored.items.is_empty());
        floor.items.clear();
        assert_eq!(restored, floor);
    }

    proptest! {
        #[test]
        fn round_trip_survives_later_mutation(seed in any::<u64>(), number in 1_u32..6) {
            let mut rng = DungeonRng::seed_from_u64(seed);
            let mut floor = generate_floor(80, 25, number, &mut rng);
            let before = floor.fingerprint();

            let mut registry = FloorRegistry::new();
            registry.save(number, &floor);
            for tile_pos in floor.grid.positions().collect::<Vec<_>>() {
                floor.grid.tile_mut(tile_pos).explored = true;
            }
            floor.monsters.clear();

            let restored = registry.load(number).expect("saved");
            prop_assert_eq!(restored.fingerprint(), before);
            prop_assert_eq!(registry.load(number), Some(restored));
        }
    }
}
