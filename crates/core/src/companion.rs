//! The pocket kitten: a companion that sometimes claws a monster next to the
//! player. Its scratch ignores defense and the usual damage roll.

use std::fmt;

use crate::combat::Combatant;
use crate::config::GameConfig;
use crate::floor::Floor;
use crate::rng::DungeonRng;
use crate::types::{MonsterId, Pos};

/// Cells checked for a target, row by row around the player.
const REACH: [(i32, i32); 8] =
    [(-1, -1), (0, -1), (1, -1), (-1, 0), (1, 0), (-1, 1), (0, 1), (1, 1)];

const FLAVOR_COUNT: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PocketKitten {
    pub chance: f64,
    pub damage: i32,
}

impl Default for PocketKitten {
    fn default() -> Self {
        Self { chance: 0.15, damage: 2 }
    }
}

impl From<&GameConfig> for PocketKitten {
    fn from(config: &GameConfig) -> Self {
        Self { chance: config.kitten_scratch_chance, damage: config.kitten_scratch_damage }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scratch {
    pub monster: MonsterId,
    pub name: String,
    pub flavor: usize,
    pub damage: i32,
    pub killed: bool,
}

impl fmt::Display for Scratch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = &self.name;
        match self.flavor {
            0 => write!(f, "Your pocket kitten pounces and scratches the {name}!")?,
            1 => write!(f, "*Hiss!* Your kitten claws at the {name}!")?,
            2 => write!(f, "Your pocket kitten bravely attacks the {name}!")?,
            3 => write!(f, "*Scratch scratch!* Your kitten helps fight the {name}!")?,
            _ => write!(f, "Your fearless pocket kitten strikes the {name}!")?,
        }
        write!(f, " ({} damage)", self.damage)?;
        if self.killed {
            write!(f, " The {name} collapses!")?;
        }
        Ok(())
    }
}

impl PocketKitten {
    /// Rolls the trigger chance, then scratches a random living monster
    /// adjacent to `origin`. `None` when the kitten naps or nothing is near.
    pub fn try_scratch(
        &self,
        floor: &mut Floor,
        origin: Pos,
        rng: &mut DungeonRng,
    ) -> Option<Scratch> {
        if !rng.chance(self.chance) {
            return None;
        }
        let targets: Vec<MonsterId> =
            REACH.iter().filter_map(|&(dx, dy)| floor.monster_at(origin.offset(dx, dy))).collect();
        let &id = rng.pick(&targets)?;
        let flavor = rng.index(FLAVOR_COUNT);

        let monster = floor.monsters.get_mut(id)?;
        let killed = monster.take_damage(self.damage);
        log::trace!("kitten scratches {} at {:?} (killed: {killed})", monster.name, monster.pos);
        let name = monster.name.clone();
        Some(Scratch { monster: id, name, flavor, damage: self.damage, killed })
    }
}
