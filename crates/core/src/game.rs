//! The session driver: one player on one live floor, plus the registry of
//! floors left behind. `act` runs exactly one player command and, when the
//! command costs a turn, one monster pass in spawn order.

mod auto_explore;
mod hash;
mod stairs;
#[cfg(test)]
mod test_support;
mod turn;
mod view;

use serde::{Deserialize, Serialize};

use crate::companion::PocketKitten;
use crate::config::GameConfig;
use crate::doors::DoorAction;
use crate::error::ActionError;
use crate::event::LogEvent;
use crate::floor::Floor;
use crate::loot::{LootProvider, StandardLoot};
use crate::mapgen::DungeonGenerator;
use crate::player::Player;
use crate::registry::FloorRegistry;
use crate::rng::DungeonRng;
use crate::types::{Direction, Pos};
use crate::visibility::compute_visibility;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerCommand {
    /// Step, or attack whatever stands on the destination.
    Move(Direction),
    Wait,
    /// Acts on the first visible intact door next to the player.
    Door(DoorAction),
    UseStairs,
    PickUp,
    /// Starts auto-explore, or cancels it when already running.
    ToggleAutoExplore,
    /// One auto-explore step; does nothing while auto-explore is off.
    ContinueAutoExplore,
}

/// Whether a command let the monsters act.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnCost {
    Free,
    Spent,
}

pub struct Game {
    seed: u64,
    config: GameConfig,
    generator: DungeonGenerator,
    rng: DungeonRng,
    floor: Floor,
    registry: FloorRegistry,
    player: Player,
    kitten: PocketKitten,
    loot: Box<dyn LootProvider>,
    /// Target cell while auto-explore is running.
    auto_explore: Option<Pos>,
    turn: u64,
    commands_applied: u64,
    log: Vec<LogEvent>,
}

impl Game {
    /// Generates floor 1 from `seed` and drops the player on a random
    /// walkable cell clear of monsters.
    pub fn new(seed: u64, config: GameConfig) -> Self {
        let mut rng = DungeonRng::seed_from_u64(seed);
        let generator = DungeonGenerator::new(config.generation.clone());
        let floor = generator.generate(1, &mut rng);
        let start = floor.safe_position(1, &mut rng);
        Self::assemble(seed, config, generator, rng, floor, start)
    }

    /// Starts a session on a prepared floor, for scenarios and tooling.
    pub fn from_floor(seed: u64, config: GameConfig, floor: Floor, start: Pos) -> Self {
        let rng = DungeonRng::seed_from_u64(seed);
        let generator = DungeonGenerator::new(config.generation.clone());
        Self::assemble(seed, config, generator, rng, floor, start)
    }

    fn assemble(
        seed: u64,
        config: GameConfig,
        generator: DungeonGenerator,
        mut rng: DungeonRng,
        floor: Floor,
        start: Pos,
    ) -> Self {
        let player = Player::new(start, &config.player, &mut rng);
        let kitten = PocketKitten::from(&config);
        let mut game = Self {
            seed,
            config,
            generator,
            rng,
            floor,
            registry: FloorRegistry::new(),
            player,
            kitten,
            loot: Box::new(StandardLoot),
            auto_explore: None,
            turn: 0,
            commands_applied: 0,
            log: vec![LogEvent::Welcome],
        };
        game.refresh_fov();
        game
    }

    /// Swaps the drop tables used when a monster dies.
    pub fn with_loot(mut self, loot: impl LootProvider + 'static) -> Self {
        self.loot = Box::new(loot);
        self
    }

    /// Runs one command. Failures are ordinary outcomes: they are logged for
    /// the player and returned, and never cost a turn.
    pub fn act(&mut self, command: PlayerCommand) -> Result<TurnCost, ActionError> {
        self.floor.remove_dead_monsters();
        self.commands_applied += 1;

        let result = match command {
            PlayerCommand::ToggleAutoExplore => self.toggle_auto_explore(),
            PlayerCommand::ContinueAutoExplore => self.continue_auto_explore(),
            manual => {
                self.auto_explore = None;
                self.manual_command(manual)
            }
        };

        match &result {
            Ok(TurnCost::Spent) => self.end_turn(),
            Ok(TurnCost::Free) => self.refresh_fov(),
            Err(error) => {
                log::debug!("turn {}: {command:?} failed: {error}", self.turn);
                self.log.push(LogEvent::ActionFailed(error.clone()));
                self.refresh_fov();
            }
        }
        result
    }

    fn manual_command(&mut self, command: PlayerCommand) -> Result<TurnCost, ActionError> {
        match command {
            PlayerCommand::Move(direction) => self.player_move(direction),
            PlayerCommand::Wait => {
                self.log.push(LogEvent::Waited);
                Ok(TurnCost::Spent)
            }
            PlayerCommand::Door(action) => self.door_action(action),
            PlayerCommand::UseStairs => self.use_stairs(),
            PlayerCommand::PickUp => self.pick_up(),
            PlayerCommand::ToggleAutoExplore | PlayerCommand::ContinueAutoExplore => {
                Ok(TurnCost::Free)
            }
        }
    }

    fn end_turn(&mut self) {
        self.turn += 1;
        self.refresh_fov();
        self.monster_phase();
        self.refresh_fov();
    }

    fn refresh_fov(&mut self) {
        compute_visibility(&mut self.floor, self.player.pos, self.config.fov_radius);
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Turns in which the monsters acted.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn commands_applied(&self) -> u64 {
        self.commands_applied
    }

    pub fn floor(&self) -> &Floor {
        &self.floor
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn registry(&self) -> &FloorRegistry {
        &self.registry
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    pub fn auto_exploring(&self) -> bool {
        self.auto_explore.is_some()
    }

    pub fn auto_explore_target(&self) -> Option<Pos> {
        self.auto_explore
    }
}
