//! Player moves and melee, the consequences of a kill, and the monster pass.

use super::*;
use crate::ai::update_monster_ai;
use crate::combat::resolve_combat;
use crate::doors::{KickOdds, adjacent_visible_door, apply_door_action};
use crate::loot::{FloorItem, drop_loot};
use crate::tile::TileKind;
use crate::types::MonsterId;

impl Game {
    pub(super) fn player_move(&mut self, direction: Direction) -> Result<TurnCost, ActionError> {
        let destination = self.player.pos.step(direction);
        if let Some(id) = self.floor.monster_at(destination) {
            self.player_attacks(id, destination);
            return Ok(TurnCost::Spent);
        }

        if !self.floor.grid.is_walkable(destination) {
            return Err(match self.floor.grid.kind_at(destination) {
                Some(TileKind::Door(door)) if !door.is_passable() => ActionError::DoorBlocksWay,
                _ => ActionError::TileNotWalkable,
            });
        }

        self.player.pos = destination;
        if self.floor.item_at(destination).is_some()
            && let Err(full) = self.pick_up()
        {
            self.log.push(LogEvent::ActionFailed(full));
        }
        self.count_step();
        Ok(TurnCost::Spent)
    }

    /// A kill lets the player step into the freed cell; a survivor holds it.
    fn player_attacks(&mut self, id: MonsterId, destination: Pos) {
        let strike = resolve_combat(&self.player, &mut self.floor.monsters[id], &mut self.rng);
        let killed = strike.defender_died;
        self.log.push(LogEvent::Strike(strike));
        if !killed {
            return;
        }

        self.monster_slain(id);
        self.kitten_scratch();
        self.player.pos = destination;
        self.count_step();
    }

    fn monster_slain(&mut self, id: MonsterId) {
        let monster = self.floor.monsters[id].clone();
        self.log.push(LogEvent::MonsterSlain { name: monster.name.clone() });

        if let Some(item) = self.loot.roll_drop(&monster, self.floor.number, &mut self.rng) {
            let name = item.name.clone();
            if drop_loot(&mut self.floor, monster.pos, item).is_some() {
                self.log.push(LogEvent::LootDropped { monster: monster.name.clone(), item: name });
            }
        }

        let experience = u32::try_from(monster.max_hp / 2).unwrap_or(0);
        for gain in self.player.gain_experience(experience) {
            self.log.push(LogEvent::LevelUp(gain));
        }
    }

    pub(super) fn kitten_scratch(&mut self) {
        if !self.player.has_pocket_kitten {
            return;
        }
        let scratch = self.kitten.try_scratch(&mut self.floor, self.player.pos, &mut self.rng);
        if let Some(scratch) = scratch {
            self.log.push(LogEvent::KittenScratch(scratch));
        }
    }

    pub(super) fn count_step(&mut self) {
        if let Some(heal) = self.player.take_step(&mut self.rng) {
            self.log.push(LogEvent::Healed(heal));
        }
    }

    pub(super) fn pick_up(&mut self) -> Result<TurnCost, ActionError> {
        let here = self.player.pos;
        let Some(floor_item) = self.floor.take_item_at(here) else {
            return Err(ActionError::NothingToPickUp);
        };
        let name = floor_item.item.name.clone();
        match self.player.add_item(floor_item.item) {
            Ok(()) => {
                self.log.push(LogEvent::PickedUp { item: name });
                Ok(TurnCost::Free)
            }
            Err(item) => {
                self.floor.items.insert(FloorItem { item, pos: here });
                Err(ActionError::InventoryFull { item: name })
            }
        }
    }

    pub(super) fn door_action(&mut self, action: DoorAction) -> Result<TurnCost, ActionError> {
        let Some(door) = adjacent_visible_door(&self.floor, self.player.pos) else {
            return Err(ActionError::NoDoorNearby { verb: action.verb() });
        };
        let odds = KickOdds::from(&self.config);
        let outcome = apply_door_action(&mut self.floor, door, action, odds, &mut self.rng)?;
        self.log.push(LogEvent::Door(outcome));
        Ok(TurnCost::Free)
    }

    /// One AI pass, then its hits land in order. A hit that leaves the player
    /// standing gives the kitten a chance to strike back; the pass stops
    /// striking once the player is down, so a fatal hit is always the last.
    pub(super) fn monster_phase(&mut self) {
        let attacks = update_monster_ai(&mut self.floor, &mut self.player, &mut self.rng);
        for attack in attacks {
            let died = attack.strike.defender_died;
            self.log.push(LogEvent::Strike(attack.strike));
            if died {
                self.player_died();
            } else {
                self.kitten_scratch();
            }
        }
    }

    fn player_died(&mut self) {
        self.log.push(LogEvent::PlayerDied);
        let safe_distance = self.config.respawn_safe_distance;
        let pos = self.floor.safe_position(safe_distance, &mut self.rng);
        self.player.respawn(pos);
        self.floor.reset_monster_ai();
        self.auto_explore = None;
        self.refresh_fov();
        log::debug!("player died on floor {}, respawned at {pos:?}", self.floor.number);
        self.log.push(LogEvent::Respawned);
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{AlwaysDrops, game_on, messages};
    use super::*;
    use crate::loot::ItemRef;
    use crate::monster::AiState;
    use crate::types::manhattan;

    #[test]
    fn closed_door_blocks_the_way() {
        let mut game = game_on(&["#####", "#.+.#", "#####"], Pos::new(1, 1));
        let result = game.act(PlayerCommand::Move(Direction::East));
        assert_eq!(result, Err(ActionError::DoorBlocksWay));
        assert_eq!(game.player().pos, Pos::new(1, 1));
    }

    #[test]
    fn walking_picks_up_items_and_counts_steps() {
        let mut game = game_on(&["#####", "#...#", "#####"], Pos::new(1, 1));
        let potion = ItemRef::new("Health Potion", '!');
        game.floor.items.insert(FloorItem { item: potion, pos: Pos::new(2, 1) });

        assert_eq!(game.act(PlayerCommand::Move(Direction::East)), Ok(TurnCost::Spent));
        assert_eq!(game.player().pos, Pos::new(2, 1));
        assert_eq!(game.player().steps_taken, 1);
        assert_eq!(game.player().inventory.len(), 1);
        assert!(game.floor().items.is_empty());
        assert!(messages(&game).contains(&"You pick up Health Potion.".to_string()));
    }

    #[test]
    fn full_inventory_leaves_the_item_on_the_floor() {
        let mut game = game_on(&["#####", "#...#", "#####"], Pos::new(1, 1));
        game.player.inventory_capacity = 0;
        let armor = ItemRef::new("Chain Mail", '[');
        game.floor.items.insert(FloorItem { item: armor, pos: Pos::new(1, 1) });

        let result = game.act(PlayerCommand::PickUp);
        assert_eq!(result, Err(ActionError::InventoryFull { item: "Chain Mail".to_string() }));
        assert_eq!(game.floor().items.len(), 1);
        assert_eq!(game.act(PlayerCommand::Move(Direction::East)), Ok(TurnCost::Spent));
        assert_eq!(game.act(PlayerCommand::PickUp), Err(ActionError::NothingToPickUp));
    }

    #[test]
    fn killing_blow_moves_the_player_and_pays_out() {
        let mut game =
            game_on(&["#####", "#.r.#", "#####"], Pos::new(1, 1)).with_loot(AlwaysDrops);
        let rat = game.floor.monster_at(Pos::new(2, 1)).expect("rat");
        game.floor.monsters[rat].current_hp = 1;

        assert_eq!(game.act(PlayerCommand::Move(Direction::East)), Ok(TurnCost::Spent));
        assert_eq!(game.player().pos, Pos::new(2, 1));
        assert_eq!(game.player().experience, 4);
        assert_eq!(game.floor().items.len(), 1);
        let log = messages(&game);
        assert!(log.contains(&"You killed the Giant Rat!".to_string()));
        assert!(log.contains(&"The Giant Rat drops Trinket!".to_string()));

        // The corpse is swept at the start of the next command.
        assert_eq!(game.floor().monsters.len(), 1);
        game.act(PlayerCommand::Wait).expect("wait");
        assert!(game.floor().monsters.is_empty());
    }

    #[test]
    fn surviving_monster_keeps_its_cell_and_strikes_back() {
        let mut game = game_on(&["#####", "#.o.#", "#####"], Pos::new(1, 1));
        assert_eq!(game.act(PlayerCommand::Move(Direction::East)), Ok(TurnCost::Spent));
        assert_eq!(game.player().pos, Pos::new(1, 1));
        let orc = game.floor.monster_at(Pos::new(2, 1)).expect("orc survives one hit");
        assert!(matches!(game.floor.monsters[orc].ai, AiState::Alerted { .. }));
        assert!(game.player().current_hp < game.player().max_hp);
    }

    #[test]
    fn fatal_hit_ends_the_strikes_for_that_pass() {
        let mut game = game_on(&["#####", "#o.o#", "#####"], Pos::new(2, 1));
        game.player.current_hp = 1;
        game.player.has_pocket_kitten = false;

        assert_eq!(game.act(PlayerCommand::Wait), Ok(TurnCost::Spent));
        let log = messages(&game);
        let strikes = log.iter().filter(|line| line.starts_with("Orc attacks you")).count();
        assert_eq!(strikes, 1);
        assert_eq!(log.last().map(String::as_str), Some("You respawn at a safe location."));
        assert_eq!(game.player().current_hp, game.player().max_hp);
    }

    #[test]
    fn death_respawns_away_from_monsters_and_calms_them() {
        let rows = [
            "##############",
            "#.o..........#",
            "#............#",
            "#............#",
            "##############",
        ];
        let mut game = game_on(&rows, Pos::new(1, 1));
        game.player.current_hp = 1;
        game.player.experience = 15;

        assert_eq!(game.act(PlayerCommand::Wait), Ok(TurnCost::Spent));
        let log = messages(&game);
        assert!(log.contains(&"You have died! Respawning...".to_string()));
        assert!(log.contains(&"You respawn at a safe location.".to_string()));
        assert_eq!(game.player().current_hp, game.player().max_hp);
        assert_eq!(game.player().experience, 5);
        let orc_pos = game.floor().monsters.values().next().expect("orc").pos;
        assert!(manhattan(game.player().pos, orc_pos) >= 5);
    }
}
