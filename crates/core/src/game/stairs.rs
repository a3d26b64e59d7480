//! Taking a staircase: park the current floor in the registry and arrive on
//! the neighbouring one, generating it on the first visit.

use super::*;
use crate::types::StairDirection;

impl Game {
    pub(super) fn use_stairs(&mut self) -> Result<TurnCost, ActionError> {
        let here = self.player.pos;
        let stairs = self.floor.staircase_at(here).ok_or(ActionError::NoStairs)?;
        if !self.floor.grid.is_visible(here) {
            return Err(ActionError::StairsNotVisible);
        }
        let from = self.floor.number;
        let to = match stairs.direction {
            StairDirection::Down => from + 1,
            StairDirection::Up if from > 1 => from - 1,
            StairDirection::Up => return Err(ActionError::NoStairs),
        };

        self.registry.save(from, &self.floor);
        let next = match self.registry.load(to) {
            Some(floor) => floor,
            None => {
                log::debug!("generating floor {to}");
                self.generator.generate(to, &mut self.rng)
            }
        };
        self.floor = next;

        self.player.pos = self.arrival_position(from);
        self.auto_explore = None;
        log::debug!("floor {from} -> {to}, arriving at {:?}", self.player.pos);
        self.log.push(LogEvent::FloorChanged { from, to });
        Ok(TurnCost::Free)
    }

    /// The staircase leading back to `came_from`, or a random free cell when
    /// the floor lacks one or a monster is standing on it.
    fn arrival_position(&mut self, came_from: u32) -> Pos {
        let direction =
            if came_from < self.floor.number { StairDirection::Up } else { StairDirection::Down };
        match self.floor.staircase(direction) {
            Some(stairs) if self.floor.monster_at(stairs.pos).is_none() => stairs.pos,
            _ => self.floor.safe_position(1, &mut self.rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{game_on, messages};
    use super::*;
    use crate::monster::{Monster, MonsterKind};

    #[test]
    fn stairs_must_be_underfoot() {
        let mut game = game_on(&["#####", "#.>.#", "#####"], Pos::new(1, 1));
        assert_eq!(game.act(PlayerCommand::UseStairs), Err(ActionError::NoStairs));
        assert_eq!(game.floor().number, 1);
    }

    #[test]
    fn nothing_above_the_first_floor() {
        let mut game = game_on(&["#####", "#<..#", "#####"], Pos::new(1, 1));
        assert_eq!(game.act(PlayerCommand::UseStairs), Err(ActionError::NoStairs));
        assert!(game.registry().is_empty());
    }

    #[test]
    fn descending_then_ascending_restores_the_first_floor() {
        let mut game = game_on(&["######", "#>...#", "#.r..#", "######"], Pos::new(1, 1));
        let before = game.floor().clone();

        assert_eq!(game.act(PlayerCommand::UseStairs), Ok(TurnCost::Free));
        assert_eq!(game.floor().number, 2);
        assert!(game.registry().has(1));
        assert_eq!(messages(&game).last().map(String::as_str), Some("You descend to floor 2."));
        let up = game.floor().staircase(StairDirection::Up).expect("floor 2 has an up staircase");
        assert_eq!(game.player().pos, up.pos);

        assert_eq!(game.act(PlayerCommand::UseStairs), Ok(TurnCost::Free));
        assert_eq!(game.floor().number, 1);
        assert_eq!(game.player().pos, Pos::new(1, 1));
        assert_eq!(game.floor(), &before);
        assert!(game.registry().has(2));
        assert_eq!(messages(&game).last().map(String::as_str), Some("You ascend to floor 1."));
    }

    #[test]
    fn blocked_arrival_staircase_falls_back_to_a_free_cell() {
        let mut game = game_on(&["######", "#>...#", "######"], Pos::new(1, 1));
        let mut second = Floor::from_ascii(2, &["#######", "#<....#", "#.....#", "#######"]);
        second.monsters.insert(Monster::spawn(MonsterKind::Orc, Pos::new(1, 1)));
        game.registry.save(2, &second);

        game.act(PlayerCommand::UseStairs).expect("descend");
        assert_eq!(game.floor().number, 2);
        assert_ne!(game.player().pos, Pos::new(1, 1));
        assert!(game.floor().grid.is_walkable(game.player().pos));
        assert_eq!(game.floor().monster_at(game.player().pos), None);
    }
}
