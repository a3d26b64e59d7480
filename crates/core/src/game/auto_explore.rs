//! Auto-explore: walk toward the nearest unexplored cell one step per
//! command until the map runs out, the way is blocked, or a monster shows up.

use super::*;
use crate::pathfinding::{find_nearest_unexplored, find_next_step};

impl Game {
    pub(super) fn toggle_auto_explore(&mut self) -> Result<TurnCost, ActionError> {
        if self.auto_explore.take().is_some() {
            self.log.push(LogEvent::AutoExploreCancelled);
            return Ok(TurnCost::Free);
        }
        self.start_auto_explore()
    }

    fn start_auto_explore(&mut self) -> Result<TurnCost, ActionError> {
        let target = find_nearest_unexplored(&self.floor, self.player.pos)
            .ok_or(ActionError::NothingToExplore)?;
        log::debug!("auto-explore: heading for {target:?}");
        self.auto_explore = Some(target);
        self.log.push(LogEvent::AutoExploreStarted);
        self.auto_explore_step()
    }

    pub(super) fn continue_auto_explore(&mut self) -> Result<TurnCost, ActionError> {
        if self.auto_explore.is_none() {
            return Ok(TurnCost::Free);
        }
        self.auto_explore_step()
    }

    /// Any failure switches auto-explore off before it is reported.
    fn auto_explore_step(&mut self) -> Result<TurnCost, ActionError> {
        let result = self.try_auto_explore_step();
        if result.is_err() {
            self.auto_explore = None;
        }
        result
    }

    fn try_auto_explore_step(&mut self) -> Result<TurnCost, ActionError> {
        let mut target = self.auto_explore.ok_or(ActionError::NothingToExplore)?;
        if self.floor.grid.is_explored(target) {
            target = find_nearest_unexplored(&self.floor, self.player.pos)
                .ok_or(ActionError::NothingToExplore)?;
            log::trace!("auto-explore: retargeting to {target:?}");
            self.auto_explore = Some(target);
        }

        let direction = find_next_step(&self.floor, self.player.pos, target)
            .ok_or(ActionError::PathNotFound)?;
        let next = self.player.pos.step(direction);
        if self.floor.monster_at(next).is_some() {
            self.auto_explore = None;
            self.log.push(LogEvent::MonsterInTheWay);
            return Ok(TurnCost::Free);
        }

        self.player.pos = next;
        self.count_step();
        self.refresh_fov();

        let spotted = self.floor.visible_monsters();
        if let Some(&first) = spotted.first() {
            self.auto_explore = None;
            let first = self.floor.monsters[first].name.clone();
            self.log.push(LogEvent::MonstersSpotted { count: spotted.len(), first });
        }
        Ok(TurnCost::Spent)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{game_on, messages};
    use super::*;

    const CORRIDOR: [&str; 3] =
        ["########################", "#......................#", "########################"];

    #[test]
    fn toggling_twice_cancels() {
        let mut game = game_on(&CORRIDOR, Pos::new(1, 1));
        assert_eq!(game.act(PlayerCommand::ToggleAutoExplore), Ok(TurnCost::Spent));
        assert!(game.auto_exploring());
        assert_eq!(game.player().pos, Pos::new(2, 1));

        assert_eq!(game.act(PlayerCommand::ToggleAutoExplore), Ok(TurnCost::Free));
        assert!(!game.auto_exploring());
        assert_eq!(messages(&game).last().map(String::as_str), Some("Auto-explore cancelled."));
    }

    #[test]
    fn manual_command_cancels_auto_explore() {
        let mut game = game_on(&CORRIDOR, Pos::new(1, 1));
        game.act(PlayerCommand::ToggleAutoExplore).expect("start");
        game.act(PlayerCommand::Wait).expect("wait");
        assert!(!game.auto_exploring());
        assert_eq!(game.act(PlayerCommand::ContinueAutoExplore), Ok(TurnCost::Free));
        assert_eq!(game.player().pos, Pos::new(2, 1));
    }

    #[test]
    fn walks_the_corridor_until_nothing_is_left() {
        let mut game = game_on(&CORRIDOR, Pos::new(1, 1));
        game.act(PlayerCommand::ToggleAutoExplore).expect("start");
        for _ in 0..60 {
            if !game.auto_exploring() {
                break;
            }
            let _ = game.act(PlayerCommand::ContinueAutoExplore);
        }
        assert!(!game.auto_exploring());
        assert!(game.player().pos.x >= 15);
        let grid = &game.floor().grid;
        let mut walkable = grid.positions().filter(|&pos| grid.is_walkable(pos));
        assert!(walkable.all(|pos| grid.is_explored(pos)));
    }

    #[test]
    fn everything_already_seen_means_nothing_to_explore() {
        let mut game = game_on(&["###", "#.#", "###"], Pos::new(1, 1));
        let result = game.act(PlayerCommand::ToggleAutoExplore);
        assert_eq!(result, Err(ActionError::NothingToExplore));
        assert!(!game.auto_exploring());
        assert_eq!(
            messages(&game).last().map(String::as_str),
            Some("No unexplored areas remaining.")
        );
    }

    #[test]
    fn refuses_to_walk_into_a_monster() {
        let rows = [CORRIDOR[0], "#.g....................#", CORRIDOR[2]];
        let mut game = game_on(&rows, Pos::new(1, 1));
        assert_eq!(game.act(PlayerCommand::ToggleAutoExplore), Ok(TurnCost::Free));
        assert!(!game.auto_exploring());
        assert_eq!(game.player().pos, Pos::new(1, 1));
        assert_eq!(
            messages(&game).last().map(String::as_str),
            Some("Monster spotted! Stopping auto-explore.")
        );
    }

    #[test]
    fn stops_when_a_monster_comes_into_view() {
        let rows = [CORRIDOR[0], "#...........g..........#", CORRIDOR[2]];
        let mut game = game_on(&rows, Pos::new(1, 1));
        assert!(game.floor().visible_monsters().is_empty());

        game.act(PlayerCommand::ToggleAutoExplore).expect("start");
        for _ in 0..10 {
            if !game.auto_exploring() {
                break;
            }
            game.act(PlayerCommand::ContinueAutoExplore).expect("step");
        }
        assert!(!game.auto_exploring());
        assert!(messages(&game).contains(&"Goblin spotted! Stopping auto-explore.".to_string()));
    }
}
