//! Monster behaviour: an alert latch and a greedy chase step.
//! A monster standing on a visible tile has been seen by the player, so it
//! has seen the player too. Once alerted it stays alerted until the player
//! dies and heads for wherever the player currently stands, in sight or not.

use crate::combat::{Strike, resolve_combat};
use crate::floor::Floor;
use crate::monster::AiState;
use crate::player::Player;
use crate::rng::DungeonRng;
use crate::types::{MonsterId, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChaseStep {
    /// Not alerted, dead, or gone.
    Idle,
    /// The step lands on the player.
    Attack,
    Moved { from: Pos, to: Pos },
    Blocked,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonsterAttack {
    pub monster: MonsterId,
    pub strike: Strike,
}

/// Latches an unaware monster onto the player once its tile is visible.
/// Alerted monsters retarget the player's current position every turn.
pub fn notice_player(floor: &mut Floor, id: MonsterId, player_pos: Pos) {
    let grid = &floor.grid;
    let Some(monster) = floor.monsters.get_mut(id) else {
        return;
    };
    if !monster.has_seen_player() {
        if !grid.is_visible(monster.pos) {
            return;
        }
        log::trace!("{} at {:?} notices the player", monster.name, monster.pos);
    }
    monster.ai = AiState::Alerted { target: player_pos };
}

/// One cell toward the target along the sign of each axis.
pub fn greedy_step(from: Pos, target: Pos) -> Pos {
    from.offset((target.x - from.x).signum(), (target.y - from.y).signum())
}

/// Runs a single monster's turn. Moves are applied here; attacks are left to
/// the caller, who owns the player.
pub fn monster_turn(floor: &mut Floor, id: MonsterId, player_pos: Pos) -> ChaseStep {
    match floor.monsters.get(id) {
        Some(monster) if monster.is_alive() => {}
        _ => return ChaseStep::Idle,
    }
    notice_player(floor, id, player_pos);

    let Some((from, target)) =
        floor.monsters.get(id).and_then(|monster| Some((monster.pos, monster.target()?)))
    else {
        return ChaseStep::Idle;
    };
    let to = greedy_step(from, target);
    if to == player_pos {
        return ChaseStep::Attack;
    }
    match floor.move_monster(id, to) {
        Ok(()) if to != from => ChaseStep::Moved { from, to },
        Ok(()) => ChaseStep::Blocked,
        Err(reason) => {
            log::trace!("monster at {from:?} blocked toward {to:?}: {reason}");
            ChaseStep::Blocked
        }
    }
}

/// A full pass over every monster in spawn order. Attacks are resolved
/// against `player`; once the player is down the remaining monsters still
/// move but no longer strike.
pub fn update_monster_ai(
    floor: &mut Floor,
    player: &mut Player,
    rng: &mut DungeonRng,
) -> Vec<MonsterAttack> {
    let ids: Vec<MonsterId> = floor.monsters.keys().collect();
    let mut attacks = Vec::new();
    for id in ids {
        if monster_turn(floor, id, player.pos) != ChaseStep::Attack || player.is_dead() {
            continue;
        }
        let strike = resolve_combat(&floor.monsters[id], player, rng);
        attacks.push(MonsterAttack { monster: id, strike });
    }
    attacks
}
