//! The player's stats, progression and inventory bookkeeping.

use crate::combat::{Combatant, apply_damage};
use crate::config::PlayerConfig;
use crate::loot::ItemRef;
use crate::rng::DungeonRng;
use crate::types::Pos;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub pos: Pos,
    pub max_hp: i32,
    pub current_hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub level: u32,
    pub experience: u32,
    pub experience_to_next_level: u32,
    pub inventory: Vec<ItemRef>,
    pub inventory_capacity: usize,
    pub has_pocket_kitten: bool,
    pub steps_taken: u64,
    steps_until_heal: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelUp {
    pub level: u32,
    pub old_max_hp: i32,
    pub new_max_hp: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Heal {
    pub amount: i32,
    pub from: i32,
    pub to: i32,
}

impl Player {
    pub fn new(pos: Pos, config: &PlayerConfig, rng: &mut DungeonRng) -> Self {
        Self {
            pos,
            max_hp: config.max_hp,
            current_hp: config.max_hp,
            attack: config.attack,
            defense: config.defense,
            level: 1,
            experience: 0,
            experience_to_next_level: config.first_level_xp,
            inventory: Vec::new(),
            inventory_capacity: config.inventory_capacity,
            has_pocket_kitten: true,
            steps_taken: 0,
            steps_until_heal: heal_interval(rng),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.current_hp <= 0
    }

    pub fn heal(&mut self, amount: i32) {
        self.current_hp = (self.current_hp + amount).min(self.max_hp);
    }

    /// Adds experience and returns every level gained along the way.
    pub fn gain_experience(&mut self, amount: u32) -> Vec<LevelUp> {
        self.experience += amount;
        let mut gained = Vec::new();
        while self.experience >= self.experience_to_next_level {
            gained.push(self.level_up());
        }
        gained
    }

    fn level_up(&mut self) -> LevelUp {
        self.experience -= self.experience_to_next_level;
        self.level += 1;
        let old_max_hp = self.max_hp;
        self.max_hp += 10;
        self.current_hp += 10;
        self.attack += 1;
        self.defense += 1;
        self.experience_to_next_level = self.experience_to_next_level * 3 / 2;
        LevelUp { level: self.level, old_max_hp, new_max_hp: self.max_hp }
    }

    /// Restores hit points after death; costs some experience.
    pub fn respawn(&mut self, pos: Pos) {
        self.current_hp = self.max_hp;
        self.experience = self.experience.saturating_sub(10);
        self.pos = pos;
    }

    /// Counts a step and applies heal-over-time when the interval elapses.
    pub fn take_step(&mut self, rng: &mut DungeonRng) -> Option<Heal> {
        self.steps_taken += 1;
        self.steps_until_heal -= 1;
        if self.steps_until_heal > 0 {
            return None;
        }

        self.steps_until_heal = heal_interval(rng);
        if self.current_hp >= self.max_hp {
            return None;
        }
        let percent = rng.range_inclusive(1, 3);
        let amount = (self.max_hp * percent / 100).max(1);
        let from = self.current_hp;
        self.heal(amount);
        Some(Heal { amount, from, to: self.current_hp })
    }

    pub fn inventory_full(&self) -> bool {
        self.inventory.len() >= self.inventory_capacity
    }

    /// Returns the item back when there is no room for it.
    pub fn add_item(&mut self, item: ItemRef) -> Result<(), ItemRef> {
        if self.inventory_full() {
            return Err(item);
        }
        self.inventory.push(item);
        Ok(())
    }
}

fn heal_interval(rng: &mut DungeonRng) -> i32 {
    rng.range_inclusive(2, 4)
}

impl Combatant for Player {
    fn name(&self) -> &str {
        "You"
    }

    fn name_as_target(&self) -> &str {
        "you"
    }

    fn attack_verb(&self) -> &'static str {
        "attack"
    }

    fn attack(&self) -> i32 {
        self.attack
    }

    fn defense(&self) -> i32 {
        self.defense
    }

    fn current_hp(&self) -> i32 {
        self.current_hp
    }

    fn take_damage(&mut self, amount: i32) -> bool {
        apply_damage(&mut self.current_hp, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_player() -> (Player, DungeonRng) {
        let mut rng = DungeonRng::seed_from_u64(17);
        let player = Player::new(Pos::new(1, 1), &PlayerConfig::default(), &mut rng);
        (player, rng)
    }

    #[test]
    fn level_up_raises_stats_and_threshold() {
        let (mut player, _) = fresh_player();
        let gained = player.gain_experience(25);
        assert_eq!(gained, vec![LevelUp { level: 2, old_max_hp: 100, new_max_hp: 110 }]);
        assert_eq!(player.experience, 5);
        assert_eq!(player.experience_to_next_level, 30);
        assert_eq!(player.attack, 6);
        assert_eq!(player.defense, 3);
        assert_eq!(player.current_hp, 110);
    }

    #[test]
    fn large_experience_gain_can_level_twice() {
        let (mut player, _) = fresh_player();
        let gained = player.gain_experience(55);
        assert_eq!(gained.len(), 2);
        assert_eq!(player.level, 3);
        assert_eq!(player.experience, 5);
    }

    #[test]
    fn heal_over_time_only_when_injured() {
        let (mut player, mut rng) = fresh_player();
        for _ in 0..20 {
            assert!(player.take_step(&mut rng).is_none(), "full health should never heal");
        }

        player.current_hp = 50;
        let heal = (0..4).find_map(|_| player.take_step(&mut rng)).expect("heal within 4 steps");
        assert!((1..=3).contains(&heal.amount));
        assert_eq!(heal.from, 50);
        assert_eq!(player.current_hp, 50 + heal.amount);
    }

    #[test]
    fn respawn_restores_health_and_costs_experience() {
        let (mut player, _) = fresh_player();
        player.experience = 4;
        player.current_hp = 0;
        player.respawn(Pos::new(9, 9));
        assert_eq!(player.current_hp, player.max_hp);
        assert_eq!(player.experience, 0);
        assert_eq!(player.pos, Pos::new(9, 9));
    }

    #[test]
    fn full_inventory_hands_item_back() {
        let (mut player, _) = fresh_player();
        player.inventory_capacity = 1;
        assert!(player.add_item(ItemRef::new("Rusty Dagger", ')')).is_ok());
        let rejected = player.add_item(ItemRef::new("Leather Armor", '['));
        assert_eq!(rejected, Err(ItemRef::new("Leather Armor", '[')));
    }

    #[test]
    fn player_messages_use_second_person() {
        let (player, _) = fresh_player();
        assert_eq!(player.name(), "You");
        assert_eq!(player.name_as_target(), "you");
        assert_eq!(player.attack_verb(), "attack");
    }
}
