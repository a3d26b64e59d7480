//! Melee resolution between any two combatants.

use crate::rng::DungeonRng;

/// What the resolver needs from anything that can fight.
pub trait Combatant {
    /// Name used as the subject of a combat message.
    fn name(&self) -> &str;

    /// Name used when this combatant is on the receiving end.
    fn name_as_target(&self) -> &str {
        self.name()
    }

    fn attack_verb(&self) -> &'static str {
        "attacks"
    }

    fn attack(&self) -> i32;

    fn defense(&self) -> i32;

    fn current_hp(&self) -> i32;

    /// Subtracts `amount`, never going below zero. Returns `true` when the
    /// combatant has no hit points left.
    fn take_damage(&mut self, amount: i32) -> bool;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Strike {
    pub damage: i32,
    pub defender_died: bool,
    pub message: String,
}

pub fn damage_after_defense(raw: i32, defense: i32) -> i32 {
    (raw - defense).max(1)
}

pub fn resolve_combat(
    attacker: &dyn Combatant,
    defender: &mut dyn Combatant,
    rng: &mut DungeonRng,
) -> Strike {
    let raw = attacker.attack() + rng.range_inclusive(-1, 1);
    let damage = damage_after_defense(raw, defender.defense());
    let defender_died = defender.take_damage(damage);
    let message = format!(
        "{} {} {} for {damage} damage!",
        attacker.name(),
        attacker.attack_verb(),
        defender.name_as_target()
    );
    Strike { damage, defender_died, message }
}

/// Shared hit point arithmetic for combatants.
pub(crate) fn apply_damage(current_hp: &mut i32, amount: i32) -> bool {
    *current_hp = (*current_hp - amount).max(0);
    *current_hp <= 0
}
