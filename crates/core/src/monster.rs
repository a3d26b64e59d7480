use crate::combat::{Combatant, apply_damage};
use crate::types::Pos;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MonsterKind {
    GiantRat,
    Goblin,
    Orc,
}

pub struct MonsterStats {
    pub name: &'static str,
    pub glyph: char,
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
}

impl MonsterKind {
    pub const ALL: [MonsterKind; 3] =
        [MonsterKind::GiantRat, MonsterKind::Goblin, MonsterKind::Orc];

    pub const fn stats(self) -> MonsterStats {
        match self {
            MonsterKind::GiantRat => {
                MonsterStats { name: "Giant Rat", glyph: 'r', hp: 8, attack: 2, defense: 0 }
            }
            MonsterKind::Goblin => {
                MonsterStats { name: "Goblin", glyph: 'g', hp: 15, attack: 4, defense: 1 }
            }
            MonsterKind::Orc => {
                MonsterStats { name: "Orc", glyph: 'o', hp: 25, attack: 6, defense: 2 }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AiState {
    Unaware,
    Alerted { target: Pos },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Monster {
    pub kind: MonsterKind,
    pub name: String,
    pub glyph: char,
    pub pos: Pos,
    pub max_hp: i32,
    pub current_hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub ai: AiState,
}

impl Monster {
    pub fn spawn(kind: MonsterKind, pos: Pos) -> Self {
        let stats = kind.stats();
        Self {
            kind,
            name: stats.name.to_string(),
            glyph: stats.glyph,
            pos,
            max_hp: stats.hp,
            current_hp: stats.hp,
            attack: stats.attack,
            defense: stats.defense,
            ai: AiState::Unaware,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn has_seen_player(&self) -> bool {
        matches!(self.ai, AiState::Alerted { .. })
    }

    pub fn target(&self) -> Option<Pos> {
        match self.ai {
            AiState::Alerted { target } => Some(target),
            AiState::Unaware => None,
        }
    }

    pub fn forget_player(&mut self) {
        self.ai = AiState::Unaware;
    }
}

impl Combatant for Monster {
    fn name(&self) -> &str {
        &self.name
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
