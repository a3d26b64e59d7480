//! Tunable constants for generation and play, loadable from TOML.

use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub width: usize,
    pub height: usize,
    pub max_rooms: u32,
    pub room_min_size: i32,
    pub room_max_size: i32,
    pub door_chance: f64,
    pub locked_door_chance: f64,
    pub monster_room_chance: f64,
    pub min_monsters_per_room: i32,
    pub max_monsters_per_room: i32,
    pub monster_spawn_attempts: u32,
    pub staircase_attempts: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 25,
            max_rooms: 10,
            room_min_size: 6,
            room_max_size: 12,
            door_chance: 0.5,
            locked_door_chance: 0.25,
            monster_room_chance: 0.4,
            min_monsters_per_room: 1,
            max_monsters_per_room: 2,
            monster_spawn_attempts: 20,
            staircase_attempts: 50,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub inventory_capacity: usize,
    pub first_level_xp: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self { max_hp: 100, attack: 5, defense: 2, inventory_capacity: 20, first_level_xp: 20 }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub generation: GenerationConfig,
    pub player: PlayerConfig,
    pub fov_radius: i32,
    pub kick_locked_chance: f64,
    pub kick_unlocked_chance: f64,
    pub kitten_scratch_chance: f64,
    pub kitten_scratch_damage: i32,
    pub respawn_safe_distance: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            generation: GenerationConfig::default(),
            player: PlayerConfig::default(),
            fov_radius: 8,
            kick_locked_chance: 0.7,
            kick_unlocked_chance: 0.9,
            kitten_scratch_chance: 0.15,
            kitten_scratch_damage: 2,
            respawn_safe_distance: 5,
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let generation = &self.generation;
        if generation.room_min_size < 3 || generation.room_min_size > generation.room_max_size {
            return Err(ConfigError::Invalid {
                field: "generation.room_min_size",
                reason: format!(
                    "need 3 <= min <= max, got {}..={}",
                    generation.room_min_size, generation.room_max_size
                ),
            });
        }
        let room_span = generation.room_max_size as usize + 2;
        if generation.width < room_span || generation.height < room_span {
            return Err(ConfigError::Invalid {
                field: "generation.width",
                reason: format!(
                    "{}x{} map cannot hold a {}-wide room",
                    generation.width, generation.height, generation.room_max_size
                ),
            });
        }
        if generation.min_monsters_per_room < 1
            || generation.min_monsters_per_room > generation.max_monsters_per_room
        {
            return Err(ConfigError::Invalid {
                field: "generation.min_monsters_per_room",
                reason: "need 1 <= min <= max".to_string(),
            });
        }
        for (field, value) in [
            ("generation.door_chance", generation.door_chance),
            ("generation.locked_door_chance", generation.locked_door_chance),
            ("generation.monster_room_chance", generation.monster_room_chance),
            ("kick_locked_chance", self.kick_locked_chance),
            ("kick_unlocked_chance", self.kick_unlocked_chance),
            ("kitten_scratch_chance", self.kitten_scratch_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("probability {value} outside 0..=1"),
                });
            }
        }
        if self.fov_radius < 1 {
            return Err(ConfigError::Invalid {
                field: "fov_radius",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.player.max_hp < 1 {
            return Err(ConfigError::Invalid {
                field: "player.max_hp",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
