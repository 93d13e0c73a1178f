//! Game settings and balance
//!
//! Field geometry and every empirical tuning value live here so a session can
//! be reshaped from a JSON file without touching code. Missing keys fall back
//! to the defaults in [`crate::consts`].

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Result;

/// Visible play field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldGeometry {
    pub width: f32,
    pub height: f32,
}

impl Default for FieldGeometry {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

/// Player ship tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub start_x: f32,
    pub start_y: f32,
    pub width: f32,
    pub height: f32,
    /// Horizontal speed (pixels/s)
    pub speed: f32,
    /// Milliseconds between shots
    pub firing_cooldown: f32,
    /// Bullet vertical velocity (negative is up)
    pub bullet_speed: f32,

    // === Level-up scaling ===
    pub speed_growth: f32,
    pub cooldown_decay: f32,
    pub min_cooldown: f32,
    pub bullet_growth: f32,
    /// Cap on bullet speed magnitude
    pub max_bullet_speed: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            start_x: PLAYER_START_X,
            start_y: PLAYER_START_Y,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            speed: PLAYER_SPEED,
            firing_cooldown: PLAYER_FIRING_COOLDOWN,
            bullet_speed: PLAYER_BULLET_SPEED,

            speed_growth: PLAYER_SPEED_GROWTH,
            cooldown_decay: PLAYER_COOLDOWN_DECAY,
            min_cooldown: PLAYER_MIN_COOLDOWN,
            bullet_growth: PLAYER_BULLET_GROWTH,
            max_bullet_speed: PLAYER_MAX_BULLET_SPEED,
        }
    }
}

impl PlayerTuning {
    pub fn start(&self) -> Vec2 {
        Vec2::new(self.start_x, self.start_y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Enemy tuning (speed and cooldown are level 1 values)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub width: f32,
    pub height: f32,
    pub speed_x: f32,
    pub speed_y: f32,
    pub firing_cooldown: f32,
    pub bullet_speed_factor: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            width: ENEMY_WIDTH,
            height: ENEMY_HEIGHT,
            speed_x: ENEMY_SPEED_X,
            speed_y: ENEMY_SPEED_Y,
            firing_cooldown: ENEMY_FIRING_COOLDOWN,
            bullet_speed_factor: ENEMY_BULLET_SPEED_FACTOR,
        }
    }
}

impl EnemyTuning {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.speed_x, self.speed_y)
    }
}

/// Bullet shape, shared by both sides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletTuning {
    pub width: f32,
    pub height: f32,
    pub color: u32,
}

impl Default for BulletTuning {
    fn default() -> Self {
        Self {
            width: BULLET_WIDTH,
            height: BULLET_HEIGHT,
            color: BULLET_COLOR,
        }
    }
}

impl BulletTuning {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Row of spawn slots above the field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnLayout {
    pub slot_count: usize,
    pub slot_spacing: f32,
    pub slot_y: f32,
}

impl Default for SpawnLayout {
    fn default() -> Self {
        Self {
            slot_count: SPAWN_SLOT_COUNT,
            slot_spacing: SPAWN_SLOT_SPACING,
            slot_y: SPAWN_SLOT_Y,
        }
    }
}

impl SpawnLayout {
    /// Top-left positions of every slot, left to right
    pub fn positions(&self) -> Vec<Vec2> {
        (0..self.slot_count)
            .map(|i| Vec2::new(i as f32 * self.slot_spacing, self.slot_y))
            .collect()
    }
}

/// Session difficulty scaling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionTuning {
    /// Level 1 spawn interval (ms)
    pub spawn_interval: f32,
    pub enemy_speed_growth: f32,
    pub enemy_cooldown_decay: f32,
    pub enemy_min_cooldown: f32,
    pub spawn_interval_decay: f32,
    pub min_spawn_interval: f32,
    pub score_target_scale: f64,
    pub score_target_exponent: f64,
}

impl Default for ProgressionTuning {
    fn default() -> Self {
        Self {
            spawn_interval: SPAWN_INTERVAL,
            enemy_speed_growth: ENEMY_SPEED_GROWTH,
            enemy_cooldown_decay: ENEMY_COOLDOWN_DECAY,
            enemy_min_cooldown: ENEMY_MIN_COOLDOWN,
            spawn_interval_decay: SPAWN_INTERVAL_DECAY,
            min_spawn_interval: MIN_SPAWN_INTERVAL,
            score_target_scale: SCORE_TARGET_SCALE,
            score_target_exponent: SCORE_TARGET_EXPONENT,
        }
    }
}

/// Cosmetic delays (ms)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub level_message: f64,
    pub high_score_prompt: f64,
    pub wreck_teardown: f64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            level_message: LEVEL_MESSAGE_DURATION,
            high_score_prompt: HIGH_SCORE_PROMPT_DELAY,
            wreck_teardown: WRECK_TEARDOWN_DELAY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Global multiplier applied to every cue (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            muted: false,
        }
    }
}

/// Everything a session needs to know about its world
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub field: FieldGeometry,
    pub player: PlayerTuning,
    pub enemy: EnemyTuning,
    pub bullet: BulletTuning,
    pub spawn: SpawnLayout,
    pub progression: ProgressionTuning,
    pub timing: Timing,
    pub audio: AudioSettings,
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default settings ({}): {e}", path.display());
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
