//! Level progression
//!
//! Difficulty is a session-level value: newly spawned enemies always take the
//! current enemy speed and cooldown, existing ones keep what they spawned with.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::{EnemyTuning, ProgressionTuning};

/// Cumulative score needed to leave `level`
pub fn score_target(level: u32, tuning: &ProgressionTuning) -> u64 {
    (level as f64 / tuning.score_target_scale)
        .powf(tuning.score_target_exponent)
        .round() as u64
}

/// Current session difficulty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// 1-based level
    pub level: u32,
    /// Velocity given to new enemies (pixels/s)
    pub enemy_velocity: Vec2,
    /// Firing cooldown given to new enemies (ms)
    pub enemy_firing_cooldown: f32,
    /// Milliseconds between spawns
    pub spawn_interval: f32,
    /// Score at which the next level starts
    pub score_target: u64,
}

impl Difficulty {
    /// Level 1 values
    pub fn initial(enemy: &EnemyTuning, tuning: &ProgressionTuning) -> Self {
        Self {
            level: 1,
            enemy_velocity: enemy.velocity(),
            enemy_firing_cooldown: enemy.firing_cooldown,
            spawn_interval: tuning.spawn_interval,
            score_target: score_target(1, tuning),
        }
    }

    /// Step to the next level
    pub fn level_up(&mut self, tuning: &ProgressionTuning) {
        self.level += 1;
        self.enemy_velocity.y *= tuning.enemy_speed_growth;
        self.enemy_firing_cooldown =
            (self.enemy_firing_cooldown * tuning.enemy_cooldown_decay).max(tuning.enemy_min_cooldown);
        self.spawn_interval =
            (self.spawn_interval * tuning.spawn_interval_decay).max(tuning.min_spawn_interval);
        self.score_target = score_target(self.level, tuning);
    }
}
