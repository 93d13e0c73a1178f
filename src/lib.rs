//! Star Raiders - A vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (entities, collisions, spawning, progression)
//! - `session`: Owns one game session and wires it to the host collaborators
//! - `renderer`: Render contract (the host paints, the core only reports)
//! - `audio`: Sound cue registry with a global volume multiplier
//! - `platform`: Frame clock and control mapping
//! - `persistence`: Durable high score storage
//! - `settings`: Data-driven field geometry and game balance

pub mod audio;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use highscores::{HighScoreEntry, HighScores};
pub use session::Session;
pub use settings::Settings;

/// Game configuration constants
///
/// These are the defaults for [`Settings`]; the simulation itself only reads
/// the values held by the settings it was built with.
pub mod consts {
    /// Play field dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 664.0;
    pub const FIELD_HEIGHT: f32 = 640.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 300.0;
    pub const PLAYER_START_Y: f32 = 590.0;
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Horizontal speed (pixels/s)
    pub const PLAYER_SPEED: f32 = 150.0;
    /// Milliseconds between two player shots
    pub const PLAYER_FIRING_COOLDOWN: f32 = 500.0;
    /// Player bullet vertical velocity (pixels/s, negative is up)
    pub const PLAYER_BULLET_SPEED: f32 = -200.0;

    /// Player level-up scaling (empirical tuning values)
    pub const PLAYER_SPEED_GROWTH: f32 = 1.015;
    pub const PLAYER_COOLDOWN_DECAY: f32 = 0.95;
    pub const PLAYER_MIN_COOLDOWN: f32 = 50.0;
    pub const PLAYER_BULLET_GROWTH: f32 = 1.02;
    pub const PLAYER_MAX_BULLET_SPEED: f32 = 300.0;

    /// Enemy defaults
    pub const ENEMY_WIDTH: f32 = 46.0;
    pub const ENEMY_HEIGHT: f32 = 83.0;
    /// Initial enemy drift (pixels/s)
    pub const ENEMY_SPEED_X: f32 = 0.0;
    pub const ENEMY_SPEED_Y: f32 = 50.0;
    pub const ENEMY_FIRING_COOLDOWN: f32 = 3000.0;
    /// Enemy bullets travel at this multiple of the enemy's vertical speed
    pub const ENEMY_BULLET_SPEED_FACTOR: f32 = 2.0;

    /// Bullet size
    pub const BULLET_WIDTH: f32 = 6.0;
    pub const BULLET_HEIGHT: f32 = 10.0;
    pub const BULLET_COLOR: u32 = 0xFF0000;

    /// Spawn slots sit above the field, one enemy height up
    pub const SPAWN_SLOT_COUNT: usize = 16;
    pub const SPAWN_SLOT_SPACING: f32 = 40.0;
    pub const SPAWN_SLOT_Y: f32 = -83.0;

    /// Session-level difficulty defaults
    pub const SPAWN_INTERVAL: f32 = 3000.0;
    pub const ENEMY_SPEED_GROWTH: f32 = 1.02;
    pub const ENEMY_COOLDOWN_DECAY: f32 = 0.98;
    pub const ENEMY_MIN_COOLDOWN: f32 = 150.0;
    pub const SPAWN_INTERVAL_DECAY: f32 = 0.95;
    pub const MIN_SPAWN_INTERVAL: f32 = 750.0;

    /// Score target curve: round((level / SCALE) ^ EXPONENT)
    pub const SCORE_TARGET_SCALE: f64 = 0.1;
    pub const SCORE_TARGET_EXPONENT: f64 = 1.8;

    /// Cosmetic delays (milliseconds)
    pub const LEVEL_MESSAGE_DURATION: f64 = 3000.0;
    pub const HIGH_SCORE_PROMPT_DELAY: f64 = 3000.0;
    pub const WRECK_TEARDOWN_DELAY: f64 = 2000.0;
}

/// Convert a frame delta in milliseconds to seconds
#[inline]
pub fn ms_to_secs(dt_ms: f32) -> f32 {
    dt_ms / 1000.0
}
