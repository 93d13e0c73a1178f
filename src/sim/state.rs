//! Game state and state machine
//!
//! Everything one session mutates lives here. The simulation step in
//! [`super::tick`] is the only caller that advances it frame to frame; the
//! transitions below (score, level-up, pause, game over, reset) are also
//! callable directly by a host.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::{Bullet, Enemy, EntityId, Player};
use super::progression::Difficulty;
use super::spawn::{SlotId, SpawnPool};
use crate::settings::Settings;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Fresh session, waiting for the first fire press
    Ready,
    /// Active gameplay
    Running,
    /// Suspended by the player
    Paused,
    /// Player was hit. Only a reset leaves this phase.
    GameOver,
}

/// Something the host should react to (sound, render teardown, HUD, prompt)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    PlayerShot { id: EntityId },
    EnemyShot { id: EntityId },
    EnemySpawned { id: EntityId, slot: SlotId },
    EnemyExploded { id: EntityId },
    PlayerExploded,
    /// Bullet left the live set; deregister it from rendering now
    BulletRemoved { id: EntityId },
    /// Enemy left the live set; its wreck stays visible for a while
    EnemyRemoved { id: EntityId },
    /// Wreck display time is over; deregister it from rendering
    WreckCleared { id: EntityId },
    LevelUp { level: u32 },
    GameOver { score: u64 },
    /// Time to ask the player for a name to store with this score
    HighScorePrompt { score: u64 },
    MessageChanged(Option<String>),
    Reset,
}

/// A removed enemy still on screen while its explosion plays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wreck {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
    pub exploded: bool,
    /// Session clock (ms) at which the wreck disappears
    pub clear_at: f64,
}

/// HUD message with an optional expiry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Banner {
    text: String,
    clear_at: Option<f64>,
}

/// Previous frame's state of the edge-triggered controls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ControlLatch {
    pause: bool,
    reset: bool,
}

impl ControlLatch {
    /// Returns (pause pressed this frame, reset pressed this frame)
    pub(crate) fn update(&mut self, pause: bool, reset: bool) -> (bool, bool) {
        let edges = (pause && !self.pause, reset && !self.reset);
        self.pause = pause;
        self.reset = reset;
        edges
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub score: u64,
    pub difficulty: Difficulty,
    pub player: Player,
    /// Live enemies (unordered)
    pub enemies: Vec<Enemy>,
    /// Live bullets (unordered)
    pub bullets: Vec<Bullet>,
    /// Removed enemies still being drawn
    pub wrecks: Vec<Wreck>,
    pub spawn_pool: SpawnPool,
    /// Milliseconds since the last spawn
    pub since_last_spawn: f32,
    /// Session clock (ms), advances every frame including paused ones
    pub clock_ms: f64,
    pub(crate) rng: Pcg32,
    pub(crate) latch: ControlLatch,
    settings: Settings,
    banner: Option<Banner>,
    prompt_at: Option<f64>,
    events: Vec<GameEvent>,
    next_id: EntityId,
}

impl GameState {
    /// Create a session with the given settings and RNG seed
    pub fn new(settings: Settings, seed: u64) -> Self {
        let mut player = Player::new(&settings.player, &settings.bullet, &settings.field);
        player.id = 1;
        let difficulty = Difficulty::initial(&settings.enemy, &settings.progression);
        Self {
            phase: GamePhase::Ready,
            score: 0,
            since_last_spawn: difficulty.spawn_interval,
            difficulty,
            player,
            enemies: Vec::new(),
            bullets: Vec::new(),
            wrecks: Vec::new(),
            spawn_pool: SpawnPool::new(settings.spawn.positions()),
            clock_ms: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            latch: ControlLatch::default(),
            settings,
            banner: None,
            prompt_at: None,
            events: Vec::new(),
            next_id: 2,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn level(&self) -> u32 {
        self.difficulty.level
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.phase, GamePhase::Paused | GamePhase::GameOver)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Current HUD message, if any
    pub fn message(&self) -> Option<&str> {
        self.banner.as_ref().map(|b| b.text.as_str())
    }

    /// Take every event raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Register a bullet and return its ID
    pub fn add_bullet(&mut self, mut bullet: Bullet) -> EntityId {
        bullet.id = self.next_entity_id();
        let id = bullet.id;
        self.bullets.push(bullet);
        id
    }

    /// Register an enemy and return its ID
    pub fn add_enemy(&mut self, mut enemy: Enemy) -> EntityId {
        enemy.id = self.next_entity_id();
        let id = enemy.id;
        self.enemies.push(enemy);
        id
    }

    /// Drop a bullet from the live set. Unknown IDs are ignored.
    pub fn remove_bullet(&mut self, id: EntityId) -> bool {
        let Some(idx) = self.bullets.iter().position(|b| b.id == id) else {
            return false;
        };
        self.bullets.swap_remove(idx);
        self.push_event(GameEvent::BulletRemoved { id });
        true
    }

    /// Drop an enemy from the live set and free its slot. Unknown IDs are ignored.
    pub fn remove_enemy(&mut self, id: EntityId) -> bool {
        let Some(idx) = self.enemies.iter().position(|e| e.id == id) else {
            return false;
        };
        let enemy = self.enemies.swap_remove(idx);
        self.retire_enemy(enemy);
        true
    }

    /// Bookkeeping for an enemy already taken out of `enemies`
    pub(crate) fn retire_enemy(&mut self, enemy: Enemy) {
        self.spawn_pool.release(enemy.slot);
        self.wrecks.push(Wreck {
            id: enemy.id,
            pos: enemy.pos,
            size: enemy.size,
            exploded: enemy.exploded,
            clear_at: self.clock_ms + self.settings.timing.wreck_teardown,
        });
        self.push_event(GameEvent::EnemyRemoved { id: enemy.id });
    }

    /// Shoot down the enemy at `idx`: explode, score by depth, remove
    pub(crate) fn destroy_enemy(&mut self, idx: usize) {
        let mut enemy = self.enemies.swap_remove(idx);
        enemy.explode();
        self.push_event(GameEvent::EnemyExploded { id: enemy.id });
        let points = enemy.pos.y.floor().max(0.0) as u64;
        self.retire_enemy(enemy);
        self.update_score(points);
    }

    /// Add points and level up when the target is crossed. Only a running
    /// game scores.
    pub fn update_score(&mut self, points: u64) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.score += points;
        if self.score >= self.difficulty.score_target {
            self.level_up();
        }
    }

    /// Advance one level: harder enemies, stronger player, HUD banner.
    /// No effect unless the game is running.
    pub fn level_up(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.difficulty.level_up(&self.settings.progression);
        self.player.level_up();
        let level = self.difficulty.level;
        log::info!(
            "Level {} reached (next target {})",
            level,
            self.difficulty.score_target
        );
        self.push_event(GameEvent::LevelUp { level });
        let clear_at = self.clock_ms + self.settings.timing.level_message;
        self.set_banner(
            format!("Congratulations! You reached level {level}"),
            Some(clear_at),
        );
    }

    /// Ready -> Running. Returns false from any other phase.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Ready {
            return false;
        }
        self.phase = GamePhase::Running;
        self.push_event(GameEvent::Started);
        log::info!("Session started");
        true
    }

    /// Running <-> Paused. No effect before start or after game over.
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Running => {
                self.phase = GamePhase::Paused;
                self.push_event(GameEvent::Paused);
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Running;
                self.push_event(GameEvent::Resumed);
            }
            GamePhase::Ready | GamePhase::GameOver => {}
        }
    }

    /// Fatal hit on the player
    pub(crate) fn player_hit(&mut self) {
        self.player.explode();
        self.push_event(GameEvent::PlayerExploded);
        self.handle_game_over();
    }

    /// Enter game over, show the final score and schedule the name prompt.
    /// Only a running game can end.
    pub fn handle_game_over(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.phase = GamePhase::GameOver;
        log::info!("Game over at level {} with {} points", self.level(), self.score);
        self.push_event(GameEvent::GameOver { score: self.score });
        self.set_banner(format!("Game Over! You scored {}", self.score), None);
        self.prompt_at = Some(self.clock_ms + self.settings.timing.high_score_prompt);
    }

    /// Back to a fresh level 1 session in the Ready phase
    pub fn reset(&mut self) {
        self.player.reset();

        for bullet in std::mem::take(&mut self.bullets) {
            self.push_event(GameEvent::BulletRemoved { id: bullet.id });
        }
        for enemy in std::mem::take(&mut self.enemies) {
            self.push_event(GameEvent::EnemyRemoved { id: enemy.id });
            self.push_event(GameEvent::WreckCleared { id: enemy.id });
        }
        for wreck in std::mem::take(&mut self.wrecks) {
            self.push_event(GameEvent::WreckCleared { id: wreck.id });
        }
        self.spawn_pool.release_all();

        self.phase = GamePhase::Ready;
        self.score = 0;
        self.difficulty = Difficulty::initial(&self.settings.enemy, &self.settings.progression);
        self.since_last_spawn = self.difficulty.spawn_interval;
        self.prompt_at = None;
        if self.banner.take().is_some() {
            self.push_event(GameEvent::MessageChanged(None));
        }
        self.push_event(GameEvent::Reset);
        log::info!("Session reset");
    }

    /// Move the session clock and fire any deadline that has come due
    pub(crate) fn advance_clock(&mut self, dt_ms: f32) {
        self.clock_ms += dt_ms as f64;
        let now = self.clock_ms;

        let banner_due = self
            .banner
            .as_ref()
            .and_then(|b| b.clear_at)
            .is_some_and(|at| now >= at);
        if banner_due && !self.is_game_over() {
            self.banner = None;
            self.push_event(GameEvent::MessageChanged(None));
        }

        if self.prompt_at.is_some_and(|at| now >= at) {
            self.prompt_at = None;
            self.push_event(GameEvent::HighScorePrompt { score: self.score });
        }

        let (due, kept): (Vec<Wreck>, Vec<Wreck>) = std::mem::take(&mut self.wrecks)
            .into_iter()
            .partition(|w| now >= w.clear_at);
        self.wrecks = kept;
        for wreck in due {
            self.push_event(GameEvent::WreckCleared { id: wreck.id });
        }
    }

    fn set_banner(&mut self, text: String, clear_at: Option<f64>) {
        self.push_event(GameEvent::MessageChanged(Some(text.clone())));
        self.banner = Some(Banner { text, clear_at });
    }

    /// Slot indices held by live enemies
    pub fn occupied_slots(&self) -> Vec<SlotId> {
        self.enemies.iter().map(|e| e.slot).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(Settings::default(), 12345)
    }

    #[test]
    fn test_new_state() {
        let state = state();
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.level(), 1);
        assert_eq!(state.difficulty.score_target, 63);
        assert_eq!(state.since_last_spawn, state.difficulty.spawn_interval);
        assert_eq!(state.spawn_pool.free_count(), 16);
    }

    #[test]
    fn test_crossing_first_target_levels_up_once() {
        let mut state = state();
        state.start();
        state.update_score(60);
        assert_eq!(state.level(), 1);
        state.update_score(10);
        assert_eq!(state.level(), 2);
        assert_eq!(state.score, 70);
        assert_eq!(state.difficulty.score_target, 220);
        assert_eq!(state.message(), Some("Congratulations! You reached level 2"));
        let level_ups = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::LevelUp { .. }))
            .count();
        assert_eq!(level_ups, 1);
    }

    #[test]
    fn test_level_message_clears_after_delay() {
        let mut state = state();
        state.start();
        state.level_up();
        state.advance_clock(2999.0);
        assert!(state.message().is_some());
        state.advance_clock(1.0);
        assert!(state.message().is_none());
    }

    #[test]
    fn test_game_over_keeps_its_message() {
        let mut state = state();
        state.start();
        state.level_up();
        state.handle_game_over();
        state.advance_clock(5000.0);
        assert_eq!(state.message(), Some("Game Over! You scored 0"));
    }

    #[test]
    fn test_transitions_need_a_running_game() {
        let mut state = state();
        state.update_score(100);
        state.level_up();
        state.handle_game_over();
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.score, 0);
        assert_eq!(state.level(), 1);

        state.start();
        state.handle_game_over();
        assert_eq!(state.phase, GamePhase::GameOver);
        let player = state.player.clone();
        state.update_score(100);
        state.level_up();
        assert_eq!(state.score, 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.player, player);
        assert_eq!(state.message(), Some("Game Over! You scored 0"));

        state.reset();
        state.start();
        state.toggle_pause();
        state.handle_game_over();
        assert_eq!(state.phase, GamePhase::Paused);
    }

    #[test]
    fn test_pause_only_from_running() {
        let mut state = state();
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Ready);

        state.start();
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Paused);
        assert!(state.is_paused());
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Running);

        state.handle_game_over();
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.is_paused());
    }

    #[test]
    fn test_prompt_fires_once_after_delay() {
        let mut state = state();
        state.start();
        state.update_score(12);
        state.handle_game_over();
        state.drain_events();

        state.advance_clock(2500.0);
        assert!(state.drain_events().is_empty());
        state.advance_clock(500.0);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::HighScorePrompt { score: 12 }]
        );
        state.advance_clock(5000.0);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_removal_is_idempotent() {
        let mut state = state();
        let mut rng = Pcg32::seed_from_u64(3);
        let (slot, pos) = state.spawn_pool.acquire(&mut rng).unwrap();
        let settings = state.settings().clone();
        let id = state.add_enemy(Enemy::new(
            pos,
            Vec2::new(0.0, 50.0),
            3000.0,
            slot,
            &settings.enemy,
            &settings.bullet,
        ));

        assert!(state.remove_enemy(id));
        assert!(!state.remove_enemy(id));
        assert!(!state.remove_bullet(999));
        assert!(!state.spawn_pool.is_occupied(slot));
        assert_eq!(state.wrecks.len(), 1);
    }

    #[test]
    fn test_wreck_cleared_after_teardown_delay() {
        let mut state = state();
        let settings = state.settings().clone();
        let id = state.add_enemy(Enemy::new(
            Vec2::ZERO,
            Vec2::ZERO,
            3000.0,
            0,
            &settings.enemy,
            &settings.bullet,
        ));
        state.remove_enemy(id);
        state.drain_events();

        state.advance_clock(1999.0);
        assert_eq!(state.wrecks.len(), 1);
        state.advance_clock(1.0);
        assert!(state.wrecks.is_empty());
        assert_eq!(state.drain_events(), vec![GameEvent::WreckCleared { id }]);
    }
}
