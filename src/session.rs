//! One game session wired to its host collaborators
//!
//! [`Session`] owns the simulation state and turns each frame callback into a
//! simulation step, then forwards the step's events to audio, the renderer and
//! the high score store.

use crate::audio::{AudioBackend, AudioRegistry};
use crate::error::{Error, Result};
use crate::highscores::HighScoreEntry;
use crate::persistence::ScoreStore;
use crate::platform::FrameClock;
use crate::renderer::{NullRenderer, Renderer, sprites};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

pub struct Session {
    state: GameState,
    clock: FrameClock,
    audio: AudioRegistry,
    store: Box<dyn ScoreStore>,
    /// Score waiting for a name since the last prompt
    pending_score: Option<u64>,
}

impl Session {
    pub fn new(
        settings: Settings,
        seed: u64,
        audio: Box<dyn AudioBackend>,
        store: Box<dyn ScoreStore>,
    ) -> Self {
        let mut registry = AudioRegistry::new(audio);
        registry.set_muted(settings.audio.muted);
        registry.set_volume_for_all(settings.audio.master_volume);
        log::info!("Session created with seed {seed}");
        Self {
            state: GameState::new(settings, seed),
            clock: FrameClock::new(),
            audio: registry,
            store,
            pending_score: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn level(&self) -> u32 {
        self.state.level()
    }

    pub fn message(&self) -> Option<&str> {
        self.state.message()
    }

    /// Score still waiting for [`Session::submit_high_score`]
    pub fn pending_score(&self) -> Option<u64> {
        self.pending_score
    }

    /// Begin play without waiting for a fire press. Returns the events
    /// raised (empty when the session was not in Ready).
    pub fn start(&mut self) -> Vec<GameEvent> {
        self.state.start();
        self.dispatch_pending(&mut NullRenderer)
    }

    /// Run one frame: step the simulation, play sounds, repaint.
    /// Returns the events raised during the step.
    pub fn frame(
        &mut self,
        timestamp_ms: f64,
        input: &TickInput,
        renderer: &mut dyn Renderer,
    ) -> Vec<GameEvent> {
        let dt = self.clock.delta(timestamp_ms);
        tick(&mut self.state, input, dt);
        let events = self.dispatch_pending(renderer);

        for sprite in sprites(&self.state) {
            renderer.draw(&sprite);
        }
        events
    }

    fn dispatch_pending(&mut self, renderer: &mut dyn Renderer) -> Vec<GameEvent> {
        let events = self.state.drain_events();
        for event in &events {
            self.audio.handle_event(event);
            match event {
                GameEvent::BulletRemoved { id } | GameEvent::WreckCleared { id } => {
                    renderer.remove(*id)
                }
                GameEvent::HighScorePrompt { score } => self.pending_score = Some(*score),
                GameEvent::Reset => self.pending_score = None,
                _ => {}
            }
        }
        events
    }

    /// Store the prompted score under `name`. Each prompt accepts one
    /// record; without a prompt this fails with [`Error::NoPendingScore`].
    /// Failures are logged and returned, the game itself is left untouched.
    pub fn submit_high_score(&mut self, name: &str) -> Result<usize> {
        let Some(score) = self.pending_score else {
            log::warn!("High score submitted with no game waiting for a name");
            return Err(Error::NoPendingScore);
        };
        match self.store.add_high_score(name, score) {
            Ok(rank) => {
                log::info!("Stored score {score} for {} at rank {rank}", name.trim());
                self.pending_score = None;
                Ok(rank)
            }
            Err(e) => {
                log::warn!("Could not store high score: {e}");
                Err(e)
            }
        }
    }

    pub fn high_scores(&self) -> Result<Vec<HighScoreEntry>> {
        self.store.high_scores()
    }

    /// Back to a fresh level 1 session, whatever the phase
    pub fn reset(&mut self, renderer: &mut dyn Renderer) {
        self.state.reset();
        self.dispatch_pending(renderer);
    }

    pub fn set_volume_for_all(&mut self, multiplier: f32) {
        self.audio.set_volume_for_all(multiplier);
    }
}
