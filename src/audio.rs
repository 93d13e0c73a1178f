//! Sound cue registry
//!
//! The simulation never plays audio itself. The session maps [`GameEvent`]s to
//! [`SoundCue`]s and hands them to an [`AudioBackend`] supplied by the host.
//! Each cue carries its own base volume; one global multiplier scales all of
//! them at once.
//!
//! [`GameEvent`]: crate::sim::GameEvent

use std::collections::HashMap;

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Looping background track
    BackgroundMusic,
    PlayerShot,
    PlayerExplosion,
    EnemyShot,
    EnemyExplosion,
    LevelUp,
    GameOver,
}

impl SoundCue {
    pub const ALL: [SoundCue; 7] = [
        SoundCue::BackgroundMusic,
        SoundCue::PlayerShot,
        SoundCue::PlayerExplosion,
        SoundCue::EnemyShot,
        SoundCue::EnemyExplosion,
        SoundCue::LevelUp,
        SoundCue::GameOver,
    ];

    /// Mix level before the global multiplier
    pub fn base_volume(&self) -> f32 {
        match self {
            SoundCue::BackgroundMusic => 0.2,
            SoundCue::PlayerShot => 0.5,
            SoundCue::PlayerExplosion => 0.7,
            SoundCue::EnemyShot => 0.6,
            SoundCue::EnemyExplosion => 0.5,
            SoundCue::LevelUp => 0.5,
            SoundCue::GameOver => 0.7,
        }
    }

    pub fn is_loop(&self) -> bool {
        matches!(self, SoundCue::BackgroundMusic)
    }

    /// The cue a simulation event should trigger, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::PlayerShot { .. } => Some(SoundCue::PlayerShot),
            GameEvent::EnemyShot { .. } => Some(SoundCue::EnemyShot),
            GameEvent::PlayerExploded => Some(SoundCue::PlayerExplosion),
            GameEvent::EnemyExploded { .. } => Some(SoundCue::EnemyExplosion),
            GameEvent::LevelUp { .. } => Some(SoundCue::LevelUp),
            GameEvent::GameOver { .. } => Some(SoundCue::GameOver),
            GameEvent::Started => Some(SoundCue::BackgroundMusic),
            _ => None,
        }
    }
}

/// Host audio output. Every call is fire-and-forget.
pub trait AudioBackend {
    /// Start a cue from the beginning at the given volume
    fn play(&mut self, cue: SoundCue, volume: f32);
    /// Apply a new volume to a cue that may be playing
    fn set_volume(&mut self, cue: SoundCue, volume: f32);
    fn pause(&mut self, cue: SoundCue);
    fn resume(&mut self, cue: SoundCue);
}

/// Backend that only logs, used when the host has no audio output
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioBackend for LogAudio {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        log::debug!("play {cue:?} at {volume:.2}");
    }

    fn set_volume(&mut self, cue: SoundCue, volume: f32) {
        log::trace!("volume {cue:?} -> {volume:.2}");
    }

    fn pause(&mut self, cue: SoundCue) {
        log::debug!("pause {cue:?}");
    }

    fn resume(&mut self, cue: SoundCue) {
        log::debug!("resume {cue:?}");
    }
}

/// Registered cues of one session plus the global volume
pub struct AudioRegistry {
    backend: Box<dyn AudioBackend>,
    base_volumes: HashMap<SoundCue, f32>,
    multiplier: f32,
    muted: bool,
}

impl AudioRegistry {
    /// Register every cue at its default base volume
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        let base_volumes = SoundCue::ALL
            .iter()
            .map(|&cue| (cue, cue.base_volume()))
            .collect();
        Self {
            backend,
            base_volumes,
            multiplier: 1.0,
            muted: false,
        }
    }

    /// Scale every cue by `multiplier` (0.0 - 1.0)
    pub fn set_volume_for_all(&mut self, multiplier: f32) {
        self.multiplier = multiplier.clamp(0.0, 1.0);
        for cue in SoundCue::ALL {
            let vol = self.volume(cue);
            self.backend.set_volume(cue, vol);
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Effective volume of a cue
    pub fn volume(&self, cue: SoundCue) -> f32 {
        if self.muted {
            return 0.0;
        }
        self.base_volumes.get(&cue).copied().unwrap_or(0.0) * self.multiplier
    }

    /// Play a cue
    pub fn play(&mut self, cue: SoundCue) {
        let vol = self.volume(cue);
        if vol <= 0.0 {
            return;
        }
        self.backend.play(cue, vol);
    }

    /// Route a simulation event to the backend
    pub fn handle_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Paused => self.backend.pause(SoundCue::BackgroundMusic),
            GameEvent::Resumed => self.backend.resume(SoundCue::BackgroundMusic),
            GameEvent::GameOver { .. } => {
                self.backend.pause(SoundCue::BackgroundMusic);
                self.play(SoundCue::GameOver);
            }
            other => {
                if let Some(cue) = SoundCue::for_event(other) {
                    self.play(cue);
                }
            }
        }
    }
}
