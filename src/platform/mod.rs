//! Platform abstraction layer
//!
//! Handles the host-facing edges of the frame loop:
//! - Frame timestamps to per-frame deltas
//! - Key events to the fixed control set

use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Turns frame callback timestamps into elapsed milliseconds
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta since the previous frame. The first frame and any timestamp
    /// that goes backwards yield 0. Non-finite timestamps are ignored.
    pub fn delta(&mut self, timestamp_ms: f64) -> f32 {
        if !timestamp_ms.is_finite() {
            return 0.0;
        }
        let dt = match self.last {
            Some(last) if timestamp_ms > last => (timestamp_ms - last) as f32,
            _ => 0.0,
        };
        self.last = Some(timestamp_ms);
        dt
    }
}

/// The controls the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    MoveLeft,
    MoveRight,
    Fire,
    Pause,
    Reset,
}

/// Key name to control mapping (DOM-style key names)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub bindings: Vec<(String, Control)>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = [
            ("ArrowLeft", Control::MoveLeft),
            ("ArrowRight", Control::MoveRight),
            (" ", Control::Fire),
            ("p", Control::Pause),
            ("P", Control::Pause),
            ("r", Control::Reset),
            ("R", Control::Reset),
        ];
        Self {
            bindings: bindings
                .iter()
                .map(|(key, control)| (key.to_string(), *control))
                .collect(),
        }
    }
}

impl KeyBindings {
    pub fn control_for(&self, key: &str) -> Option<Control> {
        self.bindings
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, control)| *control)
    }
}

/// Pressed/released state of every control, fed by key events
#[derive(Debug, Clone, Default)]
pub struct InputState {
    bindings: KeyBindings,
    input: TickInput,
}

impl InputState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            input: TickInput::default(),
        }
    }

    pub fn key_down(&mut self, key: &str) {
        if let Some(control) = self.bindings.control_for(key) {
            self.set(control, true);
        }
    }

    pub fn key_up(&mut self, key: &str) {
        if let Some(control) = self.bindings.control_for(key) {
            self.set(control, false);
        }
    }

    pub fn set(&mut self, control: Control, pressed: bool) {
        match control {
            Control::MoveLeft => self.input.left = pressed,
            Control::MoveRight => self.input.right = pressed,
            Control::Fire => self.input.fire = pressed,
            Control::Pause => self.input.pause = pressed,
            Control::Reset => self.input.reset = pressed,
        }
    }

    /// Sample for this frame
    pub fn sample(&self) -> TickInput {
        self.input
    }
}
