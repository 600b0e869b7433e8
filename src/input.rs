//! Per-frame input state
//!
//! Keyboard input arrives as discrete winit events but lessons poll it once per
//! frame, so pressed keys are accumulated here. [`FrameTimer`] supplies the
//! elapsed time used to scale movement.

use std::{collections::HashSet, time::Instant};

use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode, PhysicalKey},
};

/// Set of physical keys currently held down
#[derive(Debug, Default, Clone)]
pub struct KeyboardState {
    pressed: HashSet<KeyCode>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a keyboard event from the window
    pub fn handle_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(code) = event.physical_key {
            self.set(code, event.state == ElementState::Pressed);
        }
    }

    /// Marks a key as pressed or released
    pub fn set(&mut self, code: KeyCode, pressed: bool) {
        if pressed {
            self.pressed.insert(code);
        } else {
            self.pressed.remove(&code);
        }
    }

    pub fn is_pressed(&self, code: KeyCode) -> bool {
        self.pressed.contains(&code)
    }

    /// Releases every key, used when the window loses focus
    pub fn clear(&mut self) {
        self.pressed.clear();
    }
}

/// Measures time between frames and since startup
#[derive(Debug, Clone, Copy)]
pub struct FrameTimer {
    start: Instant,
    last_frame: Instant,
}

impl FrameTimer {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
        }
    }

    /// Returns seconds since the previous tick and starts the next interval
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        delta
    }

    /// Seconds since the timer was created
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}
