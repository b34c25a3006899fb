//! Continuous input state
//!
//! Movement is keyed by character identity (W/A/S/D, case-insensitive).
//! Firing is a discrete event the host forwards straight to the session.

use glam::Vec2;

use crate::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Movement directions in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Map a key name to a movement direction
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "w" => Some(Direction::Up),
            "s" => Some(Direction::Down),
            "a" => Some(Direction::Left),
            "d" => Some(Direction::Right),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

/// What the simulation needs to know about the player's controls
pub trait InputSource {
    fn is_pressed(&self, direction: Direction) -> bool;
    fn pointer_position(&self) -> Vec2;
}

/// Key/pointer state fed by host events
#[derive(Debug, Clone)]
pub struct InputState {
    pressed: [bool; 4],
    pointer: Vec2,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            pressed: [false; 4],
            pointer: Vec2::new(DEFAULT_WIDTH / 2.0, DEFAULT_HEIGHT / 2.0),
        }
    }
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Keys that are not movement keys are ignored.
    pub fn key_down(&mut self, key: &str) {
        if let Some(direction) = Direction::from_key(key) {
            self.pressed[direction.index()] = true;
        }
    }

    /// Record a key release. Keys that are not movement keys are ignored.
    pub fn key_up(&mut self, key: &str) {
        if let Some(direction) = Direction::from_key(key) {
            self.pressed[direction.index()] = false;
        }
    }

    pub fn set_pressed(&mut self, direction: Direction, pressed: bool) {
        self.pressed[direction.index()] = pressed;
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = Vec2::new(x, y);
    }

    /// Release every key (window blur etc.)
    pub fn release_all(&mut self) {
        self.pressed = [false; 4];
    }
}

impl InputSource for InputState {
    fn is_pressed(&self, direction: Direction) -> bool {
        self.pressed[direction.index()]
    }

    fn pointer_position(&self) -> Vec2 {
        self.pointer
    }
}
