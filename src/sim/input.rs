//! Player input for the race
//!
//! Gestures are turned into a throttle value and a burst request, which are
//! queued and consumed once per tick boundary.

use serde::{Deserialize, Serialize};

use crate::clamp_finite;
use crate::consts::STICK_MAX_DISPLACEMENT;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Forward/back throttle, expected in [-1, 1] (clamped again at use)
    pub throttle: f32,
    /// Neck-bend requested since the previous tick
    pub burst: bool,
}

/// Latest input written by the UI, read by the simulation at tick boundaries
///
/// Throttle is level-triggered and persists; a burst request is one-shot.
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    pending: TickInput,
}

impl InputQueue {
    pub fn set_throttle(&mut self, value: f32) {
        self.pending.throttle = value;
    }

    pub fn request_burst(&mut self) {
        self.pending.burst = true;
    }

    /// Input for the next tick; clears one-shot requests
    pub fn take(&mut self) -> TickInput {
        let input = self.pending;
        self.pending.burst = false;
        input
    }

    pub fn peek(&self) -> TickInput {
        self.pending
    }
}

/// Vertical drag joystick (forward/back only)
#[derive(Debug, Clone)]
pub struct ThrottleStick {
    max_displacement: f32,
    dragging: bool,
    /// Current knob offset in pixels (positive = down)
    offset: f32,
}

impl Default for ThrottleStick {
    fn default() -> Self {
        Self::new(STICK_MAX_DISPLACEMENT)
    }
}

impl ThrottleStick {
    pub fn new(max_displacement: f32) -> Self {
        Self {
            max_displacement: max_displacement.max(1.0),
            dragging: false,
            offset: 0.0,
        }
    }

    pub fn pointer_down(&mut self) {
        self.dragging = true;
    }

    /// Pointer moved to `dy` pixels below the stick centre
    ///
    /// Returns the new throttle, or `None` if no drag is in progress.
    pub fn pointer_move(&mut self, dy: f32) -> Option<f32> {
        if !self.dragging {
            return None;
        }
        self.offset = clamp_finite(dy, -self.max_displacement, self.max_displacement);
        Some(self.throttle())
    }

    /// Pointer released or cancelled: recentre
    pub fn release(&mut self) -> f32 {
        self.dragging = false;
        self.offset = 0.0;
        0.0
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Knob offset for drawing the stick
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Upward drag is forward throttle
    pub fn throttle(&self) -> f32 {
        -self.offset / self.max_displacement
    }
}
