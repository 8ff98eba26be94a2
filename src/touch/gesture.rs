//! The move touch: the one finger steering the camera and the virtual mouse

use std::time::Duration;

use glam::Vec2;

use super::events::PointerId;

/// Pitch limit in degrees, both directions
const PITCH_LIMIT: f32 = 180.0;

/// Singleton finger that is neither on a button nor on the HUD
#[derive(Debug, Clone, PartialEq)]
pub struct MoveTouch {
    pub pointer: PointerId,
    /// Where the finger went down; all virtual clicks happen here
    pub origin: Vec2,
    /// Last position that was counted as camera movement
    last: Vec2,
    pub down_time: Duration,
    /// Travelled past the threshold at least once
    pub moved: bool,
    /// Held still long enough to become a left click
    pub promoted: bool,
}

impl MoveTouch {
    pub fn new(pointer: PointerId, origin: Vec2, down_time: Duration) -> Self {
        Self {
            pointer,
            origin,
            last: origin,
            down_time,
            moved: false,
            promoted: false,
        }
    }

    /// Feeds a new finger position
    ///
    /// Returns the delta to apply to the camera once the finger has left the
    /// dead zone around the last counted position; afterwards every change counts.
    pub fn drag_to(&mut self, pos: Vec2, threshold: f32) -> Option<Vec2> {
        let delta = pos - self.last;
        if !self.moved && delta.length() <= threshold {
            return None;
        }
        self.moved = true;
        self.last = pos;
        Some(delta)
    }

    /// Stationary past the dig time and not yet clicking
    pub fn wants_promotion(&self, now: Duration, dig_time: Duration) -> bool {
        !self.moved && !self.promoted && now.saturating_sub(self.down_time) > dig_time
    }

    /// Released as a tap rather than a drag or a dig
    pub fn is_tap(&self) -> bool {
        !self.moved && !self.promoted
    }
}

/// Camera rotation accumulated from drags, in degrees
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LookState {
    yaw_change: f32,
    pitch: f32,
}

impl LookState {
    pub fn apply(&mut self, delta: Vec2, sensitivity: f32) {
        self.yaw_change -= delta.x * sensitivity;
        self.pitch = (self.pitch + delta.y * sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Yaw accumulated since the last call
    pub fn take_yaw_change(&mut self) -> f32 {
        std::mem::take(&mut self.yaw_change)
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }
}
