// Mutable per-rig state, owned by the caller's frame loop

use super::interpolation::{BURST_DURATION, burst_magnitude, decay_magnitude};
use crate::model::{JointId, JointValues};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExplosionState {
    pub active: bool,
    pub trigger_time: f32,
    pub magnitude: f32,
}

impl ExplosionState {
    pub fn trigger(&mut self, seconds: f32) {
        self.active = true;
        self.trigger_time = seconds;
    }

    /// Advance to `seconds`. Returns true while the explosion owns the pose.
    pub fn advance(&mut self, seconds: f32) -> bool {
        if self.active {
            let elapsed = seconds - self.trigger_time;
            if elapsed >= BURST_DURATION {
                self.active = false;
                self.magnitude = 0.0;
                return false;
            }
            self.magnitude = burst_magnitude(elapsed);
            return true;
        }

        self.magnitude = decay_magnitude(self.magnitude);
        false
    }

    /// Stop early; the magnitude then decays over the following frames.
    pub fn release(&mut self) {
        self.active = false;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RigState {
    pub bases: JointValues,
    pub animation_enabled: bool,
    pub explosion: ExplosionState,
}

impl RigState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base(&self, joint: JointId) -> f32 {
        self.bases[joint]
    }

    pub fn set_base(&mut self, joint: JointId, value: f32) {
        self.bases[joint] = value;
    }

    /// Clears the explosion and zeroes every base. The animation flag is the
    /// caller's to change.
    pub fn reset(&mut self) {
        self.explosion.clear();
        self.bases = JointValues::zero();
    }
}
