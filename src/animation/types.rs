// Procedural motion descriptors

use crate::error::RigError;
use crate::model::{JointId, JointValues};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Shared gait phase advances this many radians per second.
pub const GAIT_RATE: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Waveform {
    /// Full swing, [-1, 1]
    Sine,
    /// Lifted to [0, 1] so the joint only flexes one way
    Rectified,
}

impl Waveform {
    pub fn sample(self, x: f32) -> f32 {
        match self {
            Self::Sine => x.sin(),
            Self::Rectified => 0.5 + 0.5 * x.sin(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointMotion {
    pub amplitude: f32,
    /// Multiplier on the shared gait phase
    pub frequency: f32,
    pub phase_shift: f32,
    pub waveform: Waveform,
}

impl JointMotion {
    pub const fn still() -> Self {
        Self {
            amplitude: 0.0,
            frequency: 1.0,
            phase_shift: 0.0,
            waveform: Waveform::Sine,
        }
    }

    pub const fn sine(amplitude: f32, frequency: f32, phase_shift: f32) -> Self {
        Self {
            amplitude,
            frequency,
            phase_shift,
            waveform: Waveform::Sine,
        }
    }

    pub const fn rectified(amplitude: f32, frequency: f32, phase_shift: f32) -> Self {
        Self {
            amplitude,
            frequency,
            phase_shift,
            waveform: Waveform::Rectified,
        }
    }

    pub fn offset(&self, phase: f32) -> f32 {
        self.amplitude * self.waveform.sample(phase * self.frequency + self.phase_shift)
    }
}

impl Default for JointMotion {
    fn default() -> Self {
        Self::still()
    }
}

/// One motion descriptor per joint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MotionTable {
    motions: [JointMotion; JointId::COUNT],
}

impl MotionTable {
    pub fn still() -> Self {
        Self::default()
    }

    pub fn get(&self, joint: JointId) -> &JointMotion {
        &self.motions[joint.index()]
    }

    pub fn set(&mut self, joint: JointId, motion: JointMotion) {
        self.motions[joint.index()] = motion;
    }

    pub fn with(mut self, joint: JointId, motion: JointMotion) -> Self {
        self.set(joint, motion);
        self
    }

    /// Offsets of every joint at `seconds`
    pub fn offsets(&self, seconds: f32) -> JointValues {
        let phase = seconds * GAIT_RATE;
        let mut offsets = JointValues::zero();
        for joint in JointId::ALL {
            offsets[joint] = self.get(joint).offset(phase);
        }
        offsets
    }

    pub fn from_json(text: &str) -> Result<Self, RigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, RigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, RigError> {
        let path = path.as_ref();
        let read = std::fs::read_to_string(path)
            .map_err(RigError::from)
            .and_then(|text| Self::from_json(&text));
        read.map_err(|e| {
            RigError::new("gait-load")
                .with_arg("path", path.display())
                .push_rig(e)
        })
    }
}
