use crate::error::RigError;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// Rotational degrees of freedom of the bunny rig.
/// Both ears are driven by the single `Ear` joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointId {
    Head,
    Ear,
    Tail,
    FrontLeftHip,
    FrontLeftKnee,
    FrontLeftFoot,
    FrontRightHip,
    FrontRightKnee,
    FrontRightFoot,
    BackLeftHip,
    BackLeftKnee,
    BackRightHip,
    BackRightKnee,
}

impl JointId {
    pub const COUNT: usize = 13;

    pub const ALL: [JointId; Self::COUNT] = [
        JointId::Head,
        JointId::Ear,
        JointId::Tail,
        JointId::FrontLeftHip,
        JointId::FrontLeftKnee,
        JointId::FrontLeftFoot,
        JointId::FrontRightHip,
        JointId::FrontRightKnee,
        JointId::FrontRightFoot,
        JointId::BackLeftHip,
        JointId::BackLeftKnee,
        JointId::BackRightHip,
        JointId::BackRightKnee,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::Ear => "ear",
            Self::Tail => "tail",
            Self::FrontLeftHip => "front_left_hip",
            Self::FrontLeftKnee => "front_left_knee",
            Self::FrontLeftFoot => "front_left_foot",
            Self::FrontRightHip => "front_right_hip",
            Self::FrontRightKnee => "front_right_knee",
            Self::FrontRightFoot => "front_right_foot",
            Self::BackLeftHip => "back_left_hip",
            Self::BackLeftKnee => "back_left_knee",
            Self::BackRightHip => "back_right_hip",
            Self::BackRightKnee => "back_right_knee",
        }
    }

    /// The tail has no operator-set base; it is purely procedural.
    pub fn has_base(self) -> bool {
        !matches!(self, Self::Tail)
    }

    /// Parses a `joint=degrees` assignment such as `front_left_hip=10`.
    pub fn parse_assignment(text: &str) -> Result<(JointId, f32), RigError> {
        let (name, value) = text
            .split_once('=')
            .ok_or_else(|| RigError::new("bad-assignment").with_arg("value", text))?;
        let joint: JointId = name.parse()?;
        let degrees: f32 = value.trim().parse().map_err(|_| {
            RigError::new("bad-angle")
                .with_arg("joint", joint.name())
                .with_arg("value", value)
        })?;
        Ok((joint, degrees))
    }
}

impl FromStr for JointId {
    type Err = RigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        JointId::ALL
            .into_iter()
            .find(|joint| joint.name() == wanted)
            .ok_or_else(|| RigError::new("unknown-joint").with_arg("name", wanted))
    }
}

/// One scalar per joint, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct JointValues([f32; JointId::COUNT]);

impl JointValues {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn get(&self, joint: JointId) -> f32 {
        self.0[joint.index()]
    }

    pub fn set(&mut self, joint: JointId, value: f32) {
        self.0[joint.index()] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (JointId, f32)> + '_ {
        JointId::ALL.into_iter().map(|joint| (joint, self.get(joint)))
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

impl Index<JointId> for JointValues {
    type Output = f32;

    fn index(&self, joint: JointId) -> &f32 {
        &self.0[joint.index()]
    }
}

impl IndexMut<JointId> for JointValues {
    fn index_mut(&mut self, joint: JointId) -> &mut f32 {
        &mut self.0[joint.index()]
    }
}
