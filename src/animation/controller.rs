// Built-in gaits

use super::types::{JointMotion, MotionTable};
use crate::model::JointId;
use std::f32::consts::PI;

const LEG_SWING: f32 = 20.0;

/// Trot: diagonal legs move together, the two diagonals half a cycle apart.
/// Head and ears bob at twice the gait rate, the tail wags at three times.
pub fn trot() -> MotionTable {
    let mut table = MotionTable::still()
        .with(JointId::Head, JointMotion::sine(5.0, 2.0, 0.0))
        .with(JointId::Ear, JointMotion::sine(10.0, 2.0, 0.0))
        .with(JointId::Tail, JointMotion::sine(15.0, 3.0, 0.0));

    let diagonals = [
        (0.0, JointId::FrontLeftHip, JointId::FrontLeftKnee, JointId::BackRightHip, JointId::BackRightKnee),
        (PI, JointId::FrontRightHip, JointId::FrontRightKnee, JointId::BackLeftHip, JointId::BackLeftKnee),
    ];
    for (shift, front_hip, front_knee, back_hip, back_knee) in diagonals {
        for hip in [front_hip, back_hip] {
            table.set(hip, JointMotion::sine(LEG_SWING, 1.0, shift));
        }
        for knee in [front_knee, back_knee] {
            table.set(knee, JointMotion::rectified(LEG_SWING, 1.0, shift));
        }
    }

    // Front paws paddle both ways, in step with their own hip.
    table.set(JointId::FrontLeftFoot, JointMotion::sine(LEG_SWING, 1.0, 0.0));
    table.set(JointId::FrontRightFoot, JointMotion::sine(LEG_SWING, 1.0, PI));

    table
}
