// Per-frame pose evaluation

use super::controller;
use super::skeleton::collect_draws;
use super::state::RigState;
use super::types::MotionTable;
use crate::model::{JointId, JointValues, Skeleton, bunny};
use crate::renderer::DrawCommand;
use nalgebra_glm as glm;

/// Everything one frame hands to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub seconds: f32,
    pub magnitude: f32,
    pub exploding: bool,
    pub pose: JointValues,
    /// Global view matrix applied on top of every command's transform
    pub view: glm::Mat4,
    pub commands: Vec<DrawCommand>,
}

/// Poses a fixed skeleton from a `RigState`. Holds only authored data; all
/// mutable state lives in the caller's `RigState`.
pub struct PoseEvaluator {
    skeleton: Skeleton,
    motions: MotionTable,
}

impl PoseEvaluator {
    pub fn new(skeleton: Skeleton, motions: MotionTable) -> Self {
        Self { skeleton, motions }
    }

    /// The bunny rig with the trot gait
    pub fn bunny() -> Self {
        Self::new(bunny::skeleton(), controller::trot())
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    pub fn motions(&self) -> &MotionTable {
        &self.motions
    }

    pub fn set_motions(&mut self, motions: MotionTable) {
        self.motions = motions;
    }

    /// Procedural offsets; all zero while animation is off
    pub fn offsets(&self, state: &RigState, seconds: f32) -> JointValues {
        if state.animation_enabled {
            self.motions.offsets(seconds)
        } else {
            JointValues::zero()
        }
    }

    /// Resolved joint angles, ignoring any explosion
    pub fn resolve(&self, state: &RigState, seconds: f32) -> JointValues {
        let offsets = self.offsets(state, seconds);
        let mut resolved = JointValues::zero();
        for joint in JointId::ALL {
            resolved[joint] = if joint.has_base() {
                state.bases[joint] + offsets[joint]
            } else {
                offsets[joint]
            };
        }
        resolved
    }

    pub fn draw(&self, pose: &JointValues, magnitude: f32) -> Vec<DrawCommand> {
        self.draw_at(pose, magnitude, &glm::identity())
    }

    /// Draw commands with the whole rig placed under `root`
    pub fn draw_at(&self, pose: &JointValues, magnitude: f32, root: &glm::Mat4) -> Vec<DrawCommand> {
        collect_draws(&self.skeleton, pose, magnitude, root)
    }

    pub fn update(&self, state: &mut RigState, seconds: f32) -> Frame {
        self.update_at(state, seconds, &glm::identity())
    }

    /// Runs one frame: advance the explosion, resolve joints, compose bones.
    pub fn update_at(&self, state: &mut RigState, seconds: f32, root: &glm::Mat4) -> Frame {
        let exploding = state.explosion.advance(seconds);
        // An explosion holds every joint at rest.
        let pose = if exploding {
            JointValues::zero()
        } else {
            self.resolve(state, seconds)
        };
        let magnitude = state.explosion.magnitude;

        Frame {
            seconds,
            magnitude,
            exploding,
            pose,
            view: glm::identity(),
            commands: self.draw_at(&pose, magnitude, root),
        }
    }
}

impl Default for PoseEvaluator {
    fn default() -> Self {
        Self::bunny()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bunny_emits_every_drawable_bone() {
        let evaluator = PoseEvaluator::bunny();
        let mut state = RigState::new();
        let frame = evaluator.update(&mut state, 0.0);
        assert_eq!(frame.commands.len(), evaluator.skeleton().drawable_count());
        assert_eq!(frame.commands.len(), 24);
        assert_eq!(frame.commands[0].bone, "body");
        assert_eq!(frame.commands[1].bone, "neck_wedge");
    }

    #[test]
    fn tail_ignores_its_base() {
        let evaluator = PoseEvaluator::bunny();
        let mut state = RigState::new();
        state.set_base(JointId::Tail, 45.0);
        let pose = evaluator.resolve(&state, 3.0);
        assert_eq!(pose[JointId::Tail], 0.0);
    }

    #[test]
    fn explosion_holds_rest_pose() {
        let evaluator = PoseEvaluator::bunny();
        let mut state = RigState::new();
        state.animation_enabled = true;
        state.set_base(JointId::Head, 40.0);
        state.explosion.trigger(0.0);
        let frame = evaluator.update(&mut state, 0.5);
        assert!(frame.exploding);
        assert!(frame.pose.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn body_grows_with_magnitude() {
        let evaluator = PoseEvaluator::bunny();
        let rest = evaluator.draw(&JointValues::zero(), 0.0);
        let blown = evaluator.draw(&JointValues::zero(), 1.0);
        let width = |cmds: &[DrawCommand]| cmds[0].transform[(0, 0)];
        assert!((width(&rest) - 1.0).abs() < 1e-6);
        assert!((width(&blown) - 2.0).abs() < 1e-6);
    }
}
