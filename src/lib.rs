//! Pose evaluator for the jointed bunny: a fixed bone hierarchy posed from
//! operator-set joint bases, a procedural trot gait and a timed explosion,
//! emitted as an ordered list of draw commands for an external renderer.

pub mod animation;
pub mod error;
pub mod frame_loop;
pub mod model;
pub mod renderer;
pub mod settings;

pub const CONFY_APP_NAME: &str = "bunny-rig";

pub use animation::{ExplosionState, Frame, JointMotion, MotionTable, PoseEvaluator, RigState, Waveform};
pub use error::RigError;
pub use frame_loop::{FpsCounter, FrameLoop, FrameSink};
pub use model::{JointId, JointValues, Skeleton};
pub use renderer::{DrawCommand, DrawRecord, DrawUniform};
