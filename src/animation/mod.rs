// Pose evaluation: procedural gait, explosion easing and hierarchy composition

pub mod types;
pub mod controller;
pub mod interpolation;
pub mod skeleton;
pub mod state;
pub mod system;

pub use types::*;
pub use state::*;
pub use system::{Frame, PoseEvaluator};
