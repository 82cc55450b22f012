//! Hand-off types for whatever draws the rig. Nothing here talks to a GPU.

pub mod camera;
mod draw_command;

pub use draw_command::*;
