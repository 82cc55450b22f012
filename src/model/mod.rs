pub mod bunny;
mod joint;
mod skeleton;

pub use joint::*;
pub use skeleton::*;
