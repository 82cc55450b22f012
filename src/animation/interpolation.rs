// Easing curves and transform helpers

use nalgebra_glm as glm;

/// Length of the explosion window in seconds
pub const BURST_DURATION: f32 = 2.0;
/// Asymptotic ceiling of the explosion magnitude
pub const BURST_PEAK: f32 = 5.0;
/// Exponential rate of the rise
pub const BURST_RATE: f32 = 3.0;
/// Per-frame decay factor once the explosion is released
pub const DECAY_FACTOR: f32 = 0.9;
/// Below this the magnitude snaps to exactly zero
pub const DECAY_FLOOR: f32 = 0.01;

/// Fast "pop" rise: 0 at trigger, approaching `BURST_PEAK`
pub fn burst_magnitude(elapsed: f32) -> f32 {
    BURST_PEAK * (1.0 - (-BURST_RATE * elapsed).exp())
}

/// One frame of geometric decay, clamped to exact zero near rest
pub fn decay_magnitude(magnitude: f32) -> f32 {
    if magnitude > DECAY_FLOOR {
        magnitude * DECAY_FACTOR
    } else {
        0.0
    }
}

/// Post-multiply `m` by translate, rotate (degrees about `axis`) and scale,
/// the same order a bone applies them.
pub fn compose_local(
    m: &glm::Mat4,
    translation: &glm::Vec3,
    degrees: Option<(f32, &glm::Vec3)>,
    scaling: &glm::Vec3,
) -> glm::Mat4 {
    let mut out = glm::translate(m, translation);
    if let Some((angle, axis)) = degrees {
        out = glm::rotate(&out, angle.to_radians(), axis);
    }
    glm::scale(&out, scaling)
}
