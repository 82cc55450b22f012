use nalgebra_glm as glm;

/// Fixed shrink applied before zoom so the whole rig fits the clip volume
pub const BASE_SCALE: f32 = 0.6;

/// Global rotation of the windowed scene, driven by sliders or mouse drag.
/// Angles are in degrees, zoom is the raw slider value.
#[derive(Debug, Clone)]
pub struct OrbitView {
    pub angle_x: f32,
    pub angle_y: f32,
    pub zoom: f32,
    pub default_angle_x: f32,
    pub default_angle_y: f32,
    pub default_zoom: f32,
}

impl OrbitView {
    pub fn new(angle_x: f32, angle_y: f32, zoom: f32) -> Self {
        Self {
            angle_x,
            angle_y,
            zoom,
            default_angle_x: angle_x,
            default_angle_y: angle_y,
            default_zoom: zoom,
        }
    }

    pub fn reset(&mut self) {
        self.angle_x = self.default_angle_x;
        self.angle_y = self.default_angle_y;
        self.zoom = self.default_zoom;
    }

    /// Mouse drag in pixels: horizontal spins about y, vertical tilts about x
    pub fn drag(&mut self, delta_x: f32, delta_y: f32) {
        self.angle_y = (self.angle_y + delta_x) % 360.0;
        self.angle_x += delta_y;
    }

    pub fn scale_factor(&self) -> f32 {
        BASE_SCALE * (1.0 + self.zoom / 50.0)
    }

    pub fn matrix(&self) -> glm::Mat4 {
        let m = glm::rotate(
            &glm::identity::<f32, 4>(),
            self.angle_x.to_radians(),
            &glm::vec3(1.0, 0.0, 0.0),
        );
        let m = glm::rotate(&m, self.angle_y.to_radians(), &glm::vec3(0.0, 1.0, 0.0));
        let s = self.scale_factor();
        glm::scale(&m, &glm::vec3(s, s, s))
    }
}

impl Default for OrbitView {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}
