use crate::CONFY_APP_NAME;
use crate::error::RigError;
use crate::renderer::camera::OrbitView;

use nalgebra_glm as glm;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationSettings {
    pub animate_on_start: bool,
    pub target_fps: u32,
    pub gait_path: Option<String>,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            animate_on_start: false,
            target_fps: 60,
            gait_path: None,
        }
    }
}

impl AnimationSettings {
    pub fn load() -> Self {
        load_or_default("animation")
    }

    pub fn save(&self) -> Result<(), RigError> {
        Ok(confy::store(CONFY_APP_NAME, "animation", self)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewSettings {
    pub angle_x: f32,
    pub angle_y: f32,
    pub zoom: f32,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            angle_x: 0.0,
            angle_y: 0.0,
            zoom: 0.0,
        }
    }
}

impl ViewSettings {
    pub fn load() -> Self {
        load_or_default("view")
    }

    pub fn save(&self) -> Result<(), RigError> {
        Ok(confy::store(CONFY_APP_NAME, "view", self)?)
    }

    pub fn orbit(&self) -> OrbitView {
        OrbitView::new(self.angle_x, self.angle_y, self.zoom)
    }
}

/// Where the rig stands in its scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementSettings {
    pub translation: [f32; 3],
    pub yaw_degrees: f32,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            translation: [0.0, 0.0, 0.0],
            yaw_degrees: 0.0,
        }
    }
}

impl PlacementSettings {
    pub fn load() -> Self {
        load_or_default("placement")
    }

    pub fn save(&self) -> Result<(), RigError> {
        Ok(confy::store(CONFY_APP_NAME, "placement", self)?)
    }

    pub fn root(&self) -> glm::Mat4 {
        let m = glm::translate(&glm::identity::<f32, 4>(), &glm::make_vec3(&self.translation));
        glm::rotate(&m, self.yaw_degrees.to_radians(), &glm::vec3(0.0, 1.0, 0.0))
    }
}

fn load_or_default<T>(name: &str) -> T
where
    T: Default + Serialize + for<'de> Deserialize<'de>,
{
    match confy::load(CONFY_APP_NAME, name) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("{}", RigError::from(e).with_arg("config", name));
            T::default()
        }
    }
}

fn section_path(dir: &Path, name: &str) -> std::path::PathBuf {
    dir.join(format!("{name}.toml"))
}

// Aggregate struct for convenience
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub animation: AnimationSettings,
    pub view: ViewSettings,
    pub placement: PlacementSettings,
}

impl Settings {
    pub fn load() -> Self {
        Self {
            animation: AnimationSettings::load(),
            view: ViewSettings::load(),
            placement: PlacementSettings::load(),
        }
    }

    pub fn save(&self) -> Result<(), RigError> {
        self.animation.save()?;
        self.view.save()?;
        self.placement.save()
    }

    /// Reads every section from `<dir>/<section>.toml`, writing defaults for
    /// missing files.
    pub fn load_from(dir: &Path) -> Result<Self, RigError> {
        let load = |name: &'static str| {
            let path = section_path(dir, name);
            move |e: confy::ConfyError| {
                RigError::from(e)
                    .with_arg("config", name)
                    .with_arg("path", path.display())
            }
        };
        Ok(Self {
            animation: confy::load_path(section_path(dir, "animation")).map_err(load("animation"))?,
            view: confy::load_path(section_path(dir, "view")).map_err(load("view"))?,
            placement: confy::load_path(section_path(dir, "placement")).map_err(load("placement"))?,
        })
    }

    pub fn save_in(&self, dir: &Path) -> Result<(), RigError> {
        confy::store_path(section_path(dir, "animation"), &self.animation)?;
        confy::store_path(section_path(dir, "view"), &self.view)?;
        confy::store_path(section_path(dir, "placement"), &self.placement)?;
        Ok(())
    }
}
