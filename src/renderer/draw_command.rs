use crate::model::ShapeKind;
use nalgebra_glm as glm;
use serde::{Deserialize, Serialize};

/// One primitive for the rendering collaborator to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub bone: String,
    pub transform: glm::Mat4,
    pub color: [f32; 4],
    pub shape: ShapeKind,
}

impl DrawCommand {
    pub fn uniform(&self) -> DrawUniform {
        DrawUniform {
            model: self.transform.into(),
            color: self.color,
            shape_and_padding: [self.shape.id(), 0, 0, 0],
        }
    }

    pub fn record(&self) -> DrawRecord {
        DrawRecord {
            bone: self.bone.clone(),
            shape: self.shape,
            color: self.color,
            transform: self.transform.into(),
        }
    }
}

/// Per-draw uniform block, column-major model matrix
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawUniform {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub shape_and_padding: [u32; 4], // shape id + padding to 16 bytes
}

/// Packs a frame's commands into one upload-ready uniform buffer.
pub fn uniform_bytes(commands: &[DrawCommand]) -> Vec<u8> {
    let uniforms: Vec<DrawUniform> = commands.iter().map(DrawCommand::uniform).collect();
    bytemuck::cast_slice(&uniforms).to_vec()
}

/// Serializable copy of a draw command for frame dumps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawRecord {
    pub bone: String,
    pub shape: ShapeKind,
    pub color: [f32; 4],
    pub transform: [[f32; 4]; 4],
}
