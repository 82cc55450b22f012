// Depth-first pose composition over the bone arena

use crate::model::{BoneDef, JointValues, Skeleton};
use crate::renderer::DrawCommand;
use nalgebra_glm as glm;

use super::interpolation::compose_local;

/// Local transform of one bone for the given pose and explosion magnitude.
pub fn local_transform(
    parent: &glm::Mat4,
    bone: &BoneDef,
    pose: &JointValues,
    magnitude: f32,
) -> glm::Mat4 {
    let offset = glm::make_vec3(&bone.offset);
    let burst = glm::make_vec3(&bone.burst);
    let translation = offset + burst * magnitude;

    let axis = glm::make_vec3(&bone.axis);
    let rotation = bone.joint.map(|joint| (pose[joint], &axis));

    let mut scaling = glm::make_vec3(&bone.scale);
    if bone.expands {
        scaling *= 1.0 + magnitude;
    }

    compose_local(parent, &translation, rotation, &scaling)
}

/// Accumulated transform of every bone, indexed like the arena
pub fn world_transforms(
    skeleton: &Skeleton,
    pose: &JointValues,
    magnitude: f32,
    root: &glm::Mat4,
) -> Vec<glm::Mat4> {
    let bones = skeleton.bones();
    let mut world: Vec<glm::Mat4> = Vec::with_capacity(bones.len());
    // Parents precede children in the arena, so their slot is already filled.
    for bone in bones {
        let parent = bone.parent.map(|p| world[p]).unwrap_or(*root);
        world.push(local_transform(&parent, bone, pose, magnitude));
    }
    world
}

/// Draw commands for every bone with geometry, in depth-first authoring order
pub fn collect_draws(
    skeleton: &Skeleton,
    pose: &JointValues,
    magnitude: f32,
    root: &glm::Mat4,
) -> Vec<DrawCommand> {
    let world = world_transforms(skeleton, pose, magnitude, root);
    skeleton
        .depth_first()
        .into_iter()
        .filter_map(|idx| {
            let bone = &skeleton.bones()[idx];
            bone.shape.map(|shape| DrawCommand {
                bone: bone.name.clone(),
                transform: world[idx],
                color: shape.color,
                shape: shape.kind,
            })
        })
        .collect()
}
