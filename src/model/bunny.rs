// Hand-authored bunny rig. Units are model space, the body spans x in
// [-0.5, 0.5]; legs hang below y = -0.15 and the head sits at -x.

use crate::model::joint::JointId;
use crate::model::skeleton::{BoneDef, ShapeKind, Skeleton, SkeletonBuilder};
use nalgebra_glm as glm;

pub const GREY: [f32; 4] = [0.60, 0.60, 0.60, 1.0];
pub const DARK: [f32; 4] = [0.50, 0.50, 0.50, 1.0];
pub const PINK: [f32; 4] = [1.0, 0.6, 0.7, 1.0];
pub const WHITE: [f32; 4] = [0.95, 0.95, 0.95, 1.0];
pub const BLACK: [f32; 4] = [0.1, 0.1, 0.1, 1.0];

const AXIS_Y: [f32; 3] = [0.0, 1.0, 0.0];
const AXIS_Z: [f32; 3] = [0.0, 0.0, 1.0];

pub fn skeleton() -> Skeleton {
    let mut b = SkeletonBuilder::new();

    let root = b.root(BoneDef::new("body_frame"));

    b.child(
        root,
        BoneDef::new("body")
            .offset(-0.5, -0.2, -0.25)
            .scale(1.0, 0.45, 0.5)
            .burst(0.0, 1.0, 1.0)
            .expands()
            .shape(ShapeKind::Cube, GREY),
    );

    let neck = b.child(
        root,
        BoneDef::new("neck")
            .offset(-0.5, 0.25, -0.25)
            .burst(0.0, 1.0, 0.0),
    );
    b.child(
        neck,
        BoneDef::new("neck_wedge")
            .scale(0.25, 0.2, 0.5)
            .shape(ShapeKind::Wedge, GREY),
    );

    let head = b.child(
        neck,
        BoneDef::new("head")
            .offset(-0.1, 0.2, 0.25)
            .burst(-1.0, 0.0, 0.0)
            .joint(JointId::Head, AXIS_Y),
    );
    b.child(
        head,
        BoneDef::new("head_box")
            .offset(-0.15, 0.0, -0.25)
            .scale(0.35, 0.35, 0.5)
            .shape(ShapeKind::Cube, GREY),
    );
    b.child(
        head,
        BoneDef::new("snout")
            .offset(-0.3, 0.0, -0.25)
            .scale(0.15, 0.15, 0.5)
            .shape(ShapeKind::Cube, DARK),
    );
    b.child(
        head,
        BoneDef::new("nose")
            .offset(-0.31, 0.13, -0.05)
            .scale(0.04, 0.04, 0.1)
            .shape(ShapeKind::Cube, PINK),
    );
    b.child(
        head,
        BoneDef::new("eye_left")
            .offset(-0.05, 0.15, 0.255)
            .scale(0.1, 0.1, 0.02)
            .shape(ShapeKind::Cube, WHITE),
    );
    b.child(
        head,
        BoneDef::new("pupil_left")
            .offset(-0.02, 0.17, 0.27)
            .scale(0.05, 0.05, 0.02)
            .shape(ShapeKind::Cube, BLACK),
    );
    b.child(
        head,
        BoneDef::new("eye_right")
            .offset(-0.05, 0.15, -0.27)
            .scale(0.1, 0.1, 0.02)
            .shape(ShapeKind::Cube, WHITE),
    );
    b.child(
        head,
        BoneDef::new("pupil_right")
            .offset(-0.02, 0.17, -0.28)
            .scale(0.05, 0.05, 0.02)
            .shape(ShapeKind::Cube, BLACK),
    );

    // Linings are authored in the scaled space of their ear.
    let ear_left = b.child(
        head,
        BoneDef::new("ear_left")
            .offset(-0.05, 0.35, 0.1)
            .joint(JointId::Ear, AXIS_Z)
            .scale(0.1, 0.5, 0.1)
            .shape(ShapeKind::Cube, GREY),
    );
    b.child(
        ear_left,
        BoneDef::new("ear_left_lining")
            .offset(-0.1, 0.1, -0.05)
            .scale(1.1, 0.8, 0.1)
            .shape(ShapeKind::Cube, PINK),
    );
    let ear_right = b.child(
        head,
        BoneDef::new("ear_right")
            .offset(-0.05, 0.35, -0.2)
            .joint(JointId::Ear, AXIS_Z)
            .scale(0.1, 0.5, 0.1)
            .shape(ShapeKind::Cube, GREY),
    );
    b.child(
        ear_right,
        BoneDef::new("ear_right_lining")
            .offset(-0.1, 0.1, 0.95)
            .scale(1.1, 0.8, 0.1)
            .shape(ShapeKind::Cube, PINK),
    );

    b.child(
        root,
        BoneDef::new("tail")
            .offset(0.5, 0.15, -0.05)
            .burst(1.0, 0.0, 0.0)
            .joint(JointId::Tail, AXIS_Y)
            .scale(0.2, 0.2, 0.2)
            .shape(ShapeKind::Cube, WHITE),
    );

    let front_legs = [
        ("front_left", 0.09, 1.0, JointId::FrontLeftHip, JointId::FrontLeftKnee, JointId::FrontLeftFoot),
        ("front_right", -0.24, -1.0, JointId::FrontRightHip, JointId::FrontRightKnee, JointId::FrontRightFoot),
    ];
    for (side, z, burst_z, hip_joint, knee_joint, foot_joint) in front_legs {
        let hip = b.child(
            root,
            BoneDef::new(format!("{side}_hip"))
                .offset(-0.4, -0.15, z)
                .burst(-1.0, -1.0, burst_z)
                .joint(hip_joint, AXIS_Z),
        );
        b.child(
            hip,
            BoneDef::new(format!("{side}_upper"))
                .scale(0.15, -0.2, 0.15)
                .shape(ShapeKind::Cube, DARK),
        );
        let knee = b.child(
            hip,
            BoneDef::new(format!("{side}_knee"))
                .offset(0.0, -0.2, 0.0)
                .joint(knee_joint, AXIS_Z),
        );
        b.child(
            knee,
            BoneDef::new(format!("{side}_lower"))
                .offset(0.005, 0.0, 0.005)
                .scale(0.14, -0.15, 0.14)
                .shape(ShapeKind::Cube, DARK),
        );
        let ankle = b.child(
            knee,
            BoneDef::new(format!("{side}_ankle"))
                .offset(0.0, -0.15, 0.0)
                .joint(foot_joint, AXIS_Z),
        );
        b.child(
            ankle,
            BoneDef::new(format!("{side}_paw"))
                .offset(0.01, 0.0, 0.01)
                .scale(0.13, -0.1, 0.13)
                .shape(ShapeKind::Cube, WHITE),
        );
    }

    let back_legs = [
        ("back_left", 0.25, 1.0, JointId::BackLeftHip, JointId::BackLeftKnee),
        ("back_right", -0.4, -1.0, JointId::BackRightHip, JointId::BackRightKnee),
    ];
    for (side, z, burst_z, hip_joint, knee_joint) in back_legs {
        let hip = b.child(
            root,
            BoneDef::new(format!("{side}_hip"))
                .offset(0.35, -0.1, z)
                .burst(1.0, -1.0, burst_z)
                .joint(hip_joint, AXIS_Z),
        );
        b.child(
            hip,
            BoneDef::new(format!("{side}_thigh"))
                .offset(-0.15, -0.35, -0.05)
                .scale(0.3, 0.35, 0.25)
                .shape(ShapeKind::Cube, DARK),
        );
        let hock = b.child(
            hip,
            BoneDef::new(format!("{side}_hock"))
                .offset(-0.1, -0.35, 0.0)
                .joint(knee_joint, AXIS_Z),
        );
        b.child(
            hock,
            BoneDef::new(format!("{side}_foot"))
                .offset(-0.05, -0.15, 0.05)
                .scale(0.2, 0.15, 0.15)
                .shape(ShapeKind::Cube, WHITE),
        );
    }

    b.build()
}

/// Placement of the bunny inside the voxel world: a little below eye level,
/// two units ahead of the spawn point, turned to face the camera.
pub fn world_anchor() -> glm::Mat4 {
    let m = glm::translate(&glm::identity::<f32, 4>(), &glm::vec3(0.0, -0.15, -2.0));
    glm::rotate(&m, 180.0_f32.to_radians(), &glm::vec3(0.0, 1.0, 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bunny_has_unique_bone_names() {
        let skeleton = skeleton();
        let mut names: Vec<_> = skeleton.bones().iter().map(|b| b.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), skeleton.bone_count());
    }

    #[test]
    fn every_joint_drives_at_least_one_bone() {
        let skeleton = skeleton();
        for joint in JointId::ALL {
            assert!(
                skeleton.bones().iter().any(|b| b.joint == Some(joint)),
                "joint {} drives nothing",
                joint.name()
            );
        }
    }

    #[test]
    fn ears_share_one_joint() {
        let skeleton = skeleton();
        let ears = skeleton
            .bones()
            .iter()
            .filter(|b| b.joint == Some(JointId::Ear))
            .count();
        assert_eq!(ears, 2);
    }

    #[test]
    fn only_the_body_expands() {
        let skeleton = skeleton();
        let expanding: Vec<_> = skeleton
            .bones()
            .iter()
            .filter(|b| b.expands)
            .map(|b| b.name.as_str())
            .collect();
        assert_eq!(expanding, vec!["body"]);
    }

    #[test]
    fn head_hangs_off_the_neck() {
        let skeleton = skeleton();
        let head = skeleton.find("head").unwrap();
        let neck = skeleton.find("neck").unwrap();
        assert_eq!(skeleton.bones()[head].parent, Some(neck));
    }
}
