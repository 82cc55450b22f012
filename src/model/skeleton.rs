use crate::error::RigError;
use crate::model::joint::JointId;
use serde::{Deserialize, Serialize};

/// Unit primitive a bone is drawn with. Both span [0, 1] on every axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Cube,
    Wedge,
}

impl ShapeKind {
    /// Shape id as seen by the shader side
    pub fn id(self) -> u32 {
        match self {
            Self::Cube => 0,
            Self::Wedge => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub kind: ShapeKind,
    pub color: [f32; 4],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoneDef {
    pub name: String,
    pub parent: Option<usize>,
    pub offset: [f32; 3],
    pub joint: Option<JointId>,
    pub axis: [f32; 3],
    pub scale: [f32; 3],
    // Direction the bone is pushed along (times magnitude) while exploding
    pub burst: [f32; 3],
    pub expands: bool,
    pub shape: Option<Shape>,
}

impl Default for BoneDef {
    fn default() -> Self {
        Self {
            name: String::new(),
            parent: None,
            offset: [0.0, 0.0, 0.0],
            joint: None,
            axis: [0.0, 0.0, 1.0],
            scale: [1.0, 1.0, 1.0],
            burst: [0.0, 0.0, 0.0],
            expands: false,
            shape: None,
        }
    }
}

impl BoneDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn parent(mut self, parent: usize) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn offset(mut self, x: f32, y: f32, z: f32) -> Self {
        self.offset = [x, y, z];
        self
    }

    pub fn joint(mut self, joint: JointId, axis: [f32; 3]) -> Self {
        self.joint = Some(joint);
        self.axis = axis;
        self
    }

    pub fn scale(mut self, x: f32, y: f32, z: f32) -> Self {
        self.scale = [x, y, z];
        self
    }

    pub fn burst(mut self, x: f32, y: f32, z: f32) -> Self {
        self.burst = [x, y, z];
        self
    }

    pub fn expands(mut self) -> Self {
        self.expands = true;
        self
    }

    pub fn shape(mut self, kind: ShapeKind, color: [f32; 4]) -> Self {
        self.shape = Some(Shape { kind, color });
        self
    }
}

/// Fixed bone tree stored as an arena. Parents always precede their children,
/// so a single forward pass sees every parent before its descendants.
#[derive(Debug, Clone)]
pub struct Skeleton {
    bones: Vec<BoneDef>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
}

impl Skeleton {
    pub fn new(bones: Vec<BoneDef>) -> Result<Self, RigError> {
        let mut children = vec![Vec::new(); bones.len()];
        let mut roots = Vec::new();

        for (idx, bone) in bones.iter().enumerate() {
            match bone.parent {
                None => roots.push(idx),
                Some(parent) if parent < idx => children[parent].push(idx),
                Some(parent) => {
                    return Err(RigError::new("invalid-parent")
                        .with_arg("bone", &bone.name)
                        .with_arg("parent", parent));
                }
            }
        }

        Ok(Self {
            bones,
            children,
            roots,
        })
    }

    pub fn bones(&self) -> &[BoneDef] {
        &self.bones
    }

    pub fn bone(&self, index: usize) -> Option<&BoneDef> {
        self.bones.get(index)
    }

    pub fn children(&self, index: usize) -> &[usize] {
        self.children.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    pub fn find(&self, name: &str) -> Option<usize> {
        self.bones.iter().position(|bone| bone.name == name)
    }

    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    pub fn drawable_count(&self) -> usize {
        self.bones.iter().filter(|bone| bone.shape.is_some()).count()
    }

    /// Bone indices in depth-first authoring order
    pub fn depth_first(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.bones.len());
        let mut stack: Vec<usize> = self.roots.iter().rev().copied().collect();
        while let Some(idx) = stack.pop() {
            order.push(idx);
            stack.extend(self.children[idx].iter().rev().copied());
        }
        order
    }
}

/// Handle to a bone already added to a [`SkeletonBuilder`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoneRef(usize);

impl BoneRef {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Builds a skeleton in authoring order. Parents can only be named through
/// handles of bones added earlier, so the result is always well formed.
#[derive(Debug, Default)]
pub struct SkeletonBuilder {
    bones: Vec<BoneDef>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
}

impl SkeletonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&mut self, mut bone: BoneDef) -> BoneRef {
        bone.parent = None;
        let idx = self.insert(bone);
        self.roots.push(idx);
        BoneRef(idx)
    }

    pub fn child(&mut self, parent: BoneRef, mut bone: BoneDef) -> BoneRef {
        bone.parent = Some(parent.0);
        let idx = self.insert(bone);
        self.children[parent.0].push(idx);
        BoneRef(idx)
    }

    fn insert(&mut self, bone: BoneDef) -> usize {
        self.bones.push(bone);
        self.children.push(Vec::new());
        self.bones.len() - 1
    }

    pub fn build(self) -> Skeleton {
        Skeleton {
            bones: self.bones,
            children: self.children,
            roots: self.roots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_matches_validated_arena() {
        let mut builder = SkeletonBuilder::new();
        let root = builder.root(BoneDef::new("root"));
        let left = builder.child(root, BoneDef::new("left"));
        builder.child(root, BoneDef::new("right"));
        builder.child(left, BoneDef::new("left_tip"));
        let built = builder.build();

        let checked = Skeleton::new(built.bones().to_vec()).unwrap();
        assert_eq!(built.depth_first(), checked.depth_first());
        assert_eq!(built.bones()[3].parent, Some(left.index()));
    }

    #[test]
    fn forward_parent_reference_is_rejected() {
        let bones = vec![BoneDef::new("a").parent(1), BoneDef::new("b")];
        let err = Skeleton::new(bones).unwrap_err();
        assert_eq!(err.key, "invalid-parent");
        assert_eq!(err.args.get("bone").map(String::as_str), Some("a"));
    }

    #[test]
    fn depth_first_follows_authoring_order() {
        let bones = vec![
            BoneDef::new("root"),
            BoneDef::new("left").parent(0),
            BoneDef::new("right").parent(0),
            BoneDef::new("left_tip").parent(1),
        ];
        let skeleton = Skeleton::new(bones).unwrap();
        let names: Vec<_> = skeleton
            .depth_first()
            .into_iter()
            .map(|i| skeleton.bones()[i].name.as_str())
            .collect();
        assert_eq!(names, vec!["root", "left", "left_tip", "right"]);
    }
}
