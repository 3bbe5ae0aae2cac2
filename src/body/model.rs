// body/model.rs: scene graph, part registries and the primitive builders.
use glam::{Mat4, Vec3};
use std::collections::HashMap;
use std::fmt;
use crate::error::{ModelError, Result};
use super::geometry::{span_transform, Shape, Transform};
use super::mesh::TriMesh;

pub type NodeId = usize;
pub type PartId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind { Bone, Muscle }

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self { PartKind::Bone => "bone", PartKind::Muscle => "muscle" })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaterialState { #[default] Normal, Active }

/// Where a part hangs in the scene graph.
#[derive(Debug, Clone, PartialEq)]
pub enum ParentRelation { Group(String), ChildOf(String) }

/// Anchor points a muscle was built between, in muscle-group space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MuscleSpan { pub start: Vec3, pub end: Vec3 }

#[derive(Debug, Clone)]
pub struct BodyPart {
    pub name:       String,
    pub kind:       PartKind,
    pub parent:     ParentRelation,
    /// Node carrying the part's own transform.
    pub node:       NodeId,
    /// Every rendered primitive whose material follows this part, `node` included.
    pub primitives: Vec<NodeId>,
    pub state:      MaterialState,
    pub span:       Option<MuscleSpan>,
}

impl BodyPart {
    pub fn is_active(&self) -> bool { self.state == MaterialState::Active }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub label:  String,
    pub parent: Option<NodeId>,
    pub local:  Transform,
    pub mesh:   Option<TriMesh>,
    pub owner:  Option<PartId>,
}

/// Name → part lookup for one part kind; iteration follows registration order.
#[derive(Debug, Clone, Default)]
pub struct PartRegistry { index: HashMap<String, PartId>, order: Vec<PartId> }

impl PartRegistry {
    pub fn get(&self, name: &str) -> Option<PartId> { self.index.get(name).copied() }
    pub fn contains(&self, name: &str) -> bool { self.index.contains_key(name) }
    pub fn ids(&self) -> &[PartId] { &self.order }
    pub fn len(&self) -> usize { self.order.len() }
}

/// The container groups every part ultimately hangs from.
#[derive(Debug, Clone, Copy)]
pub struct Groups { pub bones: NodeId, pub muscles: NodeId }

#[derive(Debug, Clone)]
pub struct BodyModel {
    nodes:   Vec<Node>,
    parts:   Vec<BodyPart>,
    bones:   PartRegistry,
    muscles: PartRegistry,
    groups:  Groups,
}

impl BodyModel {
    /// An empty figure: the root container plus the bone and muscle groups.
    pub fn empty() -> Self {
        let mut m = Self {
            nodes: Vec::new(), parts: Vec::new(),
            bones: PartRegistry::default(), muscles: PartRegistry::default(),
            groups: Groups { bones: 0, muscles: 0 },
        };
        let figure = m.add_group("figure", None, Transform::default());
        m.groups = Groups {
            bones:   m.add_group("bones", Some(figure), Transform::default()),
            muscles: m.add_group("muscles", Some(figure), Transform::default()),
        };
        m
    }

    // ── Construction ─────────────────────────────────────────────────────────

    pub fn add_group(&mut self, label: &str, parent: Option<NodeId>, local: Transform) -> NodeId {
        self.push_node(Node { label: label.into(), parent, local, mesh: None, owner: None })
    }

    /// Shaft of `0.6 * radius` with spherical joint caps of `radius` at both ends.
    /// `parent` defaults to the bone group.
    pub fn build_bone(&mut self, name: &str, length: f32, radius: f32,
                      position: Vec3, rotation: [f32; 3], parent: Option<NodeId>) -> Result<PartId> {
        let cap = Shape::Sphere { radius };
        cap.validate(name)?;
        let shaft = Shape::Cylinder { radius: radius * 0.6, height: length };
        let id = self.register_bone(name, shaft, Transform::from_euler(position, rotation), parent)?;
        let node = self.parts[id].node;
        for y in [length * 0.5, -length * 0.5] {
            self.attach_decoration(id, cap, Transform::at(Vec3::Y * y), Some(node))?;
        }
        Ok(id)
    }

    /// Registers a bone drawn as a single arbitrary primitive.
    pub fn register_bone(&mut self, name: &str, shape: Shape, local: Transform, parent: Option<NodeId>) -> Result<PartId> {
        let parent = parent.unwrap_or(self.groups.bones);
        self.register(name, PartKind::Bone, shape, local, parent, None)
    }

    /// Capsule of radius `thickness` spanning `start` → `end`, in the muscle group.
    pub fn build_muscle(&mut self, name: &str, start: Vec3, end: Vec3, thickness: f32) -> Result<PartId> {
        let (local, length) = span_transform(name, start, end)?;
        let span = MuscleSpan { start, end };
        let muscles = self.groups.muscles;
        self.register(name, PartKind::Muscle, Shape::Capsule { radius: thickness, length }, local, muscles, Some(span))
    }

    /// Unregistered primitive whose material follows `owner`. `parent` defaults
    /// to the owner's node.
    pub fn attach_decoration(&mut self, owner: PartId, shape: Shape, local: Transform, parent: Option<NodeId>) -> Result<NodeId> {
        let part = &self.parts[owner];
        let label = format!("{}:decoration", part.name);
        shape.validate(&label)?;
        local.validate(&label)?;
        let parent = parent.unwrap_or(part.node);
        let node = self.push_node(Node {
            label, parent: Some(parent), local,
            mesh: Some(TriMesh::from_shape(&shape)), owner: Some(owner),
        });
        self.parts[owner].primitives.push(node);
        Ok(node)
    }

    fn register(&mut self, name: &str, kind: PartKind, shape: Shape, local: Transform,
                parent: NodeId, span: Option<MuscleSpan>) -> Result<PartId> {
        shape.validate(name)?;
        local.validate(name)?;
        if self.registry(kind).contains(name) {
            return Err(ModelError::DuplicatePart { kind, name: name.to_string() });
        }
        let id = self.parts.len();
        let node = self.push_node(Node {
            label: name.into(), parent: Some(parent), local,
            mesh: Some(TriMesh::from_shape(&shape)), owner: Some(id),
        });
        let parent_rel = match self.nodes[parent].owner {
            Some(p) => ParentRelation::ChildOf(self.parts[p].name.clone()),
            None    => ParentRelation::Group(self.nodes[parent].label.clone()),
        };
        self.parts.push(BodyPart {
            name: name.into(), kind, parent: parent_rel, node,
            primitives: vec![node], state: MaterialState::Normal, span,
        });
        let reg = match kind { PartKind::Bone => &mut self.bones, PartKind::Muscle => &mut self.muscles };
        reg.index.insert(name.into(), id);
        reg.order.push(id);
        Ok(id)
    }

    fn push_node(&mut self, node: Node) -> NodeId {
        debug_assert!(node.parent.map_or(true, |p| p < self.nodes.len()));
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    // ── Presentation ─────────────────────────────────────────────────────────

    /// Pulls the bone and muscle groups apart along X, `distance / 2` each way.
    pub fn set_group_separation(&mut self, distance: f32) {
        let half = if distance.is_finite() { distance * 0.5 } else { 0.0 };
        self.nodes[self.groups.bones].local.translation.x = -half;
        self.nodes[self.groups.muscles].local.translation.x = half;
    }

    #[cfg(test)]
    pub fn group_offsets(&self) -> (Vec3, Vec3) {
        (self.nodes[self.groups.bones].local.translation, self.nodes[self.groups.muscles].local.translation)
    }

    pub(crate) fn set_state(&mut self, id: PartId, state: MaterialState) { self.parts[id].state = state; }

    // ── Lookup ───────────────────────────────────────────────────────────────

    pub fn registry(&self, kind: PartKind) -> &PartRegistry {
        match kind { PartKind::Bone => &self.bones, PartKind::Muscle => &self.muscles }
    }
    pub fn part(&self, kind: PartKind, name: &str) -> Option<&BodyPart> {
        self.registry(kind).get(name).map(|id| &self.parts[id])
    }
    #[cfg(test)]
    pub fn bone(&self, name: &str) -> Option<&BodyPart>   { self.part(PartKind::Bone, name) }
    #[cfg(test)]
    pub fn muscle(&self, name: &str) -> Option<&BodyPart> { self.part(PartKind::Muscle, name) }
    pub fn part_by_id(&self, id: PartId) -> &BodyPart { &self.parts[id] }
    pub fn parts(&self) -> &[BodyPart] { &self.parts }
    pub fn nodes(&self) -> &[Node] { &self.nodes }
    pub fn groups(&self) -> Groups { self.groups }

    #[cfg(test)]
    pub fn part_state(&self, kind: PartKind, name: &str) -> Option<MaterialState> {
        self.part(kind, name).map(|p| p.state)
    }

    /// Material state a primitive is drawn with: its owner's.
    pub fn primitive_state(&self, node: NodeId) -> MaterialState {
        self.nodes[node].owner.map_or(MaterialState::Normal, |p| self.parts[p].state)
    }

    /// Model-space matrix of every node, `root` applied above the figure container.
    pub fn world_matrices(&self, root: Mat4) -> Vec<Mat4> {
        let mut out: Vec<Mat4> = Vec::with_capacity(self.nodes.len());
        for n in &self.nodes {
            let parent = n.parent.map_or(root, |p| out[p]);
            out.push(parent * n.local.matrix());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn bone_owns_shaft_and_caps() {
        let mut m = BodyModel::empty();
        let id = m.build_bone("femur_L", 12.0, 1.0, Vec3::new(-3.0, 3.0, 0.0), [0.0, 0.0, 0.1], None).unwrap();
        let part = m.part_by_id(id);
        assert_eq!(part.primitives.len(), 3);
        assert_eq!(part.parent, ParentRelation::Group("bones".into()));
        assert!(part.primitives.iter().all(|&n| m.nodes()[n].owner == Some(id)));
        let shaft = m.nodes()[part.node].mesh.as_ref().unwrap();
        let top = shaft.positions.iter().map(|p| p.y).fold(f32::MIN, f32::max);
        let widest = shaft.positions.iter().map(|p| p.x.hypot(p.z)).fold(0.0, f32::max);
        assert_relative_eq!(top, 6.0, epsilon = 1e-5);
        assert_relative_eq!(widest, 0.6, epsilon = 1e-5);
    }

    #[test]
    fn muscle_keeps_its_anchors() {
        let mut m = BodyModel::empty();
        let (start, end) = (Vec3::new(-3.0, 8.0, 1.0), Vec3::new(-4.0, -2.0, 1.0));
        let id = m.build_muscle("quadriceps_L", start, end, 2.0).unwrap();
        assert_eq!(m.part_by_id(id).span, Some(MuscleSpan { start, end }));
        assert_eq!(m.part_by_id(id).parent, ParentRelation::Group("muscles".into()));
        let bone = m.build_bone("femur_L", 12.0, 1.0, Vec3::ZERO, [0.0; 3], None).unwrap();
        assert_eq!(m.part_by_id(bone).span, None);
    }

    #[test]
    fn duplicate_names_rejected_per_kind() {
        let mut m = BodyModel::empty();
        m.build_bone("spine", 12.0, 0.8, Vec3::ZERO, [0.0; 3], None).unwrap();
        let err = m.build_bone("spine", 3.0, 0.8, Vec3::ZERO, [0.0; 3], None).unwrap_err();
        assert!(matches!(err, ModelError::DuplicatePart { kind: PartKind::Bone, .. }));
        // Same name in the other registry is fine.
        m.build_muscle("spine", Vec3::ZERO, Vec3::Y, 1.0).unwrap();
        assert_eq!((m.registry(PartKind::Bone).len(), m.registry(PartKind::Muscle).len()), (1, 1));
    }

    #[test]
    fn invalid_dimensions_rejected() {
        let mut m = BodyModel::empty();
        assert!(m.build_bone("x", -1.0, 1.0, Vec3::ZERO, [0.0; 3], None).is_err());
        assert!(m.build_bone("x", 1.0, 0.0, Vec3::ZERO, [0.0; 3], None).is_err());
        assert!(m.build_bone("x", 1.0, 1.0, Vec3::splat(f32::NAN), [0.0; 3], None).is_err());
        assert!(m.build_muscle("m", Vec3::ZERO, Vec3::ZERO, 1.0).is_err());
        assert!(m.build_muscle("m", Vec3::ZERO, Vec3::Y, 0.0).is_err());
        assert!(m.parts().is_empty());
    }

    #[test]
    fn world_matrices_compose_parents() {
        let mut m = BodyModel::empty();
        let g = m.add_group("pelvis", Some(m.groups().bones), Transform::at(Vec3::new(0.0, 10.0, 0.0)));
        let id = m.build_bone("hips", 4.0, 1.5, Vec3::ZERO, [0.0, 0.0, std::f32::consts::FRAC_PI_2], Some(g)).unwrap();
        let part = m.part_by_id(id);
        assert_eq!(part.parent, ParentRelation::Group("pelvis".into()));
        let world = m.world_matrices(Mat4::IDENTITY);
        let top_cap = part.primitives[1];
        let p = world[top_cap].transform_point3(Vec3::ZERO);
        assert_relative_eq!(p.x, -2.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 10.0, epsilon = 1e-5);
    }

    #[test]
    fn separation_moves_groups_symmetrically() {
        let mut m = BodyModel::empty();
        m.set_group_separation(10.0);
        let (b, mu) = m.group_offsets();
        assert_relative_eq!(b.x, -5.0);
        assert_relative_eq!(mu.x, 5.0);
        m.set_group_separation(10.0);
        assert_eq!(m.group_offsets(), (b, mu));
        m.set_group_separation(0.0);
        let (b, mu) = m.group_offsets();
        assert_eq!(b, mu);
        assert_relative_eq!(b.x, 0.0);
    }
}
