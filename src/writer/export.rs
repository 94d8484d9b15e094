//! Pushes extruded meshes, skins and clips into a [`SceneBuilder`].

use std::collections::BTreeMap;

use glam::Vec3;
use gltf::json::accessor::{ComponentType, Type};
use gltf::json::animation::Interpolation;
use gltf::json::buffer::Target;
use gltf::json::mesh::{Mode, Primitive, Semantic};
use gltf::json::scene::UnitQuaternion;
use gltf::json::validation::Checked::{self, Valid};
use gltf::json::{self, Index};
use log::warn;

use crate::animation::{AnimationClip, Interpolatable, KeyframeTrack, Sampler};
use crate::resources::SkinnedMesh;
use crate::scene::{Joint, Skin};
use crate::settings::SceneSettings;
use crate::writer::builder::{SceneBuilder, accessor};

/// Indices of what [`write_skinned_mesh`] added.
#[derive(Debug, Clone, Default)]
pub struct SkinnedMeshHandle {
    /// Node of each joint, in skin order.
    pub joint_nodes: Vec<Index<json::Node>>,
    pub mesh: Option<Index<json::Mesh>>,
    pub mesh_node: Option<Index<json::Node>>,
    pub skin: Option<Index<json::Skin>>,
}

impl SkinnedMeshHandle {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mesh.is_none()
    }
}

fn joint_node(joint: &Joint) -> json::Node {
    json::Node {
        name: Some(joint.name.clone()),
        translation: Some(joint.pose.position.to_array()),
        rotation: Some(UnitQuaternion(joint.pose.rotation.to_array())),
        ..json::Node::default()
    }
}

type Attributes = BTreeMap<Checked<Semantic>, Index<json::Accessor>>;

fn single_primitive_mesh(name: &str, attributes: Attributes, indices: Option<Index<json::Accessor>>, mode: Mode) -> json::Mesh {
    json::Mesh {
        extensions: Default::default(),
        extras: Default::default(),
        name: Some(name.to_string()),
        primitives: vec![Primitive {
            attributes,
            extensions: Default::default(),
            extras: Default::default(),
            indices,
            material: None,
            mode: Valid(mode),
            targets: None,
        }],
        weights: None,
    }
}

/// Writes the joints (in their current pose), the skin and the mesh.
///
/// An empty mesh writes nothing.
pub fn write_skinned_mesh(builder: &mut SceneBuilder, mesh: &SkinnedMesh, skin: &Skin, settings: &SceneSettings) -> SkinnedMeshHandle {
    if mesh.is_empty() {
        return SkinnedMeshHandle::default();
    }

    let joint_nodes: Vec<Index<json::Node>> = skin.joints.iter().map(|j| builder.add_root_node(joint_node(j))).collect();

    let ibm: Vec<f32> = skin
        .inverse_bind_matrices()
        .iter()
        .flat_map(|m| m.to_cols_array())
        .collect();
    let ibm_accessor = builder.push_f32_accessor(&ibm, Type::Mat4, None, false);

    let skin_index = builder.add_skin(json::Skin {
        extensions: Default::default(),
        extras: Default::default(),
        inverse_bind_matrices: Some(ibm_accessor),
        joints: joint_nodes.clone(),
        name: Some(settings.skin_name.clone()),
        skeleton: skin.root_joint().and_then(|i| joint_nodes.get(i).copied()),
    });

    let mut attributes = BTreeMap::new();
    attributes.insert(Valid(Semantic::Positions), builder.push_positions(&mesh.positions));

    let joints_view = builder.push_buffer_view(bytemuck::cast_slice(&mesh.joints), Some(Target::ArrayBuffer));
    let joints = builder.push_accessor(accessor(joints_view, ComponentType::U16, Type::Vec4, mesh.joints.len()));
    attributes.insert(Valid(Semantic::Joints(0)), joints);

    let weights = builder.push_f32_accessor(bytemuck::cast_slice(&mesh.weights), Type::Vec4, Some(Target::ArrayBuffer), false);
    attributes.insert(Valid(Semantic::Weights(0)), weights);

    let texcoords = builder.push_f32_accessor(bytemuck::cast_slice(&mesh.texcoords), Type::Vec2, Some(Target::ArrayBuffer), false);
    attributes.insert(Valid(Semantic::TexCoords(0)), texcoords);

    let indices_view = builder.push_buffer_view(bytemuck::cast_slice(&mesh.indices), Some(Target::ElementArrayBuffer));
    let bounds = mesh
        .indices
        .iter()
        .fold(None, |acc: Option<(u16, u16)>, &i| Some(acc.map_or((i, i), |(lo, hi)| (lo.min(i), hi.max(i)))));
    let indices = builder.push_accessor(json::Accessor {
        min: bounds.map(|(lo, _)| json::Value::from(vec![lo])),
        max: bounds.map(|(_, hi)| json::Value::from(vec![hi])),
        ..accessor(indices_view, ComponentType::U16, Type::Scalar, mesh.indices.len())
    });

    let mesh_index = builder.add_mesh(single_primitive_mesh(&settings.mesh_name, attributes, Some(indices), Mode::Triangles));

    let mesh_node = builder.add_root_node(json::Node {
        name: Some(format!("{}Node", settings.mesh_name)),
        mesh: Some(mesh_index),
        skin: Some(skin_index),
        ..json::Node::default()
    });

    SkinnedMeshHandle {
        joint_nodes,
        mesh: Some(mesh_index),
        mesh_node: Some(mesh_node),
        skin: Some(skin_index),
    }
}

fn push_track<T: Interpolatable>(builder: &mut SceneBuilder, track: &KeyframeTrack<T>) -> json::animation::Sampler {
    let input = builder.push_f32_accessor(&track.times, Type::Scalar, None, true);
    let output = builder.push_f32_accessor(&track.flat_values(), T::ACCESSOR_TYPE, None, false);
    json::animation::Sampler {
        extensions: Default::default(),
        extras: Default::default(),
        input,
        interpolation: Valid(Interpolation::Linear),
        output,
    }
}

/// Writes `clip` targeting the joint nodes of `handle`. Returns the animation index.
///
/// Channels whose joint has no node are dropped with a warning.
pub fn write_animation(builder: &mut SceneBuilder, clip: &AnimationClip, handle: &SkinnedMeshHandle) -> Index<json::Animation> {
    let samplers = clip
        .samplers
        .iter()
        .map(|sampler| match sampler {
            Sampler::Translation(track) => push_track(builder, track),
            Sampler::Rotation(track) => push_track(builder, track),
        })
        .collect();

    let channels = clip
        .channels
        .iter()
        .filter_map(|channel| {
            let joint = channel.target.joint;
            let Some(&node) = handle.joint_nodes.get(usize::from(joint)) else {
                warn!("Animation '{}': joint {joint} has no node, channel dropped", clip.name);
                return None;
            };
            Some(json::animation::Channel {
                sampler: Index::new(channel.sampler as u32),
                target: json::animation::Target {
                    extensions: Default::default(),
                    extras: Default::default(),
                    node,
                    path: Valid(channel.target.path.property()),
                },
                extensions: Default::default(),
                extras: Default::default(),
            })
        })
        .collect();

    builder.add_animation(json::Animation {
        extensions: Default::default(),
        extras: Default::default(),
        channels,
        name: Some(clip.name.clone()),
        samplers,
    })
}

/// Writes an unskinned polyline as its own root node. `None` for fewer than two points.
pub fn write_line_strip(builder: &mut SceneBuilder, points: &[Vec3], name: &str) -> Option<Index<json::Node>> {
    if points.len() < 2 {
        return None;
    }

    let position = builder.push_positions(points);
    let attributes = BTreeMap::from([(Valid(Semantic::Positions), position)]);
    let mesh = builder.add_mesh(single_primitive_mesh(name, attributes, None, Mode::LineStrip));

    Some(builder.add_root_node(json::Node {
        name: Some(name.to_string()),
        mesh: Some(mesh),
        ..json::Node::default()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{AnimationEncoder, ChannelTarget, TargetPath};
    use crate::scene::BindPose;
    use glam::{Mat3, Quat, Vec2};
    use gltf::json::accessor::GenericComponentType;
    use gltf::json::animation::Property;

    fn single_triangle() -> (SkinnedMesh, Skin) {
        let mut mesh = SkinnedMesh::new();
        let a = mesh.push_vertex(Vec3::ZERO, 0, Vec2::ZERO);
        let b = mesh.push_vertex(Vec3::X, 1, Vec2::X);
        let c = mesh.push_vertex(Vec3::Y, 1, Vec2::Y);
        mesh.push_triangle([a, b, c]);

        let poses: Vec<BindPose> = [Vec3::ZERO, Vec3::X]
            .iter()
            .enumerate()
            .map(|(i, &t)| BindPose {
                name: format!("j{i}"),
                translation: t,
                orientation: Mat3::IDENTITY,
            })
            .collect();
        (mesh, Skin::bind("skin", &poses))
    }

    fn values<T>(indices: &[Index<T>]) -> Vec<usize> {
        indices.iter().map(|i| i.value()).collect()
    }

    #[test]
    fn skinned_mesh_layout() {
        let (mesh, skin) = single_triangle();
        let mut builder = SceneBuilder::new();
        let handle = write_skinned_mesh(&mut builder, &mesh, &skin, &SceneSettings::default());
        let doc = builder.finish();

        assert_eq!(values(&handle.joint_nodes), vec![0, 1]);
        assert_eq!(handle.mesh_node.map(|n| n.value()), Some(2));
        let skin_def = &doc.root.skins[0];
        assert_eq!(values(&skin_def.joints), vec![0, 1]);
        assert_eq!(skin_def.skeleton.map(|n| n.value()), Some(0));

        let primitive = &doc.root.meshes[0].primitives[0];
        let joints = &doc.root.accessors[primitive.attributes[&Valid(Semantic::Joints(0))].value()];
        assert!(matches!(joints.component_type, Valid(GenericComponentType(ComponentType::U16))));
        assert!(matches!(joints.type_, Valid(Type::Vec4)));
        let indices = &doc.root.accessors[primitive.indices.unwrap().value()];
        assert_eq!(indices.count.0, 3);
        assert_eq!(indices.max, Some(json::Value::from(vec![2_u16])));
        assert_eq!(values(&doc.root.scenes[0].nodes), vec![0, 1, 2]);
    }

    #[test]
    fn empty_mesh_writes_nothing() {
        let mut builder = SceneBuilder::new();
        let handle = write_skinned_mesh(&mut builder, &SkinnedMesh::new(), &Skin::default(), &SceneSettings::default());
        assert!(handle.is_empty());
        assert_eq!(builder.node_count(), 0);
    }

    #[test]
    fn animation_targets_joint_nodes() {
        let (mesh, skin) = single_triangle();
        let mut builder = SceneBuilder::new();
        let handle = write_skinned_mesh(&mut builder, &mesh, &skin, &SceneSettings::default());

        let mut encoder = AnimationEncoder::default();
        encoder.record(1, 0.0, Some(Vec3::X), Some(Quat::IDENTITY)).unwrap();
        encoder.record(1, 0.1, Some(Vec3::Y), Some(Quat::from_rotation_z(0.1))).unwrap();
        let clip = encoder.finalize().unwrap().unwrap();
        assert_eq!(clip.channels[0].target, ChannelTarget { joint: 1, path: TargetPath::Translation });

        let index = write_animation(&mut builder, &clip, &handle);
        let doc = builder.finish();
        let animation = &doc.root.animations[index.value()];

        assert_eq!(animation.channels.len(), 2);
        assert_eq!(animation.channels[0].target.node.value(), 1);
        assert!(matches!(animation.channels[1].target.path, Valid(Property::Rotation)));
        let output = &doc.root.accessors[animation.samplers[1].output.value()];
        assert!(matches!(output.type_, Valid(Type::Vec4)));
        assert_eq!(output.count.0, 2);
        let input = &doc.root.accessors[animation.samplers[0].input.value()];
        assert_eq!(input.max, Some(json::Value::from(vec![0.1_f32])));
    }

    #[test]
    fn dangling_joint_channels_are_dropped() {
        let (mesh, skin) = single_triangle();
        let mut builder = SceneBuilder::new();
        let handle = write_skinned_mesh(&mut builder, &mesh, &skin, &SceneSettings::default());

        let mut encoder = AnimationEncoder::default();
        encoder.record(7, 0.0, Some(Vec3::X), None).unwrap();
        let clip = encoder.finalize().unwrap().unwrap();

        let index = write_animation(&mut builder, &clip, &handle);
        let doc = builder.finish();
        assert!(doc.root.animations[index.value()].channels.is_empty());
    }

    #[test]
    fn line_strip_needs_two_points() {
        let mut builder = SceneBuilder::new();
        assert!(write_line_strip(&mut builder, &[Vec3::ZERO], "line").is_none());
        let node = write_line_strip(&mut builder, &[Vec3::ZERO, Vec3::X], "line").unwrap();
        let doc = builder.finish();
        assert!(matches!(doc.root.meshes[0].primitives[0].mode, Valid(Mode::LineStrip)));
        assert_eq!(values(&doc.root.scenes[0].nodes), vec![node.value()]);
    }
}
