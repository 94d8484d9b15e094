use glam::Vec3;
use gltf::json::accessor::{ComponentType, GenericComponentType, Type};
use gltf::json::buffer::Target;
use gltf::json::validation::Checked::Valid;
use gltf::json::validation::USize64;
use gltf::json::{self, Index};

use crate::writer::glb::{GltfDocument, align_to_4bytes};

const GENERATOR: &str = concat!("elastica ", env!("CARGO_PKG_VERSION"));

/// Appends `item` and returns its typed index.
fn push<T>(items: &mut Vec<T>, item: T) -> Index<T> {
    items.push(item);
    Index::new((items.len() - 1) as u32)
}

/// Scalars per element of an accessor type.
fn component_count(kind: &Type) -> usize {
    match kind {
        Type::Scalar => 1,
        Type::Vec2 => 2,
        Type::Vec3 => 3,
        Type::Vec4 | Type::Mat2 => 4,
        Type::Mat3 => 9,
        Type::Mat4 => 16,
    }
}

/// Accessor over a whole buffer view, without bounds.
#[must_use]
pub fn accessor(view: Index<json::buffer::View>, component_type: ComponentType, kind: Type, count: usize) -> json::Accessor {
    json::Accessor {
        buffer_view: Some(view),
        byte_offset: None,
        count: USize64::from(count),
        component_type: Valid(GenericComponentType(component_type)),
        extensions: Default::default(),
        extras: Default::default(),
        type_: Valid(kind),
        min: None,
        max: None,
        name: None,
        normalized: false,
        sparse: None,
    }
}

/// Explicit glTF document builder.
///
/// Every `push_*`/`add_*` appends to the document and returns the index of
/// the new entry. Binary data is packed into a single buffer, each view
/// starting on a 4-byte boundary.
#[derive(Debug, Clone)]
pub struct SceneBuilder {
    root: json::Root,
    bin: Vec<u8>,
    scene_nodes: Vec<Index<json::Node>>,
}

impl Default for SceneBuilder {
    fn default() -> Self {
        let root = json::Root {
            asset: json::Asset {
                generator: Some(GENERATOR.to_string()),
                ..json::Asset::default()
            },
            ..json::Root::default()
        };
        Self {
            root,
            bin: Vec::new(),
            scene_nodes: Vec::new(),
        }
    }
}

impl SceneBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends raw bytes as a new buffer view.
    pub fn push_buffer_view(&mut self, bytes: &[u8], target: Option<Target>) -> Index<json::buffer::View> {
        align_to_4bytes(&mut self.bin, 0);
        let byte_offset = self.bin.len();
        self.bin.extend_from_slice(bytes);

        push(
            &mut self.root.buffer_views,
            json::buffer::View {
                buffer: Index::new(0),
                byte_length: USize64::from(bytes.len()),
                byte_offset: Some(USize64::from(byte_offset)),
                byte_stride: None,
                name: None,
                target: target.map(Valid),
                extensions: Default::default(),
                extras: Default::default(),
            },
        )
    }

    pub fn push_accessor(&mut self, accessor: json::Accessor) -> Index<json::Accessor> {
        push(&mut self.root.accessors, accessor)
    }

    /// Float accessor over `data`, interpreted as elements of `kind`.
    ///
    /// With `bounds`, per-component min/max are recorded.
    pub fn push_f32_accessor(&mut self, data: &[f32], kind: Type, target: Option<Target>, bounds: bool) -> Index<json::Accessor> {
        let components = component_count(&kind);
        let view = self.push_buffer_view(bytemuck::cast_slice(data), target);
        let (min, max) = if bounds {
            component_bounds(data, components)
                .map(|(lo, hi)| (json::Value::from(lo), json::Value::from(hi)))
                .unzip()
        } else {
            (None, None)
        };
        self.push_accessor(json::Accessor {
            min,
            max,
            ..accessor(view, ComponentType::F32, kind, data.len() / components)
        })
    }

    pub fn push_positions(&mut self, positions: &[Vec3]) -> Index<json::Accessor> {
        self.push_f32_accessor(bytemuck::cast_slice(positions), Type::Vec3, Some(Target::ArrayBuffer), true)
    }

    pub fn add_node(&mut self, node: json::Node) -> Index<json::Node> {
        push(&mut self.root.nodes, node)
    }

    /// Adds a node and lists it among the scene roots.
    pub fn add_root_node(&mut self, node: json::Node) -> Index<json::Node> {
        let index = self.add_node(node);
        self.scene_nodes.push(index);
        index
    }

    pub fn add_mesh(&mut self, mesh: json::Mesh) -> Index<json::Mesh> {
        push(&mut self.root.meshes, mesh)
    }

    pub fn add_skin(&mut self, skin: json::Skin) -> Index<json::Skin> {
        push(&mut self.root.skins, skin)
    }

    pub fn add_animation(&mut self, animation: json::Animation) -> Index<json::Animation> {
        push(&mut self.root.animations, animation)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.root.nodes.len()
    }

    /// Closes the document: one scene over the root nodes, one buffer.
    #[must_use]
    pub fn finish(mut self) -> GltfDocument {
        align_to_4bytes(&mut self.bin, 0);
        if !self.bin.is_empty() {
            push(
                &mut self.root.buffers,
                json::Buffer {
                    byte_length: USize64::from(self.bin.len()),
                    name: None,
                    uri: None,
                    extensions: Default::default(),
                    extras: Default::default(),
                },
            );
        }
        let scene = push(
            &mut self.root.scenes,
            json::Scene {
                extensions: Default::default(),
                extras: Default::default(),
                name: None,
                nodes: self.scene_nodes,
            },
        );
        self.root.scene = Some(scene);

        GltfDocument {
            root: self.root,
            bin: self.bin,
        }
    }
}

/// Per-component `(min, max)` of interleaved `data`, `None` when empty.
fn component_bounds(data: &[f32], components: usize) -> Option<(Vec<f32>, Vec<f32>)> {
    if components == 0 || data.len() < components {
        return None;
    }
    let mut min = data[..components].to_vec();
    let mut max = min.clone();
    for element in data.chunks_exact(components).skip(1) {
        for (c, &v) in element.iter().enumerate() {
            min[c] = min[c].min(v);
            max[c] = max[c].max(v);
        }
    }
    Some((min, max))
}
