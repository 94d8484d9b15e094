//! Scene writer
//!
//! The core pushes raw arrays into a [`SceneBuilder`] and gets typed
//! [`gltf::json::Index`] handles back; [`SceneBuilder::finish`] yields a
//! [`GltfDocument`] that serializes to glTF JSON or a binary `.glb`.

pub mod builder;
pub mod export;
pub mod glb;

pub use builder::{SceneBuilder, accessor};
pub use export::{SkinnedMeshHandle, write_animation, write_line_strip, write_skinned_mesh};
pub use glb::GltfDocument;
