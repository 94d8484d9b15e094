use gltf::json::animation::Property;

use crate::scene::JointIndex;

/// Defines the target property for animation data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TargetPath {
    Translation, // Maps to transform.position
    Rotation,    // Maps to transform.rotation
}

impl TargetPath {
    /// glTF `channel.target.path` value.
    #[must_use]
    pub fn property(self) -> Property {
        match self {
            Self::Translation => Property::Translation,
            Self::Rotation => Property::Rotation,
        }
    }
}

/// Joint property driven by a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelTarget {
    pub joint: JointIndex,
    pub path: TargetPath,
}
