//! Skeleton and pose
//!
//! - Transform: translation and rotation of a node
//! - Skin: ordered joints with inverse bind matrices
//! - JointMap: `(element, station) -> joint` lookup
//! - DeformationApplier: joint poses from a response state

pub mod deform;
pub mod joint_map;
pub mod skeleton;
pub mod transform;

pub use deform::{DeformationApplier, deformed_pose, for_each_deformed_joint};
pub use joint_map::{JointEntry, JointIndex, JointMap};
pub use skeleton::{BindPose, Joint, Skin};
pub use transform::Transform;
