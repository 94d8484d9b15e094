//! Deformed joint poses from a response state.
//!
//! For every station that has both a joint and data in the state, the joint
//! moves to `reference + delta` and takes the state's rotation. The rotation
//! matrix is converted as-is; it must be a proper rotation.

use glam::{Mat3, Vec3};
use log::warn;

use crate::model::ResponseState;
use crate::scene::joint_map::{JointIndex, JointMap};
use crate::scene::skeleton::Skin;
use crate::scene::transform::Transform;

/// Deformed pose of a single joint.
#[inline]
#[must_use]
pub fn deformed_pose(reference: Vec3, delta: Vec3, rotation: &Mat3) -> Transform {
    Transform::from_orientation(rotation, reference + delta)
}

/// Visits every joint present in both `map` and `state` with its deformed pose.
///
/// Elements absent from the state are skipped silently. Stations beyond the
/// end of the state's arrays are skipped with a warning.
pub fn for_each_deformed_joint<S, F>(state: &S, map: &JointMap, mut visit: F)
where
    S: ResponseState + ?Sized,
    F: FnMut(JointIndex, Transform),
{
    for element in state.element_names() {
        let Some(joints) = map.element(element) else {
            continue;
        };
        let (Some(deltas), Some(rotations)) = (state.position_deltas(element), state.rotations(element)) else {
            continue;
        };

        let available = deltas.len().min(rotations.len());
        if available < joints.len() {
            warn!(
                "State for element '{element}' covers {available} of {} stations; remaining stations keep their pose",
                joints.len()
            );
        }

        for (station, entry) in joints.iter().enumerate().take(available) {
            visit(entry.index, deformed_pose(entry.reference, deltas[station], &rotations[station]));
        }
    }
}

/// Poses the skin's joints for one response state.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeformationApplier;

impl DeformationApplier {
    /// Resets `skin` to its bind pose, then applies `state`.
    ///
    /// Returns the number of joints moved.
    pub fn apply<S: ResponseState + ?Sized>(&self, skin: &mut Skin, state: &S, map: &JointMap) -> usize {
        skin.reset_pose();

        let mut moved = 0;
        for_each_deformed_joint(state, map, |index, pose| {
            if let Some(joint) = skin.joints.get_mut(usize::from(index)) {
                joint.pose = pose;
                moved += 1;
            }
        });
        moved
    }
}
