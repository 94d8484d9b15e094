use glam::{Mat3, Mat4, Vec3};

use crate::resources::BoundingBox;
use crate::scene::transform::Transform;

/// Reference pose of one joint as collected during extrusion.
#[derive(Debug, Clone, PartialEq)]
pub struct BindPose {
    pub name: String,
    /// Station reference coordinate.
    pub translation: Vec3,
    /// Station local-to-global rotation.
    pub orientation: Mat3,
}

impl BindPose {
    /// Homogeneous reference transform `[R | t]`.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        let mut m = Mat4::from_mat3(self.orientation);
        m.w_axis = self.translation.extend(1.0);
        m
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Joint {
    pub name: String,
    /// Bind-time transform.
    pub reference: Transform,
    /// Current pose, mutated by deformation and animation playback.
    pub pose: Transform,
}

/// The single skin spanning every extruded element.
#[derive(Debug, Clone, Default)]
pub struct Skin {
    pub name: String,

    // Ordered joint list. joints[i] is the joint referenced by JOINTS_0 == i.
    pub joints: Vec<Joint>,

    // Maps mesh-space vertices into joint-local space. Static after binding.
    pub(crate) inverse_bind_matrices: Vec<Mat4>,

    /// Skeleton root, the first joint. `None` for an empty skin.
    pub(crate) root_joint_index: Option<usize>,
}

impl Skin {
    /// Binds `poses` in order. Joint `i` of the skin is `poses[i]`.
    #[must_use]
    pub fn bind(name: &str, poses: &[BindPose]) -> Self {
        let joints = poses
            .iter()
            .map(|pose| {
                let reference = Transform::from_orientation(&pose.orientation, pose.translation);
                Joint {
                    name: pose.name.clone(),
                    reference,
                    pose: reference,
                }
            })
            .collect();

        let inverse_bind_matrices = poses.iter().map(|pose| pose.matrix().inverse()).collect();

        Self {
            name: name.to_string(),
            joints,
            inverse_bind_matrices,
            root_joint_index: (!poses.is_empty()).then_some(0),
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn inverse_bind_matrices(&self) -> &[Mat4] {
        &self.inverse_bind_matrices
    }

    #[inline]
    #[must_use]
    pub fn root_joint(&self) -> Option<usize> {
        self.root_joint_index
    }

    /// Returns every joint to its bind pose.
    pub fn reset_pose(&mut self) {
        for joint in &mut self.joints {
            joint.pose = joint.reference;
        }
    }

    /// Tight box around the current joint positions.
    #[must_use]
    pub fn pose_bounds(&self) -> Option<BoundingBox> {
        let positions: Vec<Vec3> = self.joints.iter().map(|j| j.pose.position).collect();
        BoundingBox::from_points(&positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pose(name: &str, translation: Vec3, orientation: Mat3) -> BindPose {
        BindPose {
            name: name.to_string(),
            translation,
            orientation,
        }
    }

    #[test]
    fn bind_pose_yields_identity_joint_matrices() {
        let poses = [
            pose("a", Vec3::ZERO, Mat3::IDENTITY),
            pose("b", Vec3::new(1.0, 2.0, 0.0), Mat3::from_rotation_y(0.3)),
        ];
        let skin = Skin::bind("skin", &poses);

        assert_eq!(skin.len(), 2);
        assert_eq!(skin.root_joint(), Some(0));
        for (joint, ibm) in skin.joints.iter().zip(skin.inverse_bind_matrices()) {
            assert!((joint.pose.matrix() * *ibm).abs_diff_eq(Mat4::IDENTITY, 1e-5));
        }
    }

    #[test]
    fn inverse_bind_maps_reference_point_to_origin() {
        let poses = [pose("a", Vec3::new(3.0, 0.0, 1.0), Mat3::from_rotation_z(0.5))];
        let skin = Skin::bind("skin", &poses);
        let local = skin.inverse_bind_matrices()[0].transform_point3(Vec3::new(3.0, 0.0, 1.0));
        assert!(local.length() < 1e-5);
    }

    #[test]
    fn empty_skin_has_no_root() {
        let skin = Skin::bind("skin", &[]);
        assert!(skin.is_empty());
        assert!(skin.root_joint().is_none());
        assert!(skin.pose_bounds().is_none());
    }
}
