use glam::{Mat3, Mat4, Quat, Vec3};

/// Rigid placement of a scene node. Joints created by extrusion never scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Transform {
    #[must_use]
    pub fn from_rotation_translation(rotation: Quat, position: Vec3) -> Self {
        Self { position, rotation }
    }

    /// Pose whose rotation is the orthonormal `orientation` (columns are the
    /// local axes in parent space).
    ///
    /// The matrix is not validated; a non-rotation yields an undefined quaternion.
    #[must_use]
    pub fn from_orientation(orientation: &Mat3, position: Vec3) -> Self {
        Self::from_rotation_translation(Quat::from_mat3(orientation), position)
    }

    /// Local matrix `T * R`.
    #[inline]
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_matrix_keeps_axes_and_origin() {
        let orientation = Mat3::from_rotation_z(std::f32::consts::FRAC_PI_2);
        let transform = Transform::from_orientation(&orientation, Vec3::new(1.0, 2.0, 3.0));
        let matrix = transform.matrix();

        assert!((matrix.transform_point3(Vec3::ZERO) - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-5);
        assert!((matrix.transform_point3(Vec3::X) - Vec3::new(1.0, 3.0, 3.0)).length() < 1e-5);
        assert!(Mat3::from_mat4(matrix).abs_diff_eq(orientation, 1e-5));
    }
}
