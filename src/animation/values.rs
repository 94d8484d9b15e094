use glam::{Quat, Vec3};
use gltf::json::accessor::Type;

/// Keyframe value types.
pub trait Interpolatable: Copy + Clone + Sized {
    /// Scalar components per value.
    const COMPONENTS: usize;

    /// glTF accessor type of the flattened value.
    const ACCESSOR_TYPE: Type;

    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;

    /// Appends the scalar components in glTF order.
    fn push_components(&self, out: &mut Vec<f32>);
}

impl Interpolatable for Vec3 {
    const COMPONENTS: usize = 3;
    const ACCESSOR_TYPE: Type = Type::Vec3;

    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }

    fn push_components(&self, out: &mut Vec<f32>) {
        out.extend_from_slice(&self.to_array());
    }
}

impl Interpolatable for Quat {
    const COMPONENTS: usize = 4;
    const ACCESSOR_TYPE: Type = Type::Vec4;

    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.slerp(end, t)
    }

    /// `(x, y, z, w)`.
    fn push_components(&self, out: &mut Vec<f32>) {
        out.extend_from_slice(&self.to_array());
    }
}
