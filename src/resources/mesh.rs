use glam::{Vec2, Vec3};

/// Largest vertex or joint count addressable by 16-bit indices.
pub const MAX_INDEXED: usize = u16::MAX as usize + 1;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    /// Tight box around `points`, `None` when empty.
    #[must_use]
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(lo, hi), &p| (lo.min(p), hi.max(p)));
        Some(Self { min, max })
    }

    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Rigidly skinned triangle mesh.
///
/// Every vertex is bound to exactly one joint with weight 1.0; the joint and
/// weight attributes are padded to four influences as glTF expects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkinnedMesh {
    pub positions: Vec<Vec3>,
    pub joints: Vec<[u16; 4]>,
    pub weights: Vec<[f32; 4]>,
    pub texcoords: Vec<Vec2>,
    /// Triangle list.
    pub indices: Vec<u16>,
}

impl SkinnedMesh {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Appends a vertex rigidly bound to `joint`. Returns its index.
    ///
    /// Callers check the 16-bit range before growing the mesh.
    pub fn push_vertex(&mut self, position: Vec3, joint: u16, texcoord: Vec2) -> u16 {
        let index = self.positions.len() as u16;
        self.positions.push(position);
        self.joints.push([joint, 0, 0, 0]);
        self.weights.push([1.0, 0.0, 0.0, 0.0]);
        self.texcoords.push(texcoord);
        index
    }

    pub fn push_triangle(&mut self, triangle: [u16; 3]) {
        self.indices.extend_from_slice(&triangle);
    }

    #[must_use]
    pub fn triangles(&self) -> impl Iterator<Item = [u16; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_box_of_points() {
        let bbox = BoundingBox::from_points(&[Vec3::new(1.0, -2.0, 0.0), Vec3::new(-1.0, 2.0, 3.0)]).unwrap();
        assert_eq!(bbox.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(bbox.max, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(bbox.center(), Vec3::new(0.0, 0.0, 1.5));
        assert_eq!(bbox.size(), Vec3::new(2.0, 4.0, 3.0));
        assert!(BoundingBox::from_points(&[]).is_none());
    }

    #[test]
    fn vertices_are_rigidly_bound() {
        let mut mesh = SkinnedMesh::new();
        let a = mesh.push_vertex(Vec3::ZERO, 3, Vec2::ZERO);
        let b = mesh.push_vertex(Vec3::X, 3, Vec2::X);
        let c = mesh.push_vertex(Vec3::Y, 4, Vec2::Y);
        mesh.push_triangle([a, b, c]);

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.joints[2], [4, 0, 0, 0]);
        assert_eq!(mesh.weights[0].iter().sum::<f32>(), 1.0);
        assert_eq!(mesh.triangles().next(), Some([0, 1, 2]));
    }
}
