use glam::{Vec2, Vec3};

use crate::geometry::earcut;

/// Ordered boundary polygon of a cross-section, in section-local coordinates.
///
/// Each point is `(x, y, z)` where `x` is an offset along the element axis
/// (usually zero) and `(y, z)` lie in the section plane. The polygon is
/// implicitly closed: the last point connects back to the first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CrossSectionOutline {
    points: Vec<Vec3>,
}

impl CrossSectionOutline {
    #[must_use]
    pub fn new(points: Vec<Vec3>) -> Self {
        Self { points }
    }

    /// Builds an outline from in-plane `(y, z)` pairs.
    #[must_use]
    pub fn from_planar(points: &[[f32; 2]]) -> Self {
        Self {
            points: points.iter().map(|&[y, z]| Vec3::new(0.0, y, z)).collect(),
        }
    }

    /// Axis-aligned rectangle centred on the section origin, counter-clockwise.
    #[must_use]
    pub fn rectangle(width: f32, depth: f32) -> Self {
        let (w, d) = (width / 2.0, depth / 2.0);
        Self::from_planar(&[[-w, -d], [w, -d], [w, d], [-w, d]])
    }

    /// Regular polygon approximating a circle, counter-clockwise.
    #[must_use]
    pub fn circle(radius: f32, segments: usize) -> Self {
        let segments = segments.max(3);
        let points = (0..segments)
            .map(|i| {
                let theta = std::f32::consts::TAU * i as f32 / segments as f32;
                Vec3::new(0.0, radius * theta.cos(), radius * theta.sin())
            })
            .collect();
        Self { points }
    }

    #[inline]
    #[must_use]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Number of outline edges (equal to the number of points, the polygon being closed).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Scales the in-plane coordinates. The axial offset is left untouched.
    #[must_use]
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            points: self
                .points
                .iter()
                .map(|p| Vec3::new(p.x, p.y * factor, p.z * factor))
                .collect(),
        }
    }

    /// Projection onto the section plane, used for cap triangulation.
    #[must_use]
    pub fn planar(&self) -> Vec<Vec2> {
        self.points.iter().map(|p| Vec2::new(p.y, p.z)).collect()
    }

    /// Winding in the (y, z) plane. Degenerate outlines count as counter-clockwise.
    #[must_use]
    pub fn is_counter_clockwise(&self) -> bool {
        earcut::signed_area(&self.planar()) >= 0.0
    }

    /// Same polygon traced the other way round, starting from the same point.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        if let Some(rest) = points.get_mut(1..) {
            rest.reverse();
        }
        Self { points }
    }
}

impl From<Vec<Vec3>> for CrossSectionOutline {
    fn from(points: Vec<Vec3>) -> Self {
        Self::new(points)
    }
}
