//! Deformed centroidal curve of a beam element.
//!
//! The curve is the superposition of two cubic Hermite interpolations, one
//! per bending plane, along a longitudinal coordinate stretched to the
//! deformed length:
//!
//! - plan plane: transverse displacement and rotation about the local vertical
//! - elevation plane: vertical displacement and rotation about the local
//!   transverse axis, with the rotation sign flipped (a positive rotation about
//!   the transverse axis lowers the vertical coordinate)
//!
//! Local `(axial, plan, elevation)` samples are rotated back to global axes
//! with `Qᵗ` and translated by the reference start coordinate. The near-end
//! displacement is part of the local curve, so the first sample lands on the
//! deformed start.

use glam::{Mat3, Vec3};

use crate::errors::{ElasticaError, Result};

const ACCEPTED_SHAPES: &str = "2 (transverse), 4 (transverse + rotation) or 12 (six terms per end)";

/// Nodal end displacements of one element, in local axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EndDisplacements {
    /// Transverse displacement at each end; rotations are zero.
    Transverse { i: f32, j: f32 },
    /// `[transverse, plan rotation]` at each end.
    Planar { i: [f32; 2], j: [f32; 2] },
    /// `[axial, transverse, vertical, twist, elevation, plan]` at each end.
    Spatial { i: [f32; 6], j: [f32; 6] },
}

impl EndDisplacements {
    /// Interprets a flat local vector.
    ///
    /// Accepts lengths 2, 4 and 12; anything else is a
    /// [`ElasticaError::ContractViolation`].
    pub fn from_slice(v: &[f32]) -> Result<Self> {
        match *v {
            [ti, tj] => Ok(Self::Transverse { i: ti, j: tj }),
            [ti, ri, tj, rj] => Ok(Self::Planar {
                i: [ti, ri],
                j: [tj, rj],
            }),
            _ if v.len() == 12 => {
                let mut i = [0.0; 6];
                let mut j = [0.0; 6];
                i.copy_from_slice(&v[..6]);
                j.copy_from_slice(&v[6..]);
                Ok(Self::Spatial { i, j })
            }
            _ => Err(ElasticaError::ContractViolation {
                expected: ACCEPTED_SHAPES,
                found: v.len(),
            }),
        }
    }

    /// Projects a global 12-term vector (translation and rotation triples at
    /// each end) onto the element axes described by `q`.
    pub fn from_global(v: &[f32], q: Mat3) -> Result<Self> {
        if v.len() != 12 {
            return Err(ElasticaError::ContractViolation {
                expected: "12 (six global terms per end)",
                found: v.len(),
            });
        }

        let local = |k: usize| q * Vec3::new(v[k], v[k + 1], v[k + 2]);
        let (ui, ri, uj, rj) = (local(0), local(3), local(6), local(9));
        Ok(Self::Spatial {
            i: [ui.x, ui.y, ui.z, ri.x, ri.y, ri.z],
            j: [uj.x, uj.y, uj.z, rj.x, rj.y, rj.z],
        })
    }

    /// Six local terms per end, zero-filling what the variant leaves out.
    #[must_use]
    pub fn spatial(&self) -> ([f32; 6], [f32; 6]) {
        match *self {
            Self::Transverse { i, j } => ([0.0, i, 0.0, 0.0, 0.0, 0.0], [0.0, j, 0.0, 0.0, 0.0, 0.0]),
            Self::Planar { i, j } => (
                [0.0, i[0], 0.0, 0.0, 0.0, i[1]],
                [0.0, j[0], 0.0, 0.0, 0.0, j[1]],
            ),
            Self::Spatial { i, j } => (i, j),
        }
    }
}

// ============================================================================
// Hermite shape functions
// ============================================================================

/// Cubic Hermite interpolation of `[u_i, θ_i, u_j, θ_j]` at `x ∈ [0, length]`.
#[must_use]
pub fn hermite(x: f32, ends: [f32; 4], length: f32) -> f32 {
    let [ui, vi, uj, vj] = ends;
    let xi = normalized(x, length);
    let xi2 = xi * xi;
    let xi3 = xi2 * xi;

    let n1 = 1.0 - 3.0 * xi2 + 2.0 * xi3;
    let n2 = length * (xi - 2.0 * xi2 + xi3);
    let n3 = 3.0 * xi2 - 2.0 * xi3;
    let n4 = length * (xi3 - xi2);

    ui * n1 + vi * n2 + uj * n3 + vj * n4
}

/// Derivative of [`hermite`] with respect to `x`.
#[must_use]
pub fn hermite_slope(x: f32, ends: [f32; 4], length: f32) -> f32 {
    let [ui, vi, uj, vj] = ends;
    if length <= f32::EPSILON {
        return vi;
    }
    let xi = normalized(x, length);
    let xi2 = xi * xi;

    let dn1 = 6.0 * (xi2 - xi) / length;
    let dn2 = 1.0 - 4.0 * xi + 3.0 * xi2;
    let dn3 = 6.0 * (xi - xi2) / length;
    let dn4 = 3.0 * xi2 - 2.0 * xi;

    ui * dn1 + vi * dn2 + uj * dn3 + vj * dn4
}

#[inline]
fn normalized(x: f32, length: f32) -> f32 {
    if length > f32::EPSILON { x / length } else { 0.0 }
}

// ============================================================================
// ElasticCurve
// ============================================================================

/// Sampled points (and optionally tangents) of a deformed element axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurveSamples {
    pub points: Vec<Vec3>,
    /// Unnormalized `d(position)/d(axial)` at each sample.
    pub tangents: Option<Vec<Vec3>>,
}

/// Elastic curve solver for a single element.
#[derive(Debug, Clone, Copy)]
pub struct ElasticCurve {
    ends: EndDisplacements,
    length: f32,
    rotation: Mat3,
    origin: Vec3,
}

impl ElasticCurve {
    /// Curve in local axes starting at the origin.
    #[must_use]
    pub fn new(ends: EndDisplacements, length: f32) -> Self {
        Self {
            ends,
            length,
            rotation: Mat3::IDENTITY,
            origin: Vec3::ZERO,
        }
    }

    /// Element rotation `Q` (rows are local axes in global coordinates).
    #[must_use]
    pub fn with_rotation(mut self, q: Mat3) -> Self {
        self.rotation = q;
        self
    }

    /// Reference coordinate of the near end.
    #[must_use]
    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    /// `L' = L + (axial_j - axial_i)`.
    #[must_use]
    pub fn deformed_length(&self) -> f32 {
        let (i, j) = self.ends.spatial();
        self.length + j[0] - i[0]
    }

    /// Samples `samples` points evenly spaced along the deformed length.
    ///
    /// A single sample returns the deformed start; zero samples return nothing.
    #[must_use]
    pub fn sample(&self, samples: usize, with_tangent: bool) -> CurveSamples {
        let (i, j) = self.ends.spatial();
        let [li, ti, vi, _, ei, pi] = i;
        let [_, tj, vj, _, ej, pj] = j;

        let deformed = self.deformed_length();
        let plan = [ti, pi, tj, pj];
        let elevation = [vi, -ei, vj, -ej];
        let to_global = self.rotation.transpose();

        let step = if samples > 1 {
            deformed / (samples - 1) as f32
        } else {
            0.0
        };

        let mut points = Vec::with_capacity(samples);
        let mut tangents = with_tangent.then(|| Vec::with_capacity(samples));

        for k in 0..samples {
            let x = step * k as f32;
            let local = Vec3::new(
                x + li,
                hermite(x, plan, deformed),
                hermite(x, elevation, deformed),
            );
            points.push(to_global * local + self.origin);

            if let Some(tangents) = tangents.as_mut() {
                let slope = Vec3::new(
                    1.0,
                    hermite_slope(x, plan, deformed),
                    hermite_slope(x, elevation, deformed),
                );
                tangents.push(to_global * slope);
            }
        }

        CurveSamples { points, tangents }
    }
}
