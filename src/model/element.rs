use glam::{Mat3, Vec3};

use crate::errors::Result;
use crate::geometry::elastic::{CurveSamples, ElasticCurve, EndDisplacements};
use crate::model::response::ResponseState;

/// A sampled cross-section location along an element axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Station {
    /// Reference (undeformed) coordinate.
    pub coordinate: Vec3,
    /// Section-local to global rotation. Its columns are the local
    /// (axial, transverse, vertical) axes expressed in global coordinates.
    pub orientation: Mat3,
}

impl Station {
    #[must_use]
    pub const fn new(coordinate: Vec3, orientation: Mat3) -> Self {
        Self {
            coordinate,
            orientation,
        }
    }
}

/// A beam/frame element with its ordered stations.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameElement {
    pub name: String,
    pub stations: Vec<Station>,
    /// Element rotation `Q`. Its rows are the local axes in global coordinates,
    /// so `Q * v_global` gives local components.
    pub orientation: Mat3,
}

impl FrameElement {
    #[must_use]
    pub fn new(name: impl Into<String>, stations: Vec<Station>, orientation: Mat3) -> Self {
        Self {
            name: name.into(),
            stations,
            orientation,
        }
    }

    /// Straight element with `count` evenly spaced stations (at least two).
    ///
    /// Every station shares the element orientation, `Qᵗ`.
    #[must_use]
    pub fn straight(
        name: impl Into<String>,
        start: Vec3,
        end: Vec3,
        count: usize,
        orientation: Mat3,
    ) -> Self {
        let count = count.max(2);
        let station_orientation = orientation.transpose();
        let stations = (0..count)
            .map(|i| {
                let t = i as f32 / (count - 1) as f32;
                Station::new(start.lerp(end, t), station_orientation)
            })
            .collect();
        Self::new(name, stations, orientation)
    }

    /// Builds `Q` from an element axis and a vertical reference vector.
    ///
    /// The transverse axis is `vertical × axis`, the local vertical completes
    /// the right-handed triad. Falls back to the global Z (or Y) reference when
    /// `vertical` is parallel to the axis.
    #[must_use]
    pub fn orientation_from_axis(axis: Vec3, vertical: Vec3) -> Mat3 {
        let e1 = axis.normalize_or_zero();
        let mut e2 = vertical.cross(e1);
        if e2.length_squared() < 1e-12 {
            let fallback = if e1.z.abs() < 0.9 { Vec3::Z } else { Vec3::Y };
            e2 = fallback.cross(e1);
        }
        let e2 = e2.normalize_or_zero();
        let e3 = e1.cross(e2);
        Mat3::from_cols(e1, e2, e3).transpose()
    }

    /// Chord length between the first and last station.
    #[must_use]
    pub fn length(&self) -> f32 {
        match (self.stations.first(), self.stations.last()) {
            (Some(first), Some(last)) => first.coordinate.distance(last.coordinate),
            _ => 0.0,
        }
    }

    /// Deformed centroidal curve of this element for `state`.
    ///
    /// Returns `Ok(None)` when the state carries no end displacements for the
    /// element. The state's vector is interpreted in global axes.
    pub fn deformed_centerline<S: ResponseState + ?Sized>(
        &self,
        state: &S,
        samples: usize,
    ) -> Result<Option<CurveSamples>> {
        let Some(displacements) = state.end_displacements(&self.name) else {
            return Ok(None);
        };
        let Some(first) = self.stations.first() else {
            return Ok(None);
        };

        let ends = EndDisplacements::from_global(displacements, self.orientation)?;
        let curve = ElasticCurve::new(ends, self.length())
            .with_rotation(self.orientation)
            .with_origin(first.coordinate);
        Ok(Some(curve.sample(samples, false)))
    }
}
