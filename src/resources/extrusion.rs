//! Reference-configuration mesh of extruded cross-sections.
//!
//! Each station of an element becomes one joint and one ring of vertices
//! traced from the station's outline. Consecutive rings are stitched with two
//! triangles per outline edge, the last edge wrapping back to the first. The
//! first and last rings are capped by triangulating their outlines.
//!
//! Vertices are placed in mesh space (`coordinate + R * outline_point`) and
//! bound with weight 1.0 to their station's joint.

use glam::{Vec2, Vec3};
use log::{debug, info, warn};

use crate::errors::{ElasticaError, Result};
use crate::geometry::earcut;
use crate::model::{CrossSectionOutline, FrameElement, FrameModel};
use crate::resources::mesh::{MAX_INDEXED, SkinnedMesh};
use crate::scene::joint_map::{JointEntry, JointIndex, JointMap};
use crate::scene::skeleton::{BindPose, Skin};

/// Output of [`CrossSectionExtruder::extrude`].
#[derive(Debug, Clone, Default)]
pub struct Extrusion {
    pub mesh: SkinnedMesh,
    /// Joint reference poses in creation order.
    pub bind_poses: Vec<BindPose>,
    pub joint_map: JointMap,
}

impl Extrusion {
    /// `true` when no element contributed geometry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mesh.is_empty()
    }

    /// Binds the collected joints into a single skin.
    #[must_use]
    pub fn bind_skin(&self, name: &str) -> Skin {
        Skin::bind(name, &self.bind_poses)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CrossSectionExtruder {
    /// Scale applied to the in-plane outline coordinates.
    pub scale: f32,
}

impl Default for CrossSectionExtruder {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl CrossSectionExtruder {
    #[must_use]
    pub fn new(scale: f32) -> Self {
        Self { scale }
    }

    /// Builds the skinned reference mesh for every element of `model`.
    ///
    /// Elements without usable outlines are skipped; an empty [`Extrusion`] is
    /// a valid result. Fails only when the 16-bit index space is exhausted.
    pub fn extrude<M: FrameModel + ?Sized>(&self, model: &M) -> Result<Extrusion> {
        let mut out = Extrusion::default();

        for element in model.elements() {
            let Some(outlines) = self.station_outlines(model, element) else {
                continue;
            };
            self.extrude_element(element, &outlines, &mut out)?;
        }

        info!(
            "Extruded {} elements: {} vertices, {} triangles, {} joints",
            out.joint_map.element_count(),
            out.mesh.vertex_count(),
            out.mesh.triangle_count(),
            out.bind_poses.len()
        );
        Ok(out)
    }

    /// Scaled outlines of every station, or `None` (with a warning) when the
    /// element cannot be extruded.
    fn station_outlines<M: FrameModel + ?Sized>(
        &self,
        model: &M,
        element: &FrameElement,
    ) -> Option<Vec<CrossSectionOutline>> {
        let name = &element.name;
        if element.stations.len() < 2 {
            warn!("Skipping element '{name}': {} station(s), at least 2 required", element.stations.len());
            return None;
        }

        let mut outlines = Vec::with_capacity(element.stations.len());
        for station in 0..element.stations.len() {
            let Some(outline) = model.outline(name, station) else {
                warn!("Skipping element '{name}': no outline at station {station}");
                return None;
            };
            outlines.push(outline.scaled(self.scale));
        }

        let edges = outlines[0].len();
        if edges < 3 {
            warn!("Skipping element '{name}': outline has {edges} point(s)");
            return None;
        }
        if let Some(station) = outlines.iter().position(|o| o.len() != edges) {
            warn!(
                "Skipping element '{name}': outline at station {station} has {} points, expected {edges}",
                outlines[station].len()
            );
            return None;
        }

        let counter_clockwise = outlines[0].is_counter_clockwise();
        for (station, outline) in outlines.iter_mut().enumerate().skip(1) {
            if outline.is_counter_clockwise() != counter_clockwise {
                debug!("Element '{name}': outline at station {station} rewound to match station 0");
                *outline = outline.reversed();
            }
        }

        Some(outlines)
    }

    fn extrude_element(&self, element: &FrameElement, outlines: &[CrossSectionOutline], out: &mut Extrusion) -> Result<()> {
        let stations = element.stations.len();
        let edges = outlines[0].len();

        let vertex_total = out.mesh.vertex_count() + stations * edges;
        if vertex_total > MAX_INDEXED {
            return Err(ElasticaError::IndexOverflow {
                what: "vertices",
                count: vertex_total,
            });
        }
        let joint_total = out.bind_poses.len() + stations;
        if joint_total > MAX_INDEXED {
            return Err(ElasticaError::IndexOverflow {
                what: "joints",
                count: joint_total,
            });
        }

        let offset = out.mesh.vertex_count();
        let triangles_before = out.mesh.triangle_count();
        let counter_clockwise = outlines[0].is_counter_clockwise();

        let mut joints = Vec::with_capacity(stations);
        for (j, (station, outline)) in element.stations.iter().zip(outlines).enumerate() {
            let joint = out.bind_poses.len() as JointIndex;
            out.bind_poses.push(BindPose {
                name: format!("{}:{j}", element.name),
                translation: station.coordinate,
                orientation: station.orientation,
            });
            joints.push(JointEntry {
                index: joint,
                reference: station.coordinate,
            });

            let u = j as f32 / (stations - 1) as f32;
            for (k, point) in outline.points().iter().enumerate() {
                let v = k as f32 / (edges - 1) as f32;
                let position: Vec3 = station.coordinate + station.orientation * *point;
                out.mesh.push_vertex(position, joint, Vec2::new(u, v));
            }
        }

        // Ring j-1 to ring j, outward facing for a counter-clockwise outline.
        let ring = |j: usize, k: usize| (offset + edges * j + k) as u16;
        for j in 1..stations {
            for k in 0..edges {
                let k1 = (k + 1) % edges;
                let (a, b) = (ring(j, k), ring(j, k1));
                let (c, d) = (ring(j - 1, k), ring(j - 1, k1));
                if counter_clockwise {
                    out.mesh.push_triangle([a, c, b]);
                    out.mesh.push_triangle([b, c, d]);
                } else {
                    out.mesh.push_triangle([a, b, c]);
                    out.mesh.push_triangle([b, d, c]);
                }
            }
        }

        self.push_caps(element, outlines, offset, &mut out.mesh);

        debug!(
            "Element '{}': {stations} rings of {edges} vertices, {} triangles",
            element.name,
            out.mesh.triangle_count() - triangles_before
        );
        out.joint_map.insert_element(element.name.clone(), joints);
        Ok(())
    }

    /// Caps the first and last ring. A non-simple outline drops both caps.
    fn push_caps(&self, element: &FrameElement, outlines: &[CrossSectionOutline], offset: usize, mesh: &mut SkinnedMesh) {
        let last = outlines.len() - 1;
        let edges = outlines[0].len();

        let caps = earcut::triangulate(&outlines[0].planar()).and_then(|back| {
            earcut::triangulate(&outlines[last].planar()).map(|front| (back, front))
        });
        let (back, front) = match caps {
            Ok(caps) => caps,
            Err(e) => {
                warn!("End caps omitted for element '{}': {e}", element.name);
                return;
            }
        };

        // Triangulated faces point along +axial; the back cap faces the other way.
        let back_base = offset;
        for [a, b, c] in back {
            mesh.push_triangle([(back_base + a) as u16, (back_base + c) as u16, (back_base + b) as u16]);
        }
        let front_base = offset + last * edges;
        for [a, b, c] in front {
            mesh.push_triangle([(front_base + a) as u16, (front_base + b) as u16, (front_base + c) as u16]);
        }
    }
}
