//! Ear-clipping triangulation of simple planar polygons.
//!
//! Used for the end caps of extruded sections. Input polygons may be given in
//! either winding and may repeat the first point at the end; the result always
//! indexes the input slice and every triangle is counter-clockwise.

use glam::Vec2;
use log::debug;

use crate::errors::{ElasticaError, Result};

/// Twice the signed area; positive for counter-clockwise polygons.
#[must_use]
pub fn signed_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum::<f32>()
}

/// Triangulates a simple polygon.
///
/// Fails with [`ElasticaError::DegenerateGeometry`] when the polygon has
/// fewer than three distinct points, zero area, or self-intersecting edges.
pub fn triangulate(points: &[Vec2]) -> Result<Vec<[usize; 3]>> {
    let mut n = points.len();
    if n > 3 && points[0] == points[n - 1] {
        n -= 1;
    }
    let polygon = &points[..n];

    if n < 3 {
        return Err(ElasticaError::DegenerateGeometry(format!(
            "outline has {n} points, at least 3 are required"
        )));
    }

    let tolerance = area_tolerance(polygon);
    let area = signed_area(polygon);
    if area.abs() <= tolerance {
        return Err(ElasticaError::DegenerateGeometry(
            "outline encloses no area".to_string(),
        ));
    }

    if let Some((a, b)) = first_crossing(polygon) {
        return Err(ElasticaError::DegenerateGeometry(format!(
            "outline edges {a} and {b} intersect"
        )));
    }

    let mut remaining: Vec<usize> = (0..n).collect();
    if area < 0.0 {
        remaining.reverse();
    }

    let mut triangles = Vec::with_capacity(n - 2);
    while remaining.len() > 3 {
        let len = remaining.len();
        let corner = |i: usize| {
            (
                remaining[(i + len - 1) % len],
                remaining[i],
                remaining[(i + 1) % len],
            )
        };

        if let Some(i) = (0..len).find(|&i| is_ear(polygon, &remaining, corner(i), tolerance)) {
            let (prev, curr, next) = corner(i);
            triangles.push([prev, curr, next]);
            remaining.remove(i);
            continue;
        }

        // Collinear vertices never form an ear but can be dropped without
        // changing the covered region.
        if let Some(i) = (0..len).find(|&i| {
            let (prev, curr, next) = corner(i);
            cross(polygon[prev], polygon[curr], polygon[next]).abs() <= tolerance
        }) {
            remaining.remove(i);
            continue;
        }

        return Err(ElasticaError::DegenerateGeometry(format!(
            "ear clipping stalled with {len} vertices remaining"
        )));
    }

    let [a, b, c] = [remaining[0], remaining[1], remaining[2]];
    if cross(polygon[a], polygon[b], polygon[c]) > tolerance {
        triangles.push([a, b, c]);
    }

    debug!("Triangulated {n}-point outline into {} triangles", triangles.len());
    Ok(triangles)
}

fn area_tolerance(points: &[Vec2]) -> f32 {
    let (min, max) = points
        .iter()
        .fold((Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)), |(lo, hi), &p| {
            (lo.min(p), hi.max(p))
        });
    (max - min).length_squared() * 1e-7
}

#[inline]
fn cross(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b - a).perp_dot(c - a)
}

fn is_ear(points: &[Vec2], remaining: &[usize], (prev, curr, next): (usize, usize, usize), tolerance: f32) -> bool {
    let (a, b, c) = (points[prev], points[curr], points[next]);
    if cross(a, b, c) <= tolerance {
        return false;
    }

    remaining
        .iter()
        .filter(|&&idx| idx != prev && idx != curr && idx != next)
        .all(|&idx| !point_in_triangle(points[idx], a, b, c))
}

/// Inclusive test for a counter-clockwise triangle.
fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    cross(a, b, p) >= 0.0 && cross(b, c, p) >= 0.0 && cross(c, a, p) >= 0.0
}

/// Returns the first pair of non-adjacent edges that touch or cross.
fn first_crossing(points: &[Vec2]) -> Option<(usize, usize)> {
    let n = points.len();
    let edge = |i: usize| (points[i], points[(i + 1) % n]);

    for i in 0..n {
        for j in (i + 2)..n {
            // The first and last edges share a vertex.
            if i == 0 && j == n - 1 {
                continue;
            }
            let (p1, p2) = edge(i);
            let (q1, q2) = edge(j);
            if segments_intersect(p1, p2, q1, q2) {
                return Some((i, j));
            }
        }
    }
    None
}

fn segments_intersect(p1: Vec2, p2: Vec2, q1: Vec2, q2: Vec2) -> bool {
    let d1 = cross(q1, q2, p1);
    let d2 = cross(q1, q2, p2);
    let d3 = cross(p1, p2, q1);
    let d4 = cross(p1, p2, q2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(q1, q2, p1))
        || (d2 == 0.0 && on_segment(q1, q2, p2))
        || (d3 == 0.0 && on_segment(p1, p2, q1))
        || (d4 == 0.0 && on_segment(p1, p2, q2))
}

fn on_segment(a: Vec2, b: Vec2, p: Vec2) -> bool {
    p.cmpge(a.min(b)).all() && p.cmple(a.max(b)).all()
}
