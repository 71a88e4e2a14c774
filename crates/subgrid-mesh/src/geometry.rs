//! Planar projection, triangulation, and normal estimation for grid polygons.

use glam::{Vec2, Vec3};
use subgrid_core::{Result, SubgridError};

/// Orthonormal 2D basis embedded in a polygon's plane.
#[derive(Debug, Clone, Copy)]
pub struct ProjectionBasis {
    /// First in-plane axis.
    pub u: Vec3,
    /// Second in-plane axis, orthogonal to `u`.
    pub v: Vec3,
}

/// Builds a projection basis from a polygon's first three vertices.
///
/// With `v1 = p1 - p0` and `v2 = p2 - p0`, the plane normal is
/// `normalize(v1 x v2)`, `u = normalize(v1)` and `v = normalize(normal x u)`.
/// The polygon is assumed planar; only the leading vertices participate.
///
/// Returns `None` when the leading vertices are collinear or coincident, so
/// degenerate polygons never produce a NaN basis.
#[must_use]
pub fn projection_basis(polygon: &[Vec3]) -> Option<ProjectionBasis> {
    if polygon.len() < 3 {
        return None;
    }
    let v1 = polygon[1] - polygon[0];
    let v2 = polygon[2] - polygon[0];

    let normal = v1.cross(v2).normalize_or_zero();
    let u = v1.normalize_or_zero();
    if normal == Vec3::ZERO || u == Vec3::ZERO {
        return None;
    }
    let v = normal.cross(u).normalize_or_zero();
    Some(ProjectionBasis { u, v })
}

/// Projects polygon vertices onto the plane spanned by the basis.
#[must_use]
pub fn project_polygon(polygon: &[Vec3], basis: &ProjectionBasis) -> Vec<Vec2> {
    polygon
        .iter()
        .map(|p| Vec2::new(p.dot(basis.u), p.dot(basis.v)))
        .collect()
}

/// Triangulates a projected 2D contour with ear clipping.
///
/// Returns a flat sequence of local vertex-index triples into the contour
/// (no holes, single contour).
///
/// # Errors
/// Returns [`SubgridError::TriangulationError`] if the triangulator rejects
/// the contour.
pub fn triangulate(projected: &[Vec2]) -> Result<Vec<usize>> {
    let mut coords = Vec::with_capacity(projected.len() * 2);
    for p in projected {
        coords.push(f64::from(p.x));
        coords.push(f64::from(p.y));
    }
    earcutr::earcut(&coords, &[], 2)
        .map_err(|e| SubgridError::TriangulationError(format!("{e:?}")))
}

/// Computes a single averaged normal for a triangulated polygon.
///
/// Sums the (area-weighted) cross-product normals of every triangle and
/// normalizes the sum. Averaging over the triangulation keeps shading
/// consistent even when individual triangles are near-degenerate.
#[must_use]
pub fn average_normal(polygon: &[Vec3], triangles: &[usize]) -> Vec3 {
    let mut sum = Vec3::ZERO;
    for tri in triangles.chunks_exact(3) {
        let p0 = polygon[tri[0]];
        let p1 = polygon[tri[1]];
        let p2 = polygon[tri[2]];
        sum += (p1 - p0).cross(p2 - p0);
    }
    sum.normalize_or_zero()
}
