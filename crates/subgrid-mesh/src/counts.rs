//! Primitive counting for the polygon index stream.

use subgrid_core::{Result, SubgridError};

/// Numbers of GPU primitives needed to represent a grid surface.
///
/// A polygon with `n` vertices contributes `n - 2` triangles and `n` line
/// segments (its closed edge loop).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrimitiveCounts {
    /// Total triangle count over all polygons.
    pub triangles: usize,
    /// Total 2-point line segment count over all polygons.
    pub line_segments: usize,
}

/// Counts the primitives described by a polygon index stream.
///
/// The stream encodes variable-length polygons as
/// `[n0, i00, i01, ..., n1, i10, ...]` where `ni` is the vertex count of the
/// i-th polygon and `iij` are indices into the shared point pool. The walk
/// advances by declared vertex counts only, in a single pass.
///
/// # Errors
/// Returns [`SubgridError::MalformedPolygonStream`] if a polygon declares
/// fewer than 3 vertices or its header runs past the end of the stream.
pub fn count_primitives(polys: &[u32]) -> Result<PrimitiveCounts> {
    let mut counts = PrimitiveCounts::default();
    let mut i = 0;
    while i < polys.len() {
        let n = polys[i] as usize;
        if n < 3 {
            return Err(SubgridError::MalformedPolygonStream {
                offset: i,
                reason: format!("polygon declares {n} vertices (minimum is 3)"),
            });
        }
        if i + 1 + n > polys.len() {
            return Err(SubgridError::MalformedPolygonStream {
                offset: i,
                reason: format!(
                    "polygon declares {n} vertices but only {} values remain",
                    polys.len() - i - 1
                ),
            });
        }
        counts.triangles += n - 2;
        counts.line_segments += n;
        i += n + 1;
    }
    Ok(counts)
}
