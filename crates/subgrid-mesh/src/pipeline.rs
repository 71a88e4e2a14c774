//! The grid mesh-generation pipeline.
//!
//! Converts an irregular polygon-soup grid (shared point pool, polygons with
//! heterogeneous vertex counts, per-polygon scalar property) into
//! GPU-renderable triangle and line-segment buffers. Four stages run in a
//! strict sequence: primitive counting, buffer allocation with
//! shrink-and-retry, polygon processing (projection, ear clipping, normal
//! estimation), and result packaging.
//!
//! The pipeline is pure and single-threaded; offloading it to a worker
//! thread and moving the buffers across that boundary is the transport
//! layer's concern (see the `subgrid` facade crate).

use glam::Vec3;
use serde::{Deserialize, Serialize};
use subgrid_core::{DiagnosticsSink, PropertyRange, Result, SubgridError};

use crate::alloc::{allocate_mesh_arrays, AllocStrategy, MeshArrays, SystemAlloc};
use crate::counts::count_primitives;
use crate::geometry;

/// Input message for one mesh build.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeshRequest {
    /// Shared point pool: flat `x, y, z` triplets.
    pub points: Vec<f32>,
    /// Polygon index stream: `[n0, i00, ..., i0{n0-1}, n1, ...]` with each
    /// index referencing a point in the pool.
    pub polys: Vec<u32>,
    /// One optional scalar value per polygon, parallel to the stream.
    pub properties: Vec<Option<f32>>,
}

/// Output bundle of one mesh build.
///
/// Owns all freshly built buffers; the point pool is the request's own
/// buffer moved through unchanged. Buffer elements are plain `f32`/`u32`,
/// ready for `bytemuck::cast_slice` into a GPU upload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeshBundle {
    /// Triangle vertex positions, 9 floats per triangle.
    pub triangle_points: Vec<f32>,
    /// Triangle normals, the polygon's averaged normal replicated per vertex.
    pub triangle_normals: Vec<f32>,
    /// Property values, replicated per triangle vertex; absent values are NaN.
    pub properties: Vec<f32>,
    /// The point pool, passed through from the request.
    pub points: Vec<f32>,
    /// Line segment endpoints as point-pool indices, 2 per segment.
    pub line_indices: Vec<u32>,
    /// `[min, max]` over all non-absent property values seen, or `None` if
    /// every value was absent.
    pub property_value_range: Option<[f32; 2]>,
    /// True when the output was cut short by buffer capacity (memory
    /// pressure shrank the buffers below the full primitive counts).
    pub truncated: bool,
}

impl MeshBundle {
    /// Returns the number of triangles in the bundle.
    #[must_use]
    pub fn num_triangles(&self) -> usize {
        self.triangle_points.len() / 9
    }

    /// Returns the number of line segments in the bundle.
    #[must_use]
    pub fn num_line_segments(&self) -> usize {
        self.line_indices.len() / 2
    }

    /// Returns true if the bundle holds no primitives.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangle_points.is_empty() && self.line_indices.is_empty()
    }

    /// Returns the triangle positions as raw bytes for GPU upload.
    #[must_use]
    pub fn triangle_points_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangle_points)
    }

    /// Returns the triangle normals as raw bytes for GPU upload.
    #[must_use]
    pub fn triangle_normals_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangle_normals)
    }

    /// Returns the line segment indices as raw bytes for GPU upload.
    #[must_use]
    pub fn line_indices_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.line_indices)
    }
}

/// Builds the full mesh for a grid surface.
///
/// This is the pipeline's outer boundary: it never panics on erroneous
/// input and no error crosses it. Any unrecoverable failure (malformed
/// stream, out-of-range index, allocation exhaustion) is reported through
/// the sink and collapsed into `None`; the caller treats absence as "no
/// mesh available this invocation".
pub fn make_full_mesh(request: MeshRequest, sink: &mut dyn DiagnosticsSink) -> Option<MeshBundle> {
    make_full_mesh_with(request, &mut SystemAlloc, sink)
}

/// [`make_full_mesh`] with an explicit allocation strategy.
pub fn make_full_mesh_with(
    request: MeshRequest,
    alloc: &mut dyn AllocStrategy,
    sink: &mut dyn DiagnosticsSink,
) -> Option<MeshBundle> {
    match build_mesh(request, alloc, sink) {
        Ok(bundle) => bundle,
        Err(err) => {
            sink.failure(&err);
            None
        }
    }
}

fn build_mesh(
    request: MeshRequest,
    alloc: &mut dyn AllocStrategy,
    sink: &mut dyn DiagnosticsSink,
) -> Result<Option<MeshBundle>> {
    let counts = count_primitives(&request.polys)?;
    // The actual capacities may be smaller than `counts` under memory
    // pressure; the buffer lengths carry them from here on.
    let Some((mut arrays, _shrunk)) = allocate_mesh_arrays(counts, alloc, sink) else {
        return Ok(None);
    };

    let point_count = request.points.len() / 3;
    let mut range = PropertyRange::new();

    // Write cursors into the fixed-capacity buffers
    let mut tri_cursor = 0;
    let mut prop_cursor = 0;
    let mut line_cursor = 0;

    let mut truncated = false;
    let mut polygon_index = 0;
    let mut i = 0;
    let mut polygon = Vec::new();

    while i < request.polys.len() {
        let n = request.polys[i] as usize;

        // Early termination on buffer capacity: a shrunk buffer truncates
        // the output instead of overflowing. Checked at whole-polygon
        // granularity, against the worst case of n-2 triangles.
        if tri_cursor + (n - 2) * 9 > arrays.triangle_points.len()
            || line_cursor + n * 2 > arrays.line_indices.len()
        {
            truncated = true;
            sink.truncated(polygon_index);
            break;
        }

        let property = request.properties.get(polygon_index).copied().flatten();
        range.observe(property);

        // Line segments for every edge, closing the loop back to the first
        // vertex, referencing original point-pool indices.
        for j in 0..n {
            arrays.line_indices[line_cursor] = request.polys[i + 1 + j];
            arrays.line_indices[line_cursor + 1] = request.polys[i + 1 + (j + 1) % n];
            line_cursor += 2;
        }

        polygon.clear();
        for p in 0..n {
            let idx = request.polys[i + 1 + p];
            let base = idx as usize * 3;
            if base + 3 > request.points.len() {
                return Err(SubgridError::PointIndexOutOfRange {
                    index: idx,
                    count: point_count,
                });
            }
            polygon.push(Vec3::new(
                request.points[base],
                request.points[base + 1],
                request.points[base + 2],
            ));
        }

        // The triangulator works in 2D, so the (assumed planar) polygon is
        // projected onto the plane through its points first. Polygons whose
        // leading vertices are collinear have no usable plane and are
        // skipped; their edge lines were still emitted above.
        let Some(basis) = geometry::projection_basis(&polygon) else {
            sink.degenerate_polygon(polygon_index);
            polygon_index += 1;
            i += n + 1;
            continue;
        };
        let flat = geometry::project_polygon(&polygon, &basis);
        let triangles = geometry::triangulate(&flat)?;
        let normal = geometry::average_normal(&polygon, &triangles);
        let property_value = property.unwrap_or(f32::NAN);

        for &t in &triangles {
            let point = polygon[t];
            arrays.triangle_points[tri_cursor] = point.x;
            arrays.triangle_points[tri_cursor + 1] = point.y;
            arrays.triangle_points[tri_cursor + 2] = point.z;

            arrays.triangle_normals[tri_cursor] = normal.x;
            arrays.triangle_normals[tri_cursor + 1] = normal.y;
            arrays.triangle_normals[tri_cursor + 2] = normal.z;

            arrays.properties[prop_cursor] = property_value;

            tri_cursor += 3;
            prop_cursor += 1;
        }

        polygon_index += 1;
        i += n + 1;
    }

    sink.completed(polygon_index, tri_cursor / 9, line_cursor / 2);

    Ok(Some(package(
        arrays, request.points, range, truncated, tri_cursor, prop_cursor, line_cursor,
    )))
}

/// Trims the buffers to their written lengths and assembles the bundle.
fn package(
    mut arrays: MeshArrays,
    points: Vec<f32>,
    range: PropertyRange,
    truncated: bool,
    tri_cursor: usize,
    prop_cursor: usize,
    line_cursor: usize,
) -> MeshBundle {
    // Degenerate polygons and conservative truncation can leave the buffers
    // partially filled even at full capacity.
    arrays.triangle_points.truncate(tri_cursor);
    arrays.triangle_normals.truncate(tri_cursor);
    arrays.properties.truncate(prop_cursor);
    arrays.line_indices.truncate(line_cursor);

    MeshBundle {
        triangle_points: arrays.triangle_points,
        triangle_normals: arrays.triangle_normals,
        properties: arrays.properties,
        points,
        line_indices: arrays.line_indices,
        property_value_range: range.bounds(),
        truncated,
    }
}
