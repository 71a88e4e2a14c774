//! Output buffer allocation with shrink-and-retry backpressure.
//!
//! Large grids can exceed available memory. Rather than failing hard, the
//! allocator reduces the requested primitive counts by 10% of the original
//! baseline on every failed attempt and retries, preferring a smaller
//! (truncated) mesh over no mesh at all. Only when the shrunk triangle count
//! reaches zero does the pipeline report absence.

use subgrid_core::DiagnosticsSink;

use crate::counts::PrimitiveCounts;

/// Allocation seam for the mesh output buffers.
///
/// The system implementation reserves through the global allocator; tests
/// inject failing strategies to exercise the degradation path.
pub trait AllocStrategy {
    /// Attempts to allocate a zeroed `f32` buffer of exactly `len` elements.
    fn try_alloc_f32(&mut self, len: usize) -> Option<Vec<f32>>;

    /// Attempts to allocate a zeroed `u32` buffer of exactly `len` elements.
    fn try_alloc_u32(&mut self, len: usize) -> Option<Vec<u32>>;
}

/// Allocates through the global allocator using fallible reservation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemAlloc;

impl AllocStrategy for SystemAlloc {
    fn try_alloc_f32(&mut self, len: usize) -> Option<Vec<f32>> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(len).ok()?;
        buf.resize(len, 0.0);
        Some(buf)
    }

    fn try_alloc_u32(&mut self, len: usize) -> Option<Vec<u32>> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(len).ok()?;
        buf.resize(len, 0);
        Some(buf)
    }
}

/// Fixed-capacity output buffers for one mesh build.
///
/// Elements are plain `f32`/`u32`, so callers can `bytemuck::cast_slice`
/// the finished buffers directly into GPU upload paths.
#[derive(Debug, Default)]
pub struct MeshArrays {
    /// Triangle vertex positions: 3 floats x 3 vertices per triangle.
    pub triangle_points: Vec<f32>,
    /// Triangle normals, one normal replicated per triangle vertex.
    pub triangle_normals: Vec<f32>,
    /// Property values, replicated per triangle vertex.
    pub properties: Vec<f32>,
    /// Line segment endpoints as point-pool indices, 2 per segment.
    pub line_indices: Vec<u32>,
}

fn try_create_arrays(counts: PrimitiveCounts, alloc: &mut dyn AllocStrategy) -> Option<MeshArrays> {
    Some(MeshArrays {
        triangle_points: alloc.try_alloc_f32(counts.triangles * 9)?,
        triangle_normals: alloc.try_alloc_f32(counts.triangles * 9)?,
        properties: alloc.try_alloc_f32(counts.triangles * 3)?,
        line_indices: alloc.try_alloc_u32(counts.line_segments * 2)?,
    })
}

/// Allocates the mesh output buffers, shrinking the target counts on failure.
///
/// Each retry reduces both counts by 10% of the *original* request (linear
/// shrinkage from the baseline, not geometric), reported through the sink.
/// Returns the buffers together with the counts they were actually sized
/// for, or `None` once the shrunk triangle count reaches zero.
pub fn allocate_mesh_arrays(
    counts: PrimitiveCounts,
    alloc: &mut dyn AllocStrategy,
    sink: &mut dyn DiagnosticsSink,
) -> Option<(MeshArrays, PrimitiveCounts)> {
    // Shrink steps are fixed fractions of the baseline; at least 1 so the
    // loop always terminates for small requests.
    let triangle_step = (counts.triangles / 10).max(1);
    let segment_step = (counts.line_segments / 10).max(1);

    let mut current = counts;
    loop {
        if let Some(arrays) = try_create_arrays(current, alloc) {
            return Some((arrays, current));
        }
        let next_triangles = current.triangles.saturating_sub(triangle_step);
        sink.shrink_retry(current.triangles, next_triangles);
        current.triangles = next_triangles;
        current.line_segments = current.line_segments.saturating_sub(segment_step);
        if current.triangles == 0 {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Alloc strategy that fails any request above a fixed element budget.
    pub(crate) struct BudgetAlloc {
        pub budget: usize,
    }

    impl AllocStrategy for BudgetAlloc {
        fn try_alloc_f32(&mut self, len: usize) -> Option<Vec<f32>> {
            (len <= self.budget).then(|| vec![0.0; len])
        }

        fn try_alloc_u32(&mut self, len: usize) -> Option<Vec<u32>> {
            (len <= self.budget).then(|| vec![0; len])
        }
    }

    /// Sink that records shrink retries.
    #[derive(Default)]
    struct RecordingSink {
        retries: Vec<(usize, usize)>,
    }

    impl DiagnosticsSink for RecordingSink {
        fn shrink_retry(&mut self, from: usize, to: usize) {
            self.retries.push((from, to));
        }
    }

    /// Test that an unconstrained allocation succeeds at full size.
    #[test]
    fn test_allocates_full_size() {
        let counts = PrimitiveCounts {
            triangles: 10,
            line_segments: 15,
        };
        let mut sink = RecordingSink::default();
        let (arrays, actual) =
            allocate_mesh_arrays(counts, &mut SystemAlloc, &mut sink).unwrap();

        assert_eq!(actual, counts);
        assert_eq!(arrays.triangle_points.len(), 90);
        assert_eq!(arrays.triangle_normals.len(), 90);
        assert_eq!(arrays.properties.len(), 30);
        assert_eq!(arrays.line_indices.len(), 30);
        assert!(sink.retries.is_empty());
    }

    /// Test shrinkage by 10% of the original baseline per retry.
    #[test]
    fn test_linear_shrink_from_baseline() {
        let counts = PrimitiveCounts {
            triangles: 100,
            line_segments: 100,
        };
        // 100 triangles need 900 floats; a 700-element budget forces retries
        // until 70 triangles (630 floats) fit.
        let mut alloc = BudgetAlloc { budget: 700 };
        let mut sink = RecordingSink::default();
        let (arrays, actual) = allocate_mesh_arrays(counts, &mut alloc, &mut sink).unwrap();

        assert_eq!(actual.triangles, 70);
        assert_eq!(arrays.triangle_points.len(), 630);
        assert_eq!(sink.retries, vec![(100, 90), (90, 80), (80, 70)]);
    }

    /// Test exhaustion: counts shrink to zero and the allocator gives up.
    #[test]
    fn test_exhaustion_returns_none() {
        let counts = PrimitiveCounts {
            triangles: 10,
            line_segments: 10,
        };
        let mut alloc = BudgetAlloc { budget: 0 };
        let mut sink = RecordingSink::default();
        assert!(allocate_mesh_arrays(counts, &mut alloc, &mut sink).is_none());
        // 10 retries: 10 -> 9 -> ... -> 0
        assert_eq!(sink.retries.len(), 10);
    }

    /// Test that zero-count requests allocate empty buffers without retries.
    #[test]
    fn test_zero_counts() {
        let counts = PrimitiveCounts::default();
        let mut sink = RecordingSink::default();
        let (arrays, actual) =
            allocate_mesh_arrays(counts, &mut SystemAlloc, &mut sink).unwrap();
        assert_eq!(actual, counts);
        assert!(arrays.triangle_points.is_empty());
        assert!(arrays.line_indices.is_empty());
    }
}
