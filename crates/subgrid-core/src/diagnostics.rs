//! Diagnostics sink for the mesh pipeline.
//!
//! The pipeline reports non-functional events (allocation retries, skipped
//! polygons, truncation) through a [`DiagnosticsSink`] capability instead of
//! writing to a global console. [`LogSink`] forwards everything to the `log`
//! crate and is the default choice for applications; tests typically use a
//! recording implementation.

use crate::error::SubgridError;

/// Receives diagnostic events from the mesh pipeline.
///
/// All methods have empty default bodies, so implementations only override
/// the events they care about.
pub trait DiagnosticsSink {
    /// The buffer allocator failed and is retrying with reduced counts.
    fn shrink_retry(&mut self, triangles_from: usize, triangles_to: usize) {
        let _ = (triangles_from, triangles_to);
    }

    /// A degenerate polygon (collinear leading vertices) was skipped.
    fn degenerate_polygon(&mut self, face_index: usize) {
        let _ = face_index;
    }

    /// Output was truncated: the triangle buffer filled up before the
    /// polygon stream was exhausted.
    fn truncated(&mut self, polygons_processed: usize) {
        let _ = polygons_processed;
    }

    /// The pipeline finished and wrote the given primitive totals.
    fn completed(&mut self, polygons: usize, triangles: usize, line_segments: usize) {
        let _ = (polygons, triangles, line_segments);
    }

    /// The pipeline failed with an unrecoverable error.
    fn failure(&mut self, error: &SubgridError) {
        let _ = error;
    }
}

/// Default sink that forwards diagnostics to the `log` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticsSink for LogSink {
    fn shrink_retry(&mut self, triangles_from: usize, triangles_to: usize) {
        log::warn!("triangle count reduced from {triangles_from} to {triangles_to}");
    }

    fn degenerate_polygon(&mut self, face_index: usize) {
        log::warn!("skipping degenerate polygon at face index {face_index}");
    }

    fn truncated(&mut self, polygons_processed: usize) {
        log::warn!("mesh truncated after {polygons_processed} polygons (buffer capacity reached)");
    }

    fn completed(&mut self, polygons: usize, triangles: usize, line_segments: usize) {
        log::debug!("mesh built: {polygons} polygons, {triangles} triangles, {line_segments} line segments");
    }

    fn failure(&mut self, error: &SubgridError) {
        log::error!("mesh pipeline failed: {error}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test that default trait bodies are no-ops.
    #[test]
    fn test_default_methods_are_noops() {
        struct Silent;
        impl DiagnosticsSink for Silent {}

        let mut sink = Silent;
        sink.shrink_retry(100, 90);
        sink.degenerate_polygon(3);
        sink.truncated(7);
        sink.completed(10, 20, 40);
    }
}
