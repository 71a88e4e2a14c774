#![allow(clippy::cast_precision_loss)]
//! Integration tests for the grid mesh pipeline behind the public facade.

use proptest::prelude::*;
use subgrid::{ColorMapRegistry, LogSink, MeshRequest, MeshWorker};

/// Builds a request holding one regular convex n-gon on a tilted plane.
fn regular_ngon_request(n: usize, property: f32) -> MeshRequest {
    let mut points = Vec::with_capacity(n * 3);
    for k in 0..n {
        let angle = std::f32::consts::TAU * k as f32 / n as f32;
        let (x, y) = (angle.cos(), angle.sin());
        // Planar but not axis-aligned
        points.extend([x, y, 0.3 * x + 0.1 * y]);
    }
    let mut polys = vec![u32::try_from(n).unwrap()];
    polys.extend((0..n).map(|k| u32::try_from(k).unwrap()));
    MeshRequest {
        points,
        polys,
        properties: vec![Some(property)],
    }
}

/// A small two-quad ridge surface used by several scenarios.
fn ridge_request() -> MeshRequest {
    MeshRequest {
        points: vec![
            0.0, 0.0, 0.0, //
            1.0, 0.0, 0.5, //
            1.0, 1.0, 0.5, //
            0.0, 1.0, 0.0, //
            2.0, 0.0, 0.0, //
            2.0, 1.0, 0.0,
        ],
        polys: vec![4, 0, 1, 2, 3, 4, 1, 4, 5, 2],
        properties: vec![Some(0.12), Some(0.34)],
    }
}

/// Scenario walk-through of the full pipeline surface.
#[test]
fn test_pipeline_scenarios() {
    // Two-quad surface: counts, range, pass-through pool
    {
        let bundle = subgrid::make_full_mesh(ridge_request(), &mut LogSink).expect("mesh");
        assert_eq!(bundle.num_triangles(), 4);
        assert_eq!(bundle.num_line_segments(), 8);
        assert_eq!(bundle.property_value_range, Some([0.12, 0.34]));
        assert_eq!(bundle.points, ridge_request().points);
        assert!(!bundle.truncated);

        // Replicated property values: 3 per triangle, grouped per polygon
        assert_eq!(bundle.properties.len(), 12);
        assert!(bundle.properties[..6].iter().all(|&v| (v - 0.12).abs() < 1e-6));
        assert!(bundle.properties[6..].iter().all(|&v| (v - 0.34).abs() < 1e-6));
    }

    // Same request through the worker boundary gives identical buffers
    {
        let direct = subgrid::make_full_mesh(ridge_request(), &mut LogSink).expect("mesh");
        let worker = MeshWorker::spawn().expect("spawn");
        let via_worker = worker.build(ridge_request()).expect("send").expect("mesh");

        assert_eq!(direct.triangle_points, via_worker.triangle_points);
        assert_eq!(direct.triangle_normals, via_worker.triangle_normals);
        assert_eq!(direct.line_indices, via_worker.line_indices);
        assert_eq!(direct.properties, via_worker.properties);
    }

    // Property range feeds color mapping end to end
    {
        let bundle = subgrid::make_full_mesh(ridge_request(), &mut LogSink).expect("mesh");
        let range = bundle.property_value_range.expect("range");
        let registry = ColorMapRegistry::new();
        let viridis = registry.get("viridis").expect("viridis");

        let low = viridis.sample_in_range(range[0], range);
        let high = viridis.sample_in_range(range[1], range);
        assert_eq!(low, viridis.sample(0.0));
        assert_eq!(high, viridis.sample(1.0));
    }

    // Request and bundle are serializable messages
    {
        let json = serde_json::to_string(&ridge_request()).expect("serialize");
        let round: MeshRequest = serde_json::from_str(&json).expect("deserialize");
        let a = subgrid::make_full_mesh(ridge_request(), &mut LogSink).expect("mesh");
        let b = subgrid::make_full_mesh(round, &mut LogSink).expect("mesh");
        assert_eq!(a.triangle_points, b.triangle_points);
    }
}

proptest! {
    /// A convex n-gon with no memory pressure emits exactly n-2 triangles
    /// and n line segments, every output property equal to the input.
    #[test]
    fn prop_convex_polygon_counts(n in 3usize..24) {
        let bundle = subgrid::make_full_mesh(regular_ngon_request(n, 7.5), &mut LogSink)
            .expect("mesh");
        prop_assert_eq!(bundle.num_triangles(), n - 2);
        prop_assert_eq!(bundle.num_line_segments(), n);
        prop_assert!(bundle.properties.iter().all(|&v| (v - 7.5).abs() < 1e-6));
        prop_assert_eq!(bundle.property_value_range, Some([7.5, 7.5]));
        prop_assert!(!bundle.truncated);
    }

    /// Triangle and line counts from the counter match the built buffers
    /// for arbitrary mixed fans of convex polygons.
    #[test]
    fn prop_counter_matches_builder(sizes in prop::collection::vec(3usize..9, 1..8)) {
        // One regular n-gon per entry, each with its own point block
        let mut points = Vec::new();
        let mut polys = Vec::new();
        let mut properties = Vec::new();
        let mut base = 0u32;
        for (poly_idx, &n) in sizes.iter().enumerate() {
            for k in 0..n {
                let angle = std::f32::consts::TAU * k as f32 / n as f32;
                points.extend([angle.cos(), angle.sin(), poly_idx as f32]);
            }
            polys.push(u32::try_from(n).unwrap());
            polys.extend((0..n).map(|k| base + u32::try_from(k).unwrap()));
            properties.push(Some(poly_idx as f32));
            base += u32::try_from(n).unwrap();
        }

        let counts = subgrid::count_primitives(&polys).unwrap();
        let bundle = subgrid::make_full_mesh(
            MeshRequest { points, polys, properties },
            &mut LogSink,
        ).expect("mesh");

        prop_assert_eq!(bundle.num_triangles(), counts.triangles);
        prop_assert_eq!(bundle.num_line_segments(), counts.line_segments);
    }
}
