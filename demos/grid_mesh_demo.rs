#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
//! Grid mesh pipeline demonstration on a synthetic subsurface horizon.
//!
//! Run with: cargo run --example `grid_mesh_demo`

use subgrid::{ColorMapRegistry, MeshRequest, MeshWorker};

/// Builds an nx-by-ny quad grid over a folded horizon surface, with a
/// synthetic porosity property per cell.
fn horizon_request(nx: usize, ny: usize) -> MeshRequest {
    let mut points = Vec::with_capacity((nx + 1) * (ny + 1) * 3);
    for j in 0..=ny {
        for i in 0..=nx {
            let x = i as f32;
            let y = j as f32;
            let depth = 2000.0 + 40.0 * (x * 0.3).sin() + 25.0 * (y * 0.2).cos();
            points.extend([x * 50.0, y * 50.0, depth]);
        }
    }

    let mut polys = Vec::with_capacity(nx * ny * 5);
    let mut properties = Vec::with_capacity(nx * ny);
    let stride = (nx + 1) as u32;
    for j in 0..ny {
        for i in 0..nx {
            let v0 = j as u32 * stride + i as u32;
            polys.extend([4, v0, v0 + 1, v0 + 1 + stride, v0 + stride]);
            // Porosity-like property, with a dead zone in one corner
            let porosity = 0.05 + 0.25 * ((i as f32 * 0.4).sin().abs());
            properties.push((i + j > 2).then_some(porosity));
        }
    }

    MeshRequest {
        points,
        polys,
        properties,
    }
}

fn main() {
    env_logger::init();

    let worker = MeshWorker::spawn().expect("Failed to spawn mesh worker");
    let request = horizon_request(40, 30);
    println!(
        "Submitting grid: {} points, {} polygons",
        request.points.len() / 3,
        request.properties.len()
    );

    let bundle = worker
        .build(request)
        .expect("worker disconnected")
        .expect("no mesh produced");

    println!(
        "Mesh: {} triangles, {} line segments, truncated: {}",
        bundle.num_triangles(),
        bundle.num_line_segments(),
        bundle.truncated
    );

    if let Some(range) = bundle.property_value_range {
        println!("Property range: [{:.3}, {:.3}]", range[0], range[1]);

        let registry = ColorMapRegistry::new();
        let viridis = registry.get("viridis").expect("viridis registered");
        let mid = viridis.sample_in_range((range[0] + range[1]) * 0.5, range);
        println!(
            "Mid-range viridis color: ({:.3}, {:.3}, {:.3})",
            mid.x, mid.y, mid.z
        );
    }
}
