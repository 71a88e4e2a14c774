//! Subsurface grid visualization support.
//!
//! subgrid-rs converts irregular 3D grid surfaces — polygon soups with a
//! shared point pool and a scalar property per polygon — into typed GPU
//! buffers (triangle positions, replicated normals and properties, line
//! segment indices), with graceful degradation under memory pressure. The
//! rendering framework consuming those buffers is an external collaborator;
//! this workspace ends at the buffer boundary.
//!
//! # Quick start
//!
//! ```
//! use subgrid::{LogSink, MeshRequest};
//!
//! let request = MeshRequest {
//!     points: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
//!     polys: vec![3, 0, 1, 2],
//!     properties: vec![Some(5.0)],
//! };
//! let bundle = subgrid::make_full_mesh(request, &mut LogSink).expect("mesh");
//! assert_eq!(bundle.num_triangles(), 1);
//! ```
//!
//! For interactive use, [`MeshWorker`] runs the same pipeline on a
//! dedicated thread and moves the buffers across the boundary without
//! copying.

pub mod worker;

pub use subgrid_core::{
    ColorMap, ColorMapRegistry, DiagnosticsSink, LogSink, PropertyRange, Result, SubgridError,
    ValueDecoder,
};
pub use subgrid_mesh::{
    count_primitives, make_full_mesh, make_full_mesh_with, AllocStrategy, MeshBundle, MeshRequest,
    PrimitiveCounts, SystemAlloc,
};
pub use worker::MeshWorker;

// Re-export glam types for convenience
pub use glam::{Vec2, Vec3};
