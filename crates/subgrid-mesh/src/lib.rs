//! Mesh-generation pipeline for irregular 3D grid surfaces.
//!
//! Turns a polygon-soup grid description (shared point pool, polygons with
//! heterogeneous vertex counts, per-polygon scalar property) into typed
//! triangle and line-segment buffers ready for GPU upload:
//! - [`count_primitives`] scans the polygon index stream once
//! - [`alloc`] sizes the output buffers, degrading gracefully under memory
//!   pressure via shrink-and-retry
//! - [`geometry`] projects each planar polygon into 2D, triangulates it with
//!   ear clipping, and estimates an averaged face normal
//! - [`make_full_mesh`] drives the stages and packages a [`MeshBundle`]

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod alloc;
pub mod counts;
pub mod geometry;
pub mod pipeline;

pub use alloc::{allocate_mesh_arrays, AllocStrategy, MeshArrays, SystemAlloc};
pub use counts::{count_primitives, PrimitiveCounts};
pub use pipeline::{make_full_mesh, make_full_mesh_with, MeshBundle, MeshRequest};
