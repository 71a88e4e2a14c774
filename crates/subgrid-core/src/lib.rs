//! Core foundations for subgrid-rs.
//!
//! This crate provides the shared building blocks used throughout subgrid-rs:
//! - [`SubgridError`] and the crate-wide [`Result`] alias
//! - [`DiagnosticsSink`] capability for pipeline observability
//! - [`PropertyRange`] min/max accumulation for scalar properties
//! - Color maps and RGB property-value decoding for map layers

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod color_maps;
pub mod diagnostics;
pub mod error;
pub mod range;

pub use color_maps::{ColorMap, ColorMapRegistry, ValueDecoder};
pub use diagnostics::{DiagnosticsSink, LogSink};
pub use error::{Result, SubgridError};
pub use range::PropertyRange;

// Re-export glam types for convenience
pub use glam::{Vec2, Vec3};
