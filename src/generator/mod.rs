//! # Generator
//!
//! The single entry point of the engine. Callers describe what they want with
//! a [`GeometryRequest`] and get back a [`Generated`] value: either one
//! [`MeshBuffers`](crate::gfx::geometry::MeshBuffers) or a
//! [`FiberBundle`](crate::gfx::geometry::FiberBundle) of independently tinted
//! sub-meshes, plus a report.
//!
//! ## Usage
//!
//! ```rust
//! use hyperform::generator::{generate, GeometryKind, GeometryRequest, HypercubeStyle};
//!
//! let request = GeometryRequest::builder(GeometryKind::Hypercube {
//!     dimension: 5,
//!     style: HypercubeStyle::Wireframe,
//! })
//! .build()
//! .unwrap();
//!
//! let generated = generate(&request).unwrap();
//! assert_eq!(generated.output.vertex_count(), 32);
//! ```
//!
//! Every call regenerates from scratch; nothing is cached between calls.

pub mod dispatch;
pub mod request;

pub use dispatch::{generate, Generated, GeometryOutput, Generator, GeneratorConfig};
pub use request::{
    GeometryKind, GeometryRequest, GeometryRequestBuilder, HopfStyle, HypercubeStyle,
};
