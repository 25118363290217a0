//! # Hyperform Prelude
//!
//! Commonly used types in one import.
//!
//! ## Usage
//!
//! ```rust
//! use hyperform::prelude::*;
//!
//! let request = GeometryRequest::builder(GeometryKind::Sierpinski)
//!     .with_complexity(3)
//!     .build()
//!     .unwrap();
//!
//! match generate(&request).unwrap().output {
//!     GeometryOutput::Mesh(mesh) => assert_eq!(mesh.topology, Topology::Triangles),
//!     GeometryOutput::Bundle(_) => unreachable!(),
//! }
//! ```

// Requests and dispatch
pub use crate::generator::{
    generate, Generated, GeometryKind, GeometryOutput, GeometryRequest, Generator,
    GeneratorConfig, HopfStyle, HypercubeStyle,
};

// Geometry buffers
pub use crate::gfx::geometry::{FiberBundle, FiberMesh, MeshBuffers, Topology};
pub use crate::gfx::vertex::{ColoredVertex3D, Vertex3D};

// Errors and diagnostics
pub use crate::error::{GeometryError, GeometryResult};
pub use crate::performance::{GenerationMonitor, GenerationReport};

// Common external math types
pub use cgmath::{InnerSpace, Vector3};
