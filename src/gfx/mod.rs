//! # Graphics Module
//!
//! CPU-side geometry for a renderer to consume.
//!
//! - **Geometry** ([`geometry`]) - every procedural object family, emitted as
//!   [`MeshBuffers`] or [`FiberBundle`]
//! - **Vertex views** ([`vertex`]) - `bytemuck` interleaved vertex structs for
//!   zero-copy GPU upload
//!
//! Upload, drawing and disposal of GPU resources are the renderer's job.

pub mod geometry;
pub mod vertex;

pub use geometry::{FiberBundle, FiberMesh, MeshBuffers, MeshBuilder, Topology};
pub use vertex::{ColoredVertex3D, Vertex3D};
