//! Hyperform
//!
//! Procedural geometry and projection engine: n-cubes, parametric surfaces,
//! Hopf fibrations, fractals and sampled fields as renderable mesh buffers.

pub mod error;
pub mod generator;
pub mod gfx;
pub mod performance;
pub mod prelude;

pub use error::{GeometryError, GeometryResult};
pub use generator::{generate, GeometryKind, GeometryRequest};
