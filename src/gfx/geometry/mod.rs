//! # Procedural Geometry Generation
//!
//! Every object family the engine supports is generated here, as plain CPU-side
//! buffers ready for upload by a renderer.
//!
//! ## Families
//!
//! - **Hypercubes** ([`hypercube`]): 3D through 10D cubes projected to 3D
//! - **Parametric surfaces** ([`parametric`]): Klein bottle, Möbius strip,
//!   torus knot, golden and π spirals
//! - **Hopf fibrations** ([`hopf`]): fibers of `S³ → S²` as points, lines,
//!   tubes and ribbons
//! - **Fractals** ([`fractal`]): Sierpinski tetrahedron, Koch snowflake spikes
//! - **Fields** ([`field`]): quantum probability shells, 3D Julia set
//!
//! ## Usage
//!
//! ```rust
//! use hyperform::gfx::geometry::{generate_hypercube, Topology};
//!
//! let tesseract = generate_hypercube(4, 2.0).unwrap();
//! assert_eq!(tesseract.topology, Topology::Lines);
//! assert_eq!(tesseract.vertex_count(), 16);
//! ```

pub mod field;
pub mod fractal;
pub mod hopf;
pub mod hypercube;
pub mod parametric;
pub mod primitives;
pub mod spline;
pub mod sweep;
pub mod vector;

pub use field::*;
pub use fractal::*;
pub use hopf::*;
pub use hypercube::*;
pub use parametric::*;
pub use primitives::*;

use cgmath::{Vector2, Vector3};

use crate::error::{GeometryError, GeometryResult};
use vector::to_array;

/// How the index buffer of a [`MeshBuffers`] is to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    /// One index per point.
    Points,
    /// Two indices per line segment.
    Lines,
    /// Three indices per triangle (counter-clockwise winding).
    Triangles,
}

impl Topology {
    /// Number of indices making up one primitive.
    pub fn arity(self) -> usize {
        match self {
            Topology::Points => 1,
            Topology::Lines => 2,
            Topology::Triangles => 3,
        }
    }
}

/// Generated geometry data ready for GPU upload.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBuffers {
    /// How `indices` are grouped into primitives
    pub topology: Topology,
    /// Vertex positions (x, y, z)
    pub positions: Vec<[f32; 3]>,
    /// Unit normals, one per position, when the family defines them
    pub normals: Option<Vec<[f32; 3]>>,
    /// Texture coordinates (u, v), one per position
    pub uvs: Option<Vec<[f32; 2]>>,
    /// Linear RGB vertex colors, one per position
    pub colors: Option<Vec<[f32; 3]>>,
    /// Primitive indices into `positions`
    pub indices: Vec<u32>,
    /// Samples skipped or repaired because they were degenerate
    pub degenerate_samples: usize,
}

impl MeshBuffers {
    /// Create an empty mesh of the given topology with no optional channels.
    pub fn empty(topology: Topology) -> Self {
        Self {
            topology,
            positions: Vec::new(),
            normals: None,
            uvs: None,
            colors: None,
            indices: Vec::new(),
            degenerate_samples: 0,
        }
    }

    /// Get the number of vertices in this mesh
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of primitives (points, lines or triangles)
    pub fn primitive_count(&self) -> usize {
        self.indices.len() / self.topology.arity()
    }

    /// Get the number of triangles; zero for point and line meshes
    pub fn triangle_count(&self) -> usize {
        match self.topology {
            Topology::Triangles => self.indices.len() / 3,
            _ => 0,
        }
    }

    /// A mesh with no valid vertices is a legal, renderable no-op.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Check the shape invariants every generator guarantees.
    pub fn validate(&self) -> GeometryResult<()> {
        let count = self.positions.len();

        if let Some(normals) = &self.normals {
            if normals.len() != count {
                return Err(GeometryError::malformed(format!(
                    "{} normals for {count} positions",
                    normals.len()
                )));
            }
        }
        if let Some(uvs) = &self.uvs {
            if uvs.len() != count {
                return Err(GeometryError::malformed(format!(
                    "{} uvs for {count} positions",
                    uvs.len()
                )));
            }
        }
        if let Some(colors) = &self.colors {
            if colors.len() != count {
                return Err(GeometryError::malformed(format!(
                    "{} colors for {count} positions",
                    colors.len()
                )));
            }
        }

        let arity = self.topology.arity();
        if self.indices.len() % arity != 0 {
            return Err(GeometryError::malformed(format!(
                "{} indices is not a multiple of {arity} for {:?}",
                self.indices.len(),
                self.topology
            )));
        }
        if let Some(bad) = self.indices.iter().find(|&&i| i as usize >= count) {
            return Err(GeometryError::malformed(format!(
                "index {bad} out of bounds for {count} positions"
            )));
        }
        Ok(())
    }
}

/// A single vertex handed to [`MeshBuilder::push_vertex`].
///
/// Channels the builder has not enabled are ignored.
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Vector3<f32>,
    pub normal: Vector3<f32>,
    pub uv: Vector2<f32>,
    pub color: [f32; 3],
}

impl Vertex {
    pub fn at(position: Vector3<f32>) -> Self {
        Self {
            position,
            normal: vector::UP,
            uv: Vector2::new(0.0, 0.0),
            color: [1.0, 1.0, 1.0],
        }
    }

    pub fn with_normal(mut self, normal: Vector3<f32>) -> Self {
        self.normal = normal;
        self
    }

    pub fn with_uv(mut self, u: f32, v: f32) -> Self {
        self.uv = Vector2::new(u, v);
        self
    }

    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }
}

/// Accumulates vertices and primitives into a [`MeshBuffers`].
#[derive(Debug, Clone)]
pub struct MeshBuilder {
    mesh: MeshBuffers,
}

impl MeshBuilder {
    pub fn new(topology: Topology) -> Self {
        Self {
            mesh: MeshBuffers::empty(topology),
        }
    }

    pub fn with_normals(mut self) -> Self {
        self.mesh.normals.get_or_insert_with(Vec::new);
        self
    }

    pub fn with_uvs(mut self) -> Self {
        self.mesh.uvs.get_or_insert_with(Vec::new);
        self
    }

    pub fn with_colors(mut self) -> Self {
        self.mesh.colors.get_or_insert_with(Vec::new);
        self
    }

    pub fn reserve(&mut self, vertices: usize, indices: usize) {
        self.mesh.positions.reserve(vertices);
        if let Some(normals) = &mut self.mesh.normals {
            normals.reserve(vertices);
        }
        if let Some(uvs) = &mut self.mesh.uvs {
            uvs.reserve(vertices);
        }
        if let Some(colors) = &mut self.mesh.colors {
            colors.reserve(vertices);
        }
        self.mesh.indices.reserve(indices);
    }

    /// Index the next pushed vertex will receive.
    pub fn vertex_count(&self) -> u32 {
        self.mesh.positions.len() as u32
    }

    pub fn push_vertex(&mut self, vertex: Vertex) -> u32 {
        let index = self.vertex_count();
        self.mesh.positions.push(to_array(vertex.position));
        if let Some(normals) = &mut self.mesh.normals {
            normals.push(to_array(vertex.normal));
        }
        if let Some(uvs) = &mut self.mesh.uvs {
            uvs.push([vertex.uv.x, vertex.uv.y]);
        }
        if let Some(colors) = &mut self.mesh.colors {
            colors.push(vertex.color);
        }
        index
    }

    pub fn push_point(&mut self, a: u32) {
        debug_assert_eq!(self.mesh.topology, Topology::Points);
        self.mesh.indices.push(a);
    }

    pub fn push_line(&mut self, a: u32, b: u32) {
        debug_assert_eq!(self.mesh.topology, Topology::Lines);
        self.mesh.indices.extend_from_slice(&[a, b]);
    }

    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        debug_assert_eq!(self.mesh.topology, Topology::Triangles);
        self.mesh.indices.extend_from_slice(&[a, b, c]);
    }

    /// Count samples that were skipped or repaired.
    pub fn record_degenerate(&mut self, count: usize) {
        self.mesh.degenerate_samples += count;
    }

    /// Merge a child mesh, offsetting its indices by the current vertex count.
    ///
    /// Channels enabled on this builder but missing on the child are filled
    /// with defaults so the channel lengths stay equal to the position count.
    pub fn append(&mut self, child: MeshBuffers) {
        debug_assert_eq!(self.mesh.topology, child.topology);
        let offset = self.vertex_count();
        let count = child.positions.len();

        self.mesh.positions.extend(child.positions);
        if let Some(normals) = &mut self.mesh.normals {
            match child.normals {
                Some(n) => normals.extend(n),
                None => normals.extend(std::iter::repeat(to_array(vector::UP)).take(count)),
            }
        }
        if let Some(uvs) = &mut self.mesh.uvs {
            match child.uvs {
                Some(u) => uvs.extend(u),
                None => uvs.extend(std::iter::repeat([0.0, 0.0]).take(count)),
            }
        }
        if let Some(colors) = &mut self.mesh.colors {
            match child.colors {
                Some(c) => colors.extend(c),
                None => colors.extend(std::iter::repeat([1.0, 1.0, 1.0]).take(count)),
            }
        }
        self.mesh
            .indices
            .extend(child.indices.into_iter().map(|i| i + offset));
        self.mesh.degenerate_samples += child.degenerate_samples;
    }

    pub fn build(self) -> MeshBuffers {
        debug_assert!(self.mesh.validate().is_ok());
        self.mesh
    }
}

/// One fiber of a tube or ribbon Hopf bundle, with its own material tint.
#[derive(Debug, Clone, PartialEq)]
pub struct FiberMesh {
    pub mesh: MeshBuffers,
    /// Linear RGB tint derived from the fiber's base-sphere parameter
    pub tint: [f32; 3],
    /// Parameter `t ∈ [0, 1)` of the fiber's base point
    pub base_parameter: f32,
}

/// An ordered list of independent fiber meshes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FiberBundle {
    pub fibers: Vec<FiberMesh>,
    /// Samples skipped or fibers dropped as degenerate
    pub degenerate_samples: usize,
}

impl FiberBundle {
    pub fn len(&self) -> usize {
        self.fibers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fibers.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.fibers.iter().map(|f| f.mesh.vertex_count()).sum()
    }

    pub fn index_count(&self) -> usize {
        self.fibers.iter().map(|f| f.mesh.indices.len()).sum()
    }

    pub fn validate(&self) -> GeometryResult<()> {
        self.fibers.iter().try_for_each(|f| f.mesh.validate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vector::vec3;

    fn triangle() -> MeshBuffers {
        let mut builder = MeshBuilder::new(Topology::Triangles).with_normals();
        let a = builder.push_vertex(Vertex::at(vec3(0.0, 0.0, 0.0)));
        let b = builder.push_vertex(Vertex::at(vec3(1.0, 0.0, 0.0)));
        let c = builder.push_vertex(Vertex::at(vec3(0.0, 1.0, 0.0)));
        builder.push_triangle(a, b, c);
        builder.build()
    }

    #[test]
    fn test_builder_channels() {
        let mesh = triangle();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.normals.as_ref().map(Vec::len), Some(3));
        assert!(mesh.uvs.is_none());
        assert!(mesh.colors.is_none());
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_append_offsets_indices() {
        let mut builder = MeshBuilder::new(Topology::Triangles).with_normals().with_colors();
        builder.append(triangle());
        builder.append(triangle());
        let mesh = builder.build();

        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);
        // colors were missing on the children and get filled
        assert_eq!(mesh.colors.as_ref().map(Vec::len), Some(6));
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_validate_catches_bad_meshes() {
        let mut mesh = triangle();
        mesh.indices.push(7);
        assert!(matches!(mesh.validate(), Err(GeometryError::MalformedMesh { .. })));

        let mut mesh = triangle();
        mesh.indices.truncate(2);
        assert!(mesh.validate().is_err());

        let mut mesh = triangle();
        mesh.normals = Some(vec![[0.0, 0.0, 1.0]]);
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn test_empty_mesh_is_valid() {
        let mesh = MeshBuffers::empty(Topology::Points);
        assert!(mesh.is_empty());
        assert_eq!(mesh.primitive_count(), 0);
        assert!(mesh.validate().is_ok());
    }
}
