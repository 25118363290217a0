//! # Vertex Data Structures
//!
//! GPU-compatible interleaved views of [`MeshBuffers`]. Both structs are
//! `#[repr(C)]` and `bytemuck::Pod`, so a renderer can upload them with
//! [`bytemuck::cast_slice`] and no copying.
//!
//! ## Usage
//!
//! ```no_run
//! use hyperform::gfx::geometry::{generate_klein_bottle, SurfaceGrid};
//! use hyperform::gfx::vertex::{index_bytes, ColoredVertex3D};
//!
//! let mesh = generate_klein_bottle(1.0, SurfaceGrid::square(64)).unwrap();
//! let vertices = ColoredVertex3D::interleave(&mesh);
//! let vertex_data: &[u8] = bytemuck::cast_slice(&vertices);
//! let index_data = index_bytes(&mesh);
//! ```

use super::geometry::MeshBuffers;

const DEFAULT_NORMAL: [f32; 3] = [0.0, 0.0, 1.0];
const DEFAULT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

/// A 3D vertex with position and normal data.
///
/// Attribute 0 is the position (3 × f32), attribute 1 the normal (3 × f32).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3D {
    /// 3D position coordinates [x, y, z]
    pub position: [f32; 3],
    /// 3D normal vector [nx, ny, nz] for lighting calculations
    pub normal: [f32; 3],
}

impl Vertex3D {
    /// Byte offsets of each attribute, in shader location order.
    pub const ATTRIBUTE_OFFSETS: [usize; 2] = [0, 12];

    pub const fn stride() -> usize {
        std::mem::size_of::<Self>()
    }

    /// Interleave positions and normals; meshes without normals get `+Z`.
    pub fn interleave(mesh: &MeshBuffers) -> Vec<Self> {
        mesh.positions
            .iter()
            .enumerate()
            .map(|(i, &position)| Self {
                position,
                normal: channel(&mesh.normals, i, DEFAULT_NORMAL),
            })
            .collect()
    }
}

/// A vertex carrying every optional channel of [`MeshBuffers`].
///
/// Attributes: position, normal, uv, color.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ColoredVertex3D {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    /// Linear RGB
    pub color: [f32; 3],
}

impl ColoredVertex3D {
    pub const ATTRIBUTE_OFFSETS: [usize; 4] = [0, 12, 24, 32];

    pub const fn stride() -> usize {
        std::mem::size_of::<Self>()
    }

    /// Interleave every channel, filling missing ones with `+Z` normals, zero
    /// uvs and white.
    pub fn interleave(mesh: &MeshBuffers) -> Vec<Self> {
        mesh.positions
            .iter()
            .enumerate()
            .map(|(i, &position)| Self {
                position,
                normal: channel(&mesh.normals, i, DEFAULT_NORMAL),
                uv: channel(&mesh.uvs, i, [0.0, 0.0]),
                color: channel(&mesh.colors, i, DEFAULT_COLOR),
            })
            .collect()
    }
}

fn channel<T: Copy>(values: &Option<Vec<T>>, i: usize, default: T) -> T {
    values
        .as_ref()
        .and_then(|v| v.get(i).copied())
        .unwrap_or(default)
}

/// Raw bytes of the index buffer (`u32` indices).
pub fn index_bytes(mesh: &MeshBuffers) -> &[u8] {
    bytemuck::cast_slice(&mesh.indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::{generate_hypercube, generate_uv_sphere};

    #[test]
    fn test_layouts_are_tightly_packed() {
        assert_eq!(Vertex3D::stride(), 24);
        assert_eq!(ColoredVertex3D::stride(), 44);
        assert_eq!(std::mem::offset_of!(ColoredVertex3D, color), ColoredVertex3D::ATTRIBUTE_OFFSETS[3]);
        assert_eq!(std::mem::offset_of!(ColoredVertex3D, uv), ColoredVertex3D::ATTRIBUTE_OFFSETS[2]);
    }

    #[test]
    fn test_interleave_keeps_channels() {
        let sphere = generate_uv_sphere(1.0, 8, 4);
        let vertices = ColoredVertex3D::interleave(&sphere);
        assert_eq!(vertices.len(), sphere.vertex_count());
        let normals = sphere.normals.as_ref().unwrap();
        for (v, n) in vertices.iter().zip(normals) {
            assert_eq!(&v.normal, n);
        }

        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), vertices.len() * ColoredVertex3D::stride());
        assert_eq!(index_bytes(&sphere).len(), sphere.indices.len() * 4);
    }

    #[test]
    fn test_interleave_fills_missing_channels() {
        let wireframe = generate_hypercube(4, 2.0).unwrap();
        assert!(wireframe.normals.is_none());
        let vertices = Vertex3D::interleave(&wireframe);
        assert_eq!(vertices.len(), 16);
        assert!(vertices.iter().all(|v| v.normal == DEFAULT_NORMAL));

        let colored = ColoredVertex3D::interleave(&wireframe);
        assert!(colored.iter().all(|v| v.color == DEFAULT_COLOR && v.uv == [0.0, 0.0]));
    }
}
