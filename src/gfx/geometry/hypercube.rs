//! # N-Cube Projection
//!
//! Enumerates the `2^n` corners of an n-dimensional cube from bit patterns,
//! folds the extra axes into a perspective divisor and derives the 1-skeleton
//! from Hamming-distance-1 index pairs.
//!
//! ## Projection
//!
//! ```text
//! w       = Σ_{k=3}^{n-1} ±s
//! offset  = max(n + 1, (n - 3)·s + 1)
//! (x,y,z) ↦ (x,y,z) / (w + offset)
//! ```
//!
//! `|w| ≤ (n - 3)·s`, so the divisor never drops below 1 for any half-size.
//! For `s = 2` and `n ≤ 6` the offset is the classic `n + 1`.

use super::vector::{is_finite, try_normalize, vec3, UP};
use super::{MeshBuffers, MeshBuilder, Topology, Vertex};
use crate::error::{ensure_positive, GeometryError, GeometryResult};
use cgmath::Vector3;

pub const MIN_HYPERCUBE_DIMENSION: u32 = 3;
pub const MAX_HYPERCUBE_DIMENSION: u32 = 10;

/// Highest dimension that supports the shaded (faced) style.
pub const MAX_SHADED_DIMENSION: u32 = 4;

fn check_dimension(dimension: u32) -> GeometryResult<()> {
    if !(MIN_HYPERCUBE_DIMENSION..=MAX_HYPERCUBE_DIMENSION).contains(&dimension) {
        return Err(GeometryError::invalid(
            "dimension",
            format!(
                "must be in [{MIN_HYPERCUBE_DIMENSION}, {MAX_HYPERCUBE_DIMENSION}], got {dimension}"
            ),
        ));
    }
    Ok(())
}

/// Additive divisor offset for a cube of the given dimension and half-size.
pub fn projection_offset(dimension: u32, half_size: f32) -> f32 {
    let extra_axes = dimension.saturating_sub(3) as f32;
    (dimension as f32 + 1.0).max(extra_axes * half_size + 1.0)
}

/// Project corner `index` of an n-cube to 3D.
///
/// Returns `None` if the projection is not finite.
pub fn project_corner(index: u32, dimension: u32, half_size: f32) -> Option<Vector3<f32>> {
    let coordinate = |axis: u32| {
        if index & (1 << axis) != 0 {
            half_size
        } else {
            -half_size
        }
    };

    let w: f32 = (3..dimension).map(coordinate).sum();
    let divisor = w + projection_offset(dimension, half_size);
    let point = vec3(coordinate(0), coordinate(1), coordinate(2)) / divisor;
    is_finite(point).then_some(point)
}

/// Projected 3D positions of all `2^n` corners, in index order.
pub fn hypercube_vertices(dimension: u32, half_size: f32) -> GeometryResult<Vec<Vector3<f32>>> {
    check_dimension(dimension)?;
    ensure_positive("half_size", half_size)?;

    // every corner must survive so that edge indices stay valid; the divisor
    // bound guarantees this for finite half sizes
    (0..1u32 << dimension)
        .map(|i| {
            project_corner(i, dimension, half_size).ok_or_else(|| {
                GeometryError::invalid("half_size", format!("corner {i} projects to infinity"))
            })
        })
        .collect()
}

/// Every corner pair whose indices differ in exactly one bit.
pub fn hypercube_edges(dimension: u32) -> GeometryResult<Vec<[u32; 2]>> {
    check_dimension(dimension)?;
    let count = 1u32 << dimension;
    let mut edges = Vec::with_capacity((dimension as usize) << (dimension - 1));
    for i in 0..count {
        for axis in 0..dimension {
            let j = i | (1 << axis);
            if j != i {
                edges.push([i, j]);
            }
        }
    }
    Ok(edges)
}

/// Triangulated faces of the base 3-cube (corners with all extra-axis bits
/// clear), wound outward. Only 3D and 4D cubes have faces.
pub fn hypercube_faces(dimension: u32) -> GeometryResult<Vec<[u32; 3]>> {
    check_dimension(dimension)?;
    if dimension > MAX_SHADED_DIMENSION {
        return Err(GeometryError::invalid(
            "dimension",
            format!("faces are only defined up to {MAX_SHADED_DIMENSION}D, got {dimension}D"),
        ));
    }

    let mut faces = Vec::with_capacity(12);
    for axis in 0..3u32 {
        let b = (axis + 1) % 3;
        let c = (axis + 2) % 3;
        for positive in [false, true] {
            let fixed = if positive { 1 << axis } else { 0 };
            // counter-clockwise seen from +axis since b × c = axis
            let mut quad = [
                fixed,
                fixed | (1 << b),
                fixed | (1 << b) | (1 << c),
                fixed | (1 << c),
            ];
            if !positive {
                quad.reverse();
            }
            faces.push([quad[0], quad[1], quad[2]]);
            faces.push([quad[0], quad[2], quad[3]]);
        }
    }
    Ok(faces)
}

/// Wireframe n-cube as a line list of `2^n` vertices and `n·2^(n-1)` edges.
pub fn generate_hypercube(dimension: u32, half_size: f32) -> GeometryResult<MeshBuffers> {
    let vertices = hypercube_vertices(dimension, half_size)?;
    let edges = hypercube_edges(dimension)?;

    let mut builder = MeshBuilder::new(Topology::Lines);
    builder.reserve(vertices.len(), edges.len() * 2);
    for v in vertices {
        builder.push_vertex(Vertex::at(v));
    }
    for [a, b] in edges {
        builder.push_line(a, b);
    }
    Ok(builder.build())
}

/// Shaded 3D/4D cube: all projected corners with radial normals and the six
/// faces of the base cube.
pub fn generate_hypercube_solid(dimension: u32, half_size: f32) -> GeometryResult<MeshBuffers> {
    let faces = hypercube_faces(dimension)?;
    let vertices = hypercube_vertices(dimension, half_size)?;

    let mut builder = MeshBuilder::new(Topology::Triangles).with_normals();
    builder.reserve(vertices.len(), faces.len() * 3);
    for v in vertices {
        let normal = try_normalize(v).unwrap_or(UP);
        builder.push_vertex(Vertex::at(v).with_normal(normal));
    }
    for [a, b, c] in faces {
        builder.push_triangle(a, b, c);
    }
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::vector::from_array;
    use cgmath::InnerSpace;

    #[test]
    fn test_vertex_and_edge_counts() {
        for n in MIN_HYPERCUBE_DIMENSION..=MAX_HYPERCUBE_DIMENSION {
            let mesh = generate_hypercube(n, 2.0).unwrap();
            assert_eq!(mesh.vertex_count(), 1 << n, "vertices for {n}D");
            assert_eq!(mesh.primitive_count(), (n as usize) << (n - 1), "edges for {n}D");
            assert!(mesh.validate().is_ok());
        }
    }

    #[test]
    fn test_every_vertex_has_degree_n() {
        for n in MIN_HYPERCUBE_DIMENSION..=MAX_HYPERCUBE_DIMENSION {
            let edges = hypercube_edges(n).unwrap();
            let mut degree = vec![0u32; 1 << n];
            for [a, b] in edges {
                assert_eq!((a ^ b).count_ones(), 1);
                degree[a as usize] += 1;
                degree[b as usize] += 1;
            }
            assert!(degree.iter().all(|&d| d == n));
        }
    }

    #[test]
    fn test_divisor_stays_positive() {
        for n in MIN_HYPERCUBE_DIMENSION..=MAX_HYPERCUBE_DIMENSION {
            for s in [0.5, 2.0, 10.0, 250.0] {
                let offset = projection_offset(n, s);
                let worst = offset - (n - 3) as f32 * s;
                assert!(worst >= 1.0 - 1e-3, "{n}D, s = {s}: divisor {worst}");
                assert!(hypercube_vertices(n, s).is_ok());
            }
        }
    }

    #[test]
    fn test_cube_projection_is_uniform_scale() {
        let vertices = hypercube_vertices(3, 2.0).unwrap();
        for v in vertices {
            for c in [v.x, v.y, v.z] {
                assert!((c.abs() - 0.5).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(matches!(
            generate_hypercube(2, 2.0),
            Err(GeometryError::InvalidParameter { name: "dimension", .. })
        ));
        assert!(generate_hypercube(11, 2.0).is_err());
        assert!(generate_hypercube(4, 0.0).is_err());
        assert!(generate_hypercube(4, -1.0).is_err());
    }

    #[test]
    fn test_faces_only_up_to_4d() {
        assert_eq!(hypercube_faces(3).unwrap().len(), 12);
        assert_eq!(hypercube_faces(4).unwrap().len(), 12);
        assert!(hypercube_faces(5).is_err());
        assert!(generate_hypercube_solid(6, 2.0).is_err());
    }

    #[test]
    fn test_solid_faces_point_outward() {
        let mesh = generate_hypercube_solid(3, 2.0).unwrap();
        assert_eq!(mesh.triangle_count(), 12);
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|k| from_array(mesh.positions[tri[k] as usize]));
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid) > 0.0);
        }
    }
}
