//! # Primitive Shape Generation
//!
//! Building blocks shared by the larger generators: a UV sphere, regular
//! tetrahedra for the Sierpinski leaves and square pyramids for Koch spikes.
//! All shapes are generated with outward winding and unit normals.

use super::vector::{perpendicular_frame, try_normalize, vec3};
use super::{MeshBuffers, MeshBuilder, Topology, Vertex};
use cgmath::{InnerSpace, Vector3};
use std::f32::consts::PI;

/// Corner directions of a regular tetrahedron inscribed in the cube `[-1, 1]³`.
pub const TETRAHEDRON_CORNERS: [[f32; 3]; 4] = [
    [1.0, 1.0, 1.0],
    [1.0, -1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
];

/// Generate a UV sphere with specified resolution
///
/// # Arguments
/// * `radius` - Sphere radius
/// * `longitude_segments` - Number of vertical segments (longitude lines)
/// * `latitude_segments` - Number of horizontal segments (latitude lines)
///
/// Returns a sphere centered at the origin with the poles on the Z axis.
pub fn generate_uv_sphere(radius: f32, longitude_segments: u32, latitude_segments: u32) -> MeshBuffers {
    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    let mut builder = MeshBuilder::new(Topology::Triangles)
        .with_normals()
        .with_uvs()
        .with_colors();
    builder.reserve(
        ((lat_segs + 1) * (long_segs + 1)) as usize,
        (lat_segs * long_segs * 6) as usize,
    );

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32; // 0 to PI
        let (sin_theta, cos_theta) = theta.sin_cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32; // 0 to 2*PI
            let (sin_phi, cos_phi) = phi.sin_cos();

            let direction = vec3(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta);
            builder.push_vertex(
                Vertex::at(direction * radius)
                    .with_normal(direction)
                    .with_uv(long as f32 / long_segs as f32, lat as f32 / lat_segs as f32),
            );
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            builder.push_triangle(first, second, first + 1);
            builder.push_triangle(second, second + 1, first + 1);
        }
    }

    builder.build()
}

/// Order a triangle so that its face normal points away from `inside`.
pub fn orient_triangle(
    positions: [Vector3<f32>; 3],
    indices: [u32; 3],
    inside: Vector3<f32>,
) -> [u32; 3] {
    let [a, b, c] = positions;
    let normal = (b - a).cross(c - a);
    if normal.dot(a - inside) < 0.0 {
        [indices[0], indices[2], indices[1]]
    } else {
        indices
    }
}

/// Append one regular tetrahedron (4 vertices, 4 faces) to `builder`.
///
/// `size` is the half-extent of the bounding cube of the tetrahedron.
pub fn push_tetrahedron(builder: &mut MeshBuilder, center: Vector3<f32>, size: f32) {
    let corners = TETRAHEDRON_CORNERS.map(|[x, y, z]| center + vec3(x, y, z) * size);

    let base = builder.vertex_count();
    for corner in corners {
        let normal = try_normalize(corner - center).unwrap_or(super::vector::UP);
        builder.push_vertex(Vertex::at(corner).with_normal(normal));
    }

    // each face is the three corners opposite one vertex
    for opposite in 0..4u32 {
        let face: Vec<u32> = (0..4u32).filter(|&k| k != opposite).collect();
        let [i, j, k] = orient_triangle(
            [
                corners[face[0] as usize],
                corners[face[1] as usize],
                corners[face[2] as usize],
            ],
            [face[0], face[1], face[2]],
            center,
        );
        builder.push_triangle(base + i, base + j, base + k);
    }
}

/// Append a square pyramid whose base is centered at `base_center` and whose
/// apex lies at `base_center + axis * length`.
///
/// Returns `false` (and appends nothing) when `axis` is degenerate.
pub fn push_pyramid(
    builder: &mut MeshBuilder,
    base_center: Vector3<f32>,
    axis: Vector3<f32>,
    length: f32,
    half_width: f32,
    color: [f32; 3],
) -> bool {
    let Some(axis) = try_normalize(axis) else {
        return false;
    };
    let Some((side, normal)) = perpendicular_frame(axis) else {
        return false;
    };

    let apex = base_center + axis * length;
    let corners = [
        base_center + (side + normal) * half_width,
        base_center + (normal - side) * half_width,
        base_center - (side + normal) * half_width,
        base_center + (side - normal) * half_width,
    ];
    let centroid = base_center + axis * (length * 0.25);

    let base = builder.vertex_count();
    for corner in corners.iter().copied().chain(std::iter::once(apex)) {
        let n = try_normalize(corner - centroid).unwrap_or(axis);
        builder.push_vertex(Vertex::at(corner).with_normal(n).with_color(color));
    }

    let apex_index = 4;
    for i in 0..4u32 {
        let j = (i + 1) % 4;
        let [a, b, c] = orient_triangle(
            [corners[i as usize], corners[j as usize], apex],
            [i, j, apex_index],
            centroid,
        );
        builder.push_triangle(base + a, base + b, base + c);
    }
    for [i, j, k] in [[0u32, 1, 2], [0, 2, 3]] {
        let [a, b, c] = orient_triangle(
            [corners[i as usize], corners[j as usize], corners[k as usize]],
            [i, j, k],
            centroid,
        );
        builder.push_triangle(base + a, base + b, base + c);
    }
    true
}
