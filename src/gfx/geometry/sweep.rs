//! # Cross-Section Sweeps
//!
//! Sweeps a circular (tube) or rectangular (ribbon) cross-section along a
//! closed path given as `(position, tangent)` samples. Frames come from
//! [`perpendicular_frame`]: side = tangent × up, with the alternate up axis
//! when the tangent runs parallel to up. Samples with a degenerate tangent
//! are skipped; a path with fewer than three usable samples yields an empty
//! mesh.
//!
//! The ring after the last sample is the first one, so swept meshes are
//! closed with no duplicated seam vertices.

use super::vector::perpendicular_frame;
use super::{MeshBuffers, MeshBuilder, Topology, Vertex};
use cgmath::Vector3;
use std::f32::consts::TAU;

/// Rings that survived frame construction: center, side, normal.
type Rings = Vec<(Vector3<f32>, Vector3<f32>, Vector3<f32>)>;

fn build_rings(path: &[(Vector3<f32>, Vector3<f32>)]) -> (Rings, usize) {
    let mut degenerate = 0;
    let rings = path
        .iter()
        .filter_map(|&(center, tangent)| match perpendicular_frame(tangent) {
            Some((side, normal)) => Some((center, side, normal)),
            None => {
                degenerate += 1;
                None
            }
        })
        .collect();
    (rings, degenerate)
}

fn empty_swept(degenerate: usize) -> MeshBuffers {
    let mut mesh = MeshBuffers::empty(Topology::Triangles);
    mesh.normals = Some(Vec::new());
    mesh.uvs = Some(Vec::new());
    mesh.colors = Some(Vec::new());
    mesh.degenerate_samples = degenerate;
    mesh
}

/// Connect `rings` rings of `per_ring` vertices each into a closed band.
///
/// Vertex `(k, r)` sits at `k·per_ring + r`; `faces` lists the `(r, r')`
/// vertex pairs that bound one quad strip around the ring.
fn stitch(builder: &mut MeshBuilder, rings: u32, per_ring: u32, faces: &[(u32, u32)]) {
    for k in 0..rings {
        let next = (k + 1) % rings;
        for &(r, r1) in faces {
            let a = k * per_ring + r;
            let b = next * per_ring + r;
            let c = next * per_ring + r1;
            let d = k * per_ring + r1;
            builder.push_triangle(a, b, d);
            builder.push_triangle(b, c, d);
        }
    }
}

/// Closed tube of constant `radius` with `radial_segments` sides.
pub fn sweep_tube(
    path: &[(Vector3<f32>, Vector3<f32>)],
    radius: f32,
    radial_segments: u32,
    color: [f32; 3],
) -> MeshBuffers {
    let (rings, degenerate) = build_rings(path);
    if rings.len() < 3 {
        return empty_swept(degenerate + rings.len());
    }

    let segments = radial_segments.max(3);
    let ring_count = rings.len() as u32;

    let mut builder = MeshBuilder::new(Topology::Triangles)
        .with_normals()
        .with_uvs()
        .with_colors();
    builder.reserve(
        (ring_count * segments) as usize,
        (ring_count * segments * 6) as usize,
    );

    for (k, &(center, side, normal)) in rings.iter().enumerate() {
        for r in 0..segments {
            let angle = r as f32 / segments as f32 * TAU;
            let (sin, cos) = angle.sin_cos();
            let radial = side * cos + normal * sin;
            builder.push_vertex(
                Vertex::at(center + radial * radius)
                    .with_normal(radial)
                    .with_uv(k as f32 / ring_count as f32, r as f32 / segments as f32)
                    .with_color(color),
            );
        }
    }

    let faces: Vec<(u32, u32)> = (0..segments).map(|r| (r, (r + 1) % segments)).collect();
    stitch(&mut builder, ring_count, segments, &faces);

    builder.record_degenerate(degenerate);
    builder.build()
}

/// Closed ribbon with a `width × thickness` rectangular cross-section.
///
/// Each side of the rectangle gets its own vertex pair so the faces shade
/// flat.
pub fn sweep_ribbon(
    path: &[(Vector3<f32>, Vector3<f32>)],
    width: f32,
    thickness: f32,
    color: [f32; 3],
) -> MeshBuffers {
    let (rings, degenerate) = build_rings(path);
    if rings.len() < 3 {
        return empty_swept(degenerate + rings.len());
    }

    let ring_count = rings.len() as u32;
    let (hw, ht) = (width * 0.5, thickness * 0.5);

    let mut builder = MeshBuilder::new(Topology::Triangles)
        .with_normals()
        .with_uvs()
        .with_colors();
    builder.reserve((ring_count * 8) as usize, (ring_count * 24) as usize);

    for (k, &(center, side, normal)) in rings.iter().enumerate() {
        // counter-clockwise in the (side, normal) plane, like the tube
        let corners = [
            side * hw + normal * ht,
            normal * ht - side * hw,
            -(side * hw + normal * ht),
            side * hw - normal * ht,
        ];
        let face_normals = [normal, -side, -normal, side];
        let u = k as f32 / ring_count as f32;

        for f in 0..4 {
            for (offset, corner) in [corners[f], corners[(f + 1) % 4]].into_iter().enumerate() {
                builder.push_vertex(
                    Vertex::at(center + corner)
                        .with_normal(face_normals[f])
                        .with_uv(u, (f as f32 + offset as f32) / 4.0)
                        .with_color(color),
                );
            }
        }
    }

    let faces = [(0, 1), (2, 3), (4, 5), (6, 7)];
    stitch(&mut builder, ring_count, 8, &faces);

    builder.record_degenerate(degenerate);
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::vector::{from_array, vec3};
    use cgmath::InnerSpace;

    fn circle(samples: usize) -> Vec<(Vector3<f32>, Vector3<f32>)> {
        (0..samples)
            .map(|i| {
                let a = i as f32 / samples as f32 * TAU;
                (vec3(a.cos(), a.sin(), 0.0) * 2.0, vec3(-a.sin(), a.cos(), 0.0))
            })
            .collect()
    }

    fn assert_outward(mesh: &MeshBuffers) {
        // for a torus around the Z axis, faces point away from the core circle
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|k| from_array(mesh.positions[tri[k] as usize]));
            let centroid = (a + b + c) / 3.0;
            let core = vec3(centroid.x, centroid.y, 0.0).normalize() * 2.0;
            assert!((b - a).cross(c - a).dot(centroid - core) > 0.0);
        }
    }

    #[test]
    fn test_tube_is_closed_and_outward() {
        let mesh = sweep_tube(&circle(24), 0.25, 8, [1.0, 0.0, 0.0]);
        assert_eq!(mesh.vertex_count(), 24 * 8);
        assert_eq!(mesh.indices.len(), 24 * 8 * 6);
        assert_eq!(mesh.indices.len() % 3, 0);
        assert_eq!(mesh.degenerate_samples, 0);
        assert!(mesh.validate().is_ok());
        assert_outward(&mesh);

        // closed: every vertex is used by exactly six triangles
        let mut uses = vec![0; mesh.vertex_count()];
        for &i in &mesh.indices {
            uses[i as usize] += 1;
        }
        assert!(uses.iter().all(|&u| u == 6));
    }

    #[test]
    fn test_ribbon_is_closed_and_outward() {
        let mesh = sweep_ribbon(&circle(20), 0.4, 0.1, [0.0, 1.0, 0.0]);
        assert_eq!(mesh.vertex_count(), 20 * 8);
        assert_eq!(mesh.triangle_count(), 20 * 8);
        assert!(mesh.validate().is_ok());
        assert_outward(&mesh);
    }

    #[test]
    fn test_degenerate_tangents_are_skipped() {
        let mut path = circle(12);
        path[3].1 = vec3(0.0, 0.0, 0.0);
        path[7].1 = vec3(f32::NAN, 0.0, 0.0);
        let mesh = sweep_tube(&path, 0.1, 6, [1.0; 3]);
        assert_eq!(mesh.vertex_count(), 10 * 6);
        assert_eq!(mesh.degenerate_samples, 2);
    }

    #[test]
    fn test_too_short_path_is_empty() {
        let mesh = sweep_ribbon(&circle(2), 0.4, 0.1, [1.0; 3]);
        assert!(mesh.is_empty());
        assert!(mesh.validate().is_ok());
    }
}
