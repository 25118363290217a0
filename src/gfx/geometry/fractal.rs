//! # Recursive Fractals
//!
//! Two self-similar constructions:
//!
//! - **Sierpinski tetrahedron**: each tetrahedron is replaced by four
//!   half-size copies pushed toward its corners. Depth `d` yields `4^d`
//!   leaf tetrahedra.
//! - **Koch snowflake**: every edge of a seed triangle is replaced by the four
//!   Koch sub-segments, and each final segment sprouts a cluster of square
//!   pyramids. Every spike, the primary one included, has its base and
//!   direction jittered by a seeded [`StdRng`], so the same seed always
//!   produces the same mesh.

use super::primitives::{push_pyramid, push_tetrahedron, TETRAHEDRON_CORNERS};
use super::vector::{hsl_to_rgb, vec3, UP};
use super::{MeshBuffers, MeshBuilder, Topology};
use crate::error::{ensure_positive, GeometryError, GeometryResult};
use cgmath::{InnerSpace, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

pub const MAX_SIERPINSKI_DEPTH: u32 = 4;
pub const MAX_KOCH_DEPTH: u32 = 5;

/// Secondary spikes around every Koch segment before the complexity bonus.
pub const BASE_KOCH_SPIKES: u32 = 4;

const POSITION_JITTER: f32 = 0.1;
const DIRECTION_JITTER: f32 = 0.15;

fn check_depth(depth: u32, max: u32) -> GeometryResult<()> {
    if depth > max {
        return Err(GeometryError::invalid(
            "depth",
            format!("must be at most {max}, got {depth}"),
        ));
    }
    Ok(())
}

/// Generate a Sierpinski tetrahedron
///
/// # Arguments
/// * `depth` - Subdivision depth, at most [`MAX_SIERPINSKI_DEPTH`]
/// * `size` - Half-extent of the bounding cube of the outer tetrahedron
pub fn generate_sierpinski(depth: u32, size: f32) -> GeometryResult<MeshBuffers> {
    check_depth(depth, MAX_SIERPINSKI_DEPTH)?;
    ensure_positive("size", size)?;
    Ok(sierpinski_node(vec3(0.0, 0.0, 0.0), size, depth))
}

fn sierpinski_node(center: Vector3<f32>, size: f32, depth: u32) -> MeshBuffers {
    let mut builder = MeshBuilder::new(Topology::Triangles).with_normals();
    if depth == 0 {
        push_tetrahedron(&mut builder, center, size);
        return builder.build();
    }

    let half = size * 0.5;
    for [x, y, z] in TETRAHEDRON_CORNERS {
        let child_center = center + vec3(x, y, z) * half;
        builder.append(sierpinski_node(child_center, half, depth - 1));
    }
    builder.build()
}

/// Points of one Koch refinement step: `a`, one third, apex, two thirds.
///
/// `outward` is the in-plane unit normal on the side the apex bulges toward.
fn koch_step(
    a: Vector3<f32>,
    b: Vector3<f32>,
    outward: Vector3<f32>,
) -> [Vector3<f32>; 4] {
    let d = b - a;
    let one_third = a + d / 3.0;
    let two_thirds = a + d * (2.0 / 3.0);
    let apex = (one_third + two_thirds) * 0.5 + outward * (d.magnitude() * 3f32.sqrt() / 6.0);
    [a, one_third, apex, two_thirds]
}

/// Outward in-plane normal of a segment on a counter-clockwise XY loop.
fn outward_normal(a: Vector3<f32>, b: Vector3<f32>) -> Vector3<f32> {
    let d = b - a;
    let n = vec3(d.y, -d.x, 0.0);
    let length = n.magnitude();
    if length > 0.0 {
        n / length
    } else {
        vec3(1.0, 0.0, 0.0)
    }
}

/// Closed Koch curve after `depth` refinements of an equilateral triangle in
/// the XY plane with circumradius `radius`, as a counter-clockwise loop.
pub fn koch_outline(depth: u32, radius: f32) -> Vec<Vector3<f32>> {
    let mut points: Vec<Vector3<f32>> = (0..3)
        .map(|k| {
            let angle = TAU * k as f32 / 3.0 + TAU / 4.0;
            vec3(angle.cos(), angle.sin(), 0.0) * radius
        })
        .collect();

    for _ in 0..depth {
        let n = points.len();
        points = (0..n)
            .flat_map(|k| {
                let (a, b) = (points[k], points[(k + 1) % n]);
                koch_step(a, b, outward_normal(a, b))
            })
            .collect();
    }
    points
}

fn jitter(rng: &mut StdRng, amount: f32) -> Vector3<f32> {
    vec3(
        rng.random_range(-amount..=amount),
        rng.random_range(-amount..=amount),
        rng.random_range(-amount..=amount),
    )
}

/// Generate a spiked Koch snowflake
///
/// # Arguments
/// * `depth` - Refinement depth, at most [`MAX_KOCH_DEPTH`]
/// * `radius` - Circumradius of the seed triangle
/// * `secondary_spikes` - Pyramids fanned around each segment besides the
///   primary one
/// * `seed` - Seed for the spike jitter
pub fn generate_koch(
    depth: u32,
    radius: f32,
    secondary_spikes: u32,
    seed: u64,
) -> GeometryResult<MeshBuffers> {
    check_depth(depth, MAX_KOCH_DEPTH)?;
    ensure_positive("radius", radius)?;

    let outline = koch_outline(depth, radius);
    let segments = outline.len();
    let pyramids = segments * (1 + secondary_spikes as usize);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = MeshBuilder::new(Topology::Triangles)
        .with_normals()
        .with_colors();
    builder.reserve(pyramids * 5, pyramids * 18);

    let mut degenerate = 0;
    for k in 0..segments {
        let (a, b) = (outline[k], outline[(k + 1) % segments]);
        let d = b - a;
        let length = d.magnitude();
        let outward = outward_normal(a, b);
        let midpoint = (a + b) * 0.5;
        let color = hsl_to_rgb(k as f32 / segments as f32, 0.7, 0.6);

        // primary spike runs roughly along the segment itself
        let base = a + jitter(&mut rng, POSITION_JITTER * length);
        let direction = d + jitter(&mut rng, DIRECTION_JITTER * length);
        if !push_pyramid(&mut builder, base, direction, length, length * 0.08, color) {
            degenerate += 1;
        }

        for s in 0..secondary_spikes {
            let angle = TAU * s as f32 / secondary_spikes as f32;
            let direction = outward * angle.cos() + UP * angle.sin()
                + jitter(&mut rng, DIRECTION_JITTER);
            let base = midpoint + jitter(&mut rng, POSITION_JITTER * length);
            if !push_pyramid(&mut builder, base, direction, length * 0.4, length * 0.05, color) {
                degenerate += 1;
            }
        }
    }

    builder.record_degenerate(degenerate);
    Ok(builder.build())
}
