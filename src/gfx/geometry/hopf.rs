//! # Hopf Fibration
//!
//! Every point of the 2-sphere has a circle of preimages in the 3-sphere under
//! the Hopf map. Sampling a handful of base points and stereographically
//! projecting their fibers into 3D gives the familiar nest of linked circles.
//!
//! ## Pipeline
//!
//! 1. Base points on `S²` from a golden-angle spiral ([`golden_base_points`])
//! 2. Fiber circle over each base point on `S³` ([`hopf_fiber_point`])
//! 3. Stereographic projection `(x,y,z,w) ↦ (x,y,z)/(1-w)`
//!    ([`stereographic_projection`])
//! 4. Assembly as points, line loops, tubes or ribbons
//!
//! Samples that land on the projection pole or turn non-finite are skipped,
//! and a fiber left with fewer than [`MIN_FIBER_SAMPLES`] samples is dropped.
//! Both are counted in `degenerate_samples`.

use super::parametric::GOLDEN_RATIO;
use super::primitives::generate_uv_sphere;
use super::spline::ClosedCatmullRom;
use super::sweep::{sweep_ribbon, sweep_tube};
use super::vector::{from_array, hsl_to_rgb, is_finite, vec3};
use super::{FiberBundle, FiberMesh, MeshBuffers, MeshBuilder, Topology, Vertex};
use crate::error::{ensure_positive, GeometryError, GeometryResult};
use cgmath::{InnerSpace, Vector3, Vector4};
use log::trace;
use std::f32::consts::TAU;

pub const MAX_HOPF_FIBERS: u32 = 50;
pub const MAX_RIBBON_FIBERS: u32 = 40;
pub const MIN_FIBER_SAMPLES: usize = 3;
pub const MAX_FIBER_SAMPLES: u32 = 256;

/// `|1 - w|` below this is treated as the projection pole.
pub const STEREOGRAPHIC_EPSILON: f32 = 1e-6;

const TINT_SATURATION: f32 = 0.75;
const TINT_LIGHTNESS: f32 = 0.55;

/// A base point on the 2-sphere together with its spiral parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasePoint {
    /// `t = i / N ∈ [0, 1)`
    pub t: f32,
    /// Unit vector on `S²`
    pub direction: Vector3<f32>,
}

/// `count` base points spread over `S²` without clustering at the poles.
///
/// `t = i/N`, latitude `φ = acos(1 - 2t)`, longitude `θ = τ·t·golden_ratio`.
pub fn golden_base_points(count: u32) -> Vec<BasePoint> {
    (0..count)
        .map(|i| {
            let t = i as f32 / count as f32;
            let phi = (1.0 - 2.0 * t).clamp(-1.0, 1.0).acos();
            let theta = TAU * t * GOLDEN_RATIO;
            let (sin_phi, cos_phi) = phi.sin_cos();
            BasePoint {
                t,
                direction: vec3(sin_phi * theta.cos(), sin_phi * theta.sin(), cos_phi),
            }
        })
        .collect()
}

/// Point at angle `alpha` on the fiber over `base` (a unit vector on `S²`).
///
/// Returns `None` at the base point `(0, 0, -1)`, where this chart of the
/// fibration is singular, or if the result is not finite. Points from
/// [`golden_base_points`] have `z = 1 - 2t` with `t < 1`, so they never reach
/// the singular point; with at most [`MAX_HOPF_FIBERS`] fibers `1 + z` stays at
/// or above `2 / MAX_HOPF_FIBERS`.
pub fn hopf_fiber_point(base: Vector3<f32>, alpha: f32) -> Option<Vector4<f32>> {
    let (a, b, c) = (base.x, base.y, base.z);
    let lift = 1.0 + c;
    if !(lift > STEREOGRAPHIC_EPSILON) {
        return None;
    }

    let (sin, cos) = alpha.sin_cos();
    let q = Vector4::new(
        lift * cos,
        a * sin - b * cos,
        a * cos + b * sin,
        lift * sin,
    ) / (2.0 * lift).sqrt();

    let length = q.magnitude();
    let q = q / length;
    (q.x.is_finite() && q.y.is_finite() && q.z.is_finite() && q.w.is_finite()).then_some(q)
}

/// Stereographic projection of `S³` from `(0, 0, 0, 1)` onto `R³`.
///
/// Returns `None` at the pole or for non-finite results.
pub fn stereographic_projection(q: Vector4<f32>) -> Option<Vector3<f32>> {
    let denominator = 1.0 - q.w;
    if !(denominator.abs() > STEREOGRAPHIC_EPSILON) {
        return None;
    }
    let p = vec3(q.x, q.y, q.z) / denominator;
    is_finite(p).then_some(p)
}

/// Inverse of [`stereographic_projection`].
pub fn inverse_stereographic_projection(p: Vector3<f32>) -> Vector4<f32> {
    let r2 = p.magnitude2();
    let scale = 1.0 / (r2 + 1.0);
    Vector4::new(2.0 * p.x * scale, 2.0 * p.y * scale, 2.0 * p.z * scale, (r2 - 1.0) * scale)
}

/// Rainbow tint for the fiber over base parameter `t`.
pub fn fiber_tint(t: f32) -> [f32; 3] {
    hsl_to_rgb(t, TINT_SATURATION, TINT_LIGHTNESS)
}

/// Sampling parameters shared by every Hopf variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HopfSettings {
    /// Number of base points (and fibers)
    pub fibers: u32,
    /// Samples around each fiber circle
    pub samples_per_fiber: u32,
    /// Uniform scale applied after projection
    pub scale: f32,
}

impl HopfSettings {
    pub fn new(fibers: u32, samples_per_fiber: u32, scale: f32) -> Self {
        Self {
            fibers,
            samples_per_fiber,
            scale,
        }
    }

    fn validate(&self, max_fibers: u32) -> GeometryResult<()> {
        if self.fibers == 0 || self.fibers > max_fibers {
            return Err(GeometryError::invalid(
                "fibers",
                format!("must be in [1, {max_fibers}], got {}", self.fibers),
            ));
        }
        if !(MIN_FIBER_SAMPLES as u32..=MAX_FIBER_SAMPLES).contains(&self.samples_per_fiber) {
            return Err(GeometryError::invalid(
                "samples_per_fiber",
                format!(
                    "must be in [{MIN_FIBER_SAMPLES}, {MAX_FIBER_SAMPLES}], got {}",
                    self.samples_per_fiber
                ),
            ));
        }
        ensure_positive("scale", self.scale)
    }
}

/// One projected fiber.
#[derive(Debug, Clone)]
pub struct Fiber {
    pub base: BasePoint,
    /// Valid projected samples in angle order, already scaled
    pub points: Vec<Vector3<f32>>,
}

/// Sample and project every fiber, dropping those that collapse.
///
/// Returns the surviving fibers and the number of degenerate samples
/// (skipped samples plus one per dropped fiber).
pub fn sample_fibers(settings: &HopfSettings) -> (Vec<Fiber>, usize) {
    let mut degenerate = 0;
    let mut fibers = Vec::with_capacity(settings.fibers as usize);

    for base in golden_base_points(settings.fibers) {
        let points: Vec<Vector3<f32>> = (0..settings.samples_per_fiber)
            .filter_map(|k| {
                let alpha = k as f32 / settings.samples_per_fiber as f32 * TAU;
                let projected = hopf_fiber_point(base.direction, alpha)
                    .and_then(stereographic_projection)
                    .map(|p| p * settings.scale);
                if projected.is_none() {
                    degenerate += 1;
                }
                projected
            })
            .collect();

        if points.len() < MIN_FIBER_SAMPLES {
            trace!(
                "dropping Hopf fiber t={:.3}: {} valid samples",
                base.t,
                points.len()
            );
            degenerate += 1;
            continue;
        }
        fibers.push(Fiber { base, points });
    }

    (fibers, degenerate)
}

/// All fiber samples as a colored point cloud.
pub fn generate_hopf_points(settings: &HopfSettings) -> GeometryResult<MeshBuffers> {
    settings.validate(MAX_HOPF_FIBERS)?;
    let (fibers, degenerate) = sample_fibers(settings);

    let mut builder = MeshBuilder::new(Topology::Points).with_colors();
    for fiber in fibers {
        let tint = fiber_tint(fiber.base.t);
        for p in fiber.points {
            let i = builder.push_vertex(Vertex::at(p).with_color(tint));
            builder.push_point(i);
        }
    }
    builder.record_degenerate(degenerate);
    Ok(builder.build())
}

/// Every fiber as a closed loop of line segments.
pub fn generate_hopf_lines(settings: &HopfSettings) -> GeometryResult<MeshBuffers> {
    settings.validate(MAX_HOPF_FIBERS)?;
    let (fibers, degenerate) = sample_fibers(settings);

    let mut builder = MeshBuilder::new(Topology::Lines).with_colors();
    for fiber in fibers {
        let tint = fiber_tint(fiber.base.t);
        let first = builder.vertex_count();
        let count = fiber.points.len() as u32;
        for p in fiber.points {
            builder.push_vertex(Vertex::at(p).with_color(tint));
        }
        for k in 0..count {
            builder.push_line(first + k, first + (k + 1) % count);
        }
    }
    builder.record_degenerate(degenerate);
    Ok(builder.build())
}

fn smoothed_path(fiber: &Fiber, samples: usize) -> Vec<(Vector3<f32>, Vector3<f32>)> {
    match ClosedCatmullRom::new(fiber.points.clone()) {
        Some(spline) => spline.resample(samples),
        None => Vec::new(),
    }
}

/// One closed tube per fiber, each with its own tint.
pub fn generate_hopf_tubes(settings: &HopfSettings, tube_radius: f32) -> GeometryResult<FiberBundle> {
    settings.validate(MAX_HOPF_FIBERS)?;
    ensure_positive("tube_radius", tube_radius)?;
    let (fibers, degenerate) = sample_fibers(settings);

    let path_samples = settings.samples_per_fiber as usize * 2;
    let mut bundle = FiberBundle {
        fibers: Vec::with_capacity(fibers.len()),
        degenerate_samples: degenerate,
    };
    for fiber in fibers {
        let tint = fiber_tint(fiber.base.t);
        let mesh = sweep_tube(&smoothed_path(&fiber, path_samples), tube_radius, 8, tint);
        push_fiber(&mut bundle, mesh, tint, fiber.base.t);
    }
    Ok(bundle)
}

/// One closed ribbon per fiber, each with its own tint.
pub fn generate_hopf_ribbons(
    settings: &HopfSettings,
    width: f32,
    thickness: f32,
) -> GeometryResult<FiberBundle> {
    settings.validate(MAX_RIBBON_FIBERS)?;
    ensure_positive("ribbon_width", width)?;
    ensure_positive("ribbon_thickness", thickness)?;
    let (fibers, degenerate) = sample_fibers(settings);

    let path_samples = settings.samples_per_fiber as usize * 2;
    let mut bundle = FiberBundle {
        fibers: Vec::with_capacity(fibers.len()),
        degenerate_samples: degenerate,
    };
    for fiber in fibers {
        let tint = fiber_tint(fiber.base.t);
        let mesh = sweep_ribbon(&smoothed_path(&fiber, path_samples), width, thickness, tint);
        push_fiber(&mut bundle, mesh, tint, fiber.base.t);
    }
    Ok(bundle)
}

fn push_fiber(bundle: &mut FiberBundle, mesh: MeshBuffers, tint: [f32; 3], base_parameter: f32) {
    if mesh.is_empty() {
        trace!("dropping swept Hopf fiber t={base_parameter:.3}: no usable frames");
        bundle.degenerate_samples += mesh.degenerate_samples + 1;
        return;
    }
    bundle.fibers.push(FiberMesh {
        mesh,
        tint,
        base_parameter,
    });
}

/// The base 2-sphere, each vertex tinted like the fiber of its nearest base
/// point.
pub fn generate_hopf_base_sphere(settings: &HopfSettings) -> GeometryResult<MeshBuffers> {
    settings.validate(MAX_HOPF_FIBERS)?;
    let bases = golden_base_points(settings.fibers);
    let segments = settings.samples_per_fiber.max(16);
    let mut sphere = generate_uv_sphere(settings.scale, segments, segments / 2);

    let colors = sphere
        .positions
        .iter()
        .map(|&p| {
            let direction = from_array(p) / settings.scale;
            let nearest = bases
                .iter()
                .max_by(|a, b| {
                    a.direction
                        .dot(direction)
                        .total_cmp(&b.direction.dot(direction))
                })
                .map_or(0.0, |b| b.t);
            fiber_tint(nearest)
        })
        .collect();
    sphere.colors = Some(colors);
    Ok(sphere)
}
