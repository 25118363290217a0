//! # Parametric Surfaces and Curves
//!
//! Closed-form `R² → R³` surfaces sampled on a regular grid and `R → R³`
//! curves sampled as line strips.
//!
//! ## Normals
//!
//! Grid normals are central finite differences of the surface in `u` and `v`
//! with step `h = π / (2·resolution)`, crossed as `∂v × ∂u` so they agree
//! with the winding of the grid triangles below. Where that
//! breaks down (the Klein bottle branch seam, a vertical tangent on an
//! extruded spiral) the surface's [`ParametricSurface::approximate_normal`]
//! is used instead, then `+Z`. Every emitted normal is finite and unit
//! length; each repair is counted in `degenerate_samples`.
//!
//! ## Grid
//!
//! `U × V` inclusive samples, vertex `(i, j)` at index `i·V + j`, two
//! triangles per cell:
//!
//! ```text
//! (i,j) (i,j+1) (i+1,j)      (i,j+1) (i+1,j+1) (i+1,j)
//! ```

use super::vector::{is_finite, perpendicular_frame, try_normalize, vec3, UP};
use super::{MeshBuffers, MeshBuilder, Topology, Vertex};
use crate::error::{ensure_positive, GeometryError, GeometryResult};
use cgmath::Vector3;
use std::f32::consts::{PI, TAU};

/// Minimum grid size for the Klein bottle; coarser grids tear at the seam.
pub const KLEIN_MIN_STEPS: u32 = 32;

/// Minimum grid size for every other surface.
pub const SURFACE_MIN_STEPS: u32 = 8;

/// Golden ratio φ.
pub const GOLDEN_RATIO: f32 = 1.618_034;

const PI_DIGITS: &[u8] = b"31415926535897932384626433832795";

/// A closed-form map from a rectangular parameter domain into 3D.
pub trait ParametricSurface {
    fn evaluate(&self, u: f32, v: f32) -> Vector3<f32>;

    fn u_range(&self) -> (f32, f32);

    fn v_range(&self) -> (f32, f32);

    /// Fallback normal where the finite-difference normal is degenerate.
    ///
    /// Defaults to the local spherical direction from the origin.
    fn approximate_normal(&self, _u: f32, _v: f32, point: Vector3<f32>) -> Option<Vector3<f32>> {
        try_normalize(point)
    }

    /// Whether [`Self::vertex_color`] should be written to the mesh.
    fn has_vertex_colors(&self) -> bool {
        false
    }

    fn vertex_color(&self, _u: f32, _v: f32) -> [f32; 3] {
        [1.0, 1.0, 1.0]
    }
}

/// A closed-form map from an interval into 3D.
pub trait ParametricCurve {
    fn point(&self, t: f32) -> Vector3<f32>;

    fn t_range(&self) -> (f32, f32);
}

/// Sampling density for [`sample_surface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceGrid {
    /// Samples along `u` (inclusive of both ends)
    pub u_steps: u32,
    /// Samples along `v` (inclusive of both ends)
    pub v_steps: u32,
    /// Controls the finite-difference step `π / (2·resolution)`
    pub resolution: u32,
}

impl SurfaceGrid {
    pub fn new(u_steps: u32, v_steps: u32, resolution: u32) -> Self {
        Self {
            u_steps,
            v_steps,
            resolution,
        }
    }

    /// Square grid whose finite-difference resolution equals its size.
    pub fn square(steps: u32) -> Self {
        Self::new(steps, steps, steps)
    }

    /// Raise both axes to at least `min_steps`.
    pub fn at_least(self, min_steps: u32) -> Self {
        Self {
            u_steps: self.u_steps.max(min_steps),
            v_steps: self.v_steps.max(min_steps),
            ..self
        }
    }

    pub fn difference_step(&self) -> f32 {
        PI / (2.0 * self.resolution as f32)
    }

    fn validate(&self) -> GeometryResult<()> {
        if self.u_steps < 2 || self.v_steps < 2 {
            return Err(GeometryError::invalid(
                "grid",
                format!(
                    "needs at least 2×2 samples, got {}×{}",
                    self.u_steps, self.v_steps
                ),
            ));
        }
        if self.resolution == 0 {
            return Err(GeometryError::invalid("resolution", "must be at least 1"));
        }
        Ok(())
    }
}

/// Finite-difference normal `∂v × ∂u` of `surface` at `(u, v)`.
pub fn difference_normal<S: ParametricSurface + ?Sized>(
    surface: &S,
    u: f32,
    v: f32,
    h: f32,
) -> Option<Vector3<f32>> {
    let du = surface.evaluate(u + h, v) - surface.evaluate(u - h, v);
    let dv = surface.evaluate(u, v + h) - surface.evaluate(u, v - h);
    try_normalize(dv.cross(du))
}

/// Sample `surface` on `grid` into a triangle mesh with normals and uvs.
pub fn sample_surface<S: ParametricSurface + ?Sized>(
    surface: &S,
    grid: SurfaceGrid,
) -> GeometryResult<MeshBuffers> {
    grid.validate()?;

    let (u0, u1) = surface.u_range();
    let (v0, v1) = surface.v_range();
    let h = grid.difference_step();
    let (nu, nv) = (grid.u_steps as usize, grid.v_steps as usize);

    let mut builder = MeshBuilder::new(Topology::Triangles).with_normals().with_uvs();
    if surface.has_vertex_colors() {
        builder = builder.with_colors();
    }
    builder.reserve(nu * nv, (nu - 1) * (nv - 1) * 6);

    // grid slot -> emitted vertex, None where the sample was not finite
    let mut slots: Vec<Option<u32>> = Vec::with_capacity(nu * nv);
    let mut degenerate = 0;

    for i in 0..nu {
        let s = i as f32 / (nu - 1) as f32;
        let u = u0 + (u1 - u0) * s;
        for j in 0..nv {
            let t = j as f32 / (nv - 1) as f32;
            let v = v0 + (v1 - v0) * t;

            let point = surface.evaluate(u, v);
            if !is_finite(point) {
                degenerate += 1;
                slots.push(None);
                continue;
            }

            let normal = match difference_normal(surface, u, v, h) {
                Some(n) => n,
                None => {
                    degenerate += 1;
                    surface.approximate_normal(u, v, point).unwrap_or(UP)
                }
            };

            let mut vertex = Vertex::at(point).with_normal(normal).with_uv(s, t);
            if surface.has_vertex_colors() {
                vertex = vertex.with_color(surface.vertex_color(u, v));
            }
            slots.push(Some(builder.push_vertex(vertex)));
        }
    }

    let slot = |i: usize, j: usize| slots[i * nv + j];
    for i in 0..nu - 1 {
        for j in 0..nv - 1 {
            if let (Some(a), Some(b), Some(c)) = (slot(i, j), slot(i, j + 1), slot(i + 1, j)) {
                builder.push_triangle(a, b, c);
            }
            if let (Some(a), Some(b), Some(c)) = (slot(i, j + 1), slot(i + 1, j + 1), slot(i + 1, j)) {
                builder.push_triangle(a, b, c);
            }
        }
    }

    builder.record_degenerate(degenerate);
    Ok(builder.build())
}

/// Sample `curve` at `segments + 1` points into a line strip.
pub fn sample_curve<C: ParametricCurve + ?Sized>(
    curve: &C,
    segments: u32,
) -> GeometryResult<MeshBuffers> {
    if segments == 0 {
        return Err(GeometryError::invalid("segments", "must be at least 1"));
    }

    let (t0, t1) = curve.t_range();
    let mut builder = MeshBuilder::new(Topology::Lines).with_uvs();
    builder.reserve(segments as usize + 1, segments as usize * 2);

    let mut previous: Option<u32> = None;
    let mut degenerate = 0;
    for i in 0..=segments {
        let s = i as f32 / segments as f32;
        let point = curve.point(t0 + (t1 - t0) * s);
        if !is_finite(point) {
            degenerate += 1;
            previous = None;
            continue;
        }
        let index = builder.push_vertex(Vertex::at(point).with_uv(s, 0.0));
        if let Some(prev) = previous {
            builder.push_line(prev, index);
        }
        previous = Some(index);
    }

    builder.record_degenerate(degenerate);
    Ok(builder.build())
}

/// Figure-8 bottle immersion of the Klein bottle, branching at `u = π`.
#[derive(Debug, Clone, Copy)]
pub struct KleinBottle {
    pub scale: f32,
}

impl KleinBottle {
    /// Bottle fitted into a sphere of roughly `radius`.
    pub fn new(radius: f32) -> Self {
        Self {
            scale: radius / 8.0,
        }
    }
}

impl ParametricSurface for KleinBottle {
    fn evaluate(&self, u: f32, v: f32) -> Vector3<f32> {
        let (su, cu) = u.sin_cos();
        let (sv, cv) = v.sin_cos();
        let tube = 2.0 * (1.0 - (u * 0.5).cos());

        let (x, z) = if u < PI {
            (
                3.0 * cu * (1.0 + su) + tube * cu * cv,
                -8.0 * su - tube * su * cv,
            )
        } else {
            (3.0 * cu * (1.0 + su) + tube * (v + PI).cos(), -8.0 * su)
        };
        let y = -tube * sv;

        vec3(x, y, z) * self.scale
    }

    fn u_range(&self) -> (f32, f32) {
        (0.0, TAU)
    }

    fn v_range(&self) -> (f32, f32) {
        (0.0, TAU)
    }
}

/// Möbius strip of unit half-width around a circle of `radius`.
#[derive(Debug, Clone, Copy)]
pub struct MobiusStrip {
    pub radius: f32,
}

impl ParametricSurface for MobiusStrip {
    fn evaluate(&self, u: f32, v: f32) -> Vector3<f32> {
        let half = u * 0.5;
        let ring = 1.0 + 0.5 * v * half.cos();
        vec3(ring * u.cos(), ring * u.sin(), 0.5 * v * half.sin()) * self.radius
    }

    fn u_range(&self) -> (f32, f32) {
        (0.0, TAU)
    }

    fn v_range(&self) -> (f32, f32) {
        (-1.0, 1.0)
    }

    /// Band direction crossed with the ring tangent, the `∂v × ∂u` of the
    /// centerline.
    fn approximate_normal(&self, u: f32, _v: f32, point: Vector3<f32>) -> Option<Vector3<f32>> {
        let (sh, ch) = (u * 0.5).sin_cos();
        let (su, cu) = u.sin_cos();
        let band = vec3(ch * cu, ch * su, sh);
        let ring = vec3(-su, cu, 0.0);
        try_normalize(band.cross(ring)).or_else(|| try_normalize(point))
    }
}

/// `(p, q)` torus knot centerline.
#[derive(Debug, Clone, Copy)]
pub struct TorusKnot {
    pub p: u32,
    pub q: u32,
    pub radius: f32,
}

impl ParametricCurve for TorusKnot {
    fn point(&self, t: f32) -> Vector3<f32> {
        let (p, q) = (self.p as f32, self.q as f32);
        let ring = 2.0 + (q * t).cos();
        vec3(
            ring * (p * t).cos(),
            ring * (p * t).sin(),
            (q * t).sin(),
        ) * (self.radius * 0.5)
    }

    fn t_range(&self) -> (f32, f32) {
        (0.0, TAU)
    }
}

/// Tube of constant radius swept around a [`TorusKnot`].
#[derive(Debug, Clone, Copy)]
pub struct TorusKnotTube {
    pub knot: TorusKnot,
    pub tube_radius: f32,
}

impl TorusKnotTube {
    fn frame(&self, t: f32) -> (Vector3<f32>, Vector3<f32>, Vector3<f32>) {
        let p1 = self.knot.point(t);
        let p2 = self.knot.point(t + 0.01);
        let tangent = p2 - p1;
        let mut normal = p2 + p1;
        let binormal = tangent.cross(normal);
        normal = binormal.cross(tangent);

        match (try_normalize(normal), try_normalize(binormal)) {
            (Some(n), Some(b)) => (p1, n, b),
            _ => {
                let (side, up) = perpendicular_frame(tangent).unwrap_or((vec3(1.0, 0.0, 0.0), UP));
                (p1, up, side)
            }
        }
    }
}

impl ParametricSurface for TorusKnotTube {
    fn evaluate(&self, u: f32, v: f32) -> Vector3<f32> {
        let (center, normal, binormal) = self.frame(u);
        let (sv, cv) = v.sin_cos();
        // v runs clockwise around the tangent so faces point away from the knot
        center - (normal * cv + binormal * sv) * self.tube_radius
    }

    fn u_range(&self) -> (f32, f32) {
        self.knot.t_range()
    }

    fn v_range(&self) -> (f32, f32) {
        (0.0, TAU)
    }

    fn approximate_normal(&self, u: f32, _v: f32, point: Vector3<f32>) -> Option<Vector3<f32>> {
        try_normalize(point - self.knot.point(u))
    }
}

/// Logarithmic spiral growing by φ every quarter turn, rising along Z.
#[derive(Debug, Clone, Copy)]
pub struct GoldenSpiral {
    pub radius: f32,
    pub turns: f32,
    pub rise: f32,
}

impl GoldenSpiral {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            turns: 3.0,
            rise: radius,
        }
    }
}

impl ParametricCurve for GoldenSpiral {
    fn point(&self, t: f32) -> Vector3<f32> {
        let t_max = self.turns * TAU;
        let r = self.radius * GOLDEN_RATIO.powf((t - t_max) / (PI * 0.5));
        vec3(r * t.cos(), r * t.sin(), self.rise * (t / t_max - 0.5))
    }

    fn t_range(&self) -> (f32, f32) {
        (0.0, self.turns * TAU)
    }
}

/// Archimedean spiral whose radius is modulated by the decimal digits of π.
#[derive(Debug, Clone, Copy)]
pub struct PiSpiral {
    pub radius: f32,
    pub turns: f32,
    pub rise: f32,
}

impl PiSpiral {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            turns: 4.0,
            rise: radius,
        }
    }

    /// π digit at fractional position `s ∈ [0, 1]`, linearly interpolated.
    pub fn digit_at(s: f32) -> f32 {
        let last = (PI_DIGITS.len() - 1) as f32;
        let x = s.clamp(0.0, 1.0) * last;
        let i = x.floor() as usize;
        let j = (i + 1).min(PI_DIGITS.len() - 1);
        let digit = |k: usize| (PI_DIGITS[k] - b'0') as f32;
        let f = x - i as f32;
        digit(i) * (1.0 - f) + digit(j) * f
    }
}

impl ParametricCurve for PiSpiral {
    fn point(&self, t: f32) -> Vector3<f32> {
        let t_max = self.turns * TAU;
        let s = t / t_max;
        let modulation = 1.0 + 0.15 * (Self::digit_at(s) - 4.5) / 4.5;
        let r = self.radius * (0.2 + 0.8 * s) * modulation;
        vec3(r * t.cos(), r * t.sin(), self.rise * (s - 0.5))
    }

    fn t_range(&self) -> (f32, f32) {
        (0.0, self.turns * TAU)
    }
}

/// A curve extruded into a vertical band of the given height.
///
/// `v` runs from the top edge down, so a counter-clockwise curve faces
/// outward.
#[derive(Debug, Clone, Copy)]
pub struct ExtrudedCurve<C> {
    pub curve: C,
    pub height: f32,
}

impl<C: ParametricCurve> ParametricSurface for ExtrudedCurve<C> {
    fn evaluate(&self, u: f32, v: f32) -> Vector3<f32> {
        self.curve.point(u) + vec3(0.0, 0.0, (0.5 - v) * self.height)
    }

    fn u_range(&self) -> (f32, f32) {
        self.curve.t_range()
    }

    fn v_range(&self) -> (f32, f32) {
        (0.0, 1.0)
    }

    fn approximate_normal(&self, _u: f32, _v: f32, point: Vector3<f32>) -> Option<Vector3<f32>> {
        try_normalize(vec3(point.x, point.y, 0.0))
    }
}

pub fn generate_klein_bottle(radius: f32, grid: SurfaceGrid) -> GeometryResult<MeshBuffers> {
    ensure_positive("radius", radius)?;
    sample_surface(&KleinBottle::new(radius), grid.at_least(KLEIN_MIN_STEPS))
}

pub fn generate_mobius_strip(radius: f32, grid: SurfaceGrid) -> GeometryResult<MeshBuffers> {
    ensure_positive("radius", radius)?;
    sample_surface(&MobiusStrip { radius }, grid.at_least(SURFACE_MIN_STEPS))
}

pub fn generate_torus_knot(p: u32, q: u32, radius: f32, grid: SurfaceGrid) -> GeometryResult<MeshBuffers> {
    check_knot(p, q)?;
    ensure_positive("radius", radius)?;
    let tube = TorusKnotTube {
        knot: TorusKnot { p, q, radius },
        tube_radius: radius * 0.15,
    };
    sample_surface(&tube, grid.at_least(SURFACE_MIN_STEPS))
}

pub fn generate_torus_knot_curve(p: u32, q: u32, radius: f32, segments: u32) -> GeometryResult<MeshBuffers> {
    check_knot(p, q)?;
    ensure_positive("radius", radius)?;
    sample_curve(&TorusKnot { p, q, radius }, segments)
}

pub fn generate_golden_spiral(radius: f32, grid: SurfaceGrid) -> GeometryResult<MeshBuffers> {
    ensure_positive("radius", radius)?;
    let band = ExtrudedCurve {
        curve: GoldenSpiral::new(radius),
        height: radius * 0.2,
    };
    sample_surface(&band, grid.at_least(SURFACE_MIN_STEPS))
}

pub fn generate_golden_spiral_curve(radius: f32, segments: u32) -> GeometryResult<MeshBuffers> {
    ensure_positive("radius", radius)?;
    sample_curve(&GoldenSpiral::new(radius), segments)
}

pub fn generate_pi_spiral(radius: f32, grid: SurfaceGrid) -> GeometryResult<MeshBuffers> {
    ensure_positive("radius", radius)?;
    let band = ExtrudedCurve {
        curve: PiSpiral::new(radius),
        height: radius * 0.2,
    };
    sample_surface(&band, grid.at_least(SURFACE_MIN_STEPS))
}

pub fn generate_pi_spiral_curve(radius: f32, segments: u32) -> GeometryResult<MeshBuffers> {
    ensure_positive("radius", radius)?;
    sample_curve(&PiSpiral::new(radius), segments)
}

fn check_knot(p: u32, q: u32) -> GeometryResult<()> {
    if p == 0 || q == 0 {
        return Err(GeometryError::invalid(
            "torus_knot",
            format!("p and q must be positive, got ({p}, {q})"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::vector::from_array;
    use cgmath::InnerSpace;

    fn assert_unit_normals(mesh: &MeshBuffers) {
        let normals = mesh.normals.as_ref().expect("surface meshes carry normals");
        assert_eq!(normals.len(), mesh.vertex_count());
        for n in normals {
            let n = from_array(*n);
            assert!(n.x.is_finite() && n.y.is_finite() && n.z.is_finite());
            assert!((n.magnitude() - 1.0).abs() < 1e-4, "normal {n:?}");
        }
    }

    /// Every non-degenerate triangle winds the same way its vertex normals
    /// point.
    fn assert_faces_match_normals(mesh: &MeshBuffers) {
        let normals = mesh.normals.as_ref().expect("surface meshes carry normals");
        let mut checked = 0;
        for tri in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|k| from_array(mesh.positions[k as usize]));
            let face = (b - a).cross(c - a);
            if face.magnitude2() < 1e-12 {
                continue;
            }
            let shared = tri
                .iter()
                .map(|&k| from_array(normals[k as usize]))
                .fold(vec3(0.0, 0.0, 0.0), |acc, n| acc + n);
            assert!(face.dot(shared) > 0.0, "triangle {tri:?} winds against its normals");
            checked += 1;
        }
        assert!(checked > 0);
    }

    #[test]
    fn test_klein_bottle_grid() {
        let mesh = generate_klein_bottle(2.0, SurfaceGrid::square(40)).unwrap();
        assert_eq!(mesh.vertex_count(), 40 * 40);
        assert_eq!(mesh.triangle_count(), 39 * 39 * 2);
        assert_unit_normals(&mesh);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_klein_bottle_enforces_minimum_grid() {
        let mesh = generate_klein_bottle(1.0, SurfaceGrid::square(8)).unwrap();
        assert_eq!(mesh.vertex_count(), (KLEIN_MIN_STEPS * KLEIN_MIN_STEPS) as usize);
        assert_unit_normals(&mesh);
    }

    #[test]
    fn test_mobius_strip_grid() {
        let grid = SurfaceGrid::new(48, 12, 48);
        let mesh = generate_mobius_strip(1.5, grid).unwrap();
        assert_eq!(mesh.vertex_count(), 48 * 12);
        assert_unit_normals(&mesh);
        assert_eq!(mesh.uvs.as_ref().map(Vec::len), Some(48 * 12));
    }

    #[test]
    fn test_torus_knot_surface_and_curve() {
        let mesh = generate_torus_knot(2, 3, 1.0, SurfaceGrid::new(64, 12, 64)).unwrap();
        assert_eq!(mesh.vertex_count(), 64 * 12);
        assert_unit_normals(&mesh);

        let curve = generate_torus_knot_curve(2, 3, 1.0, 100).unwrap();
        assert_eq!(curve.vertex_count(), 101);
        assert_eq!(curve.primitive_count(), 100);
        assert_eq!(curve.topology, Topology::Lines);
        assert!(curve.validate().is_ok());
    }

    #[test]
    fn test_torus_knot_rejects_zero_winding() {
        assert!(generate_torus_knot(0, 3, 1.0, SurfaceGrid::square(16)).is_err());
        assert!(generate_torus_knot_curve(2, 0, 1.0, 16).is_err());
    }

    #[test]
    fn test_spirals() {
        for mesh in [
            generate_golden_spiral(1.0, SurfaceGrid::new(64, 8, 64)).unwrap(),
            generate_pi_spiral(1.0, SurfaceGrid::new(64, 8, 64)).unwrap(),
        ] {
            assert_eq!(mesh.vertex_count(), 64 * 8);
            assert_unit_normals(&mesh);
        }
        assert_eq!(generate_golden_spiral_curve(1.0, 50).unwrap().vertex_count(), 51);
        assert_eq!(generate_pi_spiral_curve(1.0, 50).unwrap().vertex_count(), 51);
    }

    #[test]
    fn test_surface_winding_agrees_with_normals() {
        assert_faces_match_normals(&generate_mobius_strip(1.5, SurfaceGrid::new(48, 12, 48)).unwrap());
        assert_faces_match_normals(&generate_torus_knot(2, 3, 1.0, SurfaceGrid::new(128, 16, 128)).unwrap());
        assert_faces_match_normals(&generate_torus_knot(3, 5, 2.0, SurfaceGrid::new(160, 12, 160)).unwrap());
        assert_faces_match_normals(&generate_golden_spiral(1.0, SurfaceGrid::new(64, 8, 64)).unwrap());
        assert_faces_match_normals(&generate_pi_spiral(1.0, SurfaceGrid::new(64, 8, 64)).unwrap());
    }

    #[test]
    fn test_torus_knot_tube_faces_away_from_knot() {
        let knot = TorusKnot { p: 2, q: 3, radius: 1.0 };
        let tube = TorusKnotTube { knot, tube_radius: 0.15 };
        let h = SurfaceGrid::square(64).difference_step();
        for i in 0..32 {
            let u = i as f32 / 32.0 * TAU;
            for j in 0..8 {
                let v = j as f32 / 8.0 * TAU;
                let n = difference_normal(&tube, u, v, h).unwrap();
                let outward = tube.evaluate(u, v) - knot.point(u);
                assert!(n.dot(outward) > 0.0, "inward normal at ({u}, {v})");
            }
        }
    }

    #[test]
    fn test_spiral_bands_face_outward() {
        for mesh in [
            generate_golden_spiral(1.0, SurfaceGrid::new(64, 8, 64)).unwrap(),
            generate_pi_spiral(1.0, SurfaceGrid::new(64, 8, 64)).unwrap(),
        ] {
            let normals = mesh.normals.as_ref().unwrap();
            for (p, n) in mesh.positions.iter().zip(normals) {
                assert!(p[0] * n[0] + p[1] * n[1] > 0.0, "inward normal at {p:?}");
            }
        }
    }

    #[test]
    fn test_golden_spiral_grows_by_phi_per_quarter_turn() {
        let spiral = GoldenSpiral::new(1.0);
        let radial = |t: f32| {
            let p = spiral.point(t);
            (p.x * p.x + p.y * p.y).sqrt()
        };
        let ratio = radial(PI) / radial(PI * 0.5);
        assert!((ratio - GOLDEN_RATIO).abs() < 1e-3);
    }

    #[test]
    fn test_pi_digits() {
        assert_eq!(PiSpiral::digit_at(0.0), 3.0);
        assert_eq!(PiSpiral::digit_at(1.0), 5.0);
        assert!((PiSpiral::digit_at(0.5 / 31.0) - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_resolution_is_rejected() {
        let err = sample_surface(&MobiusStrip { radius: 1.0 }, SurfaceGrid::new(8, 8, 0));
        assert!(matches!(err, Err(GeometryError::InvalidParameter { name: "resolution", .. })));
        assert!(sample_curve(&TorusKnot { p: 2, q: 3, radius: 1.0 }, 0).is_err());
    }

    struct Punctured;

    impl ParametricSurface for Punctured {
        fn evaluate(&self, u: f32, v: f32) -> Vector3<f32> {
            if u == 0.0 && v == 0.0 {
                vec3(f32::NAN, 0.0, 0.0)
            } else {
                vec3(u, v, 0.0)
            }
        }

        fn u_range(&self) -> (f32, f32) {
            (0.0, 1.0)
        }

        fn v_range(&self) -> (f32, f32) {
            (0.0, 1.0)
        }
    }

    #[test]
    fn test_non_finite_samples_are_skipped() {
        let mesh = sample_surface(&Punctured, SurfaceGrid::square(3)).unwrap();
        assert_eq!(mesh.vertex_count(), 8);
        // the corner cell loses its first triangle
        assert_eq!(mesh.triangle_count(), 7);
        assert!(mesh.degenerate_samples >= 1);
        assert!(mesh.validate().is_ok());
    }
}
