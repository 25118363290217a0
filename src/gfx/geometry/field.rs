//! # Sampled Fields
//!
//! Geometry obtained by evaluating a scalar field rather than a closed-form
//! shape.
//!
//! ## Quantum Field
//!
//! Nested probability shells. Layer `l` is a sphere of radius
//! `r_l = radius·(0.55 + 0.3·l)` pushed outward by a hydrogen-like density
//! `P = (Y·R)²` and a tunneling term `T` that peaks near fixed barrier radii:
//!
//! ```text
//! Y = cos θ · cos(m φ) · sin(n θ)            n = l + 2, m = l + 1
//! R = exp(-r_l / 2r) · (1 + 0.5 cos(3π r_l / r))
//! T = Σ_b 0.5 · exp(-4 |r_l - b| / r)        b ∈ r·{0.5, 0.85, 1.2}
//! displacement = r · (0.35 P + 0.15 T √P)
//! ```
//!
//! Shells are parameterized by azimuth `u = φ` and polar angle `v = θ`, which
//! winds every triangle outward.
//!
//! ## Julia Set
//!
//! Voxel centers of a `res³` grid over `[-b, b]³` that stay bounded under the
//! quadratic map `(x, y, z) ↦ (x² - y² - z² + c₁, 2xy + c₂, 2xz)`.

use super::parametric::{sample_surface, ParametricSurface, SurfaceGrid};
use super::vector::{hsl_to_rgb, vec3};
use super::{MeshBuffers, MeshBuilder, Topology, Vertex};
use crate::error::{ensure_positive, GeometryError, GeometryResult};
use cgmath::{InnerSpace, Vector3};
use log::warn;
use std::f32::consts::{PI, TAU};

/// Above this complexity the field gains a third shell.
pub const THIRD_LAYER_COMPLEXITY: u32 = 4;
pub const MAX_FIELD_COMPLEXITY: u32 = 8;

/// Largest accepted Julia grid resolution.
pub const MAX_JULIA_RESOLUTION: u32 = 128;

/// Resolutions above this produce very large point clouds.
pub const RECOMMENDED_JULIA_RESOLUTION: u32 = 60;

const BARRIERS: [f32; 3] = [0.5, 0.85, 1.2];

/// Upper bound of `P`, used to normalize the color ramp.
const MAX_DENSITY: f32 = 2.25;

/// One probability shell of the quantum field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantumShell {
    pub radius: f32,
    pub layer: u32,
    pub layers: u32,
}

impl QuantumShell {
    pub fn new(radius: f32, layer: u32, layers: u32) -> Self {
        Self {
            radius,
            layer,
            layers,
        }
    }

    pub fn shell_radius(&self) -> f32 {
        self.radius * (0.55 + 0.3 * self.layer as f32)
    }

    /// Probability density `P` at polar angle `theta` and azimuth `phi`.
    pub fn density(&self, theta: f32, phi: f32) -> f32 {
        let n = (self.layer + 2) as f32;
        let m = (self.layer + 1) as f32;
        let r = self.shell_radius();

        let angular = theta.cos() * (m * phi).cos() * (n * theta).sin();
        let radial = (-r / (2.0 * self.radius)).exp()
            * (1.0 + 0.5 * (3.0 * PI * r / self.radius).cos());
        (angular * radial).powi(2)
    }

    pub fn tunneling(&self) -> f32 {
        let r = self.shell_radius();
        BARRIERS
            .iter()
            .take(self.layers as usize)
            .map(|b| 0.5 * (-4.0 * (r - b * self.radius).abs() / self.radius).exp())
            .sum()
    }
}

impl ParametricSurface for QuantumShell {
    fn evaluate(&self, phi: f32, theta: f32) -> Vector3<f32> {
        let p = self.density(theta, phi);
        let displacement = self.radius * (0.35 * p + 0.15 * self.tunneling() * p.sqrt());
        let (sin_theta, cos_theta) = theta.sin_cos();
        let direction = vec3(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta);
        direction * (self.shell_radius() + displacement)
    }

    fn u_range(&self) -> (f32, f32) {
        (0.0, TAU)
    }

    fn v_range(&self) -> (f32, f32) {
        (0.0, PI)
    }

    fn has_vertex_colors(&self) -> bool {
        true
    }

    /// Blue for low density through to red at the peak.
    fn vertex_color(&self, phi: f32, theta: f32) -> [f32; 3] {
        let p = (self.density(theta, phi) / MAX_DENSITY).min(1.0);
        hsl_to_rgb(0.66 * (1.0 - p), 0.8, 0.5)
    }
}

/// Number of shells for a given complexity.
pub fn quantum_layer_count(complexity: u32) -> u32 {
    if complexity >= THIRD_LAYER_COMPLEXITY {
        3
    } else {
        2
    }
}

/// Generate the layered quantum probability field
///
/// # Arguments
/// * `radius` - Reference radius of the field
/// * `complexity` - Shell count and sampling density, in `[1, 8]`
pub fn generate_quantum_field(radius: f32, complexity: u32) -> GeometryResult<MeshBuffers> {
    ensure_positive("radius", radius)?;
    if !(1..=MAX_FIELD_COMPLEXITY).contains(&complexity) {
        return Err(GeometryError::invalid(
            "complexity",
            format!("must be in [1, {MAX_FIELD_COMPLEXITY}], got {complexity}"),
        ));
    }

    let layers = quantum_layer_count(complexity);
    let steps = 12 + 6 * complexity;
    let grid = SurfaceGrid::new(steps * 2, steps, steps);

    let mut builder = MeshBuilder::new(Topology::Triangles)
        .with_normals()
        .with_uvs()
        .with_colors();
    for layer in 0..layers {
        builder.append(sample_surface(&QuantumShell::new(radius, layer, layers), grid)?);
    }
    Ok(builder.build())
}

/// Iteration at which `point` escapes the radius-2 ball, or `None` if it is
/// still bounded after `max_iterations`.
pub fn julia_escape_time(point: Vector3<f32>, c: [f32; 2], max_iterations: u32) -> Option<u32> {
    let (mut x, mut y, mut z) = (point.x, point.y, point.z);
    for i in 0..max_iterations {
        (x, y, z) = (x * x - y * y - z * z + c[0], 2.0 * x * y + c[1], 2.0 * x * z);
        if x * x + y * y + z * z > 4.0 {
            return Some(i);
        }
    }
    None
}

/// Generate a 3D Julia set point cloud
///
/// # Arguments
/// * `c` - Complex constant `c₁ + c₂ i`
/// * `resolution` - Voxels per axis, at most [`MAX_JULIA_RESOLUTION`]
/// * `bounds` - Half-extent of the sampled cube
/// * `max_iterations` - Escape-time iteration limit
pub fn generate_julia_set(
    c: [f32; 2],
    resolution: u32,
    bounds: f32,
    max_iterations: u32,
) -> GeometryResult<MeshBuffers> {
    if !(1..=MAX_JULIA_RESOLUTION).contains(&resolution) {
        return Err(GeometryError::invalid(
            "resolution",
            format!("must be in [1, {MAX_JULIA_RESOLUTION}], got {resolution}"),
        ));
    }
    ensure_positive("bounds", bounds)?;
    if max_iterations == 0 {
        return Err(GeometryError::invalid("max_iterations", "must be at least 1"));
    }
    if !(c[0].is_finite() && c[1].is_finite()) {
        return Err(GeometryError::invalid("c", "must be finite"));
    }
    if resolution > RECOMMENDED_JULIA_RESOLUTION {
        warn!(
            "Julia resolution {resolution} exceeds recommended {RECOMMENDED_JULIA_RESOLUTION} ({} voxels)",
            resolution.pow(3)
        );
    }

    let step = 2.0 * bounds / resolution as f32;
    let center = |i: u32| -bounds + (i as f32 + 0.5) * step;
    let max_distance = bounds * 3f32.sqrt();

    let mut builder = MeshBuilder::new(Topology::Points).with_colors();
    for i in 0..resolution {
        for j in 0..resolution {
            for k in 0..resolution {
                let point = vec3(center(i), center(j), center(k));
                if julia_escape_time(point, c, max_iterations).is_some() {
                    continue;
                }
                let hue = 0.8 * point.magnitude() / max_distance;
                let index = builder.push_vertex(
                    Vertex::at(point).with_color(hsl_to_rgb(hue, 0.9, 0.55)),
                );
                builder.push_point(index);
            }
        }
    }
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::vector::from_array;
    use approx::assert_relative_eq;

    #[test]
    fn test_layer_count() {
        assert_eq!(quantum_layer_count(1), 2);
        assert_eq!(quantum_layer_count(3), 2);
        assert_eq!(quantum_layer_count(4), 3);
        assert_eq!(quantum_layer_count(8), 3);
    }

    #[test]
    fn test_shell_radii_and_tunneling() {
        let shell = QuantumShell::new(2.0, 1, 2);
        assert_relative_eq!(shell.shell_radius(), 1.7, epsilon = 1e-6);
        // only the first two barriers (1.0 and 1.7) apply
        let expected = 0.5 * (-4.0f32 * 0.7 / 2.0).exp() + 0.5;
        assert_relative_eq!(shell.tunneling(), expected, epsilon = 1e-6);
    }

    #[test]
    fn test_density_is_bounded() {
        let shell = QuantumShell::new(1.0, 2, 3);
        for i in 0..=20 {
            for j in 0..=20 {
                let p = shell.density(i as f32 / 20.0 * PI, j as f32 / 20.0 * TAU);
                assert!((0.0..=MAX_DENSITY).contains(&p));
            }
        }
    }

    #[test]
    fn test_quantum_field_layers_merge() {
        let mesh = generate_quantum_field(1.0, 2).unwrap();
        let steps = 12 + 6 * 2;
        assert_eq!(mesh.vertex_count(), 2 * (steps * steps * 2) as usize);
        assert!(mesh.colors.is_some());
        assert!(mesh.validate().is_ok());
        for n in mesh.normals.as_ref().unwrap() {
            assert_relative_eq!(from_array(*n).magnitude(), 1.0, epsilon = 1e-4);
        }

        let three = generate_quantum_field(1.0, 4).unwrap();
        let steps = 12 + 6 * 4;
        assert_eq!(three.vertex_count(), 3 * (steps * steps * 2) as usize);
    }

    #[test]
    fn test_quantum_shells_face_outward() {
        for complexity in [1, 2, 4, 8] {
            let mesh = generate_quantum_field(1.0, complexity).unwrap();
            let normals = mesh.normals.as_ref().unwrap();
            let mut checked = 0;
            for tri in mesh.indices.chunks(3) {
                let [a, b, c] = [0, 1, 2].map(|k| from_array(mesh.positions[tri[k] as usize]));
                let face = (b - a).cross(c - a);
                // pole rows collapse to zero-area triangles
                if face.magnitude2() < 1e-10 {
                    continue;
                }
                let centroid = (a + b + c) / 3.0;
                assert!(face.dot(centroid) > 0.0, "complexity {complexity}: triangle {tri:?} faces inward");

                let shared = tri
                    .iter()
                    .map(|&k| from_array(normals[k as usize]))
                    .fold(vec3(0.0, 0.0, 0.0), |acc, n| acc + n);
                assert!(face.dot(shared) > 0.0, "complexity {complexity}: triangle {tri:?} winds against its normals");
                checked += 1;
            }
            assert!(checked > 0);
        }
    }

    #[test]
    fn test_quantum_field_rejects_bad_input() {
        assert!(generate_quantum_field(0.0, 2).is_err());
        assert!(generate_quantum_field(1.0, 0).is_err());
        assert!(generate_quantum_field(1.0, 9).is_err());
    }

    #[test]
    fn test_escape_time() {
        assert_eq!(julia_escape_time(vec3(0.0, 0.0, 0.0), [0.0, 0.0], 100), None);
        assert_eq!(julia_escape_time(vec3(3.0, 0.0, 0.0), [0.0, 0.0], 100), Some(0));
    }

    #[test]
    fn test_julia_set_points_stay_bounded() {
        let c = [-0.4, 0.6];
        let mesh = generate_julia_set(c, 30, 2.0, 50).unwrap();
        assert!(!mesh.is_empty());
        assert_eq!(mesh.topology, Topology::Points);
        assert!(mesh.validate().is_ok());
        for p in &mesh.positions {
            assert!(p.iter().all(|v| (-2.0..=2.0).contains(v)));
            assert_eq!(julia_escape_time(from_array(*p), c, 50), None);
        }
    }

    #[test]
    fn test_julia_set_rejects_bad_input() {
        assert!(generate_julia_set([-0.4, 0.6], 0, 2.0, 50).is_err());
        assert!(generate_julia_set([-0.4, 0.6], 129, 2.0, 50).is_err());
        assert!(generate_julia_set([-0.4, 0.6], 10, 0.0, 50).is_err());
        assert!(generate_julia_set([-0.4, 0.6], 10, 2.0, 0).is_err());
        assert!(generate_julia_set([f32::NAN, 0.6], 10, 2.0, 50).is_err());
    }
}
