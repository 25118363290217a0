//! # Dispatch
//!
//! Routes a [`GeometryRequest`] to the generator of its family and wraps the
//! result with a [`GenerationReport`].
//!
//! ## Request mapping
//!
//! - Surfaces: `resolution = 16·complexity`, `U = max(resolution, min)`,
//!   `V = max(4·symmetry, min)`
//! - Curves: `64·complexity` segments
//! - Hopf: `complexity` fibers, `max(24, 8·symmetry)` samples per fiber
//! - Sierpinski/Koch: `complexity` is the recursion depth, Koch adds
//!   `4 + complexity/2` secondary spikes per segment
//! - Julia: `10·complexity` iterations unless given explicitly

use std::time::{Duration, Instant};

use log::{debug, warn};

use super::request::{GeometryKind, GeometryRequest, HopfStyle, HypercubeStyle};
use crate::error::GeometryResult;
use crate::gfx::geometry::{
    generate_golden_spiral, generate_golden_spiral_curve, generate_hopf_base_sphere,
    generate_hopf_lines, generate_hopf_points, generate_hopf_ribbons, generate_hopf_tubes,
    generate_hypercube, generate_hypercube_solid, generate_julia_set, generate_klein_bottle,
    generate_koch, generate_mobius_strip, generate_pi_spiral, generate_pi_spiral_curve,
    generate_quantum_field, generate_sierpinski, generate_torus_knot, generate_torus_knot_curve,
    FiberBundle, HopfSettings, MeshBuffers, SurfaceGrid, BASE_KOCH_SPIKES, MAX_FIBER_SAMPLES,
};
use crate::performance::GenerationReport;

/// Default frame budget: one frame at 60 Hz.
pub const DEFAULT_FRAME_BUDGET: Duration = Duration::from_millis(16);

const SURFACE_RESOLUTION_STEP: u32 = 16;
const CURVE_SEGMENT_STEP: u32 = 64;
const MIN_FIBER_SAMPLES_PER_REQUEST: u32 = 24;
const JULIA_ITERATION_STEP: u32 = 10;

/// Output of one generation call.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryOutput {
    Mesh(MeshBuffers),
    /// Independently tinted sub-meshes (Hopf tubes and ribbons)
    Bundle(FiberBundle),
}

impl GeometryOutput {
    pub fn vertex_count(&self) -> usize {
        match self {
            GeometryOutput::Mesh(mesh) => mesh.vertex_count(),
            GeometryOutput::Bundle(bundle) => bundle.vertex_count(),
        }
    }

    pub fn index_count(&self) -> usize {
        match self {
            GeometryOutput::Mesh(mesh) => mesh.indices.len(),
            GeometryOutput::Bundle(bundle) => bundle.index_count(),
        }
    }

    pub fn sub_meshes(&self) -> usize {
        match self {
            GeometryOutput::Mesh(_) => 1,
            GeometryOutput::Bundle(bundle) => bundle.len(),
        }
    }

    pub fn degenerate_samples(&self) -> usize {
        match self {
            GeometryOutput::Mesh(mesh) => mesh.degenerate_samples,
            GeometryOutput::Bundle(bundle) => bundle.degenerate_samples,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_count() == 0
    }

    pub fn validate(&self) -> GeometryResult<()> {
        match self {
            GeometryOutput::Mesh(mesh) => mesh.validate(),
            GeometryOutput::Bundle(bundle) => bundle.validate(),
        }
    }

    pub fn as_mesh(&self) -> Option<&MeshBuffers> {
        match self {
            GeometryOutput::Mesh(mesh) => Some(mesh),
            GeometryOutput::Bundle(_) => None,
        }
    }

    pub fn as_bundle(&self) -> Option<&FiberBundle> {
        match self {
            GeometryOutput::Mesh(_) => None,
            GeometryOutput::Bundle(bundle) => Some(bundle),
        }
    }
}

/// Geometry plus the report describing how it was made.
#[derive(Debug, Clone)]
pub struct Generated {
    pub output: GeometryOutput,
    pub report: GenerationReport,
}

/// Generator settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    /// Calls slower than this are logged and flagged in the report
    pub frame_budget: Duration,
    /// Run `validate()` on every output before returning it
    pub validate_output: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            frame_budget: DEFAULT_FRAME_BUDGET,
            validate_output: cfg!(debug_assertions),
        }
    }
}

impl GeneratorConfig {
    pub fn with_frame_budget(mut self, frame_budget: Duration) -> Self {
        self.frame_budget = frame_budget;
        self
    }

    pub fn with_validation(mut self, validate_output: bool) -> Self {
        self.validate_output = validate_output;
        self
    }
}

/// Stateless dispatcher; holds only its configuration.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the geometry described by `request`.
    pub fn generate(&self, request: &GeometryRequest) -> GeometryResult<Generated> {
        let start = Instant::now();
        let output = build_output(request)?;
        let elapsed = start.elapsed();

        if self.config.validate_output {
            output.validate()?;
        }

        let report = GenerationReport {
            kind: request.kind().to_string(),
            elapsed,
            budget: self.config.frame_budget,
            vertex_count: output.vertex_count(),
            index_count: output.index_count(),
            sub_meshes: output.sub_meshes(),
            degenerate_samples: output.degenerate_samples(),
        };

        debug!(
            "generated {}: {} vertices, {} indices, {} degenerate in {:.2}ms",
            report.kind,
            report.vertex_count,
            report.index_count,
            report.degenerate_samples,
            report.elapsed_ms()
        );
        if report.over_budget() {
            warn!(
                "{} took {:.2}ms, over the {:.2}ms frame budget",
                report.kind,
                report.elapsed_ms(),
                report.budget.as_secs_f32() * 1000.0
            );
        }

        Ok(Generated { output, report })
    }
}

/// Generate with the default configuration.
pub fn generate(request: &GeometryRequest) -> GeometryResult<Generated> {
    Generator::new().generate(request)
}

fn surface_grid(request: &GeometryRequest) -> SurfaceGrid {
    let resolution = SURFACE_RESOLUTION_STEP * request.complexity();
    SurfaceGrid::new(resolution, 4 * request.symmetry(), resolution)
}

fn curve_segments(request: &GeometryRequest) -> u32 {
    CURVE_SEGMENT_STEP * request.complexity()
}

fn hopf_settings(request: &GeometryRequest) -> HopfSettings {
    let samples = (8 * request.symmetry())
        .max(MIN_FIBER_SAMPLES_PER_REQUEST)
        .min(MAX_FIBER_SAMPLES);
    HopfSettings::new(request.complexity(), samples, request.radius())
}

fn build_output(request: &GeometryRequest) -> GeometryResult<GeometryOutput> {
    let radius = request.radius();
    let complexity = request.complexity();

    let mesh = match *request.kind() {
        GeometryKind::Hypercube { dimension, style } => match style {
            // half-size 2 at unit radius keeps the classic n + 1 divisor
            HypercubeStyle::Wireframe => generate_hypercube(dimension, 2.0 * radius)?,
            HypercubeStyle::Shaded => generate_hypercube_solid(dimension, 2.0 * radius)?,
        },
        GeometryKind::KleinBottle => generate_klein_bottle(radius, surface_grid(request))?,
        GeometryKind::MobiusStrip => generate_mobius_strip(radius, surface_grid(request))?,
        GeometryKind::TorusKnot { p, q } => {
            generate_torus_knot(p, q, radius, surface_grid(request))?
        }
        GeometryKind::GoldenSpiral => generate_golden_spiral(radius, surface_grid(request))?,
        GeometryKind::PiSpiral => generate_pi_spiral(radius, surface_grid(request))?,
        GeometryKind::TorusKnotCurve { p, q } => {
            generate_torus_knot_curve(p, q, radius, curve_segments(request))?
        }
        GeometryKind::GoldenSpiralCurve => {
            generate_golden_spiral_curve(radius, curve_segments(request))?
        }
        GeometryKind::PiSpiralCurve => generate_pi_spiral_curve(radius, curve_segments(request))?,
        GeometryKind::Hopf { style } => {
            let settings = hopf_settings(request);
            match style {
                HopfStyle::Points => generate_hopf_points(&settings)?,
                HopfStyle::Lines => generate_hopf_lines(&settings)?,
                HopfStyle::BaseSphere => generate_hopf_base_sphere(&settings)?,
                HopfStyle::Tubes { tube_radius } => {
                    return Ok(GeometryOutput::Bundle(generate_hopf_tubes(
                        &settings,
                        tube_radius,
                    )?));
                }
                HopfStyle::Ribbons { width, thickness } => {
                    return Ok(GeometryOutput::Bundle(generate_hopf_ribbons(
                        &settings, width, thickness,
                    )?));
                }
            }
        }
        GeometryKind::Sierpinski => generate_sierpinski(complexity, radius)?,
        GeometryKind::Koch => generate_koch(
            complexity,
            radius,
            BASE_KOCH_SPIKES + complexity / 2,
            request.seed(),
        )?,
        GeometryKind::QuantumField => generate_quantum_field(radius, complexity)?,
        GeometryKind::JuliaSet {
            c,
            resolution,
            bounds,
            max_iterations,
        } => generate_julia_set(
            c,
            resolution,
            bounds,
            max_iterations.unwrap_or(JULIA_ITERATION_STEP * complexity),
        )?,
    };

    Ok(GeometryOutput::Mesh(mesh))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::request::{GeometryRequestBuilder, MAX_SYMMETRY};
    use crate::gfx::geometry::{Topology, KLEIN_MIN_STEPS, SURFACE_MIN_STEPS};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn build(builder: GeometryRequestBuilder) -> GeometryRequest {
        builder.build().unwrap()
    }

    #[test]
    fn test_every_kind_generates_valid_output() {
        init_logger();
        let generator = Generator::with_config(GeneratorConfig::default().with_validation(true));
        for kind in GeometryKind::catalog() {
            let request = build(GeometryRequest::builder(kind).with_complexity(2));
            let generated = generator.generate(&request).unwrap();
            assert!(generated.output.validate().is_ok(), "{kind}");
            assert!(!generated.output.is_empty(), "{kind}");
            assert_eq!(generated.report.kind, kind.to_string());
            assert_eq!(generated.report.vertex_count, generated.output.vertex_count());
        }
    }

    #[test]
    fn test_same_request_same_output() {
        for kind in [GeometryKind::Koch, GeometryKind::KleinBottle, GeometryKind::Sierpinski] {
            let request = build(GeometryRequest::builder(kind).with_complexity(3).with_seed(99));
            let a = generate(&request).unwrap();
            let b = generate(&request).unwrap();
            assert_eq!(a.output, b.output);
        }
    }

    #[test]
    fn test_koch_seed_changes_output() {
        let request = |seed| build(GeometryRequest::builder(GeometryKind::Koch).with_complexity(2).with_seed(seed));
        let a = generate(&request(1)).unwrap();
        let b = generate(&request(2)).unwrap();
        assert_ne!(a.output, b.output);
    }

    #[test]
    fn test_surface_grid_mapping() {
        let klein = build(
            GeometryRequest::builder(GeometryKind::KleinBottle)
                .with_complexity(1)
                .with_symmetry(2),
        );
        let mesh = generate(&klein).unwrap().output;
        // 16 × 8 is raised to the Klein minimum on both axes
        assert_eq!(mesh.vertex_count(), (KLEIN_MIN_STEPS * KLEIN_MIN_STEPS) as usize);

        let mobius = build(
            GeometryRequest::builder(GeometryKind::MobiusStrip)
                .with_complexity(2)
                .with_symmetry(MAX_SYMMETRY),
        );
        let mesh = generate(&mobius).unwrap().output;
        assert_eq!(mesh.vertex_count(), 32 * 4 * MAX_SYMMETRY as usize);

        let coarse = build(
            GeometryRequest::builder(GeometryKind::MobiusStrip)
                .with_complexity(1)
                .with_symmetry(1 + SURFACE_MIN_STEPS / 8),
        );
        let mesh = generate(&coarse).unwrap().output;
        assert_eq!(mesh.vertex_count(), 16 * SURFACE_MIN_STEPS as usize);
    }

    #[test]
    fn test_hopf_tubes_produce_bundle() {
        let request = build(
            GeometryRequest::builder(GeometryKind::Hopf {
                style: HopfStyle::Tubes { tube_radius: 0.05 },
            })
            .with_complexity(10),
        );
        let generated = generate(&request).unwrap();
        let bundle = generated.output.as_bundle().unwrap();
        assert_eq!(bundle.len(), 10);
        assert_eq!(generated.report.sub_meshes, 10);
        for fiber in &bundle.fibers {
            assert_eq!(fiber.mesh.topology, Topology::Triangles);
            assert_eq!(fiber.mesh.indices.len() % 3, 0);
        }
    }

    #[test]
    fn test_hypercube_dimensions() {
        for dimension in 3..=10u32 {
            let request = build(GeometryRequest::builder(GeometryKind::Hypercube {
                dimension,
                style: HypercubeStyle::Wireframe,
            }));
            let mesh = generate(&request).unwrap().output;
            assert_eq!(mesh.vertex_count(), 1 << dimension);
            assert_eq!(mesh.index_count(), 2 * (dimension as usize) << (dimension - 1));
        }
    }

    #[test]
    fn test_julia_iterations_default_to_complexity() {
        let kind = GeometryKind::JuliaSet {
            c: [-0.4, 0.6],
            resolution: 30,
            bounds: 2.0,
            max_iterations: None,
        };
        let implicit = build(GeometryRequest::builder(kind).with_complexity(5));
        let explicit = build(GeometryRequest::builder(GeometryKind::JuliaSet {
            c: [-0.4, 0.6],
            resolution: 30,
            bounds: 2.0,
            max_iterations: Some(50),
        }));
        assert_eq!(
            generate(&implicit).unwrap().output,
            generate(&explicit).unwrap().output
        );
    }

    #[test]
    fn test_over_budget_flag() {
        let generator = Generator::with_config(
            GeneratorConfig::default().with_frame_budget(Duration::ZERO),
        );
        let request = build(GeometryRequest::builder(GeometryKind::QuantumField));
        let generated = generator.generate(&request).unwrap();
        assert!(generated.report.over_budget());
    }
}
