//! # Geometry Requests
//!
//! A [`GeometryRequest`] names one object family ([`GeometryKind`]) and the
//! shared numeric knobs. Requests are only created through
//! [`GeometryRequestBuilder::build`], which rejects invalid values and clamps
//! the per-family ceilings, so every request that reaches the dispatcher is
//! in range.
//!
//! ## Usage
//!
//! ```rust
//! use hyperform::generator::{GeometryKind, GeometryRequest, HopfStyle};
//!
//! let request = GeometryRequest::builder(GeometryKind::Hopf {
//!     style: HopfStyle::Tubes { tube_radius: 0.04 },
//! })
//! .with_complexity(12)
//! .with_symmetry(6)
//! .with_radius(1.5)
//! .build()
//! .unwrap();
//!
//! assert_eq!(request.complexity(), 12);
//! ```

use std::fmt;

use log::trace;

use crate::error::{ensure_positive, GeometryError, GeometryResult};
use crate::gfx::geometry::{
    MAX_FIELD_COMPLEXITY, MAX_HOPF_FIBERS, MAX_HYPERCUBE_DIMENSION, MAX_JULIA_RESOLUTION,
    MAX_KOCH_DEPTH, MAX_RIBBON_FIBERS, MAX_SHADED_DIMENSION, MAX_SIERPINSKI_DEPTH,
    MIN_HYPERCUBE_DIMENSION,
};

/// Ceiling on the resolution multiplier of parametric surfaces.
pub const MAX_SURFACE_COMPLEXITY: u32 = 8;
/// Ceiling on the segment multiplier of parametric curves.
pub const MAX_CURVE_COMPLEXITY: u32 = 16;
/// Ceiling on the Julia iteration multiplier.
pub const MAX_JULIA_COMPLEXITY: u32 = 50;
pub const MAX_SYMMETRY: u32 = 64;

pub const MIN_COMPLEXITY: u32 = 1;
pub const MIN_SYMMETRY: u32 = 2;

/// Rendering style of an n-cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HypercubeStyle {
    #[default]
    Wireframe,
    /// Faces of the base cube; 3D and 4D only
    Shaded,
}

/// How Hopf fibers are turned into geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HopfStyle {
    Points,
    Lines,
    Tubes { tube_radius: f32 },
    Ribbons { width: f32, thickness: f32 },
    BaseSphere,
}

/// One variant per object family; kind-specific parameters live inline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryKind {
    Hypercube { dimension: u32, style: HypercubeStyle },
    KleinBottle,
    MobiusStrip,
    TorusKnot { p: u32, q: u32 },
    GoldenSpiral,
    PiSpiral,
    TorusKnotCurve { p: u32, q: u32 },
    GoldenSpiralCurve,
    PiSpiralCurve,
    Hopf { style: HopfStyle },
    Sierpinski,
    Koch,
    QuantumField,
    JuliaSet {
        c: [f32; 2],
        resolution: u32,
        bounds: f32,
        /// Defaults to `10 · complexity`
        max_iterations: Option<u32>,
    },
}

impl GeometryKind {
    /// Short family name used in logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            GeometryKind::Hypercube { .. } => "hypercube",
            GeometryKind::KleinBottle => "klein-bottle",
            GeometryKind::MobiusStrip => "mobius-strip",
            GeometryKind::TorusKnot { .. } => "torus-knot",
            GeometryKind::GoldenSpiral => "golden-spiral",
            GeometryKind::PiSpiral => "pi-spiral",
            GeometryKind::TorusKnotCurve { .. } => "torus-knot-curve",
            GeometryKind::GoldenSpiralCurve => "golden-spiral-curve",
            GeometryKind::PiSpiralCurve => "pi-spiral-curve",
            GeometryKind::Hopf { .. } => "hopf",
            GeometryKind::Sierpinski => "sierpinski",
            GeometryKind::Koch => "koch",
            GeometryKind::QuantumField => "quantum-field",
            GeometryKind::JuliaSet { .. } => "julia-set",
        }
    }

    /// Largest meaningful complexity for this family, if any.
    pub fn complexity_ceiling(&self) -> Option<u32> {
        match self {
            GeometryKind::Hypercube { .. } => None,
            GeometryKind::KleinBottle
            | GeometryKind::MobiusStrip
            | GeometryKind::TorusKnot { .. }
            | GeometryKind::GoldenSpiral
            | GeometryKind::PiSpiral => Some(MAX_SURFACE_COMPLEXITY),
            GeometryKind::TorusKnotCurve { .. }
            | GeometryKind::GoldenSpiralCurve
            | GeometryKind::PiSpiralCurve => Some(MAX_CURVE_COMPLEXITY),
            GeometryKind::Hopf {
                style: HopfStyle::Ribbons { .. },
            } => Some(MAX_RIBBON_FIBERS),
            GeometryKind::Hopf { .. } => Some(MAX_HOPF_FIBERS),
            GeometryKind::Sierpinski => Some(MAX_SIERPINSKI_DEPTH),
            GeometryKind::Koch => Some(MAX_KOCH_DEPTH),
            GeometryKind::QuantumField => Some(MAX_FIELD_COMPLEXITY),
            GeometryKind::JuliaSet { .. } => Some(MAX_JULIA_COMPLEXITY),
        }
    }

    /// One representative of every family, with typical parameters.
    pub fn catalog() -> Vec<GeometryKind> {
        let mut kinds: Vec<GeometryKind> = (MIN_HYPERCUBE_DIMENSION..=MAX_HYPERCUBE_DIMENSION)
            .map(|dimension| GeometryKind::Hypercube {
                dimension,
                style: HypercubeStyle::Wireframe,
            })
            .collect();
        kinds.extend([
            GeometryKind::Hypercube {
                dimension: 4,
                style: HypercubeStyle::Shaded,
            },
            GeometryKind::KleinBottle,
            GeometryKind::MobiusStrip,
            GeometryKind::TorusKnot { p: 2, q: 3 },
            GeometryKind::GoldenSpiral,
            GeometryKind::PiSpiral,
            GeometryKind::TorusKnotCurve { p: 3, q: 5 },
            GeometryKind::GoldenSpiralCurve,
            GeometryKind::PiSpiralCurve,
            GeometryKind::Hopf {
                style: HopfStyle::Points,
            },
            GeometryKind::Hopf {
                style: HopfStyle::Lines,
            },
            GeometryKind::Hopf {
                style: HopfStyle::Tubes { tube_radius: 0.03 },
            },
            GeometryKind::Hopf {
                style: HopfStyle::Ribbons {
                    width: 0.08,
                    thickness: 0.015,
                },
            },
            GeometryKind::Hopf {
                style: HopfStyle::BaseSphere,
            },
            GeometryKind::Sierpinski,
            GeometryKind::Koch,
            GeometryKind::QuantumField,
            GeometryKind::JuliaSet {
                c: [-0.4, 0.6],
                resolution: 40,
                bounds: 1.5,
                max_iterations: None,
            },
        ]);
        kinds
    }

    fn validate(&self) -> GeometryResult<()> {
        match *self {
            GeometryKind::Hypercube { dimension, style } => {
                if !(MIN_HYPERCUBE_DIMENSION..=MAX_HYPERCUBE_DIMENSION).contains(&dimension) {
                    return Err(GeometryError::invalid(
                        "dimension",
                        format!(
                            "must be in [{MIN_HYPERCUBE_DIMENSION}, {MAX_HYPERCUBE_DIMENSION}], got {dimension}"
                        ),
                    ));
                }
                if style == HypercubeStyle::Shaded && dimension > MAX_SHADED_DIMENSION {
                    return Err(GeometryError::invalid(
                        "style",
                        format!("shaded hypercubes stop at {MAX_SHADED_DIMENSION}D, got {dimension}D"),
                    ));
                }
            }
            GeometryKind::TorusKnot { p, q } | GeometryKind::TorusKnotCurve { p, q } => {
                if p == 0 || q == 0 {
                    return Err(GeometryError::invalid(
                        "torus_knot",
                        format!("p and q must be positive, got ({p}, {q})"),
                    ));
                }
            }
            GeometryKind::Hopf {
                style: HopfStyle::Tubes { tube_radius },
            } => ensure_positive("tube_radius", tube_radius)?,
            GeometryKind::Hopf {
                style: HopfStyle::Ribbons { width, thickness },
            } => {
                ensure_positive("ribbon_width", width)?;
                ensure_positive("ribbon_thickness", thickness)?;
            }
            GeometryKind::JuliaSet {
                c,
                resolution,
                bounds,
                max_iterations,
            } => {
                if !(c[0].is_finite() && c[1].is_finite()) {
                    return Err(GeometryError::invalid("c", "must be finite"));
                }
                if resolution == 0 {
                    return Err(GeometryError::invalid("resolution", "must be at least 1"));
                }
                ensure_positive("bounds", bounds)?;
                if max_iterations == Some(0) {
                    return Err(GeometryError::invalid("max_iterations", "must be at least 1"));
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Clamp kind-specific ceilings in place.
    fn clamp(&mut self) {
        if let GeometryKind::JuliaSet { resolution, .. } = self {
            if *resolution > MAX_JULIA_RESOLUTION {
                trace!("clamping Julia resolution {resolution} to {MAX_JULIA_RESOLUTION}");
                *resolution = MAX_JULIA_RESOLUTION;
            }
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryKind::Hypercube { dimension, style } => {
                write!(f, "hypercube-{dimension}d")?;
                if *style == HypercubeStyle::Shaded {
                    write!(f, "-shaded")?;
                }
                Ok(())
            }
            GeometryKind::TorusKnot { p, q } | GeometryKind::TorusKnotCurve { p, q } => {
                write!(f, "{}({p},{q})", self.name())
            }
            GeometryKind::Hopf { style } => {
                let style = match style {
                    HopfStyle::Points => "points",
                    HopfStyle::Lines => "lines",
                    HopfStyle::Tubes { .. } => "tubes",
                    HopfStyle::Ribbons { .. } => "ribbons",
                    HopfStyle::BaseSphere => "base-sphere",
                };
                write!(f, "hopf-{style}")
            }
            _ => f.write_str(self.name()),
        }
    }
}

/// A validated, immutable generation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryRequest {
    kind: GeometryKind,
    complexity: u32,
    symmetry: u32,
    radius: f32,
    seed: u64,
}

impl GeometryRequest {
    pub fn builder(kind: GeometryKind) -> GeometryRequestBuilder {
        GeometryRequestBuilder::new(kind)
    }

    pub fn kind(&self) -> &GeometryKind {
        &self.kind
    }

    pub fn complexity(&self) -> u32 {
        self.complexity
    }

    pub fn symmetry(&self) -> u32 {
        self.symmetry
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Seed for randomized families (Koch spike jitter).
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// Builder for [`GeometryRequest`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryRequestBuilder {
    kind: GeometryKind,
    complexity: u32,
    symmetry: u32,
    radius: f32,
    seed: u64,
}

impl GeometryRequestBuilder {
    pub fn new(kind: GeometryKind) -> Self {
        Self {
            kind,
            complexity: 4,
            symmetry: 8,
            radius: 1.0,
            seed: 0,
        }
    }

    pub fn with_complexity(mut self, complexity: u32) -> Self {
        self.complexity = complexity;
        self
    }

    pub fn with_symmetry(mut self, symmetry: u32) -> Self {
        self.symmetry = symmetry;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validate every parameter and clamp the family ceilings.
    pub fn build(self) -> GeometryResult<GeometryRequest> {
        if self.complexity < MIN_COMPLEXITY {
            return Err(GeometryError::invalid(
                "complexity",
                format!("must be at least {MIN_COMPLEXITY}, got {}", self.complexity),
            ));
        }
        if self.symmetry < MIN_SYMMETRY {
            return Err(GeometryError::invalid(
                "symmetry",
                format!("must be at least {MIN_SYMMETRY}, got {}", self.symmetry),
            ));
        }
        ensure_positive("radius", self.radius)?;
        self.kind.validate()?;

        let mut kind = self.kind;
        kind.clamp();

        let complexity = match kind.complexity_ceiling() {
            Some(ceiling) if self.complexity > ceiling => {
                trace!(
                    "clamping {} complexity {} to {ceiling}",
                    kind.name(),
                    self.complexity
                );
                ceiling
            }
            _ => self.complexity,
        };
        let symmetry = if self.symmetry > MAX_SYMMETRY {
            trace!("clamping symmetry {} to {MAX_SYMMETRY}", self.symmetry);
            MAX_SYMMETRY
        } else {
            self.symmetry
        };

        Ok(GeometryRequest {
            kind,
            complexity,
            symmetry,
            radius: self.radius,
            seed: self.seed,
        })
    }
}
