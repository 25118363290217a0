//! # Closed Catmull-Rom Splines
//!
//! Smooths a closed loop of control points (a Hopf fiber) into an evenly
//! parameterized curve that passes through every control point. Uniform
//! parameterization; segment `k` runs from `P[k]` to `P[k+1]` with
//! `P[k-1]` and `P[k+2]` as outer controls, indices wrapping around.

use cgmath::Vector3;

/// Closed uniform Catmull-Rom spline through at least three points.
#[derive(Debug, Clone)]
pub struct ClosedCatmullRom {
    points: Vec<Vector3<f32>>,
}

impl ClosedCatmullRom {
    /// Returns `None` for fewer than three control points.
    pub fn new(points: Vec<Vector3<f32>>) -> Option<Self> {
        (points.len() >= 3).then_some(Self { points })
    }

    pub fn control_points(&self) -> &[Vector3<f32>] {
        &self.points
    }

    fn controls(&self, t: f32) -> ([Vector3<f32>; 4], f32) {
        let n = self.points.len();
        let x = t.rem_euclid(1.0) * n as f32;
        let k = (x.floor() as usize).min(n - 1);
        let s = x - k as f32;
        let at = |offset: usize| self.points[(k + offset) % n];
        ([at(n - 1), at(0), at(1), at(2)], s)
    }

    /// Position at global parameter `t ∈ [0, 1)`; wraps outside that range.
    pub fn point(&self, t: f32) -> Vector3<f32> {
        let ([p0, p1, p2, p3], s) = self.controls(t);
        let s2 = s * s;
        let s3 = s2 * s;
        (p1 * 2.0
            + (p2 - p0) * s
            + (p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3) * s2
            + (p1 * 3.0 - p0 - p2 * 3.0 + p3) * s3)
            * 0.5
    }

    /// Derivative with respect to the local segment parameter at `t`.
    pub fn tangent(&self, t: f32) -> Vector3<f32> {
        let ([p0, p1, p2, p3], s) = self.controls(t);
        ((p2 - p0)
            + (p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3) * (2.0 * s)
            + (p1 * 3.0 - p0 - p2 * 3.0 + p3) * (3.0 * s * s))
            * 0.5
    }

    /// `count` evenly spaced `(position, tangent)` samples around the loop.
    pub fn resample(&self, count: usize) -> Vec<(Vector3<f32>, Vector3<f32>)> {
        (0..count)
            .map(|i| {
                let t = i as f32 / count as f32;
                (self.point(t), self.tangent(t))
            })
            .collect()
    }
}
