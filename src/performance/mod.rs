//! # Generation Metrics
//!
//! Every call to the generator returns a [`GenerationReport`] describing what
//! was produced and how long it took. A [`GenerationMonitor`] keeps a rolling
//! window of recent reports so an interactive caller can tell when a family
//! has become too slow to regenerate on every slider change.
//!
//! ## Usage
//!
//! ```rust
//! use hyperform::generator::{generate, GeometryKind, GeometryRequest};
//! use hyperform::performance::GenerationMonitor;
//!
//! let mut monitor = GenerationMonitor::new();
//!
//! let request = GeometryRequest::builder(GeometryKind::MobiusStrip).build().unwrap();
//! let generated = generate(&request).unwrap();
//! monitor.record(generated.report.clone());
//!
//! println!("avg {:.2}ms", monitor.metrics().average_ms);
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

/// What one generation call produced.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    /// Display name of the generated kind
    pub kind: String,
    /// Wall-clock time spent generating
    pub elapsed: Duration,
    /// Frame budget the call was measured against
    pub budget: Duration,
    /// Total vertices across all sub-meshes
    pub vertex_count: usize,
    /// Total indices across all sub-meshes
    pub index_count: usize,
    /// Number of meshes (1 for single meshes, fiber count for bundles)
    pub sub_meshes: usize,
    /// Samples skipped or repaired during generation
    pub degenerate_samples: usize,
}

impl GenerationReport {
    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed.as_secs_f32() * 1000.0
    }

    /// Whether generation took longer than the frame budget.
    pub fn over_budget(&self) -> bool {
        self.elapsed > self.budget
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<24} {:>9} vertices {:>9} indices {:>4} meshes {:>6} degenerate {:>9.2}ms",
            self.kind,
            self.vertex_count,
            self.index_count,
            self.sub_meshes,
            self.degenerate_samples,
            self.elapsed_ms()
        )?;
        if self.over_budget() {
            write!(f, " (over budget)")?;
        }
        Ok(())
    }
}

/// Summary statistics over the monitor's window.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationMetrics {
    pub samples: usize,
    pub average_ms: f32,
    pub min_ms: f32,
    pub max_ms: f32,
    pub over_budget: usize,
}

impl Default for GenerationMetrics {
    fn default() -> Self {
        Self {
            samples: 0,
            average_ms: 0.0,
            min_ms: 0.0,
            max_ms: 0.0,
            over_budget: 0,
        }
    }
}

/// Rolling window of recent generation reports.
#[derive(Debug, Clone)]
pub struct GenerationMonitor {
    reports: VecDeque<GenerationReport>,
    max_samples: usize,
}

impl GenerationMonitor {
    pub fn new() -> Self {
        Self::with_capacity(60)
    }

    /// Create a monitor that keeps the last `max_samples` reports.
    pub fn with_capacity(max_samples: usize) -> Self {
        let max_samples = max_samples.max(1);
        Self {
            reports: VecDeque::with_capacity(max_samples),
            max_samples,
        }
    }

    pub fn record(&mut self, report: GenerationReport) {
        if self.reports.len() >= self.max_samples {
            self.reports.pop_front();
        }
        self.reports.push_back(report);
    }

    pub fn latest(&self) -> Option<&GenerationReport> {
        self.reports.back()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn metrics(&self) -> GenerationMetrics {
        if self.reports.is_empty() {
            return GenerationMetrics::default();
        }

        let total: Duration = self.reports.iter().map(|r| r.elapsed).sum();
        let average = total / self.reports.len() as u32;
        let min = self.reports.iter().map(|r| r.elapsed).min().unwrap_or_default();
        let max = self.reports.iter().map(|r| r.elapsed).max().unwrap_or_default();

        GenerationMetrics {
            samples: self.reports.len(),
            average_ms: average.as_secs_f32() * 1000.0,
            min_ms: min.as_secs_f32() * 1000.0,
            max_ms: max.as_secs_f32() * 1000.0,
            over_budget: self.reports.iter().filter(|r| r.over_budget()).count(),
        }
    }

    /// Elapsed milliseconds of every report in the window, oldest first.
    pub fn history_ms(&self) -> Vec<f32> {
        self.reports.iter().map(GenerationReport::elapsed_ms).collect()
    }

    pub fn reset(&mut self) {
        self.reports.clear();
    }
}

impl Default for GenerationMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn report(ms: u64) -> GenerationReport {
        GenerationReport {
            kind: "test".to_string(),
            elapsed: Duration::from_millis(ms),
            budget: Duration::from_millis(16),
            vertex_count: 10,
            index_count: 30,
            sub_meshes: 1,
            degenerate_samples: 0,
        }
    }

    #[test]
    fn test_over_budget() {
        assert!(!report(10).over_budget());
        assert!(report(20).over_budget());
        assert!(report(20).to_string().ends_with("(over budget)"));
    }

    #[test]
    fn test_monitor_window() {
        let mut monitor = GenerationMonitor::with_capacity(3);
        assert!(monitor.is_empty());
        assert_eq!(monitor.metrics(), GenerationMetrics::default());

        for ms in [4, 8, 30, 12] {
            monitor.record(report(ms));
        }
        assert_eq!(monitor.len(), 3);
        assert_eq!(monitor.latest().map(|r| r.elapsed), Some(Duration::from_millis(12)));

        let metrics = monitor.metrics();
        assert_eq!(metrics.samples, 3);
        assert_relative_eq!(metrics.average_ms, 50.0 / 3.0, epsilon = 1e-3);
        assert_relative_eq!(metrics.min_ms, 8.0, epsilon = 1e-3);
        assert_relative_eq!(metrics.max_ms, 30.0, epsilon = 1e-3);
        assert_eq!(metrics.over_budget, 1);
        assert_eq!(monitor.history_ms().len(), 3);

        monitor.reset();
        assert!(monitor.is_empty());
    }
}
