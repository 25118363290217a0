//! Generates one mesh of every family and prints a statistics table.
//!
//! ```text
//! mesh_report [complexity] [symmetry] [seed]
//! RUST_LOG=debug mesh_report 3
//! ```

use anyhow::{Context, Result};
use hyperform::generator::{GeometryKind, GeometryRequest, Generator};
use hyperform::performance::GenerationMonitor;

fn parse_arg<T: std::str::FromStr>(args: &[String], index: usize, name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match args.get(index) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("invalid {name} `{raw}`")),
        None => Ok(default),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let complexity: u32 = parse_arg(&args, 0, "complexity", 3)?;
    let symmetry: u32 = parse_arg(&args, 1, "symmetry", 6)?;
    let seed: u64 = parse_arg(&args, 2, "seed", 0)?;

    let generator = Generator::new();
    let mut monitor = GenerationMonitor::with_capacity(64);

    for kind in GeometryKind::catalog() {
        let request = GeometryRequest::builder(kind)
            .with_complexity(complexity)
            .with_symmetry(symmetry)
            .with_seed(seed)
            .build()
            .with_context(|| format!("building request for {kind}"))?;
        let generated = generator
            .generate(&request)
            .with_context(|| format!("generating {kind}"))?;

        println!("{}", generated.report);
        monitor.record(generated.report);
    }

    let metrics = monitor.metrics();
    println!(
        "\n{} kinds, avg {:.2}ms, min {:.2}ms, max {:.2}ms, {} over budget",
        metrics.samples, metrics.average_ms, metrics.min_ms, metrics.max_ms, metrics.over_budget
    );
    Ok(())
}
