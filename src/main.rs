use anyhow::{bail, Context};
use ndarray::array;
use tracing::info;
use tracing_subscriber::EnvFilter;

use spmv_bench::{evaluate_all, run_benchmark, BenchConfig, Method, SparseMatrixCSR};

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mode = std::env::args().nth(1).unwrap_or_else(|| "toy".to_string());
    match mode.as_str() {
        "toy" => run_toy(),
        "quick" => run_sweep(BenchConfig::quick()),
        "sweep" => run_sweep(BenchConfig::from_env().context("reading SPMV_* configuration")?),
        other => bail!("unknown mode {other:?}, expected toy, quick or sweep"),
    }
}

/// Runs the 5×5 worked example through every method
fn run_toy() -> anyhow::Result<()> {
    let matrix = SparseMatrixCSR::new(
        5,
        5,
        vec![0, 0, 2, 3, 5, 5],
        vec![3, 4, 2, 0, 2],
        vec![1.0; 5],
    )?;
    let vector = array![0.5, 1.0, 0.5, 2.0, 1.0];

    println!("Matrix:");
    println!("{:?}", matrix);
    println!("Vector: {}", vector);

    let outputs = evaluate_all(&matrix, &vector)?;
    for method in Method::ALL {
        let output = &outputs[&method];
        let mut rows: Vec<_> = (0..matrix.n_rows)
            .filter_map(|row| output.get(row).map(|val| format!("{row}: {val}")))
            .collect();
        rows.sort();
        println!("  {:<22} {{{}}}", method, rows.join(", "));
    }

    Ok(())
}

fn run_sweep(config: BenchConfig) -> anyhow::Result<()> {
    info!(trials = config.trial_count(), "starting sweep");
    let results = run_benchmark(&config).context("benchmark sweep failed")?;

    println!(
        "{:<22} {:>8} {:>10} {:>14} {:>14}",
        "method", "size", "density", "mean (s)", "std dev (s)"
    );
    for cell in results.summaries() {
        println!(
            "{:<22} {:>8} {:>10.0e} {:>14.3e} {:>14.3e}",
            cell.method,
            cell.size,
            cell.density,
            cell.stats.mean.as_secs_f64(),
            cell.stats.std_dev.as_secs_f64(),
        );
    }

    Ok(())
}
