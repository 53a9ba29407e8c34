//! The benchmark sweep: sizes × densities × repetitions for each method
//!
//! Each trial generates a fresh matrix and vector, lets the method's kernel
//! prepare its representation, and times exactly one product call. Samples
//! accumulate in a [`BenchmarkResults`] value threaded through the loops.
//!
//! A failing trial aborts the whole sweep with [`SparseError::Trial`]; no
//! placeholder sample is ever recorded.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::hint::black_box;
use std::time::Duration;

use ndarray::Array1;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::bench::config::BenchConfig;
use crate::bench::kernel::{kernel_for, SpmvKernel};
use crate::bench::method::Method;
use crate::bench::stats::SampleStats;
use crate::bench::timer::measure;
use crate::error::{Result, SparseError};
use crate::matrix::{
    check_entry_value, generate_dense_vector, generate_sparse_matrix, SparseMatrixCSR,
};

/// Source of trial inputs
///
/// Called once per trial for the matrix and once for the vector.
pub trait Workload {
    fn matrix(&mut self, n: usize, density: f64) -> Result<SparseMatrixCSR<f64>>;
    fn vector(&mut self, n: usize) -> Array1<f64>;
}

/// Uniform random matrices and vectors
pub struct RandomWorkload<R> {
    rng: R,
    value: f64,
}

impl<R: Rng> RandomWorkload<R> {
    /// Fails if `value` is zero or not finite
    pub fn new(rng: R, value: f64) -> Result<Self> {
        check_entry_value(value)?;
        Ok(Self { rng, value })
    }
}

impl RandomWorkload<ChaCha8Rng> {
    /// Seeded workload, or entropy-seeded when `seed` is None
    pub fn from_config(config: &BenchConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::new(rng, config.value)
    }
}

impl<R: Rng> Workload for RandomWorkload<R> {
    fn matrix(&mut self, n: usize, density: f64) -> Result<SparseMatrixCSR<f64>> {
        generate_sparse_matrix(n, density, self.value, &mut self.rng)
    }

    fn vector(&mut self, n: usize) -> Array1<f64> {
        generate_dense_vector(n, &mut self.rng)
    }
}

/// Density used as a map key, ordered by `f64::total_cmp`
#[derive(Debug, Clone, Copy)]
pub struct Density(pub f64);

impl PartialEq for Density {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Density {}

impl PartialOrd for Density {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Density {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Samples for one method: size → density → elapsed times in repetition order
pub type MethodHistory = BTreeMap<usize, BTreeMap<Density, Vec<Duration>>>;

/// One summarized (method, size, density) cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellSummary {
    pub method: Method,
    pub size: usize,
    pub density: f64,
    pub stats: SampleStats,
}

/// Accumulated timing samples of a sweep
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchmarkResults {
    methods: BTreeMap<Method, MethodHistory>,
}

impl BenchmarkResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one sample to its (method, size, density) list
    pub fn record(&mut self, method: Method, size: usize, density: f64, elapsed: Duration) {
        self.methods
            .entry(method)
            .or_default()
            .entry(size)
            .or_default()
            .entry(Density(density))
            .or_default()
            .push(elapsed);
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// History for one method, if it recorded anything
    pub fn method(&self, method: Method) -> Option<&MethodHistory> {
        self.methods.get(&method)
    }

    /// Methods with at least one sample
    pub fn methods(&self) -> impl Iterator<Item = Method> + '_ {
        self.methods.keys().copied()
    }

    /// Samples for one cell
    pub fn samples(&self, method: Method, size: usize, density: f64) -> Option<&[Duration]> {
        self.methods
            .get(&method)?
            .get(&size)?
            .get(&Density(density))
            .map(Vec::as_slice)
    }

    /// Total number of recorded samples
    pub fn sample_count(&self) -> usize {
        self.methods
            .values()
            .flat_map(BTreeMap::values)
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum()
    }

    /// Per-cell statistics, ordered by method, size, density
    pub fn summaries(&self) -> Vec<CellSummary> {
        let mut out = Vec::new();
        for (&method, history) in &self.methods {
            for (&size, by_density) in history {
                for (density, samples) in by_density {
                    if let Some(stats) = SampleStats::from_samples(samples) {
                        out.push(CellSummary {
                            method,
                            size,
                            density: density.0,
                            stats,
                        });
                    }
                }
            }
        }
        out
    }

    pub fn into_inner(self) -> BTreeMap<Method, MethodHistory> {
        self.methods
    }
}

/// Runs the configured sweep with random inputs
pub fn run_benchmark(config: &BenchConfig) -> Result<BenchmarkResults> {
    config.validate()?;
    let kernels: Vec<Box<dyn SpmvKernel>> =
        config.methods.iter().copied().map(kernel_for).collect();
    let mut workload = RandomWorkload::from_config(config)?;
    run_sweep(config, &kernels, &mut workload)
}

/// Runs every kernel over the sweep described by `config`
///
/// Kernels run one after another, each over the full size × density ×
/// repetition grid. The first failing trial ends the sweep.
pub fn run_sweep<W>(
    config: &BenchConfig,
    kernels: &[Box<dyn SpmvKernel>],
    workload: &mut W,
) -> Result<BenchmarkResults>
where
    W: Workload + ?Sized,
{
    let mut results = BenchmarkResults::new();

    if config.is_empty() {
        info!("empty sweep, nothing to measure");
        return Ok(results);
    }

    for kernel in kernels {
        run_method(&**kernel, config, workload, &mut results)?;
    }

    Ok(results)
}

/// Runs one kernel over the whole grid, appending to `results`
pub fn run_method<W>(
    kernel: &dyn SpmvKernel,
    config: &BenchConfig,
    workload: &mut W,
    results: &mut BenchmarkResults,
) -> Result<()>
where
    W: Workload + ?Sized,
{
    let method = kernel.method();
    info!(%method, "benchmarking");

    for &size in &config.sizes {
        info!(%method, size, "size");
        for &density in &config.densities {
            for repetition in 0..config.repetitions {
                let elapsed = run_trial(kernel, size, density, repetition, workload)?;
                results.record(method, size, density, elapsed);
            }
        }
    }

    Ok(())
}

/// One generate / prepare / time cycle
///
/// Failures come back as [`SparseError::Trial`]. When the timed product is
/// the part that failed, the timer reading travels with the error.
fn run_trial<W>(
    kernel: &dyn SpmvKernel,
    size: usize,
    density: f64,
    repetition: usize,
    workload: &mut W,
) -> Result<Duration>
where
    W: Workload + ?Sized,
{
    let method = kernel.method();
    let trial_error = |source: SparseError, elapsed: Option<Duration>| SparseError::Trial {
        method: method.to_string(),
        size,
        density,
        repetition,
        elapsed,
        source: Box::new(source),
    };

    let matrix = workload
        .matrix(size, density)
        .map_err(|source| trial_error(source, None))?;
    let vector = workload.vector(size);
    let prepared = kernel
        .prepare(&matrix, &vector)
        .map_err(|source| trial_error(source, None))?;

    let timed = measure(|| prepared.execute());
    let elapsed_us = timed.elapsed.as_micros() as u64;

    match timed.output {
        Ok(output) => {
            black_box(&output);
            debug!(%method, size, density, nnz = prepared.nnz(), elapsed_us, "trial");
            Ok(timed.elapsed)
        }
        Err(source) => {
            debug!(%method, size, density, repetition, elapsed_us, error = %source, "trial failed");
            Err(trial_error(source, Some(timed.elapsed)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_key_ordering() {
        let mut map = BTreeMap::new();
        map.insert(Density(1e-3), 'a');
        map.insert(Density(1e-6), 'b');
        map.insert(Density(1e-3), 'c');

        assert_eq!(map.len(), 2);
        assert_eq!(map.keys().next(), Some(&Density(1e-6)));
    }

    #[test]
    fn test_results_record_and_lookup() {
        let mut results = BenchmarkResults::new();
        results.record(Method::Coordinate, 10, 0.1, Duration::from_micros(3));
        results.record(Method::Coordinate, 10, 0.1, Duration::from_micros(5));
        results.record(Method::Coordinate, 10, 0.2, Duration::from_micros(7));

        assert_eq!(
            results.samples(Method::Coordinate, 10, 0.1),
            Some(&[Duration::from_micros(3), Duration::from_micros(5)][..])
        );
        assert_eq!(results.samples(Method::CompressedRow, 10, 0.1), None);
        assert_eq!(results.sample_count(), 3);

        let summaries = results.summaries();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].density, 0.1);
        assert!((summaries[0].stats.mean.as_secs_f64() - 4e-6).abs() < 1e-9);

        let inner = results.into_inner();
        assert_eq!(inner[&Method::Coordinate][&10].len(), 2);
    }

    #[test]
    fn test_invalid_entry_value_rejected_up_front() {
        let rng = ChaCha8Rng::seed_from_u64(1);
        assert!(matches!(
            RandomWorkload::new(rng, 0.0),
            Err(SparseError::InvalidEntryValue(_))
        ));

        let config = BenchConfig::quick().with_value(f64::NAN).with_seed(1);
        assert!(RandomWorkload::from_config(&config).is_err());
        assert!(matches!(
            run_benchmark(&config),
            Err(SparseError::InvalidEntryValue(_))
        ));
    }

    #[test]
    fn test_seeded_sweep_is_small_and_complete() {
        let config = BenchConfig::default()
            .with_sizes(vec![20, 40])
            .with_densities(vec![0.05, 0.1])
            .with_repetitions(2)
            .with_seed(5);

        let results = run_benchmark(&config).unwrap();

        assert_eq!(results.methods().count(), 6);
        assert_eq!(results.sample_count(), config.trial_count());
        for method in Method::ALL {
            let history = results.method(method).unwrap();
            assert_eq!(history.keys().copied().collect::<Vec<_>>(), vec![20, 40]);
            assert_eq!(results.samples(method, 40, 0.05).unwrap().len(), 2);
        }
    }
}
