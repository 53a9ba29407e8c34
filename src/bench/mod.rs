//! Benchmark harness: method tags, product kernels, timing and the sweep

pub mod config;
pub mod driver;
pub mod kernel;
pub mod method;
pub mod stats;
pub mod timer;

pub use config::BenchConfig;
pub use driver::{
    run_benchmark, run_method, run_sweep, BenchmarkResults, CellSummary, Density, MethodHistory,
    RandomWorkload, Workload,
};
pub use kernel::{evaluate_all, kernel_for, PreparedProduct, ProductOutput, SpmvKernel};
pub use method::Method;
pub use stats::SampleStats;
pub use timer::{measure, ScopedTimer, Timed};
