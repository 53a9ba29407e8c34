//! Reference values for the benchmark sweep

// ============================================================================
// SWEEP DEFAULTS
// ============================================================================

/// Matrix sizes (n for an n × n matrix) in the reference sweep
pub const DEFAULT_SIZES: [usize; 3] = [1_000, 10_000, 100_000];

/// Target densities in the reference sweep
pub const DEFAULT_DENSITIES: [f64; 4] = [1e-3, 1e-4, 1e-5, 1e-6];

/// Trials per (size, density, method) cell
pub const DEFAULT_REPETITIONS: usize = 3;

/// Value carried by every generated entry before collisions are summed
pub const DEFAULT_ENTRY_VALUE: f64 = 1.0;

// ============================================================================
// QUICK PRESET
// ============================================================================

/// Sizes for smoke runs
pub const QUICK_SIZES: [usize; 2] = [100, 1_000];

/// Densities for smoke runs
pub const QUICK_DENSITIES: [f64; 2] = [1e-2, 1e-3];

// ============================================================================
// ENVIRONMENT OVERRIDES
// ============================================================================

pub const ENV_SIZES: &str = "SPMV_SIZES";
pub const ENV_DENSITIES: &str = "SPMV_DENSITIES";
pub const ENV_REPETITIONS: &str = "SPMV_REPETITIONS";
pub const ENV_METHODS: &str = "SPMV_METHODS";
pub const ENV_SEED: &str = "SPMV_SEED";
