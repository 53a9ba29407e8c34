//! Configuration for the benchmark sweep

use std::str::FromStr;

use crate::bench::method::Method;
use crate::constants::*;
use crate::error::{Result, SparseError};
use crate::matrix::check_entry_value;

/// What to sweep and how often
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    /// Matrix sizes n (n × n), visited in order
    pub sizes: Vec<usize>,

    /// Target densities, visited in order for each size
    pub densities: Vec<f64>,

    /// Trials per (size, density, method) cell
    pub repetitions: usize,

    /// Methods to benchmark, each run as its own sweep
    pub methods: Vec<Method>,

    /// Seed for matrix and vector generation
    /// If None, the generator is seeded from OS entropy
    pub seed: Option<u64>,

    /// Value carried by every generated entry
    pub value: f64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            densities: DEFAULT_DENSITIES.to_vec(),
            repetitions: DEFAULT_REPETITIONS,
            methods: Method::ALL.to_vec(),
            seed: None,
            value: DEFAULT_ENTRY_VALUE,
        }
    }
}

impl BenchConfig {
    /// Small sweep for smoke runs
    pub fn quick() -> Self {
        Self {
            sizes: QUICK_SIZES.to_vec(),
            densities: QUICK_DENSITIES.to_vec(),
            ..Self::default()
        }
    }

    pub fn with_sizes(mut self, sizes: impl Into<Vec<usize>>) -> Self {
        self.sizes = sizes.into();
        self
    }

    pub fn with_densities(mut self, densities: impl Into<Vec<f64>>) -> Self {
        self.densities = densities.into();
        self
    }

    pub fn with_repetitions(mut self, repetitions: usize) -> Self {
        self.repetitions = repetitions;
        self
    }

    pub fn with_methods(mut self, methods: impl Into<Vec<Method>>) -> Self {
        self.methods = methods.into();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Checks settings that would make every trial meaningless
    pub fn validate(&self) -> Result<()> {
        check_entry_value(self.value)
    }

    /// Number of trials the sweep will run
    pub fn trial_count(&self) -> usize {
        self.sizes.len() * self.densities.len() * self.repetitions * self.methods.len()
    }

    /// True when the sweep measures nothing
    pub fn is_empty(&self) -> bool {
        self.trial_count() == 0
    }

    /// Defaults overridden by `SPMV_*` environment variables
    ///
    /// Lists are comma separated, e.g. `SPMV_METHODS=coordinate,dictionary-direct`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`BenchConfig::from_env`] with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_SIZES) {
            config.sizes = parse_list(ENV_SIZES, &value)?;
        }
        if let Some(value) = lookup(ENV_DENSITIES) {
            config.densities = parse_list(ENV_DENSITIES, &value)?;
        }
        if let Some(value) = lookup(ENV_REPETITIONS) {
            config.repetitions = parse_value(ENV_REPETITIONS, &value)?;
        }
        if let Some(value) = lookup(ENV_METHODS) {
            config.methods = value
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(str::parse::<Method>)
                .collect::<Result<_>>()?;
        }
        if let Some(value) = lookup(ENV_SEED) {
            config.seed = Some(parse_value(ENV_SEED, &value)?);
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_value<T: FromStr>(key: &'static str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| SparseError::InvalidConfig {
        key,
        value: value.to_string(),
    })
}

/// Parses a comma-separated list; an empty string is an empty list
fn parse_list<T: FromStr>(key: &'static str, value: &str) -> Result<Vec<T>> {
    value
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| parse_value(key, s))
        .collect()
}
