use std::{env, num::NonZeroUsize, str::FromStr};

use crate::{Result, SumErr};

/// The vector order used when `VECTOR_ORDER` is not set.
pub const DEFAULT_ORDER: usize = 100_000;

/// The worker set size used when `WORKERS` is not set.
pub const DEFAULT_WORKERS: NonZeroUsize = NonZeroUsize::new(4).unwrap();

/// Immutable settings of a vector sum run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SumConfig {
    order: usize,
    workers: NonZeroUsize,
    seed: Option<u64>,
}

impl Default for SumConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ORDER, DEFAULT_WORKERS, None)
    }
}

impl SumConfig {
    /// Creates a new sum configuration.
    ///
    /// # Args
    /// * `order` - The length of the vectors.
    /// * `workers` - The size of the worker set.
    /// * `seed` - The input generator's seed, `None` seeds from the clock.
    ///
    /// # Returns
    /// A `SumConfig` instance.
    pub fn new(order: usize, workers: NonZeroUsize, seed: Option<u64>) -> Self {
        Self {
            order,
            workers,
            seed,
        }
    }

    /// Reads the configuration from the `VECTOR_ORDER`, `WORKERS` and `SEED` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Reads the configuration through `lookup`, unset variables keep their defaults.
    ///
    /// # Args
    /// * `lookup` - Returns the value of a variable, if set.
    ///
    /// # Returns
    /// The configuration, or `SumErr::InvalidConfig` naming the first malformed variable.
    pub fn from_lookup<L>(lookup: L) -> Result<Self>
    where
        L: Fn(&'static str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            order: parse(&lookup, "VECTOR_ORDER")?.unwrap_or(defaults.order),
            workers: parse(&lookup, "WORKERS")?.unwrap_or(defaults.workers),
            seed: parse(&lookup, "SEED")?,
        })
    }

    /// Returns the length of the vectors.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Returns the size of the worker set.
    pub fn workers(&self) -> NonZeroUsize {
        self.workers
    }

    /// Returns the input generator's seed.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

fn parse<T, L>(lookup: &L, var: &'static str) -> Result<Option<T>>
where
    T: FromStr,
    L: Fn(&'static str) -> Option<String>,
{
    let Some(value) = lookup(var) else {
        return Ok(None);
    };

    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|_| SumErr::InvalidConfig { var, value })
}
