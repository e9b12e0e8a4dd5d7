//! CLI command implementations

pub mod anomalies;
pub mod energy;
pub mod failures;
pub mod health;
pub mod insights;
pub mod report;

use analytics_lib::BoilerAnalyzer;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::output::OutputFormat;

/// Shared state for a single command invocation
pub struct Context {
    pub analyzer: BoilerAnalyzer,
    pub format: OutputFormat,
}

/// Seeded generator when `seed` is set, otherwise one from OS entropy
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
