use rand::{rngs::SmallRng, SeedableRng};
use rayon::prelude::*;

use crate::{error::TableauError, tableau::Tableau};

/// How many shots to take and where their randomness comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingConfig {
    pub shots: usize,
    /// Shot `k` is seeded with `seed + k`; `None` draws every shot's seed from the OS.
    pub seed: Option<u64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            shots: 1,
            seed: None,
        }
    }
}

impl SamplingConfig {
    pub fn new(shots: usize) -> Self {
        Self { shots, seed: None }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// A fast RNG, either reproducible from `seed` or seeded from OS entropy.
pub fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    }
}

pub trait ParallelSampling {
    /// Measures `qubits` on `config.shots` independent copies, in parallel.
    fn par_sample(
        &self,
        qubits: &[usize],
        config: &SamplingConfig,
    ) -> Result<Vec<Vec<bool>>, TableauError>;
}

impl ParallelSampling for Tableau {
    fn par_sample(
        &self,
        qubits: &[usize],
        config: &SamplingConfig,
    ) -> Result<Vec<Vec<bool>>, TableauError> {
        for &q in qubits {
            self.check_qubit(q)?;
        }
        (0..config.shots)
            .into_par_iter()
            .map(|shot| {
                let mut rng = seeded_rng(config.seed.map(|s| s.wrapping_add(shot as u64)));
                self.sample(qubits, &mut rng)
            })
            .collect()
    }
}
