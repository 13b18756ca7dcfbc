use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the randomized outcomes the simulator draws.
///
/// Kept behind a trait so tests can script exact pass/fail sequences and
/// metric values instead of asserting over statistical samples.
pub trait Sampler: Send {
    /// Draws the pass/fail filter outcome for one trajectory.
    fn draw_pass(&mut self, acceptance_rate: f64) -> bool;

    /// Uniform draw from `[low, high]`.
    fn uniform(&mut self, low: f64, high: f64) -> f64;

    /// Uniform integer draw from `[min, max]`, used for binder lengths.
    fn length(&mut self, min: u32, max: u32) -> u32;
}

/// Production sampler backed by a seedable PRNG.
pub struct StdSampler {
    rng: StdRng,
}

impl StdSampler {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Fixed-seed sampler for reproducible demo runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Sampler for StdSampler {
    fn draw_pass(&mut self, acceptance_rate: f64) -> bool {
        self.rng.gen_bool(acceptance_rate.clamp(0.0, 1.0))
    }

    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.rng.gen_range(low..=high)
    }

    fn length(&mut self, min: u32, max: u32) -> u32 {
        self.rng.gen_range(min..=max)
    }
}
