use std::ops::Range;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::PaymentOutcome;

pub const SUCCESS_PROBABILITY: f64 = 0.92;
pub const PROCESSING_DELAY_MS: Range<u64> = 900..1700;
pub const TRANSACTION_PREFIX: &str = "DEMO-";

const BASE36: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const TRANSACTION_SUFFIX_LEN: usize = 8;

/// Random source for the demo processor. Seedable so outcomes can be replayed.
pub struct PaymentSimulator {
    rng: StdRng,
    success_probability: f64,
}

impl PaymentSimulator {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            success_probability: SUCCESS_PROBABILITY,
        }
    }

    /// Overrides the success rate, clamped to [0, 1].
    pub fn with_success_probability(mut self, probability: f64) -> Self {
        self.success_probability = probability.clamp(0.0, 1.0);
        self
    }

    pub fn processing_delay_ms(&mut self) -> u64 {
        self.rng.gen_range(PROCESSING_DELAY_MS)
    }

    pub fn decide_outcome(&mut self) -> PaymentOutcome {
        if self.rng.gen_bool(self.success_probability) {
            PaymentOutcome::Success
        } else {
            PaymentOutcome::Failure
        }
    }

    pub fn transaction_id(&mut self) -> String {
        let suffix: String = (0..TRANSACTION_SUFFIX_LEN)
            .map(|_| BASE36[self.rng.gen_range(0..BASE36.len())] as char)
            .collect();
        format!("{}{}", TRANSACTION_PREFIX, suffix)
    }
}

impl Default for PaymentSimulator {
    fn default() -> Self {
        Self::new()
    }
}
