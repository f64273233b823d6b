use cotask_core::{DistributionKind, DistributionSpec};
use rand::Rng;
use rand::distr::Uniform;
use rand::seq::IndexedRandom;

/// Draws scalar timing values (ms) from a declarative distribution.
pub trait Sample {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64;
}

impl Sample for DistributionSpec {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self.kind {
            DistributionKind::Fixed => self.value,
            DistributionKind::Uniform => match self.params.as_slice() {
                [a, b, ..] => {
                    let (lo, hi) = if a <= b { (*a, *b) } else { (*b, *a) };
                    match Uniform::new_inclusive(lo, hi) {
                        Ok(range) => rng.sample(range),
                        Err(e) => {
                            tracing::warn!(
                                lo,
                                hi,
                                error = %e,
                                fallback = self.value,
                                "uniform bounds unusable, using value"
                            );
                            self.value
                        }
                    }
                }
                short => {
                    tracing::warn!(
                        params = short.len(),
                        fallback = self.value,
                        "uniform distribution needs two params, using value"
                    );
                    self.value
                }
            },
            DistributionKind::Choice => match self.params.choose(rng) {
                Some(v) => *v,
                None => {
                    tracing::warn!(
                        fallback = self.value,
                        "choice distribution has no params, using value"
                    );
                    self.value
                }
            },
        }
    }
}

/// Samples `spec` once.
pub fn sample<R: Rng + ?Sized>(spec: &DistributionSpec, rng: &mut R) -> f64 {
    spec.sample(rng)
}
