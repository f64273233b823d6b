use cotask_core::{Congruency, Error, Result};
use rand::Rng;
use rand::seq::SliceRandom;

/// Builds an exact-count congruency sequence of length `n` in random order.
///
/// Every condition but the last receives `round(n * proportion)` trials; the
/// last absorbs the remainder so the total is always `n`.
pub fn generate_congruency_sequence<R: Rng + ?Sized>(
    n: usize,
    conditions: &[Congruency],
    proportions: &[f64],
    rng: &mut R,
) -> Result<Vec<Congruency>> {
    let Some((last, rest)) = conditions.split_last() else {
        return Err(Error::InvalidConfig {
            field: "congruency.conditions",
            reason: "at least one condition required".into(),
        });
    };
    if conditions.len() != proportions.len() {
        return Err(Error::InvalidConfig {
            field: "congruency.proportions",
            reason: format!(
                "{} proportions for {} conditions",
                proportions.len(),
                conditions.len()
            ),
        });
    }

    let mut labels = Vec::with_capacity(n);
    for (condition, proportion) in rest.iter().zip(proportions) {
        let remaining = n - labels.len();
        // rounding up on several conditions could otherwise overshoot n
        let count = ((n as f64 * proportion).round().max(0.0) as usize).min(remaining);
        labels.extend(std::iter::repeat_n(*condition, count));
    }
    let remaining = n - labels.len();
    labels.extend(std::iter::repeat_n(*last, remaining));

    labels.shuffle(rng);
    Ok(labels)
}
