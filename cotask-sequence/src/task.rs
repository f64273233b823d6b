use cotask_core::{SequenceType, Task};
use rand::Rng;

/// Fair draw between the two tasks.
pub fn coin_flip_task<R: Rng + ?Sized>(rng: &mut R) -> Task {
    if rng.random_bool(0.5) {
        Task::Movement
    } else {
        Task::Orientation
    }
}

/// Generates the block's primary-task sequence.
///
/// The first element is `start` or a coin flip. `Random` then switches with
/// probability `switch_rate / 100` at each step; `AABB` alternates in runs of
/// two with no further randomness.
pub fn generate_task_sequence<R: Rng + ?Sized>(
    n: usize,
    sequence_type: SequenceType,
    switch_rate: f64,
    start: Option<Task>,
    rng: &mut R,
) -> Vec<Task> {
    if n == 0 {
        return Vec::new();
    }
    let first = start.unwrap_or_else(|| coin_flip_task(rng));

    match sequence_type {
        SequenceType::Random => {
            let p_switch = (switch_rate / 100.0).clamp(0.0, 1.0);
            let mut seq = Vec::with_capacity(n);
            let mut current = first;
            seq.push(current);
            for _ in 1..n {
                if rng.random_bool(p_switch) {
                    current = current.complement();
                }
                seq.push(current);
            }
            seq
        }
        SequenceType::Aabb => (0..n)
            .map(|i| {
                if (i / 2) % 2 == 0 {
                    first
                } else {
                    first.complement()
                }
            })
            .collect(),
    }
}
