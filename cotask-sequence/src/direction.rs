use cotask_core::{Congruency, Directions, Paradigm, Rso, Task};
use rand::Rng;

fn horizontal<R: Rng + ?Sized>(rng: &mut R) -> u16 {
    if rng.random_bool(0.5) { 0 } else { 180 }
}

fn opposite(dir: u16) -> u16 {
    (dir + 180) % 360
}

/// Picks stimulus directions for one trial.
///
/// Dual-task trials draw each channel's task direction independently and have
/// no distractor. Single-task trials derive the distractor from `congruency`.
/// `rso` only changes the key map, never the geometry.
pub fn assign_directions<R: Rng + ?Sized>(
    task: Task,
    congruency: Congruency,
    paradigm: Paradigm,
    rso: Rso,
    rng: &mut R,
) -> Directions {
    let directions = match paradigm {
        Paradigm::DualTask => Directions {
            ch1_task: horizontal(rng),
            ch1_distractor: 0,
            ch2_task: horizontal(rng),
            ch2_distractor: 0,
        },
        Paradigm::SingleTask => {
            let primary = horizontal(rng);
            let distractor = match congruency {
                Congruency::Congruent => primary,
                Congruency::Incongruent => opposite(primary),
                Congruency::Neutral => {
                    if rng.random_bool(0.5) {
                        90
                    } else {
                        270
                    }
                }
                // distractor coherence is 0, so its direction is never shown
                Congruency::Univalent => 0,
            };
            Directions {
                ch1_task: primary,
                ch1_distractor: distractor,
                ch2_task: 0,
                ch2_distractor: 0,
            }
        }
    };
    tracing::trace!(%task, ?congruency, ?rso, ?directions, "assigned directions");
    directions
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn draw(congruency: Congruency, paradigm: Paradigm, seed: u64) -> Vec<Directions> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..200)
            .map(|_| assign_directions(Task::Movement, congruency, paradigm, Rso::Identical, &mut rng))
            .collect()
    }

    #[test]
    fn test_congruent_matches_primary() {
        for d in draw(Congruency::Congruent, Paradigm::SingleTask, 21) {
            assert_eq!(d.ch1_task, d.ch1_distractor);
            assert!(d.ch1_task == 0 || d.ch1_task == 180);
        }
    }

    #[test]
    fn test_incongruent_is_opposite() {
        for d in draw(Congruency::Incongruent, Paradigm::SingleTask, 22) {
            assert_eq!(d.ch1_task.abs_diff(d.ch1_distractor), 180);
        }
    }

    #[test]
    fn test_neutral_uses_orthogonal_axis() {
        let draws = draw(Congruency::Neutral, Paradigm::SingleTask, 23);
        for d in &draws {
            assert!(d.ch1_distractor == 90 || d.ch1_distractor == 270);
        }
        assert!(draws.iter().any(|d| d.ch1_distractor == 90));
        assert!(draws.iter().any(|d| d.ch1_distractor == 270));
    }

    #[test]
    fn test_univalent_distractor_fixed() {
        for d in draw(Congruency::Univalent, Paradigm::SingleTask, 24) {
            assert_eq!(d.ch1_distractor, 0);
            assert_eq!(d.ch2_task, 0);
        }
    }

    #[test]
    fn test_dual_task_channels_independent() {
        let draws = draw(Congruency::Congruent, Paradigm::DualTask, 25);
        for d in &draws {
            assert!(d.ch1_task == 0 || d.ch1_task == 180);
            assert!(d.ch2_task == 0 || d.ch2_task == 180);
            assert_eq!(d.ch1_distractor, 0);
            assert_eq!(d.ch2_distractor, 0);
        }
        assert!(draws.iter().any(|d| d.ch1_task != d.ch2_task));
        assert!(draws.iter().any(|d| d.ch1_task == d.ch2_task));
    }

    #[test]
    fn test_rso_does_not_change_geometry() {
        let a = assign_directions(
            Task::Orientation,
            Congruency::Incongruent,
            Paradigm::DualTask,
            Rso::Identical,
            &mut StdRng::seed_from_u64(26),
        );
        let b = assign_directions(
            Task::Orientation,
            Congruency::Incongruent,
            Paradigm::DualTask,
            Rso::Disjoint,
            &mut StdRng::seed_from_u64(26),
        );
        assert_eq!(a, b);
    }
}
