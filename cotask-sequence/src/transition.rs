use cotask_core::{Task, Transition};

/// Labels each trial relative to the one before it. Index 0 is always `First`.
pub fn classify_transitions(sequence: &[Task]) -> Vec<Transition> {
    sequence
        .iter()
        .enumerate()
        .map(|(i, task)| match i {
            0 => Transition::First,
            _ if sequence[i - 1] == *task => Transition::Repeat,
            _ => Transition::Switch,
        })
        .collect()
}
