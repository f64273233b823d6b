use std::fmt;

use serde::{Deserialize, Serialize};

/// Abstract task identity, also naming the perceptual pathway it reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Task {
    /// Motion direction judgement
    #[serde(rename = "mov")]
    Movement,
    /// Orientation judgement
    #[serde(rename = "or")]
    Orientation,
}

impl Task {
    /// The other task of the pair.
    pub fn complement(self) -> Self {
        match self {
            Task::Movement => Task::Orientation,
            Task::Orientation => Task::Movement,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Task::Movement => "mov",
            Task::Orientation => "or",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relation between the task pathway and the distractor pathway on channel 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Congruency {
    Congruent,
    Incongruent,
    /// Distractor moves on the orthogonal axis
    Neutral,
    /// Distractor pathway carries no signal
    Univalent,
}

/// Signal strength per channel for the task and distractor pathways, in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coherence {
    pub ch1_task: f64,
    pub ch1_distractor: f64,
    pub ch2_task: f64,
    pub ch2_distractor: f64,
}

impl Coherence {
    pub(crate) fn fields(&self) -> [(&'static str, f64); 4] {
        [
            ("coherence.ch1_task", self.ch1_task),
            ("coherence.ch1_distractor", self.ch1_distractor),
            ("coherence.ch2_task", self.ch2_task),
            ("coherence.ch2_distractor", self.ch2_distractor),
        ]
    }
}

/// Resolved stimulus directions in degrees.
///
/// Primary-axis values are 0 or 180; neutral distractors use 90 or 270.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Directions {
    pub ch1_task: u16,
    pub ch1_distractor: u16,
    pub ch2_task: u16,
    pub ch2_distractor: u16,
}

/// Directions as handed to the parameter builder, any of which may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DirectionSpec {
    pub ch1_task: Option<u16>,
    pub ch1_distractor: Option<u16>,
    pub ch2_task: Option<u16>,
    pub ch2_distractor: Option<u16>,
}

impl From<Directions> for DirectionSpec {
    fn from(d: Directions) -> Self {
        Self {
            ch1_task: Some(d.ch1_task),
            ch1_distractor: Some(d.ch1_distractor),
            ch2_task: Some(d.ch2_task),
            ch2_distractor: Some(d.ch2_distractor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complement_is_involution() {
        assert_eq!(Task::Movement.complement(), Task::Orientation);
        assert_eq!(Task::Movement.complement().complement(), Task::Movement);
    }

    #[test]
    fn test_task_wire_names() {
        assert_eq!(serde_json::to_string(&Task::Orientation).unwrap(), "\"or\"");
        let t: Task = serde_json::from_str("\"mov\"").unwrap();
        assert_eq!(t, Task::Movement);
    }

    #[test]
    fn test_direction_spec_from_resolved() {
        let d = Directions {
            ch1_task: 180,
            ch1_distractor: 90,
            ch2_task: 0,
            ch2_distractor: 0,
        };
        let spec = DirectionSpec::from(d);
        assert_eq!(spec.ch1_distractor, Some(90));
        assert_eq!(spec.ch2_task, Some(0));
    }
}
