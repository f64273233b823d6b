use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Whether a block presents one task per trial or two overlapping ones (PRP).
#[derive(Copy, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Paradigm {
    #[serde(rename = "single-task")]
    SingleTask,
    #[serde(rename = "dual-task")]
    DualTask,
}

impl Default for Paradigm {
    fn default() -> Self {
        Paradigm::SingleTask
    }
}

impl Paradigm {
    pub fn is_dual(&self) -> bool {
        matches!(self, Paradigm::DualTask)
    }
}

impl fmt::Display for Paradigm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Paradigm::SingleTask => "single-task",
            Paradigm::DualTask => "dual-task",
        })
    }
}

/// How the block's task identities are ordered.
#[derive(Copy, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum SequenceType {
    /// First-order Markov chain driven by the switch rate
    Random,
    /// Runs of two: A A B B A A ...
    #[serde(rename = "AABB")]
    Aabb,
}

impl FromStr for SequenceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Random" | "random" => Ok(SequenceType::Random),
            "AABB" | "aabb" => Ok(SequenceType::Aabb),
            other => Err(Error::UnknownSequenceType(other.to_string())),
        }
    }
}

impl TryFrom<String> for SequenceType {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Response-set overlap between the two tasks.
///
/// Only the external key map consumes this; direction geometry ignores it.
#[derive(Copy, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rso {
    Identical,
    Disjoint,
}

impl Default for Rso {
    fn default() -> Self {
        Rso::Identical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_type_parses_known_names() {
        assert_eq!("Random".parse::<SequenceType>().unwrap(), SequenceType::Random);
        assert_eq!("AABB".parse::<SequenceType>().unwrap(), SequenceType::Aabb);
    }

    #[test]
    fn test_sequence_type_rejects_unknown() {
        let err = "ABAB".parse::<SequenceType>().unwrap_err();
        assert!(matches!(err, Error::UnknownSequenceType(ref s) if s == "ABAB"));
    }

    #[test]
    fn test_sequence_type_deserialize_surfaces_unknown() {
        let err = serde_json::from_str::<SequenceType>("\"Blocked\"").unwrap_err();
        assert!(err.to_string().contains("unknown sequence type 'Blocked'"));
    }

    #[test]
    fn test_paradigm_wire_names() {
        let p: Paradigm = serde_json::from_str("\"dual-task\"").unwrap();
        assert!(p.is_dual());
        assert_eq!(serde_json::to_string(&Paradigm::SingleTask).unwrap(), "\"single-task\"");
    }
}
