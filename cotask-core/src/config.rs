use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::paradigm::{Paradigm, Rso, SequenceType};
use crate::stimulus::{Coherence, Congruency, Task};

/// Shape of a timing distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", rename_all = "lowercase")]
pub enum DistributionKind {
    Fixed,
    Uniform,
    Choice,
}

impl FromStr for DistributionKind {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "fixed" => Ok(DistributionKind::Fixed),
            "uniform" => Ok(DistributionKind::Uniform),
            "choice" => Ok(DistributionKind::Choice),
            other => Err(Error::UnknownDistributionType(other.to_string())),
        }
    }
}

impl TryFrom<String> for DistributionKind {
    type Error = Error;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

/// Declarative distribution for a scalar timing value in milliseconds.
///
/// `uniform` reads `params[0..2]` as bounds in either order, `choice` picks
/// one of `params`. Both fall back to `value` when `params` is too short.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSpec {
    #[serde(rename = "type")]
    pub kind: DistributionKind,
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub params: Vec<f64>,
}

impl DistributionSpec {
    pub fn fixed(value: f64) -> Self {
        Self {
            kind: DistributionKind::Fixed,
            value,
            params: Vec::new(),
        }
    }

    pub fn uniform(min: f64, max: f64) -> Self {
        Self {
            kind: DistributionKind::Uniform,
            value: min,
            params: vec![min, max],
        }
    }

    pub fn choice(values: impl Into<Vec<f64>>) -> Self {
        let params = values.into();
        Self {
            kind: DistributionKind::Choice,
            value: params.first().copied().unwrap_or_default(),
            params,
        }
    }
}

/// Congruency conditions and the share of trials each receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CongruencySpec {
    pub conditions: Vec<Congruency>,
    pub proportions: Vec<f64>,
}

impl CongruencySpec {
    /// Every trial gets the same condition.
    pub fn single(condition: Congruency) -> Self {
        Self {
            conditions: vec![condition],
            proportions: vec![1.0],
        }
    }
}

/// Immutable description of one block, supplied by the session designer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockConfig {
    pub block_id: String,
    pub block_type: String,
    pub paradigm: Paradigm,
    /// `None` leaves the primary task open (mixed blocks)
    #[serde(default)]
    pub task1: Option<Task>,
    /// Dual-task only; must be the complement of `task1` when both are set.
    /// Each trial's second task is the complement of that trial's first task.
    #[serde(default)]
    pub task2: Option<Task>,
    #[serde(default = "default_sequence_type")]
    pub sequence_type: SequenceType,
    /// Percent chance of switching task between consecutive trials
    #[serde(default)]
    pub switch_rate: f64,
    #[serde(default)]
    pub start_task: Option<Task>,
    pub csi: f64,
    pub stimulus_duration: f64,
    pub response_window: f64,
    pub coherence: Coherence,
    pub congruency: CongruencySpec,
    pub iti: DistributionSpec,
    #[serde(default)]
    pub soa: Option<DistributionSpec>,
    #[serde(default)]
    pub rso: Rso,
}

fn default_sequence_type() -> SequenceType {
    SequenceType::Random
}

const PROPORTION_TOLERANCE: f64 = 1e-6;

impl BlockConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Reads a file holding either one block object or an array of blocks.
    pub fn load_all(path: impl AsRef<Path>) -> Result<Vec<Self>> {
        let text = std::fs::read_to_string(path)?;
        Self::parse_all(&text)
    }

    pub fn parse_all(text: &str) -> Result<Vec<Self>> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        if value.is_array() {
            Ok(serde_json::from_value(value)?)
        } else {
            Ok(vec![serde_json::from_value(value)?])
        }
    }

    /// Seed task for the block's task sequence, if the config pins one.
    pub fn seed_task(&self) -> Option<Task> {
        self.start_task.or(self.task1)
    }

    /// Rejects configurations that cannot produce a well-formed block.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.switch_rate) {
            return Err(Error::invalid(
                "switchRate",
                format!("{} is outside [0, 100]", self.switch_rate),
            ));
        }

        for (field, v) in [
            ("csi", self.csi),
            ("stimulusDuration", self.stimulus_duration),
            ("responseWindow", self.response_window),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(Error::invalid(field, format!("{v} is not a non-negative time")));
            }
        }

        for (field, v) in self.coherence.fields() {
            if !(0.0..=1.0).contains(&v) {
                return Err(Error::invalid(field, format!("{v} is outside [0, 1]")));
            }
        }

        self.validate_congruency()?;

        match self.paradigm {
            Paradigm::SingleTask if self.task2.is_some() => {
                return Err(Error::invalid("task2", "single-task blocks have no second task"));
            }
            Paradigm::DualTask if self.soa.is_none() => {
                return Err(Error::invalid("soa", "dual-task blocks need an SOA distribution"));
            }
            _ => {}
        }

        if let (Paradigm::DualTask, Some(t1), Some(t2)) = (self.paradigm, self.task1, self.task2) {
            if t2 != t1.complement() {
                return Err(Error::invalid(
                    "task2",
                    format!("must be the complement of task1 '{t1}', got '{t2}'"),
                ));
            }
        }

        for (field, dist) in [("iti", Some(&self.iti)), ("soa", self.soa.as_ref())] {
            if let Some(d) = dist {
                if !d.value.is_finite() || d.params.iter().any(|p| !p.is_finite()) {
                    return Err(Error::invalid(field, "distribution values must be finite"));
                }
                if let (DistributionKind::Uniform, [a, b, ..]) = (d.kind, d.params.as_slice()) {
                    if !(b - a).is_finite() {
                        return Err(Error::invalid(field, "uniform range is too wide to sample"));
                    }
                }
            }
        }

        Ok(())
    }

    fn validate_congruency(&self) -> Result<()> {
        let spec = &self.congruency;
        if spec.conditions.is_empty() {
            return Err(Error::invalid("congruency.conditions", "at least one condition required"));
        }
        if spec.conditions.len() != spec.proportions.len() {
            return Err(Error::invalid(
                "congruency.proportions",
                format!(
                    "{} proportions for {} conditions",
                    spec.proportions.len(),
                    spec.conditions.len()
                ),
            ));
        }
        if spec.proportions.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(Error::invalid("congruency.proportions", "proportions must be non-negative"));
        }
        let total: f64 = spec.proportions.iter().sum();
        if (total - 1.0).abs() > PROPORTION_TOLERANCE {
            return Err(Error::invalid(
                "congruency.proportions",
                format!("proportions sum to {total}, expected 1"),
            ));
        }
        Ok(())
    }
}
