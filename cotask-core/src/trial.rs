use serde::{Deserialize, Serialize};

use crate::paradigm::Paradigm;
use crate::stimulus::{Congruency, Directions, Task};

/// Task-identity relation to the previous trial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    First,
    Repeat,
    Switch,
}

/// Per-trial analysis record. Produced once, never read back by generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialMeta {
    /// 1-based position within the block
    pub trial: usize,
    pub block_id: String,
    pub block_type: String,
    pub paradigm: Paradigm,
    pub task: Task,
    pub task2: Option<Task>,
    pub transition: Transition,
    pub congruency: Congruency,
    pub prev_congruency: Option<Congruency>,
    pub iti: f64,
    /// Only sampled for dual-task blocks
    pub soa: Option<f64>,
    pub directions: Directions,
}

/// What the external runner observed for one trial.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrialResponse {
    pub rt1_ms: Option<f64>,
    pub correct1: Option<bool>,
    pub rt2_ms: Option<f64>,
    pub correct2: Option<bool>,
}

/// Recorded result per trial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialResult {
    #[serde(flatten)]
    pub meta: TrialMeta,
    #[serde(flatten)]
    pub response: TrialResponse,
}
