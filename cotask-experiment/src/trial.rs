use cotask_core::TrialMeta;
use cotask_timing::SeParams;
use serde::Serialize;

/// One generated trial: what the stimulus engine draws and what analysis keeps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialRecord {
    pub params: SeParams,
    pub meta: TrialMeta,
}
