use super::block::generate_block_trials;
use super::config::SessionConfig;
use super::trial::TrialRecord;
use cotask_core::{Result, TrialResponse, TrialResult};
use rand::Rng;
use std::io::Write;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    BlockStarted { index: usize, block_id: String },
    TrialComplete { trial: usize },
    BlockComplete { index: usize, block_id: String },
    SessionComplete,
}

/// Caller-owned session progress: the current block's trials, the trial log
/// and the running flag.
///
/// Nothing here waits on the clock. The runner presents
/// [`current_trial`](Self::current_trial), then reports what it observed via
/// [`record_response`](Self::record_response).
pub struct Session<R: Rng> {
    pub config: SessionConfig,
    pub rng: R,
    block_index: usize,
    trials: Vec<TrialRecord>,
    trial_index: usize,
    results: Vec<TrialResult>,
    running: bool,
}

impl<R: Rng> Session<R> {
    pub fn new(config: SessionConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            block_index: 0,
            trials: Vec::new(),
            trial_index: 0,
            results: Vec::new(),
            running: false,
        }
    }

    /// Starts from the first block, discarding any earlier log.
    ///
    /// Every block is validated first; an invalid session leaves the previous
    /// log and state untouched.
    pub fn start(&mut self) -> Result<Vec<SessionEvent>> {
        self.config.validate()?;
        let mut events = Vec::new();
        self.results.clear();
        self.running = true;
        self.enter_block(0, &mut events)?;
        Ok(events)
    }

    pub fn stop(&mut self) {
        if self.running {
            tracing::info!(
                block = self.block_index,
                trial = self.trial_index,
                "session stopped"
            );
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Trial awaiting presentation, if the session is running.
    pub fn current_trial(&self) -> Option<&TrialRecord> {
        if !self.running {
            return None;
        }
        self.trials.get(self.trial_index)
    }

    /// Logs the runner's observations for the current trial and advances.
    ///
    /// Returns no events when the session is not running.
    pub fn record_response(&mut self, response: TrialResponse) -> Result<Vec<SessionEvent>> {
        let mut events = Vec::new();
        let Some(trial) = self.current_trial() else {
            return Ok(events);
        };

        let meta = trial.meta.clone();
        tracing::trace!(
            block_id = %meta.block_id,
            trial = meta.trial,
            rt1_ms = ?response.rt1_ms,
            rt2_ms = ?response.rt2_ms,
            "response recorded"
        );
        events.push(SessionEvent::TrialComplete { trial: meta.trial });
        self.results.push(TrialResult { meta, response });
        self.trial_index += 1;

        if self.trial_index >= self.trials.len() {
            self.complete_block(&mut events);
            self.enter_block(self.block_index + 1, &mut events)?;
        }
        Ok(events)
    }

    fn complete_block(&mut self, events: &mut Vec<SessionEvent>) {
        let block_id = self
            .config
            .blocks
            .get(self.block_index)
            .map(|b| b.block_id.clone())
            .unwrap_or_default();
        tracing::info!(block_id = %block_id, index = self.block_index, "block complete");
        events.push(SessionEvent::BlockComplete {
            index: self.block_index,
            block_id,
        });
    }

    /// Generates block `index`, skipping past empty blocks, or ends the session.
    ///
    /// A generation failure halts the session; completed results are kept.
    fn enter_block(&mut self, mut index: usize, events: &mut Vec<SessionEvent>) -> Result<()> {
        loop {
            let Some(block) = self.config.blocks.get(index) else {
                self.running = false;
                self.trials.clear();
                self.trial_index = 0;
                tracing::info!(trials = self.results.len(), "session complete");
                events.push(SessionEvent::SessionComplete);
                return Ok(());
            };

            self.trials =
                match generate_block_trials(block, self.config.trials_per_block, &mut self.rng) {
                    Ok(trials) => trials,
                    Err(e) => {
                        tracing::warn!(
                            block_id = %block.block_id,
                            index,
                            error = %e,
                            "block generation failed, session halted"
                        );
                        self.running = false;
                        self.trials.clear();
                        self.trial_index = 0;
                        return Err(e);
                    }
                };
            self.block_index = index;
            self.trial_index = 0;
            tracing::info!(block_id = %block.block_id, index, "block started");
            events.push(SessionEvent::BlockStarted {
                index,
                block_id: block.block_id.clone(),
            });

            if !self.trials.is_empty() {
                return Ok(());
            }
            self.complete_block(events);
            index += 1;
        }
    }

    /// Completed trials in presentation order.
    pub fn results(&self) -> &[TrialResult] {
        &self.results
    }

    /// `(block, trial)` 1-based position and `(blocks, trials per block)` totals.
    pub fn progress(&self) -> Option<((usize, usize), (usize, usize))> {
        self.current_trial().map(|_| {
            (
                (self.block_index + 1, self.trial_index + 1),
                (self.config.blocks.len(), self.trials.len()),
            )
        })
    }

    pub fn write_results_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, &self.results)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cotask_core::{
        BlockConfig, Coherence, CongruencySpec, Congruency, DistributionSpec, Paradigm, Rso,
        SequenceType, Task,
    };
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn block(id: &str, paradigm: Paradigm) -> BlockConfig {
        let dual = paradigm == Paradigm::DualTask;
        BlockConfig {
            block_id: id.into(),
            block_type: if dual { "prp" } else { "pure" }.into(),
            paradigm,
            task1: Some(Task::Movement),
            task2: dual.then_some(Task::Orientation),
            sequence_type: SequenceType::Aabb,
            switch_rate: 0.0,
            start_task: None,
            csi: 200.0,
            stimulus_duration: 300.0,
            response_window: 2000.0,
            coherence: Coherence {
                ch1_task: 0.8,
                ch1_distractor: 0.0,
                ch2_task: if dual { 0.8 } else { 0.0 },
                ch2_distractor: 0.0,
            },
            congruency: CongruencySpec::single(Congruency::Univalent),
            iti: DistributionSpec::fixed(1000.0),
            soa: dual.then(|| DistributionSpec::choice(vec![100.0, 600.0])),
            rso: Rso::Disjoint,
        }
    }

    fn session(trials: usize) -> Session<StdRng> {
        let config = SessionConfig::new(
            vec![block("a", Paradigm::SingleTask), block("b", Paradigm::DualTask)],
            trials,
        );
        Session::new(config, StdRng::seed_from_u64(41))
    }

    fn respond(rt: f64) -> TrialResponse {
        TrialResponse {
            rt1_ms: Some(rt),
            correct1: Some(true),
            ..TrialResponse::default()
        }
    }

    #[test]
    fn test_not_running_before_start() {
        let mut s = session(3);
        assert!(!s.is_running());
        assert!(s.current_trial().is_none());
        assert!(s.record_response(respond(400.0)).unwrap().is_empty());
        assert!(s.results().is_empty());
    }

    #[test]
    fn test_start_enters_first_block() {
        let mut s = session(3);
        let events = s.start().unwrap();
        assert_eq!(
            events,
            vec![SessionEvent::BlockStarted {
                index: 0,
                block_id: "a".into()
            }]
        );
        assert!(s.is_running());
        assert_eq!(s.current_trial().unwrap().meta.trial, 1);
        assert_eq!(s.progress(), Some(((1, 1), (2, 3))));
    }

    #[test]
    fn test_runs_through_all_blocks() {
        let mut s = session(2);
        s.start().unwrap();

        assert_eq!(
            s.record_response(respond(400.0)).unwrap(),
            vec![SessionEvent::TrialComplete { trial: 1 }]
        );
        let boundary = s.record_response(respond(410.0)).unwrap();
        assert_eq!(
            boundary,
            vec![
                SessionEvent::TrialComplete { trial: 2 },
                SessionEvent::BlockComplete {
                    index: 0,
                    block_id: "a".into()
                },
                SessionEvent::BlockStarted {
                    index: 1,
                    block_id: "b".into()
                },
            ]
        );
        assert_eq!(s.current_trial().unwrap().meta.paradigm, Paradigm::DualTask);

        s.record_response(respond(500.0)).unwrap();
        let end = s.record_response(respond(520.0)).unwrap();
        assert_eq!(end.last(), Some(&SessionEvent::SessionComplete));
        assert!(!s.is_running());
        assert_eq!(s.results().len(), 4);
        assert_eq!(s.results()[3].response.rt1_ms, Some(520.0));
        assert_eq!(s.results()[3].meta.block_id, "b");
    }

    #[test]
    fn test_stop_halts_presentation() {
        let mut s = session(5);
        s.start().unwrap();
        s.record_response(respond(400.0)).unwrap();
        s.stop();
        assert!(s.current_trial().is_none());
        assert!(s.record_response(respond(400.0)).unwrap().is_empty());
        assert_eq!(s.results().len(), 1);
    }

    #[test]
    fn test_empty_session_completes_immediately() {
        let mut s = Session::new(SessionConfig::default(), StdRng::seed_from_u64(42));
        assert_eq!(s.start().unwrap(), vec![SessionEvent::SessionComplete]);
        assert!(!s.is_running());
    }

    #[test]
    fn test_zero_trial_blocks_are_skipped() {
        let mut s = session(0);
        let events = s.start().unwrap();
        assert_eq!(events.len(), 5);
        assert_eq!(events.last(), Some(&SessionEvent::SessionComplete));
    }

    #[test]
    fn test_invalid_session_does_not_start() {
        let mut bad = block("bad", Paradigm::SingleTask);
        bad.switch_rate = 500.0;
        let mut s = Session::new(SessionConfig::new(vec![bad], 3), StdRng::seed_from_u64(43));
        assert!(s.start().is_err());
        assert!(!s.is_running());
        assert!(s.current_trial().is_none());
        assert!(s.record_response(respond(400.0)).unwrap().is_empty());
    }

    #[test]
    fn test_failed_restart_keeps_previous_log() {
        let mut s = session(1);
        s.start().unwrap();
        s.record_response(respond(400.0)).unwrap();
        s.config.blocks[0].switch_rate = -1.0;
        assert!(s.start().is_err());
        assert!(!s.is_running());
        assert_eq!(s.results().len(), 1);
    }

    #[test]
    fn test_failed_next_block_halts_session() {
        let mut s = session(1);
        s.start().unwrap();
        // break the second block after the session has validated it
        s.config.blocks[1].switch_rate = 500.0;
        assert!(s.record_response(respond(400.0)).is_err());
        assert!(!s.is_running());
        assert!(s.current_trial().is_none());
        assert_eq!(s.progress(), None);
        assert_eq!(s.results().len(), 1);
        assert!(s.record_response(respond(400.0)).unwrap().is_empty());
    }

    #[test]
    fn test_results_json_is_flat() {
        let mut s = session(1);
        s.start().unwrap();
        s.record_response(respond(400.0)).unwrap();
        let mut buf = Vec::new();
        s.write_results_json(&mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let row = &value[0];
        assert_eq!(row["block_id"], "a");
        assert_eq!(row["rt1_ms"], 400.0);
        assert_eq!(row["task"], "mov");
    }
}
