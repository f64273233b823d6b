use cotask_core::{BlockConfig, Coherence, Congruency, Result, TrialMeta};
use cotask_sequence::{
    assign_directions, classify_transitions, generate_congruency_sequence, generate_task_sequence,
};
use cotask_timing::{Sample, TrialSpec, build};
use rand::Rng;

use crate::trial::TrialRecord;

/// Generates the ordered trials of one block.
///
/// Task and congruency sequences are drawn once for the whole block so that
/// transition and proportion counts hold per block. Each trial then samples
/// ITI (and SOA for dual-task), picks directions and builds its parameters.
pub fn generate_block_trials<R: Rng + ?Sized>(
    config: &BlockConfig,
    num_trials: usize,
    rng: &mut R,
) -> Result<Vec<TrialRecord>> {
    config.validate()?;

    let tasks = generate_task_sequence(
        num_trials,
        config.sequence_type,
        config.switch_rate,
        config.seed_task(),
        rng,
    );
    let transitions = classify_transitions(&tasks);
    let congruencies = generate_congruency_sequence(
        num_trials,
        &config.congruency.conditions,
        &config.congruency.proportions,
        rng,
    )?;

    let dual = config.paradigm.is_dual();
    let mut trials = Vec::with_capacity(num_trials);
    let mut prev_congruency = None;

    for (i, ((&task, &transition), &congruency)) in tasks
        .iter()
        .zip(&transitions)
        .zip(&congruencies)
        .enumerate()
    {
        let task2 = dual.then(|| task.complement());
        let iti = config.iti.sample(rng);
        let soa = if dual {
            config.soa.as_ref().map(|d| d.sample(rng))
        } else {
            None
        };
        let directions = assign_directions(task, congruency, config.paradigm, config.rso, rng);

        let spec = TrialSpec {
            task1: task,
            task2,
            csi: config.csi,
            dur_ch1: config.stimulus_duration,
            dur_ch2: config.stimulus_duration,
            soa: soa.unwrap_or_default(),
            response_window: config.response_window,
            coherence: trial_coherence(config.coherence, congruency),
            directions: directions.into(),
        };
        let params = build(&spec)?;

        let meta = TrialMeta {
            trial: i + 1,
            block_id: config.block_id.clone(),
            block_type: config.block_type.clone(),
            paradigm: config.paradigm,
            task,
            task2,
            transition,
            congruency,
            prev_congruency,
            iti,
            soa,
            directions,
        };
        prev_congruency = Some(congruency);
        trials.push(TrialRecord { params, meta });
    }

    tracing::debug!(
        block_id = %config.block_id,
        paradigm = %config.paradigm,
        trials = trials.len(),
        "generated block"
    );
    Ok(trials)
}

/// Univalent trials carry no distractor signal regardless of the block default.
fn trial_coherence(base: Coherence, congruency: Congruency) -> Coherence {
    match congruency {
        Congruency::Univalent => Coherence {
            ch1_distractor: 0.0,
            ..base
        },
        _ => base,
    }
}
