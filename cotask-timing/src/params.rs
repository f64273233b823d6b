//! Flat stimulus-engine parameters and the pathway timing chain.
//!
//! The presentation engine places every channel-2 pathway relative to the
//! end of the matching channel-1 pathway, not on the trial clock. Building a
//! trial therefore runs as a pipeline:
//!
//! ```text
//! route → assemble (tentative offsets) → silence → rechain
//! ```
//!
//! `rechain` has to run after `silence`, because silencing a channel-1
//! pathway moves its end time to 0 and invalidates the tentative offsets.

use cotask_core::{Coherence, DirectionSpec, Error, Result, Task};
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Number of flat keys an `SeParams` serializes to.
pub const FIELD_COUNT: usize = 26;

/// A time span in ms from trial onset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Window {
    pub start: f64,
    pub dur: f64,
}

impl Window {
    pub fn end(&self) -> f64 {
        self.start + self.dur
    }
}

/// One perceptual dimension of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pathway {
    pub start: f64,
    pub dur: f64,
    pub coh: f64,
    pub dir: u16,
}

impl Pathway {
    pub fn end(&self) -> f64 {
        self.start + self.dur
    }

    /// A zero-coherence pathway renders as noise unless it is also given no time.
    pub fn is_silent(&self) -> bool {
        self.coh == 0.0
    }

    fn place(&mut self, w: Window) {
        self.start = w.start;
        self.dur = w.dur;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChannelParams {
    pub cue: Window,
    pub go: Window,
    pub mov: Pathway,
    pub or: Pathway,
}

impl ChannelParams {
    pub fn pathway(&self, task: Task) -> &Pathway {
        match task {
            Task::Movement => &self.mov,
            Task::Orientation => &self.or,
        }
    }

    pub fn pathway_mut(&mut self, task: Task) -> &mut Pathway {
        match task {
            Task::Movement => &mut self.mov,
            Task::Orientation => &mut self.or,
        }
    }

    fn values(&self) -> [f64; 12] {
        [
            self.cue.start,
            self.cue.dur,
            self.go.start,
            self.go.dur,
            self.mov.start,
            self.mov.dur,
            self.mov.coh,
            f64::from(self.mov.dir),
            self.or.start,
            self.or.dur,
            self.or.coh,
            f64::from(self.or.dir),
        ]
    }
}

/// Parameters for one trial as consumed by the stimulus engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeParams {
    pub task_1: Task,
    pub task_2: Option<Task>,
    pub ch1: ChannelParams,
    pub ch2: ChannelParams,
}

impl SeParams {
    /// Trial-clock onset of the channel-2 pathway for `task`, as the engine computes it.
    pub fn ch2_absolute_start(&self, task: Task) -> f64 {
        self.ch2.pathway(task).start + self.ch1.pathway(task).end()
    }

    pub fn all_finite(&self) -> bool {
        self.ch1
            .values()
            .iter()
            .chain(self.ch2.values().iter())
            .all(|v| v.is_finite())
    }
}

struct ChannelKeys([&'static str; 12]);

const CH1_KEYS: ChannelKeys = ChannelKeys([
    "start_1", "dur_1", "start_go_1", "dur_go_1", "start_mov_1", "dur_mov_1", "coh_mov_1",
    "dir_mov_1", "start_or_1", "dur_or_1", "coh_or_1", "dir_or_1",
]);

const CH2_KEYS: ChannelKeys = ChannelKeys([
    "start_2", "dur_2", "start_go_2", "dur_go_2", "start_mov_2", "dur_mov_2", "coh_mov_2",
    "dir_mov_2", "start_or_2", "dur_or_2", "coh_or_2", "dir_or_2",
]);

impl Serialize for SeParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("SeParams", FIELD_COUNT)?;
        st.serialize_field("task_1", self.task_1.as_str())?;
        st.serialize_field("task_2", self.task_2.map_or("none", Task::as_str))?;
        for (channel, keys) in [(&self.ch1, &CH1_KEYS), (&self.ch2, &CH2_KEYS)] {
            for (key, value) in keys.0.iter().copied().zip(channel.values()) {
                st.serialize_field(key, &value)?;
            }
        }
        st.end()
    }
}

/// Abstract description of one trial, consumed by [`build`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrialSpec {
    pub task1: Task,
    pub task2: Option<Task>,
    pub csi: f64,
    pub dur_ch1: f64,
    pub dur_ch2: f64,
    /// Ignored when `task2` is `None`
    pub soa: f64,
    pub response_window: f64,
    pub coherence: Coherence,
    pub directions: DirectionSpec,
}

impl TrialSpec {
    /// Trial-clock time at which channel 2 should appear.
    pub fn ch2_onset(&self) -> f64 {
        self.csi + self.soa
    }
}

/// Builds the engine parameters for one trial.
///
/// Fails with [`Error::MissingRequiredField`] when a pathway with non-zero
/// coherence has no direction.
pub fn build(spec: &TrialSpec) -> Result<SeParams> {
    let routed = route(spec)?;
    let tentative = assemble(routed, spec);
    let silenced = silence(tentative);
    let params = if spec.task2.is_some() {
        rechain(silenced, spec.ch2_onset())
    } else {
        silenced
    };
    debug_assert!(params.all_finite());
    tracing::trace!(task_1 = %params.task_1, task_2 = ?params.task_2, "built trial params");
    Ok(params)
}

struct Signal {
    coh: f64,
    dir: Option<u16>,
    field: &'static str,
}

impl Signal {
    fn resolve(self) -> Result<Pathway> {
        let dir = match self.dir {
            Some(d) => d,
            None if self.coh != 0.0 => return Err(Error::MissingRequiredField(self.field)),
            None => 0,
        };
        Ok(Pathway {
            coh: self.coh,
            dir,
            ..Pathway::default()
        })
    }
}

fn route_channel(task: Task, target: Signal, distractor: Signal) -> Result<ChannelParams> {
    let mut ch = ChannelParams::default();
    *ch.pathway_mut(task) = target.resolve()?;
    *ch.pathway_mut(task.complement()) = distractor.resolve()?;
    Ok(ch)
}

/// Routes task/distractor coherence and direction onto the mov/or pathways.
pub fn route(spec: &TrialSpec) -> Result<SeParams> {
    let (c, d) = (&spec.coherence, &spec.directions);
    let ch1 = route_channel(
        spec.task1,
        Signal {
            coh: c.ch1_task,
            dir: d.ch1_task,
            field: "directions.ch1_task",
        },
        Signal {
            coh: c.ch1_distractor,
            dir: d.ch1_distractor,
            field: "directions.ch1_distractor",
        },
    )?;
    let ch2 = match spec.task2 {
        Some(task2) => route_channel(
            task2,
            Signal {
                coh: c.ch2_task,
                dir: d.ch2_task,
                field: "directions.ch2_task",
            },
            Signal {
                coh: c.ch2_distractor,
                dir: d.ch2_distractor,
                field: "directions.ch2_distractor",
            },
        )?,
        None => ChannelParams::default(),
    };
    Ok(SeParams {
        task_1: spec.task1,
        task_2: spec.task2,
        ch1,
        ch2,
    })
}

/// Lays out cue, go and pathway windows.
///
/// Channel-2 pathway starts are tentative: they assume both channel-1
/// pathways end at `csi + dur_ch1`.
pub fn assemble(mut params: SeParams, spec: &TrialSpec) -> SeParams {
    let stimulus = Window {
        start: spec.csi,
        dur: spec.dur_ch1,
    };
    params.ch1.cue = Window {
        start: 0.0,
        dur: spec.csi + spec.dur_ch1,
    };
    params.ch1.go = Window {
        start: spec.csi,
        dur: spec.response_window,
    };
    params.ch1.mov.place(stimulus);
    params.ch1.or.place(stimulus);

    if params.task_2.is_some() {
        // channel 2 has no cue-stimulus interval of its own
        let onset = spec.ch2_onset();
        params.ch2.cue = Window {
            start: onset,
            dur: spec.dur_ch2,
        };
        params.ch2.go = Window {
            start: onset,
            dur: spec.response_window,
        };
        let chained = Window {
            start: spec.soa - spec.dur_ch1,
            dur: spec.dur_ch2,
        };
        params.ch2.mov.place(chained);
        params.ch2.or.place(chained);
    }
    params
}

/// Zeroes `start` and `dur` of every zero-coherence pathway.
pub fn silence(mut params: SeParams) -> SeParams {
    for ch in [&mut params.ch1, &mut params.ch2] {
        for p in [&mut ch.mov, &mut ch.or] {
            if p.is_silent() {
                p.start = 0.0;
                p.dur = 0.0;
            }
        }
    }
    params
}

/// Re-anchors active channel-2 pathways so each lands at `onset` on the trial clock.
///
/// Offsets are measured from the post-silencing end of the matching channel-1
/// pathway and may be negative.
pub fn rechain(mut params: SeParams, onset: f64) -> SeParams {
    for task in [Task::Movement, Task::Orientation] {
        let anchor_end = params.ch1.pathway(task).end();
        let p = params.ch2.pathway_mut(task);
        if p.dur != 0.0 {
            p.start = onset - anchor_end;
        }
    }
    params
}
