pub mod params;
pub mod sampler;

pub use params::{
    ChannelParams, FIELD_COUNT, Pathway, SeParams, TrialSpec, Window, assemble, build, rechain,
    route, silence,
};
pub use sampler::{Sample, sample};
