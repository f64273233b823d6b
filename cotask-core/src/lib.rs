pub mod config;
pub mod error;
pub mod paradigm;
pub mod stimulus;
pub mod trial;

pub use config::{BlockConfig, CongruencySpec, DistributionKind, DistributionSpec};
pub use error::{Error, Result};
pub use paradigm::{Paradigm, Rso, SequenceType};
pub use stimulus::{Coherence, Congruency, DirectionSpec, Directions, Task};
pub use trial::{Transition, TrialMeta, TrialResponse, TrialResult};
