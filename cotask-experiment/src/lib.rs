pub mod block;
pub mod config;
pub mod state;
pub mod trial;
pub use block::generate_block_trials;
pub use config::SessionConfig;
pub use state::{Session, SessionEvent};
pub use trial::TrialRecord;
