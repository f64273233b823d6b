pub mod congruency;
pub mod direction;
pub mod task;
pub mod transition;

pub use congruency::generate_congruency_sequence;
pub use direction::assign_directions;
pub use task::{coin_flip_task, generate_task_sequence};
pub use transition::classify_transitions;
