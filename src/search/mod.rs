pub mod engine;
pub mod objective;
pub mod state;

pub use engine::{search, StateSpace};
pub use objective::{compare_objectives, Objective};
pub use state::{SelectionState, StateMap, StateValue};
