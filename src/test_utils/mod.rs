//! the test_utils folder here will share utils or test components between
//! unit tests across modules
mod probe_node;
mod recording_bridge;

pub use probe_node::*;
pub use recording_bridge::*;
