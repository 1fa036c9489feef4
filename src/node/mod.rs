mod context;
mod listener_registry;
mod value_node;

pub use context::*;
pub use listener_registry::*;
pub use value_node::*;
