mod bridge;
mod config;
mod errors;
mod node;
mod router;

pub use bridge::*;
pub use config::*;
pub use errors::*;
pub use node::*;
pub use router::*;

//-----------------------------------------------------------
// Test utils

#[cfg(test)]
pub mod test_utils;
