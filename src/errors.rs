//! Reactive Value Engine Error Hierarchy
//!
//! Defines error types for the native-backed value node lifecycle,
//! categorized by the boundary they occur at (bridge commands vs. event
//! routing) plus configuration and fatal classes.

use config::ConfigError;

use crate::NativeNodeId;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Outbound native bridge command failures
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    /// Identifier routing invariant violations
    #[error(transparent)]
    Routing(#[from] RoutingError),

    /// Engine configuration validation failures
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Unrecoverable failures requiring process termination
    #[error("Fatal error: {0}")]
    Fatal(String),
}

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The native driver could not allocate a mirror node.
    ///
    /// Surfaces as a failed `attach()`; the node stays detached.
    #[error("Native node allocation failed: {reason}")]
    AllocationFailed { reason: String },

    /// The native driver is not available in this process.
    #[error("Native driver unavailable")]
    DriverUnavailable,
}

#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    /// `register()` was called with an identifier that is already live.
    ///
    /// Identifiers are never reused while registered, so a collision
    /// indicates an allocation bug in the bridge adapter, not a runtime
    /// condition to recover from.
    #[error("Identifier {0} is already registered with the event router")]
    IdentifierCollision(NativeNodeId),
}
