//! This module is the native driver abstraction layer.
//!
//! The engine never talks to the native execution environment directly; it
//! issues commands through the [`NativeBridge`] trait and receives value
//! updates back through the event intake in [`event_listener`]. The trait is
//! the sole outbound channel, which keeps the whole native boundary mockable
//! in tests.

mod event_listener;
pub use event_listener::*;


// Trait definition of the current module
// -----------------------------------------------------------------------------
// Outbound command surface consumed from the native driver
//

use std::fmt;

#[cfg(test)]
use mockall::automock;

use crate::Result;

/// Opaque identifier of a native-side mirror node.
///
/// Allocated by the bridge adapter on `create_node` and never reused while
/// live: a fresh attach always yields an identifier distinct from any
/// previously freed one, which is what lets the router discard events for
/// stale identifiers instead of conflating them with a re-attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NativeNodeId(pub u64);

impl fmt::Display for NativeNodeId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inbound update event delivered by the native driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NativeValueUpdate {
    /// Identifier of the native node the update belongs to.
    pub id: NativeNodeId,
    /// The new scalar value.
    pub value: f64,
}

#[cfg_attr(test, automock)]
pub trait NativeBridge: Send + Sync + 'static {
    /// Allocates a native mirror node seeded with `initial_value`.
    ///
    /// This is the only command whose outcome the engine waits on: the
    /// returned identifier becomes the node's routing key. Allocation
    /// failure propagates as a failed `attach()` and leaves the node
    /// detached.
    fn create_node(
        &self,
        initial_value: f64,
    ) -> Result<NativeNodeId>;

    /// Destroys the native mirror node. Fire-and-forget.
    ///
    /// Must be called exactly once per successful `create_node`. Update
    /// events may still arrive for `id` after this command has been issued
    /// but before the native side acknowledges teardown; the router's
    /// discard-on-unknown-id rule is what makes that window safe.
    fn drop_node(
        &self,
        id: NativeNodeId,
    );

    /// Asks the native driver to start producing update events for `id`.
    ///
    /// Purely an optimization signal so the driver does not deliver events
    /// nobody wants; correctness must not depend on the driver honoring it.
    fn start_listening(
        &self,
        id: NativeNodeId,
    );

    /// Asks the native driver to stop producing update events for `id`.
    fn stop_listening(
        &self,
        id: NativeNodeId,
    );

    /// Pushes a locally-set value to the native mirror node.
    fn set_node_value(
        &self,
        id: NativeNodeId,
        value: f64,
    );

    /// Pushes a locally-set offset to the native mirror node.
    fn set_node_offset(
        &self,
        id: NativeNodeId,
        offset: f64,
    );

    /// Merges the native node's offset into its base value.
    fn flatten_node_offset(
        &self,
        id: NativeNodeId,
    );

    /// Moves the native node's base value into its offset.
    fn extract_node_offset(
        &self,
        id: NativeNodeId,
    );
}
