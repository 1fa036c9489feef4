mod event_router;
pub use event_router::*;


///--------------------------------------
/// Trait Definition
///
/// The router's view of a value node: the single inbound entry point that
/// routed native updates are delivered through. Keeping this a trait
/// decouples the routing table from the concrete node type and lets tests
/// register probe nodes.
pub trait RoutedNode: Send + Sync {
    /// Applies a routed native update to the node.
    ///
    /// Invoked only by the router, and only for the identifier the node
    /// currently owns.
    fn apply_native_update(
        &self,
        value: f64,
    );
}
