use std::fmt::Debug;
use std::sync::Arc;
use std::sync::Weak;

use parking_lot::Mutex;
use tracing::debug;
use tracing::trace;

use super::listener_registry::ListenerRegistry;
use crate::EngineConfig;
use crate::ListenerId;
use crate::NativeNodeId;
use crate::NodeContext;
use crate::Result;
use crate::RoutedNode;

/// A scalar value that may be mirrored by an identically-behaving node
/// inside the native driver.
///
/// The node starts detached. [`attach`](ValueNode::attach) allocates a fresh
/// native identifier and registers it with the event router so that native
/// updates flow back to the local listeners; [`detach`](ValueNode::detach)
/// reverses both. Listener registration is independent of the attach state:
/// listeners may accumulate before the node ever attaches, and they survive
/// a detach/attach cycle, rebinding to the new identifier.
///
/// Dropping an attached node detaches it, so the router never retains a
/// dangling entry and every `create_node` is balanced by exactly one
/// `drop_node`.
pub struct ValueNode {
    shared: Arc<NodeShared>,
    context: NodeContext,
    /// Whether this node ever uses the native path. When false, attach and
    /// detach are local no-ops and no bridge command is issued.
    native: bool,
}

struct NodeShared {
    state: Mutex<NodeState>,
}

struct NodeState {
    value: f64,
    offset: f64,
    native_id: Option<NativeNodeId>,
    /// Whether a start-listening command is outstanding for the current
    /// identifier. Tracks the attached-and-subscribed edge so the driver is
    /// not asked to deliver events nobody wants.
    subscribed: bool,
    listeners: ListenerRegistry,
}

impl RoutedNode for NodeShared {
    /// Router-only entry point for updates delivered against the node's
    /// current identifier.
    ///
    /// The listener set is snapshotted under the lock and invoked after it
    /// is released, so callbacks may re-enter listener or lifecycle
    /// operations on the node without corrupting the in-progress pass.
    /// Membership is re-checked before each invocation: listeners removed
    /// before this dispatch, or by an earlier callback in the same pass,
    /// never fire.
    fn apply_native_update(
        &self,
        value: f64,
    ) {
        let (observed, snapshot) = {
            let mut state = self.state.lock();
            state.value = value;
            (state.value + state.offset, state.listeners.snapshot())
        };
        trace!("native update applied: value={}", value);
        for (listener_id, callback) in &snapshot {
            if self.state.lock().listeners.contains(*listener_id) {
                callback(observed);
            }
        }
    }
}

impl ValueNode {
    pub fn new(
        initial_value: f64,
        use_native_driver: bool,
        context: NodeContext,
    ) -> Self {
        Self {
            shared: Arc::new(NodeShared {
                state: Mutex::new(NodeState {
                    value: initial_value,
                    offset: 0.0,
                    native_id: None,
                    subscribed: false,
                    listeners: ListenerRegistry::new(),
                }),
            }),
            context,
            native: use_native_driver,
        }
    }

    /// Creates a node with the engine-wide native-driver default from
    /// configuration.
    pub fn from_config(
        initial_value: f64,
        config: &EngineConfig,
        context: NodeContext,
    ) -> Self {
        Self::new(initial_value, config.driver.use_native_driver, context)
    }

    /// Mirrors the node into the native driver and wires event routing.
    ///
    /// Calling while already attached is a no-op: no second identifier is
    /// allocated and no second mapping is registered. If listeners are
    /// already present, a start-listening command is issued immediately.
    ///
    /// # Errors
    /// - [`BridgeError::AllocationFailed`](crate::BridgeError) if the driver
    ///   cannot allocate the mirror node; the node stays detached.
    /// - [`RoutingError::IdentifierCollision`](crate::RoutingError) if the
    ///   allocated identifier is already live, which is an allocation bug. The fresh
    ///   native node is dropped before the error surfaces so the
    ///   create/drop balance holds.
    pub fn attach(&self) -> Result<()> {
        if !self.native {
            trace!("attach: node is not native-driven, ignoring");
            return Ok(());
        }

        let initial_value = {
            let state = self.shared.state.lock();
            if state.native_id.is_some() {
                debug!("attach: already attached, ignoring");
                return Ok(());
            }
            state.value
        };

        let id = self.context.bridge.create_node(initial_value)?;

        let weak = Arc::downgrade(&self.shared);
        let routed: Weak<dyn RoutedNode> = weak;
        if let Err(e) = self.context.router.register(id, routed) {
            // Roll the allocation back so the identifier does not leak.
            self.context.bridge.drop_node(id);
            return Err(e);
        }

        let must_listen = {
            let mut state = self.shared.state.lock();
            state.native_id = Some(id);
            state.subscribed = !state.listeners.is_empty();
            state.subscribed
        };
        if must_listen {
            self.context.bridge.start_listening(id);
        }

        debug!("attached: id={}", id);
        Ok(())
    }

    /// Tears down the native mirror and invalidates event routing.
    ///
    /// Calling while detached is a no-op. The router mapping is removed
    /// before the drop-node command is issued, so no event for the old
    /// identifier can reach this node after `detach` returns, even while
    /// the driver's own teardown is still in flight.
    pub fn detach(&self) {
        let (id, subscribed) = {
            let mut state = self.shared.state.lock();
            match state.native_id.take() {
                Some(id) => {
                    let subscribed = state.subscribed;
                    state.subscribed = false;
                    (id, subscribed)
                }
                None => {
                    trace!("detach: already detached, ignoring");
                    return;
                }
            }
        };

        if subscribed {
            self.context.bridge.stop_listening(id);
        }
        self.context.router.unregister(id);
        self.context.bridge.drop_node(id);

        debug!("detached: id={}", id);
    }

    /// Registers a listener and returns its removal handle.
    ///
    /// The first listener on an attached node triggers a start-listening
    /// command. Listener ids stay unique for the node's whole life, across
    /// detach/attach cycles.
    pub fn add_listener(
        &self,
        listener: impl Fn(f64) + Send + Sync + 'static,
    ) -> ListenerId {
        let (id, start_for) = {
            let mut state = self.shared.state.lock();
            let was_empty = state.listeners.is_empty();
            let id = state.listeners.add(Arc::new(listener));
            if was_empty && !state.subscribed && state.native_id.is_some() {
                state.subscribed = true;
                (id, state.native_id)
            } else {
                (id, None)
            }
        };
        if let Some(native_id) = start_for {
            self.context.bridge.start_listening(native_id);
        }
        id
    }

    /// Removes a listener. Unknown or already-removed ids are ignored.
    ///
    /// Removing the last listener on an attached node triggers a
    /// stop-listening command.
    pub fn remove_listener(
        &self,
        id: ListenerId,
    ) {
        let stop_for = {
            let mut state = self.shared.state.lock();
            state.listeners.remove(id);
            self.maybe_unsubscribe(&mut state)
        };
        if let Some(native_id) = stop_for {
            self.context.bridge.stop_listening(native_id);
        }
    }

    /// Removes every registered listener.
    pub fn remove_all_listeners(&self) {
        let stop_for = {
            let mut state = self.shared.state.lock();
            state.listeners.clear();
            self.maybe_unsubscribe(&mut state)
        };
        if let Some(native_id) = stop_for {
            self.context.bridge.stop_listening(native_id);
        }
    }

    pub fn has_listeners(&self) -> bool {
        !self.shared.state.lock().listeners.is_empty()
    }

    /// Sets the value locally, notifies listeners synchronously, and pushes
    /// the new value to the native mirror when attached.
    pub fn set_value(
        &self,
        value: f64,
    ) {
        let (observed, snapshot, native_id) = {
            let mut state = self.shared.state.lock();
            state.value = value;
            (
                state.value + state.offset,
                state.listeners.snapshot(),
                state.native_id,
            )
        };
        if let Some(id) = native_id {
            self.context.bridge.set_node_value(id, value);
        }
        for (listener_id, callback) in &snapshot {
            if self.shared.state.lock().listeners.contains(*listener_id) {
                callback(observed);
            }
        }
    }

    /// Sets an offset that is added on top of whatever value is set,
    /// whether locally or by the native driver.
    pub fn set_offset(
        &self,
        offset: f64,
    ) {
        let native_id = {
            let mut state = self.shared.state.lock();
            state.offset = offset;
            state.native_id
        };
        if let Some(id) = native_id {
            self.context.bridge.set_node_offset(id, offset);
        }
    }

    /// Merges the offset into the base value and resets the offset to zero.
    /// The observed value is unchanged.
    pub fn flatten_offset(&self) {
        let native_id = {
            let mut state = self.shared.state.lock();
            state.value += state.offset;
            state.offset = 0.0;
            state.native_id
        };
        if let Some(id) = native_id {
            self.context.bridge.flatten_node_offset(id);
        }
    }

    /// Moves the base value into the offset and resets the base value to
    /// zero. The observed value is unchanged.
    pub fn extract_offset(&self) {
        let native_id = {
            let mut state = self.shared.state.lock();
            state.offset += state.value;
            state.value = 0.0;
            state.native_id
        };
        if let Some(id) = native_id {
            self.context.bridge.extract_node_offset(id);
        }
    }

    /// The currently observed value: base value plus offset.
    pub fn value(&self) -> f64 {
        let state = self.shared.state.lock();
        state.value + state.offset
    }

    /// The native identifier currently owned by this node, if attached.
    pub fn native_id(&self) -> Option<NativeNodeId> {
        self.shared.state.lock().native_id
    }

    pub fn is_attached(&self) -> bool {
        self.shared.state.lock().native_id.is_some()
    }

    /// Issues the stop-listening edge when the registry empties while
    /// subscribed. Returns the identifier to notify, outside the lock.
    fn maybe_unsubscribe(
        &self,
        state: &mut NodeState,
    ) -> Option<NativeNodeId> {
        if state.listeners.is_empty() && state.subscribed {
            state.subscribed = false;
            state.native_id
        } else {
            None
        }
    }
}

impl Drop for ValueNode {
    fn drop(&mut self) {
        self.detach();
    }
}

impl Debug for ValueNode {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("ValueNode")
            .field("value", &state.value)
            .field("offset", &state.offset)
            .field("native_id", &state.native_id)
            .field("subscribed", &state.subscribed)
            .field("listeners", &state.listeners)
            .finish()
    }
}
