use std::sync::Weak;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;
use tracing::error;
use tracing::trace;
use tracing::warn;

use super::RoutedNode;
use crate::NativeNodeId;
use crate::Result;
use crate::RoutingError;

/// Process-wide dispatcher from native identifiers to the value nodes that
/// currently own them.
///
/// The router holds non-owning [`Weak`] back-references: it looks nodes up
/// but never extends their lifetime. An identifier absent from the table is
/// either never-attached or already detached, and events for it are
/// silently discarded. That is expected during asynchronous teardown races,
/// not an error.
///
/// The router is an explicit injected dependency (see `NodeContext`), not
/// ambient global state, so every test can run against an isolated
/// instance.
#[derive(Default)]
pub struct EventRouter {
    entries: DashMap<NativeNodeId, Weak<dyn RoutedNode>>,
}

impl EventRouter {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Records `id -> node` so that inbound events for `id` reach `node`.
    ///
    /// # Errors
    /// - Returns [`RoutingError::IdentifierCollision`] if `id` is already
    ///   registered. Live identifiers are never reused, so a collision is a
    ///   bridge allocation bug rather than a recoverable condition.
    pub fn register(
        &self,
        id: NativeNodeId,
        node: Weak<dyn RoutedNode>,
    ) -> Result<()> {
        match self.entries.entry(id) {
            Entry::Occupied(_) => {
                error!("identifier collision: id={} is already registered", id);
                Err(RoutingError::IdentifierCollision(id).into())
            }
            Entry::Vacant(vacant) => {
                debug!("register id={}", id);
                vacant.insert(node);
                Ok(())
            }
        }
    }

    /// Removes the mapping for `id`.
    ///
    /// No-op when `id` is absent: a detach racing a prior cleanup must not
    /// fail.
    pub fn unregister(
        &self,
        id: NativeNodeId,
    ) {
        if self.entries.remove(&id).is_some() {
            debug!("unregister id={}", id);
        } else {
            trace!("unregister id={}: not registered, ignoring", id);
        }
    }

    /// Routes a native update to the node currently owning `id`.
    ///
    /// Unknown identifiers are silently discarded; this is the correctness
    /// property that makes asynchronous native teardown safe. A dangling
    /// entry (node dropped without a detach) is swept here so the table does
    /// not accumulate dead weight.
    pub fn dispatch(
        &self,
        id: NativeNodeId,
        value: f64,
    ) {
        // Clone the weak ref out so the shard guard is released before the
        // node runs its listeners; a listener may re-enter
        // register/unregister on this same router.
        let target = self.entries.get(&id).map(|entry| entry.value().clone());

        match target {
            Some(weak) => match weak.upgrade() {
                Some(node) => {
                    trace!("dispatch id={} value={}", id, value);
                    node.apply_native_update(value);
                }
                None => {
                    warn!("dropping update for id={}: node was dropped without detach", id);
                    self.entries.remove(&id);
                }
            },
            None => {
                trace!("discarding update for unknown id={}", id);
            }
        }
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for EventRouter {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("EventRouter").field("entries", &self.entries.len()).finish()
    }
}
