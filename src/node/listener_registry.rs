use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Handle returned by `add_listener`, used to remove the listener later.
///
/// Ids are unique for the whole lifetime of a node: the allocating counter
/// is never reset, even across detach/attach cycles that replace the node's
/// native identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

impl fmt::Display for ListenerId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Listener callback: one capability, accepts the observed value.
pub type ValueListener = Arc<dyn Fn(f64) + Send + Sync>;

/// Registry of listeners attached to a single value node.
///
/// Insertion order is irrelevant; dispatch works on a snapshot taken at
/// invocation time, so callers may mutate the registry from inside a
/// callback without corrupting iteration.
pub(crate) struct ListenerRegistry {
    next_id: u64,
    listeners: HashMap<ListenerId, ValueListener>,
}

impl ListenerRegistry {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 1,
            listeners: HashMap::new(),
        }
    }

    pub(crate) fn add(
        &mut self,
        listener: ValueListener,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(id, listener);
        id
    }

    /// Removes a listener. Unknown or already-removed ids are ignored.
    pub(crate) fn remove(
        &mut self,
        id: ListenerId,
    ) -> bool {
        self.listeners.remove(&id).is_some()
    }

    pub(crate) fn clear(&mut self) {
        self.listeners.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub(crate) fn contains(
        &self,
        id: ListenerId,
    ) -> bool {
        self.listeners.contains_key(&id)
    }

    /// Snapshot of the currently-registered listeners for single-pass
    /// dispatch outside the node lock.
    ///
    /// Ids are included so the dispatcher can re-check membership before
    /// each invocation: a listener removed by an earlier callback in the
    /// same pass must not fire.
    pub(crate) fn snapshot(&self) -> Vec<(ListenerId, ValueListener)> {
        self.listeners
            .iter()
            .map(|(id, listener)| (*id, listener.clone()))
            .collect()
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("next_id", &self.next_id)
            .field("len", &self.listeners.len())
            .finish()
    }
}
