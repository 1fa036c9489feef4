//! Shared fixtures for integration tests.

use std::sync::atomic::AtomicU64;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use parking_lot::Mutex;
use rv_engine::NativeBridge;
use rv_engine::NativeNodeId;
use rv_engine::Result;

/// Bridge fake with per-command counters and sequential identifier
/// allocation, mirroring what the native driver guarantees: identifiers are
/// never reused.
#[derive(Default)]
pub struct CountingBridge {
    next_id: AtomicU64,
    created: AtomicUsize,
    dropped: AtomicUsize,
}

impl CountingBridge {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn created_count(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn dropped_count(&self) -> usize {
        self.dropped.load(Ordering::SeqCst)
    }
}

impl NativeBridge for CountingBridge {
    fn create_node(
        &self,
        _initial_value: f64,
    ) -> Result<NativeNodeId> {
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(NativeNodeId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1))
    }

    fn drop_node(
        &self,
        _id: NativeNodeId,
    ) {
        self.dropped.fetch_add(1, Ordering::SeqCst);
    }

    fn start_listening(
        &self,
        _id: NativeNodeId,
    ) {
    }

    fn stop_listening(
        &self,
        _id: NativeNodeId,
    ) {
    }

    fn set_node_value(
        &self,
        _id: NativeNodeId,
        _value: f64,
    ) {
    }

    fn set_node_offset(
        &self,
        _id: NativeNodeId,
        _offset: f64,
    ) {
    }

    fn flatten_node_offset(
        &self,
        _id: NativeNodeId,
    ) {
    }

    fn extract_node_offset(
        &self,
        _id: NativeNodeId,
    ) {
    }
}

/// Listener sink shared between the test body and its callbacks.
pub fn value_sink() -> (Arc<Mutex<Vec<f64>>>, impl Fn(f64) + Send + Sync + 'static) {
    let seen: Arc<Mutex<Vec<f64>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    (seen, move |value| sink.lock().push(value))
}
