use std::sync::atomic::AtomicU64;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use parking_lot::Mutex;

use crate::NativeBridge;
use crate::NativeNodeId;
use crate::Result;

/// Hand-written bridge fake with per-command counters and sequential
/// identifier allocation, for tests that assert call balances across whole
/// lifecycles rather than per-call expectations.
#[derive(Default)]
pub struct RecordingBridge {
    next_id: AtomicU64,
    created: AtomicUsize,
    dropped: AtomicUsize,
    started: AtomicUsize,
    stopped: AtomicUsize,
    value_commands: Mutex<Vec<(NativeNodeId, f64)>>,
}

impl RecordingBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn created_count(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn dropped_count(&self) -> usize {
        self.dropped.load(Ordering::SeqCst)
    }

    pub fn started_count(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn stopped_count(&self) -> usize {
        self.stopped.load(Ordering::SeqCst)
    }

    pub fn value_commands(&self) -> Vec<(NativeNodeId, f64)> {
        self.value_commands.lock().clone()
    }
}

impl NativeBridge for RecordingBridge {
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
        self.started.fetch_add(1, Ordering::SeqCst);
    }

    fn stop_listening(
        &self,
        _id: NativeNodeId,
    ) {
        self.stopped.fetch_add(1, Ordering::SeqCst);
    }

    fn set_node_value(
        &self,
        id: NativeNodeId,
        value: f64,
    ) {
        self.value_commands.lock().push((id, value));
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
