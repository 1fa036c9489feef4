use std::sync::Arc;
use std::sync::Weak;

use parking_lot::Mutex;

use crate::RoutedNode;

/// Probe node that records every routed value it receives.
pub struct ProbeNode {
    received: Mutex<Vec<f64>>,
}

impl ProbeNode {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            received: Mutex::new(Vec::new()),
        })
    }

    pub fn received(&self) -> Vec<f64> {
        self.received.lock().clone()
    }
}

impl RoutedNode for ProbeNode {
    fn apply_native_update(
        &self,
        value: f64,
    ) {
        self.received.lock().push(value);
    }
}

/// Coerces a probe into the router's registration type.
pub fn probe_ref(node: &Arc<ProbeNode>) -> Weak<dyn RoutedNode> {
    let weak = Arc::downgrade(node);
    weak
}
