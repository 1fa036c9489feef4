use std::fmt::Debug;
use std::sync::Arc;

use crate::EventRouter;
use crate::NativeBridge;

/// Shared handles every value node needs to reach the native boundary.
///
/// The router is passed here explicitly instead of living in ambient global
/// state: its lifecycle (built at process start, never torn down) becomes a
/// visible dependency, and tests can hand every node an isolated instance.
#[derive(Clone)]
pub struct NodeContext {
    pub(crate) bridge: Arc<dyn NativeBridge>,
    pub(crate) router: Arc<EventRouter>,
}

impl NodeContext {
    pub fn new(
        bridge: Arc<dyn NativeBridge>,
        router: Arc<EventRouter>,
    ) -> Self {
        Self { bridge, router }
    }
}

impl Debug for NodeContext {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("NodeContext").field("router", &self.router).finish()
    }
}
