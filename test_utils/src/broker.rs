use std::sync::Arc;

use parking_lot::Mutex;

use liquidity_core::broker::Broker;
use liquidity_core::event::Event;
use liquidity_core::provision::LiquidityProvision;

/// Keeps every event it receives. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingBroker {
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingBroker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    pub fn provisions(&self) -> Vec<LiquidityProvision> {
        self.events.lock().iter().map(|e| e.provision().clone()).collect()
    }

    pub fn last_provision(&self) -> Option<LiquidityProvision> {
        self.events.lock().last().map(|e| e.provision().clone())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn clear(&self) {
        self.events.lock().clear()
    }
}

impl Broker for RecordingBroker {
    fn send(&mut self, event: Event) {
        self.events.lock().push(event)
    }
}
