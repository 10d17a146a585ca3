use log::info;

use liquidity_core::broker::Broker;
use liquidity_core::event::Event;

/// Publishes events to the log.
#[derive(Debug, Copy, Clone, Default)]
pub struct LogBroker {
    published: u64,
}

impl LogBroker {
    pub fn published(&self) -> u64 {
        self.published
    }
}

impl Broker for LogBroker {
    fn send(&mut self, event: Event) {
        self.published += 1;
        info!("#{} {}", self.published, event);
    }
}
