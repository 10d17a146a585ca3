use log::trace;

use crate::broker::Broker;
use crate::event::Event;
use crate::idgen::{IdGen, InvalidCheckpoint};
use crate::order::Order;

/// Attach tracing to a [Component]
#[derive(Debug, Clone)]
pub struct WithTracing<Component> {
    pub inner: Component,
}

impl<Component> WithTracing<Component> {
    pub fn wrap(inner: Component) -> Self {
        Self { inner }
    }
}

impl<B: Broker> Broker for WithTracing<B> {
    fn send(&mut self, event: Event) {
        trace!("Broker::send({})", event);
        self.inner.send(event)
    }
}

impl<G: IdGen> IdGen for WithTracing<G> {
    fn set_id(&mut self, order: &mut Order) {
        self.inner.set_id(order);
        trace!("IdGen::set_id(party: {}, side: {}) -> {}", order.party_id, order.side, order.id);
    }

    fn checkpoint(&self) -> Vec<u8> {
        self.inner.checkpoint()
    }

    fn restore(&mut self, checkpoint: &[u8]) -> Result<(), InvalidCheckpoint> {
        let res = self.inner.restore(checkpoint);
        trace!("IdGen::restore({}) -> {:?}", hex::encode(checkpoint), res);
        res
    }
}
