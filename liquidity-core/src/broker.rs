use crate::event::Event;

/// Fire-and-forget event bus. No acknowledgement, no backpressure.
pub trait Broker {
    fn send(&mut self, event: Event);
}

impl<B: Broker + ?Sized> Broker for Box<B> {
    fn send(&mut self, event: Event) {
        (**self).send(event)
    }
}
