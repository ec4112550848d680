//! Outbound event queue
//!
//! Game logic records what happened during a frame (entities shown or hidden,
//! counters changed) and the host consumes it afterwards, either by draining
//! the queue directly or by dispatching to registered handlers.
//! Handlers return true to consume an event and stop forwarding.

/// Event handler trait
/// Returns true if event was consumed (stops forwarding)
/// Returns false to allow forwarding to other handlers
pub trait EventHandler<E> {
    /// Handle an event, return true if consumed
    fn on_event(&mut self, event: &E) -> bool;
}

/// A queued event together with the game time at which it was raised
#[derive(Debug, Clone, PartialEq)]
pub struct Stamped<E> {
    /// Game time in seconds
    pub timestamp: f32,
    /// The event payload
    pub event: E,
}

/// FIFO event queue with optional handler chain
pub struct EventQueue<E> {
    pending: Vec<Stamped<E>>,
    handlers: Vec<Box<dyn EventHandler<E>>>,
}

impl<E> EventQueue<E> {
    /// Create an empty queue with no handlers
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            handlers: Vec::new(),
        }
    }

    /// Register a handler; handlers are called in registration order
    pub fn register_handler(&mut self, handler: Box<dyn EventHandler<E>>) {
        self.handlers.push(handler);
    }

    /// Queue an event raised at `timestamp`
    pub fn send(&mut self, timestamp: f32, event: E) {
        self.pending.push(Stamped { timestamp, event });
    }

    /// Take every pending event, oldest first
    pub fn drain(&mut self) -> Vec<Stamped<E>> {
        std::mem::take(&mut self.pending)
    }

    /// Deliver pending events to the handler chain and clear the queue.
    ///
    /// Returns the number of events no handler consumed.
    pub fn dispatch(&mut self) -> usize {
        let pending = std::mem::take(&mut self.pending);
        let mut unconsumed = 0;
        for stamped in &pending {
            let consumed = self
                .handlers
                .iter_mut()
                .any(|handler| handler.on_event(&stamped.event));
            if !consumed {
                unconsumed += 1;
            }
        }
        unconsumed
    }

    /// Number of events waiting
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Iterate over pending events without consuming them
    pub fn iter(&self) -> impl Iterator<Item = &Stamped<E>> {
        self.pending.iter()
    }

    /// Drop all queued events (useful for state transitions)
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum TestEvent {
        Ping,
        Pong,
    }

    struct Recorder {
        seen: Rc<RefCell<Vec<TestEvent>>>,
        consume: bool,
    }

    impl EventHandler<TestEvent> for Recorder {
        fn on_event(&mut self, event: &TestEvent) -> bool {
            self.seen.borrow_mut().push(event.clone());
            self.consume
        }
    }

    #[test]
    fn test_drain_keeps_order() {
        let mut queue = EventQueue::new();
        queue.send(0.0, TestEvent::Ping);
        queue.send(0.5, TestEvent::Pong);

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].event, TestEvent::Ping);
        assert_eq!(drained[1].timestamp, 0.5);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_event_consumption() {
        let first = Rc::new(RefCell::new(Vec::new()));
        let second = Rc::new(RefCell::new(Vec::new()));

        let mut queue = EventQueue::new();
        queue.register_handler(Box::new(Recorder { seen: first.clone(), consume: true }));
        queue.register_handler(Box::new(Recorder { seen: second.clone(), consume: false }));

        queue.send(0.0, TestEvent::Ping);
        let unconsumed = queue.dispatch();

        assert_eq!(unconsumed, 0);
        assert_eq!(first.borrow().len(), 1);
        // First handler consumed the event, second never saw it
        assert!(second.borrow().is_empty());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_unconsumed_count() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut queue = EventQueue::new();
        queue.register_handler(Box::new(Recorder { seen: seen.clone(), consume: false }));

        queue.send(0.0, TestEvent::Ping);
        queue.send(0.0, TestEvent::Pong);
        assert_eq!(queue.dispatch(), 2);
        assert_eq!(*seen.borrow(), vec![TestEvent::Ping, TestEvent::Pong]);
    }
}
