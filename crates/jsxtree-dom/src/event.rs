use core::fmt;
use std::rc::Rc;

use crate::NodeId;

/// An event delivered to listeners by [`crate::DomTree::dispatch_event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Lower-cased event name, e.g. `click`.
    pub event_type: String,
    /// The element the event was dispatched on.
    pub target: NodeId,
}

/// A callable attached to an element for one event type.
///
/// Cheap to clone: clones share the same callback.
#[derive(Clone)]
pub struct EventListener {
    callback: Rc<dyn Fn(&Event)>,
}

impl EventListener {
    /// Wrap a closure as a listener.
    pub fn new(callback: impl Fn(&Event) + 'static) -> Self {
        Self {
            callback: Rc::new(callback),
        }
    }

    /// Invoke the listener.
    pub fn call(&self, event: &Event) {
        (self.callback)(event);
    }

    /// Returns true if both listeners wrap the same callback.
    #[must_use]
    pub fn same_callback(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.callback, &other.callback)
    }
}

impl fmt::Debug for EventListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EventListener(..)")
    }
}
