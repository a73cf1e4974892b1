//! The event bus which carries raw device notifications and composite action
//! events to the rest of the simulator.
//!
//! The set of event kinds is fixed at compile time. Configured action names
//! travel inside [`Event::Action`] rather than being registered globally.

use crate::input::{
    keyboard::KeyEvent,
    mouse::{MouseButton, MouseEvent},
};

use ::parking_lot::Mutex;
use ::std::{
    cell::Cell,
    collections::{HashSet, VecDeque},
    rc::Rc,
    sync::Arc,
};
use ::strum::{Display, EnumIter, IntoStaticStr};
use ::tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// The statically declared kinds of event published by the input layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    /// Fired once per key press.
    KeyPressed,
    /// Fired when a key is released.
    KeyReleased,
    /// Fired when the mouse is moved.
    MouseMoved,
    /// Fired when a mouse button is pressed.
    MousePressed,
    /// Fired when a mouse button is released.
    MouseReleased,
    /// A configured composite key binding is held.
    Action,
}

/// An event published on the [`EventBus`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    KeyPressed(KeyEvent),
    KeyReleased(KeyEvent),
    MouseMoved(MouseEvent),
    MousePressed(MouseEvent, MouseButton),
    MouseReleased(MouseEvent, MouseButton),
    /// A composite action, identified by its configured name. Carries no
    /// payload.
    Action(Arc<str>),
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::KeyPressed(_) => EventKind::KeyPressed,
            Self::KeyReleased(_) => EventKind::KeyReleased,
            Self::MouseMoved(_) => EventKind::MouseMoved,
            Self::MousePressed(..) => EventKind::MousePressed,
            Self::MouseReleased(..) => EventKind::MouseReleased,
            Self::Action(_) => EventKind::Action,
        }
    }

    /// The name subscribers know this event by: the action name for
    /// [`Event::Action`], otherwise the name of its [`EventKind`] (for example
    /// `KEY_PRESSED`).
    pub fn name(&self) -> &str {
        match self {
            Self::Action(name) => &**name,
            other => other.kind().into(),
        }
    }
}

/// Identifies a subscription so it can later be removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Returns `false` once the handler wants to be removed.
type Handler = Box<dyn FnMut(&Event) -> bool>;

#[derive(Default)]
struct BusInner {
    next_id: Cell<u64>,
    /// Registered handlers. Temporarily emptied while a dispatch is running,
    /// any handler registered during that window lands here and is merged
    /// back afterwards.
    handlers: Mutex<Vec<(SubscriptionId, Handler)>>,
    /// Ids removed while their handler was checked out for dispatch.
    removed: Mutex<HashSet<SubscriptionId>>,
    channels: Mutex<Vec<UnboundedSender<Event>>>,
    queue: Mutex<VecDeque<Event>>,
    dispatching: Cell<bool>,
}

/// A cheaply cloneable handle to a single-threaded, publish/subscribe event
/// bus.
///
/// Publishing is fire-and-forget. Events are delivered to every subscriber in
/// the order they were published; an event published from inside a handler is
/// queued and delivered once the current event has reached every subscriber,
/// so delivery is never recursive.
///
/// ```
/// use ::helm_input::event::{Event, EventBus};
/// use ::std::{cell::RefCell, rc::Rc};
///
/// let bus = EventBus::new();
/// let seen = Rc::new(RefCell::new(Vec::new()));
///
/// let sink = seen.clone();
/// bus.subscribe(move |evt| sink.borrow_mut().push(evt.name().to_owned()));
///
/// bus.publish(Event::Action("PORT_THRUST_UP".into()));
/// assert_eq!(*seen.borrow(), vec!["PORT_THRUST_UP".to_owned()]);
/// ```
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<BusInner>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler which is invoked for every published event.
    pub fn subscribe(&self, mut handler: impl FnMut(&Event) + 'static) -> SubscriptionId {
        self.subscribe_while(move |evt| {
            handler(evt);
            true
        })
    }

    /// Register a handler which stays subscribed for as long as it returns
    /// `true`. The event it returns `false` for is the last one it sees.
    pub fn subscribe_while(&self, handler: impl FnMut(&Event) -> bool + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner.handlers.lock().push((id, Box::new(handler)));
        id
    }

    /// Register a handler which is only invoked for events of the given kind.
    pub fn subscribe_to(
        &self,
        kind: EventKind,
        mut handler: impl FnMut(&Event) + 'static,
    ) -> SubscriptionId {
        self.subscribe(move |evt| {
            if evt.kind() == kind {
                handler(evt)
            }
        })
    }

    /// Remove a handler. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut handlers = self.inner.handlers.lock();
        let before = handlers.len();
        handlers.retain(|(handler_id, _)| *handler_id != id);
        if handlers.len() == before && self.inner.dispatching.get() {
            self.inner.removed.lock().insert(id);
        }
    }

    /// Open a channel which receives a copy of every event published from now
    /// on. Dropping the receiver closes the subscription.
    pub fn channel(&self) -> UnboundedReceiver<Event> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner.channels.lock().push(tx);
        rx
    }

    /// Number of handlers and open channels.
    pub fn subscriber_count(&self) -> usize {
        let channels = self.inner.channels.lock();
        self.inner.handlers.lock().len()
            + channels.iter().filter(|tx| !tx.is_closed()).count()
    }

    /// Publish an event to all subscribers.
    pub fn publish(&self, event: Event) {
        self.inner.queue.lock().push_back(event);
        if self.inner.dispatching.replace(true) {
            // Delivered by the dispatch loop further up the stack.
            return;
        }

        loop {
            let next = self.inner.queue.lock().pop_front();
            match next {
                Some(event) => self.dispatch(&event),
                None => break,
            }
        }
        self.inner.dispatching.set(false);
    }

    fn dispatch(&self, event: &Event) {
        let mut active = ::std::mem::take(&mut *self.inner.handlers.lock());
        for (id, handler) in active.iter_mut() {
            if self.inner.removed.lock().contains(id) {
                continue;
            }
            if !handler(event) {
                self.inner.removed.lock().insert(*id);
            }
        }

        {
            let mut removed = self.inner.removed.lock();
            active.retain(|(id, _)| !removed.contains(id));
            removed.clear();
        }

        let mut handlers = self.inner.handlers.lock();
        let added = ::std::mem::replace(&mut *handlers, active);
        handlers.extend(added);
        drop(handlers);

        self.inner
            .channels
            .lock()
            .retain(|tx| tx.send(event.clone()).is_ok());
    }
}
