//! Named boolean flags derived from raw key pressed and released notifications.

use crate::{
    event::{Event, EventBus, SubscriptionId},
    input::{
        device::KeyListener,
        keyboard::{KeyCode, KeyEvent},
    },
};

use ::parking_lot::RwLock;
use ::std::{
    collections::HashMap,
    rc::{Rc, Weak},
};
use ::tracing::{trace, warn};

/// One entry in the list of keys a [`KeyStateObserver`] watches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ObservedKey {
    /// A key tracked on its own. The attribute is named after the key, see
    /// [`KeyCode::attribute_name`].
    Single(KeyCode),
    /// Several keys which share one attribute. The attribute is set while at
    /// least one of the keys is held.
    Group { name: String, keys: Vec<KeyCode> },
}

impl From<KeyCode> for ObservedKey {
    fn from(key: KeyCode) -> Self {
        Self::Single(key)
    }
}

impl<S: Into<String>> From<(S, Vec<KeyCode>)> for ObservedKey {
    fn from((name, keys): (S, Vec<KeyCode>)) -> Self {
        Self::Group {
            name: name.into(),
            keys,
        }
    }
}

impl<S: Into<String>, const N: usize> From<(S, [KeyCode; N])> for ObservedKey {
    fn from((name, keys): (S, [KeyCode; N])) -> Self {
        Self::Group {
            name: name.into(),
            keys: keys.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Flag {
    Simple(bool),
    /// The constituent keys currently held. Holding the keys rather than a bare
    /// counter keeps the count exact under repeated or unmatched notifications.
    Counted(Vec<KeyCode>),
}

impl Flag {
    fn value(&self) -> bool {
        match self {
            Self::Simple(value) => *value,
            Self::Counted(held) => !held.is_empty(),
        }
    }
}

#[derive(Debug, Default)]
struct ObserverState {
    /// Attribute names in declaration order, parallel to `flags`.
    names: Vec<String>,
    flags: Vec<Flag>,
    by_name: HashMap<String, usize>,
    by_key: HashMap<KeyCode, usize>,
}

impl ObserverState {
    fn declare(&mut self, name: String, flag: Flag) -> usize {
        match self.by_name.get(&name) {
            Some(&index) => {
                warn!(attribute = %name, "Attribute declared more than once, redefining");
                self.flags[index] = flag;
                index
            }
            None => {
                let index = self.flags.len();
                self.by_name.insert(name.clone(), index);
                self.names.push(name);
                self.flags.push(flag);
                index
            }
        }
    }

    fn watch(&mut self, key: KeyCode, index: usize) {
        if let Some(previous) = self.by_key.insert(key, index) {
            if previous != index {
                warn!(
                    %key,
                    from = %self.names[previous],
                    to = %self.names[index],
                    "Key registered for more than one attribute, last registration wins"
                );
            }
        }
    }

    fn pressed(&mut self, key: KeyCode) {
        let Some(&index) = self.by_key.get(&key) else {
            return;
        };

        match &mut self.flags[index] {
            Flag::Simple(value) => *value = true,
            Flag::Counted(held) => {
                if !held.contains(&key) {
                    held.push(key);
                }
            }
        }
    }

    fn released(&mut self, key: KeyCode) {
        let Some(&index) = self.by_key.get(&key) else {
            return;
        };

        match &mut self.flags[index] {
            Flag::Simple(value) => *value = false,
            Flag::Counted(held) => match held.iter().position(|&k| k == key) {
                Some(pos) => {
                    held.swap_remove(pos);
                }
                None => trace!(%key, "Release without matching press, count unchanged"),
            },
        }
    }
}

/// Maintains named boolean attributes from a stream of raw key pressed and
/// released notifications.
///
/// Each watched key either owns an attribute of its own, or contributes to an
/// attribute shared with other keys. A shared attribute is `true` while at
/// least one of its keys is held, so releasing one of two held keys leaves it
/// set. The live count of a shared attribute never drops below zero: a release
/// for a key which is not held is ignored.
///
/// All attributes are declared up front and start as `false`. The observer
/// updates synchronously within the notification, so its state is current as
/// of the most recent device capture.
///
/// If a key appears in more than one entry, the last entry wins.
///
/// [`KeyStateObserver`] is a cheap handle; clones share the same attributes.
///
/// # Example
///
/// ```
/// use ::helm_input::input::{keyboard::KeyCode, observer::KeyStateObserver};
///
/// let observer = KeyStateObserver::new([
///     KeyCode::LControl.into(),
///     ("shift", [KeyCode::LShift, KeyCode::RShift]).into(),
/// ]);
///
/// observer.key_pressed(KeyCode::LShift);
/// observer.key_pressed(KeyCode::RShift);
/// observer.key_released(KeyCode::LShift);
/// assert_eq!(observer.get("shift"), Some(true));
/// assert_eq!(observer.get("lcontrol_key"), Some(false));
/// ```
#[derive(Clone, Debug)]
pub struct KeyStateObserver {
    state: Rc<RwLock<ObserverState>>,
}

impl KeyStateObserver {
    /// Declares the attributes for the given keys, all initially `false`.
    pub fn new(keys: impl IntoIterator<Item = ObservedKey>) -> Self {
        let mut state = ObserverState::default();
        for entry in keys {
            match entry {
                ObservedKey::Single(key) => {
                    let index = state.declare(key.attribute_name(), Flag::Simple(false));
                    state.watch(key, index);
                }
                ObservedKey::Group { name, keys } => {
                    let index = state.declare(name, Flag::Counted(Vec::new()));
                    for key in keys {
                        state.watch(key, index);
                    }
                }
            }
        }

        Self {
            state: Rc::new(RwLock::new(state)),
        }
    }

    /// Update attributes for a pressed key. Keys which are not watched are
    /// ignored.
    pub fn key_pressed(&self, key: KeyCode) {
        self.state.write().pressed(key);
    }

    /// Update attributes for a released key. Keys which are not watched are
    /// ignored.
    pub fn key_released(&self, key: KeyCode) {
        self.state.write().released(key);
    }

    /// The value of an attribute, or `None` if no such attribute was declared.
    pub fn get(&self, name: &str) -> Option<bool> {
        let state = self.state.read();
        state.by_name.get(name).map(|&i| state.flags[i].value())
    }

    /// The value of an attribute, treating undeclared attributes as `false`.
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).unwrap_or(false)
    }

    /// For a shared attribute, the number of its keys currently held.
    pub fn live_count(&self, name: &str) -> Option<usize> {
        let state = self.state.read();
        match state.by_name.get(name).map(|&i| &state.flags[i]) {
            Some(Flag::Counted(held)) => Some(held.len()),
            _ => None,
        }
    }

    /// All attributes and their values, in declaration order.
    pub fn attributes(&self) -> Vec<(String, bool)> {
        let state = self.state.read();
        state
            .names
            .iter()
            .cloned()
            .zip(state.flags.iter().map(Flag::value))
            .collect()
    }

    /// Subscribe to raw key notifications on `bus`.
    ///
    /// The subscription only holds a weak reference. Once every handle to the
    /// observer is dropped, it unsubscribes itself on the next event.
    pub fn attach(&self, bus: &EventBus) -> SubscriptionId {
        let state: Weak<RwLock<ObserverState>> = Rc::downgrade(&self.state);
        bus.subscribe_while(move |evt| {
            let Some(state) = state.upgrade() else {
                trace!("Key state observer dropped, unsubscribing");
                return false;
            };
            match evt {
                Event::KeyPressed(key_evt) => state.write().pressed(key_evt.key),
                Event::KeyReleased(key_evt) => state.write().released(key_evt.key),
                _ => (),
            }
            true
        })
    }
}

impl KeyListener for KeyStateObserver {
    fn key_pressed(&mut self, evt: &KeyEvent) -> bool {
        KeyStateObserver::key_pressed(self, evt.key);
        true
    }

    fn key_released(&mut self, evt: &KeyEvent) -> bool {
        KeyStateObserver::key_released(self, evt.key);
        true
    }
}
