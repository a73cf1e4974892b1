//! In-memory keyboard device.

use crate::input::{
    device::{KeyListener, KeyboardDevice},
    keyboard::{KeyCode, KeyEvent, KeyInput},
};

use ::bitvec::prelude::*;
use ::std::collections::VecDeque;
use ::tracing::trace;

/// Number of pending transitions after which the earliest presses are dropped.
/// Releases are kept in preference, so an overflowing queue never leaves a
/// captured key held.
pub const INPUT_QUEUE_CAPACITY: usize = 128;

/// A keyboard device which is fed transitions by the host and releases them to
/// its listener on [`capture`].
///
/// # Key Pressed Tracking
///
/// A windowing layer typically learns about key transitions whenever its
/// message pump runs, which rarely lines up with the fixed simulation tick.
/// The [`Keyboard`] buffers those transitions in the order they arrive and
/// only applies them when the simulation calls [`capture`]. Between two
/// captures the answer of [`is_key_down`] is stable, so every consumer within a
/// tick sees the same snapshot.
///
/// Pressing a key which is already held (auto-repeat) does not produce a second
/// notification, and releasing a key which is not held is dropped.
///
/// # Example
///
/// ```
/// use ::helm_input::input::{
///     device::KeyboardDevice,
///     keyboard::{KeyCode, Keyboard},
/// };
///
/// let mut keyboard = Keyboard::new();
/// keyboard.queue_press(KeyCode::U);
///
/// // Nothing is visible until the next capture.
/// assert!(!keyboard.is_key_down(KeyCode::U));
///
/// keyboard.capture();
/// assert!(keyboard.is_key_down(KeyCode::U));
/// ```
///
/// [`capture`]: KeyboardDevice::capture
/// [`is_key_down`]: KeyboardDevice::is_key_down
pub struct Keyboard {
    /// Bitfield which tracks the press state for the keyboard keys.
    pressed: BitArr!(for 256, in usize, Lsb0),
    /// Transitions received since the last capture.
    pending: VecDeque<KeyInput>,
    /// Listener invoked for every transition applied during capture.
    listener: Option<Box<dyn KeyListener>>,
}

impl Default for Keyboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Keyboard {
    /// Constructs a new keyboard with no keys held.
    pub fn new() -> Self {
        Self {
            pressed: bitarr![usize, Lsb0; 0; 256],
            pending: VecDeque::with_capacity(INPUT_QUEUE_CAPACITY),
            listener: None,
        }
    }

    /// Queue a key press. It takes effect at the next capture.
    pub fn queue_press(&mut self, evt: impl Into<KeyEvent>) {
        self.enqueue(KeyInput::Pressed(evt.into()));
    }

    /// Queue a key release. It takes effect at the next capture.
    pub fn queue_release(&mut self, evt: impl Into<KeyEvent>) {
        self.enqueue(KeyInput::Released(evt.into()));
    }

    /// Number of transitions waiting for the next capture.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Reset all keyboard state, discarding any pending transitions.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.pressed = BitArray::ZERO;
    }

    fn enqueue(&mut self, input: KeyInput) {
        // Trim queue to avoid growing continuously. The oldest press goes
        // first; a release is only dropped when nothing else is queued.
        while self.pending.len() >= INPUT_QUEUE_CAPACITY {
            let victim = self
                .pending
                .iter()
                .position(|queued| matches!(queued, KeyInput::Pressed(_)))
                .unwrap_or(0);
            if let Some(dropped) = self.pending.remove(victim) {
                trace!(key = %dropped.event().key, "Trimming keyboard queue");
            }
        }
        self.pending.push_back(input);
    }

    /// Applies a single transition to the level view. Returns `false` if the
    /// transition did not change anything and should not be dispatched.
    fn apply(&mut self, input: &KeyInput) -> bool {
        let index = input.event().key.value() as usize;
        let was_down = self.pressed[index];
        match input {
            KeyInput::Pressed(_) if was_down => false,
            KeyInput::Released(_) if !was_down => false,
            KeyInput::Pressed(_) => {
                self.pressed.set(index, true);
                true
            }
            KeyInput::Released(_) => {
                self.pressed.set(index, false);
                true
            }
        }
    }
}

impl KeyboardDevice for Keyboard {
    fn capture(&mut self) {
        while let Some(input) = self.pending.pop_front() {
            if !self.apply(&input) {
                trace!(key = %input.event().key, "Ignoring redundant key transition");
                continue;
            }

            if let Some(listener) = self.listener.as_mut() {
                match &input {
                    KeyInput::Pressed(evt) => listener.key_pressed(evt),
                    KeyInput::Released(evt) => listener.key_released(evt),
                };
            }
        }
    }

    fn is_key_down(&self, key: KeyCode) -> bool {
        self.pressed[key.value() as usize]
    }

    fn set_event_callback(&mut self, listener: Box<dyn KeyListener>) {
        self.listener = Some(listener);
    }

    fn clear_event_callback(&mut self) {
        self.listener = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ::pretty_assertions::assert_eq;
    use ::std::{cell::RefCell, ops::Not, rc::Rc};
    use ::strum::IntoEnumIterator;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<(bool, KeyEvent)>>>);

    impl KeyListener for Recorder {
        fn key_pressed(&mut self, evt: &KeyEvent) -> bool {
            self.0.borrow_mut().push((true, *evt));
            true
        }

        fn key_released(&mut self, evt: &KeyEvent) -> bool {
            self.0.borrow_mut().push((false, *evt));
            true
        }
    }

    /// A basic smoke test for key pressed events.
    #[test]
    fn test_key_pressed_basic() {
        let mut kbd = Keyboard::new();

        assert!(!kbd.is_key_down(KeyCode::Up));
        kbd.queue_press(KeyCode::Up);
        assert!(!kbd.is_key_down(KeyCode::Up), "State changes only on capture");
        kbd.capture();
        assert!(kbd.is_key_down(KeyCode::Up));
    }

    /// Tests correct handling of a series of key down and key up events.
    #[test]
    fn test_key_pressed() {
        let mut kbd = Keyboard::new();

        for key_code in KeyCode::iter() {
            assert!(!kbd.is_key_down(key_code));
        }

        kbd.queue_press(KeyCode::A);
        kbd.queue_press(KeyCode::Left);
        kbd.queue_press(KeyCode::Space);
        kbd.queue_press(KeyCode::Left);
        kbd.queue_release(KeyCode::A);
        kbd.queue_press(KeyCode::Left);
        kbd.capture();

        let expected_pressed = [KeyCode::Space, KeyCode::Left];
        for key_code in expected_pressed {
            assert!(kbd.is_key_down(key_code));
        }
        for key_code in KeyCode::iter().filter(|key_code| expected_pressed.contains(key_code).not())
        {
            assert!(!kbd.is_key_down(key_code));
        }
    }

    /// Repeated presses of a held key and releases of an idle key must not
    /// reach the listener.
    #[test]
    fn test_listener_sees_transitions_only() {
        let recorder = Recorder::default();
        let mut kbd = Keyboard::new();
        kbd.set_event_callback(Box::new(recorder.clone()));

        kbd.queue_release(KeyCode::B);
        kbd.queue_press(KeyEvent::with_text(KeyCode::B, 'b'));
        kbd.queue_press(KeyCode::B);
        kbd.queue_release(KeyCode::B);
        kbd.capture();

        assert_eq!(
            *recorder.0.borrow(),
            vec![
                (true, KeyEvent::with_text(KeyCode::B, 'b')),
                (false, KeyEvent::new(KeyCode::B)),
            ]
        );
    }

    #[test]
    fn test_clear_event_callback() {
        let recorder = Recorder::default();
        let mut kbd = Keyboard::new();
        kbd.set_event_callback(Box::new(recorder.clone()));
        kbd.clear_event_callback();

        kbd.queue_press(KeyCode::C);
        kbd.capture();

        assert!(kbd.is_key_down(KeyCode::C));
        assert!(recorder.0.borrow().is_empty());
    }

    /// Tests that the pending queue is trimmed to avoid continuous growth if
    /// the device is never captured.
    #[test]
    fn test_queue_trim() {
        let mut kbd = Keyboard::new();
        for _ in 0..(INPUT_QUEUE_CAPACITY * 2) {
            kbd.queue_press(KeyCode::D);
        }
        assert_eq!(kbd.pending(), INPUT_QUEUE_CAPACITY);
    }

    /// A release queued behind a flood of presses survives trimming.
    #[test]
    fn test_queue_trim_keeps_releases() {
        let mut kbd = Keyboard::new();
        kbd.queue_press(KeyCode::A);
        kbd.capture();

        kbd.queue_release(KeyCode::A);
        for _ in 0..(INPUT_QUEUE_CAPACITY * 2) {
            kbd.queue_press(KeyCode::D);
        }
        assert_eq!(kbd.pending(), INPUT_QUEUE_CAPACITY);

        kbd.capture();
        assert!(!kbd.is_key_down(KeyCode::A), "A must not be stuck down");
        assert!(kbd.is_key_down(KeyCode::D));
    }

    #[test]
    fn test_reset() {
        let mut kbd = Keyboard::new();
        kbd.queue_press(KeyCode::E);
        kbd.capture();
        kbd.queue_press(KeyCode::F);
        kbd.reset();

        assert_eq!(kbd.pending(), 0);
        assert!(!kbd.is_key_down(KeyCode::E));
    }
}
