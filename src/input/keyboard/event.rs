//! Raw keyboard notifications as delivered by a keyboard device.

use crate::input::keyboard::KeyCode;

/// The payload carried by a raw key pressed or key released notification.
///
/// The payload is forwarded unchanged onto the event bus, so consumers see
/// exactly what the device reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The physical key which changed state.
    pub key: KeyCode,
    /// The text the key produced under the active layout, if any. Always
    /// `None` for releases and for non-printing keys.
    pub text: Option<char>,
}

impl KeyEvent {
    /// A key event without any associated text.
    pub const fn new(key: KeyCode) -> Self {
        Self { key, text: None }
    }

    /// A key event which also produced a text character.
    pub const fn with_text(key: KeyCode, text: char) -> Self {
        Self {
            key,
            text: Some(text),
        }
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(key: KeyCode) -> Self {
        Self::new(key)
    }
}

/// A queued, not yet captured, keyboard transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum KeyInput {
    Pressed(KeyEvent),
    Released(KeyEvent),
}

impl KeyInput {
    pub(crate) const fn event(&self) -> &KeyEvent {
        match self {
            Self::Pressed(evt) | Self::Released(evt) => evt,
        }
    }
}
