//! Physical key identifiers.

use ::serde::{Deserialize, Serialize};
use ::strum::{Display, EnumCount, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// A physical key on the keyboard, independent of layout or text input.
///
/// The discriminant of each variant is stable and is used as an index into the
/// keyboard's pressed-state bitfield via [`KeyCode::value`].
///
/// Key codes are parsed from (and serialized to) their variant name, so a
/// binding configuration refers to keys as `U`, `LShift`, `Escape` and so on.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[repr(u8)]
pub enum KeyCode {
    Escape = 0x01,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    Digit0,
    Minus,
    Equals,
    Back,
    Tab,
    Q,
    W,
    E,
    R,
    T,
    Y,
    U,
    I,
    O,
    P,
    LBracket,
    RBracket,
    Return,
    LControl,
    A,
    S,
    D,
    F,
    G,
    H,
    J,
    K,
    L,
    Semicolon,
    Apostrophe,
    Grave,
    LShift,
    Backslash,
    Z,
    X,
    C,
    V,
    B,
    N,
    M,
    Comma,
    Period,
    Slash,
    RShift,
    Multiply,
    LMenu,
    Space,
    Capital,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    Numlock,
    Scroll,
    Numpad7,
    Numpad8,
    Numpad9,
    Subtract,
    Numpad4,
    Numpad5,
    Numpad6,
    Add,
    Numpad1,
    Numpad2,
    Numpad3,
    Numpad0,
    Decimal,
    F11 = 0x57,
    F12,
    NumpadEnter = 0x9C,
    RControl,
    Divide = 0xB5,
    RMenu = 0xB8,
    Pause = 0xC5,
    Home = 0xC7,
    Up,
    PageUp,
    Left = 0xCB,
    Right = 0xCD,
    End = 0xCF,
    Down,
    PageDown,
    Insert,
    Delete,
}

impl KeyCode {
    /// The stable numeric value of the key code.
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// The variant name of the key, e.g. `"LShift"`.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// The name of the boolean attribute a [`KeyStateObserver`] derives for
    /// this key when it is tracked on its own: the lower-cased key name with a
    /// `_key` suffix, e.g. `LShift` becomes `lshift_key`.
    ///
    /// [`KeyStateObserver`]: crate::input::observer::KeyStateObserver
    pub fn attribute_name(self) -> String {
        format!("{}_key", self.name().to_lowercase())
    }
}

impl TryFrom<u8> for KeyCode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::iter().find(|k| k.value() == value).ok_or(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ::pretty_assertions::assert_eq;
    use ::std::{collections::HashSet, str::FromStr};

    #[test]
    fn test_values_are_unique() {
        let values: HashSet<u8> = KeyCode::iter().map(KeyCode::value).collect();
        assert_eq!(values.len(), KeyCode::COUNT);
    }

    #[test]
    fn test_value_round_trips_through_try_from() {
        assert_eq!(KeyCode::try_from(0x01), Ok(KeyCode::Escape));
        assert_eq!(KeyCode::try_from(0xC8), Ok(KeyCode::Up));
        assert_eq!(KeyCode::try_from(0x00), Err(0x00));
    }

    #[test]
    fn test_attribute_name() {
        assert_eq!(KeyCode::LShift.attribute_name(), "lshift_key");
        assert_eq!(KeyCode::A.attribute_name(), "a_key");
        assert_eq!(KeyCode::PageDown.attribute_name(), "pagedown_key");
    }

    #[test]
    fn test_parse_from_name() {
        assert_eq!(KeyCode::from_str("Escape"), Ok(KeyCode::Escape));
        assert!(KeyCode::from_str("NotAKey").is_err());
    }
}
