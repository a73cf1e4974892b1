//! Mouse state snapshots and raw mouse notifications.

use ::strum::{Display, EnumIter};

/// A mouse button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[repr(u8)]
pub enum MouseButton {
    Left = 0,
    Right,
    Middle,
    Button3,
    Button4,
    Button5,
    Button6,
    Button7,
}

impl MouseButton {
    /// The bit which represents this button in [`MouseState::buttons`].
    pub const fn mask(self) -> u8 {
        1 << self as u8
    }
}

/// A single mouse axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Axis {
    /// Absolute position, clamped to the clipping area where one applies.
    pub abs: i32,
    /// Movement since the previous capture.
    pub rel: i32,
}

/// The state of the mouse as of the last capture.
///
/// `width` and `height` describe the clipping area for the absolute X and Y
/// axes and are kept in sync with the display surface by the input system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MouseState {
    pub x: Axis,
    pub y: Axis,
    /// The scroll wheel. Never clamped.
    pub z: Axis,
    /// Bitmask of held buttons, see [`MouseButton::mask`].
    pub buttons: u8,
    pub width: i32,
    pub height: i32,
}

impl Default for MouseState {
    fn default() -> Self {
        Self {
            x: Axis::default(),
            y: Axis::default(),
            z: Axis::default(),
            buttons: 0,
            width: 50,
            height: 50,
        }
    }
}

impl MouseState {
    /// Returns `true` if the given button is held.
    pub const fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons & button.mask() != 0
    }

    /// Applies a relative movement, clamping the absolute X and Y positions to
    /// the clipping area. Accumulation saturates at the bounds of `i32`.
    pub(crate) fn apply_motion(&mut self, dx: i32, dy: i32, dz: i32) {
        self.x.rel = self.x.rel.saturating_add(dx);
        self.y.rel = self.y.rel.saturating_add(dy);
        self.z.rel = self.z.rel.saturating_add(dz);
        self.x.abs = self.x.abs.saturating_add(dx).clamp(0, self.width.max(0));
        self.y.abs = self.y.abs.saturating_add(dy).clamp(0, self.height.max(0));
        self.z.abs = self.z.abs.saturating_add(dz);
    }

    pub(crate) fn clear_relative(&mut self) {
        self.x.rel = 0;
        self.y.rel = 0;
        self.z.rel = 0;
    }
}

/// The payload carried by raw mouse notifications: a snapshot of the mouse
/// state right after the notification was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MouseEvent {
    pub state: MouseState,
}

impl MouseEvent {
    pub const fn new(state: MouseState) -> Self {
        Self { state }
    }
}
