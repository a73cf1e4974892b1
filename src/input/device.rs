//! Interfaces between the input layer and the physical input-device driver.
//!
//! A device keeps two views of the hardware: a level view (which keys and
//! buttons are held right now) and a stream of buffered transitions. Both are
//! advanced only by [`KeyboardDevice::capture`] / [`MouseDevice::capture`],
//! which dequeue pending transitions, update the level view and invoke the
//! registered listener for each transition in arrival order.

use crate::input::{
    keyboard::{KeyCode, KeyEvent},
    mouse::{MouseButton, MouseEvent, MouseState},
};

/// Receives buffered keyboard notifications during [`KeyboardDevice::capture`].
///
/// Each method returns whether the notification was handled. Devices which
/// support chaining listeners continue to the next listener either way.
pub trait KeyListener {
    fn key_pressed(&mut self, evt: &KeyEvent) -> bool;
    fn key_released(&mut self, evt: &KeyEvent) -> bool;
}

/// Receives buffered mouse notifications during [`MouseDevice::capture`].
pub trait MouseListener {
    fn mouse_moved(&mut self, evt: &MouseEvent) -> bool;
    fn mouse_pressed(&mut self, evt: &MouseEvent, button: MouseButton) -> bool;
    fn mouse_released(&mut self, evt: &MouseEvent, button: MouseButton) -> bool;
}

/// A keyboard as supplied by the device driver.
pub trait KeyboardDevice {
    /// Dequeue and dispatch all pending notifications, bringing the level view
    /// up to date.
    fn capture(&mut self);

    /// Whether `key` was held as of the last [`capture`](Self::capture).
    fn is_key_down(&self, key: KeyCode) -> bool;

    /// Register the exclusive listener for buffered notifications, replacing
    /// any previously registered listener.
    fn set_event_callback(&mut self, listener: Box<dyn KeyListener>);

    /// Remove the registered listener, if any.
    fn clear_event_callback(&mut self);
}

/// A mouse as supplied by the device driver.
pub trait MouseDevice {
    /// Dequeue and dispatch all pending notifications.
    fn capture(&mut self);

    /// The mouse state as of the last [`capture`](Self::capture).
    fn mouse_state(&self) -> &MouseState;

    /// Mutable access to the mouse state, used to keep the clipping area in
    /// sync with the display surface.
    fn mouse_state_mut(&mut self) -> &mut MouseState;

    /// Register the exclusive listener for buffered notifications, replacing
    /// any previously registered listener.
    fn set_event_callback(&mut self, listener: Box<dyn MouseListener>);

    /// Remove the registered listener, if any.
    fn clear_event_callback(&mut self);
}
