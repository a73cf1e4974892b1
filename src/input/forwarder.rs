//! Bridges raw device notifications onto the event bus.

use crate::{
    event::{Event, EventBus},
    input::{
        device::{KeyListener, KeyboardDevice, MouseDevice, MouseListener},
        keyboard::KeyEvent,
        mouse::{MouseButton, MouseEvent},
    },
};

/// Publishes every raw keyboard and mouse notification on the [`EventBus`]
/// with its payload unchanged.
///
/// Notifications arrive whenever a device is captured, so they are aligned to
/// capture time but are neither combined nor debounced. Every notification is
/// reported as handled.
#[derive(Clone)]
pub struct EventForwarder {
    bus: EventBus,
}

impl EventForwarder {
    /// Creates a forwarder and registers it as the event callback of both
    /// devices.
    pub fn new<M, K>(bus: EventBus, mouse: &mut M, keyboard: &mut K) -> Self
    where
        M: MouseDevice + ?Sized,
        K: KeyboardDevice + ?Sized,
    {
        let this = Self::detached(bus);
        mouse.set_event_callback(Box::new(this.clone()));
        keyboard.set_event_callback(Box::new(this.clone()));
        this
    }

    /// Creates a forwarder without registering it with any device.
    pub fn detached(bus: EventBus) -> Self {
        Self { bus }
    }
}

impl MouseListener for EventForwarder {
    fn mouse_moved(&mut self, evt: &MouseEvent) -> bool {
        self.bus.publish(Event::MouseMoved(*evt));
        true
    }

    fn mouse_pressed(&mut self, evt: &MouseEvent, button: MouseButton) -> bool {
        self.bus.publish(Event::MousePressed(*evt, button));
        true
    }

    fn mouse_released(&mut self, evt: &MouseEvent, button: MouseButton) -> bool {
        self.bus.publish(Event::MouseReleased(*evt, button));
        true
    }
}

impl KeyListener for EventForwarder {
    fn key_pressed(&mut self, evt: &KeyEvent) -> bool {
        self.bus.publish(Event::KeyPressed(*evt));
        true
    }

    fn key_released(&mut self, evt: &KeyEvent) -> bool {
        self.bus.publish(Event::KeyReleased(*evt));
        true
    }
}
