//! In-memory mouse device.

use crate::input::{
    device::{MouseDevice, MouseListener},
    mouse::{MouseButton, MouseEvent, MouseState},
};

use ::std::collections::VecDeque;
use ::tracing::trace;

/// Number of pending transitions after which the earliest are dropped (FIFO).
pub const MOUSE_QUEUE_CAPACITY: usize = 256;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MouseInput {
    Moved { dx: i32, dy: i32, dz: i32 },
    Pressed(MouseButton),
    Released(MouseButton),
}

/// A mouse device which buffers host supplied motion and button transitions
/// until the next [`capture`](MouseDevice::capture).
///
/// Relative axis values describe the motion accumulated during the most recent
/// capture only.
pub struct Mouse {
    state: MouseState,
    pending: VecDeque<MouseInput>,
    listener: Option<Box<dyn MouseListener>>,
}

impl Default for Mouse {
    fn default() -> Self {
        Self::new()
    }
}

impl Mouse {
    pub fn new() -> Self {
        Self {
            state: MouseState::default(),
            pending: VecDeque::with_capacity(MOUSE_QUEUE_CAPACITY),
            listener: None,
        }
    }

    /// Queue a relative movement.
    pub fn queue_move(&mut self, dx: i32, dy: i32, dz: i32) {
        self.enqueue(MouseInput::Moved { dx, dy, dz });
    }

    /// Queue a button press.
    pub fn queue_press(&mut self, button: MouseButton) {
        self.enqueue(MouseInput::Pressed(button));
    }

    /// Queue a button release.
    pub fn queue_release(&mut self, button: MouseButton) {
        self.enqueue(MouseInput::Released(button));
    }

    /// Number of transitions waiting for the next capture.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Reset all mouse state except for the clipping area.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.state = MouseState {
            width: self.state.width,
            height: self.state.height,
            ..Default::default()
        };
    }

    fn enqueue(&mut self, input: MouseInput) {
        while self.pending.len() >= MOUSE_QUEUE_CAPACITY {
            let dropped = self.pending.pop_front();
            trace!(?dropped, "Trimming mouse queue");
        }
        self.pending.push_back(input);
    }
}

impl MouseDevice for Mouse {
    fn capture(&mut self) {
        self.state.clear_relative();

        while let Some(input) = self.pending.pop_front() {
            match input {
                MouseInput::Moved { dx, dy, dz } => {
                    self.state.apply_motion(dx, dy, dz);
                    if let Some(listener) = self.listener.as_mut() {
                        listener.mouse_moved(&MouseEvent::new(self.state));
                    }
                }
                MouseInput::Pressed(button) => {
                    if self.state.is_button_down(button) {
                        continue;
                    }
                    self.state.buttons |= button.mask();
                    if let Some(listener) = self.listener.as_mut() {
                        listener.mouse_pressed(&MouseEvent::new(self.state), button);
                    }
                }
                MouseInput::Released(button) => {
                    if !self.state.is_button_down(button) {
                        continue;
                    }
                    self.state.buttons &= !button.mask();
                    if let Some(listener) = self.listener.as_mut() {
                        listener.mouse_released(&MouseEvent::new(self.state), button);
                    }
                }
            }
        }
    }

    fn mouse_state(&self) -> &MouseState {
        &self.state
    }

    fn mouse_state_mut(&mut self) -> &mut MouseState {
        &mut self.state
    }

    fn set_event_callback(&mut self, listener: Box<dyn MouseListener>) {
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
    use ::std::{cell::RefCell, rc::Rc};

    #[derive(Clone, Debug, PartialEq)]
    enum Seen {
        Moved(MouseEvent),
        Pressed(MouseEvent, MouseButton),
        Released(MouseEvent, MouseButton),
    }

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<Seen>>>);

    impl MouseListener for Recorder {
        fn mouse_moved(&mut self, evt: &MouseEvent) -> bool {
            self.0.borrow_mut().push(Seen::Moved(*evt));
            true
        }

        fn mouse_pressed(&mut self, evt: &MouseEvent, button: MouseButton) -> bool {
            self.0.borrow_mut().push(Seen::Pressed(*evt, button));
            true
        }

        fn mouse_released(&mut self, evt: &MouseEvent, button: MouseButton) -> bool {
            self.0.borrow_mut().push(Seen::Released(*evt, button));
            true
        }
    }

    #[test]
    fn test_capture_dispatches_in_order() {
        let recorder = Recorder::default();
        let mut mouse = Mouse::new();
        mouse.set_event_callback(Box::new(recorder.clone()));

        mouse.queue_move(5, 7, 0);
        mouse.queue_press(MouseButton::Right);
        mouse.queue_press(MouseButton::Right);
        mouse.queue_release(MouseButton::Right);
        mouse.capture();

        let seen = recorder.0.borrow();
        assert_eq!(seen.len(), 3);
        assert!(matches!(seen[0], Seen::Moved(evt) if evt.state.x.abs == 5 && evt.state.y.abs == 7));
        assert!(
            matches!(seen[1], Seen::Pressed(evt, MouseButton::Right) if evt.state.is_button_down(MouseButton::Right))
        );
        assert!(
            matches!(seen[2], Seen::Released(evt, MouseButton::Right) if !evt.state.is_button_down(MouseButton::Right))
        );
    }

    #[test]
    fn test_relative_motion_is_per_capture() {
        let mut mouse = Mouse::new();
        mouse.queue_move(3, 4, 1);
        mouse.queue_move(2, 1, 0);
        mouse.capture();
        assert_eq!(mouse.mouse_state().x.rel, 5);
        assert_eq!(mouse.mouse_state().y.rel, 5);

        mouse.capture();
        assert_eq!(mouse.mouse_state().x.rel, 0);
        assert_eq!(mouse.mouse_state().x.abs, 5);
    }

    #[test]
    fn test_large_moves_do_not_overflow() {
        let mut mouse = Mouse::new();
        mouse.queue_move(5, 0, 0);
        mouse.capture();
        mouse.queue_move(i32::MAX, 0, 0);
        mouse.capture();
        assert_eq!(mouse.mouse_state().x.abs, 50);

        mouse.queue_move(i32::MAX / 2 + 1, 0, 0);
        mouse.queue_move(i32::MAX / 2 + 1, 0, 0);
        mouse.capture();
        assert_eq!(mouse.mouse_state().x.rel, i32::MAX);
    }

    #[test]
    fn test_reset_keeps_clipping_area() {
        let mut mouse = Mouse::new();
        mouse.mouse_state_mut().width = 640;
        mouse.mouse_state_mut().height = 480;
        mouse.queue_move(10, 10, 0);
        mouse.capture();
        mouse.reset();

        assert_eq!(
            *mouse.mouse_state(),
            MouseState {
                width: 640,
                height: 480,
                ..Default::default()
            }
        );
    }
}
