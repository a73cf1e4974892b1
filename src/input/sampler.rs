//! Per-tick sampling of the keyboard and mouse.

use crate::{
    event::{Event, EventBus},
    input::{
        bindings::BindingTable,
        device::{KeyboardDevice, MouseDevice},
        keyboard::KeyCode,
    },
    surface::DisplaySurface,
};

use ::tracing::{debug, trace};

/// Keys which end the simulation while held: the primary escape key and the
/// secondary quit key.
pub const QUIT_KEYS: [KeyCode; 2] = [KeyCode::Escape, KeyCode::Q];

/// The devices a [`DeviceSampler`] reads, held until they are released.
pub struct Devices<K, M> {
    pub keyboard: K,
    pub mouse: M,
}

/// Captures the devices once per fixed tick and publishes composite action
/// events for every binding which is held.
///
/// Action events are level triggered: an action fires on every tick its keys
/// are held, not only on the tick they became held.
pub struct DeviceSampler<K, M, S> {
    devices: Option<Devices<K, M>>,
    surface: S,
    bindings: BindingTable,
    bus: EventBus,
    /// Countdown used to rate limit toggle-style bindings. Counts down to just
    /// below zero and stays there until re-armed.
    time_until_next_toggle: f64,
}

impl<K, M, S> DeviceSampler<K, M, S>
where
    K: KeyboardDevice,
    M: MouseDevice,
    S: DisplaySurface,
{
    pub fn new(devices: Devices<K, M>, surface: S, bindings: BindingTable, bus: EventBus) -> Self {
        Self {
            devices: Some(devices),
            surface,
            bindings,
            bus,
            time_until_next_toggle: 0.0,
        }
    }

    /// Run one fixed tick of length `dt` seconds.
    ///
    /// Returns `false` if the simulation should stop: the surface was closed,
    /// the devices were released, or a quit key is held. No action events are
    /// published on such a tick.
    pub fn sample_tick(&mut self, dt: f64) -> bool {
        if self.surface.is_closed() {
            debug!("Display surface closed, stopping input sampling");
            return false;
        }

        let Some(devices) = self.devices.as_mut() else {
            return false;
        };

        // Capturing dispatches buffered notifications, which must reach their
        // listeners before bindings are evaluated.
        devices.keyboard.capture();
        devices.mouse.capture();

        if self.time_until_next_toggle >= 0.0 {
            self.time_until_next_toggle -= dt;
        }

        if QUIT_KEYS
            .iter()
            .any(|&key| devices.keyboard.is_key_down(key))
        {
            debug!("Quit key held, stopping input sampling");
            return false;
        }

        for binding in self.bindings.held(&devices.keyboard) {
            trace!(action = binding.name(), "Publishing action");
            self.bus.publish(Event::Action(binding.shared_name().clone()));
        }

        true
    }

    /// Whether a toggle-style binding may fire now.
    pub fn toggle_ready(&self) -> bool {
        self.time_until_next_toggle <= 0.0
    }

    /// Remaining toggle delay in seconds. May be slightly negative once the
    /// countdown has elapsed.
    pub fn time_until_next_toggle(&self) -> f64 {
        self.time_until_next_toggle
    }

    /// Block toggle-style bindings for `delay` seconds.
    pub fn arm_toggle(&mut self, delay: f64) {
        self.time_until_next_toggle = delay;
    }

    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn devices(&self) -> Option<&Devices<K, M>> {
        self.devices.as_ref()
    }

    pub fn devices_mut(&mut self) -> Option<&mut Devices<K, M>> {
        self.devices.as_mut()
    }

    /// Unregister device listeners and hand the devices back. Returns `None`
    /// if they were already released.
    pub fn release_devices(&mut self) -> Option<Devices<K, M>> {
        let mut devices = self.devices.take()?;
        devices.keyboard.clear_event_callback();
        devices.mouse.clear_event_callback();
        Some(devices)
    }
}
