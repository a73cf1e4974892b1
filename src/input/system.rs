//! The input subsystem as seen by the simulation host.

use crate::{
    config::Config,
    errors::Result,
    event::EventBus,
    input::{
        bindings::BindingTable,
        device::{KeyboardDevice, MouseDevice},
        forwarder::EventForwarder,
        keyboard::Keyboard,
        mouse::Mouse,
        sampler::{DeviceSampler, Devices},
        scheduler::UpdateScheduler,
    },
    surface::{DisplaySurface, Surface, SurfaceId},
};

use ::tap::Pipe;
use ::tracing::debug;

/// External simulation state advanced once per fixed tick, after the devices
/// have been sampled.
pub trait World {
    fn update(&mut self, dt: f64);
}

impl<F> World for F
where
    F: FnMut(f64),
{
    fn update(&mut self, dt: f64) {
        self(dt)
    }
}

/// Owns the input devices and drives them at a fixed rate.
///
/// Each call to [`update`](Self::update) converts the host's frame time into
/// fixed ticks. Every tick captures the devices, which forwards raw
/// notifications to the [`EventBus`], publishes an action event for every held
/// binding, and then advances the [`World`], if one is installed.
///
/// Once a tick requests shutdown (quit key held, surface closed) the system
/// tears itself down: listeners are unregistered and the devices released.
/// Teardown happens exactly once, whether triggered by a tick, by
/// [`window_closed`](Self::window_closed), by [`shutdown`](Self::shutdown) or
/// by dropping the system.
pub struct InputSystem<K = Keyboard, M = Mouse, S = Surface>
where
    K: KeyboardDevice,
    M: MouseDevice,
    S: DisplaySurface,
{
    sampler: DeviceSampler<K, M, S>,
    scheduler: UpdateScheduler,
    bus: EventBus,
    world: Option<Box<dyn World>>,
}

impl<K, M, S> InputSystem<K, M, S>
where
    K: KeyboardDevice,
    M: MouseDevice,
    S: DisplaySurface,
{
    /// Build the input subsystem.
    ///
    /// Fails if the configured bindings are invalid or the update rate is not
    /// a positive number, in which case the devices are dropped untouched.
    pub fn new(config: &Config, surface: S, mut keyboard: K, mut mouse: M, bus: EventBus) -> Result<Self> {
        let scheduler = config.tick_interval()?.pipe(UpdateScheduler::new);
        let bindings = BindingTable::new(config.bindings_or_default())?;

        EventForwarder::new(bus.clone(), &mut mouse, &mut keyboard);

        debug!(
            surface = ?surface.id(),
            update_rate = config.update_rate,
            bindings = bindings.len(),
            "Input system started"
        );

        let mut system = Self {
            sampler: DeviceSampler::new(Devices { keyboard, mouse }, surface, bindings, bus.clone()),
            scheduler,
            bus,
            world: None,
        };
        system.window_resized();
        Ok(system)
    }

    /// Install the world advanced after each fixed tick, replacing any
    /// previous one.
    pub fn with_world(mut self, world: impl World + 'static) -> Self {
        self.world = Some(Box::new(world));
        self
    }

    /// Account for `delta` seconds of frame time.
    ///
    /// Returns `false` once the simulation should stop. The system has been
    /// torn down by then and every later call also returns `false`.
    pub fn update(&mut self, delta: f64) -> bool {
        if !self.is_running() {
            return false;
        }

        let Self {
            sampler,
            scheduler,
            world,
            ..
        } = self;

        let running = scheduler.advance(delta, &mut |dt: f64| {
            if !sampler.sample_tick(dt) {
                return false;
            }
            if let Some(world) = world.as_mut() {
                world.update(dt);
            }
            true
        });

        if !running {
            self.shutdown();
        }
        running
    }

    /// Copy the surface's current size into the mouse clipping area.
    pub fn window_resized(&mut self) {
        let metrics = self.sampler.surface().metrics();
        if let Some(devices) = self.sampler.devices_mut() {
            debug!(width = metrics.width, height = metrics.height, "Surface resized");
            let state = devices.mouse.mouse_state_mut();
            state.width = i32::try_from(metrics.width).unwrap_or(i32::MAX);
            state.height = i32::try_from(metrics.height).unwrap_or(i32::MAX);
        }
    }

    /// Notification that surface `id` closed. Tears the system down if it is
    /// the surface this system samples for; other surfaces are ignored.
    pub fn window_closed(&mut self, id: SurfaceId) {
        if id == self.sampler.surface().id() {
            self.shutdown();
        }
    }

    /// Unregister the device listeners and release the devices, handing them
    /// back to the caller. Returns `None` if the system was already torn down.
    pub fn shutdown(&mut self) -> Option<Devices<K, M>> {
        let devices = self.sampler.release_devices()?;
        debug!(surface = ?self.sampler.surface().id(), "Input system stopped");
        Some(devices)
    }

    pub fn is_running(&self) -> bool {
        self.sampler.devices().is_some()
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn bindings(&self) -> &BindingTable {
        self.sampler.bindings()
    }

    pub fn surface(&self) -> &S {
        self.sampler.surface()
    }

    pub fn scheduler(&self) -> &UpdateScheduler {
        &self.scheduler
    }

    pub fn sampler(&self) -> &DeviceSampler<K, M, S> {
        &self.sampler
    }

    /// The keyboard, until the system is torn down.
    pub fn keyboard_mut(&mut self) -> Option<&mut K> {
        self.sampler.devices_mut().map(|devices| &mut devices.keyboard)
    }

    /// The mouse, until the system is torn down.
    pub fn mouse_mut(&mut self) -> Option<&mut M> {
        self.sampler.devices_mut().map(|devices| &mut devices.mouse)
    }
}

impl<K, M, S> Drop for InputSystem<K, M, S>
where
    K: KeyboardDevice,
    M: MouseDevice,
    S: DisplaySurface,
{
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Bindings,
        errors::Error,
        event::EventKind,
        input::{keyboard::KeyCode, mouse::MouseButton},
        surface::Builder,
    };

    use ::pretty_assertions::assert_eq;
    use ::std::{cell::RefCell, rc::Rc};

    const DT: f64 = 0.1;

    fn system(config: &Config) -> (InputSystem, Surface, Rc<RefCell<Vec<String>>>) {
        let bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        bus.subscribe(move |evt| sink.borrow_mut().push(evt.name().to_owned()));

        let surface = Builder::new().with_size(640, 480).build();
        let system = InputSystem::new(
            config,
            surface.clone(),
            Keyboard::new(),
            Mouse::new(),
            bus,
        )
        .unwrap();
        (system, surface, seen)
    }

    fn config() -> Config {
        Config::default()
            .with_update_rate(10.0)
            .with_bindings(Bindings::new().bind("BOOST", vec![KeyCode::LShift, KeyCode::W]))
    }

    #[test]
    fn test_duplicate_action_is_fatal() {
        let config = Config::default().with_bindings(
            Bindings::new()
                .bind("FIRE", KeyCode::Space)
                .bind("FIRE", KeyCode::F),
        );

        let err = InputSystem::new(
            &config,
            Builder::new().build(),
            Keyboard::new(),
            Mouse::new(),
            EventBus::new(),
        )
        .err()
        .unwrap();

        assert!(matches!(err, Error::DuplicateAction { ref action } if action == "FIRE"));
    }

    #[test]
    fn test_invalid_update_rate_is_fatal() {
        let result = InputSystem::new(
            &Config::default().with_update_rate(0.0),
            Builder::new().build(),
            Keyboard::new(),
            Mouse::new(),
            EventBus::new(),
        );
        assert!(matches!(result, Err(Error::InvalidUpdateRate(_))));
    }

    #[test]
    fn test_raw_events_then_actions() {
        let (mut system, _surface, seen) = system(&config());

        let keyboard = system.keyboard_mut().unwrap();
        keyboard.queue_press(KeyCode::LShift);
        keyboard.queue_press(KeyCode::W);

        // 0.25s is two fixed ticks of 0.1s.
        assert!(system.update(0.25));

        assert_eq!(
            *seen.borrow(),
            vec!["KEY_PRESSED", "KEY_PRESSED", "BOOST", "BOOST"]
        );
    }

    #[test]
    fn test_world_runs_after_each_tick() {
        let steps = Rc::new(RefCell::new(Vec::new()));
        let sink = steps.clone();
        let (system, _surface, _) = system(&config());
        let mut system = system.with_world(move |dt: f64| sink.borrow_mut().push(dt));

        assert!(system.update(0.25));
        assert_eq!(*steps.borrow(), vec![DT, DT]);

        // A long stall is covered by a single step.
        assert!(system.update(3.0));
        assert_eq!(steps.borrow().len(), 3);
        assert!((steps.borrow()[2] - 3.05).abs() < 1e-9);
    }

    #[test]
    fn test_quit_key_tears_down() {
        let (mut system, _surface, seen) = system(&config());
        system.keyboard_mut().unwrap().queue_press(KeyCode::Escape);

        assert!(!system.update(0.15));
        assert!(!system.is_running());
        assert!(system.keyboard_mut().is_none());
        assert!(!system.update(0.15));
        assert_eq!(*seen.borrow(), vec!["KEY_PRESSED"]);
    }

    #[test]
    fn test_closed_surface_stops_updates() {
        let (mut system, surface, _) = system(&config());
        surface.close();

        assert!(!system.update(0.15));
        assert!(!system.is_running());
    }

    #[test]
    fn test_shutdown_releases_devices_once() {
        let (mut system, _surface, seen) = system(&config());

        let mut devices = system.shutdown().unwrap();
        assert!(system.shutdown().is_none());

        // Released devices no longer forward anything to the bus.
        devices.keyboard.queue_press(KeyCode::A);
        devices.keyboard.capture();
        devices.mouse.queue_press(MouseButton::Left);
        devices.mouse.capture();
        assert!(seen.borrow().is_empty());
        assert!(devices.keyboard.is_key_down(KeyCode::A));
    }

    #[test]
    fn test_window_closed_matches_surface() {
        let (mut system, _surface, _) = system(&config());

        system.window_closed(Builder::new().build().id());
        assert!(system.is_running());

        let id = system.surface().id();
        system.window_closed(id);
        assert!(!system.is_running());
    }

    #[test]
    fn test_window_resized_updates_mouse_area() {
        let (mut system, surface, _) = system(&config());
        let state = *system.mouse_mut().unwrap().mouse_state();
        assert_eq!((state.width, state.height), (640, 480));

        surface.resize(1024, 768);
        system.window_resized();

        let state = *system.mouse_mut().unwrap().mouse_state();
        assert_eq!((state.width, state.height), (1024, 768));
    }

    #[test]
    fn test_mouse_events_are_forwarded() {
        let (mut system, _surface, seen) = system(&config());
        let kinds = Rc::new(RefCell::new(Vec::new()));
        let sink = kinds.clone();
        system
            .bus()
            .subscribe_to(EventKind::MouseMoved, move |evt| sink.borrow_mut().push(evt.kind()));

        let mouse = system.mouse_mut().unwrap();
        mouse.queue_move(5, 5, 0);
        mouse.queue_press(MouseButton::Right);
        assert!(system.update(0.15));

        assert_eq!(*kinds.borrow(), vec![EventKind::MouseMoved]);
        assert_eq!(*seen.borrow(), vec!["MOUSE_MOVED", "MOUSE_PRESSED"]);
    }
}
