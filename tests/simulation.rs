//! Drives a complete input system through scripted frames, the way a
//! simulator host would.

use ::helm_input::{
    config::Config,
    event::{Event, EventBus, EventKind},
    input::{
        device::MouseDevice,
        keyboard::{KeyCode, Keyboard},
        mouse::{Mouse, MouseButton},
    },
    surface::{Builder, DisplaySurface, Surface},
    Error, InputSystem, KeyStateObserver, ObservedKey,
};

use ::pretty_assertions::assert_eq;
use ::std::{cell::RefCell, rc::Rc};

const CONFIG: &str = "
update_rate: 20
bindings:
  PORT_THRUST_UP: U
  BOOST: [LShift, W]
";

struct Harness {
    system: InputSystem,
    surface: Surface,
    observer: KeyStateObserver,
    actions: Rc<RefCell<Vec<String>>>,
    ticks: Rc<RefCell<usize>>,
}

fn harness() -> Harness {
    let config = Config::from_yaml_str(CONFIG).unwrap();
    let bus = EventBus::new();

    let actions = Rc::new(RefCell::new(Vec::new()));
    let sink = actions.clone();
    bus.subscribe_to(EventKind::Action, move |evt| {
        if let Event::Action(name) = evt {
            sink.borrow_mut().push(name.to_string());
        }
    });

    let observer = KeyStateObserver::new([
        ObservedKey::from(KeyCode::W),
        ObservedKey::from(("shift", [KeyCode::LShift, KeyCode::RShift])),
    ]);
    observer.attach(&bus);

    let surface = Builder::new().with_title("Helm").with_size(320, 200).build();
    let ticks = Rc::new(RefCell::new(0));
    let counter = ticks.clone();
    let system = InputSystem::new(&config, surface.clone(), Keyboard::new(), Mouse::new(), bus)
        .unwrap()
        .with_world(move |_dt: f64| *counter.borrow_mut() += 1);

    Harness {
        system,
        surface,
        observer,
        actions,
        ticks,
    }
}

/// A combination fires on every tick it is held, and the observer sees the
/// key notifications which made it fire.
#[test]
fn test_combination_over_several_frames() {
    let mut h = harness();

    let keyboard = h.system.keyboard_mut().unwrap();
    keyboard.queue_press(KeyCode::LShift);
    keyboard.queue_press(KeyCode::W);

    // Three frames of 60ms at 20 ticks per second: one tick each.
    for _ in 0..3 {
        assert!(h.system.update(0.06));
    }

    assert_eq!(*h.actions.borrow(), vec!["BOOST"; 3]);
    assert_eq!(*h.ticks.borrow(), 3);
    assert!(h.observer.is_set("w_key"));
    assert!(h.observer.is_set("shift"));

    h.system.keyboard_mut().unwrap().queue_release(KeyCode::LShift);
    assert!(h.system.update(0.06));

    assert_eq!(h.actions.borrow().len(), 3);
    assert!(!h.observer.is_set("shift"));
    assert!(h.observer.is_set("w_key"));
}

#[test]
fn test_duplicate_action_in_yaml_prevents_start() {
    let config = Config::from_yaml_str("bindings:\n  FIRE: U\n  FIRE: J\n").unwrap();
    let result = InputSystem::new(
        &config,
        Builder::new().build(),
        Keyboard::new(),
        Mouse::new(),
        EventBus::new(),
    );

    match result {
        Err(Error::DuplicateAction { action }) => assert_eq!(action, "FIRE"),
        Err(other) => panic!("expected duplicate action error, got {other}"),
        Ok(_) => panic!("duplicate action was accepted"),
    }
}

#[test]
fn test_single_key_binding_from_config() {
    let mut h = harness();
    assert_eq!(h.system.bindings().len(), 2);

    h.system.keyboard_mut().unwrap().queue_press(KeyCode::U);
    assert!(h.system.update(0.06));

    assert_eq!(*h.actions.borrow(), vec!["PORT_THRUST_UP"]);
}

/// Holding a quit key ends the loop, tears the system down once and leaves
/// the observer with the state it last saw.
#[test]
fn test_quit_key_ends_the_loop() {
    let mut h = harness();

    let keyboard = h.system.keyboard_mut().unwrap();
    keyboard.queue_press(KeyCode::W);
    keyboard.queue_press(KeyCode::Q);

    assert!(!h.system.update(0.06));
    assert!(!h.system.is_running());
    assert!(h.actions.borrow().is_empty());
    assert_eq!(*h.ticks.borrow(), 0);
    assert!(h.observer.is_set("w_key"));

    assert!(!h.system.update(0.06));
    assert!(h.system.shutdown().is_none());
}

#[test]
fn test_closing_the_surface_ends_the_loop() {
    let mut h = harness();
    assert!(h.system.update(0.06));

    h.surface.close();
    assert!(!h.system.update(0.06));
    assert_eq!(*h.ticks.borrow(), 1);

    // The close notification arriving afterwards is harmless.
    h.system.window_closed(h.surface.id());
    assert!(!h.system.is_running());
}

#[test]
fn test_resize_reaches_the_mouse() {
    let mut h = harness();
    h.surface.resize(1280, 720);
    h.system.window_resized();

    let mouse = h.system.mouse_mut().unwrap();
    mouse.queue_move(2000, 2000, 0);
    mouse.queue_press(MouseButton::Left);
    assert!(h.system.update(0.06));

    let state = *h.system.mouse_mut().unwrap().mouse_state();
    assert_eq!((state.x.abs, state.y.abs), (1280, 720));
    assert!(state.is_button_down(MouseButton::Left));
}
