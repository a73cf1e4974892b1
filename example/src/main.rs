// Run with `RUST_LOG=debug` to see the input system's own traces.

use ::helm_input::{
    config::Config,
    event::{Event, EventBus},
    input::{
        keyboard::{KeyCode, Keyboard},
        mouse::Mouse,
    },
    surface::Builder,
    InputSystem, KeyStateObserver, ObservedKey,
};
use ::tracing::{error, info};
use ::tracing_subscriber::{fmt, prelude::*, EnvFilter};

const CONFIG: &str = "
update_rate: 30
bindings:
  PORT_THRUST_UP: U
  PORT_THRUST_DOWN: J
  FULL_AHEAD: [LShift, Y]
";

/// Host frame time. Deliberately not a multiple of the tick length.
const FRAME: f64 = 1.0 / 45.0;

pub fn main() {
    ::tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let config = match Config::from_yaml_str(CONFIG) {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "Invalid configuration");
            return;
        }
    };

    let bus = EventBus::new();
    let mut events = bus.channel();

    let flags = KeyStateObserver::new([
        ObservedKey::from(KeyCode::Y),
        ObservedKey::from(("shift", [KeyCode::LShift, KeyCode::RShift])),
    ]);
    flags.attach(&bus);

    let surface = Builder::new().with_title("Helm").with_size(1024, 768).build();
    let mut system = match InputSystem::new(&config, surface, Keyboard::new(), Mouse::new(), bus) {
        Ok(system) => system.with_world(|dt: f64| info!(dt, "World step")),
        Err(err) => {
            error!(%err, "Failed to start input system");
            return;
        }
    };

    // Scripted keyboard input, keyed by frame number.
    let script: &[(usize, KeyCode, bool)] = &[
        (2, KeyCode::U, true),
        (5, KeyCode::U, false),
        (6, KeyCode::LShift, true),
        (7, KeyCode::Y, true),
        (10, KeyCode::LShift, false),
        (12, KeyCode::Escape, true),
    ];

    for frame in 0.. {
        if let Some(keyboard) = system.keyboard_mut() {
            for &(_, key, pressed) in script.iter().filter(|(at, ..)| *at == frame) {
                if pressed {
                    keyboard.queue_press(key);
                } else {
                    keyboard.queue_release(key);
                }
            }
        }

        let running = system.update(FRAME);

        while let Ok(event) = events.try_recv() {
            if let Event::Action(action) = &event {
                info!(frame, %action, "Action");
            }
        }
        info!(frame, flags = ?flags.attributes(), "Key state");

        if !running {
            info!(frame, "Simulation ended");
            break;
        }
    }
}
