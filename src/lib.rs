//! Fixed-rate input handling for real-time vehicle simulators.
//!
//! An [`InputSystem`] owns a keyboard and a mouse and samples them at a fixed
//! rate, independent of the host's frame rate. Every tick it captures the
//! devices, forwards the raw notifications to an [`EventBus`], and publishes
//! an action event for each configured key combination which is held.
//! Consumers subscribe to the bus, or attach a [`KeyStateObserver`] to keep
//! boolean flags for individual keys and key groups.
//!
//! ```
//! use ::helm_input::{
//!     config::Config,
//!     event::EventBus,
//!     input::keyboard::{KeyCode, Keyboard},
//!     input::mouse::Mouse,
//!     surface::Builder,
//!     InputSystem,
//! };
//!
//! let bus = EventBus::new();
//! let mut actions = bus.channel();
//!
//! let mut system = InputSystem::new(
//!     &Config::default(),
//!     Builder::new().with_title("Helm").build(),
//!     Keyboard::new(),
//!     Mouse::new(),
//!     bus,
//! )
//! .unwrap();
//!
//! system.keyboard_mut().unwrap().queue_press(KeyCode::U);
//! assert!(system.update(0.05));
//!
//! let names: Vec<_> = ::std::iter::from_fn(|| actions.try_recv().ok())
//!     .map(|evt| evt.name().to_owned())
//!     .collect();
//! assert_eq!(names, ["KEY_PRESSED", "PORT_THRUST_UP"]);
//! ```

pub mod config;
pub mod errors;
pub mod event;
pub mod input;
pub mod surface;

pub use crate::{
    errors::{Error, Result},
    event::{Event, EventBus, EventKind},
    input::{
        observer::{KeyStateObserver, ObservedKey},
        system::{InputSystem, World},
    },
};
