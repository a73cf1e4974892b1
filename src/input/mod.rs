//! Keyboard and mouse handling for the simulator: devices, bindings, fixed-rate
//! sampling and the listeners which turn device notifications into events.

pub mod bindings;
pub mod device;
pub mod forwarder;
pub mod keyboard;
pub mod mouse;
pub mod observer;
pub mod sampler;
pub mod scheduler;
pub mod system;
