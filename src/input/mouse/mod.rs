//! Input and state handling for mouse events.

mod event;
#[allow(clippy::module_inception)]
mod mouse;

pub use event::*;
pub use mouse::*;
