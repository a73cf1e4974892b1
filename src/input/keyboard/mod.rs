//! Input and state handling for keyboard events.

mod codes;
mod event;
#[allow(clippy::module_inception)]
mod keyboard;

pub use codes::*;
pub(crate) use event::KeyInput;
pub use event::KeyEvent;
pub use keyboard::*;
