//! The display surface the input devices are attached to.
//!
//! Rendering is handled elsewhere. The input layer only needs to know whether
//! the surface is still open and how large it is.

mod builder;
mod headless;

pub use builder::*;
pub use headless::*;

use ::std::sync::atomic::{AtomicU64, Ordering};

/// Identifies a display surface, so that close notifications for other
/// surfaces can be told apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceId(u64);

impl SurfaceId {
    /// Allocates a process-unique id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Size and position of a display surface, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Metrics {
    pub width: u32,
    pub height: u32,
    /// Colour depth in bits per pixel.
    pub depth: u32,
    pub left: i32,
    pub top: i32,
}

/// A window or other render target supplied by the graphics subsystem.
pub trait DisplaySurface {
    fn id(&self) -> SurfaceId;

    /// Returns `true` once the surface has been closed. A closed surface never
    /// reopens.
    fn is_closed(&self) -> bool;

    fn metrics(&self) -> Metrics;
}
