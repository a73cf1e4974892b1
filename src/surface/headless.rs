//! A display surface without any backing window.

use crate::surface::{DisplaySurface, Metrics, SurfaceId};

use ::std::{cell::Cell, rc::Rc};
use ::tracing::debug;

struct SurfaceInner {
    id: SurfaceId,
    title: String,
    metrics: Cell<Metrics>,
    closed: Cell<bool>,
}

/// A surface which exists only in memory. Useful for running the simulation
/// without a graphics subsystem, and for tests.
///
/// [`Surface`] is a cheap handle: clones refer to the same surface, so the host
/// can keep one clone to close or resize the surface while the input system
/// holds another.
#[derive(Clone)]
pub struct Surface {
    inner: Rc<SurfaceInner>,
}

impl Surface {
    pub fn new(title: &str, metrics: Metrics) -> Self {
        let id = SurfaceId::next();
        debug!(surface_title = %title, ?id, "Creating headless surface");
        Self {
            inner: Rc::new(SurfaceInner {
                id,
                title: title.to_owned(),
                metrics: Cell::new(metrics),
                closed: Cell::new(false),
            }),
        }
    }

    pub fn title(&self) -> &str {
        &self.inner.title
    }

    /// Change the size of the surface.
    pub fn resize(&self, width: u32, height: u32) {
        let metrics = self.inner.metrics.get();
        self.inner.metrics.set(Metrics {
            width,
            height,
            ..metrics
        });
    }

    /// Close the surface. Closing is permanent.
    pub fn close(&self) {
        debug!(surface_title = %self.inner.title, "Closing headless surface");
        self.inner.closed.set(true);
    }
}

impl DisplaySurface for Surface {
    fn id(&self) -> SurfaceId {
        self.inner.id
    }

    fn is_closed(&self) -> bool {
        self.inner.closed.get()
    }

    fn metrics(&self) -> Metrics {
        self.inner.metrics.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ::pretty_assertions::assert_eq;

    #[test]
    fn test_clones_share_state() {
        let surface = Surface::new("main", Metrics::default());
        let handle = surface.clone();

        handle.resize(640, 480);
        handle.close();

        assert_eq!(surface.id(), handle.id());
        assert!(surface.is_closed());
        assert_eq!((surface.metrics().width, surface.metrics().height), (640, 480));
    }
}
