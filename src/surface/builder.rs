//! Builder object which constructs headless [`Surface`]s
//!
//! [`Surface`]: crate::surface::Surface

use crate::surface::{Metrics, Surface};

/// A builder pattern object which simplifies the process of creating a
/// [`Surface`].
///
/// The same builder can be re-used to create multiple surfaces with the same
/// configuration, as a type of prototype.
///
/// ```
/// use ::helm_input::surface::{Builder, DisplaySurface};
///
/// let surface = Builder::new()
///     .with_title("Simulator")
///     .with_size(1024, 768)
///     .build();
///
/// assert_eq!(surface.metrics().width, 1024);
/// ```
///
/// [`Surface`]: crate::surface::Surface
#[derive(Clone, Debug)]
pub struct Builder {
    title: Option<String>,
    metrics: Metrics,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// Construct a new builder. Default values will be used for all properties
    /// until explicitly set.
    pub fn new() -> Self {
        Self {
            title: None,
            metrics: Metrics {
                width: 800,
                height: 600,
                depth: 32,
                left: 0,
                top: 0,
            },
        }
    }

    /// Set the surface title.
    ///
    /// Defaults to the empty string if not set.
    pub fn with_title(self, title: impl AsRef<str>) -> Self {
        Self {
            title: title.as_ref().to_owned().into(),
            ..self
        }
    }

    /// Set a size for the surface.
    ///
    /// Defaults to 800 x 600 if not set.
    pub fn with_size(self, width: u32, height: u32) -> Self {
        Self {
            metrics: Metrics {
                width,
                height,
                ..self.metrics
            },
            ..self
        }
    }

    /// Set the colour depth in bits per pixel.
    ///
    /// Defaults to 32 if not set.
    pub fn with_depth(self, depth: u32) -> Self {
        Self {
            metrics: Metrics {
                depth,
                ..self.metrics
            },
            ..self
        }
    }

    /// Set the position of the surface's top left corner.
    ///
    /// Defaults to the origin if not set.
    pub fn with_position(self, left: i32, top: i32) -> Self {
        Self {
            metrics: Metrics {
                left,
                top,
                ..self.metrics
            },
            ..self
        }
    }

    /// Gets the currently set title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Gets the currently set metrics.
    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    /// Build a new [`Surface`] with the properties of the builder.
    ///
    /// [`Surface`]: crate::surface::Surface
    pub fn build(&self) -> Surface {
        Surface::new(self.title.as_deref().unwrap_or(""), self.metrics)
    }
}
