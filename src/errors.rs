//! Crate-specific error and result types.
//!
//! Only configuration problems are surfaced as errors. Conditions which occur
//! while the simulation is running (a closed surface, a quit key, unmapped or
//! duplicate key notifications) are reported through the `false` return of
//! the update loop or silently absorbed by the component which detects them.

use ::thiserror::Error;

/// Result type returned by fallible constructors in this crate.
pub type Result<T> = ::std::result::Result<T, Error>;

/// Error type for input subsystem initialization.
///
/// Any of these errors prevents the input subsystem from starting. None of
/// them are retried.
#[derive(Debug, Error)]
pub enum Error {
    /// The same action name was registered more than once while building a
    /// [`BindingTable`].
    ///
    /// [`BindingTable`]: crate::input::bindings::BindingTable
    #[error("event \"{action}\" already assigned")]
    DuplicateAction {
        /// The offending action name.
        action: String,
    },

    /// An action was declared without any keys.
    #[error("event \"{action}\" is not bound to any keys")]
    EmptyBinding {
        /// The offending action name.
        action: String,
    },

    /// The configured update rate cannot produce a positive, finite tick
    /// interval.
    #[error("update rate must be a positive number of ticks per second, got {0}")]
    InvalidUpdateRate(f64),

    /// The YAML configuration document could not be parsed.
    #[error("failed to parse input configuration: {0}")]
    Parse(#[from] ::serde_yaml::Error),
}
