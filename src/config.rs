//! Input subsystem configuration.
//!
//! ```yaml
//! update_rate: 60
//! bindings:
//!   PORT_THRUST_UP: U
//!   CAM_FORWARD: [LShift, W]
//! ```

use crate::{
    errors::{Error, Result},
    input::keyboard::KeyCode,
};

use ::serde::{
    de::{MapAccess, Visitor},
    Deserialize, Deserializer,
};
use ::std::fmt;

/// Tick rate used when the configuration does not specify one.
pub const DEFAULT_UPDATE_RATE: f64 = 30.0;

/// Thruster control bindings used when the configuration has no `bindings`
/// entry.
pub const DEFAULT_BINDINGS: &[(&str, KeyCode)] = &[
    ("PORT_THRUST_UP", KeyCode::U),
    ("PORT_THRUST_DOWN", KeyCode::J),
    ("STARBOARD_THRUST_UP", KeyCode::I),
    ("STARBOARD_THRUST_DOWN", KeyCode::K),
    ("FORE_THRUST_UP", KeyCode::Y),
    ("FORE_THRUST_DOWN", KeyCode::H),
    ("AFT_THRUST_UP", KeyCode::O),
    ("AFT_THRUST_DOWN", KeyCode::L),
];

/// The keys an action is bound to: either one key or a combination of keys
/// which must all be held together.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum KeySpec {
    One(KeyCode),
    All(Vec<KeyCode>),
}

impl KeySpec {
    pub fn into_keys(self) -> Vec<KeyCode> {
        match self {
            Self::One(key) => vec![key],
            Self::All(keys) => keys,
        }
    }
}

impl From<KeyCode> for KeySpec {
    fn from(key: KeyCode) -> Self {
        Self::One(key)
    }
}

impl From<Vec<KeyCode>> for KeySpec {
    fn from(keys: Vec<KeyCode>) -> Self {
        Self::All(keys)
    }
}

/// Action bindings in declaration order.
///
/// Duplicate action names are preserved here, rather than collapsed as a map
/// would, so that building a [`BindingTable`] can reject them.
///
/// [`BindingTable`]: crate::input::bindings::BindingTable
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bindings(Vec<(String, KeySpec)>);

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a binding.
    pub fn bind(mut self, action: impl Into<String>, keys: impl Into<KeySpec>) -> Self {
        self.0.push((action.into(), keys.into()));
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &KeySpec)> + '_ {
        self.0.iter().map(|(action, keys)| (action.as_str(), keys))
    }

    /// The built-in thruster control bindings.
    pub fn thruster_defaults() -> Self {
        DEFAULT_BINDINGS
            .iter()
            .fold(Self::new(), |bindings, &(action, key)| {
                bindings.bind(action, key)
            })
    }
}

impl IntoIterator for Bindings {
    type Item = (String, KeySpec);
    type IntoIter = ::std::vec::IntoIter<(String, KeySpec)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'de> Deserialize<'de> for Bindings {
    fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BindingsVisitor;

        impl<'de> Visitor<'de> for BindingsVisitor {
            type Value = Bindings;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping of action names to a key or a list of keys")
            }

            fn visit_map<A>(self, mut map: A) -> ::std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, KeySpec>()? {
                    entries.push(entry);
                }
                Ok(Bindings(entries))
            }
        }

        deserializer.deserialize_map(BindingsVisitor)
    }
}

/// Configuration consumed when the input subsystem is constructed.
///
/// Unrecognized keys in the source document are ignored.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fixed simulation ticks per second.
    pub update_rate: f64,
    /// Composite key bindings. `None` selects [`Bindings::thruster_defaults`].
    pub bindings: Option<Bindings>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            update_rate: DEFAULT_UPDATE_RATE,
            bindings: None,
        }
    }
}

impl Config {
    /// Parse a configuration from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(::serde_yaml::from_str(yaml)?)
    }

    pub fn with_update_rate(self, update_rate: f64) -> Self {
        Self {
            update_rate,
            ..self
        }
    }

    pub fn with_bindings(self, bindings: Bindings) -> Self {
        Self {
            bindings: Some(bindings),
            ..self
        }
    }

    /// The configured bindings, or the built-in defaults when none are
    /// configured.
    pub fn bindings_or_default(&self) -> Bindings {
        self.bindings
            .clone()
            .unwrap_or_else(Bindings::thruster_defaults)
    }

    /// Duration of one fixed tick in seconds.
    pub fn tick_interval(&self) -> Result<f64> {
        if self.update_rate.is_finite() && self.update_rate > 0.0 {
            Ok(1.0 / self.update_rate)
        } else {
            Err(Error::InvalidUpdateRate(self.update_rate))
        }
    }
}
