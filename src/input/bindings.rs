//! Composite key bindings.

use crate::{
    config::Bindings,
    errors::{Error, Result},
    input::{device::KeyboardDevice, keyboard::KeyCode},
};

use ::std::{collections::HashMap, sync::Arc};
use ::tracing::debug;

/// A named action which fires while every one of its keys is held.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionBinding {
    name: Arc<str>,
    keys: Vec<KeyCode>,
}

impl ActionBinding {
    /// Build a binding. The key list must not be empty; repeated keys are
    /// collapsed, keeping the first occurrence.
    pub fn new(name: impl Into<Arc<str>>, keys: impl IntoIterator<Item = KeyCode>) -> Result<Self> {
        let name = name.into();
        let mut unique = Vec::new();
        for key in keys {
            if !unique.contains(&key) {
                unique.push(key);
            }
        }

        if unique.is_empty() {
            return Err(Error::EmptyBinding {
                action: name.to_string(),
            });
        }

        Ok(Self { name, keys: unique })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The shared action name, as published on the event bus.
    pub fn shared_name(&self) -> &Arc<str> {
        &self.name
    }

    pub fn keys(&self) -> &[KeyCode] {
        &self.keys
    }

    /// Returns `true` if every key of the binding is down on `keyboard`.
    pub fn is_held(&self, keyboard: &(impl KeyboardDevice + ?Sized)) -> bool {
        self.keys.iter().all(|&key| keyboard.is_key_down(key))
    }
}

/// The validated, immutable set of action bindings.
///
/// Bindings are evaluated in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BindingTable {
    bindings: Vec<ActionBinding>,
    index: HashMap<Arc<str>, usize>,
}

impl BindingTable {
    /// Build a table from configured bindings.
    ///
    /// Fails if an action name is declared more than once, or if an action has
    /// no keys.
    pub fn new(config: Bindings) -> Result<Self> {
        let mut table = Self::default();
        for (action, keys) in config {
            table.insert(ActionBinding::new(action, keys.into_keys())?)?;
        }

        debug!(actions = table.len(), "Built key binding table");
        Ok(table)
    }

    fn insert(&mut self, binding: ActionBinding) -> Result<()> {
        if self.index.contains_key(binding.name()) {
            return Err(Error::DuplicateAction {
                action: binding.name().to_owned(),
            });
        }

        self.index
            .insert(binding.shared_name().clone(), self.bindings.len());
        self.bindings.push(binding);
        Ok(())
    }

    pub fn get(&self, action: &str) -> Option<&ActionBinding> {
        self.index.get(action).map(|&i| &self.bindings[i])
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionBinding> + '_ {
        self.bindings.iter()
    }

    /// The bindings which are held on `keyboard` right now, in declaration
    /// order.
    pub fn held<'a, K>(&'a self, keyboard: &'a K) -> impl Iterator<Item = &'a ActionBinding> + 'a
    where
        K: KeyboardDevice + ?Sized,
    {
        self.bindings.iter().filter(move |b| b.is_held(keyboard))
    }
}
