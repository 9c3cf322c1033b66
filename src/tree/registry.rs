// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use indexmap::IndexMap;
use parking_lot::Mutex;
use std::sync::{Arc, LazyLock};

use crate::errors::StateError;
use crate::observability::messages::registry::{
    DuplicateStateRejected, RegistryEmptied, StateRegistered,
};
use crate::observability::messages::StructuredLog;
use crate::tree::state::State;
use crate::tree::value::{Mapping, Value};

static GLOBAL_REGISTRY: LazyLock<StateRegistry> = LazyLock::new(StateRegistry::new);

/// The uniqueness-enforcing collection of every state declared for a run.
///
/// A `StateRegistry` is a handle: cloning it yields another handle to the
/// same underlying map, which is how factories stay bound to the registry
/// they were created with. States are kept in declaration order so the
/// aggregated document is reproducible.
///
/// # Examples
///
/// ```
/// use statecraft::{attrs, StateError, StateFactory, StateRegistry};
///
/// let registry = StateRegistry::new();
/// let pkg = StateFactory::new("pkg", &registry);
///
/// pkg.build("installed", "nginx", attrs! {}).unwrap();
/// assert!(registry.contains("nginx"));
///
/// let duplicate = pkg.build("removed", "nginx", attrs! {});
/// assert_eq!(
///     duplicate.unwrap_err(),
///     StateError::DuplicateName { name: "nginx".to_string() }
/// );
///
/// registry.empty();
/// assert!(registry.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StateRegistry {
    states: Arc<Mutex<IndexMap<String, Arc<State>>>>,
}

impl StateRegistry {
    /// Create a new, empty private registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the process-wide default registry.
    ///
    /// The default registry starts empty the first time it is touched and
    /// only changes through state declarations and [`empty`](Self::empty).
    /// Pass the returned handle down explicitly rather than calling this
    /// from deep inside library code.
    pub fn global() -> Self {
        GLOBAL_REGISTRY.clone()
    }

    /// Insert a state under `name`.
    ///
    /// Only [`State::new`] registers states, so a state lives in exactly one
    /// registry and is always keyed by its own name.
    /// Fails with [`StateError::DuplicateName`] if the name is already
    /// present, leaving the existing state untouched.
    pub(crate) fn add(&self, name: &str, state: Arc<State>) -> Result<(), StateError> {
        if name.trim().is_empty() {
            return Err(StateError::invalid("name", "state name must not be empty"));
        }
        if name != state.name() {
            return Err(StateError::invalid(
                "name",
                format!("state '{}' cannot be registered as '{}'", state.name(), name),
            ));
        }

        let mut states = self.states.lock();
        if states.contains_key(name) {
            DuplicateStateRejected { name }.log();
            return Err(StateError::duplicate(name));
        }

        let func = state.func().to_string();
        states.insert(name.to_string(), state);
        StateRegistered {
            name,
            func: &func,
            registry_size: states.len(),
        }
        .log();
        Ok(())
    }

    /// Reset the registry to empty.
    pub fn empty(&self) {
        let mut states = self.states.lock();
        let cleared = states.len();
        states.clear();
        RegistryEmptied { cleared }.log();
    }

    /// Check if a state name is taken
    pub fn contains(&self, name: &str) -> bool {
        self.states.lock().contains_key(name)
    }

    /// Get a state by name
    pub fn get(&self, name: &str) -> Option<Arc<State>> {
        self.states.lock().get(name).cloned()
    }

    /// Get the number of registered states
    pub fn len(&self) -> usize {
        self.states.lock().len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.states.lock().is_empty()
    }

    /// Registered names in declaration order
    pub fn names(&self) -> Vec<String> {
        self.states.lock().keys().cloned().collect()
    }

    /// Snapshot of the registered states in declaration order
    pub fn states(&self) -> Vec<Arc<State>> {
        self.states.lock().values().cloned().collect()
    }

    /// Whether two handles point at the same underlying registry
    pub fn same_registry(&self, other: &StateRegistry) -> bool {
        Arc::ptr_eq(&self.states, &other.states)
    }

    /// Aggregate every registered state into one document, in declaration order.
    ///
    /// The result maps each state name to its `{func: [attrs]}` body.
    pub fn serialize(&self) -> Mapping {
        let states = self.states.lock();
        let mut document = Mapping::with_capacity(states.len());
        for (name, state) in states.iter() {
            document.insert(Value::String(name.clone()), Value::Mapping(state.body()));
        }
        document
    }
}
