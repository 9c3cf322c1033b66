// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::errors::StateError;
use crate::tree::consts::FUNC_SEPARATOR;
use crate::tree::registry::StateRegistry;
use crate::tree::state::State;
use crate::tree::value::{Attributes, Mapping, Value};

/// Builder for states of one module (`file`, `pkg`, `service`, ...).
///
/// Any operation name is accepted; the factory never keeps a list of known
/// operations and does not track the states it creates.
///
/// # Examples
///
/// ```
/// use statecraft::{attrs, StateFactory, StateRegistry, Value};
///
/// let registry = StateRegistry::new();
/// let pkg = StateFactory::new("pkg", &registry);
/// let service = StateFactory::new("service", &registry);
///
/// pkg.build("installed", "nginx", attrs! {}).unwrap();
/// let running = service
///     .build("running", "nginx-service", attrs! { "require" => pkg.reference("nginx") })
///     .unwrap();
///
/// assert_eq!(running.func(), "service.running");
/// assert!(matches!(running.attrs()[0].value(), Value::Sequence(_)));
/// ```
#[derive(Debug, Clone)]
pub struct StateFactory {
    module: String,
    registry: StateRegistry,
}

impl StateFactory {
    /// Create a factory for `module` that registers into `registry`
    pub fn new(module: impl Into<String>, registry: &StateRegistry) -> Self {
        Self {
            module: module.into(),
            registry: registry.clone(),
        }
    }

    /// Create a factory bound to the process-wide default registry
    pub fn global(module: impl Into<String>) -> Self {
        Self::new(module, &StateRegistry::global())
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn registry(&self) -> &StateRegistry {
        &self.registry
    }

    /// Declare `name` as state `<module>.<operation>` with the given attributes.
    ///
    /// # Errors
    /// * [`StateError::InvalidAttribute`] if the module or operation is empty,
    ///   or the declaration itself is malformed
    /// * [`StateError::DuplicateName`] if the bound registry already holds `name`
    pub fn build(
        &self,
        operation: &str,
        name: impl Into<String>,
        attributes: Attributes,
    ) -> Result<Arc<State>, StateError> {
        let func = self.func(operation)?;
        State::new(name, func, &self.registry, attributes)
    }

    /// A reusable constructor for one operation of this module.
    ///
    /// ```
    /// use statecraft::{attrs, StateFactory, StateRegistry};
    ///
    /// let registry = StateRegistry::new();
    /// let file = StateFactory::new("file", &registry);
    /// let managed = file.function("managed");
    ///
    /// managed.declare("/etc/motd", attrs! { "user" => "root" }).unwrap();
    /// managed.declare("/etc/issue", attrs! { "user" => "root" }).unwrap();
    ///
    /// assert_eq!(registry.len(), 2);
    /// ```
    pub fn function(&self, operation: impl Into<String>) -> StateFunction<'_> {
        StateFunction {
            factory: self,
            operation: operation.into(),
        }
    }

    /// The `{module: name}` fragment used as a `require`/`watch` target.
    ///
    /// Does not touch the registry.
    pub fn reference(&self, name: impl Into<String>) -> Mapping {
        let mut reference = Mapping::with_capacity(1);
        reference.insert(
            Value::String(self.module.clone()),
            Value::String(name.into()),
        );
        reference
    }

    fn func(&self, operation: &str) -> Result<String, StateError> {
        if self.module.trim().is_empty() {
            return Err(StateError::invalid("module", "module name must not be empty"));
        }
        if operation.trim().is_empty() {
            return Err(StateError::invalid(
                "operation",
                format!("module '{}' was given an empty operation", self.module),
            ));
        }
        Ok([self.module.as_str(), operation].join(FUNC_SEPARATOR))
    }
}

/// One operation of a [`StateFactory`], callable any number of times.
#[derive(Debug, Clone)]
pub struct StateFunction<'f> {
    factory: &'f StateFactory,
    operation: String,
}

impl StateFunction<'_> {
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Declare `name` with this operation
    pub fn declare(
        &self,
        name: impl Into<String>,
        attributes: Attributes,
    ) -> Result<Arc<State>, StateError> {
        self.factory.build(&self.operation, name, attributes)
    }
}
