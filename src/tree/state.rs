// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::sync::Arc;

use crate::errors::StateError;
use crate::observability::messages::state::{DeclarationRejected, DependencyWrapped};
use crate::observability::messages::StructuredLog;
use crate::tree::consts::DEPENDENCY_KEYS;
use crate::tree::registry::StateRegistry;
use crate::tree::value::{Attributes, Mapping, Value};

/// One declared attribute of a state, serialized as a single-key mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    key: String,
    value: Value,
}

impl Attr {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The `{key: value}` document form of this attribute
    pub fn to_value(&self) -> Value {
        let mut mapping = Mapping::with_capacity(1);
        mapping.insert(Value::String(self.key.clone()), self.value.clone());
        Value::Mapping(mapping)
    }
}

impl Serialize for Attr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.key, &self.value)?;
        map.end()
    }
}

/// A single item of desired configuration in the state tree.
///
/// A state is created and registered in one step by [`State::new`] (or by a
/// [`StateFactory`](crate::StateFactory)) and is immutable afterwards.
///
/// # Examples
///
/// ```
/// use statecraft::{attrs, State, StateRegistry};
///
/// let registry = StateRegistry::new();
/// let state = State::new(
///     "/etc/motd",
///     "file.managed",
///     &registry,
///     attrs! { "user" => "root", "group" => "root" },
/// )
/// .unwrap();
///
/// let keys: Vec<&str> = state.attrs().iter().map(|attr| attr.key()).collect();
/// assert_eq!(keys, vec!["group", "user"]);
/// assert!(registry.contains("/etc/motd"));
/// ```
#[derive(Debug)]
pub struct State {
    name: String,
    func: String,
    kwargs: Attributes,
    attrs: Vec<Attr>,
}

impl State {
    /// Declare a state and register it under `name`.
    ///
    /// `attrs` is derived from `kwargs` sorted by key, with lone values under
    /// the dependency keys (`require`, `watch`, `require_in`, `watch_in`)
    /// wrapped into one-element lists. If validation or registration fails
    /// nothing is left in the registry.
    ///
    /// # Errors
    /// * [`StateError::InvalidAttribute`] for an empty name, func or attribute key
    /// * [`StateError::DuplicateName`] if `registry` already holds `name`
    pub fn new(
        name: impl Into<String>,
        func: impl Into<String>,
        registry: &StateRegistry,
        kwargs: Attributes,
    ) -> Result<Arc<Self>, StateError> {
        let name = name.into();
        let func = func.into();

        validate_declaration(&name, &func, &kwargs).inspect_err(|error| {
            if let StateError::InvalidAttribute { field, reason } = error {
                DeclarationRejected { field, reason }.log();
            }
        })?;

        let attrs = ordered_attrs(&name, &kwargs);
        let state = Arc::new(Self {
            name,
            func,
            kwargs,
            attrs,
        });

        registry.add(&state.name, Arc::clone(&state))?;
        Ok(state)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fully-qualified function, e.g. `file.managed`
    pub fn func(&self) -> &str {
        &self.func
    }

    /// Attributes exactly as supplied at declaration
    pub fn kwargs(&self) -> &Attributes {
        &self.kwargs
    }

    /// Normalized attributes in key order
    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    /// The `{func: [attrs]}` mapping this state contributes to the document
    pub fn body(&self) -> Mapping {
        let attrs = self.attrs.iter().map(Attr::to_value).collect();
        let mut body = Mapping::with_capacity(1);
        body.insert(Value::String(self.func.clone()), Value::Sequence(attrs));
        body
    }

    /// Returns `(name, {func: [attrs]})`, the per-state fragment of the aggregated document.
    pub fn serialize(&self) -> (String, Mapping) {
        (self.name.clone(), self.body())
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(&self.attrs) {
            Ok(attrs) => write!(f, "{} = {}:{}", self.name, self.func, attrs),
            // non-string mapping keys have no JSON form
            Err(_) => write!(f, "{} = {}:{:?}", self.name, self.func, self.attrs),
        }
    }
}

fn validate_declaration(name: &str, func: &str, kwargs: &Attributes) -> Result<(), StateError> {
    if name.trim().is_empty() {
        return Err(StateError::invalid("name", "state name must not be empty"));
    }
    if func.trim().is_empty() {
        return Err(StateError::invalid(
            "func",
            format!("state '{}' has an empty function", name),
        ));
    }
    if kwargs.keys().any(|key| key.trim().is_empty()) {
        return Err(StateError::invalid(
            "attribute",
            format!("state '{}' has an attribute with an empty key", name),
        ));
    }
    Ok(())
}

/// Sort attributes by key and apply dependency normalization.
///
/// Normalization is keyed on presence in the raw kwargs, so only the four
/// dependency keys are ever rewritten.
fn ordered_attrs(name: &str, kwargs: &Attributes) -> Vec<Attr> {
    let mut keys: Vec<&String> = kwargs.keys().collect();
    keys.sort();

    keys.into_iter()
        .map(|key| {
            let value = kwargs[key].clone();
            let value = if DEPENDENCY_KEYS.contains(&key.as_str()) {
                as_dependency_list(value).inspect_wrapped(|| {
                    DependencyWrapped { state: name, key }.log();
                })
            } else {
                value
            };
            Attr::new(key.as_str(), value)
        })
        .collect()
}

/// Wrap a lone dependency value into a one-element list.
///
/// Values that are already sequences pass through unchanged.
pub fn as_dependency_list(value: Value) -> Normalized {
    match value {
        Value::Sequence(_) => Normalized::Unchanged(value),
        other => Normalized::Wrapped(Value::Sequence(vec![other])),
    }
}

/// Outcome of [`as_dependency_list`]
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Unchanged(Value),
    Wrapped(Value),
}

impl Normalized {
    pub fn into_value(self) -> Value {
        match self {
            Normalized::Unchanged(value) | Normalized::Wrapped(value) => value,
        }
    }

    fn inspect_wrapped(self, f: impl FnOnce()) -> Value {
        if let Normalized::Wrapped(_) = self {
            f();
        }
        self.into_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs;

    fn attr_keys(state: &State) -> Vec<&str> {
        state.attrs().iter().map(Attr::key).collect()
    }

    #[test]
    fn test_attrs_sorted_regardless_of_input_order() {
        let registry = StateRegistry::new();
        let mut forward = Attributes::new();
        forward.insert("owner".to_string(), Value::from("root"));
        forward.insert("group".to_string(), Value::from("root"));
        let mut backward = Attributes::new();
        backward.insert("group".to_string(), Value::from("root"));
        backward.insert("owner".to_string(), Value::from("root"));

        let a = State::new("a", "file.managed", &registry, forward).unwrap();
        let b = State::new("b", "file.managed", &registry, backward).unwrap();

        assert_eq!(a.attrs(), b.attrs());
        assert_eq!(
            a.attrs(),
            &[Attr::new("group", "root"), Attr::new("owner", "root")]
        );
    }

    #[test]
    fn test_dependency_keys_normalized() {
        struct TestCase {
            name: &'static str,
            key: &'static str,
            input: Value,
            expected: Value,
        }

        let single = Value::from("X");
        let list = Value::from(vec!["X", "Y"]);
        let wrapped = Value::Sequence(vec![Value::from("X")]);

        let mut test_cases = Vec::new();
        for key in DEPENDENCY_KEYS {
            test_cases.push(TestCase {
                name: "lone value is wrapped",
                key,
                input: single.clone(),
                expected: wrapped.clone(),
            });
            test_cases.push(TestCase {
                name: "list is kept",
                key,
                input: list.clone(),
                expected: list.clone(),
            });
        }

        for (i, test_case) in test_cases.into_iter().enumerate() {
            let registry = StateRegistry::new();
            let mut kwargs = Attributes::new();
            kwargs.insert(test_case.key.to_string(), test_case.input.clone());

            let state = State::new(format!("state_{}", i), "service.running", &registry, kwargs)
                .unwrap();

            assert_eq!(
                state.attrs()[0].value(),
                &test_case.expected,
                "Test case '{}' for key '{}'",
                test_case.name,
                test_case.key
            );
            assert_eq!(
                state.kwargs()[test_case.key],
                test_case.input,
                "Test case '{}' for key '{}': kwargs must stay raw",
                test_case.name,
                test_case.key
            );
        }
    }

    #[test]
    fn test_reference_fragment_dependency_is_wrapped() {
        let registry = StateRegistry::new();
        let mut reference = Mapping::new();
        reference.insert(Value::from("pkg"), Value::from("nginx"));

        let state = State::new(
            "nginx",
            "service.running",
            &registry,
            attrs! { "watch" => reference.clone() },
        )
        .unwrap();

        assert_eq!(
            state.attrs()[0].value(),
            &Value::Sequence(vec![Value::Mapping(reference)])
        );
    }

    #[test]
    fn test_other_keys_not_normalized() {
        let registry = StateRegistry::new();
        let state = State::new(
            "nginx",
            "service.running",
            &registry,
            attrs! { "required" => "X", "onchanges" => "Y", "enable" => true },
        )
        .unwrap();

        assert_eq!(attr_keys(&state), vec!["enable", "onchanges", "required"]);
        assert_eq!(state.attrs()[1].value(), &Value::from("Y"));
        assert_eq!(state.attrs()[2].value(), &Value::from("X"));
    }

    #[test]
    fn test_serialize_shape() {
        let registry = StateRegistry::new();
        let state =
            State::new("n", "pkg.installed", &registry, attrs! { "name" => "nginx" }).unwrap();

        let (name, body) = state.serialize();

        let expected: Value = serde_yaml::from_str("pkg.installed:\n  - name: nginx\n").unwrap();
        assert_eq!(name, "n");
        assert_eq!(Value::Mapping(body), expected);
    }

    #[test]
    fn test_display_form() {
        let registry = StateRegistry::new();
        let state = State::new(
            "/etc/motd",
            "file.managed",
            &registry,
            attrs! { "user" => "root", "require" => "base" },
        )
        .unwrap();

        assert_eq!(
            state.to_string(),
            r#"/etc/motd = file.managed:[{"require":["base"]},{"user":"root"}]"#
        );
    }

    #[test]
    fn test_display_falls_back_to_debug_for_non_string_keys() {
        let registry = StateRegistry::new();
        let mut options = Mapping::new();
        options.insert(Value::Null, Value::from("x"));

        let state = State::new("n", "a.b", &registry, attrs! { "opts" => options }).unwrap();

        assert_eq!(
            state.to_string(),
            r#"n = a.b:[Attr { key: "opts", value: Mapping {Null: String("x")} }]"#
        );
    }

    #[test]
    fn test_invalid_declarations_not_registered() {
        struct TestCase {
            name: &'static str,
            state_name: &'static str,
            func: &'static str,
            kwargs: Attributes,
            expected_field: &'static str,
        }

        let test_cases = vec![
            TestCase {
                name: "empty name",
                state_name: "",
                func: "file.managed",
                kwargs: Attributes::new(),
                expected_field: "name",
            },
            TestCase {
                name: "blank name",
                state_name: "   ",
                func: "file.managed",
                kwargs: Attributes::new(),
                expected_field: "name",
            },
            TestCase {
                name: "empty func",
                state_name: "motd",
                func: "",
                kwargs: Attributes::new(),
                expected_field: "func",
            },
            TestCase {
                name: "empty attribute key",
                state_name: "motd",
                func: "file.managed",
                kwargs: attrs! { "" => "root" },
                expected_field: "attribute",
            },
        ];

        for test_case in test_cases {
            let registry = StateRegistry::new();
            let result = State::new(
                test_case.state_name,
                test_case.func,
                &registry,
                test_case.kwargs,
            );

            match result {
                Err(StateError::InvalidAttribute { field, .. }) => assert_eq!(
                    field, test_case.expected_field,
                    "Test case '{}'",
                    test_case.name
                ),
                other => panic!("Test case '{}': unexpected result {:?}", test_case.name, other),
            }
            assert!(registry.is_empty(), "Test case '{}'", test_case.name);
        }
    }

    #[test]
    fn test_duplicate_declaration_propagates() {
        let registry = StateRegistry::new();
        let original =
            State::new("motd", "file.managed", &registry, attrs! { "user" => "root" }).unwrap();

        let result = State::new("motd", "file.absent", &registry, attrs! {});

        assert_eq!(
            result.unwrap_err(),
            StateError::DuplicateName {
                name: "motd".to_string()
            }
        );
        let kept = registry.get("motd").unwrap();
        assert!(Arc::ptr_eq(&kept, &original));
        assert_eq!(kept.func(), "file.managed");
    }

    #[test]
    fn test_as_dependency_list() {
        assert_eq!(
            as_dependency_list(Value::from("X")),
            Normalized::Wrapped(Value::Sequence(vec![Value::from("X")]))
        );
        assert_eq!(
            as_dependency_list(Value::Sequence(vec![])),
            Normalized::Unchanged(Value::Sequence(vec![]))
        );
        assert_eq!(
            as_dependency_list(Value::Null).into_value(),
            Value::Sequence(vec![Value::Null])
        );
    }
}
