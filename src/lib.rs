// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Declarative builder for configuration-management state trees.
//!
//! States are declared through per-module [`StateFactory`] values, checked for
//! unique names by a [`StateRegistry`], and serialized into the nested
//! document a configuration-management engine consumes.
//!
//! ```
//! use statecraft::{attrs, StateFactory, StateRegistry, Value};
//!
//! let registry = StateRegistry::new();
//! let pkg = StateFactory::new("pkg", &registry);
//!
//! pkg.build("installed", "webserver", attrs! { "name" => "nginx" }).unwrap();
//!
//! let expected: Value =
//!     serde_yaml::from_str("webserver:\n  pkg.installed:\n    - name: nginx\n").unwrap();
//! assert_eq!(Value::Mapping(registry.serialize()), expected);
//! ```

pub mod errors;        // error handling
pub mod observability; // structured log messages
pub mod tree;          // registry, states, factories

pub use errors::StateError;
pub use tree::{
    aggregate, merge, Attr, Attributes, Mapping, State, StateFactory, StateFunction,
    StateRegistry, Value,
};
