// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Aggregation of states into the document handed to the engine.
//!
//! The document maps each state name to `{func: [attrs]}`:
//!
//! ```yaml
//! webserver:
//!   pkg.installed:
//!     - name: nginx
//! ```

use crate::errors::StateError;
use crate::observability::messages::registry::{DuplicateStateRejected, RegistriesMerging};
use crate::observability::messages::StructuredLog;
use crate::tree::registry::StateRegistry;
use crate::tree::state::State;
use crate::tree::value::{Mapping, Value};

/// Build a document from explicitly held states, in the order given.
///
/// The states may come from different registries, so names are checked
/// again here.
///
/// # Errors
/// [`StateError::DuplicateName`] if two states share a name.
pub fn aggregate<I, S>(states: I) -> Result<Mapping, StateError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<State>,
{
    let mut document = Mapping::new();
    for state in states {
        let (name, body) = state.as_ref().serialize();
        let key = Value::String(name);
        if document.contains_key(&key) {
            let name = key.as_str().unwrap_or_default();
            DuplicateStateRejected { name }.log();
            return Err(StateError::duplicate(name));
        }
        document.insert(key, Value::Mapping(body));
    }
    Ok(document)
}

/// Combine several registries (for example one per worker thread) into one document.
///
/// Registries are taken in order, each in declaration order.
///
/// # Errors
/// [`StateError::DuplicateName`] if a name is declared in more than one registry.
pub fn merge(registries: &[StateRegistry]) -> Result<Mapping, StateError> {
    let states: Vec<_> = registries.iter().flat_map(StateRegistry::states).collect();

    let merging = RegistriesMerging {
        registry_count: registries.len(),
        state_count: states.len(),
    };
    let _span = merging.span("merge").entered();
    merging.log();

    aggregate(states)
}
