// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while declaring and registering states.

use thiserror::Error;

/// Errors that can occur while building a state tree.
///
/// Every failure is immediate and deterministic; repeating the same
/// declaration repeats the same error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// A state with this name already exists in the target registry.
    #[error("State name '{name}' is already declared")]
    DuplicateName {
        /// The colliding state name
        name: String,
    },

    /// A required field of the declaration is missing or malformed.
    #[error("Invalid {field}: {reason}")]
    InvalidAttribute {
        /// Which part of the declaration was rejected (name, func, operation, ...)
        field: &'static str,
        /// Human-readable reason for the rejection
        reason: String,
    },
}

impl StateError {
    pub(crate) fn duplicate(name: &str) -> Self {
        StateError::DuplicateName {
            name: name.to_string(),
        }
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        StateError::InvalidAttribute {
            field,
            reason: reason.into(),
        }
    }
}
