// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for state declaration events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A declaration was rejected before reaching the registry.
///
/// # Log Level
/// `warn!` - Caller contract violation
pub struct DeclarationRejected<'a> {
    pub field: &'a str,
    pub reason: &'a str,
}

impl Display for DeclarationRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Rejected state declaration, invalid {}: {}",
            self.field, self.reason
        )
    }
}

impl StructuredLog for DeclarationRejected<'_> {
    fn log(&self) {
        tracing::warn!(field = self.field, reason = self.reason, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "declaration_rejected",
            span_name = name,
            field = self.field,
            reason = self.reason,
        )
    }
}

/// A lone dependency value was wrapped into a one-element list.
///
/// # Log Level
/// `trace!` - Normalization detail
///
/// # Example
/// ```
/// use statecraft::observability::messages::state::DependencyWrapped;
///
/// let msg = DependencyWrapped { state: "nginx", key: "require" };
/// tracing::trace!("{}", msg);
/// ```
pub struct DependencyWrapped<'a> {
    pub state: &'a str,
    pub key: &'a str,
}

impl Display for DependencyWrapped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Wrapped single '{}' dependency of state '{}' into a list",
            self.key, self.state
        )
    }
}

impl StructuredLog for DependencyWrapped<'_> {
    fn log(&self) {
        tracing::trace!(state = self.state, key = self.key, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "dependency_wrapped",
            span_name = name,
            state = self.state,
            key = self.key,
        )
    }
}
