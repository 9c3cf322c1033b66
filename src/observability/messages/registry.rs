// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for state registry events.
//!
//! This module contains message types for logging events related to:
//! * State registration
//! * Duplicate name rejection
//! * Registry reset
//! * Document aggregation across registries

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A state was inserted into a registry.
///
/// # Log Level
/// `debug!` - Routine bookkeeping
pub struct StateRegistered<'a> {
    pub name: &'a str,
    pub func: &'a str,
    pub registry_size: usize,
}

impl Display for StateRegistered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Registered state '{}' ({}), registry now holds {} states",
            self.name, self.func, self.registry_size
        )
    }
}

impl StructuredLog for StateRegistered<'_> {
    fn log(&self) {
        tracing::debug!(
            state = self.name,
            func = self.func,
            registry_size = self.registry_size,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "state_registered",
            span_name = name,
            state = self.name,
            func = self.func,
            registry_size = self.registry_size,
        )
    }
}

/// A declaration collided with an existing state name.
///
/// # Log Level
/// `warn!` - The caller receives the error, this records where it happened
///
/// # Example
/// ```
/// use statecraft::observability::messages::registry::DuplicateStateRejected;
///
/// let msg = DuplicateStateRejected { name: "webserver" };
/// tracing::warn!("{}", msg);
/// ```
pub struct DuplicateStateRejected<'a> {
    pub name: &'a str,
}

impl Display for DuplicateStateRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Rejected duplicate state declaration '{}'", self.name)
    }
}

impl StructuredLog for DuplicateStateRejected<'_> {
    fn log(&self) {
        tracing::warn!(state = self.name, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("duplicate_state", span_name = name, state = self.name)
    }
}

/// A registry was reset to empty.
///
/// # Log Level
/// `info!` - Lifecycle event
pub struct RegistryEmptied {
    pub cleared: usize,
}

impl Display for RegistryEmptied {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Emptied state registry, {} states cleared", self.cleared)
    }
}

impl StructuredLog for RegistryEmptied {
    fn log(&self) {
        tracing::info!(cleared = self.cleared, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("registry_emptied", span_name = name, cleared = self.cleared)
    }
}

/// Several registries are being merged into one document.
///
/// # Log Level
/// `info!` - Lifecycle event
pub struct RegistriesMerging {
    pub registry_count: usize,
    pub state_count: usize,
}

impl Display for RegistriesMerging {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Merging {} registries holding {} states",
            self.registry_count, self.state_count
        )
    }
}

impl StructuredLog for RegistriesMerging {
    fn log(&self) {
        tracing::info!(
            registry_count = self.registry_count,
            state_count = self.state_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "registries_merging",
            span_name = name,
            registry_count = self.registry_count,
            state_count = self.state_count,
        )
    }
}
