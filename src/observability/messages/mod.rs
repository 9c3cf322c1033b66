// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! # Organization
//!
//! * `registry` - registration, duplicate rejection, reset and merge events
//! * `state` - declaration validation and attribute normalization events

use std::fmt::Display;
use tracing::Span;

pub mod registry;
pub mod state;

/// A log message that knows its own level and structured fields.
pub trait StructuredLog: Display {
    /// Emit the message as a tracing event at its designated level.
    fn log(&self);

    /// Build a span carrying the same fields as the event.
    fn span(&self, name: &str) -> Span;
}
