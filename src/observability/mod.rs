// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! All diagnostic output of the builder goes through message types in
//! [`messages`]. Each message is a small struct implementing `Display` plus
//! [`messages::StructuredLog`], so the human-readable text and the structured
//! fields are defined in one place.
//!
//! The library never installs a subscriber. Binaries decide where events go
//! (the bundled demo uses `tracing-subscriber` with `RUST_LOG`).
//!
//! # Usage
//!
//! ```rust
//! use statecraft::observability::messages::registry::DuplicateStateRejected;
//! use statecraft::observability::messages::StructuredLog;
//!
//! let msg = DuplicateStateRejected { name: "/etc/motd" };
//! msg.log();
//! assert_eq!(msg.to_string(), "Rejected duplicate state declaration '/etc/motd'");
//! ```

pub mod messages;
