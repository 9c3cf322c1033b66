// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod document;
mod factory;
mod registry;
mod state;
mod value;

pub mod consts;

pub use document::{aggregate, merge};
pub use factory::{StateFactory, StateFunction};
pub use registry::StateRegistry;
pub use state::{as_dependency_list, Attr, Normalized, State};
pub use value::{Attributes, Mapping, Value};
