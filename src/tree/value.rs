// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

/// Open attribute value: string, number, boolean, null, mapping or sequence.
pub type Value = serde_yaml::Value;

/// Insertion-ordered mapping used for every document fragment.
pub type Mapping = serde_yaml::Mapping;

/// Raw keyword attributes exactly as the caller supplied them.
pub type Attributes = HashMap<String, Value>;

/// Builds an [`Attributes`] map from `key => value` pairs.
///
/// Values go through `Into<Value>`, so strings, numbers, booleans, vectors
/// and reference fragments can be mixed freely.
///
/// ```
/// use statecraft::{attrs, Value};
///
/// let attributes = attrs! {
///     "owner" => "root",
///     "mode" => 644,
///     "makedirs" => true,
/// };
///
/// assert_eq!(attributes.len(), 3);
/// assert_eq!(attributes["owner"], Value::from("root"));
/// ```
#[macro_export]
macro_rules! attrs {
    () => {
        $crate::Attributes::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut attributes = $crate::Attributes::new();
        $(
            attributes.insert(
                ::std::string::String::from($key),
                ::std::convert::Into::<$crate::Value>::into($value),
            );
        )+
        attributes
    }};
}
