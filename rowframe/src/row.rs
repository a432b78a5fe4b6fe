// Copyright 2025 the Rowframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single row: column name to [`Value`].

extern crate alloc;

use alloc::string::String;

use hashbrown::HashMap;

use crate::Value;

static NULL: Value = Value::Null;

/// A mapping from column name to [`Value`].
///
/// Rows in one table need not share keys. Reading a key the row does not have yields
/// [`Value::Null`] and never inserts it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: HashMap<String, Value>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Returns the value under `name`, or `Null` if the row lacks the key.
    pub fn get(&self, name: &str) -> &Value {
        self.cells.get(name).unwrap_or(&NULL)
    }

    /// Returns the value under `name` only if the key is present.
    pub fn get_present(&self, name: &str) -> Option<&Value> {
        self.cells.get(name)
    }

    /// Returns a mutable reference to the value under `name`, if present.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.cells.get_mut(name)
    }

    /// Returns `true` if the row has the key (even if it maps to `Null`).
    pub fn contains(&self, name: &str) -> bool {
        self.cells.contains_key(name)
    }

    /// Stores `value` under `name`, returning the previous value if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.cells.insert(name.into(), value.into())
    }

    /// Removes `name` from the row. Missing keys are ignored.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.cells.remove(name)
    }

    /// Number of keys in the row.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the row has no keys.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates over `(name, value)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Row {
    fn from(cells: [(K, V); N]) -> Self {
        cells.into_iter().collect()
    }
}

/// Builds a [`Row`] from `name => value` pairs.
///
/// ```
/// let row = rowframe::row! { "x" => 2.0, "s" => "a" };
/// assert_eq!(row.get("s").as_str(), Some("a"));
/// ```
#[macro_export]
macro_rules! row {
    () => { $crate::Row::new() };
    ($($name:expr => $value:expr),+ $(,)?) => {
        $crate::Row::new()$(.with($name, $value))+
    };
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn missing_keys_read_as_null_without_inserting() {
        let row = Row::new().with("n", 1.0);
        assert!(row.get("missing").is_null());
        assert!(!row.contains("missing"));
        assert_eq!(row.len(), 1);
    }

    #[test]
    fn present_null_is_distinct_from_missing() {
        let row = Row::new().with("k", ());
        assert!(row.contains("k"));
        assert_eq!(row.get_present("k"), Some(&Value::Null));
        assert_eq!(row.get_present("other"), None);
    }

    #[test]
    fn macro_and_array_build_equal_rows() {
        let a = row! { "x" => 2.0, "s" => "a" };
        let b = Row::from([("x", Value::Float(2.0)), ("s", Value::from("a"))]);
        assert_eq!(a, b);
        assert!(row! {}.is_empty());
    }
}
