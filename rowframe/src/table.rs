// Copyright 2025 the Rowframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owned row table and its column accessors and projections.
//!
//! Operations come in two families:
//! - `&self` methods return a new table built from deep copies of the input rows, and
//! - `*_in_place` methods mutate the table's rows and return `&mut Self` for chaining.
//!
//! The split is per operation and deliberate: [`Table::set_column`] copies while
//! [`Table::add_column_in_place`] mutates.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Index;

use crate::{Result, Row, TableError, Value, ValueKind};

/// Returns `true` if the table is absent or has no rows.
pub fn is_empty(table: Option<&Table>) -> bool {
    let Some(table) = table else {
        tracing::debug!("absent table reads as empty");
        return true;
    };
    table.is_empty()
}

/// An ordered sequence of [`Row`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns the rows in order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Iterates over the rows in order.
    pub fn iter(&self) -> core::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Returns the first row, which decides how typed operations treat a column.
    pub fn first(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// Appends a row.
    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Consumes the table, returning its rows.
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut Vec<Row> {
        &mut self.rows
    }

    /// Lazily yields the value of `name` for every row, `Null` where the key is missing.
    pub fn column<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.rows.iter().map(move |row| row.get(name))
    }

    /// Returns one value per row for column `name`, in row order.
    ///
    /// Rows without the key contribute `Null`; an empty table yields an empty vector.
    pub fn get_column(&self, name: &str) -> Vec<Value> {
        self.column(name).cloned().collect()
    }

    /// Sums column `name` as `f64`.
    ///
    /// The first row decides whether the column is numeric. If its value is an integer or
    /// a float, every row is coerced to `f64` and summed; a later value that does not
    /// coerce is a [`TableError::TypeMismatch`]. If the first value is text or `Null`, the
    /// sum is `0.0` and no row is inspected. An empty table also sums to `0.0`.
    pub fn sum_column(&self, name: &str) -> Result<f64> {
        tracing::trace!(column = name, rows = self.len(), "sum_column");
        let Some(first) = self.first() else {
            return Ok(0.0);
        };
        let kind = first.get(name).kind();
        if !kind.is_numeric() {
            tracing::debug!(column = name, %kind, "non-numeric column sums to zero");
            return Ok(0.0);
        }

        let mut total = 0.0;
        for (i, row) in self.rows.iter().enumerate() {
            let value = row.get(name);
            let Some(v) = value.as_f64() else {
                return Err(TableError::type_mismatch(name, i, kind, value.kind()));
            };
            total += v;
        }
        Ok(total)
    }

    /// Returns a new table where each row's `name` value is replaced by `f(old)`.
    ///
    /// Every row is deep-copied before `f` runs, so `self` is left untouched. A row
    /// without the key passes `Null` to `f` and gains the key.
    pub fn set_column<F>(&self, name: &str, mut f: F) -> Self
    where
        F: FnMut(&Value) -> Value,
    {
        tracing::trace!(column = name, rows = self.len(), "set_column");
        self.rows
            .iter()
            .map(|row| {
                let mut copy = row.clone();
                let next = f(row.get(name));
                copy.insert(name, next);
                copy
            })
            .collect()
    }

    /// Fallible [`Table::set_column`].
    ///
    /// The first error returned by `f` aborts the operation and is returned unchanged.
    pub fn try_set_column<F, E>(&self, name: &str, mut f: F) -> core::result::Result<Self, E>
    where
        F: FnMut(&Value) -> core::result::Result<Value, E>,
    {
        tracing::trace!(column = name, rows = self.len(), "try_set_column");
        self.rows
            .iter()
            .map(|row| {
                let mut copy = row.clone();
                copy.insert(name, f(row.get(name))?);
                Ok(copy)
            })
            .collect()
    }

    /// Stores `f(row[source])` under `new` in every row, mutating the rows in place.
    pub fn add_column_in_place<F>(&mut self, source: &str, new: &str, mut f: F) -> &mut Self
    where
        F: FnMut(&Value) -> Value,
    {
        tracing::trace!(source, new, rows = self.len(), "add_column_in_place");
        for row in &mut self.rows {
            let value = f(row.get(source));
            row.insert(new, value);
        }
        self
    }

    /// Fallible [`Table::add_column_in_place`].
    ///
    /// Rows before the one where `f` failed keep their new column; nothing is rolled back.
    pub fn try_add_column_in_place<F, E>(
        &mut self,
        source: &str,
        new: &str,
        mut f: F,
    ) -> core::result::Result<&mut Self, E>
    where
        F: FnMut(&Value) -> core::result::Result<Value, E>,
    {
        tracing::trace!(source, new, rows = self.len(), "try_add_column");
        for row in &mut self.rows {
            let value = f(row.get(source))?;
            row.insert(new, value);
        }
        Ok(self)
    }

    /// Deletes the named keys from every row. Missing keys are ignored.
    pub fn remove_columns_in_place<S: AsRef<str>>(&mut self, names: &[S]) -> &mut Self {
        tracing::trace!(columns = names.len(), rows = self.len(), "remove_columns");
        for row in &mut self.rows {
            for name in names {
                row.remove(name.as_ref());
            }
        }
        self
    }

    /// Returns a new table holding only the named keys of each row.
    ///
    /// Every output row has every requested key; keys the source row lacked map to
    /// `Null`.
    pub fn columns<S: AsRef<str>>(&self, names: &[S]) -> Self {
        tracing::trace!(columns = names.len(), rows = self.len(), "columns");
        self.rows
            .iter()
            .map(|row| {
                names
                    .iter()
                    .map(|name| {
                        let name = name.as_ref();
                        (String::from(name), row.get(name).clone())
                    })
                    .collect::<Row>()
            })
            .collect()
    }

    /// Checks that every row's `name` value matches the first-row probe `kind`.
    ///
    /// Numeric kinds accept any value that coerces to `f64`.
    pub(crate) fn check_column_kind(&self, name: &str, kind: ValueKind) -> Result<()> {
        for (i, row) in self.rows.iter().enumerate() {
            let found = row.get(name).kind();
            let ok = if kind.is_numeric() {
                found.is_numeric()
            } else {
                found == kind
            };
            if !ok {
                return Err(TableError::type_mismatch(name, i, kind, found));
            }
        }
        Ok(())
    }
}

impl Index<usize> for Table {
    type Output = Row;

    fn index(&self, index: usize) -> &Row {
        &self.rows[index]
    }
}

impl From<Vec<Row>> for Table {
    fn from(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}

impl FromIterator<Row> for Table {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Table {
    type Item = Row;
    type IntoIter = alloc::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = core::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
