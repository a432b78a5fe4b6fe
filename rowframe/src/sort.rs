// Copyright 2025 the Rowframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stable in-place sorting by one column.

extern crate alloc;

use alloc::string::String;
use core::cmp::Ordering;
use core::str::FromStr;

use crate::{Result, Row, Table, TableError, Value, ValueKind};

/// Sorting order for [`Table::sort_by_in_place`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl FromStr for SortOrder {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(TableError::UnknownSortOrder {
                order: String::from(s),
            }),
        }
    }
}

type Comparator = fn(&Value, &Value) -> Ordering;

/// Picks the comparator for a column kind and order.
///
/// Text columns compare only the first character of each string, and `Desc` uses the
/// same ascending comparator as `Asc`. Callers relying on full-string or descending text
/// order must sort themselves.
fn comparator(kind: ValueKind, order: SortOrder) -> Option<Comparator> {
    match (kind, order) {
        (ValueKind::Integer | ValueKind::Float, SortOrder::Asc) => Some(numeric_asc),
        (ValueKind::Integer | ValueKind::Float, SortOrder::Desc) => Some(numeric_desc),
        // Text ignores the order: both compare first characters ascending.
        (ValueKind::Text, _) => Some(first_char_asc),
        (ValueKind::Null, _) => None,
    }
}

// Comparators only see values that passed `Table::check_column_kind`.

fn numeric(v: &Value) -> f64 {
    v.as_f64().unwrap_or(f64::NAN)
}

fn numeric_asc(a: &Value, b: &Value) -> Ordering {
    Value::cmp_numeric(numeric(a), numeric(b))
}

fn numeric_desc(a: &Value, b: &Value) -> Ordering {
    numeric_asc(b, a)
}

fn first_char_asc(a: &Value, b: &Value) -> Ordering {
    let first = |v: &Value| v.as_str().and_then(|s| s.chars().next());
    first(a).cmp(&first(b))
}

impl Table {
    /// Sorts the rows by column `name`, in place and stably.
    ///
    /// The comparator is chosen from the kind of the first row's value:
    /// - integers and floats compare numerically in the requested order,
    /// - text compares **only the first character**, ascending, for both orders; empty
    ///   strings sort first,
    /// - `Null` (or a missing key) selects no comparator and leaves the rows as they are.
    ///
    /// # Errors
    ///
    /// [`TableError::TypeMismatch`] if a row's value does not match the first row's kind.
    /// The table is not reordered in that case.
    pub fn sort_by_in_place(&mut self, name: &str, order: SortOrder) -> Result<&mut Self> {
        tracing::trace!(column = name, ?order, rows = self.len(), "sort");
        let Some(first) = self.first() else {
            return Ok(self);
        };
        let kind = first.get(name).kind();
        let Some(cmp) = comparator(kind, order) else {
            tracing::debug!(column = name, %kind, "no comparator for column, order unchanged");
            return Ok(self);
        };
        tracing::debug!(column = name, %kind, ?order, "sorting");

        self.check_column_kind(name, kind)?;
        self.rows_mut()
            .sort_by(|a: &Row, b: &Row| cmp(a.get(name), b.get(name)));
        Ok(self)
    }
}
