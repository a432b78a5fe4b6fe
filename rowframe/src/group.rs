// Copyright 2025 the Rowframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Distinct values, partitioning, equality filters and grouped sums.
//!
//! Every grouping here orders groups by the first appearance of their key and keeps the
//! source row order inside each group. Keys compare with [`Value`]'s equality.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::hash_map::Entry;
use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use crate::{Result, Row, Table, TableError, Value, ValueKind};

impl Table {
    /// Returns the distinct values of column `name` in first-seen order.
    ///
    /// Rows without the key contribute `Null`.
    pub fn get_unique_values(&self, name: &str) -> Vec<Value> {
        tracing::trace!(column = name, rows = self.len(), "get_unique_values");
        let mut seen: HashSet<&Value> = HashSet::new();
        let mut out = Vec::new();
        for value in self.column(name) {
            if seen.insert(value) {
                out.push(value.clone());
            }
        }
        out
    }

    /// Partitions the rows by their value of `name`.
    ///
    /// Partitions are ordered by first appearance of their key; rows keep their source
    /// order within a partition. Rows are copied, `self` is untouched.
    pub fn split_by_values(&self, name: &str) -> Vec<Self> {
        tracing::trace!(column = name, rows = self.len(), "split_by_values");
        let mut index: HashMap<&Value, usize> = HashMap::new();
        let mut parts: Vec<Self> = Vec::new();
        for row in self.iter() {
            let slot = match index.entry(row.get(name)) {
                Entry::Occupied(e) => *e.get(),
                Entry::Vacant(e) => {
                    parts.push(Self::new());
                    *e.insert(parts.len() - 1)
                }
            };
            parts[slot].push(row.clone());
        }
        parts
    }

    /// Returns a new table with the rows whose `name` value equals `value`, in order.
    pub fn get_elements_with_value(&self, name: &str, value: &Value) -> Self {
        tracing::trace!(column = name, rows = self.len(), "filter by value");
        self.iter()
            .filter(|row| row.get(name) == value)
            .cloned()
            .collect()
    }

    /// Groups rows by `name` and sums the float columns within each group.
    ///
    /// The summed columns are fixed from the first row: every key other than `name`
    /// whose value is a [`Value::Float`]. All other columns, including integer ones, are
    /// carried from the first row of each group. Groups are returned in first-appearance
    /// order, one row per distinct key.
    ///
    /// # Errors
    ///
    /// - [`TableError::EmptyTable`] if the table has no rows; the first row is required
    ///   to pick the summed columns.
    /// - [`TableError::TypeMismatch`] if a later row lacks a summed column or holds a
    ///   non-float value in it.
    pub fn sum_and_group(&self, name: &str) -> Result<Self> {
        self.sum_and_group_except(name, &[])
    }

    /// Like [`Table::sum_and_group`], but the columns in `keep` are never summed; they are
    /// carried from the first row of each group.
    pub fn sum_and_group_except(&self, name: &str, keep: &[&str]) -> Result<Self> {
        tracing::trace!(column = name, rows = self.len(), "sum_and_group");
        let Some(first) = self.first() else {
            return Err(TableError::EmptyTable {
                operation: "sum_and_group",
            });
        };

        let summed: SmallVec<[&str; 8]> = first
            .iter()
            .filter(|&(col, value)| {
                col != name && !keep.contains(&col) && value.kind() == ValueKind::Float
            })
            .map(|(col, _)| col)
            .collect();
        tracing::debug!(column = name, summed = ?summed, "summing float columns");

        let mut index: HashMap<&Value, usize> = HashMap::new();
        let mut groups: Vec<Row> = Vec::new();
        for (i, row) in self.iter().enumerate() {
            match index.entry(row.get(name)) {
                Entry::Vacant(e) => {
                    e.insert(groups.len());
                    groups.push(row.clone());
                }
                Entry::Occupied(e) => {
                    let acc = &mut groups[*e.get()];
                    for &col in &summed {
                        add_float(acc, row, col, i)?;
                    }
                }
            }
        }
        Ok(groups.into())
    }
}

/// `acc[col] += row[col]`, both required to be floats.
fn add_float(acc: &mut Row, row: &Row, col: &str, i: usize) -> Result<()> {
    let rhs = row.get(col);
    let Some(rhs) = rhs.as_float() else {
        return Err(TableError::type_mismatch(
            col,
            i,
            ValueKind::Float,
            rhs.kind(),
        ));
    };
    match acc.get_mut(col) {
        Some(Value::Float(lhs)) => {
            *lhs += rhs;
            Ok(())
        }
        // Accumulators start as copies of a group's first row, which may differ from the
        // table's first row.
        other => {
            let found = other.map_or(ValueKind::Null, |v| v.kind());
            Err(TableError::TypeMismatch {
                column: String::from(col),
                row: i,
                expected: ValueKind::Float,
                found,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::row;

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().copied().map(Value::Integer).collect()
    }

    fn texts(values: &[&str]) -> Vec<Value> {
        values.iter().copied().map(Value::from).collect()
    }

    fn tagged() -> Table {
        Table::from(vec![
            row! { "n" => 3, "s" => "a" },
            row! { "n" => 2, "s" => "b" },
            row! { "n" => 1, "s" => "c" },
            row! { "n" => 1, "s" => "d" },
            row! { "n" => 2, "s" => "e" },
            row! { "n" => 3, "s" => "f" },
        ])
    }

    fn sales() -> Table {
        Table::from(vec![
            row! { "x" => 2.0, "y" => 4.0, "s" => "a" },
            row! { "x" => 2.0, "y" => 3.0, "s" => "b" },
            row! { "x" => 3.0, "y" => 2.0, "s" => "a" },
            row! { "x" => 3.0, "y" => 1.0, "s" => "b" },
        ])
    }

    #[test]
    fn unique_values_keep_first_seen_order() {
        let t = Table::from(vec![
            row! { "n" => 1 },
            row! { "n" => 1 },
            row! { "n" => 2 },
            row! { "n" => 2 },
        ]);
        assert_eq!(t.get_unique_values("n"), ints(&[1, 2]));
        assert_eq!(tagged().get_unique_values("n"), ints(&[3, 2, 1]));
        assert!(Table::new().get_unique_values("n").is_empty());
    }

    #[test]
    fn unique_values_treat_missing_as_null_and_numbers_numerically() {
        let t = Table::from(vec![
            row! { "n" => 1 },
            row! {},
            row! { "n" => 1.0 },
            row! { "n" => () },
        ]);
        assert_eq!(
            t.get_unique_values("n"),
            vec![Value::Integer(1), Value::Null]
        );
    }

    #[test]
    fn split_groups_in_first_appearance_order() {
        let parts = tagged().split_by_values("n");
        assert_eq!(parts.len(), 3);
        let keys: Vec<Value> = parts.iter().map(|p| p[0].get("n").clone()).collect();
        assert_eq!(keys, ints(&[3, 2, 1]));
        assert_eq!(parts[0].get_column("s"), texts(&["a", "f"]));
        assert_eq!(parts[1].get_column("s"), texts(&["b", "e"]));
        assert_eq!(parts[2].get_column("s"), texts(&["c", "d"]));
        assert!(Table::new().split_by_values("n").is_empty());
    }

    #[test]
    fn elements_with_value_filter_in_order() {
        let t = Table::from(vec![
            row! { "x" => 1, "i" => 0 },
            row! { "x" => 0, "i" => 1 },
            row! { "x" => 1, "i" => 2 },
            row! { "x" => 0, "i" => 3 },
        ]);
        let ones = t.get_elements_with_value("x", &Value::Integer(1));
        assert_eq!(ones.get_column("i"), ints(&[0, 2]));
        assert!(t.get_elements_with_value("x", &Value::from(7)).is_empty());
        assert_eq!(t.len(), 4);
    }

    #[test]
    fn sum_and_group_sums_float_columns() {
        let out = sales().sum_and_group("s").unwrap();
        assert_eq!(
            out,
            Table::from(vec![
                row! { "x" => 5.0, "y" => 6.0, "s" => "a" },
                row! { "x" => 5.0, "y" => 4.0, "s" => "b" },
            ])
        );
    }

    #[test]
    fn sum_and_group_does_not_touch_source() {
        let t = sales();
        let before = t.clone();
        let _ = t.sum_and_group("s").unwrap();
        assert_eq!(t, before);
    }

    #[test]
    fn sum_and_group_carries_integer_columns() {
        let t = Table::from(vec![
            row! { "k" => "a", "count" => 1, "w" => 0.5 },
            row! { "k" => "a", "count" => 7, "w" => 0.25 },
        ]);
        let out = t.sum_and_group("k").unwrap();
        let expected = row! { "k" => "a", "count" => 1, "w" => 0.75 };
        assert_eq!(out, Table::from(vec![expected]));
    }

    #[test]
    fn sum_and_group_except_keeps_listed_columns() {
        let out = sales().sum_and_group_except("s", &["x"]).unwrap();
        assert_eq!(out.get_column("x"), vec![Value::Float(2.0); 2]);
        assert_eq!(
            out.get_column("y"),
            vec![Value::Float(6.0), Value::Float(4.0)]
        );
    }

    #[test]
    fn sum_and_group_on_empty_table_is_a_precondition_error() {
        assert_eq!(
            Table::new().sum_and_group("s"),
            Err(TableError::EmptyTable {
                operation: "sum_and_group"
            })
        );
    }

    #[test]
    fn sum_and_group_rejects_non_float_in_summed_column() {
        let mut t = sales();
        t.push(row! { "x" => 1, "y" => 1.0, "s" => "a" });
        assert_eq!(
            t.sum_and_group("s"),
            Err(TableError::type_mismatch(
                "x",
                4,
                ValueKind::Float,
                ValueKind::Integer
            ))
        );

        let mut t = sales();
        t.push(row! { "y" => 1.0, "s" => "b" });
        assert!(matches!(
            t.sum_and_group("s"),
            Err(TableError::TypeMismatch {
                row: 4,
                found: ValueKind::Null,
                ..
            })
        ));
    }

    #[test]
    fn sum_and_group_rejects_group_whose_first_row_lacks_a_summed_column() {
        let t = Table::from(vec![
            row! { "s" => "a", "y" => 1.0 },
            row! { "s" => "b" },
            row! { "s" => "b", "y" => 2.0 },
        ]);
        assert!(matches!(
            t.sum_and_group("s"),
            Err(TableError::TypeMismatch { row: 2, .. })
        ));
    }
}
