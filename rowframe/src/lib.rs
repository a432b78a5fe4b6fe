// Copyright 2025 the Rowframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory row tables of dynamically-typed values.
//!
//! A [`Table`] is an ordered list of [`Row`]s, and a row maps column names to [`Value`]s
//! (null, integer, float or text). Rows need not share keys; a missing key reads as
//! [`Value::Null`].
//!
//! This crate provides:
//! - column accessors and sums ([`Table::get_column`], [`Table::sum_column`]),
//! - column rewrites and projections ([`Table::set_column`], [`Table::columns`], ...),
//! - distinct values, partitions and equality filters,
//! - grouped float sums ([`Table::sum_and_group`]), and
//! - a stable single-column sort ([`Table::sort_by_in_place`]).
//!
//! Operations that read a column's type look only at the first row and expect the other
//! rows to agree, failing with [`TableError::TypeMismatch`] when they do not.
//!
//! Methods ending in `_in_place` mutate the table's rows and return `&mut Table`; every
//! other table-producing method leaves its input untouched and returns a deep copy.
//!
//! ```
//! use rowframe::{SortOrder, Table, Value, row};
//!
//! let mut t = Table::from(vec![
//!     row! { "x" => 2.0, "y" => 4.0, "s" => "a" },
//!     row! { "x" => 2.0, "y" => 3.0, "s" => "b" },
//!     row! { "x" => 3.0, "y" => 2.0, "s" => "a" },
//! ]);
//! let grouped = t.sum_and_group("s")?;
//! assert_eq!(grouped.get_column("y"), vec![Value::Float(6.0), Value::Float(3.0)]);
//!
//! t.sort_by_in_place("y", SortOrder::Asc)?;
//! assert_eq!(t.sum_column("x")?, 7.0);
//! # Ok::<(), rowframe::TableError>(())
//! ```

#![no_std]

extern crate alloc;

mod error;
mod group;
mod row;
mod sort;
mod table;
mod value;

pub use error::{Result, TableError};
pub use row::Row;
pub use sort::SortOrder;
pub use table::{Table, is_empty};
pub use value::{Value, ValueKind};
