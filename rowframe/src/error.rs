// Copyright 2025 the Rowframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Table operation errors.

extern crate alloc;

use alloc::string::String;

use thiserror::Error;

use crate::ValueKind;

/// Result type for table operations.
pub type Result<T> = core::result::Result<T, TableError>;

/// Errors returned by table operations.
///
/// Operations that probe the first row to decide how to treat a column fail fast: no
/// partially-built table is returned alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// A value does not have the kind the first-row probe selected for its column.
    #[error("column `{column}` row {row}: expected {expected} value, found {found}")]
    TypeMismatch {
        /// Column being read.
        column: String,
        /// Index of the offending row.
        row: usize,
        /// Kind the operation required.
        expected: ValueKind,
        /// Kind actually found.
        found: ValueKind,
    },

    /// The operation reads the first row and cannot run on an empty table.
    #[error("`{operation}` requires a non-empty table")]
    EmptyTable {
        /// Name of the operation that was called.
        operation: &'static str,
    },

    /// A sort direction other than `asc` or `desc`.
    #[error("unknown sort order `{order}`, expected `asc` or `desc`")]
    UnknownSortOrder {
        /// The rejected input.
        order: String,
    },
}

impl TableError {
    pub(crate) fn type_mismatch(
        column: &str,
        row: usize,
        expected: ValueKind,
        found: ValueKind,
    ) -> Self {
        Self::TypeMismatch {
            column: column.into(),
            row,
            expected,
            found,
        }
    }
}
