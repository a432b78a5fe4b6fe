// Copyright 2025 the Rowframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dynamically-typed cell values.

extern crate alloc;

use alloc::string::String;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

/// A single cell of a [`Row`](crate::Row).
///
/// Integers and floats are distinct variants: grouped sums only accumulate
/// [`Value::Float`] columns, while [`Table::sum_column`](crate::Table::sum_column) and
/// sorting treat both as numeric.
///
/// Equality is total so values can be used as hash keys:
/// - numbers compare numerically across the two numeric variants (an integer equals a
///   float only when the float holds exactly that integer),
/// - `NaN` equals `NaN` and `-0.0` equals `0.0`,
/// - text compares by exact match, and `Null` equals `Null`.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Absent value. Reading a missing key yields this.
    #[default]
    Null,
    /// Integer number.
    Integer(i64),
    /// Floating-point number.
    Float(f64),
    /// Text string.
    Text(String),
}

/// The runtime tag of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// [`Value::Null`]
    Null,
    /// [`Value::Integer`]
    Integer,
    /// [`Value::Float`]
    Float,
    /// [`Value::Text`]
    Text,
}

impl ValueKind {
    /// Returns `true` for the kinds that coerce to `f64`.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }

    fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// Returns the runtime tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Integer(_) => ValueKind::Integer,
            Self::Float(_) => ValueKind::Float,
            Self::Text(_) => ValueKind::Text,
        }
    }

    /// Returns `true` if this is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Coerces a numeric value to `f64`.
    ///
    /// Returns `None` for `Null` and text. Integers beyond 2^53 are rounded.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Integer(i) => Some(i as f64),
            Self::Float(f) => Some(f),
            Self::Null | Self::Text(_) => None,
        }
    }

    /// Returns the float payload, if this is [`Value::Float`].
    pub fn as_float(&self) -> Option<f64> {
        match *self {
            Self::Float(f) => Some(f),
            _ => None,
        }
    }

    /// Returns the text payload, if this is [`Value::Text`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric ordering of two values that both coerce to `f64`.
    ///
    /// `NaN` sorts after every other number.
    pub(crate) fn cmp_numeric(a: f64, b: f64) -> Ordering {
        a.partial_cmp(&b)
            .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
    }
}

/// Canonical bits for float equality/hashing: one `NaN`, one zero.
fn canonical_bits(f: f64) -> u64 {
    if f.is_nan() {
        f64::NAN.to_bits()
    } else if f == 0.0 {
        0.0_f64.to_bits()
    } else {
        f.to_bits()
    }
}

/// Returns the integer a float holds exactly, if any.
fn exact_integer(f: f64) -> Option<i64> {
    // 2^63 is exactly representable; the open upper bound keeps the cast in range.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if !(-LIMIT..LIMIT).contains(&f) {
        return None;
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "range checked above, truncation is detected by the round trip"
    )]
    let i = f as i64;
    (i as f64 == f).then_some(i)
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => canonical_bits(*a) == canonical_bits(*b),
            (Self::Integer(i), Self::Float(f)) | (Self::Float(f), Self::Integer(i)) => {
                exact_integer(*f) == Some(*i)
            }
            (Self::Text(a), Self::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Integral floats hash like the integer they equal.
        match self {
            Self::Null => state.write_u8(0),
            Self::Integer(i) => {
                state.write_u8(1);
                i.hash(state);
            }
            Self::Float(f) => match exact_integer(*f) {
                Some(i) => {
                    state.write_u8(1);
                    i.hash(state);
                }
                None => {
                    state.write_u8(2);
                    canonical_bits(*f).hash(state);
                }
            },
            Self::Text(s) => {
                state.write_u8(3);
                s.hash(state);
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(v.into())
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Integer(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v.into())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Null
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;
    use core::hash::BuildHasher;

    use hashbrown::DefaultHashBuilder;

    use super::*;

    #[test]
    fn integers_equal_exact_floats_only() {
        assert_eq!(Value::Integer(1), Value::Float(1.0));
        assert_ne!(Value::Integer(1), Value::Float(1.5));
        assert_ne!(
            Value::Integer(9_007_199_254_740_993),
            Value::Float(9_007_199_254_740_992.0)
        );
    }

    #[test]
    fn equal_values_hash_equal_under_one_builder() {
        let s = DefaultHashBuilder::default();
        assert_eq!(
            s.hash_one(Value::Integer(2)),
            s.hash_one(Value::Float(2.0))
        );
        assert_eq!(
            s.hash_one(Value::Float(-0.0)),
            s.hash_one(Value::Float(0.0))
        );
        assert_eq!(
            s.hash_one(Value::Float(f64::NAN)),
            s.hash_one(Value::Float(f64::NAN))
        );
    }

    #[test]
    fn float_equality_is_total() {
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert_eq!(Value::Float(-0.0), Value::Float(0.0));
    }

    #[test]
    fn different_kinds_are_not_equal() {
        assert_ne!(Value::Null, Value::Integer(0));
        assert_ne!(Value::Text("1".to_string()), Value::Integer(1));
        assert_eq!(Value::Null, Value::Null);
    }

    #[test]
    fn coercion_covers_numbers_only() {
        assert_eq!(Value::Integer(-3).as_f64(), Some(-3.0));
        assert_eq!(Value::Float(1.5).as_f64(), Some(1.5));
        assert_eq!(Value::from("x").as_f64(), None);
        assert_eq!(Value::Null.as_f64(), None);
        assert!(ValueKind::Integer.is_numeric());
        assert!(!ValueKind::Text.is_numeric());
    }

    #[test]
    fn options_convert_to_null() {
        assert_eq!(Value::from(None::<f64>), Value::Null);
        assert_eq!(Value::from(Some("a")), Value::from("a"));
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn nan_sorts_last() {
        assert_eq!(Value::cmp_numeric(f64::NAN, 1.0), Ordering::Greater);
        assert_eq!(Value::cmp_numeric(1.0, 2.0), Ordering::Less);
        assert_eq!(Value::cmp_numeric(f64::NAN, f64::NAN), Ordering::Equal);
    }
}
