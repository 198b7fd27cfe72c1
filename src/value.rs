//! Field values and value kinds
//!
//! This module defines the runtime representation of field values moved
//! between records, typed instances, and proxy callbacks. Records only ever
//! carry strings, but the kind system keeps the coercion contract honest for
//! non-string fields.

use crate::error::{Error, Result};
use std::fmt;

/// The kind of a field, as declared by its owning type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// UTF-8 string
    Str,
    /// Signed 64-bit integer
    Int,
}

impl ValueKind {
    /// Coerce a raw record value into this kind.
    ///
    /// Fails with `TypeMismatch` when the raw text cannot be read as the
    /// kind. String coercion never fails.
    pub fn coerce(self, field: &str, raw: &str) -> Result<FieldValue> {
        match self {
            ValueKind::Str => Ok(FieldValue::Str(raw.to_string())),
            ValueKind::Int => raw
                .trim()
                .parse::<i64>()
                .map(FieldValue::Int)
                .map_err(|_| Error::type_mismatch(field, ValueKind::Int, raw)),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Str => write!(f, "str"),
            ValueKind::Int => write!(f, "int"),
        }
    }
}

/// A value held by a field or observed by a mutation callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Absent value; the state of a proxied property before first assignment
    Null,
    /// String value
    Str(String),
    /// Integer value
    Int(i64),
}

impl FieldValue {
    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Name of the variant, used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Str(_) => "str",
            FieldValue::Int(_) => "int",
        }
    }

    /// Borrow the string contents, if any
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Integer contents, if any
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "<null>"),
            FieldValue::Str(s) => write!(f, "{}", s),
            FieldValue::Int(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Str(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Str(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Int(n)
    }
}
