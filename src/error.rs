//! Error types for the recast specialization engine

use crate::value::{FieldValue, ValueKind};
use thiserror::Error;

/// Main error type for recast
#[derive(Error, Debug)]
pub enum Error {
    /// A type name did not resolve to any registered type
    #[error("TypeNotResolvable: no type registered under '{0}'")]
    TypeNotResolvable(String),

    /// A type declares no zero-argument constructor
    #[error("NoUsableConstructor: type '{0}' declares no usable constructor")]
    NoUsableConstructor(&'static str),

    /// A record is missing a field required by the target type
    #[error("MissingField: record has no entry '{field}' required by '{type_name}'")]
    MissingField {
        type_name: &'static str,
        field: &'static str,
    },

    /// A value could not be coerced to the field's kind
    #[error("TypeMismatch: cannot read {value} as {kind} for field '{field}'")]
    TypeMismatch {
        field: String,
        kind: ValueKind,
        value: String,
    },

    /// A property cannot be intercepted by a proxy shape
    #[error("PropertyNotOverridable: property '{property}' of '{type_name}' is not overridable")]
    PropertyNotOverridable {
        type_name: &'static str,
        property: &'static str,
    },

    /// A property selector does not denote a property of the declared type
    #[error("InvalidPropertySelector: selector does not denote a property of '{0}'")]
    InvalidPropertySelector(&'static str),

    /// A mutation-observer callback failed; the remaining callbacks in its
    /// sequence were not run
    #[error("CallbackFailure: {0}")]
    CallbackFailure(String),

    /// A function name did not resolve within a registered dispatch type
    #[error("UnknownFunction: '{type_name}' has no function '{function}'")]
    UnknownFunction { type_name: String, function: String },

    /// Malformed record-set input
    #[error("RecordFormatError: {source}")]
    RecordFormatError {
        #[from]
        source: serde_json::Error,
    },

    /// Internal engine error
    #[error("InternalError: {0}")]
    InternalError(String),

    /// IO error
    #[error("IOError: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a MissingField error
    pub fn missing_field(type_name: &'static str, field: &'static str) -> Self {
        Error::MissingField { type_name, field }
    }

    /// Create a TypeMismatch error for a raw string that failed coercion
    pub fn type_mismatch(field: impl Into<String>, kind: ValueKind, raw: &str) -> Self {
        Error::TypeMismatch {
            field: field.into(),
            kind,
            value: format!("'{}'", raw),
        }
    }

    /// Create a TypeMismatch error for a field value of the wrong variant
    pub fn value_mismatch(field: impl Into<String>, kind: ValueKind, value: &FieldValue) -> Self {
        Error::TypeMismatch {
            field: field.into(),
            kind,
            value: format!("{} value", value.kind_name()),
        }
    }

    /// Create a CallbackFailure error
    pub fn callback_failure(message: impl Into<String>) -> Self {
        Error::CallbackFailure(message.into())
    }

    /// Create an InternalError
    pub fn internal(message: impl Into<String>) -> Self {
        Error::InternalError(message.into())
    }
}

/// Result type alias for recast
pub type Result<T> = std::result::Result<T, Error>;
