//! Error types for the three core calls (`parse`, `translate`, `emit`) and for registry setup.
//!
//! Every document error names the JSON path it was raised at; nothing here ever says
//! "invalid input" without a location.

use thiserror::Error;

use crate::ident::InvalidIdentifier;
use crate::registry::Category;
use crate::value::JsonPath;

/// The input text is not well-formed JSON.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed input at line {line}, column {column}: {message}")]
pub struct MalformedInputError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl From<serde_json::Error> for MalformedInputError {
    fn from(error: serde_json::Error) -> Self {
        // serde_json appends the position; it is already carried in `line`/`column`
        let full = error.to_string();
        let position = format!(" at line {} column {}", error.line(), error.column());
        let message = full.strip_suffix(&position).unwrap_or(&full).to_string();
        Self { line: error.line(), column: error.column(), message }
    }
}

/// A node of an otherwise well-formed document does not match the loot-table shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {reason}")]
pub struct SchemaError {
    pub path: JsonPath,
    pub reason: SchemaErrorKind,
}

impl SchemaError {
    pub fn new(path: JsonPath, reason: SchemaErrorKind) -> Self {
        Self { path, reason }
    }

    /// The unresolved discriminator, when this error is an unknown-kind failure.
    pub fn unknown_kind(&self) -> Option<&UnknownKindError> {
        match &self.reason {
            SchemaErrorKind::UnknownKind(unknown) => Some(unknown),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaErrorKind {
    #[error("missing required field `{0}`")]
    MissingField(String),
    #[error("missing discriminator field `{field}` on {category}")]
    MissingDiscriminator {
        category: Category,
        field: &'static str,
    },
    #[error("expected {expected}, found {found}")]
    WrongShape {
        expected: &'static str,
        found: &'static str,
    },
    #[error("{0}")]
    UnknownKind(UnknownKindError),
    #[error("`{0}` must contain at least one element")]
    EmptyList(String),
    #[error("invalid identifier `{0}`")]
    InvalidIdentifier(String),
    #[error("value {value} is out of range, expected {expected}")]
    OutOfRange {
        value: String,
        expected: &'static str,
    },
    #[error("{0}")]
    InvalidValue(String),
}

/// A discriminator with no registered converter. Reported through [`SchemaError`] so it
/// carries the path of the node that named it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {category} kind `{kind}`")]
pub struct UnknownKindError {
    pub category: Category,
    pub kind: String,
}

/// The same (kind, category) pair was registered twice. Startup-only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{category} kind `{kind}` is already registered")]
pub struct DuplicateRegistrationError {
    pub category: Category,
    pub kind: String,
}

/// Startup failure while filling a [`crate::registry::Registry`]. A programmer error, never a
/// document error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error(transparent)]
    Duplicate(#[from] DuplicateRegistrationError),
    #[error("cannot register {category} kind: {source}")]
    InvalidKind {
        category: Category,
        source: InvalidIdentifier,
    },
}

/// Umbrella over everything a full `parse → translate → emit` run can fail with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    MalformedInput(#[from] MalformedInputError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Registration(#[from] RegistrationError),
}
