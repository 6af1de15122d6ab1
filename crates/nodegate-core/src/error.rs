use thiserror::Error;

use crate::ident::IdentifierKind;

/// Rejection of a caller-supplied payload before anything reaches the graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid {kind} {value:?}: only [A-Za-z0-9_] allowed, not starting with a digit")]
    InvalidIdentifier { kind: IdentifierKind, value: String },

    #[error("Attribute key {key:?} is reserved")]
    ReservedAttribute { key: String },

    #[error("Unsupported value for attribute {key:?}: {reason}")]
    UnsupportedValue { key: String, reason: &'static str },

    #[error("Malformed request: {0}")]
    Payload(String),
}
