//! Identifier sanitizer for the query positions Cypher cannot parameterize.
//!
//! Labels and relationship types are spliced into query text, so every one
//! of them passes through [`Identifier::parse`] first. Attribute keys travel
//! as map parameters but are held to the same character set so the stored
//! graph stays addressable from hand-written Cypher.

use std::fmt;

use crate::error::ValidationError;

/// Which query position an identifier is destined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    Label,
    RelationshipType,
    AttributeKey,
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Label => "label",
            Self::RelationshipType => "relationship type",
            Self::AttributeKey => "attribute key",
        };
        f.write_str(s)
    }
}

/// A string proven safe to interpolate into a Cypher fragment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    pub fn parse(kind: IdentifierKind, raw: &str) -> Result<Self, ValidationError> {
        let mut chars = raw.chars();
        let valid = match chars.next() {
            Some(first) => {
                (first.is_ascii_alphabetic() || first == '_')
                    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            None => false,
        };

        if valid {
            Ok(Self(raw.to_string()))
        } else {
            Err(ValidationError::InvalidIdentifier {
                kind,
                value: raw.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Storage form of a node label: first character uppercased, rest untouched.
pub fn storage_label(raw: &str) -> Result<Identifier, ValidationError> {
    let mut chars = raw.chars();
    let capitalized: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    Identifier::parse(IdentifierKind::Label, &capitalized)
}
