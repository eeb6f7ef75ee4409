//! Field validation shared by entity records.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failure for an entity write or read-back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityValidationError {
    /// A required text field is empty or whitespace only.
    BlankField {
        entity: &'static str,
        field: &'static str,
    },
    /// A text field exceeds its maximum length in characters.
    FieldTooLong {
        entity: &'static str,
        field: &'static str,
        max_chars: usize,
    },
}

impl Display for EntityValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField { entity, field } => {
                write!(f, "{entity}.{field} must not be blank")
            }
            Self::FieldTooLong {
                entity,
                field,
                max_chars,
            } => write!(f, "{entity}.{field} exceeds {max_chars} characters"),
        }
    }
}

impl Error for EntityValidationError {}

pub(crate) fn require_text(
    entity: &'static str,
    field: &'static str,
    value: &str,
    max_chars: usize,
) -> Result<(), EntityValidationError> {
    if value.trim().is_empty() {
        return Err(EntityValidationError::BlankField { entity, field });
    }
    if value.chars().count() > max_chars {
        return Err(EntityValidationError::FieldTooLong {
            entity,
            field,
            max_chars,
        });
    }
    Ok(())
}
