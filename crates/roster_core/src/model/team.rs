//! Team entity.

use crate::model::validation::{require_text, EntityValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type TeamId = Uuid;

const TEAM_NAME_MAX_CHARS: usize = 100;

/// A group members can belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
}

impl Team {
    /// Creates a team with a generated stable ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Creates a team with a caller-provided ID.
    pub fn with_id(id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Checks field constraints enforced on every write and read-back.
    pub fn validate(&self) -> Result<(), EntityValidationError> {
        require_text("team", "name", &self.name, TEAM_NAME_MAX_CHARS)
    }
}
