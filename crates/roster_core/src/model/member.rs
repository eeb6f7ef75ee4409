//! Member entity.
//!
//! # Invariants
//! - `id` is stable and never reused for another member.
//! - `team_id`, when set, names a persisted team. The storage layer enforces
//!   this with a foreign key; the record itself only carries the reference.

use crate::model::team::{Team, TeamId};
use crate::model::validation::{require_text, EntityValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type MemberId = Uuid;

const USERNAME_MAX_CHARS: usize = 50;

/// A person registered in the roster, optionally assigned to a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub username: String,
    pub age: u32,
    /// Many-to-one link to `Team::id`.
    pub team_id: Option<TeamId>,
}

impl Member {
    /// Creates a member with a generated ID and no team.
    pub fn new(username: impl Into<String>, age: u32) -> Self {
        Self::with_id(Uuid::new_v4(), username, age)
    }

    /// Creates a member with age `0`, for callers that only know the name.
    pub fn named(username: impl Into<String>) -> Self {
        Self::new(username, 0)
    }

    /// Creates a member with a caller-provided ID.
    pub fn with_id(id: MemberId, username: impl Into<String>, age: u32) -> Self {
        Self {
            id,
            username: username.into(),
            age,
            team_id: None,
        }
    }

    /// Creates a member already assigned to `team`.
    pub fn in_team(username: impl Into<String>, age: u32, team: &Team) -> Self {
        let mut member = Self::new(username, age);
        member.change_team(team);
        member
    }

    /// Moves this member to `team`.
    pub fn change_team(&mut self, team: &Team) {
        self.team_id = Some(team.id);
    }

    /// Clears the team reference.
    pub fn leave_team(&mut self) {
        self.team_id = None;
    }

    /// Checks field constraints enforced on every write and read-back.
    pub fn validate(&self) -> Result<(), EntityValidationError> {
        require_text("member", "username", &self.username, USERNAME_MAX_CHARS)
    }
}
