//! Member-with-team projection.

use crate::model::member::MemberId;
use serde::{Deserialize, Serialize};

/// Flattened view of a member and the name of its team.
///
/// Produced by an inner join, so members without a team never appear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDto {
    pub id: MemberId,
    pub username: String,
    pub team_name: String,
}

impl MemberDto {
    pub fn new(id: MemberId, username: impl Into<String>, team_name: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            team_name: team_name.into(),
        }
    }
}
