//! Member use-case service.
//!
//! # Invariants
//! - A member is only ever saved with a team reference that exists.
//! - Repository failures are wrapped in `ServiceError::Repo` unchanged.

use crate::model::member::{Member, MemberId};
use crate::model::team::TeamId;
use crate::repo::error::RepoError;
use crate::repo::member_repo::MemberRepository;
use crate::repo::page::{Direction, Page, PageError, PageRequest, Sort};
use crate::repo::team_repo::TeamRepository;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for member use-cases.
#[derive(Debug)]
pub enum ServiceError {
    TeamNotFound(TeamId),
    MemberNotFound(MemberId),
    InvalidPage(PageError),
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TeamNotFound(id) => write!(f, "team not found: {id}"),
            Self::MemberNotFound(id) => write!(f, "member not found: {id}"),
            Self::InvalidPage(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidPage(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<PageError> for ServiceError {
    fn from(value: PageError) -> Self {
        Self::InvalidPage(value)
    }
}

/// Member roster use-cases over a member and a team repository.
pub struct MemberService<M: MemberRepository, T: TeamRepository> {
    members: M,
    teams: T,
}

impl<M: MemberRepository, T: TeamRepository> MemberService<M, T> {
    pub fn new(members: M, teams: T) -> Self {
        Self { members, teams }
    }

    pub fn members(&self) -> &M {
        &self.members
    }

    pub fn teams(&self) -> &T {
        &self.teams
    }

    /// Registers a new member, optionally inside an existing team.
    ///
    /// # Errors
    /// - `TeamNotFound` when `team_id` names no persisted team.
    pub fn join(
        &self,
        username: impl Into<String>,
        age: u32,
        team_id: Option<TeamId>,
    ) -> ServiceResult<Member> {
        if let Some(team_id) = team_id {
            self.require_team(team_id)?;
        }

        let mut member = Member::new(username, age);
        member.team_id = team_id;
        self.members.save(&member)?;

        info!(
            "event=member_join module=service status=ok member_id={} has_team={}",
            member.id,
            team_id.is_some()
        );
        Ok(member)
    }

    /// Moves an existing member into an existing team.
    pub fn transfer(&self, member_id: MemberId, team_id: TeamId) -> ServiceResult<Member> {
        let mut member = self
            .members
            .find_by_id(member_id)?
            .ok_or(ServiceError::MemberNotFound(member_id))?;
        self.require_team(team_id)?;

        member.team_id = Some(team_id);
        self.members.save(&member)?;

        info!(
            "event=member_transfer module=service status=ok member_id={} team_id={}",
            member.id, team_id
        );
        Ok(member)
    }

    /// Members of exactly `age`, paged and sorted by username.
    pub fn roster_page(&self, age: u32, page: u32, size: u32) -> ServiceResult<Page<Member>> {
        let request = PageRequest::of_sorted(page, size, Sort::by(Direction::Asc, &["username"]))?;
        Ok(self.members.find_by_age(age, &request)?)
    }

    /// Every member, served by the repository's custom extension.
    ///
    /// Order is unspecified.
    pub fn all_members(&self) -> ServiceResult<Vec<Member>> {
        Ok(self.members.find_member_custom()?)
    }

    fn require_team(&self, team_id: TeamId) -> ServiceResult<()> {
        if self.teams.exists_by_id(team_id)? {
            Ok(())
        } else {
            Err(ServiceError::TeamNotFound(team_id))
        }
    }
}
