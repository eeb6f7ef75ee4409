//! Member/team persistence layer over SQLite.
//!
//! The member repository composes three things behind one trait: the generic
//! CRUD contract, convention-named query methods, and a hand-written
//! extension injected at construction time.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::RosterConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::member::{Member, MemberId};
pub use model::member_dto::MemberDto;
pub use model::team::{Team, TeamId};
pub use model::validation::EntityValidationError;
pub use repo::crud::CrudRepository;
pub use repo::error::{RepoError, RepoResult};
pub use repo::member_custom::{MemberRepositoryCustom, SqliteMemberRepositoryCustom};
pub use repo::member_repo::{MemberRepository, SqliteMemberRepository};
pub use repo::page::{Direction, Order, Page, PageError, PageRequest, Sort};
pub use repo::team_repo::{SqliteTeamRepository, TeamRepository};
pub use service::member_service::{MemberService, ServiceError, ServiceResult};

/// Minimal health-check API for smoke runs.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
