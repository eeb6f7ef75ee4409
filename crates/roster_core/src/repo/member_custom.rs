//! Hand-written member queries composed into `MemberRepository`.
//!
//! # Responsibility
//! - Declare operations the convention-named query methods do not cover.
//! - Provide the SQLite implementation injected into `SqliteMemberRepository`.
//!
//! # Invariants
//! - Implementations are stateless apart from the borrowed connection.
//! - Store failures are returned unchanged inside `RepoError::Db`.

use crate::model::member::Member;
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::member_repo::{parse_member_row, MEMBER_COLUMNS};
use rusqlite::Connection;

const FIND_MEMBER_CUSTOM_SQL: &str = "SELECT id, username, age, team_id FROM members";

/// Extension contract for hand-written member queries.
pub trait MemberRepositoryCustom {
    /// Returns every persisted member.
    ///
    /// No ordering is applied: the sequence is whatever the store yields for an
    /// unordered scan, and callers must not depend on it.
    fn find_member_custom(&self) -> RepoResult<Vec<Member>>;

    /// Checks that this extension can serve its queries.
    ///
    /// Called once by the composed repository constructor, so a misbound
    /// extension is rejected at startup.
    fn verify_wiring(&self) -> RepoResult<()> {
        Ok(())
    }
}

impl<T: MemberRepositoryCustom + ?Sized> MemberRepositoryCustom for &T {
    fn find_member_custom(&self) -> RepoResult<Vec<Member>> {
        (**self).find_member_custom()
    }

    fn verify_wiring(&self) -> RepoResult<()> {
        (**self).verify_wiring()
    }
}

impl<T: MemberRepositoryCustom + ?Sized> MemberRepositoryCustom for Box<T> {
    fn find_member_custom(&self) -> RepoResult<Vec<Member>> {
        (**self).find_member_custom()
    }

    fn verify_wiring(&self) -> RepoResult<()> {
        (**self).verify_wiring()
    }
}

/// SQLite-backed member extension issuing a fixed read-all query.
pub struct SqliteMemberRepositoryCustom<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMemberRepositoryCustom<'conn> {
    /// Binds the extension to `conn` and prepares its query once.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let custom = Self { conn };
        custom.verify_wiring()?;
        Ok(custom)
    }
}

impl MemberRepositoryCustom for SqliteMemberRepositoryCustom<'_> {
    fn find_member_custom(&self) -> RepoResult<Vec<Member>> {
        let mut stmt = self.conn.prepare_cached(FIND_MEMBER_CUSTOM_SQL)?;
        let mut rows = stmt.query([])?;
        let mut members = Vec::new();
        while let Some(row) = rows.next()? {
            members.push(parse_member_row(row)?);
        }
        Ok(members)
    }

    fn verify_wiring(&self) -> RepoResult<()> {
        let stmt = self.conn.prepare_cached(FIND_MEMBER_CUSTOM_SQL)?;
        if stmt.column_count() != MEMBER_COLUMNS.len() {
            return Err(RepoError::InvalidData(format!(
                "custom member query yields {} columns, expected {}",
                stmt.column_count(),
                MEMBER_COLUMNS.len()
            )));
        }
        Ok(())
    }
}
