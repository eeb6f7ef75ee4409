//! Member repository contract and its composed SQLite implementation.
//!
//! # Responsibility
//! - Declare the member query surface: CRUD, convention-named queries and
//!   the hand-written extension from `member_custom`.
//! - Compose the SQL-backed implementation with an injected extension.
//!
//! # Invariants
//! - Every method of `MemberRepository` resolves to exactly one
//!   implementation; the generic bound makes a missing extension a compile
//!   error, and `try_new` rejects a misbound one before any call.
//! - Method names describe the query; each body is explicit SQL.

use crate::model::member::{Member, MemberId};
use crate::model::member_dto::MemberDto;
use crate::model::team::TeamId;
use crate::repo::crud::CrudRepository;
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::member_custom::{MemberRepositoryCustom, SqliteMemberRepositoryCustom};
use crate::repo::page::{Page, PageRequest, Sort};
use crate::repo::schema::{
    bool_from_exists, count_to_u64, ensure_table_ready, offset_to_sql, order_by_clause, parse_id,
};
use log::{error, info};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Params, Row};

pub(crate) const MEMBER_COLUMNS: &[&str] = &["id", "username", "age", "team_id"];
const MEMBER_SORT_COLUMNS: &[&str] = &["id", "username", "age"];

const MEMBER_SELECT_SQL: &str = "SELECT
    id,
    username,
    age,
    team_id
FROM members";

const UPSERT_MEMBER_SQL: &str = "INSERT INTO members (id, username, age, team_id)
    VALUES (?1, ?2, ?3, ?4)
    ON CONFLICT (id) DO UPDATE SET
        username = excluded.username,
        age = excluded.age,
        team_id = excluded.team_id,
        updated_at = (strftime('%s', 'now') * 1000);";

/// Member data-access contract consumed by application code.
///
/// Combines the generic CRUD contract, the hand-written extension and the
/// query methods below.
pub trait MemberRepository: CrudRepository<Member, MemberId> + MemberRepositoryCustom {
    /// Members named `username` who are strictly older than `age`.
    fn find_by_username_and_age_greater_than(
        &self,
        username: &str,
        age: u32,
    ) -> RepoResult<Vec<Member>>;

    /// First three members ordered by username, then id.
    fn find_top3(&self) -> RepoResult<Vec<Member>>;

    /// Members matching both `username` and `age` exactly.
    fn find_user(&self, username: &str, age: u32) -> RepoResult<Vec<Member>>;

    /// Usernames of every member in insertion order.
    fn find_username_list(&self) -> RepoResult<Vec<String>>;

    /// Members joined with their team. Members without a team are skipped.
    fn find_member_dto(&self) -> RepoResult<Vec<MemberDto>>;

    /// Members whose username is any of `names`.
    fn find_by_names(&self, names: &[String]) -> RepoResult<Vec<Member>>;

    /// Every member named `username`, in insertion order.
    fn find_list_by_username(&self, username: &str) -> RepoResult<Vec<Member>>;

    /// Single member named `username`.
    ///
    /// # Errors
    /// - `RepoError::NonUniqueResult` when more than one member matches.
    fn find_member_by_username(&self, username: &str) -> RepoResult<Option<Member>>;

    /// Same contract as `find_member_by_username`.
    fn find_optional_by_username(&self, username: &str) -> RepoResult<Option<Member>>;

    /// One page of members with exactly `age`, plus the total match count.
    fn find_by_age(&self, age: u32, request: &PageRequest) -> RepoResult<Page<Member>>;

    /// Members whose team reference is `team_id`, in insertion order.
    fn find_by_team(&self, team_id: TeamId) -> RepoResult<Vec<Member>>;

    /// Increments the age of every member aged `age` or older.
    ///
    /// Members already at `u32::MAX` are left unchanged, since their age
    /// cannot grow. Returns the number of updated rows.
    fn bulk_age_plus(&self, age: u32) -> RepoResult<usize>;
}

/// SQLite-backed member repository composed with extension `C`.
pub struct SqliteMemberRepository<'conn, C = SqliteMemberRepositoryCustom<'conn>> {
    conn: &'conn Connection,
    custom: C,
}

impl<'conn, C: MemberRepositoryCustom> SqliteMemberRepository<'conn, C> {
    /// Wires the repository against a migrated connection and an extension.
    ///
    /// # Errors
    /// - `MissingRequiredTable`/`MissingRequiredColumn` when the schema is absent.
    /// - Whatever `custom.verify_wiring()` reports.
    pub fn try_new(conn: &'conn Connection, custom: C) -> RepoResult<Self> {
        let wired = ensure_member_connection_ready(conn).and_then(|()| custom.verify_wiring());
        if let Err(err) = wired {
            error!(
                "event=repo_wiring module=repo status=error repository=member error={err}"
            );
            return Err(err);
        }

        info!("event=repo_wiring module=repo status=ok repository=member");
        Ok(Self { conn, custom })
    }

    /// Returns the injected extension.
    pub fn custom(&self) -> &C {
        &self.custom
    }

    fn query_members<P: Params>(&self, sql: &str, params: P) -> RepoResult<Vec<Member>> {
        query_members(self.conn, sql, params)
    }

    fn single_by_username(
        &self,
        query: &'static str,
        username: &str,
    ) -> RepoResult<Option<Member>> {
        let members = self.find_list_by_username(username)?;
        single_result(query, members)
    }
}

impl<'conn> SqliteMemberRepository<'conn> {
    /// Wires the repository with the SQLite extension bound to the same connection.
    pub fn try_default(conn: &'conn Connection) -> RepoResult<Self> {
        let custom = SqliteMemberRepositoryCustom::try_new(conn)?;
        Self::try_new(conn, custom)
    }
}

impl<C: MemberRepositoryCustom> MemberRepositoryCustom for SqliteMemberRepository<'_, C> {
    fn find_member_custom(&self) -> RepoResult<Vec<Member>> {
        self.custom.find_member_custom()
    }

    fn verify_wiring(&self) -> RepoResult<()> {
        self.custom.verify_wiring()
    }
}

impl<C: MemberRepositoryCustom> CrudRepository<Member, MemberId> for SqliteMemberRepository<'_, C> {
    fn save(&self, member: &Member) -> RepoResult<MemberId> {
        save_member(self.conn, member)
    }

    fn save_all(&self, members: &[Member]) -> RepoResult<Vec<MemberId>> {
        let tx = self.conn.unchecked_transaction()?;
        let ids = members
            .iter()
            .map(|member| save_member(&tx, member))
            .collect::<RepoResult<Vec<_>>>()?;
        tx.commit()?;
        Ok(ids)
    }

    fn find_by_id(&self, id: MemberId) -> RepoResult<Option<Member>> {
        let members = self.query_members(
            &format!("{MEMBER_SELECT_SQL} WHERE id = ?1;"),
            [id.to_string()],
        )?;
        Ok(members.into_iter().next())
    }

    fn exists_by_id(&self, id: MemberId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM members WHERE id = ?1);",
            [id.to_string()],
            |row| row.get(0),
        )?;
        Ok(bool_from_exists(exists))
    }

    fn find_all(&self) -> RepoResult<Vec<Member>> {
        self.query_members(&format!("{MEMBER_SELECT_SQL} ORDER BY rowid ASC;"), [])
    }

    fn find_all_sorted(&self, sort: &Sort) -> RepoResult<Vec<Member>> {
        let order_by = order_by_clause(sort, MEMBER_SORT_COLUMNS)?;
        self.query_members(&format!("{MEMBER_SELECT_SQL}{order_by};"), [])
    }

    fn find_all_paged(&self, request: &PageRequest) -> RepoResult<Page<Member>> {
        let order_by = order_by_clause(request.sort(), MEMBER_SORT_COLUMNS)?;
        let content = self.query_members(
            &format!("{MEMBER_SELECT_SQL}{order_by} LIMIT ?1 OFFSET ?2;"),
            params![i64::from(request.size()), offset_to_sql(request)],
        )?;
        let total = self.count()?;
        Ok(Page::new(content, request, total))
    }

    fn count(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM members;", [], |row| row.get(0))?;
        count_to_u64(count)
    }

    fn delete(&self, member: &Member) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM members WHERE id = ?1;", [member.id.to_string()])?;
        Ok(())
    }

    fn delete_by_id(&self, id: MemberId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM members WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn delete_all(&self) -> RepoResult<()> {
        self.conn.execute("DELETE FROM members;", [])?;
        Ok(())
    }
}

impl<C: MemberRepositoryCustom> MemberRepository for SqliteMemberRepository<'_, C> {
    fn find_by_username_and_age_greater_than(
        &self,
        username: &str,
        age: u32,
    ) -> RepoResult<Vec<Member>> {
        self.query_members(
            &format!(
                "{MEMBER_SELECT_SQL}
                 WHERE username = ?1
                   AND age > ?2
                 ORDER BY rowid ASC;"
            ),
            params![username, i64::from(age)],
        )
    }

    fn find_top3(&self) -> RepoResult<Vec<Member>> {
        self.query_members(
            &format!("{MEMBER_SELECT_SQL} ORDER BY username ASC, id ASC LIMIT 3;"),
            [],
        )
    }

    fn find_user(&self, username: &str, age: u32) -> RepoResult<Vec<Member>> {
        self.query_members(
            &format!(
                "{MEMBER_SELECT_SQL}
                 WHERE username = ?1
                   AND age = ?2
                 ORDER BY rowid ASC;"
            ),
            params![username, i64::from(age)],
        )
    }

    fn find_username_list(&self) -> RepoResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT username FROM members ORDER BY rowid ASC;")?;
        let usernames = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(usernames)
    }

    fn find_member_dto(&self) -> RepoResult<Vec<MemberDto>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                m.id,
                m.username,
                t.name AS team_name
             FROM members m
             INNER JOIN teams t ON t.id = m.team_id
             ORDER BY m.rowid ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut dtos = Vec::new();
        while let Some(row) = rows.next()? {
            let id_text: String = row.get("id")?;
            dtos.push(MemberDto {
                id: parse_id(&id_text, "members.id")?,
                username: row.get("username")?,
                team_name: row.get("team_name")?,
            });
        }
        Ok(dtos)
    }

    fn find_by_names(&self, names: &[String]) -> RepoResult<Vec<Member>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; names.len()].join(", ");
        let bind_values = names.iter().map(|name| Value::Text(name.clone()));
        self.query_members(
            &format!(
                "{MEMBER_SELECT_SQL}
                 WHERE username IN ({placeholders})
                 ORDER BY rowid ASC;"
            ),
            params_from_iter(bind_values),
        )
    }

    fn find_list_by_username(&self, username: &str) -> RepoResult<Vec<Member>> {
        self.query_members(
            &format!("{MEMBER_SELECT_SQL} WHERE username = ?1 ORDER BY rowid ASC;"),
            [username],
        )
    }

    fn find_member_by_username(&self, username: &str) -> RepoResult<Option<Member>> {
        self.single_by_username("find_member_by_username", username)
    }

    fn find_optional_by_username(&self, username: &str) -> RepoResult<Option<Member>> {
        self.single_by_username("find_optional_by_username", username)
    }

    fn find_by_age(&self, age: u32, request: &PageRequest) -> RepoResult<Page<Member>> {
        let order_by = order_by_clause(request.sort(), MEMBER_SORT_COLUMNS)?;
        let content = self.query_members(
            &format!("{MEMBER_SELECT_SQL} WHERE age = ?1{order_by} LIMIT ?2 OFFSET ?3;"),
            params![
                i64::from(age),
                i64::from(request.size()),
                offset_to_sql(request)
            ],
        )?;

        let total: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM members WHERE age = ?1;",
            [i64::from(age)],
            |row| row.get(0),
        )?;

        Ok(Page::new(content, request, count_to_u64(total)?))
    }

    fn find_by_team(&self, team_id: TeamId) -> RepoResult<Vec<Member>> {
        self.query_members(
            &format!("{MEMBER_SELECT_SQL} WHERE team_id = ?1 ORDER BY rowid ASC;"),
            [team_id.to_string()],
        )
    }

    fn bulk_age_plus(&self, age: u32) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "UPDATE members
             SET
                age = age + 1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE age >= ?1
               AND age < ?2;",
            params![i64::from(age), i64::from(u32::MAX)],
        )?;
        Ok(changed)
    }
}

/// Maps one `members` row selected with `MEMBER_COLUMNS`.
pub(crate) fn parse_member_row(row: &Row<'_>) -> RepoResult<Member> {
    let id_text: String = row.get("id")?;
    let id = parse_id(&id_text, "members.id")?;

    let raw_age: i64 = row.get("age")?;
    let age = u32::try_from(raw_age).map_err(|_| {
        RepoError::InvalidData(format!("invalid age value `{raw_age}` in members.age"))
    })?;

    let team_id = match row.get::<_, Option<String>>("team_id")? {
        Some(value) => Some(parse_id(&value, "members.team_id")?),
        None => None,
    };

    let member = Member {
        id,
        username: row.get("username")?,
        age,
        team_id,
    };
    member.validate()?;
    Ok(member)
}

fn save_member(conn: &Connection, member: &Member) -> RepoResult<MemberId> {
    member.validate()?;
    conn.execute(
        UPSERT_MEMBER_SQL,
        params![
            member.id.to_string(),
            member.username.as_str(),
            i64::from(member.age),
            member.team_id.map(|id| id.to_string()),
        ],
    )?;
    Ok(member.id)
}

fn query_members<P: Params>(conn: &Connection, sql: &str, params: P) -> RepoResult<Vec<Member>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut members = Vec::new();
    while let Some(row) = rows.next()? {
        members.push(parse_member_row(row)?);
    }
    Ok(members)
}

fn single_result(query: &'static str, mut members: Vec<Member>) -> RepoResult<Option<Member>> {
    match members.len() {
        0 | 1 => Ok(members.pop()),
        count => Err(RepoError::NonUniqueResult { query, count }),
    }
}

fn ensure_member_connection_ready(conn: &Connection) -> RepoResult<()> {
    ensure_table_ready(conn, "members", MEMBER_COLUMNS)?;
    ensure_table_ready(conn, "teams", &["id", "name"])
}
