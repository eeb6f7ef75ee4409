//! Team repository contract and SQLite implementation.

use crate::model::team::{Team, TeamId};
use crate::repo::crud::CrudRepository;
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::page::{Page, PageRequest, Sort};
use crate::repo::schema::{
    bool_from_exists, count_to_u64, ensure_table_ready, offset_to_sql, order_by_clause, parse_id,
};
use log::{error, info};
use rusqlite::{params, Connection, Params, Row};

const TEAM_COLUMNS: &[&str] = &["id", "name"];

const TEAM_SELECT_SQL: &str = "SELECT id, name FROM teams";

/// Team data-access contract.
pub trait TeamRepository: CrudRepository<Team, TeamId> {
    /// Teams named exactly `name`, in insertion order.
    fn find_by_name(&self, name: &str) -> RepoResult<Vec<Team>>;
}

/// SQLite-backed team repository.
pub struct SqliteTeamRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTeamRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        if let Err(err) = ensure_table_ready(conn, "teams", TEAM_COLUMNS) {
            error!("event=repo_wiring module=repo status=error repository=team error={err}");
            return Err(err);
        }

        info!("event=repo_wiring module=repo status=ok repository=team");
        Ok(Self { conn })
    }

    fn query_teams<P: Params>(&self, sql: &str, params: P) -> RepoResult<Vec<Team>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut teams = Vec::new();
        while let Some(row) = rows.next()? {
            teams.push(parse_team_row(row)?);
        }
        Ok(teams)
    }
}

impl CrudRepository<Team, TeamId> for SqliteTeamRepository<'_> {
    fn save(&self, team: &Team) -> RepoResult<TeamId> {
        save_team(self.conn, team)
    }

    fn save_all(&self, teams: &[Team]) -> RepoResult<Vec<TeamId>> {
        let tx = self.conn.unchecked_transaction()?;
        let ids = teams
            .iter()
            .map(|team| save_team(&tx, team))
            .collect::<RepoResult<Vec<_>>>()?;
        tx.commit()?;
        Ok(ids)
    }

    fn find_by_id(&self, id: TeamId) -> RepoResult<Option<Team>> {
        let teams = self.query_teams(
            &format!("{TEAM_SELECT_SQL} WHERE id = ?1;"),
            [id.to_string()],
        )?;
        Ok(teams.into_iter().next())
    }

    fn exists_by_id(&self, id: TeamId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM teams WHERE id = ?1);",
            [id.to_string()],
            |row| row.get(0),
        )?;
        Ok(bool_from_exists(exists))
    }

    fn find_all(&self) -> RepoResult<Vec<Team>> {
        self.query_teams(&format!("{TEAM_SELECT_SQL} ORDER BY rowid ASC;"), [])
    }

    fn find_all_sorted(&self, sort: &Sort) -> RepoResult<Vec<Team>> {
        let order_by = order_by_clause(sort, TEAM_COLUMNS)?;
        self.query_teams(&format!("{TEAM_SELECT_SQL}{order_by};"), [])
    }

    fn find_all_paged(&self, request: &PageRequest) -> RepoResult<Page<Team>> {
        let order_by = order_by_clause(request.sort(), TEAM_COLUMNS)?;
        let content = self.query_teams(
            &format!("{TEAM_SELECT_SQL}{order_by} LIMIT ?1 OFFSET ?2;"),
            params![i64::from(request.size()), offset_to_sql(request)],
        )?;
        let total = self.count()?;
        Ok(Page::new(content, request, total))
    }

    fn count(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM teams;", [], |row| row.get(0))?;
        count_to_u64(count)
    }

    fn delete(&self, team: &Team) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM teams WHERE id = ?1;", [team.id.to_string()])?;
        Ok(())
    }

    fn delete_by_id(&self, id: TeamId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM teams WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn delete_all(&self) -> RepoResult<()> {
        self.conn.execute("DELETE FROM teams;", [])?;
        Ok(())
    }
}

impl TeamRepository for SqliteTeamRepository<'_> {
    fn find_by_name(&self, name: &str) -> RepoResult<Vec<Team>> {
        self.query_teams(
            &format!("{TEAM_SELECT_SQL} WHERE name = ?1 ORDER BY rowid ASC;"),
            [name],
        )
    }
}

fn save_team(conn: &Connection, team: &Team) -> RepoResult<TeamId> {
    team.validate()?;
    conn.execute(
        "INSERT INTO teams (id, name)
         VALUES (?1, ?2)
         ON CONFLICT (id) DO UPDATE SET name = excluded.name;",
        params![team.id.to_string(), team.name.as_str()],
    )?;
    Ok(team.id)
}

fn parse_team_row(row: &Row<'_>) -> RepoResult<Team> {
    let id_text: String = row.get("id")?;
    let team = Team {
        id: parse_id(&id_text, "teams.id")?,
        name: row.get("name")?,
    };
    team.validate()?;
    Ok(team)
}
