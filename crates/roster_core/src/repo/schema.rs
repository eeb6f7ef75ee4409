//! Schema readiness checks and SQL fragments shared by repositories.

use crate::repo::error::{RepoError, RepoResult};
use crate::repo::page::{PageRequest, Sort};
use rusqlite::Connection;
use uuid::Uuid;

/// Fails with a wiring error unless `table` exists with every listed column.
pub(crate) fn ensure_table_ready(
    conn: &Connection,
    table: &'static str,
    columns: &[&'static str],
) -> RepoResult<()> {
    if !table_exists(conn, table)? {
        return Err(RepoError::MissingRequiredTable(table));
    }

    for column in columns {
        if !table_has_column(conn, table, column)? {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM pragma_table_info(?1)
            WHERE name = ?2
        );",
        [table, column],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

/// Builds an `ORDER BY` clause from `sort`.
///
/// Only properties in `mapped` are accepted and the emitted column names come
/// from `mapped`, never from caller text. `id` is always appended last so page
/// boundaries are stable.
pub(crate) fn order_by_clause(sort: &Sort, mapped: &[&'static str]) -> RepoResult<String> {
    let mut terms = Vec::with_capacity(sort.orders().len() + 1);
    for order in sort.orders() {
        let column = mapped
            .iter()
            .find(|column| **column == order.property)
            .ok_or_else(|| RepoError::InvalidSort(order.property.clone()))?;
        terms.push(format!("{column} {}", order.direction.as_sql()));
    }

    if !sort.orders().iter().any(|order| order.property == "id") {
        terms.push("id ASC".to_string());
    }

    Ok(format!(" ORDER BY {}", terms.join(", ")))
}

pub(crate) fn bool_from_exists(value: i64) -> bool {
    value == 1
}

pub(crate) fn parse_id(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

pub(crate) fn count_to_u64(count: i64) -> RepoResult<u64> {
    u64::try_from(count)
        .map_err(|_| RepoError::InvalidData(format!("negative row count `{count}`")))
}

pub(crate) fn offset_to_sql(request: &PageRequest) -> i64 {
    i64::try_from(request.offset()).unwrap_or(i64::MAX)
}
