//! Generic CRUD contract shared by entity repositories.

use crate::repo::error::RepoResult;
use crate::repo::page::{Page, PageRequest, Sort};

/// Basic persistence operations for one entity type.
///
/// Implementations must validate entities before writing and reject invalid
/// rows on read.
pub trait CrudRepository<T, ID: Copy> {
    /// Inserts `entity`, or replaces the row with the same id.
    fn save(&self, entity: &T) -> RepoResult<ID>;
    /// Saves every entity in one transaction; nothing is written on failure.
    fn save_all(&self, entities: &[T]) -> RepoResult<Vec<ID>>;
    fn find_by_id(&self, id: ID) -> RepoResult<Option<T>>;
    fn exists_by_id(&self, id: ID) -> RepoResult<bool>;
    /// Returns every row in insertion order.
    fn find_all(&self) -> RepoResult<Vec<T>>;
    fn find_all_sorted(&self, sort: &Sort) -> RepoResult<Vec<T>>;
    fn find_all_paged(&self, request: &PageRequest) -> RepoResult<Page<T>>;
    fn count(&self) -> RepoResult<u64>;
    /// Removes the row for `entity`. Deleting an absent entity is a no-op.
    fn delete(&self, entity: &T) -> RepoResult<()>;
    /// Removes the row for `id`, or fails with `RepoError::NotFound`.
    fn delete_by_id(&self, id: ID) -> RepoResult<()>;
    fn delete_all(&self) -> RepoResult<()>;
}
