//! Repository contracts and their SQLite implementations.
//!
//! # Responsibility
//! - Define the generic CRUD contract and the entity-specific query contracts.
//! - Compose the member repository with an injected custom extension.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Writes call the entity's `validate()` before any SQL mutation.
//! - Reads reject invalid persisted state instead of masking it.
//! - Constructors verify the schema they depend on, so wiring mistakes
//!   surface at startup instead of on the first query.
//! - Driver failures are wrapped, never translated.

pub mod crud;
pub mod error;
pub mod member_custom;
pub mod member_repo;
pub mod page;
mod schema;
pub mod team_repo;
