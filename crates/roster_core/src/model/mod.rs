//! Domain records persisted through the repositories.
//!
//! # Responsibility
//! - Define `Team`, `Member` and the `MemberDto` projection.
//! - Keep field-level validation next to the records it guards.
//!
//! # Invariants
//! - Every entity is identified by a stable UUID assigned before first save.
//! - A member references at most one team.

pub mod member;
pub mod member_dto;
pub mod team;
pub mod validation;
