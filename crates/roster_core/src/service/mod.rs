//! Use-case services over the repositories.
//!
//! # Responsibility
//! - Orchestrate member/team repository calls into use-case level APIs.
//! - Keep callers decoupled from storage details.

pub mod member_service;
