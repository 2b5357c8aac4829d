//! # agora-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `agora-core`. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! The reference DDL for the tables lives in `schema.sql` at the workspace
//! root; the composite keys there back the application's concurrency model
//! (duplicate joins and reactions fail at the constraint, not in a
//! check-then-insert race).

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{
    PgAuthTokenRepository, PgCommentRepository, PgGroupRepository, PgJoinRequestRepository,
    PgMemberRepository, PgMessageRepository, PgPostRepository, PgReactionRepository,
    PgSharedPostRepository, PgUserRepository,
};
