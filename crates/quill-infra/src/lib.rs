//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - In-memory repositories only, no external dependencies
//! - `postgres` - PostgreSQL repositories via SeaORM (trigram search
//!   through `pg_trgm`, shared-tag ranking through SQL aggregation)

pub mod database;
pub mod memory;

// Re-exports - In-Memory
pub use memory::{
    InMemoryCommentRepository, InMemoryPostRepository, InMemoryTagRepository, MemoryStore,
};

// Re-exports - Postgres
pub use database::DatabaseConfig;

#[cfg(feature = "postgres")]
pub use database::{
    PostgresCommentRepository, PostgresPostRepository, PostgresTagRepository,
};
