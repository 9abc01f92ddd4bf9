//! In-memory repository implementations - used when no database is
//! configured, and as the reference implementation exercised by tests.
//! Note: data is lost on process restart.
//!
//! The ranking semantics mirror the PostgreSQL adapter: shared-tag
//! counting for related posts, and a `pg_trgm`-compatible trigram
//! scorer for title search.

mod store;
pub mod trigram;

pub use store::{
    InMemoryCommentRepository, InMemoryPostRepository, InMemoryTagRepository, MemoryStore,
};
