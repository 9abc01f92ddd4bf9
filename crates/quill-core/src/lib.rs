//! # Quill Core
//!
//! The domain layer of the Quill blog backend.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! the blog entities, the repository ports, and the two ranking components
//! (related posts by shared tags, trigram title search).

pub mod domain;
pub mod error;
pub mod ports;
pub mod ranking;
