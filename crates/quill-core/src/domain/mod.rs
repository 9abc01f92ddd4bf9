//! Domain entities - the core business objects of the blog.

mod comment;

mod post;

mod tag;

pub use comment::Comment;
pub use post::{Post, PostStatus, slugify};
pub use tag::Tag;
