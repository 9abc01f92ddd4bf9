//! Ranking components - the two query-shaping pieces at the heart of the
//! blog: related-post recommendation by shared tags, and trigram title
//! search. Both are thin, read-only compositions over the repository
//! ports; the actual scoring runs inside whichever store adapter backs
//! them.

mod related;
mod search;

pub use related::{RELATED_LIMIT, RelatedRanker};
pub use search::{SIMILARITY_THRESHOLD, SearchRanker};
