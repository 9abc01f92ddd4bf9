use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::post::slugify;

/// Tag entity - a label attached to posts, many-to-many.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

impl Tag {
    /// Create a new tag with a slug derived from its name.
    pub fn new(name: String) -> Self {
        let slug = slugify(&name);
        Self {
            id: Uuid::new_v4(),
            name,
            slug,
        }
    }
}
