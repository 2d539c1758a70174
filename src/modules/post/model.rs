use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::modules::post::schema::PostEntity;

/// Create body. Omitted fields are stored as empty strings.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreatePostModel {
    #[serde(default)]
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 50000, message = "Content must be at most 50000 characters"))]
    pub content: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "Author must be at most 100 characters"))]
    pub author: String,
}

/// Partial update body. Absent fields keep their stored value; `id` and
/// `createdAt` are not accepted here.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePostModel {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 50000, message = "Content must be at most 50000 characters"))]
    pub content: Option<String>,
    #[validate(length(max = 100, message = "Author must be at most 100 characters"))]
    pub author: Option<String>,
}

impl UpdatePostModel {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.author.is_none()
    }
}

pub struct InsertPost {
    pub title: String,
    pub content: String,
    pub author: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

pub struct UpdatePost {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<PostEntity> for PostResponse {
    fn from(entity: PostEntity) -> Self {
        PostResponse {
            id: entity.id.to_hex(),
            title: entity.title,
            content: entity.content,
            author: entity.author,
            created_at: entity.created_at,
        }
    }
}
