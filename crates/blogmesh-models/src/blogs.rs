//! Blog posts.

use blogmesh_core::{Identity, Owned};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::common::trimmed_length;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema, PartialEq)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    /// Id of the identity that created the blog. Never changes.
    pub author: Uuid,
    pub author_name: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Blog {
    pub fn new(dto: BlogDto, author: &Identity) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: dto.title.trim().to_string(),
            content: dto.content,
            author: author.id,
            author_name: author.username.clone(),
            tags: normalize_tags(dto.tags),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the editable fields. Ownership fields are left untouched.
    pub fn apply(&mut self, dto: BlogDto) {
        self.title = dto.title.trim().to_string();
        self.content = dto.content;
        self.tags = normalize_tags(dto.tags);
        self.updated_at = Utc::now();
    }
}

impl Owned for Blog {
    fn owner_id(&self) -> Uuid {
        self.author
    }
}

fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

fn blog_title(title: &str) -> Result<(), ValidationError> {
    trimmed_length(title, 3, 200, "Title must be 3-200 characters")
}

/// Body for both create and update.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BlogDto {
    #[validate(custom(function = "blog_title"))]
    pub title: String,
    #[validate(length(min = 10, message = "Content must be at least 10 characters"))]
    pub content: String,
    pub tags: Vec<String>,
}
