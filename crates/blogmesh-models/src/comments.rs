//! Comments on blog posts.

use blogmesh_core::{Identity, Owned};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::common::trimmed_length;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema, PartialEq)]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    /// Blog the comment belongs to.
    pub blog: Uuid,
    pub author: Uuid,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(dto: CreateCommentDto, author: &Identity) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            content: dto.content.trim().to_string(),
            blog: dto.blog_id,
            author: author.id,
            author_name: author.username.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, dto: UpdateCommentDto) {
        self.content = dto.content.trim().to_string();
        self.updated_at = Utc::now();
    }
}

impl Owned for Comment {
    fn owner_id(&self) -> Uuid {
        self.author
    }
}

fn comment_content(content: &str) -> Result<(), ValidationError> {
    trimmed_length(content, 1, 1000, "Content must be 1-1000 characters")
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCommentDto {
    #[validate(custom(function = "comment_content"))]
    pub content: String,
    pub blog_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCommentDto {
    #[validate(custom(function = "comment_content"))]
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_comment_dto_validation() {
        let valid = CreateCommentDto {
            content: "Nice post".to_string(),
            blog_id: Uuid::new_v4(),
        };
        assert!(valid.validate().is_ok());

        let blank = CreateCommentDto {
            content: "    ".to_string(),
            blog_id: Uuid::new_v4(),
        };
        assert!(blank.validate().is_err());

        let too_long = CreateCommentDto {
            content: "x".repeat(1001),
            blog_id: Uuid::new_v4(),
        };
        assert!(too_long.validate().is_err());

        let padded = CreateCommentDto {
            content: format!("  {}  ", "x".repeat(1000)),
            blog_id: Uuid::new_v4(),
        };
        assert!(padded.validate().is_ok());
    }

    #[test]
    fn test_new_comment_trims_content() {
        let author = Identity::new(Uuid::new_v4(), "bob");
        let blog_id = Uuid::new_v4();
        let comment = Comment::new(
            CreateCommentDto {
                content: "  hello  ".to_string(),
                blog_id,
            },
            &author,
        );
        assert_eq!(comment.content, "hello");
        assert_eq!(comment.blog, blog_id);
        assert_eq!(comment.owner_id(), author.id);
    }
}
