//! Forum domain models: categories, threads and posts.

use chrono::{DateTime, Utc};

use crate::{
    model::forum::{CategoryDto, CategoryPayloadDto, PostDto, ThreadDto, ThreadPayloadDto},
    server::{error::AppError, model::user::Author},
};

const NAME_MAX: usize = 64;
const TITLE_MAX: usize = 128;
const CONTENT_MAX: usize = 10_000;

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn from_entity(entity: entity::forum_category::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> CategoryDto {
        CategoryDto {
            id: self.id,
            name: self.name,
            description: self.description,
            created_at: self.created_at,
        }
    }
}

/// Thread with its author and number of replies.
#[derive(Debug, Clone, PartialEq)]
pub struct Thread {
    pub id: i32,
    pub category_id: i32,
    pub title: String,
    pub content: String,
    pub author: Author,
    pub is_closed: bool,
    pub post_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Thread {
    pub fn from_entity(
        entity: entity::forum_thread::Model,
        author: Option<&entity::user::Model>,
        post_count: u64,
    ) -> Self {
        Self {
            id: entity.id,
            category_id: entity.category_id,
            title: entity.title,
            content: entity.content,
            author: Author::from_entity(entity.author_id, author),
            is_closed: entity.is_closed,
            post_count,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> ThreadDto {
        ThreadDto {
            id: self.id,
            category_id: self.category_id,
            title: self.title,
            content: self.content,
            author: self.author.into_dto(),
            is_closed: self.is_closed,
            post_count: self.post_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: i32,
    pub thread_id: i32,
    pub content: String,
    pub author: Author,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn from_entity(
        entity: entity::forum_post::Model,
        author: Option<&entity::user::Model>,
    ) -> Self {
        Self {
            id: entity.id,
            thread_id: entity.thread_id,
            content: entity.content,
            author: Author::from_entity(entity.author_id, author),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> PostDto {
        PostDto {
            id: self.id,
            thread_id: self.thread_id,
            content: self.content,
            author: self.author.into_dto(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryParams {
    pub name: String,
    pub description: String,
}

impl CategoryParams {
    pub fn from_dto(dto: CategoryPayloadDto) -> Result<Self, AppError> {
        let name = dto.name.trim().to_string();
        if name.is_empty() || name.chars().count() > NAME_MAX {
            return Err(AppError::BadRequest(format!(
                "Category name must be between 1 and {} characters",
                NAME_MAX
            )));
        }

        Ok(Self {
            name,
            description: dto.description.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThreadParams {
    pub title: String,
    pub content: String,
}

impl ThreadParams {
    pub fn from_dto(dto: ThreadPayloadDto) -> Result<Self, AppError> {
        let title = dto.title.trim().to_string();
        if title.is_empty() || title.chars().count() > TITLE_MAX {
            return Err(AppError::BadRequest(format!(
                "Thread title must be between 1 and {} characters",
                TITLE_MAX
            )));
        }

        Ok(Self {
            title,
            content: validate_content(dto.content)?,
        })
    }
}

/// Post and thread bodies: non-blank, at most `CONTENT_MAX` characters.
pub fn validate_content(content: String) -> Result<String, AppError> {
    if content.trim().is_empty() || content.chars().count() > CONTENT_MAX {
        return Err(AppError::BadRequest(format!(
            "Content must be between 1 and {} characters",
            CONTENT_MAX
        )));
    }
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_thread() {
        let result = ThreadParams::from_dto(ThreadPayloadDto {
            title: "   ".to_string(),
            content: "body".to_string(),
        });
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        assert!(validate_content(" \n ".to_string()).is_err());
        assert!(validate_content("x".repeat(CONTENT_MAX + 1)).is_err());
    }

    #[test]
    fn author_placeholder_for_missing_user() {
        let author = Author::from_entity(7, None);
        assert_eq!(author.id, 7);
        assert_eq!(author.username, "[deleted]");
    }
}
