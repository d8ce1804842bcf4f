//! Blog post entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::dates;

/// A blog article as stored in the `blog_posts` table.
///
/// `content` is trusted HTML written by an administrator and rendered as-is on the
/// article page. Only rows with `published = true` are visible to anonymous readers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub cover_image: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

impl BlogPost {
    /// Publication date as shown on the blog (`3 de novembro, 2025`).
    pub fn display_date(&self) -> String {
        dates::long_date(&self.created_at)
    }

    /// Public URL path of the article.
    pub fn path(&self) -> String {
        format!("/blog/{}", self.slug)
    }
}

/// Input data for creating a new post.
///
/// The slug is derived from the title by the blog service before insertion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBlogPost {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub cover_image: Option<String>,
    pub published: bool,
}
