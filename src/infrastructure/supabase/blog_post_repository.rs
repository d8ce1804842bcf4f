//! Hosted backend implementation of the blog post repository.

use async_trait::async_trait;
use serde::de::IgnoredAny;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use super::SupabaseClient;
use crate::domain::entities::{BlogPost, NewBlogPost};
use crate::domain::repositories::BlogPostRepository;
use crate::error::AppError;

const TABLE: &str = "blog_posts";

/// Blog posts stored in the `blog_posts` table.
pub struct SupabaseBlogPostRepository {
    client: Arc<SupabaseClient>,
}

impl SupabaseBlogPostRepository {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BlogPostRepository for SupabaseBlogPostRepository {
    async fn list_published(&self) -> Result<Vec<BlogPost>, AppError> {
        let posts = self
            .client
            .table(TABLE)
            .select("*")
            .eq("published", true)
            .order_desc("created_at")
            .fetch()
            .await?;

        Ok(posts)
    }

    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, AppError> {
        let post = self
            .client
            .table(TABLE)
            .select("*")
            .eq("slug", slug)
            .eq("published", true)
            .fetch_optional()
            .await?;

        Ok(post)
    }

    async fn list_all(&self, access_token: &str) -> Result<Vec<BlogPost>, AppError> {
        let posts = self
            .client
            .table(TABLE)
            .bearer(access_token)
            .select("*")
            .order_desc("created_at")
            .fetch()
            .await?;

        Ok(posts)
    }

    async fn create(
        &self,
        access_token: &str,
        new_post: NewBlogPost,
    ) -> Result<BlogPost, AppError> {
        let post = self
            .client
            .table(TABLE)
            .bearer(access_token)
            .select("*")
            .insert_returning(&new_post)
            .await?;

        Ok(post)
    }

    async fn set_published(
        &self,
        access_token: &str,
        id: Uuid,
        published: bool,
    ) -> Result<Option<BlogPost>, AppError> {
        let post = self
            .client
            .table(TABLE)
            .bearer(access_token)
            .select("*")
            .eq("id", id)
            .update_returning(&json!({ "published": published }))
            .await?;

        Ok(post)
    }

    async fn delete(&self, access_token: &str, id: Uuid) -> Result<bool, AppError> {
        let deleted: Vec<IgnoredAny> = self
            .client
            .table(TABLE)
            .bearer(access_token)
            .select("id")
            .eq("id", id)
            .delete_returning()
            .await?;

        Ok(!deleted.is_empty())
    }
}
