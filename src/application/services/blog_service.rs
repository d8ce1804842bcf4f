//! Blog article publishing service.

use metrics::counter;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{BlogPost, NewBlogPost};
use crate::domain::repositories::BlogPostRepository;
use crate::error::AppError;

/// Uniqueness constraint on `blog_posts.slug`.
pub const SLUG_CONSTRAINT: &str = "blog_posts_slug_key";

/// Service for reading and managing blog articles.
///
/// Anonymous reads only ever see published posts; management operations run with
/// the administrator's access token.
pub struct BlogService<R: BlogPostRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: BlogPostRepository + ?Sized> BlogService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Published posts, newest first.
    pub async fn list_published(&self) -> Result<Vec<BlogPost>, AppError> {
        self.repository.list_published().await
    }

    /// A published post by slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown slugs and unpublished posts.
    pub async fn get_published(&self, slug: &str) -> Result<BlogPost, AppError> {
        self.repository
            .find_published_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found("Artigo não encontrado", json!({ "slug": slug })))
    }

    /// Every post, published or not.
    pub async fn list_all(&self, access_token: &str) -> Result<Vec<BlogPost>, AppError> {
        self.repository.list_all(access_token).await
    }

    /// Creates a post from already validated input.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the title yields an empty slug and
    /// [`AppError::Conflict`] when another post already uses the slug. Colliding
    /// titles are rejected, never renamed.
    pub async fn create_post(
        &self,
        access_token: &str,
        new_post: NewBlogPost,
    ) -> Result<BlogPost, AppError> {
        if new_post.slug.is_empty() {
            return Err(AppError::bad_request(
                "Os dados enviados não são válidos",
                json!({ "fields": { "title": ["O título deve conter letras ou números"] } }),
            ));
        }

        let slug = new_post.slug.clone();
        match self.repository.create(access_token, new_post).await {
            Ok(post) => {
                counter!("blog_posts_created_total").increment(1);
                tracing::info!(post_id = %post.id, slug = %post.slug, "Blog post created");
                Ok(post)
            }
            Err(e) if e.constraint() == Some(SLUG_CONSTRAINT) => Err(AppError::conflict(
                "Já existe um artigo com um título equivalente.",
                json!({ "constraint": SLUG_CONSTRAINT, "slug": slug }),
            )),
            Err(e) => Err(e),
        }
    }

    /// Publishes or unpublishes a post.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no post has this id.
    pub async fn set_published(
        &self,
        access_token: &str,
        id: Uuid,
        published: bool,
    ) -> Result<BlogPost, AppError> {
        let post = self
            .repository
            .set_published(access_token, id, published)
            .await?
            .ok_or_else(|| AppError::not_found("Artigo não encontrado", json!({ "id": id })))?;

        tracing::info!(post_id = %id, published, "Blog post visibility changed");
        Ok(post)
    }

    /// Deletes a post.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no post has this id.
    pub async fn delete_post(&self, access_token: &str, id: Uuid) -> Result<(), AppError> {
        if !self.repository.delete(access_token, id).await? {
            return Err(AppError::not_found(
                "Artigo não encontrado",
                json!({ "id": id }),
            ));
        }

        tracing::info!(post_id = %id, "Blog post deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockBlogPostRepository;
    use chrono::Utc;

    fn post(slug: &str, published: bool) -> BlogPost {
        BlogPost {
            id: Uuid::new_v4(),
            title: "Título".to_string(),
            slug: slug.to_string(),
            excerpt: "Resumo".to_string(),
            content: "<p>Texto</p>".to_string(),
            cover_image: None,
            published,
            created_at: Utc::now(),
        }
    }

    fn new_post(slug: &str) -> NewBlogPost {
        NewBlogPost {
            title: "Título".to_string(),
            slug: slug.to_string(),
            excerpt: "Resumo".to_string(),
            content: "<p>Texto</p>".to_string(),
            cover_image: None,
            published: true,
        }
    }

    #[tokio::test]
    async fn test_get_published_not_found() {
        let mut mock_repo = MockBlogPostRepository::new();
        mock_repo
            .expect_find_published_by_slug()
            .withf(|slug| slug == "rascunho")
            .times(1)
            .returning(|_| Ok(None));

        let service = BlogService::new(Arc::new(mock_repo));
        let result = service.get_published("rascunho").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_published_found() {
        let mut mock_repo = MockBlogPostRepository::new();
        mock_repo
            .expect_find_published_by_slug()
            .times(1)
            .returning(|slug| Ok(Some(post(slug, true))));

        let service = BlogService::new(Arc::new(mock_repo));
        let found = service.get_published("educar").await.unwrap();

        assert_eq!(found.slug, "educar");
    }

    #[tokio::test]
    async fn test_create_rejects_empty_slug_without_remote_call() {
        let mut mock_repo = MockBlogPostRepository::new();
        mock_repo.expect_create().times(0);

        let service = BlogService::new(Arc::new(mock_repo));
        let result = service.create_post("token", new_post("")).await;

        let err = result.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert!(err.details()["fields"]["title"].is_array());
    }

    #[tokio::test]
    async fn test_create_maps_slug_collision() {
        let mut mock_repo = MockBlogPostRepository::new();
        mock_repo.expect_create().times(1).returning(|_, _| {
            Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": SLUG_CONSTRAINT }),
            ))
        });

        let service = BlogService::new(Arc::new(mock_repo));
        let err = service
            .create_post("token", new_post("educar"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
        assert_eq!(err.message(), "Já existe um artigo com um título equivalente.");
    }

    #[tokio::test]
    async fn test_create_passes_token_and_returns_row() {
        let mut mock_repo = MockBlogPostRepository::new();
        mock_repo
            .expect_create()
            .withf(|token, p| token == "admin-token" && p.slug == "educar")
            .times(1)
            .returning(|_, p| Ok(post(&p.slug, p.published)));

        let service = BlogService::new(Arc::new(mock_repo));
        let created = service
            .create_post("admin-token", new_post("educar"))
            .await
            .unwrap();

        assert_eq!(created.slug, "educar");
        assert!(created.published);
    }

    #[tokio::test]
    async fn test_set_published_unknown_id() {
        let mut mock_repo = MockBlogPostRepository::new();
        mock_repo
            .expect_set_published()
            .times(1)
            .returning(|_, _, _| Ok(None));

        let service = BlogService::new(Arc::new(mock_repo));
        let err = service
            .set_published("token", Uuid::new_v4(), false)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_unknown_id() {
        let mut mock_repo = MockBlogPostRepository::new();
        mock_repo.expect_delete().times(1).returning(|_, _| Ok(false));

        let service = BlogService::new(Arc::new(mock_repo));
        let result = service.delete_post("token", Uuid::new_v4()).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }
}
