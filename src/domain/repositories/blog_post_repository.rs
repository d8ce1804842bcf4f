//! Repository trait for blog post data access.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{BlogPost, NewBlogPost};
use crate::error::AppError;

/// Repository interface for the `blog_posts` table.
///
/// Public reads run with the anonymous role and only ever see published rows. Admin
/// operations take the caller's access token so the backend's row-level policies
/// apply to the signed-in identity.
///
/// # Implementations
///
/// - [`crate::infrastructure::supabase::SupabaseBlogPostRepository`] - hosted backend
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogPostRepository: Send + Sync {
    /// Lists published posts, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] when the backend call fails.
    async fn list_published(&self) -> Result<Vec<BlogPost>, AppError>;

    /// Finds a published post by slug.
    ///
    /// Returns `Ok(None)` for unknown slugs and for unpublished posts alike.
    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, AppError>;

    /// Lists every post, published or not, newest first.
    async fn list_all(&self, access_token: &str) -> Result<Vec<BlogPost>, AppError>;

    /// Inserts a post and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] (constraint `blog_posts_slug_key`) if the slug is
    /// already taken.
    async fn create(&self, access_token: &str, new_post: NewBlogPost)
    -> Result<BlogPost, AppError>;

    /// Sets the `published` flag of a post.
    ///
    /// Returns `Ok(None)` if no post has this id.
    async fn set_published(
        &self,
        access_token: &str,
        id: Uuid,
        published: bool,
    ) -> Result<Option<BlogPost>, AppError>;

    /// Deletes a post. Returns `Ok(false)` if no post has this id.
    async fn delete(&self, access_token: &str, id: Uuid) -> Result<bool, AppError>;
}
