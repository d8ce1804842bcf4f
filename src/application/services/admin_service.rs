//! Admin dashboard loading.

use std::sync::Arc;

use super::{BlogService, ContactService, NewsletterService};
use crate::domain::entities::{BlogPost, ContactMessage, NewsletterSubscriber};
use crate::domain::repositories::{BlogPostRepository, ContactMessageRepository, SubscriberRepository};
use crate::error::AppError;

/// The three admin collections, each with its own outcome.
///
/// One failing collection does not hide the other two.
#[derive(Debug)]
pub struct Dashboard {
    pub posts: Result<Vec<BlogPost>, AppError>,
    pub subscribers: Result<Vec<NewsletterSubscriber>, AppError>,
    pub messages: Result<Vec<ContactMessage>, AppError>,
}

pub struct AdminService<B, S, C>
where
    B: BlogPostRepository + ?Sized,
    S: SubscriberRepository + ?Sized,
    C: ContactMessageRepository + ?Sized,
{
    blog: Arc<BlogService<B>>,
    newsletter: Arc<NewsletterService<S>>,
    contact: Arc<ContactService<C>>,
}

impl<B, S, C> AdminService<B, S, C>
where
    B: BlogPostRepository + ?Sized,
    S: SubscriberRepository + ?Sized,
    C: ContactMessageRepository + ?Sized,
{
    pub fn new(
        blog: Arc<BlogService<B>>,
        newsletter: Arc<NewsletterService<S>>,
        contact: Arc<ContactService<C>>,
    ) -> Self {
        Self {
            blog,
            newsletter,
            contact,
        }
    }

    /// Fetches posts, subscribers and messages concurrently and waits for all three.
    pub async fn dashboard(&self, access_token: &str) -> Dashboard {
        let (posts, subscribers, messages) = tokio::join!(
            self.blog.list_all(access_token),
            self.newsletter.list(access_token),
            self.contact.list(access_token),
        );

        for (collection, failed) in [
            ("posts", posts.as_ref().err()),
            ("subscribers", subscribers.as_ref().err()),
            ("messages", messages.as_ref().err()),
        ] {
            if let Some(e) = failed {
                tracing::warn!(collection, error = %e, "Dashboard collection failed to load");
            }
        }

        Dashboard {
            posts,
            subscribers,
            messages,
        }
    }
}
