//! Repository trait for newsletter subscribers.

use async_trait::async_trait;

use crate::domain::entities::{NewSubscriber, NewsletterSubscriber};
use crate::error::AppError;

/// Name of the uniqueness constraint on subscriber emails.
pub const SUBSCRIBER_EMAIL_CONSTRAINT: &str = "newsletter_subscribers_email_key";

/// Repository interface for the `newsletter_subscribers` table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriberRepository: Send + Sync {
    /// Inserts a subscriber with the anonymous role.
    ///
    /// The anonymous role may insert but not read subscribers, so nothing is returned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] with constraint [`SUBSCRIBER_EMAIL_CONSTRAINT`]
    /// when the email is already subscribed.
    async fn create(&self, subscriber: NewSubscriber) -> Result<(), AppError>;

    /// Lists all subscribers, newest first.
    async fn list_all(&self, access_token: &str) -> Result<Vec<NewsletterSubscriber>, AppError>;
}
