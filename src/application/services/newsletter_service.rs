//! Newsletter signup service.

use metrics::counter;
use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{NewSubscriber, NewsletterSubscriber};
use crate::domain::repositories::{SUBSCRIBER_EMAIL_CONSTRAINT, SubscriberRepository};
use crate::error::AppError;

/// Shown when the email is already on the list.
pub const ALREADY_SUBSCRIBED: &str = "Este email já está subscrito.";

pub struct NewsletterService<R: SubscriberRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: SubscriberRepository + ?Sized> NewsletterService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Adds a validated, normalized subscriber.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] with [`ALREADY_SUBSCRIBED`] when the email is
    /// already subscribed. Any other backend failure is returned unchanged.
    pub async fn subscribe(&self, subscriber: NewSubscriber) -> Result<(), AppError> {
        match self.repository.create(subscriber).await {
            Ok(()) => {
                counter!("form_submissions_total", "form" => "newsletter").increment(1);
                tracing::info!("Newsletter subscription stored");
                Ok(())
            }
            Err(e) if e.constraint() == Some(SUBSCRIBER_EMAIL_CONSTRAINT) => {
                counter!("newsletter_duplicates_total").increment(1);
                tracing::debug!("Duplicate newsletter subscription");
                Err(AppError::conflict(
                    ALREADY_SUBSCRIBED,
                    json!({ "constraint": SUBSCRIBER_EMAIL_CONSTRAINT }),
                ))
            }
            Err(e) => Err(e),
        }
    }

    /// All subscribers, newest first.
    pub async fn list(&self, access_token: &str) -> Result<Vec<NewsletterSubscriber>, AppError> {
        self.repository.list_all(access_token).await
    }
}
