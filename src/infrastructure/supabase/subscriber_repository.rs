//! Hosted backend implementation of the subscriber repository.

use async_trait::async_trait;
use std::sync::Arc;

use super::SupabaseClient;
use crate::domain::entities::{NewSubscriber, NewsletterSubscriber};
use crate::domain::repositories::SubscriberRepository;
use crate::error::AppError;

const TABLE: &str = "newsletter_subscribers";

pub struct SupabaseSubscriberRepository {
    client: Arc<SupabaseClient>,
}

impl SupabaseSubscriberRepository {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SubscriberRepository for SupabaseSubscriberRepository {
    async fn create(&self, subscriber: NewSubscriber) -> Result<(), AppError> {
        self.client.table(TABLE).insert(&[subscriber]).await?;
        Ok(())
    }

    async fn list_all(&self, access_token: &str) -> Result<Vec<NewsletterSubscriber>, AppError> {
        let subscribers = self
            .client
            .table(TABLE)
            .bearer(access_token)
            .select("*")
            .order_desc("created_at")
            .fetch()
            .await?;

        Ok(subscribers)
    }
}
