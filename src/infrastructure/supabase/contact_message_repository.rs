//! Hosted backend implementation of the contact message repository.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use super::SupabaseClient;
use crate::domain::entities::{ContactMessage, NewContactMessage};
use crate::domain::repositories::ContactMessageRepository;
use crate::error::AppError;

const TABLE: &str = "contact_messages";

pub struct SupabaseContactMessageRepository {
    client: Arc<SupabaseClient>,
}

impl SupabaseContactMessageRepository {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContactMessageRepository for SupabaseContactMessageRepository {
    async fn create(&self, message: NewContactMessage) -> Result<(), AppError> {
        self.client.table(TABLE).insert(&[message]).await?;
        Ok(())
    }

    async fn list_all(&self, access_token: &str) -> Result<Vec<ContactMessage>, AppError> {
        let messages = self
            .client
            .table(TABLE)
            .bearer(access_token)
            .select("*")
            .order_desc("created_at")
            .fetch()
            .await?;

        Ok(messages)
    }

    async fn set_read(
        &self,
        access_token: &str,
        id: Uuid,
        read: bool,
    ) -> Result<Option<ContactMessage>, AppError> {
        let message = self
            .client
            .table(TABLE)
            .bearer(access_token)
            .select("*")
            .eq("id", id)
            .update_returning(&json!({ "read": read }))
            .await?;

        Ok(message)
    }
}
