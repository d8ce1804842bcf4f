//! Contact message service.

use metrics::counter;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{ContactMessage, NewContactMessage};
use crate::domain::repositories::ContactMessageRepository;
use crate::error::AppError;

pub struct ContactService<R: ContactMessageRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: ContactMessageRepository + ?Sized> ContactService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Stores a validated, normalized message. New messages are unread.
    pub async fn submit(&self, message: NewContactMessage) -> Result<(), AppError> {
        self.repository.create(message).await?;
        counter!("form_submissions_total", "form" => "contact").increment(1);
        tracing::info!("Contact message stored");
        Ok(())
    }

    pub async fn list(&self, access_token: &str) -> Result<Vec<ContactMessage>, AppError> {
        self.repository.list_all(access_token).await
    }

    /// Marks a message as read or unread.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no message has this id.
    pub async fn set_read(
        &self,
        access_token: &str,
        id: Uuid,
        read: bool,
    ) -> Result<ContactMessage, AppError> {
        self.repository
            .set_read(access_token, id, read)
            .await?
            .ok_or_else(|| AppError::not_found("Mensagem não encontrada", json!({ "id": id })))
    }
}
