//! Repository trait for contact messages.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{ContactMessage, NewContactMessage};
use crate::error::AppError;

/// Repository interface for the `contact_messages` table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactMessageRepository: Send + Sync {
    /// Inserts a message with the anonymous role. Nothing is read back.
    async fn create(&self, message: NewContactMessage) -> Result<(), AppError>;

    /// Lists all messages, newest first.
    async fn list_all(&self, access_token: &str) -> Result<Vec<ContactMessage>, AppError>;

    /// Sets the `read` flag. Returns `Ok(None)` if no message has this id.
    async fn set_read(
        &self,
        access_token: &str,
        id: Uuid,
        read: bool,
    ) -> Result<Option<ContactMessage>, AppError>;
}
