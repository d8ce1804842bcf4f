//! Newsletter subscriber entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A row of the `newsletter_subscribers` table.
///
/// `email` is unique (`newsletter_subscribers_email_key`) and always stored trimmed
/// and lowercased.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsletterSubscriber {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub subscribed: bool,
    pub created_at: DateTime<Utc>,
}

impl NewsletterSubscriber {
    /// Name shown in the admin panel, with a placeholder for anonymous rows.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => "Sem nome",
        }
    }
}

/// Input data for a newsletter signup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSubscriber {
    pub email: String,
    pub name: String,
}
