//! DTOs for contact message management.

use serde::Deserialize;

use super::blog_post::checkbox;

/// Body of `PATCH /api/admin/messages/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMessageRequest {
    pub read: bool,
}

/// Form of the read toggle in the admin panel.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadForm {
    #[serde(deserialize_with = "checkbox")]
    pub read: bool,
}
