//! DTO for newsletter signups.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::NewSubscriber;
use crate::utils::validation::{not_blank, trim_in_place};

/// Newsletter signup, as posted by the site form or the JSON API.
///
/// Call [`NewsletterRequest::normalized`] before validating: rules apply to the
/// trimmed values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NewsletterRequest {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "O email é obrigatório"),
        email(message = "Email inválido"),
        length(max = 255, message = "O email deve ter no máximo 255 caracteres")
    )]
    pub email: String,

    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "O nome é obrigatório"),
        length(max = 100, message = "O nome deve ter no máximo 100 caracteres")
    )]
    pub name: String,
}

impl NewsletterRequest {
    /// Trims both fields and lowercases the email.
    pub fn normalized(mut self) -> Self {
        trim_in_place(&mut self.name);
        self.email = self.email.trim().to_lowercase();
        self
    }
}

impl From<NewsletterRequest> for NewSubscriber {
    fn from(req: NewsletterRequest) -> Self {
        NewSubscriber {
            email: req.email,
            name: req.name,
        }
    }
}
