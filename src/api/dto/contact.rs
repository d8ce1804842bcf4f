//! DTO for the contact form.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::NewContactMessage;
use crate::utils::validation::{not_blank, trim_in_place, trim_optional};

/// Digits, spaces, `+`, `-` and parentheses.
static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9\s+\-()]*$").expect("valid phone regex"));

/// Contact form submission.
///
/// An empty phone field is the same as no phone at all.
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ContactRequest {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "O nome é obrigatório"),
        length(max = 100, message = "O nome deve ter no máximo 100 caracteres")
    )]
    pub name: String,

    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "O email é obrigatório"),
        email(message = "Email inválido"),
        length(max = 255, message = "O email deve ter no máximo 255 caracteres")
    )]
    pub email: String,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(
        length(max = 20, message = "O telefone deve ter no máximo 20 caracteres"),
        regex(path = *PHONE_REGEX, message = "Telefone inválido")
    )]
    pub phone: Option<String>,

    #[serde(default)]
    #[validate(length(
        min = 10,
        max = 2000,
        message = "A mensagem deve ter entre 10 e 2000 caracteres"
    ))]
    pub message: String,
}

impl ContactRequest {
    pub fn normalized(mut self) -> Self {
        trim_in_place(&mut self.name);
        self.email = self.email.trim().to_lowercase();
        self.phone = trim_optional(self.phone);
        trim_in_place(&mut self.message);
        self
    }
}

impl From<ContactRequest> for NewContactMessage {
    fn from(req: ContactRequest) -> Self {
        NewContactMessage {
            name: req.name,
            email: req.email,
            phone: req.phone,
            message: req.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(message: &str) -> ContactRequest {
        ContactRequest {
            name: "Ana".to_string(),
            email: "ana@test.com".to_string(),
            phone: None,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_message_length_bounds() {
        assert!(request(&"a".repeat(9)).validate().is_err());
        assert!(request(&"a".repeat(10)).validate().is_ok());
        assert!(request(&"a".repeat(2000)).validate().is_ok());
        assert!(request(&"a".repeat(2001)).validate().is_err());
    }

    #[test]
    fn test_message_length_counts_after_trim() {
        let padded = format!("   {}   ", "a".repeat(9));
        assert!(request(&padded).normalized().validate().is_err());
    }

    #[test]
    fn test_phone_rules() {
        let mut req = request("Olá, gostaria de saber mais.");

        req.phone = Some("+351 (963) 392-511".to_string());
        assert!(req.validate().is_ok());

        req.phone = Some("963abc".to_string());
        assert!(req.validate().is_err());

        req.phone = Some("1".repeat(21));
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_blank_phone_becomes_none() {
        let mut req = request("Olá, gostaria de saber mais.");
        req.phone = Some("   ".to_string());
        let req = req.normalized();
        assert_eq!(req.phone, None);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_form_with_empty_phone() {
        let req: ContactRequest = serde_json::from_value(serde_json::json!({
            "name": "Ana",
            "email": "Ana@Test.com",
            "phone": "",
            "message": "Mensagem suficientemente longa"
        }))
        .unwrap();
        assert_eq!(req.phone, None);

        let message = NewContactMessage::from(req.normalized());
        assert_eq!(message.email, "ana@test.com");
    }
}
