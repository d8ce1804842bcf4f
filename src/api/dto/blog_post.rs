//! DTOs for blog post management.

use serde::{Deserialize, Deserializer, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};
use validator::Validate;

use crate::domain::entities::NewBlogPost;
use crate::utils::slug::slugify;
use crate::utils::validation::{not_blank, trim_in_place, trim_optional};

/// New article from the admin editor or `POST /api/admin/posts`.
///
/// The slug is not part of the request; it is derived from the title.
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "O título é obrigatório"),
        length(max = 200, message = "O título deve ter no máximo 200 caracteres")
    )]
    pub title: String,

    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "O resumo é obrigatório"),
        length(max = 500, message = "O resumo deve ter no máximo 500 caracteres")
    )]
    pub excerpt: String,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(url(message = "URL da imagem inválido"))]
    pub cover_image: Option<String>,

    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "O conteúdo é obrigatório"),
        length(max = 50000, message = "O conteúdo deve ter no máximo 50000 caracteres")
    )]
    pub content: String,

    /// Accepts a JSON boolean or an HTML checkbox (`on`); absent means `false`.
    #[serde(default, deserialize_with = "checkbox")]
    pub published: bool,
}

impl CreatePostRequest {
    pub fn normalized(mut self) -> Self {
        trim_in_place(&mut self.title);
        trim_in_place(&mut self.excerpt);
        trim_in_place(&mut self.content);
        self.cover_image = trim_optional(self.cover_image);
        self
    }
}

impl From<CreatePostRequest> for NewBlogPost {
    fn from(req: CreatePostRequest) -> Self {
        NewBlogPost {
            slug: slugify(&req.title),
            title: req.title,
            excerpt: req.excerpt,
            content: req.content,
            cover_image: req.cover_image,
            published: req.published,
        }
    }
}

/// Body of `PATCH /api/admin/posts/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePostRequest {
    pub published: bool,
}

/// Form of the publish toggle in the admin panel.
#[derive(Debug, Clone, Deserialize)]
pub struct PublishForm {
    #[serde(deserialize_with = "checkbox")]
    pub published: bool,
}

pub(crate) fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Bool(value) => value,
        Raw::Text(text) => matches!(text.as_str(), "on" | "true" | "1"),
    })
}
