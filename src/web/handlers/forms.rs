//! Contact page and the newsletter form shown across the site.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use validator::Validate;

use crate::api::dto::{ContactRequest, NewsletterRequest};
use crate::state::AppState;
use crate::utils::redirect::safe_return_path;
use crate::utils::validation::FieldErrors;
use crate::web::layout::Layout;
use crate::web::notice::{Flash, Notice, redirect_with};

const CONTACT_FAILED: &str = "Ocorreu um erro ao enviar a mensagem. Tente novamente.";

#[derive(Template, WebTemplate)]
#[template(path = "contacto.html")]
pub struct ContactTemplate {
    pub layout: Layout,
    pub form: ContactRequest,
    pub errors: FieldErrors,
}

/// Standalone newsletter form, rendered when a signup posted from any page fails.
#[derive(Template, WebTemplate)]
#[template(path = "newsletter.html")]
pub struct NewsletterTemplate {
    pub layout: Layout,
    pub form: NewsletterRequest,
    pub errors: FieldErrors,
    pub return_to: String,
}

/// Newsletter form body: the signup plus the page to go back to.
#[derive(Debug, Deserialize)]
pub struct NewsletterForm {
    #[serde(flatten)]
    pub signup: NewsletterRequest,
    #[serde(default)]
    pub return_to: Option<String>,
}

/// `GET /contacto`
pub async fn contact_page_handler(Flash(notice): Flash) -> impl IntoResponse {
    ContactTemplate {
        layout: Layout::new("/contacto", notice),
        form: ContactRequest::default(),
        errors: FieldErrors::default(),
    }
}

/// `POST /contacto`
///
/// Invalid input re-renders the form with the submitted values (422). A stored
/// message redirects back to an empty form with a confirmation.
pub async fn contact_submit_handler(
    State(state): State<AppState>,
    browser: Session,
    Form(form): Form<ContactRequest>,
) -> Response {
    let form = form.normalized();

    if let Err(errors) = form.validate() {
        let page = ContactTemplate {
            layout: Layout::new("/contacto", None),
            errors: FieldErrors::from(&errors),
            form,
        };
        return (StatusCode::UNPROCESSABLE_ENTITY, page).into_response();
    }

    match state.contact_service.submit(form.clone().into()).await {
        Ok(()) => {
            redirect_with(
                &browser,
                "/contacto",
                Notice::success("Mensagem enviada!", Some("Entraremos em contacto em breve.")),
            )
            .await
        }
        Err(e) => {
            let page = ContactTemplate {
                layout: Layout::new("/contacto", Some(Notice::error("Erro", Some(CONTACT_FAILED)))),
                form,
                errors: FieldErrors::default(),
            };
            (e.status(), page).into_response()
        }
    }
}

/// `POST /newsletter`
///
/// On success the visitor goes back to the page the form was posted from. Failures
/// render the standalone form with the submitted values and the reason.
pub async fn newsletter_handler(
    State(state): State<AppState>,
    browser: Session,
    Form(form): Form<NewsletterForm>,
) -> Response {
    let return_to = safe_return_path(form.return_to.as_deref());
    let signup = form.signup.normalized();

    if let Err(errors) = signup.validate() {
        let page = NewsletterTemplate {
            layout: Layout::new(return_to.clone(), None),
            form: signup,
            errors: FieldErrors::from(&errors),
            return_to,
        };
        return (StatusCode::UNPROCESSABLE_ENTITY, page).into_response();
    }

    match state.newsletter_service.subscribe(signup.clone().into()).await {
        Ok(()) => {
            redirect_with(
                &browser,
                &return_to,
                Notice::success(
                    "Subscrição realizada!",
                    Some("Obrigado por subscrever a nossa newsletter."),
                ),
            )
            .await
        }
        Err(e) => {
            let page = NewsletterTemplate {
                layout: Layout::new(return_to.clone(), Some(Notice::from_error(&e))),
                form: signup,
                errors: FieldErrors::default(),
                return_to,
            };
            (e.status(), page).into_response()
        }
    }
}
