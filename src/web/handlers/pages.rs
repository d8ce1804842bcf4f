//! Static pages and the error page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};

use crate::web::layout::Layout;
use crate::web::notice::Flash;

#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub layout: Layout,
}

#[derive(Template, WebTemplate)]
#[template(path = "sobre.html")]
pub struct AboutTemplate {
    pub layout: Layout,
}

#[derive(Template, WebTemplate)]
#[template(path = "metodo.html")]
pub struct MethodTemplate {
    pub layout: Layout,
}

/// Full-page error with a link back to a safe place.
#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub layout: Layout,
    pub heading: String,
    pub message: String,
    pub back_href: &'static str,
    pub back_label: &'static str,
}

impl ErrorTemplate {
    pub fn not_found(layout: Layout, heading: &str) -> Self {
        Self {
            layout,
            heading: heading.to_string(),
            message: "A página que procura não existe ou foi removida.".to_string(),
            back_href: "/",
            back_label: "Voltar ao Início",
        }
    }
}

/// `GET /`
pub async fn home_handler(Flash(notice): Flash) -> impl IntoResponse {
    HomeTemplate {
        layout: Layout::new("/", notice),
    }
}

/// `GET /sobre`
pub async fn about_handler(Flash(notice): Flash) -> impl IntoResponse {
    AboutTemplate {
        layout: Layout::new("/sobre", notice),
    }
}

/// `GET /metodo`
pub async fn method_handler(Flash(notice): Flash) -> impl IntoResponse {
    MethodTemplate {
        layout: Layout::new("/metodo", notice),
    }
}

/// Fallback for every unmatched path.
pub async fn not_found_handler(uri: Uri, Flash(notice): Flash) -> Response {
    let page = ErrorTemplate::not_found(Layout::new(uri.path(), notice), "Página não encontrada");
    (StatusCode::NOT_FOUND, page).into_response()
}
