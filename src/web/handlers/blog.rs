//! Public blog pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::domain::entities::BlogPost;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::handlers::pages::ErrorTemplate;
use crate::web::layout::Layout;
use crate::web::notice::{Flash, GENERIC_ERROR, Notice};

#[derive(Template, WebTemplate)]
#[template(path = "blog.html")]
pub struct BlogTemplate {
    pub layout: Layout,
    pub posts: Vec<BlogPost>,
}

#[derive(Template, WebTemplate)]
#[template(path = "blog_post.html")]
pub struct BlogPostTemplate {
    pub layout: Layout,
    pub post: BlogPost,
}

/// `GET /blog` - published posts, newest first.
///
/// A backend failure still renders the page, with an error notice in place of the
/// list.
pub async fn blog_handler(State(state): State<AppState>, Flash(notice): Flash) -> Response {
    let layout = Layout::new("/blog", notice);

    match state.blog_service.list_published().await {
        Ok(posts) => BlogTemplate { layout, posts }.into_response(),
        Err(e) => {
            warn!(error = %e, "Failed to load blog posts");
            let page = BlogTemplate {
                layout: layout.with_notice(Notice::from_error(&e)),
                posts: Vec::new(),
            };
            (e.status(), page).into_response()
        }
    }
}

/// `GET /blog/{slug}` - one published post.
pub async fn blog_post_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Flash(notice): Flash,
) -> Response {
    let layout = Layout::new(format!("/blog/{slug}"), notice);

    match state.blog_service.get_published(&slug).await {
        Ok(post) => BlogPostTemplate { layout, post }.into_response(),
        Err(AppError::NotFound { .. }) => {
            let page = ErrorTemplate {
                layout,
                heading: "Artigo não encontrado".to_string(),
                message: "O artigo que procura não existe ou ainda não foi publicado."
                    .to_string(),
                back_href: "/blog",
                back_label: "Voltar ao Blog",
            };
            (StatusCode::NOT_FOUND, page).into_response()
        }
        Err(e) => {
            warn!(error = %e, slug = %slug, "Failed to load blog post");
            let page = ErrorTemplate {
                layout,
                heading: "Erro".to_string(),
                message: GENERIC_ERROR.to_string(),
                back_href: "/blog",
                back_label: "Voltar ao Blog",
            };
            (e.status(), page).into_response()
        }
    }
}
