//! Admin panel: sign-in, dashboard and content actions.
//!
//! Every action answers with a redirect back to the dashboard tab it came from and
//! leaves a notice describing the outcome. Only an invalid new-post form is
//! re-rendered in place, so the typed content is not lost.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension, Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::{CreatePostRequest, LoginRequest, PublishForm, ReadForm};
use crate::application::services::{ACCESS_DENIED, Dashboard};
use crate::domain::entities::{AdminSession, BlogPost, ContactMessage, NewsletterSubscriber};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::validation::FieldErrors;
use crate::web::layout::Layout;
use crate::web::middleware::web_auth::LOGIN_PATH;
use crate::web::notice::{Flash, Notice, redirect_with};
use crate::web::session;

/// Dashboard tab selected with `?tab=`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Blog,
    Newsletter,
    Messages,
}

impl Tab {
    /// Unknown or missing values select the blog tab.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("newsletter") => Tab::Newsletter,
            Some("messages") => Tab::Messages,
            _ => Tab::Blog,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Blog => "blog",
            Tab::Newsletter => "newsletter",
            Tab::Messages => "messages",
        }
    }

    fn location(&self) -> String {
        format!("/admin?tab={}", self.as_str())
    }
}

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub tab: Option<String>,
}

#[derive(Template, WebTemplate)]
#[template(path = "admin_login.html")]
pub struct LoginTemplate {
    pub layout: Layout,
    pub email: String,
    pub errors: FieldErrors,
}

#[derive(Template, WebTemplate)]
#[template(path = "admin.html")]
pub struct AdminTemplate {
    pub layout: Layout,
    pub tab: Tab,
    pub email: String,
    pub posts: Vec<BlogPost>,
    pub posts_error: Option<String>,
    pub subscribers: Vec<NewsletterSubscriber>,
    pub subscribers_error: Option<String>,
    pub messages: Vec<ContactMessage>,
    pub messages_error: Option<String>,
    pub form: CreatePostRequest,
    pub errors: FieldErrors,
}

fn split<T>(result: Result<Vec<T>, AppError>) -> (Vec<T>, Option<String>) {
    match result {
        Ok(items) => (items, None),
        Err(e) => (Vec::new(), Notice::from_error(&e).message),
    }
}

impl AdminTemplate {
    fn new(layout: Layout, tab: Tab, session: &AdminSession, dashboard: Dashboard) -> Self {
        let (posts, posts_error) = split(dashboard.posts);
        let (subscribers, subscribers_error) = split(dashboard.subscribers);
        let (messages, messages_error) = split(dashboard.messages);

        Self {
            layout,
            tab,
            email: session.email().to_string(),
            posts,
            posts_error,
            subscribers,
            subscribers_error,
            messages,
            messages_error,
            form: CreatePostRequest::default(),
            errors: FieldErrors::default(),
        }
    }

    pub fn unread_count(&self) -> usize {
        self.messages.iter().filter(|m| !m.read).count()
    }
}

/// `GET /admin/login`
pub async fn login_page_handler(Flash(notice): Flash) -> impl IntoResponse {
    LoginTemplate {
        layout: Layout::new(LOGIN_PATH, notice),
        email: String::new(),
        errors: FieldErrors::default(),
    }
}

/// `POST /admin/login`
///
/// Signs in, checks the admin role and keeps the admin in the browser session.
/// Wrong credentials (401), a missing role (403) and backend failures re-render the
/// form with a notice.
pub async fn login_submit_handler(
    State(state): State<AppState>,
    browser: Session,
    Form(form): Form<LoginRequest>,
) -> Response {
    let form = form.normalized();

    if let Err(errors) = form.validate() {
        let page = LoginTemplate {
            layout: Layout::new(LOGIN_PATH, None),
            email: form.email,
            errors: FieldErrors::from(&errors),
        };
        return (StatusCode::UNPROCESSABLE_ENTITY, page).into_response();
    }

    let result = match state.auth_service.login(&form.email, &form.password).await {
        Ok(admin) => session::sign_in(&browser, &admin).await.map_err(|e| {
            warn!(error = %e, "Could not store the admin session");
            AppError::internal("Internal server error", json!({}))
        }),
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => {
            redirect_with(
                &browser,
                "/admin",
                Notice::success("Autenticado com sucesso!", None),
            )
            .await
        }
        Err(e) => {
            let notice = match &e {
                AppError::Forbidden { .. } => Notice::error(
                    ACCESS_DENIED,
                    Some("Esta conta não tem permissões de administração."),
                ),
                other => Notice::from_error(other),
            };
            let page = LoginTemplate {
                layout: Layout::new(LOGIN_PATH, Some(notice)),
                email: form.email,
                errors: FieldErrors::default(),
            };
            (e.status(), page).into_response()
        }
    }
}

/// `POST /admin/logout`
///
/// Revokes the backend session when an admin is signed in; the browser session
/// forgets the admin either way.
pub async fn logout_handler(State(state): State<AppState>, browser: Session) -> Response {
    if let Some(admin) = session::sign_out(&browser).await
        && let Err(e) = state.auth_service.logout(admin).await
    {
        warn!(error = %e, "Backend sign-out failed, session dropped anyway");
    }

    redirect_with(
        &browser,
        LOGIN_PATH,
        Notice::success("Sessão terminada.", None),
    )
    .await
}

/// `GET /admin?tab=blog|newsletter|messages`
pub async fn dashboard_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Query(query): Query<DashboardQuery>,
    Flash(notice): Flash,
) -> impl IntoResponse {
    let tab = Tab::parse(query.tab.as_deref());
    let dashboard = state.admin_service.dashboard(&session.access_token).await;

    AdminTemplate::new(Layout::new("/admin", notice), tab, &session, dashboard)
}

/// `POST /admin/posts`
pub async fn create_post_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    browser: Session,
    Form(form): Form<CreatePostRequest>,
) -> Response {
    let form = form.normalized();

    if let Err(errors) = form.validate() {
        let errors = FieldErrors::from(&errors);
        let dashboard = state.admin_service.dashboard(&session.access_token).await;
        let notice = Notice::error("Erro ao criar artigo", Some(&errors.summary()));
        let mut page = AdminTemplate::new(
            Layout::new("/admin", Some(notice)),
            Tab::Blog,
            &session,
            dashboard,
        );
        page.errors = errors;
        page.form = form;
        return (StatusCode::UNPROCESSABLE_ENTITY, page).into_response();
    }

    match state
        .blog_service
        .create_post(&session.access_token, form.clone().into())
        .await
    {
        Ok(post) => {
            info!(slug = %post.slug, "Post created from the admin panel");
            redirect_with(
                &browser,
                &Tab::Blog.location(),
                Notice::success("Artigo criado!", None),
            )
            .await
        }
        Err(e) => {
            let dashboard = state.admin_service.dashboard(&session.access_token).await;
            let mut notice = Notice::from_error(&e);
            notice.title = "Erro ao criar artigo".to_string();

            let mut page =
                AdminTemplate::new(Layout::new("/admin", Some(notice)), Tab::Blog, &session, dashboard);
            page.form = form;
            (e.status(), page).into_response()
        }
    }
}

/// `POST /admin/posts/{id}/publish`
pub async fn publish_post_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    browser: Session,
    Path(id): Path<Uuid>,
    Form(form): Form<PublishForm>,
) -> Response {
    let notice = match state
        .blog_service
        .set_published(&session.access_token, id, form.published)
        .await
    {
        Ok(_) => Notice::success("Artigo atualizado!", None),
        Err(e) => Notice::from_error(&e),
    };

    redirect_with(&browser, &Tab::Blog.location(), notice).await
}

/// `POST /admin/posts/{id}/delete`
pub async fn delete_post_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    browser: Session,
    Path(id): Path<Uuid>,
) -> Response {
    let notice = match state.blog_service.delete_post(&session.access_token, id).await {
        Ok(()) => Notice::success("Artigo eliminado!", None),
        Err(e) => Notice::from_error(&e),
    };

    redirect_with(&browser, &Tab::Blog.location(), notice).await
}

/// `POST /admin/messages/{id}/read`
pub async fn message_read_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    browser: Session,
    Path(id): Path<Uuid>,
    Form(form): Form<ReadForm>,
) -> Response {
    let notice = match state
        .contact_service
        .set_read(&session.access_token, id, form.read)
        .await
    {
        Ok(message) if message.read => Notice::success("Mensagem marcada como lida.", None),
        Ok(_) => Notice::success("Mensagem marcada como não lida.", None),
        Err(e) => Notice::from_error(&e),
    };

    redirect_with(&browser, &Tab::Messages.location(), notice).await
}
