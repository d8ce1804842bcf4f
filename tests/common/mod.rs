#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use raizes_web::domain::entities::{
    AppRole, AuthSession, AuthUser, BlogPost, ContactMessage, NewBlogPost, NewContactMessage,
    NewSubscriber, NewsletterSubscriber,
};
use raizes_web::domain::repositories::{
    AuthProvider, BlogPostRepository, ContactMessageRepository, RoleRepository,
    SubscriberRepository,
};
use raizes_web::error::AppError;
use raizes_web::routes::build_router;
use raizes_web::state::{AppState, Backend};

pub const ADMIN_EMAIL: &str = "paula@example.com";
pub const ADMIN_PASSWORD: &str = "raizes-2025";
pub const READER_EMAIL: &str = "leitor@example.com";
pub const READER_PASSWORD: &str = "leitor-2025";

struct FakeUser {
    id: Uuid,
    email: String,
    password: String,
}

/// In-memory stand-in for the hosted backend.
///
/// Mirrors what the backend enforces: unique subscriber emails and post slugs,
/// admin-only access to private tables, and sessions that can be revoked.
pub struct FakeBackend {
    users: Vec<FakeUser>,
    admins: Mutex<Vec<Uuid>>,
    sessions: Mutex<HashMap<String, Uuid>>,
    pub posts: Mutex<Vec<BlogPost>>,
    pub subscribers: Mutex<Vec<NewsletterSubscriber>>,
    pub messages: Mutex<Vec<ContactMessage>>,
    pub signed_out: Mutex<Vec<String>>,
    offline: AtomicBool,
    read_delay_ms: AtomicU64,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        let admin = FakeUser {
            id: Uuid::new_v4(),
            email: ADMIN_EMAIL.to_string(),
            password: ADMIN_PASSWORD.to_string(),
        };
        let reader = FakeUser {
            id: Uuid::new_v4(),
            email: READER_EMAIL.to_string(),
            password: READER_PASSWORD.to_string(),
        };

        Arc::new(Self {
            admins: Mutex::new(vec![admin.id]),
            users: vec![admin, reader],
            sessions: Mutex::new(HashMap::new()),
            posts: Mutex::new(Vec::new()),
            subscribers: Mutex::new(Vec::new()),
            messages: Mutex::new(Vec::new()),
            signed_out: Mutex::new(Vec::new()),
            offline: AtomicBool::new(false),
            read_delay_ms: AtomicU64::new(0),
        })
    }

    /// Makes every call fail as if the backend were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Makes public post reads take `delay` before answering.
    pub fn set_read_delay(&self, delay: std::time::Duration) {
        self.read_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), AppError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::upstream(
                "backend request failed: connection refused",
                json!({ "status": null }),
            ));
        }
        Ok(())
    }

    fn user_id(&self, email: &str) -> Uuid {
        self.users
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.id)
            .unwrap()
    }

    /// Opens a session for `email` without going through the password check.
    pub fn session_for(&self, email: &str) -> String {
        let token = format!("token-{}", Uuid::new_v4());
        self.sessions
            .lock()
            .unwrap()
            .insert(token.clone(), self.user_id(email));
        token
    }

    pub fn has_session(&self, token: &str) -> bool {
        self.sessions.lock().unwrap().contains_key(token)
    }

    /// Backend sessions currently open for `email`.
    pub fn tokens_of(&self, email: &str) -> Vec<String> {
        let id = self.user_id(email);
        self.sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, user)| **user == id)
            .map(|(token, _)| token.clone())
            .collect()
    }

    /// Drops every backend session of `email`, as when they expire.
    pub fn expire_sessions(&self, email: &str) {
        let id = self.user_id(email);
        self.sessions.lock().unwrap().retain(|_, user| *user != id);
    }

    pub fn revoke_admin(&self, email: &str) {
        let id = self.user_id(email);
        self.admins.lock().unwrap().retain(|a| *a != id);
    }

    /// Resolves `token` to an admin, as row-level security would.
    fn require_admin(&self, token: &str) -> Result<(), AppError> {
        self.check_online()?;
        let sessions = self.sessions.lock().unwrap();
        match sessions.get(token) {
            Some(id) if self.admins.lock().unwrap().contains(id) => Ok(()),
            Some(_) => Err(AppError::forbidden("permission denied", json!({}))),
            None => Err(AppError::unauthorized("JWT expired", json!({}))),
        }
    }

    pub fn add_post(&self, title: &str, slug: &str, published: bool, days_ago: i64) -> BlogPost {
        let post = BlogPost {
            id: Uuid::new_v4(),
            title: title.to_string(),
            slug: slug.to_string(),
            excerpt: format!("Resumo de {title}"),
            content: format!("<p>{title}</p>"),
            cover_image: None,
            published,
            created_at: Utc::now() - Duration::days(days_ago),
        };
        self.posts.lock().unwrap().push(post.clone());
        post
    }

    pub fn add_message(&self, name: &str, read: bool) -> ContactMessage {
        let message = ContactMessage {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: "visitante@example.com".to_string(),
            phone: None,
            message: "Gostaria de saber mais sobre as sessões.".to_string(),
            read,
            created_at: Utc::now(),
        };
        self.messages.lock().unwrap().push(message.clone());
        message
    }

    pub fn backend(self: &Arc<Self>) -> Backend {
        Backend {
            posts: self.clone(),
            subscribers: self.clone(),
            messages: self.clone(),
            roles: self.clone(),
            auth: self.clone(),
        }
    }

    /// Test server that keeps cookies between requests, like a browser.
    pub fn server(self: &Arc<Self>) -> TestServer {
        let state = AppState::new(self.backend(), false);
        TestServer::builder()
            .save_cookies()
            .build(build_router(state))
            .unwrap()
    }
}

fn newest_first<T>(items: &mut [T], created_at: impl Fn(&T) -> chrono::DateTime<Utc>) {
    items.sort_by_key(|item| std::cmp::Reverse(created_at(item)));
}

#[async_trait]
impl BlogPostRepository for FakeBackend {
    async fn list_published(&self) -> Result<Vec<BlogPost>, AppError> {
        let delay = self.read_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
        }
        self.check_online()?;
        let mut posts: Vec<BlogPost> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.published)
            .cloned()
            .collect();
        newest_first(&mut posts, |p| p.created_at);
        Ok(posts)
    }

    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, AppError> {
        self.check_online()?;
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.slug == slug && p.published)
            .cloned())
    }

    async fn list_all(&self, access_token: &str) -> Result<Vec<BlogPost>, AppError> {
        self.require_admin(access_token)?;
        let mut posts = self.posts.lock().unwrap().clone();
        newest_first(&mut posts, |p| p.created_at);
        Ok(posts)
    }

    async fn create(&self, access_token: &str, new_post: NewBlogPost) -> Result<BlogPost, AppError> {
        self.require_admin(access_token)?;
        let mut posts = self.posts.lock().unwrap();
        if posts.iter().any(|p| p.slug == new_post.slug) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "blog_posts_slug_key" }),
            ));
        }

        let post = BlogPost {
            id: Uuid::new_v4(),
            title: new_post.title,
            slug: new_post.slug,
            excerpt: new_post.excerpt,
            content: new_post.content,
            cover_image: new_post.cover_image,
            published: new_post.published,
            created_at: Utc::now(),
        };
        posts.push(post.clone());
        Ok(post)
    }

    async fn set_published(
        &self,
        access_token: &str,
        id: Uuid,
        published: bool,
    ) -> Result<Option<BlogPost>, AppError> {
        self.require_admin(access_token)?;
        let mut posts = self.posts.lock().unwrap();
        Ok(posts.iter_mut().find(|p| p.id == id).map(|p| {
            p.published = published;
            p.clone()
        }))
    }

    async fn delete(&self, access_token: &str, id: Uuid) -> Result<bool, AppError> {
        self.require_admin(access_token)?;
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() != before)
    }
}

#[async_trait]
impl SubscriberRepository for FakeBackend {
    async fn create(&self, subscriber: NewSubscriber) -> Result<(), AppError> {
        self.check_online()?;
        let mut subscribers = self.subscribers.lock().unwrap();
        if subscribers.iter().any(|s| s.email == subscriber.email) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "newsletter_subscribers_email_key" }),
            ));
        }

        subscribers.push(NewsletterSubscriber {
            id: Uuid::new_v4(),
            email: subscriber.email,
            name: Some(subscriber.name),
            subscribed: true,
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn list_all(&self, access_token: &str) -> Result<Vec<NewsletterSubscriber>, AppError> {
        self.require_admin(access_token)?;
        let mut subscribers = self.subscribers.lock().unwrap().clone();
        newest_first(&mut subscribers, |s| s.created_at);
        Ok(subscribers)
    }
}

#[async_trait]
impl ContactMessageRepository for FakeBackend {
    async fn create(&self, message: NewContactMessage) -> Result<(), AppError> {
        self.check_online()?;
        self.messages.lock().unwrap().push(ContactMessage {
            id: Uuid::new_v4(),
            name: message.name,
            email: message.email,
            phone: message.phone,
            message: message.message,
            read: false,
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn list_all(&self, access_token: &str) -> Result<Vec<ContactMessage>, AppError> {
        self.require_admin(access_token)?;
        let mut messages = self.messages.lock().unwrap().clone();
        newest_first(&mut messages, |m| m.created_at);
        Ok(messages)
    }

    async fn set_read(
        &self,
        access_token: &str,
        id: Uuid,
        read: bool,
    ) -> Result<Option<ContactMessage>, AppError> {
        self.require_admin(access_token)?;
        let mut messages = self.messages.lock().unwrap();
        Ok(messages.iter_mut().find(|m| m.id == id).map(|m| {
            m.read = read;
            m.clone()
        }))
    }
}

#[async_trait]
impl RoleRepository for FakeBackend {
    async fn has_role(
        &self,
        access_token: &str,
        user_id: Uuid,
        role: AppRole,
    ) -> Result<bool, AppError> {
        self.check_online()?;
        assert_eq!(role, AppRole::Admin);
        if !self.has_session(access_token) {
            return Err(AppError::unauthorized("JWT expired", json!({})));
        }
        Ok(self.admins.lock().unwrap().contains(&user_id))
    }
}

#[async_trait]
impl AuthProvider for FakeBackend {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AppError> {
        self.check_online()?;
        let user = self
            .users
            .iter()
            .find(|u| u.email == email && u.password == password)
            .ok_or_else(|| {
                AppError::unauthorized("Email ou palavra-passe incorretos.", json!({}))
            })?;

        let token = self.session_for(&user.email);
        Ok(AuthSession {
            access_token: token,
            refresh_token: Some("refresh".to_string()),
            expires_at: Some(Utc::now() + Duration::hours(1)),
            user: AuthUser {
                id: user.id,
                email: Some(user.email.clone()),
            },
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AppError> {
        self.check_online()?;
        self.sessions.lock().unwrap().remove(access_token);
        self.signed_out
            .lock()
            .unwrap()
            .push(access_token.to_string());
        Ok(())
    }

    async fn current_user(&self, access_token: &str) -> Result<Option<AuthUser>, AppError> {
        self.check_online()?;
        let sessions = self.sessions.lock().unwrap();
        Ok(sessions.get(access_token).map(|id| {
            let user = self.users.iter().find(|u| u.id == *id).unwrap();
            AuthUser {
                id: user.id,
                email: Some(user.email.clone()),
            }
        }))
    }

    async fn health_check(&self) -> bool {
        !self.offline.load(Ordering::SeqCst)
    }
}

/// All `Set-Cookie` values of a response.
pub fn set_cookies(response: &axum_test::TestResponse) -> Vec<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

/// Signs in through the login form; the server keeps the session cookie.
pub async fn sign_in(server: &TestServer, email: &str, password: &str) {
    server
        .post("/admin/login")
        .form(&[("email", email), ("password", password)])
        .await
        .assert_status(axum::http::StatusCode::SEE_OTHER);
}

pub fn location(response: &axum_test::TestResponse) -> String {
    response
        .headers()
        .get("location")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string()
}
