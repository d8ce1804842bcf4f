//! Backend adapters against a local stand-in for the REST and auth services.

use axum::{
    Json, Router,
    extract::{RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;
use uuid::Uuid;

use raizes_web::domain::entities::{AppRole, NewSubscriber};
use raizes_web::domain::repositories::{
    AuthProvider, BlogPostRepository, RoleRepository, SubscriberRepository,
};
use raizes_web::error::AppError;
use raizes_web::infrastructure::supabase::{
    SupabaseAuthProvider, SupabaseBlogPostRepository, SupabaseClient, SupabaseConfig,
    SupabaseRoleRepository, SupabaseSubscriberRepository,
};

const ANON_KEY: &str = "anon-test-key";
const USER_TOKEN: &str = "user-access-token";
const ADMIN_ID: &str = "7d0f3f8e-4c3a-4f5e-9b43-0d9a1c2b3e4f";

#[derive(Debug, Clone)]
struct Seen {
    path: String,
    query: String,
    apikey: String,
    authorization: String,
    prefer: String,
}

#[derive(Default)]
struct Remote {
    seen: Mutex<Vec<Seen>>,
    emails: Mutex<Vec<String>>,
}

fn header(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

impl Remote {
    fn record(&self, path: &str, query: Option<String>, headers: &HeaderMap) -> Seen {
        let seen = Seen {
            path: path.to_string(),
            query: query.unwrap_or_default(),
            apikey: header(headers, "apikey"),
            authorization: header(headers, "authorization"),
            prefer: header(headers, "prefer"),
        };
        self.seen.lock().unwrap().push(seen.clone());
        seen
    }

    fn last(&self) -> Seen {
        self.seen.lock().unwrap().last().cloned().unwrap()
    }
}

type Shared = State<Arc<Remote>>;

async fn blog_posts(
    State(remote): Shared,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> impl IntoResponse {
    remote.record("blog_posts", query, &headers);
    Json(json!([{
        "id": "0b6c4d7e-3f1a-4c1e-8a5b-2d9e7f6a1b3c",
        "title": "Educar com presença",
        "slug": "educar-com-presenca",
        "excerpt": "Resumo",
        "content": "<p>Texto</p>",
        "cover_image": null,
        "published": true,
        "created_at": "2025-03-01T10:00:00.000000+00:00",
        "updated_at": "2025-03-02T10:00:00.000000+00:00"
    }]))
}

async fn subscribers(
    State(remote): Shared,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    remote.record("newsletter_subscribers", query, &headers);
    let email = body[0]["email"].as_str().unwrap_or_default().to_string();

    let mut emails = remote.emails.lock().unwrap();
    if emails.contains(&email) {
        return (
            StatusCode::CONFLICT,
            Json(json!({
                "code": "23505",
                "details": format!("Key (email)=({email}) already exists."),
                "hint": null,
                "message": "duplicate key value violates unique constraint \"newsletter_subscribers_email_key\""
            })),
        )
            .into_response();
    }
    emails.push(email);
    StatusCode::CREATED.into_response()
}

async fn user_roles(
    State(remote): Shared,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> impl IntoResponse {
    let seen = remote.record("user_roles", query, &headers);
    if seen.query.contains(&format!("user_id=eq.{ADMIN_ID}")) {
        Json(json!([{ "user_id": ADMIN_ID, "role": "admin" }]))
    } else {
        Json(json!([]))
    }
}

async fn token(
    State(remote): Shared,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    remote.record("token", query, &headers);
    if body["password"] != "certa" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_grant",
                "error_description": "Invalid login credentials"
            })),
        )
            .into_response();
    }

    Json(json!({
        "access_token": USER_TOKEN,
        "token_type": "bearer",
        "expires_in": 3600,
        "expires_at": 4_102_444_800_i64,
        "refresh_token": "refresh",
        "user": { "id": ADMIN_ID, "email": body["email"], "aud": "authenticated" }
    }))
    .into_response()
}

async fn user(State(remote): Shared, headers: HeaderMap) -> impl IntoResponse {
    let seen = remote.record("user", None, &headers);
    if seen.authorization == format!("Bearer {USER_TOKEN}") {
        Json(json!({ "id": ADMIN_ID, "email": "paula@example.com" })).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "code": 401, "msg": "invalid JWT: token is expired" })),
        )
            .into_response()
    }
}

async fn logout(State(remote): Shared, headers: HeaderMap) -> impl IntoResponse {
    let seen = remote.record("logout", None, &headers);
    if seen.authorization == format!("Bearer {USER_TOKEN}") {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::FORBIDDEN
    }
}

async fn start() -> (Arc<SupabaseClient>, Arc<Remote>) {
    let remote = Arc::new(Remote::default());
    let app = Router::new()
        .route("/rest/v1/blog_posts", get(blog_posts))
        .route("/rest/v1/newsletter_subscribers", post(subscribers))
        .route("/rest/v1/user_roles", get(user_roles))
        .route("/auth/v1/token", post(token))
        .route("/auth/v1/user", get(user))
        .route("/auth/v1/logout", post(logout))
        .route("/auth/v1/health", get(|| async { "ok" }))
        .with_state(remote.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = SupabaseClient::new(&SupabaseConfig {
        url: Url::parse(&format!("http://{addr}")).unwrap(),
        api_key: ANON_KEY.to_string(),
        timeout: Duration::from_secs(5),
    })
    .unwrap();

    (Arc::new(client), remote)
}

#[tokio::test]
async fn test_published_posts_query() {
    let (client, remote) = start().await;
    let repo = SupabaseBlogPostRepository::new(client);

    let posts = repo.list_published().await.unwrap();

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].slug, "educar-com-presenca");

    let seen = remote.last();
    assert_eq!(seen.apikey, ANON_KEY);
    assert_eq!(seen.authorization, format!("Bearer {ANON_KEY}"));
    assert!(seen.query.contains("published=eq.true"));
    assert!(seen.query.contains("order=created_at.desc"));
}

#[tokio::test]
async fn test_admin_reads_carry_user_token() {
    let (client, remote) = start().await;
    let repo = SupabaseBlogPostRepository::new(client);

    repo.list_all(USER_TOKEN).await.unwrap();

    let seen = remote.last();
    assert_eq!(seen.apikey, ANON_KEY);
    assert_eq!(seen.authorization, format!("Bearer {USER_TOKEN}"));
    assert!(!seen.query.contains("published"));
}

#[tokio::test]
async fn test_subscriber_insert_and_duplicate() {
    let (client, remote) = start().await;
    let repo = SupabaseSubscriberRepository::new(client);
    let subscriber = NewSubscriber {
        email: "ana@example.com".to_string(),
        name: "Ana".to_string(),
    };

    repo.create(subscriber.clone()).await.unwrap();
    assert_eq!(remote.last().prefer, "return=minimal");

    let err = repo.create(subscriber).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict { .. }));
    assert_eq!(err.constraint(), Some("newsletter_subscribers_email_key"));
}

#[tokio::test]
async fn test_password_sign_in() {
    let (client, remote) = start().await;
    let auth = SupabaseAuthProvider::new(client);

    let session = auth
        .sign_in_with_password("paula@example.com", "certa")
        .await
        .unwrap();
    assert_eq!(session.access_token, USER_TOKEN);
    assert_eq!(session.user.id.to_string(), ADMIN_ID);
    assert_eq!(session.expires_at.unwrap().timestamp(), 4_102_444_800);
    assert_eq!(remote.last().query, "grant_type=password");

    let err = auth
        .sign_in_with_password("paula@example.com", "errada")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized { .. }));
    assert_eq!(err.message(), "Email ou palavra-passe incorretos.");
}

#[tokio::test]
async fn test_current_user_and_sign_out() {
    let (client, _remote) = start().await;
    let auth = SupabaseAuthProvider::new(client);

    let user = auth.current_user(USER_TOKEN).await.unwrap().unwrap();
    assert_eq!(user.email.as_deref(), Some("paula@example.com"));
    assert_eq!(auth.current_user("expired").await.unwrap(), None);

    auth.sign_out(USER_TOKEN).await.unwrap();
    // A session the backend no longer knows is already signed out.
    auth.sign_out("expired").await.unwrap();
}

#[tokio::test]
async fn test_role_lookup() {
    let (client, remote) = start().await;
    let roles = SupabaseRoleRepository::new(client);
    let admin: Uuid = ADMIN_ID.parse().unwrap();

    assert!(roles.has_role(USER_TOKEN, admin, AppRole::Admin).await.unwrap());
    let seen = remote.last();
    assert_eq!(seen.authorization, format!("Bearer {USER_TOKEN}"));
    assert!(seen.query.contains("role=eq.admin"));
    assert!(seen.query.contains("limit=1"));

    assert!(
        !roles
            .has_role(USER_TOKEN, Uuid::new_v4(), AppRole::Admin)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_health_check() {
    let (client, _remote) = start().await;
    assert!(SupabaseAuthProvider::new(client).health_check().await);

    // Nothing listens on a port released right after binding.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let offline = SupabaseClient::new(&SupabaseConfig {
        url: Url::parse(&format!("http://{addr}")).unwrap(),
        api_key: ANON_KEY.to_string(),
        timeout: Duration::from_secs(2),
    })
    .unwrap();
    assert!(!SupabaseAuthProvider::new(Arc::new(offline)).health_check().await);
}
