//! Shared application state.

use std::sync::Arc;

use crate::application::services::{
    AdminService, AuthService, BlogService, ContactService, NewsletterService,
};
use crate::domain::repositories::{
    AuthProvider, BlogPostRepository, ContactMessageRepository, RoleRepository,
    SubscriberRepository,
};
use crate::infrastructure::supabase::{
    SupabaseAuthProvider, SupabaseBlogPostRepository, SupabaseClient,
    SupabaseContactMessageRepository, SupabaseRoleRepository, SupabaseSubscriberRepository,
};

pub type SharedBlogService = BlogService<dyn BlogPostRepository>;
pub type SharedNewsletterService = NewsletterService<dyn SubscriberRepository>;
pub type SharedContactService = ContactService<dyn ContactMessageRepository>;
pub type SharedAuthService = AuthService<dyn AuthProvider, dyn RoleRepository>;
pub type SharedAdminService =
    AdminService<dyn BlogPostRepository, dyn SubscriberRepository, dyn ContactMessageRepository>;

/// Backend implementations the services run on.
///
/// [`Backend::supabase`] wires the hosted backend; tests plug in fakes.
#[derive(Clone)]
pub struct Backend {
    pub posts: Arc<dyn BlogPostRepository>,
    pub subscribers: Arc<dyn SubscriberRepository>,
    pub messages: Arc<dyn ContactMessageRepository>,
    pub roles: Arc<dyn RoleRepository>,
    pub auth: Arc<dyn AuthProvider>,
}

impl Backend {
    pub fn supabase(client: Arc<SupabaseClient>) -> Self {
        Self {
            posts: Arc::new(SupabaseBlogPostRepository::new(client.clone())),
            subscribers: Arc::new(SupabaseSubscriberRepository::new(client.clone())),
            messages: Arc::new(SupabaseContactMessageRepository::new(client.clone())),
            roles: Arc::new(SupabaseRoleRepository::new(client.clone())),
            auth: Arc::new(SupabaseAuthProvider::new(client)),
        }
    }
}

/// State cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub blog_service: Arc<SharedBlogService>,
    pub newsletter_service: Arc<SharedNewsletterService>,
    pub contact_service: Arc<SharedContactService>,
    pub auth_service: Arc<SharedAuthService>,
    pub admin_service: Arc<SharedAdminService>,
    pub auth_provider: Arc<dyn AuthProvider>,
    /// Whether the browser session cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
}

impl AppState {
    pub fn new(backend: Backend, cookie_secure: bool) -> Self {
        let blog_service = Arc::new(BlogService::new(backend.posts));
        let newsletter_service = Arc::new(NewsletterService::new(backend.subscribers));
        let contact_service = Arc::new(ContactService::new(backend.messages));
        let auth_service = Arc::new(AuthService::new(backend.auth.clone(), backend.roles));
        let admin_service = Arc::new(AdminService::new(
            blog_service.clone(),
            newsletter_service.clone(),
            contact_service.clone(),
        ));

        Self {
            blog_service,
            newsletter_service,
            contact_service,
            auth_service,
            admin_service,
            auth_provider: backend.auth,
            cookie_secure,
        }
    }
}
