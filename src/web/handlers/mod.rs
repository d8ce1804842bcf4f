//! HTML template rendering handlers for the public site and the admin panel.

pub mod admin;
pub mod blog;
pub mod forms;
pub mod pages;

pub use blog::{blog_handler, blog_post_handler};
pub use forms::{contact_page_handler, contact_submit_handler, newsletter_handler};
pub use pages::{about_handler, home_handler, method_handler, not_found_handler};
