//! Data shared by every rendered page.

use chrono::{Datelike, Utc};

use crate::web::notice::Notice;

/// Navbar and footer state for `templates/base.html`.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Path of the current page, used for the active nav link and as the
    /// newsletter form's `return_to`.
    pub path: String,
    pub notice: Option<Notice>,
    pub year: i32,
}

impl Layout {
    pub fn new(path: impl Into<String>, notice: Option<Notice>) -> Self {
        Self {
            path: path.into(),
            notice,
            year: Utc::now().year(),
        }
    }

    /// Whether the nav link to `href` belongs to the current page.
    pub fn is_active(&self, href: &str) -> bool {
        if href == "/" {
            self.path == "/"
        } else {
            self.path == href || self.path.starts_with(&format!("{href}/"))
        }
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_link() {
        let layout = Layout::new("/blog/educar-com-presenca", None);
        assert!(layout.is_active("/blog"));
        assert!(!layout.is_active("/"));
        assert!(!layout.is_active("/blo"));

        assert!(Layout::new("/", None).is_active("/"));
    }
}
