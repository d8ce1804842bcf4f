//! URL slug derivation for blog post titles.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Derives a URL-safe slug from a post title.
///
/// # Rules
///
/// 1. Lowercase the title
/// 2. Decompose to NFD and drop combining marks (`Olá` → `ola`)
/// 3. Collapse every maximal run of characters outside `[a-z0-9]` into one hyphen
/// 4. Strip hyphens left at either end
///
/// The result only contains `[a-z0-9-]`, never starts or ends with a hyphen and may be
/// empty when the title has no letters or digits at all. Uniqueness is not checked
/// here; the `blog_posts_slug_key` constraint rejects collisions at insert time.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(slugify("Educar com Presença!"), "educar-com-presenca");
/// assert_eq!(slugify("  Método Raízes® 2025 "), "metodo-raizes-2025");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.to_lowercase().nfd().filter(|c| !is_combining_mark(*c)) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}
