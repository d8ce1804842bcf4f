//! Redirect targets taken from form input.

use url::Url;

/// Origin used to resolve a candidate path; only its host matters.
const LOCAL_ORIGIN: &str = "http://site.local";

/// Returns `candidate` if it is a path on this site, otherwise `/`.
///
/// Used for the `return_to` field of forms rendered on several pages, so a posted
/// form can never send the browser to another origin. Browsers strip tabs and line
/// breaks from a `Location` before resolving it, so any control or whitespace
/// character rejects the path outright.
pub fn safe_return_path(candidate: Option<&str>) -> String {
    match candidate {
        Some(path)
            if path.starts_with('/')
                && !path
                    .chars()
                    .any(|c| c.is_control() || c.is_whitespace() || c == '\\')
                && stays_local(path) =>
        {
            path.to_string()
        }
        _ => "/".to_string(),
    }
}

fn stays_local(path: &str) -> bool {
    let Ok(base) = Url::parse(LOCAL_ORIGIN) else {
        return false;
    };
    base.join(path)
        .is_ok_and(|resolved| resolved.origin() == base.origin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_return_path() {
        assert_eq!(safe_return_path(Some("/blog/ola")), "/blog/ola");
        assert_eq!(safe_return_path(Some("/contacto?x=1#form")), "/contacto?x=1#form");
        assert_eq!(safe_return_path(Some("//evil.example")), "/");
        assert_eq!(safe_return_path(Some("https://evil.example")), "/");
        assert_eq!(safe_return_path(Some("/\\evil")), "/");
        assert_eq!(safe_return_path(Some("blog")), "/");
        assert_eq!(safe_return_path(None), "/");
    }

    #[test]
    fn test_safe_return_path_rejects_stripped_characters() {
        assert_eq!(safe_return_path(Some("/\t/evil.example")), "/");
        assert_eq!(safe_return_path(Some("/\n/evil.example")), "/");
        assert_eq!(safe_return_path(Some("/\r/evil.example")), "/");
        assert_eq!(safe_return_path(Some("/ /evil.example")), "/");
        assert_eq!(safe_return_path(Some("/blog\u{0}")), "/");
    }
}
