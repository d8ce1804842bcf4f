mod common;

use axum::http::StatusCode;
use common::FakeBackend;

// ─── Static pages ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_static_pages_render() {
    let backend = FakeBackend::new();
    let server = backend.server();

    for (path, heading) in [
        ("/", "Método Raízes®"),
        ("/sobre", "Sobre Paula Lopes"),
        ("/metodo", "O Método Raízes®"),
        ("/contacto", "Envie-nos uma mensagem"),
    ] {
        let response = server.get(path).await;
        response.assert_status_ok();
        assert!(
            response.text().contains(heading),
            "{path} should contain {heading}"
        );
    }
}

#[tokio::test]
async fn test_pages_carry_newsletter_form_returning_to_same_page() {
    let backend = FakeBackend::new();
    let server = backend.server();

    let body = server.get("/sobre").await.text();

    assert!(body.contains(r#"action="/newsletter""#));
    assert!(body.contains(r#"name="return_to" value="/sobre""#));
}

#[tokio::test]
async fn test_unknown_path_renders_not_found_page() {
    let backend = FakeBackend::new();
    let server = backend.server();

    let response = server.get("/nao-existe").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert!(response.text().contains("Voltar ao Início"));
}

// ─── Blog ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_blog_lists_only_published_newest_first() {
    let backend = FakeBackend::new();
    backend.add_post("Primeiro artigo", "primeiro-artigo", true, 10);
    backend.add_post("Rascunho secreto", "rascunho-secreto", false, 1);
    backend.add_post("Artigo recente", "artigo-recente", true, 2);
    let server = backend.server();

    let response = server.get("/blog").await;
    response.assert_status_ok();
    let body = response.text();

    assert!(!body.contains("Rascunho secreto"));
    let recent = body.find("Artigo recente").unwrap();
    let first = body.find("Primeiro artigo").unwrap();
    assert!(recent < first, "newest post should come first");
    assert!(body.contains(r#"href="/blog/artigo-recente""#));
}

#[tokio::test]
async fn test_blog_empty_state() {
    let backend = FakeBackend::new();
    let server = backend.server();

    let response = server.get("/blog").await;

    response.assert_status_ok();
    assert!(response.text().contains("Ainda não há artigos publicados."));
}

#[tokio::test]
async fn test_blog_backend_failure_shows_generic_notice() {
    let backend = FakeBackend::new();
    backend.set_offline(true);
    let server = backend.server();

    let response = server.get("/blog").await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body = response.text();
    assert!(body.contains("Ocorreu um erro. Por favor, tente novamente."));
    assert!(!body.contains("connection refused"));
}

#[tokio::test]
async fn test_blog_post_renders_html_content() {
    let backend = FakeBackend::new();
    backend.add_post("Educar com presença", "educar-com-presenca", true, 1);
    let server = backend.server();

    let response = server.get("/blog/educar-com-presenca").await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("<h1>Educar com presença</h1>"));
    assert!(body.contains("<p>Educar com presença</p>"));
}

#[tokio::test]
async fn test_unpublished_post_is_not_found() {
    let backend = FakeBackend::new();
    backend.add_post("Rascunho", "rascunho", false, 1);
    let server = backend.server();

    for path in ["/blog/rascunho", "/blog/nunca-existiu"] {
        let response = server.get(path).await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body = response.text();
        assert!(body.contains("Artigo não encontrado"));
        assert!(body.contains("Voltar ao Blog"));
    }
}

// ─── Health ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_health_reports_backend_state() {
    let backend = FakeBackend::new();
    let server = backend.server();

    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["backend"]["status"], "ok");

    backend.set_offline(true);

    let response = server.get("/health").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["checks"]["backend"]["message"], "Backend unreachable");
}
