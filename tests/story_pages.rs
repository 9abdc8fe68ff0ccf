mod common;

use axum::http::{HeaderValue, StatusCode, header::COOKIE};
use axum_test::TestServer;

async fn generate(server: &TestServer, cookie: &HeaderValue, character: &str, location: &str) {
    let response = server
        .post("/generate")
        .add_header(COOKIE, cookie.clone())
        .form(&[
            ("character_name", character),
            ("theme", "Courage"),
            ("genre", "Sci-Fi"),
            ("location", location),
            ("length", "short"),
        ])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
}

async fn story_page(server: &TestServer, cookie: &HeaderValue) -> String {
    let response = server.get("/index.html").add_header(COOKIE, cookie.clone()).await;
    response.assert_status_ok();
    response.text()
}

#[tokio::test]
async fn test_root_redirects_to_story_page() {
    let backend = common::spawn_fake_backend().await;
    let server = common::create_test_server(common::create_test_state(backend));

    let response = server.get("/").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), "/index.html");
}

#[tokio::test]
async fn test_story_page_requires_login() {
    let backend = common::spawn_fake_backend().await;
    let server = common::create_test_server(common::create_test_state(backend));

    let response = server.get("/index.html").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), "/login.html");
}

#[tokio::test]
async fn test_story_page_initial_state() {
    let backend = common::spawn_fake_backend().await;
    let server = common::create_test_server(common::create_test_state(backend));
    let cookie = common::signed_in_visitor(&server).await;

    let html = story_page(&server, &cookie).await;

    assert!(html.contains(r#"<body class="theme-fantasy">"#));
    assert!(html.contains(r#"<strong id="username-display">alice</strong>"#));
    assert!(html.contains("Your AI-generated story will appear here"));
    assert!(html.contains(r#"<option value="medium" selected>"#));
    assert!(!html.contains(r#"id="story-meta""#));
    assert!(!html.contains(r#"id="action-buttons""#));
}

#[tokio::test]
async fn test_generate_displays_story() {
    let backend = common::spawn_fake_backend().await;
    let server = common::create_test_server(common::create_test_state(backend));
    let cookie = common::signed_in_visitor(&server).await;

    generate(&server, &cookie, "  Luna ", " Mars ").await;
    let html = story_page(&server, &cookie).await;

    assert!(html.contains("<p>Luna woke up in Mars.</p>"));
    assert!(html.contains("<p>The end.</p>"));
    assert!(html.contains(r#"<span id="char-display">Luna</span>"#));
    assert!(html.contains(r#"<span id="genre-display">Sci-Fi</span>"#));
    assert!(html.contains(r#"<body class="theme-sci-fi">"#));
    assert!(html.contains(r#"id="action-buttons""#));
    assert!(html.contains(r#"value="  Luna ""#));
}

#[tokio::test]
async fn test_generate_escapes_story_fields() {
    let backend = common::spawn_fake_backend().await;
    let server = common::create_test_server(common::create_test_state(backend));
    let cookie = common::signed_in_visitor(&server).await;

    generate(&server, &cookie, "<script>x</script>", "Mars").await;
    let html = story_page(&server, &cookie).await;

    assert!(html.contains("&lt;script&gt;"));
    assert!(!html.contains("<script>x"));
}

#[tokio::test]
async fn test_genre_change_updates_theme() {
    let backend = common::spawn_fake_backend().await;
    let server = common::create_test_server(common::create_test_state(backend));
    let cookie = common::signed_in_visitor(&server).await;

    let response = server
        .post("/genre")
        .add_header(COOKIE, cookie.clone())
        .form(&[
            ("character_name", "Luna"),
            ("theme", "Adventure"),
            ("genre", "Horror"),
            ("location", ""),
            ("length", "medium"),
        ])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), "/index.html");

    let html = story_page(&server, &cookie).await;
    assert!(html.contains(r#"<body class="theme-horror">"#));
    assert!(html.contains(r#"<option value="Horror" selected>"#));
    assert!(html.contains(r#"value="Luna""#));
    assert!(html.contains("Your AI-generated story will appear here"));
    assert!(!html.contains("❌ Error:"));
}

#[tokio::test]
async fn test_generate_validation_error() {
    let backend = common::spawn_fake_backend().await;
    let server = common::create_test_server(common::create_test_state(backend));
    let cookie = common::signed_in_visitor(&server).await;

    generate(&server, &cookie, "Luna", "   ").await;
    let html = story_page(&server, &cookie).await;

    assert!(html.contains("❌ Error:</strong> Please enter a location"));
    assert!(!html.contains(r#"id="story-meta""#));
}

#[tokio::test]
async fn test_generate_backend_error() {
    let backend = common::spawn_fake_backend().await;
    let server = common::create_test_server(common::create_test_state(backend));
    let cookie = common::signed_in_visitor(&server).await;

    generate(&server, &cookie, "Glitch", "Mars").await;
    let html = story_page(&server, &cookie).await;

    assert!(html.contains("AI service unavailable"));
    assert!(!html.contains(r#"id="action-buttons""#));
}

#[tokio::test]
async fn test_generate_without_backend_session_goes_to_login() {
    let backend = common::spawn_fake_backend().await;
    let server = common::create_test_server(common::create_test_state(backend));

    let response = server
        .post("/generate")
        .form(&[("character_name", "Luna"), ("location", "Mars")])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), "/login.html");
}

#[tokio::test]
async fn test_copy_feedback_shows_once() {
    let backend = common::spawn_fake_backend().await;
    let server = common::create_test_server(common::create_test_state(backend));
    let cookie = common::signed_in_visitor(&server).await;
    generate(&server, &cookie, "Luna", "Mars").await;

    let response = server.post("/copy").add_header(COOKIE, cookie.clone()).await;
    assert_eq!(common::location(&response), "/index.html");

    let html = story_page(&server, &cookie).await;
    assert!(html.contains("✅ Copied!"));
    assert!(html.contains("Character: Luna\nTheme: Courage\nGenre: Sci-Fi\nLocation: Mars\n\n"));

    let html = story_page(&server, &cookie).await;
    assert!(!html.contains("✅ Copied!"));
    assert!(!html.contains(r#"id="copy-text""#));
}

#[tokio::test]
async fn test_download_story() {
    let backend = common::spawn_fake_backend().await;
    let server = common::create_test_server(common::create_test_state(backend));
    let cookie = common::signed_in_visitor(&server).await;
    generate(&server, &cookie, "Luna", "Mars").await;

    let response = server.get("/download").add_header(COOKIE, cookie).await;

    response.assert_status_ok();
    let disposition = response
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with(r#"attachment; filename="story-"#));
    assert!(disposition.ends_with(r#".txt""#));
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "text/plain; charset=utf-8"
    );
    assert!(
        response
            .text()
            .starts_with("PlotPilot AI - Generated Story\n\nCharacter: Luna\n")
    );
}

#[tokio::test]
async fn test_download_without_story_redirects() {
    let backend = common::spawn_fake_backend().await;
    let server = common::create_test_server(common::create_test_state(backend));
    let cookie = common::signed_in_visitor(&server).await;

    let response = server.get("/download").add_header(COOKIE, cookie).await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), "/index.html");
}

#[tokio::test]
async fn test_reset_restores_defaults() {
    let backend = common::spawn_fake_backend().await;
    let server = common::create_test_server(common::create_test_state(backend));
    let cookie = common::signed_in_visitor(&server).await;
    generate(&server, &cookie, "Luna", "Mars").await;

    let response = server.post("/reset").add_header(COOKIE, cookie.clone()).await;
    assert_eq!(common::location(&response), "/index.html");

    let html = story_page(&server, &cookie).await;
    assert!(html.contains(r#"<body class="theme-fantasy">"#));
    assert!(html.contains("Your AI-generated story will appear here"));
    assert!(html.contains(r#"<option value="Adventure" selected>"#));
    assert!(!html.contains(r#"value="Luna""#));
}

#[tokio::test]
async fn test_logout_clears_visitor() {
    let backend = common::spawn_fake_backend().await;
    let server = common::create_test_server(common::create_test_state(backend));
    let cookie = common::signed_in_visitor(&server).await;
    generate(&server, &cookie, "Luna", "Mars").await;

    let response = server.post("/logout").add_header(COOKIE, cookie.clone()).await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), "/login.html");
    let cleared = response.headers().get("set-cookie").unwrap().to_str().unwrap();
    assert!(cleared.contains("Max-Age=0"));

    let response = server.get("/index.html").add_header(COOKIE, cookie).await;
    assert_eq!(common::location(&response), "/login.html");
}

#[tokio::test]
async fn test_my_stories_lists_entries() {
    let backend = common::spawn_fake_backend().await;
    let server = common::create_test_server(common::create_test_state(backend));
    let cookie = common::signed_in_visitor(&server).await;

    let response = server
        .get("/my-stories.html")
        .add_header(COOKIE, cookie)
        .await;

    response.assert_status_ok();
    let html = response.text();
    let luna = html.find(r#"id="story-2""#).unwrap();
    let rex = html.find(r#"id="story-1""#).unwrap();
    assert!(luna < rex);
    assert!(html.contains("the Glass Forest"));
}

#[tokio::test]
async fn test_my_stories_requires_login() {
    let backend = common::spawn_fake_backend().await;
    let server = common::create_test_server(common::create_test_state(backend));

    let response = server.get("/my-stories.html").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), "/login.html");
}

#[tokio::test]
async fn test_health_reports_session_store() {
    let backend = common::spawn_fake_backend().await;
    let server = common::create_test_server(common::create_test_state(backend));

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["session_store"]["status"], "ok");
    assert_eq!(json["checks"]["session_store"]["message"], "memory");
}
