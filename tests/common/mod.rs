#![allow(dead_code)]

use axum::{
    Json, Router,
    http::{HeaderMap, HeaderValue, StatusCode, header::COOKIE, header::SET_COOKIE},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_test::{TestResponse, TestServer};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use plotpilot_web::infrastructure::backend::HttpBackend;
use plotpilot_web::infrastructure::session::{MemorySessionStore, SessionCookie};
use plotpilot_web::state::AppState;
use plotpilot_web::web;
use plotpilot_web::web::handlers::{health_handler, root_handler};
use plotpilot_web::web::middleware::rate_limit::RateLimit;

pub const USERNAME: &str = "alice";
pub const PASSWORD: &str = "secret123";
pub const BACKEND_SESSION: &str = "session=abc123";

fn signed_in(headers: &HeaderMap) -> bool {
    headers
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split("; ").any(|pair| pair == BACKEND_SESSION))
        .unwrap_or(false)
}

fn with_session(body: Value) -> Response {
    (
        [(
            SET_COOKIE,
            HeaderValue::from_static("session=abc123; Path=/; HttpOnly"),
        )],
        Json(body),
    )
        .into_response()
}

fn not_logged_in() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"success": false, "error": "Please log in to continue"})),
    )
        .into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["username"] == USERNAME && body["password"] == PASSWORD {
        with_session(json!({
            "success": true,
            "message": "Login successful",
            "username": USERNAME,
        }))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "error": "Invalid username or password"})),
        )
            .into_response()
    }
}

async fn signup(Json(body): Json<Value>) -> Response {
    if body["username"] == "taken" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "error": "Username or email already exists"})),
        )
            .into_response();
    }

    with_session(json!({
        "success": true,
        "message": "Account created successfully",
        "username": body["username"],
    }))
}

async fn check_session(headers: HeaderMap) -> Json<Value> {
    if signed_in(&headers) {
        Json(json!({"success": true, "logged_in": true, "username": USERNAME}))
    } else {
        Json(json!({"success": true, "logged_in": false}))
    }
}

async fn logout() -> Response {
    (
        [(
            SET_COOKIE,
            HeaderValue::from_static("session=; Path=/; Max-Age=0"),
        )],
        Json(json!({"success": true, "message": "Logged out successfully"})),
    )
        .into_response()
}

async fn generate(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !signed_in(&headers) {
        return not_logged_in();
    }

    if body["characterName"] == "Glitch" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"success": false, "error": "AI service unavailable"})),
        )
            .into_response();
    }

    let character = body["characterName"].as_str().unwrap_or_default();
    let location = body["location"].as_str().unwrap_or_default();

    Json(json!({
        "success": true,
        "story": format!("{character} woke up in {location}.\n\n  The end.  "),
        "character": character,
        "theme": body["theme"],
        "genre": body["genre"],
        "location": location,
    }))
    .into_response()
}

async fn my_stories(headers: HeaderMap) -> Response {
    if !signed_in(&headers) {
        return not_logged_in();
    }

    Json(json!({
        "success": true,
        "stories": [
            {
                "id": 2,
                "character_name": "Luna",
                "theme": "Courage",
                "genre": "Fantasy",
                "location": "the Glass Forest",
                "created_at": "2026-10-18 09:30:00",
            },
            {
                "id": 1,
                "character_name": "Rex",
                "theme": "Survival",
                "genre": "Sci-Fi",
                "location": "Mars",
                "created_at": "2026-10-17 21:05:00",
            }
        ],
    }))
    .into_response()
}

/// Starts an in-process story backend on an ephemeral port.
///
/// `alice` / `secret123` is the only valid account; a signed-in request
/// carries the `session=abc123` cookie.
pub async fn spawn_fake_backend() -> SocketAddr {
    let app = Router::new()
        .route("/api/login", post(login))
        .route("/api/signup", post(signup))
        .route("/api/check-session", get(check_session))
        .route("/api/logout", post(logout))
        .route("/api/generate", post(generate))
        .route("/api/my-stories", get(my_stories));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

/// An address nothing listens on.
pub async fn unreachable_backend() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

pub fn create_test_state(backend: SocketAddr) -> AppState {
    create_test_state_with_store(backend, Arc::new(MemorySessionStore::new(3600)))
}

pub fn create_test_state_with_store(
    backend: SocketAddr,
    sessions: Arc<MemorySessionStore>,
) -> AppState {
    let backend = HttpBackend::new(&format!("http://{backend}")).unwrap();

    AppState::new(
        Arc::new(backend),
        sessions,
        SessionCookie::new("test-secret".to_string(), 3600, false),
    )
}

pub fn create_test_server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .merge(web::routes::page_routes(state.clone(), RateLimit::Disabled))
        .with_state(state);

    TestServer::new(app).unwrap()
}

/// The `plotpilot_sid=...` pair from a response, ready for a `Cookie` header.
pub fn visitor_cookie(response: &TestResponse) -> HeaderValue {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("plotpilot_sid="))
        .and_then(|v| v.split(';').next())
        .map(|pair| HeaderValue::from_str(pair).unwrap())
        .expect("response should set the visitor cookie")
}

pub fn location(response: &TestResponse) -> String {
    response
        .headers()
        .get("location")
        .expect("redirect should have a Location header")
        .to_str()
        .unwrap()
        .to_string()
}

/// Signs in, returning the visitor cookie issued with the login redirect.
pub async fn signed_in_visitor(server: &TestServer) -> HeaderValue {
    let response = server
        .post("/login")
        .form(&[("username", USERNAME), ("password", PASSWORD)])
        .await;
    assert_eq!(location(&response), "/index.html");

    visitor_cookie(&response)
}
