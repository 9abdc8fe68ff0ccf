//! Login / signup page handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension, Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::application::services::{AuthOutcome, AuthPage};
use crate::domain::{AuthPanel, LoginForm, SignupForm};
use crate::state::AppState;
use crate::web::middleware::SessionHandle;

/// Template for the authentication page.
///
/// Renders `templates/login.html` with both panels; only the active one is
/// visible.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
struct LoginTemplate {
    signup_active: bool,
    login_error: Option<String>,
    signup_error: Option<String>,
    login_username: String,
    signup_username: String,
    signup_email: String,
}

impl From<AuthPage> for LoginTemplate {
    fn from(page: AuthPage) -> Self {
        Self {
            signup_active: page.active == AuthPanel::Signup,
            login_error: page.login_error,
            signup_error: page.signup_error,
            login_username: page.login_username,
            signup_username: page.signup_username,
            signup_email: page.signup_email,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PanelQuery {
    #[serde(default)]
    pub panel: AuthPanel,
}

fn respond(outcome: AuthOutcome) -> Response {
    match outcome {
        AuthOutcome::Redirect(path) => Redirect::to(path).into_response(),
        AuthOutcome::Render(page) => LoginTemplate::from(page).into_response(),
    }
}

/// Renders the login page.
///
/// # Endpoint
///
/// `GET /login.html`, `GET /login.html?panel=signup`
///
/// Visitors whose backend session is still valid are sent to the story page.
pub async fn login_page_handler(
    State(st): State<AppState>,
    Extension(session): Extension<SessionHandle>,
    Query(query): Query<PanelQuery>,
) -> Response {
    let mut visitor = session.snapshot();
    let outcome = st.auth_service.open(&mut visitor.backend, query.panel).await;
    session.replace(visitor);

    respond(outcome)
}

/// Handles the login form.
///
/// # Endpoint
///
/// `POST /login`
///
/// # Responses
///
/// - **303 See Other** to `/index.html` on success
/// - **200 OK** with the login panel and an error message otherwise
pub async fn login_submit_handler(
    State(st): State<AppState>,
    Extension(session): Extension<SessionHandle>,
    Form(form): Form<LoginForm>,
) -> Response {
    let mut visitor = session.snapshot();
    let outcome = st.auth_service.login(&mut visitor.backend, &form).await;
    session.replace(visitor);

    respond(outcome)
}

/// Handles the signup form.
///
/// # Endpoint
///
/// `POST /signup`
pub async fn signup_submit_handler(
    State(st): State<AppState>,
    Extension(session): Extension<SessionHandle>,
    Form(form): Form<SignupForm>,
) -> Response {
    let mut visitor = session.snapshot();
    let outcome = st.auth_service.signup(&mut visitor.backend, &form).await;
    session.replace(visitor);

    respond(outcome)
}
