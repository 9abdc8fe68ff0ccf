//! Controller for the login / signup page.

use std::sync::Arc;

use tracing::{error, info};

use super::{INDEX_PAGE, NETWORK_ERROR};
use crate::domain::backend::{AuthReply, BackendResult, StoryBackend};
use crate::domain::{AuthPanel, BackendCookies, LoginForm, SignupForm};

const LOGIN_FAILED: &str = "Login failed. Please try again.";
const SIGNUP_FAILED: &str = "Signup failed. Please try again.";

/// State of the authentication page.
///
/// Only the active panel is visible. Passwords are never carried back into
/// the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthPage {
    pub active: AuthPanel,
    pub login_error: Option<String>,
    pub signup_error: Option<String>,
    pub login_username: String,
    pub signup_username: String,
    pub signup_email: String,
}

impl AuthPage {
    /// A page showing `panel` with both error messages cleared.
    pub fn new(panel: AuthPanel) -> Self {
        Self {
            active: panel,
            ..Default::default()
        }
    }

    fn login_failed(form: &LoginForm, message: impl Into<String>) -> Self {
        Self {
            active: AuthPanel::Login,
            login_error: Some(message.into()),
            login_username: form.username.clone(),
            ..Default::default()
        }
    }

    fn signup_failed(form: &SignupForm, message: impl Into<String>) -> Self {
        Self {
            active: AuthPanel::Signup,
            signup_error: Some(message.into()),
            signup_username: form.username.clone(),
            signup_email: form.email.clone(),
            ..Default::default()
        }
    }
}

/// Result of an authentication page action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Navigate the browser to the given path.
    Redirect(&'static str),
    /// Render the authentication page in this state.
    Render(AuthPage),
}

/// Drives the login / signup page.
///
/// Every backend call takes the visitor's cookie jar by `&mut` and replaces
/// it with the jar from the reply, so a successful login leaves the backend
/// session cookie in place for the story page.
pub struct AuthService {
    backend: Arc<dyn StoryBackend>,
}

impl AuthService {
    pub fn new(backend: Arc<dyn StoryBackend>) -> Self {
        Self { backend }
    }

    /// Shows the login panel with errors cleared.
    pub fn show_login(&self) -> AuthPage {
        AuthPage::new(AuthPanel::Login)
    }

    /// Shows the signup panel with errors cleared.
    pub fn show_signup(&self) -> AuthPage {
        AuthPage::new(AuthPanel::Signup)
    }

    /// Asks the backend whether the visitor is already signed in.
    ///
    /// Failures are logged and treated as "not signed in".
    pub async fn check_session(&self, cookies: &mut BackendCookies) -> bool {
        match self.backend.check_session(cookies).await {
            Ok(reply) => {
                *cookies = reply.cookies;
                reply.body.logged_in
            }
            Err(e) => {
                error!("Session check error: {}", e);
                false
            }
        }
    }

    /// Page load: signed-in visitors go straight to the story page.
    pub async fn open(&self, cookies: &mut BackendCookies, panel: AuthPanel) -> AuthOutcome {
        if self.check_session(cookies).await {
            return AuthOutcome::Redirect(INDEX_PAGE);
        }

        AuthOutcome::Render(match panel {
            AuthPanel::Login => self.show_login(),
            AuthPanel::Signup => self.show_signup(),
        })
    }

    /// Handles a login form submission.
    pub async fn login(&self, cookies: &mut BackendCookies, form: &LoginForm) -> AuthOutcome {
        let request = match form.validate() {
            Ok(request) => request,
            Err(e) => return AuthOutcome::Render(AuthPage::login_failed(form, e.to_string())),
        };

        let result = self.backend.login(cookies, &request).await;

        match settle(cookies, result, "Login", LOGIN_FAILED) {
            Ok(username) => {
                info!(username = %username, "Visitor logged in");
                AuthOutcome::Redirect(INDEX_PAGE)
            }
            Err(message) => AuthOutcome::Render(AuthPage::login_failed(form, message)),
        }
    }

    /// Handles a signup form submission.
    pub async fn signup(&self, cookies: &mut BackendCookies, form: &SignupForm) -> AuthOutcome {
        let request = match form.validate() {
            Ok(request) => request,
            Err(e) => return AuthOutcome::Render(AuthPage::signup_failed(form, e.to_string())),
        };

        let result = self.backend.signup(cookies, &request).await;

        match settle(cookies, result, "Signup", SIGNUP_FAILED) {
            Ok(username) => {
                info!(username = %username, "Visitor signed up");
                AuthOutcome::Redirect(INDEX_PAGE)
            }
            Err(message) => AuthOutcome::Render(AuthPage::signup_failed(form, message)),
        }
    }
}

/// Applies a login/signup reply to the jar.
///
/// Returns the signed-in username, or the message to show.
fn settle(
    cookies: &mut BackendCookies,
    result: BackendResult<AuthReply>,
    action: &str,
    fallback: &str,
) -> Result<String, String> {
    match result {
        Ok(reply) => {
            *cookies = reply.cookies;
            if reply.body.success {
                Ok(reply.body.username.unwrap_or_default())
            } else {
                Err(reply.body.error.unwrap_or_else(|| fallback.to_string()))
            }
        }
        Err(e) => {
            error!("{} error: {}", action, e);
            Err(NETWORK_ERROR.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::backend::{BackendError, BackendReply, SessionReply};
    use crate::domain::MockStoryBackend;

    fn reply<T>(status: u16, body: T, cookies: BackendCookies) -> BackendReply<T> {
        BackendReply {
            status,
            body,
            cookies,
        }
    }

    fn session_cookie(value: &str) -> BackendCookies {
        let mut jar = BackendCookies::new();
        jar.insert("session", value);
        jar
    }

    fn login_form(username: &str, password: &str) -> LoginForm {
        LoginForm {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    fn signup_form(username: &str, email: &str, password: &str, confirm: &str) -> SignupForm {
        SignupForm {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_toggle_panels_clears_errors() {
        let service = AuthService::new(Arc::new(MockStoryBackend::new()));

        let signup = service.show_signup();
        assert_eq!(signup.active, AuthPanel::Signup);
        assert!(signup.login_error.is_none() && signup.signup_error.is_none());

        let login = service.show_login();
        assert_eq!(login.active, AuthPanel::Login);
        assert!(login.login_error.is_none() && login.signup_error.is_none());
    }

    #[tokio::test]
    async fn test_login_validation_skips_backend() {
        // No expectations: any backend call would panic
        let service = AuthService::new(Arc::new(MockStoryBackend::new()));
        let mut cookies = BackendCookies::new();

        let outcome = service.login(&mut cookies, &login_form("alice", "")).await;

        let AuthOutcome::Render(page) = outcome else {
            panic!("expected page render");
        };
        assert_eq!(page.active, AuthPanel::Login);
        assert_eq!(page.login_error.as_deref(), Some("Please fill in all fields"));
        assert_eq!(page.login_username, "alice");
    }

    #[tokio::test]
    async fn test_login_success_redirects_and_keeps_cookie() {
        let mut mock = MockStoryBackend::new();
        mock.expect_login()
            .withf(|_, request| request.username == "alice" && request.password == "hunter22")
            .times(1)
            .returning(|_, _| {
                Ok(reply(
                    200,
                    AuthReply {
                        success: true,
                        username: Some("alice".to_string()),
                        ..Default::default()
                    },
                    session_cookie("signed-in"),
                ))
            });

        let service = AuthService::new(Arc::new(mock));
        let mut cookies = BackendCookies::new();

        let outcome = service
            .login(&mut cookies, &login_form("  alice  ", "hunter22"))
            .await;

        assert_eq!(outcome, AuthOutcome::Redirect(INDEX_PAGE));
        assert_eq!(cookies.get("session"), Some("signed-in"));
    }

    #[tokio::test]
    async fn test_login_rejection_shows_backend_error() {
        let mut mock = MockStoryBackend::new();
        mock.expect_login().times(1).returning(|cookies, _| {
            Ok(reply(
                401,
                AuthReply {
                    success: false,
                    error: Some("Invalid username or password".to_string()),
                    ..Default::default()
                },
                cookies.clone(),
            ))
        });

        let service = AuthService::new(Arc::new(mock));
        let mut cookies = BackendCookies::new();

        let outcome = service.login(&mut cookies, &login_form("alice", "wrong!")).await;

        let AuthOutcome::Render(page) = outcome else {
            panic!("expected page render");
        };
        assert_eq!(
            page.login_error.as_deref(),
            Some("Invalid username or password")
        );
    }

    #[tokio::test]
    async fn test_login_rejection_without_message_uses_fallback() {
        let mut mock = MockStoryBackend::new();
        mock.expect_login()
            .returning(|cookies, _| Ok(reply(500, AuthReply::default(), cookies.clone())));

        let service = AuthService::new(Arc::new(mock));

        let outcome = service
            .login(&mut BackendCookies::new(), &login_form("alice", "pw"))
            .await;

        let AuthOutcome::Render(page) = outcome else {
            panic!("expected page render");
        };
        assert_eq!(page.login_error.as_deref(), Some(LOGIN_FAILED));
    }

    #[tokio::test]
    async fn test_login_network_failure() {
        let mut mock = MockStoryBackend::new();
        mock.expect_login()
            .returning(|_, _| Err(BackendError::Network("connection refused".to_string())));

        let service = AuthService::new(Arc::new(mock));

        let outcome = service
            .login(&mut BackendCookies::new(), &login_form("alice", "pw"))
            .await;

        let AuthOutcome::Render(page) = outcome else {
            panic!("expected page render");
        };
        assert_eq!(page.login_error.as_deref(), Some(NETWORK_ERROR));
    }

    #[tokio::test]
    async fn test_signup_validation_message_on_signup_panel() {
        let service = AuthService::new(Arc::new(MockStoryBackend::new()));

        let outcome = service
            .signup(
                &mut BackendCookies::new(),
                &signup_form("writer", "w@example.com", "secret1", "secret2"),
            )
            .await;

        let AuthOutcome::Render(page) = outcome else {
            panic!("expected page render");
        };
        assert_eq!(page.active, AuthPanel::Signup);
        assert_eq!(page.signup_error.as_deref(), Some("Passwords do not match"));
        assert!(page.login_error.is_none());
        assert_eq!(page.signup_email, "w@example.com");
    }

    #[tokio::test]
    async fn test_signup_success_redirects() {
        let mut mock = MockStoryBackend::new();
        mock.expect_signup()
            .withf(|_, request| request.email == "w@example.com")
            .times(1)
            .returning(|_, _| {
                Ok(reply(
                    200,
                    AuthReply {
                        success: true,
                        ..Default::default()
                    },
                    session_cookie("new-user"),
                ))
            });

        let service = AuthService::new(Arc::new(mock));
        let mut cookies = BackendCookies::new();

        let outcome = service
            .signup(
                &mut cookies,
                &signup_form("writer", "w@example.com", "secret1", "secret1"),
            )
            .await;

        assert_eq!(outcome, AuthOutcome::Redirect(INDEX_PAGE));
        assert_eq!(cookies.get("session"), Some("new-user"));
    }

    #[tokio::test]
    async fn test_open_redirects_signed_in_visitor() {
        let mut mock = MockStoryBackend::new();
        mock.expect_check_session().times(1).returning(|cookies| {
            Ok(reply(
                200,
                SessionReply {
                    success: true,
                    logged_in: true,
                    username: Some("alice".to_string()),
                },
                cookies.clone(),
            ))
        });

        let service = AuthService::new(Arc::new(mock));

        let outcome = service
            .open(&mut session_cookie("x"), AuthPanel::Login)
            .await;

        assert_eq!(outcome, AuthOutcome::Redirect(INDEX_PAGE));
    }

    #[tokio::test]
    async fn test_open_shows_requested_panel_when_check_fails() {
        let mut mock = MockStoryBackend::new();
        mock.expect_check_session()
            .returning(|_| Err(BackendError::Network("down".to_string())));

        let service = AuthService::new(Arc::new(mock));

        let outcome = service
            .open(&mut BackendCookies::new(), AuthPanel::Signup)
            .await;

        assert_eq!(
            outcome,
            AuthOutcome::Render(AuthPage::new(AuthPanel::Signup))
        );
    }
}
