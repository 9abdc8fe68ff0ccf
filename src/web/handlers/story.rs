//! Story generator page handlers.
//!
//! Every action posts back to the server and ends in a `303` redirect to
//! `/index.html`, which renders whatever the visitor session now holds.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension, Form,
    extract::State,
    http::{
        HeaderValue,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;

use super::view::StoryFormView;
use crate::application::services::{
    GenerateOutcome, INDEX_PAGE, LOGIN_PAGE, LogoutOutcome, SessionView,
};
use crate::domain::{GeneratedStory, StoryForm, StoryPanel};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::middleware::SessionHandle;

/// Template for the story generator page.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
struct IndexTemplate {
    username: String,
    form: StoryFormView,
    story: Option<GeneratedStory>,
    error: Option<String>,
    /// Clipboard text, present only on the render right after "copy".
    copied_text: Option<String>,
}

/// Renders the story page for a signed-in visitor.
///
/// # Endpoint
///
/// `GET /index.html`
///
/// Signed-out visitors, and visitors whose session check fails, are sent to
/// `/login.html`.
pub async fn index_handler(
    State(st): State<AppState>,
    Extension(session): Extension<SessionHandle>,
) -> Response {
    let mut visitor = session.snapshot();
    let view = st.story_service.check_session(&mut visitor.backend).await;

    let username = match view {
        SessionView::SignedIn { username } => username,
        SessionView::SignedOut => {
            session.replace(visitor);
            return Redirect::to(LOGIN_PAGE).into_response();
        }
    };

    let copied = visitor.take_copy_request();
    session.replace(visitor.clone());

    let (story, error) = match visitor.panel {
        StoryPanel::Placeholder => (None, None),
        StoryPanel::Story(story) => (Some(story), None),
        StoryPanel::Error(message) => (None, Some(message)),
    };

    IndexTemplate {
        username,
        form: StoryFormView::from(&visitor.form),
        copied_text: story
            .as_ref()
            .filter(|_| copied)
            .map(GeneratedStory::copy_text),
        story,
        error,
    }
    .into_response()
}

/// Handles the story form.
///
/// # Endpoint
///
/// `POST /generate`
///
/// Waits for the backend; there is no timeout. A `401` from the backend
/// sends the browser to `/login.html`.
pub async fn generate_handler(
    State(st): State<AppState>,
    Extension(session): Extension<SessionHandle>,
    Form(form): Form<StoryForm>,
) -> Response {
    let mut visitor = session.snapshot();
    let outcome = st.story_service.generate(&mut visitor, form).await;
    session.replace(visitor);

    match outcome {
        GenerateOutcome::Updated => Redirect::to(INDEX_PAGE).into_response(),
        GenerateOutcome::SessionExpired => Redirect::to(LOGIN_PAGE).into_response(),
    }
}

/// Clears the form and the displayed story.
///
/// # Endpoint
///
/// `POST /reset`
pub async fn reset_handler(
    State(st): State<AppState>,
    Extension(session): Extension<SessionHandle>,
) -> Redirect {
    let mut visitor = session.snapshot();
    st.story_service.reset(&mut visitor);
    session.replace(visitor);

    Redirect::to(INDEX_PAGE)
}

/// Applies a genre change: the page theme follows the selected genre.
///
/// # Endpoint
///
/// `POST /genre`
///
/// Receives the whole story form so values typed so far are kept.
pub async fn select_genre_handler(
    State(st): State<AppState>,
    Extension(session): Extension<SessionHandle>,
    Form(form): Form<StoryForm>,
) -> Redirect {
    let mut visitor = session.snapshot();
    st.story_service.select_genre(&mut visitor, form);
    session.replace(visitor);

    Redirect::to(INDEX_PAGE)
}

/// Shows the clipboard text with "copied" feedback on the next render.
///
/// # Endpoint
///
/// `POST /copy`
pub async fn copy_handler(
    State(st): State<AppState>,
    Extension(session): Extension<SessionHandle>,
) -> Redirect {
    let mut visitor = session.snapshot();
    if st.story_service.copy(&mut visitor).is_some() {
        session.replace(visitor);
    }

    Redirect::to(INDEX_PAGE)
}

/// Sends the current story as a text file.
///
/// # Endpoint
///
/// `GET /download`
///
/// # Responses
///
/// - **200 OK** `text/plain` attachment named `story-<unix millis>.txt`
/// - **303 See Other** to `/index.html` when no story is displayed
pub async fn download_handler(
    State(st): State<AppState>,
    Extension(session): Extension<SessionHandle>,
) -> Result<Response, AppError> {
    let visitor = session.snapshot();

    let Some(download) = st.story_service.download(&visitor, Utc::now()) else {
        return Ok(Redirect::to(INDEX_PAGE).into_response());
    };

    let disposition =
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", download.filename))?;

    Ok((
        [
            (
                CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            ),
            (CONTENT_DISPOSITION, disposition),
        ],
        download.contents,
    )
        .into_response())
}

/// Logs the visitor out.
///
/// # Endpoint
///
/// `POST /logout`
///
/// On success the visitor session is destroyed along with the story it held.
/// If the backend refuses, the story page is shown again unchanged.
pub async fn logout_handler(
    State(st): State<AppState>,
    Extension(session): Extension<SessionHandle>,
) -> Redirect {
    let mut visitor = session.snapshot();

    match st.story_service.logout(&mut visitor.backend).await {
        LogoutOutcome::Redirect(path) => {
            session.destroy();
            Redirect::to(path)
        }
        LogoutOutcome::Stay => {
            session.replace(visitor);
            Redirect::to(INDEX_PAGE)
        }
    }
}
