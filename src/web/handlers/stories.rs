//! Recent stories page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};

use crate::application::services::{LOGIN_PAGE, RecentStories};
use crate::domain::StorySummary;
use crate::state::AppState;
use crate::web::middleware::SessionHandle;

/// Template for the recent stories page.
///
/// Renders `templates/my_stories.html` with either the list or an error.
#[derive(Template, WebTemplate)]
#[template(path = "my_stories.html")]
struct MyStoriesTemplate {
    stories: Vec<StorySummary>,
    error: Option<String>,
}

/// Lists the signed-in visitor's recent stories, newest first.
///
/// # Endpoint
///
/// `GET /my-stories.html`
pub async fn my_stories_handler(
    State(st): State<AppState>,
    Extension(session): Extension<SessionHandle>,
) -> Response {
    let mut visitor = session.snapshot();
    let result = st.story_service.recent_stories(&mut visitor.backend).await;
    session.replace(visitor);

    match result {
        RecentStories::Listed(stories) => MyStoriesTemplate {
            stories,
            error: None,
        }
        .into_response(),
        RecentStories::Failed(message) => MyStoriesTemplate {
            stories: Vec::new(),
            error: Some(message),
        }
        .into_response(),
        RecentStories::SessionExpired => Redirect::to(LOGIN_PAGE).into_response(),
    }
}
