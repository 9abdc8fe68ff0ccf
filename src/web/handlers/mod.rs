//! Page handlers.

mod auth;
mod health;
mod stories;
mod story;
mod view;

use axum::response::Redirect;

use crate::application::services::INDEX_PAGE;

pub use auth::{login_page_handler, login_submit_handler, signup_submit_handler};
pub use health::health_handler;
pub use stories::my_stories_handler;
pub use story::{
    copy_handler, download_handler, generate_handler, index_handler, logout_handler, reset_handler,
    select_genre_handler,
};

/// `GET /` sends the browser to the story page.
pub async fn root_handler() -> Redirect {
    Redirect::to(INDEX_PAGE)
}
