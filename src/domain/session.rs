//! Per-visitor page state kept between requests.

use serde::{Deserialize, Serialize};

use crate::domain::cookies::BackendCookies;
use crate::domain::forms::StoryForm;
use crate::domain::story::{GeneratedStory, StoryPanel};

/// Everything a visitor's browser tab would otherwise hold in its document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisitorSession {
    /// Cookies the backend issued to this visitor.
    pub backend: BackendCookies,
    /// Last values of the story generator form.
    pub form: StoryForm,
    /// What the story content area shows.
    pub panel: StoryPanel,
    /// One-shot flag: the next story page render shows the copy feedback.
    pub copy_requested: bool,
}

impl VisitorSession {
    /// Displays `story` and makes it the current story.
    pub fn show_story(&mut self, story: GeneratedStory) {
        self.panel = StoryPanel::Story(story);
    }

    /// Replaces the content area with an error; metadata and actions are hidden.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.panel = StoryPanel::Error(message.into());
    }

    /// Restores the form defaults and the placeholder, dropping the current story.
    pub fn reset(&mut self) {
        self.form = StoryForm::default();
        self.panel = StoryPanel::Placeholder;
        self.copy_requested = false;
    }

    /// The story currently on display.
    pub fn current_story(&self) -> Option<&GeneratedStory> {
        self.panel.story()
    }

    /// True while the session holds nothing worth storing.
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }

    /// Returns and clears the copy feedback flag.
    pub fn take_copy_request(&mut self) -> bool {
        std::mem::take(&mut self.copy_requested)
    }
}
