//! Generated story and the content area that displays it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Heading written at the top of downloaded stories.
const DOWNLOAD_HEADING: &str = "PlotPilot AI - Generated Story";

/// A story returned by the generator together with the parameters it echoed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedStory {
    pub story: String,
    pub character: String,
    pub theme: String,
    pub genre: String,
    pub location: String,
}

impl GeneratedStory {
    /// Splits the story on blank lines into trimmed paragraphs.
    ///
    /// Empty paragraphs are kept so the layout mirrors the generated text.
    pub fn paragraphs(&self) -> Vec<&str> {
        self.story.split("\n\n").map(str::trim).collect()
    }

    /// Text placed on the clipboard by the copy action.
    pub fn copy_text(&self) -> String {
        format!(
            "Character: {}\nTheme: {}\nGenre: {}\nLocation: {}\n\n{}",
            self.character, self.theme, self.genre, self.location, self.story
        )
    }

    /// Contents of the downloaded `.txt` file.
    pub fn download_text(&self) -> String {
        format!("{DOWNLOAD_HEADING}\n\n{}", self.copy_text())
    }
}

/// File name for a story downloaded at `now`.
pub fn download_filename(now: DateTime<Utc>) -> String {
    format!("story-{}.txt", now.timestamp_millis())
}

/// What the story content area currently shows.
///
/// Metadata and action buttons are only visible for [`StoryPanel::Story`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum StoryPanel {
    #[default]
    Placeholder,
    Story(GeneratedStory),
    Error(String),
}

impl StoryPanel {
    /// The current story, if one is displayed.
    pub fn story(&self) -> Option<&GeneratedStory> {
        match self {
            StoryPanel::Story(story) => Some(story),
            _ => None,
        }
    }
}

/// One entry of the signed-in user's recent stories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorySummary {
    pub id: i64,
    #[serde(default)]
    pub character_name: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}
