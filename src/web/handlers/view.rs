//! Small view models shared by page templates.

use crate::domain::{Genre, Length, StoryForm, Theme};

/// One `<option>` of a select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// The story form as the template needs it.
#[derive(Debug, Clone)]
pub struct StoryFormView {
    pub character_name: String,
    pub location: String,
    pub themes: Vec<SelectOption>,
    pub genres: Vec<SelectOption>,
    pub lengths: Vec<SelectOption>,
    pub theme_class: String,
}

impl From<&StoryForm> for StoryFormView {
    fn from(form: &StoryForm) -> Self {
        Self {
            character_name: form.character_name.clone(),
            location: form.location.clone(),
            themes: Theme::ALL
                .iter()
                .map(|&theme| SelectOption {
                    value: theme.as_str(),
                    label: theme.as_str(),
                    selected: theme == form.theme,
                })
                .collect(),
            genres: Genre::ALL
                .iter()
                .map(|&genre| SelectOption {
                    value: genre.as_str(),
                    label: genre.as_str(),
                    selected: genre == form.genre,
                })
                .collect(),
            lengths: Length::ALL
                .iter()
                .map(|&length| SelectOption {
                    value: length.as_str(),
                    label: length.label(),
                    selected: length == form.length,
                })
                .collect(),
            theme_class: form.genre.theme_class(),
        }
    }
}
