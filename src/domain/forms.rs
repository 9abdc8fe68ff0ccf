//! Form payloads posted by the login, signup and story pages.
//!
//! Forms are deserialized leniently (missing fields become empty strings or
//! defaults) so that validation, not the extractor, decides what the user
//! sees.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::backend::{GenerateRequest, LoginRequest, SignupRequest};
use crate::domain::validation::{
    MIN_PASSWORD_CHARS, MIN_USERNAME_CHARS, ValidationError, shorter_than,
};

/// Which panel of the authentication page is active.
///
/// Exactly one panel is visible at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthPanel {
    #[default]
    Login,
    Signup,
}

/// Login form as posted by the browser.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    /// Validates the form and builds the backend request.
    ///
    /// The username is trimmed, the password is sent as typed.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingFields`] when either field is empty.
    pub fn validate(&self) -> Result<LoginRequest, ValidationError> {
        let username = self.username.trim();

        if username.is_empty() || self.password.is_empty() {
            return Err(ValidationError::MissingFields);
        }

        Ok(LoginRequest {
            username: username.to_string(),
            password: self.password.clone(),
        })
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Signup form as posted by the browser.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    /// Validates the form and builds the backend request.
    ///
    /// # Errors
    ///
    /// Checks run in this order, first failure wins:
    ///
    /// 1. [`ValidationError::MissingFields`]
    /// 2. [`ValidationError::UsernameTooShort`]
    /// 3. [`ValidationError::InvalidEmail`]
    /// 4. [`ValidationError::PasswordTooShort`]
    /// 5. [`ValidationError::PasswordMismatch`]
    pub fn validate(&self) -> Result<SignupRequest, ValidationError> {
        let username = self.username.trim();
        let email = self.email.trim();

        if username.is_empty()
            || email.is_empty()
            || self.password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err(ValidationError::MissingFields);
        }

        if shorter_than(username, MIN_USERNAME_CHARS) {
            return Err(ValidationError::UsernameTooShort);
        }

        if !email.contains('@') {
            return Err(ValidationError::InvalidEmail);
        }

        if shorter_than(&self.password, MIN_PASSWORD_CHARS) {
            return Err(ValidationError::PasswordTooShort);
        }

        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }

        Ok(SignupRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

impl fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Story theme offered by the generator form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Adventure,
    Friendship,
    Love,
    Courage,
    Betrayal,
    Redemption,
    Survival,
    Discovery,
}

impl Theme {
    pub const ALL: [Theme; 8] = [
        Theme::Adventure,
        Theme::Friendship,
        Theme::Love,
        Theme::Courage,
        Theme::Betrayal,
        Theme::Redemption,
        Theme::Survival,
        Theme::Discovery,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Adventure => "Adventure",
            Theme::Friendship => "Friendship",
            Theme::Love => "Love",
            Theme::Courage => "Courage",
            Theme::Betrayal => "Betrayal",
            Theme::Redemption => "Redemption",
            Theme::Survival => "Survival",
            Theme::Discovery => "Discovery",
        }
    }
}

/// Story genre offered by the generator form.
///
/// The genre also drives the page's colour theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Genre {
    #[default]
    Fantasy,
    #[serde(rename = "Sci-Fi")]
    SciFi,
    Mystery,
    Romance,
    Horror,
    Comedy,
    Thriller,
    Historical,
}

impl Genre {
    pub const ALL: [Genre; 8] = [
        Genre::Fantasy,
        Genre::SciFi,
        Genre::Mystery,
        Genre::Romance,
        Genre::Horror,
        Genre::Comedy,
        Genre::Thriller,
        Genre::Historical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Genre::Fantasy => "Fantasy",
            Genre::SciFi => "Sci-Fi",
            Genre::Mystery => "Mystery",
            Genre::Romance => "Romance",
            Genre::Horror => "Horror",
            Genre::Comedy => "Comedy",
            Genre::Thriller => "Thriller",
            Genre::Historical => "Historical",
        }
    }

    /// CSS class applied to the page body, e.g. `theme-sci-fi`.
    pub fn theme_class(self) -> String {
        format!("theme-{}", self.as_str().to_lowercase())
    }
}

/// Requested story length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Length {
    Short,
    #[default]
    Medium,
    Long,
}

impl Length {
    pub const ALL: [Length; 3] = [Length::Short, Length::Medium, Length::Long];

    pub fn as_str(self) -> &'static str {
        match self {
            Length::Short => "short",
            Length::Medium => "medium",
            Length::Long => "long",
        }
    }

    /// Label shown in the length select.
    pub fn label(self) -> &'static str {
        match self {
            Length::Short => "Short (500-800 words)",
            Length::Medium => "Medium (1000-1500 words)",
            Length::Long => "Long (2000-3000 words)",
        }
    }
}

/// Story generator parameters.
///
/// Kept in the visitor session so the form keeps its values between page
/// loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryForm {
    pub character_name: String,
    pub theme: Theme,
    pub genre: Genre,
    pub location: String,
    pub length: Length,
}

impl StoryForm {
    /// Validates the form and builds the generation request.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::MissingCharacterName`] if the trimmed character name is empty
    /// - [`ValidationError::MissingLocation`] if the trimmed location is empty
    pub fn validate(&self) -> Result<GenerateRequest, ValidationError> {
        let character_name = self.character_name.trim();
        let location = self.location.trim();

        if character_name.is_empty() {
            return Err(ValidationError::MissingCharacterName);
        }

        if location.is_empty() {
            return Err(ValidationError::MissingLocation);
        }

        Ok(GenerateRequest {
            character_name: character_name.to_string(),
            theme: self.theme.as_str().to_string(),
            genre: self.genre.as_str().to_string(),
            location: location.to_string(),
            length: self.length.as_str().to_string(),
        })
    }
}
